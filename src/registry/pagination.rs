use crate::boundary::BoundaryWarning;
use crate::domain::{ReleaseRef, TagPattern};
use crate::error::Result;
use crate::registry::{ReleaseRegistry, TagRef};
use tracing::{debug, warn};

const FIRST_PAGE: u32 = 1;

/// Lazy, restartable walk over every page of a tag listing
///
/// Yields one `Result` per page. After an error the walk stops; a partial
/// listing is never returned by [TagRefPages::drain].
pub struct TagRefPages<'a, R: ReleaseRegistry + ?Sized> {
    registry: &'a R,
    owner: &'a str,
    repo: &'a str,
    next: Option<u32>,
}

impl<'a, R: ReleaseRegistry + ?Sized> TagRefPages<'a, R> {
    pub fn new(registry: &'a R, owner: &'a str, repo: &'a str) -> Self {
        TagRefPages {
            registry,
            owner,
            repo,
            next: Some(FIRST_PAGE),
        }
    }

    /// Start again from the first page
    pub fn restart(&mut self) {
        self.next = Some(FIRST_PAGE);
    }

    /// Fetch every remaining page, failing if any page fails
    pub fn drain(self) -> Result<Vec<TagRef>> {
        let mut all = Vec::new();
        for page in self {
            all.extend(page?);
        }
        Ok(all)
    }
}

impl<R: ReleaseRegistry + ?Sized> Iterator for TagRefPages<'_, R> {
    type Item = Result<Vec<TagRef>>;

    fn next(&mut self) -> Option<Self::Item> {
        let page = self.next.take()?;
        match self.registry.list_tag_refs(self.owner, self.repo, page) {
            Ok(listing) => {
                debug!(page, refs = listing.refs.len(), next = ?listing.next_page, "listed tag page");
                // a registry that repeats or rewinds page numbers would loop forever
                self.next = listing.next_page.filter(|next| *next > page);
                Some(Ok(listing.refs))
            }
            Err(e) => Some(Err(e)),
        }
    }
}

/// Every tag in the registry that parses as a version under `pattern`
///
/// Tags that do not parse are skipped with a warning.
pub fn collect_release_refs<R: ReleaseRegistry + ?Sized>(
    registry: &R,
    owner: &str,
    repo: &str,
    pattern: &TagPattern,
) -> Result<Vec<ReleaseRef>> {
    let tags = TagRefPages::new(registry, owner, repo).drain()?;
    let mut releases = Vec::with_capacity(tags.len());

    for tag in tags {
        match pattern.parse(&tag.name) {
            Some(version) => releases.push(ReleaseRef::new(version, tag.sha)),
            None => {
                let warning = BoundaryWarning::UnparsableTag {
                    tag: tag.name,
                    pattern: pattern.pattern.clone(),
                };
                warn!("{}", warning);
            }
        }
    }

    Ok(releases)
}
