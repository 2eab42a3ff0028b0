use crate::domain::tag::tag_name_from_ref;
use crate::error::{ReleaseError, Result};
use crate::registry::{ReleaseRegistry, TagRef, TagRefPage};
use std::cell::{Cell, RefCell};

const DEFAULT_PAGE_SIZE: usize = 100;

/// In-memory registry for testing without network access
///
/// Records every tag creation so tests can assert on side effects.
#[derive(Debug)]
pub struct MockRegistry {
    tags: Vec<TagRef>,
    page_size: usize,
    failing_page: Option<u32>,
    list_calls: Cell<usize>,
    created: RefCell<Vec<TagRef>>,
}

impl MockRegistry {
    /// Create a new empty mock registry
    pub fn new() -> Self {
        MockRegistry::with_tags(Vec::new(), DEFAULT_PAGE_SIZE)
    }

    /// Registry pre-populated with tags, served `page_size` per page
    pub fn with_tags(tags: Vec<TagRef>, page_size: usize) -> Self {
        MockRegistry {
            tags,
            page_size: page_size.max(1),
            failing_page: None,
            list_calls: Cell::new(0),
            created: RefCell::new(Vec::new()),
        }
    }

    /// Add an existing tag
    pub fn add_tag(&mut self, name: impl Into<String>, sha: impl Into<String>) {
        self.tags.push(TagRef::new(name, sha));
    }

    /// Make listing of `page` fail with a registry error
    pub fn fail_on_page(&mut self, page: u32) {
        self.failing_page = Some(page);
    }

    /// Number of page requests served so far
    pub fn list_calls(&self) -> usize {
        self.list_calls.get()
    }

    /// Tags created through this registry, in call order
    pub fn created(&self) -> Vec<TagRef> {
        self.created.borrow().clone()
    }

    fn exists(&self, tag: &str) -> bool {
        self.tags
            .iter()
            .chain(self.created.borrow().iter())
            .any(|t| tag_name_from_ref(&t.name) == tag)
    }
}

impl Default for MockRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl ReleaseRegistry for MockRegistry {
    fn list_tag_refs(&self, _owner: &str, _repo: &str, page: u32) -> Result<TagRefPage> {
        self.list_calls.set(self.list_calls.get() + 1);

        if self.failing_page == Some(page) {
            return Err(ReleaseError::registry(format!(
                "listing page {} failed",
                page
            )));
        }

        let start = (page.saturating_sub(1) as usize) * self.page_size;
        let refs: Vec<TagRef> = self
            .tags
            .iter()
            .skip(start)
            .take(self.page_size)
            .cloned()
            .collect();
        let next_page = (start + self.page_size < self.tags.len()).then_some(page + 1);

        Ok(TagRefPage { refs, next_page })
    }

    fn create_tag_ref(&self, _owner: &str, _repo: &str, tag: &str, sha: &str) -> Result<()> {
        if self.exists(tag) {
            return Err(ReleaseError::TagAlreadyExists(tag.to_string()));
        }
        self.created.borrow_mut().push(TagRef::new(tag, sha));
        Ok(())
    }
}
