//! GitHub REST API registry
//!
//! Lists tags through `GET /repos/{owner}/{repo}/git/matching-refs/tags` and
//! creates them with `POST /repos/{owner}/{repo}/git/refs`. GitHub Enterprise
//! hosts are reached by pointing `api_url` at `https://<host>/api/v3`.

use crate::domain::tag::tag_ref_name;
use crate::error::{ReleaseError, Result};
use crate::registry::{ReleaseRegistry, TagRef, TagRefPage};
use regex::Regex;
use reqwest::blocking::{Client, RequestBuilder, Response};
use reqwest::header::{ACCEPT, AUTHORIZATION, LINK, USER_AGENT};
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

pub const DEFAULT_API_URL: &str = "https://api.github.com";
pub const DEFAULT_PER_PAGE: u32 = 100;

#[derive(Debug, Deserialize)]
struct GitObject {
    sha: String,
}

#[derive(Debug, Deserialize)]
struct GitReference {
    #[serde(rename = "ref")]
    reference: String,
    object: GitObject,
}

#[derive(Debug, Serialize)]
struct CreateReference<'a> {
    #[serde(rename = "ref")]
    reference: String,
    sha: &'a str,
}

#[derive(Debug, Deserialize)]
struct ApiError {
    message: String,
}

/// Registry backed by the GitHub API
pub struct GitHubRegistry {
    client: Client,
    api_url: String,
    token: Option<String>,
    per_page: u32,
    next_link: Regex,
}

impl GitHubRegistry {
    pub fn new(api_url: impl Into<String>, token: Option<String>, per_page: u32) -> Result<Self> {
        let next_link = Regex::new(r#"<[^>]*[?&]page=(\d+)[^>]*>;\s*rel="next""#)
            .map_err(|e| ReleaseError::config(format!("Invalid link pattern: {}", e)))?;

        Ok(GitHubRegistry {
            client: Client::new(),
            api_url: api_url.into().trim_end_matches('/').to_string(),
            token,
            per_page: per_page.clamp(1, DEFAULT_PER_PAGE),
            next_link,
        })
    }

    fn request(&self, builder: RequestBuilder) -> RequestBuilder {
        let builder = builder
            .header(ACCEPT, "application/vnd.github+json")
            .header(USER_AGENT, concat!("semantic-release/", env!("CARGO_PKG_VERSION")));
        match &self.token {
            Some(token) => builder.header(AUTHORIZATION, format!("Bearer {}", token)),
            None => builder,
        }
    }

    /// Page number of the `rel="next"` entry of a Link header
    fn next_page(&self, link: Option<&str>) -> Option<u32> {
        let link = link?;
        self.next_link
            .captures(link)
            .and_then(|c| c.get(1))
            .and_then(|m| m.as_str().parse().ok())
    }

    fn api_error(response: Response, context: &str) -> ReleaseError {
        let status = response.status();
        let message = response
            .json::<ApiError>()
            .map(|e| e.message)
            .unwrap_or_else(|_| "no error message".to_string());
        ReleaseError::registry(format!("{}: {} ({})", context, status, message))
    }

    /// Tag refs and next page number of a successful listing
    fn parse_page(&self, link: Option<&str>, body: &str) -> Result<TagRefPage> {
        let refs = serde_json::from_str::<Vec<GitReference>>(body)
            .map_err(|e| ReleaseError::registry(format!("Invalid tag listing: {}", e)))?
            .into_iter()
            .map(|r| TagRef::new(r.reference, r.object.sha))
            .collect();
        Ok(TagRefPage {
            refs,
            next_page: self.next_page(link),
        })
    }
}

/// How to read a tag listing response
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ListingStatus {
    Refs,
    /// The repository has no tags at all
    Empty,
    Failed,
}

/// A repository without any tags answers 404 on the first page. Any other
/// failure, a 404 past the first page included, leaves the listing
/// incomplete.
fn listing_status(status: StatusCode, page: u32) -> ListingStatus {
    if status.is_success() {
        ListingStatus::Refs
    } else if status == StatusCode::NOT_FOUND && page <= 1 {
        ListingStatus::Empty
    } else {
        ListingStatus::Failed
    }
}

/// Error for a rejected tag creation
fn creation_error(status: StatusCode, message: &str, tag: &str) -> ReleaseError {
    if status == StatusCode::UNPROCESSABLE_ENTITY && message.contains("already exists") {
        ReleaseError::TagAlreadyExists(tag.to_string())
    } else {
        ReleaseError::registry(format!("creating tag failed: {} ({})", status, message))
    }
}

impl ReleaseRegistry for GitHubRegistry {
    fn list_tag_refs(&self, owner: &str, repo: &str, page: u32) -> Result<TagRefPage> {
        let url = format!(
            "{}/repos/{}/{}/git/matching-refs/tags",
            self.api_url, owner, repo
        );
        let response = self
            .request(self.client.get(&url))
            .query(&[("per_page", self.per_page), ("page", page)])
            .send()?;

        match listing_status(response.status(), page) {
            ListingStatus::Empty => {
                debug!(owner, repo, "no tag references found");
                Ok(TagRefPage::default())
            }
            ListingStatus::Failed => Err(Self::api_error(
                response,
                &format!("listing tags failed on page {}", page),
            )),
            ListingStatus::Refs => {
                let link = response
                    .headers()
                    .get(LINK)
                    .and_then(|value| value.to_str().ok())
                    .map(str::to_string);
                let body = response.text()?;
                self.parse_page(link.as_deref(), &body)
            }
        }
    }

    fn create_tag_ref(&self, owner: &str, repo: &str, tag: &str, sha: &str) -> Result<()> {
        let url = format!("{}/repos/{}/{}/git/refs", self.api_url, owner, repo);
        let body = CreateReference {
            reference: tag_ref_name(tag),
            sha,
        };
        let response = self.request(self.client.post(&url)).json(&body).send()?;

        let status = response.status();
        if status.is_success() {
            info!(owner, repo, tag, sha, "created tag reference");
            return Ok(());
        }
        let message = response
            .json::<ApiError>()
            .map(|e| e.message)
            .unwrap_or_else(|_| "no error message".to_string());
        Err(creation_error(status, &message, tag))
    }
}
