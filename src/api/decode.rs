//! Mapping of a content API search response onto [`Article`] records.
//!
//! The whole batch is accepted or rejected as one: a single malformed result
//! discards everything decoded so far.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use tracing::{debug, instrument, warn};

use crate::{
    error::DecodeError,
    models::{Article, CONTRIBUTOR_NOT_AVAILABLE, THUMBNAIL_NOT_AVAILABLE},
};

/// How contributor tags turn into articles.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize, EnumString, Display,
)]
#[strum(serialize_all = "kebab-case", ascii_case_insensitive)]
#[serde(rename_all = "kebab-case")]
pub enum ContributorPolicy {
    /// One article per contributor tag. Results without tags produce nothing.
    #[default]
    PerTag,
    /// One article per result, credited to its first contributor tag.
    Primary,
}

#[derive(Debug, Deserialize)]
struct Envelope {
    response: SearchResponse,
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    results: Vec<SearchResult>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SearchResult {
    web_title: String,
    section_name: String,
    web_publication_date: String,
    web_url: String,
    fields: Fields,
    tags: Vec<Tag>,
}

#[derive(Debug, Deserialize)]
struct Fields {
    thumbnail: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Tag {
    web_title: Option<String>,
    web_url: Option<String>,
}

impl Tag {
    fn author(&self) -> String {
        self.web_title
            .clone()
            .unwrap_or_else(|| CONTRIBUTOR_NOT_AVAILABLE.to_string())
    }

    fn author_link(&self) -> String {
        self.web_url
            .clone()
            .unwrap_or_else(|| CONTRIBUTOR_NOT_AVAILABLE.to_string())
    }
}

impl SearchResult {
    fn article(&self, thumbnail: &str, tag: Option<&Tag>) -> Article {
        let (author, author_link) = match tag {
            Some(tag) => (tag.author(), tag.author_link()),
            None => (
                CONTRIBUTOR_NOT_AVAILABLE.to_string(),
                CONTRIBUTOR_NOT_AVAILABLE.to_string(),
            ),
        };
        Article::new(
            self.web_title.clone(),
            self.section_name.clone(),
            self.web_publication_date.clone(),
            self.web_url.clone(),
            thumbnail.to_string(),
            author,
            author_link,
        )
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Decoder {
    policy: ContributorPolicy,
}

impl Decoder {
    pub fn new(policy: ContributorPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> ContributorPolicy {
        self.policy
    }

    /// Decodes `raw`, logging and discarding any failure.
    ///
    /// `None` means there was nothing to decode or the payload was rejected;
    /// `Some(vec![])` is a well-formed response without articles.
    pub fn decode(&self, raw: Option<&str>) -> Option<Vec<Article>> {
        let raw = raw?;
        match self.try_decode(raw) {
            Ok(articles) => Some(articles),
            Err(DecodeError::Empty) => {
                debug!("Nothing to decode");
                None
            }
            Err(e) => {
                warn!("Discarding response: {}", e);
                None
            }
        }
    }

    #[instrument(skip(self, raw), fields(policy = %self.policy, len = raw.len()))]
    pub fn try_decode(&self, raw: &str) -> Result<Vec<Article>, DecodeError> {
        if raw.is_empty() {
            return Err(DecodeError::Empty);
        }

        let envelope: Envelope = serde_json::from_str(raw)?;

        let mut articles = Vec::new();
        for result in &envelope.response.results {
            let thumbnail = result
                .fields
                .thumbnail
                .as_deref()
                .unwrap_or(THUMBNAIL_NOT_AVAILABLE);

            match self.policy {
                ContributorPolicy::PerTag => {
                    articles.extend(
                        result
                            .tags
                            .iter()
                            .map(|tag| result.article(thumbnail, Some(tag))),
                    );
                }
                ContributorPolicy::Primary => {
                    articles.push(result.article(thumbnail, result.tags.first()));
                }
            }
        }

        debug!(
            "Decoded {} articles from {} results",
            articles.len(),
            envelope.response.results.len()
        );

        Ok(articles)
    }
}

/// [`Decoder::decode`] with the default [`ContributorPolicy::PerTag`].
pub fn decode(raw: Option<&str>) -> Option<Vec<Article>> {
    Decoder::default().decode(raw)
}
