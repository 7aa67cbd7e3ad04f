use bon::Builder;
use strum::{Display, EnumString};

use crate::{
    error::ClientError,
    paths::{API_KEY_ENV, BASE_URL, SEARCH_PATH, SHOW_FIELDS, SHOW_TAGS, TEST_API_KEY},
};

/// Upper bound the content API accepts for `page-size`.
pub const MAX_PAGE_SIZE: u32 = 200;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, EnumString, Display)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum OrderBy {
    #[default]
    Newest,
    Oldest,
    Relevance,
}

#[derive(Debug, Clone, Builder)]
pub struct GuardianQuery {
    #[builder(into)]
    q: Option<String>,
    #[builder(into)]
    section: Option<String>,
    #[builder(default)]
    order_by: OrderBy,
    #[builder(default = 10)]
    page_size: u32,
    #[builder(into, default = TEST_API_KEY.to_string())]
    api_key: String,
}

impl GuardianQuery {
    /// Query with no filters, keyed from `GUARDIAN_API_KEY` when set.
    pub fn from_env() -> Self {
        Self::builder().api_key(api_key_from_env()).build()
    }

    pub fn to_url(&self) -> Result<String, ClientError> {
        if self.page_size == 0 || self.page_size > MAX_PAGE_SIZE {
            return Err(ClientError::InvalidRequest(format!(
                "page size must be between 1 and {MAX_PAGE_SIZE}, got {}",
                self.page_size
            )));
        }
        if self.api_key.is_empty() {
            return Err(ClientError::InvalidRequest("API key is empty".to_string()));
        }

        let mut params: Vec<(&str, String)> = Vec::new();
        if let Some(q) = &self.q {
            params.push(("q", q.clone()));
        }
        if let Some(section) = &self.section {
            params.push(("section", section.clone()));
        }
        params.push(("order-by", self.order_by.to_string()));
        params.push(("page-size", self.page_size.to_string()));
        params.push(("show-fields", SHOW_FIELDS.to_string()));
        params.push(("show-tags", SHOW_TAGS.to_string()));
        params.push(("api-key", self.api_key.clone()));

        let query = params
            .iter()
            .map(|(k, v)| format!("{}={}", k, urlencoding::encode(v)))
            .collect::<Vec<_>>()
            .join("&");

        Ok(format!("{BASE_URL}{SEARCH_PATH}?{query}"))
    }
}

pub fn api_key_from_env() -> String {
    std::env::var(API_KEY_ENV)
        .ok()
        .filter(|key| !key.is_empty())
        .unwrap_or_else(|| TEST_API_KEY.to_string())
}
