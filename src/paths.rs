pub const BASE_URL: &str = "https://content.guardianapis.com/";
pub const SEARCH_PATH: &str = "search";

pub const SHOW_FIELDS: &str = "thumbnail";
pub const SHOW_TAGS: &str = "contributor";

/// Public developer key accepted by the content API.
pub const TEST_API_KEY: &str = "test";
pub const API_KEY_ENV: &str = "GUARDIAN_API_KEY";

pub const USER_AGENT: &str = concat!("guardian-ox/", env!("CARGO_PKG_VERSION"));
