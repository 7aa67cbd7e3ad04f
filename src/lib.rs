pub mod api;
pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod models;
pub mod paths;

pub mod prelude {
    pub use crate::api::decode::{decode, ContributorPolicy, Decoder};
    pub use crate::api::search::{GuardianQuery, OrderBy};
    pub use crate::client::{Feed, NewsClient};
    pub use crate::config::FetchConfig;
    pub use crate::error::{ClientError, DecodeError, FetchError};
    pub use crate::http::{Fetcher, HttpFetcher};
    pub use crate::models::{Article, RenderModel};
}
