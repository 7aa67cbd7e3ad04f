use std::{
    sync::{
        atomic::{AtomicU64, Ordering},
        Arc,
    },
    time::Instant,
};

use bon::bon;
use parking_lot::RwLock;
use tracing::{debug, error, info, instrument};

use crate::{
    api::{decode::Decoder, search::GuardianQuery},
    config::FetchConfig,
    error::ClientError,
    http::{redact_url, Fetcher, HttpFetcher},
    models::Article,
};

/// What the display layer receives. Never an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Feed {
    Articles(Vec<Article>),
    NoResults,
    Unavailable { reason: String },
}

impl Feed {
    fn from_result(res: Result<Vec<Article>, ClientError>) -> Self {
        match res {
            Ok(articles) if articles.is_empty() => Self::NoResults,
            Ok(articles) => Self::Articles(articles),
            Err(e) => Self::Unavailable {
                reason: e.to_string(),
            },
        }
    }

    pub fn articles(&self) -> &[Article] {
        match self {
            Self::Articles(articles) => articles,
            _ => &[],
        }
    }

    /// The list to show; empty for both `NoResults` and `Unavailable`.
    pub fn into_articles(self) -> Vec<Article> {
        match self {
            Self::Articles(articles) => articles,
            _ => Vec::new(),
        }
    }

    pub fn is_unavailable(&self) -> bool {
        matches!(self, Self::Unavailable { .. })
    }
}

#[derive(Debug, Clone)]
pub struct FeedHealth {
    pub last_successful_request: Option<Instant>,
    pub total_requests: u64,
    pub failed_requests: u64,
    pub last_error: Option<(Instant, String)>,
}

#[derive(Debug, Default)]
struct HealthCounters {
    total_requests: AtomicU64,
    failed_requests: AtomicU64,
    last_successful_request: RwLock<Option<Instant>>,
    last_error: RwLock<Option<(Instant, String)>>,
}

#[derive(Clone)]
pub struct NewsClient {
    config: FetchConfig,
    fetcher: Arc<dyn Fetcher>,
    decoder: Decoder,
    health: Arc<HealthCounters>,
}

#[bon]
impl NewsClient {
    /// Without an explicit `fetcher` the client talks HTTP through reqwest.
    #[builder]
    pub fn new(
        #[builder(default)] config: FetchConfig,
        fetcher: Option<Arc<dyn Fetcher>>,
    ) -> Result<Self, ClientError> {
        let fetcher = match fetcher {
            Some(fetcher) => fetcher,
            None => Arc::new(HttpFetcher::new(&config)?),
        };

        Ok(Self {
            decoder: Decoder::new(config.contributor_policy),
            config,
            fetcher,
            health: Arc::new(HealthCounters::default()),
        })
    }
}

impl NewsClient {
    pub fn config(&self) -> &FetchConfig {
        &self.config
    }

    /// Fetches and decodes `url`, keeping the failure reason.
    #[instrument(skip(self, url), fields(url = %redact_url(url), policy = %self.decoder.policy()))]
    pub async fn fetch_articles(&self, url: &str) -> Result<Vec<Article>, ClientError> {
        if let Some(delay) = self.config.progress_delay {
            debug!("Waiting {:?} before fetching", delay);
            tokio::time::sleep(delay).await;
        }

        let res = self.fetch_and_decode(url).await;
        match &res {
            Ok(articles) => {
                info!("Loaded {} articles", articles.len());
                self.record_success();
            }
            Err(e) => {
                error!("Failed to load articles: {}", e);
                self.record_failure(&e.to_string());
            }
        }
        res
    }

    async fn fetch_and_decode(&self, url: &str) -> Result<Vec<Article>, ClientError> {
        let raw = self.fetcher.fetch(url).await?;
        Ok(self.decoder.try_decode(&raw)?)
    }

    /// Same pipeline as [`Self::fetch_articles`], folded into a [`Feed`].
    pub async fn load_feed(&self, url: &str) -> Feed {
        Feed::from_result(self.fetch_articles(url).await)
    }

    pub async fn search_articles(
        &self,
        query: &GuardianQuery,
    ) -> Result<Vec<Article>, ClientError> {
        let url = query.to_url()?;
        self.fetch_articles(&url).await
    }

    pub async fn search(&self, query: &GuardianQuery) -> Feed {
        Feed::from_result(self.search_articles(query).await)
    }

    pub(crate) fn record_success(&self) {
        self.health.total_requests.fetch_add(1, Ordering::Relaxed);
        *self.health.last_successful_request.write() = Some(Instant::now());
    }

    pub(crate) fn record_failure(&self, error: &str) {
        self.health.total_requests.fetch_add(1, Ordering::Relaxed);
        self.health.failed_requests.fetch_add(1, Ordering::Relaxed);
        *self.health.last_error.write() = Some((Instant::now(), error.to_string()));
    }

    pub fn health_status(&self) -> FeedHealth {
        FeedHealth {
            last_successful_request: *self.health.last_successful_request.read(),
            total_requests: self.health.total_requests.load(Ordering::Relaxed),
            failed_requests: self.health.failed_requests.load(Ordering::Relaxed),
            last_error: self.health.last_error.read().clone(),
        }
    }

    pub fn reset_health_metrics(&self) {
        self.health.total_requests.store(0, Ordering::Relaxed);
        self.health.failed_requests.store(0, Ordering::Relaxed);
        *self.health.last_successful_request.write() = None;
        *self.health.last_error.write() = None;
    }
}
