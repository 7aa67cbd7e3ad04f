use async_trait::async_trait;
use reqwest::{StatusCode, Url};
use tokio::time::Instant;
use tracing::{debug, error, instrument, warn};

use crate::{config::FetchConfig, error::FetchError};

/// Transport that turns a URL into a response body.
#[async_trait]
pub trait Fetcher: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<String, FetchError>;
}

#[derive(Debug, Clone)]
pub struct HttpFetcher {
    inner: reqwest::Client,
}

impl HttpFetcher {
    pub fn new(config: &FetchConfig) -> Result<Self, FetchError> {
        let inner = reqwest::ClientBuilder::new()
            .https_only(config.https_only)
            .connect_timeout(config.connect_timeout)
            .read_timeout(config.read_timeout)
            .user_agent(config.user_agent.as_str())
            .build()
            .map_err(|e| FetchError::io(format!("failed to build HTTP client: {e}")))?;

        Ok(Self { inner })
    }

    /// Like [`Fetcher::fetch`], but gives up once `deadline` passes.
    pub async fn fetch_with_deadline(
        &self,
        url: &str,
        deadline: Instant,
    ) -> Result<String, FetchError> {
        match tokio::time::timeout_at(deadline, self.fetch(url)).await {
            Ok(res) => res,
            Err(_) => {
                warn!("Deadline exceeded while fetching {}", redact_url(url));
                Err(FetchError::io("deadline exceeded"))
            }
        }
    }
}

/// `url` stripped of credentials, query and fragment, fit for logs and errors.
pub fn redact_url(url: &str) -> String {
    match Url::parse(url) {
        Ok(mut parsed) => {
            parsed.set_query(None);
            parsed.set_fragment(None);
            let _ = parsed.set_username("");
            let _ = parsed.set_password(None);
            parsed.to_string()
        }
        Err(_) => url.split(['?', '#']).next().unwrap_or_default().to_string(),
    }
}

pub(crate) fn parse_url(url: &str) -> Result<Url, FetchError> {
    let parsed = Url::parse(url)
        .map_err(|e| FetchError::invalid_url(format!("'{}': {e}", redact_url(url))))?;
    match parsed.scheme() {
        "http" | "https" => Ok(parsed),
        scheme => Err(FetchError::invalid_url(format!(
            "'{}': unsupported scheme '{scheme}'",
            redact_url(url)
        ))),
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    #[instrument(skip(self, url), fields(url = %redact_url(url)))]
    async fn fetch(&self, url: &str) -> Result<String, FetchError> {
        let url = parse_url(url).inspect_err(|e| error!("{}", e))?;

        debug!("Sending HTTP request");
        let res = self.inner.get(url).send().await.map_err(|e| {
            let err = FetchError::from(e);
            warn!("Network error occurred: {}", err);
            err
        })?;

        let status = res.status();
        if status != StatusCode::OK {
            error!(
                "Error response code: {} {}",
                status.as_u16(),
                status.canonical_reason().unwrap_or("")
            );
            return Err(FetchError::HttpStatus(status.as_u16()));
        }

        let body = res.bytes().await.map_err(|e| {
            let err = FetchError::from(e);
            warn!("Failed to read response body: {}", err);
            err
        })?;

        debug!("Read {} bytes", body.len());
        Ok(String::from_utf8_lossy(&body).into_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use tokio::{
        io::{AsyncReadExt, AsyncWriteExt},
        net::TcpListener,
    };

    /// Serves one connection with `response`, then holds the socket for `hold`.
    async fn serve_once(response: Vec<u8>, hold: Duration) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut buf = Vec::new();
            let mut chunk = [0u8; 1024];
            while !buf.windows(4).any(|w| w == b"\r\n\r\n") {
                let n = socket.read(&mut chunk).await.unwrap();
                if n == 0 {
                    return;
                }
                buf.extend_from_slice(&chunk[..n]);
            }
            let _ = socket.write_all(&response).await;
            let _ = socket.flush().await;
            tokio::time::sleep(hold).await;
        });

        format!("http://{addr}/search")
    }

    fn fetcher(read_timeout: Duration) -> HttpFetcher {
        let config = FetchConfig::builder().read_timeout(read_timeout).build();
        HttpFetcher::new(&config).unwrap()
    }

    #[tokio::test]
    async fn test_fetch_ok() {
        let body = r#"{"response":{"results":[]}}"#;
        let response = format!(
            "HTTP/1.1 200 OK\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
            body.len(),
            body
        );
        let url = serve_once(response.into_bytes(), Duration::ZERO).await;

        let text = fetcher(Duration::from_secs(5)).fetch(&url).await.unwrap();
        assert_eq!(text, body);
    }

    #[tokio::test]
    async fn test_fetch_not_found() {
        let response =
            b"HTTP/1.1 404 Not Found\r\nContent-Length: 9\r\nConnection: close\r\n\r\nnot found";
        let response = response.to_vec();
        let url = serve_once(response, Duration::ZERO).await;

        let err = fetcher(Duration::from_secs(5)).fetch(&url).await.unwrap_err();
        assert_eq!(err, FetchError::HttpStatus(404));
    }

    #[tokio::test]
    async fn test_fetch_other_success_status_is_rejected() {
        let response = b"HTTP/1.1 204 No Content\r\nConnection: close\r\n\r\n".to_vec();
        let url = serve_once(response, Duration::ZERO).await;

        let err = fetcher(Duration::from_secs(5)).fetch(&url).await.unwrap_err();
        assert_eq!(err, FetchError::HttpStatus(204));
    }

    #[tokio::test]
    async fn test_fetch_read_timeout() {
        let response = b"HTTP/1.1 200 OK\r\nContent-Length: 100\r\n\r\n{\"resp".to_vec();
        let url = serve_once(response, Duration::from_secs(3)).await;

        let err = fetcher(Duration::from_millis(200)).fetch(&url).await.unwrap_err();
        assert!(matches!(err, FetchError::IoFailure(_)), "got {err:?}");
    }

    #[tokio::test]
    async fn test_fetch_connection_refused() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let err = fetcher(Duration::from_secs(5))
            .fetch(&format!("http://{addr}/search"))
            .await
            .unwrap_err();
        assert!(matches!(err, FetchError::IoFailure(_)), "got {err:?}");
    }

    #[tokio::test]
    async fn test_fetch_invalid_url() {
        let f = fetcher(Duration::from_secs(5));
        assert!(matches!(f.fetch("not a url").await, Err(FetchError::InvalidUrl(_))));
        assert!(matches!(f.fetch("/search?q=x").await, Err(FetchError::InvalidUrl(_))));
        assert!(matches!(
            f.fetch("ftp://content.guardianapis.com/search").await,
            Err(FetchError::InvalidUrl(_))
        ));
    }

    #[tokio::test]
    async fn test_fetch_lossy_utf8() {
        let mut response =
            b"HTTP/1.1 200 OK\r\nContent-Length: 3\r\nConnection: close\r\n\r\n".to_vec();
        response.extend_from_slice(&[b'a', 0xff, b'b']);
        let url = serve_once(response, Duration::ZERO).await;

        let text = fetcher(Duration::from_secs(5)).fetch(&url).await.unwrap();
        assert_eq!(text, "a\u{fffd}b");
    }

    #[tokio::test]
    async fn test_fetch_with_deadline() {
        // Headers never arrive; only the deadline can end this.
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let (_socket, _) = listener.accept().await.unwrap();
            tokio::time::sleep(Duration::from_secs(5)).await;
        });

        let deadline = Instant::now() + Duration::from_millis(150);
        let err = fetcher(Duration::from_secs(10))
            .fetch_with_deadline(&format!("http://{addr}/search"), deadline)
            .await
            .unwrap_err();
        assert_eq!(err, FetchError::io("deadline exceeded"));
    }

    #[test]
    fn test_parse_url() {
        assert!(parse_url("https://content.guardianapis.com/search?q=x").is_ok());
        assert!(parse_url("http://127.0.0.1:8080/").is_ok());
        assert!(matches!(
            parse_url("mailto:someone@example.com"),
            Err(FetchError::InvalidUrl(_))
        ));
    }

    #[test]
    fn test_redact_url() {
        assert_eq!(
            redact_url("https://content.guardianapis.com/search?q=x&api-key=SECRET123#top"),
            "https://content.guardianapis.com/search"
        );
        assert_eq!(
            redact_url("https://user:pw@content.guardianapis.com/search"),
            "https://content.guardianapis.com/search"
        );
        assert_eq!(redact_url("http://[::1/search?api-key=SECRET123"), "http://[::1/search");
    }

    #[tokio::test]
    async fn test_errors_never_carry_the_query() {
        let f = fetcher(Duration::from_secs(5));

        let err = f.fetch("http://[::1/search?api-key=SECRET123").await.unwrap_err();
        assert!(matches!(err, FetchError::InvalidUrl(_)));
        assert!(!err.to_string().contains("SECRET123"), "got {err}");

        let err = f.fetch("ftp://example.com/search?api-key=SECRET123").await.unwrap_err();
        assert!(!err.to_string().contains("SECRET123"), "got {err}");

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);
        let err = f
            .fetch(&format!("http://{addr}/search?api-key=SECRET123"))
            .await
            .unwrap_err();
        assert!(matches!(err, FetchError::IoFailure(_)));
        assert!(!err.to_string().contains("SECRET123"), "got {err}");
        assert!(!err.to_string().contains("api-key"), "got {err}");
    }
}
