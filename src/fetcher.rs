use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use thiserror::Error;
use tracing::info;
use url::Url;

use crate::config::WatcherConfig;

#[derive(Error, Debug)]
pub enum FetchError {
    #[error("request for {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("unexpected status {status} for {url}")]
    Status { url: String, status: StatusCode },
}

/// Fetches one page body over HTTP.
#[async_trait]
pub trait Fetch: Send + Sync {
    async fn fetch(&self, url: &Url) -> Result<String, FetchError>;
}

/// reqwest-backed fetcher. One GET per call, no redirect suppression, no
/// retries; only status 200 counts as success.
pub struct PageFetcher {
    client: Client,
}

impl PageFetcher {
    pub fn new(config: &WatcherConfig) -> crate::Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout))
            .user_agent(&config.user_agent)
            .build()?;
        Ok(Self { client })
    }
}

#[async_trait]
impl Fetch for PageFetcher {
    async fn fetch(&self, url: &Url) -> Result<String, FetchError> {
        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|source| FetchError::Transport {
                url: url.to_string(),
                source,
            })?;

        let status = response.status();
        info!("Response for {}: {}", url, status);
        if status != StatusCode::OK {
            return Err(FetchError::Status {
                url: url.to_string(),
                status,
            });
        }

        response.text().await.map_err(|source| FetchError::Transport {
            url: url.to_string(),
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn test_fetcher() -> PageFetcher {
        PageFetcher::new(&WatcherConfig {
            request_timeout: 5,
            ..WatcherConfig::default()
        })
        .unwrap()
    }

    #[tokio::test]
    async fn test_fetch_returns_body_on_200() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/item"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>$42</html>"))
            .mount(&server)
            .await;

        let url = Url::parse(&format!("{}/item", server.uri())).unwrap();
        let body = test_fetcher().fetch(&url).await.unwrap();
        assert_eq!(body, "<html>$42</html>");
    }

    #[tokio::test]
    async fn test_non_200_status_is_an_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let url = Url::parse(&format!("{}/missing", server.uri())).unwrap();
        let err = test_fetcher().fetch(&url).await.unwrap_err();
        assert!(matches!(
            err,
            FetchError::Status { status, .. } if status == StatusCode::NOT_FOUND
        ));
    }

    #[tokio::test]
    async fn test_server_error_status_is_an_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let url = Url::parse(&format!("{}/broken", server.uri())).unwrap();
        let err = test_fetcher().fetch(&url).await.unwrap_err();
        assert!(matches!(err, FetchError::Status { .. }));
    }

    #[tokio::test]
    async fn test_connection_failure_is_transport_error() {
        // Nothing listens on this port.
        let url = Url::parse("http://127.0.0.1:1/unreachable").unwrap();
        let err = test_fetcher().fetch(&url).await.unwrap_err();
        assert!(matches!(err, FetchError::Transport { .. }));
    }
}
