//! HTTP page source backed by the public artwork API.

use super::PageSource;
use crate::config::SourceConfig;
use crate::error::{Error, Result};
use crate::types::ArtworkPage;
use async_trait::async_trait;
use url::Url;

/// Fields requested upstream; exactly the columns the table renders
pub const ARTWORK_FIELDS: &str =
    "id,title,place_of_origin,artist_display,inscriptions,date_start,date_end";

/// Artwork API client issuing `GET {base}/artworks?page={n}&limit={size}`
#[derive(Clone, Debug)]
pub struct ArtworkClient {
    http: reqwest::Client,
    endpoint: Url,
    max_page_size: u32,
}

impl ArtworkClient {
    /// Create a client for the configured base URL
    ///
    /// `max_page_size` bounds the `limit` accepted by [`PageSource::fetch_page`].
    pub fn new(config: &SourceConfig, max_page_size: u32) -> Result<Self> {
        let endpoint = format!("{}/artworks", config.base_url.trim_end_matches('/'));
        let endpoint = Url::parse(&endpoint)
            .map_err(|e| Error::config("source.base_url", format!("invalid URL: {e}")))?;

        let http = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(|e| Error::Other(format!("failed to create HTTP client: {e}")))?;

        Ok(Self {
            http,
            endpoint,
            max_page_size,
        })
    }

    /// The `/artworks` endpoint this client queries
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    fn check_request(&self, page: u32, limit: u32) -> Result<()> {
        if page == 0 {
            return Err(Error::InvalidRequest("page numbers start at 1".into()));
        }
        if limit == 0 || limit > self.max_page_size {
            return Err(Error::InvalidRequest(format!(
                "page size {limit} is outside 1..={}",
                self.max_page_size
            )));
        }
        Ok(())
    }
}

#[async_trait]
impl PageSource for ArtworkClient {
    async fn fetch_page(&self, page: u32, limit: u32) -> Result<ArtworkPage> {
        self.check_request(page, limit)?;

        tracing::debug!(page, limit, endpoint = %self.endpoint, "Fetching artwork page");

        let response = self
            .http
            .get(self.endpoint.clone())
            .query(&[
                ("page", page.to_string()),
                ("limit", limit.to_string()),
                ("fields", ARTWORK_FIELDS.to_string()),
            ])
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    tracing::warn!(page, error = %e, "Artwork page request timed out");
                } else {
                    tracing::warn!(page, error = %e, "Artwork page request failed");
                }
                Error::Network(e)
            })?;

        let status = response.status();
        if !status.is_success() {
            let url = response.url().to_string();
            tracing::warn!(page, status = status.as_u16(), %url, "Upstream returned error status");
            return Err(Error::Upstream {
                status: status.as_u16(),
                url,
            });
        }

        let body = response.bytes().await?;
        let decoded: ArtworkPage =
            serde_json::from_slice(&body).map_err(|e| Error::Decode(e.to_string()))?;

        tracing::debug!(
            page,
            count = decoded.len(),
            total = decoded.pagination.total,
            "Artwork page fetched"
        );

        Ok(decoded)
    }

    fn name(&self) -> &'static str {
        "artic-http"
    }
}

// unwrap/expect are acceptable in tests for concise failure-on-error assertions
#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ArtworkId;
    use std::time::Duration;
    use wiremock::matchers::{header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(server: &MockServer) -> ArtworkClient {
        let config = SourceConfig {
            base_url: format!("{}/api/v1/", server.uri()),
            request_timeout: Duration::from_secs(5),
            user_agent: "artwork-table-tests".into(),
        };
        ArtworkClient::new(&config, 100).unwrap()
    }

    fn page_body() -> serde_json::Value {
        serde_json::json!({
            "pagination": {
                "total": 3,
                "limit": 2,
                "offset": 2,
                "total_pages": 2,
                "current_page": 2
            },
            "data": [
                {
                    "id": 7,
                    "title": "Nighthawks",
                    "place_of_origin": "United States",
                    "artist_display": "Edward Hopper\nAmerican, 1882-1967",
                    "inscriptions": null,
                    "date_start": 1942,
                    "date_end": 1942
                }
            ]
        })
    }

    #[test]
    fn endpoint_tolerates_trailing_slash() {
        let config = SourceConfig {
            base_url: "https://api.example.org/api/v1/".into(),
            ..Default::default()
        };
        let client = ArtworkClient::new(&config, 100).unwrap();
        assert_eq!(
            client.endpoint().as_str(),
            "https://api.example.org/api/v1/artworks"
        );
    }

    #[tokio::test]
    async fn fetch_page_sends_page_limit_and_fields() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v1/artworks"))
            .and(query_param("page", "2"))
            .and(query_param("limit", "2"))
            .and(query_param("fields", ARTWORK_FIELDS))
            .and(header("user-agent", "artwork-table-tests"))
            .respond_with(ResponseTemplate::new(200).set_body_json(page_body()))
            .expect(1)
            .mount(&server)
            .await;

        let page = client_for(&server).fetch_page(2, 2).await.unwrap();

        assert_eq!(page.len(), 1);
        assert_eq!(page.data[0].id, ArtworkId(7));
        assert_eq!(page.data[0].title.as_deref(), Some("Nighthawks"));
        assert_eq!(page.pagination.total, 3);
        assert_eq!(page.pagination.current_page, 2);
    }

    #[tokio::test]
    async fn fetch_page_maps_error_status_to_upstream_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v1/artworks"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let err = client_for(&server).fetch_page(1, 12).await.unwrap_err();
        match err {
            Error::Upstream { status, url } => {
                assert_eq!(status, 503);
                assert!(url.contains("/api/v1/artworks"));
                assert!(url.contains("page=1"));
            }
            other => panic!("expected upstream error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn fetch_page_maps_malformed_body_to_decode_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v1/artworks"))
            .respond_with(ResponseTemplate::new(200).set_body_string("{\"data\": 42}"))
            .mount(&server)
            .await;

        let err = client_for(&server).fetch_page(1, 12).await.unwrap_err();
        assert!(matches!(err, Error::Decode(_)), "unexpected: {err:?}");
    }

    #[tokio::test]
    async fn invalid_requests_are_rejected_without_io() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(page_body()))
            .expect(0)
            .mount(&server)
            .await;

        let client = client_for(&server);
        assert!(matches!(
            client.fetch_page(0, 12).await,
            Err(Error::InvalidRequest(_))
        ));
        assert!(matches!(
            client.fetch_page(1, 0).await,
            Err(Error::InvalidRequest(_))
        ));
        assert!(matches!(
            client.fetch_page(1, 101).await,
            Err(Error::InvalidRequest(_))
        ));
    }

    #[tokio::test]
    async fn unreachable_upstream_is_a_network_error() {
        let config = SourceConfig {
            base_url: "http://127.0.0.1:1".into(),
            request_timeout: Duration::from_secs(2),
            ..Default::default()
        };
        let client = ArtworkClient::new(&config, 100).unwrap();

        let err = client.fetch_page(1, 12).await.unwrap_err();
        assert!(matches!(err, Error::Network(_)), "unexpected: {err:?}");
    }
}
