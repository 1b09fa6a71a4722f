//! Mock artwork collection served by wiremock
//!
//! Answers `GET /artworks?page=&limit=` from an in-memory list of records
//! and records every request, so tests can assert which pages were fetched.

use artwork_table::Config;
use serde_json::{Value, json};
use std::collections::HashMap;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, Request, Respond, ResponseTemplate};

/// Upstream record for `id`, in the shape the real API returns
pub fn artwork_json(id: u64) -> Value {
    json!({
        "id": id,
        "title": format!("Artwork {id}"),
        "place_of_origin": "Netherlands",
        "artist_display": format!("Painter {id}\nDutch, 1600-1660"),
        "inscriptions": null,
        "date_start": 1600 + id,
        "date_end": 1601 + id,
    })
}

/// Paginating responder over a fixed list of records
pub struct Collection {
    records: Vec<Value>,
    fail_page: Option<u64>,
}

impl Collection {
    /// Collection of artworks `1..=count`
    pub fn with_records(count: u64) -> Self {
        Self {
            records: (1..=count).map(artwork_json).collect(),
            fail_page: None,
        }
    }

    /// Answer requests for `page` with HTTP 500
    pub fn failing_on(mut self, page: u64) -> Self {
        self.fail_page = Some(page);
        self
    }
}

impl Respond for Collection {
    fn respond(&self, request: &Request) -> ResponseTemplate {
        let query: HashMap<String, String> = request.url.query_pairs().into_owned().collect();
        let page: u64 = query.get("page").and_then(|p| p.parse().ok()).unwrap_or(1);
        let limit: u64 = query.get("limit").and_then(|l| l.parse().ok()).unwrap_or(12);

        if self.fail_page == Some(page) {
            return ResponseTemplate::new(500).set_body_string("upstream exploded");
        }

        let total = self.records.len() as u64;
        let start = ((page - 1) * limit).min(total) as usize;
        let end = (start + limit as usize).min(self.records.len());

        ResponseTemplate::new(200).set_body_json(json!({
            "pagination": {
                "total": total,
                "limit": limit,
                "offset": start,
                "total_pages": total.div_ceil(limit.max(1)),
                "current_page": page,
            },
            "data": &self.records[start..end],
            "info": { "license_text": "test" },
        }))
    }
}

/// Start a mock server hosting `collection` at `/artworks`
pub async fn start_collection(collection: Collection) -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/artworks"))
        .respond_with(collection)
        .mount(&server)
        .await;
    server
}

/// `(page, limit)` of every request the mock server received, in order
pub async fn requested_pages(server: &MockServer) -> Vec<(u32, u32)> {
    server
        .received_requests()
        .await
        .unwrap_or_default()
        .iter()
        .map(|request| {
            let query: HashMap<String, String> =
                request.url.query_pairs().into_owned().collect();
            (
                query.get("page").and_then(|p| p.parse().ok()).unwrap_or(0),
                query.get("limit").and_then(|l| l.parse().ok()).unwrap_or(0),
            )
        })
        .collect()
}

/// Default configuration pointed at `server`
pub fn config_for(server: &MockServer) -> Config {
    let mut config = Config::default();
    config.source.base_url = server.uri();
    config
}
