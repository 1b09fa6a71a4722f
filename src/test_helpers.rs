//! Shared test helpers: record builders and an in-memory page source.

use crate::error::{Error, Result};
use crate::source::PageSource;
use crate::types::{Artwork, ArtworkId, ArtworkPage, Pagination};
use async_trait::async_trait;
use std::ops::RangeInclusive;
use std::sync::Mutex;

/// Artwork with predictable field values derived from `id`
pub(crate) fn artwork(id: u64) -> Artwork {
    Artwork {
        id: ArtworkId(id),
        title: Some(format!("Artwork {id}")),
        place_of_origin: Some("France".to_string()),
        artist_display: Some(format!("Artist {id}")),
        inscriptions: None,
        date_start: Some(1800 + (id % 200) as i32),
        date_end: Some(1801 + (id % 200) as i32),
    }
}

/// Page holding the artworks of `ids`, reporting `total` records
pub(crate) fn page_of(ids: RangeInclusive<u64>, total: u64) -> ArtworkPage {
    let data: Vec<Artwork> = ids.map(artwork).collect();
    ArtworkPage {
        pagination: Pagination {
            total,
            limit: data.len() as u32,
            ..Default::default()
        },
        data,
    }
}

enum Behaviour {
    /// Serve a fixed list of records, paginated
    Records(Vec<Artwork>),
    /// Always serve full pages of fresh ids and report an unbounded total
    Endless,
    /// Serve the same page regardless of the requested page number
    Repeating(ArtworkPage),
}

/// In-memory [`PageSource`] recording every call
pub(crate) struct FakeSource {
    behaviour: Behaviour,
    fail_on_page: Option<u32>,
    calls: Mutex<Vec<(u32, u32)>>,
}

impl FakeSource {
    /// Source over artworks `1..=count`
    pub(crate) fn with_records(count: u64) -> Self {
        Self::from_records((1..=count).map(artwork).collect())
    }

    /// Source over the given records, in order
    pub(crate) fn from_records(records: Vec<Artwork>) -> Self {
        Self {
            behaviour: Behaviour::Records(records),
            fail_on_page: None,
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Source that never runs out of full pages
    pub(crate) fn endless() -> Self {
        Self {
            behaviour: Behaviour::Endless,
            fail_on_page: None,
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Source that answers every request with `page`
    pub(crate) fn repeating(page: ArtworkPage) -> Self {
        Self {
            behaviour: Behaviour::Repeating(page),
            fail_on_page: None,
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Fail with an upstream error when `page` is requested
    pub(crate) fn failing_on(mut self, page: u32) -> Self {
        self.fail_on_page = Some(page);
        self
    }

    /// `(page, limit)` of every call so far
    pub(crate) fn calls(&self) -> Vec<(u32, u32)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl PageSource for FakeSource {
    async fn fetch_page(&self, page: u32, limit: u32) -> Result<ArtworkPage> {
        self.calls.lock().unwrap().push((page, limit));

        if self.fail_on_page == Some(page) {
            return Err(Error::Upstream {
                status: 500,
                url: format!("fake://artworks?page={page}&limit={limit}"),
            });
        }

        let start = u64::from(page - 1) * u64::from(limit);
        match &self.behaviour {
            Behaviour::Records(records) => {
                let data: Vec<Artwork> = records
                    .iter()
                    .skip(start as usize)
                    .take(limit as usize)
                    .cloned()
                    .collect();
                Ok(ArtworkPage {
                    data,
                    pagination: Pagination {
                        total: records.len() as u64,
                        limit,
                        offset: start,
                        total_pages: (records.len() as u64).div_ceil(u64::from(limit)),
                        current_page: page,
                    },
                })
            }
            Behaviour::Endless => Ok(ArtworkPage {
                data: (start + 1..=start + u64::from(limit)).map(artwork).collect(),
                pagination: Pagination {
                    total: u64::MAX,
                    limit,
                    offset: start,
                    total_pages: u64::MAX,
                    current_page: page,
                },
            }),
            Behaviour::Repeating(fixed) => Ok(fixed.clone()),
        }
    }

    fn name(&self) -> &'static str {
        "fake"
    }
}
