use crate::error::{Error, Result};
use crate::events::models::{EventQuery, EventRecord};
use crate::events::source::EventSource;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::RwLock;

/// Offline event source backed by a fixed catalogue.
///
/// Text matches `name` or `location_summary` case-insensitively, the
/// `location` filter matches `location_summary` and `category` matches the
/// `category` field. Date and price filters are not applied.
#[derive(Default)]
pub struct InMemoryEventSource {
    catalogue: Vec<EventRecord>,
    latest: RwLock<Vec<EventRecord>>,
    unavailable: AtomicBool,
}

impl InMemoryEventSource {
    pub fn new(catalogue: Vec<EventRecord>) -> Self {
        Self {
            catalogue,
            ..Self::default()
        }
    }

    /// Loads one flat JSON object per line; blank lines are skipped.
    pub fn from_ndjson(path: &Path) -> Result<Self> {
        let file_reader = BufReader::new(File::open(path)?);
        let mut catalogue = Vec::new();
        for line in file_reader.lines() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            catalogue.push(serde_json::from_str(&line)?);
        }
        tracing::info!(
            task = "catalogue_loaded",
            path = %path.display(),
            records = catalogue.len(),
        );
        Ok(Self::new(catalogue))
    }

    /// Makes every following request fail as if the API were down.
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::Relaxed);
    }

    fn select(&self, query: &EventQuery) -> Result<Vec<EventRecord>> {
        if self.unavailable.load(Ordering::Relaxed) {
            return Err(Error::Api { status: 503 });
        }
        Ok(self
            .catalogue
            .iter()
            .filter(|record| Self::matches(record, query))
            .skip(query.offset)
            .take(query.rows)
            .cloned()
            .collect())
    }

    fn matches(record: &EventRecord, query: &EventQuery) -> bool {
        let contains = |field: &str, needle: &str| {
            record
                .get(field)
                .is_some_and(|value| value.to_lowercase().contains(&needle.to_lowercase()))
        };
        let text_matches = query.text.is_empty()
            || contains("name", &query.text)
            || contains("location_summary", &query.text);
        let location_matches = match query.filters.location.as_deref() {
            Some(location) if !location.is_empty() => contains("location_summary", location),
            _ => true,
        };
        let category_matches = match query.filters.category.as_deref() {
            Some(category) if !category.is_empty() => record
                .get("category")
                .is_some_and(|value| value.eq_ignore_ascii_case(category)),
            _ => true,
        };
        text_matches && location_matches && category_matches
    }
}

impl EventSource for InMemoryEventSource {
    async fn fetch(&self, query: &EventQuery) -> Result<Vec<EventRecord>> {
        let records = self.select(query)?;
        let mut latest = self.latest.write().await;
        if query.append {
            latest.extend(records.iter().cloned());
        } else {
            *latest = records.clone();
        }
        Ok(records)
    }

    async fn probe(&self, query: &EventQuery) -> Result<usize> {
        Ok(self.select(query)?.len())
    }

    async fn latest(&self) -> Vec<EventRecord> {
        self.latest.read().await.clone()
    }
}
