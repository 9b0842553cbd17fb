use crate::error::{Error, Result};
use crate::events::consts::PAGE_SIZE;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One upstream event, flattened to string fields.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EventRecord(BTreeMap<String, String>);

impl EventRecord {
    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    pub fn lat(&self) -> Option<&str> {
        self.get("lat")
    }

    pub fn lng(&self) -> Option<&str> {
        self.get("lng")
    }

    pub fn insert(&mut self, field: impl Into<String>, value: impl Into<String>) {
        self.0.insert(field.into(), value.into());
    }
}

impl<K, V> FromIterator<(K, V)> for EventRecord
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(field, value)| (field.into(), value.into()))
                .collect(),
        )
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EventFilters {
    pub location: Option<String>,
    pub category: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub price_max: Option<String>,
}

impl EventFilters {
    /// Query parameters for every filter that is set and non-empty.
    pub fn params(&self) -> Vec<(&'static str, &str)> {
        [
            ("location", &self.location),
            ("category", &self.category),
            ("start_date", &self.start_date),
            ("end_date", &self.end_date),
            ("price_max", &self.price_max),
        ]
        .into_iter()
        .filter_map(|(name, value)| match value.as_deref() {
            Some(value) if !value.is_empty() => Some((name, value)),
            _ => None,
        })
        .collect()
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EventQuery {
    pub text: String,
    pub filters: EventFilters,
    pub rows: usize,
    pub offset: usize,
    /// Extend the source's latest batch instead of replacing it.
    pub append: bool,
}

impl EventQuery {
    pub fn search(text: impl Into<String>, filters: EventFilters) -> Self {
        Self {
            text: text.into(),
            filters,
            rows: PAGE_SIZE,
            offset: 0,
            append: false,
        }
    }

    /// Fails for page numbers whose offset does not fit in a `usize`.
    pub fn page(&self, page: usize) -> Result<Self> {
        let offset = page
            .checked_mul(PAGE_SIZE)
            .ok_or(Error::PageOutOfRange { page })?;
        Ok(Self {
            rows: PAGE_SIZE,
            offset,
            append: false,
            ..self.clone()
        })
    }

    pub fn appended_page(&self, page: usize) -> Result<Self> {
        Ok(Self {
            append: true,
            ..self.page(page)?
        })
    }

    /// Single-row request used only to learn whether `page` has anything on it.
    pub fn probe(&self, page: usize) -> Result<Self> {
        Ok(Self {
            rows: 1,
            ..self.page(page)?
        })
    }
}
