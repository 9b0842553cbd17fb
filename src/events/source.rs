use crate::error::Result;
use crate::events::models::{EventQuery, EventRecord};

pub trait EventSource {
    /// Records for this request only. They replace the batch returned by
    /// [`EventSource::latest`], or extend it when `query.append` is set.
    async fn fetch(&self, query: &EventQuery) -> Result<Vec<EventRecord>>;

    /// How many records the request would return, without touching the
    /// latest batch.
    async fn probe(&self, query: &EventQuery) -> Result<usize>;

    /// The most recently fetched batch.
    async fn latest(&self) -> Vec<EventRecord>;
}

impl<T: EventSource> EventSource for &T {
    async fn fetch(&self, query: &EventQuery) -> Result<Vec<EventRecord>> {
        (**self).fetch(query).await
    }

    async fn probe(&self, query: &EventQuery) -> Result<usize> {
        (**self).probe(query).await
    }

    async fn latest(&self) -> Vec<EventRecord> {
        (**self).latest().await
    }
}
