use crate::events::memory::InMemoryEventSource;
use crate::events::models::{EventFilters, EventQuery, EventRecord};
use crate::events::source::EventSource;
use std::io::Write;

pub const VENUES: [(&str, &str, &str); 4] = [
    ("-41.2865", "174.7762", "Wellington"),
    ("-36.8485", "174.7633", "Auckland"),
    ("-43.5321", "172.6362", "Christchurch"),
    ("-45.8788", "170.5028", "Dunedin"),
];

pub fn event(name: &str, lat: &str, lng: &str) -> EventRecord {
    EventRecord::from_iter([("name", name), ("lat", lat), ("lng", lng)])
}

/// `count` events spread round-robin over [`VENUES`].
pub fn catalogue(count: usize) -> Vec<EventRecord> {
    (0..count)
        .map(|i| {
            let (lat, lng, city) = VENUES[i % VENUES.len()];
            let mut record = event(&format!("Event {i}"), lat, lng);
            record.insert("location_summary", city);
            record.insert("category", if i % 2 == 0 { "music" } else { "theatre" });
            record
        })
        .collect()
}

#[tokio::test]
async fn memory_source_pages_through_matches() {
    let source = InMemoryEventSource::new(catalogue(45));
    let query = EventQuery::search("", EventFilters::default());

    assert_eq!(source.fetch(&query).await.unwrap().len(), 20);
    assert_eq!(source.fetch(&query.page(1).unwrap()).await.unwrap().len(), 20);
    let last = source.fetch(&query.page(2).unwrap()).await.unwrap();
    assert_eq!(last.len(), 5);
    assert_eq!(last[0].get("name"), Some("Event 40"));
    assert!(source.fetch(&query.page(3).unwrap()).await.unwrap().is_empty());
}

#[tokio::test]
async fn memory_source_applies_text_and_filters() {
    let source = InMemoryEventSource::new(catalogue(16));

    let by_city = source
        .fetch(&EventQuery::search("auckland", EventFilters::default()))
        .await
        .unwrap();
    assert_eq!(by_city.len(), 4);

    let filters = EventFilters {
        location: Some(String::from("Wellington")),
        category: Some(String::from("MUSIC")),
        ..EventFilters::default()
    };
    let filtered = source
        .fetch(&EventQuery::search("", filters))
        .await
        .unwrap();
    assert_eq!(filtered.len(), 4);
    assert!(filtered
        .iter()
        .all(|record| record.get("category") == Some("music")));
}

#[tokio::test]
async fn memory_source_appends_to_latest_batch() {
    let source = InMemoryEventSource::new(catalogue(30));
    let query = EventQuery::search("", EventFilters::default());

    source.fetch(&query).await.unwrap();
    source.fetch(&query.appended_page(1).unwrap()).await.unwrap();

    assert_eq!(source.latest().await.len(), 30);
}

#[tokio::test]
async fn unavailable_memory_source_fails() {
    let source = InMemoryEventSource::new(catalogue(5));
    source.set_unavailable(true);

    let result = source
        .fetch(&EventQuery::search("", EventFilters::default()))
        .await;

    assert!(result.is_err());
}

#[tokio::test]
async fn catalogue_loads_from_ndjson() {
    let path = std::env::temp_dir().join(format!("eventures-{}.ndjson", std::process::id()));
    let mut file = std::fs::File::create(&path).unwrap();
    writeln!(file, r#"{{"name":"Gig","lat":"-41.28","lng":"174.77"}}"#).unwrap();
    writeln!(file).unwrap();
    writeln!(file, r#"{{"name":"Play","lat":"-36.84","lng":"174.76"}}"#).unwrap();
    drop(file);

    let source = InMemoryEventSource::from_ndjson(&path);
    std::fs::remove_file(&path).unwrap();

    let records = source
        .unwrap()
        .fetch(&EventQuery::search("", EventFilters::default()))
        .await
        .unwrap();
    assert_eq!(records.len(), 2);
    assert_eq!(records[1].get("name"), Some("Play"));
}
