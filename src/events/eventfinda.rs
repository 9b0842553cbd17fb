use crate::error::{Error, Result};
use crate::events::consts::EVENT_FIELDS;
use crate::events::env::{EVENTFINDA_PASSWORD, EVENTFINDA_USERNAME};
use crate::events::models::{EventQuery, EventRecord};
use crate::events::source::EventSource;
use reqwest::Client;
use serde::Deserialize;
use serde_json::{Map, Value};
use std::env;
use std::time::Duration;
use tokio::sync::RwLock;
use tokio::time::Instant;
use url::Url;

#[derive(Clone, Debug)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    pub fn from_env() -> Option<Self> {
        Some(Self {
            username: env::var(EVENTFINDA_USERNAME).ok()?,
            password: env::var(EVENTFINDA_PASSWORD).ok()?,
        })
    }
}

#[derive(Debug, Deserialize)]
struct EventsResponse {
    #[serde(default)]
    events: Vec<Map<String, Value>>,
}

/// Eventfinda v2 `events.json` client.
pub struct EventfindaClient {
    api_url: Url,
    credentials: Option<Credentials>,
    client: Client,
    latest: RwLock<Vec<EventRecord>>,
}

impl EventfindaClient {
    pub fn new(
        api_url: Url,
        credentials: Option<Credentials>,
        request_timeout: Duration,
    ) -> Result<Self> {
        let client = Client::builder().timeout(request_timeout).build()?;
        Ok(Self {
            api_url,
            credentials,
            client,
            latest: RwLock::new(Vec::new()),
        })
    }

    pub fn request_url(&self, query: &EventQuery) -> Url {
        let mut url = self.api_url.clone();
        {
            let mut pairs = url.query_pairs_mut();
            if !query.text.is_empty() {
                pairs.append_pair("q", &query.text);
            }
            pairs
                .append_pair("rows", &query.rows.to_string())
                .append_pair("offset", &query.offset.to_string())
                .append_pair("fields", EVENT_FIELDS);
            for (name, value) in query.filters.params() {
                pairs.append_pair(name, value);
            }
        }
        url
    }
}

impl EventfindaClient {
    async fn request(&self, query: &EventQuery) -> Result<Vec<EventRecord>> {
        let start_time = Instant::now();
        let url = self.request_url(query);
        let mut request = self.client.get(url);
        if let Some(credentials) = &self.credentials {
            request = request.basic_auth(&credentials.username, Some(&credentials.password));
        }
        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            tracing::warn!(
                task = "event_fetch",
                status = status.as_u16(),
                offset = query.offset,
                "Event API rejected the request."
            );
            return Err(Error::Api {
                status: status.as_u16(),
            });
        }
        let body = response.text().await?;
        let records = decode_events(&body)?;
        let processing_time_ns = start_time.elapsed().as_nanos();
        tracing::info!(
            task = "event_fetch",
            query = %query.text,
            offset = query.offset,
            rows = query.rows,
            append = query.append,
            records = records.len(),
            processing_time_ms = processing_time_ns / 1_000_000,
        );
        Ok(records)
    }
}

impl EventSource for EventfindaClient {
    async fn fetch(&self, query: &EventQuery) -> Result<Vec<EventRecord>> {
        let records = self.request(query).await?;
        let mut latest = self.latest.write().await;
        if query.append {
            latest.extend(records.iter().cloned());
        } else {
            *latest = records.clone();
        }
        Ok(records)
    }

    async fn probe(&self, query: &EventQuery) -> Result<usize> {
        Ok(self.request(query).await?.len())
    }

    async fn latest(&self) -> Vec<EventRecord> {
        self.latest.read().await.clone()
    }
}

pub fn decode_events(body: &str) -> Result<Vec<EventRecord>> {
    let body = body.trim();
    if body.is_empty() || body == "null" {
        return Ok(Vec::new());
    }
    let response: EventsResponse = serde_json::from_str(body)?;
    Ok(response.events.into_iter().map(flatten_event).collect())
}

/// Scalars keep their field name; `point.lat` and `point.lng` are lifted to
/// `lat` and `lng`. Other nested values are dropped.
fn flatten_event(event: Map<String, Value>) -> EventRecord {
    let mut record = EventRecord::default();
    for (field, value) in event {
        match value {
            Value::Object(point) if field == "point" => {
                for (axis, value) in point {
                    if let Some(value) = scalar_to_string(value) {
                        record.insert(axis, value);
                    }
                }
            }
            value => {
                if let Some(value) = scalar_to_string(value) {
                    record.insert(field, value);
                }
            }
        }
    }
    record
}

fn scalar_to_string(value: Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::models::EventFilters;
    use axum::extract::Query;
    use axum::http::{HeaderMap, StatusCode};
    use axum::routing::get;
    use axum::{Json, Router};
    use std::collections::HashMap;

    async fn spawn_api(router: Router) -> Url {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind a test listener.");
        let address = listener.local_addr().expect("Listener has no address.");
        tokio::spawn(async move {
            axum::serve(listener, router)
                .await
                .expect("Test API server crashed.");
        });
        Url::parse(&format!("http://{address}/v2/events.json")).expect("Bad test URL.")
    }

    async fn paged_events(Query(params): Query<HashMap<String, String>>) -> Json<Value> {
        let offset: usize = params["offset"].parse().unwrap();
        let rows: usize = params["rows"].parse().unwrap();
        let events = (offset..(offset + rows).min(3))
            .map(|i| {
                serde_json::json!({
                    "id": i,
                    "name": format!("Event {i}"),
                    "point": { "lat": -41.28, "lng": 174.77 },
                    "images": { "images": [] },
                })
            })
            .collect::<Vec<_>>();
        Json(serde_json::json!({ "@attributes": { "count": 3 }, "events": events }))
    }

    fn client(api_url: Url, credentials: Option<Credentials>) -> EventfindaClient {
        EventfindaClient::new(api_url, credentials, Duration::from_secs(5)).unwrap()
    }

    #[test]
    fn request_url_carries_query_paging_and_filters() {
        let client = client(
            Url::parse("https://api.eventfinda.co.nz/v2/events.json").unwrap(),
            None,
        );
        let filters = EventFilters {
            location: Some(String::from("wellington")),
            ..EventFilters::default()
        };
        let query = EventQuery::search("live jazz", filters).page(1).unwrap();

        let url = client.request_url(&query);
        let pairs: HashMap<_, _> = url.query_pairs().into_owned().collect();

        assert_eq!(pairs["q"], "live jazz");
        assert_eq!(pairs["rows"], "20");
        assert_eq!(pairs["offset"], "20");
        assert_eq!(pairs["location"], "wellington");
        assert_eq!(pairs["fields"], EVENT_FIELDS);
        assert!(!pairs.contains_key("category"));
    }

    #[test]
    fn empty_text_is_not_sent() {
        let client = client(Url::parse("http://localhost/events.json").unwrap(), None);
        let url = client.request_url(&EventQuery::search("", EventFilters::default()));

        assert!(url.query_pairs().all(|(name, _)| name != "q"));
    }

    #[test]
    fn events_are_flattened_to_strings() {
        let records = decode_events(
            r#"{"events":[{"id":7,"name":"Gig","is_free":true,
                "point":{"lat":-36.8485,"lng":174.7633},"images":{"images":[]}}]}"#,
        )
        .unwrap();

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].lat(), Some("-36.8485"));
        assert_eq!(records[0].lng(), Some("174.7633"));
        assert_eq!(records[0].get("id"), Some("7"));
        assert_eq!(records[0].get("is_free"), Some("true"));
        assert_eq!(records[0].get("images"), None);
    }

    #[test]
    fn null_body_means_no_events() {
        assert!(decode_events(" null ").unwrap().is_empty());
        assert!(decode_events("").unwrap().is_empty());
        assert!(decode_events("{}").unwrap().is_empty());
    }

    #[test]
    fn garbage_body_is_a_decode_error() {
        assert!(matches!(decode_events("<html>"), Err(Error::Decode(_))));
    }

    #[tokio::test]
    async fn probe_leaves_latest_batch_alone() {
        let api_url = spawn_api(Router::new().route("/v2/events.json", get(paged_events))).await;
        let client = client(api_url, None);
        let query = EventQuery::search("", EventFilters::default());

        let first = client.fetch(&EventQuery { rows: 2, ..query.clone() }).await.unwrap();
        assert_eq!(first.len(), 2);
        assert_eq!(client.latest().await, first);

        let rest = client
            .fetch(&EventQuery {
                rows: 2,
                offset: 2,
                append: true,
                ..query.clone()
            })
            .await
            .unwrap();
        assert_eq!(rest.len(), 1);
        assert_eq!(client.latest().await.len(), 3);

        assert_eq!(client.probe(&query.probe(0).unwrap()).await.unwrap(), 1);
        assert_eq!(client.probe(&query.probe(1).unwrap()).await.unwrap(), 0);
        assert_eq!(client.latest().await.len(), 3);
    }

    #[tokio::test]
    async fn credentials_are_sent_as_basic_auth() {
        let router = Router::new().route(
            "/v2/events.json",
            get(|headers: HeaderMap| async move {
                match headers.get("authorization").and_then(|v| v.to_str().ok()) {
                    Some("Basic dXNlcjpzZWNyZXQ=") => {
                        Ok(Json(serde_json::json!({ "events": [] })))
                    }
                    _ => Err(StatusCode::UNAUTHORIZED),
                }
            }),
        );
        let api_url = spawn_api(router).await;
        let query = EventQuery::search("", EventFilters::default());

        let anonymous = client(api_url.clone(), None).fetch(&query).await;
        assert!(matches!(anonymous, Err(Error::Api { status: 401 })));

        let credentials = Credentials {
            username: String::from("user"),
            password: String::from("secret"),
        };
        let authorized = client(api_url, Some(credentials)).fetch(&query).await;
        assert!(authorized.unwrap().is_empty());
    }
}
