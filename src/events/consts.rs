pub const PAGE_SIZE: usize = 20;

pub const DEFAULT_API_URL: &str = "https://api.eventfinda.co.nz/v2/events.json";

pub const EVENT_FIELDS: &str = "event:(id,name,url,point,location_summary,datetime_start)";

pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;
