use crate::events::consts::{DEFAULT_API_URL, DEFAULT_REQUEST_TIMEOUT_SECS};
use crate::events::models::EventFilters;
use clap::Parser;
use std::path::PathBuf;
use url::Url;

pub mod commands;

#[derive(Debug, Parser)]
pub struct Args {
    #[arg(long)]
    #[arg(default_value = DEFAULT_API_URL)]
    pub api_url: Url,
    /// Serve events from an NDJSON catalogue instead of the API.
    #[arg(long)]
    pub events_file: Option<PathBuf>,
    /// Search the session starts with.
    #[arg(long)]
    #[arg(default_value = "")]
    pub query: String,
    #[arg(long)]
    pub location: Option<String>,
    #[arg(long)]
    pub category: Option<String>,
    #[arg(long)]
    pub start_date: Option<String>,
    #[arg(long)]
    pub end_date: Option<String>,
    #[arg(long)]
    pub price_max: Option<String>,
    /// Merge events whose coordinates agree up to this many decimals.
    #[arg(long)]
    pub group_decimals: Option<usize>,
    #[arg(long)]
    #[arg(default_value_t = DEFAULT_REQUEST_TIMEOUT_SECS)]
    pub request_timeout_secs: u64,
}

impl Args {
    pub fn filters(&self) -> EventFilters {
        EventFilters {
            location: self.location.clone(),
            category: self.category.clone(),
            start_date: self.start_date.clone(),
            end_date: self.end_date.clone(),
            price_max: self.price_max.clone(),
        }
    }
}
