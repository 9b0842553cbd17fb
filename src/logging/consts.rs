pub const DEFAULT_LOG_DIRECTIVE: &str = "eventures=info";
