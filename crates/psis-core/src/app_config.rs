/// Runtime configuration for the PSIS client and CLI.
///
/// The API key is the only credential and is threaded explicitly into the
/// client; nothing reads it from ambient global state.
#[derive(Clone)]
pub struct AppConfig {
    pub api_key: String,
    pub api_url: String,
    pub log_level: String,
    pub list_timeout_secs: u64,
    pub detail_timeout_secs: u64,
    pub detail_concurrency: usize,
    pub user_agent: String,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("api_key", &"[redacted]")
            .field("api_url", &self.api_url)
            .field("log_level", &self.log_level)
            .field("list_timeout_secs", &self.list_timeout_secs)
            .field("detail_timeout_secs", &self.detail_timeout_secs)
            .field("detail_concurrency", &self.detail_concurrency)
            .field("user_agent", &self.user_agent)
            .finish()
    }
}
