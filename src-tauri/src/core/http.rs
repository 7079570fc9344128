use reqwest::Client;

/// User agent the update service knows this client by; keep in sync with
/// whatever the download hosts allowlist.
pub const APP_USER_AGENT: &str = "ModUpdater/v1.0.0 (by mc8051)";

pub fn build_http_client() -> Result<Client, reqwest::Error> {
    Client::builder().user_agent(APP_USER_AGENT).build()
}
