use std::time::Duration;

use color_eyre::eyre::{Result, WrapErr};

/// Shared HTTP client for the quote and favicon requests.
pub fn build_client(timeout_secs: u64) -> Result<reqwest::Client> {
    reqwest::Client::builder()
        .redirect(reqwest::redirect::Policy::limited(10))
        .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
        .timeout(Duration::from_secs(timeout_secs.max(1)))
        .build()
        .wrap_err("failed to build HTTP client")
}
