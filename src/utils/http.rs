// src/utils/http.rs

//! HTTP client utilities.

use std::time::Duration;

use crate::error::Result;
use crate::models::RenderConfig;

/// Create a configured asynchronous HTTP client.
pub fn create_async_client(config: &RenderConfig) -> Result<reqwest::Client> {
    let client = reqwest::Client::builder()
        .user_agent(&config.user_agent)
        .timeout(Duration::from_secs(config.timeout_secs))
        .build()?;
    Ok(client)
}

/// Percent-encode a value for use inside a query string.
pub fn encode_query_value(value: &str) -> String {
    url::form_urlencoded::byte_serialize(value.as_bytes()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_client_from_defaults() {
        assert!(create_async_client(&RenderConfig::default()).is_ok());
    }

    #[test]
    fn test_encode_smiles() {
        assert_eq!(encode_query_value("C#N"), "C%23N");
        assert_eq!(encode_query_value("CC(=O)O"), "CC%28%3DO%29O");
        assert_eq!(encode_query_value("[Na+].[Cl-]"), "%5BNa%2B%5D.%5BCl-%5D");
    }
}
