#[derive(thiserror::Error, Debug, serde::Deserialize, serde::Serialize)]
pub enum Error {
    /// Fatal at startup: missing credential or unbuildable client.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// One request to the provider failed (network, status, or payload).
    #[error("Provider request failed: {0}")]
    Provider(String),

    /// The provider signalled quota exhaustion for one request.
    #[error("Provider rate limit exhausted ({})", retry_hint(.retry_after_secs))]
    RateLimit { retry_after_secs: Option<u64> },

    #[error("File system error: {0}")]
    FileSystem(String),
}

impl Error {
    /// Whether this failure came from the provider side of the exchange.
    pub fn is_provider(&self) -> bool {
        matches!(self, Error::Provider(_) | Error::RateLimit { .. })
    }
}

fn retry_hint(retry_after_secs: &Option<u64>) -> String {
    match retry_after_secs {
        Some(secs) => format!("retry after {secs}s"),
        None => "retry later".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rate_limit_display_carries_retry_guidance() {
        let with_hint = Error::RateLimit {
            retry_after_secs: Some(20),
        };
        assert_eq!(
            with_hint.to_string(),
            "Provider rate limit exhausted (retry after 20s)"
        );

        let without_hint = Error::RateLimit {
            retry_after_secs: None,
        };
        assert_eq!(
            without_hint.to_string(),
            "Provider rate limit exhausted (retry later)"
        );
    }

    #[test]
    fn test_rate_limit_is_a_provider_failure() {
        assert!(Error::RateLimit { retry_after_secs: None }.is_provider());
        assert!(Error::Provider("HTTP 500".to_string()).is_provider());
        assert!(!Error::FileSystem("unreadable".to_string()).is_provider());
        assert!(!Error::Configuration("no key".to_string()).is_provider());
    }
}
