//! Server Configuration

use std::time::Duration;

use billing_core::{PaymentError, Result, store::DEFAULT_PENDING_TTL_SECS};

/// Longest accepted pending-payment lifetime (one year)
pub const MAX_PENDING_TTL_SECS: u64 = 365 * 24 * 60 * 60;

/// Server configuration, read from the environment
#[derive(Clone, Debug)]
pub struct ServerConfig {
    /// Listen address
    pub bind_addr: String,

    /// Base URL placed in session links handed to clients
    pub public_base_url: String,

    /// Lifetime of a pending payment
    pub pending_ttl: Duration,

    /// How often expired pending payments are swept
    pub sweep_interval: Duration,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: "0.0.0.0:12345".into(),
            public_base_url: "http://localhost:12345".into(),
            pending_ttl: Duration::from_secs(DEFAULT_PENDING_TTL_SECS.unsigned_abs()),
            sweep_interval: Duration::from_secs(60),
        }
    }
}

impl ServerConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup; unset keys fall back to defaults
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let defaults = Self::default();

        let bind_addr = lookup("BIND_ADDR").unwrap_or(defaults.bind_addr);
        let public_base_url = lookup("PUBLIC_BASE_URL")
            .map(|url| url.trim_end_matches('/').to_string())
            .unwrap_or(defaults.public_base_url);
        let pending_ttl = seconds(&lookup, "PENDING_PAYMENT_TTL_SECS")?
            .unwrap_or(defaults.pending_ttl);
        let sweep_interval = seconds(&lookup, "EXPIRY_SWEEP_INTERVAL_SECS")?
            .unwrap_or(defaults.sweep_interval);

        if pending_ttl.as_secs() > MAX_PENDING_TTL_SECS {
            return Err(PaymentError::Config(format!(
                "PENDING_PAYMENT_TTL_SECS must be at most {MAX_PENDING_TTL_SECS}"
            )));
        }

        if sweep_interval.is_zero() {
            return Err(PaymentError::Config(
                "EXPIRY_SWEEP_INTERVAL_SECS must be greater than zero".into(),
            ));
        }

        Ok(Self {
            bind_addr,
            public_base_url,
            pending_ttl,
            sweep_interval,
        })
    }
}

fn seconds(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Result<Option<Duration>> {
    lookup(key)
        .map(|raw| {
            raw.trim()
                .parse::<u64>()
                .map(Duration::from_secs)
                .map_err(|_| PaymentError::Config(format!("{key} must be a whole number of seconds, got {raw:?}")))
        })
        .transpose()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = ServerConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config.bind_addr, "0.0.0.0:12345");
        assert_eq!(config.public_base_url, "http://localhost:12345");
        assert_eq!(config.pending_ttl, Duration::from_secs(3600));
        assert_eq!(config.sweep_interval, Duration::from_secs(60));
    }

    #[test]
    fn test_overrides() {
        let config = ServerConfig::from_lookup(lookup(&[
            ("BIND_ADDR", "127.0.0.1:8080"),
            ("PUBLIC_BASE_URL", "https://pay.example.com/"),
            ("PENDING_PAYMENT_TTL_SECS", "900"),
            ("EXPIRY_SWEEP_INTERVAL_SECS", "5"),
        ]))
        .unwrap();
        assert_eq!(config.bind_addr, "127.0.0.1:8080");
        assert_eq!(config.public_base_url, "https://pay.example.com");
        assert_eq!(config.pending_ttl, Duration::from_secs(900));
        assert_eq!(config.sweep_interval, Duration::from_secs(5));
    }

    #[test]
    fn test_invalid_numbers() {
        let err = ServerConfig::from_lookup(lookup(&[("PENDING_PAYMENT_TTL_SECS", "an hour")]))
            .unwrap_err();
        assert!(matches!(err, PaymentError::Config(_)));

        let err = ServerConfig::from_lookup(lookup(&[("PENDING_PAYMENT_TTL_SECS", "10000000000000")]))
            .unwrap_err();
        assert!(matches!(err, PaymentError::Config(_)));

        let max = MAX_PENDING_TTL_SECS.to_string();
        let config = ServerConfig::from_lookup(lookup(&[("PENDING_PAYMENT_TTL_SECS", max.as_str())]))
            .unwrap();
        assert_eq!(config.pending_ttl.as_secs(), MAX_PENDING_TTL_SECS);

        let err = ServerConfig::from_lookup(lookup(&[("EXPIRY_SWEEP_INTERVAL_SECS", "0")]))
            .unwrap_err();
        assert!(matches!(err, PaymentError::Config(_)));
    }
}
