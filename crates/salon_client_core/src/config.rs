//! Backend location and client tuning. The API base URL is the only value the deployment
//! configures; everything else has a default.

use anyhow::Context;
use std::env;
use std::time::Duration;

/// LAN address of the development API, used by physical phones that cannot reach `localhost`.
pub const DEVICE_API_URL: &str = "http://192.168.0.100:8000";
pub const LOCAL_API_URL: &str = "http://localhost:8000";
pub const VIACEP_URL: &str = "https://viacep.com.br/ws";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Platform {
    Web,
    Emulator,
    Device,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClientConfig {
    pub base_url: String,
    pub cep_base_url: String,
    pub timeout: Duration,
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: normalize(base_url.into()),
            cep_base_url: VIACEP_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn for_platform(platform: Platform) -> Self {
        match platform {
            Platform::Web | Platform::Emulator => Self::new(LOCAL_API_URL),
            Platform::Device => Self::new(DEVICE_API_URL),
        }
    }

    pub fn with_cep_base_url(mut self, url: impl Into<String>) -> Self {
        self.cep_base_url = normalize(url.into());
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// `SALON_API_URL`, then the web build's `REACT_APP_API_URL`, then the platform default.
    pub fn from_env(platform: Platform) -> anyhow::Result<Self> {
        Self::from_lookup(platform, |key| env::var(key).ok())
    }

    fn from_lookup<F>(platform: Platform, lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = match lookup("SALON_API_URL").or_else(|| lookup("REACT_APP_API_URL")) {
            Some(url) if !url.trim().is_empty() => Self::new(url.trim()),
            _ => Self::for_platform(platform),
        };
        if let Some(cep) = lookup("SALON_CEP_URL") {
            config.cep_base_url = normalize(cep);
        }
        if let Some(secs) = lookup("SALON_API_TIMEOUT_SECS") {
            let secs: u64 = secs
                .trim()
                .parse()
                .with_context(|| format!("SALON_API_TIMEOUT_SECS is not a number: {:?}", secs))?;
            config.timeout = Duration::from_secs(secs);
        }
        Ok(config)
    }
}

fn normalize(url: String) -> String {
    url.trim_end_matches('/').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |k| map.get(k).cloned()
    }

    #[test]
    fn platform_defaults() {
        assert_eq!(ClientConfig::for_platform(Platform::Web).base_url, LOCAL_API_URL);
        assert_eq!(ClientConfig::for_platform(Platform::Emulator).base_url, LOCAL_API_URL);
        assert_eq!(ClientConfig::for_platform(Platform::Device).base_url, DEVICE_API_URL);
    }

    #[test]
    fn react_override_applies_when_primary_missing() {
        let c = ClientConfig::from_lookup(Platform::Device, lookup(&[("REACT_APP_API_URL", "https://api.salon.test/")]))
            .unwrap();
        assert_eq!(c.base_url, "https://api.salon.test");
    }

    #[test]
    fn primary_variable_wins() {
        let c = ClientConfig::from_lookup(
            Platform::Web,
            lookup(&[("SALON_API_URL", "http://a"), ("REACT_APP_API_URL", "http://b")]),
        )
        .unwrap();
        assert_eq!(c.base_url, "http://a");
    }

    #[test]
    fn bad_timeout_is_an_error() {
        let r = ClientConfig::from_lookup(Platform::Web, lookup(&[("SALON_API_TIMEOUT_SECS", "soon")]));
        assert!(r.is_err());
    }
}
