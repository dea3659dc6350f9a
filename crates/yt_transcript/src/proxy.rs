use crate::TranscriptError;

/// Rotating residential proxy settings for the Webshare service.
///
/// Every request through the rotating endpoint may leave from a different exit
/// node. `filter_ip_locations` restricts those exit nodes to the given country
/// codes (e.g. `["de", "us"]`).
#[derive(Debug, Clone)]
pub struct WebshareProxyConfig {
    pub username: String,
    pub password: String,
    pub filter_ip_locations: Vec<String>,
    pub domain: String,
    pub port: u16,
}

impl WebshareProxyConfig {
    pub const DEFAULT_DOMAIN: &str = "p.webshare.io";
    pub const DEFAULT_PORT: u16 = 80;

    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
            filter_ip_locations: Vec::new(),
            domain: Self::DEFAULT_DOMAIN.into(),
            port: Self::DEFAULT_PORT,
        }
    }

    pub fn with_locations<I, S>(mut self, locations: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.filter_ip_locations = locations.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_endpoint(mut self, domain: impl Into<String>, port: u16) -> Self {
        self.domain = domain.into();
        self.port = port;
        self
    }

    /// Username understood by the rotating endpoint: location filters are
    /// appended as `-XX` suffixes followed by `-rotate`.
    pub fn rotating_username(&self) -> String {
        let locations: String = self
            .filter_ip_locations
            .iter()
            .map(|code| code.trim())
            .filter(|code| !code.is_empty())
            .map(|code| format!("-{}", code.to_uppercase()))
            .collect();

        format!("{}{}-rotate", self.username, locations)
    }

    pub fn endpoint(&self) -> String {
        format!("http://{}:{}", self.domain, self.port)
    }

    pub fn to_proxy(&self) -> Result<reqwest::Proxy, TranscriptError> {
        let proxy = reqwest::Proxy::all(self.endpoint())
            .map_err(|e| TranscriptError::Proxy(e.to_string()))?
            .basic_auth(&self.rotating_username(), &self.password);

        Ok(proxy)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rotating_username_without_locations() {
        let config = WebshareProxyConfig::new("user", "secret");
        assert_eq!(config.rotating_username(), "user-rotate");
    }

    #[test]
    fn test_rotating_username_appends_upper_cased_locations() {
        let config = WebshareProxyConfig::new("user", "secret").with_locations(["de", "us"]);
        assert_eq!(config.rotating_username(), "user-DE-US-rotate");
    }

    #[test]
    fn test_blank_locations_are_ignored() {
        let config = WebshareProxyConfig::new("user", "secret").with_locations(["de", " ", ""]);
        assert_eq!(config.rotating_username(), "user-DE-rotate");
    }

    #[test]
    fn test_default_endpoint() {
        let config = WebshareProxyConfig::new("user", "secret");
        assert_eq!(config.endpoint(), "http://p.webshare.io:80");
        assert!(config.to_proxy().is_ok());
    }

    #[test]
    fn test_custom_endpoint() {
        let config = WebshareProxyConfig::new("user", "secret").with_endpoint("proxy.local", 8080);
        assert_eq!(config.endpoint(), "http://proxy.local:8080");
    }
}
