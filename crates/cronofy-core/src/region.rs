//! Data-center selection.
//!
//! Cronofy hosts accounts in several regions. Every region exposes the same
//! API under a suffixed hostname (`api-de.cronofy.com`, `app-de.cronofy.com`),
//! while the default US region uses the bare names. All URLs the client talks
//! to are derived from a single [`DataCenter`] value, so the API root, the app
//! root and the `Host` header can never disagree with each other.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Domain shared by every Cronofy region.
const CRONOFY_DOMAIN: &str = "cronofy.com";

/// Region suffixes documented by Cronofy.
///
/// Other suffixes are still accepted so new regions work without a release.
pub const KNOWN_DATA_CENTERS: &[&str] = &["au", "ca", "de", "sg", "uk"];

/// A Cronofy data center.
///
/// The default value selects the US data center (no hostname suffix).
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct DataCenter {
    suffix: Option<String>,
}

impl DataCenter {
    /// Creates a data center from its region suffix (e.g. `"de"`).
    ///
    /// An empty or whitespace-only suffix selects the default data center.
    pub fn new(suffix: impl Into<String>) -> Self {
        let suffix = suffix.into().trim().to_lowercase();
        Self {
            suffix: (!suffix.is_empty()).then_some(suffix),
        }
    }

    /// Returns the region suffix, or `None` for the default data center.
    pub fn suffix(&self) -> Option<&str> {
        self.suffix.as_deref()
    }

    /// Returns true for the default (unsuffixed) data center.
    pub fn is_default(&self) -> bool {
        self.suffix.is_none()
    }

    /// Returns true if the suffix is one of [`KNOWN_DATA_CENTERS`].
    pub fn is_known(&self) -> bool {
        match self.suffix() {
            None => true,
            Some(suffix) => KNOWN_DATA_CENTERS.contains(&suffix),
        }
    }

    /// Hostname of the API, also sent as the `Host` header.
    pub fn api_host(&self) -> String {
        self.hostname("api")
    }

    /// Root URL of the REST API, without a trailing slash.
    pub fn api_root_url(&self) -> String {
        format!("https://{}", self.api_host())
    }

    /// Root URL of the web application (OAuth consent pages).
    pub fn app_root_url(&self) -> String {
        format!("https://{}", self.hostname("app"))
    }

    fn hostname(&self, service: &str) -> String {
        match self.suffix() {
            Some(suffix) => format!("{}-{}.{}", service, suffix, CRONOFY_DOMAIN),
            None => format!("{}.{}", service, CRONOFY_DOMAIN),
        }
    }
}

impl From<String> for DataCenter {
    fn from(suffix: String) -> Self {
        Self::new(suffix)
    }
}

impl From<&str> for DataCenter {
    fn from(suffix: &str) -> Self {
        Self::new(suffix)
    }
}

impl From<DataCenter> for String {
    fn from(dc: DataCenter) -> Self {
        dc.suffix.unwrap_or_default()
    }
}

impl fmt::Display for DataCenter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.suffix() {
            Some(suffix) => write!(f, "{}", suffix),
            None => write!(f, "default"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_data_center_urls() {
        let dc = DataCenter::default();
        assert!(dc.is_default());
        assert_eq!(dc.api_root_url(), "https://api.cronofy.com");
        assert_eq!(dc.app_root_url(), "https://app.cronofy.com");
        assert_eq!(dc.api_host(), "api.cronofy.com");
    }

    #[test]
    fn suffixed_data_center_urls() {
        let dc = DataCenter::new("de");
        assert_eq!(dc.suffix(), Some("de"));
        assert_eq!(dc.api_root_url(), "https://api-de.cronofy.com");
        assert_eq!(dc.app_root_url(), "https://app-de.cronofy.com");
        assert_eq!(dc.api_host(), "api-de.cronofy.com");
    }

    #[test]
    fn empty_suffix_is_default() {
        assert!(DataCenter::new("").is_default());
        assert!(DataCenter::new("  ").is_default());
        assert_eq!(DataCenter::new(" UK "), DataCenter::new("uk"));
    }

    #[test]
    fn known_and_unknown_regions() {
        assert!(DataCenter::default().is_known());
        assert!(DataCenter::new("sg").is_known());
        let custom = DataCenter::new("mars");
        assert!(!custom.is_known());
        assert_eq!(custom.api_host(), "api-mars.cronofy.com");
    }

    #[test]
    fn serde_roundtrip_as_plain_string() {
        let dc: DataCenter = serde_json::from_str("\"au\"").unwrap();
        assert_eq!(dc.api_host(), "api-au.cronofy.com");
        assert_eq!(serde_json::to_string(&dc).unwrap(), "\"au\"");

        let default: DataCenter = serde_json::from_str("\"\"").unwrap();
        assert!(default.is_default());
    }

    #[test]
    fn display() {
        assert_eq!(DataCenter::default().to_string(), "default");
        assert_eq!(DataCenter::new("ca").to_string(), "ca");
    }
}
