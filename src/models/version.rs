//! API version tags

use std::fmt;
use std::str::FromStr;

use serde::Serialize;
use utoipa::ToSchema;

/// Documented minor versions of the v2 API
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, ToSchema)]
pub enum ApiVersion {
    #[serde(rename = "2.0")]
    V2_0,
    #[serde(rename = "2.1")]
    V2_1,
}

impl ApiVersion {
    /// Major version served by this build
    pub const MAJOR: u32 = 2;

    /// Assumed when a request names no minor version
    pub const DEFAULT: ApiVersion = ApiVersion::V2_0;

    pub const SUPPORTED: [ApiVersion; 2] = [ApiVersion::V2_0, ApiVersion::V2_1];

    /// Value for the `api-supported-versions` response header
    pub const SUPPORTED_HEADER: &'static str = "2.0, 2.1";

    pub fn as_str(&self) -> &'static str {
        match self {
            ApiVersion::V2_0 => "2.0",
            ApiVersion::V2_1 => "2.1",
        }
    }

    pub fn supported_list() -> String {
        Self::SUPPORTED
            .iter()
            .map(ApiVersion::as_str)
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl fmt::Display for ApiVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unsupported API version '{0}'")]
pub struct UnsupportedVersion(pub String);

impl FromStr for ApiVersion {
    type Err = UnsupportedVersion;

    /// Accepts `2.0`, `2.1`, and `2.0.0`-style spellings.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let mut parts = trimmed.split('.');
        let major = parts.next().and_then(|p| p.parse::<u32>().ok());
        let minor = parts.next().and_then(|p| p.parse::<u32>().ok());
        let patch_ok = parts.all(|p| p == "0");

        match (major, minor, patch_ok) {
            (Some(2), Some(0), true) => Ok(ApiVersion::V2_0),
            (Some(2), Some(1), true) => Ok(ApiVersion::V2_1),
            _ => Err(UnsupportedVersion(trimmed.to_string())),
        }
    }
}

/// Version named by a `v{version}` path segment
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathVersion {
    /// Only the major version, e.g. `v2`
    Major,
    /// A specific minor version, e.g. `v2.1`
    Exact(ApiVersion),
}

impl FromStr for PathVersion {
    type Err = UnsupportedVersion;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let raw = s
            .strip_prefix('v')
            .or_else(|| s.strip_prefix('V'))
            .ok_or_else(|| UnsupportedVersion(s.to_string()))?;

        if raw.parse::<u32>().ok() == Some(ApiVersion::MAJOR) {
            return Ok(PathVersion::Major);
        }

        raw.parse::<ApiVersion>()
            .map(PathVersion::Exact)
            .map_err(|_| UnsupportedVersion(s.to_string()))
    }
}

/// Extract the `ver` parameter from a media type such as
/// `application/json; ver=2.1`.
pub fn media_type_version(accept: &str) -> Option<&str> {
    accept
        .split(',')
        .flat_map(|media| media.split(';').skip(1))
        .filter_map(|param| param.split_once('='))
        .find(|(name, _)| name.trim().eq_ignore_ascii_case("ver"))
        .map(|(_, value)| value.trim().trim_matches('"'))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_api_version() {
        assert_eq!("2.0".parse::<ApiVersion>(), Ok(ApiVersion::V2_0));
        assert_eq!("2.1".parse::<ApiVersion>(), Ok(ApiVersion::V2_1));
        assert_eq!("2.1.0".parse::<ApiVersion>(), Ok(ApiVersion::V2_1));
        assert!("1.0".parse::<ApiVersion>().is_err());
        assert!("2.2".parse::<ApiVersion>().is_err());
        assert!("2".parse::<ApiVersion>().is_err());
        assert!("".parse::<ApiVersion>().is_err());
    }

    #[test]
    fn test_parse_path_version() {
        assert_eq!("v2".parse::<PathVersion>(), Ok(PathVersion::Major));
        assert_eq!(
            "v2.1".parse::<PathVersion>(),
            Ok(PathVersion::Exact(ApiVersion::V2_1))
        );
        assert!("2.0".parse::<PathVersion>().is_err());
        assert!("v1".parse::<PathVersion>().is_err());
        assert!("v3.0".parse::<PathVersion>().is_err());
    }

    #[test]
    fn test_media_type_version() {
        assert_eq!(media_type_version("application/json; ver=2.1"), Some("2.1"));
        assert_eq!(
            media_type_version("text/plain, application/json;q=0.9;ver=\"2.0\""),
            Some("2.0")
        );
        assert_eq!(media_type_version("application/json"), None);
        assert_eq!(media_type_version("*/*"), None);
    }

    #[test]
    fn test_supported_header_lists_every_version() {
        assert_eq!(ApiVersion::supported_list(), ApiVersion::SUPPORTED_HEADER);
    }
}
