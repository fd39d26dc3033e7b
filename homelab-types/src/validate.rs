//! Format checks applied after serde decoding.

use std::net::Ipv4Addr;

use reqwest::Url;

use thiserror::Error;

/// A decoded response that violates its schema's format rules.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SchemaError {
    /// Field should hold a dotted-quad IPv4 address.
    #[error("{field}: expected an IPv4 address, got {value:?}")]
    InvalidIp { field: String, value: String },

    /// Field should hold an absolute http(s) URL.
    #[error("{field}: expected an http(s) URL, got {value:?}")]
    InvalidUrl { field: String, value: String },

    /// Numeric field outside its allowed range.
    #[error("{field}: {value} is outside {min}..={max}")]
    OutOfRange {
        field: String,
        value: f64,
        min: f64,
        max: f64,
    },

    /// Enumerated field holding a value the schema does not allow.
    #[error("{field}: unexpected value {value:?}")]
    UnexpectedValue { field: String, value: String },
}

/// Post-decode validation for a response schema.
///
/// Implementations check nested values too, so calling `validate` on the
/// top-level response is enough.
pub trait Validate {
    /// Check the value against its schema's format rules.
    fn validate(&self) -> Result<(), SchemaError>;
}

impl<T: Validate> Validate for Vec<T> {
    fn validate(&self) -> Result<(), SchemaError> {
        self.iter().try_for_each(Validate::validate)
    }
}

impl<T: Validate> Validate for Option<T> {
    fn validate(&self) -> Result<(), SchemaError> {
        match self {
            Some(value) => value.validate(),
            None => Ok(()),
        }
    }
}

/// Accepts dotted-quad IPv4 text only.
pub fn check_ipv4(field: &str, value: &str) -> Result<(), SchemaError> {
    value.parse::<Ipv4Addr>().map(|_| ()).map_err(|_| SchemaError::InvalidIp {
        field: field.to_string(),
        value: value.to_string(),
    })
}

/// Accepts `http://` or `https://` URLs with a non-empty host.
pub fn check_url(field: &str, value: &str) -> Result<(), SchemaError> {
    let valid = Url::parse(value).is_ok_and(|url| {
        matches!(url.scheme(), "http" | "https")
            && url.host_str().is_some_and(|host| !host.is_empty())
    });

    if valid {
        Ok(())
    } else {
        Err(SchemaError::InvalidUrl {
            field: field.to_string(),
            value: value.to_string(),
        })
    }
}

/// Accepts finite values in `0..=100`.
pub fn check_percent(field: &str, value: f64) -> Result<(), SchemaError> {
    check_range(field, value, 0.0, 100.0)
}

/// Accepts finite values in `min..=max`.
pub fn check_range(field: &str, value: f64, min: f64, max: f64) -> Result<(), SchemaError> {
    if value.is_finite() && (min..=max).contains(&value) {
        Ok(())
    } else {
        Err(SchemaError::OutOfRange {
            field: field.to_string(),
            value,
            min,
            max,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ipv4_rejects_v6_and_garbage() {
        assert!(check_ipv4("ip", "10.0.0.7").is_ok());
        assert!(check_ipv4("ip", "fe80::1").is_err());
        assert!(check_ipv4("ip", "256.1.1.1").is_err());
    }

    #[test]
    fn url_requires_scheme_and_host() {
        assert!(check_url("homepage", "https://example.com").is_ok());
        assert!(check_url("homepage", "http://10.0.0.2:8080/docs/").is_ok());
        assert!(check_url("homepage", "example.com").is_err());
        assert!(check_url("homepage", "https://").is_err());
        assert!(check_url("homepage", "ftp://example.com").is_err());
    }

    #[test]
    fn url_rejects_empty_host() {
        assert!(check_url("homepage", "http://:80").is_err());
        assert!(check_url("homepage", "http://@").is_err());
        assert!(check_url("homepage", "http://user@nas.lan:5000/").is_ok());
    }

    #[test]
    fn percent_bounds_are_inclusive() {
        assert!(check_percent("p", 0.0).is_ok());
        assert!(check_percent("p", 100.0).is_ok());
        assert!(check_percent("p", 100.01).is_err());
        assert!(check_percent("p", f64::NAN).is_err());
    }

    #[test]
    fn error_message_names_the_field() {
        let err = check_url("npm.homepage", "nope").unwrap_err();
        assert_eq!(
            err.to_string(),
            r#"npm.homepage: expected an http(s) URL, got "nope""#
        );
    }
}
