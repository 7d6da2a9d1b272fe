//! crates/gate/src/config.rs
//!
//! Initialization parameters for a gate.
//!
//! A gate can be configured at startup from a URL query string
//! (`?cc-reporting=all+-info&cc-verbosity=2`) or from environment variables
//! (`CONDCON_REPORTING`, `CONDCON_TAGS`, `CONDCON_VERBOSITY`). Absent values
//! leave the gate with nothing enabled and a verbosity of zero.

use std::borrow::Cow;

use url::Url;

use crate::error::{GateError, Result};

/// Query parameter holding the reporting string.
pub const REPORTING_PARAM: &str = "cc-reporting";
/// Query parameter holding the tag string.
pub const TAGS_PARAM: &str = "cc-tags";
/// Query parameter holding the verbosity threshold.
pub const VERBOSITY_PARAM: &str = "cc-verbosity";

/// Environment variable holding the reporting string.
pub const REPORTING_ENV: &str = "CONDCON_REPORTING";
/// Environment variable holding the tag string.
pub const TAGS_ENV: &str = "CONDCON_TAGS";
/// Environment variable holding the verbosity threshold.
pub const VERBOSITY_ENV: &str = "CONDCON_VERBOSITY";

/// Reporting, tags and verbosity to apply to a fresh gate.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GateConfig {
    /// Reporting string for type categories.
    pub reporting: String,
    /// Reporting string for tags.
    pub tags: String,
    /// Verbosity threshold.
    pub verbosity: u32,
}

impl GateConfig {
    /// Reads the parameters from the query string of `url`.
    ///
    /// # Errors
    ///
    /// Returns [`GateError::InvalidUrl`] when `url` does not parse.
    ///
    /// # Examples
    ///
    /// ```
    /// use gate::GateConfig;
    ///
    /// let config = GateConfig::from_url("https://example.test/?cc-reporting=all+-info&cc-verbosity=2")?;
    /// assert_eq!(config.reporting, "all -info");
    /// assert_eq!(config.verbosity, 2);
    /// # Ok::<(), gate::GateError>(())
    /// ```
    pub fn from_url(url: &str) -> Result<Self> {
        let url = Url::parse(url).map_err(|error| GateError::InvalidUrl(error.to_string()))?;
        Ok(Self::from_pairs(url.query_pairs()))
    }

    /// Reads the parameters from a bare query string, with or without the
    /// leading `?`.
    #[must_use]
    pub fn from_query(query: &str) -> Self {
        let query = query.strip_prefix('?').unwrap_or(query);
        Self::from_pairs(url::form_urlencoded::parse(query.as_bytes()))
    }

    /// Reads the parameters from the process environment.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads the parameters through `lookup`, keyed by environment variable
    /// name.
    #[must_use]
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        Self {
            reporting: lookup(REPORTING_ENV).unwrap_or_default(),
            tags: lookup(TAGS_ENV).unwrap_or_default(),
            verbosity: lookup(VERBOSITY_ENV).map_or(0, |raw| parse_verbosity(&raw)),
        }
    }

    fn from_pairs<'a, I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (Cow<'a, str>, Cow<'a, str>)>,
    {
        let mut config = Self::default();
        for (key, value) in pairs {
            match key.as_ref() {
                REPORTING_PARAM => config.reporting = value.into_owned(),
                TAGS_PARAM => config.tags = value.into_owned(),
                VERBOSITY_PARAM => config.verbosity = parse_verbosity(&value),
                _ => {}
            }
        }
        config
    }
}

fn parse_verbosity(raw: &str) -> u32 {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return 0;
    }
    trimmed.parse().unwrap_or_else(|_| {
        tracing::warn!(target: "condcon::config", value = raw, "invalid verbosity; using 0");
        0
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_url_decodes_plus_as_space() {
        let config =
            GateConfig::from_url("http://localhost/app?cc-reporting=+a+-b+c&cc-tags=%2Bnet")
                .expect("valid url");
        assert_eq!(config.reporting, " a -b c");
        assert_eq!(config.tags, "+net");
        assert_eq!(config.verbosity, 0);
    }

    #[test]
    fn from_url_rejects_garbage() {
        assert!(matches!(
            GateConfig::from_url("not a url"),
            Err(GateError::InvalidUrl(_))
        ));
    }

    #[test]
    fn from_url_without_query_is_default() {
        let config = GateConfig::from_url("https://example.test/").expect("valid url");
        assert_eq!(config, GateConfig::default());
    }

    #[test]
    fn from_query_accepts_leading_question_mark() {
        let with = GateConfig::from_query("?cc-verbosity=3");
        let without = GateConfig::from_query("cc-verbosity=3");
        assert_eq!(with, without);
        assert_eq!(with.verbosity, 3);
    }

    #[test]
    fn last_duplicate_parameter_wins() {
        let config = GateConfig::from_query("cc-verbosity=1&cc-verbosity=4");
        assert_eq!(config.verbosity, 4);
    }

    #[test]
    fn unknown_parameters_ignored() {
        let config = GateConfig::from_query("page=2&cc-tags=ui");
        assert_eq!(config.tags, "ui");
    }

    #[test]
    fn invalid_verbosity_falls_back_to_zero() {
        assert_eq!(GateConfig::from_query("cc-verbosity=loud").verbosity, 0);
        assert_eq!(GateConfig::from_query("cc-verbosity=-1").verbosity, 0);
        assert_eq!(GateConfig::from_query("cc-verbosity=").verbosity, 0);
    }

    #[test]
    fn from_lookup_reads_named_variables() {
        let config = GateConfig::from_lookup(|key| match key {
            REPORTING_ENV => Some("all -debug".to_owned()),
            VERBOSITY_ENV => Some(" 2 ".to_owned()),
            _ => None,
        });
        assert_eq!(config.reporting, "all -debug");
        assert_eq!(config.tags, "");
        assert_eq!(config.verbosity, 2);
    }

    #[test]
    fn from_lookup_empty_is_default() {
        assert_eq!(GateConfig::from_lookup(|_| None), GateConfig::default());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn serde_fills_missing_fields() {
        let config: GateConfig =
            serde_json::from_str(r#"{"reporting":"+net"}"#).expect("deserialize");
        assert_eq!(config.reporting, "+net");
        assert_eq!(config.verbosity, 0);

        let json = serde_json::to_string(&config).expect("serialize");
        assert_eq!(json, r#"{"reporting":"+net","tags":"","verbosity":0}"#);
    }
}
