//! crates/gate/src/reporting.rs
//!
//! The reporting mini-language.
//!
//! A reporting string is a list of tokens separated by single spaces:
//!
//! - `+name` enables `name`,
//! - `-name` disables `name`,
//! - `name` replaces the enabled set with `name` alone.
//!
//! Tokens apply left to right, so `"all -info"` enables everything except
//! `info`, while `"+debug warn"` ends with only `warn` enabled. Empty tokens
//! and a lone `+` or `-` are skipped.

use std::fmt;

use crate::category::Categories;
use crate::error::Result;

/// One parsed reporting token.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ReportingToken<'a> {
    /// `+name`
    Enable(&'a str),
    /// `-name`
    Disable(&'a str),
    /// `name`
    Exclusive(&'a str),
}

impl<'a> ReportingToken<'a> {
    /// Parses a single token, returning `None` for tokens that carry no name.
    #[must_use]
    pub fn parse(token: &'a str) -> Option<Self> {
        let parsed = if let Some(name) = token.strip_prefix('+') {
            Self::Enable(name)
        } else if let Some(name) = token.strip_prefix('-') {
            Self::Disable(name)
        } else {
            Self::Exclusive(token)
        };
        (!parsed.name().is_empty()).then_some(parsed)
    }

    /// The category named by the token.
    #[must_use]
    pub const fn name(&self) -> &'a str {
        match *self {
            Self::Enable(name) | Self::Disable(name) | Self::Exclusive(name) => name,
        }
    }

    /// Applies the token to `categories`.
    ///
    /// # Errors
    ///
    /// Propagates errors from the category registry.
    pub fn apply<C: Categories + ?Sized>(&self, categories: &mut C) -> Result<()> {
        match *self {
            Self::Enable(name) => categories.enable(name),
            Self::Disable(name) => categories.disable(name),
            Self::Exclusive(name) => categories.set_exclusive(name),
        }
    }
}

impl fmt::Display for ReportingToken<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Enable(name) => write!(f, "+{name}"),
            Self::Disable(name) => write!(f, "-{name}"),
            Self::Exclusive(name) => f.write_str(name),
        }
    }
}

/// Splits `input` into reporting tokens.
pub fn parse_reporting(input: &str) -> impl Iterator<Item = ReportingToken<'_>> {
    input.split(' ').filter_map(ReportingToken::parse)
}

/// Applies every token of `input` to `categories` in order.
///
/// # Errors
///
/// Stops at the first registry error; tokens before it stay applied.
///
/// # Examples
///
/// ```
/// use gate::category::TagSet;
/// use gate::reporting::apply_reporting;
///
/// let mut tags = TagSet::new();
/// apply_reporting("+net +disk -net", &mut tags).unwrap();
/// assert!(tags.contains("disk"));
/// assert!(!tags.contains("net"));
/// ```
pub fn apply_reporting<C: Categories + ?Sized>(input: &str, categories: &mut C) -> Result<()> {
    for token in parse_reporting(input) {
        token.apply(categories)?;
    }
    Ok(())
}
