//! crates/gate/src/category.rs
//!
//! Category registries backing `Gate::category` and `Gate::tags`.
//!
//! Two flavours exist. [`FlagRegistry`] hands out one `u64` bit per type name
//! and [`TypeReporting`] pairs it with the enabled mask. [`TagSet`] tracks tags
//! by presence alone. Both implement [`Categories`], the interface the
//! reporting mini-language in [`crate::reporting`] drives.

use std::collections::{BTreeSet, HashMap};

use crate::error::{GateError, Result};
use crate::reporting::{ReportingToken, parse_reporting};

/// Reserved name that addresses every known category at once.
pub const ALL: &str = "all";

/// Maximum number of type categories a [`FlagRegistry`] can hold.
pub const MAX_TYPES: u32 = u64::BITS;

/// A mutable set of enabled categories.
pub trait Categories {
    /// Adds `name` to the enabled set.
    fn enable(&mut self, name: &str) -> Result<()>;

    /// Removes `name` from the enabled set.
    fn disable(&mut self, name: &str) -> Result<()>;

    /// Replaces the enabled set with `name` alone.
    fn set_exclusive(&mut self, name: &str) -> Result<()>;

    /// Returns whether `name` is currently enabled.
    fn is_enabled(&mut self, name: &str) -> Result<bool>;
}

/// Assigns a unique bit flag to every type name.
///
/// Flags are handed out in definition order starting at `1 << 0` and never
/// change once assigned. The aggregate mask for [`ALL`] is the union of every
/// flag handed out so far.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FlagRegistry {
    flags: HashMap<String, u64>,
    order: Vec<String>,
    all: u64,
}

impl FlagRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Defines `name` and returns its flag.
    ///
    /// Defining an existing name returns the flag it already holds.
    ///
    /// # Errors
    ///
    /// Returns [`GateError::InvalidCategory`] for the reserved [`ALL`] name and
    /// [`GateError::CategoryLimit`] once every bit of the mask is taken.
    pub fn define(&mut self, name: &str) -> Result<u64> {
        if name == ALL {
            return Err(GateError::InvalidCategory(name.to_owned()));
        }
        if let Some(&flag) = self.flags.get(name) {
            return Ok(flag);
        }

        let index = u32::try_from(self.order.len()).unwrap_or(u32::MAX);
        if index >= MAX_TYPES {
            return Err(GateError::CategoryLimit { limit: MAX_TYPES });
        }

        let flag = 1_u64 << index;
        self.flags.insert(name.to_owned(), flag);
        self.order.push(name.to_owned());
        self.all |= flag;
        tracing::debug!(target: "condcon::category", name, flag, "defined reporting type");
        Ok(flag)
    }

    /// Returns the mask for `name`, defining it first when unknown.
    ///
    /// [`ALL`] resolves to the aggregate of every defined flag.
    ///
    /// # Errors
    ///
    /// Propagates [`GateError::CategoryLimit`] from lazy definition.
    pub fn resolve_mask(&mut self, name: &str) -> Result<u64> {
        if name == ALL {
            return Ok(self.all);
        }
        self.define(name)
    }

    /// Returns the flag for `name` without defining it.
    #[must_use]
    pub fn flag(&self, name: &str) -> Option<u64> {
        if name == ALL {
            return Some(self.all);
        }
        self.flags.get(name).copied()
    }

    /// Returns whether `name` has been defined.
    #[must_use]
    pub fn is_defined(&self, name: &str) -> bool {
        self.flags.contains_key(name)
    }

    /// Returns the union of every defined flag.
    #[must_use]
    pub const fn all_mask(&self) -> u64 {
        self.all
    }

    /// Number of defined types.
    #[must_use]
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Returns `true` when no type has been defined.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Defined names in definition order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(String::as_str)
    }
}

/// A [`FlagRegistry`] paired with the mask of enabled types.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TypeReporting {
    registry: FlagRegistry,
    mask: u64,
}

impl TypeReporting {
    /// Creates an empty registry with nothing enabled.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The enabled mask.
    #[must_use]
    pub const fn mask(&self) -> u64 {
        self.mask
    }

    /// The underlying registry.
    #[must_use]
    pub const fn registry(&self) -> &FlagRegistry {
        &self.registry
    }

    /// Mutable access to the underlying registry.
    pub const fn registry_mut(&mut self) -> &mut FlagRegistry {
        &mut self.registry
    }
}

impl Categories for TypeReporting {
    fn enable(&mut self, name: &str) -> Result<()> {
        self.mask |= self.registry.resolve_mask(name)?;
        Ok(())
    }

    fn disable(&mut self, name: &str) -> Result<()> {
        self.mask &= !self.registry.resolve_mask(name)?;
        Ok(())
    }

    fn set_exclusive(&mut self, name: &str) -> Result<()> {
        self.mask = self.registry.resolve_mask(name)?;
        Ok(())
    }

    fn is_enabled(&mut self, name: &str) -> Result<bool> {
        Ok(self.registry.resolve_mask(name)? & self.mask != 0)
    }
}

/// Presence-based tag registry.
///
/// Every tag ever mentioned is remembered, so enabling [`ALL`] turns on all
/// tags seen so far.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TagSet {
    known: BTreeSet<String>,
    enabled: BTreeSet<String>,
}

impl TagSet {
    /// Creates an empty tag set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns whether `tag` is enabled without remembering it.
    #[must_use]
    pub fn contains(&self, tag: &str) -> bool {
        self.enabled.contains(tag)
    }

    /// Enabled tags in sorted order.
    pub fn enabled(&self) -> impl Iterator<Item = &str> {
        self.enabled.iter().map(String::as_str)
    }

    /// Every tag seen so far in sorted order.
    pub fn known(&self) -> impl Iterator<Item = &str> {
        self.known.iter().map(String::as_str)
    }

    /// Applies every token of a reporting string in order.
    ///
    /// Unlike [`apply_reporting`](crate::reporting::apply_reporting) this
    /// cannot fail, since tags have no capacity limit.
    pub fn apply(&mut self, input: &str) {
        for token in parse_reporting(input) {
            self.apply_token(token);
        }
    }

    /// Applies one reporting token.
    pub fn apply_token(&mut self, token: ReportingToken<'_>) {
        match token {
            ReportingToken::Enable(tag) => self.insert(tag),
            ReportingToken::Disable(tag) => self.remove(tag),
            ReportingToken::Exclusive(tag) => {
                self.enabled.clear();
                self.insert(tag);
            }
        }
    }

    /// Returns whether `tag` is enabled, remembering it for later [`ALL`]
    /// tokens.
    ///
    /// [`ALL`] itself passes when any tag is enabled.
    pub fn test(&mut self, tag: &str) -> bool {
        if tag == ALL {
            return !self.enabled.is_empty();
        }
        self.remember(tag);
        self.contains(tag)
    }

    fn insert(&mut self, tag: &str) {
        if tag == ALL {
            self.enabled.clone_from(&self.known);
        } else {
            self.remember(tag);
            self.enabled.insert(tag.to_owned());
        }
    }

    fn remove(&mut self, tag: &str) {
        if tag == ALL {
            self.enabled.clear();
        } else {
            self.remember(tag);
            self.enabled.remove(tag);
        }
    }

    fn remember(&mut self, tag: &str) {
        if tag != ALL && !self.known.contains(tag) {
            self.known.insert(tag.to_owned());
        }
    }
}

impl Categories for TagSet {
    fn enable(&mut self, name: &str) -> Result<()> {
        self.apply_token(ReportingToken::Enable(name));
        Ok(())
    }

    fn disable(&mut self, name: &str) -> Result<()> {
        self.apply_token(ReportingToken::Disable(name));
        Ok(())
    }

    fn set_exclusive(&mut self, name: &str) -> Result<()> {
        self.apply_token(ReportingToken::Exclusive(name));
        Ok(())
    }

    fn is_enabled(&mut self, name: &str) -> Result<bool> {
        Ok(self.test(name))
    }
}
