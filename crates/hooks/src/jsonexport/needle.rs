//! Needle - one compiled extraction rule
//!
//! A needle pairs a JSON Pointer with an output type, an action, and a
//! filter. The `NeedleSet` is the ordered list of needles; its order defines
//! the column order of every emitted row and is fixed once compiled.

use std::borrow::Cow;

use serde_json::Value;

use crate::{HookError, HookResult};

use super::config::NeedleSpec;

#[cfg(test)]
#[path = "needle_test.rs"]
mod tests;

/// Output column type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PqType {
    /// UTF-8 string rendering of the located value
    Text,
    /// ISO-8601 UTC instant encoded as 8-byte big-endian microseconds
    /// since 2000-01-01T00:00:00Z
    Timestamp,
}

impl PqType {
    /// Look up a type by its configuration name
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "text" => Some(Self::Text),
            "timestamp" => Some(Self::Timestamp),
            _ => None,
        }
    }

    /// Configuration name of this type
    pub fn name(self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Timestamp => "timestamp",
        }
    }
}

/// What to do with a located value (and with the whole message)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Store the field (or NULL), whatever the filter said
    Store,
    /// Store the field only if the filter matched; drop the message otherwise
    StoreTrue,
    /// Drop the message if the filter did not match
    DiscardFalse,
    /// Drop the message if the filter matched
    DiscardTrue,
    /// Store the field and also publish it as message metadata
    StoreMeta,
}

impl Action {
    /// Look up an action by its configuration name
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "store" => Some(Self::Store),
            "store_true" => Some(Self::StoreTrue),
            "discard_false" => Some(Self::DiscardFalse),
            "discard_true" => Some(Self::DiscardTrue),
            "store_meta" => Some(Self::StoreMeta),
            _ => None,
        }
    }

    /// Configuration name of this action
    pub fn name(self) -> &'static str {
        match self {
            Self::Store => "store",
            Self::StoreTrue => "store_true",
            Self::DiscardFalse => "discard_false",
            Self::DiscardTrue => "discard_true",
            Self::StoreMeta => "store_meta",
        }
    }

    /// Decide whether the message survives, given the filter result
    #[inline]
    pub fn keep(self, filter_result: bool) -> bool {
        match self {
            Self::Store | Self::StoreMeta => true,
            Self::StoreTrue | Self::DiscardFalse => filter_result,
            Self::DiscardTrue => !filter_result,
        }
    }

    /// Whether this action contributes an output column
    ///
    /// This is a static property of the action; it drives the row layout
    /// regardless of what the filter decided for a particular message.
    #[inline]
    pub fn stores(self) -> bool {
        matches!(self, Self::Store | Self::StoreTrue | Self::StoreMeta)
    }
}

/// Predicate applied to the located value before the action runs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterType {
    /// Always true
    Noop,
    /// String rendering equals the configured argument
    Match,
    /// Configured argument occurs in the string rendering
    Substr,
    /// The pointer resolved
    Exists,
}

impl FilterType {
    /// Look up a filter by its configuration name
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "noop" => Some(Self::Noop),
            "match" => Some(Self::Match),
            "substr" => Some(Self::Substr),
            "exists" => Some(Self::Exists),
            _ => None,
        }
    }

    /// Configuration name of this filter
    pub fn name(self) -> &'static str {
        match self {
            Self::Noop => "noop",
            Self::Match => "match",
            Self::Substr => "substr",
            Self::Exists => "exists",
        }
    }

    /// Whether this filter requires a configured argument
    #[inline]
    pub fn needs_data(self) -> bool {
        matches!(self, Self::Match | Self::Substr)
    }
}

/// Render a JSON value the way the text codec stores it
///
/// Strings render as their raw contents (borrowed); every other value
/// renders as its JSON serialization.
pub(crate) fn render_text(value: &Value) -> Cow<'_, str> {
    match value {
        Value::String(s) => Cow::Borrowed(s.as_str()),
        other => Cow::Owned(other.to_string()),
    }
}

/// One compiled extraction rule
#[derive(Debug, Clone)]
pub struct Needle {
    /// RFC 6901 pointer into the document
    pointer: String,
    /// Output column type
    pqtype: PqType,
    /// Message/column decision
    action: Action,
    /// Predicate feeding the action
    filter: FilterType,
    /// Filter argument; present iff the filter requires one
    filter_data: Option<String>,
}

impl Needle {
    /// Get the JSON Pointer
    #[inline]
    pub fn pointer(&self) -> &str {
        &self.pointer
    }

    /// Get the output type
    #[inline]
    pub fn pqtype(&self) -> PqType {
        self.pqtype
    }

    /// Get the action
    #[inline]
    pub fn action(&self) -> Action {
        self.action
    }

    /// Get the filter
    #[inline]
    pub fn filter_type(&self) -> FilterType {
        self.filter
    }

    /// Evaluate the filter against the located value
    ///
    /// `found` is `Some` iff the pointer resolved. A located JSON `null` is
    /// no data to match against for `match`/`substr`.
    pub(crate) fn filter(&self, found: Option<&Value>) -> bool {
        match self.filter {
            FilterType::Noop => true,
            FilterType::Exists => found.is_some(),
            FilterType::Match => self
                .matchable(found)
                .is_some_and(|text| text.as_ref() == self.filter_data()),
            FilterType::Substr => self
                .matchable(found)
                .is_some_and(|text| text.contains(self.filter_data())),
        }
    }

    /// The located value's rendering, unless unresolved or JSON null
    fn matchable<'a>(&self, found: Option<&'a Value>) -> Option<Cow<'a, str>> {
        found.filter(|v| !v.is_null()).map(render_text)
    }

    fn filter_data(&self) -> &str {
        self.filter_data.as_deref().unwrap_or("")
    }
}

/// The ordered, immutable set of compiled needles
///
/// Order is authoritative: it defines the column order of the emitted row.
/// `fields_count` is the number of storing needles, fixed at compile time,
/// and is the 16-bit count written into every row header.
#[derive(Debug, Clone)]
pub struct NeedleSet {
    needles: Vec<Needle>,
    fields: u16,
}

impl NeedleSet {
    /// Compile normalized needle specs into a needle set
    ///
    /// # Errors
    ///
    /// Rejects unknown enum names, empty pointers, a missing filter
    /// argument, and more needles than the row header can count.
    pub fn compile(specs: &[NeedleSpec]) -> HookResult<Self> {
        if specs.len() > u16::MAX as usize {
            return Err(HookError::config(format!(
                "too many jpointers: {} (max {})",
                specs.len(),
                u16::MAX
            )));
        }

        let mut needles = Vec::with_capacity(specs.len());
        let mut fields: u16 = 0;

        for spec in specs {
            let needle = Self::compile_one(spec)?;
            if needle.action.stores() {
                fields += 1;
            }
            needles.push(needle);
        }

        Ok(Self { needles, fields })
    }

    fn compile_one(spec: &NeedleSpec) -> HookResult<Needle> {
        if spec.jpointer.is_empty() {
            return Err(HookError::config("jpointer must not be empty"));
        }

        let pqtype = PqType::from_name(&spec.pqtype)
            .ok_or_else(|| HookError::config(format!("not a valid type: {}", spec.pqtype)))?;
        let action = Action::from_name(&spec.action)
            .ok_or_else(|| HookError::config(format!("not a valid action: {}", spec.action)))?;
        let filter = FilterType::from_name(&spec.filter)
            .ok_or_else(|| HookError::config(format!("not a valid filter: {}", spec.filter)))?;

        let filter_data = if filter.needs_data() {
            if spec.data.is_empty() {
                return Err(HookError::config(format!(
                    "filter '{}' needs data",
                    filter.name()
                )));
            }
            Some(spec.data.clone())
        } else {
            None
        };

        Ok(Needle {
            pointer: spec.jpointer.clone(),
            pqtype,
            action,
            filter,
            filter_data,
        })
    }

    /// Number of needles
    #[inline]
    pub fn len(&self) -> usize {
        self.needles.len()
    }

    /// Check if the set is empty
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.needles.is_empty()
    }

    /// Number of output columns, as written into every row header
    #[inline]
    pub fn fields_count(&self) -> u16 {
        self.fields
    }

    /// Iterate over needles in column order
    pub fn iter(&self) -> impl Iterator<Item = &Needle> {
        self.needles.iter()
    }
}
