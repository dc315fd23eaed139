//! Ordered parameter collection underlying every protocol message.
//!
//! Insertion order is preserved so that serialized output is deterministic;
//! the wire serializers in [`crate::serializer`] rely on it.

use indexmap::IndexMap;

// =============================================================================
// Parameter values
// =============================================================================

/// A single parameter value.
///
/// Numbers are kept typed so the JSON serializer can emit them unquoted
/// (`expires_in` in particular); lists cover multi-valued parameters such
/// as scopes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParamValue {
    Str(String),
    Num(i64),
    List(Vec<String>),
}

impl ParamValue {
    /// `true` when the value would be skipped by every serializer: an empty
    /// string or an empty list.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Str(s) => s.is_empty(),
            Self::Num(_) => false,
            Self::List(items) => items.is_empty(),
        }
    }

    /// Renders the value as the single string the query/body/header
    /// serializers put on the wire. Lists join with a space (scope
    /// semantics).
    #[must_use]
    pub fn render(&self) -> String {
        match self {
            Self::Str(s) => s.clone(),
            Self::Num(n) => n.to_string(),
            Self::List(items) => items.join(" "),
        }
    }

    /// Borrowed string value, when the parameter is a plain string.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(s) => Some(s),
            _ => None,
        }
    }
}

impl From<&str> for ParamValue {
    fn from(value: &str) -> Self {
        Self::Str(value.to_owned())
    }
}

impl From<String> for ParamValue {
    fn from(value: String) -> Self {
        Self::Str(value)
    }
}

impl From<i64> for ParamValue {
    fn from(value: i64) -> Self {
        Self::Num(value)
    }
}

impl From<u64> for ParamValue {
    fn from(value: u64) -> Self {
        Self::Num(value as i64)
    }
}

impl From<Vec<String>> for ParamValue {
    fn from(value: Vec<String>) -> Self {
        Self::List(value)
    }
}

// =============================================================================
// ParameterBag
// =============================================================================

/// Ordered name → value mapping backing requests and responses.
///
/// Mutated only while a message is being built; serializers take it by
/// shared reference and never change it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParameterBag {
    entries: IndexMap<String, ParamValue>,
}

impl ParameterBag {
    /// Creates an empty bag.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or replaces a parameter, keeping the original position on
    /// replacement.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<ParamValue>) {
        self.entries.insert(name.into(), value.into());
    }

    /// Inserts the parameter only when a value is present.
    pub fn set_opt(&mut self, name: impl Into<String>, value: Option<impl Into<ParamValue>>) {
        if let Some(value) = value {
            self.set(name, value);
        }
    }

    /// Looks a parameter up by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&ParamValue> {
        self.entries.get(name)
    }

    /// String form of a parameter, rendering numbers and lists.
    #[must_use]
    pub fn get_rendered(&self, name: &str) -> Option<String> {
        self.entries.get(name).map(ParamValue::render)
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Removes a parameter, returning its value.
    pub fn remove(&mut self, name: &str) -> Option<ParamValue> {
        self.entries.shift_remove(name)
    }

    /// Iterates entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ParamValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }
}

impl<N: Into<String>, V: Into<ParamValue>> FromIterator<(N, V)> for ParameterBag {
    fn from_iter<T: IntoIterator<Item = (N, V)>>(iter: T) -> Self {
        let mut bag = Self::new();
        for (name, value) in iter {
            bag.set(name, value);
        }
        bag
    }
}

impl<'a> IntoIterator for &'a ParameterBag {
    type Item = (&'a str, &'a ParamValue);
    type IntoIter = Box<dyn Iterator<Item = (&'a str, &'a ParamValue)> + 'a>;

    fn into_iter(self) -> Self::IntoIter {
        Box::new(self.iter())
    }
}
