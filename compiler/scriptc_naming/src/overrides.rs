//! Contains [`SymbolTableOverrides`], the manual per-symbol overrides supplied
//! by the host.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use scriptc_model::SymbolKey;

/// A manual override of the computed metadata of one symbol.
///
/// Every field that is present replaces the computed value; absent fields
/// leave it untouched.
#[derive(
    Debug,
    Clone,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Default,
    Serialize,
    Deserialize,
)]
#[serde(rename_all = "camelCase", default)]
pub struct SymbolTableOverride {
    /// The script name to use.
    pub script_name: Option<String>,

    /// The inline code template of a method.
    pub inline_code: Option<String>,
}

impl SymbolTableOverride {
    /// Creates an override replacing only the script name.
    #[must_use]
    pub fn script_name(name: impl Into<String>) -> Self {
        Self { script_name: Some(name.into()), inline_code: None }
    }
}

/// A map from canonical [`SymbolKey`] to [`SymbolTableOverride`].
///
/// Serialized as a plain object keyed by signature:
///
/// ```json
/// { "C.Method(int x, string y)": { "scriptName": "run" } }
/// ```
#[derive(
    Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct SymbolTableOverrides {
    overrides: BTreeMap<SymbolKey, SymbolTableOverride>,
}

impl SymbolTableOverrides {
    /// Creates an empty override map.
    #[must_use]
    pub const fn new() -> Self { Self { overrides: BTreeMap::new() } }

    /// Adds or replaces the override of the given key.
    pub fn insert(
        &mut self,
        key: impl Into<SymbolKey>,
        value: SymbolTableOverride,
    ) -> Option<SymbolTableOverride> {
        self.overrides.insert(key.into(), value)
    }

    /// Gets the override of the given key.
    #[must_use]
    pub fn get(&self, key: &SymbolKey) -> Option<&SymbolTableOverride> {
        self.overrides.get(key)
    }

    /// Gets the number of overrides.
    #[must_use]
    pub fn len(&self) -> usize { self.overrides.len() }

    /// Checks if there is no override.
    #[must_use]
    pub fn is_empty(&self) -> bool { self.overrides.is_empty() }

    /// Iterates over the keys in sorted order.
    pub fn keys(&self) -> impl Iterator<Item = &SymbolKey> {
        self.overrides.keys()
    }
}

impl<K: Into<SymbolKey>> FromIterator<(K, SymbolTableOverride)>
    for SymbolTableOverrides
{
    fn from_iter<T: IntoIterator<Item = (K, SymbolTableOverride)>>(
        iter: T,
    ) -> Self {
        Self {
            overrides: iter
                .into_iter()
                .map(|(key, value)| (key.into(), value))
                .collect(),
        }
    }
}
