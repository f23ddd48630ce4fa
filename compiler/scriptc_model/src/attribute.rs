//! Contains the raw attribute data attached to symbols and assemblies.

use std::collections::BTreeMap;

use scriptc_diagnostic::Location;
use serde::{Deserialize, Serialize};

/// A constant argument value of an attribute application.
#[derive(
    Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum AttributeValue {
    /// The `null` literal.
    Null,

    /// A boolean literal.
    Bool(bool),

    /// An integral literal.
    Int(i64),

    /// A string literal.
    String(String),

    /// An enum constant, identified by its member name such as `All`.
    Enum(String),
}

impl AttributeValue {
    /// Gets the description of the value type used in diagnostics.
    #[must_use]
    pub const fn type_str(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool(_) => "bool",
            Self::Int(_) => "int",
            Self::String(_) => "string",
            Self::Enum(_) => "enum constant",
        }
    }
}

/// Selects an argument of an attribute application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Argument<'a> {
    /// The constructor argument at the given zero-based position.
    Positional(usize),

    /// The named property or field argument.
    Named(&'a str),
}

impl std::fmt::Display for Argument<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Positional(index) => write!(f, "argument #{}", index + 1),
            Self::Named(name) => write!(f, "argument `{name}`"),
        }
    }
}

/// An attribute applied to a symbol or an assembly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attribute {
    /// The name as written, possibly namespace qualified and possibly ending
    /// with the `Attribute` suffix.
    pub name: String,

    /// The positional constructor arguments.
    #[serde(default)]
    pub arguments: Vec<AttributeValue>,

    /// The named arguments.
    #[serde(default)]
    pub named_arguments: BTreeMap<String, AttributeValue>,

    /// Where the attribute is applied in source.
    #[serde(default)]
    pub location: Option<Location>,
}

impl Attribute {
    /// Creates an attribute application without arguments.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            arguments: Vec::new(),
            named_arguments: BTreeMap::new(),
            location: None,
        }
    }

    /// Appends a positional argument.
    #[must_use]
    pub fn with_argument(mut self, value: AttributeValue) -> Self {
        self.arguments.push(value);
        self
    }

    /// Sets a named argument.
    #[must_use]
    pub fn with_named_argument(
        mut self,
        name: impl Into<String>,
        value: AttributeValue,
    ) -> Self {
        self.named_arguments.insert(name.into(), value);
        self
    }

    /// Gets the simple name of the attribute: the last segment of the
    /// qualified name with the `Attribute` suffix removed.
    ///
    /// `System.Runtime.CompilerServices.ScriptNameAttribute` becomes
    /// `ScriptName`.
    #[must_use]
    pub fn simple_name(&self) -> &str {
        let last = self.name.rsplit('.').next().unwrap_or(&self.name);

        match last.strip_suffix("Attribute") {
            Some(stripped) if !stripped.is_empty() => stripped,
            _ => last,
        }
    }

    /// Gets the value of the given argument if it was supplied.
    #[must_use]
    pub fn argument(&self, argument: Argument<'_>) -> Option<&AttributeValue> {
        match argument {
            Argument::Positional(index) => self.arguments.get(index),
            Argument::Named(name) => self.named_arguments.get(name),
        }
    }
}
