//! Contains the error types of the naming pass.

use scriptc_diagnostic::Location;
use scriptc_model::SymbolID;

use crate::attribute::Owner;

/// The error type returned by
/// [`ScriptNameSymbolTable::get()`](crate::table::ScriptNameSymbolTable::get).
///
/// Both variants indicate a bug in the surrounding driver (looking up a symbol
/// outside the discovered scope, or asking for the wrong metadata variant)
/// rather than a property of the input program.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, thiserror::Error,
)]
pub enum GetError {
    /// The symbol was never discovered by any of the three tiers.
    #[error("the symbol {0:?} was not discovered by the naming pass")]
    SymbolNotFound(SymbolID),

    /// The symbol was discovered but its metadata is of another variant.
    #[error("the symbol {id:?} is a {found}, not a {expected}")]
    KindMismatch {
        /// The symbol looked up.
        id: SymbolID,

        /// The variant requested by the caller.
        expected: &'static str,

        /// The variant actually stored.
        found: &'static str,
    },
}

/// Describes what is wrong with an attribute argument.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FormatProblem {
    /// A required argument was not supplied.
    Missing {
        /// The expected value type.
        expected: &'static str,
    },

    /// The argument has the wrong value type.
    Mismatch {
        /// The expected value type.
        expected: &'static str,

        /// The value type supplied.
        found: &'static str,
    },

    /// The argument has the right type but names no known value.
    InvalidValue {
        /// The supplied value.
        value: String,

        /// The description of the accepted values.
        expected: &'static str,
    },
}

impl std::fmt::Display for FormatProblem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Missing { expected } => {
                write!(f, "is missing; expected {expected}")
            }
            Self::Mismatch { expected, found } => {
                write!(f, "has type {found}; expected {expected}")
            }
            Self::InvalidValue { value, expected } => {
                write!(f, "`{value}` is not one of {expected}")
            }
        }
    }
}

/// An attribute recognised as a naming directive carries a malformed
/// argument.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{argument} of `[{attribute}]` {problem}")]
pub struct AttributeFormatError {
    /// The symbol or assembly the attribute is attached to.
    pub owner: Owner,

    /// The simple name of the attribute.
    pub attribute: String,

    /// The rendered argument selector, such as `argument #1`.
    pub argument: String,

    /// What is wrong with the argument.
    pub problem: FormatProblem,

    /// The location of the attribute application, if known.
    pub location: Option<Location>,
}
