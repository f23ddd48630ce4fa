//! Contains the definition of the [`Diagnostic`] struct and related types.

use std::fmt::Display;

use colored::Colorize;
use serde::{Deserialize, Serialize};

/// Implement this trait for a type that can report a diagnostic.
///
/// This trait is implemented by the structs and enums that encode the error
/// or warning conditions found while naming symbols. The `Param` is whatever
/// context is needed to render the names and locations mentioned in the
/// message, usually the semantic model.
pub trait Report<Param> {
    /// Creates a diagnostic.
    fn report(&self, parameter: Param) -> Diagnostic;
}

/// Enumeration of the severity levels of a diagnostic.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
)]
pub enum Severity {
    /// An error; the affected declarations should not be emitted.
    Error,

    /// A warning that does not prevent the translation.
    Warning,

    /// An informational message.
    Info,
}

impl Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Error => write!(f, "{}", "error".bright_red().bold()),
            Self::Warning => write!(f, "{}", "warning".bright_yellow().bold()),
            Self::Info => write!(f, "{}", "info".bright_green().bold()),
        }
    }
}

/// A position in a source file of the translation unit.
#[derive(
    Debug,
    Clone,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    derive_new::new,
)]
pub struct Location {
    /// The path of the source file as reported by the semantic provider.
    pub file: String,

    /// One-based line number.
    pub line: usize,

    /// One-based column number.
    pub column: usize,
}

impl Display for Location {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}:{}", self.file, self.line, self.column)
    }
}

/// The related information that is displayed alongside the main
/// [`Diagnostic`].
#[derive(
    Debug,
    Clone,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    derive_new::new,
)]
pub struct Related {
    /// The location to display the message at, if known.
    pub location: Option<Location>,

    /// The message to display to the user.
    pub message: String,
}

/// A struct containing all the information required to display the diagnostic
/// to the user.
#[derive(
    Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct Diagnostic {
    /// The location where the diagnostic occurred. Symbols coming from
    /// referenced assemblies usually have no location.
    pub location: Option<Location>,

    /// The message to display to the user.
    pub message: String,

    /// The severity of the diagnostic.
    pub severity: Severity,

    /// The optional help message displayed alongside the main message.
    pub help_message: Option<String>,

    /// List of related useful information to display to the user.
    pub related: Vec<Related>,
}

impl Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.severity, self.message.bold())?;

        if let Some(location) = &self.location {
            write!(f, "\n  {} {location}", "-->".bright_blue().bold())?;
        }

        if let Some(help_message) = &self.help_message {
            write!(f, "\n  {} {help_message}", "help:".bold())?;
        }

        for related in &self.related {
            match &related.location {
                Some(location) => write!(
                    f,
                    "\n  {} {location}: {}",
                    "note:".bold(),
                    related.message
                )?,
                None => write!(f, "\n  {} {}", "note:".bold(), related.message)?,
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod test;
