//! Computes the identifier every declared entity carries in emitted script
//! code.
//!
//! The entry point is [`table::ScriptSymbolTable`]: it discovers the symbols
//! visible to the translation unit in three tiers, runs each of them through
//! the [`namer::ScriptNamer`] precedence chain and freezes the result into a
//! [`table::ScriptNameSymbolTable`].
//!
//! ```text
//! provider ─► discovery ─► alternate signatures ─► namer ─► overrides ─► table
//! ```

pub mod alternate_signature;
pub mod attribute;
pub mod cancel;
pub mod diagnostic;
pub mod directive;
pub mod error;
pub mod namer;
pub mod overrides;
pub mod rules;
pub mod script_symbol;
pub mod table;

pub use cancel::{Cancellation, Cancelled};
pub use diagnostic::Diagnostic;
pub use error::GetError;
pub use overrides::{SymbolTableOverride, SymbolTableOverrides};
pub use rules::RenameRules;
pub use table::{ScriptNameSymbolTable, ScriptSymbolTable};

#[cfg(test)]
mod test;
