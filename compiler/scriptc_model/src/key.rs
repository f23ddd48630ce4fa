//! Contains the definition of [`SymbolKey`], the canonical signature string
//! used to identify a symbol across tools.

use std::{convert::Infallible, fmt::Write, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::{Kind, Provider, SymbolID};

/// A stable, displayable signature string uniquely identifying a symbol
/// including its overload shape, such as `C.Method(int x, string y)`.
///
/// Types are keyed by their dotted namespace, containing types and name
/// (`Ns.Outer.Inner<T>`); members append `.Name`; invocable members append
/// their type parameters and the `(type name, ...)` parameter list. Instance
/// constructors are named `.ctor` and static constructors `.cctor`.
///
/// Every way of constructing a key goes through the same canonicalization,
/// so `C.Method( int x,string y )` parsed by a caller equals the key the
/// table generates for that method.
#[derive(
    Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(from = "String", into = "String")]
pub struct SymbolKey(String);

impl SymbolKey {
    /// Generates the key of the symbol with the given ID.
    #[must_use]
    pub fn of<P: Provider + ?Sized>(provider: &P, id: SymbolID) -> Self {
        let mut raw = String::new();
        write_symbol(provider, id, &mut raw);

        Self(canonicalize(&raw))
    }

    /// Gets the canonical string form.
    #[must_use]
    pub fn as_str(&self) -> &str { &self.0 }
}

impl FromStr for SymbolKey {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> { Ok(Self(canonicalize(s))) }
}

impl From<String> for SymbolKey {
    fn from(value: String) -> Self { Self(canonicalize(&value)) }
}

impl From<&str> for SymbolKey {
    fn from(value: &str) -> Self { Self(canonicalize(value)) }
}

impl From<SymbolKey> for String {
    fn from(value: SymbolKey) -> Self { value.0 }
}

impl std::fmt::Display for SymbolKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

fn write_type_parameters(type_parameters: &[String], out: &mut String) {
    if type_parameters.is_empty() {
        return;
    }

    out.push('<');
    out.push_str(&type_parameters.join(", "));
    out.push('>');
}

fn write_type<P: Provider + ?Sized>(
    provider: &P,
    id: SymbolID,
    out: &mut String,
) {
    let symbol = provider.symbol(id);

    if let Some(containing_type) = symbol.containing_type {
        write_type(provider, containing_type, out);
        out.push('.');
    } else if !symbol.namespace.is_empty() {
        out.push_str(&symbol.namespace);
        out.push('.');
    }

    out.push_str(&symbol.name);
    write_type_parameters(&symbol.type_parameters, out);
}

fn write_symbol<P: Provider + ?Sized>(
    provider: &P,
    id: SymbolID,
    out: &mut String,
) {
    let symbol = provider.symbol(id);

    if symbol.kind.is_type() {
        write_type(provider, id, out);
        return;
    }

    if let Some(containing_type) = symbol.containing_type {
        write_type(provider, containing_type, out);
        out.push('.');
    }

    match symbol.kind {
        Kind::Constructor => out.push_str(".ctor"),
        Kind::StaticConstructor => out.push_str(".cctor"),
        _ => out.push_str(&symbol.name),
    }

    if !symbol.kind.is_invocable() {
        return;
    }

    write_type_parameters(&symbol.type_parameters, out);

    out.push('(');
    for (index, parameter) in symbol.parameters.iter().enumerate() {
        if index > 0 {
            out.push_str(", ");
        }

        let _ = write!(out, "{} {}", parameter.type_name, parameter.name);
    }
    out.push(')');
}

/// Collapses whitespace: none around punctuation, a single space after each
/// comma and between words.
fn canonicalize(raw: &str) -> String {
    let mut result = String::with_capacity(raw.len());
    let mut pending_space = false;

    for ch in raw.chars() {
        if ch.is_whitespace() {
            pending_space = !result.is_empty();
            continue;
        }

        if matches!(ch, '(' | ')' | '<' | '>' | '[' | ']' | ',' | '.') {
            result.push(ch);
            pending_space = ch == ',';
            continue;
        }

        if pending_space && !result.ends_with(['(', '<', '[', '.']) {
            result.push(' ');
        }

        pending_space = false;
        result.push(ch);
    }

    result
}
