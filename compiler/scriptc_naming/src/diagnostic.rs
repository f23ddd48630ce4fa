//! Contains the diagnostics reported while the symbol table is built.

use enum_as_inner::EnumAsInner;
use scriptc_diagnostic::{Related, Report, Severity};
use scriptc_model::{Provider, SymbolID, SymbolKey};

use crate::{attribute::Owner, error::AttributeFormatError};

/// An enumeration of every diagnostic the naming pass can report.
#[derive(Debug, Clone, PartialEq, Eq, EnumAsInner, derive_more::From)]
#[allow(missing_docs)]
pub enum Diagnostic {
    AttributeFormat(AttributeFormatError),
    DuplicateImplementation(DuplicateImplementation),
    OverrideKeyMismatch(OverrideKeyMismatch),
}

/// An alternate signature group has no implementation, or more than one.
///
/// The group is not collapsed; its members are named as ordinary overloads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DuplicateImplementation {
    /// The type declaring the group.
    pub containing_type: SymbolID,

    /// The shared member name of the group.
    pub name: String,

    /// The members without `[AlternateSignature]`; anything but exactly one
    /// is an error.
    pub implementations: Vec<SymbolID>,

    /// The members marked `[AlternateSignature]`.
    pub alternate_signatures: Vec<SymbolID>,
}

/// An override key matches none of the discovered symbols.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OverrideKeyMismatch {
    /// The key as supplied.
    pub key: SymbolKey,

    /// The discovered key closest to the supplied one, if any is close.
    pub suggestion: Option<SymbolKey>,
}

fn owner_description(provider: &dyn Provider, owner: Owner) -> String {
    match owner {
        Owner::Symbol(id) => {
            let symbol = provider.symbol(id);
            format!("{} `{}`", symbol.kind.kind_str(), SymbolKey::of(provider, id))
        }
        Owner::Assembly(id) => {
            format!("assembly `{}`", provider.assembly(id).name)
        }
    }
}

impl Report<&dyn Provider> for AttributeFormatError {
    fn report(&self, provider: &dyn Provider) -> scriptc_diagnostic::Diagnostic {
        let location = self.location.clone().or_else(|| match self.owner {
            Owner::Symbol(id) => provider.symbol(id).location.clone(),
            Owner::Assembly(_) => None,
        });

        scriptc_diagnostic::Diagnostic {
            location,
            message: format!(
                "malformed `[{}]` on {}: {} {}",
                self.attribute,
                owner_description(provider, self.owner),
                self.argument,
                self.problem
            ),
            severity: Severity::Error,
            help_message: Some(
                "the directive is ignored and the default naming applies"
                    .to_owned(),
            ),
            related: Vec::new(),
        }
    }
}

impl Report<&dyn Provider> for DuplicateImplementation {
    fn report(&self, provider: &dyn Provider) -> scriptc_diagnostic::Diagnostic {
        let containing_type = provider.symbol(self.containing_type);

        let message = if self.implementations.is_empty() {
            format!(
                "the alternate signatures of `{}` in `{}` have no \
                 implementation",
                self.name,
                SymbolKey::of(provider, self.containing_type)
            )
        } else {
            format!(
                "the alternate signatures of `{}` in `{}` have {} \
                 implementations",
                self.name,
                SymbolKey::of(provider, self.containing_type),
                self.implementations.len()
            )
        };

        let related = self
            .implementations
            .iter()
            .map(|id| {
                Related::new(
                    provider.symbol(*id).location.clone(),
                    format!(
                        "`{}` is an implementation",
                        SymbolKey::of(provider, *id)
                    ),
                )
            })
            .collect();

        scriptc_diagnostic::Diagnostic {
            location: containing_type.location.clone(),
            message,
            severity: Severity::Error,
            help_message: Some(
                "mark every overload but one with `[AlternateSignature]`"
                    .to_owned(),
            ),
            related,
        }
    }
}

impl Report<&dyn Provider> for OverrideKeyMismatch {
    fn report(&self, _: &dyn Provider) -> scriptc_diagnostic::Diagnostic {
        scriptc_diagnostic::Diagnostic {
            location: None,
            message: format!(
                "the override `{}` does not match any discovered symbol",
                self.key
            ),
            severity: Severity::Warning,
            help_message: self
                .suggestion
                .as_ref()
                .map(|suggestion| format!("did you mean `{suggestion}`?")),
            related: Vec::new(),
        }
    }
}

impl Report<&dyn Provider> for Diagnostic {
    fn report(&self, provider: &dyn Provider) -> scriptc_diagnostic::Diagnostic {
        match self {
            Self::AttributeFormat(error) => error.report(provider),
            Self::DuplicateImplementation(error) => error.report(provider),
            Self::OverrideKeyMismatch(error) => error.report(provider),
        }
    }
}
