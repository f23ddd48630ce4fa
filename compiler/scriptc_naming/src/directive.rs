//! Contains the closed, typed schema of every naming directive recognised by
//! the naming pass.
//!
//! Raw [`Attribute`]s are parsed into [`Directive`]s exactly once per owner by
//! the [`AttributeReader`](crate::attribute::AttributeReader); everything
//! downstream works with the typed payloads only.

use enum_as_inner::EnumAsInner;
use scriptc_model::{Accessibility, Argument, Attribute, AttributeValue};

use crate::{
    attribute::Owner,
    error::{AttributeFormatError, FormatProblem},
};

/// An enumeration of the recognised directive names.
///
/// The string form is the simple attribute name, as returned by
/// [`Attribute::simple_name()`].
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    strum_macros::EnumString,
    strum_macros::IntoStaticStr,
    strum_macros::Display,
    strum_macros::EnumIter,
)]
#[allow(missing_docs)]
pub enum DirectiveKind {
    Imported,
    PreserveCase,
    PreserveName,
    PreserveMemberCase,
    Reflectable,
    ScriptName,
    ScriptAlias,
    AlternateSignature,
    InlineCode,
    ModuleName,
    ScriptNamespace,
    IgnoreNamespace,
    NamedValues,
    NumericValues,
    IntrinsicProperty,
    DefaultMemberReflectability,
    ScriptAssembly,
}

/// The members whose metadata is emitted for reflection when an assembly
/// declares a default with `[DefaultMemberReflectability]`.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Default,
    strum_macros::EnumString,
    strum_macros::IntoStaticStr,
)]
pub enum MemberReflectability {
    /// No member is reflectable unless it opts in.
    #[default]
    None,

    /// Public, protected and protected internal members.
    PublicAndProtected,

    /// Every member except private ones.
    NonPrivate,

    /// Every member.
    All,
}

impl MemberReflectability {
    /// Checks if a member of the given accessibility is reflectable under this
    /// default.
    #[must_use]
    pub const fn allows(&self, accessibility: Accessibility) -> bool {
        match self {
            Self::None => false,
            Self::PublicAndProtected => matches!(
                accessibility,
                Accessibility::Public
                    | Accessibility::ProtectedInternal
                    | Accessibility::Protected
            ),
            Self::NonPrivate => {
                !matches!(accessibility, Accessibility::Private)
            }
            Self::All => true,
        }
    }
}

/// The payload of `[InlineCode]`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct InlineCode {
    /// The code template substituted at call sites.
    pub code: String,

    /// The name of a method generated to hold the code for use as a
    /// delegate, if requested.
    pub generated_method_name: Option<String>,

    /// The template used for non-virtual (`base.`) invocations.
    pub non_virtual_code: Option<String>,
}

/// A recognised naming directive with its typed payload.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, EnumAsInner)]
#[allow(missing_docs)]
pub enum Directive {
    Imported,
    PreserveCase,
    PreserveName,
    PreserveMemberCase(bool),
    Reflectable(bool),
    ScriptName(String),
    ScriptAlias(String),
    AlternateSignature,
    InlineCode(InlineCode),
    ModuleName(String),
    ScriptNamespace(String),
    IgnoreNamespace,
    NamedValues,
    NumericValues,
    IntrinsicProperty,
    DefaultMemberReflectability(MemberReflectability),
    ScriptAssembly(String),
}

/// Implemented by the payload types that can be read out of an
/// [`AttributeValue`].
pub trait FromAttributeValue: Sized {
    /// The description of the expected value type used in diagnostics.
    const EXPECTED: &'static str;

    /// Converts the value or describes why it cannot be converted.
    ///
    /// # Errors
    ///
    /// Returns the [`FormatProblem`] describing the mismatch.
    fn from_attribute_value(
        value: &AttributeValue,
    ) -> Result<Self, FormatProblem>;
}

impl FromAttributeValue for bool {
    const EXPECTED: &'static str = "bool";

    fn from_attribute_value(
        value: &AttributeValue,
    ) -> Result<Self, FormatProblem> {
        match value {
            AttributeValue::Bool(value) => Ok(*value),
            value => Err(FormatProblem::Mismatch {
                expected: Self::EXPECTED,
                found: value.type_str(),
            }),
        }
    }
}

impl FromAttributeValue for String {
    const EXPECTED: &'static str = "string";

    fn from_attribute_value(
        value: &AttributeValue,
    ) -> Result<Self, FormatProblem> {
        match value {
            AttributeValue::String(value) => Ok(value.clone()),
            value => Err(FormatProblem::Mismatch {
                expected: Self::EXPECTED,
                found: value.type_str(),
            }),
        }
    }
}

impl FromAttributeValue for i64 {
    const EXPECTED: &'static str = "int";

    fn from_attribute_value(
        value: &AttributeValue,
    ) -> Result<Self, FormatProblem> {
        match value {
            AttributeValue::Int(value) => Ok(*value),
            value => Err(FormatProblem::Mismatch {
                expected: Self::EXPECTED,
                found: value.type_str(),
            }),
        }
    }
}

impl FromAttributeValue for MemberReflectability {
    const EXPECTED: &'static str = "`MemberReflectability` constant";

    fn from_attribute_value(
        value: &AttributeValue,
    ) -> Result<Self, FormatProblem> {
        match value {
            AttributeValue::Enum(name) => {
                // accepts both `All` and `MemberReflectability.All`
                let simple = name.rsplit('.').next().unwrap_or(name);

                simple.parse().map_err(|_| FormatProblem::InvalidValue {
                    value: name.clone(),
                    expected: "`None`, `PublicAndProtected`, `NonPrivate` or \
                               `All`",
                })
            }
            value => Err(FormatProblem::Mismatch {
                expected: Self::EXPECTED,
                found: value.type_str(),
            }),
        }
    }
}

struct Parser<'a> {
    owner: Owner,
    attribute: &'a Attribute,
}

impl Parser<'_> {
    fn error(
        &self,
        argument: Argument<'_>,
        problem: FormatProblem,
    ) -> AttributeFormatError {
        AttributeFormatError {
            owner: self.owner,
            attribute: self.attribute.simple_name().to_owned(),
            argument: argument.to_string(),
            problem,
            location: self.attribute.location.clone(),
        }
    }

    fn optional<T: FromAttributeValue>(
        &self,
        argument: Argument<'_>,
    ) -> Result<Option<T>, AttributeFormatError> {
        self.attribute
            .argument(argument)
            .map(|value| {
                T::from_attribute_value(value)
                    .map_err(|problem| self.error(argument, problem))
            })
            .transpose()
    }

    fn required<T: FromAttributeValue>(
        &self,
        argument: Argument<'_>,
    ) -> Result<T, AttributeFormatError> {
        self.optional(argument)?.ok_or_else(|| {
            self.error(argument, FormatProblem::Missing { expected: T::EXPECTED })
        })
    }
}

impl Directive {
    /// Gets the kind of the directive.
    #[must_use]
    pub const fn kind(&self) -> DirectiveKind {
        match self {
            Self::Imported => DirectiveKind::Imported,
            Self::PreserveCase => DirectiveKind::PreserveCase,
            Self::PreserveName => DirectiveKind::PreserveName,
            Self::PreserveMemberCase(_) => DirectiveKind::PreserveMemberCase,
            Self::Reflectable(_) => DirectiveKind::Reflectable,
            Self::ScriptName(_) => DirectiveKind::ScriptName,
            Self::ScriptAlias(_) => DirectiveKind::ScriptAlias,
            Self::AlternateSignature => DirectiveKind::AlternateSignature,
            Self::InlineCode(_) => DirectiveKind::InlineCode,
            Self::ModuleName(_) => DirectiveKind::ModuleName,
            Self::ScriptNamespace(_) => DirectiveKind::ScriptNamespace,
            Self::IgnoreNamespace => DirectiveKind::IgnoreNamespace,
            Self::NamedValues => DirectiveKind::NamedValues,
            Self::NumericValues => DirectiveKind::NumericValues,
            Self::IntrinsicProperty => DirectiveKind::IntrinsicProperty,
            Self::DefaultMemberReflectability(_) => {
                DirectiveKind::DefaultMemberReflectability
            }
            Self::ScriptAssembly(_) => DirectiveKind::ScriptAssembly,
        }
    }

    /// Gets the truth value of a flag-style directive: `true` for a payload
    /// free directive, the payload for `PreserveMemberCase` and
    /// `Reflectable`, and `false` for directives carrying other data.
    #[must_use]
    pub const fn flag(&self) -> bool {
        match self {
            Self::Imported
            | Self::PreserveCase
            | Self::PreserveName
            | Self::AlternateSignature
            | Self::IgnoreNamespace
            | Self::NamedValues
            | Self::NumericValues
            | Self::IntrinsicProperty => true,

            Self::PreserveMemberCase(value) | Self::Reflectable(value) => *value,

            Self::ScriptName(_)
            | Self::ScriptAlias(_)
            | Self::InlineCode(_)
            | Self::ModuleName(_)
            | Self::ScriptNamespace(_)
            | Self::DefaultMemberReflectability(_)
            | Self::ScriptAssembly(_) => false,
        }
    }

    /// Parses a raw attribute into a directive.
    ///
    /// Returns `Ok(None)` for attributes that are not naming directives.
    ///
    /// # Errors
    ///
    /// Returns [`AttributeFormatError`] if the attribute is a recognised
    /// directive with a missing or ill-typed argument.
    pub fn parse(
        owner: Owner,
        attribute: &Attribute,
    ) -> Result<Option<Self>, AttributeFormatError> {
        let Ok(kind) = attribute.simple_name().parse::<DirectiveKind>() else {
            return Ok(None);
        };

        let parser = Parser { owner, attribute };
        let first = Argument::Positional(0);

        let directive = match kind {
            DirectiveKind::Imported => Self::Imported,
            DirectiveKind::PreserveCase => Self::PreserveCase,
            DirectiveKind::PreserveName => Self::PreserveName,
            DirectiveKind::AlternateSignature => Self::AlternateSignature,
            DirectiveKind::IgnoreNamespace => Self::IgnoreNamespace,
            DirectiveKind::NamedValues => Self::NamedValues,
            DirectiveKind::NumericValues => Self::NumericValues,
            DirectiveKind::IntrinsicProperty => Self::IntrinsicProperty,

            DirectiveKind::PreserveMemberCase => Self::PreserveMemberCase(
                parser.optional(first)?.unwrap_or(true),
            ),
            DirectiveKind::Reflectable => {
                Self::Reflectable(parser.optional(first)?.unwrap_or(true))
            }

            DirectiveKind::ScriptName => Self::ScriptName(parser.required(first)?),
            DirectiveKind::ScriptAlias => {
                Self::ScriptAlias(parser.required(first)?)
            }
            DirectiveKind::ModuleName => Self::ModuleName(parser.required(first)?),
            DirectiveKind::ScriptNamespace => {
                Self::ScriptNamespace(parser.required(first)?)
            }
            DirectiveKind::ScriptAssembly => {
                Self::ScriptAssembly(parser.required(first)?)
            }
            DirectiveKind::DefaultMemberReflectability => {
                Self::DefaultMemberReflectability(parser.required(first)?)
            }

            DirectiveKind::InlineCode => Self::InlineCode(InlineCode {
                code: parser.required(first)?,
                generated_method_name: parser
                    .optional(Argument::Named("GeneratedMethodName"))?,
                non_virtual_code: parser
                    .optional(Argument::Named("NonVirtualCode"))?,
            }),
        };

        Ok(Some(directive))
    }
}

#[cfg(test)]
mod test;
