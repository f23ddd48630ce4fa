//! Contains [`RenameRules`], the configuration of the default naming
//! convention.

use getset::Getters;
use serde::{Deserialize, Serialize};

/// How fields reaching the default convention are renamed.
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
    Serialize,
    Deserialize,
)]
#[serde(rename_all = "kebab-case")]
pub enum FieldRenameRule {
    /// Lowercase the first character: `Count` becomes `count`.
    #[default]
    CamelCase,

    /// Like [`Self::CamelCase`], and prefix private fields with `$`.
    PrivateDollarPrefix,

    /// Like [`Self::CamelCase`], and prefix a private field with `$` only
    /// when its name collides with another member of the same type.
    DollarPrefixOnlyForDuplicateName,
}

/// How enum members reaching the default convention are renamed.
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
    Serialize,
    Deserialize,
)]
#[serde(rename_all = "kebab-case")]
pub enum EnumMemberRenameRule {
    /// Lowercase the first character, like any other member.
    #[default]
    LowerCaseFirstChar,

    /// Keep the declared name.
    MatchDeclaredName,
}

/// The designated runtime support library whose types are prefixed when
/// referenced from other assemblies.
#[derive(
    Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Getters,
)]
#[serde(rename_all = "kebab-case", default)]
pub struct RuntimeLibrary {
    /// The simple name of the runtime assembly.
    #[get = "pub"]
    assembly_name: String,

    /// The prefix, without the trailing dot.
    #[get = "pub"]
    alias: String,
}

impl RuntimeLibrary {
    /// Creates a runtime library description.
    #[must_use]
    pub fn new(
        assembly_name: impl Into<String>,
        alias: impl Into<String>,
    ) -> Self {
        Self { assembly_name: assembly_name.into(), alias: alias.into() }
    }
}

impl Default for RuntimeLibrary {
    fn default() -> Self { Self::new("mscorlib", "ss") }
}

/// The immutable configuration of the default naming convention.
#[derive(
    Debug,
    Clone,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    Getters,
    derive_new::new,
)]
#[serde(rename_all = "kebab-case", default)]
pub struct RenameRules {
    /// The field rule.
    #[get = "pub"]
    field_rule: FieldRenameRule,

    /// The enum member rule.
    #[get = "pub"]
    enum_member_rule: EnumMemberRenameRule,

    /// The runtime support library.
    #[get = "pub"]
    runtime_library: RuntimeLibrary,
}

impl RenameRules {
    /// Returns a copy with the field rule replaced.
    #[must_use]
    pub fn with_field_rule(mut self, field_rule: FieldRenameRule) -> Self {
        self.field_rule = field_rule;
        self
    }

    /// Returns a copy with the enum member rule replaced.
    #[must_use]
    pub fn with_enum_member_rule(
        mut self,
        enum_member_rule: EnumMemberRenameRule,
    ) -> Self {
        self.enum_member_rule = enum_member_rule;
        self
    }
}

#[cfg(test)]
mod test;
