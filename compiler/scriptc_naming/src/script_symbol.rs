//! Contains the [`ScriptSymbol`] family: the typed, frozen metadata record the
//! table keeps for every discovered symbol.

use enum_as_inner::EnumAsInner;
use getset::{CopyGetters, Getters};
use scriptc_model::{AssemblyID, Kind, Provider, SymbolID, SymbolKey};

use crate::{
    attribute::{AttributeReader, Scope},
    directive::{Directive, DirectiveKind, InlineCode, MemberReflectability},
    namer::{NameSource, ScriptNamer},
    overrides::SymbolTableOverride,
};

/// The metadata of a type.
#[derive(
    Debug, Clone, PartialEq, Eq, Default, Getters, CopyGetters,
)]
pub struct ScriptType {
    /// `[PreserveMemberCase]` on the type, or on its assembly when the type
    /// does not say.
    #[get_copy = "pub"]
    preserve_member_case: bool,

    /// `[ModuleName]` on the type or, failing that, its assembly.
    #[get = "pub"]
    module_name: Option<String>,

    /// `[ScriptNamespace]`.
    #[get = "pub"]
    script_namespace: Option<String>,

    /// `[IgnoreNamespace]`.
    #[get_copy = "pub"]
    ignore_namespace: bool,

    /// `[NamedValues]` on an enum: members are emitted as strings.
    #[get_copy = "pub"]
    named_values: bool,

    /// `[NumericValues]` on an enum.
    #[get_copy = "pub"]
    numeric_values: bool,

    /// `[ScriptAlias]`.
    #[get = "pub"]
    script_alias: Option<String>,
}

/// The metadata of a method or constructor.
#[derive(
    Debug, Clone, PartialEq, Eq, Default, Getters, CopyGetters,
)]
pub struct ScriptMethod {
    /// `[AlternateSignature]`.
    #[get_copy = "pub"]
    alternate_signature: bool,

    /// The implementation of the alternate signature group, for stubs of a
    /// valid group.
    #[get_copy = "pub"]
    implementation: Option<SymbolID>,

    /// `[ScriptAlias]`.
    #[get = "pub"]
    script_alias: Option<String>,

    /// `[InlineCode]`, or the inline code of an override.
    #[get = "pub"]
    inline_code: Option<InlineCode>,

    /// Whether this is an instance or static constructor.
    #[get_copy = "pub"]
    is_constructor: bool,
}

/// The metadata of a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, CopyGetters)]
pub struct ScriptField {
    /// Whether the script name carries the `$` prefix of a field rule.
    #[get_copy = "pub"]
    dollar_prefixed: bool,
}

/// The metadata of a property.
#[derive(
    Debug, Clone, PartialEq, Eq, Default, Getters, CopyGetters,
)]
pub struct ScriptProperty {
    /// `[IntrinsicProperty]`: accessed as a plain field, without accessors.
    #[get_copy = "pub"]
    intrinsic: bool,

    /// `get_<name>`, unless the property is intrinsic.
    #[get = "pub"]
    getter_name: Option<String>,

    /// `set_<name>`, unless the property is intrinsic.
    #[get = "pub"]
    setter_name: Option<String>,
}

/// The metadata of an event.
#[derive(Debug, Clone, PartialEq, Eq, Default, Getters)]
pub struct ScriptEvent {
    /// `add_<name>`.
    #[get = "pub"]
    adder_name: Option<String>,

    /// `remove_<name>`.
    #[get = "pub"]
    remover_name: Option<String>,
}

/// The metadata of an enum member.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, CopyGetters)]
pub struct ScriptEnumMember {
    /// Whether the enum emits its members as their names.
    #[get_copy = "pub"]
    named_value: bool,
}

/// The kind-specific part of a [`ScriptSymbol`].
#[derive(Debug, Clone, PartialEq, Eq, EnumAsInner)]
#[allow(missing_docs)]
pub enum ScriptSymbolKind {
    Type(ScriptType),
    Method(ScriptMethod),
    Field(ScriptField),
    Property(ScriptProperty),
    Event(ScriptEvent),
    EnumMember(ScriptEnumMember),
}

impl ScriptSymbolKind {
    /// Gets the description string of the variant.
    #[must_use]
    pub const fn kind_str(&self) -> &'static str {
        match self {
            Self::Type(_) => "type",
            Self::Method(_) => "method",
            Self::Field(_) => "field",
            Self::Property(_) => "property",
            Self::Event(_) => "event",
            Self::EnumMember(_) => "enum member",
        }
    }
}

/// The metadata record of one symbol.
#[derive(Debug, Clone, PartialEq, Eq, Getters, CopyGetters)]
pub struct ScriptSymbol {
    /// The symbol described.
    #[get_copy = "pub"]
    id: SymbolID,

    /// The canonical signature.
    #[get = "pub"]
    key: SymbolKey,

    /// The computed script name; `None` for constructors.
    #[get = "pub"]
    script_name: Option<String>,

    /// The rule the script name came from.
    #[get_copy = "pub"]
    name_source: Option<NameSource>,

    /// `[Imported]` on the symbol, its containing type or its assembly.
    #[get_copy = "pub"]
    imported: bool,

    /// `[PreserveCase]`.
    #[get_copy = "pub"]
    preserve_case: bool,

    /// `[PreserveName]`.
    #[get_copy = "pub"]
    preserve_name: bool,

    /// `[Reflectable]`, or the assembly's default member reflectability.
    #[get_copy = "pub"]
    reflectable: bool,

    /// The argument of `[ScriptName]` on the symbol.
    #[get = "pub"]
    explicit_script_name: Option<String>,

    /// The kind-specific metadata.
    #[get = "pub"]
    kind: ScriptSymbolKind,
}

/// The metadata record of an assembly.
#[derive(Debug, Clone, PartialEq, Eq, Getters, CopyGetters)]
pub struct ScriptAssemblySymbol {
    /// The assembly described.
    #[get_copy = "pub"]
    id: AssemblyID,

    /// `[ScriptAssembly]`: the name of the emitted script file.
    #[get = "pub"]
    script_assembly: Option<String>,

    /// `[ModuleName]`.
    #[get = "pub"]
    module_name: Option<String>,

    /// `[DefaultMemberReflectability]`.
    #[get_copy = "pub"]
    default_member_reflectability: MemberReflectability,

    /// `[PreserveMemberCase]`.
    #[get_copy = "pub"]
    preserve_member_case: bool,

    /// `[Imported]`.
    #[get_copy = "pub"]
    imported: bool,
}

/// Implemented by the metadata views that
/// [`ScriptNameSymbolTable::get()`](crate::table::ScriptNameSymbolTable::get)
/// can return.
pub trait Variant {
    /// The description used when the stored record is of another kind.
    const NAME: &'static str;

    /// Extracts the view from the record.
    fn from_symbol(symbol: &ScriptSymbol) -> Option<&Self>;
}

impl Variant for ScriptSymbol {
    const NAME: &'static str = "symbol";

    fn from_symbol(symbol: &ScriptSymbol) -> Option<&Self> { Some(symbol) }
}

macro_rules! implements_variant {
    ($ty:ty, $name:literal, $accessor:ident) => {
        impl Variant for $ty {
            const NAME: &'static str = $name;

            fn from_symbol(symbol: &ScriptSymbol) -> Option<&Self> {
                symbol.kind.$accessor()
            }
        }
    };
}

implements_variant!(ScriptType, "type", as_type);
implements_variant!(ScriptMethod, "method", as_method);
implements_variant!(ScriptField, "field", as_field);
implements_variant!(ScriptProperty, "property", as_property);
implements_variant!(ScriptEvent, "event", as_event);
implements_variant!(ScriptEnumMember, "enum member", as_enum_member);

fn string_directive(
    reader: &AttributeReader,
    id: SymbolID,
    scope: Scope,
    kind: DirectiveKind,
) -> Option<String> {
    match reader.directive_at(id, scope, kind)? {
        Directive::ScriptName(value)
        | Directive::ScriptAlias(value)
        | Directive::ModuleName(value)
        | Directive::ScriptNamespace(value)
        | Directive::ScriptAssembly(value) => Some(value),
        _ => None,
    }
}

fn accessor_names(
    name: &str,
    first: &str,
    second: &str,
) -> (Option<String>, Option<String>) {
    (Some(format!("{first}_{name}")), Some(format!("{second}_{name}")))
}

impl ScriptAssemblySymbol {
    pub(crate) fn build(reader: &AttributeReader, id: AssemblyID) -> Self {
        let directive = |kind| reader.assembly_directive(id, kind);

        Self {
            id,
            script_assembly: directive(DirectiveKind::ScriptAssembly)
                .and_then(|x| x.into_script_assembly().ok()),
            module_name: directive(DirectiveKind::ModuleName)
                .and_then(|x| x.into_module_name().ok()),
            default_member_reflectability: directive(
                DirectiveKind::DefaultMemberReflectability,
            )
            .and_then(|x| x.into_default_member_reflectability().ok())
            .unwrap_or_default(),
            preserve_member_case: directive(DirectiveKind::PreserveMemberCase)
                .is_some_and(|x| x.flag()),
            imported: directive(DirectiveKind::Imported).is_some(),
        }
    }
}

impl ScriptSymbol {
    /// Computes the record of the symbol.
    pub(crate) fn build(namer: &ScriptNamer, id: SymbolID) -> Self {
        let reader = namer.reader();
        let provider: &dyn Provider = reader.provider();
        let symbol = provider.symbol(id);
        let resolution = namer.determine_script_name(id);
        let script_name = resolution.as_ref().map(|x| x.name.clone());

        let reflectable = match reader
            .directive_at(id, Scope::Symbol, DirectiveKind::Reflectable)
        {
            Some(directive) => directive.flag(),
            None => reader
                .assembly_directive(
                    symbol.assembly,
                    DirectiveKind::DefaultMemberReflectability,
                )
                .and_then(|x| x.into_default_member_reflectability().ok())
                .is_some_and(|x| x.allows(symbol.accessibility)),
        };

        let kind = match symbol.kind {
            kind if kind.is_type() => ScriptSymbolKind::Type(ScriptType {
                preserve_member_case: [Scope::Symbol, Scope::Assembly]
                    .into_iter()
                    .find_map(|scope| {
                        reader.directive_at(
                            id,
                            scope,
                            DirectiveKind::PreserveMemberCase,
                        )
                    })
                    .is_some_and(|x| x.flag()),
                module_name: string_directive(
                    reader,
                    id,
                    Scope::Symbol,
                    DirectiveKind::ModuleName,
                )
                .or_else(|| {
                    string_directive(
                        reader,
                        id,
                        Scope::Assembly,
                        DirectiveKind::ModuleName,
                    )
                }),
                script_namespace: string_directive(
                    reader,
                    id,
                    Scope::Symbol,
                    DirectiveKind::ScriptNamespace,
                ),
                ignore_namespace: namer.has(id, DirectiveKind::IgnoreNamespace),
                named_values: namer.has(id, DirectiveKind::NamedValues),
                numeric_values: namer.has(id, DirectiveKind::NumericValues),
                script_alias: string_directive(
                    reader,
                    id,
                    Scope::Symbol,
                    DirectiveKind::ScriptAlias,
                ),
            }),

            Kind::Method | Kind::Constructor | Kind::StaticConstructor => {
                ScriptSymbolKind::Method(ScriptMethod {
                    alternate_signature: reader.get_flag_attribute(
                        id,
                        DirectiveKind::AlternateSignature,
                    ),
                    implementation: namer
                        .alternate_signatures()
                        .implementation_of(id),
                    script_alias: string_directive(
                        reader,
                        id,
                        Scope::Symbol,
                        DirectiveKind::ScriptAlias,
                    ),
                    inline_code: namer
                        .directive(id, DirectiveKind::InlineCode)
                        .and_then(|x| x.into_inline_code().ok()),
                    is_constructor: symbol.kind.is_constructor(),
                })
            }

            Kind::Field => ScriptSymbolKind::Field(ScriptField {
                dollar_prefixed: resolution.as_ref().is_some_and(|x| {
                    x.source == NameSource::DefaultConvention
                        && x.name.starts_with('$')
                }),
            }),

            Kind::Property => {
                let intrinsic =
                    namer.has(id, DirectiveKind::IntrinsicProperty);
                let (getter_name, setter_name) = match &script_name {
                    Some(name) if !intrinsic => {
                        accessor_names(name, "get", "set")
                    }
                    _ => (None, None),
                };

                ScriptSymbolKind::Property(ScriptProperty {
                    intrinsic,
                    getter_name,
                    setter_name,
                })
            }

            Kind::Event => {
                let (adder_name, remover_name) = script_name
                    .as_deref()
                    .map_or((None, None), |name| {
                        accessor_names(name, "add", "remove")
                    });

                ScriptSymbolKind::Event(ScriptEvent { adder_name, remover_name })
            }

            _ => ScriptSymbolKind::EnumMember(ScriptEnumMember {
                named_value: reader
                    .directive_at(
                        id,
                        Scope::ContainingType,
                        DirectiveKind::NamedValues,
                    )
                    .is_some(),
            }),
        };

        Self {
            id,
            key: SymbolKey::of(provider, id),
            name_source: resolution.map(|x| x.source),
            script_name,
            imported: reader
                .find_attribute(id, DirectiveKind::Imported)
                .is_some(),
            preserve_case: reader
                .get_flag_attribute(id, DirectiveKind::PreserveCase),
            preserve_name: reader
                .get_flag_attribute(id, DirectiveKind::PreserveName),
            reflectable,
            explicit_script_name: string_directive(
                reader,
                id,
                Scope::Symbol,
                DirectiveKind::ScriptName,
            ),
            kind,
        }
    }

    /// Replaces the computed values with the fields present in the override.
    pub(crate) fn apply_override(&mut self, value: &SymbolTableOverride) {
        if let Some(name) = &value.script_name {
            self.script_name = Some(name.clone());
            self.name_source = Some(NameSource::Override);

            match &mut self.kind {
                ScriptSymbolKind::Property(property) if !property.intrinsic => {
                    (property.getter_name, property.setter_name) =
                        accessor_names(name, "get", "set");
                }
                ScriptSymbolKind::Event(event) => {
                    (event.adder_name, event.remover_name) =
                        accessor_names(name, "add", "remove");
                }
                ScriptSymbolKind::Field(field) => field.dollar_prefixed = false,
                _ => {}
            }
        }

        if let (Some(code), ScriptSymbolKind::Method(method)) =
            (&value.inline_code, &mut self.kind)
        {
            let previous = method.inline_code.take();

            method.inline_code = Some(InlineCode {
                code: code.clone(),
                generated_method_name: previous
                    .as_ref()
                    .and_then(|x| x.generated_method_name.clone()),
                non_virtual_code: previous.and_then(|x| x.non_virtual_code),
            });
        }
    }

    /// Gets the kind-specific view of the record.
    #[must_use]
    pub fn get<T: Variant>(&self) -> Option<&T> { T::from_symbol(self) }
}
