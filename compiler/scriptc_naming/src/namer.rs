//! Contains the [`ScriptNamer`], which computes the single canonical script
//! name of a symbol.
//!
//! The precedence chain is the data structure [`NAMING_RULES`]: an ordered list
//! of pure rules, each either resolving a name, redirecting the chain to
//! another symbol or passing. The first rule that does not pass wins.
//!
//! After the chain, members resolved by the default convention go through
//! overload disambiguation, and runtime library types get their prefix.

use std::{
    collections::{BTreeMap, HashMap, HashSet},
    sync::Arc,
};

use parking_lot::RwLock;
use scriptc_model::{Accessibility, AssemblyID, Kind, Provider, SymbolID};

use crate::{
    alternate_signature::AlternateSignatureSymbolTable,
    attribute::{AttributeReader, Scope},
    directive::{Directive, DirectiveKind},
    rules::{EnumMemberRenameRule, FieldRenameRule, RenameRules},
};

/// The rule that determined a script name.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    serde::Serialize,
    serde::Deserialize,
)]
pub enum NameSource {
    /// `[ScriptAlias]`; exempt from numbering and runtime prefixing.
    ScriptAlias,

    /// `[ScriptName]` on the symbol.
    ScriptName,

    /// `[PreserveCase]` or `[PreserveName]` on the symbol.
    PreserveCase,

    /// `[PreserveMemberCase]` on the containing type.
    TypePreserveMemberCase,

    /// `[PreserveMemberCase]` on the assembly.
    AssemblyPreserveMemberCase,

    /// The default convention of the [`RenameRules`].
    DefaultConvention,

    /// A manual override supplied to the table.
    Override,
}

/// A name with the rule it came from.
#[derive(
    Debug,
    Clone,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    serde::Serialize,
    serde::Deserialize,
    derive_new::new,
)]
pub struct Resolution {
    /// The script name.
    pub name: String,

    /// Where the name came from.
    pub source: NameSource,
}

/// The result of a rule that applies.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Restart the chain on another symbol.
    Redirect(SymbolID),

    /// The name is determined.
    Resolved(Resolution),
}

/// The read-only state a [`NamingRule`] sees.
#[derive(Debug, Clone, Copy)]
pub struct Context<'a> {
    /// The directive reader of the run.
    pub reader: &'a AttributeReader,

    /// The alternate signature groups of the run.
    pub alternate_signatures: &'a AlternateSignatureSymbolTable,

    /// The default convention.
    pub rules: &'a RenameRules,
}

impl Context<'_> {
    fn provider(&self) -> &dyn Provider { self.reader.provider() }
}

/// One step of the precedence chain.
#[derive(Debug, Clone, Copy)]
pub struct NamingRule {
    /// The name of the rule, used in logs.
    pub name: &'static str,

    /// Returns `None` if the rule does not apply to the symbol.
    pub apply: fn(&Context<'_>, SymbolID) -> Option<Outcome>,
}

/// The precedence chain, in order.
pub const NAMING_RULES: &[NamingRule] = &[
    NamingRule { name: "open generic definition", apply: open_generic_definition },
    NamingRule { name: "alternate signature", apply: alternate_signature },
    NamingRule { name: "script alias", apply: script_alias },
    NamingRule { name: "script name", apply: script_name },
    NamingRule { name: "preserve case", apply: preserve_case },
    NamingRule {
        name: "type preserve member case",
        apply: type_preserve_member_case,
    },
    NamingRule {
        name: "assembly preserve member case",
        apply: assembly_preserve_member_case,
    },
    NamingRule { name: "default convention", apply: default_convention },
];

const MAX_REDIRECTS: usize = 8;

fn is_member(context: &Context<'_>, id: SymbolID) -> bool {
    let symbol = context.provider().symbol(id);
    symbol.containing_type.is_some() && !symbol.kind.is_type()
}

fn resolved(name: impl Into<String>, source: NameSource) -> Option<Outcome> {
    Some(Outcome::Resolved(Resolution { name: name.into(), source }))
}

fn open_generic_definition(
    context: &Context<'_>,
    id: SymbolID,
) -> Option<Outcome> {
    context.provider().symbol(id).definition.map(Outcome::Redirect)
}

fn alternate_signature(context: &Context<'_>, id: SymbolID) -> Option<Outcome> {
    context.alternate_signatures.implementation_of(id).map(Outcome::Redirect)
}

fn script_alias(context: &Context<'_>, id: SymbolID) -> Option<Outcome> {
    let alias = context
        .reader
        .directive_at(id, Scope::Symbol, DirectiveKind::ScriptAlias)?
        .into_script_alias()
        .ok()?;

    resolved(alias, NameSource::ScriptAlias)
}

fn script_name(context: &Context<'_>, id: SymbolID) -> Option<Outcome> {
    let name = context
        .reader
        .directive_at(id, Scope::Symbol, DirectiveKind::ScriptName)?
        .into_script_name()
        .ok()?;

    resolved(name, NameSource::ScriptName)
}

fn preserve_case(context: &Context<'_>, id: SymbolID) -> Option<Outcome> {
    let preserved = context
        .reader
        .get_flag_attribute(id, DirectiveKind::PreserveCase)
        || context.reader.get_flag_attribute(id, DirectiveKind::PreserveName);

    preserved.then(|| {
        Outcome::Resolved(Resolution::new(
            context.provider().symbol(id).name.clone(),
            NameSource::PreserveCase,
        ))
    })
}

fn type_preserve_member_case(
    context: &Context<'_>,
    id: SymbolID,
) -> Option<Outcome> {
    if !is_member(context, id) {
        return None;
    }

    let directive = context.reader.directive_at(
        id,
        Scope::ContainingType,
        DirectiveKind::PreserveMemberCase,
    )?;

    // an explicit `false` on the type overrides the assembly default
    if directive.flag() {
        resolved(
            context.provider().symbol(id).name.clone(),
            NameSource::TypePreserveMemberCase,
        )
    } else {
        resolved(default_name(context, id), NameSource::DefaultConvention)
    }
}

fn assembly_preserve_member_case(
    context: &Context<'_>,
    id: SymbolID,
) -> Option<Outcome> {
    if !is_member(context, id) {
        return None;
    }

    let preserved = context
        .reader
        .directive_at(id, Scope::Assembly, DirectiveKind::PreserveMemberCase)
        .is_some_and(|directive| directive.flag());

    preserved.then(|| {
        Outcome::Resolved(Resolution::new(
            context.provider().symbol(id).name.clone(),
            NameSource::AssemblyPreserveMemberCase,
        ))
    })
}

fn default_convention(context: &Context<'_>, id: SymbolID) -> Option<Outcome> {
    resolved(default_name(context, id), NameSource::DefaultConvention)
}

/// Lowercases the first character of the name: `MyMethod` becomes
/// `myMethod`.
#[must_use]
pub fn lowercase_first(name: &str) -> String {
    let mut chars = name.chars();

    chars.next().map_or_else(String::new, |first| {
        first.to_lowercase().chain(chars).collect()
    })
}

fn default_name(context: &Context<'_>, id: SymbolID) -> String {
    let symbol = context.provider().symbol(id);

    match symbol.kind {
        kind if kind.is_type() => symbol.name.clone(),

        Kind::EnumMember => match context.rules.enum_member_rule() {
            EnumMemberRenameRule::LowerCaseFirstChar => {
                lowercase_first(&symbol.name)
            }
            EnumMemberRenameRule::MatchDeclaredName => symbol.name.clone(),
        },

        Kind::Field
            if *context.rules.field_rule()
                == FieldRenameRule::PrivateDollarPrefix
                && symbol.accessibility == Accessibility::Private =>
        {
            format!("${}", lowercase_first(&symbol.name))
        }

        _ => lowercase_first(&symbol.name),
    }
}

/// The final names of the members of one type that take part in overload
/// numbering, after the numbering and field prefixing. Explicitly named
/// members hold a slot in their group but have no entry.
#[derive(Debug, Default)]
struct MemberPlan {
    names: HashMap<SymbolID, String>,
}

/// Computes script names for one naming run.
///
/// Per-type overload numbering is computed on first demand and cached; the
/// cache belongs to this instance, so independent runs never influence each
/// other.
pub struct ScriptNamer {
    reader: Arc<AttributeReader>,
    alternate_signatures: Arc<AlternateSignatureSymbolTable>,
    rules: RenameRules,
    runtime_assembly: Option<AssemblyID>,
    referencing_assembly: AssemblyID,
    plans: RwLock<HashMap<SymbolID, Arc<MemberPlan>>>,
}

impl std::fmt::Debug for ScriptNamer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScriptNamer")
            .field("rules", &self.rules)
            .field("runtime_assembly", &self.runtime_assembly)
            .field("referencing_assembly", &self.referencing_assembly)
            .field("plans", &self.plans.read().len())
            .finish_non_exhaustive()
    }
}

impl ScriptNamer {
    /// Creates a namer for references originating in the compilation
    /// assembly of the reader's provider.
    #[must_use]
    pub fn new(
        reader: Arc<AttributeReader>,
        alternate_signatures: Arc<AlternateSignatureSymbolTable>,
        rules: RenameRules,
    ) -> Self {
        let provider = reader.provider();
        let runtime_assembly = provider
            .assembly_by_name(rules.runtime_library().assembly_name());
        let referencing_assembly = provider.compilation_assembly();

        Self {
            reader,
            alternate_signatures,
            rules,
            runtime_assembly,
            referencing_assembly,
            plans: RwLock::new(HashMap::new()),
        }
    }

    /// Gets the rename rules.
    #[must_use]
    pub const fn rules(&self) -> &RenameRules { &self.rules }

    /// Gets the directive reader.
    #[must_use]
    pub fn reader(&self) -> &AttributeReader { &self.reader }

    /// Gets the alternate signature table.
    #[must_use]
    pub fn alternate_signatures(&self) -> &AlternateSignatureSymbolTable {
        &self.alternate_signatures
    }

    fn context(&self) -> Context<'_> {
        Context {
            reader: &self.reader,
            alternate_signatures: &self.alternate_signatures,
            rules: &self.rules,
        }
    }

    /// Runs the precedence chain and returns the symbol the chain ended on
    /// with its unnumbered, unprefixed name.
    #[must_use]
    pub fn apply_rules(&self, id: SymbolID) -> (SymbolID, Resolution) {
        let context = self.context();
        let mut current = id;

        for _ in 0..=MAX_REDIRECTS {
            let outcome = NAMING_RULES.iter().find_map(|rule| {
                let outcome = (rule.apply)(&context, current)?;
                log::trace!("{current:?}: `{}` applies", rule.name);

                Some(outcome)
            });

            match outcome {
                Some(Outcome::Redirect(target)) => current = target,
                Some(Outcome::Resolved(resolution)) => {
                    return (current, resolution)
                }
                None => break,
            }
        }

        log::warn!(
            "the naming chain of {id:?} did not settle; using the default \
             convention for {current:?}"
        );

        (
            current,
            Resolution::new(
                default_name(&context, current),
                NameSource::DefaultConvention,
            ),
        )
    }

    fn build_plan(&self, containing_type: SymbolID) -> MemberPlan {
        let provider = self.reader.provider();
        let ty = provider.symbol(containing_type);
        let imported = self
            .reader
            .get_flag_attribute(containing_type, DirectiveKind::Imported);

        let mut groups: BTreeMap<(&str, bool), Vec<(SymbolID, Resolution)>> =
            BTreeMap::new();

        for member in ty.members.iter().copied() {
            let symbol = provider.symbol(member);
            if symbol.kind.is_type() || symbol.kind.is_constructor() {
                continue;
            }

            // stubs share the name of their implementation
            if self.alternate_signatures.implementation_of(member).is_some() {
                continue;
            }

            let (target, resolution) = self.apply_rules(member);
            if target != member {
                continue;
            }

            groups
                .entry((symbol.name.as_str(), symbol.is_static))
                .or_default()
                .push((member, resolution));
        }

        let mut names = HashMap::new();
        let mut conventional = HashSet::new();
        let mut taken = Vec::new();

        for mut members in groups.into_values() {
            members.sort_by_key(|(x, _)| provider.symbol(*x).declaration_order);

            for (slot, (member, resolution)) in members.into_iter().enumerate()
            {
                match resolution.source {
                    // explicit names hold their slot but keep no suffix
                    NameSource::ScriptAlias
                    | NameSource::ScriptName
                    | NameSource::Override => taken.push(resolution.name),

                    source => {
                        let mut name = resolution.name;
                        if !imported && slot > 0 {
                            name.push_str(&format!("${slot}"));
                        }

                        if source == NameSource::DefaultConvention {
                            conventional.insert(member);
                        }

                        names.insert(member, name);
                    }
                }
            }
        }

        if *self.rules.field_rule()
            == FieldRenameRule::DollarPrefixOnlyForDuplicateName
        {
            let colliding: Vec<SymbolID> = names
                .iter()
                .filter(|(id, name)| {
                    let symbol = provider.symbol(**id);

                    conventional.contains(*id)
                        && symbol.kind == Kind::Field
                        && symbol.accessibility == Accessibility::Private
                        && (taken.contains(*name)
                            || names.iter().any(|(other, other_name)| {
                                other != *id && other_name == *name
                            }))
                })
                .map(|(id, _)| *id)
                .collect();

            for id in colliding {
                if let Some(name) = names.get_mut(&id) {
                    name.insert(0, '$');
                }
            }
        }

        MemberPlan { names }
    }

    fn plan(&self, containing_type: SymbolID) -> Arc<MemberPlan> {
        if let Some(plan) = self.plans.read().get(&containing_type) {
            return plan.clone();
        }

        let plan = Arc::new(self.build_plan(containing_type));
        log::trace!("built the member plan of {containing_type:?}");

        self.plans.write().entry(containing_type).or_insert(plan).clone()
    }

    fn is_prefixed(&self, id: SymbolID, resolution: &Resolution) -> bool {
        let symbol = self.reader.provider().symbol(id);

        symbol.kind.is_type()
            && resolution.source != NameSource::ScriptAlias
            && self.runtime_assembly == Some(symbol.assembly)
            && symbol.assembly != self.referencing_assembly
    }

    /// Computes the final name of the symbol: the precedence chain, then
    /// overload numbering for members and the runtime prefix for types.
    ///
    /// Returns the symbol the chain ended on along with the name; it differs
    /// from `id` for constructed generics and alternate signature stubs.
    #[must_use]
    pub fn resolve(&self, id: SymbolID) -> (SymbolID, Resolution) {
        let (target, mut resolution) = self.apply_rules(id);
        let symbol = self.reader.provider().symbol(target);

        if !symbol.kind.is_type() {
            if let Some(containing_type) = symbol.containing_type {
                if let Some(name) =
                    self.plan(containing_type).names.get(&target)
                {
                    resolution.name.clone_from(name);
                }
            }
        }

        if self.is_prefixed(target, &resolution) {
            resolution.name = format!(
                "{}.{}",
                self.rules.runtime_library().alias(),
                resolution.name
            );
        }

        (target, resolution)
    }

    /// Computes the script name of the symbol, or `None` for constructors,
    /// which never receive a call-site name.
    #[must_use]
    pub fn determine_script_name(&self, id: SymbolID) -> Option<Resolution> {
        let (target, resolution) = self.resolve(id);

        if self.reader.provider().symbol(target).kind.is_constructor() {
            return None;
        }

        Some(resolution)
    }

    /// Checks whether the directive is present on the symbol itself.
    #[must_use]
    pub fn has(&self, id: SymbolID, kind: DirectiveKind) -> bool {
        self.reader.directive_at(id, Scope::Symbol, kind).is_some()
    }

    /// Gets the directive on the symbol itself.
    #[must_use]
    pub fn directive(
        &self,
        id: SymbolID,
        kind: DirectiveKind,
    ) -> Option<Directive> {
        self.reader.directive_at(id, Scope::Symbol, kind)
    }
}
