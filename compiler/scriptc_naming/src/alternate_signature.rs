//! Contains the [`AlternateSignatureSymbolTable`], which groups declaration
//! only overload stubs with the one method implementing them.

use std::{collections::HashMap, sync::Arc};

use getset::Getters;
use parking_lot::RwLock;
use scriptc_handler::Handler;
use scriptc_model::{Kind, SymbolID};

use crate::{
    attribute::AttributeReader,
    diagnostic::{Diagnostic, DuplicateImplementation},
    directive::DirectiveKind,
};

/// An implementation together with its `[AlternateSignature]` stubs.
#[derive(Debug, Clone, PartialEq, Eq, Getters)]
pub struct AlternateSignatureGroup {
    /// The single member of the group without `[AlternateSignature]`.
    #[get = "pub"]
    implementing_method: SymbolID,

    /// The stubs, in declaration order.
    #[get = "pub"]
    alternate_signature_methods: Vec<SymbolID>,
}

impl AlternateSignatureGroup {
    /// Checks if the given symbol belongs to the group.
    #[must_use]
    pub fn contains(&self, id: SymbolID) -> bool {
        self.implementing_method == id
            || self.alternate_signature_methods.contains(&id)
    }
}

#[derive(Debug, Default)]
struct TypeGroups {
    groups: Vec<Arc<AlternateSignatureGroup>>,
    by_member: HashMap<SymbolID, Arc<AlternateSignatureGroup>>,
}

/// Computes the alternate signature groups of each type on first demand.
///
/// Methods are partitioned by `(containing type, name)`, with constructors
/// keyed by the name of their type. Only partitions containing at least one
/// stub form a group. A partition with zero or several implementations is
/// reported as [`DuplicateImplementation`] and does not form a group, so its
/// members are named as ordinary overloads.
pub struct AlternateSignatureSymbolTable {
    reader: Arc<AttributeReader>,
    handler: Arc<dyn Handler<Diagnostic>>,
    types: RwLock<HashMap<SymbolID, Arc<TypeGroups>>>,
}

impl std::fmt::Debug for AlternateSignatureSymbolTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AlternateSignatureSymbolTable")
            .field("types", &self.types.read().len())
            .finish_non_exhaustive()
    }
}

impl AlternateSignatureSymbolTable {
    /// Creates an empty table reading directives through the given reader.
    #[must_use]
    pub fn new(
        reader: Arc<AttributeReader>,
        handler: Arc<dyn Handler<Diagnostic>>,
    ) -> Self {
        Self { reader, handler, types: RwLock::new(HashMap::new()) }
    }

    fn build(&self, containing_type: SymbolID) -> TypeGroups {
        let provider = self.reader.provider();
        let ty = provider.symbol(containing_type);

        // partitions in first-seen order keep the reports deterministic
        let mut partitions: Vec<((Kind, &str), Vec<SymbolID>)> = Vec::new();

        for member in ty.members.iter().copied() {
            let symbol = provider.symbol(member);
            let key = match symbol.kind {
                Kind::Method => (Kind::Method, symbol.name.as_str()),
                Kind::Constructor => (Kind::Constructor, ty.name.as_str()),
                _ => continue,
            };

            match partitions.iter_mut().find(|(x, _)| *x == key) {
                Some((_, members)) => members.push(member),
                None => partitions.push((key, vec![member])),
            }
        }

        let mut result = TypeGroups::default();

        for ((_, name), mut members) in partitions {
            members.sort_by_key(|x| provider.symbol(*x).declaration_order);

            let (stubs, implementations): (Vec<_>, Vec<_>) =
                members.into_iter().partition(|x| {
                    self.reader.get_flag_attribute(
                        *x,
                        DirectiveKind::AlternateSignature,
                    )
                });

            if stubs.is_empty() {
                continue;
            }

            if implementations.len() != 1 {
                log::debug!(
                    "alternate signature group `{name}` of {containing_type:?} \
                     has {} implementations",
                    implementations.len()
                );

                self.handler.receive(
                    DuplicateImplementation {
                        containing_type,
                        name: name.to_owned(),
                        implementations,
                        alternate_signatures: stubs,
                    }
                    .into(),
                );
                continue;
            }

            let group = Arc::new(AlternateSignatureGroup {
                implementing_method: implementations[0],
                alternate_signature_methods: stubs,
            });

            result.by_member.insert(group.implementing_method, group.clone());
            for stub in &group.alternate_signature_methods {
                result.by_member.insert(*stub, group.clone());
            }
            result.groups.push(group);
        }

        result
    }

    fn type_groups(&self, containing_type: SymbolID) -> Arc<TypeGroups> {
        if let Some(groups) = self.types.read().get(&containing_type) {
            return groups.clone();
        }

        let mut types = self.types.write();
        types
            .entry(containing_type)
            .or_insert_with(|| Arc::new(self.build(containing_type)))
            .clone()
    }

    /// Gets the valid group the member belongs to, if any.
    #[must_use]
    pub fn group_of(
        &self,
        member: SymbolID,
    ) -> Option<Arc<AlternateSignatureGroup>> {
        let symbol = self.reader.provider().symbol(member);
        if !matches!(symbol.kind, Kind::Method | Kind::Constructor) {
            return None;
        }

        let containing_type = symbol.containing_type?;
        self.type_groups(containing_type).by_member.get(&member).cloned()
    }

    /// Gets the implementation a stub stands for.
    ///
    /// Returns `None` for implementations, ordinary members and stubs of
    /// invalid groups.
    #[must_use]
    pub fn implementation_of(&self, member: SymbolID) -> Option<SymbolID> {
        self.group_of(member)
            .map(|group| group.implementing_method)
            .filter(|implementation| *implementation != member)
    }

    /// Gets every valid group declared in the given type.
    #[must_use]
    pub fn groups(
        &self,
        containing_type: SymbolID,
    ) -> Vec<Arc<AlternateSignatureGroup>> {
        self.type_groups(containing_type).groups.clone()
    }
}

#[cfg(test)]
mod test;
