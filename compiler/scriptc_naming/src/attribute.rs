//! Contains the [`AttributeReader`], which answers "does this symbol, its
//! containing type or its assembly carry directive X, and with what value?".

use std::{collections::HashMap, sync::Arc};

use parking_lot::RwLock;
use scriptc_handler::Handler;
use scriptc_model::{Argument, AssemblyID, Attribute, Provider, SymbolID};

use crate::{
    diagnostic::Diagnostic,
    directive::{Directive, DirectiveKind, FromAttributeValue},
    error::AttributeFormatError,
};

/// The entity an attribute is attached to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Owner {
    /// A type or a member.
    Symbol(SymbolID),

    /// An assembly.
    Assembly(AssemblyID),
}

/// The scopes searched by [`AttributeReader::find_attribute()`], in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Scope {
    /// The symbol itself.
    Symbol,

    /// The type directly containing the symbol.
    ContainingType,

    /// The assembly declaring the symbol.
    Assembly,
}

impl Scope {
    /// The search order of [`AttributeReader::find_attribute()`].
    pub const ORDER: [Self; 3] =
        [Self::Symbol, Self::ContainingType, Self::Assembly];
}

/// A directive found by [`AttributeReader::find_attribute()`] together with the
/// scope it was found at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Found {
    /// Where the directive was attached.
    pub scope: Scope,

    /// The directive.
    pub directive: Directive,
}

/// Parses and caches the naming directives of symbols and assemblies.
///
/// Directives are parsed once per owner and kept for the lifetime of the
/// reader, which lives as long as one naming run. A malformed directive is
/// reported to the handler the first time its owner is read and is treated as
/// absent from then on.
pub struct AttributeReader {
    provider: Arc<dyn Provider>,
    handler: Arc<dyn Handler<Diagnostic>>,
    directives: RwLock<HashMap<Owner, Arc<[Directive]>>>,
}

impl std::fmt::Debug for AttributeReader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AttributeReader")
            .field("provider", &self.provider)
            .field("cached", &self.directives.read().len())
            .finish_non_exhaustive()
    }
}

impl AttributeReader {
    /// Creates a reader with an empty cache.
    #[must_use]
    pub fn new(
        provider: Arc<dyn Provider>,
        handler: Arc<dyn Handler<Diagnostic>>,
    ) -> Self {
        Self { provider, handler, directives: RwLock::new(HashMap::new()) }
    }

    /// Gets the provider the reader reads from.
    #[must_use]
    pub fn provider(&self) -> &dyn Provider { &*self.provider }

    fn attributes_of(&self, owner: Owner) -> &[Attribute] {
        match owner {
            Owner::Symbol(id) => &self.provider.symbol(id).attributes,
            Owner::Assembly(id) => &self.provider.assembly(id).attributes,
        }
    }

    fn parse(&self, owner: Owner) -> Arc<[Directive]> {
        let mut directives: Vec<Directive> = Vec::new();

        for attribute in self.attributes_of(owner) {
            match Directive::parse(owner, attribute) {
                Ok(Some(directive)) => {
                    // the first application of a directive wins
                    if directives.iter().all(|x| x.kind() != directive.kind()) {
                        directives.push(directive);
                    }
                }
                Ok(None) => {}
                Err(error) => {
                    log::debug!("malformed directive on {owner:?}: {error}");
                    self.handler.receive(error.into());
                }
            }
        }

        directives.into()
    }

    /// Gets every directive attached directly to the owner.
    pub fn directives(&self, owner: Owner) -> Arc<[Directive]> {
        if let Some(directives) = self.directives.read().get(&owner) {
            return directives.clone();
        }

        // parsing happens under the write lock so that each malformed
        // directive is reported exactly once
        let mut cache = self.directives.write();
        cache.entry(owner).or_insert_with(|| self.parse(owner)).clone()
    }

    /// Gets the directive of the given kind attached to the owner.
    pub fn directive_of(
        &self,
        owner: Owner,
        kind: DirectiveKind,
    ) -> Option<Directive> {
        self.directives(owner).iter().find(|x| x.kind() == kind).cloned()
    }

    /// Gets the directive of the given kind attached at exactly the given
    /// scope of the symbol.
    pub fn directive_at(
        &self,
        symbol: SymbolID,
        scope: Scope,
        kind: DirectiveKind,
    ) -> Option<Directive> {
        let owner = match scope {
            Scope::Symbol => Owner::Symbol(symbol),
            Scope::ContainingType => {
                Owner::Symbol(self.provider.symbol(symbol).containing_type?)
            }
            Scope::Assembly => {
                Owner::Assembly(self.provider.symbol(symbol).assembly)
            }
        };

        self.directive_of(owner, kind)
    }

    /// Walks the symbol, its containing type and its assembly, in that order,
    /// and returns the first directive of the given kind.
    ///
    /// Base classes and implemented interfaces are never searched.
    pub fn find_attribute(
        &self,
        symbol: SymbolID,
        kind: DirectiveKind,
    ) -> Option<Found> {
        Scope::ORDER.into_iter().find_map(|scope| {
            self.directive_at(symbol, scope, kind)
                .map(|directive| Found { scope, directive })
        })
    }

    /// Checks whether the symbol itself carries the flag-style directive with
    /// no argument or with an explicit `true`.
    pub fn get_flag_attribute(
        &self,
        symbol: SymbolID,
        kind: DirectiveKind,
    ) -> bool {
        self.directive_at(symbol, Scope::Symbol, kind)
            .is_some_and(|directive| directive.flag())
    }

    /// Gets the directive of the given kind attached to the assembly.
    pub fn assembly_directive(
        &self,
        assembly: AssemblyID,
        kind: DirectiveKind,
    ) -> Option<Directive> {
        self.directive_of(Owner::Assembly(assembly), kind)
    }

    /// Extracts a typed argument of the first attribute with the given name
    /// attached directly to the symbol.
    ///
    /// Reads the raw attribute data, so it also works for attributes that are
    /// not naming directives. The name is matched on its simple form: both
    /// `ScriptName` and `System.ScriptNameAttribute` find `[ScriptName]`.
    ///
    /// # Errors
    ///
    /// Returns [`AttributeFormatError`] if the argument is present but has
    /// another value type.
    pub fn try_get_attribute_value<T: FromAttributeValue>(
        &self,
        symbol: SymbolID,
        name: &str,
        argument: Argument<'_>,
    ) -> Result<Option<T>, AttributeFormatError> {
        let probe = Attribute::new(name);
        let Some(attribute) = self
            .provider
            .symbol(symbol)
            .attributes
            .iter()
            .find(|x| x.simple_name() == probe.simple_name())
        else {
            return Ok(None);
        };

        attribute
            .argument(argument)
            .map(|value| {
                T::from_attribute_value(value).map_err(|problem| {
                    AttributeFormatError {
                        owner: Owner::Symbol(symbol),
                        attribute: attribute.simple_name().to_owned(),
                        argument: argument.to_string(),
                        problem,
                        location: attribute.location.clone(),
                    }
                })
            })
            .transpose()
    }
}
