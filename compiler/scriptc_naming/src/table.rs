//! Contains the [`ScriptSymbolTable`] builder and the frozen
//! [`ScriptNameSymbolTable`] it produces.
//!
//! Symbols are discovered in three expanding tiers:
//!
//! 1. every type declared in the documents, with its nested types and
//!    members;
//! 2. every other symbol referenced from the documents, mapped to its open
//!    generic definition, with the types containing it;
//! 3. every other symbol declared in an assembly that contributed a tier 2
//!    symbol. This tier can span a whole runtime library, so it is enumerated
//!    only when first queried and each entry is computed on first access.

use std::{
    collections::{BTreeMap, BTreeSet, HashSet},
    sync::{Arc, OnceLock},
};

use rayon::iter::{IntoParallelIterator, ParallelIterator};
use scriptc_handler::Handler;
use scriptc_model::{AssemblyID, Provider, SymbolID, SymbolKey};

use crate::{
    alternate_signature::AlternateSignatureSymbolTable,
    attribute::AttributeReader,
    cancel::{Cancellation, Cancelled},
    diagnostic::{Diagnostic, OverrideKeyMismatch},
    error::GetError,
    namer::ScriptNamer,
    overrides::SymbolTableOverrides,
    rules::RenameRules,
    script_symbol::{ScriptAssemblySymbol, ScriptSymbol, Variant},
};

/// An eagerly computed tier.
pub type Partition = BTreeMap<SymbolID, ScriptSymbol>;

/// Computes records and applies overrides; shared by the eager tiers and the
/// deferred one.
#[derive(Debug)]
struct Realizer {
    namer: ScriptNamer,
    overrides: SymbolTableOverrides,
}

impl Realizer {
    fn provider(&self) -> &dyn Provider { self.namer.reader().provider() }

    fn compute(&self, id: SymbolID) -> ScriptSymbol {
        ScriptSymbol::build(&self.namer, id)
    }

    fn apply_override(&self, symbol: &mut ScriptSymbol) -> bool {
        let Some(value) = self.overrides.get(symbol.key()) else {
            return false;
        };

        log::debug!("applying the override of `{}`", symbol.key());
        symbol.apply_override(value);

        true
    }

    fn realize(&self, id: SymbolID) -> ScriptSymbol {
        let mut symbol = self.compute(id);
        self.apply_override(&mut symbol);

        symbol
    }
}

/// Appends the type and, recursively, its nested types and members.
fn collect_type(provider: &dyn Provider, ty: SymbolID, out: &mut Vec<SymbolID>) {
    out.push(ty);

    for member in provider.symbol(ty).members.iter().copied() {
        if provider.symbol(member).kind.is_type() {
            collect_type(provider, member, out);
        } else {
            out.push(member);
        }
    }
}

fn discover_documents(provider: &dyn Provider) -> Vec<SymbolID> {
    let mut seen = BTreeSet::new();

    provider
        .documents()
        .iter()
        .flat_map(|document| document.declared.iter().copied())
        .filter(|id| seen.insert(*id))
        .collect()
}

/// Collects the referenced symbols outside tier 1, mapped to their open
/// definitions, with every type containing them.
fn discover_references(
    provider: &dyn Provider,
    document_symbols: &Partition,
    cancellation: &Cancellation,
) -> Result<Vec<SymbolID>, Cancelled> {
    let mut seen = BTreeSet::new();

    for reference in provider
        .documents()
        .iter()
        .flat_map(|document| document.referenced.iter().copied())
    {
        cancellation.check()?;

        let mut current =
            Some(provider.symbol(reference).definition.unwrap_or(reference));

        while let Some(id) = current {
            if document_symbols.contains_key(&id) || !seen.insert(id) {
                break;
            }

            current = provider.symbol(id).containing_type;
        }
    }

    Ok(seen.into_iter().collect())
}

/// The third tier: computed only when first queried.
#[derive(Debug)]
pub struct DeferredPartition {
    realizer: Arc<Realizer>,
    assemblies: Vec<AssemblyID>,
    excluded: HashSet<SymbolID>,
    entries: OnceLock<BTreeMap<SymbolID, OnceLock<ScriptSymbol>>>,
}

impl DeferredPartition {
    /// Gets the assemblies whose symbols make up the tier.
    #[must_use]
    pub fn assemblies(&self) -> &[AssemblyID] { &self.assemblies }

    /// Checks if the symbols of the tier have been enumerated.
    #[must_use]
    pub fn is_realized(&self) -> bool { self.entries.get().is_some() }

    fn walk(
        &self,
        cancellation: &Cancellation,
    ) -> Result<BTreeMap<SymbolID, OnceLock<ScriptSymbol>>, Cancelled> {
        let provider = self.realizer.provider();
        let mut entries = BTreeMap::new();

        for assembly in self.assemblies.iter().copied() {
            for ty in provider.assembly_types(assembly) {
                cancellation.check()?;

                let mut symbols = Vec::new();
                collect_type(provider, ty, &mut symbols);

                entries.extend(
                    symbols
                        .into_iter()
                        .filter(|x| !self.excluded.contains(x))
                        .map(|x| (x, OnceLock::new())),
                );
            }
        }

        log::debug!(
            "realized the indirectly referenced tier: {} symbols from {} \
             assemblies",
            entries.len(),
            self.assemblies.len()
        );

        Ok(entries)
    }

    /// Enumerates the symbols of the tier, checking for cancellation between
    /// top-level types.
    ///
    /// The entries are left uncomputed; each is computed on first access.
    ///
    /// # Errors
    ///
    /// Returns [`Cancelled`] if cancellation was requested before the walk
    /// finished; the tier stays unrealized.
    pub fn realize(
        &self,
        cancellation: &Cancellation,
    ) -> Result<&BTreeMap<SymbolID, OnceLock<ScriptSymbol>>, Cancelled> {
        if let Some(entries) = self.entries.get() {
            return Ok(entries);
        }

        let entries = self.walk(cancellation)?;

        Ok(self.entries.get_or_init(|| entries))
    }

    fn entries(&self) -> &BTreeMap<SymbolID, OnceLock<ScriptSymbol>> {
        // a walk that cannot be cancelled always succeeds
        self.entries.get_or_init(|| {
            self.walk(&Cancellation::never()).unwrap_or_default()
        })
    }

    /// Checks if the tier contains the symbol, enumerating the tier if needed.
    #[must_use]
    pub fn contains(&self, id: SymbolID) -> bool {
        self.entries().contains_key(&id)
    }

    /// Gets the record of the symbol, computing it on first access.
    #[must_use]
    pub fn get(&self, id: SymbolID) -> Option<&ScriptSymbol> {
        self.entries()
            .get(&id)
            .map(|cell| cell.get_or_init(|| self.realizer.realize(id)))
    }

    /// Gets the number of symbols in the tier.
    #[must_use]
    pub fn len(&self) -> usize { self.entries().len() }

    /// Checks if the tier is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool { self.entries().is_empty() }

    /// Gets the symbols of the tier in ID order without computing their
    /// records.
    pub fn ids(&self) -> impl Iterator<Item = SymbolID> + '_ {
        self.entries().keys().copied()
    }

    /// Computes and iterates over every record of the tier.
    pub fn iter(&self) -> impl Iterator<Item = (SymbolID, &ScriptSymbol)> {
        self.entries().iter().map(|(id, cell)| {
            (*id, cell.get_or_init(|| self.realizer.realize(*id)))
        })
    }
}

/// Builds a [`ScriptNameSymbolTable`]: one instance per naming run.
pub struct ScriptSymbolTable {
    provider: Arc<dyn Provider>,
    rules: RenameRules,
    overrides: SymbolTableOverrides,
    handler: Arc<dyn Handler<Diagnostic>>,
}

impl std::fmt::Debug for ScriptSymbolTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScriptSymbolTable")
            .field("provider", &self.provider)
            .field("rules", &self.rules)
            .field("overrides", &self.overrides)
            .finish_non_exhaustive()
    }
}

impl ScriptSymbolTable {
    /// Creates the builder of one naming run.
    ///
    /// The handler receives the diagnostics of the run, including those of
    /// tier 3 entries computed after [`Self::create()`] returns.
    #[must_use]
    pub fn new(
        provider: Arc<dyn Provider>,
        rules: RenameRules,
        overrides: SymbolTableOverrides,
        handler: Arc<dyn Handler<Diagnostic>>,
    ) -> Self {
        Self { provider, rules, overrides, handler }
    }

    fn compute_partition(
        realizer: &Realizer,
        roots: Vec<SymbolID>,
        expand: bool,
        cancellation: &Cancellation,
    ) -> Result<Partition, Cancelled> {
        let provider = realizer.provider();

        let chunks = roots
            .into_par_iter()
            .map(|root| {
                cancellation.check()?;

                let mut ids = Vec::new();
                if expand {
                    collect_type(provider, root, &mut ids);
                } else {
                    ids.push(root);
                }

                Ok(ids
                    .into_iter()
                    .map(|id| (id, realizer.compute(id)))
                    .collect::<Vec<_>>())
            })
            .collect::<Result<Vec<_>, Cancelled>>()?;

        Ok(chunks.into_iter().flatten().collect())
    }

    /// Discovers and names every symbol visible to the documents.
    ///
    /// Tiers 1 and 2 are computed before returning, in parallel across
    /// top-level types; tier 3 is deferred. Diagnostics go to the handler and
    /// never abort the run.
    ///
    /// # Errors
    ///
    /// Returns [`Cancelled`] if cancellation was requested before tiers 1 and
    /// 2 were complete. Nothing computed by the run is kept.
    pub fn create(
        self,
        cancellation: &Cancellation,
    ) -> Result<ScriptNameSymbolTable, Cancelled> {
        cancellation.check()?;

        let Self { provider, rules, overrides, handler } = self;

        log::info!(
            "creating the script name table of {} documents",
            provider.documents().len()
        );

        let reader =
            Arc::new(AttributeReader::new(provider.clone(), handler.clone()));
        let alternate_signatures =
            Arc::new(AlternateSignatureSymbolTable::new(reader.clone(), handler));
        let namer = ScriptNamer::new(reader.clone(), alternate_signatures, rules);
        let realizer = Arc::new(Realizer { namer, overrides });

        let mut document_symbols = Self::compute_partition(
            &realizer,
            discover_documents(&*provider),
            true,
            cancellation,
        )?;
        log::debug!("discovered {} document symbols", document_symbols.len());

        let references =
            discover_references(&*provider, &document_symbols, cancellation)?;
        let mut directly_referenced_external_symbols =
            Self::compute_partition(&realizer, references, false, cancellation)?;
        log::debug!(
            "discovered {} directly referenced external symbols",
            directly_referenced_external_symbols.len()
        );

        let mut applied = 0;
        for symbol in document_symbols
            .values_mut()
            .chain(directly_referenced_external_symbols.values_mut())
        {
            if realizer.apply_override(symbol) {
                applied += 1;
            }
        }
        log::debug!("applied {applied} overrides to the eager tiers");

        let mut contributing: Vec<AssemblyID> =
            directly_referenced_external_symbols
                .values()
                .map(|symbol| provider.symbol(symbol.id()).assembly)
                .collect();
        contributing.sort_unstable();
        contributing.dedup();

        let excluded: HashSet<SymbolID> = document_symbols
            .keys()
            .chain(directly_referenced_external_symbols.keys())
            .copied()
            .collect();

        let assemblies = std::iter::once(provider.compilation_assembly())
            .chain(contributing.iter().copied())
            .chain(
                document_symbols
                    .values()
                    .map(|symbol| provider.symbol(symbol.id()).assembly),
            )
            .map(|id| (id, ScriptAssemblySymbol::build(&reader, id)))
            .collect();

        Ok(ScriptNameSymbolTable {
            provider,
            document_symbols,
            directly_referenced_external_symbols,
            indirectly_referenced_external_symbols: DeferredPartition {
                realizer: realizer.clone(),
                assemblies: contributing,
                excluded,
                entries: OnceLock::new(),
            },
            assemblies,
            realizer,
        })
    }
}

/// The frozen result of a naming run.
///
/// There is no mutation API. The only interior state is the deferred tier 3,
/// whose entries are computed once on first access.
#[derive(Debug)]
pub struct ScriptNameSymbolTable {
    provider: Arc<dyn Provider>,
    document_symbols: Partition,
    directly_referenced_external_symbols: Partition,
    indirectly_referenced_external_symbols: DeferredPartition,
    assemblies: BTreeMap<AssemblyID, ScriptAssemblySymbol>,
    realizer: Arc<Realizer>,
}

impl ScriptNameSymbolTable {
    /// Gets tier 1: the types declared in the documents and their members.
    #[must_use]
    pub const fn document_symbols(&self) -> &Partition { &self.document_symbols }

    /// Gets tier 2: the external symbols referenced from the documents.
    #[must_use]
    pub const fn directly_referenced_external_symbols(&self) -> &Partition {
        &self.directly_referenced_external_symbols
    }

    /// Gets tier 3: the other symbols of the contributing assemblies.
    #[must_use]
    pub const fn indirectly_referenced_external_symbols(
        &self,
    ) -> &DeferredPartition {
        &self.indirectly_referenced_external_symbols
    }

    /// Gets the provider the table was built from.
    #[must_use]
    pub fn provider(&self) -> &dyn Provider { &*self.provider }

    /// Gets the rename rules the table was built with.
    #[must_use]
    pub fn rules(&self) -> &RenameRules { self.realizer.namer.rules() }

    /// Gets the record of the symbol, searching the tiers in order.
    ///
    /// A constructed generic that was not discovered itself resolves to the
    /// record of its open definition.
    #[must_use]
    pub fn script_symbol(&self, id: SymbolID) -> Option<&ScriptSymbol> {
        let find = |id: SymbolID| {
            self.document_symbols
                .get(&id)
                .or_else(|| self.directly_referenced_external_symbols.get(&id))
                .or_else(|| self.indirectly_referenced_external_symbols.get(id))
        };

        find(id).or_else(|| find(self.provider.symbol(id).definition?))
    }

    /// Gets the typed record of the symbol.
    ///
    /// # Errors
    ///
    /// - [`GetError::SymbolNotFound`] if no tier discovered the symbol.
    /// - [`GetError::KindMismatch`] if the record is not a `T`.
    pub fn get<T: Variant>(&self, id: SymbolID) -> Result<&T, GetError> {
        let symbol =
            self.script_symbol(id).ok_or(GetError::SymbolNotFound(id))?;

        T::from_symbol(symbol).ok_or(GetError::KindMismatch {
            id,
            expected: T::NAME,
            found: symbol.kind().kind_str(),
        })
    }

    /// Gets the script name of the symbol, or `None` if the symbol was not
    /// discovered or is a constructor.
    #[must_use]
    pub fn try_get_value(&self, id: SymbolID) -> Option<&str> {
        self.script_symbol(id)?.script_name().as_deref()
    }

    /// Gets the record of an assembly that declares a discovered symbol.
    #[must_use]
    pub fn assembly(&self, id: AssemblyID) -> Option<&ScriptAssemblySymbol> {
        self.assemblies.get(&id)
    }

    /// Iterates over the eagerly computed tiers 1 and 2.
    pub fn eager_symbols(
        &self,
    ) -> impl Iterator<Item = (SymbolID, &ScriptSymbol)> {
        self.document_symbols
            .iter()
            .chain(self.directly_referenced_external_symbols.iter())
            .map(|(id, symbol)| (*id, symbol))
    }

    /// Reports every override whose key matches no symbol of any tier.
    ///
    /// Enumerates tier 3 but does not compute its entries.
    pub fn check_overrides(&self, handler: &dyn Handler<Diagnostic>) {
        let overrides = &self.realizer.overrides;
        if overrides.is_empty() {
            return;
        }

        let known: BTreeSet<SymbolKey> = self
            .eager_symbols()
            .map(|(_, symbol)| symbol.key().clone())
            .chain(
                self.indirectly_referenced_external_symbols
                    .ids()
                    .map(|id| SymbolKey::of(&*self.provider, id)),
            )
            .collect();

        for key in overrides.keys().filter(|key| !known.contains(*key)) {
            log::debug!("the override `{key}` matches no symbol");

            handler.receive(
                OverrideKeyMismatch {
                    key: key.clone(),
                    suggestion: suggest(key.as_str(), &known),
                }
                .into(),
            );
        }
    }
}

/// Finds the known key closest to the given one, within an edit distance
/// that grows with the key length.
fn suggest(key: &str, known: &BTreeSet<SymbolKey>) -> Option<SymbolKey> {
    let max_distance = match key.len() {
        0..=3 => 1,
        4..=6 => 2,
        7..=10 => 3,
        11..=15 => 4,
        len => len / 4,
    };

    known
        .iter()
        .map(|candidate| (strsim::levenshtein(key, candidate.as_str()), candidate))
        .filter(|(distance, _)| *distance <= max_distance)
        .min_by_key(|(distance, _)| *distance)
        .map(|(_, candidate)| candidate.clone())
}

#[cfg(test)]
mod test;
