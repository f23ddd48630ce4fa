//! Contains the [`Builder`] used to assemble a [`Model`] programmatically.

use crate::{
    Assembly, AssemblyID, Attribute, Document, Kind, Model, Symbol, SymbolID,
    ValidationError,
};

/// Incrementally builds a [`Model`].
///
/// Declaration order is assigned automatically: every type or member gets
/// the next position among its siblings.
#[derive(Debug, Clone)]
pub struct Builder {
    assemblies: Vec<Assembly>,
    symbols: Vec<Symbol>,
    documents: Vec<Document>,
    compilation_assembly: AssemblyID,
}

impl Builder {
    /// Creates a builder whose compilation assembly has the given name.
    #[must_use]
    pub fn new(compilation_assembly_name: impl Into<String>) -> Self {
        Self {
            assemblies: vec![Assembly::new(compilation_assembly_name.into())],
            symbols: Vec::new(),
            documents: Vec::new(),
            compilation_assembly: AssemblyID(0),
        }
    }

    /// Gets the ID of the compilation assembly.
    #[must_use]
    pub const fn compilation_assembly(&self) -> AssemblyID {
        self.compilation_assembly
    }

    /// Adds a referenced assembly.
    pub fn add_assembly(&mut self, name: impl Into<String>) -> AssemblyID {
        self.assemblies.push(Assembly::new(name.into()));
        AssemblyID(self.assemblies.len() - 1)
    }

    /// Attaches an attribute to the given assembly.
    pub fn add_assembly_attribute(
        &mut self,
        assembly: AssemblyID,
        attribute: Attribute,
    ) {
        self.assemblies[assembly.0].attributes.push(attribute);
    }

    /// Adds a document to the compilation and returns its index.
    pub fn add_document(&mut self, path: impl Into<String>) -> usize {
        self.documents.push(Document::new(path.into()));
        self.documents.len() - 1
    }

    /// Adds a top-level type in the given namespace.
    pub fn add_type(
        &mut self,
        assembly: AssemblyID,
        namespace: impl Into<String>,
        kind: Kind,
        name: impl Into<String>,
    ) -> SymbolID {
        assert!(kind.is_type(), "`{}` is not a type kind", kind.kind_str());

        let declaration_order = self
            .symbols
            .iter()
            .filter(|x| {
                x.assembly == assembly
                    && x.kind.is_type()
                    && x.containing_type.is_none()
            })
            .count();

        let mut symbol = Symbol::new(name.into(), kind, assembly);
        symbol.namespace = namespace.into();
        symbol.declaration_order = declaration_order;

        self.symbols.push(symbol);
        SymbolID(self.symbols.len() - 1)
    }

    /// Adds a member or a nested type to the given type.
    pub fn add_member(
        &mut self,
        containing_type: SymbolID,
        kind: Kind,
        name: impl Into<String>,
    ) -> SymbolID {
        let assembly = self.symbols[containing_type.0].assembly;
        let declaration_order = self.symbols[containing_type.0].members.len();

        let mut symbol = Symbol::new(name.into(), kind, assembly);
        symbol.containing_type = Some(containing_type);
        symbol.declaration_order = declaration_order;
        symbol.is_static = kind == Kind::StaticConstructor;

        self.symbols.push(symbol);
        let id = SymbolID(self.symbols.len() - 1);
        self.symbols[containing_type.0].members.push(id);

        id
    }

    /// Adds a constructed instantiation of a generic type or method, such as
    /// `List<int>` for `List<T>`.
    ///
    /// The instantiation is not listed among the members of any type.
    pub fn add_constructed(
        &mut self,
        definition: SymbolID,
        type_arguments: &[&str],
    ) -> SymbolID {
        let mut symbol = self.symbols[definition.0].clone();
        symbol.type_parameters =
            type_arguments.iter().map(|x| (*x).to_owned()).collect();
        symbol.definition = Some(definition);
        symbol.members = Vec::new();

        self.symbols.push(symbol);
        SymbolID(self.symbols.len() - 1)
    }

    /// Gets mutable access to a symbol added earlier, to set its parameters,
    /// attributes, accessibility and so on.
    pub fn symbol_mut(&mut self, id: SymbolID) -> &mut Symbol {
        &mut self.symbols[id.0]
    }

    /// Attaches an attribute to the given symbol.
    pub fn add_attribute(&mut self, id: SymbolID, attribute: Attribute) {
        self.symbols[id.0].attributes.push(attribute);
    }

    /// Records that the document declares the given top-level type.
    pub fn declare(&mut self, document: usize, id: SymbolID) {
        self.documents[document].declared.push(id);
    }

    /// Records that the document references the given symbol.
    pub fn reference(&mut self, document: usize, id: SymbolID) {
        self.documents[document].referenced.push(id);
    }

    /// Finishes the model.
    ///
    /// # Errors
    ///
    /// See [`Model::validate()`].
    pub fn build(self) -> Result<Model, ValidationError> {
        let model = Model {
            assemblies: self.assemblies,
            symbols: self.symbols,
            documents: self.documents,
            compilation_assembly: self.compilation_assembly,
        };

        model.validate()?;

        Ok(model)
    }
}
