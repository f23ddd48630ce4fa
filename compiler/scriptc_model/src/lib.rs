//! Contains the semantic model consumed by the naming pass: symbols, their
//! attributes, the assemblies they live in and the documents under
//! translation.
//!
//! The naming pass never parses source text. It reads everything through the
//! [`Provider`] trait, which is implemented here by the in-memory [`Model`].

use std::fmt::Debug;

use getset::Getters;
use scriptc_diagnostic::Location;
use serde::{Deserialize, Serialize};

pub mod attribute;
pub mod builder;
mod key;

pub use attribute::{Argument, Attribute, AttributeValue};
pub use builder::Builder;
pub use key::SymbolKey;

/// Represents an identifier for a symbol supplied by a [`Provider`].
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
)]
pub struct SymbolID(pub usize);

/// Represents an identifier for an assembly supplied by a [`Provider`].
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
)]
pub struct AssemblyID(pub usize);

/// An enumeration used to identify the kind of a declared entity.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
)]
#[allow(missing_docs)]
pub enum Kind {
    Class,
    Interface,
    Struct,
    Enum,
    Delegate,
    Method,
    Constructor,
    StaticConstructor,
    Field,
    Property,
    Event,
    EnumMember,
}

impl Kind {
    /// Checks if the kind declares a type.
    #[must_use]
    pub const fn is_type(&self) -> bool {
        matches!(
            self,
            Self::Class
                | Self::Interface
                | Self::Struct
                | Self::Enum
                | Self::Delegate
        )
    }

    /// Checks if the kind is an instance or static constructor.
    #[must_use]
    pub const fn is_constructor(&self) -> bool {
        matches!(self, Self::Constructor | Self::StaticConstructor)
    }

    /// Checks if the kind has a parameter list in its signature.
    #[must_use]
    pub const fn is_invocable(&self) -> bool {
        matches!(
            self,
            Self::Method | Self::Constructor | Self::StaticConstructor
        )
    }

    /// Gets the description string of the kind.
    #[must_use]
    pub const fn kind_str(&self) -> &'static str {
        match self {
            Self::Class => "class",
            Self::Interface => "interface",
            Self::Struct => "struct",
            Self::Enum => "enum",
            Self::Delegate => "delegate",
            Self::Method => "method",
            Self::Constructor => "constructor",
            Self::StaticConstructor => "static constructor",
            Self::Field => "field",
            Self::Property => "property",
            Self::Event => "event",
            Self::EnumMember => "enum member",
        }
    }
}

/// The declared accessibility of a symbol.
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
#[allow(missing_docs)]
pub enum Accessibility {
    #[default]
    Public,
    ProtectedInternal,
    Protected,
    Internal,
    Private,
}

/// A parameter of a method or constructor signature.
#[derive(
    Debug,
    Clone,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    derive_new::new,
)]
pub struct Parameter {
    /// The display name of the parameter type, such as `int` or
    /// `List<string>`.
    pub type_name: String,

    /// The name of the parameter.
    pub name: String,
}

/// A declared program entity as seen by the semantic provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Symbol {
    /// The declared name, exactly as written in source.
    pub name: String,

    /// The kind of the entity.
    pub kind: Kind,

    /// The dotted namespace of a top-level type; empty for the global
    /// namespace and for members.
    #[serde(default)]
    pub namespace: String,

    /// The type that declares this symbol; `None` for top-level types.
    #[serde(default)]
    pub containing_type: Option<SymbolID>,

    /// The assembly that declares this symbol.
    pub assembly: AssemblyID,

    /// The position of the symbol among its siblings in declaration order.
    #[serde(default)]
    pub declaration_order: usize,

    /// Whether the member is static.
    #[serde(default)]
    pub is_static: bool,

    /// The declared accessibility.
    #[serde(default)]
    pub accessibility: Accessibility,

    /// The parameters of a method or constructor.
    #[serde(default)]
    pub parameters: Vec<Parameter>,

    /// The names of the generic type parameters.
    #[serde(default)]
    pub type_parameters: Vec<String>,

    /// The attributes attached directly to the symbol.
    #[serde(default)]
    pub attributes: Vec<Attribute>,

    /// The open generic definition if this symbol is a constructed
    /// instantiation of it.
    #[serde(default)]
    pub definition: Option<SymbolID>,

    /// The members and nested types of a type, in declaration order.
    #[serde(default)]
    pub members: Vec<SymbolID>,

    /// The source location of the declaration, if it has one.
    #[serde(default)]
    pub location: Option<Location>,
}

impl Symbol {
    /// Creates a symbol with the given name and kind and every optional
    /// property left empty.
    #[must_use]
    pub const fn new(name: String, kind: Kind, assembly: AssemblyID) -> Self {
        Self {
            name,
            kind,
            namespace: String::new(),
            containing_type: None,
            assembly,
            declaration_order: 0,
            is_static: false,
            accessibility: Accessibility::Public,
            parameters: Vec::new(),
            type_parameters: Vec::new(),
            attributes: Vec::new(),
            definition: None,
            members: Vec::new(),
            location: None,
        }
    }
}

/// An assembly contributing symbols to the compilation.
#[derive(
    Debug, Clone, PartialEq, Eq, Serialize, Deserialize, derive_new::new,
)]
pub struct Assembly {
    /// The simple name of the assembly, such as `mscorlib`.
    pub name: String,

    /// The assembly-level attributes.
    #[serde(default)]
    #[new(default)]
    pub attributes: Vec<Attribute>,
}

/// A translation unit under compilation.
#[derive(
    Debug, Clone, PartialEq, Eq, Serialize, Deserialize, derive_new::new,
)]
pub struct Document {
    /// The path of the source file.
    pub path: String,

    /// The top-level types declared in the document.
    #[serde(default)]
    #[new(default)]
    pub declared: Vec<SymbolID>,

    /// The symbols referenced by name or member access from the document.
    #[serde(default)]
    #[new(default)]
    pub referenced: Vec<SymbolID>,
}

/// Implemented by the semantic front end that supplies the symbols to name.
///
/// Every [`SymbolID`] and [`AssemblyID`] handed out by a provider must be
/// valid for that same provider; the accessors panic otherwise.
pub trait Provider: Debug + Send + Sync {
    /// Gets the symbol with the given ID.
    fn symbol(&self, id: SymbolID) -> &Symbol;

    /// Gets the assembly with the given ID.
    fn assembly(&self, id: AssemblyID) -> &Assembly;

    /// Gets the assembly being compiled, the one the documents belong to.
    fn compilation_assembly(&self) -> AssemblyID;

    /// Gets the documents under translation.
    fn documents(&self) -> &[Document];

    /// Lists the top-level types declared in the given assembly in ID order.
    fn assembly_types(&self, id: AssemblyID) -> Vec<SymbolID>;

    /// Finds an assembly by its simple name.
    fn assembly_by_name(&self, name: &str) -> Option<AssemblyID>;
}

/// The error type returned by [`Model::validate()`] and [`Model::from_ron()`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[allow(missing_docs)]
pub enum ValidationError {
    #[error("failed to parse the model: {0}")]
    Parse(String),

    #[error("the compilation assembly {0:?} does not exist")]
    MissingCompilationAssembly(AssemblyID),

    #[error("{referrer:?} refers to the unknown symbol {id:?}")]
    UnknownSymbol { referrer: SymbolID, id: SymbolID },

    #[error("{referrer:?} refers to the unknown assembly {id:?}")]
    UnknownAssembly { referrer: SymbolID, id: AssemblyID },

    #[error("document `{document}` refers to the unknown symbol {id:?}")]
    UnknownDocumentSymbol { document: String, id: SymbolID },

    #[error(
        "{member:?} is listed as a member of {listed_in:?} but declares \
         {declared_in:?} as its containing type"
    )]
    MemberMismatch {
        member: SymbolID,
        listed_in: SymbolID,
        declared_in: Option<SymbolID>,
    },

    #[error("the definition {definition:?} of {id:?} is itself constructed")]
    NestedDefinition { id: SymbolID, definition: SymbolID },
}

/// The in-memory [`Provider`] implementation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct Model {
    /// The assemblies indexed by [`AssemblyID`].
    #[get = "pub"]
    assemblies: Vec<Assembly>,

    /// The symbols indexed by [`SymbolID`].
    #[get = "pub"]
    symbols: Vec<Symbol>,

    #[serde(default)]
    documents: Vec<Document>,

    compilation_assembly: AssemblyID,
}

impl Model {
    /// Parses a model written in RON and validates it.
    ///
    /// # Errors
    ///
    /// See [`ValidationError`].
    pub fn from_ron(source: &str) -> Result<Self, ValidationError> {
        let model: Self = ron::from_str(source)
            .map_err(|error| ValidationError::Parse(error.to_string()))?;

        model.validate()?;

        Ok(model)
    }

    /// Checks that every ID mentioned by the model refers to an existing
    /// entry and that type membership is consistent.
    ///
    /// # Errors
    ///
    /// Returns the first inconsistency found.
    pub fn validate(&self) -> Result<(), ValidationError> {
        let symbol_exists = |id: SymbolID| id.0 < self.symbols.len();

        if self.compilation_assembly.0 >= self.assemblies.len() {
            return Err(ValidationError::MissingCompilationAssembly(
                self.compilation_assembly,
            ));
        }

        for (index, symbol) in self.symbols.iter().enumerate() {
            let referrer = SymbolID(index);

            if symbol.assembly.0 >= self.assemblies.len() {
                return Err(ValidationError::UnknownAssembly {
                    referrer,
                    id: symbol.assembly,
                });
            }

            for id in symbol
                .containing_type
                .iter()
                .chain(symbol.definition.iter())
                .chain(symbol.members.iter())
                .copied()
            {
                if !symbol_exists(id) {
                    return Err(ValidationError::UnknownSymbol { referrer, id });
                }
            }

            for member in symbol.members.iter().copied() {
                let declared_in = self.symbols[member.0].containing_type;
                if declared_in != Some(referrer) {
                    return Err(ValidationError::MemberMismatch {
                        member,
                        listed_in: referrer,
                        declared_in,
                    });
                }
            }

            if let Some(definition) = symbol.definition {
                if self.symbols[definition.0].definition.is_some() {
                    return Err(ValidationError::NestedDefinition {
                        id: referrer,
                        definition,
                    });
                }
            }
        }

        for document in &self.documents {
            for id in document
                .declared
                .iter()
                .chain(document.referenced.iter())
                .copied()
            {
                if !symbol_exists(id) {
                    return Err(ValidationError::UnknownDocumentSymbol {
                        document: document.path.clone(),
                        id,
                    });
                }
            }
        }

        Ok(())
    }
}

impl Provider for Model {
    fn symbol(&self, id: SymbolID) -> &Symbol { &self.symbols[id.0] }

    fn assembly(&self, id: AssemblyID) -> &Assembly { &self.assemblies[id.0] }

    fn compilation_assembly(&self) -> AssemblyID { self.compilation_assembly }

    fn documents(&self) -> &[Document] { &self.documents }

    fn assembly_types(&self, id: AssemblyID) -> Vec<SymbolID> {
        self.symbols
            .iter()
            .enumerate()
            .filter(|(_, symbol)| {
                symbol.assembly == id
                    && symbol.kind.is_type()
                    && symbol.containing_type.is_none()
                    && symbol.definition.is_none()
            })
            .map(|(index, _)| SymbolID(index))
            .collect()
    }

    fn assembly_by_name(&self, name: &str) -> Option<AssemblyID> {
        self.assemblies
            .iter()
            .position(|assembly| assembly.name == name)
            .map(AssemblyID)
    }
}
