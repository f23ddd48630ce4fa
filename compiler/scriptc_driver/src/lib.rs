//! Contains the main `run()` function of the `scriptc` command line tool.

use std::{
    path::{Path, PathBuf},
    process::ExitCode,
    sync::Arc,
};

use parking_lot::RwLock;
use ron::ser::PrettyConfig;
use scriptc_diagnostic::{Diagnostic, Report, Severity};
use scriptc_handler::Handler;
use scriptc_model::{Model, Provider, ValidationError};
use scriptc_naming::{
    namer::NameSource, script_symbol::ScriptSymbol, Cancellation,
    RenameRules, ScriptNameSymbolTable, ScriptSymbolTable,
    SymbolTableOverrides,
};
use serde::{Deserialize, Serialize};

/// The format the computed names are printed in.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, clap::ValueEnum,
)]
pub enum Format {
    /// Rusty Object Notation.
    #[clap(name = "ron")]
    Ron,

    /// JSON.
    #[clap(name = "json")]
    Json,
}

/// The arguments to the program.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, clap::Parser)]
#[clap(
    name = "scriptc",
    about = "Computes the script names of a translation unit",
    author = "Simmypeet"
)]
pub struct Arguments {
    /// The semantic model of the translation unit, written in RON.
    pub model: PathBuf,

    /// The TOML configuration file; its `[rename]` table holds the rename
    /// rules.
    #[clap(short, long)]
    pub config: Option<PathBuf>,

    /// The JSON file mapping symbol keys to manual overrides.
    #[clap(short, long)]
    pub overrides: Option<PathBuf>,

    /// The output format.
    #[clap(short, long, default_value = "ron")]
    pub format: Format,

    /// Reports every override that matches no symbol.
    #[clap(long)]
    pub check_overrides: bool,

    /// Also prints the symbols of the referenced assemblies that the
    /// documents do not reference directly.
    #[clap(short, long)]
    pub all: bool,
}

/// The contents of the configuration file.
#[derive(
    Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "kebab-case", default)]
pub struct Configuration {
    /// The rename rules of the naming run.
    pub rename: RenameRules,
}

/// An error raised while reading the inputs of the program.
#[derive(Debug, thiserror::Error)]
#[allow(missing_docs)]
pub enum LoadError {
    #[error("{}: {source}", path.display())]
    Io { path: PathBuf, source: std::io::Error },

    #[error("{}: {source}", path.display())]
    Model { path: PathBuf, source: ValidationError },

    #[error("{}: {source}", path.display())]
    Configuration { path: PathBuf, source: toml::de::Error },

    #[error("{}: {source}", path.display())]
    Overrides { path: PathBuf, source: serde_json::Error },
}

fn read(path: &Path) -> Result<String, LoadError> {
    std::fs::read_to_string(path)
        .map_err(|source| LoadError::Io { path: path.to_owned(), source })
}

/// Reads and validates the model file.
///
/// # Errors
///
/// See [`LoadError`].
pub fn load_model(path: &Path) -> Result<Model, LoadError> {
    Model::from_ron(&read(path)?)
        .map_err(|source| LoadError::Model { path: path.to_owned(), source })
}

/// Reads the configuration file.
///
/// # Errors
///
/// See [`LoadError`].
pub fn load_configuration(path: &Path) -> Result<Configuration, LoadError> {
    toml::from_str(&read(path)?).map_err(|source| LoadError::Configuration {
        path: path.to_owned(),
        source,
    })
}

/// Reads the override file.
///
/// # Errors
///
/// See [`LoadError`].
pub fn load_overrides(path: &Path) -> Result<SymbolTableOverrides, LoadError> {
    serde_json::from_str(&read(path)?).map_err(|source| LoadError::Overrides {
        path: path.to_owned(),
        source,
    })
}

/// The printed form of one symbol.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    /// The signature key of the symbol.
    pub key: String,

    /// The kind of the symbol.
    pub kind: String,

    /// The script name; absent for constructors.
    pub name: Option<String>,

    /// The rule that chose the name.
    pub source: Option<NameSource>,
}

impl From<&ScriptSymbol> for Entry {
    fn from(symbol: &ScriptSymbol) -> Self {
        Self {
            key: symbol.key().to_string(),
            kind: symbol.kind().kind_str().to_owned(),
            name: symbol.script_name().clone(),
            source: symbol.name_source(),
        }
    }
}

/// The printed form of a [`ScriptNameSymbolTable`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Output {
    /// The symbols declared in the documents.
    pub document_symbols: Vec<Entry>,

    /// The external symbols referenced from the documents.
    pub directly_referenced_external_symbols: Vec<Entry>,

    /// The other symbols of the referenced assemblies, when requested.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub indirectly_referenced_external_symbols: Option<Vec<Entry>>,
}

impl Output {
    /// Collects the printed form of the table. Computing the indirect tier
    /// names every symbol of the referenced assemblies.
    #[must_use]
    pub fn new(table: &ScriptNameSymbolTable, include_indirect: bool) -> Self {
        Self {
            document_symbols: table
                .document_symbols()
                .values()
                .map(Entry::from)
                .collect(),
            directly_referenced_external_symbols: table
                .directly_referenced_external_symbols()
                .values()
                .map(Entry::from)
                .collect(),
            indirectly_referenced_external_symbols: include_indirect.then(
                || {
                    table
                        .indirectly_referenced_external_symbols()
                        .iter()
                        .map(|(_, symbol)| Entry::from(symbol))
                        .collect()
                },
            ),
        }
    }
}

/// A struct that implements [`Handler`] but prints all the diagnostics to the
/// standard error stream.
#[derive(Debug)]
struct Printer {
    provider: Arc<dyn Provider>,
    errors: RwLock<usize>,
}

impl Printer {
    fn new(provider: Arc<dyn Provider>) -> Self {
        Self { provider, errors: RwLock::new(0) }
    }

    fn has_errors(&self) -> bool { *self.errors.read() > 0 }
}

impl Handler<scriptc_naming::Diagnostic> for Printer {
    fn receive(&self, diagnostic: scriptc_naming::Diagnostic) {
        let diagnostic = diagnostic.report(&*self.provider);

        if diagnostic.severity == Severity::Error {
            *self.errors.write() += 1;
        }

        eprintln!("{diagnostic}\n");
    }
}

fn fatal(message: impl std::fmt::Display) -> ExitCode {
    let diagnostic = Diagnostic {
        location: None,
        message: message.to_string(),
        severity: Severity::Error,
        help_message: None,
        related: Vec::new(),
    };

    eprintln!("{diagnostic}");
    ExitCode::FAILURE
}

fn serialize(output: &Output, format: Format) -> Result<String, String> {
    match format {
        Format::Ron => {
            ron::ser::to_string_pretty(output, PrettyConfig::default())
                .map_err(|error| error.to_string())
        }
        Format::Json => serde_json::to_string_pretty(output)
            .map_err(|error| error.to_string()),
    }
}

/// Runs the program with the given arguments.
#[must_use]
pub fn run(argument: Arguments) -> ExitCode {
    let model = match load_model(&argument.model) {
        Ok(model) => model,
        Err(error) => return fatal(error),
    };

    let configuration = match argument.config.as_deref().map(load_configuration)
    {
        Some(Ok(configuration)) => configuration,
        Some(Err(error)) => return fatal(error),
        None => Configuration::default(),
    };

    let overrides = match argument.overrides.as_deref().map(load_overrides) {
        Some(Ok(overrides)) => overrides,
        Some(Err(error)) => return fatal(error),
        None => SymbolTableOverrides::new(),
    };

    log::info!(
        "loaded {} with {} overrides",
        argument.model.display(),
        overrides.len()
    );

    let provider: Arc<dyn Provider> = Arc::new(model);
    let printer = Arc::new(Printer::new(provider.clone()));

    let table = match ScriptSymbolTable::new(
        provider,
        configuration.rename,
        overrides,
        printer.clone(),
    )
    .create(&Cancellation::never())
    {
        Ok(table) => table,
        Err(error) => return fatal(error),
    };

    if argument.check_overrides {
        table.check_overrides(&*printer);
    }

    let output = Output::new(&table, argument.all);

    match serialize(&output, argument.format) {
        Ok(text) => println!("{text}"),
        Err(error) => {
            return fatal(format!("failed to serialize the names: {error}"))
        }
    }

    if printer.has_errors() {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

#[cfg(test)]
mod test;
