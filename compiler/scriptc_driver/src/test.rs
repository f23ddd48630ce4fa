use std::sync::Arc;

use scriptc_handler::Storage;
use scriptc_model::{Builder, Kind};
use scriptc_naming::{
    namer::NameSource,
    rules::{EnumMemberRenameRule, FieldRenameRule},
    Cancellation, RenameRules, ScriptSymbolTable, SymbolTableOverrides,
};

use crate::{Configuration, Entry, Output};

#[test]
fn configuration_reads_the_rename_table() {
    let configuration: Configuration = toml::from_str(
        r#"
        [rename]
        field-rule = "private-dollar-prefix"
        enum-member-rule = "lower-case-first-char"

        [rename.runtime-library]
        assembly-name = "mscorlib"
        alias = "ss"
        "#,
    )
    .unwrap();

    assert_eq!(
        *configuration.rename.field_rule(),
        FieldRenameRule::PrivateDollarPrefix
    );
    assert_eq!(
        *configuration.rename.enum_member_rule(),
        EnumMemberRenameRule::LowerCaseFirstChar
    );
    assert_eq!(configuration.rename.runtime_library().alias(), "ss");
}

#[test]
fn missing_rename_table_uses_the_defaults() {
    let configuration: Configuration = toml::from_str("").unwrap();

    assert_eq!(configuration.rename, RenameRules::default());
}

#[test]
fn output_lists_the_requested_tiers() {
    let mut builder = Builder::new("App");
    let app = builder.compilation_assembly();
    let mscorlib = builder.add_assembly("mscorlib");
    let console = builder.add_type(mscorlib, "System", Kind::Class, "Console");
    let write_line = builder.add_member(console, Kind::Method, "WriteLine");
    builder.add_member(console, Kind::Method, "ReadLine");

    let document = builder.add_document("Program.cs");
    let program = builder.add_type(app, "", Kind::Class, "Program");
    builder.add_member(program, Kind::Constructor, "Program");
    builder.declare(document, program);
    builder.reference(document, write_line);

    let table = ScriptSymbolTable::new(
        Arc::new(builder.build().unwrap()),
        RenameRules::default(),
        SymbolTableOverrides::new(),
        Arc::new(Storage::<scriptc_naming::Diagnostic>::new()),
    )
    .create(&Cancellation::never())
    .unwrap();

    let eager = Output::new(&table, false);
    assert_eq!(eager.document_symbols, [
        Entry {
            key: "Program".to_owned(),
            kind: "type".to_owned(),
            name: Some("Program".to_owned()),
            source: Some(NameSource::DefaultConvention),
        },
        Entry {
            key: "Program..ctor()".to_owned(),
            kind: "method".to_owned(),
            name: None,
            source: None,
        },
    ]);
    assert_eq!(
        eager
            .directly_referenced_external_symbols
            .iter()
            .map(|x| x.name.as_deref())
            .collect::<Vec<_>>(),
        [Some("ss.Console"), Some("writeLine")]
    );
    assert!(eager.indirectly_referenced_external_symbols.is_none());
    assert!(!table.indirectly_referenced_external_symbols().is_realized());

    let all = Output::new(&table, true);
    let indirect = all.indirectly_referenced_external_symbols.unwrap();
    assert_eq!(indirect.len(), 1);
    assert_eq!(indirect[0].key, "System.Console.ReadLine()");
    assert_eq!(indirect[0].name.as_deref(), Some("readLine"));
}
