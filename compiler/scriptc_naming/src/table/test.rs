use scriptc_handler::Storage;
use scriptc_model::{AssemblyID, Builder, Kind, Model, SymbolID, SymbolKey};

use crate::{
    cancel::Cancellation,
    diagnostic::Diagnostic,
    namer::NameSource,
    overrides::{SymbolTableOverride, SymbolTableOverrides},
    rules::RenameRules,
    script_symbol::ScriptProperty,
    test::{create_default, create_table},
};

struct Fixture {
    model: Model,
    app: AssemblyID,
    mscorlib: AssemblyID,
    unreferenced: AssemblyID,
    program: SymbolID,
    main: SymbolID,
    string: SymbolID,
    concat: SymbolID,
    length: SymbolID,
    object: SymbolID,
    to_string: SymbolID,
    widget: SymbolID,
}

/// `App` declares `Program`, whose body calls `String.Concat` from
/// `mscorlib`; `Widgets` is referenced by the compilation but never used.
fn fixture() -> Fixture {
    let mut builder = Builder::new("App");
    let app = builder.compilation_assembly();
    let mscorlib = builder.add_assembly("mscorlib");
    let unreferenced = builder.add_assembly("Widgets");

    let object = builder.add_type(mscorlib, "System", Kind::Class, "Object");
    let to_string = builder.add_member(object, Kind::Method, "ToString");
    let string = builder.add_type(mscorlib, "System", Kind::Class, "String");
    let concat = builder.add_member(string, Kind::Method, "Concat");
    builder.symbol_mut(concat).is_static = true;
    let length = builder.add_member(string, Kind::Property, "Length");

    let widget = builder.add_type(unreferenced, "Ui", Kind::Class, "Widget");

    let document = builder.add_document("Program.cs");
    let program = builder.add_type(app, "", Kind::Class, "Program");
    let main = builder.add_member(program, Kind::Method, "Main");
    builder.symbol_mut(main).is_static = true;
    builder.declare(document, program);
    builder.reference(document, concat);

    Fixture {
        model: builder.build().unwrap(),
        app,
        mscorlib,
        unreferenced,
        program,
        main,
        string,
        concat,
        length,
        object,
        to_string,
        widget,
    }
}

#[test]
fn tiers() {
    let fixture = fixture();
    let (table, storage) = create_default(fixture.model);

    let document = table.document_symbols();
    assert_eq!(document.keys().copied().collect::<Vec<_>>(), [
        fixture.program,
        fixture.main
    ]);

    let direct = table.directly_referenced_external_symbols();
    assert_eq!(direct.keys().copied().collect::<Vec<_>>(), [
        fixture.string,
        fixture.concat
    ]);
    assert_eq!(table.try_get_value(fixture.string), Some("ss.String"));
    assert_eq!(table.try_get_value(fixture.concat), Some("concat"));

    let indirect = table.indirectly_referenced_external_symbols();
    assert_eq!(indirect.assemblies(), &[fixture.mscorlib]);
    assert!(!indirect.is_realized());

    assert!(indirect.contains(fixture.object));
    assert!(indirect.contains(fixture.to_string));
    assert!(indirect.contains(fixture.length));
    assert!(!indirect.contains(fixture.string));
    assert!(!indirect.contains(fixture.concat));
    assert!(!indirect.contains(fixture.widget));
    assert!(indirect.is_realized());
    assert_eq!(indirect.len(), 3);

    assert!(table.script_symbol(fixture.widget).is_none());
    assert!(storage.is_empty());
}

#[test]
fn tier_three_entries_are_named_on_access() {
    let fixture = fixture();
    let (table, _) = create_default(fixture.model);

    assert_eq!(table.try_get_value(fixture.object), Some("ss.Object"));
    assert_eq!(table.try_get_value(fixture.to_string), Some("toString"));

    let length = table.get::<ScriptProperty>(fixture.length).unwrap();
    assert_eq!(length.getter_name().as_deref(), Some("get_length"));
    assert_eq!(length.setter_name().as_deref(), Some("set_length"));
}

#[test]
fn cancelled_realization_leaves_the_tier_unrealized() {
    let fixture = fixture();
    let (table, _) = create_default(fixture.model);
    let indirect = table.indirectly_referenced_external_symbols();

    let cancellation = Cancellation::new();
    cancellation.cancel();

    assert!(indirect.realize(&cancellation).is_err());
    assert!(!indirect.is_realized());

    let entries = indirect.realize(&Cancellation::never()).unwrap();
    assert_eq!(entries.len(), 3);
    assert!(indirect.is_realized());

    // once realized, the token no longer matters
    assert!(indirect.realize(&cancellation).is_ok());
}

#[test]
fn override_reaches_tier_three() {
    let fixture = fixture();
    let overrides = [(
        "System.Object.ToString()",
        SymbolTableOverride::script_name("toStr"),
    )]
    .into_iter()
    .collect::<SymbolTableOverrides>();

    let (table, storage) =
        create_table(fixture.model, RenameRules::default(), overrides);

    let symbol = table.script_symbol(fixture.to_string).unwrap();
    assert_eq!(symbol.script_name().as_deref(), Some("toStr"));
    assert_eq!(symbol.name_source(), Some(NameSource::Override));

    table.check_overrides(&*storage);
    assert!(storage.is_empty());
}

#[test]
fn assembly_records() {
    let fixture = fixture();
    let (table, _) = create_default(fixture.model);

    assert!(table.assembly(fixture.app).is_some());
    assert!(table.assembly(fixture.mscorlib).is_some());
    assert!(table.assembly(fixture.unreferenced).is_none());
}

#[test]
fn mismatched_overrides_are_reported_with_suggestions() {
    let fixture = fixture();
    let overrides = [
        ("System.Object.ToStrin()", SymbolTableOverride::script_name("a")),
        ("Completely.Unrelated.Key()", SymbolTableOverride::script_name("b")),
        ("Program.Main()", SymbolTableOverride::script_name("main2")),
    ]
    .into_iter()
    .collect::<SymbolTableOverrides>();

    let (table, storage) =
        create_table(fixture.model, RenameRules::default(), overrides);
    assert_eq!(table.try_get_value(fixture.main), Some("main2"));
    assert!(storage.is_empty());

    let reported = Storage::<Diagnostic>::new();
    table.check_overrides(&reported);

    let reported = reported.into_vec();
    assert_eq!(reported.len(), 2);

    let mismatches = reported
        .iter()
        .map(|x| x.as_override_key_mismatch().unwrap())
        .collect::<Vec<_>>();

    let typo = mismatches
        .iter()
        .find(|x| x.key.as_str() == "System.Object.ToStrin()")
        .unwrap();
    assert_eq!(
        typo.suggestion,
        Some(SymbolKey::from("System.Object.ToString()"))
    );

    let unrelated = mismatches
        .iter()
        .find(|x| x.key.as_str() == "Completely.Unrelated.Key()")
        .unwrap();
    assert_eq!(unrelated.suggestion, None);

    // checking enumerates tier 3
    assert!(table.indirectly_referenced_external_symbols().is_realized());
}
