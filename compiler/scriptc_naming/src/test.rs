use std::{
    collections::{HashMap, HashSet},
    sync::Arc,
};

use proptest::prelude::*;
use scriptc_handler::{Panic, Storage};
use scriptc_model::{
    Accessibility, AssemblyID, Attribute, AttributeValue, Builder, Kind, Model,
    Parameter, SymbolID,
};

use crate::{
    cancel::{Cancellation, Cancelled},
    diagnostic::Diagnostic,
    error::GetError,
    namer::NameSource,
    overrides::{SymbolTableOverride, SymbolTableOverrides},
    rules::{FieldRenameRule, RenameRules},
    script_symbol::{ScriptField, ScriptMethod, ScriptSymbol},
    table::{ScriptNameSymbolTable, ScriptSymbolTable},
};

pub(crate) fn create_table(
    model: Model,
    rules: RenameRules,
    overrides: SymbolTableOverrides,
) -> (ScriptNameSymbolTable, Arc<Storage<Diagnostic>>) {
    let storage = Arc::new(Storage::<Diagnostic>::new());
    let table =
        ScriptSymbolTable::new(Arc::new(model), rules, overrides, storage.clone())
            .create(&Cancellation::never())
            .unwrap();

    (table, storage)
}

pub(crate) fn create_default(
    model: Model,
) -> (ScriptNameSymbolTable, Arc<Storage<Diagnostic>>) {
    create_table(model, RenameRules::default(), SymbolTableOverrides::new())
}

/// Creates the table with a handler that panics on any diagnostic.
pub(crate) fn create_strict(model: Model) -> ScriptNameSymbolTable {
    ScriptSymbolTable::new(
        Arc::new(model),
        RenameRules::default(),
        SymbolTableOverrides::new(),
        Arc::new(Panic),
    )
    .create(&Cancellation::never())
    .unwrap()
}

pub(crate) fn string(value: &str) -> AttributeValue {
    AttributeValue::String(value.to_owned())
}

pub(crate) fn parameter(type_name: &str, name: &str) -> Parameter {
    Parameter::new(type_name.to_owned(), name.to_owned())
}

fn name(table: &ScriptNameSymbolTable, id: SymbolID) -> &str {
    table.try_get_value(id).unwrap()
}

/// A document declaring one class `C` in the compilation assembly `App`.
fn single_class() -> (Builder, AssemblyID, SymbolID) {
    let mut builder = Builder::new("App");
    let app = builder.compilation_assembly();
    let document = builder.add_document("main.cs");
    let class = builder.add_type(app, "", Kind::Class, "C");
    builder.declare(document, class);

    (builder, app, class)
}

#[test]
fn interface_and_its_method() {
    let mut builder = Builder::new("App");
    let app = builder.compilation_assembly();
    let document = builder.add_document("main.cs");
    let interface = builder.add_type(app, "", Kind::Interface, "I");
    let method = builder.add_member(interface, Kind::Method, "Method");
    builder.declare(document, interface);

    let table = create_strict(builder.build().unwrap());

    assert_eq!(name(&table, interface), "I");
    assert_eq!(name(&table, method), "method");
}

#[test]
fn three_overloads_are_numbered_in_declaration_order() {
    let (mut builder, _, class) = single_class();
    let first = builder.add_member(class, Kind::Method, "Method");
    let second = builder.add_member(class, Kind::Method, "Method");
    builder.symbol_mut(second).parameters = vec![parameter("int", "x")];
    let third = builder.add_member(class, Kind::Method, "Method");
    builder.symbol_mut(third).parameters = vec![parameter("string", "y")];

    let (table, _) = create_default(builder.build().unwrap());

    assert_eq!(name(&table, first), "method");
    assert_eq!(name(&table, second), "method$1");
    assert_eq!(name(&table, third), "method$2");
}

#[test]
fn preserve_member_case_keeps_declared_member_names() {
    let (mut builder, _, class) = single_class();
    builder.add_attribute(class, Attribute::new("PreserveMemberCase"));
    let field = builder.add_member(class, Kind::Field, "Field");
    let method = builder.add_member(class, Kind::Method, "Method");

    let (table, _) = create_default(builder.build().unwrap());

    assert_eq!(name(&table, class), "C");
    assert_eq!(name(&table, field), "Field");
    assert_eq!(name(&table, method), "Method");
    assert_eq!(
        table.get::<ScriptSymbol>(method).unwrap().name_source(),
        Some(NameSource::TypePreserveMemberCase)
    );
}

#[test]
fn script_alias_is_kept_verbatim_beside_numbered_overloads() {
    let mut builder = Builder::new("App");
    let app = builder.compilation_assembly();
    let document = builder.add_document("jquery.cs");
    let class = builder.add_type(app, "jQuery", Kind::Class, "jQuery");
    builder.declare(document, class);

    let alias = builder.add_member(class, Kind::Method, "Select");
    builder.symbol_mut(alias).is_static = true;
    builder.add_attribute(
        alias,
        Attribute::new("ScriptAlias").with_argument(string("$")),
    );

    let overloads = ["string", "Element", "Element[]", "jQueryObject"]
        .into_iter()
        .map(|type_name| {
            let id = builder.add_member(class, Kind::Method, "Select");
            builder.symbol_mut(id).is_static = true;
            builder.symbol_mut(id).parameters =
                vec![parameter(type_name, "selector")];
            id
        })
        .collect::<Vec<_>>();

    let (table, _) = create_default(builder.build().unwrap());

    assert_eq!(name(&table, alias), "$");

    let names =
        overloads.iter().map(|id| name(&table, *id)).collect::<Vec<_>>();
    assert_eq!(names, ["select$1", "select$2", "select$3", "select$4"]);
}

#[test]
fn runtime_types_are_prefixed_only_outside_the_runtime() {
    let mut builder = Builder::new("App");
    let app = builder.compilation_assembly();
    let mscorlib = builder.add_assembly("mscorlib");
    let document = builder.add_document("main.cs");
    let program = builder.add_type(app, "", Kind::Class, "Program");
    let string_builder =
        builder.add_type(mscorlib, "System.Text", Kind::Class, "StringBuilder");
    let append = builder.add_member(string_builder, Kind::Method, "Append");
    builder.declare(document, program);
    builder.reference(document, append);

    let (table, _) = create_default(builder.build().unwrap());

    assert_eq!(name(&table, string_builder), "ss.StringBuilder");
    assert_eq!(name(&table, append), "append");
    assert_eq!(name(&table, program), "Program");

    // the same type compiled as part of the runtime itself
    let mut builder = Builder::new("mscorlib");
    let mscorlib = builder.compilation_assembly();
    let document = builder.add_document("StringBuilder.cs");
    let string_builder =
        builder.add_type(mscorlib, "System.Text", Kind::Class, "StringBuilder");
    builder.declare(document, string_builder);

    let (table, _) = create_default(builder.build().unwrap());

    assert_eq!(name(&table, string_builder), "StringBuilder");
}

#[test]
fn override_wins_for_the_matching_overload_only() {
    let (mut builder, _, class) = single_class();
    let plain = builder.add_member(class, Kind::Method, "Method");
    let target = builder.add_member(class, Kind::Method, "Method");
    builder.symbol_mut(target).parameters =
        vec![parameter("int", "x"), parameter("string", "y")];

    let overrides = std::iter::once((
        "C.Method(int x, string y)",
        SymbolTableOverride::script_name("run"),
    ))
    .collect();

    let (table, storage) = create_table(
        builder.build().unwrap(),
        RenameRules::default(),
        overrides,
    );

    let symbol = table.get::<ScriptSymbol>(target).unwrap();
    assert_eq!(symbol.script_name().as_deref(), Some("run"));
    assert_eq!(symbol.name_source(), Some(NameSource::Override));
    assert_eq!(name(&table, plain), "method");

    table.check_overrides(&*storage);
    assert!(storage.is_empty());
}

#[test]
fn override_replaces_inline_code() {
    let (mut builder, _, class) = single_class();
    let method = builder.add_member(class, Kind::Method, "Length");
    builder.add_attribute(
        method,
        Attribute::new("InlineCode")
            .with_argument(string("{this}.length"))
            .with_named_argument("GeneratedMethodName", string("len")),
    );

    let overrides = std::iter::once(("C.Length()", SymbolTableOverride {
        script_name: None,
        inline_code: Some("{this}.size".to_owned()),
    }))
    .collect();

    let (table, _) =
        create_table(builder.build().unwrap(), RenameRules::default(), overrides);

    let method_symbol = table.get::<ScriptMethod>(method).unwrap();
    let inline = method_symbol.inline_code().as_ref().unwrap();

    assert_eq!(inline.code, "{this}.size");
    assert_eq!(inline.generated_method_name.as_deref(), Some("len"));
    assert_eq!(name(&table, method), "length");
}

#[test]
fn mismatched_override_key_applies_to_nothing_and_is_reported() {
    let (mut builder, _, class) = single_class();
    let target = builder.add_member(class, Kind::Method, "Method");
    builder.symbol_mut(target).parameters =
        vec![parameter("int", "x"), parameter("string", "y")];

    let overrides = std::iter::once((
        "C.Methd(int x, string y)",
        SymbolTableOverride::script_name("run"),
    ))
    .collect();

    let (table, storage) = create_table(
        builder.build().unwrap(),
        RenameRules::default(),
        overrides,
    );

    assert_eq!(name(&table, target), "method");
    assert!(storage.is_empty());

    table.check_overrides(&*storage);

    let diagnostics = storage.as_vec();
    assert_eq!(diagnostics.len(), 1);

    let mismatch = diagnostics[0].as_override_key_mismatch().unwrap();
    assert_eq!(mismatch.key.as_str(), "C.Methd(int x, string y)");
    assert_eq!(
        mismatch.suggestion.as_ref().map(|x| x.as_str()),
        Some("C.Method(int x, string y)")
    );
}

#[test]
fn malformed_directive_is_reported_once_and_ignored() {
    let (mut builder, _, class) = single_class();
    let method = builder.add_member(class, Kind::Method, "Method");
    builder.add_attribute(
        method,
        Attribute::new("ScriptName").with_argument(AttributeValue::Int(4)),
    );
    let sibling = builder.add_member(class, Kind::Method, "Other");

    let (table, storage) = create_default(builder.build().unwrap());

    assert_eq!(name(&table, method), "method");
    assert_eq!(name(&table, sibling), "other");

    let diagnostics = storage.as_vec();
    assert_eq!(diagnostics.len(), 1);
    assert!(diagnostics[0].as_attribute_format().is_some());
}

#[test]
fn alternate_signature_group_shares_one_name() {
    let (mut builder, _, class) = single_class();
    let stub = builder.add_member(class, Kind::Method, "Format");
    builder.add_attribute(stub, Attribute::new("AlternateSignature"));
    let implementation = builder.add_member(class, Kind::Method, "Format");
    builder.symbol_mut(implementation).parameters =
        vec![parameter("string", "format"), parameter("object[]", "args")];
    let other_stub = builder.add_member(class, Kind::Method, "Format");
    builder.add_attribute(other_stub, Attribute::new("AlternateSignature"));
    builder.symbol_mut(other_stub).parameters =
        vec![parameter("string", "format")];

    let (table, storage) = create_default(builder.build().unwrap());

    assert_eq!(name(&table, implementation), "format");
    assert_eq!(name(&table, stub), "format");
    assert_eq!(name(&table, other_stub), "format");
    assert_eq!(
        table.get::<ScriptMethod>(stub).unwrap().implementation(),
        Some(implementation)
    );
    assert!(storage.is_empty());
}

#[test]
fn alternate_signature_follows_an_explicit_name() {
    let (mut builder, _, class) = single_class();
    let implementation = builder.add_member(class, Kind::Method, "Format");
    builder.add_attribute(
        implementation,
        Attribute::new("ScriptName").with_argument(string("fmt")),
    );
    let stub = builder.add_member(class, Kind::Method, "Format");
    builder.add_attribute(stub, Attribute::new("AlternateSignature"));

    let (table, _) = create_default(builder.build().unwrap());

    assert_eq!(name(&table, stub), "fmt");
}

#[test]
fn duplicate_implementation_is_reported_and_not_collapsed() {
    let (mut builder, _, class) = single_class();
    let first = builder.add_member(class, Kind::Method, "Run");
    let second = builder.add_member(class, Kind::Method, "Run");
    builder.symbol_mut(second).parameters = vec![parameter("int", "x")];
    let stub = builder.add_member(class, Kind::Method, "Run");
    builder.add_attribute(stub, Attribute::new("AlternateSignature"));

    let (table, storage) = create_default(builder.build().unwrap());

    let diagnostics = storage.as_vec();
    assert_eq!(diagnostics.len(), 1);

    let duplicate = diagnostics[0].as_duplicate_implementation().unwrap();
    assert_eq!(duplicate.implementations, vec![first, second]);
    assert_eq!(duplicate.alternate_signatures, vec![stub]);

    assert_eq!(name(&table, first), "run");
    assert_eq!(name(&table, second), "run$1");
    assert_eq!(name(&table, stub), "run$2");
}

#[test]
fn explicit_names_occupy_their_numbering_slot() {
    let (mut builder, _, class) = single_class();
    let named = builder.add_member(class, Kind::Method, "Method");
    builder.add_attribute(
        named,
        Attribute::new("ScriptName").with_argument(string("run")),
    );
    let first = builder.add_member(class, Kind::Method, "Method");
    builder.symbol_mut(first).parameters = vec![parameter("int", "x")];
    let preserved = builder.add_member(class, Kind::Method, "Method");
    builder.add_attribute(preserved, Attribute::new("PreserveCase"));
    let second = builder.add_member(class, Kind::Method, "Method");
    builder.symbol_mut(second).parameters = vec![parameter("string", "y")];

    let table = create_strict(builder.build().unwrap());

    assert_eq!(name(&table, named), "run");
    assert_eq!(name(&table, first), "method$1");
    assert_eq!(name(&table, preserved), "Method$2");
    assert_eq!(name(&table, second), "method$3");
}

#[test]
fn preserve_member_case_overloads_are_numbered() {
    let (mut builder, _, class) = single_class();
    builder.add_attribute(class, Attribute::new("PreserveMemberCase"));
    let first = builder.add_member(class, Kind::Method, "Method");
    let second = builder.add_member(class, Kind::Method, "Method");
    builder.symbol_mut(second).parameters = vec![parameter("int", "x")];

    let table = create_strict(builder.build().unwrap());

    assert_eq!(name(&table, first), "Method");
    assert_eq!(name(&table, second), "Method$1");
    assert_eq!(
        table.get::<ScriptSymbol>(second).unwrap().name_source(),
        Some(NameSource::TypePreserveMemberCase)
    );
}

#[test]
fn preserve_case_overloads_are_numbered() {
    let (mut builder, _, class) = single_class();
    let first = builder.add_member(class, Kind::Method, "Method");
    builder.add_attribute(first, Attribute::new("PreserveCase"));
    let second = builder.add_member(class, Kind::Method, "Method");
    builder.symbol_mut(second).parameters = vec![parameter("int", "x")];
    builder.add_attribute(second, Attribute::new("PreserveCase"));

    let table = create_strict(builder.build().unwrap());

    assert_eq!(name(&table, first), "Method");
    assert_eq!(name(&table, second), "Method$1");
}

#[test]
fn imported_types_are_exempt_from_numbering() {
    let (mut builder, _, class) = single_class();
    builder.add_attribute(class, Attribute::new("Imported"));
    let first = builder.add_member(class, Kind::Method, "Method");
    let second = builder.add_member(class, Kind::Method, "Method");
    builder.symbol_mut(second).parameters = vec![parameter("int", "x")];

    let (table, _) = create_default(builder.build().unwrap());

    assert_eq!(name(&table, first), "method");
    assert_eq!(name(&table, second), "method");
    assert!(table.get::<ScriptSymbol>(second).unwrap().imported());
}

#[test]
fn static_and_instance_members_are_numbered_separately() {
    let (mut builder, _, class) = single_class();
    let instance = builder.add_member(class, Kind::Method, "Create");
    let factory = builder.add_member(class, Kind::Method, "Create");
    builder.symbol_mut(factory).is_static = true;
    let overload = builder.add_member(class, Kind::Method, "Create");
    builder.symbol_mut(overload).parameters = vec![parameter("int", "x")];

    let (table, _) = create_default(builder.build().unwrap());

    assert_eq!(name(&table, instance), "create");
    assert_eq!(name(&table, factory), "create");
    assert_eq!(name(&table, overload), "create$1");
}

#[test]
fn constructors_are_discovered_without_a_name() {
    let (mut builder, _, class) = single_class();
    let constructor = builder.add_member(class, Kind::Constructor, "C");
    let static_constructor =
        builder.add_member(class, Kind::StaticConstructor, "C");

    let (table, _) = create_default(builder.build().unwrap());

    assert!(table.try_get_value(constructor).is_none());
    assert!(table.try_get_value(static_constructor).is_none());
    assert!(table.get::<ScriptMethod>(constructor).unwrap().is_constructor());
    assert_eq!(
        table.get::<ScriptSymbol>(static_constructor).unwrap().key().as_str(),
        "C..cctor()"
    );
}

#[test]
fn lookup_errors() {
    let (mut builder, app, class) = single_class();
    let method = builder.add_member(class, Kind::Method, "Method");
    let unrelated = builder.add_type(app, "", Kind::Class, "Unrelated");

    let (table, _) = create_default(builder.build().unwrap());

    assert_eq!(
        table.get::<ScriptSymbol>(unrelated),
        Err(GetError::SymbolNotFound(unrelated))
    );
    assert_eq!(
        table.get::<ScriptField>(method),
        Err(GetError::KindMismatch {
            id: method,
            expected: "field",
            found: "method"
        })
    );
    assert!(table.try_get_value(unrelated).is_none());
}

#[test]
fn field_rules() {
    let build = || {
        let (mut builder, _, class) = single_class();
        let private = builder.add_member(class, Kind::Field, "Count");
        builder.symbol_mut(private).accessibility = Accessibility::Private;
        let public = builder.add_member(class, Kind::Field, "Name");
        let shadowed = builder.add_member(class, Kind::Field, "value");
        builder.symbol_mut(shadowed).accessibility = Accessibility::Private;
        let property = builder.add_member(class, Kind::Property, "Value");

        (builder.build().unwrap(), [private, public, shadowed, property])
    };

    let names = |rule| {
        let (model, ids) = build();
        let (table, _) = create_table(
            model,
            RenameRules::default().with_field_rule(rule),
            SymbolTableOverrides::new(),
        );

        ids.map(|id| table.try_get_value(id).unwrap().to_owned())
    };

    assert_eq!(names(FieldRenameRule::CamelCase), [
        "count", "name", "value", "value"
    ]);
    assert_eq!(names(FieldRenameRule::PrivateDollarPrefix), [
        "$count", "name", "$value", "value"
    ]);
    assert_eq!(names(FieldRenameRule::DollarPrefixOnlyForDuplicateName), [
        "count", "name", "$value", "value"
    ]);

    let (model, [private, ..]) = build();
    let (table, _) = create_table(
        model,
        RenameRules::default()
            .with_field_rule(FieldRenameRule::PrivateDollarPrefix),
        SymbolTableOverrides::new(),
    );
    assert!(table.get::<ScriptField>(private).unwrap().dollar_prefixed());
}

#[test]
fn generic_instantiations_share_the_definition_name() {
    let mut builder = Builder::new("App");
    let app = builder.compilation_assembly();
    let mscorlib = builder.add_assembly("mscorlib");
    let document = builder.add_document("main.cs");

    let list = builder.add_type(mscorlib, "System.Collections", Kind::Class, "List");
    builder.symbol_mut(list).type_parameters = vec!["T".to_owned()];
    let list_of_int = builder.add_constructed(list, &["int"]);

    let boxed = builder.add_type(app, "", Kind::Class, "Box");
    let map = builder.add_member(boxed, Kind::Method, "Map");
    builder.symbol_mut(map).type_parameters = vec!["U".to_owned()];
    let map_of_string = builder.add_constructed(map, &["string"]);

    builder.declare(document, boxed);
    builder.reference(document, list_of_int);
    builder.reference(document, map_of_string);

    let (table, _) = create_default(builder.build().unwrap());

    assert_eq!(name(&table, map_of_string), "map");
    assert_eq!(name(&table, list_of_int), "ss.List");
    assert!(table.directly_referenced_external_symbols().contains_key(&list));
    assert!(!table
        .directly_referenced_external_symbols()
        .contains_key(&list_of_int));
}

#[test]
fn cancelled_run_commits_nothing() {
    let (builder, _, _) = single_class();
    let cancellation = Cancellation::new();
    cancellation.cancel();

    let result = ScriptSymbolTable::new(
        Arc::new(builder.build().unwrap()),
        RenameRules::default(),
        SymbolTableOverrides::new(),
        Arc::new(Storage::<Diagnostic>::new()),
    )
    .create(&cancellation);

    assert_eq!(result.err(), Some(Cancelled));
}

fn sample_model(types: usize, overloads: usize) -> Model {
    let mut builder = Builder::new("App");
    let app = builder.compilation_assembly();
    let mscorlib = builder.add_assembly("mscorlib");
    let document = builder.add_document("main.cs");
    let object = builder.add_type(mscorlib, "System", Kind::Class, "Object");
    let to_string = builder.add_member(object, Kind::Method, "ToString");

    for index in 0..types {
        let ty = builder.add_type(app, "Sample", Kind::Class, format!("Type{index}"));
        builder.declare(document, ty);

        for overload in 0..overloads {
            let id = builder.add_member(ty, Kind::Method, "Run");
            builder.symbol_mut(id).parameters =
                (0..overload).map(|x| parameter("int", &format!("p{x}"))).collect();
        }

        let field = builder.add_member(ty, Kind::Field, "State");
        builder.symbol_mut(field).accessibility = Accessibility::Private;
    }

    builder.reference(document, to_string);
    builder.build().unwrap()
}

/// How a generated member is annotated.
#[derive(Debug, Clone, Copy)]
enum Annotation {
    None,
    PreserveCase,
    PreserveName,
    ScriptName,
}

fn annotation() -> impl Strategy<Value = Annotation> {
    prop_oneof![
        Just(Annotation::None),
        Just(Annotation::PreserveCase),
        Just(Annotation::PreserveName),
        Just(Annotation::ScriptName),
    ]
}

proptest! {
    #[test]
    fn overload_names_are_distinct_whatever_the_directives(
        preserve_member_case in any::<bool>(),
        members in prop::collection::vec(
            (annotation(), prop::sample::select(vec!["Method", "Run"]), any::<bool>()),
            1..10,
        ),
    ) {
        let (mut builder, _, class) = single_class();
        if preserve_member_case {
            builder.add_attribute(class, Attribute::new("PreserveMemberCase"));
        }

        let ids = members
            .iter()
            .enumerate()
            .map(|(index, (annotation, declared, is_static))| {
                let id = builder.add_member(class, Kind::Method, *declared);
                builder.symbol_mut(id).is_static = *is_static;
                builder.symbol_mut(id).parameters =
                    vec![parameter("int", &format!("p{index}"))];

                match annotation {
                    Annotation::None => {}
                    Annotation::PreserveCase => {
                        builder.add_attribute(id, Attribute::new("PreserveCase"));
                    }
                    Annotation::PreserveName => {
                        builder.add_attribute(id, Attribute::new("PreserveName"));
                    }
                    Annotation::ScriptName => {
                        builder.add_attribute(
                            id,
                            Attribute::new("ScriptName")
                                .with_argument(string(&format!("named{index}"))),
                        );
                    }
                }

                id
            })
            .collect::<Vec<_>>();

        let table = create_strict(builder.build().unwrap());

        let mut groups = HashMap::<(&str, bool), HashSet<&str>>::new();
        for (id, (_, declared, is_static)) in ids.iter().zip(&members) {
            let script_name = name(&table, *id);

            prop_assert!(
                groups
                    .entry((*declared, *is_static))
                    .or_default()
                    .insert(script_name),
                "`{}` is given twice",
                script_name
            );
        }
    }

    #[test]
    fn overloads_are_numbered_by_declaration_order(
        orders in (1usize..8).prop_flat_map(|n| {
            Just((0..n).collect::<Vec<_>>()).prop_shuffle()
        })
    ) {
        let (mut builder, _, class) = single_class();
        let ids = orders
            .iter()
            .map(|order| {
                let id = builder.add_member(class, Kind::Method, "Method");
                builder.symbol_mut(id).declaration_order = *order;
                builder.symbol_mut(id).parameters =
                    vec![parameter("int", &format!("p{order}"))];
                id
            })
            .collect::<Vec<_>>();

        let (table, _) = create_default(builder.build().unwrap());

        for (id, order) in ids.iter().zip(&orders) {
            let expected = if *order == 0 {
                "method".to_owned()
            } else {
                format!("method${order}")
            };

            prop_assert_eq!(table.try_get_value(*id), Some(expected.as_str()));
        }
    }

    #[test]
    fn creation_is_idempotent(types in 0usize..6, overloads in 1usize..5) {
        let model = sample_model(types, overloads);

        let (first, _) = create_default(model.clone());
        let (second, _) = create_default(model);

        let first = first
            .eager_symbols()
            .map(|(id, symbol)| (id, symbol.clone()))
            .collect::<Vec<_>>();
        let second = second
            .eager_symbols()
            .map(|(id, symbol)| (id, symbol.clone()))
            .collect::<Vec<_>>();

        prop_assert_eq!(first, second);
    }
}
