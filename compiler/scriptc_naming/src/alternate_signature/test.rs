use std::sync::Arc;

use scriptc_handler::Storage;
use scriptc_model::{Attribute, Builder, Kind, SymbolID};

use crate::{
    alternate_signature::AlternateSignatureSymbolTable,
    attribute::AttributeReader, diagnostic::Diagnostic,
};

fn table(
    builder: Builder,
) -> (AlternateSignatureSymbolTable, Arc<Storage<Diagnostic>>) {
    let storage = Arc::new(Storage::<Diagnostic>::new());
    let reader = Arc::new(AttributeReader::new(
        Arc::new(builder.build().unwrap()),
        storage.clone(),
    ));

    (AlternateSignatureSymbolTable::new(reader, storage.clone()), storage)
}

fn stub(
    builder: &mut Builder,
    class: SymbolID,
    kind: Kind,
    name: &str,
) -> SymbolID {
    let id = builder.add_member(class, kind, name);
    builder.add_attribute(id, Attribute::new("AlternateSignature"));
    id
}

#[test]
fn constructors_are_grouped_under_the_type_name() {
    let mut builder = Builder::new("App");
    let app = builder.compilation_assembly();
    let class = builder.add_type(app, "", Kind::Class, "Point");
    let implementation = builder.add_member(class, Kind::Constructor, "Point");
    let first = stub(&mut builder, class, Kind::Constructor, "Point");
    let second = stub(&mut builder, class, Kind::Constructor, "Point");
    let unrelated = builder.add_member(class, Kind::Method, "Point");

    let (table, storage) = table(builder);

    let groups = table.groups(class);
    assert_eq!(groups.len(), 1);
    assert_eq!(*groups[0].implementing_method(), implementation);
    assert_eq!(groups[0].alternate_signature_methods(), &[first, second]);

    assert_eq!(table.implementation_of(first), Some(implementation));
    assert_eq!(table.implementation_of(implementation), None);
    assert!(table.group_of(implementation).is_some());

    // a method sharing the type name is still a different partition
    assert!(table.group_of(unrelated).is_none());
    assert!(storage.is_empty());
}

#[test]
fn partitions_without_stubs_form_no_group() {
    let mut builder = Builder::new("App");
    let app = builder.compilation_assembly();
    let class = builder.add_type(app, "", Kind::Class, "C");
    let first = builder.add_member(class, Kind::Method, "Run");
    builder.add_member(class, Kind::Method, "Run");

    let (table, storage) = table(builder);

    assert!(table.groups(class).is_empty());
    assert!(table.group_of(first).is_none());
    assert!(storage.is_empty());
}

#[test]
fn group_without_implementation_is_reported_once() {
    let mut builder = Builder::new("App");
    let app = builder.compilation_assembly();
    let class = builder.add_type(app, "", Kind::Class, "C");
    let only = stub(&mut builder, class, Kind::Method, "Format");
    let valid_stub = stub(&mut builder, class, Kind::Method, "Parse");
    let valid = builder.add_member(class, Kind::Method, "Parse");

    let (table, storage) = table(builder);

    assert!(table.implementation_of(only).is_none());
    assert_eq!(table.implementation_of(valid_stub), Some(valid));

    // queried twice, computed once
    assert_eq!(table.groups(class).len(), 1);

    let diagnostics = storage.as_vec();
    assert_eq!(diagnostics.len(), 1);

    let duplicate = diagnostics[0].as_duplicate_implementation().unwrap();
    assert_eq!(duplicate.name, "Format");
    assert!(duplicate.implementations.is_empty());
    assert_eq!(duplicate.alternate_signatures, vec![only]);
}
