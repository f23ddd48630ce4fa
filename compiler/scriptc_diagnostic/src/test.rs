use crate::{Diagnostic, Location, Related, Severity};

#[test]
fn display_mentions_every_part() {
    colored::control::set_override(false);

    let diagnostic = Diagnostic {
        location: Some(Location::new("main.cs".to_owned(), 3, 7)),
        message: "the override key `C.Foo()` matches no symbol".to_owned(),
        severity: Severity::Warning,
        help_message: Some("did you mean `C.Foo(int x)`?".to_owned()),
        related: vec![Related::new(None, "declared here".to_owned())],
    };

    let rendered = diagnostic.to_string();

    assert!(rendered.starts_with("warning: the override key"));
    assert!(rendered.contains("--> main.cs:3:7"));
    assert!(rendered.contains("help: did you mean `C.Foo(int x)`?"));
    assert!(rendered.contains("note: declared here"));
}

#[test]
fn severity_orders_errors_first() {
    assert!(Severity::Error < Severity::Warning);
    assert!(Severity::Warning < Severity::Info);
}
