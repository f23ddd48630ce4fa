use scriptc_model::{Attribute, AttributeValue, SymbolID};

use crate::{
    attribute::Owner,
    directive::{Directive, DirectiveKind, MemberReflectability},
    error::FormatProblem,
};

const OWNER: Owner = Owner::Symbol(SymbolID(0));

#[test]
fn unknown_attribute_is_not_a_directive() {
    let attribute = Attribute::new("System.ObsoleteAttribute");

    assert_eq!(Directive::parse(OWNER, &attribute), Ok(None));
}

#[test]
fn every_kind_round_trips_through_its_name() {
    use strum::IntoEnumIterator;

    for kind in DirectiveKind::iter() {
        let name: &'static str = kind.into();
        assert_eq!(name.parse::<DirectiveKind>(), Ok(kind));
    }
}

#[test]
fn optional_flag_argument_defaults_to_true() {
    let bare = Attribute::new("PreserveMemberCaseAttribute");
    let off = Attribute::new("PreserveMemberCase")
        .with_argument(AttributeValue::Bool(false));

    assert_eq!(
        Directive::parse(OWNER, &bare),
        Ok(Some(Directive::PreserveMemberCase(true)))
    );
    assert_eq!(
        Directive::parse(OWNER, &off),
        Ok(Some(Directive::PreserveMemberCase(false)))
    );
    assert!(!Directive::PreserveMemberCase(false).flag());
    assert!(Directive::Imported.flag());
}

#[test]
fn script_name_requires_a_string() {
    let missing = Attribute::new("ScriptName");
    let error = Directive::parse(OWNER, &missing).unwrap_err();

    assert_eq!(error.problem, FormatProblem::Missing { expected: "string" });
    assert_eq!(error.attribute, "ScriptName");

    let mismatched =
        Attribute::new("ScriptName").with_argument(AttributeValue::Int(4));
    let error = Directive::parse(OWNER, &mismatched).unwrap_err();

    assert_eq!(error.problem, FormatProblem::Mismatch {
        expected: "string",
        found: "int"
    });
    assert_eq!(error.to_string(), "argument #1 of `[ScriptName]` has type int; expected string");
}

#[test]
fn inline_code_reads_named_arguments() {
    let attribute = Attribute::new("InlineCode")
        .with_argument(AttributeValue::String("{this}.length".to_owned()))
        .with_named_argument(
            "NonVirtualCode",
            AttributeValue::String("{$Base}.length".to_owned()),
        );

    let directive = Directive::parse(OWNER, &attribute).unwrap().unwrap();
    let inline = directive.as_inline_code().unwrap();

    assert_eq!(inline.code, "{this}.length");
    assert_eq!(inline.non_virtual_code.as_deref(), Some("{$Base}.length"));
    assert!(inline.generated_method_name.is_none());
}

#[test]
fn member_reflectability_accepts_qualified_constants() {
    let attribute = Attribute::new("DefaultMemberReflectability")
        .with_argument(AttributeValue::Enum(
            "MemberReflectability.NonPrivate".to_owned(),
        ));

    assert_eq!(
        Directive::parse(OWNER, &attribute),
        Ok(Some(Directive::DefaultMemberReflectability(
            MemberReflectability::NonPrivate
        )))
    );

    let invalid = Attribute::new("DefaultMemberReflectability")
        .with_argument(AttributeValue::Enum("Everything".to_owned()));

    assert!(matches!(
        Directive::parse(OWNER, &invalid).unwrap_err().problem,
        FormatProblem::InvalidValue { .. }
    ));
}

#[test]
fn reflectability_defaults() {
    use scriptc_model::Accessibility;

    assert!(!MemberReflectability::None.allows(Accessibility::Public));
    assert!(MemberReflectability::PublicAndProtected
        .allows(Accessibility::Protected));
    assert!(!MemberReflectability::PublicAndProtected
        .allows(Accessibility::Internal));
    assert!(MemberReflectability::NonPrivate.allows(Accessibility::Internal));
    assert!(MemberReflectability::All.allows(Accessibility::Private));
}
