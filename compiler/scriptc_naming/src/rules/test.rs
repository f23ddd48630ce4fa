use crate::rules::{
    EnumMemberRenameRule, FieldRenameRule, RenameRules, RuntimeLibrary,
};

#[test]
fn empty_configuration_is_the_default() {
    let rules: RenameRules = toml::from_str("").unwrap();

    assert_eq!(rules, RenameRules::default());
    assert_eq!(*rules.field_rule(), FieldRenameRule::CamelCase);
    assert_eq!(
        *rules.enum_member_rule(),
        EnumMemberRenameRule::LowerCaseFirstChar
    );
    assert_eq!(rules.runtime_library().assembly_name(), "mscorlib");
    assert_eq!(rules.runtime_library().alias(), "ss");
}

#[test]
fn kebab_case_configuration() {
    let rules: RenameRules = toml::from_str(
        r#"
        field-rule = "dollar-prefix-only-for-duplicate-name"
        enum-member-rule = "match-declared-name"

        [runtime-library]
        alias = "rt"
        "#,
    )
    .unwrap();

    assert_eq!(
        rules,
        RenameRules::new(
            FieldRenameRule::DollarPrefixOnlyForDuplicateName,
            EnumMemberRenameRule::MatchDeclaredName,
            RuntimeLibrary::new("mscorlib", "rt"),
        )
    );
}

#[test]
fn unknown_rule_is_rejected() {
    assert!(toml::from_str::<RenameRules>(r#"field-rule = "snake-case""#)
        .is_err());
}
