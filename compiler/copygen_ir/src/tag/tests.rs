use super::*;

#[test]
fn lookup_single_key() {
    let tag = StructTag::new(r#"noCopy:"true""#);
    assert_eq!(tag.lookup("noCopy").as_deref(), Some("true"));
    assert_eq!(tag.lookup("json"), None);
}

#[test]
fn lookup_among_several_keys() {
    let tag = StructTag::new(r#"json:"name,omitempty" noCopy:"1"  yaml:"n""#);
    assert_eq!(tag.lookup("json").as_deref(), Some("name,omitempty"));
    assert_eq!(tag.lookup("noCopy").as_deref(), Some("1"));
    assert_eq!(tag.lookup("yaml").as_deref(), Some("n"));
}

#[test]
fn lookup_resolves_escapes() {
    let tag = StructTag::new(r#"doc:"say \"hi\"""#);
    assert_eq!(tag.lookup("doc").as_deref(), Some(r#"say "hi""#));
}

#[test]
fn lookup_stops_at_malformed_pair() {
    let tag = StructTag::new(r#"broken noCopy:"true""#);
    assert_eq!(tag.lookup("noCopy"), None);
}

#[test]
fn lookup_unterminated_value() {
    let tag = StructTag::new(r#"noCopy:"true"#);
    assert_eq!(tag.lookup("noCopy"), None);
}

#[test]
fn empty_tag_has_no_keys() {
    assert_eq!(StructTag::default().lookup("noCopy"), None);
    assert!(!StructTag::default().flag("noCopy"));
}

#[test]
fn flag_accepts_boolean_spellings() {
    for spelling in ["1", "t", "T", "TRUE", "true", "True"] {
        let tag = StructTag::new(format!(r#"noCopy:"{spelling}""#));
        assert!(tag.flag("noCopy"), "{spelling} should read as true");
    }
    for spelling in ["0", "f", "F", "FALSE", "false", "False"] {
        let tag = StructTag::new(format!(r#"noCopy:"{spelling}""#));
        assert!(!tag.flag("noCopy"), "{spelling} should read as false");
    }
}

#[test]
fn flag_unparseable_value_is_false() {
    assert!(!StructTag::new(r#"noCopy:"yes""#).flag("noCopy"));
    assert!(!StructTag::new(r#"noCopy:"""#).flag("noCopy"));
}

#[test]
fn parse_bool_rejects_mixed_case() {
    assert_eq!(parse_bool("tRUE"), None);
    assert_eq!(parse_bool("True"), Some(true));
    assert_eq!(parse_bool("False"), Some(false));
}

#[test]
fn lookup_resolves_numeric_escapes() {
    for tag in [
        r#"noCopy:"\x74rue""#,
        r#"noCopy:"\164rue""#,
        r#"noCopy:"\u0074rue""#,
        r#"noCopy:"\U00000074rue""#,
    ] {
        let tag = StructTag::new(tag);
        assert_eq!(tag.lookup("noCopy").as_deref(), Some("true"), "{tag:?}");
        assert!(tag.flag("noCopy"), "{tag:?}");
    }
    let tag = StructTag::new(r#"doc:"café \U0001F600 \xc3\xa9""#);
    assert_eq!(tag.lookup("doc").as_deref(), Some("café 😀 é"));
}

#[test]
fn lookup_resolves_control_escapes() {
    let tag = StructTag::new(r#"doc:"\a\b\f\n\r\t\v\\\"""#);
    assert_eq!(
        tag.lookup("doc").as_deref(),
        Some("\u{7}\u{8}\u{c}\n\r\t\u{b}\\\"")
    );
}

#[test]
fn lookup_rejects_invalid_escapes() {
    for tag in [
        r#"noCopy:"\q""#,
        r#"noCopy:"\x7""#,
        r#"noCopy:"\xzz""#,
        r#"noCopy:"\400""#,
        r#"noCopy:"\18""#,
        r#"noCopy:"\u12""#,
        r#"noCopy:"\uD800""#,
        r#"noCopy:"\U00110000""#,
        r#"noCopy:"\'""#,
        r#"noCopy:"\xff""#,
    ] {
        let tag = StructTag::new(tag);
        assert_eq!(tag.lookup("noCopy"), None, "{tag:?}");
        assert!(!tag.flag("noCopy"));
    }
}
