use copygen_ir::{FieldDescriptor, OpaqueKind, TypeKind, UnitPath};
use pretty_assertions::assert_eq;

use super::*;

const HEADER: &str = "\
// Code generated by copygen for copy struct. DO NOT EDIT.

package model

import (
)

";

fn model() -> Unit {
    Unit::new("example.com/app/model", "model")
}

fn geo() -> UnitPath {
    UnitPath::new("example.com/lib/geo")
}

fn generate(table: &TypeTable, seeds: &[TypeId]) -> String {
    let mut generator = Generator::new(table, model());
    for &seed in seeds {
        generator.add(seed);
    }
    generator.generate()
}

fn procedure_count(code: &str, ident: &str) -> usize {
    code.matches(&format!("func (in *{ident}) Copy() (out {ident}) {{"))
        .count()
}

#[test]
fn empty_run_writes_header_only() {
    let table = TypeTable::new();
    assert_eq!(generate(&table, &[]), HEADER);
}

#[test]
fn scalar_fields_are_assigned_in_declared_order() {
    let unit = model();
    let mut table = TypeTable::new();
    let account = table.named_struct(
        &unit.path,
        "Account",
        vec![
            FieldDescriptor::new("ID", TypeId::INT64),
            FieldDescriptor::new("Name", TypeId::STRING),
            FieldDescriptor::new("Active", TypeId::BOOL),
        ],
    );

    let expected = format!(
        "{HEADER}\
func (in *Account) Copy() (out Account) {{
\tout.ID = in.ID
\tout.Name = in.Name
\tout.Active = in.Active
\treturn
}}
"
    );
    assert_eq!(generate(&table, &[account]), expected);
}

#[test]
fn pointer_to_scalar_is_nil_guarded() {
    let unit = model();
    let mut table = TypeTable::new();
    let nick = table.pointer(TypeId::STRING);
    let profile = table.named_struct(
        &unit.path,
        "Profile",
        vec![FieldDescriptor::new("Nick", nick)],
    );

    let expected = format!(
        "{HEADER}\
func (in *Profile) Copy() (out Profile) {{
\tif in.Nick != nil {{
\t\tv1 := *in.Nick
\t\tout.Nick = &v1
\t}}
\treturn
}}
"
    );
    assert_eq!(generate(&table, &[profile]), expected);
}

#[test]
fn slice_of_in_unit_structs_is_reallocated_and_delegated() {
    let unit = model();
    let mut table = TypeTable::new();
    let item = table.named_struct(
        &unit.path,
        "Item",
        vec![FieldDescriptor::new("SKU", TypeId::STRING)],
    );
    let items = table.slice(item);
    let order = table.named_struct(
        &unit.path,
        "Order",
        vec![FieldDescriptor::new("Items", items)],
    );

    let expected = format!(
        "{HEADER}\
func (in *Order) Copy() (out Order) {{
\tif len(in.Items) > 0 {{
\t\tout.Items = make([]Item, len(in.Items))
\t\tfor v1 := range in.Items {{
\t\t\tout.Items[v1] = in.Items[v1].Copy()
\t\t}}
\t}}
\treturn
}}

func (in *Item) Copy() (out Item) {{
\tout.SKU = in.SKU
\treturn
}}
"
    );
    assert_eq!(generate(&table, &[order]), expected);
}

#[test]
fn array_is_copied_without_allocation() {
    let unit = model();
    let mut table = TypeTable::new();
    let cell = table.named_struct(
        &unit.path,
        "Cell",
        vec![FieldDescriptor::new("V", TypeId::INT)],
    );
    let cells = table.array(3, cell);
    let grid = table.named_struct(
        &unit.path,
        "Grid",
        vec![FieldDescriptor::new("Cells", cells)],
    );

    let code = generate(&table, &[grid]);
    assert!(!code.contains("make("));
    assert!(!code.contains("len("));
    assert!(code.contains(
        "\tfor v1 := range in.Cells {\n\t\tout.Cells[v1] = in.Cells[v1].Copy()\n\t}\n"
    ));
    assert_eq!(procedure_count(&code, "Cell"), 1);
}

#[test]
fn diamond_references_emit_each_type_once() {
    let unit = model();
    let mut table = TypeTable::new();
    let leaf = table.named_struct(
        &unit.path,
        "Leaf",
        vec![FieldDescriptor::new("X", TypeId::INT)],
    );
    let to_leaf = table.pointer(leaf);
    let leaves = table.slice(leaf);
    let left = table.named_struct(
        &unit.path,
        "Left",
        vec![FieldDescriptor::new("L", to_leaf)],
    );
    let right = table.named_struct(
        &unit.path,
        "Right",
        vec![
            FieldDescriptor::new("L", leaf),
            FieldDescriptor::new("Many", leaves),
        ],
    );
    let root = table.named_struct(
        &unit.path,
        "Root",
        vec![
            FieldDescriptor::new("A", left),
            FieldDescriptor::new("B", right),
        ],
    );

    let code = generate(&table, &[root, left, right]);
    for ident in ["Root", "Left", "Right", "Leaf"] {
        assert_eq!(procedure_count(&code, ident), 1, "{ident}");
    }
}

#[test]
fn self_referential_record_terminates() {
    let unit = model();
    let mut table = TypeTable::new();
    let node = table.declare_named(&unit.path, "Node");
    let next = table.pointer(node);
    let children = table.slice(next);
    table.define(
        node,
        TypeKind::Struct(vec![
            FieldDescriptor::new("Value", TypeId::INT),
            FieldDescriptor::new("Next", next),
            FieldDescriptor::new("Children", children),
        ]),
    );

    let expected = format!(
        "{HEADER}\
func (in *Node) Copy() (out Node) {{
\tout.Value = in.Value
\tif in.Next != nil {{
\t\tv1 := in.Next.Copy()
\t\tout.Next = &v1
\t}}
\tif len(in.Children) > 0 {{
\t\tout.Children = make([]*Node, len(in.Children))
\t\tfor v2 := range in.Children {{
\t\t\tif in.Children[v2] != nil {{
\t\t\t\tv3 := in.Children[v2].Copy()
\t\t\t\tout.Children[v2] = &v3
\t\t\t}}
\t\t}}
\t}}
\treturn
}}
"
    );
    assert_eq!(generate(&table, &[node]), expected);
}

#[test]
fn skip_tagged_fields_are_never_mentioned() {
    let unit = model();
    let mut table = TypeTable::new();
    let secret = table.named_struct(
        &unit.path,
        "Secret",
        vec![FieldDescriptor::new("Key", TypeId::STRING)],
    );
    let session = table.named_struct(
        &unit.path,
        "Session",
        vec![
            FieldDescriptor::new("User", TypeId::STRING),
            FieldDescriptor::new("Token", TypeId::STRING).with_tag(r#"noCopy:"true""#),
            FieldDescriptor::new("Vault", secret).with_tag(r#"json:"-" noCopy:"1""#),
            FieldDescriptor::new("Note", TypeId::STRING).with_tag(r#"noCopy:"nah""#),
        ],
    );

    let code = generate(&table, &[session]);
    assert!(code.contains("\tout.User = in.User\n"));
    assert!(code.contains("\tout.Note = in.Note\n"));
    assert!(!code.contains("Token"));
    assert!(!code.contains("Vault"));
    // A skipped struct field does not pull its type into the queue.
    assert_eq!(procedure_count(&code, "Secret"), 0);
}

#[test]
fn external_structs_are_copied_by_value() {
    let unit = model();
    let mut table = TypeTable::new();
    let point = table.named_struct(
        &geo(),
        "Point",
        vec![FieldDescriptor::new("X", TypeId::FLOAT64)],
    );
    let at = table.pointer(point);
    let pins = table.slice(at);
    let place = table.named_struct(
        &unit.path,
        "Place",
        vec![
            FieldDescriptor::new("Loc", point),
            FieldDescriptor::new("At", at),
            FieldDescriptor::new("Pins", pins),
        ],
    );

    let imports: ImportAliasTable = [("example.com/lib/geo", "geo")].into_iter().collect();
    let mut generator = Generator::new(&table, unit).with_imports(imports);
    generator.add(place);
    generator.add(point);
    let code = generator.generate();

    let expected = "\
// Code generated by copygen for copy struct. DO NOT EDIT.

package model

import (
\tgeo \"example.com/lib/geo\"
)

func (in *Place) Copy() (out Place) {
\tout.Loc = in.Loc
\tif in.At != nil {
\t\tv1 := *in.At
\t\tout.At = &v1
\t}
\tif len(in.Pins) > 0 {
\t\tout.Pins = make([]*geo.Point, len(in.Pins))
\t\tfor v2 := range in.Pins {
\t\t\tif in.Pins[v2] != nil {
\t\t\t\tv3 := *in.Pins[v2]
\t\t\t\tout.Pins[v2] = &v3
\t\t\t}
\t\t}
\t}
\treturn
}
";
    assert_eq!(code, expected);
}

#[test]
fn external_element_without_alias_uses_package_name() {
    let unit = model();
    let mut table = TypeTable::new();
    let point = table.named_struct(&geo(), "Point", Vec::new());
    let points = table.slice(point);
    let route = table.named_struct(
        &unit.path,
        "Route",
        vec![FieldDescriptor::new("Stops", points)],
    );

    let code = generate(&table, &[route]);
    assert!(code.contains("out.Stops = make([]geo.Point, len(in.Stops))"));
    assert!(code.contains("out.Stops[v1] = in.Stops[v1]\n"));
}

#[test]
fn maps_are_dropped_and_opaque_kinds_assigned() {
    let unit = model();
    let mut table = TypeTable::new();
    let index = table.map(TypeId::STRING, TypeId::INT);
    let any = table.any();
    let handler = table.opaque(OpaqueKind::Func, "func() error");
    let events = table.opaque(OpaqueKind::Chan, "chan string");
    let registry = table.named_struct(
        &unit.path,
        "Registry",
        vec![
            FieldDescriptor::new("Index", index),
            FieldDescriptor::new("Payload", any),
            FieldDescriptor::new("OnClose", handler),
            FieldDescriptor::new("Events", events),
        ],
    );

    let expected = format!(
        "{HEADER}\
func (in *Registry) Copy() (out Registry) {{
\tout.Payload = in.Payload
\tout.OnClose = in.OnClose
\tout.Events = in.Events
\treturn
}}
"
    );
    assert_eq!(generate(&table, &[registry]), expected);
}

#[test]
fn pointer_to_collection_leaves_empty_guard() {
    let unit = model();
    let mut table = TypeTable::new();
    let ints = table.slice(TypeId::INT);
    let to_ints = table.pointer(ints);
    let holder = table.named_struct(
        &unit.path,
        "Holder",
        vec![FieldDescriptor::new("Values", to_ints)],
    );

    let code = generate(&table, &[holder]);
    assert!(code.contains("\tif in.Values != nil {\n\t}\n"));
    assert!(!code.contains("out.Values"));
}

#[test]
fn nested_slices_use_distinct_temps() {
    let unit = model();
    let mut table = TypeTable::new();
    let row = table.slice(TypeId::FLOAT64);
    let rows = table.slice(row);
    let matrix = table.named_struct(
        &unit.path,
        "Matrix",
        vec![FieldDescriptor::new("Rows", rows)],
    );

    let expected = format!(
        "{HEADER}\
func (in *Matrix) Copy() (out Matrix) {{
\tif len(in.Rows) > 0 {{
\t\tout.Rows = make([][]float64, len(in.Rows))
\t\tfor v1 := range in.Rows {{
\t\t\tif len(in.Rows[v1]) > 0 {{
\t\t\t\tout.Rows[v1] = make([]float64, len(in.Rows[v1]))
\t\t\t\tfor v2 := range in.Rows[v1] {{
\t\t\t\t\tout.Rows[v1][v2] = in.Rows[v1][v2]
\t\t\t\t}}
\t\t\t}}
\t\t}}
\t}}
\treturn
}}
"
    );
    assert_eq!(generate(&table, &[matrix]), expected);
}

#[test]
fn temps_are_unique_across_procedures() {
    let unit = model();
    let mut table = TypeTable::new();
    let to_int = table.pointer(TypeId::INT);
    let a = table.named_struct(&unit.path, "A", vec![FieldDescriptor::new("P", to_int)]);
    let b = table.named_struct(&unit.path, "B", vec![FieldDescriptor::new("P", to_int)]);

    let code = generate(&table, &[b, a]);
    assert!(code.contains("func (in *A) Copy() (out A) {\n\tif in.P != nil {\n\t\tv1 := *in.P"));
    assert!(code.contains("func (in *B) Copy() (out B) {\n\tif in.P != nil {\n\t\tv2 := *in.P"));
}

#[test]
fn output_is_stable_across_runs_and_seed_orders() {
    let unit = model();
    let mut table = TypeTable::new();
    let to_int = table.pointer(TypeId::INT);
    let seeds: Vec<TypeId> = ["Delta", "Alpha", "Charlie", "Bravo"]
        .iter()
        .map(|name| {
            table.named_struct(&unit.path, name, vec![FieldDescriptor::new("N", to_int)])
        })
        .collect();
    let reversed: Vec<TypeId> = seeds.iter().rev().copied().collect();

    let first = generate(&table, &seeds);
    let second = generate(&table, &seeds);
    let third = generate(&table, &reversed);
    assert_eq!(first, second);
    assert_eq!(first, third);

    let alpha = first.find("*Alpha)").unwrap_or(usize::MAX);
    let delta = first.find("*Delta)").unwrap_or(0);
    assert!(alpha < delta);
}

#[test]
fn seeds_are_unwrapped_and_filtered() {
    let unit = model();
    let mut table = TypeTable::new();
    let user = table.named_struct(
        &unit.path,
        "User",
        vec![FieldDescriptor::new("ID", TypeId::INT)],
    );
    let to_user = table.pointer(user);
    let status = table.declare_named(&unit.path, "Status");
    table.define(status, TypeKind::Basic(copygen_ir::BasicKind::Int));
    let foreign = table.named_struct(&geo(), "Point", Vec::new());
    let ints = table.slice(TypeId::INT);

    let code = generate(&table, &[to_user, status, foreign, ints, TypeId::STRING]);
    assert_eq!(procedure_count(&code, "User"), 1);
    assert_eq!(procedure_count(&code, "Status"), 0);
    assert_eq!(procedure_count(&code, "Point"), 0);
    assert_eq!(code.matches("func ").count(), 1);
}

#[test]
fn config_overrides_method_marker_and_skip_tag() {
    let unit = model();
    let mut table = TypeTable::new();
    let inner = table.named_struct(&unit.path, "Inner", Vec::new());
    let outer = table.named_struct(
        &unit.path,
        "Outer",
        vec![
            FieldDescriptor::new("In", inner),
            FieldDescriptor::new("Cache", TypeId::STRING).with_tag(r#"deep:"false""#),
            FieldDescriptor::new("Name", TypeId::STRING).with_tag(r#"noCopy:"true""#),
        ],
    );

    let config = GenerateConfig {
        method: "DeepCopy".to_string(),
        skip_tag: "deep".to_string(),
        marker: "// generated".to_string(),
    };
    // `deep:"false"` parses as false, so Cache is still copied; the
    // default key no longer applies, so Name is copied too.
    let mut generator = Generator::new(&table, unit).with_config(config);
    generator.add(outer);
    let code = generator.generate();

    assert!(code.starts_with("// generated\n\npackage model\n"));
    assert!(code.contains("func (in *Outer) DeepCopy() (out Outer) {"));
    assert!(code.contains("\tout.In = in.In.DeepCopy()\n"));
    assert!(code.contains("\tout.Cache = in.Cache\n"));
    assert!(code.contains("\tout.Name = in.Name\n"));
    assert!(code.contains("func (in *Inner) DeepCopy() (out Inner) {\n\treturn\n}\n"));
}

#[test]
fn run_writes_generated_text() {
    let unit = model();
    let mut table = TypeTable::new();
    let user = table.named_struct(
        &unit.path,
        "User",
        vec![FieldDescriptor::new("ID", TypeId::INT)],
    );

    let mut generator = Generator::new(&table, unit);
    generator.add(user);
    let mut out = Vec::new();
    assert!(generator.run(&mut out).is_ok());
    assert_eq!(String::from_utf8_lossy(&out), generate(&table, &[user]));
}

#[test]
fn imports_are_sorted_by_alias() {
    let table = TypeTable::new();
    let imports: ImportAliasTable = [
        ("time", "time"),
        ("example.com/lib/geo", "geo"),
        ("example.com/lib/audit", "audit"),
    ]
    .into_iter()
    .collect();
    let code = Generator::new(&table, model()).with_imports(imports).generate();
    assert!(code.contains(
        "import (\n\taudit \"example.com/lib/audit\"\n\tgeo \"example.com/lib/geo\"\n\ttime \"time\"\n)\n"
    ));
}
