use tforge_deployment::{Registry, RegistryError, ValidationResult};

const FIXTURE: &str = r#"[
    { "id": "A", "name": "A", "category": "core", "riskLevel": "safe", "conflicts": ["B"] },
    { "id": "B", "name": "B", "category": "core", "riskLevel": "safe" },
    { "id": "C", "name": "C", "category": "utilities", "riskLevel": "moderate", "dependencies": ["A"] }
]"#;

fn fixture() -> Registry {
    Registry::from_json(FIXTURE).expect("fixture table is valid")
}

fn ids(registry: &Registry, selected: &[&str]) -> Vec<String> {
    registry.resolve(selected).into_iter().map(|f| f.id.clone()).collect()
}

#[test]
fn one_sided_conflict_is_reported_once() {
    let result = fixture().validate(&["A", "B"]);
    assert!(!result.valid);
    assert_eq!(result.errors, ["A conflicts with B"]);

    let reversed = fixture().validate(&["B", "A"]);
    assert_eq!(reversed.errors, ["B conflicts with A"]);
}

#[test]
fn missing_dependency_names_both_features() {
    let result = fixture().validate(&["C"]);
    assert_eq!(result, ValidationResult { valid: false, errors: vec!["C requires A".into()], warnings: vec![] });
}

#[test]
fn resolve_follows_conflicts_and_dependencies() {
    let registry = fixture();
    assert_eq!(ids(&registry, &[]), ["A", "B"]);
    assert_eq!(ids(&registry, &["A"]), ["A", "C"]);
    assert_eq!(ids(&registry, &["B"]), ["B"]);
}

#[test]
fn unknown_ids_are_dropped_silently() {
    assert_eq!(
        fixture().validate(&["nonexistent"]),
        ValidationResult { valid: true, errors: vec![], warnings: vec![] }
    );
    assert_eq!(ids(&fixture(), &["nonexistent"]), ["A", "B"]);
}

#[test]
fn two_independent_pairs_give_two_errors() {
    let registry = Registry::from_json(
        r#"[
            { "id": "a", "name": "a", "category": "core", "riskLevel": "safe", "conflicts": ["b"] },
            { "id": "b", "name": "b", "category": "core", "riskLevel": "safe" },
            { "id": "c", "name": "c", "category": "core", "riskLevel": "safe" },
            { "id": "d", "name": "d", "category": "core", "riskLevel": "safe", "conflicts": ["c"] }
        ]"#,
    )
    .expect("valid table");
    let result = registry.validate(&["a", "b", "c", "d"]);
    assert_eq!(result.errors, ["a conflicts with b", "c conflicts with d"]);
}

#[test]
fn critical_features_share_one_warning() {
    let registry = Registry::from_json(
        r#"[
            { "id": "x", "name": "X", "category": "economics", "riskLevel": "critical", "complexity": 9 },
            { "id": "y", "name": "Y", "category": "economics", "riskLevel": "critical", "complexity": 2 }
        ]"#,
    )
    .expect("valid table");
    let result = registry.validate(&["x", "y"]);
    assert!(result.valid);
    assert_eq!(
        result.warnings,
        [
            "Critical features require thorough auditing: X, Y",
            "High complexity features may increase gas costs: X",
        ]
    );
}

#[test]
fn json_tables_carry_typed_parameters() {
    let registry = Registry::from_json(
        r#"[{
            "id": "capped", "name": "Capped", "category": "economics", "riskLevel": "safe",
            "parameters": [{ "name": "cap", "required": true, "kind": { "type": "uint", "min": 1 } }],
            "standards": "ERC20"
        }]"#,
    )
    .expect("valid table");
    let capped = registry.get("capped").expect("registered");
    assert_eq!(capped.parameter("cap").map(|p| p.kind.solidity_type()), Some("uint256"));
    assert_eq!(capped.complexity, 1);
}

#[test]
fn strict_tables_reject_dangling_references() {
    let err = Registry::builder()
        .strict_references(true)
        .json(FIXTURE.replace("[\"A\"]", "[\"Z\"]").as_str())
        .and_then(tforge_deployment::RegistryBuilder::build)
        .expect_err("Z is unknown");
    assert!(matches!(err, RegistryError::UnknownReference { relation: "dependency", .. }));
}

#[test]
fn malformed_json_is_a_registry_error() {
    let err = Registry::from_json("{ not json").expect_err("malformed");
    assert!(err.to_string().starts_with("Feature table is not valid JSON (Parsing feature table)"));
}
