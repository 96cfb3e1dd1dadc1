use proptest::prelude::*;
use tforge_deployment::{HIGH_COMPLEXITY_THRESHOLD, Registry};
use tforge_domain::feature::RiskLevel;

fn builtin_ids() -> Vec<String> {
    Registry::builtin().iter().map(|f| f.id.clone()).collect()
}

/// Selections drawn from the built-in ids plus an id nobody registers.
fn selection() -> impl Strategy<Value = Vec<String>> {
    let mut pool = builtin_ids();
    pool.push("nonexistent".to_owned());
    prop::collection::vec(prop::sample::select(pool), 0..8)
}

proptest! {
    #[test]
    fn validity_matches_error_list(selected in selection()) {
        let result = Registry::builtin().validate(&selected);
        prop_assert_eq!(result.valid, result.errors.is_empty());
        prop_assert!(result.warnings.len() <= 2);
        prop_assert_eq!(&result, &Registry::builtin().validate(&selected));
    }

    #[test]
    fn resolved_features_never_conflict_with_the_selection(selected in selection()) {
        let registry = Registry::builtin();
        let chosen = registry.features_for(&selected);
        for feature in registry.resolve(&selected) {
            prop_assert!(chosen.iter().all(|s| !s.conflicts_with(feature)));
            prop_assert!(feature.dependencies.iter().all(|d| selected.contains(d)));
        }
    }

    #[test]
    fn resolve_keeps_registry_order(selected in selection()) {
        let registry = Registry::builtin();
        let order: Vec<&str> = registry.iter().map(|f| f.id.as_str()).collect();
        let positions: Vec<usize> = registry
            .resolve(&selected)
            .iter()
            .filter_map(|f| order.iter().position(|id| *id == f.id))
            .collect();
        prop_assert!(positions.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn warnings_follow_risk_and_complexity(selected in selection()) {
        let registry = Registry::builtin();
        let features = registry.features_for(&selected);
        let result = registry.validate(&selected);

        let critical = features.iter().any(|f| f.risk_level == RiskLevel::Critical);
        let complex = features.iter().any(|f| f.complexity >= HIGH_COMPLEXITY_THRESHOLD);
        prop_assert_eq!(result.warnings.len(), usize::from(critical) + usize::from(complex));
        if critical {
            prop_assert!(result.warnings[0].starts_with("Critical features require thorough auditing: "));
        }
    }

    #[test]
    fn unknown_ids_do_not_change_the_outcome(selected in selection()) {
        let registry = Registry::builtin();
        let known: Vec<&String> = selected.iter().filter(|id| registry.contains(id)).collect();
        prop_assert_eq!(registry.validate(&selected), registry.validate(&known));
    }
}

#[test]
fn dependency_free_features_stay_addable_once_selected() {
    let registry = Registry::builtin();
    for feature in registry.iter().filter(|f| f.dependencies.is_empty()) {
        let offered = registry.resolve(&[feature.id.as_str()]);
        assert!(offered.iter().any(|f| f.id == feature.id), "{} dropped itself", feature.id);
    }
}

#[test]
fn satisfied_features_stay_addable_once_selected() {
    let registry = Registry::builtin();
    for feature in registry.iter() {
        let mut selected: Vec<&str> = feature.dependencies.iter().map(String::as_str).collect();
        selected.push(&feature.id);
        assert!(registry.resolve(&selected).iter().any(|f| f.id == feature.id), "{}", feature.id);
    }
}

/// Dependencies are read from the selection itself, so a feature selected without its
/// prerequisites is not offered back.
#[test]
fn features_with_missing_dependencies_are_not_offered_back() {
    let registry = Registry::builtin();
    let offered = registry.resolve(&["mintable"]);
    assert!(offered.iter().all(|f| f.id != "mintable"));
    assert!(offered.iter().any(|f| f.id == "erc20-base"));
}
