//! Computes which features can be added to a selection without breaking it.
//!
//! The check is one level deep: a feature whose dependency is not selected yet is not offered,
//! even when that dependency is itself addable.

use crate::registry::Registry;
use fxhash::FxHashSet;
use tforge_domain::feature::Feature;

/// Every registry feature that neither conflicts with the selection nor misses a dependency,
/// in registry order.
///
/// Already-selected features are evaluated like any other, so resolving is idempotent. Unknown
/// ids in `selected` are ignored.
pub fn resolve<'r, S: AsRef<str>>(registry: &'r Registry, selected: &[S]) -> Vec<&'r Feature> {
    let chosen = registry.features_for(selected);
    let raw: FxHashSet<&str> = selected.iter().map(AsRef::as_ref).collect();

    registry.iter().filter(|feature| addable(feature, &chosen, &raw)).collect()
}

/// Whether `id` would be offered for the current selection. Unknown ids are never addable.
pub fn is_addable<S: AsRef<str>>(registry: &Registry, id: &str, selected: &[S]) -> bool {
    let Some(feature) = registry.get(id) else {
        return false;
    };
    let chosen = registry.features_for(selected);
    let raw: FxHashSet<&str> = selected.iter().map(AsRef::as_ref).collect();

    addable(feature, &chosen, &raw)
}

fn addable(feature: &Feature, chosen: &[&Feature], raw: &FxHashSet<&str>) -> bool {
    let has_conflict = chosen.iter().any(|selected| selected.conflicts_with(feature));
    let dependencies_satisfied = feature.dependencies.iter().all(|dep| raw.contains(dep.as_str()));

    !has_conflict && dependencies_satisfied
}

impl Registry {
    /// See [`resolve`].
    pub fn resolve<S: AsRef<str>>(&self, selected: &[S]) -> Vec<&Feature> {
        resolve(self, selected)
    }
}
