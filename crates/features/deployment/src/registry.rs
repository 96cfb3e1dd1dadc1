//! # Feature Registry
//!
//! The fixed catalog of known features, keyed by id and kept in insertion order. Insertion order
//! is the order every resolver result and every validator message follows.
//!
//! A [`Registry`] is immutable once built and is a cheap [`Arc`] handle, so it can be cloned
//! into sessions and threads without locking.

use crate::catalog;
use crate::error::{RegistryError, RegistryErrorExt};
use fxhash::{FxHashMap, FxHashSet};
use std::path::Path;
use std::sync::{Arc, LazyLock};
use tforge_domain::config::CatalogConfig;
use tforge_domain::feature::{Feature, FeatureCategory};
use tforge_domain::standard::TokenStandard;
use tracing::{debug, info, warn};

static BUILTIN: LazyLock<Registry> = LazyLock::new(|| Registry::assemble(catalog::builtin_features()));

/// Read-only catalog of features.
#[derive(Debug, Clone)]
pub struct Registry {
    inner: Arc<RegistryInner>,
}

#[derive(Debug)]
struct RegistryInner {
    features: Vec<Feature>,
    index: FxHashMap<String, usize>,
}

impl Registry {
    /// The built-in feature table.
    ///
    /// `mintable` declares a conflict with `fixed-supply`, which is not registered, so this table
    /// only passes a non-strict [`RegistryBuilder`].
    #[must_use]
    pub fn builtin() -> Self {
        BUILTIN.clone()
    }

    #[must_use]
    pub fn builder() -> RegistryBuilder {
        RegistryBuilder::default()
    }

    /// Builds a registry from a JSON array of features using the default builder settings.
    ///
    /// # Errors
    /// Returns [`RegistryError::Json`] for malformed input and any error
    /// [`RegistryBuilder::build`] reports.
    pub fn from_json(json: &str) -> Result<Self, RegistryError> {
        Self::builder().json(json)?.build()
    }

    /// Loads the registry described by the catalog configuration.
    ///
    /// Reads `features_file` when set, otherwise starts from the built-in table. Both go through
    /// the builder with the configured reference and normalization settings.
    ///
    /// # Errors
    /// Returns [`RegistryError::Io`] if the features file cannot be read, plus any error
    /// [`RegistryBuilder::build`] reports.
    pub fn load(config: &CatalogConfig) -> Result<Self, RegistryError> {
        let builder = RegistryBuilder::from_config(config);
        let builder = match &config.features_file {
            Some(path) => builder.json_file(path)?,
            None => builder.features(catalog::builtin_features()),
        };
        let registry = builder.build()?;
        info!(features = registry.len(), "Feature registry loaded");
        Ok(registry)
    }

    /// Looks a feature up by id. Unknown ids are not an error.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&Feature> {
        self.inner.index.get(id).map(|&i| &self.inner.features[i])
    }

    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.inner.index.contains_key(id)
    }

    /// Features in registry order.
    pub fn iter(&self) -> impl Iterator<Item = &Feature> {
        self.inner.features.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.features.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inner.features.is_empty()
    }

    /// Features of one category, in registry order.
    #[must_use]
    pub fn by_category(&self, category: FeatureCategory) -> Vec<&Feature> {
        self.iter().filter(|f| f.category == category).collect()
    }

    /// Features of one category that are offered for `standard`.
    #[must_use]
    pub fn for_standard(&self, category: FeatureCategory, standard: TokenStandard) -> Vec<&Feature> {
        self.iter().filter(|f| f.category == category && f.standards.supports(standard)).collect()
    }

    /// Maps selected ids to their features in input order, dropping ids the registry does not know.
    pub fn features_for<S: AsRef<str>>(&self, ids: &[S]) -> Vec<&Feature> {
        ids.iter()
            .filter_map(|id| {
                let id = id.as_ref();
                let feature = self.get(id);
                if feature.is_none() {
                    debug!(id, "Ignoring unknown feature id");
                }
                feature
            })
            .collect()
    }

    /// Display name of a feature, falling back to the id itself when it is not registered.
    #[must_use]
    pub fn display_name<'a>(&'a self, id: &'a str) -> &'a str {
        self.get(id).map_or(id, |f| f.name.as_str())
    }

    fn assemble(features: Vec<Feature>) -> Self {
        let index = features.iter().enumerate().map(|(i, f)| (f.id.clone(), i)).collect();
        Self { inner: Arc::new(RegistryInner { features, index }) }
    }
}

/// Collects feature definitions and checks them before producing a [`Registry`].
#[derive(Debug, Default)]
pub struct RegistryBuilder {
    features: Vec<Feature>,
    strict_references: bool,
    normalize_conflicts: bool,
}

impl RegistryBuilder {
    #[must_use]
    pub fn from_config(config: &CatalogConfig) -> Self {
        Self::default()
            .strict_references(config.strict_references)
            .normalize_conflicts(config.normalize_conflicts)
    }

    /// Reject references to unregistered ids instead of logging them.
    #[must_use]
    pub const fn strict_references(mut self, enabled: bool) -> Self {
        self.strict_references = enabled;
        self
    }

    /// Store every one-sided conflict on both features.
    #[must_use]
    pub const fn normalize_conflicts(mut self, enabled: bool) -> Self {
        self.normalize_conflicts = enabled;
        self
    }

    #[must_use]
    pub fn feature(mut self, feature: Feature) -> Self {
        self.features.push(feature);
        self
    }

    #[must_use]
    pub fn features(mut self, features: impl IntoIterator<Item = Feature>) -> Self {
        self.features.extend(features);
        self
    }

    /// Appends the features of a JSON array.
    ///
    /// # Errors
    /// Returns [`RegistryError::Json`] if the input is not an array of features.
    pub fn json(self, json: &str) -> Result<Self, RegistryError> {
        let features: Vec<Feature> =
            serde_json::from_str(json).context("Parsing feature table")?;
        Ok(self.features(features))
    }

    /// Appends the features of a JSON file.
    ///
    /// # Errors
    /// Returns [`RegistryError::Io`] if the file cannot be read and [`RegistryError::Json`] if
    /// it does not hold an array of features.
    pub fn json_file(self, path: impl AsRef<Path>) -> Result<Self, RegistryError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)
            .context(format!("Reading feature table: {}", path.display()))?;
        self.json(&json)
    }

    /// Checks the collected features and freezes them into a [`Registry`].
    ///
    /// # Errors
    /// * [`RegistryError::DuplicateFeature`] when an id is registered twice.
    /// * [`RegistryError::SelfReference`] when a feature depends on or conflicts with itself.
    /// * [`RegistryError::Unsatisfiable`] when a feature depends on and conflicts with one id.
    /// * [`RegistryError::UnknownReference`] for unregistered references in strict mode.
    pub fn build(self) -> Result<Registry, RegistryError> {
        let mut ids = FxHashSet::default();
        for feature in &self.features {
            if !ids.insert(feature.id.as_str()) {
                return Err(RegistryError::DuplicateFeature { id: feature.id.clone(), context: None });
            }
        }

        for feature in &self.features {
            check_feature(feature)?;
            for (relation, references) in [
                ("dependency", &feature.dependencies),
                ("conflict", &feature.conflicts),
                ("replacement", &feature.replaces),
            ] {
                for reference in references.iter().filter(|r| !ids.contains(r.as_str())) {
                    if self.strict_references {
                        return Err(RegistryError::UnknownReference {
                            id: feature.id.clone(),
                            reference: reference.clone(),
                            relation,
                            context: None,
                        });
                    }
                    warn!(feature = %feature.id, reference = %reference, relation, "Unregistered feature reference");
                }
            }
        }

        let mut features = self.features;
        if self.normalize_conflicts {
            add_reverse_conflicts(&mut features);
        }

        Ok(Registry::assemble(features))
    }
}

fn check_feature(feature: &Feature) -> Result<(), RegistryError> {
    let id = &feature.id;
    let self_relation = if feature.depends_on(id) {
        Some("dependency")
    } else if feature.declares_conflict(id) {
        Some("conflict")
    } else {
        None
    };
    if let Some(relation) = self_relation {
        return Err(RegistryError::SelfReference { id: id.clone(), relation, context: None });
    }

    if let Some(other) = feature.dependencies.iter().find(|dep| feature.declares_conflict(dep)) {
        return Err(RegistryError::Unsatisfiable {
            id: id.clone(),
            other: other.clone(),
            context: None,
        });
    }

    Ok(())
}

fn add_reverse_conflicts(features: &mut [Feature]) {
    let edges: Vec<(String, String)> = features
        .iter()
        .flat_map(|f| f.conflicts.iter().map(|c| (f.id.clone(), c.clone())))
        .collect();

    for (from, to) in edges {
        if let Some(target) = features.iter_mut().find(|f| f.id == to)
            && !target.declares_conflict(&from)
        {
            debug!(feature = %to, conflict = %from, "Adding reverse conflict");
            target.conflicts.push(from);
        }
    }
}
