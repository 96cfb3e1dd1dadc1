use serde::Serialize;

/// Ordered, duplicate-free set of selected feature ids.
///
/// Insertion order is preserved because it is the order the validator scans pairs in.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FeatureSelection {
    ids: Vec<String>,
}

impl FeatureSelection {
    #[must_use]
    pub const fn new() -> Self {
        Self { ids: Vec::new() }
    }

    /// Collects ids, keeping the first occurrence of each.
    pub fn from_ids<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut selection = Self::new();
        for id in ids {
            selection.insert(id);
        }
        selection
    }

    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.ids.iter().any(|s| s == id)
    }

    /// Appends `id` unless it is already selected. Returns whether it was added.
    pub fn insert(&mut self, id: impl Into<String>) -> bool {
        let id = id.into();
        if self.contains(&id) {
            return false;
        }
        self.ids.push(id);
        true
    }

    /// Returns whether `id` was selected.
    pub fn remove(&mut self, id: &str) -> bool {
        let before = self.ids.len();
        self.ids.retain(|s| s != id);
        before != self.ids.len()
    }

    /// Flips membership of `id`; returns `true` when it is selected afterwards.
    pub fn toggle(&mut self, id: &str) -> bool {
        if self.remove(id) {
            false
        } else {
            self.ids.push(id.to_owned());
            true
        }
    }

    #[must_use]
    pub fn ids(&self) -> &[String] {
        &self.ids
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn clear(&mut self) {
        self.ids.clear();
    }
}

impl<S: Into<String>> FromIterator<S> for FeatureSelection {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self::from_ids(iter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duplicates_collapse_to_first_occurrence() {
        let selection = FeatureSelection::from_ids(["b", "a", "b"]);
        assert_eq!(selection.ids(), ["b", "a"]);
    }

    #[test]
    fn toggle_flips_membership() {
        let mut selection = FeatureSelection::new();
        assert!(selection.toggle("mintable"));
        assert!(selection.contains("mintable"));
        assert!(!selection.toggle("mintable"));
        assert!(selection.is_empty());
    }

    #[test]
    fn remove_and_clear() {
        let mut selection: FeatureSelection = ["a", "b", "c"].into_iter().collect();
        assert!(selection.remove("b"));
        assert!(!selection.remove("b"));
        assert_eq!(selection.len(), 2);
        selection.clear();
        assert!(selection.is_empty());
    }
}
