use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Vertical line annotation pinned to an x-axis value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineAnnotation {
    pub id: String,
    /// Epoch milliseconds on the time axis.
    pub value: f64,
    pub label_content: String,
}

impl LineAnnotation {
    #[must_use]
    pub fn new(id: impl Into<String>, value: f64, label_content: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            value,
            label_content: label_content.into(),
        }
    }
}

/// Annotation collection keyed by id, in insertion order.
///
/// Ids are unique: inserting an existing id replaces the entry in place.
/// Adapters that exchange annotations as a plain list go through
/// [`AnnotationStore::from_sequence`] and [`AnnotationStore::to_sequence`].
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AnnotationStore {
    entries: IndexMap<String, LineAnnotation>,
}

impl AnnotationStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Ingests a list-shaped collection. A repeated id keeps its first
    /// position and its last content.
    #[must_use]
    pub fn from_sequence(annotations: impl IntoIterator<Item = LineAnnotation>) -> Self {
        let mut store = Self::new();
        for annotation in annotations {
            store.upsert(annotation);
        }
        store
    }

    #[must_use]
    pub fn to_sequence(&self) -> Vec<LineAnnotation> {
        self.entries.values().cloned().collect()
    }

    #[must_use]
    pub fn get(&self, id: &str) -> Option<&LineAnnotation> {
        self.entries.get(id)
    }

    #[must_use]
    pub fn get_mut(&mut self, id: &str) -> Option<&mut LineAnnotation> {
        self.entries.get_mut(id)
    }

    /// Inserts or replaces by id. Returns `true` when the stored content changed.
    pub fn upsert(&mut self, annotation: LineAnnotation) -> bool {
        match self.entries.get_mut(&annotation.id) {
            Some(existing) if *existing == annotation => false,
            Some(existing) => {
                *existing = annotation;
                true
            }
            None => {
                self.entries.insert(annotation.id.clone(), annotation);
                true
            }
        }
    }

    pub fn remove(&mut self, id: &str) -> Option<LineAnnotation> {
        self.entries.shift_remove(id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &LineAnnotation> {
        self.entries.values()
    }
}

#[cfg(test)]
mod tests {
    use super::{AnnotationStore, LineAnnotation};

    #[test]
    fn upsert_replaces_in_place() {
        let mut store = AnnotationStore::new();
        assert!(store.upsert(LineAnnotation::new("a", 1.0, "one")));
        assert!(store.upsert(LineAnnotation::new("b", 2.0, "two")));
        assert!(store.upsert(LineAnnotation::new("a", 3.0, "three")));
        assert!(!store.upsert(LineAnnotation::new("a", 3.0, "three")));

        let ids: Vec<&str> = store.iter().map(|a| a.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b"]);
        assert_eq!(store.get("a").map(|a| a.value), Some(3.0));
    }

    #[test]
    fn sequence_with_duplicate_ids_collapses() {
        let store = AnnotationStore::from_sequence(vec![
            LineAnnotation::new("x", 1.0, ""),
            LineAnnotation::new("y", 2.0, ""),
            LineAnnotation::new("x", 5.0, "late"),
        ]);
        let sequence = store.to_sequence();
        assert_eq!(sequence.len(), 2);
        assert_eq!(sequence[0], LineAnnotation::new("x", 5.0, "late"));
    }

    #[test]
    fn store_serializes_as_mapping() {
        let store = AnnotationStore::from_sequence(vec![LineAnnotation::new("x", 1.0, "l")]);
        let json = serde_json::to_value(&store).expect("json");
        assert_eq!(json["x"]["value"], 1.0);
    }
}
