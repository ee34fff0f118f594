//! The update description produced by a tracker.
//!
//! An `UpdateDescription` pairs the accumulated field assignments with the
//! accumulated field removals, in the conventional partial-update shape
//! expected by a "patch a stored record" operation: a `$set` clause and a
//! `$unset` clause, each omitted from the serialized form when empty.

use crate::tracker::Document;
use serde::{Deserialize, Serialize};
use serde_json::Map;

/// The field assignments and removals accumulated by a tracker.
///
/// Both clauses are owned snapshots; mutating the tracker after taking an
/// `UpdateDescription` does not affect it.
///
/// # Examples
///
/// ```
/// use docdelta::{ChangeTracker, Document};
/// use serde_json::json;
///
/// let doc: Document = json!({"_id": "a1", "label": "Warp"})
///     .as_object()
///     .cloned()
///     .unwrap();
///
/// let mut tracker = ChangeTracker::new(doc);
/// tracker.update("label", json!("Ninja Tune"));
///
/// let update = tracker.update_description();
/// assert_eq!(update.set_clause().unwrap()["label"], json!("Ninja Tune"));
/// assert!(update.unset_clause().is_none());
/// ```
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct UpdateDescription {
    #[serde(rename = "$set", default, skip_serializing_if = "Map::is_empty")]
    sets: Document,
    #[serde(rename = "$unset", default, skip_serializing_if = "Map::is_empty")]
    unsets: Document,
}

impl UpdateDescription {
    /// Create an empty update description.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an update description from assignment and removal mappings.
    #[inline]
    pub fn from_parts(sets: Document, unsets: Document) -> Self {
        Self { sets, unsets }
    }

    /// The assignment clause, or `None` when no field must be written.
    ///
    /// Callers building a partial-update request must omit the clause rather
    /// than send an empty one.
    #[inline]
    pub fn set_clause(&self) -> Option<&Document> {
        if self.sets.is_empty() {
            None
        } else {
            Some(&self.sets)
        }
    }

    /// The removal clause, or `None` when no field must be deleted.
    #[inline]
    pub fn unset_clause(&self) -> Option<&Document> {
        if self.unsets.is_empty() {
            None
        } else {
            Some(&self.unsets)
        }
    }

    /// Check if this update describes no change at all.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.sets.is_empty() && self.unsets.is_empty()
    }

    /// Number of fields affected by this update.
    #[inline]
    pub fn len(&self) -> usize {
        self.sets.len() + self.unsets.len()
    }

    /// Consume this description and return the (assignments, removals) pair.
    #[inline]
    pub fn into_parts(self) -> (Document, Document) {
        (self.sets, self.unsets)
    }

    /// Apply this update to a document, returning the patched copy.
    ///
    /// This is a pure function that never mutates its input: assignments are
    /// written first, then removed fields are deleted. Applying the update
    /// a tracker produced to the document the tracker started from yields
    /// the tracker's current document.
    pub fn apply_to(&self, doc: &Document) -> Document {
        let mut patched = doc.clone();
        for (field, value) in &self.sets {
            patched.insert(field.clone(), value.clone());
        }
        for field in self.unsets.keys() {
            patched.remove(field);
        }
        patched
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    fn doc(value: Value) -> Document {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn test_empty_description() {
        let update = UpdateDescription::new();
        assert!(update.is_empty());
        assert_eq!(update.len(), 0);
        assert!(update.set_clause().is_none());
        assert!(update.unset_clause().is_none());
    }

    #[test]
    fn test_clauses_present_when_non_empty() {
        let update = UpdateDescription::from_parts(
            doc(json!({"label": "Ninja Tune"})),
            doc(json!({"loc": ""})),
        );
        assert_eq!(update.len(), 2);
        assert_eq!(
            update.set_clause().unwrap()["label"],
            json!("Ninja Tune")
        );
        assert_eq!(update.unset_clause().unwrap()["loc"], json!(""));
    }

    #[test]
    fn test_serialize_omits_empty_clauses() {
        let update = UpdateDescription::from_parts(doc(json!({"a": 1})), Document::new());
        let wire = serde_json::to_value(&update).unwrap();
        assert_eq!(wire, json!({"$set": {"a": 1}}));

        let update = UpdateDescription::from_parts(Document::new(), doc(json!({"b": ""})));
        let wire = serde_json::to_value(&update).unwrap();
        assert_eq!(wire, json!({"$unset": {"b": ""}}));

        let wire = serde_json::to_value(UpdateDescription::new()).unwrap();
        assert_eq!(wire, json!({}));
    }

    #[test]
    fn test_deserialize_missing_clauses_default_empty() {
        let update: UpdateDescription = serde_json::from_value(json!({})).unwrap();
        assert!(update.is_empty());

        let update: UpdateDescription =
            serde_json::from_value(json!({"$set": {"x": 1}})).unwrap();
        assert_eq!(update.set_clause().unwrap()["x"], json!(1));
        assert!(update.unset_clause().is_none());
    }

    #[test]
    fn test_apply_to_writes_then_deletes() {
        let original = doc(json!({"_id": "a1", "name": "Aphex Twin", "label": "Warp"}));
        let update = UpdateDescription::from_parts(
            doc(json!({"label": "Ninja Tune", "loc": "London"})),
            doc(json!({"name": ""})),
        );

        let patched = update.apply_to(&original);
        assert_eq!(patched["label"], json!("Ninja Tune"));
        assert_eq!(patched["loc"], json!("London"));
        assert!(!patched.contains_key("name"));
        // Input untouched.
        assert_eq!(original["label"], json!("Warp"));
        assert!(original.contains_key("name"));
    }

    #[test]
    fn test_apply_empty_is_identity() {
        let original = doc(json!({"_id": "a1", "x": 1}));
        let patched = UpdateDescription::new().apply_to(&original);
        assert_eq!(patched, original);
    }

    #[test]
    fn test_into_parts() {
        let update = UpdateDescription::from_parts(doc(json!({"a": 1})), doc(json!({"b": ""})));
        let (sets, unsets) = update.into_parts();
        assert_eq!(sets["a"], json!(1));
        assert_eq!(unsets["b"], json!(""));
    }
}
