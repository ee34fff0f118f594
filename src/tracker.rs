//! Field-level change tracking for a single document.
//!
//! `ChangeTracker` wraps one document and folds a sequence of field edits
//! into the smallest correct update description as the edits happen, rather
//! than diffing at read time. Redundant and canceling operations collapse
//! immediately: a field added and then removed in the same session leaves no
//! trace, and an update to the value a field already holds records nothing.

use serde_json::{Map, Value};
use tracing::debug;

use crate::error::{TrackerError, TrackerResult};
use crate::update::UpdateDescription;

/// An open-ended mapping from field name to JSON value.
pub type Document = Map<String, Value>;

/// Name of the identifier field used to build the lookup key.
pub const DEFAULT_ID_FIELD: &str = "_id";

/// Returns true if `name` is the reserved placeholder for a field whose
/// final name has not been chosen yet.
///
/// Editing surfaces represent an as-yet-unnamed field with the empty string.
/// A placeholder field lives only in the working copy and never contributes
/// to the update description; `rename` gives it a real name once the user
/// settles on one.
#[inline]
pub fn is_placeholder_name(name: &str) -> bool {
    name.is_empty()
}

/// How a tracker holds the document being edited.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TrackMode {
    /// The tracker owns and mutates its single copy; the pristine original
    /// is not retained.
    #[default]
    InPlace,
    /// Edits apply to an internal clone while the pristine original stays
    /// readable for the tracker's lifetime, so a caller can offer a
    /// cancel/revert action without re-fetching the document.
    KeepOriginal,
}

/// Tracks field-level modifications to a single document.
///
/// Every accepted operation updates the current document and the pending
/// assignment/removal mappings together, so `update_description` is a cheap
/// snapshot at any point. The tracker has no notion of "committed": once the
/// produced update has been applied by the persistence layer, discard the
/// tracker and construct a new one for further edits.
///
/// Operations must not run concurrently on one tracker; there is no internal
/// locking. Callers sharing a tracker across threads serialize externally.
///
/// # Examples
///
/// ```
/// use docdelta::{ChangeTracker, Document};
/// use serde_json::json;
///
/// let doc: Document = json!({"_id": "a1", "name": "Aphex Twin", "label": "Warp"})
///     .as_object()
///     .cloned()
///     .unwrap();
///
/// let mut tracker = ChangeTracker::new(doc);
/// tracker.add("loc", json!("London")).unwrap();
/// tracker.update("label", json!("Ninja Tune"));
/// tracker.remove("loc");
///
/// let update = tracker.update_description();
/// assert_eq!(update.set_clause().unwrap()["label"], json!("Ninja Tune"));
/// assert!(update.unset_clause().is_none());
/// assert_eq!(tracker.lookup_key()["_id"], json!("a1"));
/// ```
#[derive(Debug)]
pub struct ChangeTracker {
    original: Option<Document>,
    current: Document,
    sets: Document,
    unsets: Document,
    id_field: String,
}

impl ChangeTracker {
    /// Create a tracker that edits the given document in place.
    pub fn new(doc: Document) -> Self {
        Self::with_mode(doc, TrackMode::InPlace)
    }

    /// Create a tracker with an explicit edit mode.
    ///
    /// `TrackMode::KeepOriginal` retains a pristine copy of `doc`, readable
    /// via [`original`](Self::original) while edits accumulate on the clone.
    pub fn with_mode(doc: Document, mode: TrackMode) -> Self {
        let original = match mode {
            TrackMode::InPlace => None,
            TrackMode::KeepOriginal => Some(doc.clone()),
        };
        Self {
            original,
            current: doc,
            sets: Document::new(),
            unsets: Document::new(),
            id_field: DEFAULT_ID_FIELD.to_owned(),
        }
    }

    /// Use a different identifier field for the lookup key.
    #[must_use]
    pub fn with_id_field(mut self, field: impl Into<String>) -> Self {
        self.id_field = field.into();
        self
    }

    /// Add a new field.
    ///
    /// Fails with [`TrackerError::DuplicateField`] if the name is already a
    /// key of the current document, leaving all state untouched. Adding the
    /// placeholder name updates only the working copy.
    pub fn add(&mut self, field: impl Into<String>, value: impl Into<Value>) -> TrackerResult<()> {
        let field = field.into();
        self.ensure_vacant(&field)?;
        self.set_field(field, value.into());
        Ok(())
    }

    /// Update a field to a new value.
    ///
    /// The field may come from the original document or a prior `add`; a
    /// missing field is introduced fresh. Setting a field to the value it
    /// already holds records nothing.
    pub fn update(&mut self, field: impl Into<String>, value: impl Into<Value>) {
        let field = field.into();
        let value = value.into();
        if self.current.get(&field) == Some(&value) {
            return;
        }
        self.set_field(field, value);
    }

    /// Remove a field.
    ///
    /// A field that only ever existed in this session cancels outright; a
    /// field from the original document is recorded for deletion. Removing a
    /// missing field or the placeholder records nothing.
    pub fn remove(&mut self, field: &str) {
        self.remove_field(field);
    }

    /// Move a field's value to a new name.
    ///
    /// Fails with [`TrackerError::DuplicateField`] if `new` is already a key
    /// of the current document, leaving all state untouched. Otherwise the
    /// transplant is atomic: removal bookkeeping for `old`, then assignment
    /// bookkeeping for `new` with the captured value. A missing `old`
    /// transplants `Value::Null`.
    pub fn rename(&mut self, old: &str, new: impl Into<String>) -> TrackerResult<()> {
        let new = new.into();
        self.ensure_vacant(&new)?;
        let value = self.remove_field(old).unwrap_or(Value::Null);
        self.set_field(new, value);
        Ok(())
    }

    /// Snapshot the pending assignments and removals.
    ///
    /// The snapshot is owned; later edits to the tracker do not affect it.
    /// Empty clauses are surfaced as absent, ready for a partial-update
    /// request.
    pub fn update_description(&self) -> UpdateDescription {
        UpdateDescription::from_parts(self.sets.clone(), self.unsets.clone())
    }

    /// The single-entry mapping addressing the persisted document.
    ///
    /// Contains only the identifier field and its value (`Value::Null` if
    /// the identifier is absent, though it is assumed present).
    pub fn lookup_key(&self) -> Document {
        let id = self
            .current
            .get(&self.id_field)
            .cloned()
            .unwrap_or(Value::Null);
        let mut key = Document::new();
        key.insert(self.id_field.clone(), id);
        key
    }

    /// The current document, with all accepted edits applied.
    pub fn current(&self) -> &Document {
        &self.current
    }

    /// The pristine original document, in [`TrackMode::KeepOriginal`] only.
    pub fn original(&self) -> Option<&Document> {
        self.original.as_ref()
    }

    /// The edit mode this tracker was constructed with.
    pub fn mode(&self) -> TrackMode {
        if self.original.is_some() {
            TrackMode::KeepOriginal
        } else {
            TrackMode::InPlace
        }
    }

    /// The name of the identifier field.
    pub fn id_field(&self) -> &str {
        &self.id_field
    }

    /// Check if any assignment or removal is pending.
    pub fn has_changes(&self) -> bool {
        !self.sets.is_empty() || !self.unsets.is_empty()
    }

    /// Consume the tracker and return the current document.
    pub fn into_current(self) -> Document {
        self.current
    }

    /// Delete `field` from the current document with removal bookkeeping,
    /// returning the prior value so `rename` can transplant it.
    ///
    /// A pending assignment for the field means it was never persisted, so
    /// the removal and the assignment cancel each other; only otherwise is
    /// the field marked for deletion from the persisted copy.
    fn remove_field(&mut self, field: &str) -> Option<Value> {
        let prior = self.current.remove(field);
        if self.sets.remove(field).is_some() {
            debug!(field = %field, "cancelled in-session field");
        } else if !is_placeholder_name(field) {
            self.unsets
                .insert(field.to_owned(), Value::String(String::new()));
            debug!(field = %field, "recorded field removal");
        }
        prior
    }

    /// Write `field` into the current document with assignment bookkeeping.
    ///
    /// The placeholder name updates only the working copy. A real name
    /// supersedes any pending removal, so a field never sits in both
    /// mappings at once.
    fn set_field(&mut self, field: String, value: Value) {
        if !is_placeholder_name(&field) {
            debug!(field = %field, "recorded field assignment");
            self.unsets.remove(&field);
            self.sets.insert(field.clone(), value.clone());
        }
        self.current.insert(field, value);
    }

    /// Validate that `field` is not already a key of the current document.
    fn ensure_vacant(&self, field: &str) -> TrackerResult<()> {
        if self.current.contains_key(field) {
            return Err(TrackerError::duplicate_field(field));
        }
        Ok(())
    }
}
