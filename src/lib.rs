//! Field-level change tracking for single JSON documents.
//!
//! `docdelta` wraps one document and folds a sequence of interactive field
//! edits — add, update, remove, rename — into the smallest correct partial
//! update: an assignment clause of fields to write and a removal clause of
//! fields to delete, plus the lookup key addressing the persisted copy.
//!
//! # Core Concepts
//!
//! - **ChangeTracker**: owns the document being edited and the pending
//!   assignment/removal mappings, collapsing redundant operations as they
//!   happen
//! - **UpdateDescription**: owned snapshot of the pending changes in the
//!   conventional `$set`/`$unset` shape, empty clauses omitted
//! - **TrackMode**: construction flag selecting in-place editing or editing
//!   an internal clone with the pristine original kept readable
//! - **Document**: alias for `serde_json::Map<String, Value>`
//!
//! # Cancellation Rules
//!
//! Operations collapse incrementally rather than at read time:
//!
//! - a field added and then removed in the same session leaves no trace;
//! - updating a field to the value it already holds records nothing;
//! - a rename collapses into a remove/add pair with destination-name
//!   collision validation;
//! - an assignment supersedes a pending removal of the same field, so a
//!   field never appears in both clauses.
//!
//! # Quick Start
//!
//! ```
//! use docdelta::{ChangeTracker, Document};
//! use serde_json::json;
//!
//! let doc: Document = json!({"_id": "a1", "name": "Aphex Twin", "label": "Warp"})
//!     .as_object()
//!     .cloned()
//!     .unwrap();
//!
//! let mut tracker = ChangeTracker::new(doc);
//! tracker.add("loc", json!("London"))?;
//! tracker.update("label", json!("Ninja Tune"));
//! tracker.remove("loc"); // session-added, cancels outright
//!
//! let update = tracker.update_description();
//! assert_eq!(update.set_clause().unwrap()["label"], json!("Ninja Tune"));
//! assert!(update.unset_clause().is_none());
//!
//! // The two arguments of a "patch a stored record by key" operation:
//! let key = tracker.lookup_key();
//! assert_eq!(key["_id"], json!("a1"));
//! # Ok::<(), docdelta::TrackerError>(())
//! ```

mod error;
mod tracker;
mod update;

pub use error::{TrackerError, TrackerResult};
pub use tracker::{is_placeholder_name, ChangeTracker, Document, TrackMode, DEFAULT_ID_FIELD};
pub use update::UpdateDescription;

// Re-export serde_json::Value for convenience
pub use serde_json::Value;
