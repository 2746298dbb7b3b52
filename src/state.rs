//! The deep-merge state model.
//!
//! State is a free-form [`serde_json::Value`]. A patch only ever touches the
//! keys it names: nested mappings are merged recursively, anything else is
//! overwritten in place. When no mapping state exists yet, the patch replaces
//! the state wholesale.

use serde_json::Value;
use tracing::trace;

/// Applies `patch` to `state` with the merge semantics above.
pub fn apply(state: &mut Value, patch: Value) {
	if !state.is_object() {
		trace!("No mapping state yet; replacing wholesale.");
		*state = patch;
		return;
	}
	if !patch.is_object() {
		// A non-mapping patch has no keys to merge into mapping state.
		trace!("Non-mapping patch for mapping state; nothing to merge.");
		return;
	}
	merge(state, patch)
}

fn merge(state: &mut Value, patch: Value) {
	let entries = match patch {
		Value::Object(entries) => entries,
		_ => return,
	};
	let existing = match state {
		Value::Object(existing) => existing,
		_ => return,
	};
	for (key, value) in entries {
		match existing.get_mut(&key) {
			Some(nested) if nested.is_object() => merge(nested, value),
			Some(other) => *other = value,
			None => {
				existing.insert(key, value);
			}
		}
	}
}
