//! The reconciler.
//!
//! Two vdom graphs are compared node by node. A node that passes
//! [`is_same_node`] keeps its host region and only its children are diffed
//! further; a node that fails is remounted wholesale into the region its
//! predecessor occupied, and no deeper diffing occurs. Children are paired by
//! position, never by identity; surplus new children are mounted into fresh
//! zero-width regions chained after the last previously mounted sibling, and
//! surplus old children are left in the host untouched (a documented
//! limitation of the positional strategy).
//!
//! All equality and tie-break rules live in this module.

use crate::host::HostDocument;
use crate::node::{Node, PropValue};
use std::rc::Rc;
use tracing::{error, instrument, trace_span, warn};

/// The structural-equality test deciding whether `new` can be patched into
/// `old`'s host region in place.
///
/// Nodes are compatible when all of the following hold:
///
/// 1. The type matches: same tag for elements, text for text.
/// 2. Every prop on `new` has an equal value on `old` — unless the new value
///    is a handler. Handlers are recreated on every render pass and are
///    always considered equal, so handler identity never forces a remount.
/// 3. `old` carries no more props than `new`; a strict prop removal is a
///    structural-incompatibility signal, not a patchable change.
/// 4. Text content is identical for text nodes.
#[must_use]
pub fn is_same_node(old: &Node, new: &Node) -> bool {
	match (old, new) {
		(Node::Text(old_text), Node::Text(new_text)) => old_text.content() == new_text.content(),
		(Node::Element(old_element), Node::Element(new_element)) => {
			if old_element.tag() != new_element.tag() {
				return false;
			}
			let old_props = old_element.props();
			let new_props = new_element.props();
			for (name, value) in new_props.iter() {
				let text = match value {
					PropValue::Handler(_) => continue,
					PropValue::Text(text) => text,
				};
				match old_props.get(name) {
					Some(PropValue::Text(old_text)) if old_text == text => {}
					_ => return false,
				}
			}
			old_props.len() <= new_props.len()
		}
		(Node::Custom(_), _) | (_, Node::Custom(_)) => {
			error!("Unresolved component reached the differ. Treating as mismatching.");
			false
		}
		_ => false,
	}
}

/// Recursively patches the host tree from `old`'s shape to `new`'s.
///
/// `old` must be the graph produced by the previous render pass, with its
/// regions populated by the mount/update that materialized it.
#[instrument(skip(host, old, new))]
pub fn update(host: &Rc<dyn HostDocument>, old: &Node, new: &Node) {
	if !is_same_node(old, new) {
		let span = trace_span!("Remounting mismatching node");
		let _enter = span.enter();
		match old.region() {
			Some(region) => new.mount(host, region),
			None => error!("Mismatching node was never mounted; nowhere to remount. Skipping."),
		}
		return;
	}

	// The host position is reused, not recreated.
	match old.region() {
		Some(region) => new.set_region(region),
		None => return error!("Matching node was never mounted; nothing to patch."),
	}

	let (old_element, new_element) = match (old, new) {
		(Node::Element(old_element), Node::Element(new_element)) => (old_element, new_element),
		// Texts that compared equal need no further patching.
		_ => return,
	};

	let new_children = new_element.vchildren();
	if new_children.is_empty() {
		return;
	}
	let old_children = old_element.vchildren();
	if old_children.is_empty() {
		return warn!("No previously mounted children to anchor insertions after. Skipping {} new child(ren).", new_children.len());
	}

	let mut tail = old_children[old_children.len() - 1].region();
	for (index, new_child) in new_children.iter().enumerate() {
		match old_children.get(index) {
			Some(old_child) => update(host, old_child, new_child),
			None => {
				let anchor = match tail {
					Some(anchor) => anchor,
					None => {
						error!("Missing tail region while inserting child {}. Skipping.", index);
						continue;
					}
				};
				let span = trace_span!("Inserting surplus child", index);
				let _enter = span.enter();
				new_child.mount(host, anchor.after());
				tail = new_child.region();
			}
		}
	}

	if old_children.len() > new_children.len() {
		warn!("{} stale host child(ren) left in place after the child list shrank.", old_children.len() - new_children.len());
	}
}
