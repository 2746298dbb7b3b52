//! An in-memory reference implementation of [`HostDocument`].
//!
//! This is not a UI toolkit. It exists so the engine can be driven and
//! inspected headlessly: tests mount into a [`MemoryDocument`], read the
//! resulting tree back out by [`NodeId`], and [`dispatch`](MemoryDocument::dispatch)
//! events at registered listeners. Node identifiers are stable for the
//! lifetime of the document, which is what lets tests assert that a patch
//! reused a host node instead of recreating it.

use crate::host::{Event, HostDocument, Listener, NodeId};
use core::cell::RefCell;
use core::fmt::Write;
use hashbrown::HashMap;
use tracing::warn;

#[derive(Debug)]
enum Kind {
	Element {
		tag: String,
		attributes: HashMap<String, String>,
		listeners: Vec<(String, Listener)>,
	},
	Text(String),
}

#[derive(Debug)]
struct Entry {
	kind: Kind,
	children: Vec<NodeId>,
}

/// A host document backed by an append-only node arena.
#[derive(Debug, Default)]
pub struct MemoryDocument {
	nodes: RefCell<Vec<Entry>>,
}

impl MemoryDocument {
	#[must_use]
	pub fn new() -> Self {
		Self::default()
	}

	fn push(&self, kind: Kind) -> NodeId {
		let mut nodes = self.nodes.borrow_mut();
		nodes.push(Entry { kind, children: Vec::new() });
		NodeId::new(nodes.len() - 1)
	}

	#[must_use]
	pub fn children(&self, node: NodeId) -> Vec<NodeId> {
		match self.nodes.borrow().get(node.index()) {
			Some(entry) => entry.children.clone(),
			None => Vec::new(),
		}
	}

	#[must_use]
	pub fn tag(&self, node: NodeId) -> Option<String> {
		match self.nodes.borrow().get(node.index()) {
			Some(Entry { kind: Kind::Element { tag, .. }, .. }) => Some(tag.clone()),
			_ => None,
		}
	}

	#[must_use]
	pub fn text(&self, node: NodeId) -> Option<String> {
		match self.nodes.borrow().get(node.index()) {
			Some(Entry { kind: Kind::Text(content), .. }) => Some(content.clone()),
			_ => None,
		}
	}

	#[must_use]
	pub fn attribute(&self, node: NodeId, name: &str) -> Option<String> {
		match self.nodes.borrow().get(node.index()) {
			Some(Entry { kind: Kind::Element { attributes, .. }, .. }) => attributes.get(name).cloned(),
			_ => None,
		}
	}

	#[must_use]
	pub fn listener_count(&self, node: NodeId, event: &str) -> usize {
		match self.nodes.borrow().get(node.index()) {
			Some(Entry { kind: Kind::Element { listeners, .. }, .. }) => listeners.iter().filter(|(name, _)| name == event).count(),
			_ => 0,
		}
	}

	/// Invokes every listener registered on `node` for the event's name.
	///
	/// The listener list is snapshotted before any handler runs, so handlers
	/// are free to call back into the document (via `set_state` patching).
	pub fn dispatch(&self, node: NodeId, event: &Event) {
		let listeners: Vec<Listener> = match self.nodes.borrow().get(node.index()) {
			Some(Entry { kind: Kind::Element { listeners, .. }, .. }) => listeners.iter().filter(|(name, _)| name == event.name()).map(|(_, listener)| listener.clone()).collect(),
			Some(_) => return warn!("Dispatching {:?} at a text node. Ignoring.", event.name()),
			None => return warn!("Dispatching {:?} at unknown node {:?}. Ignoring.", event.name(), node),
		};
		for listener in &listeners {
			listener.call(event);
		}
	}

	/// Serializes the subtree under `node` for debugging and assertions.
	/// Attributes print in name order; listeners don't print.
	#[must_use]
	pub fn to_html(&self, node: NodeId) -> String {
		let nodes = self.nodes.borrow();
		let mut out = String::new();
		write_html(&nodes, node, &mut out);
		out
	}
}

fn write_html(nodes: &[Entry], node: NodeId, out: &mut String) {
	let entry = match nodes.get(node.index()) {
		Some(entry) => entry,
		None => return,
	};
	match &entry.kind {
		Kind::Text(content) => out.push_str(content),
		Kind::Element { tag, attributes, .. } => {
			let mut names: Vec<&String> = attributes.keys().collect();
			names.sort();
			let _ = write!(out, "<{}", tag);
			for name in names {
				let _ = write!(out, " {}=\"{}\"", name, attributes[name]);
			}
			out.push('>');
			for child in &entry.children {
				write_html(nodes, *child, out);
			}
			let _ = write!(out, "</{}>", tag);
		}
	}
}

impl HostDocument for MemoryDocument {
	fn create_element(&self, tag: &str) -> NodeId {
		self.push(Kind::Element {
			tag: tag.to_owned(),
			attributes: HashMap::new(),
			listeners: Vec::new(),
		})
	}

	fn create_text(&self, content: &str) -> NodeId {
		self.push(Kind::Text(content.to_owned()))
	}

	fn set_attribute(&self, node: NodeId, name: &str, value: &str) {
		match self.nodes.borrow_mut().get_mut(node.index()) {
			Some(Entry { kind: Kind::Element { attributes, .. }, .. }) => {
				attributes.insert(name.to_owned(), value.to_owned());
			}
			_ => warn!("Attribute {:?} set on a node that is not an element. Ignoring.", name),
		}
	}

	fn add_event_listener(&self, node: NodeId, event: &str, listener: Listener) {
		match self.nodes.borrow_mut().get_mut(node.index()) {
			Some(Entry { kind: Kind::Element { listeners, .. }, .. }) => listeners.push((event.to_owned(), listener)),
			_ => warn!("Listener for {:?} added to a node that is not an element. Ignoring.", event),
		}
	}

	fn child_count(&self, node: NodeId) -> usize {
		match self.nodes.borrow().get(node.index()) {
			Some(entry) => entry.children.len(),
			None => 0,
		}
	}

	fn insert_child(&self, parent: NodeId, index: usize, child: NodeId) {
		match self.nodes.borrow_mut().get_mut(parent.index()) {
			Some(entry) => {
				if index > entry.children.len() {
					warn!("Insertion index {} beyond {} child(ren); appending instead.", index, entry.children.len());
					entry.children.push(child)
				} else {
					entry.children.insert(index, child)
				}
			}
			None => warn!("Insertion into unknown node {:?}. Ignoring.", parent),
		}
	}

	fn remove_children(&self, parent: NodeId, start: usize, end: usize) {
		match self.nodes.borrow_mut().get_mut(parent.index()) {
			Some(entry) => {
				let end = end.min(entry.children.len());
				if start < end {
					entry.children.drain(start..end);
				}
			}
			None => warn!("Removal from unknown node {:?}. Ignoring.", parent),
		}
	}
}
