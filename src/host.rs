//! The boundary to the host document.
//!
//! The engine never owns a document tree. It consumes the [`HostDocument`]
//! capability to create nodes and to splice child lists, and it keeps track of
//! where its output lives through [`Region`] values. A [`Region`] is a span of
//! a container's child list, not a pointer into host internals, so host nodes
//! can be replaced mid-patch without leaving anything dangling.

use core::fmt::{self, Debug, Formatter};
use std::rc::Rc;

/// Identifier for a node in the host document.
///
/// A small, copyable handle minted by the [`HostDocument`] implementation.
/// The engine treats it as fully opaque and never derives one from another.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

impl NodeId {
	#[must_use]
	pub const fn new(index: usize) -> Self {
		Self(index)
	}

	#[must_use]
	pub const fn index(self) -> usize {
		self.0
	}
}

/// An event delivered to a registered [`Listener`].
#[derive(Clone, Debug)]
pub struct Event {
	name: String,
}

impl Event {
	#[must_use]
	pub fn new(name: impl Into<String>) -> Self {
		Self { name: name.into() }
	}

	#[must_use]
	pub fn name(&self) -> &str {
		&self.name
	}
}

/// A shared event handler.
///
/// Listeners are recreated on every render pass, which is why the reconciler
/// never compares them (see [`diff::is_same_node`](crate::diff::is_same_node)).
#[derive(Clone)]
pub struct Listener(Rc<dyn Fn(&Event)>);

impl Listener {
	pub fn new(handler: impl Fn(&Event) + 'static) -> Self {
		Self(Rc::new(handler))
	}

	pub fn call(&self, event: &Event) {
		(self.0)(event)
	}
}

impl Debug for Listener {
	fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
		f.write_str("Listener")
	}
}

/// The capability the engine requires of a host document.
///
/// Implemented externally (or by [`memory::MemoryDocument`](crate::memory::MemoryDocument)
/// for headless use). All methods take `&self`; implementations are expected to
/// use interior mutability, matching the engine's single-threaded synchronous
/// execution model. The engine is the sole writer for the duration of a
/// `mount`/`update` call and never reads host structure beyond [`child_count`](Self::child_count).
pub trait HostDocument {
	/// Creates a detached element node.
	fn create_element(&self, tag: &str) -> NodeId;

	/// Creates a detached text node.
	fn create_text(&self, content: &str) -> NodeId;

	fn set_attribute(&self, node: NodeId, name: &str, value: &str);

	fn add_event_listener(&self, node: NodeId, event: &str, listener: Listener);

	fn child_count(&self, node: NodeId) -> usize;

	/// Inserts `child` into `parent`'s child list at `index`, shifting later
	/// children up by one.
	fn insert_child(&self, parent: NodeId, index: usize, child: NodeId);

	/// Removes `parent`'s children in the index range `start..end`.
	/// An empty range is a no-op.
	fn remove_children(&self, parent: NodeId, start: usize, end: usize);
}

/// A contiguous span of a container's child list.
///
/// Regions are plain values. Mutating operations consume the region and return
/// the adjusted one; whoever holds a region is responsible for storing the
/// result back.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Region {
	container: NodeId,
	start: usize,
	end: usize,
}

impl Region {
	/// A region spanning the container's full current content.
	#[must_use]
	pub fn spanning_children(host: &dyn HostDocument, container: NodeId) -> Self {
		Self {
			container,
			start: 0,
			end: host.child_count(container),
		}
	}

	/// A zero-width region positioned at the end of the container's current
	/// content.
	#[must_use]
	pub fn at_end(host: &dyn HostDocument, container: NodeId) -> Self {
		let end = host.child_count(container);
		Self { container, start: end, end }
	}

	/// A zero-width region positioned immediately after this one.
	#[must_use]
	pub fn after(self) -> Self {
		Self {
			container: self.container,
			start: self.end,
			end: self.end,
		}
	}

	/// Deletes the region's contents and collapses it.
	#[must_use]
	pub fn clear(self, host: &dyn HostDocument) -> Self {
		host.remove_children(self.container, self.start, self.end);
		Self {
			container: self.container,
			start: self.start,
			end: self.start,
		}
	}

	/// Replaces the region's contents with `node` and collapses the region to
	/// exactly wrap it: the node is inserted at the span's start, the prior
	/// contents (now shifted one past it) are deleted, and the returned region
	/// covers the node alone.
	#[must_use]
	pub fn replace_with(self, host: &dyn HostDocument, node: NodeId) -> Self {
		host.insert_child(self.container, self.start, node);
		host.remove_children(self.container, self.start + 1, self.end + 1);
		Self {
			container: self.container,
			start: self.start,
			end: self.start + 1,
		}
	}

	#[must_use]
	pub fn container(self) -> NodeId {
		self.container
	}
}
