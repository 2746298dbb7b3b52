//! The tree construction facility.
//!
//! This is the entry point a template-syntax transformation targets: every
//! element of the source syntax becomes one [`create_node`] call with a type
//! descriptor, an attribute list and a (possibly nested, possibly sparse)
//! child list. [`render_root`] mounts the finished tree over a host
//! container's full content.

use crate::component::{Component, Instance};
use crate::host::{HostDocument, NodeId, Region};
use crate::node::{Node, PropValue};
use std::rc::Rc;
use tracing::{trace, trace_span};

/// What kind of node to construct: a host element by tag, or a custom
/// component.
pub enum TypeDescriptor {
	Tag(String),
	Custom(Box<dyn Component>),
}

impl TypeDescriptor {
	pub fn component(component: impl Component + 'static) -> Self {
		TypeDescriptor::Custom(Box::new(component))
	}
}

impl From<&str> for TypeDescriptor {
	fn from(tag: &str) -> Self {
		TypeDescriptor::Tag(tag.to_owned())
	}
}

impl From<String> for TypeDescriptor {
	fn from(tag: String) -> Self {
		TypeDescriptor::Tag(tag)
	}
}

/// One entry of a child list, before flattening.
///
/// Lists splice recursively and [`Empty`](Self::Empty) entries are skipped,
/// so conditional and repeated template content can be passed through
/// unchanged. A bare string becomes a text node — including the empty string.
pub enum Child {
	Node(Node),
	Text(String),
	List(Vec<Child>),
	Empty,
}

impl From<Node> for Child {
	fn from(node: Node) -> Self {
		Child::Node(node)
	}
}

impl From<&str> for Child {
	fn from(content: &str) -> Self {
		Child::Text(content.to_owned())
	}
}

impl From<String> for Child {
	fn from(content: String) -> Self {
		Child::Text(content)
	}
}

impl From<Vec<Child>> for Child {
	fn from(children: Vec<Child>) -> Self {
		Child::List(children)
	}
}

impl<T: Into<Child>> From<Option<T>> for Child {
	fn from(child: Option<T>) -> Self {
		match child {
			Some(child) => child.into(),
			None => Child::Empty,
		}
	}
}

/// Constructs an unmounted node tree.
pub fn create_node(descriptor: TypeDescriptor, attributes: Vec<(String, PropValue)>, children: Vec<Child>) -> Node {
	let node = match descriptor {
		TypeDescriptor::Tag(tag) => Node::element(tag),
		TypeDescriptor::Custom(component) => Node::Custom(Instance::new(component)),
	};
	for (name, value) in attributes {
		node.set_attribute(&name, value);
	}
	append_children(&node, children);
	node
}

fn append_children(node: &Node, children: Vec<Child>) {
	for child in children {
		match child {
			Child::Node(child) => node.append_child(child),
			Child::Text(content) => node.append_child(Node::text(content)),
			Child::List(nested) => append_children(node, nested),
			Child::Empty => trace!("Skipping absent child."),
		}
	}
}

/// Mounts `node` over the full content of `container`: the prior content is
/// cleared, then the tree is materialized in its place.
pub fn render_root(node: &Node, host: &Rc<dyn HostDocument>, container: NodeId) {
	let span = trace_span!("Rendering root", ?container);
	let _enter = span.enter();
	let region = Region::spanning_children(host.as_ref(), container).clear(host.as_ref());
	node.mount(host, region);
}
