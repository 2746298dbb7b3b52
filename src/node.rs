//! The virtual-node data model.
//!
//! [`Node`] is a cheaply clonable handle over one of a closed set of variants:
//! a host element, raw text, or a custom [`Component`](crate::component::Component)
//! instance. Resolving a tree through [`Node::vdom`] eliminates the custom
//! variant, leaving the element/text graph the reconciler diffs. A render pass
//! always produces an entirely new graph; the memoized child resolution on
//! [`ElementNode`] is therefore scoped to a single pass by construction.

use crate::component::Instance;
use crate::host::{Event, HostDocument, Listener, NodeId, Region};
use core::cell::{Cell, Ref, RefCell};
use hashbrown::HashMap;
use std::rc::Rc;
use tracing::{instrument, trace_span, warn};

/// A prop recorded on a node during tree construction.
///
/// Handler values are never compared by the reconciler; see
/// [`diff::is_same_node`](crate::diff::is_same_node).
#[derive(Clone, Debug)]
pub enum PropValue {
	Text(String),
	Handler(Listener),
}

impl PropValue {
	/// Wraps a closure as a handler prop.
	pub fn handler(handler: impl Fn(&Event) + 'static) -> Self {
		PropValue::Handler(Listener::new(handler))
	}
}

impl From<&str> for PropValue {
	fn from(text: &str) -> Self {
		PropValue::Text(text.to_owned())
	}
}

impl From<String> for PropValue {
	fn from(text: String) -> Self {
		PropValue::Text(text)
	}
}

impl From<Listener> for PropValue {
	fn from(listener: Listener) -> Self {
		PropValue::Handler(listener)
	}
}

/// A node in a declarative tree, before or after vdom resolution.
#[derive(Clone, Debug)]
pub enum Node {
	Element(Rc<ElementNode>),
	Text(Rc<TextNode>),
	Custom(Rc<Instance>),
}

impl Node {
	#[must_use]
	pub fn element(tag: impl Into<String>) -> Self {
		Node::Element(Rc::new(ElementNode::new(tag.into())))
	}

	#[must_use]
	pub fn text(content: impl Into<String>) -> Self {
		Node::Text(Rc::new(TextNode::new(content.into())))
	}

	/// Resolves this node to its element/text representation.
	///
	/// Elements and texts are their own vdom (a fixed point); custom
	/// components render, recursively, until a concrete node is obtained.
	#[must_use]
	pub fn vdom(&self) -> Node {
		match self {
			Node::Element(element) => {
				element.vchildren();
				self.clone()
			}
			Node::Text(_) => self.clone(),
			Node::Custom(instance) => Instance::vdom(instance),
		}
	}

	/// Materializes this node into `region`, replacing the region's contents.
	pub fn mount(&self, host: &Rc<dyn HostDocument>, region: Region) {
		match self {
			Node::Element(element) => element.mount(host, region),
			Node::Text(text) => text.mount(host.as_ref(), region),
			Node::Custom(instance) => Instance::mount(instance, host, region),
		}
	}

	/// Recomputes this component's vdom and patches the host tree with a
	/// minimal diff. Meaningful on custom components only.
	pub fn update(&self) {
		match self {
			Node::Custom(instance) => Instance::update(instance),
			Node::Element(_) | Node::Text(_) => warn!("`update` called on a node that is not a custom component. Ignoring."),
		}
	}

	/// Merges `patch` into this component's state and triggers [`update`](Self::update).
	/// Meaningful on custom components only.
	pub fn set_state(&self, patch: serde_json::Value) {
		match self {
			Node::Custom(instance) => Instance::set_state(instance, patch),
			Node::Element(_) | Node::Text(_) => warn!("`set_state` called on a node that is not a custom component. Ignoring."),
		}
	}

	/// Records a prop. Construction-time only.
	pub fn set_attribute(&self, name: &str, value: PropValue) {
		match self {
			Node::Element(element) => {
				element.props.borrow_mut().insert(name.to_owned(), value);
			}
			Node::Custom(instance) => instance.set_attribute(name, value),
			Node::Text(_) => warn!("Ignoring attribute {:?} on a text node.", name),
		}
	}

	/// Appends to the ordered child sequence. Construction-time only.
	pub fn append_child(&self, child: Node) {
		match self {
			Node::Element(element) => element.children.borrow_mut().push(child),
			Node::Custom(instance) => instance.append_child(child),
			Node::Text(_) => warn!("Ignoring child appended to a text node."),
		}
	}

	/// The host region this node currently owns, if mounted.
	#[must_use]
	pub fn region(&self) -> Option<Region> {
		match self {
			Node::Element(element) => element.region.get(),
			Node::Text(text) => text.region.get(),
			Node::Custom(instance) => instance.region(),
		}
	}

	pub(crate) fn set_region(&self, region: Region) {
		match self {
			Node::Element(element) => element.region.set(Some(region)),
			Node::Text(text) => text.region.set(Some(region)),
			Node::Custom(instance) => instance.set_region(region),
		}
	}
}

/// A host-tree element: a tag, a prop mapping and an ordered child list.
#[derive(Debug)]
pub struct ElementNode {
	tag: String,
	props: RefCell<HashMap<String, PropValue>>,
	children: RefCell<Vec<Node>>,
	vchildren: RefCell<Option<Vec<Node>>>,
	region: Cell<Option<Region>>,
}

impl ElementNode {
	#[must_use]
	pub fn new(tag: String) -> Self {
		Self {
			tag,
			props: RefCell::new(HashMap::new()),
			children: RefCell::new(Vec::new()),
			vchildren: RefCell::new(None),
			region: Cell::new(None),
		}
	}

	#[must_use]
	pub fn tag(&self) -> &str {
		&self.tag
	}

	#[must_use]
	pub fn props(&self) -> Ref<'_, HashMap<String, PropValue>> {
		self.props.borrow()
	}

	/// The ordered vdom of each child, resolved at most once for this node.
	///
	/// A new render pass builds a new node graph, so this memo never spans
	/// passes; it only bridges the mount and patch steps of the same pass.
	pub fn vchildren(&self) -> Vec<Node> {
		let mut memo = self.vchildren.borrow_mut();
		memo.get_or_insert_with(|| self.children.borrow().iter().map(Node::vdom).collect()).clone()
	}

	#[instrument(skip(self, host), fields(tag = %self.tag))]
	fn mount(&self, host: &Rc<dyn HostDocument>, region: Region) {
		let element = host.create_element(&self.tag);

		for (name, value) in self.props.borrow().iter() {
			apply_prop(host.as_ref(), element, name, value);
		}

		for child in &self.vchildren() {
			let child_region = Region::at_end(host.as_ref(), element);
			child.mount(host, child_region);
		}

		self.region.set(Some(region.replace_with(host.as_ref(), element)));
	}
}

/// Raw text content. Immutable after construction; a content change always
/// produces a new node.
#[derive(Debug)]
pub struct TextNode {
	content: String,
	region: Cell<Option<Region>>,
}

impl TextNode {
	#[must_use]
	pub fn new(content: String) -> Self {
		Self {
			content,
			region: Cell::new(None),
		}
	}

	#[must_use]
	pub fn content(&self) -> &str {
		&self.content
	}

	fn mount(&self, host: &dyn HostDocument, region: Region) {
		let span = trace_span!("Mounting text", content = %self.content);
		let _enter = span.enter();
		let text = host.create_text(&self.content);
		self.region.set(Some(region.replace_with(host, text)));
	}
}

fn apply_prop(host: &dyn HostDocument, element: NodeId, name: &str, value: &PropValue) {
	if let Some(event) = listener_event_name(name) {
		match value {
			PropValue::Handler(listener) => host.add_event_listener(element, &event, listener.clone()),
			PropValue::Text(_) => warn!("Listener-named prop {:?} carries no handler. Skipping.", name),
		}
	} else {
		let text = match value {
			PropValue::Text(text) => text,
			PropValue::Handler(_) => return warn!("Handler value under non-listener prop {:?}. Skipping.", name),
		};
		if name == "className" {
			host.set_attribute(element, "class", text)
		} else {
			host.set_attribute(element, name, text)
		}
	}
}

/// `on` followed by a non-empty event name marks a listener prop;
/// `onClick` registers for `click`.
fn listener_event_name(name: &str) -> Option<String> {
	match name.strip_prefix("on") {
		Some(event) if !event.is_empty() => Some(event.to_ascii_lowercase()),
		_ => None,
	}
}
