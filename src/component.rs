//! The custom-component abstraction.
//!
//! A [`Component`] supplies the render step; the engine wraps each one in an
//! [`Instance`] that owns its props, children, state, last rendered vdom and
//! mounted region. State is exclusively owned per instance; the only way to
//! change it is [`Scope::set_state`], which deep-merges a patch and triggers a
//! reconciliation pass.

use crate::host::{HostDocument, Region};
use crate::node::{Node, PropValue};
use crate::{diff, state};
use core::cell::{Cell, RefCell};
use core::fmt::{self, Debug, Formatter};
use hashbrown::HashMap;
use serde_json::Value;
use std::rc::Rc;
use tracing::{instrument, warn};

/// User-defined render logic.
///
/// `render` must be pure with respect to the current props and state reachable
/// through `scope`; it is re-invoked on every update pass and returns a fresh
/// tree each time.
pub trait Component {
	fn render(&self, scope: &Scope) -> Node;
}

/// Bookkeeping for one mounted (or yet-to-be-mounted) custom component.
pub struct Instance {
	component: Box<dyn Component>,
	props: RefCell<HashMap<String, PropValue>>,
	children: RefCell<Vec<Node>>,
	state: RefCell<Value>,
	region: Cell<Option<Region>>,
	rendered: RefCell<Option<Node>>,
	host: RefCell<Option<Rc<dyn HostDocument>>>,
}

impl Instance {
	pub(crate) fn new(component: Box<dyn Component>) -> Rc<Self> {
		Rc::new(Self {
			component,
			props: RefCell::new(HashMap::new()),
			children: RefCell::new(Vec::new()),
			state: RefCell::new(Value::Null),
			region: Cell::new(None),
			rendered: RefCell::new(None),
			host: RefCell::new(None),
		})
	}

	/// Resolves the render step recursively until a concrete element/text
	/// graph is obtained.
	#[must_use]
	pub fn vdom(this: &Rc<Self>) -> Node {
		this.component.render(&Scope { instance: this.clone() }).vdom()
	}

	/// Binds the component to `region` and materializes its vdom there.
	#[instrument(skip(this, host))]
	pub fn mount(this: &Rc<Self>, host: &Rc<dyn HostDocument>, region: Region) {
		*this.host.borrow_mut() = Some(host.clone());
		let vdom = Self::vdom(this);
		vdom.mount(host, region);
		// The mount collapsed the region around the produced host node.
		this.region.set(vdom.region());
		*this.rendered.borrow_mut() = Some(vdom);
	}

	/// Recomputes the vdom and reconciles it against the previously mounted
	/// one, patching the host tree in place where structurally compatible.
	#[instrument(skip(this))]
	pub fn update(this: &Rc<Self>) {
		let host = this.host.borrow().clone();
		let host = match host {
			Some(host) => host,
			None => return warn!("`update` on a component that was never mounted. Skipping."),
		};
		let previous = this.rendered.borrow().clone();
		let previous = match previous {
			Some(previous) => previous,
			None => return warn!("`update` before the first render pass completed. Skipping."),
		};

		let fresh = Self::vdom(this);
		diff::update(&host, &previous, &fresh);
		*this.rendered.borrow_mut() = Some(fresh);
	}

	/// Merges `patch` into the component state (see [`state::apply`]) and
	/// triggers an immediate, synchronous [`update`](Self::update).
	pub fn set_state(this: &Rc<Self>, patch: Value) {
		{
			let mut state = this.state.borrow_mut();
			state::apply(&mut state, patch);
		}
		Self::update(this);
	}

	pub(crate) fn set_attribute(&self, name: &str, value: PropValue) {
		self.props.borrow_mut().insert(name.to_owned(), value);
	}

	pub(crate) fn append_child(&self, child: Node) {
		self.children.borrow_mut().push(child)
	}

	pub(crate) fn region(&self) -> Option<Region> {
		self.region.get()
	}

	pub(crate) fn set_region(&self, region: Region) {
		self.region.set(Some(region))
	}
}

impl Debug for Instance {
	fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
		f.debug_struct("Instance").field("state", &self.state.borrow()).finish_non_exhaustive()
	}
}

/// The render context handed to [`Component::render`].
///
/// Cloning a `Scope` into an event handler is how components close the loop:
/// the handler calls [`set_state`](Self::set_state) later, outside the render
/// pass that created it.
#[derive(Clone)]
pub struct Scope {
	instance: Rc<Instance>,
}

impl Scope {
	/// A snapshot of the component's current state.
	#[must_use]
	pub fn state(&self) -> Value {
		self.instance.state.borrow().clone()
	}

	#[must_use]
	pub fn prop(&self, name: &str) -> Option<PropValue> {
		self.instance.props.borrow().get(name).cloned()
	}

	#[must_use]
	pub fn children(&self) -> Vec<Node> {
		self.instance.children.borrow().clone()
	}

	/// Deep-merges `patch` into the component state and synchronously
	/// reconciles the host tree. Keys absent from `patch` are never touched;
	/// if no mapping state exists yet, `patch` replaces the state wholesale.
	pub fn set_state(&self, patch: Value) {
		Instance::set_state(&self.instance, patch)
	}
}

impl Debug for Scope {
	fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
		f.debug_struct("Scope").field("instance", &self.instance).finish()
	}
}
