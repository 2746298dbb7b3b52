use sapling_dom::component::{Component, Scope};
use sapling_dom::create::{create_node, render_root, Child, TypeDescriptor};
use sapling_dom::host::HostDocument;
use sapling_dom::memory::MemoryDocument;
use sapling_dom::node::{Node, PropValue};
use std::rc::Rc;


fn document() -> (Rc<MemoryDocument>, Rc<dyn HostDocument>) {
	logger_::init();
	let document = Rc::new(MemoryDocument::new());
	let host: Rc<dyn HostDocument> = document.clone();
	(document, host)
}

#[test]
fn element_tree() {
	let (document, host) = document();
	let container = document.create_element("body");

	let tree = create_node(
		"div".into(),
		vec![],
		vec![
			Child::from(create_node("span".into(), vec![], vec![Child::from("A")])),
			Child::from(create_node("span".into(), vec![], vec![Child::from("B")])),
		],
	);
	render_root(&tree, &host, container);

	assert_eq!(document.to_html(container), "<body><div><span>A</span><span>B</span></div></body>");
}

#[test]
fn render_root_replaces_prior_content() {
	let (document, host) = document();
	let container = document.create_element("body");
	let stale = document.create_text("stale");
	host.insert_child(container, 0, stale);

	let tree = create_node("p".into(), vec![], vec![Child::from("fresh")]);
	render_root(&tree, &host, container);

	assert_eq!(document.to_html(container), "<body><p>fresh</p></body>");
}

#[test]
fn attributes_and_listeners() {
	let (document, host) = document();
	let container = document.create_element("body");

	let tree = create_node(
		"button".into(),
		vec![
			("id".to_owned(), "go".into()),
			("className".to_owned(), "primary wide".into()),
			("onClick".to_owned(), PropValue::handler(|_| ())),
		],
		vec![Child::from("Go")],
	);
	render_root(&tree, &host, container);

	let button = document.children(container)[0];
	assert_eq!(document.tag(button).as_deref(), Some("button"));
	assert_eq!(document.attribute(button, "id").as_deref(), Some("go"));
	// `className` lands as the host `class` attribute, nothing else.
	assert_eq!(document.attribute(button, "class").as_deref(), Some("primary wide"));
	assert_eq!(document.attribute(button, "className"), None);
	assert_eq!(document.attribute(button, "onClick"), None);
	assert_eq!(document.listener_count(button, "click"), 1);
}

#[test]
fn sparse_nested_children_flatten() {
	let (document, host) = document();
	let container = document.create_element("body");

	let items = vec![
		Child::from("1"),
		Child::from(create_node("em".into(), vec![], vec![Child::from("2")])),
	];
	let tree = create_node(
		"p".into(),
		vec![],
		vec![
			Child::from("head"),
			Child::Empty,
			Child::from(items),
			Child::from(None::<Node>),
			Child::from(""),
			Child::from("tail"),
		],
	);
	render_root(&tree, &host, container);

	assert_eq!(document.to_html(container), "<body><p>head1<em>2</em>tail</p></body>");
	// The empty string still becomes a (contentless) text node; only absent
	// entries are dropped.
	let paragraph = document.children(container)[0];
	assert_eq!(document.children(paragraph).len(), 5);
}

struct Greeting;
impl Component for Greeting {
	fn render(&self, scope: &Scope) -> Node {
		let name = match scope.prop("name") {
			Some(PropValue::Text(name)) => name,
			_ => "world".to_owned(),
		};
		create_node("p".into(), vec![], vec![Child::from(format!("Hello, {}!", name))])
	}
}

#[test]
fn custom_component_renders_through_props() {
	let (document, host) = document();
	let container = document.create_element("body");

	let tree = create_node(TypeDescriptor::component(Greeting), vec![("name".to_owned(), "sapling".into())], vec![]);
	render_root(&tree, &host, container);

	assert_eq!(document.to_html(container), "<body><p>Hello, sapling!</p></body>");
}

struct Wrapper;
impl Component for Wrapper {
	fn render(&self, scope: &Scope) -> Node {
		let children = scope.children().into_iter().map(Child::from).collect();
		create_node("div".into(), vec![("className".to_owned(), "wrapper".into())], children)
	}
}

#[test]
fn custom_component_passes_children_through() {
	let (document, host) = document();
	let container = document.create_element("body");

	let tree = create_node(
		TypeDescriptor::component(Wrapper),
		vec![],
		vec![Child::from(create_node("span".into(), vec![], vec![Child::from("A")]))],
	);
	render_root(&tree, &host, container);

	assert_eq!(document.to_html(container), "<body><div class=\"wrapper\"><span>A</span></div></body>");
}
