use sapling_dom::diff;
use sapling_dom::node::{Node, PropValue};


#[test]
fn text_content_must_match() {
	logger_::init();
	assert!(diff::is_same_node(&Node::text("A"), &Node::text("A")));
	assert!(!diff::is_same_node(&Node::text("A"), &Node::text("A2")));
}

#[test]
fn tag_must_match() {
	logger_::init();
	assert!(diff::is_same_node(&Node::element("div"), &Node::element("div")));
	assert!(!diff::is_same_node(&Node::element("div"), &Node::element("span")));
	assert!(!diff::is_same_node(&Node::element("div"), &Node::text("div")));
}

#[test]
fn handler_identity_is_ignored() {
	logger_::init();
	let old = Node::element("button");
	old.set_attribute("onClick", PropValue::handler(|_| ()));
	let new = Node::element("button");
	new.set_attribute("onClick", PropValue::handler(|_| ()));
	assert!(diff::is_same_node(&old, &new));
}

#[test]
fn changed_prop_value_mismatches() {
	logger_::init();
	let old = Node::element("div");
	old.set_attribute("id", "a".into());
	let new = Node::element("div");
	new.set_attribute("id", "b".into());
	assert!(!diff::is_same_node(&old, &new));
}

#[test]
fn added_non_handler_prop_mismatches() {
	logger_::init();
	let old = Node::element("div");
	let new = Node::element("div");
	new.set_attribute("id", "a".into());
	assert!(!diff::is_same_node(&old, &new));
}

#[test]
fn added_handler_prop_still_matches() {
	logger_::init();
	let old = Node::element("div");
	old.set_attribute("id", "a".into());
	let new = Node::element("div");
	new.set_attribute("id", "a".into());
	new.set_attribute("onClick", PropValue::handler(|_| ()));
	assert!(diff::is_same_node(&old, &new));
}

#[test]
fn removed_prop_mismatches() {
	logger_::init();
	let old = Node::element("div");
	old.set_attribute("id", "a".into());
	old.set_attribute("title", "t".into());
	let new = Node::element("div");
	new.set_attribute("id", "a".into());
	assert!(!diff::is_same_node(&old, &new));
}
