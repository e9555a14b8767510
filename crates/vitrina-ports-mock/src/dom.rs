//! Arena-backed mock document

use std::cell::{Cell, RefCell};
use std::collections::BTreeMap;

use vitrina_ports::{Dom, DomError};

use crate::selector::{self, Combinator, Complex, SelectorList, Subject};

/// Handle to a node in a [`MockDom`]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

/// Simulated element
#[derive(Clone, Debug, Default)]
struct MockNode {
    tag: String,
    attrs: BTreeMap<String, String>,
    styles: BTreeMap<String, String>,
    /// Own text, or raw markup after `set_inner_html`
    text: String,
    children: Vec<NodeId>,
    parent: Option<NodeId>,
}

impl Subject for MockNode {
    fn tag(&self) -> &str {
        &self.tag
    }

    fn attr(&self, name: &str) -> Option<&str> {
        self.attrs.get(name).map(String::as_str)
    }
}

#[derive(Debug)]
struct Arena {
    nodes: Vec<MockNode>,
    scrolled: Vec<NodeId>,
}

/// Mock document for unit testing
///
/// Node 0 is the `body`; only nodes attached below it are found by
/// lookups. Text is stored per element rather than as separate text nodes,
/// and `set_inner_html` stores markup verbatim instead of parsing it.
/// Rendering follows inline `display`/`visibility` styles only.
#[derive(Debug)]
pub struct MockDom {
    arena: RefCell<Arena>,
    clones_refused: Cell<bool>,
}

impl MockDom {
    /// Create an empty document containing only `body`
    pub fn new() -> Self {
        let body = MockNode {
            tag: "body".to_string(),
            ..Default::default()
        };
        Self {
            arena: RefCell::new(Arena {
                nodes: vec![body],
                scrolled: Vec::new(),
            }),
            clones_refused: Cell::new(false),
        }
    }

    /// The document body
    pub fn body(&self) -> NodeId {
        NodeId(0)
    }

    /// Create an element with attributes and append it to `parent`
    pub fn append_element(&self, parent: NodeId, tag: &str, attrs: &[(&str, &str)]) -> NodeId {
        let node = self.create_element(tag);
        for (name, value) in attrs {
            self.set_attribute(&node, name, value);
        }
        self.append_child(&parent, &node);
        node
    }

    /// Like [`append_element`](Self::append_element), with text content
    pub fn append_text(
        &self,
        parent: NodeId,
        tag: &str,
        attrs: &[(&str, &str)],
        text: &str,
    ) -> NodeId {
        let node = self.append_element(parent, tag, attrs);
        self.set_text_content(&node, text);
        node
    }

    /// Parent of `node`, if attached
    pub fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.arena.borrow().nodes[node.0].parent
    }

    /// Serialized markup of `node` itself and its subtree
    ///
    /// Attributes and styles are emitted in sorted order so two snapshots
    /// compare structurally.
    pub fn outer_html(&self, node: NodeId) -> String {
        let arena = self.arena.borrow();
        let mut out = String::new();
        serialize(&arena, node, &mut out);
        out
    }

    /// Make `clone_deep` fail (return `None`) while `refuse` is set
    pub fn refuse_clones(&self, refuse: bool) {
        self.clones_refused.set(refuse);
    }

    /// Nodes passed to `scroll_into_view`, in call order
    pub fn scrolled(&self) -> Vec<NodeId> {
        self.arena.borrow().scrolled.clone()
    }

    fn is_attached(arena: &Arena, node: NodeId) -> bool {
        let mut current = Some(node);
        while let Some(id) = current {
            if id.0 == 0 {
                return true;
            }
            current = arena.nodes[id.0].parent;
        }
        false
    }

    /// Pre-order traversal of the subtree below `root` (excluding `root`)
    fn descendants(arena: &Arena, root: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack: Vec<NodeId> = arena.nodes[root.0].children.iter().rev().copied().collect();
        while let Some(id) = stack.pop() {
            out.push(id);
            stack.extend(arena.nodes[id.0].children.iter().rev().copied());
        }
        out
    }

    fn matches(arena: &Arena, list: &SelectorList, node: NodeId) -> bool {
        list.0
            .iter()
            .any(|complex| matches_complex(arena, complex, complex.len() - 1, node))
    }

    fn select(&self, scope: NodeId, selector: &str) -> Result<Vec<NodeId>, DomError> {
        let list = selector::parse(selector)?;
        let arena = self.arena.borrow();
        let mut candidates = Vec::new();
        if scope.0 == 0 {
            candidates.push(scope);
        }
        candidates.extend(Self::descendants(&arena, scope));
        Ok(candidates
            .into_iter()
            .filter(|id| Self::matches(&arena, &list, *id))
            .collect())
    }

    fn detach(arena: &mut Arena, node: NodeId) {
        if let Some(parent) = arena.nodes[node.0].parent.take() {
            arena.nodes[parent.0].children.retain(|c| *c != node);
        }
    }

    fn copy_subtree(arena: &mut Arena, node: NodeId) -> NodeId {
        let mut copy = arena.nodes[node.0].clone();
        let children = std::mem::take(&mut copy.children);
        copy.parent = None;
        let id = NodeId(arena.nodes.len());
        arena.nodes.push(copy);
        for child in children {
            let child_copy = Self::copy_subtree(arena, child);
            arena.nodes[child_copy.0].parent = Some(id);
            arena.nodes[id.0].children.push(child_copy);
        }
        id
    }

    fn with_node<R>(&self, node: &NodeId, f: impl FnOnce(&MockNode) -> R) -> R {
        f(&self.arena.borrow().nodes[node.0])
    }

    fn with_node_mut<R>(&self, node: &NodeId, f: impl FnOnce(&mut MockNode) -> R) -> R {
        f(&mut self.arena.borrow_mut().nodes[node.0])
    }
}

impl Default for MockDom {
    fn default() -> Self {
        Self::new()
    }
}

fn matches_complex(arena: &Arena, complex: &Complex, index: usize, node: NodeId) -> bool {
    let (combinator, compound) = &complex[index];
    if !compound.matches(&arena.nodes[node.0]) {
        return false;
    }
    if index == 0 {
        return true;
    }
    match combinator {
        Combinator::Child => arena.nodes[node.0]
            .parent
            .is_some_and(|parent| matches_complex(arena, complex, index - 1, parent)),
        Combinator::Descendant => {
            let mut current = arena.nodes[node.0].parent;
            while let Some(ancestor) = current {
                if matches_complex(arena, complex, index - 1, ancestor) {
                    return true;
                }
                current = arena.nodes[ancestor.0].parent;
            }
            false
        }
    }
}

fn serialize(arena: &Arena, node: NodeId, out: &mut String) {
    let data = &arena.nodes[node.0];
    out.push('<');
    out.push_str(&data.tag);
    for (name, value) in &data.attrs {
        out.push_str(&format!(" {}=\"{}\"", name, value));
    }
    if !data.styles.is_empty() {
        let style: Vec<String> = data
            .styles
            .iter()
            .map(|(k, v)| format!("{}: {}", k, v))
            .collect();
        out.push_str(&format!(" style=\"{}\"", style.join("; ")));
    }
    out.push('>');
    serialize_inner(arena, node, out);
    out.push_str(&format!("</{}>", data.tag));
}

fn serialize_inner(arena: &Arena, node: NodeId, out: &mut String) {
    let data = &arena.nodes[node.0];
    out.push_str(&data.text);
    for child in &data.children {
        serialize(arena, *child, out);
    }
}

impl Dom for MockDom {
    type Node = NodeId;

    fn element_by_id(&self, id: &str) -> Option<NodeId> {
        let arena = self.arena.borrow();
        Self::descendants(&arena, self.body())
            .into_iter()
            .find(|n| arena.nodes[n.0].attr("id") == Some(id))
    }

    fn query(&self, selector: &str) -> Result<Option<NodeId>, DomError> {
        Ok(self.select(self.body(), selector)?.into_iter().next())
    }

    fn query_all(&self, selector: &str) -> Result<Vec<NodeId>, DomError> {
        self.select(self.body(), selector)
    }

    fn query_within(&self, scope: &NodeId, selector: &str) -> Result<Option<NodeId>, DomError> {
        let scope = *scope;
        let list = selector::parse(selector)?;
        let arena = self.arena.borrow();
        Ok(Self::descendants(&arena, scope)
            .into_iter()
            .find(|id| Self::matches(&arena, &list, *id)))
    }

    fn children(&self, node: &NodeId) -> Vec<NodeId> {
        self.with_node(node, |n| n.children.clone())
    }

    fn contains(&self, ancestor: &NodeId, node: &NodeId) -> bool {
        let arena = self.arena.borrow();
        let mut current = Some(*node);
        while let Some(id) = current {
            if id == *ancestor {
                return true;
            }
            current = arena.nodes[id.0].parent;
        }
        false
    }

    fn tag_name(&self, node: &NodeId) -> String {
        self.with_node(node, |n| n.tag.clone())
    }

    fn attribute(&self, node: &NodeId, name: &str) -> Option<String> {
        self.with_node(node, |n| n.attrs.get(name).cloned())
    }

    fn has_class(&self, node: &NodeId, class: &str) -> bool {
        self.with_node(node, |n| Subject::has_class(n, class))
    }

    fn style(&self, node: &NodeId, property: &str) -> Option<String> {
        self.with_node(node, |n| n.styles.get(property).cloned())
    }

    fn text_content(&self, node: &NodeId) -> String {
        let arena = self.arena.borrow();
        let mut out = arena.nodes[node.0].text.clone();
        for id in Self::descendants(&arena, *node) {
            out.push_str(&arena.nodes[id.0].text);
        }
        out
    }

    fn inner_html(&self, node: &NodeId) -> String {
        let arena = self.arena.borrow();
        let mut out = String::new();
        serialize_inner(&arena, *node, &mut out);
        out
    }

    fn is_rendered(&self, node: &NodeId) -> bool {
        let arena = self.arena.borrow();
        if !Self::is_attached(&arena, *node) {
            return false;
        }
        let mut visibility = None;
        let mut current = Some(*node);
        while let Some(id) = current {
            let data = &arena.nodes[id.0];
            if data.styles.get("display").map(String::as_str) == Some("none") {
                return false;
            }
            if visibility.is_none() {
                visibility = data.styles.get("visibility").cloned();
            }
            current = data.parent;
        }
        visibility.as_deref() != Some("hidden")
    }

    fn create_element(&self, tag: &str) -> NodeId {
        let mut arena = self.arena.borrow_mut();
        let id = NodeId(arena.nodes.len());
        arena.nodes.push(MockNode {
            tag: tag.to_ascii_lowercase(),
            ..Default::default()
        });
        id
    }

    fn clone_deep(&self, node: &NodeId) -> Option<NodeId> {
        if self.clones_refused.get() {
            return None;
        }
        Some(Self::copy_subtree(&mut self.arena.borrow_mut(), *node))
    }

    fn append_child(&self, parent: &NodeId, child: &NodeId) {
        let mut arena = self.arena.borrow_mut();
        Self::detach(&mut arena, *child);
        arena.nodes[child.0].parent = Some(*parent);
        arena.nodes[parent.0].children.push(*child);
    }

    fn clear_children(&self, node: &NodeId) {
        let mut arena = self.arena.borrow_mut();
        let children = std::mem::take(&mut arena.nodes[node.0].children);
        for child in children {
            arena.nodes[child.0].parent = None;
        }
        arena.nodes[node.0].text.clear();
    }

    fn set_attribute(&self, node: &NodeId, name: &str, value: &str) {
        self.with_node_mut(node, |n| {
            n.attrs.insert(name.to_string(), value.to_string());
        });
    }

    fn remove_attribute(&self, node: &NodeId, name: &str) {
        self.with_node_mut(node, |n| {
            n.attrs.remove(name);
        });
    }

    fn add_class(&self, node: &NodeId, class: &str) {
        if self.has_class(node, class) {
            return;
        }
        self.with_node_mut(node, |n| {
            let list = n.attrs.entry("class".to_string()).or_default();
            if !list.is_empty() {
                list.push(' ');
            }
            list.push_str(class);
        });
    }

    fn remove_class(&self, node: &NodeId, class: &str) {
        self.with_node_mut(node, |n| {
            if let Some(list) = n.attrs.get_mut("class") {
                *list = list
                    .split_whitespace()
                    .filter(|c| *c != class)
                    .collect::<Vec<_>>()
                    .join(" ");
            }
        });
    }

    fn set_style(&self, node: &NodeId, property: &str, value: &str) {
        self.with_node_mut(node, |n| {
            if value.is_empty() {
                n.styles.remove(property);
            } else {
                n.styles.insert(property.to_string(), value.to_string());
            }
        });
    }

    fn set_text_content(&self, node: &NodeId, text: &str) {
        self.clear_children(node);
        self.with_node_mut(node, |n| n.text = text.to_string());
    }

    fn set_inner_html(&self, node: &NodeId, html: &str) {
        self.clear_children(node);
        self.with_node_mut(node, |n| n.text = html.to_string());
    }

    fn scroll_into_view(&self, node: &NodeId) {
        self.arena.borrow_mut().scrolled.push(*node);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> (MockDom, NodeId, NodeId) {
        let dom = MockDom::new();
        let list = dom.append_element(dom.body(), "ul", &[("id", "proyectos")]);
        let first = dom.append_element(list, "li", &[("proyecto", "01"), ("class", "item")]);
        dom.append_text(first, "h3", &[], "Primero");
        let second = dom.append_element(list, "li", &[("proyecto", "02")]);
        (dom, first, second)
    }

    #[test]
    fn test_query_all_in_document_order() {
        let (dom, first, second) = sample();
        assert_eq!(dom.query_all("[proyecto]").unwrap(), vec![first, second]);
        assert_eq!(dom.query_all("#proyectos > li").unwrap(), vec![first, second]);
        assert_eq!(dom.query("li.item").unwrap(), Some(first));
    }

    #[test]
    fn test_invalid_selector_is_error() {
        let (dom, _, _) = sample();
        assert!(matches!(dom.query("#"), Err(DomError::InvalidSelector(_))));
    }

    #[test]
    fn test_query_within_scopes_to_descendants() {
        let (dom, first, second) = sample();
        let heading = dom.query_within(&first, "h1, h2, h3").unwrap();
        assert!(heading.is_some());
        assert_eq!(dom.query_within(&second, "h3").unwrap(), None);
        assert_eq!(dom.text_content(&heading.unwrap()), "Primero");
    }

    #[test]
    fn test_detached_nodes_are_not_found() {
        let dom = MockDom::new();
        let orphan = dom.create_element("div");
        dom.set_attribute(&orphan, "id", "orphan");
        assert_eq!(dom.element_by_id("orphan"), None);
        assert!(!dom.is_rendered(&orphan));
    }

    #[test]
    fn test_clone_deep_is_detached_copy() {
        let (dom, first, _) = sample();
        let copy = dom.clone_deep(&first).unwrap();
        assert_ne!(copy, first);
        assert_eq!(dom.parent(copy), None);
        assert_eq!(dom.outer_html(copy), dom.outer_html(first));

        dom.set_attribute(&copy, "proyecto", "99");
        assert_eq!(dom.attribute(&first, "proyecto").as_deref(), Some("01"));
    }

    #[test]
    fn test_refused_clone_leaves_arena_alone() {
        let (dom, first, _) = sample();
        let before = dom.outer_html(dom.body());
        dom.refuse_clones(true);
        assert_eq!(dom.clone_deep(&first), None);
        assert_eq!(dom.outer_html(dom.body()), before);
    }

    #[test]
    fn test_append_moves_node() {
        let (dom, first, second) = sample();
        dom.append_child(&second, &first);
        assert_eq!(dom.parent(first), Some(second));
        assert_eq!(dom.query_all("#proyectos > li").unwrap(), vec![second]);
    }

    #[test]
    fn test_rendered_follows_display_and_visibility() {
        let (dom, first, second) = sample();
        let list = dom.element_by_id("proyectos").unwrap();
        assert!(dom.is_rendered(&first));

        dom.set_style(&second, "visibility", "hidden");
        assert!(!dom.is_rendered(&second));

        dom.set_style(&list, "display", "none");
        assert!(!dom.is_rendered(&first));
    }

    #[test]
    fn test_class_helpers() {
        let (dom, first, _) = sample();
        dom.add_class(&first, "activo");
        dom.add_class(&first, "activo");
        assert_eq!(dom.attribute(&first, "class").as_deref(), Some("item activo"));
        dom.remove_class(&first, "item");
        assert!(!dom.has_class(&first, "item"));
        assert!(dom.has_class(&first, "activo"));
    }
}
