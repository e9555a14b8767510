//! web-sys implementation of the document port

use vitrina_ports::{Dom, DomError};
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlElement, ScrollBehavior, ScrollIntoViewOptions, Window};

/// The live browser document
#[derive(Clone)]
pub struct WebDom {
    window: Window,
    document: Document,
}

impl WebDom {
    pub fn new(window: Window, document: Document) -> Self {
        Self { window, document }
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    fn elements(list: web_sys::NodeList) -> Vec<Element> {
        (0..list.length())
            .filter_map(|i| list.item(i))
            .filter_map(|node| node.dyn_into::<Element>().ok())
            .collect()
    }

    fn invalid(selector: &str) -> DomError {
        DomError::InvalidSelector(selector.to_string())
    }
}

impl Dom for WebDom {
    type Node = Element;

    fn element_by_id(&self, id: &str) -> Option<Element> {
        self.document.get_element_by_id(id)
    }

    fn query(&self, selector: &str) -> Result<Option<Element>, DomError> {
        self.document
            .query_selector(selector)
            .map_err(|_| Self::invalid(selector))
    }

    fn query_all(&self, selector: &str) -> Result<Vec<Element>, DomError> {
        self.document
            .query_selector_all(selector)
            .map(Self::elements)
            .map_err(|_| Self::invalid(selector))
    }

    fn query_within(&self, scope: &Element, selector: &str) -> Result<Option<Element>, DomError> {
        scope
            .query_selector(selector)
            .map_err(|_| Self::invalid(selector))
    }

    fn children(&self, node: &Element) -> Vec<Element> {
        let children = node.children();
        (0..children.length())
            .filter_map(|i| children.item(i))
            .collect()
    }

    fn contains(&self, ancestor: &Element, node: &Element) -> bool {
        ancestor.contains(Some(node))
    }

    fn tag_name(&self, node: &Element) -> String {
        node.tag_name().to_ascii_lowercase()
    }

    fn attribute(&self, node: &Element, name: &str) -> Option<String> {
        node.get_attribute(name)
    }

    fn has_class(&self, node: &Element, class: &str) -> bool {
        node.class_list().contains(class)
    }

    fn style(&self, node: &Element, property: &str) -> Option<String> {
        let value = node
            .dyn_ref::<HtmlElement>()?
            .style()
            .get_property_value(property)
            .ok()?;
        (!value.is_empty()).then_some(value)
    }

    fn text_content(&self, node: &Element) -> String {
        node.text_content().unwrap_or_default()
    }

    fn inner_html(&self, node: &Element) -> String {
        node.inner_html()
    }

    fn is_rendered(&self, node: &Element) -> bool {
        if !node.is_connected() {
            return false;
        }
        match self.window.get_computed_style(node) {
            Ok(Some(style)) => {
                let display = style.get_property_value("display").unwrap_or_default();
                let visibility = style.get_property_value("visibility").unwrap_or_default();
                display != "none" && visibility != "hidden"
            }
            _ => true,
        }
    }

    fn create_element(&self, tag: &str) -> Element {
        // Tag names are validated when the page configuration loads
        self.document
            .create_element(tag)
            .unwrap_or_else(|_| wasm_bindgen::throw_str(&format!("invalid tag name: {}", tag)))
    }

    fn clone_deep(&self, node: &Element) -> Option<Element> {
        match node.clone_node_with_deep(true) {
            Ok(clone) => clone.dyn_into::<Element>().ok(),
            Err(e) => {
                log::warn!("[dom] cloneNode failed: {:?}", e);
                None
            }
        }
    }

    fn append_child(&self, parent: &Element, child: &Element) {
        if let Err(e) = parent.append_child(child) {
            log::warn!("[dom] append failed: {:?}", e);
        }
    }

    fn clear_children(&self, node: &Element) {
        node.set_inner_html("");
    }

    fn set_attribute(&self, node: &Element, name: &str, value: &str) {
        if let Err(e) = node.set_attribute(name, value) {
            log::warn!("[dom] set attribute {} failed: {:?}", name, e);
        }
    }

    fn remove_attribute(&self, node: &Element, name: &str) {
        let _ = node.remove_attribute(name);
    }

    fn add_class(&self, node: &Element, class: &str) {
        let _ = node.class_list().add_1(class);
    }

    fn remove_class(&self, node: &Element, class: &str) {
        let _ = node.class_list().remove_1(class);
    }

    fn set_style(&self, node: &Element, property: &str, value: &str) {
        if let Some(element) = node.dyn_ref::<HtmlElement>() {
            let _ = element.style().set_property(property, value);
        }
    }

    fn set_text_content(&self, node: &Element, text: &str) {
        node.set_text_content(Some(text));
    }

    fn set_inner_html(&self, node: &Element, html: &str) {
        node.set_inner_html(html);
    }

    fn scroll_into_view(&self, node: &Element) {
        let options = ScrollIntoViewOptions::new();
        options.set_behavior(ScrollBehavior::Smooth);
        node.scroll_into_view_with_scroll_into_view_options(&options);
    }
}
