//! Document port

/// Errors reported by DOM queries
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum DomError {
    /// The selector could not be parsed
    #[error("invalid selector: {0}")]
    InvalidSelector(String),
}

/// Document tree port
///
/// All methods take `&self`: implementations are handles onto a document
/// owned elsewhere (the browser, or a mock arena behind a `RefCell`).
/// Lookups that find nothing return `None`/empty rather than an error; only
/// malformed selectors fail.
pub trait Dom {
    /// Handle to an element
    type Node: Clone + PartialEq;

    // === Lookup ===

    /// Element with the given id
    ///
    /// On WASM: `document.getElementById`
    ///
    /// # Arguments
    /// * `id` - Element id, matched literally (never parsed as a selector)
    ///
    /// # Returns
    /// * `Some(node)` - First attached element carrying the id
    /// * `None` - No such element
    fn element_by_id(&self, id: &str) -> Option<Self::Node>;

    /// First element in document order matching `selector`
    ///
    /// # Arguments
    /// * `selector` - CSS selector list
    ///
    /// # Returns
    /// * `Ok(Some(node))` - First match
    /// * `Ok(None)` - Nothing matches
    /// * `Err(DomError::InvalidSelector)` - `selector` does not parse
    fn query(&self, selector: &str) -> Result<Option<Self::Node>, DomError>;

    /// All elements in document order matching `selector`
    ///
    /// # Arguments
    /// * `selector` - CSS selector list
    ///
    /// # Returns
    /// * `Ok(nodes)` - Every match, possibly empty
    /// * `Err(DomError::InvalidSelector)` - `selector` does not parse
    fn query_all(&self, selector: &str) -> Result<Vec<Self::Node>, DomError>;

    /// First descendant of `scope` matching `selector`
    ///
    /// # Arguments
    /// * `scope` - Element whose subtree is searched (`scope` itself excluded)
    /// * `selector` - CSS selector list
    ///
    /// # Returns
    /// * `Ok(Some(node))` - First match below `scope`
    /// * `Ok(None)` - Nothing matches
    /// * `Err(DomError::InvalidSelector)` - `selector` does not parse
    fn query_within(&self, scope: &Self::Node, selector: &str)
        -> Result<Option<Self::Node>, DomError>;

    /// Direct element children of `node`, in order
    fn children(&self, node: &Self::Node) -> Vec<Self::Node>;

    /// Whether `ancestor` contains `node` (inclusive)
    ///
    /// # Arguments
    /// * `ancestor` - Candidate ancestor
    /// * `node` - Element to locate
    ///
    /// # Returns
    /// * `true` - `node` is `ancestor` or lies in its subtree
    fn contains(&self, ancestor: &Self::Node, node: &Self::Node) -> bool;

    // === Reading ===

    /// Lowercase tag name
    fn tag_name(&self, node: &Self::Node) -> String;

    /// Attribute value, `None` when the attribute is absent
    fn attribute(&self, node: &Self::Node, name: &str) -> Option<String>;

    fn has_class(&self, node: &Self::Node, class: &str) -> bool;

    /// Inline style property value
    ///
    /// # Returns
    /// * `Some(value)` - The property is set inline
    /// * `None` - Not set inline (computed styles are not consulted)
    fn style(&self, node: &Self::Node, property: &str) -> Option<String>;

    /// Concatenated text of the element and its descendants
    fn text_content(&self, node: &Self::Node) -> String;

    /// Markup of the element's children
    fn inner_html(&self, node: &Self::Node) -> String;

    /// Whether the element currently renders
    ///
    /// On WASM: computed `display` is not `none` and computed `visibility`
    /// is not `hidden`. Detached elements never render.
    fn is_rendered(&self, node: &Self::Node) -> bool;

    // === Mutation ===

    /// Create a detached element
    ///
    /// # Arguments
    /// * `tag` - Tag name; callers pass only names validated with the page
    ///   configuration
    fn create_element(&self, tag: &str) -> Self::Node;

    /// Deep clone of `node` and its subtree
    ///
    /// # Returns
    /// * `Some(clone)` - A detached copy; `node` is left untouched
    /// * `None` - The platform refused to clone
    fn clone_deep(&self, node: &Self::Node) -> Option<Self::Node>;

    /// Append `child` as the last child of `parent`
    ///
    /// An already attached `child` is moved, as in the browser.
    fn append_child(&self, parent: &Self::Node, child: &Self::Node);

    /// Remove every child of `node`
    fn clear_children(&self, node: &Self::Node);

    fn set_attribute(&self, node: &Self::Node, name: &str, value: &str);

    fn remove_attribute(&self, node: &Self::Node, name: &str);

    fn add_class(&self, node: &Self::Node, class: &str);

    fn remove_class(&self, node: &Self::Node, class: &str);

    /// Set an inline style property
    fn set_style(&self, node: &Self::Node, property: &str, value: &str);

    /// Replace the element's children with a single text
    fn set_text_content(&self, node: &Self::Node, text: &str);

    /// Replace the element's children with parsed markup
    fn set_inner_html(&self, node: &Self::Node, html: &str);

    /// Smoothly scroll the viewport to `node`
    ///
    /// On WASM: `scrollIntoView({ behavior: "smooth" })`
    fn scroll_into_view(&self, node: &Self::Node);
}
