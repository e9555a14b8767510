//! Project-detail fragment assembly
//!
//! Builds the detail view for a project from its source content block
//! (a hidden template region of the page) and the trigger that was
//! clicked. The source block is only read or cloned, never modified.

use std::rc::Rc;

use vitrina_ports::{Dom, ProjectId};

use crate::config::PageConfig;

/// Assembles the project-detail fragment
#[derive(Clone, Debug)]
pub struct ProjectContentBuilder {
    config: Rc<PageConfig>,
}

impl ProjectContentBuilder {
    pub fn new(config: Rc<PageConfig>) -> Self {
        Self { config }
    }

    /// Text of the first heading inside `trigger`, or the placeholder
    pub fn resolve_title<D: Dom + ?Sized>(&self, dom: &D, trigger: &D::Node) -> String {
        let markers = &self.config.markers;
        dom.query_within(trigger, &markers.title_selector)
            .ok()
            .flatten()
            .map(|heading| dom.text_content(&heading).trim().to_string())
            .filter(|title| !title.is_empty())
            .unwrap_or_else(|| markers.placeholder_title.clone())
    }

    /// Replace the contents of `container` with the fragment for `project_id`
    ///
    /// Appends, in order: a clone of the source block's media element (if
    /// any), the title, then one paragraph per remaining source child with a
    /// separator between consecutive paragraphs. A missing source block
    /// yields a fragment holding only the title. Returns the appended nodes.
    pub fn build<D: Dom + ?Sized>(
        &self,
        dom: &D,
        container: &D::Node,
        project_id: &ProjectId,
        trigger: &D::Node,
    ) -> Vec<D::Node> {
        let title = self.resolve_title(dom, trigger);
        dom.clear_children(container);

        let mut appended = Vec::new();
        let source = dom.element_by_id(&self.config.source_block_id(project_id.as_str()));
        if source.is_none() {
            log::debug!("[content] no source block for project {}", project_id);
        }

        let blocks = match &source {
            Some(source) => {
                let (media, blocks) = self.split_source(dom, source);
                if let Some(clone) = media.and_then(|media| self.clone_media(dom, &media)) {
                    dom.append_child(container, &clone);
                    appended.push(clone);
                }
                blocks
            }
            None => Vec::new(),
        };

        let heading = self.build_title(dom, trigger, &title);
        dom.append_child(container, &heading);
        appended.push(heading);

        let markers = &self.config.markers;
        for (index, block) in blocks.iter().enumerate() {
            if index > 0 {
                let separator = dom.create_element(&markers.separator_tag);
                dom.add_class(&separator, &markers.separator_class);
                dom.append_child(container, &separator);
                appended.push(separator);
            }
            let paragraph = dom.create_element(&markers.paragraph_tag);
            dom.set_inner_html(&paragraph, &dom.inner_html(block));
            dom.append_child(container, &paragraph);
            appended.push(paragraph);
        }

        appended
    }

    /// First media child, and every non-media child in order
    fn split_source<D: Dom + ?Sized>(
        &self,
        dom: &D,
        source: &D::Node,
    ) -> (Option<D::Node>, Vec<D::Node>) {
        let mut media = None;
        let mut blocks = Vec::new();
        for child in dom.children(source) {
            if self.config.is_media_tag(&dom.tag_name(&child)) {
                if media.is_none() {
                    media = Some(child);
                }
            } else {
                blocks.push(child);
            }
        }
        (media, blocks)
    }

    fn clone_media<D: Dom + ?Sized>(&self, dom: &D, media: &D::Node) -> Option<D::Node> {
        let clone = match dom.clone_deep(media) {
            Some(clone) => clone,
            None => {
                log::warn!("[content] media clone failed, showing text only");
                return None;
            }
        };
        if dom.tag_name(&clone) != "img" {
            return Some(clone);
        }

        let deferred = &self.config.markers.deferred_src_attr;
        let src = dom
            .attribute(&clone, deferred)
            .filter(|s| !s.is_empty())
            .or_else(|| dom.attribute(&clone, "src"));
        if let Some(src) = src {
            dom.set_attribute(&clone, "src", &src);
        }
        dom.remove_attribute(&clone, deferred);
        dom.set_attribute(&clone, "loading", "eager");
        dom.set_attribute(&clone, "decoding", "async");
        Some(clone)
    }

    fn build_title<D: Dom + ?Sized>(&self, dom: &D, trigger: &D::Node, title: &str) -> D::Node {
        let markers = &self.config.markers;
        let heading = dom.create_element(&markers.title_tag);

        match dom
            .attribute(trigger, &markers.url_attr)
            .filter(|url| !url.is_empty())
        {
            Some(url) => {
                let link = dom.create_element("a");
                dom.set_attribute(&link, "href", &url);
                dom.set_attribute(&link, "target", "_blank");
                dom.set_attribute(&link, "rel", "noopener noreferrer");
                dom.set_text_content(&link, title);
                dom.append_child(&heading, &link);
            }
            None => dom.set_text_content(&heading, title),
        }
        heading
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vitrina_ports_mock::{MockDom, NodeId};

    struct Page {
        dom: MockDom,
        container: NodeId,
        trigger: NodeId,
        source: NodeId,
    }

    fn page(blocks: usize) -> Page {
        let dom = MockDom::new();
        let body = dom.body();
        let container = dom.append_element(body, "div", &[("id", "contenido-proyecto")]);
        let trigger = dom.append_element(body, "li", &[("proyecto", "07")]);
        dom.append_text(trigger, "h3", &[], "  Cartel  ");

        let templates = dom.append_element(body, "div", &[("class", "plantillas")]);
        let source = dom.append_element(templates, "div", &[("id", "07")]);
        dom.append_element(
            source,
            "img",
            &[("data-src", "full.jpg"), ("src", "thumb.jpg"), ("loading", "lazy")],
        );
        for i in 0..blocks {
            dom.append_text(source, "div", &[], &format!("<b>bloque</b> {}", i));
        }
        Page {
            dom,
            container,
            trigger,
            source,
        }
    }

    fn builder() -> ProjectContentBuilder {
        ProjectContentBuilder::new(Rc::new(PageConfig::default()))
    }

    #[test]
    fn test_title_from_trigger_heading() {
        let p = page(0);
        assert_eq!(builder().resolve_title(&p.dom, &p.trigger), "Cartel");
    }

    #[test]
    fn test_title_placeholder_without_heading() {
        let p = page(0);
        let bare = p.dom.append_element(p.dom.body(), "li", &[("proyecto", "08")]);
        assert_eq!(builder().resolve_title(&p.dom, &bare), "Proyecto");
    }

    #[test]
    fn test_media_clone_resolves_deferred_source() {
        let p = page(1);
        let nodes = builder().build(&p.dom, &p.container, &ProjectId::new("07"), &p.trigger);
        let img = nodes[0];
        assert_eq!(p.dom.tag_name(&img), "img");
        assert_eq!(p.dom.attribute(&img, "src").as_deref(), Some("full.jpg"));
        assert_eq!(p.dom.attribute(&img, "data-src"), None);
        assert_eq!(p.dom.attribute(&img, "loading").as_deref(), Some("eager"));
        assert_eq!(p.dom.attribute(&img, "decoding").as_deref(), Some("async"));
    }

    #[test]
    fn test_media_falls_back_to_existing_source() {
        let p = page(0);
        let img = p.dom.children(&p.source)[0];
        p.dom.remove_attribute(&img, "data-src");
        let nodes = builder().build(&p.dom, &p.container, &ProjectId::new("07"), &p.trigger);
        assert_eq!(p.dom.attribute(&nodes[0], "src").as_deref(), Some("thumb.jpg"));
    }

    #[test]
    fn test_failed_media_clone_is_skipped() {
        let p = page(1);
        let before = p.dom.outer_html(p.source);
        p.dom.refuse_clones(true);
        let nodes = builder().build(&p.dom, &p.container, &ProjectId::new("07"), &p.trigger);
        assert_eq!(p.dom.tag_name(&nodes[0]), "h2");
        assert!(nodes.iter().all(|n| p.dom.tag_name(n) != "img"));
        assert_eq!(p.dom.outer_html(p.source), before);
        assert_eq!(p.dom.children(&p.container), nodes);
    }

    #[test]
    fn test_source_block_is_untouched() {
        let p = page(3);
        let before = p.dom.outer_html(p.source);
        builder().build(&p.dom, &p.container, &ProjectId::new("07"), &p.trigger);
        assert_eq!(p.dom.outer_html(p.source), before);
    }

    #[test]
    fn test_paragraphs_carry_block_markup() {
        let p = page(2);
        let nodes = builder().build(&p.dom, &p.container, &ProjectId::new("07"), &p.trigger);
        let paragraphs: Vec<_> = nodes
            .iter()
            .filter(|n| p.dom.tag_name(n) == "p")
            .collect();
        assert_eq!(p.dom.inner_html(paragraphs[0]), "<b>bloque</b> 0");
        assert_eq!(p.dom.inner_html(paragraphs[1]), "<b>bloque</b> 1");
    }

    #[test]
    fn test_rebuild_replaces_previous_fragment() {
        let p = page(2);
        let b = builder();
        b.build(&p.dom, &p.container, &ProjectId::new("07"), &p.trigger);
        let second = b.build(&p.dom, &p.container, &ProjectId::new("07"), &p.trigger);
        assert_eq!(p.dom.children(&p.container), second);
    }

    #[test]
    fn test_missing_source_builds_title_only() {
        let p = page(2);
        let nodes = builder().build(&p.dom, &p.container, &ProjectId::new("99"), &p.trigger);
        assert_eq!(nodes.len(), 1);
        assert_eq!(p.dom.tag_name(&nodes[0]), "h2");
        assert_eq!(p.dom.text_content(&nodes[0]), "Cartel");
    }
}
