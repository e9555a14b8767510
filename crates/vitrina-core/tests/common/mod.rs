//! Shared page fixture for the integration tests

#![allow(dead_code)]

use std::rc::Rc;

use vitrina_core::{PageBootstrapper, PageConfig, PageEntrance, ViewTransitionController};
use vitrina_ports::Dom;
use vitrina_ports_mock::{MockAnimator, MockClock, MockDom, MockNavigator, NodeId};

pub type Bootstrapper = PageBootstrapper<MockDom, MockAnimator<NodeId>, MockNavigator, MockClock>;
pub type Controller = ViewTransitionController<MockDom, MockAnimator<NodeId>>;

pub const EXTERNAL_URL: &str = "https://example.com/revista";

/// The portfolio page as the markup ships it
///
/// - `03` has an image and three text blocks, no external link
/// - `07` has two text blocks and an external link
pub struct Page {
    pub dom: Rc<MockDom>,
    pub animator: Rc<MockAnimator<NodeId>>,
    pub navigator: Rc<MockNavigator>,
    pub clock: Rc<MockClock>,
    pub config: Rc<PageConfig>,
    pub boot: Bootstrapper,
    pub main: NodeId,
    pub home: NodeId,
    pub work: NodeId,
    pub footer: NodeId,
    pub social: NodeId,
    pub space: NodeId,
    pub back: NodeId,
    pub content: NodeId,
}

impl Page {
    pub fn new() -> Self {
        Self::build("/", MockAnimator::new())
    }

    /// Page loaded at `url` (e.g. `?proyecto=03`)
    pub fn at(url: &str) -> Self {
        Self::build(url, MockAnimator::new())
    }

    /// Page whose animations complete only when the test releases them
    pub fn manual() -> Self {
        Self::build("/", MockAnimator::manual())
    }

    fn build(url: &str, animator: MockAnimator<NodeId>) -> Self {
        let dom = Rc::new(MockDom::new());
        let body = dom.body();

        let main = dom.append_element(body, "div", &[("class", "contenedor")]);
        dom.append_text(main, "div", &[("id", "logo")], "Vitrina");

        let home = dom.append_element(main, "div", &[("id", "contenido")]);
        let nav = dom.append_element(home, "nav", &[("id", "enlaces")]);
        dom.append_text(nav, "a", &[("href", "#trabajo")], "Trabajo");
        dom.append_text(nav, "a", &[("href", "#")], "Arriba");
        let hero = dom.append_element(home, "section", &[("class", "hero")]);
        dom.append_text(hero, "h1", &[], "Estudio");
        dom.append_text(hero, "p", &[], "Diseño y código");
        let work = dom.append_element(home, "section", &[("id", "trabajo")]);
        let list = dom.append_element(work, "ul", &[("id", "proyectos")]);
        let poster = dom.append_element(list, "li", &[("proyecto", "03")]);
        dom.append_text(poster, "h3", &[], " Cartel ");
        let magazine = dom.append_element(
            list,
            "li",
            &[("proyecto", "07"), ("data-url", EXTERNAL_URL)],
        );
        dom.append_text(magazine, "h3", &[], "Revista");

        let footer = dom.append_element(main, "footer", &[("id", "pie")]);
        let socials = dom.append_element(footer, "div", &[("class", "redes")]);
        let social = dom.append_element(socials, "a", &[("href", "https://example.com")]);

        let space = dom.append_element(
            main,
            "section",
            &[("id", "espacio-proyecto"), ("class", "oculto")],
        );
        let back = dom.append_text(space, "button", &[("id", "volver")], "Volver");
        let content = dom.append_element(space, "div", &[("id", "contenido-proyecto")]);

        let templates = dom.append_element(body, "div", &[("class", "plantillas")]);
        dom.set_style(&templates, "display", "none");
        let source = dom.append_element(templates, "div", &[("id", "03")]);
        dom.append_element(source, "img", &[("data-src", "cartel.jpg")]);
        dom.append_text(source, "div", &[], "Primer <em>bloque</em>");
        dom.append_text(source, "div", &[], "Segundo bloque");
        dom.append_text(source, "div", &[], "Tercer bloque");
        let source = dom.append_element(templates, "div", &[("id", "07")]);
        dom.append_text(source, "div", &[], "Uno");
        dom.append_text(source, "div", &[], "Dos");

        let animator = Rc::new(animator);
        let navigator = Rc::new(MockNavigator::at(url));
        let clock = Rc::new(MockClock::new());
        let config = Rc::new(PageConfig::default());
        let controller =
            ViewTransitionController::new(Rc::clone(&dom), Rc::clone(&animator), Rc::clone(&config));
        let boot = PageBootstrapper::new(controller, Rc::clone(&navigator), Rc::clone(&clock));

        Self {
            dom,
            animator,
            navigator,
            clock,
            config,
            boot,
            main,
            home,
            work,
            footer,
            social,
            space,
            back,
            content,
        }
    }

    pub fn controller(&self) -> &Controller {
        self.boot.controller()
    }

    pub fn entrance(&self) -> PageEntrance<MockDom, MockAnimator<NodeId>, MockClock> {
        PageEntrance::new(
            Rc::clone(&self.dom),
            Rc::clone(&self.animator),
            Rc::clone(&self.clock),
            Rc::clone(&self.config),
        )
    }

    pub fn trigger(&self, id: &str) -> NodeId {
        self.dom
            .query_all("[proyecto]")
            .unwrap()
            .into_iter()
            .find(|t| self.dom.attribute(t, "proyecto").as_deref() == Some(id))
            .unwrap()
    }

    /// Tags of the built fragment, in order
    pub fn fragment_tags(&self) -> Vec<String> {
        self.dom
            .children(&self.content)
            .iter()
            .map(|n| self.dom.tag_name(n))
            .collect()
    }
}
