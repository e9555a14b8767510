//! Browser tests for the web-sys ports
//!
//! Run with `wasm-pack test --headless --firefox crates/vitrina-web`.

#![cfg(target_arch = "wasm32")]

use vitrina_ports::{Dom, DomError, HistoryEntry, Navigator, ProjectId};
use vitrina_web::{BrowserNavigator, WebDom};
use wasm_bindgen::JsValue;
use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

fn web_dom() -> WebDom {
    let window = web_sys::window().unwrap();
    let document = window.document().unwrap();
    WebDom::new(window, document)
}

#[wasm_bindgen_test]
fn test_invalid_selector_is_error() {
    let dom = web_dom();
    assert_eq!(
        dom.query("#").err(),
        Some(DomError::InvalidSelector("#".to_string()))
    );
}

#[wasm_bindgen_test]
fn test_build_and_clone_elements() {
    let dom = web_dom();
    let body = dom.query("body").unwrap().unwrap();
    let host = dom.create_element("div");
    dom.set_attribute(&host, "id", "prueba");
    dom.append_child(&body, &host);

    let img = dom.create_element("img");
    dom.set_attribute(&img, "data-src", "a.jpg");
    dom.append_child(&host, &img);

    let clone = dom.clone_deep(&img).unwrap();
    assert_ne!(clone, img);
    assert_eq!(dom.attribute(&clone, "data-src").as_deref(), Some("a.jpg"));
    assert_eq!(dom.tag_name(&clone), "img");

    assert!(dom.is_rendered(&host));
    dom.set_style(&host, "display", "none");
    assert_eq!(dom.style(&host, "display").as_deref(), Some("none"));
    assert!(!dom.is_rendered(&img));

    dom.clear_children(&host);
    assert!(dom.children(&host).is_empty());
}

#[wasm_bindgen_test]
fn test_history_payload_round_trips_through_state() {
    let navigator = BrowserNavigator::new(web_sys::window().unwrap());
    let entry = HistoryEntry::project(ProjectId::new("03"));
    navigator.replace_state(&entry, "?proyecto=03");
    assert_eq!(navigator.query_param("proyecto").as_deref(), Some("03"));

    let state = web_sys::window().unwrap().history().unwrap().state().unwrap();
    assert_eq!(BrowserNavigator::decode_state(&state), Some(entry));
    assert_eq!(BrowserNavigator::decode_state(&JsValue::NULL), None);

    navigator.replace_state(&HistoryEntry::home(), "/");
    assert_eq!(navigator.query_param("proyecto"), None);
}
