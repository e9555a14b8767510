//! Animation engine binding (global `gsap`)
//!
//! Tweens are translated into GSAP vars objects. Completion is reported
//! through `onComplete`, which fires once for the whole staggered tween.
//! A call the engine rejects resolves immediately, so the awaiting
//! transition carries on without the visual effect.

use js_sys::{Array, Object, Reflect};
use vitrina_ports::{Animator, Completion, Timing, Tween};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use web_sys::Element;

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(catch, js_namespace = gsap, js_name = to)]
    fn gsap_to(targets: &JsValue, vars: &JsValue) -> Result<JsValue, JsValue>;

    #[wasm_bindgen(catch, js_namespace = gsap, js_name = set)]
    fn gsap_set(targets: &JsValue, vars: &JsValue) -> Result<JsValue, JsValue>;

    #[wasm_bindgen(catch, js_namespace = gsap, js_name = fromTo)]
    fn gsap_from_to(targets: &JsValue, from: &JsValue, to: &JsValue) -> Result<JsValue, JsValue>;
}

/// [`Animator`] backed by the page's GSAP instance
#[derive(Clone, Copy, Debug, Default)]
pub struct GsapAnimator;

impl GsapAnimator {
    pub fn new() -> Self {
        Self
    }
}

fn set_prop(target: &Object, key: &str, value: &JsValue) {
    let _ = Reflect::set(target, &JsValue::from_str(key), value);
}

fn targets_array(targets: &[Element]) -> JsValue {
    targets.iter().collect::<Array>().into()
}

/// Style part of a GSAP vars object
fn tween_vars(tween: &Tween) -> Object {
    let vars = Object::new();
    let numeric = [
        ("opacity", tween.opacity),
        ("x", tween.x),
        ("y", tween.y),
        ("scale", tween.scale),
        ("rotation", tween.rotation),
    ];
    for (key, value) in numeric {
        if let Some(value) = value {
            set_prop(&vars, key, &JsValue::from_f64(value));
        }
    }
    if let Some(blur) = tween.blur {
        set_prop(&vars, "filter", &JsValue::from_str(&format!("blur({}px)", blur)));
    }
    if tween.clear_props {
        set_prop(&vars, "clearProps", &JsValue::from_str("all"));
    }
    vars
}

/// Tween vars plus duration, ease, stagger and the completion callback
fn timed_vars(tween: &Tween, timing: &Timing) -> (Object, Completion) {
    let vars = tween_vars(tween);
    set_prop(&vars, "duration", &JsValue::from_f64(timing.duration));
    set_prop(&vars, "ease", &JsValue::from_str(&timing.ease));
    if let Some(stagger) = timing.stagger {
        let stagger_vars = Object::new();
        set_prop(&stagger_vars, "each", &JsValue::from_f64(stagger.each));
        set_prop(&stagger_vars, "from", &JsValue::from_str(stagger.from.as_str()));
        set_prop(&vars, "stagger", &stagger_vars);
    }

    let (signal, completion) = Completion::pair();
    let on_complete = Closure::once_into_js(move || signal.complete());
    set_prop(&vars, "onComplete", &on_complete);
    (vars, completion)
}

impl Animator<Element> for GsapAnimator {
    fn is_available(&self) -> bool {
        Reflect::has(&js_sys::global(), &JsValue::from_str("gsap")).unwrap_or(false)
    }

    fn set(&self, targets: &[Element], tween: &Tween) {
        if let Err(e) = gsap_set(&targets_array(targets), &tween_vars(tween)) {
            log::warn!("[gsap] set failed: {:?}", e);
        }
    }

    fn to(&self, targets: &[Element], tween: &Tween, timing: &Timing) -> Completion {
        let (vars, completion) = timed_vars(tween, timing);
        match gsap_to(&targets_array(targets), &vars) {
            Ok(_) => completion,
            Err(e) => {
                log::warn!("[gsap] to failed: {:?}", e);
                Completion::ready()
            }
        }
    }

    fn from_to(&self, targets: &[Element], from: &Tween, to: &Tween, timing: &Timing) -> Completion {
        let (vars, completion) = timed_vars(to, timing);
        match gsap_from_to(&targets_array(targets), &tween_vars(from), &vars) {
            Ok(_) => completion,
            Err(e) => {
                log::warn!("[gsap] fromTo failed: {:?}", e);
                Completion::ready()
            }
        }
    }
}
