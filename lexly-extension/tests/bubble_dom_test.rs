//! Bubble DOM Tests
//!
//! Run in a browser with `wasm-pack test --headless --chrome lexly-extension`.

#![cfg(target_arch = "wasm32")]

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen_test::*;
use web_sys::HtmlElement;

use lexly_extension::bubble::dom::DomSurface;
use lexly_extension::bubble::styles::STYLE_ELEMENT_ID;
use lexly_extension::bubble::{BubbleAction, BubbleSurface, BubbleView, Placement, SaveResult};

wasm_bindgen_test_configure!(run_in_browser);

fn surface() -> (DomSurface, Rc<RefCell<Vec<BubbleAction>>>) {
    let document = web_sys::window().unwrap().document().unwrap();
    let actions = Rc::new(RefCell::new(Vec::new()));
    let sink = actions.clone();
    let surface = DomSurface::new(document, move |action| sink.borrow_mut().push(action));
    (surface, actions)
}

fn query(selector: &str) -> Option<HtmlElement> {
    web_sys::window()?
        .document()?
        .query_selector(selector)
        .ok()
        .flatten()
        .and_then(|el| el.dyn_into().ok())
}

#[wasm_bindgen_test]
fn test_prompt_buttons_dispatch_actions() {
    let (mut surface, actions) = surface();
    surface.ensure_attached();
    surface.render(&BubbleView::Prompt {
        word: "serendipity".to_string(),
    });

    assert!(surface.is_attached());
    assert!(query(&format!("#{STYLE_ELEMENT_ID}")).is_some());
    assert_eq!(
        query(".lexly-word").and_then(|el| el.text_content()).as_deref(),
        Some("serendipity")
    );

    query(".lexly-btn-save").unwrap().click();
    query(".lexly-btn-close").unwrap().click();
    assert_eq!(*actions.borrow(), vec![BubbleAction::Save, BubbleAction::Close]);

    surface.detach();
    assert!(!surface.is_attached());
    assert!(query(".lexly-bubble").is_none());
}

#[wasm_bindgen_test]
fn test_toast_and_placement() {
    let (mut surface, actions) = surface();
    surface.ensure_attached();
    surface.render(&BubbleView::Toast(SaveResult::NotSignedIn.toast()));
    surface.place(Placement {
        left: 120.0,
        top: 40.0,
    });
    surface.reveal();

    let root = query(".lexly-bubble").unwrap();
    assert_eq!(root.style().get_property_value("left").unwrap(), "120px");
    assert!(root.class_list().contains("lexly-visible"));
    assert_eq!(
        query(".lexly-error").and_then(|el| el.text_content()).as_deref(),
        Some("Sign in to Lexly first!")
    );

    // Toast text carries no action attribute.
    query(".lexly-error").unwrap().click();
    assert!(actions.borrow().is_empty());

    surface.conceal();
    assert!(!root.class_list().contains("lexly-visible"));
    surface.detach();
}
