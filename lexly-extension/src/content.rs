//! Content script: watches selections on the host page and drives the bubble.

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{AddEventListenerOptions, Event, EventTarget, Window};

use crate::api::HttpApi;
use crate::bubble::dom::DomSurface;
use crate::bubble::{AnchorRect, Bubble, BubbleAction, ScrollOffset, WeakBubble};
use crate::config::config;
use crate::selection::{
    decide, route, PageEvent, PageResponse, SelectionDecision, SelectionSnapshot, SelectionWatcher,
};
use crate::storage::HostSessionStore;
use crate::timer::BrowserScheduler;

type PageBubble = Bubble<DomSurface, BrowserScheduler>;

/// Entry point called by the content-script loader.
#[wasm_bindgen]
pub fn start_content_script() -> Result<(), JsValue> {
    wasm_logger::init(wasm_logger::Config::default());

    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no global `window` exists"))?;
    let document = window
        .document()
        .ok_or_else(|| JsValue::from_str("no document on window"))?;

    let api = HttpApi::default();
    let store = HostSessionStore::detect();
    let surface_document = document.clone();
    let bubble: PageBubble = Bubble::new_cyclic(
        move |weak| {
            DomSurface::new(surface_document, move |action| {
                on_bubble_action(&weak, action, &api, store)
            })
        },
        BrowserScheduler,
        config().clone(),
    );
    let watcher = Rc::new(RefCell::new(SelectionWatcher::new(
        BrowserScheduler,
        config().selection_debounce_ms,
    )));

    let on_page_event = {
        let bubble = bubble.clone();
        let window = window.clone();
        Rc::new(move |kind: PageEvent, event: &Event| {
            let inside = bubble.with_surface(|surface| surface.contains_target(event));
            match route(kind, inside) {
                PageResponse::Inspect => {
                    let bubble = bubble.clone();
                    let window = window.clone();
                    let mut watcher = watcher.borrow_mut();
                    let rules = *watcher.rules();
                    watcher.on_pointer_release(move || {
                        let snapshot = read_selection(&window, &bubble);
                        apply(&window, &bubble, decide(&rules, &snapshot));
                    });
                }
                PageResponse::Hide => bubble.hide(),
                PageResponse::Ignore => {}
            }
        })
    };

    let document_target: &EventTarget = &document;
    let window_target: &EventTarget = &window;
    for (target, event_type, passive, kind) in [
        (document_target, "mouseup", false, PageEvent::PointerUp),
        (document_target, "mousedown", false, PageEvent::PointerDown),
        (document_target, "scroll", true, PageEvent::Scroll),
        (window_target, "resize", true, PageEvent::Resize),
    ] {
        let handler = on_page_event.clone();
        listen(target, event_type, passive, move |event| handler(kind, &event))?;
    }

    log::debug!("Lexly content script ready");
    Ok(())
}

fn on_bubble_action(
    weak: &WeakBubble<DomSurface, BrowserScheduler>,
    action: BubbleAction,
    api: &HttpApi,
    store: HostSessionStore,
) {
    let Some(bubble) = weak.upgrade() else {
        return;
    };
    match action {
        BubbleAction::Save => {
            let api = api.clone();
            wasm_bindgen_futures::spawn_local(async move {
                bubble.save(&api, &store).await;
            });
        }
        BubbleAction::Close => bubble.hide(),
    }
}

fn read_selection(window: &Window, bubble: &PageBubble) -> SelectionSnapshot {
    let Ok(Some(selection)) = window.get_selection() else {
        return SelectionSnapshot::default();
    };

    let text: String = selection.to_string().into();
    let anchored_in_bubble = selection
        .anchor_node()
        .map(|node| bubble.with_surface(|surface| surface.contains(&node)))
        .unwrap_or(false);
    let rect = if selection.range_count() > 0 {
        selection.get_range_at(0).ok().map(|range| {
            let rect = range.get_bounding_client_rect();
            AnchorRect {
                left: rect.left(),
                top: rect.top(),
                width: rect.width(),
                height: rect.height(),
            }
        })
    } else {
        None
    };

    SelectionSnapshot {
        text: Some(text),
        anchored_in_bubble,
        rect,
    }
}

fn apply(window: &Window, bubble: &PageBubble, decision: SelectionDecision) {
    match decision {
        SelectionDecision::Show { word, anchor } => {
            let scroll = ScrollOffset {
                x: window.scroll_x().unwrap_or(0.0),
                y: window.scroll_y().unwrap_or(0.0),
            };
            bubble.show(&word, anchor, scroll);
        }
        SelectionDecision::Hide => bubble.hide(),
        SelectionDecision::Ignore => {}
    }
}

/// Attach a listener for the lifetime of the page.
fn listen(
    target: &EventTarget,
    event_type: &str,
    passive: bool,
    handler: impl FnMut(Event) + 'static,
) -> Result<(), JsValue> {
    let closure = Closure::wrap(Box::new(handler) as Box<dyn FnMut(Event)>);
    let options = AddEventListenerOptions::new();
    options.set_passive(passive);
    target.add_event_listener_with_callback_and_add_event_listener_options(
        event_type,
        closure.as_ref().unchecked_ref(),
        &options,
    )?;
    closure.forget();
    Ok(())
}
