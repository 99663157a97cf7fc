use std::rc::Rc;

use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, Element, Event, HtmlElement, Node};

use super::styles::{BUBBLE_STYLES, STYLE_ELEMENT_ID};
use super::{BubbleAction, BubbleSurface, BubbleView, Placement, ToastTone};
use crate::error::js_error_text;

const VISIBLE_CLASS: &str = "lexly-visible";

/// The bubble as a `div.lexly-bubble` appended to the host page's body.
///
/// Clicks anywhere in the element go through one delegated listener that
/// reads `data-lexly-action` and forwards the [`BubbleAction`].
pub struct DomSurface {
    document: Document,
    root: Option<HtmlElement>,
    on_action: Rc<dyn Fn(BubbleAction)>,
    _on_click: Option<Closure<dyn FnMut(Event)>>,
}

impl DomSurface {
    pub fn new(document: Document, on_action: impl Fn(BubbleAction) + 'static) -> Self {
        Self {
            document,
            root: None,
            on_action: Rc::new(on_action),
            _on_click: None,
        }
    }

    /// True when `node` is the bubble or one of its descendants
    pub fn contains(&self, node: &Node) -> bool {
        self.root
            .as_ref()
            .map(|root| root.contains(Some(node)))
            .unwrap_or(false)
    }

    pub fn contains_target(&self, event: &Event) -> bool {
        event
            .target()
            .and_then(|target| target.dyn_into::<Node>().ok())
            .map(|node| self.contains(&node))
            .unwrap_or(false)
    }

    fn inject_styles(&self) -> Result<(), JsValue> {
        if self.document.get_element_by_id(STYLE_ELEMENT_ID).is_some() {
            return Ok(());
        }
        let style = self.document.create_element("style")?;
        style.set_id(STYLE_ELEMENT_ID);
        style.set_text_content(Some(BUBBLE_STYLES));

        let parent: Element = match self.document.head() {
            Some(head) => head.into(),
            None => self
                .document
                .document_element()
                .ok_or_else(|| JsValue::from_str("document has no root element"))?,
        };
        parent.append_child(&style)?;
        Ok(())
    }

    fn create(&mut self) -> Result<(), JsValue> {
        self.inject_styles()?;

        let root: HtmlElement = self.element("div", "lexly-bubble")?.dyn_into()?;
        root.append_child(&*self.element("div", "lexly-bubble-inner")?)?;

        let on_action = self.on_action.clone();
        let on_click = Closure::wrap(Box::new(move |event: Event| {
            let action = event
                .target()
                .and_then(|target| target.dyn_into::<Element>().ok())
                .and_then(|el| {
                    el.closest(&format!("[{}]", BubbleAction::ATTRIBUTE))
                        .ok()
                        .flatten()
                })
                .and_then(|el| el.get_attribute(BubbleAction::ATTRIBUTE))
                .and_then(|value| BubbleAction::parse(&value));

            if let Some(action) = action {
                event.stop_propagation();
                on_action(action);
            }
        }) as Box<dyn FnMut(Event)>);
        root.add_event_listener_with_callback("click", on_click.as_ref().unchecked_ref())?;

        let body = self
            .document
            .body()
            .ok_or_else(|| JsValue::from_str("document has no body"))?;
        body.append_child(&root)?;

        self.root = Some(root);
        self._on_click = Some(on_click);
        Ok(())
    }

    fn element(&self, tag: &str, class: &str) -> Result<Element, JsValue> {
        let el = self.document.create_element(tag)?;
        el.set_class_name(class);
        Ok(el)
    }

    fn text(&self, tag: &str, class: &str, text: &str) -> Result<Element, JsValue> {
        let el = self.element(tag, class)?;
        el.set_text_content(Some(text));
        Ok(el)
    }

    fn try_render(&self, view: &BubbleView) -> Result<(), JsValue> {
        let Some(root) = &self.root else {
            return Ok(());
        };
        let Some(inner) = root.query_selector(".lexly-bubble-inner")? else {
            return Ok(());
        };
        inner.set_text_content(None);

        match view {
            BubbleView::Prompt { word } => {
                inner.append_child(&*self.text("div", "lexly-icon", "L")?)?;

                let content = self.element("div", "lexly-content")?;
                let label = self.element("div", "lexly-word-label")?;
                label.append_child(&self.document.create_text_node("Save "))?;
                label.append_child(&*self.text("em", "lexly-word", word)?)?;
                label.append_child(&self.document.create_text_node("?"))?;
                content.append_child(&label)?;
                content.append_child(&*self.text(
                    "div",
                    "lexly-sub",
                    "Add to your Lexly dictionary",
                )?)?;
                inner.append_child(&content)?;

                let actions = self.element("div", "lexly-actions")?;
                for (action, class, label) in [
                    (BubbleAction::Save, "lexly-btn-save", "Save"),
                    (BubbleAction::Close, "lexly-btn-close", "✕"),
                ] {
                    let button = self.text("button", class, label)?;
                    button.set_attribute("type", "button")?;
                    button.set_attribute(BubbleAction::ATTRIBUTE, action.as_str())?;
                    actions.append_child(&button)?;
                }
                inner.append_child(&actions)?;
            }
            BubbleView::Saving { word } => {
                let toast = self.element("div", "lexly-toast")?;
                toast.append_child(&*self.element("div", "lexly-spinner")?)?;
                let text = self.element("div", "lexly-toast-text")?;
                text.append_child(&self.document.create_text_node("Saving "))?;
                text.append_child(&*self.text("span", "lexly-word", word)?)?;
                text.append_child(&self.document.create_text_node("…"))?;
                toast.append_child(&text)?;
                inner.append_child(&toast)?;
            }
            BubbleView::Toast(toast) => {
                let tone = match toast.tone {
                    ToastTone::Info => "lexly-toast-text lexly-info",
                    ToastTone::Error => "lexly-toast-text lexly-error",
                };
                let el = self.element("div", "lexly-toast")?;
                el.append_child(&*self.text("div", "lexly-toast-icon", toast.icon)?)?;
                el.append_child(&*self.text("div", tone, toast.message)?)?;
                inner.append_child(&el)?;
            }
        }
        Ok(())
    }

    fn try_reveal(&self) -> Result<(), JsValue> {
        if let Some(root) = &self.root {
            let classes = root.class_list();
            classes.remove_1(VISIBLE_CLASS)?;
            // Reading layout flushes styles so the transition restarts.
            let _ = root.offset_width();
            classes.add_1(VISIBLE_CLASS)?;
        }
        Ok(())
    }

    fn try_place(&self, placement: Placement) -> Result<(), JsValue> {
        if let Some(root) = &self.root {
            let style = root.style();
            style.set_property("left", &format!("{}px", placement.left))?;
            style.set_property("top", &format!("{}px", placement.top))?;
        }
        Ok(())
    }
}

impl BubbleSurface for DomSurface {
    fn is_attached(&self) -> bool {
        match (&self.root, self.document.body()) {
            (Some(root), Some(body)) => body.contains(Some(root.as_ref())),
            _ => false,
        }
    }

    fn ensure_attached(&mut self) {
        if self.is_attached() {
            return;
        }
        self.detach();
        if let Err(e) = self.create() {
            log::error!("Failed to create Lexly bubble: {}", js_error_text(&e));
        }
    }

    fn render(&mut self, view: &BubbleView) {
        if let Err(e) = self.try_render(view) {
            log::warn!("Failed to render Lexly bubble: {}", js_error_text(&e));
        }
    }

    fn place(&mut self, placement: Placement) {
        if let Err(e) = self.try_place(placement) {
            log::warn!("Failed to position Lexly bubble: {}", js_error_text(&e));
        }
    }

    fn reveal(&mut self) {
        if let Err(e) = self.try_reveal() {
            log::warn!("Failed to show Lexly bubble: {}", js_error_text(&e));
        }
    }

    fn conceal(&mut self) {
        if let Some(root) = &self.root {
            if let Err(e) = root.class_list().remove_1(VISIBLE_CLASS) {
                log::warn!("Failed to hide Lexly bubble: {}", js_error_text(&e));
            }
        }
    }

    fn detach(&mut self) {
        if let Some(root) = self.root.take() {
            root.remove();
        }
        self._on_click = None;
    }
}
