//! Bubble presenter: the floating "Save this word?" prompt.
//!
//! The presenter logic is independent of the DOM. [`BubbleSurface`] is the
//! seam; [`dom::DomSurface`] is the page implementation.

pub mod dom;
pub mod styles;

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use crate::api::{LexlyApi, SaveOutcome};
use crate::config::ExtensionConfig;
use crate::error::ApiError;
use crate::storage::SessionStore;
use crate::timer::{DelayedAction, Scheduler};

// ============================================================================
// Geometry
// ============================================================================

/// Viewport-relative rectangle of the selected text.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct AnchorRect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ScrollOffset {
    pub x: f64,
    pub y: f64,
}

/// Document coordinates of the bubble's anchor point.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Placement {
    pub left: f64,
    pub top: f64,
}

/// Centre horizontally over the selection, sit `offset` above it, and never
/// go above the visible scroll position.
pub fn placement(anchor: AnchorRect, scroll: ScrollOffset, config: &ExtensionConfig) -> Placement {
    let left = anchor.left + anchor.width / 2.0 + scroll.x;
    let top = anchor.top + scroll.y - config.bubble_offset_px;
    Placement {
        left,
        top: top.max(scroll.y + config.bubble_top_margin_px),
    }
}

// ============================================================================
// Views
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastTone {
    Info,
    Error,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Toast {
    pub icon: &'static str,
    pub message: &'static str,
    pub tone: ToastTone,
}

impl Toast {
    pub fn dismiss_after_ms(&self, config: &ExtensionConfig) -> u32 {
        match self.tone {
            ToastTone::Info => config.info_toast_ms,
            ToastTone::Error => config.error_toast_ms,
        }
    }
}

/// What the bubble currently displays.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BubbleView {
    Prompt { word: String },
    Saving { word: String },
    Toast(Toast),
}

/// Outcome of pressing Save, before it is turned into a toast.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveResult {
    Saved,
    AlreadySaved,
    NotSignedIn,
    Rejected,
    Offline,
}

impl SaveResult {
    pub fn from_api(result: &Result<SaveOutcome, ApiError>) -> Self {
        match result {
            Ok(SaveOutcome::Saved) => SaveResult::Saved,
            Ok(SaveOutcome::AlreadySaved) => SaveResult::AlreadySaved,
            Err(ApiError::Network(_)) => SaveResult::Offline,
            Err(_) => SaveResult::Rejected,
        }
    }

    pub fn toast(self) -> Toast {
        let (icon, message, tone) = match self {
            SaveResult::Saved => ("✅", "Saved to your dictionary!", ToastTone::Info),
            SaveResult::AlreadySaved => ("📚", "Already in your dictionary", ToastTone::Info),
            SaveResult::NotSignedIn => ("🔒", "Sign in to Lexly first!", ToastTone::Error),
            SaveResult::Rejected => ("⚠️", "Could not save. Try again", ToastTone::Error),
            SaveResult::Offline => ("⚠️", "No connection to Lexly", ToastTone::Error),
        };
        Toast {
            icon,
            message,
            tone,
        }
    }
}

/// Intents raised from inside the bubble
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BubbleAction {
    Save,
    Close,
}

impl BubbleAction {
    pub const ATTRIBUTE: &'static str = "data-lexly-action";

    pub fn as_str(self) -> &'static str {
        match self {
            BubbleAction::Save => "save",
            BubbleAction::Close => "close",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "save" => Some(BubbleAction::Save),
            "close" => Some(BubbleAction::Close),
            _ => None,
        }
    }
}

// ============================================================================
// Surface
// ============================================================================

/// The single floating element, as the presenter sees it.
pub trait BubbleSurface {
    /// An element exists and is still in the document
    fn is_attached(&self) -> bool;

    /// Create the element if it is absent or was detached by the page
    fn ensure_attached(&mut self);

    fn render(&mut self, view: &BubbleView);

    fn place(&mut self, placement: Placement);

    /// Restart the entrance transition
    fn reveal(&mut self);

    /// Start the exit transition
    fn conceal(&mut self);

    /// Remove and drop the element
    fn detach(&mut self);
}

// ============================================================================
// Presenter
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct PendingSelection {
    pub text: String,
    pub anchor: AnchorRect,
}

struct BubbleState<S, T: Scheduler> {
    surface: S,
    dismiss: DelayedAction<T>,
    pending: Option<PendingSelection>,
    /// Bumped on every show and every removal; a save only lands on the
    /// generation it started in.
    generation: u64,
    config: ExtensionConfig,
}

/// Shared handle to the presenter. Cheap to clone.
pub struct Bubble<S, T: Scheduler> {
    inner: Rc<RefCell<BubbleState<S, T>>>,
}

impl<S, T: Scheduler> Clone for Bubble<S, T> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

/// Non-owning handle, for callbacks the surface itself holds.
pub struct WeakBubble<S, T: Scheduler> {
    inner: Weak<RefCell<BubbleState<S, T>>>,
}

impl<S, T: Scheduler> Clone for WeakBubble<S, T> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<S, T: Scheduler> WeakBubble<S, T> {
    pub fn upgrade(&self) -> Option<Bubble<S, T>> {
        self.inner.upgrade().map(|inner| Bubble { inner })
    }
}

impl<S: BubbleSurface + 'static, T: Scheduler + 'static> Bubble<S, T> {
    pub fn new(surface: S, scheduler: T, config: ExtensionConfig) -> Self {
        Self::new_cyclic(|_| surface, scheduler, config)
    }

    /// Build a presenter whose surface needs a way back to it (button callbacks)
    pub fn new_cyclic(
        make_surface: impl FnOnce(WeakBubble<S, T>) -> S,
        scheduler: T,
        config: ExtensionConfig,
    ) -> Self {
        let inner = Rc::new_cyclic(|weak| {
            RefCell::new(BubbleState {
                surface: make_surface(WeakBubble {
                    inner: weak.clone(),
                }),
                dismiss: DelayedAction::new(scheduler),
                pending: None,
                generation: 0,
                config,
            })
        });
        Self { inner }
    }

    pub fn downgrade(&self) -> WeakBubble<S, T> {
        WeakBubble {
            inner: Rc::downgrade(&self.inner),
        }
    }

    pub fn with_surface<R>(&self, f: impl FnOnce(&S) -> R) -> R {
        f(&self.inner.borrow().surface)
    }

    pub fn pending_word(&self) -> Option<String> {
        self.inner
            .borrow()
            .pending
            .as_ref()
            .map(|pending| pending.text.clone())
    }

    pub fn is_attached(&self) -> bool {
        self.inner.borrow().surface.is_attached()
    }

    /// Offer `word` for saving, above `anchor`.
    pub fn show(&self, word: &str, anchor: AnchorRect, scroll: ScrollOffset) {
        let mut state = self.inner.borrow_mut();
        state.dismiss.cancel();
        state.generation += 1;
        state.pending = Some(PendingSelection {
            text: word.to_string(),
            anchor,
        });

        let at = placement(anchor, scroll, &state.config);
        let surface = &mut state.surface;
        surface.ensure_attached();
        surface.render(&BubbleView::Prompt {
            word: word.to_string(),
        });
        surface.place(at);
        surface.reveal();
    }

    /// Fade out, then remove the element once the grace period passes.
    /// Calling again restarts the grace period; the element is removed once.
    pub fn hide(&self) {
        let weak = self.downgrade();
        let mut state = self.inner.borrow_mut();
        if !state.surface.is_attached() {
            return;
        }

        state.surface.conceal();
        let grace = state.config.hide_grace_ms;
        state.dismiss.arm(grace, move || {
            if let Some(bubble) = weak.upgrade() {
                bubble.destroy();
            }
        });
    }

    fn destroy(&self) {
        let mut state = self.inner.borrow_mut();
        state.dismiss.cancel();
        state.surface.detach();
        state.pending = None;
        state.generation += 1;
    }

    /// Save the pending word and report the outcome as a toast.
    pub async fn save<A: LexlyApi, St: SessionStore>(&self, api: &A, store: &St) {
        let started = {
            let mut state = self.inner.borrow_mut();
            match state.pending.clone() {
                Some(pending) if state.surface.is_attached() => {
                    state.surface.render(&BubbleView::Saving {
                        word: pending.text.clone(),
                    });
                    Some((pending.text, state.generation))
                }
                _ => None,
            }
        };
        let Some((word, generation)) = started else {
            return;
        };

        let token = match store.token().await {
            Ok(token) => token,
            Err(e) => {
                log::warn!("Could not read Lexly session: {e}");
                None
            }
        };

        let result = match token {
            None => SaveResult::NotSignedIn,
            Some(token) => {
                let response = api.save_word(&token, &word).await;
                if let Err(e) = &response {
                    log::warn!("Saving \"{word}\" failed: {e}");
                }
                SaveResult::from_api(&response)
            }
        };

        self.finish_save(generation, result);
    }

    fn finish_save(&self, generation: u64, result: SaveResult) {
        let weak = self.downgrade();
        let mut state = self.inner.borrow_mut();
        if state.generation != generation {
            log::debug!("Discarding stale save result: {result:?}");
            return;
        }

        let toast = result.toast();
        state.surface.render(&BubbleView::Toast(toast));
        let delay = toast.dismiss_after_ms(&state.config);
        state.dismiss.arm(delay, move || {
            if let Some(bubble) = weak.upgrade() {
                bubble.hide();
            }
        });
    }
}
