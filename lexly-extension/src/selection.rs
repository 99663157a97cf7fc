//! Selection watcher: decides whether the current page selection deserves
//! the save bubble.

use crate::bubble::AnchorRect;
use crate::timer::{DelayedAction, Scheduler};

/// Limits that keep the bubble to words and short phrases.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectionRules {
    pub min_chars: usize,
    pub max_chars: usize,
    pub max_words: usize,
}

impl Default for SelectionRules {
    fn default() -> Self {
        Self {
            min_chars: 2,
            max_chars: 60,
            max_words: 3,
        }
    }
}

impl SelectionRules {
    /// The trimmed text when it qualifies, `None` otherwise
    pub fn candidate<'a>(&self, raw: &'a str) -> Option<&'a str> {
        let text = raw.trim();
        let chars = text.chars().count();
        if chars < self.min_chars || chars > self.max_chars {
            return None;
        }
        if text.split_whitespace().count() > self.max_words {
            return None;
        }
        Some(text)
    }
}

/// What the page saw when the debounce elapsed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SelectionSnapshot {
    pub text: Option<String>,
    /// The selection starts inside the bubble itself
    pub anchored_in_bubble: bool,
    /// Bounding rectangle of the first range, if there is one
    pub rect: Option<AnchorRect>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SelectionDecision {
    Show { word: String, anchor: AnchorRect },
    Hide,
    /// Leave the bubble as it is
    Ignore,
}

pub fn decide(rules: &SelectionRules, snapshot: &SelectionSnapshot) -> SelectionDecision {
    let Some(word) = snapshot
        .text
        .as_deref()
        .and_then(|text| rules.candidate(text))
    else {
        return SelectionDecision::Hide;
    };

    if snapshot.anchored_in_bubble {
        return SelectionDecision::Ignore;
    }

    match snapshot.rect {
        Some(anchor) if anchor.width > 0.0 => SelectionDecision::Show {
            word: word.to_string(),
            anchor,
        },
        _ => SelectionDecision::Ignore,
    }
}

/// Page events the content script listens to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageEvent {
    PointerUp,
    PointerDown,
    Scroll,
    Resize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageResponse {
    /// Restart the debounce and inspect the selection afterwards
    Inspect,
    Hide,
    Ignore,
}

/// How the bubble reacts to `event`, given whether its target lies inside
/// the bubble. Scroll and resize always hide, wherever they originate.
pub fn route(event: PageEvent, inside_bubble: bool) -> PageResponse {
    match (event, inside_bubble) {
        (PageEvent::PointerUp | PageEvent::PointerDown, true) => PageResponse::Ignore,
        (PageEvent::PointerUp, false) => PageResponse::Inspect,
        (PageEvent::PointerDown, false) => PageResponse::Hide,
        (PageEvent::Scroll | PageEvent::Resize, _) => PageResponse::Hide,
    }
}

/// Debounces pointer releases so a drag-selection is inspected once it settles.
pub struct SelectionWatcher<S: Scheduler> {
    debounce: DelayedAction<S>,
    quiet_ms: u32,
    rules: SelectionRules,
}

impl<S: Scheduler> SelectionWatcher<S> {
    pub fn new(scheduler: S, quiet_ms: u32) -> Self {
        Self {
            debounce: DelayedAction::new(scheduler),
            quiet_ms,
            rules: SelectionRules::default(),
        }
    }

    pub fn rules(&self) -> &SelectionRules {
        &self.rules
    }

    /// Restart the quiet period; `inspect` runs once it elapses uninterrupted
    pub fn on_pointer_release(&mut self, inspect: impl FnOnce() + 'static) {
        self.debounce.arm(self.quiet_ms, inspect);
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;
    use crate::timer::manual::ManualClock;

    fn rect(width: f64) -> AnchorRect {
        AnchorRect {
            left: 100.0,
            top: 200.0,
            width,
            height: 18.0,
        }
    }

    #[test]
    fn clicks_inside_the_bubble_are_ignored() {
        assert_eq!(route(PageEvent::PointerUp, true), PageResponse::Ignore);
        assert_eq!(route(PageEvent::PointerDown, true), PageResponse::Ignore);
    }

    #[test]
    fn page_clicks_inspect_or_hide() {
        assert_eq!(route(PageEvent::PointerUp, false), PageResponse::Inspect);
        assert_eq!(route(PageEvent::PointerDown, false), PageResponse::Hide);
    }

    #[test]
    fn scroll_and_resize_always_hide() {
        for inside in [false, true] {
            assert_eq!(route(PageEvent::Scroll, inside), PageResponse::Hide);
            assert_eq!(route(PageEvent::Resize, inside), PageResponse::Hide);
        }
    }

    fn snapshot(text: &str) -> SelectionSnapshot {
        SelectionSnapshot {
            text: Some(text.to_string()),
            anchored_in_bubble: false,
            rect: Some(rect(40.0)),
        }
    }

    #[test]
    fn candidate_bounds() {
        let rules = SelectionRules::default();
        assert_eq!(rules.candidate("  ubiquitous \n"), Some("ubiquitous"));
        assert_eq!(rules.candidate("ox"), Some("ox"));
        assert_eq!(rules.candidate("a"), None);
        assert_eq!(rules.candidate("   "), None);
        assert_eq!(rules.candidate(""), None);
        assert_eq!(rules.candidate("per se ipso"), Some("per se ipso"));
        assert_eq!(rules.candidate("one two three four"), None);

        let sixty = "x".repeat(60);
        assert_eq!(rules.candidate(&sixty), Some(sixty.as_str()));
        assert_eq!(rules.candidate(&"x".repeat(61)), None);
    }

    #[test]
    fn length_is_counted_in_characters() {
        let rules = SelectionRules::default();
        assert_eq!(rules.candidate("été"), Some("été"));
        assert_eq!(rules.candidate(&"é".repeat(60)).map(str::len), Some(120));
    }

    #[test]
    fn valid_text_shows_at_range() {
        assert_eq!(
            decide(&SelectionRules::default(), &snapshot(" serendipity ")),
            SelectionDecision::Show {
                word: "serendipity".to_string(),
                anchor: rect(40.0),
            }
        );
    }

    #[test]
    fn invalid_text_hides() {
        let rules = SelectionRules::default();
        assert_eq!(decide(&rules, &snapshot("a")), SelectionDecision::Hide);
        assert_eq!(
            decide(&rules, &snapshot("far too many words here")),
            SelectionDecision::Hide
        );
        assert_eq!(
            decide(&rules, &SelectionSnapshot::default()),
            SelectionDecision::Hide
        );
    }

    #[test]
    fn selection_inside_bubble_or_without_area_is_ignored() {
        let rules = SelectionRules::default();

        let mut inside = snapshot("Save");
        inside.anchored_in_bubble = true;
        assert_eq!(decide(&rules, &inside), SelectionDecision::Ignore);

        let mut collapsed = snapshot("word");
        collapsed.rect = Some(rect(0.0));
        assert_eq!(decide(&rules, &collapsed), SelectionDecision::Ignore);

        let mut no_range = snapshot("word");
        no_range.rect = None;
        assert_eq!(decide(&rules, &no_range), SelectionDecision::Ignore);
    }

    #[test]
    fn rapid_releases_inspect_once() {
        let clock = ManualClock::new();
        let mut watcher = SelectionWatcher::new(clock.clone(), 80);
        let inspected = Rc::new(RefCell::new(Vec::new()));

        for n in 0..4 {
            let inspected = inspected.clone();
            watcher.on_pointer_release(move || inspected.borrow_mut().push(n));
            clock.advance(40);
        }
        assert!(inspected.borrow().is_empty());

        clock.advance(40);
        assert_eq!(*inspected.borrow(), vec![3]);
    }
}
