use serde_json::json;

use crate::environment::{BrowserEnvironment, Overflow};
use crate::telemetry::{log_event, LogLevel};

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Dismissal {
    CloseButton,
    Backdrop,
    EscapeKey,
    Unmount,
}

impl Dismissal {
    fn as_str(self) -> &'static str {
        match self {
            Self::CloseButton => "close_button",
            Self::Backdrop => "backdrop",
            Self::EscapeKey => "escape_key",
            Self::Unmount => "unmount",
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum KeyOutcome {
    Closed,
    Moved(usize),
    Ignored,
}

/// Gallery modal. Owns body overflow while open and gives it back on
/// every close path.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct Lightbox {
    len: usize,
    open: Option<usize>,
    restore_scroll_y: f64,
}

impl Lightbox {
    pub fn new(len: usize) -> Self {
        Self {
            len,
            open: None,
            restore_scroll_y: 0.0,
        }
    }

    pub fn current(&self) -> Option<usize> {
        self.open
    }

    pub fn is_open(&self) -> bool {
        self.open.is_some()
    }

    /// The visible item list changed (filter); an open index past the end
    /// is clamped.
    pub fn set_len(&mut self, len: usize, env: &dyn BrowserEnvironment) {
        self.len = len;
        if let Some(index) = self.open {
            if len == 0 {
                self.close(Dismissal::Unmount, env);
            } else if index >= len {
                self.open = Some(len - 1);
            }
        }
    }

    pub fn open(&mut self, index: usize, env: &dyn BrowserEnvironment) {
        if index >= self.len {
            return;
        }
        if self.open.is_none() {
            self.restore_scroll_y = env.scroll_y();
            env.set_body_overflow(Overflow::Hidden);
            env.scroll_to(0.0, self.restore_scroll_y);
        }
        self.open = Some(index);
    }

    pub fn close(&mut self, reason: Dismissal, env: &dyn BrowserEnvironment) {
        if self.open.take().is_none() {
            return;
        }
        env.set_body_overflow(Overflow::Auto);
        env.scroll_to(0.0, self.restore_scroll_y);
        log_event(LogLevel::Debug, "lightbox_closed", json!({ "reason": reason.as_str() }));
    }

    pub fn next(&mut self) {
        if let Some(index) = self.open {
            self.open = Some((index + 1) % self.len.max(1));
        }
    }

    pub fn previous(&mut self) {
        if let Some(index) = self.open {
            let len = self.len.max(1);
            self.open = Some((index + len - 1) % len);
        }
    }

    pub fn handle_key(&mut self, key: &str, env: &dyn BrowserEnvironment) -> KeyOutcome {
        if self.open.is_none() {
            return KeyOutcome::Ignored;
        }

        match key {
            "Escape" => {
                self.close(Dismissal::EscapeKey, env);
                KeyOutcome::Closed
            }
            "ArrowRight" => {
                self.next();
                self.open.map_or(KeyOutcome::Ignored, KeyOutcome::Moved)
            }
            "ArrowLeft" => {
                self.previous();
                self.open.map_or(KeyOutcome::Ignored, KeyOutcome::Moved)
            }
            _ => KeyOutcome::Ignored,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::environment::memory::MemoryEnvironment;

    #[test]
    fn every_dismissal_path_restores_overflow() {
        for reason in [Dismissal::CloseButton, Dismissal::Backdrop, Dismissal::EscapeKey] {
            let env = MemoryEnvironment::scrolled_to(640.0);
            let mut lightbox = Lightbox::new(6);

            lightbox.open(2, &env);
            assert_eq!(env.overflow(), Overflow::Hidden);

            if reason == Dismissal::EscapeKey {
                assert_eq!(lightbox.handle_key("Escape", &env), KeyOutcome::Closed);
            } else {
                lightbox.close(reason, &env);
            }

            assert_eq!(env.overflow(), Overflow::Auto, "{reason:?}");
            assert_eq!(env.scroll_y(), 640.0);
            assert!(!lightbox.is_open());
        }
    }

    #[test]
    fn opening_pins_the_page_at_its_scroll_position() {
        let env = MemoryEnvironment::scrolled_to(480.0);
        let mut lightbox = Lightbox::new(4);

        lightbox.open(1, &env);
        assert_eq!(*env.scroll_calls.borrow(), vec![(0.0, 480.0)]);

        lightbox.open(2, &env);
        assert_eq!(env.scroll_calls.borrow().len(), 1);

        lightbox.close(Dismissal::CloseButton, &env);
        assert_eq!(*env.scroll_calls.borrow(), vec![(0.0, 480.0), (0.0, 480.0)]);
    }

    #[test]
    fn arrows_cycle_through_items() {
        let env = MemoryEnvironment::default();
        let mut lightbox = Lightbox::new(3);
        lightbox.open(2, &env);

        assert_eq!(lightbox.handle_key("ArrowRight", &env), KeyOutcome::Moved(0));
        assert_eq!(lightbox.handle_key("ArrowLeft", &env), KeyOutcome::Moved(2));
        assert_eq!(lightbox.handle_key("Enter", &env), KeyOutcome::Ignored);
    }

    #[test]
    fn keys_are_ignored_while_closed() {
        let env = MemoryEnvironment::default();
        let mut lightbox = Lightbox::new(3);
        assert_eq!(lightbox.handle_key("Escape", &env), KeyOutcome::Ignored);
        assert_eq!(env.overflow(), Overflow::Auto);
    }

    #[test]
    fn switching_items_keeps_first_scroll_position() {
        let env = MemoryEnvironment::scrolled_to(100.0);
        let mut lightbox = Lightbox::new(4);
        lightbox.open(0, &env);
        env.scroll_to(0.0, 999.0);
        lightbox.open(3, &env);

        lightbox.close(Dismissal::Backdrop, &env);
        assert_eq!(env.scroll_y(), 100.0);
    }

    #[test]
    fn out_of_range_open_is_ignored() {
        let env = MemoryEnvironment::default();
        let mut lightbox = Lightbox::new(2);
        lightbox.open(5, &env);
        assert!(!lightbox.is_open());
        assert_eq!(env.overflow(), Overflow::Auto);
    }

    #[test]
    fn shrinking_the_list_clamps_the_open_item() {
        let env = MemoryEnvironment::default();
        let mut lightbox = Lightbox::new(8);
        lightbox.open(7, &env);
        lightbox.set_len(3, &env);
        assert_eq!(lightbox.current(), Some(2));

        lightbox.set_len(0, &env);
        assert!(!lightbox.is_open());
        assert_eq!(env.overflow(), Overflow::Auto);
    }

    #[test]
    fn closing_twice_touches_environment_once() {
        let env = MemoryEnvironment::default();
        let mut lightbox = Lightbox::new(2);
        lightbox.open(0, &env);
        lightbox.close(Dismissal::CloseButton, &env);
        env.set_body_overflow(Overflow::Hidden);
        lightbox.close(Dismissal::Unmount, &env);
        assert_eq!(env.overflow(), Overflow::Hidden);
    }
}
