//! Process-wide document state, reached through one capability so that
//! components never touch `window`/`document` globals directly.

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Overflow {
    Auto,
    Hidden,
}

impl Overflow {
    pub fn as_css(self) -> &'static str {
        match self {
            Self::Auto => "auto",
            Self::Hidden => "hidden",
        }
    }
}

pub trait BrowserEnvironment {
    fn set_title(&self, title: &str);
    fn scroll_to(&self, x: f64, y: f64);
    fn scroll_y(&self) -> f64;
    fn set_body_overflow(&self, overflow: Overflow);
    /// Smooth-scrolls the element with the given id to the middle of the
    /// viewport. Missing elements are ignored.
    fn scroll_into_view(&self, element_id: &str);

    fn scroll_to_top(&self) {
        self.scroll_to(0.0, 0.0);
    }
}

#[cfg(test)]
pub mod memory {
    use super::{BrowserEnvironment, Overflow};
    use std::cell::RefCell;

    /// Records every call so tests can assert on global side effects.
    pub struct MemoryEnvironment {
        pub title: RefCell<String>,
        pub scroll: RefCell<(f64, f64)>,
        pub scroll_calls: RefCell<Vec<(f64, f64)>>,
        pub overflow: RefCell<Overflow>,
        pub scrolled_into_view: RefCell<Vec<String>>,
    }

    impl Default for MemoryEnvironment {
        fn default() -> Self {
            Self {
                title: RefCell::new(String::new()),
                scroll: RefCell::new((0.0, 0.0)),
                scroll_calls: RefCell::new(Vec::new()),
                overflow: RefCell::new(Overflow::Auto),
                scrolled_into_view: RefCell::new(Vec::new()),
            }
        }
    }

    impl MemoryEnvironment {
        pub fn scrolled_to(y: f64) -> Self {
            let env = Self::default();
            *env.scroll.borrow_mut() = (0.0, y);
            env
        }

        pub fn title(&self) -> String {
            self.title.borrow().clone()
        }

        pub fn overflow(&self) -> Overflow {
            *self.overflow.borrow()
        }
    }

    impl BrowserEnvironment for MemoryEnvironment {
        fn set_title(&self, title: &str) {
            *self.title.borrow_mut() = title.to_string();
        }

        fn scroll_to(&self, x: f64, y: f64) {
            *self.scroll.borrow_mut() = (x, y);
            self.scroll_calls.borrow_mut().push((x, y));
        }

        fn scroll_y(&self) -> f64 {
            self.scroll.borrow().1
        }

        fn set_body_overflow(&self, overflow: Overflow) {
            *self.overflow.borrow_mut() = overflow;
        }

        fn scroll_into_view(&self, element_id: &str) {
            self.scrolled_into_view.borrow_mut().push(element_id.to_string());
        }
    }
}
