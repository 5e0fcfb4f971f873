use std::rc::Rc;

use crate::config::{MOBILE_MAX_WIDTH, TABLET_MAX_WIDTH};

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Bucket {
    Mobile,
    Tablet,
    Desktop,
}

impl Bucket {
    pub fn for_width(width: f64) -> Self {
        if width <= MOBILE_MAX_WIDTH {
            Self::Mobile
        } else if width <= TABLET_MAX_WIDTH {
            Self::Tablet
        } else {
            Self::Desktop
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Mobile => "mobile",
            Self::Tablet => "tablet",
            Self::Desktop => "desktop",
        }
    }

    pub fn is_mobile(self) -> bool {
        matches!(self, Self::Mobile)
    }
}

#[derive(Clone, Copy, PartialEq, Debug)]
pub struct ViewportState {
    pub width: f64,
    pub height: f64,
    pub bucket: Bucket,
}

impl ViewportState {
    pub fn measured(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            bucket: Bucket::for_width(width),
        }
    }

    /// Chooses one of three values by bucket.
    pub fn pick<T>(&self, mobile: T, tablet: T, desktop: T) -> T {
        match self.bucket {
            Bucket::Mobile => mobile,
            Bucket::Tablet => tablet,
            Bucket::Desktop => desktop,
        }
    }
}

/// The platform side of the hub: a single window resize subscription.
pub trait ResizeSource {
    fn attach(&mut self);
    fn detach(&mut self);
    fn measure(&self) -> (f64, f64);
}

pub type SubscriberId = u64;
pub type ViewportListener = Rc<dyn Fn(ViewportState)>;

/// Listeners to call after the hub borrow is released.
pub struct Notification {
    pub state: ViewportState,
    pub listeners: Vec<ViewportListener>,
}

impl Notification {
    pub fn deliver(self) {
        for listener in self.listeners {
            listener(self.state);
        }
    }
}

/// Reference-counted viewport probe. The platform listener exists exactly
/// while at least one subscriber does.
pub struct ViewportHub<S: ResizeSource> {
    source: S,
    attached: bool,
    current: ViewportState,
    next_id: SubscriberId,
    subscribers: Vec<(SubscriberId, ViewportListener)>,
}

impl<S: ResizeSource> ViewportHub<S> {
    pub fn new(source: S) -> Self {
        let (width, height) = source.measure();
        Self {
            source,
            attached: false,
            current: ViewportState::measured(width, height),
            next_id: 1,
            subscribers: Vec::new(),
        }
    }

    pub fn current(&self) -> ViewportState {
        self.current
    }

    #[cfg(test)]
    fn is_attached(&self) -> bool {
        self.attached
    }

    pub fn subscribe(&mut self, listener: ViewportListener) -> (SubscriberId, ViewportState) {
        if !self.attached {
            self.source.attach();
            self.attached = true;
            let (width, height) = self.source.measure();
            self.current = ViewportState::measured(width, height);
        }

        let id = self.next_id;
        self.next_id += 1;
        self.subscribers.push((id, listener));
        (id, self.current)
    }

    pub fn unsubscribe(&mut self, id: SubscriberId) {
        self.subscribers.retain(|(subscriber_id, _)| *subscriber_id != id);

        if self.subscribers.is_empty() && self.attached {
            self.source.detach();
            self.attached = false;
        }
    }

    /// Re-measures and returns the listeners to notify, or `None` when the
    /// size did not change.
    pub fn on_resize(&mut self) -> Option<Notification> {
        let (width, height) = self.source.measure();
        let next = ViewportState::measured(width, height);

        if next == self.current {
            return None;
        }

        self.current = next;
        Some(Notification {
            state: next,
            listeners: self
                .subscribers
                .iter()
                .map(|(_, listener)| Rc::clone(listener))
                .collect(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::{Cell, RefCell};

    struct FakeWindow {
        size: Rc<Cell<(f64, f64)>>,
        attaches: Rc<Cell<u32>>,
        detaches: Rc<Cell<u32>>,
    }

    fn fake_window(width: f64) -> (FakeWindow, Rc<Cell<(f64, f64)>>, Rc<Cell<u32>>, Rc<Cell<u32>>) {
        let size = Rc::new(Cell::new((width, 800.0)));
        let attaches = Rc::new(Cell::new(0));
        let detaches = Rc::new(Cell::new(0));
        let window = FakeWindow {
            size: Rc::clone(&size),
            attaches: Rc::clone(&attaches),
            detaches: Rc::clone(&detaches),
        };
        (window, size, attaches, detaches)
    }

    impl ResizeSource for FakeWindow {
        fn attach(&mut self) {
            self.attaches.set(self.attaches.get() + 1);
        }

        fn detach(&mut self) {
            self.detaches.set(self.detaches.get() + 1);
        }

        fn measure(&self) -> (f64, f64) {
            self.size.get()
        }
    }

    #[test]
    fn bucket_boundaries() {
        assert_eq!(Bucket::for_width(768.0), Bucket::Mobile);
        assert_eq!(Bucket::for_width(769.0), Bucket::Tablet);
        assert_eq!(Bucket::for_width(1024.0), Bucket::Tablet);
        assert_eq!(Bucket::for_width(1025.0), Bucket::Desktop);
        assert_eq!(Bucket::for_width(0.0), Bucket::Mobile);
    }

    #[test]
    fn listener_attached_once_and_detached_with_last_subscriber() {
        let (window, _size, attaches, detaches) = fake_window(1280.0);
        let mut hub = ViewportHub::new(window);

        let (first, state) = hub.subscribe(Rc::new(|_| {}));
        let (second, _) = hub.subscribe(Rc::new(|_| {}));
        assert_eq!(state.bucket, Bucket::Desktop);
        assert_eq!(attaches.get(), 1);

        hub.unsubscribe(first);
        assert_eq!(detaches.get(), 0);
        assert!(hub.is_attached());

        hub.unsubscribe(second);
        assert_eq!(detaches.get(), 1);
        assert!(!hub.is_attached());

        hub.subscribe(Rc::new(|_| {}));
        assert_eq!(attaches.get(), 2);
    }

    #[test]
    fn resize_notifies_every_subscriber_with_new_bucket() {
        let (window, size, _, _) = fake_window(1280.0);
        let mut hub = ViewportHub::new(window);
        let seen = Rc::new(RefCell::new(Vec::new()));

        for _ in 0..2 {
            let seen = Rc::clone(&seen);
            hub.subscribe(Rc::new(move |state: ViewportState| seen.borrow_mut().push(state.bucket)));
        }

        size.set((700.0, 800.0));
        hub.on_resize().expect("size changed").deliver();

        assert_eq!(*seen.borrow(), vec![Bucket::Mobile, Bucket::Mobile]);
        assert_eq!(hub.current().bucket, Bucket::Mobile);
    }

    #[test]
    fn unchanged_size_produces_no_notification() {
        let (window, _size, _, _) = fake_window(900.0);
        let mut hub = ViewportHub::new(window);
        hub.subscribe(Rc::new(|_| {}));

        assert!(hub.on_resize().is_none());
    }

    #[test]
    fn steady_state_matches_direct_computation_after_burst() {
        let (window, size, _, _) = fake_window(1280.0);
        let mut hub = ViewportHub::new(window);
        hub.subscribe(Rc::new(|_| {}));

        for width in [1100.0, 1000.0, 800.0, 760.0, 1024.0] {
            size.set((width, 700.0));
            let _ = hub.on_resize();
        }

        assert_eq!(hub.current().bucket, Bucket::for_width(1024.0));
    }

    #[test]
    fn pick_selects_by_bucket() {
        let state = ViewportState::measured(900.0, 600.0);
        assert_eq!(state.pick(1, 2, 3), 2);
    }
}
