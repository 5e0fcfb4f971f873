use std::cell::RefCell;
use std::rc::Rc;

use gloo_timers::callback::Timeout;
use web_sys::Element;
use yew::prelude::*;

use super::browser::{observe_intersection, report_capability, with_viewport_hub, ObserverHandle};
use crate::reveal::{ObserverOptions, Visibility};
use crate::viewport::ViewportState;

/// A cancellable one-shot timer owned by a component. Scheduling replaces
/// (and cancels) whatever was pending; dropping the slot cancels too.
#[derive(Clone, Default)]
pub struct TimerSlot(Rc<RefCell<Option<Timeout>>>);

impl TimerSlot {
    pub fn schedule<F>(&self, millis: u32, callback: F)
    where
        F: FnOnce() + 'static,
    {
        let timeout = Timeout::new(millis, callback);
        *self.0.borrow_mut() = Some(timeout);
    }

    pub fn cancel(&self) {
        let pending = self.0.borrow_mut().take();
        drop(pending);
    }
}

#[hook]
pub fn use_timer_slot() -> TimerSlot {
    let slot = use_memo((), |_| TimerSlot::default());
    {
        let slot = (*slot).clone();
        use_effect_with((), move |_| move || slot.cancel());
    }
    (*slot).clone()
}

#[hook]
pub fn use_viewport() -> ViewportState {
    let state = use_state(|| with_viewport_hub(|hub| hub.current()));

    {
        let setter = state.setter();
        use_effect_with((), move |_| {
            let listener_setter = setter.clone();
            let (id, current) = with_viewport_hub(|hub| {
                hub.subscribe(Rc::new(move |next: ViewportState| listener_setter.set(next)))
            });
            setter.set(current);

            move || with_viewport_hub(|hub| hub.unsubscribe(id))
        });
    }

    *state
}

/// Tracks whether `node` is on screen. `has_fired` latches on the first
/// intersection; the observer is disconnected on unmount.
#[hook]
pub fn use_in_view(node: NodeRef, options: ObserverOptions) -> Visibility {
    let visibility = use_mut_ref(Visibility::default);
    let redraw = use_force_update();

    {
        let visibility = Rc::clone(&visibility);
        use_effect_with(options, move |options| {
            let mut handle: Option<ObserverHandle> = None;

            match node.cast::<Element>() {
                Some(element) => {
                    let observed = Rc::clone(&visibility);
                    let redraw = redraw.clone();
                    let observed_result = observe_intersection(&element, options, move |intersecting| {
                        let before = *observed.borrow();
                        observed.borrow_mut().record(intersecting);
                        if *observed.borrow() != before {
                            redraw.force_update();
                        }
                    });

                    match observed_result {
                        Ok(observer) => handle = Some(observer),
                        Err(err) => {
                            report_capability(&err, "in_view");
                            *visibility.borrow_mut() = Visibility::assumed_visible();
                            redraw.force_update();
                        }
                    }
                }
                None => {
                    *visibility.borrow_mut() = Visibility::assumed_visible();
                    redraw.force_update();
                }
            }

            move || drop(handle)
        });
    }

    let current = *visibility.borrow();
    current
}
