use std::cell::RefCell;
use std::rc::Rc;

use web_sys::Element;
use yew::prelude::*;

use super::browser::{is_in_viewport, observe_intersection, report_capability};
use super::hooks::use_timer_slot;
use crate::config::REVEAL_DEFAULT_DURATION_MS;
use crate::reveal::{reveal_style, ObserverOptions, RevealKind, RevealRegistry, RevealState, RevealTiming};

pub struct RevealHandle {
    node: NodeRef,
    trigger: Callback<()>,
}

/// Shared registry of mounted `<Reveal>` elements.
#[derive(Clone, Default)]
pub struct RevealHub(Rc<RefCell<RevealRegistry<RevealHandle>>>);

impl PartialEq for RevealHub {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl RevealHub {
    /// Fires every registered element already laid out inside the viewport.
    pub fn refresh(&self) -> usize {
        let mut due = Vec::new();
        let count = self.0.borrow().refresh(|handle| {
            let visible = handle
                .node
                .cast::<Element>()
                .is_some_and(|element| is_in_viewport(&element));
            if visible {
                due.push(handle.trigger.clone());
            }
            visible
        });

        for trigger in due {
            trigger.emit(());
        }
        count
    }
}

#[derive(Properties, PartialEq)]
pub struct RevealProps {
    #[prop_or(RevealKind::FadeUp)]
    pub kind: RevealKind,
    #[prop_or_default]
    pub delay_ms: u32,
    #[prop_or(REVEAL_DEFAULT_DURATION_MS)]
    pub duration_ms: u32,
    #[prop_or_default]
    pub class: Classes,
    #[prop_or_default]
    pub children: Html,
}

#[function_component(Reveal)]
pub fn reveal(props: &RevealProps) -> Html {
    let node = use_node_ref();
    let state = use_mut_ref(RevealState::default);
    let redraw = use_force_update();
    let settle = use_timer_slot();
    let hub = use_context::<RevealHub>();
    let timing = RevealTiming {
        delay_ms: props.delay_ms,
        duration_ms: props.duration_ms,
    };

    let enter = {
        let state = Rc::clone(&state);
        let redraw = redraw.clone();
        let settle = settle.clone();
        Callback::from(move |_: ()| {
            if !state.borrow_mut().observe(true) {
                return;
            }
            redraw.force_update();

            let state = Rc::clone(&state);
            let redraw = redraw.clone();
            settle.schedule(timing.total_ms(), move || {
                state.borrow_mut().finish_entering();
                redraw.force_update();
            });
        })
    };

    {
        let node = node.clone();
        let state = Rc::clone(&state);
        let redraw = redraw.clone();
        use_effect_with((), move |_| {
            let registration = hub.map(|hub| {
                let id = hub.0.borrow_mut().register(RevealHandle {
                    node: node.clone(),
                    trigger: enter.clone(),
                });
                (hub, id)
            });

            let observer = node.cast::<Element>().map(|element| {
                let enter = enter.clone();
                observe_intersection(&element, &ObserverOptions::default(), move |intersecting| {
                    if intersecting {
                        enter.emit(());
                    }
                })
            });

            let observer = match observer {
                Some(Ok(observer)) => Some(observer),
                Some(Err(err)) => {
                    report_capability(&err, "reveal");
                    state.borrow_mut().reveal_immediately();
                    redraw.force_update();
                    None
                }
                None => None,
            };

            move || {
                drop(observer);
                if let Some((hub, id)) = registration {
                    hub.0.borrow_mut().unregister(id);
                }
            }
        });
    }

    let phase = state.borrow().phase();
    let style = reveal_style(props.kind, phase, timing);

    html! {
        <div
            ref={node}
            class={classes!("reveal", format!("reveal-{}", props.kind.as_str()), props.class.clone())}
            style={style}
        >
            { props.children.clone() }
        </div>
    }
}
