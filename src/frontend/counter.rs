use std::rc::Rc;

use yew::prelude::*;

use super::browser::{now_ms, RafScheduler};
use super::hooks::use_in_view;
use crate::config::COUNTER_DEFAULT_DURATION_MS;
use crate::counter::CounterRun;
use crate::reveal::ObserverOptions;

#[derive(Properties, PartialEq)]
pub struct AnimatedCounterProps {
    pub target: u32,
    #[prop_or(COUNTER_DEFAULT_DURATION_MS)]
    pub duration_ms: f64,
    #[prop_or_default]
    pub suffix: AttrValue,
}

#[function_component(AnimatedCounter)]
pub fn animated_counter(props: &AnimatedCounterProps) -> Html {
    let node = use_node_ref();
    let visibility = use_in_view(node.clone(), ObserverOptions::default());
    let run = use_mut_ref(|| CounterRun::with_duration(props.target, props.duration_ms));
    let frames = use_memo((), |_| RafScheduler::new());
    let redraw = use_force_update();

    {
        let run = Rc::clone(&run);
        let frames = Rc::clone(&frames);
        use_effect_with(visibility.has_fired, move |fired| {
            if *fired && run.borrow_mut().start(now_ms()) {
                redraw.force_update();

                let requester = frames.requester();
                let ticking = Rc::clone(&run);
                frames.set_callback(move |_timestamp| {
                    let more = ticking.borrow_mut().tick(now_ms());
                    redraw.force_update();
                    if more {
                        requester.request();
                    }
                });
                requester.request();
            }
            || ()
        });
    }

    {
        let frames = Rc::clone(&frames);
        use_effect_with((), move |_| move || frames.stop());
    }

    let value = run.borrow().current();

    html! {
        <span ref={node} class="counter-value">
            { value.to_string() }{ props.suffix.clone() }
        </span>
    }
}
