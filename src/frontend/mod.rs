mod browser;
mod chrome;
mod counter;
mod forms;
mod globe;
mod hooks;
mod illustration;
mod pages;
mod reveal;

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use serde_json::json;
use web_sys::window;
use yew::prelude::*;
use yew_router::prelude::*;

use browser::WebEnvironment;
use hooks::{use_timer_slot, TimerSlot};
use reveal::RevealHub;

use crate::config::SiteConfig;
use crate::telemetry::{self, log_event, LogLevel};
use crate::transition::{Route, TransitionController, TransitionStep, ROUTE_TABLE};

/// The router resolves through the same table and resolver as the rest of
/// the crate, so there is no second list of paths to keep in sync.
impl Routable for Route {
    fn from_path(path: &str, _params: &HashMap<&str, &str>) -> Option<Self> {
        Some(Route::from_path(path))
    }

    fn to_path(&self) -> String {
        self.path().to_string()
    }

    fn routes() -> Vec<&'static str> {
        ROUTE_TABLE
            .iter()
            .map(|(path, _)| *path)
            .chain(std::iter::once(Route::NotFound.path()))
            .collect()
    }

    fn not_found_route() -> Option<Self> {
        Some(Route::NotFound)
    }

    fn recognize(pathname: &str) -> Option<Self> {
        Some(Route::from_path(pathname))
    }
}

fn render_page(route: Route) -> Html {
    match route {
        Route::Home => html! { <pages::Home /> },
        Route::About => html! { <pages::About /> },
        Route::Countries => html! { <pages::Countries /> },
        Route::Gallery => html! { <pages::Gallery /> },
        Route::Blog => html! { <pages::Blog /> },
        Route::Inquiry => html! { <pages::Inquiry /> },
        Route::Contact => html! { <pages::Contact /> },
        Route::NotFound => html! { <pages::NotFound /> },
    }
}

/// Runs the controller's timed steps. Exit and enter timers live in
/// separate slots so a step never replaces the timer that invoked it.
#[derive(Clone)]
struct TransitionDriver {
    controller: Rc<RefCell<TransitionController>>,
    exit: TimerSlot,
    enter: TimerSlot,
    redraw: UseForceUpdateHandle,
}

impl TransitionDriver {
    fn apply(&self, step: TransitionStep) {
        self.redraw.force_update();

        match step {
            TransitionStep::None => {}
            TransitionStep::ExitFor { ms } => {
                self.enter.cancel();
                let driver = self.clone();
                self.exit.schedule(ms, move || {
                    let next = driver.controller.borrow_mut().exit_finished(&WebEnvironment);
                    driver.apply(next);
                });
            }
            TransitionStep::EnterFor { ms } => {
                let driver = self.clone();
                self.enter.schedule(ms, move || {
                    driver.controller.borrow_mut().enter_finished();
                    driver.redraw.force_update();
                });
            }
        }
    }
}

#[function_component(Shell)]
fn shell() -> Html {
    let route = use_route::<Route>().unwrap_or(Route::NotFound);
    let controller = use_mut_ref(|| TransitionController::new(route));
    let exit = use_timer_slot();
    let enter = use_timer_slot();
    let redraw = use_force_update();
    let refresh = use_timer_slot();
    let driver = TransitionDriver {
        controller: Rc::clone(&controller),
        exit,
        enter,
        redraw,
    };
    let hub = use_context::<RevealHub>();

    {
        let driver = driver.clone();
        use_effect_with((), move |_| {
            let step = driver.controller.borrow().mount(&WebEnvironment);
            driver.apply(step);

            // Reveal children register in their own effects; refresh after them.
            if let Some(hub) = hub {
                refresh.schedule(0, move || {
                    let revealed = hub.refresh();
                    log_event(LogLevel::Debug, "reveal_refreshed", json!({ "in_view": revealed }));
                });
            }
            || ()
        });
    }

    {
        let driver = driver.clone();
        use_effect_with(route, move |route| {
            let step = driver.controller.borrow_mut().navigate(*route, &WebEnvironment);
            if step != TransitionStep::None {
                driver.apply(step);
            }
            || ()
        });
    }

    let frame = controller.borrow().frame();

    html! {
        <div class="page-frame" key={frame.route.path()} style={frame.style}>
            { render_page(frame.route) }
        </div>
    }
}

#[function_component(App)]
fn app() -> Html {
    let hub = use_memo((), |_| RevealHub::default());

    html! {
        <BrowserRouter>
            <ContextProvider<RevealHub> context={(*hub).clone()}>
                <Shell />
            </ContextProvider<RevealHub>>
        </BrowserRouter>
    }
}

pub fn run() {
    console_error_panic_hook::set_once();

    let config = SiteConfig::from_build_env();
    telemetry::init(config.log_level);
    log_event(
        LogLevel::Info,
        "site_started",
        json!({
            "log_level": config.log_level.as_str(),
            "illustration_url": config.illustration_url,
        }),
    );

    yew::Renderer::<App>::with_root(
        window()
            .and_then(|w| w.document())
            .and_then(|d| d.get_element_by_id("app"))
            .expect("missing #app mount point"),
    )
    .render();
}
