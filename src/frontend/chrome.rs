use yew::prelude::*;
use yew_router::prelude::*;

use super::browser::{report_capability, WebEnvironment, WindowListener};
use super::hooks::use_viewport;
use crate::config::BACK_TO_TOP_THRESHOLD_PX;
use crate::environment::BrowserEnvironment;
use crate::transition::{Route, ROUTE_TABLE};

const HEADER_SOLID_AFTER_PX: f64 = 50.0;

/// Whether the window is scrolled past `threshold`; re-renders only when that flips.
#[hook]
fn use_scrolled_past(threshold: f64) -> bool {
    let past = use_state_eq(|| WebEnvironment.scroll_y() > threshold);

    {
        let setter = past.setter();
        use_effect_with(threshold, move |threshold| {
            let threshold = *threshold;
            let listener = WindowListener::new("scroll", move |_| {
                setter.set(WebEnvironment.scroll_y() > threshold);
            });
            let listener = match listener {
                Ok(listener) => Some(listener),
                Err(err) => {
                    report_capability(&err, "scroll");
                    None
                }
            };
            move || drop(listener)
        });
    }

    *past
}

#[function_component(Header)]
pub fn header() -> Html {
    let viewport = use_viewport();
    let menu_open = use_state(|| false);
    let solid = use_scrolled_past(HEADER_SOLID_AFTER_PX);
    let current = use_route::<Route>().unwrap_or(Route::NotFound);

    let on_toggle = {
        let menu_open = menu_open.clone();
        Callback::from(move |_: MouseEvent| menu_open.set(!*menu_open))
    };
    let on_pick = {
        let menu_open = menu_open.clone();
        Callback::from(move |_: MouseEvent| menu_open.set(false))
    };

    let collapsed = viewport.bucket.is_mobile();
    let show_links = !collapsed || *menu_open;

    html! {
        <header class={classes!("site-header", solid.then_some("is-solid"), viewport.bucket.as_str())}>
            <div class="container header-inner">
                <Link<Route> classes={classes!("brand")} to={Route::Home}>
                    <span class="brand-mark" aria-hidden="true">{ "🎓" }</span>
                    <span class="brand-name">{ "Horizon" }</span>
                </Link<Route>>

                if collapsed {
                    <button
                        class="menu-toggle"
                        type="button"
                        aria-expanded={menu_open.to_string()}
                        aria-label="Toggle navigation"
                        onclick={on_toggle}
                    >
                        { if *menu_open { "✕" } else { "☰" } }
                    </button>
                }

                if show_links {
                    <nav class="site-nav" aria-label="Primary">
                        <ul onclick={on_pick}>
                            { for ROUTE_TABLE.iter().map(|(_, route)| {
                                let active = *route == current;
                                html! {
                                    <li>
                                        <Link<Route>
                                            classes={classes!("nav-link", active.then_some("active"))}
                                            to={*route}
                                        >
                                            { route.nav_label() }
                                        </Link<Route>>
                                    </li>
                                }
                            }) }
                        </ul>
                        <Link<Route> classes={classes!("button", "button-primary", "nav-cta")} to={Route::Inquiry}>
                            { "Free consultation" }
                        </Link<Route>>
                    </nav>
                }
            </div>
        </header>
    }
}

#[function_component(Footer)]
pub fn footer() -> Html {
    html! {
        <footer class="site-footer">
            <div class="container footer-grid">
                <div>
                    <h4>{ "Horizon Education Consultancy" }</h4>
                    <p>{ "Guiding students to the right university abroad since 2012." }</p>
                </div>
                <div>
                    <h4>{ "Explore" }</h4>
                    <ul>
                        { for ROUTE_TABLE.iter().skip(1).map(|(_, route)| html! {
                            <li>
                                <Link<Route> to={*route}>{ route.nav_label() }</Link<Route>>
                            </li>
                        }) }
                    </ul>
                </div>
                <div>
                    <h4>{ "Visit us" }</h4>
                    <p>{ "42 Market Street, Suite 300" }</p>
                    <p>{ "hello@horizon-education.example" }</p>
                    <p>{ "+1 (555) 010-2024" }</p>
                </div>
            </div>
            <p class="footer-note">{ "© 2024 Horizon Education Consultancy. All rights reserved." }</p>
        </footer>
    }
}

#[function_component(BackToTop)]
pub fn back_to_top() -> Html {
    let visible = use_scrolled_past(BACK_TO_TOP_THRESHOLD_PX);
    let onclick = Callback::from(|_: MouseEvent| WebEnvironment.scroll_to_top());

    html! {
        <button
            class={classes!("back-to-top", visible.then_some("is-visible"))}
            type="button"
            aria-label="Back to top"
            hidden={!visible}
            {onclick}
        >
            { "↑" }
        </button>
    }
}

#[derive(Properties, PartialEq)]
pub struct PageLayoutProps {
    pub class: &'static str,
    #[prop_or_default]
    pub children: Html,
}

#[function_component(PageLayout)]
pub fn page_layout(props: &PageLayoutProps) -> Html {
    html! {
        <>
            <Header />
            <main id="content" class={classes!("page", props.class)}>
                { props.children.clone() }
            </main>
            <Footer />
            <BackToTop />
        </>
    }
}
