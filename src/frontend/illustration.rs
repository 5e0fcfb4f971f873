use std::cell::Cell;
use std::rc::Rc;

use gloo_net::http::Request;
use serde_json::json;
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use crate::illustration::Illustration;
use crate::telemetry::{log_event, LogLevel};

async fn fetch_markup(url: &str) -> Result<String, String> {
    let response = Request::get(url).send().await.map_err(|err| err.to_string())?;
    if !response.ok() {
        return Err(format!("status {}", response.status()));
    }
    response.text().await.map_err(|err| err.to_string())
}

fn fallback_glyph(icon: &str) -> &'static str {
    match icon {
        "globe" => "🌍",
        "graduation-cap" => "🎓",
        "plane" => "✈️",
        _ => "📘",
    }
}

#[derive(Properties, PartialEq)]
pub struct RemoteIllustrationProps {
    pub url: AttrValue,
    pub fallback_icon: &'static str,
    #[prop_or_default]
    pub class: Classes,
}

/// Inlines a remote SVG illustration, or shows a static icon if the fetch
/// fails or returns something else.
#[function_component(RemoteIllustration)]
pub fn remote_illustration(props: &RemoteIllustrationProps) -> Html {
    let fallback_icon = props.fallback_icon;
    let illustration = use_state(|| Illustration::Fallback(fallback_icon));

    {
        let illustration = illustration.clone();
        use_effect_with(props.url.clone(), move |url| {
            let mounted = Rc::new(Cell::new(true));
            let url = url.to_string();

            let alive = Rc::clone(&mounted);
            spawn_local(async move {
                let fetched = fetch_markup(&url).await;
                let reason = fetched
                    .as_ref()
                    .err()
                    .cloned()
                    .unwrap_or_else(|| "not an svg document".to_string());

                let resolved = Illustration::resolve(fetched, fallback_icon);
                if !resolved.is_loaded() {
                    log_event(
                        LogLevel::Warn,
                        "illustration_fallback",
                        json!({ "url": url, "reason": reason }),
                    );
                }
                if alive.get() {
                    illustration.set(resolved);
                }
            });

            move || mounted.set(false)
        });
    }

    let body = match &*illustration {
        Illustration::Loaded(markup) => Html::from_html_unchecked(AttrValue::from(markup.clone())),
        Illustration::Fallback(icon) => html! {
            <span class={classes!("illustration-fallback", format!("icon-{icon}"))} role="img" aria-label={*icon}>
                { fallback_glyph(icon) }
            </span>
        },
    };

    html! {
        <div class={classes!("illustration", props.class.clone())}>
            { body }
        </div>
    }
}
