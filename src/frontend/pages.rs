use std::rc::Rc;

use wasm_bindgen::JsCast;
use web_sys::KeyboardEvent;
use yew::prelude::*;
use yew_router::prelude::*;

use super::browser::{report_capability, WebEnvironment, WindowListener};
use super::chrome::PageLayout;
use super::counter::AnimatedCounter;
use super::forms::{ContactForm, HomeInquiryCta, InquiryForm};
use super::globe::Globe;
use super::hooks::{use_in_view, use_viewport};
use super::illustration::RemoteIllustration;
use super::reveal::Reveal;
use crate::config::SiteConfig;
use crate::content::{
    gallery_items, GalleryCategory, BLOG_POSTS, COUNTRIES, SERVICES, STATS, TEAM, TESTIMONIALS,
};
use crate::globe::LOCATIONS;
use crate::lightbox::{Dismissal, KeyOutcome, Lightbox};
use crate::reveal::{ObserverOptions, RevealKind};
use crate::transition::Route;

fn section_heading(eyebrow: &'static str, title: &'static str, lead: &'static str) -> Html {
    html! {
        <Reveal kind={RevealKind::FadeUp} class={classes!("section-heading")}>
            <span class="eyebrow">{ eyebrow }</span>
            <h2>{ title }</h2>
            <p class="lead">{ lead }</p>
        </Reveal>
    }
}

fn stats_band() -> Html {
    html! {
        <section class="section stats-band">
            <div class="container stats-grid">
                { for STATS.iter().enumerate().map(|(index, stat)| html! {
                    <Reveal kind={RevealKind::ZoomIn} delay_ms={index as u32 * 100} class={classes!("stat")}>
                        <AnimatedCounter target={stat.value} suffix={stat.suffix} />
                        <span class="stat-label">{ stat.label }</span>
                    </Reveal>
                }) }
            </div>
        </section>
    }
}

#[function_component(Home)]
pub fn home() -> Html {
    let viewport = use_viewport();
    let config = use_memo((), |_| SiteConfig::from_build_env());
    let services_node = use_node_ref();
    let services_seen = use_in_view(services_node.clone(), ObserverOptions::default());
    let columns = viewport.pick(1, 2, 3);

    html! {
        <PageLayout class="page-home">
            <section class="hero">
                <div class="container hero-grid">
                    <Reveal kind={RevealKind::FadeRight} class={classes!("hero-copy")}>
                        <h1>{ "Your future starts with the right university" }</h1>
                        <p class="lead">
                            { "Personal guidance from shortlisting to visa approval for students heading to the USA, UK, Canada, Australia, Germany and New Zealand." }
                        </p>
                        <div class="hero-actions">
                            <Link<Route> classes={classes!("button", "button-primary")} to={Route::Inquiry}>
                                { "Start your inquiry" }
                            </Link<Route>>
                            <Link<Route> classes={classes!("button", "button-outline")} to={Route::Countries}>
                                { "Explore destinations" }
                            </Link<Route>>
                        </div>
                    </Reveal>
                    <Reveal kind={RevealKind::FadeLeft} delay_ms={200} class={classes!("hero-art")}>
                        <RemoteIllustration url={config.illustration_url.clone()} fallback_icon="graduation-cap" />
                    </Reveal>
                </div>
            </section>

            { stats_band() }

            <section class="section services">
                <div class="container">
                    { section_heading("What we do", "End-to-end study abroad support", "Every service is handled by a dedicated counsellor.") }
                    <div
                        ref={services_node}
                        class={classes!("card-grid", services_seen.is_intersecting.then_some("in-view"))}
                        style={format!("--columns: {columns};")}
                    >
                        { for SERVICES.iter().enumerate().map(|(index, service)| html! {
                            <Reveal kind={RevealKind::FadeUp} delay_ms={index as u32 * 100} class={classes!("card", "service-card")}>
                                <span class="card-icon" aria-hidden="true">{ service.icon }</span>
                                <h3>{ service.title }</h3>
                                <p>{ service.summary }</p>
                            </Reveal>
                        }) }
                    </div>
                </div>
            </section>

            <section class="section globe-section">
                <div class="container globe-grid">
                    <Reveal kind={RevealKind::FadeRight} class={classes!("globe-copy")}>
                        <span class="eyebrow">{ "Global reach" }</span>
                        <h2>{ "Students in six countries and counting" }</h2>
                        <ul class="location-list">
                            { for LOCATIONS.iter().map(|location| html! {
                                <li>{ location.label }</li>
                            }) }
                        </ul>
                    </Reveal>
                    <Reveal kind={RevealKind::Fade} delay_ms={150} class={classes!("globe-frame")}>
                        <Globe />
                    </Reveal>
                </div>
            </section>

            <section class="section testimonials">
                <div class="container">
                    { section_heading("Success stories", "Hear from our students", "Thousands of students have trusted us with their next step.") }
                    <div class="card-grid" style={format!("--columns: {};", viewport.pick(1, 1, 3))}>
                        { for TESTIMONIALS.iter().enumerate().map(|(index, testimonial)| html! {
                            <Reveal kind={RevealKind::FadeUp} delay_ms={index as u32 * 150} class={classes!("card", "testimonial")}>
                                <blockquote>{ testimonial.quote }</blockquote>
                                <p class="testimonial-name">{ testimonial.name }</p>
                                <p class="muted">{ testimonial.destination }</p>
                            </Reveal>
                        }) }
                    </div>
                </div>
            </section>

            <section class="section cta-section">
                <div class="container cta-grid">
                    <Reveal kind={RevealKind::FadeRight} class={classes!("cta-copy")}>
                        <h2>{ "Book a free consultation" }</h2>
                        <p>{ "Leave your details and a counsellor will call you back within a day." }</p>
                    </Reveal>
                    <Reveal kind={RevealKind::FadeLeft} delay_ms={150}>
                        <HomeInquiryCta />
                    </Reveal>
                </div>
            </section>
        </PageLayout>
    }
}

#[function_component(About)]
pub fn about() -> Html {
    let viewport = use_viewport();

    html! {
        <PageLayout class="page-about">
            <section class="page-hero">
                <div class="container">
                    <Reveal kind={RevealKind::FadeDown}>
                        <h1>{ "About us" }</h1>
                        <p class="lead">{ "Counsellors who studied abroad themselves, helping the next generation do the same." }</p>
                    </Reveal>
                </div>
            </section>

            <section class="section">
                <div class="container two-column">
                    <Reveal kind={RevealKind::FadeRight}>
                        <h2>{ "Our story" }</h2>
                        <p>
                            { "Horizon began in 2012 as two former international students answering questions over coffee. Today our team supports thousands of applicants every year." }
                        </p>
                    </Reveal>
                    <Reveal kind={RevealKind::FadeLeft} delay_ms={150}>
                        <h2>{ "Our mission" }</h2>
                        <p>{ "Honest advice matched to each student, with no placement quotas and no hidden fees." }</p>
                    </Reveal>
                </div>
            </section>

            { stats_band() }

            <section class="section team">
                <div class="container">
                    { section_heading("The team", "People behind your application", "Specialists for every stage of the journey.") }
                    <div class="card-grid" style={format!("--columns: {};", viewport.pick(1, 2, 4))}>
                        { for TEAM.iter().enumerate().map(|(index, member)| html! {
                            <Reveal kind={RevealKind::ZoomIn} delay_ms={index as u32 * 100} class={classes!("card", "team-card")}>
                                <div class="avatar" aria-hidden="true">
                                    { member.name.chars().next().map(String::from).unwrap_or_default() }
                                </div>
                                <h3>{ member.name }</h3>
                                <p class="muted">{ member.role }</p>
                            </Reveal>
                        }) }
                    </div>
                </div>
            </section>
        </PageLayout>
    }
}

#[function_component(Countries)]
pub fn countries() -> Html {
    let viewport = use_viewport();

    html! {
        <PageLayout class="page-countries">
            <section class="page-hero">
                <div class="container">
                    <Reveal kind={RevealKind::FadeDown}>
                        <h1>{ "Study destinations" }</h1>
                        <p class="lead">{ "Six countries, hundreds of partner universities, one application plan." }</p>
                    </Reveal>
                </div>
            </section>

            <section class="section">
                <div class="container card-grid" style={format!("--columns: {};", viewport.pick(1, 2, 3))}>
                    { for COUNTRIES.iter().enumerate().map(|(index, country)| html! {
                        <Reveal kind={RevealKind::FadeUp} delay_ms={(index as u32 % 3) * 120} class={classes!("card", "country-card")}>
                            <article id={country.slug}>
                                <header class="country-header">
                                    <span class="country-flag" aria-hidden="true">{ country.flag }</span>
                                    <h2>{ country.name }</h2>
                                </header>
                                <p>{ country.tagline }</p>
                                <dl class="country-facts">
                                    <dt>{ "Universities" }</dt>
                                    <dd><AnimatedCounter target={country.universities} suffix="+" /></dd>
                                    <dt>{ "Intakes" }</dt>
                                    <dd>{ country.intakes }</dd>
                                </dl>
                                <ul class="highlights">
                                    { for country.highlights.iter().map(|highlight| html! { <li>{ *highlight }</li> }) }
                                </ul>
                            </article>
                        </Reveal>
                    }) }
                </div>
            </section>
        </PageLayout>
    }
}

#[function_component(Gallery)]
pub fn gallery() -> Html {
    let viewport = use_viewport();
    let filter = use_state(|| None::<GalleryCategory>);
    let items = gallery_items(*filter);
    let lightbox = use_mut_ref(|| Lightbox::new(items.len()));
    let redraw = use_force_update();

    {
        let lightbox = Rc::clone(&lightbox);
        use_effect_with(items.len(), move |len| {
            lightbox.borrow_mut().set_len(*len, &WebEnvironment);
            || ()
        });
    }

    {
        let lightbox = Rc::clone(&lightbox);
        let redraw = redraw.clone();
        use_effect_with((), move |_| {
            let keyed = Rc::clone(&lightbox);
            let listener = WindowListener::new("keydown", move |event| {
                let Some(key) = event.dyn_ref::<KeyboardEvent>().map(KeyboardEvent::key) else {
                    return;
                };
                let outcome = keyed.borrow_mut().handle_key(&key, &WebEnvironment);
                if outcome != KeyOutcome::Ignored {
                    redraw.force_update();
                }
            });
            let listener = match listener {
                Ok(listener) => Some(listener),
                Err(err) => {
                    report_capability(&err, "gallery");
                    None
                }
            };

            move || {
                drop(listener);
                lightbox.borrow_mut().close(Dismissal::Unmount, &WebEnvironment);
            }
        });
    }

    let open_item = |index: usize| {
        let lightbox = Rc::clone(&lightbox);
        let redraw = redraw.clone();
        Callback::from(move |_: MouseEvent| {
            lightbox.borrow_mut().open(index, &WebEnvironment);
            redraw.force_update();
        })
    };
    let close_with = |reason: Dismissal| {
        let lightbox = Rc::clone(&lightbox);
        let redraw = redraw.clone();
        Callback::from(move |_: MouseEvent| {
            lightbox.borrow_mut().close(reason, &WebEnvironment);
            redraw.force_update();
        })
    };
    let step = |forward: bool| {
        let lightbox = Rc::clone(&lightbox);
        let redraw = redraw.clone();
        Callback::from(move |event: MouseEvent| {
            event.stop_propagation();
            if forward {
                lightbox.borrow_mut().next();
            } else {
                lightbox.borrow_mut().previous();
            }
            redraw.force_update();
        })
    };
    let choose = |category: Option<GalleryCategory>| {
        let filter = filter.clone();
        Callback::from(move |_: MouseEvent| filter.set(category))
    };

    let current = lightbox.borrow().current().and_then(|index| items.get(index).copied());

    html! {
        <PageLayout class="page-gallery">
            <section class="page-hero">
                <div class="container">
                    <Reveal kind={RevealKind::FadeDown}>
                        <h1>{ "Gallery" }</h1>
                        <p class="lead">{ "Campuses, events and students from around the world." }</p>
                    </Reveal>
                </div>
            </section>

            <section class="section">
                <div class="container">
                    <div class="filter-bar" role="group" aria-label="Filter gallery">
                        <button
                            type="button"
                            class={classes!("filter", filter.is_none().then_some("active"))}
                            onclick={choose(None)}
                        >
                            { "All" }
                        </button>
                        { for GalleryCategory::ALL.iter().map(|category| html! {
                            <button
                                type="button"
                                class={classes!("filter", (*filter == Some(*category)).then_some("active"))}
                                onclick={choose(Some(*category))}
                            >
                                { category.label() }
                            </button>
                        }) }
                    </div>

                    <div class="gallery-grid" style={format!("--columns: {};", viewport.pick(1, 2, 3))}>
                        { for items.iter().enumerate().map(|(index, item)| html! {
                            <Reveal kind={RevealKind::ZoomIn} delay_ms={(index as u32 % 3) * 80} class={classes!("gallery-item")}>
                                <button type="button" class="gallery-thumb" onclick={open_item(index)}>
                                    <img src={item.src} alt={item.caption} loading="lazy" />
                                    <span class="gallery-caption">{ item.caption }</span>
                                </button>
                            </Reveal>
                        }) }
                    </div>
                </div>
            </section>

            if let Some(item) = current {
                <div class="lightbox" role="dialog" aria-modal="true" aria-label={item.caption} onclick={close_with(Dismissal::Backdrop)}>
                    <button type="button" class="lightbox-close" aria-label="Close" onclick={close_with(Dismissal::CloseButton)}>
                        { "✕" }
                    </button>
                    <button type="button" class="lightbox-nav prev" aria-label="Previous image" onclick={step(false)}>
                        { "‹" }
                    </button>
                    <figure class="lightbox-figure" onclick={Callback::from(|event: MouseEvent| event.stop_propagation())}>
                        <img src={item.src} alt={item.caption} />
                        <figcaption>{ item.caption }</figcaption>
                    </figure>
                    <button type="button" class="lightbox-nav next" aria-label="Next image" onclick={step(true)}>
                        { "›" }
                    </button>
                </div>
            }
        </PageLayout>
    }
}

#[function_component(Blog)]
pub fn blog() -> Html {
    let viewport = use_viewport();

    html! {
        <PageLayout class="page-blog">
            <section class="page-hero">
                <div class="container">
                    <Reveal kind={RevealKind::FadeDown}>
                        <h1>{ "Blog" }</h1>
                        <p class="lead">{ "Guides, deadlines and visa news for international applicants." }</p>
                    </Reveal>
                </div>
            </section>

            <section class="section">
                <div class="container card-grid" style={format!("--columns: {};", viewport.pick(1, 2, 2))}>
                    { for BLOG_POSTS.iter().enumerate().map(|(index, post)| html! {
                        <Reveal kind={RevealKind::FadeUp} delay_ms={(index as u32 % 2) * 120} class={classes!("card", "post-card")}>
                            <article id={post.slug}>
                                <span class="tag">{ post.category }</span>
                                <h2>{ post.title }</h2>
                                <p>{ post.excerpt }</p>
                                <p class="muted">
                                    <time datetime={post.date}>{ post.date }</time>
                                    { format!(" · {} min read", post.read_minutes) }
                                </p>
                            </article>
                        </Reveal>
                    }) }
                </div>
            </section>
        </PageLayout>
    }
}

#[function_component(Inquiry)]
pub fn inquiry() -> Html {
    html! {
        <PageLayout class="page-inquiry">
            <section class="page-hero">
                <div class="container">
                    <Reveal kind={RevealKind::FadeDown}>
                        <h1>{ "Student inquiry" }</h1>
                        <p class="lead">{ "Tell us about your plans and we will build a shortlist with you." }</p>
                    </Reveal>
                </div>
            </section>

            <section class="section">
                <div class="container narrow">
                    <Reveal kind={RevealKind::FadeUp}>
                        <InquiryForm />
                    </Reveal>
                </div>
            </section>
        </PageLayout>
    }
}

#[function_component(Contact)]
pub fn contact() -> Html {
    let viewport = use_viewport();

    html! {
        <PageLayout class="page-contact">
            <section class="page-hero">
                <div class="container">
                    <Reveal kind={RevealKind::FadeDown}>
                        <h1>{ "Contact us" }</h1>
                        <p class="lead">{ "Questions about applications, visas or partnerships? Write to us." }</p>
                    </Reveal>
                </div>
            </section>

            <section class="section">
                <div class={classes!("container", "contact-grid", viewport.bucket.is_mobile().then_some("stacked"))}>
                    <Reveal kind={RevealKind::FadeRight} class={classes!("contact-details")}>
                        <h2>{ "Get in touch" }</h2>
                        <p>{ "42 Market Street, Suite 300" }</p>
                        <p>{ "hello@horizon-education.example" }</p>
                        <p>{ "+1 (555) 010-2024" }</p>
                        <p class="muted">{ "Monday to Saturday, 9:00 to 18:00" }</p>
                    </Reveal>
                    <Reveal kind={RevealKind::FadeLeft} delay_ms={150}>
                        <ContactForm />
                    </Reveal>
                </div>
            </section>
        </PageLayout>
    }
}

#[function_component(NotFound)]
pub fn not_found() -> Html {
    html! {
        <PageLayout class="page-not-found">
            <section class="section">
                <div class="container narrow center">
                    <Reveal kind={RevealKind::ZoomIn}>
                        <h1>{ "404" }</h1>
                        <p class="lead">{ "We couldn't find that page." }</p>
                        <Link<Route> classes={classes!("button", "button-primary")} to={Route::Home}>
                            { "Back to home" }
                        </Link<Route>>
                    </Reveal>
                </div>
            </section>
        </PageLayout>
    }
}
