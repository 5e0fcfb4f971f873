use std::cell::RefCell;
use std::rc::Rc;

use web_sys::{HtmlInputElement, HtmlSelectElement, HtmlTextAreaElement};
use yew::prelude::*;

use super::browser::WebEnvironment;
use super::hooks::{use_timer_slot, TimerSlot};
use crate::content::{country_options, SelectOption, CONTACT_PREFERENCES, EDUCATION_LEVELS, PROGRAMS, SOURCES};
use crate::environment::BrowserEnvironment;
use crate::forms::{
    BannerPolicy, Completion, ConsoleGateway, FormSchema, FormState, SubmitStart, SubmitTicket,
    CONTACT_FORM, HOME_CTA_FORM, INQUIRY_FORM,
};

fn field_id(schema: &FormSchema, name: &str) -> String {
    format!("{}-{}", schema.kind, name)
}

fn field_label(schema: &FormSchema, name: &str) -> &'static str {
    schema.field(name).map(|spec| spec.label).unwrap_or("")
}

#[derive(Clone)]
struct FormController {
    state: Rc<RefCell<FormState>>,
    redraw: UseForceUpdateHandle,
    delivery: TimerSlot,
    banner: TimerSlot,
}

impl FormController {
    fn set_text(&self, name: &'static str, value: String) {
        self.state.borrow_mut().set_text(name, value);
        self.redraw.force_update();
    }

    fn set_flag(&self, name: &'static str, value: bool) {
        self.state.borrow_mut().set_flag(name, value);
        self.redraw.force_update();
    }

    fn submit(&self) {
        let start = self.state.borrow_mut().begin_submit();
        let policy = self.state.borrow().schema().policy;

        match start {
            SubmitStart::Rejected { first_invalid } => {
                self.redraw.force_update();
                if let (true, Some(name)) = (policy.scroll_to_first_invalid, first_invalid) {
                    let id = field_id(self.state.borrow().schema(), name);
                    WebEnvironment.scroll_into_view(&id);
                }
            }
            SubmitStart::Pending { ticket, latency_ms: 0 } => {
                self.banner.cancel();
                self.finish(ticket);
            }
            SubmitStart::Pending { ticket, latency_ms } => {
                self.banner.cancel();
                self.redraw.force_update();
                let controller = self.clone();
                self.delivery.schedule(latency_ms, move || controller.finish(ticket));
            }
            SubmitStart::Ignored => {}
        }
    }

    fn finish(&self, ticket: SubmitTicket) {
        let completion = self.state.borrow_mut().complete(ticket, &ConsoleGateway);
        self.redraw.force_update();

        let policy = self.state.borrow().schema().policy;
        if let (Completion::Delivered, BannerPolicy::AutoClear { after_ms }) = (completion, policy.banner) {
            let controller = self.clone();
            self.banner.schedule(after_ms, move || controller.dismiss());
        }
    }

    fn dismiss(&self) {
        self.banner.cancel();
        self.state.borrow_mut().dismiss();
        self.redraw.force_update();
    }

    fn on_input(&self, name: &'static str) -> Callback<InputEvent> {
        let controller = self.clone();
        Callback::from(move |event: InputEvent| {
            let input: HtmlInputElement = event.target_unchecked_into();
            controller.set_text(name, input.value());
        })
    }

    fn on_textarea(&self, name: &'static str) -> Callback<InputEvent> {
        let controller = self.clone();
        Callback::from(move |event: InputEvent| {
            let input: HtmlTextAreaElement = event.target_unchecked_into();
            controller.set_text(name, input.value());
        })
    }

    fn on_select(&self, name: &'static str) -> Callback<Event> {
        let controller = self.clone();
        Callback::from(move |event: Event| {
            let select: HtmlSelectElement = event.target_unchecked_into();
            controller.set_text(name, select.value());
        })
    }

    fn on_radio(&self, name: &'static str) -> Callback<Event> {
        let controller = self.clone();
        Callback::from(move |event: Event| {
            let input: HtmlInputElement = event.target_unchecked_into();
            if input.checked() {
                controller.set_text(name, input.value());
            }
        })
    }

    fn on_check(&self, name: &'static str) -> Callback<Event> {
        let controller = self.clone();
        Callback::from(move |event: Event| {
            let input: HtmlInputElement = event.target_unchecked_into();
            controller.set_flag(name, input.checked());
        })
    }

    fn on_submit(&self) -> Callback<SubmitEvent> {
        let controller = self.clone();
        Callback::from(move |event: SubmitEvent| {
            event.prevent_default();
            controller.submit();
        })
    }

    fn on_dismiss(&self) -> Callback<MouseEvent> {
        let controller = self.clone();
        Callback::from(move |_| controller.dismiss())
    }
}

#[hook]
fn use_form(schema: &'static FormSchema) -> (FormController, FormState) {
    let state = use_mut_ref(|| FormState::new(schema));
    let redraw = use_force_update();
    let delivery = use_timer_slot();
    let banner = use_timer_slot();

    {
        let state = Rc::clone(&state);
        use_effect_with((), move |_| move || state.borrow_mut().abandon());
    }

    let snapshot = state.borrow().clone();
    (
        FormController {
            state,
            redraw,
            delivery,
            banner,
        },
        snapshot,
    )
}

fn field_error(form: &FormState, name: &str) -> Html {
    match form.error(name) {
        Some(message) => html! { <p class="field-error" role="alert">{ message.to_string() }</p> },
        None => html! {},
    }
}

fn text_field(
    controller: &FormController,
    form: &FormState,
    name: &'static str,
    input_type: &'static str,
    placeholder: &'static str,
) -> Html {
    let schema = form.schema();
    let id = field_id(schema, name);
    let invalid = form.error(name).is_some();

    html! {
        <div class={classes!("form-field", invalid.then_some("has-error"))}>
            <label for={id.clone()}>{ field_label(schema, name) }</label>
            <input
                id={id}
                name={name}
                type={input_type}
                placeholder={placeholder}
                value={form.text(name).to_string()}
                aria-invalid={invalid.to_string()}
                oninput={controller.on_input(name)}
            />
            { field_error(form, name) }
        </div>
    }
}

fn textarea_field(controller: &FormController, form: &FormState, name: &'static str, rows: u32) -> Html {
    let schema = form.schema();
    let id = field_id(schema, name);
    let invalid = form.error(name).is_some();

    html! {
        <div class={classes!("form-field", invalid.then_some("has-error"))}>
            <label for={id.clone()}>{ field_label(schema, name) }</label>
            <textarea
                id={id}
                name={name}
                rows={rows.to_string()}
                value={form.text(name).to_string()}
                aria-invalid={invalid.to_string()}
                oninput={controller.on_textarea(name)}
            />
            { field_error(form, name) }
        </div>
    }
}

fn select_field(
    controller: &FormController,
    form: &FormState,
    name: &'static str,
    options: &[SelectOption],
) -> Html {
    let schema = form.schema();
    let id = field_id(schema, name);
    let invalid = form.error(name).is_some();
    let current = form.text(name);

    html! {
        <div class={classes!("form-field", invalid.then_some("has-error"))}>
            <label for={id.clone()}>{ field_label(schema, name) }</label>
            <select id={id} name={name} aria-invalid={invalid.to_string()} onchange={controller.on_select(name)}>
                <option value="" selected={current.is_empty()}>{ "Select an option" }</option>
                { for options.iter().map(|(value, label)| html! {
                    <option value={*value} selected={current == *value}>{ *label }</option>
                }) }
            </select>
            { field_error(form, name) }
        </div>
    }
}

fn radio_group(controller: &FormController, form: &FormState, name: &'static str, options: &[SelectOption]) -> Html {
    let schema = form.schema();
    let current = form.text(name);

    html! {
        <fieldset class="form-field radio-group">
            <legend>{ field_label(schema, name) }</legend>
            { for options.iter().map(|(value, label)| {
                let id = format!("{}-{}", field_id(schema, name), value);
                html! {
                    <label for={id.clone()} class="radio-option">
                        <input
                            id={id}
                            type="radio"
                            name={name}
                            value={*value}
                            checked={current == *value}
                            onchange={controller.on_radio(name)}
                        />
                        { *label }
                    </label>
                }
            }) }
        </fieldset>
    }
}

fn checkbox_field(controller: &FormController, form: &FormState, name: &'static str, text: &'static str) -> Html {
    let id = field_id(form.schema(), name);
    let invalid = form.error(name).is_some();

    html! {
        <div class={classes!("form-field", "checkbox-field", invalid.then_some("has-error"))}>
            <label for={id.clone()}>
                <input
                    id={id}
                    type="checkbox"
                    name={name}
                    checked={form.flag(name)}
                    aria-invalid={invalid.to_string()}
                    onchange={controller.on_check(name)}
                />
                { text }
            </label>
            { field_error(form, name) }
        </div>
    }
}

fn submit_button(form: &FormState, idle_label: &'static str) -> Html {
    let label = if form.is_submitting() { "Sending..." } else { idle_label };
    html! {
        <button class="button button-primary" type="submit" disabled={form.is_submitting()}>
            { label }
        </button>
    }
}

fn delivery_error(form: &FormState) -> Html {
    match form.delivery_error() {
        Some(message) => html! {
            <p class="form-banner form-banner-error" role="alert">
                { format!("We could not send your message: {message}") }
            </p>
        },
        None => html! {},
    }
}

#[function_component(ContactForm)]
pub fn contact_form() -> Html {
    let (controller, form) = use_form(&CONTACT_FORM);

    if form.is_submitted() {
        return html! {
            <div class="form-banner form-banner-success" role="status">
                <h3>{ "Thank you for reaching out!" }</h3>
                <p>{ "We have received your message and will reply within one business day." }</p>
                <button class="button button-outline" type="button" onclick={controller.on_dismiss()}>
                    { "Send another message" }
                </button>
            </div>
        };
    }

    html! {
        <form class="contact-form" novalidate={true} onsubmit={controller.on_submit()}>
            <div class="form-row">
                { text_field(&controller, &form, "name", "text", "Your name") }
                { text_field(&controller, &form, "email", "email", "you@example.com") }
            </div>
            { text_field(&controller, &form, "subject", "text", "How can we help?") }
            { textarea_field(&controller, &form, "message", 6) }
            { delivery_error(&form) }
            { submit_button(&form, "Send message") }
        </form>
    }
}

#[function_component(InquiryForm)]
pub fn inquiry_form() -> Html {
    let (controller, form) = use_form(&INQUIRY_FORM);
    let countries = country_options();

    if form.is_submitted() {
        return html! {
            <div class="form-banner form-banner-success" role="status">
                <h3>{ "Inquiry received" }</h3>
                <p>{ "A counsellor will contact you using your preferred method within 24 hours." }</p>
                <button class="button button-outline" type="button" onclick={controller.on_dismiss()}>
                    { "Submit another inquiry" }
                </button>
            </div>
        };
    }

    html! {
        <form class="inquiry-form" novalidate={true} onsubmit={controller.on_submit()}>
            <h3>{ "Personal details" }</h3>
            <div class="form-row">
                { text_field(&controller, &form, "firstName", "text", "First name") }
                { text_field(&controller, &form, "lastName", "text", "Last name") }
            </div>
            <div class="form-row">
                { text_field(&controller, &form, "email", "email", "you@example.com") }
                { text_field(&controller, &form, "phone", "tel", "+1 555 123 4567") }
            </div>
            { text_field(&controller, &form, "nationality", "text", "Nationality") }

            <h3>{ "Study plans" }</h3>
            <div class="form-row">
                { select_field(&controller, &form, "educationLevel", &EDUCATION_LEVELS) }
                { select_field(&controller, &form, "interestedCountry", &countries) }
            </div>
            { select_field(&controller, &form, "interestedProgram", &PROGRAMS) }
            { textarea_field(&controller, &form, "message", 4) }

            <h3>{ "Staying in touch" }</h3>
            { radio_group(&controller, &form, "contactPreference", &CONTACT_PREFERENCES) }
            { select_field(&controller, &form, "source", &SOURCES) }
            { checkbox_field(&controller, &form, "agreeToTerms", "I agree to the terms and conditions and privacy policy") }

            { delivery_error(&form) }
            { submit_button(&form, "Submit inquiry") }
        </form>
    }
}

#[function_component(HomeInquiryCta)]
pub fn home_inquiry_cta() -> Html {
    let (controller, form) = use_form(&HOME_CTA_FORM);
    let countries = country_options();

    html! {
        <form class="cta-form" novalidate={true} onsubmit={controller.on_submit()}>
            if form.is_submitted() {
                <p class="form-banner form-banner-success" role="status">
                    { "Thanks! We'll be in touch shortly." }
                </p>
            }
            <div class="form-row">
                { text_field(&controller, &form, "name", "text", "Full name") }
                { text_field(&controller, &form, "email", "email", "Email address") }
            </div>
            <div class="form-row">
                { text_field(&controller, &form, "phone", "tel", "Phone number") }
                { select_field(&controller, &form, "country", &countries) }
            </div>
            { delivery_error(&form) }
            { submit_button(&form, "Get free consultation") }
        </form>
    }
}
