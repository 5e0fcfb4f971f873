//! Form schemas, validation rules and the simulated submission flow shared
//! by the contact page, the inquiry page and the home inquiry CTA.

use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::json;

use crate::config::{CTA_BANNER_AUTO_CLEAR_MS, SUBMIT_LATENCY_MS};
use crate::error::SubmitError;
use crate::telemetry::{log_event, LogLevel};

#[derive(Clone, PartialEq, Eq, Debug, Serialize)]
#[serde(untagged)]
pub enum FieldValue {
    Text(String),
    Flag(bool),
}

impl FieldValue {
    pub fn as_text(&self) -> &str {
        match self {
            Self::Text(value) => value,
            Self::Flag(_) => "",
        }
    }

    pub fn as_flag(&self) -> bool {
        matches!(self, Self::Flag(true))
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum FieldDefault {
    Text(&'static str),
    Flag(bool),
}

impl FieldDefault {
    fn value(self) -> FieldValue {
        match self {
            Self::Text(value) => FieldValue::Text(value.to_string()),
            Self::Flag(value) => FieldValue::Flag(value),
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Rule {
    Required,
    Email,
    Phone,
    Checked,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct FieldSpec {
    pub name: &'static str,
    pub label: &'static str,
    pub default: FieldDefault,
    pub rules: &'static [Rule],
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum BannerPolicy {
    UntilDismissed,
    AutoClear { after_ms: u32 },
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct SubmissionPolicy {
    pub latency_ms: u32,
    pub banner: BannerPolicy,
    pub scroll_to_first_invalid: bool,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct FormSchema {
    pub kind: &'static str,
    pub fields: &'static [FieldSpec],
    pub policy: SubmissionPolicy,
}

impl FormSchema {
    pub fn field(&self, name: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|field| field.name == name)
    }
}

const fn text(name: &'static str, label: &'static str, rules: &'static [Rule]) -> FieldSpec {
    FieldSpec {
        name,
        label,
        default: FieldDefault::Text(""),
        rules,
    }
}

const REQUIRED: &[Rule] = &[Rule::Required];
const REQUIRED_EMAIL: &[Rule] = &[Rule::Required, Rule::Email];
const REQUIRED_PHONE: &[Rule] = &[Rule::Required, Rule::Phone];
const OPTIONAL: &[Rule] = &[];

pub const CONTACT_FORM: FormSchema = FormSchema {
    kind: "contact",
    fields: &[
        text("name", "Name", REQUIRED),
        text("email", "Email", REQUIRED_EMAIL),
        text("subject", "Subject", REQUIRED),
        text("message", "Message", REQUIRED),
    ],
    policy: SubmissionPolicy {
        latency_ms: SUBMIT_LATENCY_MS,
        banner: BannerPolicy::UntilDismissed,
        scroll_to_first_invalid: false,
    },
};

pub const INQUIRY_FORM: FormSchema = FormSchema {
    kind: "inquiry",
    fields: &[
        text("firstName", "First name", REQUIRED),
        text("lastName", "Last name", REQUIRED),
        text("email", "Email", REQUIRED_EMAIL),
        text("phone", "Phone number", REQUIRED_PHONE),
        text("nationality", "Nationality", OPTIONAL),
        text("educationLevel", "Education level", REQUIRED),
        text("interestedCountry", "Preferred country", REQUIRED),
        text("interestedProgram", "Program of interest", REQUIRED),
        text("message", "Message", OPTIONAL),
        FieldSpec {
            name: "contactPreference",
            label: "Preferred contact method",
            default: FieldDefault::Text("email"),
            rules: OPTIONAL,
        },
        text("source", "How did you hear about us", OPTIONAL),
        FieldSpec {
            name: "agreeToTerms",
            label: "Terms and conditions",
            default: FieldDefault::Flag(false),
            rules: &[Rule::Checked],
        },
    ],
    policy: SubmissionPolicy {
        latency_ms: SUBMIT_LATENCY_MS,
        banner: BannerPolicy::UntilDismissed,
        scroll_to_first_invalid: true,
    },
};

pub const HOME_CTA_FORM: FormSchema = FormSchema {
    kind: "home_inquiry",
    fields: &[
        text("name", "Full name", REQUIRED),
        text("email", "Email", REQUIRED_EMAIL),
        text("phone", "Phone number", REQUIRED_PHONE),
        text("country", "Preferred country", OPTIONAL),
    ],
    policy: SubmissionPolicy {
        latency_ms: 0,
        banner: BannerPolicy::AutoClear {
            after_ms: CTA_BANNER_AUTO_CLEAR_MS,
        },
        scroll_to_first_invalid: false,
    },
};

pub fn is_valid_email(value: &str) -> bool {
    if value.chars().any(char::is_whitespace) {
        return false;
    }

    let Some((local, domain)) = value.split_once('@') else {
        return false;
    };

    if local.is_empty() || domain.contains('@') {
        return false;
    }

    let last = domain.len().saturating_sub(1);
    domain
        .char_indices()
        .any(|(index, ch)| ch == '.' && index > 0 && index < last)
}

pub fn is_valid_phone(value: &str) -> bool {
    let digits = value.strip_prefix('+').unwrap_or(value);
    let length = digits.chars().count();

    (8..=20).contains(&length)
        && digits
            .chars()
            .all(|ch| ch.is_ascii_digit() || matches!(ch, ' ' | '-' | '(' | ')'))
}

fn check_rule(rule: Rule, spec: &FieldSpec, value: &FieldValue) -> Option<String> {
    let trimmed = value.as_text().trim();

    match rule {
        Rule::Required if trimmed.is_empty() => Some(format!("{} is required", spec.label)),
        Rule::Email if !trimmed.is_empty() && !is_valid_email(trimmed) => {
            Some("Please enter a valid email address".to_string())
        }
        Rule::Phone if !trimmed.is_empty() && !is_valid_phone(trimmed) => {
            Some("Please enter a valid phone number".to_string())
        }
        Rule::Checked if !value.as_flag() => {
            Some("You must agree to the terms and conditions".to_string())
        }
        _ => None,
    }
}

pub fn validate_field(spec: &FieldSpec, value: &FieldValue) -> Option<String> {
    spec.rules
        .iter()
        .find_map(|rule| check_rule(*rule, spec, value))
}

/// Messages keyed by field name; a missing key means the field is valid.
pub fn validate(
    schema: &FormSchema,
    fields: &BTreeMap<&'static str, FieldValue>,
) -> BTreeMap<&'static str, String> {
    let empty = FieldValue::Text(String::new());

    schema
        .fields
        .iter()
        .filter_map(|spec| {
            let value = fields.get(spec.name).unwrap_or(&empty);
            validate_field(spec, value).map(|message| (spec.name, message))
        })
        .collect()
}

#[derive(Clone, PartialEq, Eq, Debug, Serialize)]
pub struct FormPayload {
    pub form: &'static str,
    pub fields: BTreeMap<&'static str, FieldValue>,
}

/// Where validated submissions go. The shipped gateway only logs.
pub trait SubmissionGateway {
    fn deliver(&self, payload: &FormPayload) -> Result<(), SubmitError>;
}

pub struct ConsoleGateway;

impl SubmissionGateway for ConsoleGateway {
    fn deliver(&self, payload: &FormPayload) -> Result<(), SubmitError> {
        let body = serde_json::to_value(payload)?;
        log_event(
            LogLevel::Info,
            "form_submitted",
            json!({ "form": payload.form, "payload": body }),
        );
        Ok(())
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct SubmitTicket {
    generation: u64,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum SubmitStart {
    /// Validation failed; nothing else changed.
    Rejected { first_invalid: Option<&'static str> },
    /// Call `complete` with the ticket after `latency_ms`.
    Pending { ticket: SubmitTicket, latency_ms: u32 },
    /// A submission is already in flight.
    Ignored,
}

#[derive(Clone, PartialEq, Eq, Debug)]
pub enum Completion {
    Delivered,
    Failed(String),
    Stale,
}

#[derive(Clone, PartialEq, Debug)]
pub struct FormState {
    schema: &'static FormSchema,
    fields: BTreeMap<&'static str, FieldValue>,
    errors: BTreeMap<&'static str, String>,
    delivery_error: Option<String>,
    submitting: bool,
    submitted: bool,
    generation: u64,
}

impl FormState {
    pub fn new(schema: &'static FormSchema) -> Self {
        Self {
            schema,
            fields: initial_fields(schema),
            errors: BTreeMap::new(),
            delivery_error: None,
            submitting: false,
            submitted: false,
            generation: 0,
        }
    }

    pub fn schema(&self) -> &'static FormSchema {
        self.schema
    }

    pub fn fields(&self) -> &BTreeMap<&'static str, FieldValue> {
        &self.fields
    }

    pub fn errors(&self) -> &BTreeMap<&'static str, String> {
        &self.errors
    }

    pub fn error(&self, name: &str) -> Option<&str> {
        self.errors.get(name).map(String::as_str)
    }

    pub fn delivery_error(&self) -> Option<&str> {
        self.delivery_error.as_deref()
    }

    pub fn text(&self, name: &str) -> &str {
        self.fields.get(name).map(FieldValue::as_text).unwrap_or("")
    }

    pub fn flag(&self, name: &str) -> bool {
        self.fields.get(name).is_some_and(FieldValue::as_flag)
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    pub fn is_submitted(&self) -> bool {
        self.submitted
    }

    pub fn set_text(&mut self, name: &str, value: impl Into<String>) {
        self.set_field(name, FieldValue::Text(value.into()));
    }

    pub fn set_flag(&mut self, name: &str, value: bool) {
        self.set_field(name, FieldValue::Flag(value));
    }

    /// Stores the value and, if the field is currently flagged, re-checks
    /// that field alone.
    pub fn set_field(&mut self, name: &str, value: FieldValue) {
        let Some(spec) = self.schema.field(name) else {
            return;
        };

        if self.errors.contains_key(spec.name) {
            match validate_field(spec, &value) {
                Some(message) => {
                    self.errors.insert(spec.name, message);
                }
                None => {
                    self.errors.remove(spec.name);
                }
            }
        }
        self.fields.insert(spec.name, value);
    }

    pub fn begin_submit(&mut self) -> SubmitStart {
        if self.submitting {
            return SubmitStart::Ignored;
        }

        let errors = validate(self.schema, &self.fields);
        self.delivery_error = None;

        if !errors.is_empty() {
            let first_invalid = self
                .schema
                .fields
                .iter()
                .map(|spec| spec.name)
                .find(|name| errors.contains_key(name));
            self.errors = errors;
            log_event(
                LogLevel::Debug,
                "form_rejected",
                json!({ "form": self.schema.kind, "invalid": self.errors.keys().collect::<Vec<_>>() }),
            );
            return SubmitStart::Rejected { first_invalid };
        }

        self.errors.clear();
        self.submitted = false;
        self.submitting = true;
        self.generation += 1;

        SubmitStart::Pending {
            ticket: SubmitTicket {
                generation: self.generation,
            },
            latency_ms: self.schema.policy.latency_ms,
        }
    }

    pub fn complete(&mut self, ticket: SubmitTicket, gateway: &dyn SubmissionGateway) -> Completion {
        if !self.submitting || ticket.generation != self.generation {
            return Completion::Stale;
        }

        let payload = FormPayload {
            form: self.schema.kind,
            fields: self.fields.clone(),
        };
        self.submitting = false;

        match gateway.deliver(&payload) {
            Ok(()) => {
                self.fields = initial_fields(self.schema);
                self.submitted = true;
                Completion::Delivered
            }
            Err(err) => {
                let message = err.to_string();
                self.delivery_error = Some(message.clone());
                Completion::Failed(message)
            }
        }
    }

    /// "Send another": hides the success banner.
    pub fn dismiss(&mut self) {
        self.submitted = false;
    }

    /// The owning form went away. Any ticket handed out so far completes
    /// as `Stale`.
    pub fn abandon(&mut self) {
        self.generation += 1;
        self.submitting = false;
    }
}

fn initial_fields(schema: &FormSchema) -> BTreeMap<&'static str, FieldValue> {
    schema
        .fields
        .iter()
        .map(|spec| (spec.name, spec.default.value()))
        .collect()
}
