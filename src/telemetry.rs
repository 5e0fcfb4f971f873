use std::cmp::Ordering;
use std::sync::atomic::{AtomicU8, Ordering as AtomicOrdering};

pub const DEFAULT_LOG_LEVEL: LogLevel = LogLevel::Info;

static MIN_LOG_LEVEL: AtomicU8 = AtomicU8::new(1);

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum LogLevel {
    Debug,
    Info,
    Warn,
}

impl PartialOrd for LogLevel {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for LogLevel {
    fn cmp(&self, other: &Self) -> Ordering {
        self.rank().cmp(&other.rank())
    }
}

impl LogLevel {
    fn rank(self) -> u8 {
        match self {
            Self::Debug => 0,
            Self::Info => 1,
            Self::Warn => 2,
        }
    }

    fn from_rank(rank: u8) -> Self {
        match rank {
            0 => Self::Debug,
            1 => Self::Info,
            _ => Self::Warn,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warn => "warn",
        }
    }
}

pub fn parse_log_level(value: Option<&str>, default: LogLevel) -> LogLevel {
    match value
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_ascii_lowercase)
        .as_deref()
    {
        Some("debug") => LogLevel::Debug,
        Some("info") => LogLevel::Info,
        Some("warn") | Some("warning") => LogLevel::Warn,
        _ => default,
    }
}

pub fn init(level: LogLevel) {
    MIN_LOG_LEVEL.store(level.rank(), AtomicOrdering::Relaxed);
}

pub fn min_level() -> LogLevel {
    LogLevel::from_rank(MIN_LOG_LEVEL.load(AtomicOrdering::Relaxed))
}

/// Builds the JSON line for an event. `fields` is merged into the top
/// level when it is an object and ignored otherwise.
pub fn format_event(ts: u64, level: LogLevel, event: &str, fields: serde_json::Value) -> String {
    let mut payload = serde_json::Map::new();
    payload.insert(
        "ts".to_string(),
        serde_json::Value::Number(serde_json::Number::from(ts)),
    );
    payload.insert("level".to_string(), serde_json::Value::String(level.as_str().to_string()));
    payload.insert("event".to_string(), serde_json::Value::String(event.to_string()));

    if let serde_json::Value::Object(extra) = fields {
        for (key, value) in extra {
            payload.insert(key, value);
        }
    }

    serde_json::Value::Object(payload).to_string()
}

pub fn log_event(level: LogLevel, event: &str, fields: serde_json::Value) {
    if level < min_level() {
        return;
    }

    let line = format_event(now_unix_millis(), level, event, fields);
    emit(level, &line);
}

#[cfg(target_arch = "wasm32")]
fn now_unix_millis() -> u64 {
    js_sys::Date::now().max(0.0) as u64
}

#[cfg(not(target_arch = "wasm32"))]
fn now_unix_millis() -> u64 {
    use std::time::{SystemTime, UNIX_EPOCH};

    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|value| value.as_millis() as u64)
        .unwrap_or(0)
}

#[cfg(target_arch = "wasm32")]
fn emit(level: LogLevel, line: &str) {
    let value = wasm_bindgen::JsValue::from_str(line);
    match level {
        LogLevel::Warn => web_sys::console::warn_1(&value),
        LogLevel::Debug | LogLevel::Info => web_sys::console::log_1(&value),
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn emit(_level: LogLevel, line: &str) {
    println!("{line}");
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn levels_order_from_debug_to_warn() {
        assert!(LogLevel::Debug < LogLevel::Info);
        assert!(LogLevel::Info < LogLevel::Warn);
    }

    #[test]
    fn parse_log_level_accepts_known_names_case_insensitively() {
        assert_eq!(parse_log_level(Some("DEBUG"), LogLevel::Info), LogLevel::Debug);
        assert_eq!(parse_log_level(Some(" warning "), LogLevel::Info), LogLevel::Warn);
        assert_eq!(parse_log_level(Some("verbose"), LogLevel::Info), LogLevel::Info);
        assert_eq!(parse_log_level(None, LogLevel::Warn), LogLevel::Warn);
    }

    #[test]
    fn formatted_event_merges_fields_after_envelope() {
        let line = format_event(42, LogLevel::Info, "route_changed", json!({ "to": "/about" }));
        let value: serde_json::Value = serde_json::from_str(&line).expect("valid json line");

        assert_eq!(value["ts"], 42);
        assert_eq!(value["level"], "info");
        assert_eq!(value["event"], "route_changed");
        assert_eq!(value["to"], "/about");
    }

    #[test]
    fn non_object_fields_are_dropped() {
        let line = format_event(1, LogLevel::Warn, "capability_missing", json!("webgl"));
        let value: serde_json::Value = serde_json::from_str(&line).expect("valid json line");

        assert_eq!(value.as_object().map(|map| map.len()), Some(3));
    }
}
