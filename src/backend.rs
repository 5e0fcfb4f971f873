use axum::{
    extract::{Request, State},
    http::{header, HeaderValue, StatusCode},
    middleware::{self, Next},
    response::Response,
    Router,
};
use serde_json::json;
use std::{
    path::{Path, PathBuf},
    sync::Arc,
    time::Instant,
};
use tower_http::services::{ServeDir, ServeFile};

use crate::telemetry::{self, log_event, parse_log_level, LogLevel, DEFAULT_LOG_LEVEL};

const DEFAULT_PORT: u64 = 8080;
const DEFAULT_DIST_DIR: &str = "dist";
const DEFAULT_CACHE_MAX_AGE_SECONDS: u64 = 3_600;

const PORT_BOUNDS: (u64, u64) = (1, 65_535);
const CACHE_MAX_AGE_SECONDS_BOUNDS: (u64, u64) = (0, 7 * 24 * 60 * 60);

#[derive(Clone, Debug, PartialEq)]
pub struct HostConfig {
    port: u16,
    dist_dir: PathBuf,
    cache_max_age_seconds: u64,
    log_level: LogLevel,
}

impl HostConfig {
    fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let port = parse_u64_with_bounds(lookup("PORT"), DEFAULT_PORT, PORT_BOUNDS);
        let dist_dir = non_empty(lookup("SITE_DIST_DIR"))
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DIST_DIR));

        Self {
            port: u16::try_from(port).unwrap_or(8080),
            dist_dir,
            cache_max_age_seconds: parse_u64_with_bounds(
                lookup("SITE_CACHE_MAX_AGE_SECONDS"),
                DEFAULT_CACHE_MAX_AGE_SECONDS,
                CACHE_MAX_AGE_SECONDS_BOUNDS,
            ),
            log_level: parse_log_level(non_empty(lookup("LOG_LEVEL")).as_deref(), DEFAULT_LOG_LEVEL),
        }
    }

    fn index_file(&self) -> PathBuf {
        self.dist_dir.join("index.html")
    }
}

pub async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config = HostConfig::from_env();
    telemetry::init(config.log_level);

    if !config.index_file().is_file() {
        log_event(
            LogLevel::Warn,
            "dist_missing",
            json!({ "dist_dir": config.dist_dir.display().to_string(), "hint": "run `trunk build --release` first" }),
        );
    }

    let bind_address = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&bind_address).await?;
    log_event(
        LogLevel::Info,
        "server_listening",
        json!({
            "url": format!("http://127.0.0.1:{}", config.port),
            "dist_dir": config.dist_dir.display().to_string(),
            "cache_max_age_seconds": config.cache_max_age_seconds,
        }),
    );

    axum::serve(listener, router(Arc::new(config))).await?;
    Ok(())
}

/// Static `trunk` output with SPA fallback: any path without a file behind
/// it is answered with `index.html` so client routes resolve on reload.
fn router(config: Arc<HostConfig>) -> Router {
    let static_service = ServeDir::new(&config.dist_dir).fallback(ServeFile::new(config.index_file()));

    Router::new()
        .fallback_service(static_service)
        .layer(middleware::from_fn_with_state(config, log_and_cache))
}

async fn log_and_cache(State(config): State<Arc<HostConfig>>, request: Request, next: Next) -> Response {
    let started = Instant::now();
    let method = request.method().clone();
    let path = request.uri().path().to_string();

    let mut response = next.run(request).await;
    let status = response.status();

    if status == StatusCode::OK && !response.headers().contains_key(header::CACHE_CONTROL) {
        let policy = cache_policy(&path, config.cache_max_age_seconds);
        response.headers_mut().insert(header::CACHE_CONTROL, cache_control(&policy));
    }

    log_event(
        LogLevel::Debug,
        "static_request",
        json!({
            "method": method.as_str(),
            "path": path,
            "status": status.as_u16(),
            "duration_ms": started.elapsed().as_millis() as u64,
        }),
    );
    response
}

/// Documents must revalidate so a new deploy is picked up; fingerprinted
/// assets can be cached.
fn cache_policy(path: &str, max_age_seconds: u64) -> String {
    let is_document = Path::new(path)
        .extension()
        .and_then(|extension| extension.to_str())
        .map_or(true, |extension| extension.eq_ignore_ascii_case("html"));

    if is_document {
        "no-cache".to_string()
    } else {
        format!("public, max-age={max_age_seconds}")
    }
}

fn cache_control(value: &str) -> HeaderValue {
    HeaderValue::from_str(value).unwrap_or_else(|_| HeaderValue::from_static("no-store"))
}

fn parse_u64_with_bounds(value: Option<String>, default: u64, bounds: (u64, u64)) -> u64 {
    value
        .and_then(|value| value.trim().parse::<u64>().ok())
        .filter(|value| (bounds.0..=bounds.1).contains(value))
        .unwrap_or(default)
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::net::SocketAddr;

    fn config_from(pairs: &[(&str, &str)]) -> HostConfig {
        let values: HashMap<String, String> = pairs
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect();
        HostConfig::from_lookup(|name| values.get(name).cloned())
    }

    async fn serve(dist_dir: &Path) -> SocketAddr {
        let config = HostConfig {
            port: 0,
            dist_dir: dist_dir.to_path_buf(),
            cache_max_age_seconds: 600,
            log_level: LogLevel::Warn,
        };
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind ephemeral port");
        let address = listener.local_addr().expect("local address");

        tokio::spawn(async move {
            axum::serve(listener, router(Arc::new(config)))
                .await
                .expect("static host runs");
        });
        address
    }

    fn write_dist() -> tempfile::TempDir {
        let dist = tempfile::tempdir().expect("temp dist dir");
        std::fs::write(
            dist.path().join("index.html"),
            "<!doctype html><div id=\"app\"></div>",
        )
        .expect("write index");
        std::fs::write(dist.path().join("site-3f2a.js"), "console.log('site');").expect("write asset");
        dist
    }

    #[test]
    fn defaults_apply_without_environment() {
        let config = config_from(&[]);
        assert_eq!(config.port, 8080);
        assert_eq!(config.dist_dir, PathBuf::from("dist"));
        assert_eq!(config.cache_max_age_seconds, 3_600);
        assert_eq!(config.log_level, LogLevel::Info);
    }

    #[test]
    fn out_of_bounds_values_fall_back() {
        let config = config_from(&[
            ("PORT", "70000"),
            ("SITE_CACHE_MAX_AGE_SECONDS", "9999999"),
            ("SITE_DIST_DIR", "   "),
            ("LOG_LEVEL", "loud"),
        ]);
        assert_eq!(config.port, 8080);
        assert_eq!(config.cache_max_age_seconds, 3_600);
        assert_eq!(config.dist_dir, PathBuf::from("dist"));
        assert_eq!(config.log_level, LogLevel::Info);
    }

    #[test]
    fn valid_values_are_used() {
        let config = config_from(&[
            ("PORT", " 3000 "),
            ("SITE_CACHE_MAX_AGE_SECONDS", "0"),
            ("SITE_DIST_DIR", "public"),
            ("LOG_LEVEL", "DEBUG"),
        ]);
        assert_eq!(config.port, 3000);
        assert_eq!(config.cache_max_age_seconds, 0);
        assert_eq!(config.index_file(), PathBuf::from("public/index.html"));
        assert_eq!(config.log_level, LogLevel::Debug);
    }

    #[test]
    fn documents_revalidate_and_assets_cache() {
        assert_eq!(cache_policy("/", 60), "no-cache");
        assert_eq!(cache_policy("/about", 60), "no-cache");
        assert_eq!(cache_policy("/index.html", 60), "no-cache");
        assert_eq!(cache_policy("/site-3f2a.js", 60), "public, max-age=60");
    }

    #[tokio::test]
    async fn deep_links_fall_back_to_index() {
        let dist = write_dist();
        let address = serve(dist.path()).await;

        for path in ["/about", "/gallery/", "/countries?from=nav"] {
            let response = reqwest::get(format!("http://{address}{path}"))
                .await
                .expect("request succeeds");
            assert_eq!(response.status(), reqwest::StatusCode::OK, "{path}");
            assert_eq!(
                response
                    .headers()
                    .get(reqwest::header::CACHE_CONTROL)
                    .and_then(|value| value.to_str().ok()),
                Some("no-cache")
            );
            let body = response.text().await.expect("body");
            assert!(body.contains("id=\"app\""), "{path}");
        }
    }

    #[tokio::test]
    async fn assets_are_served_with_max_age() {
        let dist = write_dist();
        let address = serve(dist.path()).await;

        let response = reqwest::get(format!("http://{address}/site-3f2a.js"))
            .await
            .expect("request succeeds");
        assert_eq!(response.status(), reqwest::StatusCode::OK);
        assert_eq!(
            response
                .headers()
                .get(reqwest::header::CACHE_CONTROL)
                .and_then(|value| value.to_str().ok()),
            Some("public, max-age=600")
        );
        assert_eq!(response.text().await.expect("body"), "console.log('site');");
    }
}
