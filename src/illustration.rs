/// A remote animated illustration, or the static icon shown in its place.
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum Illustration {
    Loaded(String),
    Fallback(&'static str),
}

impl Illustration {
    /// Accepts a fetched body only when it is an SVG document.
    pub fn resolve(body: Result<String, String>, fallback_icon: &'static str) -> Self {
        match body {
            Ok(markup) if looks_like_svg(&markup) => Self::Loaded(markup),
            Ok(_) | Err(_) => Self::Fallback(fallback_icon),
        }
    }

    pub fn is_loaded(&self) -> bool {
        matches!(self, Self::Loaded(_))
    }
}

fn looks_like_svg(markup: &str) -> bool {
    let trimmed = markup.trim_start();
    let body = if trimmed.starts_with("<?xml") {
        trimmed
            .find("?>")
            .map(|end| trimmed[end + 2..].trim_start())
            .unwrap_or("")
    } else {
        trimmed
    };

    body.starts_with("<svg") && !markup.contains("<script")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn svg_body_loads() {
        let svg = r#"<svg xmlns="http://www.w3.org/2000/svg"><circle r="4"/></svg>"#.to_string();
        assert_eq!(
            Illustration::resolve(Ok(svg.clone()), "globe"),
            Illustration::Loaded(svg)
        );
    }

    #[test]
    fn xml_prolog_is_skipped() {
        let svg = "<?xml version=\"1.0\"?>\n<svg></svg>".to_string();
        assert!(Illustration::resolve(Ok(svg), "globe").is_loaded());
    }

    #[test]
    fn html_error_page_falls_back() {
        let page = "<!doctype html><title>404</title>".to_string();
        assert_eq!(
            Illustration::resolve(Ok(page), "graduation-cap"),
            Illustration::Fallback("graduation-cap")
        );
    }

    #[test]
    fn scripted_svg_falls_back() {
        let svg = "<svg><script>alert(1)</script></svg>".to_string();
        assert!(!Illustration::resolve(Ok(svg), "globe").is_loaded());
    }

    #[test]
    fn network_error_falls_back() {
        assert_eq!(
            Illustration::resolve(Err("offline".to_string()), "globe"),
            Illustration::Fallback("globe")
        );
    }
}
