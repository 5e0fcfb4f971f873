use thiserror::Error;

/// A browser capability the current runtime does not provide. These are
/// expected on older or headless hosts and never surface to visitors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CapabilityError {
    #[error("window is not available")]
    MissingWindow,

    #[error("document is not available")]
    MissingDocument,

    #[error("element `{0}` is not mounted")]
    MissingElement(String),

    #[error("WebGL context could not be created")]
    WebGlUnavailable,

    #[error("shader failed to compile: {0}")]
    ShaderCompile(String),

    #[error("shader program failed to link: {0}")]
    ProgramLink(String),

    #[error("GPU buffer allocation failed")]
    BufferAllocation,

    #[error("IntersectionObserver is not supported")]
    ObserverUnavailable,

    #[error("event listener `{0}` could not be registered")]
    Listener(&'static str),
}

impl CapabilityError {
    pub fn code(&self) -> &'static str {
        match self {
            Self::MissingWindow => "missing_window",
            Self::MissingDocument => "missing_document",
            Self::MissingElement(_) => "missing_element",
            Self::WebGlUnavailable => "webgl_unavailable",
            Self::ShaderCompile(_) => "shader_compile",
            Self::ProgramLink(_) => "program_link",
            Self::BufferAllocation => "buffer_allocation",
            Self::ObserverUnavailable => "observer_unavailable",
            Self::Listener(_) => "listener",
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SubmitError {
    #[error("submission was refused: {0}")]
    Refused(String),

    #[error("payload could not be encoded: {0}")]
    Encoding(String),
}

impl From<serde_json::Error> for SubmitError {
    fn from(err: serde_json::Error) -> Self {
        SubmitError::Encoding(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn capability_error_display_carries_detail() {
        let err = CapabilityError::ShaderCompile("ERROR: 0:3 syntax".to_string());
        assert!(err.to_string().contains("0:3 syntax"));
        assert_eq!(err.code(), "shader_compile");
    }

    #[test]
    fn submit_error_wraps_serde_failure() {
        let serde_err = serde_json::from_str::<serde_json::Value>("{").expect_err("truncated json");
        let err = SubmitError::from(serde_err);
        assert!(matches!(err, SubmitError::Encoding(_)));
    }
}
