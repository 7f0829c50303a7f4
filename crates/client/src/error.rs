use gateway_core::{FailureClass, classify_failure};
use serde_json::Value;

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("invalid base url: {0}")]
    InvalidBaseUrl(String),
    /// Non-success HTTP response; `detail` is the parsed error body.
    #[error("{status} - {detail}")]
    Status { status: u16, detail: Value },
    #[error("{0}")]
    Transport(String),
    #[error("{0}")]
    Decode(String),
}

pub type Result<T> = std::result::Result<T, ClientError>;

impl ClientError {
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn failure_class(&self) -> Option<FailureClass> {
        self.status().map(classify_failure)
    }

    pub fn forces_logout(&self) -> bool {
        self.failure_class()
            .is_some_and(|class| class.forces_logout)
    }

    pub(crate) fn transport(err: reqwest::Error) -> Self {
        ClientError::Transport(error_chain(&err))
    }
}

impl From<serde_json::Error> for ClientError {
    fn from(err: serde_json::Error) -> Self {
        ClientError::Decode(err.to_string())
    }
}

// reqwest keeps the interesting part (e.g. "Connection refused") in the source chain.
fn error_chain(err: &dyn std::error::Error) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(inner) = source {
        let text = inner.to_string();
        if !message.contains(&text) {
            message.push_str(": ");
            message.push_str(&text);
        }
        source = inner.source();
    }
    message
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn status_error_renders_status_and_compact_detail() {
        let err = ClientError::Status {
            status: 500,
            detail: json!({"detail": "boom"}),
        };
        assert_eq!(err.to_string(), r#"500 - {"detail":"boom"}"#);
        assert!(!err.forces_logout());
    }

    #[test]
    fn auth_statuses_force_logout() {
        for status in [401, 403] {
            let err = ClientError::Status {
                status,
                detail: Value::Null,
            };
            assert!(err.forces_logout());
        }
        assert!(!ClientError::Transport("refused".to_string()).forces_logout());
    }

    #[derive(Debug)]
    struct Outer(std::io::Error);

    impl std::fmt::Display for Outer {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            write!(f, "error sending request")
        }
    }

    impl std::error::Error for Outer {
        fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
            Some(&self.0)
        }
    }

    #[test]
    fn error_chain_appends_sources() {
        let err = Outer(std::io::Error::new(
            std::io::ErrorKind::ConnectionRefused,
            "Connection refused",
        ));
        assert_eq!(
            error_chain(&err),
            "error sending request: Connection refused"
        );
    }
}
