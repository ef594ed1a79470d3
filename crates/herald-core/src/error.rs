use thiserror::Error;

/// Top-level error type for Herald.
#[derive(Debug, Error)]
pub enum HeraldError {
    /// Configuration error (missing token, unparsable values or files).
    #[error("config error: {0}")]
    Config(String),

    /// Transport-level failure talking to a messaging channel.
    #[error("channel error: {0}")]
    Channel(String),

    /// The channel answered, but did not accept the message.
    #[error("delivery failed ({status}): {body}")]
    Delivery { status: u16, body: String },
}

impl HeraldError {
    /// Process exit code for this error: 2 for configuration problems, 1 otherwise.
    pub fn exit_code(&self) -> u8 {
        match self {
            Self::Config(_) => 2,
            _ => 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_codes() {
        assert_eq!(HeraldError::Config("missing token".into()).exit_code(), 2);
        assert_eq!(HeraldError::Channel("timeout".into()).exit_code(), 1);
        let delivery = HeraldError::Delivery {
            status: 400,
            body: r#"{"ok":false}"#.into(),
        };
        assert_eq!(delivery.exit_code(), 1);
    }

    #[test]
    fn test_delivery_display_includes_status_and_body() {
        let err = HeraldError::Delivery {
            status: 403,
            body: "forbidden".into(),
        };
        assert_eq!(err.to_string(), "delivery failed (403): forbidden");
    }
}
