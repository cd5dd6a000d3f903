use thiserror::Error;

pub type Result<T> = std::result::Result<T, ClientError>;

/// Every way a request made by the client can fail. Each variant carries the message shown to
/// the user, so none of them may be empty.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ClientError {
    /// The server refused the submitted values (HTTP 422)
    #[error("{0}")]
    Validation(String),
    /// Bad credentials, duplicate account, or a missing/expired/invalid session token
    #[error("{0}")]
    AuthRejected(String),
    /// The request could not be sent, no response arrived, or it timed out
    #[error("Could not reach the server. {0}")]
    Network(String),
    /// 5xx, an unexpected status, or a response body that could not be understood
    #[error("The server could not complete the request. {0}")]
    Server(String),
    /// Browser storage refused to hold the session
    #[error("Could not save your session in this browser. {0}")]
    Storage(String),
}

impl ClientError {
    /// Short heading for the error banner
    pub const fn title(&self) -> &'static str {
        match self {
            Self::Validation(_) => "Check your details",
            Self::AuthRejected(_) => "Not authorized",
            Self::Network(_) => "Connection problem",
            Self::Server(_) => "Server problem",
            Self::Storage(_) => "Browser storage problem",
        }
    }

    /// Classify a non-2xx response. `reason` is the server provided detail, possibly empty.
    pub fn from_status(status: u16, reason: &str) -> Self {
        let reason = reason.trim();
        let reason = if reason.is_empty() {
            format!("Request failed with status {status}")
        } else {
            reason.to_owned()
        };
        match status {
            400 | 401 | 403 | 409 => Self::AuthRejected(reason),
            422 => Self::Validation(reason),
            _ => Self::Server(reason),
        }
    }
}

impl From<gloo_net::Error> for ClientError {
    fn from(value: gloo_net::Error) -> Self {
        match value {
            gloo_net::Error::SerdeError(error) => Self::Server(error.to_string()),
            other => Self::Network(other.to_string()),
        }
    }
}

impl From<serde_json::Error> for ClientError {
    fn from(value: serde_json::Error) -> Self {
        Self::Server(format!("Unexpected response body. {value}"))
    }
}

impl From<gloo_storage::errors::StorageError> for ClientError {
    fn from(value: gloo_storage::errors::StorageError) -> Self {
        Self::Storage(value.to_string())
    }
}

#[cfg(test)]
mod test {
    use rstest::rstest;

    use super::ClientError;

    #[rstest]
    #[case::bad_credentials(400, "Authentication failed - invalid credentials", ClientError::AuthRejected("Authentication failed - invalid credentials".to_owned()))]
    #[case::unauthorized(401, "Could not validate credentials", ClientError::AuthRejected("Could not validate credentials".to_owned()))]
    #[case::forbidden(403, "Inactive user", ClientError::AuthRejected("Inactive user".to_owned()))]
    #[case::validation(422, "password: too short", ClientError::Validation("password: too short".to_owned()))]
    #[case::internal(500, "boom", ClientError::Server("boom".to_owned()))]
    #[case::unexpected(404, "Not Found", ClientError::Server("Not Found".to_owned()))]
    #[case::empty_reason(502, "  ", ClientError::Server("Request failed with status 502".to_owned()))]
    fn from_status_should_classify(
        #[case] status: u16,
        #[case] reason: &str,
        #[case] expected: ClientError,
    ) {
        assert_eq!(ClientError::from_status(status, reason), expected, "status {status}");
    }

    #[test]
    fn messages_are_never_empty() {
        let errors = [
            ClientError::from_status(400, ""),
            ClientError::from_status(422, ""),
            ClientError::from_status(503, ""),
            ClientError::Network("timed out".to_owned()),
        ];
        for error in errors {
            assert!(!error.to_string().trim().is_empty(), "{error:?} renders empty");
        }
    }
}
