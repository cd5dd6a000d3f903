//! Wire types exchanged between the Narvis browser client and the Narvis API.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Login credentials as typed into the login form. Sent form-encoded to the token endpoint where
/// `email` travels as the `username` field.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

/// Body of a `POST /users/register` request
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

/// Successful response of the token endpoint
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessToken {
    pub access_token: String,
    #[serde(default = "default_token_type")]
    pub token_type: String,
}

fn default_token_type() -> String {
    "bearer".to_owned()
}

/// Public view of a user account. Returned by registration and by `GET /users/me`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    #[serde(default)]
    pub id: Option<Uuid>,
    pub email: String,
    #[serde(default)]
    pub name: Option<String>,
}

impl User {
    /// Name to show in the UI. Falls back to the email when the account has no name.
    pub fn display_name(&self) -> &str {
        match self.name.as_deref() {
            Some(name) if !name.trim().is_empty() => name,
            _ => &self.email,
        }
    }
}

/// A titled, described content unit owned by a user account. The backend model names its fields
/// `narrative_name` and `narrative_description`, both spellings are accepted.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Narrative {
    pub id: String,
    #[serde(alias = "narrative_name")]
    pub title: String,
    #[serde(default, alias = "narrative_description")]
    pub description: String,
}

/// Error body produced by the API for any non-2xx response
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiErrorBody {
    pub detail: ErrorDetail,
}

/// `detail` is a plain message for handled errors and a list of field issues when request
/// validation fails.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ErrorDetail {
    Message(String),
    Issues(Vec<ValidationIssue>),
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationIssue {
    pub msg: String,
    #[serde(default)]
    pub loc: Vec<serde_json::Value>,
}

impl ValidationIssue {
    /// Name of the offending field, the last element of `loc`
    pub fn field(&self) -> Option<String> {
        self.loc.last().map(|value| match value {
            serde_json::Value::String(name) => name.clone(),
            other => other.to_string(),
        })
    }
}

impl ApiErrorBody {
    /// Human readable reason carried by the body. Empty when the server sent nothing useful.
    pub fn reason(&self) -> String {
        match &self.detail {
            ErrorDetail::Message(message) => message.trim().to_owned(),
            ErrorDetail::Issues(issues) => issues
                .iter()
                .map(|issue| match issue.field() {
                    Some(field) => format!("{field}: {}", issue.msg),
                    None => issue.msg.clone(),
                })
                .collect::<Vec<_>>()
                .join("; "),
        }
    }
}
