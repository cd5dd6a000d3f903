//! Credential submission for the login and registration forms.
//!
//! The controller never validates input itself. It forwards what was typed to the API and reports
//! back exactly one [Outcome] per accepted submission. While a submission is outstanding any
//! further submission is suppressed without touching the network, so the first response is the
//! only one that can reach the [SessionStore].

use std::{cell::Cell, rc::Rc};

use narvis_common::{Credentials, RegisterRequest};

use crate::{
    api::NarvisApi,
    error::ClientError,
    session::{SessionStore, SessionToken},
};

/// Text currently held by a login or registration form
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FormFields {
    pub name: String,
    pub email: String,
    pub password: String,
}

impl FormFields {
    pub fn with_email<S: Into<String>>(email: S) -> Self {
        Self {
            email: email.into(),
            ..Self::default()
        }
    }

    pub fn credentials(&self) -> Credentials {
        Credentials {
            email: self.email.clone(),
            password: self.password.clone(),
        }
    }

    /// Registration payload. A blank name is sent as absent.
    pub fn register_request(&self) -> RegisterRequest {
        let name = self.name.trim();
        RegisterRequest {
            email: self.email.clone(),
            password: self.password.clone(),
            name: (!name.is_empty()).then(|| name.to_owned()),
        }
    }
}

/// Result of a form submission
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Outcome<T> {
    Success(T),
    Failure(ClientError),
    /// Another submission was still in flight so nothing was sent
    Suppressed,
}

/// Allows one submission at a time. Clones share the same flag.
#[derive(Clone, Debug, Default)]
pub struct SubmissionGuard {
    in_flight: Rc<Cell<bool>>,
}

impl SubmissionGuard {
    /// Claim the guard. Returns `None` while another claim is still held.
    pub fn try_begin(&self) -> Option<InFlight> {
        if self.in_flight.replace(true) {
            return None;
        }
        Some(InFlight {
            in_flight: self.in_flight.clone(),
        })
    }
}

/// Held for the duration of a submission, releases the guard on drop
#[derive(Debug)]
pub struct InFlight {
    in_flight: Rc<Cell<bool>>,
}

impl Drop for InFlight {
    fn drop(&mut self) {
        self.in_flight.set(false);
    }
}

/// Submits credentials and owns the only write path into the [SessionStore]. Login and
/// registration are guarded separately, so a pending login never swallows a registration.
#[derive(Clone)]
pub struct Controller {
    api: Rc<dyn NarvisApi>,
    session: SessionStore,
    login_guard: SubmissionGuard,
    register_guard: SubmissionGuard,
}

impl Controller {
    pub fn new(api: Rc<dyn NarvisApi>, session: SessionStore) -> Self {
        Self {
            api,
            session,
            login_guard: SubmissionGuard::default(),
            register_guard: SubmissionGuard::default(),
        }
    }

    /// Log in, storing the issued token on success
    pub async fn login(&self, credentials: Credentials) -> Outcome<SessionToken> {
        let Some(_in_flight) = self.login_guard.try_begin() else {
            log::warn!("Login for {} ignored, a submission is already in flight", credentials.email);
            return Outcome::Suppressed;
        };
        let token = match self.api.login(&credentials).await {
            Ok(inner) => inner,
            Err(error) => {
                log::error!("Unable to login with {}: {error}", credentials.email);
                return Outcome::Failure(error);
            }
        };
        if let Err(error) = self.session.set(token.clone()) {
            log::error!("{error}");
            return Outcome::Failure(error);
        }
        log::info!("Logged in as {}", credentials.email);
        Outcome::Success(token)
    }

    /// Register an account, yielding the email the server recorded for it
    pub async fn register(&self, request: RegisterRequest) -> Outcome<String> {
        let Some(_in_flight) = self.register_guard.try_begin() else {
            log::warn!("Registration for {} ignored, a submission is already in flight", request.email);
            return Outcome::Suppressed;
        };
        match self.api.register(&request).await {
            Ok(user) => {
                log::info!("Registered {}", user.email);
                Outcome::Success(user.email)
            }
            Err(error) => {
                log::error!("Unable to register {}: {error}", request.email);
                Outcome::Failure(error)
            }
        }
    }
}
