//! Maps submission outcomes and session state onto routes.

use std::{cell::Cell, rc::Rc};

use crate::session::{SessionStore, SessionToken};

/// Top level views of the client
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Page {
    Home,
    Login,
    Register,
    Dashboard,
}

impl Page {
    pub const fn path(self) -> &'static str {
        match self {
            Self::Home => "/",
            Self::Login => "/login",
            Self::Register => "/register",
            Self::Dashboard => "/dashboard",
        }
    }
}

/// One-shot message from the registration flow to the login view, carried in the query string
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NavigationSignal {
    pub registered: bool,
    pub email: String,
}

impl NavigationSignal {
    pub fn registered<S: Into<String>>(email: S) -> Self {
        Self {
            registered: true,
            email: email.into(),
        }
    }

    pub fn to_query(&self) -> String {
        url::form_urlencoded::Serializer::new(String::new())
            .append_pair("registered", if self.registered { "true" } else { "false" })
            .append_pair("email", &self.email)
            .finish()
    }

    /// Build from already decoded query values. Returns `None` when the query carries nothing.
    pub fn from_params(registered: Option<&str>, email: Option<&str>) -> Option<Self> {
        let registered = registered == Some("true");
        let email = email.unwrap_or_default().to_owned();
        if !registered && email.is_empty() {
            return None;
        }
        Some(Self { registered, email })
    }

    /// Parse a raw query string, with or without the leading `?`
    pub fn from_query(query: &str) -> Option<Self> {
        let query = query.strip_prefix('?').unwrap_or(query);
        let mut registered = None;
        let mut email = None;
        for (key, value) in url::form_urlencoded::parse(query.as_bytes()) {
            match key.as_ref() {
                "registered" => registered = Some(value.into_owned()),
                "email" => email = Some(value.into_owned()),
                _ => {}
            }
        }
        Self::from_params(registered.as_deref(), email.as_deref())
    }
}

/// What the login view starts with, taken from the query string it was opened with. The view
/// consumes this once at mount and cleans the address bar when `strip_query` is set, so a reload
/// or a later visit sees an empty query and no banner.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LoginEntry {
    pub show_registered_banner: bool,
    pub email: String,
    pub strip_query: bool,
}

impl LoginEntry {
    pub fn consume(query: &str) -> Self {
        match NavigationSignal::from_query(query) {
            Some(signal) => Self {
                show_registered_banner: signal.registered,
                email: signal.email,
                strip_query: true,
            },
            None => Self::default(),
        }
    }
}

/// Where a transition sends the user
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Destination {
    pub page: Page,
    pub signal: Option<NavigationSignal>,
}

impl Destination {
    pub const fn page(page: Page) -> Self {
        Self { page, signal: None }
    }

    pub fn href(&self) -> String {
        match &self.signal {
            Some(signal) => format!("{}?{}", self.page.path(), signal.to_query()),
            None => self.page.path().to_owned(),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AuthState {
    Anonymous,
    Authenticating,
    Authenticated,
    RegistrationPending,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum NavEvent {
    SubmitLogin,
    SubmitRegistration,
    LoginSucceeded,
    LoginFailed,
    RegistrationSucceeded { email: String },
    RegistrationFailed,
    Logout,
    /// An authenticated request was refused, the stored token is no good
    SessionRejected,
}

/// Next state and, if the view should change, where to go. Events that make no sense in `state`
/// leave it untouched.
pub fn transition(state: AuthState, event: &NavEvent) -> (AuthState, Option<Destination>) {
    use AuthState::{Anonymous, Authenticated, Authenticating, RegistrationPending};

    match (state, event) {
        (Anonymous, NavEvent::SubmitLogin) => (Authenticating, None),
        (Authenticating, NavEvent::LoginSucceeded) => {
            (Authenticated, Some(Destination::page(Page::Dashboard)))
        }
        (Authenticating, NavEvent::LoginFailed) => {
            (Anonymous, Some(Destination::page(Page::Login)))
        }
        (Anonymous, NavEvent::SubmitRegistration) => (RegistrationPending, None),
        (RegistrationPending, NavEvent::RegistrationSucceeded { email }) => (
            Anonymous,
            Some(Destination {
                page: Page::Login,
                signal: Some(NavigationSignal::registered(email.clone())),
            }),
        ),
        (RegistrationPending, NavEvent::RegistrationFailed) => {
            (Anonymous, Some(Destination::page(Page::Register)))
        }
        (_, NavEvent::Logout | NavEvent::SessionRejected) => {
            (Anonymous, Some(Destination::page(Page::Login)))
        }
        (state, _) => (state, None),
    }
}

/// Tracks the [AuthState] of the tab and applies the side effects of each transition
#[derive(Clone)]
pub struct Coordinator {
    state: Rc<Cell<AuthState>>,
    session: SessionStore,
}

impl Coordinator {
    /// A tab that still holds a live token starts out authenticated
    pub fn new(session: SessionStore) -> Self {
        let initial = if session.is_active() {
            AuthState::Authenticated
        } else {
            AuthState::Anonymous
        };
        Self {
            state: Rc::new(Cell::new(initial)),
            session,
        }
    }

    pub fn state(&self) -> AuthState {
        self.state.get()
    }

    /// Apply `event`, returning where to navigate if anywhere
    pub fn dispatch(&self, event: NavEvent) -> Option<Destination> {
        let current = self.state.get();
        let (next, destination) = transition(current, &event);
        if matches!(event, NavEvent::Logout | NavEvent::SessionRejected) {
            self.session.clear();
        }
        if next != current {
            log::debug!("{current:?} --{event:?}--> {next:?}");
        }
        self.state.set(next);
        destination
    }

    /// Route guard for views that require a session. Without a live token the state falls back
    /// to [AuthState::Anonymous] and the login destination is returned as the error.
    pub fn require_session(&self) -> Result<SessionToken, Destination> {
        match self.session.get() {
            Some(token) => {
                self.state.set(AuthState::Authenticated);
                Ok(token)
            }
            None => {
                log::info!("No active session, redirecting to login");
                self.state.set(AuthState::Anonymous);
                Err(Destination::page(Page::Login))
            }
        }
    }

    /// Where `/` leads: the dashboard for a returning user, otherwise the login view
    pub fn landing(&self) -> Destination {
        if self.session.is_active() {
            Destination::page(Page::Dashboard)
        } else {
            Destination::page(Page::Login)
        }
    }
}
