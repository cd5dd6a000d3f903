#![warn(clippy::expect_used)]
#![warn(clippy::unwrap_used)]
#![warn(clippy::uninlined_format_args)]
#![warn(clippy::manual_let_else)]
#![warn(clippy::str_to_string)]

//! Browser client for the Narvis dashboard: session handling, credential submission, navigation
//! and the narrative collection, plus the Leptos views wired on top of them.

pub mod api;
pub mod config;
pub mod controller;
pub mod error;
pub mod narratives;
pub mod navigation;
pub mod session;

mod components;
mod pages;

use std::rc::Rc;

use leptos::*;
use leptos_router::*;

use crate::{
    api::{GatewayApi, NarvisApi},
    config::ClientConfig,
    controller::Controller,
    narratives::NarrativeLoader,
    navigation::{Coordinator, Page},
    pages::{dashboard::Dashboard, home::Home, login::Login, register::Register},
    session::SessionStore,
};

/// Everything the views need, built once at start-up and handed down explicitly
#[derive(Clone)]
pub struct AppContext {
    pub api: Rc<dyn NarvisApi>,
    pub session: SessionStore,
    pub controller: Controller,
    pub coordinator: Coordinator,
    pub loader: NarrativeLoader,
}

impl AppContext {
    pub fn new(api: Rc<dyn NarvisApi>, session: SessionStore) -> Self {
        Self {
            controller: Controller::new(api.clone(), session.clone()),
            coordinator: Coordinator::new(session.clone()),
            loader: NarrativeLoader::new(api.clone(), session.clone()),
            api,
            session,
        }
    }

    /// Context talking to the configured API and persisting the session in `localStorage`
    pub fn from_config(config: &ClientConfig) -> Self {
        Self::new(
            Rc::new(GatewayApi::from_config(config)),
            SessionStore::browser(config.session_ttl),
        )
    }
}

#[component]
pub fn App(cx: Scope, app: AppContext) -> impl IntoView {
    let home_app = app.clone();
    let login_app = app.clone();
    let register_app = app.clone();
    let dashboard_app = app;
    view! { cx,
        <Router>
            <main class="container py-4">
                <Routes>
                    <Route
                        path=Page::Home.path()
                        view=move |cx| view! { cx, <Home app=home_app.clone()/> }
                    />
                    <Route
                        path=Page::Login.path()
                        view=move |cx| view! { cx, <Login app=login_app.clone()/> }
                    />
                    <Route
                        path=Page::Register.path()
                        view=move |cx| view! { cx, <Register app=register_app.clone()/> }
                    />
                    <Route
                        path=Page::Dashboard.path()
                        view=move |cx| view! { cx, <Dashboard app=dashboard_app.clone()/> }
                    />
                </Routes>
            </main>
        </Router>
    }
}
