pub mod dashboard;
pub mod home;
pub mod login;
pub mod register;

use std::fmt::Debug;

use leptos_router::NavigateOptions;

use crate::navigation::{Destination, Page};

/// Navigate to `destination` unless it is the page already showing
pub(crate) fn follow<F, E>(navigate: &F, destination: &Destination, current: Page)
where
    F: Fn(&str, NavigateOptions) -> Result<(), E>,
    E: Debug,
{
    if destination.page == current && destination.signal.is_none() {
        return;
    }
    let href = destination.href();
    if let Err(error) = navigate(&href, NavigateOptions::default()) {
        log::error!("Could not navigate to {href}: {error:?}");
    }
}

/// Drop the query string from the address bar without a navigation, so a reload cannot replay a
/// consumed navigation signal
pub(crate) fn strip_query(page: Page) {
    let Some(window) = web_sys::window() else {
        return;
    };
    let result = window.history().and_then(|history| {
        history.replace_state_with_url(&wasm_bindgen::JsValue::NULL, "", Some(page.path()))
    });
    if let Err(error) = result {
        log::warn!("Could not clean the address bar: {error:?}");
    }
}
