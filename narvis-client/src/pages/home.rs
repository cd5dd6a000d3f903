use leptos::*;
use leptos_router::*;

use crate::AppContext;

/// `/` sends a returning user with a live session to the dashboard and everyone else to login
#[component]
pub fn Home(cx: Scope, app: AppContext) -> impl IntoView {
    let destination = app.coordinator.landing();
    view! { cx, <Redirect path=destination.href()/> }
}
