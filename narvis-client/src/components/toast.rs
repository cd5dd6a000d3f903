use leptos::*;

use crate::error::ClientError;

/// Inline notification. `tone` is a bootstrap contextual colour such as `success` or `danger`.
#[component]
pub fn Toast(
    cx: Scope,
    body: String,
    #[prop(optional)] heading: &'static str,
    #[prop(optional)] tone: &'static str,
) -> impl IntoView {
    let tone = if tone.is_empty() { "secondary" } else { tone };
    let heading = if heading.is_empty() { "Narvis" } else { heading };
    view! { cx,
        <div class=format!("toast show w-100 mb-3 border-{tone}") role="alert" aria-live="assertive" aria-atomic="true">
            <div class=format!("toast-header text-bg-{tone}")>
                <strong class="me-auto">{heading}</strong>
            </div>
            <div class="toast-body">{body}</div>
        </div>
    }
}

#[component]
pub fn ErrorToast(cx: Scope, error: ClientError) -> impl IntoView {
    view! { cx, <Toast heading=error.title() body=error.to_string() tone="danger"/> }
}
