use leptos::*;
use leptos_router::*;

use super::{follow, strip_query};
use crate::{
    components::{CredentialsForm, Toast},
    controller::{FormFields, Outcome},
    error::ClientError,
    navigation::{LoginEntry, NavEvent, Page},
    AppContext,
};

#[component]
pub fn Login(cx: Scope, app: AppContext) -> impl IntoView {
    if app.coordinator.require_session().is_ok() {
        return view! { cx, <Redirect path=Page::Dashboard.path()/> }.into_view(cx);
    }

    // consumed here only, the body of a component runs once per mount
    let entry = LoginEntry::consume(&use_location(cx).search.get_untracked());
    if entry.strip_query {
        strip_query(Page::Login);
    }

    let fields = create_rw_signal(cx, FormFields::with_email(entry.email));
    let (login_error, set_login_error) = create_signal(cx, None::<ClientError>);
    let controller = app.controller.clone();
    let coordinator = app.coordinator.clone();
    let login_action = create_action(cx, move |input: &FormFields| {
        let controller = controller.clone();
        let coordinator = coordinator.clone();
        let credentials = input.credentials();
        async move {
            coordinator.dispatch(NavEvent::SubmitLogin);
            match controller.login(credentials).await {
                Outcome::Success(_) => {
                    set_login_error.set(None);
                    fields.set(FormFields::default());
                    coordinator.dispatch(NavEvent::LoginSucceeded)
                }
                Outcome::Failure(error) => {
                    set_login_error.set(Some(error));
                    coordinator.dispatch(NavEvent::LoginFailed)
                }
                Outcome::Suppressed => None,
            }
        }
    });

    let navigate = use_navigate(cx);
    let destination = login_action.value();
    create_effect(cx, move |_| {
        if let Some(Some(destination)) = destination.get() {
            follow(&navigate, &destination, Page::Login);
        }
    });
    let pending = login_action.pending();
    let disabled = Signal::derive(cx, move || pending.get());

    view! { cx,
        <div class="auth-card mx-auto">
            <div class="text-center mb-4">
                <h1 class="display-5 fw-bold">"Narvis"</h1>
                <p class="text-body-secondary">"Log in to your account"</p>
            </div>
            {entry.show_registered_banner.then(|| view! { cx,
                <Toast
                    tone="success"
                    heading="Welcome"
                    body="Registration successful! Please log in with your new account.".to_owned()
                />
            })}
            <CredentialsForm
                fields=fields
                action=login_action
                error=login_error.into()
                disabled=disabled
                submit_label="Sign in"
            />
            <p class="mt-3 text-center">
                "New to Narvis? "
                <a href=Page::Register.path()>"Create an account"</a>
            </p>
        </div>
    }
    .into_view(cx)
}
