use leptos::*;
use leptos_router::*;

use super::follow;
use crate::{
    components::CredentialsForm,
    controller::{FormFields, Outcome},
    error::ClientError,
    navigation::{NavEvent, Page},
    AppContext,
};

#[component]
pub fn Register(cx: Scope, app: AppContext) -> impl IntoView {
    if app.coordinator.require_session().is_ok() {
        return view! { cx, <Redirect path=Page::Dashboard.path()/> }.into_view(cx);
    }

    let fields = create_rw_signal(cx, FormFields::default());
    let (register_error, set_register_error) = create_signal(cx, None::<ClientError>);
    let controller = app.controller.clone();
    let coordinator = app.coordinator.clone();
    let register_action = create_action(cx, move |input: &FormFields| {
        let controller = controller.clone();
        let coordinator = coordinator.clone();
        let request = input.register_request();
        async move {
            coordinator.dispatch(NavEvent::SubmitRegistration);
            match controller.register(request).await {
                Outcome::Success(email) => {
                    set_register_error.set(None);
                    fields.set(FormFields::default());
                    coordinator.dispatch(NavEvent::RegistrationSucceeded { email })
                }
                Outcome::Failure(error) => {
                    set_register_error.set(Some(error));
                    coordinator.dispatch(NavEvent::RegistrationFailed)
                }
                Outcome::Suppressed => None,
            }
        }
    });

    let navigate = use_navigate(cx);
    let destination = register_action.value();
    create_effect(cx, move |_| {
        if let Some(Some(destination)) = destination.get() {
            follow(&navigate, &destination, Page::Register);
        }
    });
    let pending = register_action.pending();
    let disabled = Signal::derive(cx, move || pending.get());

    view! { cx,
        <div class="auth-card mx-auto">
            <div class="text-center mb-4">
                <h1 class="display-5 fw-bold">"Narvis"</h1>
                <p class="text-body-secondary">"Create your account"</p>
            </div>
            <CredentialsForm
                fields=fields
                action=register_action
                error=register_error.into()
                disabled=disabled
                submit_label="Create Account"
                with_name=true
            />
            <p class="mt-3 text-center">
                "Already have an account? "
                <a href=Page::Login.path()>"Sign in"</a>
            </p>
        </div>
    }
    .into_view(cx)
}
