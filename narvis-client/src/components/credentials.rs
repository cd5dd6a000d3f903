use leptos::*;

use super::ErrorToast;
use crate::{controller::FormFields, error::ClientError, navigation::Destination};

/// Email/password form, with an optional name field for registration. The field values live in
/// `fields` so the owning page can pre-fill and clear them.
#[component]
pub fn CredentialsForm(
    cx: Scope,
    fields: RwSignal<FormFields>,
    action: Action<FormFields, Option<Destination>>,
    error: Signal<Option<ClientError>>,
    disabled: Signal<bool>,
    submit_label: &'static str,
    #[prop(optional)] with_name: bool,
) -> impl IntoView {
    // fields are sent as typed, the server decides what is valid
    let on_submit = move |ev: ev::SubmitEvent| {
        ev.prevent_default();
        if disabled.get_untracked() {
            return;
        }
        action.dispatch(fields.get_untracked());
    };

    let name_field = with_name.then(|| {
        view! { cx,
            <div class="form-group mb-3">
                <label for="name">"Full Name"</label>
                <input
                    class="form-control"
                    type="text"
                    id="name"
                    name="name"
                    placeholder="Enter your full name"
                    prop:value=move || fields.with(|f| f.name.clone())
                    on:input=move |ev| {
                        let val = event_target_value(&ev);
                        fields.update(|f| f.name = val);
                    }
                />
            </div>
        }
    });

    view! { cx,
        <form novalidate on:submit=on_submit>
            {name_field}
            <div class="form-group mb-3">
                <label for="email">"Email address"</label>
                <input
                    class="form-control"
                    type="email"
                    id="email"
                    name="email"
                    placeholder="Enter your email"
                    prop:value=move || fields.with(|f| f.email.clone())
                    on:input=move |ev| {
                        let val = event_target_value(&ev);
                        fields.update(|f| f.email = val);
                    }
                />
            </div>
            <div class="form-group mb-3">
                <label for="password">"Password"</label>
                <input
                    class="form-control"
                    type="password"
                    id="password"
                    name="password"
                    placeholder="Enter your password"
                    prop:value=move || fields.with(|f| f.password.clone())
                    on:input=move |ev| {
                        let val = event_target_value(&ev);
                        fields.update(|f| f.password = val);
                    }
                />
            </div>
            {move || error.get().map(|err| view! { cx, <ErrorToast error=err/> })}
            <input
                class="btn btn-primary w-100"
                value=submit_label
                type="submit"
                prop:disabled=move || disabled.get()
            />
        </form>
    }
}
