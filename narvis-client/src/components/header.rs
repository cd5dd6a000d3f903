use leptos::*;
use leptos_router::*;

use crate::{
    navigation::{NavEvent, Page},
    pages::follow,
    AppContext,
};

#[component]
pub fn DashboardHeader(cx: Scope, app: AppContext) -> impl IntoView {
    let api = app.api.clone();
    let session = app.session.clone();
    let user = create_local_resource(
        cx,
        || (),
        move |_| {
            let api = api.clone();
            let session = session.clone();
            async move {
                let token = session.get()?;
                match api.current_user(&token).await {
                    Ok(user) => Some(user),
                    Err(error) => {
                        log::warn!("Unable to fetch the current user: {error}");
                        None
                    }
                }
            }
        },
    );

    let navigate = use_navigate(cx);
    let coordinator = app.coordinator.clone();
    let logout = move |_: ev::MouseEvent| {
        if let Some(destination) = coordinator.dispatch(NavEvent::Logout) {
            follow(&navigate, &destination, Page::Dashboard);
        }
    };

    view! { cx,
        <nav class="navbar bg-body-tertiary mb-4" id="mainNavBar">
            <div class="container-fluid">
                <a class="navbar-brand fw-bold" href=Page::Dashboard.path()>"Narvis"</a>
                <ul class="navbar-nav ms-auto flex-row align-items-center gap-3">
                    <li class="nav-item">
                        <span class="navbar-text">
                            {move || {
                                user.read(cx)
                                    .flatten()
                                    .map(|user| user.display_name().to_owned())
                            }}
                        </span>
                    </li>
                    <li class="nav-item">
                        <button type="button" class="btn btn-outline-light" on:click=logout>
                            "Log out"
                        </button>
                    </li>
                </ul>
            </div>
        </nav>
    }
}
