use leptos::*;
use leptos_router::*;

use super::follow;
use crate::{
    components::{DashboardHeader, ErrorToast, NarrativeTiles},
    narratives::LoadState,
    navigation::{NavEvent, Page},
    AppContext,
};

#[component]
pub fn Dashboard(cx: Scope, app: AppContext) -> impl IntoView {
    // guard runs before any data loading is set up
    if let Err(destination) = app.coordinator.require_session() {
        return view! { cx, <Redirect path=destination.href()/> }.into_view(cx);
    }

    let (state, set_state) = create_signal(cx, LoadState::Idle);
    let loader = app.loader.clone();
    let load = create_action(cx, move |_: &()| {
        let loader = loader.clone();
        async move {
            set_state.set(LoadState::Loading);
            set_state.set(loader.load().await);
        }
    });
    load.dispatch(());

    let navigate = use_navigate(cx);
    let coordinator = app.coordinator.clone();
    create_effect(cx, move |_| {
        if state.with(LoadState::needs_login) {
            if let Some(destination) = coordinator.dispatch(NavEvent::SessionRejected) {
                follow(&navigate, &destination, Page::Dashboard);
            }
        }
    });

    let content = move || match state.get() {
        LoadState::Idle | LoadState::Loading => view! { cx,
            <div class="text-center py-5">
                <div class="spinner-border" role="status"></div>
                <p class="mt-2">"Loading narratives..."</p>
            </div>
        }
        .into_view(cx),
        LoadState::Loaded(narratives) => view! { cx,
            <NarrativeTiles narratives=narratives/>
        }
        .into_view(cx),
        LoadState::Failed(error) => {
            let load = load.clone();
            view! { cx,
                <div>
                    <ErrorToast error=error/>
                    <button type="button" class="btn btn-primary" on:click=move |_| load.dispatch(())>
                        "Try again"
                    </button>
                </div>
            }
            .into_view(cx)
        }
    };

    view! { cx,
        <DashboardHeader app=app.clone()/>
        <h1 class="h3 mb-4">"Your City Narratives"</h1>
        {content}
    }
    .into_view(cx)
}
