use leptos::*;
use narvis_common::Narrative;

use crate::narratives::{tiles, Tile};

#[component]
fn TileCard(cx: Scope, tile: Tile) -> impl IntoView {
    match tile {
        Tile::Narrative(narrative) => view! { cx,
            <div class="card h-100 narrative-tile">
                <div class="card-header">
                    <h5 class="card-title mb-0">{narrative.title}</h5>
                </div>
                <div class="card-body">
                    <p class="card-text">{narrative.description}</p>
                </div>
            </div>
        },
        Tile::CreateNew => view! { cx,
            <div class="card h-100 narrative-tile create-tile d-flex align-items-center justify-content-center">
                <div class="card-body d-flex flex-column align-items-center justify-content-center">
                    <button type="button" class="btn btn-link" title="Narrative creation is not available yet">
                        <span class="fs-1">"+"</span>
                        <span class="d-block">"Create New Narrative"</span>
                    </button>
                </div>
            </div>
        },
    }
}

/// Grid of the user's narratives followed by the create tile
#[component]
pub fn NarrativeTiles(cx: Scope, narratives: Vec<Narrative>) -> impl IntoView {
    let cells = tiles(&narratives);
    view! { cx,
        <div class="row g-4">
            <For
                each=move || cells.clone()
                key=Tile::key
                view=move |cx, tile: Tile| view! { cx,
                    <div class="col-12 col-md-4">
                        <TileCard tile=tile/>
                    </div>
                }
            />
        </div>
    }
}
