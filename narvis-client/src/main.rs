use leptos::*;
use narvis_client::{config::ClientConfig, App, AppContext};

fn main() {
    _ = console_log::init_with_level(log::Level::Debug);
    console_error_panic_hook::set_once();

    let config = ClientConfig::from_env();
    log::info!("Starting Narvis client against {}", config.api_url);
    let app = AppContext::from_config(&config);

    mount_to_body(move |cx| view! { cx, <App app=app/> });
}
