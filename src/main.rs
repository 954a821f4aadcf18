//! Home Logger Frontend Entry Point

mod api;
mod app;
mod components;
mod config;
mod context;
mod dialog;
mod logging;
mod markdown;
mod store;

use app::App;
use config::AppConfig;
use leptos::prelude::*;

fn main() {
    console_error_panic_hook::set_once();
    let config = AppConfig::load();
    logging::init(config.log_level);
    mount_to_body(move || view! { <App config=config.clone() /> });
}
