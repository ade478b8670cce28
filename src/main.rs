//! Workshop Admin Frontend Entry Point

mod api;
mod app;
mod components;
mod context;
mod resources;
mod store;

use app::App;
use leptos::prelude::*;
use log::LevelFilter;

use workshop_core::AppConfig;

const APP_NAME: &str = "WorkshopAdmin";

fn main() {
    console_error_panic_hook::set_once();

    let parsed = AppConfig::from_toml_str(include_str!("../config/workshop.toml"));
    let config = parsed.clone().unwrap_or_default();
    let level = config.log_level().unwrap_or(LevelFilter::Info);
    if let Err(err) = console_logger::init_logger(APP_NAME, level, config.log.capacity) {
        console_logger::warn(&format!("[MAIN] logger already set: {}", err));
    }
    if let Err(err) = parsed {
        console_logger::error(&format!("[MAIN] bad config/workshop.toml, using defaults: {}", err));
    }
    log::info!("[MAIN] {} starting against {}", APP_NAME, config.api.base_url);

    mount_to_body(move || view! { <App config=config.clone() /> });
}
