use log::info;

mod analytics;
mod app;
mod config;
mod dom;
mod error;
mod global;
mod observer;
mod storage;
mod timing;
mod validation;

mod components {
    pub mod alerts;
    pub mod count_up;
    pub mod forms;
    pub mod live_chat;
    pub mod loading;
    pub mod media;
    pub mod motion;
    pub mod navigation;
    pub mod reveal;
    pub mod scroll;
    pub mod service_worker;
    pub mod services;
    pub mod testimonials;
    pub mod theme;
    pub mod tracking;
}

fn main() {
    // Initialize console error panic hook for better error messages
    console_error_panic_hook::set_once();

    // Initialize logging
    console_log::init_with_level(config::log_level()).expect("error initializing log");

    info!("Starting storefront enhancements");
    if let Err(err) = app::start() {
        log::error!("Storefront could not start: {}", err);
    }
}
