//! FieldOps Admin Frontend Entry Point

mod api;
mod app;
mod components;
mod config;
mod context;
mod listing;
mod logging;
mod markdown;
mod models;
mod nav_layout;
mod notify;
mod pages;
mod resource;
mod store;
mod totals;

use app::App;
use leptos::prelude::*;

fn main() {
    console_error_panic_hook::set_once();
    logging::info("APP", "starting");
    mount_to_body(App);
}
