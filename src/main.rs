//! ProjeX Frontend Entry Point

mod app;
mod board;
mod commands;
mod components;
mod context;
mod hooks;
mod models;
mod pages;
mod projects;
mod routes;
mod store;

use app::App;
use leptos::prelude::*;

fn main() {
    console_error_panic_hook::set_once();
    mount_to_body(App);
}
