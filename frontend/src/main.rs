//! Tree view demo entry point

use std::sync::OnceLock;
use zoon::*;

mod app;
mod config;

/// Keeps the application task alive for the lifetime of the page
static MAIN_TASK: OnceLock<TaskHandle> = OnceLock::new();

pub fn main() {
    let handle = Task::start_droppable(async {
        let app = app::TreeDemoApp::new();
        start_app("app", move || app.root());
    });
    let _ = MAIN_TASK.set(handle);
}
