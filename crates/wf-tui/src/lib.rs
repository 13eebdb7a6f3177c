use std::io;
use std::sync::Arc;

// Flux architecture modules
mod actions;
mod app;
mod dispatcher;
mod effects;
mod keyboard;
mod logger;
mod stores;
mod ui;

mod tui;

// Re-export the main entry point
pub use app::App;
pub use wf_core::Route;

use wf_api::TokenStore;

/// Main entry point for the console, opened on `route`
pub async fn tui_main(route: Route, tokens: Arc<dyn TokenStore>) -> io::Result<()> {
    // Install color-eyre for better error messages BEFORE terminal init
    if let Err(e) = color_eyre::install() {
        eprintln!("Warning: Failed to install color-eyre: {}", e);
    }

    // Create the application first so a bad fixture never leaves a raw terminal
    let (mut app, action_receiver) = match App::new(route, tokens) {
        Ok(app) => app,
        Err(e) => {
            eprintln!("Failed to initialize application: {}", e);
            return Err(io::Error::other(e.to_string()));
        }
    };

    let mut session = tui::Session::enter()?;
    let result = app.run(&mut session, action_receiver).await;
    drop(session);

    if let Err(e) = result {
        eprintln!("Application error: {:?}", e);
        return Err(e);
    }

    Ok(())
}
