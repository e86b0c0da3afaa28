use crate::app::App;
use crate::config::AppConfig;
use anyhow::{Context, Result};
use winit::event_loop::{ControlFlow, EventLoop};

mod app;
mod config;
mod logging;

/// Reported when the window system or the window itself cannot be set up.
const EXIT_FATAL: i32 = -1;

fn main() {
    let config = AppConfig::default();
    logging::init_logging(&config.logging);

    let result = run(config);
    if let Err(error) = &result {
        tracing::error!("{:#}", error);
    }
    std::process::exit(exit_code(&result));
}

fn run(config: AppConfig) -> Result<()> {
    let event_loop = EventLoop::new().context("Failed to initialize the windowing library")?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = App::new(config);
    event_loop.run_app(&mut app)?;

    app.finish()
}

fn exit_code(result: &Result<()>) -> i32 {
    match result {
        Ok(()) => 0,
        Err(_) => EXIT_FATAL,
    }
}
