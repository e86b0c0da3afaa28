use anyhow::Result;
use renderer::Renderer;
use std::sync::Arc;
use winit::{
    event::WindowEvent,
    event_loop::ActiveEventLoop,
    window::{Window, WindowId},
};

use crate::config::AppConfig;

mod renderer;

pub struct Engine {
    renderer: Renderer,
    window: Arc<Window>,
}

impl Engine {
    pub fn new(event_loop: &ActiveEventLoop, config: &AppConfig) -> Result<Self> {
        let (window, renderer) = Renderer::new(event_loop, &config.window, &config.shader)?;
        tracing::info!(
            "Opened window \"{}\" ({}x{}).",
            config.window.title,
            config.window.width,
            config.window.height
        );
        window.request_redraw();

        Ok(Self { renderer, window })
    }

    pub fn window_id(&self) -> WindowId {
        self.window.id()
    }

    pub fn window_event(&mut self, event_loop: &ActiveEventLoop, event: WindowEvent) -> Result<()> {
        match event {
            WindowEvent::CloseRequested => {
                tracing::info!("Window close requested.");
                event_loop.exit();
            }
            WindowEvent::Resized(size) => self.renderer.resize(size.width, size.height),
            WindowEvent::RedrawRequested => {
                self.renderer.draw_frame()?;
                self.window.request_redraw();
            }
            _ => {}
        }
        Ok(())
    }
}
