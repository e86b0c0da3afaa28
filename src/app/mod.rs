mod engine;
use crate::app::engine::Engine;
use crate::config::AppConfig;
use anyhow::{Error, Result};
use winit::{
    application::ApplicationHandler, event::WindowEvent, event_loop::ActiveEventLoop,
    window::WindowId,
};

pub struct App {
    config: AppConfig,
    engine: Option<Engine>,
    fatal: Option<Error>,
}

impl App {
    pub fn new(config: AppConfig) -> Self {
        Self {
            config,
            engine: None,
            fatal: None,
        }
    }

    /// Consumes the app once the event loop has returned, surfacing the error
    /// that stopped it, if any.
    pub fn finish(self) -> Result<()> {
        match self.fatal {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }

    fn abort(&mut self, event_loop: &ActiveEventLoop, error: Error) {
        // Tear down GL objects while the failure is reported, not after.
        self.engine = None;
        self.fatal.get_or_insert(error);
        event_loop.exit();
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.engine.is_some() || self.fatal.is_some() {
            return;
        }
        match Engine::new(event_loop, &self.config) {
            Ok(engine) => self.engine = Some(engine),
            Err(error) => self.abort(event_loop, error),
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        window_id: WindowId,
        event: WindowEvent,
    ) {
        let Some(engine) = self.engine.as_mut() else {
            return;
        };
        if engine.window_id() != window_id {
            return;
        }
        if let Err(error) = engine.window_event(event_loop, event) {
            self.abort(event_loop, error);
        }
    }

    fn suspended(&mut self, _event_loop: &ActiveEventLoop) {
        self.engine = None;
    }

    fn exiting(&mut self, _event_loop: &ActiveEventLoop) {
        self.engine = None;
    }
}
