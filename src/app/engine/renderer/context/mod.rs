use glutin::config::{Config, ConfigTemplateBuilder};
use glutin::context::{
    ContextApi, ContextAttributesBuilder, GlProfile, NotCurrentContext, PossiblyCurrentContext,
    Version,
};
use glutin::display::{Display, GetGlDisplay};
use glutin::prelude::*;
use glutin::surface::{Surface, WindowSurface};
use glutin_winit::{DisplayBuilder, GlWindow};
use raw_window_handle::{HasWindowHandle, RawWindowHandle};
use std::ffi::CString;
use std::num::NonZeroU32;
use std::sync::Arc;
use thiserror::Error;
use winit::dpi::LogicalSize;
use winit::event_loop::ActiveEventLoop;
use winit::window::{Window, WindowAttributes};

use crate::config::WindowConfig;

const GL_VERSION: Version = Version::new(3, 3);

#[derive(Debug, Error)]
pub enum ContextError {
    #[error("Failed to create window: {0}")]
    Window(String),
    #[error("Display builder returned no window.")]
    MissingWindow,
    #[error("Failed to create OpenGL context.")]
    CreateContext(#[source] glutin::error::Error),
    #[error("Failed to create window surface.")]
    CreateSurface(#[source] glutin::error::Error),
    #[error("Window handle unavailable.")]
    Handle(#[from] raw_window_handle::HandleError),
    #[error("Failed to make OpenGL context current.")]
    MakeCurrent(#[source] glutin::error::Error),
    #[error("Failed to swap buffers.")]
    SwapBuffers(#[source] glutin::error::Error),
}

/// A window's GL surface together with the context rendering into it.
pub struct Context {
    surface: Surface<WindowSurface>,
    context: PossiblyCurrentContext,
}

impl Context {
    /// Creates the window and a current OpenGL context for it, then loads
    /// the GL function pointers from that context.
    pub fn create(
        event_loop: &ActiveEventLoop,
        config: &WindowConfig,
    ) -> Result<(Arc<Window>, Self), ContextError> {
        let attributes = WindowAttributes::default()
            .with_title(config.title.clone())
            .with_inner_size(LogicalSize::new(config.width, config.height));

        let (window, gl_config) = DisplayBuilder::new()
            .with_window_attributes(Some(attributes))
            .build(event_loop, ConfigTemplateBuilder::new(), Self::pick_config)
            .map_err(|e| ContextError::Window(e.to_string()))?;
        let window = window.ok_or(ContextError::MissingWindow)?;

        let raw_handle = window.window_handle()?.as_raw();
        let gl_display = gl_config.display();
        let not_current = Self::create_context(&gl_display, &gl_config, raw_handle)?;

        let surface_attributes = window.build_surface_attributes(Default::default())?;
        let surface = unsafe { gl_display.create_window_surface(&gl_config, &surface_attributes) }
            .map_err(ContextError::CreateSurface)?;
        let context = not_current
            .make_current(&surface)
            .map_err(ContextError::MakeCurrent)?;

        Self::load_functions(&gl_display);

        Ok((Arc::new(window), Self { surface, context }))
    }

    fn pick_config(configs: Box<dyn Iterator<Item = Config> + '_>) -> Config {
        let config = configs
            .reduce(|best, config| {
                if config.num_samples() > best.num_samples() {
                    config
                } else {
                    best
                }
            })
            // glutin only calls the picker after finding at least one config.
            .expect("no GL configs offered by the display");
        tracing::debug!("Picked GL config with {} samples.", config.num_samples());
        config
    }

    fn create_context(
        display: &Display,
        config: &Config,
        raw_handle: RawWindowHandle,
    ) -> Result<NotCurrentContext, ContextError> {
        let core = ContextAttributesBuilder::new()
            .with_context_api(ContextApi::OpenGl(Some(GL_VERSION)))
            .with_profile(GlProfile::Core)
            .build(Some(raw_handle));

        match unsafe { display.create_context(config, &core) } {
            Ok(context) => Ok(context),
            Err(error) => {
                tracing::warn!(
                    "OpenGL {}.{} core context unavailable ({}), using platform default.",
                    GL_VERSION.major,
                    GL_VERSION.minor,
                    error
                );
                let fallback = ContextAttributesBuilder::new().build(Some(raw_handle));
                unsafe { display.create_context(config, &fallback) }
                    .map_err(ContextError::CreateContext)
            }
        }
    }

    fn load_functions(display: &Display) {
        gl::load_with(|symbol| match CString::new(symbol) {
            Ok(symbol) => display.get_proc_address(symbol.as_c_str()).cast(),
            Err(_) => std::ptr::null(),
        });

        if gl::CreateShader::is_loaded() && gl::DrawArrays::is_loaded() {
            tracing::info!("Loaded OpenGL function pointers.");
        } else {
            // Rendering carries on; calls into missing functions will panic.
            tracing::error!("OpenGL function pointers not loaded.");
        }
    }

    pub fn swap_buffers(&self) -> Result<(), ContextError> {
        self.surface
            .swap_buffers(&self.context)
            .map_err(ContextError::SwapBuffers)
    }

    /// Zero-sized surfaces (minimized windows) are left alone.
    pub fn resize(&self, width: u32, height: u32) {
        let (Some(w), Some(h)) = (NonZeroU32::new(width), NonZeroU32::new(height)) else {
            return;
        };
        self.surface.resize(&self.context, w, h);
        unsafe { gl::Viewport(0, 0, width as i32, height as i32) };
    }
}
