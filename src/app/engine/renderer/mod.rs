use anyhow::{Context as _, Result};
use context::Context;
use shader::{BuildOptions, GlBackend, Program};
use std::sync::Arc;
use vertex::{TRIANGLE, TriangleBuffer};
use winit::event_loop::ActiveEventLoop;
use winit::window::Window;

use crate::config::{ShaderConfig, WindowConfig};

mod context;
mod shader;
mod vertex;

const VERTEX_SHADER: &str = include_str!("../../../../shaders/triangle.vert");
const FRAGMENT_SHADER: &str = include_str!("../../../../shaders/triangle.frag");

pub struct Renderer {
    // Declared before `context` so GL objects are released while it is still alive.
    triangle: TriangleBuffer,
    program: Option<Program>,
    backend: GlBackend,
    clear_color: [f32; 4],
    context: Context,
}

impl Renderer {
    pub fn new(
        event_loop: &ActiveEventLoop,
        window_config: &WindowConfig,
        shader_config: &ShaderConfig,
    ) -> Result<(Arc<Window>, Self)> {
        let (window, context) =
            Context::create(event_loop, window_config).context("Failed to create GL context")?;
        let size = window.inner_size();
        context.resize(size.width, size.height);

        // SAFETY: `Context::create` left its context current and loaded the function pointers.
        let triangle = unsafe { TriangleBuffer::upload(&TRIANGLE) };

        let backend = GlBackend;
        let build = shader::build_program(
            &backend,
            VERTEX_SHADER,
            FRAGMENT_SHADER,
            BuildOptions {
                log_errors: shader_config.log_compile_errors,
            },
        );
        if !build.is_usable() {
            tracing::warn!(
                "Shader program {} is not usable ({} diagnostics); drawing anyway.",
                build.program().id(),
                build.diagnostics().len()
            );
        }
        let (program, _) = build.into_parts();
        program.activate(&backend);
        tracing::info!("Activated shader program {}.", program.id());

        Ok((
            window,
            Self {
                triangle,
                program: Some(program),
                backend,
                clear_color: window_config.clear_color,
                context,
            },
        ))
    }

    pub fn draw_frame(&mut self) -> Result<()> {
        let [r, g, b, a] = self.clear_color;
        unsafe {
            gl::ClearColor(r, g, b, a);
            gl::Clear(gl::COLOR_BUFFER_BIT);
            self.triangle.draw();
        }
        self.context.swap_buffers()?;
        Ok(())
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        self.context.resize(width, height);
    }
}

impl Drop for Renderer {
    fn drop(&mut self) {
        if let Some(program) = self.program.take() {
            tracing::debug!("Deleting shader program {}.", program.id());
            program.delete(&self.backend);
        }
    }
}
