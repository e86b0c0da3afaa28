use crate::logging::LoggingConfig;

/// Top-level settings, assembled in `main`.
#[derive(Debug, Clone, Default)]
pub struct AppConfig {
    pub window: WindowConfig,
    pub shader: ShaderConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone)]
pub struct WindowConfig {
    pub title: String,
    /// Logical pixels.
    pub width: u32,
    pub height: u32,
    pub clear_color: [f32; 4],
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "Hello World".to_string(),
            width: 500,
            height: 500,
            clear_color: [0.0, 0.0, 0.0, 1.0],
        }
    }
}

#[derive(Debug, Clone)]
pub struct ShaderConfig {
    /// Report driver compile/link logs as they happen.
    pub log_compile_errors: bool,
}

impl Default for ShaderConfig {
    fn default() -> Self {
        Self {
            log_compile_errors: true,
        }
    }
}
