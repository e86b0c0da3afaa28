use std::ffi::CString;
use std::fmt;
use thiserror::Error;

mod opengl;

pub use opengl::GlBackend;

/// One programmable pipeline stage a shader object can be compiled for.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum StageKind {
    Vertex,
    Fragment,
}

impl fmt::Display for StageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StageKind::Vertex => f.write_str("Vertex"),
            StageKind::Fragment => f.write_str("Fragment"),
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ShaderQuery {
    CompileStatus,
    InfoLogLength,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ProgramQuery {
    LinkStatus,
    ValidateStatus,
    InfoLogLength,
}

/// The slice of the GL shader API the program builder talks to.
///
/// Handles are passed explicitly on every call so nothing depends on
/// whichever object happens to be bound in the current context.
pub trait ShaderBackend {
    fn create_shader(&self, kind: StageKind) -> u32;
    /// Submits `source` as the shader's single source unit. The driver reads
    /// up to the terminating NUL; no length is passed.
    fn shader_source(&self, shader: u32, source: &CString);
    fn compile_shader(&self, shader: u32);
    fn get_shader(&self, shader: u32, query: ShaderQuery) -> i32;
    /// Reads at most `length` bytes (terminator included) of the info log.
    fn shader_info_log(&self, shader: u32, length: i32) -> String;
    fn delete_shader(&self, shader: u32);

    fn create_program(&self) -> u32;
    fn attach_shader(&self, program: u32, shader: u32);
    fn detach_shader(&self, program: u32, shader: u32);
    fn link_program(&self, program: u32);
    fn validate_program(&self, program: u32);
    fn get_program(&self, program: u32, query: ProgramQuery) -> i32;
    fn program_info_log(&self, program: u32, length: i32) -> String;
    fn use_program(&self, program: u32);
    fn delete_program(&self, program: u32);
}

/// Driver-reported failure of one step of a program build.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ShaderError {
    #[error("Failed to compile {stage} shader!\n{log}")]
    Compile { stage: StageKind, log: String },
    #[error("Failed to link shader program!\n{log}")]
    Link { log: String },
    #[error("Failed to validate shader program!\n{log}")]
    Validate { log: String },
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct BuildOptions {
    /// Emit each diagnostic through `tracing` as soon as it is detected.
    pub log_errors: bool,
}

impl Default for BuildOptions {
    fn default() -> Self {
        Self { log_errors: true }
    }
}

/// A compiled shader object, deleted when the guard goes out of scope.
pub struct ShaderStage<'a, B: ShaderBackend> {
    backend: &'a B,
    kind: StageKind,
    id: u32,
}

impl<B: ShaderBackend> ShaderStage<'_, B> {
    pub fn id(&self) -> u32 {
        self.id
    }
}

impl<B: ShaderBackend> Drop for ShaderStage<'_, B> {
    fn drop(&mut self) {
        tracing::trace!("Deleting {} shader (id {}).", self.kind, self.id);
        self.backend.delete_shader(self.id);
    }
}

/// Linked program object. Owned by whoever received it from [`build_program`].
#[derive(Debug, PartialEq, Eq)]
pub struct Program {
    id: u32,
}

impl Program {
    pub fn id(&self) -> u32 {
        self.id
    }

    pub fn activate(&self, backend: &impl ShaderBackend) {
        backend.use_program(self.id);
    }

    pub fn delete(self, backend: &impl ShaderBackend) {
        backend.delete_program(self.id);
    }
}

/// Outcome of [`build_program`]: always a program handle, plus whatever
/// went wrong on the way to it.
#[derive(Debug)]
pub struct ProgramBuild {
    program: Program,
    diagnostics: Vec<ShaderError>,
}

impl ProgramBuild {
    pub fn program(&self) -> &Program {
        &self.program
    }

    pub fn diagnostics(&self) -> &[ShaderError] {
        &self.diagnostics
    }

    /// Both stages compiled and the program linked. Validation is advisory
    /// since it depends on the state bound at the time of the check.
    pub fn is_usable(&self) -> bool {
        !self
            .diagnostics
            .iter()
            .any(|d| matches!(d, ShaderError::Compile { .. } | ShaderError::Link { .. }))
    }

    pub fn into_parts(self) -> (Program, Vec<ShaderError>) {
        (self.program, self.diagnostics)
    }
}

/// Compiles one stage. The shader object is handed back whether or not the
/// driver accepted the source.
pub fn compile_stage<'a, B: ShaderBackend>(
    backend: &'a B,
    kind: StageKind,
    source: &str,
    options: BuildOptions,
) -> (ShaderStage<'a, B>, Option<ShaderError>) {
    let id = backend.create_shader(kind);
    let stage = ShaderStage { backend, kind, id };

    backend.shader_source(id, &nul_terminated(kind, source));
    backend.compile_shader(id);

    if backend.get_shader(id, ShaderQuery::CompileStatus) != 0 {
        tracing::debug!("Compiled {} shader (id {}).", kind, id);
        return (stage, None);
    }

    let length = backend.get_shader(id, ShaderQuery::InfoLogLength);
    let log = backend.shader_info_log(id, length);
    let error = ShaderError::Compile { stage: kind, log };
    if options.log_errors {
        tracing::error!("{}", error);
    }
    (stage, Some(error))
}

/// Builds a program from a vertex and a fragment source.
///
/// Failures never stop the sequence: a stage that did not compile is still
/// attached and the program is still linked and validated. Everything the
/// driver reported ends up in [`ProgramBuild::diagnostics`]. The stage
/// objects are released before returning.
pub fn build_program<B: ShaderBackend>(
    backend: &B,
    vertex_source: &str,
    fragment_source: &str,
    options: BuildOptions,
) -> ProgramBuild {
    let id = backend.create_program();
    let mut diagnostics = Vec::new();

    let (vertex, error) = compile_stage(backend, StageKind::Vertex, vertex_source, options);
    diagnostics.extend(error);
    let (fragment, error) = compile_stage(backend, StageKind::Fragment, fragment_source, options);
    diagnostics.extend(error);

    backend.attach_shader(id, vertex.id());
    backend.attach_shader(id, fragment.id());

    backend.link_program(id);
    backend.validate_program(id);

    if backend.get_program(id, ProgramQuery::LinkStatus) == 0 {
        let error = ShaderError::Link {
            log: program_log(backend, id),
        };
        if options.log_errors {
            tracing::error!("{}", error);
        }
        diagnostics.push(error);
    }

    if backend.get_program(id, ProgramQuery::ValidateStatus) == 0 {
        let error = ShaderError::Validate {
            log: program_log(backend, id),
        };
        if options.log_errors {
            tracing::warn!("{}", error);
        }
        diagnostics.push(error);
    }

    backend.detach_shader(id, vertex.id());
    backend.detach_shader(id, fragment.id());

    ProgramBuild {
        program: Program { id },
        diagnostics,
    }
}

fn program_log(backend: &impl ShaderBackend, program: u32) -> String {
    let length = backend.get_program(program, ProgramQuery::InfoLogLength);
    backend.program_info_log(program, length)
}

// The driver stops at the first NUL, so anything after one never reaches it.
fn nul_terminated(kind: StageKind, source: &str) -> CString {
    let visible = match source.find('\0') {
        Some(position) => {
            tracing::warn!(
                "{} shader source contains a NUL at byte {}; the rest is ignored.",
                kind,
                position
            );
            &source[..position]
        }
        None => source,
    };
    CString::new(visible).unwrap_or_default()
}
