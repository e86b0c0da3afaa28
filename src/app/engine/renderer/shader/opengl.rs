use super::{ProgramQuery, ShaderBackend, ShaderQuery, StageKind};
use gl::types::{GLchar, GLint, GLsizei};
use std::ffi::CString;
use std::ptr;

/// [`ShaderBackend`] over the function pointers loaded into the `gl` crate.
///
/// Only valid while the context those pointers were loaded from is current
/// on the calling thread.
#[derive(Copy, Clone, Debug, Default)]
pub struct GlBackend;

impl GlBackend {
    fn read_log(length: GLint, read: impl FnOnce(GLsizei, *mut GLsizei, *mut GLchar)) -> String {
        if length <= 0 {
            return String::new();
        }

        let mut buffer = vec![0u8; length as usize];
        let mut written: GLsizei = 0;
        read(length, &mut written, buffer.as_mut_ptr().cast());
        buffer.truncate(written.clamp(0, length) as usize);

        String::from_utf8_lossy(&buffer).into_owned()
    }
}

impl ShaderBackend for GlBackend {
    fn create_shader(&self, kind: StageKind) -> u32 {
        let kind = match kind {
            StageKind::Vertex => gl::VERTEX_SHADER,
            StageKind::Fragment => gl::FRAGMENT_SHADER,
        };
        unsafe { gl::CreateShader(kind) }
    }

    fn shader_source(&self, shader: u32, source: &CString) {
        unsafe { gl::ShaderSource(shader, 1, &source.as_ptr(), ptr::null()) }
    }

    fn compile_shader(&self, shader: u32) {
        unsafe { gl::CompileShader(shader) }
    }

    fn get_shader(&self, shader: u32, query: ShaderQuery) -> i32 {
        let pname = match query {
            ShaderQuery::CompileStatus => gl::COMPILE_STATUS,
            ShaderQuery::InfoLogLength => gl::INFO_LOG_LENGTH,
        };
        let mut value: GLint = 0;
        unsafe { gl::GetShaderiv(shader, pname, &mut value) };
        value
    }

    fn shader_info_log(&self, shader: u32, length: i32) -> String {
        Self::read_log(length, |length, written, buffer| unsafe {
            gl::GetShaderInfoLog(shader, length, written, buffer)
        })
    }

    fn delete_shader(&self, shader: u32) {
        unsafe { gl::DeleteShader(shader) }
    }

    fn create_program(&self) -> u32 {
        unsafe { gl::CreateProgram() }
    }

    fn attach_shader(&self, program: u32, shader: u32) {
        unsafe { gl::AttachShader(program, shader) }
    }

    fn detach_shader(&self, program: u32, shader: u32) {
        unsafe { gl::DetachShader(program, shader) }
    }

    fn link_program(&self, program: u32) {
        unsafe { gl::LinkProgram(program) }
    }

    fn validate_program(&self, program: u32) {
        unsafe { gl::ValidateProgram(program) }
    }

    fn get_program(&self, program: u32, query: ProgramQuery) -> i32 {
        let pname = match query {
            ProgramQuery::LinkStatus => gl::LINK_STATUS,
            ProgramQuery::ValidateStatus => gl::VALIDATE_STATUS,
            ProgramQuery::InfoLogLength => gl::INFO_LOG_LENGTH,
        };
        let mut value: GLint = 0;
        unsafe { gl::GetProgramiv(program, pname, &mut value) };
        value
    }

    fn program_info_log(&self, program: u32, length: i32) -> String {
        Self::read_log(length, |length, written, buffer| unsafe {
            gl::GetProgramInfoLog(program, length, written, buffer)
        })
    }

    fn use_program(&self, program: u32) {
        unsafe { gl::UseProgram(program) }
    }

    fn delete_program(&self, program: u32) {
        unsafe { gl::DeleteProgram(program) }
    }
}
