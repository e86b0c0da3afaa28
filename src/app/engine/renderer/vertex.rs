use bytemuck::{Pod, Zeroable};
use gl::types::{GLsizei, GLsizeiptr, GLuint};
use std::mem::{offset_of, size_of};

pub const POSITION_ATTRIBUTE: GLuint = 0;

#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    /// Normalized device coordinates.
    pub position: [f32; 2],
}

pub const TRIANGLE: [Vertex; 3] = [
    Vertex {
        position: [-0.5, -0.5],
    },
    Vertex {
        position: [0.0, 0.5],
    },
    Vertex {
        position: [0.5, -0.5],
    },
];

/// Static vertex data living in GPU memory, plus the vertex array that
/// describes its layout.
pub struct TriangleBuffer {
    vertex_array: GLuint,
    buffer: GLuint,
    count: GLsizei,
}

impl TriangleBuffer {
    /// Uploads `vertices` once and binds the layout to attribute 0.
    ///
    /// # Safety
    /// The GL context must be current and its function pointers loaded.
    pub unsafe fn upload(vertices: &[Vertex]) -> Self {
        let bytes: &[u8] = bytemuck::cast_slice(vertices);
        let mut vertex_array = 0;
        let mut buffer = 0;

        unsafe {
            gl::GenVertexArrays(1, &mut vertex_array);
            gl::BindVertexArray(vertex_array);

            gl::GenBuffers(1, &mut buffer);
            gl::BindBuffer(gl::ARRAY_BUFFER, buffer);
            gl::BufferData(
                gl::ARRAY_BUFFER,
                bytes.len() as GLsizeiptr,
                bytes.as_ptr().cast(),
                gl::STATIC_DRAW,
            );

            gl::VertexAttribPointer(
                POSITION_ATTRIBUTE,
                2,
                gl::FLOAT,
                gl::FALSE,
                size_of::<Vertex>() as GLsizei,
                offset_of!(Vertex, position) as *const _,
            );
            gl::EnableVertexAttribArray(POSITION_ATTRIBUTE);
        }

        tracing::debug!(
            "Uploaded {} vertices ({} bytes) to buffer {}.",
            vertices.len(),
            bytes.len(),
            buffer
        );

        Self {
            vertex_array,
            buffer,
            count: vertices.len() as GLsizei,
        }
    }

    /// # Safety
    /// Same context requirements as [`TriangleBuffer::upload`].
    pub unsafe fn draw(&self) {
        unsafe {
            gl::BindVertexArray(self.vertex_array);
            gl::DrawArrays(gl::TRIANGLES, 0, self.count);
        }
    }
}

impl Drop for TriangleBuffer {
    fn drop(&mut self) {
        unsafe {
            gl::DeleteBuffers(1, &self.buffer);
            gl::DeleteVertexArrays(1, &self.vertex_array);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn triangle_is_six_tightly_packed_floats() {
        let floats: &[f32] = bytemuck::cast_slice(&TRIANGLE);
        assert_eq!(floats, &[-0.5, -0.5, 0.0, 0.5, 0.5, -0.5]);
        assert_eq!(size_of::<Vertex>(), 2 * size_of::<f32>());
        assert_eq!(bytemuck::cast_slice::<_, u8>(&TRIANGLE).len(), 6 * size_of::<f32>());
    }

    #[test]
    fn position_starts_each_vertex() {
        assert_eq!(offset_of!(Vertex, position), 0);
    }
}
