//! A small set of safe wrappers around the OpenGL API.
//!
//! Drawing a couple of triangles could be done in a single function, but it takes a pile of
//! cryptic, unsafe calls to get there. So every kind of GL object the program creates gets a type
//! here that owns the raw handle and deletes it when dropped, and the handful of state-setting
//! calls get safe functions, so the rest of the code never has to write `unsafe` itself.
//!
//! Obviously, some knowledge of OpenGL is needed to follow along. [Learn OpenGL][learnopengl]
//! covers everything used here, and [docs.gl][docs] has the reference pages.
//!
//! Every function in this module expects a current OpenGL context on the calling thread with the
//! function pointers loaded through [`gl::load_with`].
//!
//! [learnopengl]: https://learnopengl.com/
//! [docs]: http://docs.gl/

use std::ffi::{c_void, CString};
use std::mem::size_of_val;
use std::ptr::null;

use gl::types::*;

use crate::error::{ShaderError, ShaderStage};
use crate::scene::{PolygonMode, VertexAttribute};

use super::utils::*;

impl ShaderStage {
    fn gl_kind(self) -> GLenum {
        match self {
            ShaderStage::Vertex => gl::VERTEX_SHADER,
            ShaderStage::Fragment => gl::FRAGMENT_SHADER,
        }
    }
}

/// A compiled (or failed to compile) shader object.
pub struct GlShader {
    id: GLuint,
    stage: ShaderStage,
}

impl GlShader {
    pub fn id(&self) -> GLuint { self.id }

    pub fn stage(&self) -> ShaderStage { self.stage }

    /// Creates and compiles a shader. This only fails if `source` can't be handed to GL at all;
    /// a shader that doesn't compile is still returned, ask [`GlShader::status`] about it.
    pub fn compile(source: &str, stage: ShaderStage) -> Result<Self, ShaderError> {
        let source = CString::new(source)?;
        let id = shader_from_source(&source, stage.gl_kind());

        Ok(Self { id, stage })
    }

    pub fn from_vert_source(source: &str) -> Result<Self, ShaderError> {
        Self::compile(source, ShaderStage::Vertex)
    }

    pub fn from_frag_source(source: &str) -> Result<Self, ShaderError> {
        Self::compile(source, ShaderStage::Fragment)
    }

    /// `GL_COMPILE_STATUS`, with the info log attached when it is false.
    pub fn status(&self) -> Result<(), ShaderError> {
        let mut success = 1;
        unsafe {
            gl::GetShaderiv(self.id, gl::COMPILE_STATUS, &mut success);
        }

        if success != 0 {
            return Ok(());
        }

        let mut len = 0;
        unsafe {
            gl::GetShaderiv(self.id, gl::INFO_LOG_LENGTH, &mut len);
        }

        let mut buf = info_log_buffer(len);
        let mut written = 0;
        unsafe {
            gl::GetShaderInfoLog(
                self.id,
                buf.len() as GLsizei,
                &mut written,
                buf.as_mut_ptr() as *mut GLchar,
            );
        }

        Err(ShaderError::Compile {
            stage: self.stage,
            log: info_log_to_string(buf, written),
        })
    }
}

impl Drop for GlShader {
    fn drop(&mut self) {
        unsafe {
            gl::DeleteShader(self.id);
        }
    }
}

/// A linked shader program.
pub struct GlProgram {
    id: GLuint,
}

impl GlProgram {
    pub fn id(&self) -> GLuint { self.id }

    /// Attaches every shader, links, then detaches them again so they can be deleted as soon as
    /// the caller drops them. Borrowing the shaders keeps them alive through the link.
    pub fn link(shaders: &[GlShader]) -> Self {
        let id = unsafe { gl::CreateProgram() };

        unsafe {
            for shader in shaders {
                gl::AttachShader(id, shader.id());
            }

            gl::LinkProgram(id);

            for shader in shaders {
                gl::DetachShader(id, shader.id());
            }
        }

        Self { id }
    }

    /// `GL_LINK_STATUS`, with the info log attached when it is false.
    pub fn status(&self) -> Result<(), ShaderError> {
        let mut success = 1;
        unsafe {
            gl::GetProgramiv(self.id, gl::LINK_STATUS, &mut success);
        }

        if success != 0 {
            return Ok(());
        }

        let mut len = 0;
        unsafe {
            gl::GetProgramiv(self.id, gl::INFO_LOG_LENGTH, &mut len);
        }

        let mut buf = info_log_buffer(len);
        let mut written = 0;
        unsafe {
            gl::GetProgramInfoLog(
                self.id,
                buf.len() as GLsizei,
                &mut written,
                buf.as_mut_ptr() as *mut GLchar,
            );
        }

        Err(ShaderError::Link { log: info_log_to_string(buf, written) })
    }

    pub fn set_used(&self) {
        unsafe {
            gl::UseProgram(self.id);
        }
    }
}

impl Drop for GlProgram {
    fn drop(&mut self) {
        unsafe {
            gl::DeleteProgram(self.id);
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GlBufferType {
    Array = gl::ARRAY_BUFFER as isize,
    Element = gl::ELEMENT_ARRAY_BUFFER as isize,
}

/// A buffer object holding either vertex data ([`GlBufferType::Array`]) or vertex indices
/// ([`GlBufferType::Element`]). Index buffers let shared corners be sent to the card once: two
/// triangles with a common edge need four vertices instead of six.
pub struct GlBuffer {
    id: GLuint,
    kind: GlBufferType,
}

impl GlBuffer {
    pub fn id(&self) -> GLuint { self.id }

    pub fn kind(&self) -> GlBufferType { self.kind }

    /// Generates a buffer, binds it, and copies the first `bytes` bytes of `data` into it with
    /// `GL_STATIC_DRAW`. Never reads past the end of `data`.
    pub fn init<T>(kind: GlBufferType, data: &[T], bytes: usize) -> Self {
        debug_assert!(bytes <= size_of_val(data));

        let buffer = Self::generate(kind);
        buffer.bind();
        unsafe {
            gl::BufferData(
                kind as GLenum,
                bytes.min(size_of_val(data)) as GLsizeiptr,
                data.as_ptr() as *const c_void,
                gl::STATIC_DRAW,
            );
        }

        buffer
    }

    pub fn generate(kind: GlBufferType) -> Self {
        let mut id = 0;
        unsafe { gl::GenBuffers(1, &mut id) };
        Self { id, kind }
    }

    pub fn bind(&self) {
        unsafe { gl::BindBuffer(self.kind as GLenum, self.id); }
    }
}

impl Drop for GlBuffer {
    fn drop(&mut self) {
        unsafe { gl::DeleteBuffers(1, &self.id); }
    }
}

pub fn unbind_buffers(buffer_type: GlBufferType) {
    unsafe { gl::BindBuffer(buffer_type as GLenum, 0); }
}

/// A vertex array object. It remembers the attribute layout and the element buffer bound while
/// it was bound, but owns neither of the buffers it points at.
pub struct GlVertexArray {
    id: GLuint,
}

impl GlVertexArray {
    pub fn id(&self) -> GLuint { self.id }

    pub fn generate() -> Self {
        let mut id = 0;
        unsafe { gl::GenVertexArrays(1, &mut id) };
        Self { id }
    }

    pub fn bind(&self) {
        unsafe { gl::BindVertexArray(self.id); }
    }

    pub fn unbind() {
        unsafe { gl::BindVertexArray(0); }
    }
}

impl Drop for GlVertexArray {
    fn drop(&mut self) {
        unsafe { gl::DeleteVertexArrays(1, &self.id); }
    }
}

/// Tells GL how to read one float attribute out of the bound array buffer. `stride` is in bytes.
pub fn set_vertex_attrib(attribute: &VertexAttribute, stride: usize) {
    unsafe {
        gl::VertexAttribPointer(
            attribute.location,
            attribute.components as GLint,
            gl::FLOAT,
            gl::FALSE,
            stride as GLsizei,
            attribute.offset_bytes() as *const c_void,
        );
        gl::EnableVertexAttribArray(attribute.location);
    }
}

pub fn set_polygon_mode(mode: PolygonMode) {
    let mode = match mode {
        PolygonMode::Fill => gl::FILL,
        PolygonMode::Line => gl::LINE,
    };
    unsafe { gl::PolygonMode(gl::FRONT_AND_BACK, mode); }
}

pub fn set_viewport(width: u32, height: u32) {
    unsafe { gl::Viewport(0, 0, width as GLsizei, height as GLsizei); }
}

pub fn clear_color([r, g, b, a]: [f32; 4]) {
    unsafe { gl::ClearColor(r, g, b, a); }
}

pub fn clear() {
    unsafe { gl::Clear(gl::COLOR_BUFFER_BIT); }
}

pub fn draw_arrays(first: usize, count: usize) {
    unsafe { gl::DrawArrays(gl::TRIANGLES, first as GLint, count as GLsizei); }
}

/// Draws `count` `u32` indices from the element buffer of the bound vertex array.
pub fn draw_elements(count: usize) {
    unsafe { gl::DrawElements(gl::TRIANGLES, count as GLsizei, gl::UNSIGNED_INT, null()); }
}

/// Reports the first of the entry points this program relies on that the loader couldn't find.
pub fn missing_entry_point() -> Option<&'static str> {
    let loaded = [
        ("glClear", gl::Clear::is_loaded()),
        ("glCreateShader", gl::CreateShader::is_loaded()),
        ("glCreateProgram", gl::CreateProgram::is_loaded()),
        ("glGenBuffers", gl::GenBuffers::is_loaded()),
        ("glGenVertexArrays", gl::GenVertexArrays::is_loaded()),
        ("glDrawElements", gl::DrawElements::is_loaded()),
    ];

    loaded.iter().find(|(_, ok)| !ok).map(|(name, _)| *name)
}
