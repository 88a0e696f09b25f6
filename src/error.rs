use std::ffi::NulError;
use std::fmt;

/// Which pipeline stage a shader belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShaderStage {
    Vertex,
    Fragment,
}

impl fmt::Display for ShaderStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShaderStage::Vertex => write!(f, "VERTEX"),
            ShaderStage::Fragment => write!(f, "FRAGMENT"),
        }
    }
}

#[derive(thiserror::Error, Debug)]
pub enum ShaderError {
    #[error("ERROR::SHADER::{stage}::COMPILATION_FAILED\n{log}")]
    Compile { stage: ShaderStage, log: String },

    #[error("ERROR::SHADER::PROGRAM::LINKING_FAILED\n{log}")]
    Link { log: String },

    #[error("shader source contains an interior NUL byte: {0}")]
    Nul(#[from] NulError),
}

/// Problems with a scene description, caught before anything is sent to the GPU.
#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum SceneError {
    #[error("mesh {mesh}: {len} floats is not a multiple of the {components}-component layout")]
    Stride { mesh: usize, len: usize, components: usize },

    #[error("mesh {mesh}: index {index} out of range for {vertex_count} vertices")]
    IndexOutOfRange { mesh: usize, index: u32, vertex_count: usize },

    #[error("draw {draw}: no program {program}")]
    MissingProgram { draw: usize, program: usize },

    #[error("draw {draw}: no mesh {mesh}")]
    MissingMesh { draw: usize, mesh: usize },

    #[error("draw {draw}: needs {count} elements but mesh only has {available}")]
    DrawOutOfRange { draw: usize, count: usize, available: usize },

    #[error("draw {draw}: indexed draw on mesh {mesh} without an index buffer")]
    MissingIndices { draw: usize, mesh: usize },
}

/// Anything that stops the harness from getting to its first frame.
#[derive(thiserror::Error, Debug)]
pub enum InitError {
    #[error("Failed to create window: {0}")]
    Window(#[from] glutin::CreationError),

    #[error("Failed to make the OpenGL context current: {0}")]
    Context(#[from] glutin::ContextError),

    #[error("Failed to initialize the OpenGL loader: {0} is not available")]
    Loader(&'static str),

    #[error("invalid scene: {0}")]
    Scene(#[from] SceneError),

    #[error(transparent)]
    Shader(#[from] ShaderError),
}
