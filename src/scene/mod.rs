//! Scene descriptions: everything a frame needs, as plain data.
//!
//! Nothing in here touches OpenGL. A [`SceneDesc`] lists the shader programs, the meshes (vertex
//! data, optional index data and the attribute layout that explains the vertex bytes) and the
//! draws made each frame. [`crate::render::GpuScene`] turns it into GPU objects, and
//! [`SceneDesc::frame`] gives the ordered list of commands one frame runs through.

pub mod shaders;
pub mod variants;

use std::mem::size_of;

use crate::error::SceneError;

pub use self::variants::Variant;

/// One input of the vertex shader, read out of an interleaved float buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VertexAttribute {
    /// The `layout (location = N)` of the shader input.
    pub location: u32,
    /// Number of floats in the attribute.
    pub components: usize,
    /// Where the attribute starts inside a vertex, counted in floats.
    pub offset: usize,
}

impl VertexAttribute {
    pub fn offset_bytes(&self) -> usize {
        self.offset * size_of::<f32>()
    }
}

/// How the floats of a vertex buffer are split up into shader inputs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VertexLayout {
    pub attributes: Vec<VertexAttribute>,
}

impl VertexLayout {
    /// `vec3` position at location 0.
    pub fn position() -> Self {
        Self {
            attributes: vec![VertexAttribute { location: 0, components: 3, offset: 0 }],
        }
    }

    /// `vec3` position at location 0 followed by a `vec3` color at location 1.
    pub fn position_color() -> Self {
        Self {
            attributes: vec![
                VertexAttribute { location: 0, components: 3, offset: 0 },
                VertexAttribute { location: 1, components: 3, offset: 3 },
            ],
        }
    }

    /// Floats per vertex.
    pub fn components(&self) -> usize {
        self.attributes.iter().map(|a| a.components).sum()
    }

    /// Bytes per vertex.
    pub fn stride(&self) -> usize {
        self.components() * size_of::<f32>()
    }
}

/// A vertex buffer, its optional index buffer and the layout tying them to the shader.
#[derive(Debug, Clone, PartialEq)]
pub struct MeshDesc {
    pub vertices: &'static [f32],
    pub indices: Option<&'static [u32]>,
    pub layout: VertexLayout,
}

impl MeshDesc {
    pub fn vertex_count(&self) -> usize {
        self.vertices.len() / self.layout.components()
    }

    pub fn vertex_bytes(&self) -> usize {
        self.vertices.len() * size_of::<f32>()
    }

    pub fn index_count(&self) -> usize {
        self.indices.map_or(0, |i| i.len())
    }

    pub fn index_bytes(&self) -> usize {
        self.index_count() * size_of::<u32>()
    }

    /// Checks the vertex data fits the layout and every index points at a vertex. `mesh` is only
    /// used to label the error.
    pub fn validate(&self, mesh: usize) -> Result<(), SceneError> {
        let components = self.layout.components();
        if components == 0 || self.vertices.len() % components != 0 {
            return Err(SceneError::Stride { mesh, len: self.vertices.len(), components });
        }

        let vertex_count = self.vertex_count();
        if let Some(&index) = self
            .indices
            .unwrap_or(&[])
            .iter()
            .find(|&&i| i as usize >= vertex_count)
        {
            return Err(SceneError::IndexOutOfRange { mesh, index, vertex_count });
        }

        Ok(())
    }
}

/// A vertex/fragment shader pair to be linked into one program.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProgramDesc {
    pub vertex: &'static str,
    pub fragment: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrawMode {
    /// `glDrawArrays(GL_TRIANGLES, first, count)`
    Arrays { first: usize, count: usize },
    /// `glDrawElements(GL_TRIANGLES, count, GL_UNSIGNED_INT, 0)`
    Elements { count: usize },
}

/// One draw call: which program, which mesh, and how many vertices or indices.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DrawDesc {
    pub program: usize,
    pub mesh: usize,
    pub mode: DrawMode,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PolygonMode {
    Fill,
    /// Wireframe
    Line,
}

/// One step of a frame, in the order it is issued.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Command {
    ClearColor([f32; 4]),
    Clear,
    UseProgram(usize),
    BindVertexArray(usize),
    DrawArrays { first: usize, count: usize },
    DrawElements { count: usize },
}

#[derive(Debug, Clone, PartialEq)]
pub struct SceneDesc {
    pub name: &'static str,
    pub clear_color: [f32; 4],
    pub polygon_mode: PolygonMode,
    pub programs: Vec<ProgramDesc>,
    pub meshes: Vec<MeshDesc>,
    pub draws: Vec<DrawDesc>,
}

impl SceneDesc {
    /// Checks every mesh, and every draw against the programs and meshes it refers to.
    pub fn validate(&self) -> Result<(), SceneError> {
        for (i, mesh) in self.meshes.iter().enumerate() {
            mesh.validate(i)?;
        }

        for (draw, d) in self.draws.iter().enumerate() {
            if d.program >= self.programs.len() {
                return Err(SceneError::MissingProgram { draw, program: d.program });
            }

            let mesh = self
                .meshes
                .get(d.mesh)
                .ok_or(SceneError::MissingMesh { draw, mesh: d.mesh })?;

            match d.mode {
                DrawMode::Arrays { first, count } => {
                    let available = mesh.vertex_count();
                    if first + count > available {
                        return Err(SceneError::DrawOutOfRange { draw, count: first + count, available });
                    }
                }
                DrawMode::Elements { count } => {
                    if mesh.indices.is_none() {
                        return Err(SceneError::MissingIndices { draw, mesh: d.mesh });
                    }
                    let available = mesh.index_count();
                    if count > available {
                        return Err(SceneError::DrawOutOfRange { draw, count, available });
                    }
                }
            }
        }

        Ok(())
    }

    /// The commands a single frame issues: clear, then bind and draw for every draw in order.
    pub fn frame(&self) -> Vec<Command> {
        let mut commands = Vec::with_capacity(2 + self.draws.len() * 3);
        commands.push(Command::ClearColor(self.clear_color));
        commands.push(Command::Clear);

        for draw in &self.draws {
            commands.push(Command::UseProgram(draw.program));
            commands.push(Command::BindVertexArray(draw.mesh));
            commands.push(match draw.mode {
                DrawMode::Arrays { first, count } => Command::DrawArrays { first, count },
                DrawMode::Elements { count } => Command::DrawElements { count },
            });
        }

        commands
    }
}
