//! Turns a [`SceneDesc`] into live GL objects and plays frames back against them.

use tracing::{debug, error};

use crate::error::{InitError, ShaderError};
use crate::graphics::opengl::*;
use crate::scene::{Command, MeshDesc, ProgramDesc, SceneDesc};

/// Compiles both stages and links them. Compile and link failures are logged and the program is
/// returned regardless; it just won't draw anything.
pub fn build_program(desc: &ProgramDesc) -> Result<GlProgram, ShaderError> {
    let shaders = [
        GlShader::from_vert_source(desc.vertex)?,
        GlShader::from_frag_source(desc.fragment)?,
    ];

    for shader in &shaders {
        if let Err(e) = shader.status() {
            error!("{}", e);
        } else {
            debug!(stage = %shader.stage(), id = shader.id(), "compiled shader");
        }
    }

    let program = GlProgram::link(&shaders);

    if let Err(e) = program.status() {
        error!("{}", e);
    } else {
        debug!(id = program.id(), "linked program");
    }

    // `shaders` is dropped here, which deletes them now that the link is done
    Ok(program)
}

/// Everything a mesh put on the GPU.
struct GpuMesh {
    vertex_array: GlVertexArray,
    buffers: Vec<GlBuffer>,
}

fn upload_mesh(mesh: &MeshDesc) -> GpuMesh {
    let vertex_array = GlVertexArray::generate();
    vertex_array.bind();

    let vertices = GlBuffer::init(GlBufferType::Array, mesh.vertices, mesh.vertex_bytes());
    let mut buffers = vec![vertices];
    if let Some(indices) = mesh.indices {
        // bound while the VAO is, so the VAO records it
        buffers.push(GlBuffer::init(GlBufferType::Element, indices, mesh.index_bytes()));
    }

    let stride = mesh.layout.stride();
    for attribute in &mesh.layout.attributes {
        set_vertex_attrib(attribute, stride);
    }

    GlVertexArray::unbind();
    unbind_buffers(GlBufferType::Array);

    for buffer in &buffers {
        debug!(
            vertex_array = vertex_array.id(),
            id = buffer.id(),
            kind = ?buffer.kind(),
            "uploaded buffer"
        );
    }

    GpuMesh { vertex_array, buffers }
}

/// Empties the vertex arrays, then the buffers they point at, then the programs.
fn release_in_order<A, B, P>(
    vertex_arrays: &mut Vec<A>,
    buffers: &mut Vec<B>,
    programs: &mut Vec<P>,
) {
    vertex_arrays.clear();
    buffers.clear();
    programs.clear();
}

/// The GL side of a scene. Dropping it releases everything through [`release_in_order`].
pub struct GpuScene {
    vertex_arrays: Vec<GlVertexArray>,
    buffers: Vec<GlBuffer>,
    programs: Vec<GlProgram>,
    frame: Vec<Command>,
}

impl GpuScene {
    /// Validates the description, then builds every program and uploads every mesh. Anything
    /// created before a failure is released on the way out.
    pub fn build(desc: &SceneDesc) -> Result<Self, InitError> {
        desc.validate()?;

        let mut programs = Vec::with_capacity(desc.programs.len());
        for program in &desc.programs {
            programs.push(build_program(program)?);
        }

        let mut vertex_arrays = Vec::with_capacity(desc.meshes.len());
        let mut buffers = Vec::new();
        for mesh in &desc.meshes {
            let gpu = upload_mesh(mesh);
            vertex_arrays.push(gpu.vertex_array);
            buffers.extend(gpu.buffers);
        }

        set_polygon_mode(desc.polygon_mode);

        debug!(
            scene = desc.name,
            programs = programs.len(),
            vertex_arrays = vertex_arrays.len(),
            buffers = buffers.len(),
            "scene ready"
        );

        Ok(Self {
            vertex_arrays,
            buffers,
            programs,
            frame: desc.frame(),
        })
    }

    pub fn execute(&self, command: &Command) {
        match *command {
            Command::ClearColor(color) => clear_color(color),
            Command::Clear => clear(),
            Command::UseProgram(i) => self.programs[i].set_used(),
            Command::BindVertexArray(i) => self.vertex_arrays[i].bind(),
            Command::DrawArrays { first, count } => draw_arrays(first, count),
            Command::DrawElements { count } => draw_elements(count),
        }
    }

    /// Issues one frame's worth of commands. Presenting it is up to the caller.
    pub fn render(&self) {
        for command in &self.frame {
            self.execute(command);
        }
    }

    /// Deletes every GL object this scene owns.
    pub fn release(self) {
        debug!(
            vertex_arrays = self.vertex_arrays.len(),
            buffers = self.buffers.len(),
            programs = self.programs.len(),
            "releasing scene"
        );
        drop(self);
    }
}

impl Drop for GpuScene {
    fn drop(&mut self) {
        GlVertexArray::unbind();
        release_in_order(&mut self.vertex_arrays, &mut self.buffers, &mut self.programs);
    }
}

#[cfg(test)]
mod test {
    use super::*;

    use std::cell::RefCell;
    use std::rc::Rc;

    struct Tracked {
        name: &'static str,
        log: Rc<RefCell<Vec<&'static str>>>,
    }

    impl Drop for Tracked {
        fn drop(&mut self) {
            self.log.borrow_mut().push(self.name);
        }
    }

    fn tracked(log: &Rc<RefCell<Vec<&'static str>>>, names: &[&'static str]) -> Vec<Tracked> {
        names.iter().map(|&name| Tracked { name, log: Rc::clone(log) }).collect()
    }

    #[test]
    fn vertex_arrays_go_before_buffers_and_programs_last() {
        let log = Rc::new(RefCell::new(Vec::new()));
        // built in the order GpuScene::build creates them
        let mut programs = tracked(&log, &["program a", "program b"]);
        let mut vertex_arrays = tracked(&log, &["vao 0", "vao 1"]);
        let mut buffers = tracked(&log, &["vbo 0", "ebo 0", "vbo 1"]);

        release_in_order(&mut vertex_arrays, &mut buffers, &mut programs);

        assert_eq!(
            *log.borrow(),
            vec!["vao 0", "vao 1", "vbo 0", "ebo 0", "vbo 1", "program a", "program b"]
        );
    }

    #[test]
    fn each_handle_is_released_once() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut vertex_arrays = tracked(&log, &["vao"]);
        let mut buffers = tracked(&log, &["vbo"]);
        let mut programs = tracked(&log, &["program"]);

        release_in_order(&mut vertex_arrays, &mut buffers, &mut programs);
        release_in_order(&mut vertex_arrays, &mut buffers, &mut programs);
        drop((vertex_arrays, buffers, programs));

        assert_eq!(log.borrow().len(), 3);
    }
}
