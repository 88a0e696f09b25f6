//! The four triangle scenes, each one showing off a single idea: the plain triangle, per-vertex
//! color, two programs side by side, and an index buffer reusing vertices.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use super::shaders::*;
use super::*;

const LEARNOPENGL_TEAL: [f32; 4] = [0.2, 0.3, 0.3, 1.0];

#[rustfmt::skip]
const TRIANGLE: [f32; 9] = [
    -0.5, -0.5, 0.0,
     0.5, -0.5, 0.0,
     0.0,  0.5, 0.0,
];

#[rustfmt::skip]
const COLORED_TRIANGLE: [f32; 18] = [
    // Position         Color
     0.5, -0.5, 0.0,    1.0, 0.0, 0.0,
    -0.5, -0.5, 0.0,    0.0, 1.0, 0.0,
     0.0,  0.5, 0.0,    0.0, 0.0, 1.0,
];

#[rustfmt::skip]
const LEFT_TRIANGLE: [f32; 9] = [
    -0.9,  -0.5, 0.0,
     0.0,  -0.5, 0.0,
    -0.45,  0.5, 0.0,
];

#[rustfmt::skip]
const RIGHT_TRIANGLE: [f32; 9] = [
    0.0,  -0.5, 0.0,
    0.9,  -0.5, 0.0,
    0.45,  0.5, 0.0,
];

const SINGLE_TRIANGLE_INDICES: [u32; 3] = [0, 1, 2];

#[rustfmt::skip]
const TWO_TRIANGLES: [f32; 15] = [
     0.0,  0.0, 0.0,
     0.5,  0.0, 0.0,
    -0.5,  0.0, 0.0,
    -0.25, 0.5, 0.0,
     0.25, 0.5, 0.0,
];

#[rustfmt::skip]
const TWO_TRIANGLE_INDICES: [u32; 6] = [
    0, 1, 4,
    0, 2, 3,
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Variant {
    Triangle,
    Colored,
    TwoPrograms,
    Indexed,
}

lazy_static! {
    static ref BY_NAME: HashMap<&'static str, Variant> =
        Variant::ALL.iter().map(|v| (v.name(), *v)).collect();
}

impl Variant {
    pub const ALL: [Variant; 4] = [
        Variant::Triangle,
        Variant::Colored,
        Variant::TwoPrograms,
        Variant::Indexed,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Variant::Triangle => "triangle",
            Variant::Colored => "colored",
            Variant::TwoPrograms => "two-programs",
            Variant::Indexed => "indexed",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Variant::Triangle => "a single orange triangle",
            Variant::Colored => "one triangle with colors interpolated between its corners",
            Variant::TwoPrograms => "two triangles, each drawn with its own shader program",
            Variant::Indexed => "two wireframe triangles sharing vertices through an index buffer",
        }
    }

    pub fn scene(self) -> SceneDesc {
        match self {
            Variant::Triangle => SceneDesc {
                name: self.name(),
                clear_color: [0.0, 0.0, 0.0, 0.0],
                polygon_mode: PolygonMode::Fill,
                programs: vec![ProgramDesc { vertex: POSITION_VERT, fragment: ORANGE_FRAG }],
                meshes: vec![MeshDesc {
                    vertices: &TRIANGLE,
                    indices: None,
                    layout: VertexLayout::position(),
                }],
                draws: vec![DrawDesc {
                    program: 0,
                    mesh: 0,
                    mode: DrawMode::Arrays { first: 0, count: 3 },
                }],
            },

            Variant::Colored => SceneDesc {
                name: self.name(),
                clear_color: LEARNOPENGL_TEAL,
                polygon_mode: PolygonMode::Fill,
                programs: vec![ProgramDesc {
                    vertex: POSITION_COLOR_VERT,
                    fragment: VERTEX_COLOR_FRAG,
                }],
                meshes: vec![MeshDesc {
                    vertices: &COLORED_TRIANGLE,
                    indices: None,
                    layout: VertexLayout::position_color(),
                }],
                draws: vec![DrawDesc {
                    program: 0,
                    mesh: 0,
                    mode: DrawMode::Arrays { first: 0, count: 3 },
                }],
            },

            Variant::TwoPrograms => SceneDesc {
                name: self.name(),
                clear_color: LEARNOPENGL_TEAL,
                polygon_mode: PolygonMode::Fill,
                programs: vec![
                    ProgramDesc { vertex: POSITION_VERT, fragment: ORANGE_FRAG },
                    ProgramDesc { vertex: POSITION_VERT, fragment: YELLOW_FRAG },
                ],
                meshes: vec![
                    MeshDesc {
                        vertices: &LEFT_TRIANGLE,
                        indices: Some(&SINGLE_TRIANGLE_INDICES),
                        layout: VertexLayout::position(),
                    },
                    MeshDesc {
                        vertices: &RIGHT_TRIANGLE,
                        indices: Some(&SINGLE_TRIANGLE_INDICES),
                        layout: VertexLayout::position(),
                    },
                ],
                draws: vec![
                    DrawDesc { program: 0, mesh: 0, mode: DrawMode::Elements { count: 3 } },
                    DrawDesc { program: 1, mesh: 1, mode: DrawMode::Elements { count: 3 } },
                ],
            },

            // The blue channel is out of range on purpose; GL clamps it.
            Variant::Indexed => SceneDesc {
                name: self.name(),
                clear_color: [0.2, 0.4, 1.2, 0.1],
                polygon_mode: PolygonMode::Line,
                programs: vec![ProgramDesc { vertex: POSITION_VERT, fragment: ORANGE_FRAG }],
                meshes: vec![MeshDesc {
                    vertices: &TWO_TRIANGLES,
                    indices: Some(&TWO_TRIANGLE_INDICES),
                    layout: VertexLayout::position(),
                }],
                draws: vec![DrawDesc {
                    program: 0,
                    mesh: 0,
                    mode: DrawMode::Elements { count: 6 },
                }],
            },
        }
    }
}

impl Default for Variant {
    fn default() -> Self {
        Variant::Indexed
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Variant {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        BY_NAME
            .get(s)
            .copied()
            .ok_or_else(|| format!("unknown variant \"{}\"", s))
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn names_round_trip() {
        for variant in Variant::ALL.iter() {
            assert_eq!(variant.name().parse::<Variant>(), Ok(*variant));
        }
        assert!("square".parse::<Variant>().is_err());
    }

    #[test]
    fn default_is_the_indexed_scene() {
        assert_eq!(Variant::default(), Variant::Indexed);
    }

    #[test]
    fn shaders_declare_the_locations_their_layouts_use() {
        for variant in Variant::ALL.iter() {
            let scene = variant.scene();

            for draw in &scene.draws {
                let program = scene.programs[draw.program];
                assert!(program.vertex.starts_with("#version 330 core\n"));
                assert!(program.fragment.starts_with("#version 330 core\n"));
                assert!(program.fragment.contains("out vec4 FragColor;"));

                for attribute in &scene.meshes[draw.mesh].layout.attributes {
                    let decl = format!("layout (location = {})", attribute.location);
                    assert!(program.vertex.contains(&decl), "{}: missing {}", variant, decl);
                }
            }
        }
    }

    #[test]
    fn color_output_feeds_the_fragment_input() {
        let scene = Variant::Colored.scene();
        let program = scene.programs[0];

        assert!(program.vertex.contains("out vec3 ourColor;"));
        assert!(program.fragment.contains("in vec3 ourColor;"));
    }
}
