//! GLSL sources for every scene. All of them target OpenGL 3.3 core.

/// Passes the position attribute (location 0) straight through.
pub const POSITION_VERT: &str = "#version 330 core
layout (location = 0) in vec3 aPos;
void main()
{
    gl_Position = vec4(aPos.x, aPos.y, aPos.z, 1.0);
}
";

/// Position at location 0, color at location 1. The color is handed to the fragment stage,
/// where it gets interpolated across the triangle.
pub const POSITION_COLOR_VERT: &str = "#version 330 core
layout (location = 0) in vec3 aPos;
layout (location = 1) in vec3 aColor;
out vec3 ourColor;
void main()
{
    gl_Position = vec4(aPos, 1.0);
    ourColor = aColor;
}
";

pub const ORANGE_FRAG: &str = "#version 330 core
out vec4 FragColor;
void main()
{
    FragColor = vec4(1.0f, 0.5f, 0.2f, 1.0f);
}
";

pub const YELLOW_FRAG: &str = "#version 330 core
out vec4 FragColor;
void main()
{
    FragColor = vec4(1.0f, 1.0f, 0.0f, 1.0f);
}
";

pub const VERTEX_COLOR_FRAG: &str = "#version 330 core
in vec3 ourColor;
out vec4 FragColor;
void main()
{
    FragColor = vec4(ourColor, 1.0f);
}
";
