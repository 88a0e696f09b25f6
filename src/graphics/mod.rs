pub mod opengl;
pub mod utils;
