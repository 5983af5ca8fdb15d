pub mod render;
pub mod window;
