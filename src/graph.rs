pub mod assemble;
pub mod model;
pub mod render;
pub mod transition;
