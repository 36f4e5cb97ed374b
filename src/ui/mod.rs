pub mod canvas;
pub mod color;
pub mod frame;
pub mod staff;
pub mod text;
