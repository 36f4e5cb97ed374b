pub mod gamepad;
pub mod gfx;
pub mod input;
pub mod midi;
