pub mod bar;
pub mod gameplay;
pub mod judgment;
pub mod note;
pub mod pattern;
pub mod settings;
pub mod stats;
pub mod timing;
