pub mod assessment;
pub mod core;
pub mod interpret_effect;
pub mod main;
pub mod render;
