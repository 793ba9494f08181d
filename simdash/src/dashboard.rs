pub mod color_scheme;
pub mod command;
pub mod dashboard;
pub mod draw;
pub mod keymap;
pub mod layout;
pub mod map_renderer;
pub mod position;
pub mod simulation;
pub mod surface;
