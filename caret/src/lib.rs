pub mod caret;
pub mod caret_visual;
pub mod commands;
pub mod hit_test;
pub mod math_editor;
pub mod movement;
pub mod selection;
pub mod settings;
