pub mod config;
pub mod contact;
pub mod events;
pub mod gui;
pub mod hero;
mod macros;
pub mod motion;
pub mod ring;
pub mod sys;
pub mod theme;
