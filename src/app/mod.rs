pub mod commands;
pub mod events;
pub mod helpers;
pub mod prompt;
pub mod proxy;
pub mod state;
pub mod tasks;
pub mod view_model;
