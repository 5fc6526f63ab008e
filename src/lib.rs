pub mod admin;
pub mod config;
pub mod countdown;
pub mod editor;
pub mod error;
pub mod forms;
pub mod model;
pub mod seed;
pub mod selection;
pub mod state;
pub mod store;
pub mod transfer;
