//! GroupWatch dashboard library exports.

pub mod api_client;
pub mod commands;
pub mod config;
pub mod error;
pub mod events;
pub mod keys;
pub mod logging;
pub mod nav;
pub mod notifications;
pub mod persistence;
pub mod state;
pub mod theme;
pub mod traits;
pub mod views;
pub mod widgets;
