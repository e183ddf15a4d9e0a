//! Embeddable FAQ chat widget that relays conversation to a REST webhook.

pub mod config;
pub mod error;
pub mod message;
pub mod render;
pub mod routes;
pub mod services;
pub mod state;
pub mod view;
