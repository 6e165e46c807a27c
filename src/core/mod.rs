//! Configuration and request/response models shared across the crate

pub mod config;
pub mod models;
