//! Trails Catalog Library
//!
//! This library exposes modules for integration testing

pub mod config;
pub mod db;
pub mod dto;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod models;
pub mod services;
pub mod state;
pub mod test_utils;
