//! shapetab core - Domain models, errors, configuration and shapefile reading
//!
//! This crate holds the types every other shapetab crate speaks in: the output
//! row model, the ring set, the layered configuration and the shapefile reader.

pub mod config;
pub mod error;
pub mod formats;
pub mod models;

pub use error::{Result, ShapetabError};
