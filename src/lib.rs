#![warn(clippy::all, clippy::pedantic)]
#![allow(
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::module_name_repetitions,
    clippy::must_use_candidate,
    clippy::new_without_default,
    clippy::return_self_not_must_use
)]

pub mod assets;
pub mod config;
pub mod error;
pub mod sandbox;
pub mod server;
pub mod stock;
pub mod tools;

pub use config::Config;
pub use error::{Result, WebcoderError};
pub use server::WebcoderServer;
