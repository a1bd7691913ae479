//! Resume analyzer library
//!
//! Client side of a resume analysis service: uploads a resume, holds the
//! returned analysis for one session, renders it in the terminal and
//! synthesizes export artifacts.

pub mod analysis;
pub mod api;
pub mod cli;
pub mod config;
pub mod error;
pub mod format;
pub mod input;
pub mod model;
pub mod output;
pub mod session;
pub mod validation;

pub use config::Config;
pub use error::{AnalyzerError, Result};
