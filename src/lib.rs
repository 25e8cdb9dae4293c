//! Voice-to-design image generation gateway and studio client
//!
//! The gateway accepts a text prompt over HTTP, relays it to the Stability AI
//! text-to-image API and answers with the generated images as data URIs. The
//! `ui` module is the matching studio client used by the `studio` binary.

pub mod ai;
pub mod error;
pub mod gateway;
pub mod models;
pub mod server;
pub mod ui;

pub use error::{Error, Result};
