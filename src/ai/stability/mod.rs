pub mod client;
pub mod image;
pub mod types;

pub use client::StabilityHttpClient;
pub use image::StabilityImageClient;
