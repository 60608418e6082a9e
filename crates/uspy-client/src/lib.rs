pub mod api;
pub mod client;
pub mod config;
pub mod error;
pub mod metrics;
pub mod tracing;
pub mod validation;

pub use api::{AccountApi, SubjectApi};
pub use client::ApiClient;
pub use config::{ClientConfig, Environment};
pub use error::ClientError;
pub use reqwest::Url;
