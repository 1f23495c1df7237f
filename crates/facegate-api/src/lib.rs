// facegate-api: Async Rust client for the face registration / sign-in backend

pub mod client;
pub mod error;
pub mod models;
pub mod transport;
pub mod upload;

pub use client::IdentityClient;
pub use error::Error;
pub use models::Verdict;
pub use transport::{TlsMode, TransportConfig};
pub use upload::ImageUpload;
