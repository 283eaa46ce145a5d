//! Service backends — concrete implementations of the auth and profile
//! interfaces.

pub mod http;
pub mod memory;

pub use http::HttpBackend;
pub use memory::MemoryBackend;
