//! Authentication backends.

mod memory;

pub use memory::{MemoryBackend, MemoryBackendConfig};
