//! Leaf store implementations.

mod filesystem;
mod memory;

pub use filesystem::FileStore;
pub use memory::MemoryStore;
