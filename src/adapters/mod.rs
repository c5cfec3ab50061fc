// Adapters layer: concrete implementations of the data ports (in-memory store, file loaders).

pub mod file;
pub mod memory;
