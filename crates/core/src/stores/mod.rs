pub mod memory;

pub use memory::{FlatIndex, IndexEntry};
