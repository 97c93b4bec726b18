// Adapters layer: concrete RecordStore implementations.

pub mod http;
pub mod memory;
