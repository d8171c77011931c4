pub mod messaging;
pub mod stats;
