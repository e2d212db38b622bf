pub mod cli;
pub mod core;
pub mod infrastructure;
pub mod sinks;
pub mod strategies;
