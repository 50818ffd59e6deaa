pub mod commands;
pub mod core;
pub mod error;
pub mod fields;
pub mod id;
pub mod store;
pub mod types;

#[cfg(test)]
pub mod testutil;
