//! Error types produced by configuration resolution and settings aggregation.

mod constructors;
mod types;

pub use types::StrataError;

#[cfg(test)]
mod tests;
