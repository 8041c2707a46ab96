//! Common, shared types.

pub mod layers;
pub mod settings;
pub mod state;
pub mod tunables;

#[cfg(test)]
pub mod test_utils;
