//! Decode and encode boundaries — both injected capabilities.

pub mod decoder;
pub mod encoder;
