//! Decorative console output.

pub mod banner;
