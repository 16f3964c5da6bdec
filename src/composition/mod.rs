//! Timeline: sequences with start offsets and premount windows, evaluated into frame scenes.

pub mod builder;
pub mod timeline;
