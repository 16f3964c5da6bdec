//! Frame-driven animation curves.
//!
//! Every curve is a pure function of the frame index and frame rate; nothing accumulates between
//! frames, so any frame can be evaluated independently and in any order.

pub(crate) mod drift;
pub(crate) mod interpolate;
pub(crate) mod spring;
