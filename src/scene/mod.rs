//! Declarative per-frame scene graph and the components that produce it.

pub(crate) mod component;
pub(crate) mod components;
pub(crate) mod model;
pub mod palette;
