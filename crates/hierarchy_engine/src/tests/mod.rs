//! Cross-module tests
//!
//! Properties that span more than one module: matrix algebra against the
//! collision queries built on it, and whole-frame behavior of a scene graph
//! carrying game entities.

mod matrix_properties;
