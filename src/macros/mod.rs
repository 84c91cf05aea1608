//! Code generation for model types.

mod model;
