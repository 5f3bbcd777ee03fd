mod dnnf_compiler;
mod dnnf_model_counting;
mod dnnf_propagator;
mod dtree;

pub use dnnf_compiler::*;
