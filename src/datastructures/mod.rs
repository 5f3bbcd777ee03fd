mod assignment;
mod model;

pub use assignment::*;
pub use model::*;
