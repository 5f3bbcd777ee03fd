mod proposition;

pub use proposition::*;
