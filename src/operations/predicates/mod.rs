mod contains_pbc;
mod normal_form;
mod sat;

pub use contains_pbc::*;
pub use normal_form::*;
pub use sat::*;
