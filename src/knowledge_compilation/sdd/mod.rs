mod sdd_apply;
mod sdd_functions;
mod sdd_kernel;
mod sdd_main;
mod vtree;

pub use sdd_apply::SddOperation;
pub use sdd_kernel::{SddKernel, SddStatistics};
pub use sdd_main::*;
pub use vtree::*;
