mod formula_depth_function;
mod literals;
mod model_count;
mod sub_node_function;
mod variable_profile_function;

pub use formula_depth_function::*;
pub use literals::*;
pub use model_count::*;
pub use sub_node_function::*;
pub use variable_profile_function::*;
