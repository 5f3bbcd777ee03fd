mod events;
mod factorization_handler;
mod handler;
mod lng_result;
mod timeout_handler;

pub use events::*;
pub use factorization_handler::*;
pub use handler::*;
pub use lng_result::*;
pub use timeout_handler::*;
