pub mod error;
pub mod models;
pub mod validation;
pub mod tally;

pub use error::ErrorResponse;
pub use models::*;
pub use validation::*;
pub use tally::{Tally, TallyError};
