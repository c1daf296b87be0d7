pub mod processor;
pub mod routes;
pub mod store;
pub mod cors;
pub mod error;
pub mod utils;
pub mod config;
pub mod catchers;
pub use shared::{models::*, error::*, validation::*};
pub use shared::tally::{Tally, TallyError};

#[cfg(test)]
mod tests;
