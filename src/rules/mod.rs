//! The rules layer: what is legal, and why something is not.

mod error;
mod legality;

pub use error::{ActionError, EraError, InsufficientFunds, ResourceError, RuleViolation};
