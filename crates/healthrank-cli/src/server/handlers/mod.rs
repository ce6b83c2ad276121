//! API request handlers.

mod data;
mod geography;
mod health;
mod indicators;
mod validation;

pub use data::*;
pub use geography::*;
pub use health::*;
pub use indicators::*;
pub use validation::*;
