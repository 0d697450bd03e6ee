//! cashflow-domain
//!
//! Pure domain models (Account, Movement, Cadence) and the boundary records
//! they are normalized from. No I/O, no storage, no rendering.

pub mod account;
pub mod cadence;
pub mod common;
pub mod movement;
pub mod record;

pub use account::*;
pub use cadence::*;
pub use common::*;
pub use movement::*;
pub use record::*;
