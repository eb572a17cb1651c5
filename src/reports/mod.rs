//! Reports module for Tally
//!
//! Spending analysis over arbitrary date ranges. The month budget view lives
//! in `services::budget`.

pub mod spending;

pub use spending::{SpendingByCategory, SpendingReport};
