//! Free-space RF link budget engine.
//!
//! This crate contains:
//! - **Parameters**: the seven inputs, their units, slider domains and defaults
//! - **Engine**: wavelength, Friis path loss, received power and link margin
//! - **Status**: five-way classification of the link margin
//! - **Report**: plain-text rendering of controls, formulas and results

pub mod engine;
pub mod error;
pub mod params;
pub mod report;
pub mod status;

pub use engine::{LinkBudgetResult, dbm_to_watts, evaluate};
pub use error::LinkBudgetError;
pub use params::{LinkBudgetInput, Parameter};
pub use status::{LinkStatus, Severity};
