//! ControlPlaneMachineSet admission checks
//!
//! This crate provides:
//! - [`check_balance`], comparing declared failure domains with the ones in use
//! - [`ControlPlaneMachineSetValidator`], the create and update rules
//! - Kubernetes-style [`FieldError`] rendering for rejections
//!
//! Nothing here talks to the API server; the caller decodes the request and
//! lists the Machines.

#![deny(missing_docs)]

pub mod balance;
pub mod field;
pub mod selector;
mod validation;

pub use balance::{check_balance, BalanceReport};
pub use field::{FieldError, ValidationErrors};
pub use validation::ControlPlaneMachineSetValidator;
