//! Divisibility classifier for positive integer tokens.
//!
//! A raw token is validated against the canonical form `[1-9][0-9]*`, then
//! labelled by the first matching rule of a fixed table over the divisors
//! {2, 3, 5}:
//!
//! | Divisors  | Label    |
//! |-----------|----------|
//! | 2, 3, 5   | `GUROBI` |
//! | 2, 3      | `GURO`   |
//! | 2, 5      | `GUBI`   |
//! | 3, 5      | `ROBI`   |
//! | 2         | `GU`     |
//! | 3         | `RO`     |
//! | 5         | `BI`     |
//! | (none)    | `INVALID`|
//!
//! Everything here is pure: no I/O, no logging, no shared state. Callers
//! (the HTTP transport, the CLI) own logging and status-code mapping.

pub mod label;
pub mod outcome;
pub mod rules;
pub mod validate;

pub use label::Label;
pub use outcome::{classify, evaluate, Classification, ClassifyError, StatusCategory};
pub use rules::{classify_number, label_for_u64, Rule, RULES};
pub use validate::{validate, ValidatedNumber, ValidationError};
