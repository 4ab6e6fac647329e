//! Lab value evaluator.
//!
//! Pipeline per result row: Test-name normalization → Reference-range parsing → Abnormal flag
//!
//! Every operation here is total. Input that cannot be evaluated resolves to the
//! conservative default (`false` for the abnormal flag), so callers must treat
//! `false` as "not proven abnormal" rather than "confirmed normal".

mod history;
mod normalizer;
mod range;

pub use history::*;
pub use normalizer::*;
pub use range::*;
