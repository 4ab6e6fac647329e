//! Domain models for lab results and clinical questionnaires.

mod lab;
mod questionnaire;

pub use lab::*;
pub use questionnaire::*;
