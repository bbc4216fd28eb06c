#![forbid(unsafe_code)]

pub mod error;
pub mod expressions;
pub mod parser;
pub mod plan;
pub mod types;
pub mod validate;

pub use crate::error::{ParseError, SmokeError, ValidationError};
pub use crate::parser::{parse_sequence_str, DocumentFormat, ParsedSequence};
pub use crate::plan::{plan_sequence, PlannedStep, SequencePlan};
pub use crate::types::SequenceDocument;
pub use crate::validate::{validate_sequence, Validate};
