mod rules;
mod validator;

use crate::error::ValidationError;
use crate::types::SequenceDocument;
use validator::Validator;

pub trait Validate {
    fn validate(&self) -> Result<(), ValidationError>;
}

impl Validate for SequenceDocument {
    fn validate(&self) -> Result<(), ValidationError> {
        validate_sequence(self)
    }
}

pub fn validate_sequence(doc: &SequenceDocument) -> Result<(), ValidationError> {
    let mut v = Validator::new();
    v.validate_document(doc);
    v.finish()
}
