use std::sync::LazyLock;

use regex::Regex;

use crate::error::{ValidationError, Violation};
use crate::types::SequenceDocument;

use super::rules;

pub(crate) static ID_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9_\-]+$").expect("valid"));

pub struct Validator {
    violations: Vec<Violation>,
}

impl Validator {
    pub fn new() -> Self {
        Self {
            violations: Vec::new(),
        }
    }

    pub fn finish(self) -> Result<(), ValidationError> {
        if self.violations.is_empty() {
            Ok(())
        } else {
            Err(ValidationError::new(self.violations))
        }
    }

    pub fn validate_document(&mut self, doc: &SequenceDocument) {
        rules::document::validate_document(self, doc);
    }

    pub(crate) fn push(&mut self, path: impl Into<String>, message: impl Into<String>) {
        self.violations.push(Violation::new(path, message));
    }

    pub(crate) fn validate_version(&mut self, path: &str, version: &str) {
        // Major.minor must be 1.0; the patch level carries no meaning yet.
        let parts: Vec<&str> = version.split('.').collect();
        if parts.len() < 2 {
            self.push(path, "must be a semver-like string (major.minor[.patch])");
            return;
        }
        if parts[0] != "1" || parts[1] != "0" {
            self.push(path, "only smoke document version 1.0.x is supported");
        }
    }
}
