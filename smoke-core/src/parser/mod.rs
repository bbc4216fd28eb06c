use crate::error::ParseError;
use crate::types::SequenceDocument;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    Json,
    Yaml,
    Auto,
}

#[derive(Debug, Clone)]
pub struct ParsedSequence {
    pub document: SequenceDocument,
    pub format: DocumentFormat,
}

pub fn parse_sequence_str(
    input: &str,
    format: DocumentFormat,
) -> Result<ParsedSequence, ParseError> {
    match format {
        DocumentFormat::Json => Ok(ParsedSequence {
            document: serde_json::from_str::<SequenceDocument>(input)?,
            format,
        }),
        DocumentFormat::Yaml => Ok(ParsedSequence {
            document: serde_yaml::from_str::<SequenceDocument>(input)?,
            format,
        }),
        DocumentFormat::Auto => parse_sequence_auto(input),
    }
}

fn parse_sequence_auto(input: &str) -> Result<ParsedSequence, ParseError> {
    // JSON documents start with `{` or `[` after trimming; try that first,
    // otherwise YAML first, falling back either way.
    let trimmed = input.trim_start();
    if trimmed.starts_with('{') || trimmed.starts_with('[') {
        match serde_json::from_str::<SequenceDocument>(input) {
            Ok(document) => Ok(ParsedSequence {
                document,
                format: DocumentFormat::Json,
            }),
            Err(json_err) => match serde_yaml::from_str::<SequenceDocument>(input) {
                Ok(document) => Ok(ParsedSequence {
                    document,
                    format: DocumentFormat::Yaml,
                }),
                Err(_) => Err(ParseError::Json(json_err)),
            },
        }
    } else {
        match serde_yaml::from_str::<SequenceDocument>(input) {
            Ok(document) => Ok(ParsedSequence {
                document,
                format: DocumentFormat::Yaml,
            }),
            Err(yaml_err) => match serde_json::from_str::<SequenceDocument>(input) {
                Ok(document) => Ok(ParsedSequence {
                    document,
                    format: DocumentFormat::Json,
                }),
                Err(_) => Err(ParseError::Yaml(yaml_err)),
            },
        }
    }
}
