use std::{fmt::Display, io};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkdownsBodyDifference {
    pub line: u32,
    pub column: u32,
    pub old_context: String,
    pub new_context: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkdownsHeaderDifference {
    pub header_name: String,
    pub old_header_value: Option<String>,
    pub new_header_value: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MarkdownsDifferenceType {
    Body(MarkdownsBodyDifference),
    Header(MarkdownsHeaderDifference),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkdownsDifferenceLocation {
    Request,
    Response,
}

#[derive(Debug, Error)]
pub enum Error {
    #[error("IoError: {0}")]
    IoError(#[from] io::Error),
    #[error("Markdown format is invalid")]
    InvalidMarkdownFormat,
    #[error("Couldn't parse interaction number from the markdown file")]
    InvalidInteractionNumber,
    #[error("The status code is invalid")]
    InvalidStatusCode,
    #[error("The markdown holds {old} interactions but {new} were recorded")]
    InteractionCountDiffers { old: usize, new: usize },
    #[error("Interaction {interaction_number}: {location} {difference}")]
    MarkdownsDiffer {
        interaction_number: usize,
        difference: MarkdownsDifferenceType,
        location: MarkdownsDifferenceLocation,
    },
}

impl Display for MarkdownsDifferenceLocation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MarkdownsDifferenceLocation::Request => write!(f, "Request"),
            MarkdownsDifferenceLocation::Response => write!(f, "Response"),
        }
    }
}

impl Display for MarkdownsDifferenceType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MarkdownsDifferenceType::Body(MarkdownsBodyDifference {
                line,
                column,
                old_context,
                new_context,
            }) => write!(
                f,
                "bodies differ at line {}, column {}. Old: \"{}\". New: \"{}\"",
                line,
                column,
                old_context.escape_default(),
                new_context.escape_default()
            ),
            MarkdownsDifferenceType::Header(MarkdownsHeaderDifference {
                header_name,
                old_header_value,
                new_header_value,
            }) => {
                let describe = |value: &Option<String>| match value {
                    Some(value) => format!("\"{}\": \"{}\"", header_name, value),
                    None => "<no header value>".into(),
                };

                write!(
                    f,
                    "headers differ. old - {}, new - {}",
                    describe(old_header_value),
                    describe(new_header_value)
                )
            }
        }
    }
}
