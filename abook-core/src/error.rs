//! Error types shared by the parser, the command layer and storage.

use thiserror::Error;

use crate::fields::{Role, Tag, TagGroup};

/// Message for an index that is not a positive 32-bit integer
pub const MESSAGE_INVALID_INDEX: &str = "Index is not a non-zero unsigned integer.";

/// Which field a format failure belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Name,
    Phone,
    Email,
    Address,
    Role,
    Tag,
    TagGroup,
    Status,
}

impl std::fmt::Display for Field {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Field::Name => write!(f, "name"),
            Field::Phone => write!(f, "phone"),
            Field::Email => write!(f, "email"),
            Field::Address => write!(f, "address"),
            Field::Role => write!(f, "role"),
            Field::Tag => write!(f, "tag"),
            Field::TagGroup => write!(f, "tag group"),
            Field::Status => write!(f, "status"),
        }
    }
}

/// Failures raised while turning raw text into typed values or commands
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("{message}")]
    InvalidField { field: Field, message: &'static str },

    #[error(
        "Duplicate roles detected (case-insensitive):{existing} {offending}\n Each role can only appear once per contact."
    )]
    DuplicateRole { existing: Role, offending: Role },

    #[error("{}", MESSAGE_INVALID_INDEX)]
    InvalidIndex,

    #[error("Invalid command format! \n{usage}")]
    InvalidCommandFormat { usage: &'static str },

    #[error("Multiple values specified for the following single-valued field(s): {0}")]
    DuplicatePrefixes(String),

    #[error("At least one field to edit must be provided.")]
    NoFieldEdited,

    #[error("Unknown command")]
    UnknownCommand,
}

impl ParseError {
    pub(crate) fn invalid(field: Field, message: &'static str) -> Self {
        ParseError::InvalidField { field, message }
    }
}

/// Failures raised while executing a command against the model
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CommandError {
    #[error("This phone number already exists in the address book")]
    DuplicatePhone,

    #[error("This email already exists in the address book")]
    DuplicateEmail,

    #[error("Tag group '{}' does not exist for tag '{tag}'. Add it first with: taggroup add {}", .tag.group().unwrap_or_default(), .tag.group().unwrap_or_default())]
    UnknownTagGroup { tag: Tag },

    #[error("The person index provided is invalid")]
    InvalidPersonIndex,

    #[error("Tag group '{0}' already exists")]
    DuplicateTagGroup(TagGroup),

    #[error("Tag group '{0}' does not exist")]
    TagGroupNotFound(TagGroup),

    #[error("Tag group '{0}' is still used by at least one person and cannot be removed")]
    TagGroupInUse(TagGroup),
}

/// Persisted data that no longer satisfies the model's constraints
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DataConversionError {
    #[error("Illegal value in stored data: {0}")]
    IllegalValue(String),

    #[error("Person's {0} field is missing!")]
    MissingField(&'static str),
}

/// Everything that can go wrong between reading a command line and saving the result
#[derive(Error, Debug)]
pub enum LogicError {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Command(#[from] CommandError),

    #[error("Could not save data to file: {0:#}")]
    Storage(#[from] anyhow::Error),
}
