pub mod command_parser;
pub mod commands;
pub mod error;
pub mod fields;
pub mod filter;
pub mod logic;
pub mod messages;
pub mod model;
pub mod parser;
pub mod person;
pub mod prefs;
pub mod storage;
pub mod validator;

// Re-export commonly used types
pub use command_parser::parse_command;
pub use commands::{
    AddCommand, Command, CommandResult, DeleteCommand, EditCommand, EditPersonDescriptor,
    FindCommand, TagGroupCommand,
};
pub use error::{CommandError, DataConversionError, Field, LogicError, ParseError};
pub use fields::{Address, Email, Name, Phone, Role, Status, Tag, TagGroup};
pub use filter::PersonFilter;
pub use logic::Logic;
pub use model::{AddressBook, Model, ModelManager};
pub use parser::{
    parse_index, parse_roles, parse_statuses, parse_tag_groups, parse_tags,
    validate_no_duplicate_role, Index,
};
pub use person::Person;
pub use prefs::{determine_address_book_path, get_prefs_path, Preferences};
pub use storage::Storage;
pub use validator::{check_conflict, check_tag_groups, validate_person, Conflict};
