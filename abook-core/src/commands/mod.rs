//! Executable commands.
//!
//! A command is fully validated at construction time as far as its own fields
//! go; `execute` adds the checks that need the store (index range, phone/email
//! conflicts, tag-group registration) and only mutates once they all pass.

mod add;
mod delete;
mod edit;
mod find;
mod tag_group;

pub use add::AddCommand;
pub use delete::DeleteCommand;
pub use edit::{EditCommand, EditPersonDescriptor};
pub use find::FindCommand;
pub use tag_group::TagGroupCommand;

use log::debug;

use crate::error::CommandError;
use crate::filter::PersonFilter;
use crate::model::Model;
use crate::parser::Index;
use crate::person::Person;

pub const LIST_USAGE: &str = "list: Lists all persons in the address book.";
pub const CLEAR_USAGE: &str = "clear: Deletes every person (tag groups are kept).";
pub const HELP_USAGE: &str = "help: Shows this usage text.";
pub const EXIT_USAGE: &str = "exit: Leaves the shell.";

pub const MESSAGE_LIST_SUCCESS: &str = "Listed all persons";
pub const MESSAGE_CLEAR_SUCCESS: &str = "Address book has been cleared!";
pub const MESSAGE_EXIT: &str = "Exiting Address Book as requested ...";

/// Feedback for the user after a command ran
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandResult {
    pub feedback: String,
    pub show_help: bool,
    pub exit: bool,
}

impl CommandResult {
    pub fn new(feedback: impl Into<String>) -> Self {
        Self {
            feedback: feedback.into(),
            show_help: false,
            exit: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Add(AddCommand),
    Edit(EditCommand),
    Delete(DeleteCommand),
    Find(FindCommand),
    List,
    Clear,
    TagGroup(TagGroupCommand),
    Help,
    Exit,
}

impl Command {
    /// Whether a successful run changes the address book and must be saved
    pub fn is_mutating(&self) -> bool {
        match self {
            Command::Add(_) | Command::Edit(_) | Command::Delete(_) | Command::Clear => true,
            Command::TagGroup(cmd) => cmd.is_mutating(),
            Command::Find(_) | Command::List | Command::Help | Command::Exit => false,
        }
    }

    pub fn execute(self, model: &mut dyn Model) -> Result<CommandResult, CommandError> {
        debug!("executing {:?}", self);
        match self {
            Command::Add(cmd) => cmd.execute(model),
            Command::Edit(cmd) => cmd.execute(model),
            Command::Delete(cmd) => cmd.execute(model),
            Command::Find(cmd) => cmd.execute(model),
            Command::List => {
                model.update_filter(PersonFilter::all());
                Ok(CommandResult::new(MESSAGE_LIST_SUCCESS))
            }
            Command::Clear => {
                model.clear_persons();
                Ok(CommandResult::new(MESSAGE_CLEAR_SUCCESS))
            }
            Command::TagGroup(cmd) => cmd.execute(model),
            Command::Help => Ok(CommandResult {
                feedback: usage(),
                show_help: true,
                exit: false,
            }),
            Command::Exit => Ok(CommandResult {
                feedback: MESSAGE_EXIT.to_string(),
                show_help: false,
                exit: true,
            }),
        }
    }
}

/// Usage text for every command
pub fn usage() -> String {
    [
        AddCommand::USAGE,
        EditCommand::USAGE,
        DeleteCommand::USAGE,
        FindCommand::USAGE,
        LIST_USAGE,
        CLEAR_USAGE,
        TagGroupCommand::USAGE,
        HELP_USAGE,
        EXIT_USAGE,
    ]
    .join("\n\n")
}

/// Resolves an index against the displayed list and returns an owned copy
fn person_at(model: &dyn Model, index: Index) -> Result<Person, CommandError> {
    model
        .filtered_persons()
        .get(index.zero_based())
        .map(|p| (*p).clone())
        .ok_or(CommandError::InvalidPersonIndex)
}

/// Store doubles for command tests. The stub records added persons and serves
/// a fixed set of tag groups; any other mutation or filter access panics.
#[cfg(test)]
pub(crate) mod test_support {
    use std::collections::BTreeSet;

    use crate::fields::TagGroup;
    use crate::filter::PersonFilter;
    use crate::model::{AddressBook, Model};
    use crate::person::Person;

    /// Accepts every added person and remembers it; knows a fixed set of tag groups
    #[derive(Default)]
    pub struct ModelStubAcceptingPersonAdded {
        pub book: AddressBook,
        pub persons_added: Vec<Person>,
    }

    impl ModelStubAcceptingPersonAdded {
        pub fn with_groups(groups: &[&str]) -> Self {
            let mut stub = Self::default();
            for group in groups {
                stub.book.add_tag_group(group.parse().unwrap());
            }
            stub
        }
    }

    impl Model for ModelStubAcceptingPersonAdded {
        fn address_book(&self) -> &AddressBook {
            &self.book
        }

        fn set_address_book(&mut self, _book: AddressBook) {
            panic!("set_address_book should not be called");
        }

        fn persons(&self) -> &[Person] {
            &self.persons_added
        }

        fn tag_groups(&self) -> &BTreeSet<TagGroup> {
            self.book.tag_groups()
        }

        fn add_person(&mut self, person: Person) {
            self.persons_added.push(person);
        }

        fn set_person(&mut self, _target: &Person, _edited: Person) {
            panic!("set_person should not be called");
        }

        fn delete_person(&mut self, _target: &Person) {
            panic!("delete_person should not be called");
        }

        fn clear_persons(&mut self) {
            panic!("clear_persons should not be called");
        }

        fn filtered_persons(&self) -> Vec<&Person> {
            panic!("filtered_persons should not be called");
        }

        fn update_filter(&mut self, _filter: PersonFilter) {
            panic!("update_filter should not be called");
        }

        fn add_tag_group(&mut self, _group: TagGroup) {
            panic!("add_tag_group should not be called");
        }

        fn remove_tag_group(&mut self, _group: &TagGroup) {
            panic!("remove_tag_group should not be called");
        }
    }
}
