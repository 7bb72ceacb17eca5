use crate::error::CommandError;
use crate::messages::format_person;
use crate::model::Model;
use crate::person::Person;
use crate::validator::validate_person;

use super::CommandResult;

/// Adds a fully validated person to the book
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddCommand {
    to_add: Person,
}

impl AddCommand {
    pub const WORD: &'static str = "add";
    pub const USAGE: &'static str = "add: Adds a person to the address book. \
Parameters: n/NAME p/PHONE e/EMAIL a/ADDRESS [r/ROLE]... [t/TAG]... [s/STATUS]\n\
Example: add n/John Doe p/98765432 e/johnd@example.com a/311, Clementi Ave 2, #02-25 \
r/Buyer t/friends.john s/PENDING";
    pub const MESSAGE_SUCCESS: &'static str = "New person added: ";

    pub fn new(to_add: Person) -> Self {
        Self { to_add }
    }

    pub fn person(&self) -> &Person {
        &self.to_add
    }

    /// Checks conflicts and tag groups, then inserts; nothing changes on failure
    pub fn execute(self, model: &mut dyn Model) -> Result<CommandResult, CommandError> {
        validate_person(&*model, &self.to_add, None)?;

        let feedback = format!("{}{}", Self::MESSAGE_SUCCESS, format_person(&self.to_add));
        model.add_person(self.to_add);
        Ok(CommandResult::new(feedback))
    }
}
