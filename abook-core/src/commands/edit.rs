use std::collections::BTreeSet;

use crate::error::CommandError;
use crate::fields::{Address, Email, Name, Phone, Role, Status, Tag};
use crate::filter::PersonFilter;
use crate::messages::format_person;
use crate::model::Model;
use crate::parser::Index;
use crate::person::Person;
use crate::validator::validate_person;

use super::{person_at, CommandResult};

/// The fields an edit replaces; `None` leaves a field untouched.
///
/// Roles and tags are replaced as whole sets. `status: Some(None)` clears the
/// status.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EditPersonDescriptor {
    pub name: Option<Name>,
    pub phone: Option<Phone>,
    pub email: Option<Email>,
    pub address: Option<Address>,
    pub roles: Option<BTreeSet<Role>>,
    pub tags: Option<BTreeSet<Tag>>,
    pub status: Option<Option<Status>>,
}

impl EditPersonDescriptor {
    pub fn is_any_field_edited(&self) -> bool {
        self.name.is_some()
            || self.phone.is_some()
            || self.email.is_some()
            || self.address.is_some()
            || self.roles.is_some()
            || self.tags.is_some()
            || self.status.is_some()
    }

    /// Builds the replacement for `person`
    pub fn apply(&self, person: &Person) -> Person {
        Person::new(
            self.name.clone().unwrap_or_else(|| person.name().clone()),
            self.phone.clone().unwrap_or_else(|| person.phone().clone()),
            self.email.clone().unwrap_or_else(|| person.email().clone()),
            self.address.clone().unwrap_or_else(|| person.address().clone()),
        )
        .with_roles(self.roles.clone().unwrap_or_else(|| person.roles().clone()))
        .with_tags(self.tags.clone().unwrap_or_else(|| person.tags().clone()))
        .with_status(self.status.unwrap_or_else(|| person.status()))
    }
}

/// Replaces the person at an index of the displayed list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditCommand {
    index: Index,
    descriptor: EditPersonDescriptor,
}

impl EditCommand {
    pub const WORD: &'static str = "edit";
    pub const USAGE: &'static str = "edit: Edits the person identified by the index number used \
in the displayed person list. Existing values will be overwritten by the input values; \
an empty r/, t/ or s/ clears that field.\n\
Parameters: INDEX (must be a positive integer) [n/NAME] [p/PHONE] [e/EMAIL] [a/ADDRESS] \
[r/ROLE]... [t/TAG]... [s/STATUS]\n\
Example: edit 1 p/91234567 e/johndoe@example.com";
    pub const MESSAGE_SUCCESS: &'static str = "Edited Person: ";

    pub fn new(index: Index, descriptor: EditPersonDescriptor) -> Self {
        Self { index, descriptor }
    }

    pub fn execute(self, model: &mut dyn Model) -> Result<CommandResult, CommandError> {
        let target = person_at(&*model, self.index)?;
        let edited = self.descriptor.apply(&target);

        validate_person(&*model, &edited, Some(&target))?;

        let feedback = format!("{}{}", Self::MESSAGE_SUCCESS, format_person(&edited));
        model.set_person(&target, edited);
        model.update_filter(PersonFilter::all());
        Ok(CommandResult::new(feedback))
    }
}
