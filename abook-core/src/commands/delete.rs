use crate::error::CommandError;
use crate::messages::format_person;
use crate::model::Model;
use crate::parser::Index;

use super::{person_at, CommandResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeleteCommand {
    index: Index,
}

impl DeleteCommand {
    pub const WORD: &'static str = "delete";
    pub const USAGE: &'static str = "delete: Deletes the person identified by the index number \
used in the displayed person list.\n\
Parameters: INDEX (must be a positive integer)\n\
Example: delete 1";
    pub const MESSAGE_SUCCESS: &'static str = "Deleted Person: ";

    pub fn new(index: Index) -> Self {
        Self { index }
    }

    pub fn index(&self) -> Index {
        self.index
    }

    pub fn execute(self, model: &mut dyn Model) -> Result<CommandResult, CommandError> {
        let target = person_at(&*model, self.index)?;
        model.delete_person(&target);
        Ok(CommandResult::new(format!(
            "{}{}",
            Self::MESSAGE_SUCCESS,
            format_person(&target)
        )))
    }
}
