use log::{debug, warn};

use crate::command_parser::parse_command;
use crate::commands::{Command, CommandResult};
use crate::error::LogicError;
use crate::model::{Model, ModelManager};
use crate::person::Person;
use crate::storage::Storage;

/// Runs commands against the in-memory book and persists every change
pub struct Logic {
    model: ModelManager,
    storage: Storage,
}

impl Logic {
    pub fn new(model: ModelManager, storage: Storage) -> Self {
        Self { model, storage }
    }

    /// Reads the book from `storage` and wraps it
    pub fn load(storage: Storage) -> anyhow::Result<Self> {
        let book = storage.load()?;
        Ok(Self::new(ModelManager::new(book), storage))
    }

    /// Parses and runs one line of user input
    pub fn execute(&mut self, command_text: &str) -> Result<CommandResult, LogicError> {
        debug!("command text: {:?}", command_text);
        let command = parse_command(command_text)?;
        self.run(command)
    }

    /// Runs an already built command, saving afterwards if it changed the book.
    ///
    /// A failed save restores the book to its state before the command.
    pub fn run(&mut self, command: Command) -> Result<CommandResult, LogicError> {
        let mutating = command.is_mutating();
        let snapshot = mutating.then(|| self.model.address_book().clone());

        let result = command.execute(&mut self.model)?;

        if let Some(previous) = snapshot {
            if let Err(e) = self.storage.save(self.model.address_book()) {
                warn!("save failed, reverting in-memory changes: {:#}", e);
                self.model.set_address_book(previous);
                return Err(LogicError::Storage(e));
            }
        }

        Ok(result)
    }

    pub fn model(&self) -> &ModelManager {
        &self.model
    }

    pub fn filtered_persons(&self) -> Vec<&Person> {
        self.model.filtered_persons()
    }

    pub fn storage(&self) -> &Storage {
        &self.storage
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{CommandError, ParseError};
    use tempfile::TempDir;

    fn logic(dir: &TempDir) -> Logic {
        Logic::load(Storage::new(dir.path().join("addressbook.json"))).unwrap()
    }

    #[test]
    fn test_execute_add_persists() {
        let dir = TempDir::new().unwrap();
        let mut logic = logic(&dir);

        let result = logic
            .execute("add n/Amy Bee p/85355255 e/amy@gmail.com a/Jurong West")
            .unwrap();
        assert!(result.feedback.starts_with("New person added: Amy Bee"));

        let reloaded = Storage::new(dir.path().join("addressbook.json"))
            .load()
            .unwrap();
        assert_eq!(reloaded.persons().len(), 1);
    }

    #[test]
    fn test_execute_reports_parse_and_command_errors() {
        let dir = TempDir::new().unwrap();
        let mut logic = logic(&dir);

        assert!(matches!(
            logic.execute("bogus"),
            Err(LogicError::Parse(ParseError::UnknownCommand))
        ));
        assert!(matches!(
            logic.execute("delete 1"),
            Err(LogicError::Command(CommandError::InvalidPersonIndex))
        ));
    }

    #[test]
    fn test_failed_save_reverts_change() {
        let dir = TempDir::new().unwrap();
        // A directory where the data file should be makes every save fail
        let blocked = dir.path().join("blocked");
        std::fs::create_dir_all(&blocked).unwrap();
        let mut logic = Logic::new(ModelManager::default(), Storage::new(&blocked));

        let err = logic
            .execute("add n/Amy Bee p/85355255 e/amy@gmail.com a/Jurong West")
            .unwrap_err();
        assert!(matches!(err, LogicError::Storage(_)));
        assert!(logic.model().persons().is_empty());
    }
}
