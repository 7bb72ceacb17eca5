use crate::error::CommandError;
use crate::filter::PersonFilter;
use crate::messages::persons_listed;
use crate::model::Model;

use super::CommandResult;

/// Narrows the displayed list to persons matching a filter
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FindCommand {
    filter: PersonFilter,
}

impl FindCommand {
    pub const WORD: &'static str = "find";
    pub const USAGE: &'static str = "find: Finds all persons whose names contain any of \
the specified keywords (case-insensitive), optionally restricted to the given statuses and tags, \
and displays them as a list with index numbers.\n\
Parameters: [KEYWORD]... [s/STATUS]... [t/TAG]...\n\
Example: find alice bob s/PENDING";

    pub fn new(filter: PersonFilter) -> Self {
        Self { filter }
    }

    pub fn filter(&self) -> &PersonFilter {
        &self.filter
    }

    pub fn execute(self, model: &mut dyn Model) -> Result<CommandResult, CommandError> {
        model.update_filter(self.filter);
        let count = model.filtered_persons().len();
        Ok(CommandResult::new(persons_listed(count)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fields::Status;
    use crate::model::ModelManager;
    use crate::person::test_support::PersonBuilder;

    #[test]
    fn test_find_counts_matches() {
        let mut model = ModelManager::default();
        model.add_person(PersonBuilder::new().name("Alice Pauline").phone("111").email("a@example.com").build());
        model.add_person(
            PersonBuilder::new()
                .name("Alice Kurz")
                .phone("222")
                .email("b@example.com")
                .status(Some("COMPLETED"))
                .build(),
        );
        model.add_person(PersonBuilder::new().name("Carl").phone("333").email("c@example.com").build());

        let by_name = FindCommand::new(PersonFilter {
            keywords: vec!["alice".into()],
            ..Default::default()
        });
        assert_eq!(by_name.execute(&mut model).unwrap().feedback, "2 persons listed!");

        let by_name_and_status = FindCommand::new(PersonFilter {
            keywords: vec!["alice".into()],
            statuses: [Status::Completed].into_iter().collect(),
            ..Default::default()
        });
        assert_eq!(
            by_name_and_status.execute(&mut model).unwrap().feedback,
            "1 persons listed!"
        );
        assert_eq!(model.filtered_persons()[0].name().as_str(), "Alice Kurz");
    }
}
