use std::collections::BTreeSet;

use crate::error::CommandError;
use crate::fields::TagGroup;
use crate::model::Model;

use super::CommandResult;

/// Registers, removes or lists tag groups
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TagGroupCommand {
    Add(BTreeSet<TagGroup>),
    Remove(TagGroup),
    List,
}

impl TagGroupCommand {
    pub const WORD: &'static str = "taggroup";
    pub const USAGE: &'static str = "taggroup: Manages the groups that grouped tags (GROUP.VALUE) \
must belong to.\n\
Parameters: add GROUP... | remove GROUP | list\n\
Example: taggroup add friends work";

    pub fn is_mutating(&self) -> bool {
        !matches!(self, TagGroupCommand::List)
    }

    pub fn execute(self, model: &mut dyn Model) -> Result<CommandResult, CommandError> {
        match self {
            TagGroupCommand::Add(groups) => {
                // All or nothing: reject before registering any of them
                if let Some(existing) = groups.iter().find(|g| model.has_tag_group(g)) {
                    return Err(CommandError::DuplicateTagGroup(existing.clone()));
                }
                let names = join(&groups);
                for group in groups {
                    model.add_tag_group(group);
                }
                Ok(CommandResult::new(format!("New tag group(s) added: {}", names)))
            }
            TagGroupCommand::Remove(group) => {
                if !model.has_tag_group(&group) {
                    return Err(CommandError::TagGroupNotFound(group));
                }
                if model.is_tag_group_in_use(&group) {
                    return Err(CommandError::TagGroupInUse(group));
                }
                model.remove_tag_group(&group);
                Ok(CommandResult::new(format!("Tag group removed: {}", group)))
            }
            TagGroupCommand::List => {
                let groups = model.tag_groups();
                if groups.is_empty() {
                    Ok(CommandResult::new("No tag groups registered"))
                } else {
                    Ok(CommandResult::new(format!("Tag groups: {}", join(groups))))
                }
            }
        }
    }
}

fn join(groups: &BTreeSet<TagGroup>) -> String {
    groups
        .iter()
        .map(TagGroup::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}
