//! Cross-record checks run before a person is written to the book.

use log::debug;

use crate::error::CommandError;
use crate::model::Model;
use crate::person::Person;

/// Outcome of comparing a candidate against the stored persons
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Conflict {
    NoConflict,
    PhoneConflict,
    EmailConflict,
}

impl Conflict {
    pub fn into_result(self) -> Result<(), CommandError> {
        match self {
            Conflict::NoConflict => Ok(()),
            Conflict::PhoneConflict => Err(CommandError::DuplicatePhone),
            Conflict::EmailConflict => Err(CommandError::DuplicateEmail),
        }
    }
}

/// Looks for a stored person sharing the candidate's phone, then its email.
///
/// `exclude` is the person being replaced by an edit; it never conflicts with
/// its own replacement. Names play no part in the decision.
pub fn check_conflict<M: Model + ?Sized>(
    model: &M,
    candidate: &Person,
    exclude: Option<&Person>,
) -> Conflict {
    let conflict = match exclude {
        None => {
            if model.has_same_phone(candidate) {
                Conflict::PhoneConflict
            } else if model.has_same_email(candidate) {
                Conflict::EmailConflict
            } else {
                Conflict::NoConflict
            }
        }
        Some(excluded) => {
            let others = move || model.persons().iter().filter(move |p| *p != excluded);
            if others().any(|p| p.is_same_phone(candidate)) {
                Conflict::PhoneConflict
            } else if others().any(|p| p.is_same_email(candidate)) {
                Conflict::EmailConflict
            } else {
                Conflict::NoConflict
            }
        }
    };
    debug!("conflict check for {}: {:?}", candidate.name(), conflict);
    conflict
}

/// Every grouped tag on `person` must name a registered tag group
pub fn check_tag_groups<M: Model + ?Sized>(model: &M, person: &Person) -> Result<(), CommandError> {
    for tag in person.tags() {
        if let Some(group) = tag.group() {
            if !model.tag_groups().iter().any(|g| g.as_str() == group) {
                return Err(CommandError::UnknownTagGroup { tag: tag.clone() });
            }
        }
    }
    Ok(())
}

/// Runs the conflict check and then the tag-group check
pub fn validate_person<M: Model + ?Sized>(
    model: &M,
    candidate: &Person,
    exclude: Option<&Person>,
) -> Result<(), CommandError> {
    check_conflict(model, candidate, exclude).into_result()?;
    check_tag_groups(model, candidate)
}
