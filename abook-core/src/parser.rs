//! Positional index parsing and the set builders for multi-valued fields.
//!
//! Roles and tags differ in how they treat repeats: a role that
//! matches an earlier one (ignoring case) rejects the whole list, while a
//! repeated tag, status or tag group is simply absorbed by the set.

use log::debug;
use std::collections::BTreeSet;

use crate::error::ParseError;
use crate::fields::{Role, Status, Tag, TagGroup};

/// A position in the displayed person list, stored zero-based
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Index(usize);

impl Index {
    /// Panics on zero; use `parse_index` for user input
    pub fn from_one_based(one_based: usize) -> Self {
        assert!(one_based > 0, "one-based index must be positive");
        Self(one_based - 1)
    }

    pub fn zero_based(&self) -> usize {
        self.0
    }

    pub fn one_based(&self) -> usize {
        self.0 + 1
    }
}

/// Parses a one-based index, ignoring surrounding whitespace.
///
/// Only plain decimal digits are accepted and the value must fit in an `i32`;
/// zero, signs and trailing text are all rejected.
pub fn parse_index(one_based_index: &str) -> Result<Index, ParseError> {
    let trimmed = one_based_index.trim();
    if trimmed.is_empty() || !trimmed.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ParseError::InvalidIndex);
    }
    match trimmed.parse::<i32>() {
        Ok(value) if value > 0 => Ok(Index::from_one_based(value as usize)),
        _ => Err(ParseError::InvalidIndex),
    }
}

/// Fails if `new_role` matches any role in `roles`, ignoring case
pub fn validate_no_duplicate_role<'a, I>(roles: I, new_role: &Role) -> Result<(), ParseError>
where
    I: IntoIterator<Item = &'a Role>,
{
    match roles
        .into_iter()
        .find(|existing| existing.is_same_role_ignore_case(new_role))
    {
        Some(existing) => Err(ParseError::DuplicateRole {
            existing: existing.clone(),
            offending: new_role.clone(),
        }),
        None => Ok(()),
    }
}

/// Parses every raw role, rejecting the list at the first case-insensitive repeat
pub fn parse_roles<S: AsRef<str>>(raw_roles: &[S]) -> Result<BTreeSet<Role>, ParseError> {
    let mut roles = BTreeSet::new();
    for raw in raw_roles {
        let role: Role = raw.as_ref().parse()?;
        validate_no_duplicate_role(&roles, &role)?;
        roles.insert(role);
    }
    debug!("parsed {} role(s)", roles.len());
    Ok(roles)
}

/// Parses every raw tag; exact repeats collapse into one
pub fn parse_tags<S: AsRef<str>>(raw_tags: &[S]) -> Result<BTreeSet<Tag>, ParseError> {
    raw_tags.iter().map(|raw| raw.as_ref().parse()).collect()
}

/// Parses every raw status; repeats collapse into one
pub fn parse_statuses<S: AsRef<str>>(raw_statuses: &[S]) -> Result<BTreeSet<Status>, ParseError> {
    raw_statuses.iter().map(|raw| raw.as_ref().parse()).collect()
}

pub fn parse_tag_groups<S: AsRef<str>>(raw_groups: &[S]) -> Result<BTreeSet<TagGroup>, ParseError> {
    raw_groups.iter().map(|raw| raw.as_ref().parse()).collect()
}
