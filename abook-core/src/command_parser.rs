//! Turns one line of user text into a [`Command`].
//!
//! Arguments use short prefixes (`n/NAME p/PHONE ...`). A prefix is only
//! recognised when it follows whitespace, so `a/b` inside an address value is
//! left alone unless preceded by a space.

use log::debug;
use std::collections::HashMap;

use crate::commands::{
    AddCommand, Command, DeleteCommand, EditCommand, EditPersonDescriptor, FindCommand,
    TagGroupCommand,
};
use crate::error::ParseError;
use crate::fields::Status;
use crate::filter::PersonFilter;
use crate::parser::{parse_index, parse_roles, parse_statuses, parse_tag_groups, parse_tags};
use crate::person::Person;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Prefix(&'static str);

impl Prefix {
    pub fn as_str(&self) -> &'static str {
        self.0
    }
}

pub const PREFIX_NAME: Prefix = Prefix("n/");
pub const PREFIX_PHONE: Prefix = Prefix("p/");
pub const PREFIX_EMAIL: Prefix = Prefix("e/");
pub const PREFIX_ADDRESS: Prefix = Prefix("a/");
pub const PREFIX_ROLE: Prefix = Prefix("r/");
pub const PREFIX_TAG: Prefix = Prefix("t/");
pub const PREFIX_STATUS: Prefix = Prefix("s/");

/// Values found for each prefix, in the order they appeared
#[derive(Debug, Default)]
pub struct ArgumentMultimap {
    preamble: String,
    values: HashMap<Prefix, Vec<String>>,
}

impl ArgumentMultimap {
    /// Text before the first prefix
    pub fn preamble(&self) -> &str {
        &self.preamble
    }

    /// The last value given for `prefix`
    pub fn value(&self, prefix: Prefix) -> Option<&str> {
        self.values
            .get(&prefix)
            .and_then(|v| v.last())
            .map(String::as_str)
    }

    pub fn all_values(&self, prefix: Prefix) -> &[String] {
        self.values.get(&prefix).map_or(&[], Vec::as_slice)
    }

    pub fn is_present(&self, prefix: Prefix) -> bool {
        self.values.contains_key(&prefix)
    }

    /// Fails if any of `prefixes` was given more than once
    pub fn verify_no_duplicate_prefixes(&self, prefixes: &[Prefix]) -> Result<(), ParseError> {
        let duplicated: Vec<&str> = prefixes
            .iter()
            .filter(|p| self.all_values(**p).len() > 1)
            .map(Prefix::as_str)
            .collect();
        if duplicated.is_empty() {
            Ok(())
        } else {
            Err(ParseError::DuplicatePrefixes(duplicated.join(" ")))
        }
    }
}

/// Splits `args` on the given prefixes
pub fn tokenize(args: &str, prefixes: &[Prefix]) -> ArgumentMultimap {
    let padded = format!(" {}", args);

    let mut positions: Vec<(usize, Prefix)> = Vec::new();
    for &prefix in prefixes {
        let needle = format!(" {}", prefix.as_str());
        let mut from = 0;
        while let Some(offset) = padded[from..].find(&needle) {
            let start = from + offset + 1;
            positions.push((start, prefix));
            from = start;
        }
    }
    positions.sort_by_key(|(start, _)| *start);

    let mut map = ArgumentMultimap {
        preamble: padded[..positions.first().map_or(padded.len(), |(start, _)| *start)]
            .trim()
            .to_string(),
        values: HashMap::new(),
    };

    for (i, (start, prefix)) in positions.iter().enumerate() {
        let value_start = start + prefix.as_str().len();
        let value_end = positions.get(i + 1).map_or(padded.len(), |(next, _)| *next);
        map.values
            .entry(*prefix)
            .or_default()
            .push(padded[value_start..value_end].trim().to_string());
    }

    map
}

/// Parses a full command line
pub fn parse_command(input: &str) -> Result<Command, ParseError> {
    let trimmed = input.trim();
    let (word, args) = match trimmed.split_once(char::is_whitespace) {
        Some((word, args)) => (word, args),
        None => (trimmed, ""),
    };
    debug!("parsing command word {:?}", word);

    match word {
        "" => Err(ParseError::InvalidCommandFormat {
            usage: "Type 'help' to see the available commands.",
        }),
        AddCommand::WORD => parse_add(args),
        EditCommand::WORD => parse_edit(args),
        DeleteCommand::WORD => parse_delete(args),
        FindCommand::WORD => parse_find(args),
        TagGroupCommand::WORD => parse_tag_group(args),
        "list" => Ok(Command::List),
        "clear" => Ok(Command::Clear),
        "help" => Ok(Command::Help),
        "exit" => Ok(Command::Exit),
        _ => Err(ParseError::UnknownCommand),
    }
}

fn parse_add(args: &str) -> Result<Command, ParseError> {
    let map = tokenize(
        args,
        &[
            PREFIX_NAME,
            PREFIX_PHONE,
            PREFIX_EMAIL,
            PREFIX_ADDRESS,
            PREFIX_ROLE,
            PREFIX_TAG,
            PREFIX_STATUS,
        ],
    );

    let required = [PREFIX_NAME, PREFIX_PHONE, PREFIX_EMAIL, PREFIX_ADDRESS];
    if !map.preamble().is_empty() || !required.iter().all(|p| map.is_present(*p)) {
        return Err(ParseError::InvalidCommandFormat {
            usage: AddCommand::USAGE,
        });
    }
    map.verify_no_duplicate_prefixes(&[
        PREFIX_NAME,
        PREFIX_PHONE,
        PREFIX_EMAIL,
        PREFIX_ADDRESS,
        PREFIX_STATUS,
    ])?;

    // Presence was checked above
    let field = |prefix| map.value(prefix).unwrap_or_default();
    let person = Person::new(
        field(PREFIX_NAME).parse()?,
        field(PREFIX_PHONE).parse()?,
        field(PREFIX_EMAIL).parse()?,
        field(PREFIX_ADDRESS).parse()?,
    )
    .with_roles(parse_roles(map.all_values(PREFIX_ROLE))?)
    .with_tags(parse_tags(map.all_values(PREFIX_TAG))?)
    .with_status(map.value(PREFIX_STATUS).map(str::parse::<Status>).transpose()?);

    Ok(Command::Add(AddCommand::new(person)))
}

fn parse_edit(args: &str) -> Result<Command, ParseError> {
    let map = tokenize(
        args,
        &[
            PREFIX_NAME,
            PREFIX_PHONE,
            PREFIX_EMAIL,
            PREFIX_ADDRESS,
            PREFIX_ROLE,
            PREFIX_TAG,
            PREFIX_STATUS,
        ],
    );

    let index = parse_index(map.preamble()).map_err(|_| ParseError::InvalidCommandFormat {
        usage: EditCommand::USAGE,
    })?;
    map.verify_no_duplicate_prefixes(&[
        PREFIX_NAME,
        PREFIX_PHONE,
        PREFIX_EMAIL,
        PREFIX_ADDRESS,
        PREFIX_STATUS,
    ])?;

    let mut descriptor = EditPersonDescriptor {
        name: map.value(PREFIX_NAME).map(str::parse).transpose()?,
        phone: map.value(PREFIX_PHONE).map(str::parse).transpose()?,
        email: map.value(PREFIX_EMAIL).map(str::parse).transpose()?,
        address: map.value(PREFIX_ADDRESS).map(str::parse).transpose()?,
        ..Default::default()
    };

    if map.is_present(PREFIX_ROLE) {
        descriptor.roles = Some(parse_roles(non_empty(map.all_values(PREFIX_ROLE)))?);
    }
    if map.is_present(PREFIX_TAG) {
        descriptor.tags = Some(parse_tags(non_empty(map.all_values(PREFIX_TAG)))?);
    }
    if let Some(raw) = map.value(PREFIX_STATUS) {
        descriptor.status = Some(if raw.is_empty() {
            None
        } else {
            Some(raw.parse()?)
        });
    }

    if !descriptor.is_any_field_edited() {
        return Err(ParseError::NoFieldEdited);
    }
    Ok(Command::Edit(EditCommand::new(index, descriptor)))
}

/// A lone empty value (`t/`) means "clear the set"
fn non_empty(values: &[String]) -> &[String] {
    if values.len() == 1 && values[0].is_empty() {
        &[]
    } else {
        values
    }
}

fn parse_delete(args: &str) -> Result<Command, ParseError> {
    let index = parse_index(args).map_err(|_| ParseError::InvalidCommandFormat {
        usage: DeleteCommand::USAGE,
    })?;
    Ok(Command::Delete(DeleteCommand::new(index)))
}

fn parse_find(args: &str) -> Result<Command, ParseError> {
    let map = tokenize(args, &[PREFIX_STATUS, PREFIX_TAG]);
    let filter = PersonFilter {
        keywords: map
            .preamble()
            .split_whitespace()
            .map(str::to_string)
            .collect(),
        statuses: parse_statuses(map.all_values(PREFIX_STATUS))?,
        tags: parse_tags(map.all_values(PREFIX_TAG))?,
    };

    if filter.is_unrestricted() {
        return Err(ParseError::InvalidCommandFormat {
            usage: FindCommand::USAGE,
        });
    }
    Ok(Command::Find(FindCommand::new(filter)))
}

fn parse_tag_group(args: &str) -> Result<Command, ParseError> {
    let mut words = args.split_whitespace();
    let invalid = ParseError::InvalidCommandFormat {
        usage: TagGroupCommand::USAGE,
    };

    match words.next() {
        Some("add") => {
            let names: Vec<&str> = words.collect();
            if names.is_empty() {
                return Err(invalid);
            }
            Ok(Command::TagGroup(TagGroupCommand::Add(parse_tag_groups(&names)?)))
        }
        Some("remove") => match (words.next(), words.next()) {
            (Some(name), None) => Ok(Command::TagGroup(TagGroupCommand::Remove(name.parse()?))),
            _ => Err(invalid),
        },
        Some("list") if words.next().is_none() => Ok(Command::TagGroup(TagGroupCommand::List)),
        _ => Err(invalid),
    }
}
