use anyhow::Result;
use colored::Colorize;
use inquire::{Confirm, Select, Text};
use std::str::FromStr;

use abook_core::{parse_roles, parse_tags, ParseError, Person, Status};

/// Asks until the answer parses
fn prompt_field<T>(label: &str) -> Result<T>
where
    T: FromStr<Err = ParseError>,
{
    loop {
        let raw = Text::new(label).prompt()?;
        match raw.parse() {
            Ok(value) => return Ok(value),
            Err(e) => println!("{}", e.to_string().red()),
        }
    }
}

fn split_list(raw: &str) -> Vec<&str> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect()
}

/// Prompts the user for a new person
pub fn prompt_new_person() -> Result<Person> {
    let name = prompt_field("Name:")?;
    let phone = prompt_field("Phone:")?;
    let email = prompt_field("Email:")?;
    let address = prompt_field("Address:")?;

    let roles = loop {
        let raw = Text::new("Roles (comma separated, optional):").prompt()?;
        match parse_roles(&split_list(&raw)) {
            Ok(roles) => break roles,
            Err(e) => println!("{}", e.to_string().red()),
        }
    };

    let tags = loop {
        let raw = Text::new("Tags (comma separated, optional):").prompt()?;
        match parse_tags(&split_list(&raw)) {
            Ok(tags) => break tags,
            Err(e) => println!("{}", e.to_string().red()),
        }
    };

    let mut status_options = vec!["(none)".to_string()];
    status_options.extend(Status::ALL.iter().map(|s| s.to_string()));
    let status = Select::new("Status:", status_options).prompt()?;
    let status = Status::from_str(&status).ok();

    Ok(Person::new(name, phone, email, address)
        .with_roles(roles)
        .with_tags(tags)
        .with_status(status))
}

/// Asks for confirmation unless `skip` is set
pub fn confirm(message: &str, skip: bool) -> Result<bool> {
    if skip {
        return Ok(true);
    }
    Ok(Confirm::new(message).with_default(false).prompt()?)
}
