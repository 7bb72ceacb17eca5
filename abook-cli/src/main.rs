mod cli;
mod prompts;

use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;
use inquire::{InquireError, Text};
use log::debug;
use std::path::Path;

use abook_core::messages::format_person;
use abook_core::{
    determine_address_book_path, get_prefs_path, parse_command, parse_index, parse_roles,
    parse_statuses, parse_tag_groups, parse_tags, AddCommand, Command, DeleteCommand, EditCommand,
    EditPersonDescriptor, FindCommand, Logic, ParseError, Person, PersonFilter, Preferences,
    Storage, TagGroupCommand,
};

use crate::cli::{Cli, Command as CliCommand, PrefsCommand, TagGroupCommand as CliTagGroup};

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();

    // Preferences never touch the address book itself
    if let Some(CliCommand::Prefs(prefs_command)) = &cli.command {
        return run_prefs(prefs_command);
    }

    let path = determine_address_book_path(cli.file.as_deref())?;
    debug!("using address book {:?}", path);
    let mut logic = Logic::load(Storage::new(&path))
        .with_context(|| format!("Failed to open address book {:?}", path))?;

    match cli.command {
        None | Some(CliCommand::Shell) => run_shell(&mut logic),
        Some(command) => {
            let Some(command) = build_command(command)? else {
                return Ok(());
            };
            execute(&mut logic, command)?;
            Ok(())
        }
    }
}

/// Translates clap arguments into a core command; `None` when the user backs out
fn build_command(command: CliCommand) -> Result<Option<Command>> {
    let command = match command {
        CliCommand::Add {
            name,
            phone,
            email,
            address,
            roles,
            tags,
            status,
            interactive,
        } => {
            let person = if interactive || (name.is_none() && phone.is_none()) {
                prompts::prompt_new_person()?
            } else {
                Person::new(
                    name.context("--name is required")?.parse()?,
                    phone.context("--phone is required")?.parse()?,
                    email.context("--email is required")?.parse()?,
                    address.context("--address is required")?.parse()?,
                )
                .with_roles(parse_roles(&roles)?)
                .with_tags(parse_tags(&tags)?)
                .with_status(status.as_deref().map(str::parse).transpose()?)
            };
            Command::Add(AddCommand::new(person))
        }
        CliCommand::Edit {
            index,
            name,
            phone,
            email,
            address,
            roles,
            clear_roles,
            tags,
            clear_tags,
            status,
            clear_status,
        } => {
            let descriptor = EditPersonDescriptor {
                name: name.as_deref().map(str::parse).transpose()?,
                phone: phone.as_deref().map(str::parse).transpose()?,
                email: email.as_deref().map(str::parse).transpose()?,
                address: address.as_deref().map(str::parse).transpose()?,
                roles: if clear_roles || !roles.is_empty() {
                    Some(parse_roles(&roles)?)
                } else {
                    None
                },
                tags: if clear_tags || !tags.is_empty() {
                    Some(parse_tags(&tags)?)
                } else {
                    None
                },
                status: if clear_status {
                    Some(None)
                } else {
                    status.as_deref().map(str::parse).transpose()?.map(Some)
                },
            };
            if !descriptor.is_any_field_edited() {
                return Err(ParseError::NoFieldEdited.into());
            }
            Command::Edit(EditCommand::new(parse_index(&index)?, descriptor))
        }
        CliCommand::Delete { index, yes } => {
            let delete = DeleteCommand::new(parse_index(&index)?);
            if !confirm_delete(&delete, yes)? {
                return Ok(None);
            }
            Command::Delete(delete)
        }
        CliCommand::Find {
            keywords,
            statuses,
            tags,
        } => {
            let filter = PersonFilter {
                keywords,
                statuses: parse_statuses(&statuses)?,
                tags: parse_tags(&tags)?,
            };
            if filter.is_unrestricted() {
                anyhow::bail!("Give at least one keyword, --status or --tag");
            }
            Command::Find(FindCommand::new(filter))
        }
        CliCommand::List => Command::List,
        CliCommand::Clear { yes } => {
            if !prompts::confirm("Delete every person in the address book?", yes)? {
                println!("{}", "Clear cancelled.".yellow());
                return Ok(None);
            }
            Command::Clear
        }
        CliCommand::TagGroup(tag_group) => Command::TagGroup(match tag_group {
            CliTagGroup::Add { names } => TagGroupCommand::Add(parse_tag_groups(&names)?),
            CliTagGroup::Remove { name } => TagGroupCommand::Remove(name.parse()?),
            CliTagGroup::List => TagGroupCommand::List,
        }),
        // Handled by the caller
        CliCommand::Shell | CliCommand::Prefs(_) => return Ok(None),
    };
    Ok(Some(command))
}

fn confirm_delete(delete: &DeleteCommand, skip: bool) -> Result<bool> {
    let message = format!("Delete person {}?", delete.index().one_based());
    let confirmed = prompts::confirm(&message, skip)?;
    if !confirmed {
        println!("{}", "Deletion cancelled.".yellow());
    }
    Ok(confirmed)
}

/// Runs `command`, prints its feedback and the list if it changed what is shown.
/// Returns whether the shell should stop.
fn execute(logic: &mut Logic, command: Command) -> Result<bool> {
    let shows_list = matches!(command, Command::List | Command::Find(_));
    let result = logic.run(command)?;

    println!("{}", result.feedback.green());
    if shows_list {
        print_persons(logic);
    }
    Ok(result.exit)
}

fn print_persons(logic: &Logic) {
    let persons = logic.filtered_persons();
    if persons.is_empty() {
        println!("{}", "No persons found.".yellow());
        return;
    }
    for (i, person) in persons.iter().enumerate() {
        println!("{}. {}", (i + 1).to_string().blue(), format_person(person));
    }
}

fn run_shell(logic: &mut Logic) -> Result<()> {
    println!("{} {}", "Address book:".blue(), logic.storage().path().display());
    println!("Type 'help' for the list of commands, 'exit' to leave.");

    loop {
        let line = match Text::new(">").prompt() {
            Ok(line) => line,
            Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => break,
            Err(e) => return Err(e.into()),
        };
        if line.trim().is_empty() {
            continue;
        }

        let command = match parse_command(&line) {
            Ok(command) => command,
            Err(e) => {
                println!("{}", e.to_string().red());
                continue;
            }
        };
        let confirmed = match &command {
            Command::Delete(delete) => confirm_delete(delete, false)?,
            Command::Clear => {
                let confirmed = prompts::confirm("Delete every person in the address book?", false)?;
                if !confirmed {
                    println!("{}", "Clear cancelled.".yellow());
                }
                confirmed
            }
            _ => true,
        };
        if !confirmed {
            continue;
        }

        match execute(logic, command) {
            Ok(true) => break,
            Ok(false) => {}
            Err(e) => println!("{}", format!("{:#}", e).red()),
        }
    }
    Ok(())
}

fn run_prefs(command: &PrefsCommand) -> Result<()> {
    let prefs_path = get_prefs_path()?;
    match command {
        PrefsCommand::Show => {
            println!("{}: {}", "Preferences".blue(), prefs_path.display());
            let book = determine_address_book_path(None)?;
            println!("{}: {}", "Address book".blue(), book.display());
        }
        PrefsCommand::SetFile { path } => {
            let path = absolute(path)?;
            Preferences::new(&path).save(&prefs_path)?;
            println!(
                "{} {}",
                "Default address book set to".green(),
                path.display()
            );
        }
    }
    Ok(())
}

fn absolute(path: &Path) -> Result<std::path::PathBuf> {
    if path.is_absolute() {
        return Ok(path.to_path_buf());
    }
    let cwd = std::env::current_dir().context("Failed to determine current directory")?;
    Ok(cwd.join(path))
}
