//! User-facing text shared by several commands.

use std::fmt::Write;

use crate::person::Person;

pub const MESSAGE_PERSONS_LISTED_OVERVIEW: &str = "persons listed!";

/// One-line summary of a person.
///
/// Roles, tags and status only appear when the person has them.
pub fn format_person(person: &Person) -> String {
    let mut out = format!(
        "{}; Phone: {}; Email: {}; Address: {}",
        person.name(),
        person.phone(),
        person.email(),
        person.address()
    );

    if !person.roles().is_empty() {
        let roles: Vec<&str> = person.roles().iter().map(|r| r.as_str()).collect();
        let _ = write!(out, "; Roles: {}", roles.join(", "));
    }

    if !person.tags().is_empty() {
        let tags: String = person.tags().iter().map(|t| format!("[{}]", t)).collect();
        let _ = write!(out, "; Tags: {}", tags);
    }

    if let Some(status) = person.status() {
        let _ = write!(out, "; Status: {}", status);
    }

    out
}

pub fn persons_listed(count: usize) -> String {
    format!("{} {}", count, MESSAGE_PERSONS_LISTED_OVERVIEW)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::person::test_support::PersonBuilder;

    #[test]
    fn test_format_person_full() {
        let person = PersonBuilder::new()
            .name("Alice Pauline")
            .roles(&["Seller", "Buyer"])
            .tags(&["friends.alice", "premium"])
            .build();

        assert_eq!(
            format_person(&person),
            "Alice Pauline; Phone: 85355255; Email: amy@gmail.com; \
Address: 123, Jurong West Ave 6, #08-111; Roles: Buyer, Seller; \
Tags: [friends.alice][premium]; Status: PENDING"
        );
    }

    #[test]
    fn test_format_person_omits_empty_sections() {
        let person = PersonBuilder::new().status(None).build();
        let text = format_person(&person);

        assert!(!text.contains("Roles:"));
        assert!(!text.contains("Tags:"));
        assert!(!text.contains("Status:"));
    }
}
