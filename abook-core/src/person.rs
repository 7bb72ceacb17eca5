use std::collections::BTreeSet;

use crate::fields::{Address, Email, Name, Phone, Role, Status, Tag, TagGroup};

/// A contact in the address book.
///
/// Identity in the book is carried by the phone and the email: two persons may
/// share a name, but never a phone number or an email address.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Person {
    name: Name,
    phone: Phone,
    email: Email,
    address: Address,
    roles: BTreeSet<Role>,
    tags: BTreeSet<Tag>,
    status: Option<Status>,
}

impl Person {
    /// Creates a person with no roles, no tags and no status
    pub fn new(name: Name, phone: Phone, email: Email, address: Address) -> Self {
        Self {
            name,
            phone,
            email,
            address,
            roles: BTreeSet::new(),
            tags: BTreeSet::new(),
            status: None,
        }
    }

    /// Replaces the role set
    pub fn with_roles(mut self, roles: BTreeSet<Role>) -> Self {
        self.roles = roles;
        self
    }

    /// Replaces the tag set
    pub fn with_tags(mut self, tags: BTreeSet<Tag>) -> Self {
        self.tags = tags;
        self
    }

    /// Sets or clears the status
    pub fn with_status(mut self, status: Option<Status>) -> Self {
        self.status = status;
        self
    }

    /// Returns the name
    pub fn name(&self) -> &Name {
        &self.name
    }

    /// Returns the phone number
    pub fn phone(&self) -> &Phone {
        &self.phone
    }

    /// Returns the email address
    pub fn email(&self) -> &Email {
        &self.email
    }

    /// Returns the address
    pub fn address(&self) -> &Address {
        &self.address
    }

    /// Returns the roles, ordered ignoring case
    pub fn roles(&self) -> &BTreeSet<Role> {
        &self.roles
    }

    /// Returns the tags in sorted order
    pub fn tags(&self) -> &BTreeSet<Tag> {
        &self.tags
    }

    /// Returns the status, if one is set
    pub fn status(&self) -> Option<Status> {
        self.status
    }

    /// Returns true if both persons have exactly the same phone number
    pub fn is_same_phone(&self, other: &Person) -> bool {
        self.phone == other.phone
    }

    /// Returns true if both persons have exactly the same email (case-sensitive)
    pub fn is_same_email(&self, other: &Person) -> bool {
        self.email == other.email
    }

    /// Returns true if any tag is namespaced under `group`
    pub fn uses_tag_group(&self, group: &TagGroup) -> bool {
        self.tags.iter().any(|tag| tag.belongs_to(group))
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;

    /// Builds persons from raw strings, defaulting every field to a valid value
    pub struct PersonBuilder {
        name: String,
        phone: String,
        email: String,
        address: String,
        roles: Vec<String>,
        tags: Vec<String>,
        status: Option<String>,
    }

    impl Default for PersonBuilder {
        fn default() -> Self {
            Self {
                name: "Amy Bee".into(),
                phone: "85355255".into(),
                email: "amy@gmail.com".into(),
                address: "123, Jurong West Ave 6, #08-111".into(),
                roles: Vec::new(),
                tags: Vec::new(),
                status: Some("PENDING".into()),
            }
        }
    }

    impl PersonBuilder {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn name(mut self, name: &str) -> Self {
            self.name = name.into();
            self
        }

        pub fn phone(mut self, phone: &str) -> Self {
            self.phone = phone.into();
            self
        }

        pub fn email(mut self, email: &str) -> Self {
            self.email = email.into();
            self
        }

        pub fn roles(mut self, roles: &[&str]) -> Self {
            self.roles = roles.iter().map(|r| r.to_string()).collect();
            self
        }

        pub fn tags(mut self, tags: &[&str]) -> Self {
            self.tags = tags.iter().map(|t| t.to_string()).collect();
            self
        }

        pub fn status(mut self, status: Option<&str>) -> Self {
            self.status = status.map(str::to_string);
            self
        }

        pub fn build(self) -> Person {
            Person::new(
                self.name.parse().unwrap(),
                self.phone.parse().unwrap(),
                self.email.parse().unwrap(),
                self.address.parse().unwrap(),
            )
            .with_roles(self.roles.iter().map(|r| r.parse().unwrap()).collect())
            .with_tags(self.tags.iter().map(|t| t.parse().unwrap()).collect())
            .with_status(self.status.map(|s| s.parse().unwrap()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::test_support::PersonBuilder;

    #[test]
    fn test_same_phone_and_email_ignore_name() {
        let alice = PersonBuilder::new().name("Alice").phone("12345678").build();
        let bob = PersonBuilder::new()
            .name("Bob")
            .phone("12345678")
            .email("bob@example.com")
            .build();

        assert!(alice.is_same_phone(&bob));
        assert!(!alice.is_same_email(&bob));
    }

    #[test]
    fn test_uses_tag_group() {
        let person = PersonBuilder::new().tags(&["friends.alice", "urgent"]).build();

        assert!(person.uses_tag_group(&"friends".parse().unwrap()));
        assert!(!person.uses_tag_group(&"urgent".parse().unwrap()));
    }
}
