//! The in-memory address book and the capability interface commands run against.

use log::info;
use std::collections::BTreeSet;

use crate::fields::TagGroup;
use crate::filter::PersonFilter;
use crate::person::Person;

/// Ordered persons plus the registered tag groups; the unit that gets persisted
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AddressBook {
    persons: Vec<Person>,
    tag_groups: BTreeSet<TagGroup>,
}

impl AddressBook {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn persons(&self) -> &[Person] {
        &self.persons
    }

    pub fn tag_groups(&self) -> &BTreeSet<TagGroup> {
        &self.tag_groups
    }

    pub fn add_person(&mut self, person: Person) {
        self.persons.push(person);
    }

    /// Replaces `target` in place, keeping its position
    pub fn set_person(&mut self, target: &Person, edited: Person) -> bool {
        match self.persons.iter().position(|p| p == target) {
            Some(pos) => {
                self.persons[pos] = edited;
                true
            }
            None => false,
        }
    }

    pub fn remove_person(&mut self, target: &Person) -> bool {
        let original_len = self.persons.len();
        self.persons.retain(|p| p != target);
        self.persons.len() != original_len
    }

    pub fn clear_persons(&mut self) {
        self.persons.clear();
    }

    pub fn add_tag_group(&mut self, group: TagGroup) -> bool {
        self.tag_groups.insert(group)
    }

    pub fn remove_tag_group(&mut self, group: &TagGroup) -> bool {
        self.tag_groups.remove(group)
    }
}

/// Store operations available to commands.
///
/// `ModelManager` is the production implementation; tests substitute their own
/// fakes. The provided methods derive the duplicate and tag-group queries from
/// `persons` and `tag_groups`.
pub trait Model {
    fn address_book(&self) -> &AddressBook;

    fn set_address_book(&mut self, book: AddressBook);

    fn persons(&self) -> &[Person] {
        self.address_book().persons()
    }

    fn has_same_phone(&self, person: &Person) -> bool {
        self.persons().iter().any(|p| p.is_same_phone(person))
    }

    fn has_same_email(&self, person: &Person) -> bool {
        self.persons().iter().any(|p| p.is_same_email(person))
    }

    fn add_person(&mut self, person: Person);

    fn set_person(&mut self, target: &Person, edited: Person);

    fn delete_person(&mut self, target: &Person);

    fn clear_persons(&mut self);

    /// Persons passing the current filter, in book order
    fn filtered_persons(&self) -> Vec<&Person>;

    fn update_filter(&mut self, filter: PersonFilter);

    fn tag_groups(&self) -> &BTreeSet<TagGroup> {
        self.address_book().tag_groups()
    }

    fn has_tag_group(&self, group: &TagGroup) -> bool {
        self.tag_groups().contains(group)
    }

    fn add_tag_group(&mut self, group: TagGroup);

    fn remove_tag_group(&mut self, group: &TagGroup);

    fn is_tag_group_in_use(&self, group: &TagGroup) -> bool {
        self.persons().iter().any(|p| p.uses_tag_group(group))
    }
}

/// Owns the address book and the active display filter
#[derive(Debug, Default)]
pub struct ModelManager {
    book: AddressBook,
    filter: PersonFilter,
}

impl ModelManager {
    pub fn new(book: AddressBook) -> Self {
        Self {
            book,
            filter: PersonFilter::all(),
        }
    }

    pub fn filter(&self) -> &PersonFilter {
        &self.filter
    }
}

impl Model for ModelManager {
    fn address_book(&self) -> &AddressBook {
        &self.book
    }

    fn set_address_book(&mut self, book: AddressBook) {
        self.book = book;
    }

    fn add_person(&mut self, person: Person) {
        info!("adding person {}", person.name());
        self.book.add_person(person);
        self.filter = PersonFilter::all();
    }

    fn set_person(&mut self, target: &Person, edited: Person) {
        info!("replacing person {} with {}", target.name(), edited.name());
        self.book.set_person(target, edited);
    }

    fn delete_person(&mut self, target: &Person) {
        info!("deleting person {}", target.name());
        self.book.remove_person(target);
    }

    fn clear_persons(&mut self) {
        info!("clearing {} person(s)", self.book.persons().len());
        self.book.clear_persons();
    }

    fn filtered_persons(&self) -> Vec<&Person> {
        self.book
            .persons()
            .iter()
            .filter(|p| self.filter.matches(p))
            .collect()
    }

    fn update_filter(&mut self, filter: PersonFilter) {
        self.filter = filter;
    }

    fn add_tag_group(&mut self, group: TagGroup) {
        info!("registering tag group {}", group);
        self.book.add_tag_group(group);
    }

    fn remove_tag_group(&mut self, group: &TagGroup) {
        info!("removing tag group {}", group);
        self.book.remove_tag_group(group);
    }
}
