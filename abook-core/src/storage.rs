use anyhow::{Context, Result};
use fs2::FileExt;
use log::{info, warn};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fs::{self, File, OpenOptions};
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use crate::error::DataConversionError;
use crate::fields::{Address, Email, Name, Phone, Role, Status, Tag};
use crate::model::AddressBook;
use crate::person::Person;

const LOCK_TIMEOUT: Duration = Duration::from_secs(5);
const LOCK_RETRY: Duration = Duration::from_millis(100);

/// On-disk shape of a person. Every field is optional so that a damaged file
/// reports which field is missing instead of failing deserialization outright.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct JsonAdaptedPerson {
    pub name: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
    #[serde(default)]
    pub roles: Vec<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub status: Option<String>,
}

impl From<&Person> for JsonAdaptedPerson {
    fn from(person: &Person) -> Self {
        Self {
            name: Some(person.name().to_string()),
            phone: Some(person.phone().to_string()),
            email: Some(person.email().to_string()),
            address: Some(person.address().to_string()),
            roles: person.roles().iter().map(ToString::to_string).collect(),
            tags: person.tags().iter().map(ToString::to_string).collect(),
            status: person.status().map(|s| s.to_string()),
        }
    }
}

fn required<'a>(
    value: &'a Option<String>,
    field: &'static str,
) -> Result<&'a str, DataConversionError> {
    value.as_deref().ok_or(DataConversionError::MissingField(field))
}

fn illegal(err: impl ToString) -> DataConversionError {
    DataConversionError::IllegalValue(err.to_string())
}

impl JsonAdaptedPerson {
    /// Rebuilds the person, revalidating every field
    pub fn to_model(&self) -> Result<Person, DataConversionError> {
        let name: Name = required(&self.name, "name")?.parse().map_err(illegal)?;
        let phone: Phone = required(&self.phone, "phone")?.parse().map_err(illegal)?;
        let email: Email = required(&self.email, "email")?.parse().map_err(illegal)?;
        let address: Address = required(&self.address, "address")?.parse().map_err(illegal)?;

        let mut roles = BTreeSet::new();
        for raw in &self.roles {
            let role: Role = raw.parse().map_err(illegal)?;
            if !roles.insert(role) {
                return Err(illegal(format!("Duplicate role '{}'", raw)));
            }
        }
        let tags = self
            .tags
            .iter()
            .map(|t| t.parse::<Tag>())
            .collect::<Result<BTreeSet<_>, _>>()
            .map_err(illegal)?;
        let status: Option<Status> = self
            .status
            .as_deref()
            .map(str::parse)
            .transpose()
            .map_err(illegal)?;

        Ok(Person::new(name, phone, email, address)
            .with_roles(roles)
            .with_tags(tags)
            .with_status(status))
    }
}

/// On-disk shape of the whole address book
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JsonAddressBook {
    #[serde(default)]
    pub persons: Vec<JsonAdaptedPerson>,
    #[serde(default)]
    pub tag_groups: Vec<String>,
}

impl From<&AddressBook> for JsonAddressBook {
    fn from(book: &AddressBook) -> Self {
        Self {
            persons: book.persons().iter().map(JsonAdaptedPerson::from).collect(),
            tag_groups: book.tag_groups().iter().map(ToString::to_string).collect(),
        }
    }
}

impl JsonAddressBook {
    /// Rebuilds the address book, rejecting anything the commands would have refused
    pub fn to_model(&self) -> Result<AddressBook, DataConversionError> {
        let mut book = AddressBook::new();

        for raw in &self.tag_groups {
            book.add_tag_group(raw.parse().map_err(illegal)?);
        }

        for adapted in &self.persons {
            let person = adapted.to_model()?;

            if book.persons().iter().any(|p| p.is_same_phone(&person)) {
                return Err(illegal(format!("Duplicate phone number '{}'", person.phone())));
            }
            if book.persons().iter().any(|p| p.is_same_email(&person)) {
                return Err(illegal(format!("Duplicate email '{}'", person.email())));
            }
            let unregistered = person
                .tags()
                .iter()
                .find(|t| {
                    t.group().is_some() && !book.tag_groups().iter().any(|g| t.belongs_to(g))
                });
            if let Some(tag) = unregistered {
                return Err(illegal(format!("Tag '{}' belongs to an unregistered tag group", tag)));
            }

            book.add_person(person);
        }

        Ok(book)
    }
}

/// Loads and saves the address book as JSON, guarding the file with a lock
/// sidecar so two processes cannot interleave writes
pub struct Storage {
    file_path: PathBuf,
    lock_file_path: PathBuf,
}

impl Storage {
    pub fn new<P: AsRef<Path>>(file_path: P) -> Self {
        let file_path = file_path.as_ref().to_path_buf();
        let lock_file_path = file_path.with_extension("json.lock");
        Self {
            file_path,
            lock_file_path,
        }
    }

    pub fn path(&self) -> &Path {
        &self.file_path
    }

    fn wait_for_lock(&self, lock_file: &File, exclusive: bool) -> Result<()> {
        let start = Instant::now();
        loop {
            // Qualified so std's own `File` locking methods are not picked instead
            let attempt = if exclusive {
                FileExt::try_lock_exclusive(lock_file)
            } else {
                FileExt::try_lock_shared(lock_file)
            };
            match attempt {
                Ok(()) => return Ok(()),
                Err(e) if e.kind() == std::io::ErrorKind::WouldBlock => {
                    if start.elapsed() > LOCK_TIMEOUT {
                        anyhow::bail!(
                            "Timeout waiting for file lock - another process may be editing: {:?}",
                            self.file_path
                        );
                    }
                    std::thread::sleep(LOCK_RETRY);
                }
                Err(e) => {
                    return Err(e).with_context(|| {
                        format!("Failed to acquire lock on {:?}", self.lock_file_path)
                    })
                }
            }
        }
    }

    fn acquire_write_lock(&self) -> Result<File> {
        if let Some(parent) = self.lock_file_path.parent() {
            fs::create_dir_all(parent)?;
        }

        let lock_file = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(&self.lock_file_path)
            .with_context(|| format!("Failed to create lock file: {:?}", self.lock_file_path))?;
        self.wait_for_lock(&lock_file, true)?;
        Ok(lock_file)
    }

    fn acquire_read_lock(&self) -> Result<Option<File>> {
        if !self.lock_file_path.exists() {
            return Ok(None);
        }

        let lock_file = OpenOptions::new()
            .read(true)
            .open(&self.lock_file_path)
            .with_context(|| format!("Failed to open lock file: {:?}", self.lock_file_path))?;
        self.wait_for_lock(&lock_file, false)?;
        Ok(Some(lock_file))
    }

    /// Reads the address book, creating an empty one if the file does not exist
    pub fn load(&self) -> Result<AddressBook> {
        if !self.file_path.exists() {
            info!("No data file at {:?}, starting with an empty address book", self.file_path);
            let book = AddressBook::new();
            self.save(&book)?;
            return Ok(book);
        }

        let _lock = self.acquire_read_lock()?;

        let file = File::open(&self.file_path)
            .with_context(|| format!("Failed to open file: {:?}", self.file_path))?;
        let stored: JsonAddressBook = serde_json::from_reader(BufReader::new(file))
            .with_context(|| format!("Failed to parse JSON from {:?}", self.file_path))?;

        let book = stored
            .to_model()
            .map_err(|e| {
                warn!("Rejected data in {:?}: {}", self.file_path, e);
                e
            })
            .with_context(|| {
                format!("Data file {:?} is not in the correct format", self.file_path)
            })?;

        info!("Loaded {} persons from {:?}", book.persons().len(), self.file_path);
        Ok(book)
    }

    /// Overwrites the file with `book`
    pub fn save(&self, book: &AddressBook) -> Result<()> {
        if let Some(parent) = self.file_path.parent() {
            fs::create_dir_all(parent)?;
        }

        let mut lock_file = self.acquire_write_lock()?;
        let _ = writeln!(
            lock_file,
            "Locked by PID {} at {}",
            std::process::id(),
            chrono::Utc::now().to_rfc3339()
        );

        let file = File::create(&self.file_path)
            .with_context(|| format!("Failed to create file: {:?}", self.file_path))?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, &JsonAddressBook::from(book))
            .with_context(|| format!("Failed to write JSON to {:?}", self.file_path))?;
        writer.flush()?;

        info!("Saved {} persons to {:?}", book.persons().len(), self.file_path);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::person::test_support::PersonBuilder;
    use tempfile::TempDir;

    fn sample_book() -> AddressBook {
        let mut book = AddressBook::new();
        book.add_tag_group("friends".parse().unwrap());
        book.add_person(
            PersonBuilder::new()
                .roles(&["Buyer", "Seller"])
                .tags(&["friends.amy", "urgent"])
                .build(),
        );
        book.add_person(
            PersonBuilder::new()
                .name("Bob Choo")
                .phone("22222222")
                .email("bob@example.com")
                .status(None)
                .build(),
        );
        book
    }

    #[test]
    fn test_save_and_load() {
        let dir = TempDir::new().unwrap();
        let storage = Storage::new(dir.path().join("addressbook.json"));

        let book = sample_book();
        storage.save(&book).unwrap();

        assert_eq!(storage.load().unwrap(), book);
    }

    #[test]
    fn test_load_missing_file_creates_empty_book() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("addressbook.json");
        let storage = Storage::new(&path);

        let book = storage.load().unwrap();
        assert!(book.persons().is_empty());
        assert!(path.exists());
    }

    #[test]
    fn test_saved_json_layout() {
        let dir = TempDir::new().unwrap();
        let storage = Storage::new(dir.path().join("addressbook.json"));
        storage.save(&sample_book()).unwrap();

        let raw = fs::read_to_string(storage.path()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(value["tagGroups"][0], "friends");
        assert_eq!(value["persons"][0]["status"], "PENDING");
        assert!(value["persons"][1]["status"].is_null());
    }

    #[test]
    fn test_load_rejects_invalid_field() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("addressbook.json");
        fs::write(
            &path,
            r#"{"persons":[{"name":"R@chel","phone":"123","email":"r@example.com","address":"x"}]}"#,
        )
        .unwrap();

        assert!(Storage::new(&path).load().is_err());
    }

    #[test]
    fn test_to_model_missing_field() {
        let adapted = JsonAdaptedPerson {
            name: Some("Amy".into()),
            phone: None,
            email: Some("amy@example.com".into()),
            address: Some("x".into()),
            ..Default::default()
        };
        assert_eq!(
            adapted.to_model().unwrap_err(),
            DataConversionError::MissingField("phone")
        );
    }

    #[test]
    fn test_to_model_rejects_duplicates_and_unknown_groups() {
        let mut stored = JsonAddressBook::from(&sample_book());
        stored.persons[1].phone = stored.persons[0].phone.clone();
        assert!(matches!(
            stored.to_model(),
            Err(DataConversionError::IllegalValue(_))
        ));

        let mut stored = JsonAddressBook::from(&sample_book());
        stored.tag_groups.clear();
        assert!(matches!(
            stored.to_model(),
            Err(DataConversionError::IllegalValue(_))
        ));

        let mut stored = JsonAddressBook::from(&sample_book());
        stored.persons[0].roles.push("buyer".into());
        assert!(stored.to_model().is_err());
    }

    #[test]
    fn test_lock_file_records_holder() {
        let dir = TempDir::new().unwrap();
        let storage = Storage::new(dir.path().join("addressbook.json"));
        storage.save(&AddressBook::new()).unwrap();

        let lock = fs::read_to_string(dir.path().join("addressbook.json.lock")).unwrap();
        assert!(lock.starts_with("Locked by PID"));
    }
}
