//! Validated value objects that make up a person.
//!
//! Every type here is built through `FromStr`, which trims the raw text and
//! checks it against the field's format rule. A value that exists has passed
//! validation.

use once_cell::sync::Lazy;
use regex::Regex;
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

use crate::error::{Field, ParseError};

pub const NAME_CONSTRAINTS: &str =
    "Names should only contain alphanumeric characters and spaces, and it should not be blank";
pub const PHONE_CONSTRAINTS: &str =
    "Phone numbers should only contain numbers, and it should be at least 3 digits long";
pub const EMAIL_CONSTRAINTS: &str = "Emails should be of the format local-part@domain \
and adhere to the following constraints:\n\
1. The local-part should only contain alphanumeric characters and these special characters, \
excluding the parentheses, (+_.-). The local-part may not start or end with any special characters.\n\
2. This is followed by a '@' and then a domain name. The domain name is made up of domain labels \
separated by periods.\n\
The domain name must:\n    \
- end with a domain label at least 2 characters long\n    \
- have each domain label start and end with alphanumeric characters\n    \
- have each domain label consist of alphanumeric characters, separated only by hyphens, if any.";
pub const ADDRESS_CONSTRAINTS: &str = "Addresses can take any values, and it should not be blank";
pub const ROLE_CONSTRAINTS: &str =
    "Roles should only contain alphanumeric characters and spaces, and it should not be blank";
pub const TAG_CONSTRAINTS: &str =
    "Tags should be alphanumeric, optionally namespaced as GROUP.VALUE (e.g. friends.alice)";
pub const TAG_GROUP_CONSTRAINTS: &str = "Tag group names should be alphanumeric";
pub const STATUS_CONSTRAINTS: &str = "Status must be either PENDING or COMPLETED";

static NAME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9][A-Za-z0-9 ]*$").expect("valid name regex"));
static PHONE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[0-9]{3,}$").expect("valid phone regex"));
static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        // Domain labels join alphanumeric runs with single hyphens; the last
        // label is at least two characters long
        r"^[A-Za-z0-9]+([+_.\-][A-Za-z0-9]+)*@([A-Za-z0-9]+(-[A-Za-z0-9]+)*\.)*([A-Za-z0-9]{2,}(-[A-Za-z0-9]+)*|[A-Za-z0-9](-[A-Za-z0-9]+)+)$",
    )
    .expect("valid email regex")
});
static ADDRESS_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\S.*$").expect("valid address regex"));
static ROLE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9][A-Za-z0-9 ]*$").expect("valid role regex"));
static TAG_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9]+(\.[A-Za-z0-9]+)?$").expect("valid tag regex"));
static TAG_GROUP_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9]+$").expect("valid tag group regex"));

/// Trims `raw` and returns it if it satisfies `re`
fn validated(
    raw: &str,
    re: &Regex,
    field: Field,
    message: &'static str,
) -> Result<String, ParseError> {
    let trimmed = raw.trim();
    if re.is_match(trimmed) {
        Ok(trimmed.to_string())
    } else {
        Err(ParseError::invalid(field, message))
    }
}

/// A person's full name
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Name(String);

impl Name {
    /// Returns true if `value` is already a valid name (no trimming is applied)
    pub fn is_valid(value: &str) -> bool {
        NAME_RE.is_match(value)
    }

    /// Returns the validated text
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for Name {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        validated(s, &NAME_RE, Field::Name, NAME_CONSTRAINTS).map(Name)
    }
}

/// A phone number made of digits only
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Phone(String);

impl Phone {
    /// Returns true if `value` is already a valid phone (no trimming is applied)
    pub fn is_valid(value: &str) -> bool {
        PHONE_RE.is_match(value)
    }

    /// Returns the validated text
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for Phone {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        validated(s, &PHONE_RE, Field::Phone, PHONE_CONSTRAINTS).map(Phone)
    }
}

/// An email address; compared exactly, without case folding
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Email(String);

impl Email {
    /// Returns true if `value` is already a valid email (no trimming is applied)
    pub fn is_valid(value: &str) -> bool {
        EMAIL_RE.is_match(value)
    }

    /// Returns the validated text
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for Email {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        validated(s, &EMAIL_RE, Field::Email, EMAIL_CONSTRAINTS).map(Email)
    }
}

/// A postal address; any non-blank text
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Address(String);

impl Address {
    /// Returns true if `value` is already a valid address (no trimming is applied)
    pub fn is_valid(value: &str) -> bool {
        ADDRESS_RE.is_match(value)
    }

    /// Returns the validated text
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for Address {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        validated(s, &ADDRESS_RE, Field::Address, ADDRESS_CONSTRAINTS).map(Address)
    }
}

/// A label such as "Buyer" or "Seller".
///
/// Roles keep the spelling they were entered with but compare, hash and order
/// case-insensitively, so "Buyer" and "buyer" are the same role.
#[derive(Debug, Clone)]
pub struct Role(String);

impl Role {
    /// Returns true if `value` is already a valid role (no trimming is applied)
    pub fn is_valid(value: &str) -> bool {
        ROLE_RE.is_match(value)
    }

    /// Returns the validated text
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Compares the spelling of two roles ignoring ASCII case
    pub fn is_same_role_ignore_case(&self, other: &Role) -> bool {
        self.0.eq_ignore_ascii_case(&other.0)
    }

    fn key(&self) -> String {
        self.0.to_ascii_lowercase()
    }
}

impl PartialEq for Role {
    fn eq(&self, other: &Self) -> bool {
        self.is_same_role_ignore_case(other)
    }
}

impl Eq for Role {}

impl Hash for Role {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key().hash(state);
    }
}

impl PartialOrd for Role {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Role {
    fn cmp(&self, other: &Self) -> Ordering {
        self.key().cmp(&other.key())
    }
}

impl FromStr for Role {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        validated(s, &ROLE_RE, Field::Role, ROLE_CONSTRAINTS).map(Role)
    }
}

/// A free tag (`friend`) or a grouped tag (`friends.alice`)
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Tag(String);

impl Tag {
    /// Returns true if `value` is already a valid tag (no trimming is applied)
    pub fn is_valid(value: &str) -> bool {
        TAG_RE.is_match(value)
    }

    /// Returns the validated text
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The namespace portion of a grouped tag
    pub fn group(&self) -> Option<&str> {
        self.0.split_once('.').map(|(group, _)| group)
    }

    /// The tag without its namespace
    pub fn value(&self) -> &str {
        self.0.split_once('.').map_or(&self.0, |(_, value)| value)
    }

    /// Returns true if this tag is namespaced under `group`
    pub fn belongs_to(&self, group: &TagGroup) -> bool {
        self.group() == Some(group.as_str())
    }
}

impl FromStr for Tag {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        validated(s, &TAG_RE, Field::Tag, TAG_CONSTRAINTS).map(Tag)
    }
}

/// A registered namespace for grouped tags
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TagGroup(String);

impl TagGroup {
    /// Returns true if `value` is already a valid tag group (no trimming is applied)
    pub fn is_valid(value: &str) -> bool {
        TAG_GROUP_RE.is_match(value)
    }

    /// Returns the validated text
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for TagGroup {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        validated(s, &TAG_GROUP_RE, Field::TagGroup, TAG_GROUP_CONSTRAINTS).map(TagGroup)
    }
}

/// Progress of the work tracked for a person
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Status {
    Pending,
    Completed,
}

impl Status {
    pub const ALL: [Status; 2] = [Status::Pending, Status::Completed];

    /// Accepts either variant name in any letter case
    pub fn is_valid(value: &str) -> bool {
        Self::ALL
            .iter()
            .any(|status| status.as_str().eq_ignore_ascii_case(value))
    }

    /// Canonical upper-case spelling, used for display and storage
    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Pending => "PENDING",
            Status::Completed => "COMPLETED",
        }
    }
}

impl FromStr for Status {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        Self::ALL
            .into_iter()
            .find(|status| status.as_str().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| ParseError::invalid(Field::Status, STATUS_CONSTRAINTS))
    }
}

macro_rules! display_as_str {
    ($($ty:ty),*) => {
        $(
            impl fmt::Display for $ty {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    f.write_str(self.as_str())
                }
            }
        )*
    };
}

display_as_str!(Name, Phone, Email, Address, Role, Tag, TagGroup, Status);

#[cfg(test)]
mod tests {
    use super::*;

    const WHITESPACE: &str = " \t\r\n";

    #[test]
    fn test_name_validation() {
        assert!(Name::is_valid("Rachel Walker"));
        assert!(Name::is_valid("Capital Tan"));
        assert!(Name::is_valid("David Roger Jackson Ray Jr 2nd"));
        assert!(!Name::is_valid(""));
        assert!(!Name::is_valid(" "));
        assert!(!Name::is_valid("R@chel"));
        assert!(!Name::is_valid("peter*"));
    }

    #[test]
    fn test_name_trims_whitespace() {
        let name: Name = format!("{WHITESPACE}Rachel Walker{WHITESPACE}").parse().unwrap();
        assert_eq!(name.as_str(), "Rachel Walker");
    }

    #[test]
    fn test_invalid_name_reports_constraint() {
        let err = "R@chel".parse::<Name>().unwrap_err();
        assert_eq!(err.to_string(), NAME_CONSTRAINTS);
        assert!(matches!(
            err,
            ParseError::InvalidField {
                field: Field::Name,
                ..
            }
        ));
    }

    #[test]
    fn test_phone_validation() {
        assert!(Phone::is_valid("911"));
        assert!(Phone::is_valid("93121534"));
        assert!(Phone::is_valid("124293842033123"));
        assert!(!Phone::is_valid("91"));
        assert!(!Phone::is_valid("+651234"));
        assert!(!Phone::is_valid("9011p041"));
        assert!(!Phone::is_valid("9312 1534"));
        // Digits outside ASCII would dodge the duplicate-phone check
        assert!("\u{0661}\u{0662}\u{0663}".parse::<Phone>().is_err());
        assert!("\u{FF11}\u{FF12}\u{FF13}".parse::<Phone>().is_err());
        assert_eq!("  123456 ".parse::<Phone>().unwrap().as_str(), "123456");
    }

    #[test]
    fn test_email_validation() {
        assert!(Email::is_valid("rachel@example.com"));
        assert!(Email::is_valid("a1+be.d@example1.com"));
        assert!(Email::is_valid("peter_jack@very-very-very-long-example.com"));
        assert!(Email::is_valid("e1234567@u.nus.edu"));
        assert!(Email::is_valid("test@localhost"));

        assert!(!Email::is_valid("example.com"));
        assert!(!Email::is_valid("@example.com"));
        assert!(!Email::is_valid("peterjack@"));
        assert!(!Email::is_valid("-peterjack@example.com"));
        assert!(!Email::is_valid("peterjack-@example.com"));
        assert!(!Email::is_valid("peter..jack@example.com"));
        assert!(!Email::is_valid("peterjack@example.c"));
        assert!(!Email::is_valid("peterjack@-example.com"));
        assert!(!Email::is_valid("peterjack@example.com-"));
        assert!(!Email::is_valid("peter jack@example.com"));
        assert!(!Email::is_valid("peterjack@ex--ample.com"));
        assert!(!Email::is_valid("peterjack@example.c-"));
        assert!(Email::is_valid("peterjack@ex-am-ple.com"));
        assert!(Email::is_valid("peterjack@example.a-b"));
    }

    #[test]
    fn test_address_validation() {
        assert!(Address::is_valid("123 Main Street #0505"));
        assert!(Address::is_valid("-"));
        assert!(!Address::is_valid(""));
        assert!(" ".parse::<Address>().is_err());
    }

    #[test]
    fn test_role_equality_ignores_case() {
        let buyer: Role = "Buyer".parse().unwrap();
        let upper: Role = "BUYER".parse().unwrap();
        let seller: Role = "Seller".parse().unwrap();

        assert_eq!(buyer, upper);
        assert!(buyer.is_same_role_ignore_case(&upper));
        assert_ne!(buyer, seller);
        // Original spelling is kept for display
        assert_eq!(upper.to_string(), "BUYER");
    }

    #[test]
    fn test_invalid_role() {
        assert!("Dev@loper".parse::<Role>().is_err());
        assert!("".parse::<Role>().is_err());
        assert!("Property Agent".parse::<Role>().is_ok());
    }

    #[test]
    fn test_tag_grouping() {
        let plain: Tag = "friend".parse().unwrap();
        assert_eq!(plain.group(), None);
        assert_eq!(plain.value(), "friend");

        let grouped: Tag = "friends.alice".parse().unwrap();
        assert_eq!(grouped.group(), Some("friends"));
        assert_eq!(grouped.value(), "alice");
        assert!(grouped.belongs_to(&"friends".parse().unwrap()));
        assert!(!grouped.belongs_to(&"work".parse().unwrap()));
    }

    #[test]
    fn test_invalid_tags() {
        assert!("#friend".parse::<Tag>().is_err());
        assert!("friends.".parse::<Tag>().is_err());
        assert!(".alice".parse::<Tag>().is_err());
        assert!("a.b.c".parse::<Tag>().is_err());
        assert!("two words".parse::<Tag>().is_err());
    }

    #[test]
    fn test_tag_group_validation() {
        assert!(TagGroup::is_valid("friends"));
        assert!(!TagGroup::is_valid("my friends"));
        assert!(!TagGroup::is_valid("friends.alice"));
        assert_eq!(" work ".parse::<TagGroup>().unwrap().as_str(), "work");
    }

    #[test]
    fn test_status_parsing_is_case_insensitive() {
        assert_eq!("PENDING".parse::<Status>().unwrap(), Status::Pending);
        assert_eq!("pending".parse::<Status>().unwrap(), Status::Pending);
        assert_eq!(" Completed \n".parse::<Status>().unwrap(), Status::Completed);
        assert_eq!(Status::Completed.to_string(), "COMPLETED");

        let err = "UNKNOWN".parse::<Status>().unwrap_err();
        assert_eq!(err.to_string(), STATUS_CONSTRAINTS);
        assert!(Status::is_valid("completed"));
        assert!(!Status::is_valid("done"));
    }
}
