use crate::database::error::DatabaseError;
use crate::member::MemberDraft;
use crate::member::error::RegistrationError;
use chrono::NaiveDate;
use dto::api_response::FieldErrors;
use dto::member_registration::MemberRegistration;
use regex::Regex;
use serde_json::Value;
use std::str::FromStr;
use std::sync::LazyLock;

pub const REQUIRED: &str = "This field is required.";
pub const BLANK: &str = "This field may not be blank.";
pub const ID_PASSPORT_TAKEN: &str = "This ID/Passport number is already registered.";
pub const EMAIL_TAKEN: &str = "This email is already registered.";
pub const INVALID_EMAIL: &str = "Enter a valid email address.";
pub const INVALID_PHONE: &str = "Please enter a valid Kenyan phone number.";
pub const NOT_A_STRING: &str = "Not a valid string.";
pub const SPECIAL_INTEREST_NOT_A_LIST: &str = "Special interest must be a list.";
pub const INVALID_DATE: &str =
    "Date has wrong format. Use one of these formats instead: YYYY-MM-DD.";

const DATE_FORMAT: &str = "%Y-%m-%d";

static PHONE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\+254|254|07|01)[0-9]{8,9}$").unwrap());
static EMAIL_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s.]+$").unwrap());

/// Columns whose values can belong to one member only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UniqueField {
    IdPassport,
    Email,
}

pub fn too_long(max_length: usize) -> String {
    format!("Ensure this field has no more than {max_length} characters.")
}

pub fn invalid_choice(value: &str) -> String {
    format!("\"{value}\" is not a valid choice.")
}

/// Check every field of a registration and report all problems at once.
/// `is_taken` tells whether an identifier already belongs to a registered member.
pub fn validate_registration<F>(
    registration: &MemberRegistration,
    mut is_taken: F,
) -> Result<MemberDraft, RegistrationError>
where
    F: FnMut(UniqueField, &str) -> Result<bool, DatabaseError>,
{
    let mut validator = Validator::default();

    let surname = validator.required_text("surname", registration.surname(), 100);
    let other_names = validator.required_text("other_names", registration.other_names(), 200);
    let id_passport = validator.required_text("id_passport", registration.id_passport(), 50);
    let phone = validator.phone(registration.phone());
    let email = validator.email(registration.email());
    let gender = validator.choice("gender", registration.gender());
    let ethnicity = validator.optional_text("ethnicity", registration.ethnicity(), 100);
    let religion = validator.optional_text("religion", registration.religion(), 100);
    let dob = validator.date("dob", registration.dob());
    let special_interest = validator.special_interest(registration.special_interest());
    let pwd_number = validator.nullable_text("pwd_number", registration.pwd_number(), 50);
    let county = validator.required_text("county", registration.county(), 100);
    let constituency = validator.required_text("constituency", registration.constituency(), 100);
    let ward = validator.optional_text("ward", registration.ward(), 100);
    let polling_station =
        validator.optional_text("polling_station", registration.polling_station(), 200);
    let membership_category =
        validator.choice("membership_category", registration.membership_category());

    if let Some(id_passport) = &id_passport {
        if is_taken(UniqueField::IdPassport, id_passport)? {
            validator.add("id_passport", ID_PASSPORT_TAKEN);
        }
    }
    if let Some(email) = &email {
        if is_taken(UniqueField::Email, email)? {
            validator.add("email", EMAIL_TAKEN);
        }
    }

    let draft = (|| {
        Some(MemberDraft {
            surname: surname?,
            other_names: other_names?,
            id_passport: id_passport?,
            phone: phone?,
            email: email?,
            gender: gender?,
            ethnicity: ethnicity?,
            religion: religion?,
            dob: dob?,
            special_interest: special_interest?,
            pwd_number: pwd_number?,
            county: county?,
            constituency: constituency?,
            ward: ward?,
            polling_station: polling_station?,
            membership_category: membership_category?,
        })
    })();

    match draft {
        Some(draft) if validator.errors.is_empty() => Ok(draft),
        _ => Err(RegistrationError::Invalid(validator.errors)),
    }
}

/// Every check returns `None` exactly when it recorded an error.
#[derive(Default)]
struct Validator {
    errors: FieldErrors,
}

impl Validator {
    fn add(&mut self, field: &str, message: &str) {
        self.errors
            .entry(field.to_owned())
            .or_default()
            .push(message.to_owned());
    }

    /// Numbers are read as their textual form; other non-string values are rejected.
    /// `Some(None)` stands for a missing value.
    fn text(&mut self, field: &str, value: &Option<Value>) -> Option<Option<String>> {
        match value {
            None | Some(Value::Null) => Some(None),
            Some(Value::String(text)) => Some(Some(text.clone())),
            Some(Value::Number(number)) => Some(Some(number.to_string())),
            Some(_) => {
                self.add(field, NOT_A_STRING);
                None
            }
        }
    }

    fn required_text(
        &mut self,
        field: &str,
        value: &Option<Value>,
        max_length: usize,
    ) -> Option<String> {
        let Some(value) = self.text(field, value)? else {
            self.add(field, REQUIRED);
            return None;
        };
        let value = value.trim();
        if value.is_empty() {
            self.add(field, BLANK);
            return None;
        }
        self.within(field, value, max_length)
    }

    fn optional_text(
        &mut self,
        field: &str,
        value: &Option<Value>,
        max_length: usize,
    ) -> Option<String> {
        match self.text(field, value)? {
            Some(value) => self.within(field, value.trim(), max_length),
            None => Some(String::new()),
        }
    }

    /// Blank values are stored as null.
    fn nullable_text(
        &mut self,
        field: &str,
        value: &Option<Value>,
        max_length: usize,
    ) -> Option<Option<String>> {
        let value = self.optional_text(field, value, max_length)?;
        Some(Some(value).filter(|value| !value.is_empty()))
    }

    fn within(&mut self, field: &str, value: &str, max_length: usize) -> Option<String> {
        if value.chars().count() > max_length {
            self.add(field, &too_long(max_length));
            return None;
        }
        Some(value.to_owned())
    }

    fn phone(&mut self, value: &Option<Value>) -> Option<String> {
        let phone = self.required_text("phone", value, 20)?.replace(' ', "");
        if !PHONE_PATTERN.is_match(&phone) {
            self.add("phone", INVALID_PHONE);
            return None;
        }
        Some(phone)
    }

    fn email(&mut self, value: &Option<Value>) -> Option<String> {
        let email = self.required_text("email", value, 254)?;
        if !EMAIL_PATTERN.is_match(&email) {
            self.add("email", INVALID_EMAIL);
            return None;
        }
        Some(email)
    }

    fn choice<T: FromStr>(&mut self, field: &str, value: &Option<Value>) -> Option<T> {
        let value = self.required_text(field, value, usize::MAX)?;
        match value.parse() {
            Ok(choice) => Some(choice),
            Err(_) => {
                self.add(field, &invalid_choice(&value));
                None
            }
        }
    }

    fn date(&mut self, field: &str, value: &Option<Value>) -> Option<NaiveDate> {
        let value = self.required_text(field, value, usize::MAX)?;
        match NaiveDate::parse_from_str(&value, DATE_FORMAT) {
            Ok(date) => Some(date),
            Err(_) => {
                self.add(field, INVALID_DATE);
                None
            }
        }
    }

    /// Accept a list, a JSON-encoded list or a single tag.
    /// A string holding any other JSON value is not a list.
    fn special_interest(&mut self, value: &Option<Value>) -> Option<Vec<String>> {
        let value = match value {
            None | Some(Value::Null) => return Some(vec![]),
            Some(Value::String(text)) if text.trim().is_empty() => return Some(vec![]),
            Some(Value::String(text)) => match serde_json::from_str::<Value>(text) {
                Ok(parsed) => parsed,
                Err(_) => return Some(vec![text.trim().to_owned()]),
            },
            Some(value) => value.clone(),
        };

        let tags = match value {
            Value::Array(items) => items
                .into_iter()
                .map(|item| match item {
                    Value::String(tag) => Some(tag),
                    _ => None,
                })
                .collect::<Option<Vec<_>>>(),
            _ => None,
        };
        if tags.is_none() {
            self.add("special_interest", SPECIAL_INTEREST_NOT_A_LIST);
        }
        tags
    }
}
