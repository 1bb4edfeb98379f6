use chrono::NaiveDate;
use derive_getters::Getters;
use dto::gender::Gender;
use dto::membership_category::MembershipCategory;

pub mod certificate;
pub mod error;
pub mod membership_number;
pub mod registration;
pub mod validation;

/// Applicant data that passed validation, ready to be stored.
#[derive(Debug, Getters, PartialEq, Clone)]
pub struct MemberDraft {
    surname: String,
    other_names: String,
    id_passport: String,
    phone: String,
    email: String,
    gender: Gender,
    ethnicity: String,
    religion: String,
    dob: NaiveDate,
    special_interest: Vec<String>,
    pwd_number: Option<String>,
    county: String,
    constituency: String,
    ward: String,
    polling_station: String,
    membership_category: MembershipCategory,
}
