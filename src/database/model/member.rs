use crate::database::error::DatabaseError;
use crate::member::MemberDraft;
use chrono::{NaiveDate, NaiveDateTime};
use diesel::prelude::*;
use dto::gender::Gender;
use dto::membership_category::MembershipCategory;
use std::str::FromStr;

/// Timestamps are stored as text, in UTC.
pub(crate) const DATE_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.f";

#[derive(Queryable, Selectable, Debug)]
#[diesel(table_name = crate::database::schema::member)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub(crate) struct Member {
    id: i32,
    surname: String,
    other_names: String,
    id_passport: String,
    phone: String,
    email: String,
    gender: String,
    ethnicity: String,
    religion: String,
    dob: String,
    special_interest: String,
    pwd_number: Option<String>,
    county: String,
    constituency: String,
    ward: String,
    polling_station: String,
    membership_category: String,
    membership_number: String,
    registration_date: String,
    phone_verified: bool,
    email_verified: bool,
    certificate_generated: bool,
    certificate_file: Option<String>,
    certificate_sent: bool,
    is_active: bool,
}

impl TryFrom<Member> for dto::member::Member {
    type Error = DatabaseError;

    fn try_from(value: Member) -> Result<Self, Self::Error> {
        let gender = Gender::from_str(&value.gender).map_err(DatabaseError::CorruptedValue)?;
        let membership_category = MembershipCategory::from_str(&value.membership_category)
            .map_err(DatabaseError::CorruptedValue)?;
        let dob = NaiveDate::from_str(&value.dob)?;
        let special_interest = serde_json::from_str::<Vec<String>>(&value.special_interest)?;
        let registration_date =
            NaiveDateTime::parse_from_str(&value.registration_date, DATE_TIME_FORMAT)?;

        Ok(dto::member::Member::new(
            value.id,
            value.surname,
            value.other_names,
            value.id_passport,
            value.phone,
            value.email,
            gender,
            value.ethnicity,
            value.religion,
            dob,
            special_interest,
            value.pwd_number,
            value.county,
            value.constituency,
            value.ward,
            value.polling_station,
            membership_category,
            value.membership_number,
            registration_date,
            value.phone_verified,
            value.email_verified,
            value.certificate_generated,
            value.certificate_file,
            value.certificate_sent,
            value.is_active,
        ))
    }
}

/// A record about to be created.
/// Certificate-related columns and `is_active` are left to their defaults.
#[derive(Insertable, Debug)]
#[diesel(table_name = crate::database::schema::member)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub(crate) struct NewMember<'a> {
    surname: &'a str,
    other_names: &'a str,
    id_passport: &'a str,
    phone: &'a str,
    email: &'a str,
    gender: &'static str,
    ethnicity: &'a str,
    religion: &'a str,
    dob: String,
    special_interest: String,
    pwd_number: Option<&'a str>,
    county: &'a str,
    constituency: &'a str,
    ward: &'a str,
    polling_station: &'a str,
    membership_category: &'static str,
    membership_number: &'a str,
    registration_date: String,
    phone_verified: bool,
    email_verified: bool,
}

impl<'a> NewMember<'a> {
    /// Phone and email are considered verified once the registration went through.
    pub(crate) fn new(
        draft: &'a MemberDraft,
        membership_number: &'a str,
        registration_date: NaiveDateTime,
    ) -> Result<Self, DatabaseError> {
        Ok(Self {
            surname: draft.surname(),
            other_names: draft.other_names(),
            id_passport: draft.id_passport(),
            phone: draft.phone(),
            email: draft.email(),
            gender: draft.gender().as_str(),
            ethnicity: draft.ethnicity(),
            religion: draft.religion(),
            dob: draft.dob().to_string(),
            special_interest: serde_json::to_string(draft.special_interest())?,
            pwd_number: draft.pwd_number().as_deref(),
            county: draft.county(),
            constituency: draft.constituency(),
            ward: draft.ward(),
            polling_station: draft.polling_station(),
            membership_category: draft.membership_category().as_str(),
            membership_number,
            registration_date: registration_date.format(DATE_TIME_FORMAT).to_string(),
            phone_verified: true,
            email_verified: true,
        })
    }
}
