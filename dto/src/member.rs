use crate::gender::Gender;
use crate::membership_category::MembershipCategory;
use chrono::{Datelike, NaiveDate, NaiveDateTime};
use derive_getters::Getters;
use serde::{Deserialize, Serialize};

/// A registered member, as persisted.
/// `registration_date` is expressed in UTC.
#[derive(Debug, Serialize, Deserialize, Getters, PartialEq, Eq, Clone)]
pub struct Member {
    id: i32,
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
    membership_number: String,
    registration_date: NaiveDateTime,
    phone_verified: bool,
    email_verified: bool,
    certificate_generated: bool,
    certificate_file: Option<String>,
    certificate_sent: bool,
    is_active: bool,
}

impl Member {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: i32,
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
        membership_number: String,
        registration_date: NaiveDateTime,
        phone_verified: bool,
        email_verified: bool,
        certificate_generated: bool,
        certificate_file: Option<String>,
        certificate_sent: bool,
        is_active: bool,
    ) -> Self {
        Self {
            id,
            surname,
            other_names,
            id_passport,
            phone,
            email,
            gender,
            ethnicity,
            religion,
            dob,
            special_interest,
            pwd_number,
            county,
            constituency,
            ward,
            polling_station,
            membership_category,
            membership_number,
            registration_date,
            phone_verified,
            email_verified,
            certificate_generated,
            certificate_file,
            certificate_sent,
            is_active,
        }
    }

    pub fn full_name(&self) -> String {
        format!("{} {}", self.surname, self.other_names)
    }

    /// Age in completed years on the given day.
    pub fn age_on(&self, today: NaiveDate) -> i32 {
        age_on(self.dob, today)
    }
}

/// Number of birthdays celebrated between `dob` and `today`.
/// Someone born on February 29th gets one year older on March 1st of non-leap years.
pub fn age_on(dob: NaiveDate, today: NaiveDate) -> i32 {
    let birthday_not_reached = (today.month(), today.day()) < (dob.month(), dob.day());
    today.year() - dob.year() - i32::from(birthday_not_reached)
}

/// A member along with the values derived from its record.
#[derive(Debug, Serialize, Deserialize, Getters, PartialEq, Eq, Clone)]
pub struct MemberDetails {
    #[serde(flatten)]
    member: Member,
    age: i32,
    full_name: String,
}

impl MemberDetails {
    pub fn new(member: Member, today: NaiveDate) -> Self {
        let age = member.age_on(today);
        let full_name = member.full_name();
        Self {
            member,
            age,
            full_name,
        }
    }
}

#[cfg(any(test, feature = "test"))]
pub mod tests {
    use super::*;
    use parameterized::{ide, parameterized};

    ide!();

    pub const MEMBERSHIP_NUMBER: &str = "NPV2025123456";

    pub fn jon_doe() -> Member {
        Member {
            id: 1,
            surname: "Doe".to_owned(),
            other_names: "Jon Kamau".to_owned(),
            id_passport: "12345678".to_owned(),
            phone: "0712345678".to_owned(),
            email: "jon.doe@email.com".to_owned(),
            gender: Gender::Male,
            ethnicity: "".to_owned(),
            religion: "".to_owned(),
            dob: NaiveDate::from_ymd_opt(1990, 5, 17).unwrap(),
            special_interest: vec!["Youth".to_owned()],
            pwd_number: None,
            county: "Kiambu".to_owned(),
            constituency: "Ruiru".to_owned(),
            ward: "Biashara".to_owned(),
            polling_station: "".to_owned(),
            membership_category: MembershipCategory::Ordinary,
            membership_number: MEMBERSHIP_NUMBER.to_owned(),
            registration_date: NaiveDate::from_ymd_opt(2025, 3, 4)
                .unwrap()
                .and_hms_opt(10, 30, 0)
                .unwrap(),
            phone_verified: true,
            email_verified: true,
            certificate_generated: false,
            certificate_file: None,
            certificate_sent: false,
            is_active: true,
        }
    }

    pub fn with_certificate_file(member: Member, certificate_file: &str) -> Member {
        Member {
            certificate_generated: true,
            certificate_file: Some(certificate_file.to_owned()),
            ..member
        }
    }

    #[test]
    fn should_build_full_name() {
        assert_eq!("Doe Jon Kamau", jon_doe().full_name());
    }

    #[parameterized(
        dob = {
            (2000, 2, 29), (2000, 2, 29), (2000, 2, 29), (2000, 2, 29),
            (1990, 5, 17), (1990, 5, 17), (1990, 5, 17),
            (1999, 12, 31), (2000, 1, 1),
        },
        today = {
            (2021, 2, 28), (2021, 3, 1), (2024, 2, 28), (2024, 2, 29),
            (2025, 5, 16), (2025, 5, 17), (2025, 5, 18),
            (2000, 12, 30), (2000, 1, 1),
        },
        expected_age = {
            20, 21, 23, 24,
            34, 35, 35,
            0, 0,
        }
    )]
    fn should_compute_age(dob: (i32, u32, u32), today: (i32, u32, u32), expected_age: i32) {
        let dob = NaiveDate::from_ymd_opt(dob.0, dob.1, dob.2).unwrap();
        let today = NaiveDate::from_ymd_opt(today.0, today.1, today.2).unwrap();

        assert_eq!(expected_age, age_on(dob, today));
    }

    #[test]
    fn should_match_reference_age_for_every_day_of_a_leap_year() {
        let dob = NaiveDate::from_ymd_opt(2004, 2, 29).unwrap();
        let mut today = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        while today.year() == 2024 {
            // Reference: count the birthdays actually celebrated, using Feb 28th/29th as the anniversary.
            let mut reference = 0;
            for year in 2005..=today.year() {
                let anniversary = NaiveDate::from_ymd_opt(year, 2, 29)
                    .unwrap_or_else(|| NaiveDate::from_ymd_opt(year, 3, 1).unwrap());
                if anniversary <= today {
                    reference += 1;
                }
            }
            assert_eq!(reference, age_on(dob, today), "on {today}");
            today = today.succ_opt().unwrap();
        }
    }

    #[test]
    fn should_serialize_details_with_derived_fields() {
        let details = MemberDetails::new(jon_doe(), NaiveDate::from_ymd_opt(2025, 6, 1).unwrap());
        let json = serde_json::to_value(&details).unwrap();

        assert_eq!(35, json["age"]);
        assert_eq!("Doe Jon Kamau", json["full_name"]);
        assert_eq!(MEMBERSHIP_NUMBER, json["membership_number"]);
        assert_eq!("Ordinary Membership", json["membership_category"]);
    }
}
