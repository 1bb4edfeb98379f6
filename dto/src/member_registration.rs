use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Applicant data as submitted to the registration endpoint.
///
/// Every field is optional and kept as raw JSON:
/// missing or wrongly typed values are reported field by field by the server
/// rather than rejected as an unreadable payload.
/// Numbers sent for text fields are read as text.
#[derive(Debug, Serialize, Deserialize, Getters, PartialEq, Clone, Default)]
#[serde(default)]
pub struct MemberRegistration {
    surname: Option<Value>,
    other_names: Option<Value>,
    id_passport: Option<Value>,
    phone: Option<Value>,
    email: Option<Value>,
    gender: Option<Value>,
    ethnicity: Option<Value>,
    religion: Option<Value>,
    dob: Option<Value>,
    special_interest: Option<Value>,
    pwd_number: Option<Value>,
    county: Option<Value>,
    constituency: Option<Value>,
    ward: Option<Value>,
    polling_station: Option<Value>,
    membership_category: Option<Value>,
}

#[cfg(any(test, feature = "test"))]
pub mod tests {
    use super::*;

    impl MemberRegistration {
        pub fn with_id_passport(mut self, id_passport: &str) -> Self {
            self.id_passport = Some(Value::from(id_passport));
            self
        }

        pub fn with_email(mut self, email: &str) -> Self {
            self.email = Some(Value::from(email));
            self
        }

        pub fn with_phone(mut self, phone: &str) -> Self {
            self.phone = Some(Value::from(phone));
            self
        }

        pub fn with_special_interest(mut self, special_interest: Value) -> Self {
            self.special_interest = Some(special_interest);
            self
        }

        pub fn with_gender(mut self, gender: &str) -> Self {
            self.gender = Some(Value::from(gender));
            self
        }

        pub fn with_dob(mut self, dob: &str) -> Self {
            self.dob = Some(Value::from(dob));
            self
        }

        pub fn with_id_passport_value(mut self, id_passport: Value) -> Self {
            self.id_passport = Some(id_passport);
            self
        }

        pub fn with_surname_value(mut self, surname: Value) -> Self {
            self.surname = Some(surname);
            self
        }

        pub fn without_surname(mut self) -> Self {
            self.surname = None;
            self
        }
    }

    pub fn jon_doe_registration() -> MemberRegistration {
        MemberRegistration {
            surname: Some(Value::from("Doe")),
            other_names: Some(Value::from("Jon Kamau")),
            id_passport: Some(Value::from("12345678")),
            phone: Some(Value::from("0712 345 678")),
            email: Some(Value::from("jon.doe@email.com")),
            gender: Some(Value::from("Male")),
            ethnicity: None,
            religion: Some(Value::from("Christian")),
            dob: Some(Value::from("1990-05-17")),
            special_interest: Some(Value::from(vec!["Youth"])),
            pwd_number: None,
            county: Some(Value::from("Kiambu")),
            constituency: Some(Value::from("Ruiru")),
            ward: Some(Value::from("Biashara")),
            polling_station: None,
            membership_category: Some(Value::from("Ordinary Membership")),
        }
    }

    pub fn jonette_snow_registration() -> MemberRegistration {
        MemberRegistration {
            surname: Some(Value::from("Snow")),
            other_names: Some(Value::from("Jonette Wanjiru")),
            id_passport: Some(Value::from("A1234567")),
            phone: Some(Value::from("+254722000111")),
            email: Some(Value::from("jonette.snow@email.com")),
            gender: Some(Value::from("Female")),
            ethnicity: Some(Value::from("Kikuyu")),
            religion: None,
            dob: Some(Value::from("2000-02-29")),
            special_interest: Some(Value::from("[\"Women\", \"PWD\"]")),
            pwd_number: Some(Value::from("PWD/0042")),
            county: Some(Value::from("Nairobi")),
            constituency: Some(Value::from("Westlands")),
            ward: None,
            polling_station: Some(Value::from("Parklands Primary")),
            membership_category: Some(Value::from("Life Membership")),
        }
    }

    #[test]
    fn should_keep_wrongly_typed_values() {
        let registration: MemberRegistration =
            serde_json::from_str(r#"{"id_passport": 12345678, "surname": ["Doe"]}"#).unwrap();

        assert_eq!(&Some(Value::from(12345678)), registration.id_passport());
        assert_eq!(&Some(Value::from(vec!["Doe"])), registration.surname());
    }

    #[test]
    fn should_deserialize_partial_payload() {
        let registration: MemberRegistration =
            serde_json::from_str(r#"{"surname": "Doe", "special_interest": "Youth"}"#).unwrap();

        assert_eq!(&Some(Value::from("Doe")), registration.surname());
        assert_eq!(&Some(Value::from("Youth")), registration.special_interest());
        assert_eq!(&None, registration.email());
    }
}
