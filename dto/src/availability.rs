use derive_getters::Getters;
use serde::{Deserialize, Serialize};

/// Answer to an availability check.
/// A field is only present when the matching value has been asked for.
#[derive(Debug, Serialize, Deserialize, Getters, PartialEq, Eq, Clone, Default)]
pub struct Availability {
    #[serde(skip_serializing_if = "Option::is_none", default)]
    id_passport_available: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    email_available: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    message: Option<String>,
}

impl Availability {
    pub fn set_id_passport_available(&mut self, available: bool) {
        self.id_passport_available = Some(available);
        if !available {
            self.message = Some("This ID/Passport is already registered".to_owned());
        }
    }

    pub fn set_email_available(&mut self, available: bool) {
        self.email_available = Some(available);
        if !available {
            self.message = Some("This email is already registered".to_owned());
        }
    }
}
