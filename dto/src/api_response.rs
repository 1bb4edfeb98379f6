use crate::member::MemberDetails;
use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub const REGISTRATION_SUCCESSFUL: &str =
    "Registration successful! Check your email for the certificate.";
pub const VALIDATION_FAILED: &str = "Validation failed";
pub const REGISTRATION_FAILED: &str = "Registration failed";
pub const MEMBER_NOT_FOUND: &str = "Member not found";
/// Key of the errors that concern the payload as a whole.
pub const NON_FIELD_ERRORS: &str = "non_field_errors";

/// Messages attached to each invalid field.
pub type FieldErrors = BTreeMap<String, Vec<String>>;

#[derive(Debug, Serialize, Deserialize, Getters, PartialEq, Clone)]
pub struct Registered {
    success: bool,
    message: String,
    membership_number: String,
    data: MemberDetails,
}

impl Registered {
    pub fn new(data: MemberDetails) -> Self {
        Self {
            success: true,
            message: REGISTRATION_SUCCESSFUL.to_owned(),
            membership_number: data.member().membership_number().clone(),
            data,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Getters, PartialEq, Clone)]
pub struct ValidationFailure {
    success: bool,
    message: String,
    errors: FieldErrors,
}

impl ValidationFailure {
    pub fn new(errors: FieldErrors) -> Self {
        Self {
            success: false,
            message: VALIDATION_FAILED.to_owned(),
            errors,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Getters, PartialEq, Clone)]
pub struct Failure {
    success: bool,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    error: Option<String>,
}

impl Failure {
    pub fn new(message: &str, error: Option<String>) -> Self {
        Self {
            success: false,
            message: message.to_owned(),
            error,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Getters, PartialEq, Clone)]
pub struct Found<T> {
    success: bool,
    data: T,
}

impl<T> Found<T> {
    pub fn new(data: T) -> Self {
        Self {
            success: true,
            data,
        }
    }
}
