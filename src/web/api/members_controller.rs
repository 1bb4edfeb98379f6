use crate::certificate::config::CertificateConfig;
use crate::database::dao::member::{email_exists, find_by_membership_number, id_passport_exists};
use crate::member::error::RegistrationError;
use crate::member::registration::register_member;
use crate::tools::log_error_and_return;
use chrono::{NaiveDate, Utc};
use diesel::SqliteConnection;
use diesel::r2d2::{ConnectionManager, Pool};
use dto::api_response::{
    FieldErrors, Failure, Found, MEMBER_NOT_FOUND, NON_FIELD_ERRORS, REGISTRATION_FAILED,
    Registered, ValidationFailure,
};
use dto::availability::Availability;
use dto::member::{Member, MemberDetails};
use dto::member_registration::MemberRegistration;
use log::{debug, error};
use rocket::State;
use rocket::http::Status;
use rocket::serde::json::{self, Json};

#[derive(Responder)]
pub enum RegistrationResponse {
    #[response(status = 201)]
    Registered(Json<Registered>),
    #[response(status = 400)]
    Invalid(Json<ValidationFailure>),
    #[response(status = 500)]
    Failed(Json<Failure>),
}

#[derive(Responder)]
pub enum MemberResponse {
    Found(Json<Found<MemberDetails>>),
    #[response(status = 404)]
    NotFound(Json<Failure>),
}

impl From<Option<Member>> for MemberResponse {
    fn from(member: Option<Member>) -> Self {
        match member {
            Some(member) => MemberResponse::Found(Json(Found::new(MemberDetails::new(
                member,
                today(),
            )))),
            None => MemberResponse::NotFound(Json(Failure::new(MEMBER_NOT_FOUND, None))),
        }
    }
}

/// Ages are computed on the UTC calendar date.
pub fn today() -> NaiveDate {
    Utc::now().date_naive()
}

/// Register a new member.
/// The certificate is generated and emailed along the way,
/// yet failing to do so doesn't fail the registration.
#[post("/register", format = "application/json", data = "<registration>")]
pub async fn register(
    pool: &State<Pool<ConnectionManager<SqliteConnection>>>,
    certificate_config: &State<CertificateConfig>,
    registration: Result<Json<MemberRegistration>, json::Error<'_>>,
) -> RegistrationResponse {
    let registration = match registration {
        Ok(registration) => registration,
        Err(error) => {
            debug!("Unreadable registration payload: {error}");
            return RegistrationResponse::Invalid(Json(ValidationFailure::new(
                FieldErrors::from([(NON_FIELD_ERRORS.to_owned(), vec![error.to_string()])]),
            )));
        }
    };
    match register_member(pool.inner(), &registration, certificate_config.inner()).await {
        Ok(member) => RegistrationResponse::Registered(Json(Registered::new(MemberDetails::new(
            member,
            today(),
        )))),
        Err(RegistrationError::Invalid(errors)) => {
            debug!("Registration rejected: {errors:?}");
            RegistrationResponse::Invalid(Json(ValidationFailure::new(errors)))
        }
        Err(error) => {
            error!("Registration failed\n{error:#?}");
            RegistrationResponse::Failed(Json(Failure::new(
                REGISTRATION_FAILED,
                Some(error.to_string()),
            )))
        }
    }
}

/// Tell whether an ID/passport number and an email can still be used to register.
/// Only the values that are given are checked.
#[get("/check-availability?<id_passport>&<email>")]
pub async fn check_availability(
    pool: &State<Pool<ConnectionManager<SqliteConnection>>>,
    id_passport: Option<&str>,
    email: Option<&str>,
) -> Result<Json<Availability>, Status> {
    let mut connection = pool
        .get()
        .map_err(log_error_and_return(Status::InternalServerError))?;
    let mut availability = Availability::default();

    if let Some(id_passport) = id_passport.map(str::trim).filter(|value| !value.is_empty()) {
        let taken = id_passport_exists(&mut connection, id_passport)
            .map_err(log_error_and_return(Status::InternalServerError))?;
        availability.set_id_passport_available(!taken);
    }
    if let Some(email) = email.map(str::trim).filter(|value| !value.is_empty()) {
        let taken = email_exists(&mut connection, email)
            .map_err(log_error_and_return(Status::InternalServerError))?;
        availability.set_email_available(!taken);
    }

    Ok(Json(availability))
}

#[get("/member/<membership_number>")]
pub async fn member_details(
    pool: &State<Pool<ConnectionManager<SqliteConnection>>>,
    membership_number: &str,
) -> Result<MemberResponse, Status> {
    let mut connection = pool
        .get()
        .map_err(log_error_and_return(Status::InternalServerError))?;
    let member = find_by_membership_number(&mut connection, membership_number)
        .map_err(log_error_and_return(Status::InternalServerError))?;

    Ok(MemberResponse::from(member))
}
