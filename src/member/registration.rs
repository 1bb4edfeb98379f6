use crate::certificate::config::CertificateConfig;
use crate::database::dao::member::{
    email_exists, id_passport_exists, insert_member, membership_number_exists,
};
use crate::database::error::DatabaseError;
use crate::database::error::DatabaseError::{ConnectionFailed, UniqueViolation};
use crate::database::model::member::NewMember;
use crate::member::MemberDraft;
use crate::member::certificate::{issue_certificate, send_certificate};
use crate::member::error::RegistrationError;
use crate::member::membership_number::generate_membership_number;
use crate::member::validation::{EMAIL_TAKEN, ID_PASSPORT_TAKEN, UniqueField, validate_registration};
use crate::tools::log_error_and_return;
use chrono::{Datelike, Utc};
use diesel::SqliteConnection;
use diesel::r2d2::{ConnectionManager, Pool};
use dto::member::Member;
use dto::member_registration::MemberRegistration;
use log::{error, info, warn};

/// Register an applicant, then issue and email their certificate.
/// Failing to produce or send the certificate doesn't undo the registration.
pub async fn register_member(
    pool: &Pool<ConnectionManager<SqliteConnection>>,
    registration: &MemberRegistration,
    config: &CertificateConfig,
) -> Result<Member, RegistrationError> {
    let member = create_member(pool, registration)?;
    Ok(deliver_certificate(pool, member, config).await)
}

fn create_member(
    pool: &Pool<ConnectionManager<SqliteConnection>>,
    registration: &MemberRegistration,
) -> Result<Member, RegistrationError> {
    let mut connection = pool.get().map_err(log_error_and_return(ConnectionFailed))?;
    let draft = validate_registration(registration, |field, value| match field {
        UniqueField::IdPassport => id_passport_exists(&mut connection, value),
        UniqueField::Email => email_exists(&mut connection, value),
    })?;

    insert_with_new_membership_number(&mut connection, &draft, |connection, year| {
        generate_membership_number(year, &mut rand::rng(), |candidate| {
            membership_number_exists(connection, candidate)
        })
    })
}

/// Another registration may grab the same number between the check and the insert:
/// the unique constraint catches it and `draw_number` is asked for another one.
fn insert_with_new_membership_number<F>(
    connection: &mut SqliteConnection,
    draft: &MemberDraft,
    mut draw_number: F,
) -> Result<Member, RegistrationError>
where
    F: FnMut(&mut SqliteConnection, i32) -> Result<String, DatabaseError>,
{
    loop {
        let registration_date = Utc::now().naive_utc();
        let membership_number = draw_number(connection, registration_date.year())?;
        let new_member = NewMember::new(draft, &membership_number, registration_date)?;

        match insert_member(connection, &new_member) {
            Ok(member) => {
                info!("Member {membership_number} registered");
                return Ok(member);
            }
            Err(UniqueViolation(column)) => match column.as_str() {
                "membership_number" => {
                    warn!("Membership number {membership_number} was taken meanwhile, retrying")
                }
                "id_passport" => {
                    return Err(RegistrationError::invalid_field("id_passport", ID_PASSPORT_TAKEN));
                }
                "email" => return Err(RegistrationError::invalid_field("email", EMAIL_TAKEN)),
                _ => return Err(UniqueViolation(column).into()),
            },
            Err(error) => return Err(error.into()),
        }
    }
}

async fn deliver_certificate(
    pool: &Pool<ConnectionManager<SqliteConnection>>,
    member: Member,
    config: &CertificateConfig,
) -> Member {
    let member = match issue_certificate(pool, &member, config) {
        Ok(member) => member,
        Err(error) => {
            error!(
                "Certificate of {} can't be generated: {error}",
                member.membership_number()
            );
            return member;
        }
    };

    match send_certificate(pool, &member, config).await {
        Ok(member) => member,
        Err(error) => {
            error!(
                "Certificate of {} can't be sent: {error}",
                member.membership_number()
            );
            member
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::dao::member::tests::insert;
    use crate::database::with_temp_database;
    use crate::member::tests::{jon_doe_draft, jonette_snow_draft};
    use crate::member::validation::INVALID_PHONE;
    use crate::tools::env_args::with_env_args;
    use crate::tools::test::tests::temp_dir;
    use dto::member_registration::tests::{jon_doe_registration, jonette_snow_registration};
    use regex::Regex;
    use rocket::futures::executor::block_on;
    use std::collections::HashSet;

    fn register(
        pool: &Pool<ConnectionManager<SqliteConnection>>,
        registration: &MemberRegistration,
        config: &CertificateConfig,
    ) -> Result<Member, RegistrationError> {
        with_env_args(vec![], || block_on(register_member(pool, registration, config)))
    }

    #[test]
    fn should_register_and_issue_certificate() {
        with_temp_database(|pool| {
            let config = CertificateConfig::new(temp_dir());

            let member = register(&pool, &jon_doe_registration(), &config).unwrap();

            let pattern = Regex::new(r"^NPV[0-9]{4}[0-9]{6}$").unwrap();
            assert!(pattern.is_match(member.membership_number()));
            assert!(
                member
                    .membership_number()
                    .starts_with(&format!("NPV{}", member.registration_date().year()))
            );
            assert_eq!("0712345678", member.phone());
            assert!(*member.phone_verified());
            assert!(*member.email_verified());
            assert!(*member.is_active());
            assert!(*member.certificate_generated());
            assert!(config
                .media_root()
                .join(member.certificate_file().clone().unwrap())
                .exists());
            // No email configuration in tests.
            assert!(!*member.certificate_sent());
        })
    }

    #[test]
    fn should_give_unique_membership_numbers() {
        with_temp_database(|pool| {
            let config = CertificateConfig::new(temp_dir());
            let mut membership_numbers = HashSet::new();

            for index in 0..20 {
                let registration = jon_doe_registration()
                    .with_id_passport(&format!("1000{index:04}"))
                    .with_email(&format!("jon.doe.{index}@email.com"));
                let member = register(&pool, &registration, &config).unwrap();
                assert!(membership_numbers.insert(member.membership_number().clone()));
            }

            assert_eq!(20, membership_numbers.len());
        })
    }

    #[test]
    fn should_reject_duplicate_id_passport() {
        with_temp_database(|pool| {
            let config = CertificateConfig::new(temp_dir());
            register(&pool, &jon_doe_registration(), &config).unwrap();
            let registration = jonette_snow_registration().with_id_passport("12345678");

            let result = register(&pool, &registration, &config);

            assert_eq!(
                Err(RegistrationError::invalid_field("id_passport", ID_PASSPORT_TAKEN)),
                result
            );
        })
    }

    #[test]
    fn should_reject_duplicate_email() {
        with_temp_database(|pool| {
            let config = CertificateConfig::new(temp_dir());
            register(&pool, &jon_doe_registration(), &config).unwrap();
            let registration = jonette_snow_registration().with_email("jon.doe@email.com");

            let result = register(&pool, &registration, &config);

            assert_eq!(Err(RegistrationError::invalid_field("email", EMAIL_TAKEN)), result);
        })
    }

    #[test]
    fn should_reject_invalid_phone() {
        with_temp_database(|pool| {
            let config = CertificateConfig::new(temp_dir());
            let registration = jon_doe_registration().with_phone("0812345678");

            let result = register(&pool, &registration, &config);

            assert_eq!(Err(RegistrationError::invalid_field("phone", INVALID_PHONE)), result);
        })
    }

    #[test]
    fn should_map_racing_duplicates_to_field_errors() {
        with_temp_database(|pool| {
            let mut connection = pool.get().unwrap();
            insert(&mut connection, &jon_doe_draft(), "NPV2025000001", 4);

            let result = insert_with_new_membership_number(
                &mut connection,
                &jon_doe_draft().with_id_passport("87654321"),
                |_, _| Ok("NPV2025000002".to_owned()),
            );

            assert_eq!(Err(RegistrationError::invalid_field("email", EMAIL_TAKEN)), result);
        })
    }

    #[test]
    fn should_draw_again_when_membership_number_is_taken_at_insert() {
        with_temp_database(|pool| {
            let mut connection = pool.get().unwrap();
            insert(&mut connection, &jon_doe_draft(), "NPV2025000001", 4);
            let mut candidates = vec!["NPV2025000002", "NPV2025000001"];
            let mut draws = 0;

            let member = insert_with_new_membership_number(
                &mut connection,
                &jonette_snow_draft(),
                |_, _| {
                    draws += 1;
                    Ok(candidates.pop().unwrap().to_owned())
                },
            )
            .unwrap();

            assert_eq!("NPV2025000002", member.membership_number());
            assert_eq!(2, draws);
        })
    }
}
