use crate::certificate::config::CertificateConfig;
use crate::certificate::error::CertificateError::CantReadFile;
use crate::certificate::{generate_certificate, read_certificate};
use crate::database::dao::member::{
    find_by_membership_number, mark_certificate_sent, set_certificate_file,
};
use crate::database::error::DatabaseError::ConnectionFailed;
use crate::error::{ApplicationError, Result};
use crate::notification::send_certificate_email;
use crate::tools::log_error_and_return;
use diesel::SqliteConnection;
use diesel::r2d2::{ConnectionManager, Pool};
use dto::bulk_operation::BulkResult;
use dto::member::Member;
use log::{info, warn};

fn find_member(
    pool: &Pool<ConnectionManager<SqliteConnection>>,
    membership_number: &str,
) -> Result<Option<Member>> {
    let mut connection = pool.get().map_err(log_error_and_return(ConnectionFailed))?;
    Ok(find_by_membership_number(&mut connection, membership_number)?)
}

/// Generate the certificate of a member and record it.
pub fn issue_certificate(
    pool: &Pool<ConnectionManager<SqliteConnection>>,
    member: &Member,
    config: &CertificateConfig,
) -> Result<Member> {
    let reference = generate_certificate(member, config)?;
    let mut connection = pool.get().map_err(log_error_and_return(ConnectionFailed))?;

    set_certificate_file(&mut connection, member.membership_number(), &reference)?
        .ok_or_else(|| ApplicationError::MemberNotFound(member.membership_number().clone()))
}

/// Email its certificate to a member and record the delivery.
pub async fn send_certificate(
    pool: &Pool<ConnectionManager<SqliteConnection>>,
    member: &Member,
    config: &CertificateConfig,
) -> Result<Member> {
    send_certificate_email(member, config).await?;
    let mut connection = pool.get().map_err(log_error_and_return(ConnectionFailed))?;

    mark_certificate_sent(&mut connection, member.membership_number())?
        .ok_or_else(|| ApplicationError::MemberNotFound(member.membership_number().clone()))
}

/// Certificate of a member, ready to be downloaded.
/// A certificate that was never generated, or whose file went missing, is generated again.
pub fn certificate_for_download(
    pool: &Pool<ConnectionManager<SqliteConnection>>,
    membership_number: &str,
    config: &CertificateConfig,
) -> Result<Option<(Member, Vec<u8>)>> {
    let Some(member) = find_member(pool, membership_number)? else {
        return Ok(None);
    };

    if let Some(reference) = member.certificate_file() {
        if let Some(content) = read_certificate(config, reference)? {
            return Ok(Some((member, content)));
        }
        warn!("Certificate file of {membership_number} is missing, generating it again");
    }

    let member = issue_certificate(pool, &member, config)?;
    let content = match member.certificate_file() {
        Some(reference) => read_certificate(config, reference)?,
        None => None,
    }
    .ok_or(CantReadFile)?;

    Ok(Some((member, content)))
}

pub fn generate_certificates(
    pool: &Pool<ConnectionManager<SqliteConnection>>,
    membership_numbers: &[String],
    config: &CertificateConfig,
) -> BulkResult {
    let mut result = BulkResult::default();
    for membership_number in membership_numbers {
        let issued = find_member(pool, membership_number).and_then(|member| match member {
            Some(member) => issue_certificate(pool, &member, config),
            None => Err(ApplicationError::MemberNotFound(membership_number.clone())),
        });
        match issued {
            Ok(_) => result.succeeded(),
            Err(error) => result.failed(format!("Error for {membership_number}: {error}")),
        }
    }

    info!("{} certificate(s) generated", result.count());
    result
}

/// Members without a certificate are skipped.
pub async fn send_certificates(
    pool: &Pool<ConnectionManager<SqliteConnection>>,
    membership_numbers: &[String],
    config: &CertificateConfig,
) -> BulkResult {
    let mut result = BulkResult::default();
    for membership_number in membership_numbers {
        let member = match find_member(pool, membership_number) {
            Ok(Some(member)) => member,
            Ok(None) => {
                result.failed(format!(
                    "Error for {membership_number}: {}",
                    ApplicationError::MemberNotFound(membership_number.clone())
                ));
                continue;
            }
            Err(error) => {
                result.failed(format!("Error for {membership_number}: {error}"));
                continue;
            }
        };
        if member.certificate_file().is_none() {
            warn!("{membership_number} has no certificate to send");
            continue;
        }

        match send_certificate(pool, &member, config).await {
            Ok(_) => result.succeeded(),
            Err(error) => result.failed(format!("Error for {membership_number}: {error}")),
        }
    }

    info!("{} certificate(s) sent", result.count());
    result
}
