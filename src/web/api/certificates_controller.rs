use crate::certificate::certificate_file_name;
use crate::certificate::config::CertificateConfig;
use crate::member::certificate::certificate_for_download;
use diesel::SqliteConnection;
use diesel::r2d2::{ConnectionManager, Pool};
use dto::api_response::MEMBER_NOT_FOUND;
use log::error;
use rocket::State;
use rocket::http::Header;

#[derive(Responder)]
pub enum CertificateResponse {
    #[response(content_type = "application/pdf")]
    Certificate(Vec<u8>, Header<'static>),
    #[response(status = 404)]
    NotFound(String),
    #[response(status = 500)]
    Failed(String),
}

fn attachment_header(membership_number: &str) -> Header<'static> {
    Header::new(
        "Content-Disposition",
        format!(
            "attachment; filename=\"{}\"",
            certificate_file_name(membership_number)
        ),
    )
}

/// Download the certificate of a member, generating it if needed.
#[get("/certificate/<membership_number>")]
pub async fn download_certificate(
    pool: &State<Pool<ConnectionManager<SqliteConnection>>>,
    certificate_config: &State<CertificateConfig>,
    membership_number: &str,
) -> CertificateResponse {
    match certificate_for_download(pool.inner(), membership_number, certificate_config.inner()) {
        Ok(Some((member, content))) => {
            CertificateResponse::Certificate(content, attachment_header(member.membership_number()))
        }
        Ok(None) => CertificateResponse::NotFound(MEMBER_NOT_FOUND.to_owned()),
        Err(error) => {
            error!("Can't serve certificate of {membership_number}\n{error:#?}");
            CertificateResponse::Failed(format!("Error: {error}"))
        }
    }
}
