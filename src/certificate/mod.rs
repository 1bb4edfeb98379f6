use crate::certificate::config::CertificateConfig;
use crate::certificate::error::CertificateError;
use crate::certificate::error::CertificateError::{CantCreateFolder, CantReadFile, CantWriteFile};
use crate::certificate::layout::CertificateLayout;
use crate::tools::log_message_and_return;
use dto::member::Member;
use log::{debug, info};
use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

pub mod config;
pub mod error;
mod layout;
mod metrics;
mod render;

/// Folder, relative to the media root, in which certificates are stored.
const CERTIFICATES_FOLDER: &str = "certificates";
const DOCUMENT_TITLE: &str = "NPV Membership Certificate";

type Result<T, E = CertificateError> = std::result::Result<T, E>;

pub fn certificate_file_name(membership_number: &str) -> String {
    format!("NPV_Certificate_{membership_number}.pdf")
}

/// Draw the certificate of a member as a PDF document.
pub fn render_certificate(member: &Member) -> Result<Vec<u8>> {
    let layout = CertificateLayout::for_member(member);
    render::render(&layout, DOCUMENT_TITLE)
}

/// Render the certificate of a member and store it under the media root.
/// Return the reference of the file, relative to the media root.
pub fn generate_certificate(member: &Member, config: &CertificateConfig) -> Result<String> {
    let folder = config.media_root().join(CERTIFICATES_FOLDER);
    fs::create_dir_all(&folder).map_err(log_message_and_return(
        "Can't create certificates folder",
        CantCreateFolder,
    ))?;

    let content = render_certificate(member)?;
    let file_name = certificate_file_name(member.membership_number());
    fs::write(folder.join(&file_name), content).map_err(log_message_and_return(
        "Can't write certificate",
        CantWriteFile,
    ))?;

    info!("Certificate generated for {}", member.membership_number());
    Ok(format!("{CERTIFICATES_FOLDER}/{file_name}"))
}

fn certificate_path(config: &CertificateConfig, reference: &str) -> PathBuf {
    config.media_root().join(reference)
}

/// Read back a stored certificate.
/// Return `None` if the file doesn't exist anymore.
pub fn read_certificate(config: &CertificateConfig, reference: &str) -> Result<Option<Vec<u8>>> {
    match fs::read(certificate_path(config, reference)) {
        Ok(content) => Ok(Some(content)),
        Err(error) if error.kind() == ErrorKind::NotFound => {
            debug!("Certificate {reference} is missing");
            Ok(None)
        }
        Err(error) => Err(log_message_and_return("Can't read certificate", CantReadFile)(
            error,
        )),
    }
}
