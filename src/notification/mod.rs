use crate::certificate::config::CertificateConfig;
use crate::certificate::{certificate_file_name, read_certificate};
use crate::notification::error::NotificationError;
use crate::tools::email::{Attachment, send_email};
use derive_getters::Getters;
use dto::member::Member;
use log::{info, warn};
use tera::{Context, Tera};

pub mod error;

type Result<T, E = NotificationError> = std::result::Result<T, E>;

const DATE_FORMAT: &str = "%B %d, %Y";
const PDF_CONTENT_TYPE: &str = "application/pdf";

const SUBJECT_TEMPLATE: &str = "NPV Membership Certificate - {{ membership_number }}";
const BODY_TEMPLATE: &str = r#"Dear {{ full_name }},

Congratulations! You are now a registered member of the National People's Voice Party.

Your membership details:
- Membership Number: {{ membership_number }}
- Category: {{ membership_category }}
- Registration Date: {{ registration_date }}

Your membership certificate is attached to this email.

Thank you for joining NPV!

Best regards,
National People's Voice Party
"Our Voice, Our Strength"
"#;

#[derive(Debug, Getters, PartialEq)]
pub struct CertificateEmail {
    subject: String,
    body: String,
}

pub fn compose_certificate_email(member: &Member) -> Result<CertificateEmail> {
    let mut context = Context::new();
    context.insert("full_name", &member.full_name());
    context.insert("membership_number", member.membership_number());
    context.insert("membership_category", member.membership_category().as_str());
    context.insert(
        "registration_date",
        &member.registration_date().format(DATE_FORMAT).to_string(),
    );

    Ok(CertificateEmail {
        subject: Tera::one_off(SUBJECT_TEMPLATE, &context, false)?,
        body: Tera::one_off(BODY_TEMPLATE, &context, false)?,
    })
}

/// Email its certificate to a member.
/// The certificate is attached when it can be found on disk, the email is sent anyway otherwise.
pub async fn send_certificate_email(member: &Member, config: &CertificateConfig) -> Result<()> {
    let email = compose_certificate_email(member)?;
    let attachments = certificate_attachment(member, config)?
        .into_iter()
        .collect::<Vec<_>>();
    if attachments.is_empty() {
        warn!(
            "No certificate to attach for {}",
            member.membership_number()
        );
    }

    send_email(member.email(), email.subject(), email.body(), &attachments).await?;
    info!("Certificate sent to {}", member.membership_number());

    Ok(())
}

fn certificate_attachment(member: &Member, config: &CertificateConfig) -> Result<Option<Attachment>> {
    let Some(reference) = member.certificate_file() else {
        return Ok(None);
    };

    let attachment = read_certificate(config, reference)?.map(|content| {
        Attachment::new(
            PDF_CONTENT_TYPE.to_owned(),
            certificate_file_name(member.membership_number()),
            content,
        )
    });

    Ok(attachment)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::certificate::generate_certificate;
    use crate::tools::email::Error::MissingEmailSenderName;
    use crate::tools::env_args::with_env_args;
    use crate::tools::test::tests::temp_dir;
    use dto::member::tests::jon_doe;
    use rocket::futures::executor::block_on;

    #[test]
    fn should_compose_certificate_email() {
        let email = compose_certificate_email(&jon_doe()).unwrap();

        assert_eq!("NPV Membership Certificate - NPV2025123456", email.subject());
        assert!(email.body().starts_with("Dear Doe Jon Kamau,\n"));
        assert!(email.body().contains("- Membership Number: NPV2025123456\n"));
        assert!(email.body().contains("- Category: Ordinary Membership\n"));
        assert!(email.body().contains("- Registration Date: March 04, 2025\n"));
    }

    #[test]
    fn should_not_escape_member_names() {
        let member = jon_doe();
        let member = dto::member::Member::new(
            *member.id(),
            "O'Neil".to_owned(),
            "<Jon> & co".to_owned(),
            member.id_passport().clone(),
            member.phone().clone(),
            member.email().clone(),
            *member.gender(),
            member.ethnicity().clone(),
            member.religion().clone(),
            *member.dob(),
            member.special_interest().clone(),
            member.pwd_number().clone(),
            member.county().clone(),
            member.constituency().clone(),
            member.ward().clone(),
            member.polling_station().clone(),
            *member.membership_category(),
            member.membership_number().clone(),
            *member.registration_date(),
            *member.phone_verified(),
            *member.email_verified(),
            *member.certificate_generated(),
            member.certificate_file().clone(),
            *member.certificate_sent(),
            *member.is_active(),
        );

        let email = compose_certificate_email(&member).unwrap();

        assert!(email.body().starts_with("Dear O'Neil <Jon> & co,\n"));
    }

    #[test]
    fn should_attach_existing_certificate() {
        let config = CertificateConfig::new(temp_dir());
        let member = jon_doe();
        let reference = generate_certificate(&member, &config).unwrap();
        let member = dto::member::tests::with_certificate_file(member, &reference);

        let attachment = certificate_attachment(&member, &config).unwrap().unwrap();

        assert_eq!("NPV_Certificate_NPV2025123456.pdf", attachment.file_name());
        assert_eq!(PDF_CONTENT_TYPE, attachment.content_type());
    }

    #[test]
    fn should_not_attach_missing_certificate() {
        let config = CertificateConfig::new(temp_dir());
        let member = dto::member::tests::with_certificate_file(
            jon_doe(),
            "certificates/NPV_Certificate_NPV2025123456.pdf",
        );

        assert_eq!(None, certificate_attachment(&member, &config).unwrap());
        assert_eq!(None, certificate_attachment(&jon_doe(), &config).unwrap());
    }

    #[test]
    fn should_fail_to_send_without_email_configuration() {
        let config = CertificateConfig::new(temp_dir());

        let result = with_env_args(vec![], || {
            block_on(send_certificate_email(&jon_doe(), &config))
        });

        assert_eq!(Err(NotificationError::Email(MissingEmailSenderName)), result);
    }
}
