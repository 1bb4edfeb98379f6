use crate::certificate::config::CertificateConfig;
use crate::web::api::{admin_controller, certificates_controller, members_controller};
use crate::web::authentication::AdminConfig;
use crate::web::server::Server;
use diesel::SqliteConnection;
use diesel::r2d2::{ConnectionManager, Pool};
use log::{info, warn};
use rocket::{Build, Rocket};

pub struct ApiServer {
    pool: Pool<ConnectionManager<SqliteConnection>>,
}

impl ApiServer {
    pub fn new(pool: Pool<ConnectionManager<SqliteConnection>>) -> Self {
        Self { pool }
    }
}

impl Server for ApiServer {
    fn configure(&self, rocket_build: Rocket<Build>) -> Rocket<Build> {
        let certificate_config = CertificateConfig::from_args();
        info!(
            "Certificates are stored under {}",
            certificate_config.media_root().display()
        );
        let admin_config = AdminConfig::from_args();
        if admin_config.token().is_none() {
            warn!("No --admin-token given, administration endpoints are disabled");
        }

        rocket_build
            .manage(self.pool.clone())
            .manage(certificate_config)
            .manage(admin_config)
            .mount(
                "/api",
                routes![
                    members_controller::register,
                    members_controller::check_availability,
                    members_controller::member_details,
                    certificates_controller::download_certificate,
                    admin_controller::list_members,
                    admin_controller::generate_certificates,
                    admin_controller::send_certificates,
                    admin_controller::deactivate_member,
                    admin_controller::activate_member,
                ],
            )
    }
}
