use crate::certificate::config::CertificateConfig;
use crate::database::dao::member::{MemberFilter, search_members, set_active};
use crate::member::certificate;
use crate::tools::{log_error_and_return, log_message_and_return};
use crate::web::api::members_controller::{MemberResponse, today};
use crate::web::authentication::Administrator;
use diesel::SqliteConnection;
use diesel::r2d2::{ConnectionManager, Pool};
use dto::api_response::Found;
use dto::bulk_operation::{BulkRequest, BulkResult};
use dto::gender::Gender;
use dto::member::MemberDetails;
use dto::membership_category::MembershipCategory;
use log::info;
use rocket::State;
use rocket::http::Status;
use rocket::serde::json::Json;
use std::str::FromStr;

fn parse_criterion<T: FromStr<Err = String>>(value: Option<&str>) -> Result<Option<T>, Status> {
    value
        .filter(|value| !value.is_empty())
        .map(T::from_str)
        .transpose()
        .map_err(log_message_and_return("Unknown filter value", Status::BadRequest))
}

/// List members, most recent registrations first.
/// `search` looks into names, contact details and identifiers.
#[allow(clippy::too_many_arguments)]
#[get(
    "/admin/members?<search>&<category>&<gender>&<county>&<certificate_generated>&<certificate_sent>&<is_active>"
)]
pub async fn list_members(
    _administrator: Administrator,
    pool: &State<Pool<ConnectionManager<SqliteConnection>>>,
    search: Option<&str>,
    category: Option<&str>,
    gender: Option<&str>,
    county: Option<&str>,
    certificate_generated: Option<bool>,
    certificate_sent: Option<bool>,
    is_active: Option<bool>,
) -> Result<Json<Found<Vec<MemberDetails>>>, Status> {
    let filter = MemberFilter {
        search: search.map(str::to_owned),
        membership_category: parse_criterion::<MembershipCategory>(category)?,
        gender: parse_criterion::<Gender>(gender)?,
        county: county.filter(|county| !county.is_empty()).map(str::to_owned),
        certificate_generated,
        certificate_sent,
        is_active,
    };

    let mut connection = pool
        .get()
        .map_err(log_error_and_return(Status::InternalServerError))?;
    let members = search_members(&mut connection, &filter)
        .map_err(log_error_and_return(Status::InternalServerError))?;

    let today = today();
    let members = members
        .into_iter()
        .map(|member| MemberDetails::new(member, today))
        .collect();
    Ok(Json(Found::new(members)))
}

#[post(
    "/admin/certificates/generate",
    format = "application/json",
    data = "<request>"
)]
pub async fn generate_certificates(
    _administrator: Administrator,
    pool: &State<Pool<ConnectionManager<SqliteConnection>>>,
    certificate_config: &State<CertificateConfig>,
    request: Json<BulkRequest>,
) -> Json<BulkResult> {
    Json(certificate::generate_certificates(
        pool.inner(),
        request.membership_numbers(),
        certificate_config.inner(),
    ))
}

/// Email their certificate to the given members.
/// Members whose certificate hasn't been generated yet are skipped.
#[post("/admin/certificates/send", format = "application/json", data = "<request>")]
pub async fn send_certificates(
    _administrator: Administrator,
    pool: &State<Pool<ConnectionManager<SqliteConnection>>>,
    certificate_config: &State<CertificateConfig>,
    request: Json<BulkRequest>,
) -> Json<BulkResult> {
    Json(
        certificate::send_certificates(
            pool.inner(),
            request.membership_numbers(),
            certificate_config.inner(),
        )
        .await,
    )
}

#[post("/admin/members/<membership_number>/deactivate")]
pub async fn deactivate_member(
    _administrator: Administrator,
    pool: &State<Pool<ConnectionManager<SqliteConnection>>>,
    membership_number: &str,
) -> Result<MemberResponse, Status> {
    update_activity(pool, membership_number, false)
}

#[post("/admin/members/<membership_number>/activate")]
pub async fn activate_member(
    _administrator: Administrator,
    pool: &State<Pool<ConnectionManager<SqliteConnection>>>,
    membership_number: &str,
) -> Result<MemberResponse, Status> {
    update_activity(pool, membership_number, true)
}

fn update_activity(
    pool: &Pool<ConnectionManager<SqliteConnection>>,
    membership_number: &str,
    active: bool,
) -> Result<MemberResponse, Status> {
    let mut connection = pool
        .get()
        .map_err(log_error_and_return(Status::InternalServerError))?;
    let member = set_active(&mut connection, membership_number, active)
        .map_err(log_error_and_return(Status::InternalServerError))?;
    if member.is_some() {
        info!("Member {membership_number} is now {}", if active { "active" } else { "inactive" });
    }

    Ok(MemberResponse::from(member))
}

#[cfg(test)]
mod tests {
    use crate::certificate::config::CertificateConfig;
    use crate::database::dao::member::tests::insert;
    use crate::member::tests::{jon_doe_draft, jonette_snow_draft};
    use crate::tools::test::tests::temp_dir;
    use crate::web::authentication::{ADMIN_TOKEN_HEADER, AdminConfig};
    use diesel::SqliteConnection;
    use diesel::r2d2::{ConnectionManager, Pool};
    use dto::member::tests::MEMBERSHIP_NUMBER;
    use rocket::http::Header;
    use rocket::local::asynchronous::Client;

    const TOKEN: &str = "s3cr3t";
    const OTHER_MEMBERSHIP_NUMBER: &str = "NPV2025654321";

    fn admin_header() -> Header<'static> {
        Header::new(ADMIN_TOKEN_HEADER, TOKEN)
    }

    /// Jon Doe registered on the 4th, Jonette Snow on the 5th.
    async fn client(pool: Pool<ConnectionManager<SqliteConnection>>) -> Client {
        let mut connection = pool.get().unwrap();
        insert(&mut connection, &jon_doe_draft(), MEMBERSHIP_NUMBER, 4);
        insert(&mut connection, &jonette_snow_draft(), OTHER_MEMBERSHIP_NUMBER, 5);
        drop(connection);

        let rocket = rocket::build()
            .manage(pool)
            .manage(CertificateConfig::new(temp_dir()))
            .manage(AdminConfig::new(Some(TOKEN.to_owned())))
            .mount(
                "/api",
                routes![
                    super::list_members,
                    super::generate_certificates,
                    super::send_certificates,
                    super::deactivate_member,
                    super::activate_member,
                ],
            );
        Client::tracked(rocket).await.unwrap()
    }

    mod list_members {
        use super::{admin_header, client};
        use crate::database::with_temp_database;
        use crate::web::authentication::ADMIN_TOKEN_HEADER;
        use diesel::SqliteConnection;
        use diesel::r2d2::{ConnectionManager, Pool};
        use parameterized::{ide, parameterized};
        use rocket::http::{Header, Status};
        use rocket::serde::json::Value;
        use rocket::tokio::runtime::Runtime;

        ide!();

        async fn listed_numbers(client: &rocket::local::asynchronous::Client, uri: &str) -> Vec<String> {
            let response = client.get(uri.to_owned()).header(admin_header()).dispatch().await;
            assert_eq!(Status::Ok, response.status());
            let body = response.into_json::<Value>().await.unwrap();
            body["data"]
                .as_array()
                .unwrap()
                .iter()
                .map(|member| member["membership_number"].as_str().unwrap().to_owned())
                .collect()
        }

        #[parameterized(
            uri = {
                "/api/admin/members",
                "/api/admin/members?search=doe",
                "/api/admin/members?search=WANJIRU",
                "/api/admin/members?search=0712",
                "/api/admin/members?category=Life%20Membership",
                "/api/admin/members?gender=Male",
                "/api/admin/members?county=Nairobi",
                "/api/admin/members?certificate_generated=true",
                "/api/admin/members?is_active=true&county=Kiambu"
            },
            expected = {
                vec!["NPV2025654321", "NPV2025123456"],
                vec!["NPV2025123456"],
                vec!["NPV2025654321"],
                vec!["NPV2025123456"],
                vec!["NPV2025654321"],
                vec!["NPV2025123456"],
                vec!["NPV2025654321"],
                vec![],
                vec!["NPV2025123456"]
            }
        )]
        fn success(uri: &str, expected: Vec<&str>) {
            async fn test(pool: Pool<ConnectionManager<SqliteConnection>>, uri: &str, expected: Vec<&str>) {
                let client = client(pool).await;

                assert_eq!(expected, listed_numbers(&client, uri).await);
            }
            with_temp_database(|pool| Runtime::new().unwrap().block_on(test(pool, uri, expected)));
        }

        #[test]
        fn fail_when_unknown_category() {
            async fn test(pool: Pool<ConnectionManager<SqliteConnection>>) {
                let client = client(pool).await;

                let response = client
                    .get("/api/admin/members?category=Gold")
                    .header(admin_header())
                    .dispatch()
                    .await;

                assert_eq!(Status::BadRequest, response.status());
            }
            with_temp_database(|pool| Runtime::new().unwrap().block_on(test(pool)));
        }

        #[parameterized(token = {None, Some("guess")})]
        fn fail_when_unauthorized(token: Option<&str>) {
            async fn test(pool: Pool<ConnectionManager<SqliteConnection>>, token: Option<&str>) {
                let client = client(pool).await;
                let mut request = client.get("/api/admin/members");
                if let Some(token) = token {
                    request = request.header(Header::new(ADMIN_TOKEN_HEADER, token.to_owned()));
                }

                let response = request.dispatch().await;

                assert_eq!(Status::Unauthorized, response.status());
            }
            with_temp_database(|pool| Runtime::new().unwrap().block_on(test(pool, token)));
        }
    }

    mod certificates {
        use super::{MEMBERSHIP_NUMBER, admin_header, client};
        use crate::database::dao::member::find_by_membership_number;
        use crate::database::with_temp_database;
        use diesel::SqliteConnection;
        use diesel::r2d2::{ConnectionManager, Pool};
        use dto::bulk_operation::{BulkRequest, BulkResult};
        use rocket::http::{ContentType, Status};
        use rocket::serde::json::json;
        use rocket::tokio::runtime::Runtime;

        #[test]
        fn generate() {
            async fn test(pool: Pool<ConnectionManager<SqliteConnection>>) {
                let client = client(pool.clone()).await;
                let request = BulkRequest::new(vec![
                    MEMBERSHIP_NUMBER.to_owned(),
                    "NPV2025000000".to_owned(),
                ]);

                let response = client
                    .post("/api/admin/certificates/generate")
                    .header(ContentType::JSON)
                    .header(admin_header())
                    .body(json!(request).to_string())
                    .dispatch()
                    .await;

                assert_eq!(Status::Ok, response.status());
                let result = response.into_json::<BulkResult>().await.unwrap();
                assert_eq!(1, *result.count());
                assert_eq!(
                    &vec!["Error for NPV2025000000: Member NPV2025000000 not found".to_owned()],
                    result.errors()
                );
                let member = find_by_membership_number(&mut pool.get().unwrap(), MEMBERSHIP_NUMBER)
                    .unwrap()
                    .unwrap();
                assert!(*member.certificate_generated());
            }
            with_temp_database(|pool| Runtime::new().unwrap().block_on(test(pool)));
        }

        #[test]
        fn send_skips_members_without_certificate() {
            async fn test(pool: Pool<ConnectionManager<SqliteConnection>>) {
                let client = client(pool).await;
                let request = BulkRequest::new(vec![MEMBERSHIP_NUMBER.to_owned()]);

                let response = client
                    .post("/api/admin/certificates/send")
                    .header(ContentType::JSON)
                    .header(admin_header())
                    .body(json!(request).to_string())
                    .dispatch()
                    .await;

                assert_eq!(Status::Ok, response.status());
                assert_eq!(
                    BulkResult::default(),
                    response.into_json::<BulkResult>().await.unwrap()
                );
            }
            with_temp_database(|pool| Runtime::new().unwrap().block_on(test(pool)));
        }

        #[test]
        fn fail_when_unauthorized() {
            async fn test(pool: Pool<ConnectionManager<SqliteConnection>>) {
                let client = client(pool).await;
                let request = BulkRequest::new(vec![MEMBERSHIP_NUMBER.to_owned()]);

                let response = client
                    .post("/api/admin/certificates/generate")
                    .header(ContentType::JSON)
                    .body(json!(request).to_string())
                    .dispatch()
                    .await;

                assert_eq!(Status::Unauthorized, response.status());
            }
            with_temp_database(|pool| Runtime::new().unwrap().block_on(test(pool)));
        }
    }

    mod activity {
        use super::{MEMBERSHIP_NUMBER, admin_header, client};
        use crate::database::with_temp_database;
        use diesel::SqliteConnection;
        use diesel::r2d2::{ConnectionManager, Pool};
        use rocket::http::Status;
        use rocket::serde::json::{Value, json};
        use rocket::tokio::runtime::Runtime;

        #[test]
        fn deactivate_and_activate() {
            async fn test(pool: Pool<ConnectionManager<SqliteConnection>>) {
                let client = client(pool).await;

                let response = client
                    .post(format!("/api/admin/members/{MEMBERSHIP_NUMBER}/deactivate"))
                    .header(admin_header())
                    .dispatch()
                    .await;
                assert_eq!(Status::Ok, response.status());
                let body = response.into_json::<Value>().await.unwrap();
                assert_eq!(json!(false), body["data"]["is_active"]);

                let response = client
                    .post(format!("/api/admin/members/{MEMBERSHIP_NUMBER}/activate"))
                    .header(admin_header())
                    .dispatch()
                    .await;
                let body = response.into_json::<Value>().await.unwrap();
                assert_eq!(json!(true), body["data"]["is_active"]);
            }
            with_temp_database(|pool| Runtime::new().unwrap().block_on(test(pool)));
        }

        #[test]
        fn not_found() {
            async fn test(pool: Pool<ConnectionManager<SqliteConnection>>) {
                let client = client(pool).await;

                let response = client
                    .post("/api/admin/members/NPV2025000000/deactivate")
                    .header(admin_header())
                    .dispatch()
                    .await;

                assert_eq!(Status::NotFound, response.status());
            }
            with_temp_database(|pool| Runtime::new().unwrap().block_on(test(pool)));
        }
    }
}
