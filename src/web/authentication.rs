use crate::tools::env_args::retrieve_arg_value;
use derive_getters::Getters;
use rocket::State;
use rocket::http::Status;
use rocket::outcome::{Outcome, try_outcome};
use rocket::request::{self, FromRequest, Request};

pub const ADMIN_TOKEN_HEADER: &str = "X-Admin-Token";
const ADMIN_TOKEN_ARG: &str = "--admin-token";

#[derive(Debug, Clone, Getters)]
pub struct AdminConfig {
    token: Option<String>,
}

impl AdminConfig {
    pub fn new(token: Option<String>) -> Self {
        Self { token }
    }

    /// Without a `--admin-token`, administration is closed.
    pub fn from_args() -> Self {
        Self::new(retrieve_arg_value(ADMIN_TOKEN_ARG).filter(|token| !token.is_empty()))
    }
}

/// If an endpoint is restricted to administrators,
/// then its implementation should require an [Administrator] parameter.
/// Rocket will summon this guard to check the `X-Admin-Token` header against the configured token.
/// If it doesn't match, then the caller receives an Unauthorized status.
#[derive(Debug)]
pub struct Administrator;

#[rocket::async_trait]
impl<'r> FromRequest<'r> for Administrator {
    type Error = ();

    async fn from_request(req: &'r Request<'_>) -> request::Outcome<Self, Self::Error> {
        let config = try_outcome!(req.guard::<&State<AdminConfig>>().await);
        match (config.token(), req.headers().get_one(ADMIN_TOKEN_HEADER)) {
            (Some(expected), Some(given)) if expected == given => Outcome::Success(Administrator),
            _ => Outcome::Forward(Status::Unauthorized),
        }
    }
}
