use crate::tools::env_args::retrieve_arg_value;
use crate::web::api::server::ApiServer;
use diesel::SqliteConnection;
use diesel::r2d2::{ConnectionManager, Pool};
use rocket::{Build, Rocket};

const PORT_ENV_ARG: &str = "--port";
const DEFAULT_PORT: i32 = 8000;

pub trait Server {
    fn configure(&self, rocket_build: Rocket<Build>) -> Rocket<Build>;
}

pub fn build_server(pool: Pool<ConnectionManager<SqliteConnection>>) -> Rocket<Build> {
    let api_port = get_api_port();
    let rocket_build =
        rocket::build().configure(rocket::Config::figment().merge(("port", api_port)));

    let servers: Vec<Box<dyn Server>> = vec![Box::new(ApiServer::new(pool))];
    servers
        .iter()
        .fold(rocket_build, |rocket_build, server| server.configure(rocket_build))
}

fn get_api_port() -> i32 {
    retrieve_arg_value(PORT_ENV_ARG)
        .and_then(|port| port.parse::<i32>().ok())
        .unwrap_or(DEFAULT_PORT)
}
