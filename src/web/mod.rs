use crate::web::server::build_server;
use diesel::SqliteConnection;
use diesel::r2d2::{ConnectionManager, Pool};
use rocket::{Build, Rocket};

mod api;
mod authentication;
mod server;

pub fn start_servers(pool: Pool<ConnectionManager<SqliteConnection>>) -> Rocket<Build> {
    build_server(pool)
}
