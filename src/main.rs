#[macro_use]
extern crate rocket;

use crate::database::init_db;
use crate::web::start_servers;
use log::error;

mod certificate;
mod database;
mod error;
mod member;
mod notification;
mod tools;
mod web;

#[launch]
fn rocket() -> _ {
    env_logger::init();

    let pool = match init_db() {
        Ok(pool) => pool,
        Err(error) => {
            error!("{error:#?}");
            panic!("Initialization failed, aborting.");
        }
    };

    start_servers(pool)
}
