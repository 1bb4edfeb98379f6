use crate::database::error::DatabaseError;
use crate::database::error::DatabaseError::{ConnectionFailed, MissingDatabaseUrl};
use crate::database::migrations::run_migrations;
use crate::error::Result;
use crate::tools::env_args::retrieve_expected_arg_value;
use crate::tools::log_error_and_return;
use diesel::SqliteConnection;
use diesel::connection::SimpleConnection;
use diesel::r2d2::{ConnectionManager, CustomizeConnection, Pool};
use log::info;

pub mod dao;
pub mod error;
mod migrations;
pub(crate) mod model;
mod schema;

const DATABASE_URL_ARG: &str = "--database-url";
/// Concurrent writers wait that long for the SQLite lock instead of failing right away.
const BUSY_TIMEOUT_MS: u32 = 5_000;

#[derive(Debug)]
struct ConnectionOptions;

impl CustomizeConnection<SqliteConnection, diesel::r2d2::Error> for ConnectionOptions {
    fn on_acquire(&self, connection: &mut SqliteConnection) -> Result<(), diesel::r2d2::Error> {
        connection
            .batch_execute(&format!("PRAGMA busy_timeout = {BUSY_TIMEOUT_MS};"))
            .map_err(diesel::r2d2::Error::QueryError)
    }
}

/// Open the database given by `--database-url` and bring its schema up to date.
pub fn init_db() -> Result<Pool<ConnectionManager<SqliteConnection>>> {
    let database_url = retrieve_expected_arg_value(DATABASE_URL_ARG, MissingDatabaseUrl)?;
    let pool = create_pool(&database_url)?;
    let mut connection = pool.get().map_err(log_error_and_return(ConnectionFailed))?;
    run_migrations(&mut *connection)?;
    info!("Database {database_url} is ready");

    Ok(pool)
}

fn create_pool(
    database_url: &str,
) -> Result<Pool<ConnectionManager<SqliteConnection>>, DatabaseError> {
    let manager = ConnectionManager::<SqliteConnection>::new(database_url);
    Pool::builder()
        .connection_customizer(Box::new(ConnectionOptions))
        .build(manager)
        .map_err(log_error_and_return(ConnectionFailed))
}

/// Run `function` against a pool backed by a fresh database located in a temporary folder.
#[cfg(test)]
pub fn with_temp_database<F, T>(function: F) -> T
where
    F: FnOnce(Pool<ConnectionManager<SqliteConnection>>) -> T,
{
    let temp_dir = crate::tools::test::tests::temp_dir();
    let database_url = temp_dir.join("database.db").to_str().unwrap().to_owned();
    let pool = create_pool(&database_url).unwrap();
    run_migrations(&mut *pool.get().unwrap()).unwrap();

    function(pool)
}

#[cfg(test)]
mod tests {
    use crate::database::error::DatabaseError::MissingDatabaseUrl;
    use crate::database::init_db;
    use crate::error::ApplicationError;
    use crate::tools::env_args::with_env_args;
    use crate::tools::test::tests::temp_dir;

    #[test]
    fn should_init_db() {
        let database_url = temp_dir().join("database.db");
        let args = vec![format!("--database-url={}", database_url.to_str().unwrap())];

        let pool = with_env_args(args, init_db).unwrap();

        assert!(pool.get().is_ok());
        assert!(database_url.exists());
    }

    #[test]
    fn should_fail_to_init_db_without_url() {
        let error = with_env_args(vec![], init_db).err().unwrap();

        assert!(matches!(error, ApplicationError::Database(MissingDatabaseUrl)));
    }
}
