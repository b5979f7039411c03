#[cfg(test)]
extern crate serial_test;

use diesel::{
  r2d2::{ConnectionManager, Pool},
  result::Error,
  sql_query,
  Connection,
  RunQueryDsl,
  SqliteConnection,
};
use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};
use quad_db_schema::newtypes::UserId;
use std::{env, env::VarError};

pub mod layer;
pub mod source;

pub type DbPool = Pool<ConnectionManager<SqliteConnection>>;

pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("../../migrations");

pub trait Crud<Form, IdType> {
  fn create(conn: &mut SqliteConnection, form: &Form) -> Result<Self, Error>
  where
    Self: Sized;
  fn read(conn: &mut SqliteConnection, id: IdType) -> Result<Self, Error>
  where
    Self: Sized;
  fn delete(_conn: &mut SqliteConnection, _id: IdType) -> Result<usize, Error>
  where
    Self: Sized,
  {
    unimplemented!()
  }
}

pub trait Likeable<Form, IdType> {
  fn like(conn: &mut SqliteConnection, form: &Form) -> Result<usize, Error>
  where
    Self: Sized;
  fn remove(conn: &mut SqliteConnection, user_id: UserId, item_id: IdType) -> Result<usize, Error>
  where
    Self: Sized;
}

pub trait MaybeOptional<T> {
  fn get_optional(self) -> Option<T>;
}

impl<T> MaybeOptional<T> for T {
  fn get_optional(self) -> Option<T> {
    Some(self)
  }
}

impl<T> MaybeOptional<T> for Option<T> {
  fn get_optional(self) -> Option<T> {
    self
  }
}

pub trait ToSafe {
  type SafeColumns;
  fn safe_columns_tuple() -> Self::SafeColumns;
}

pub fn limit_and_offset(page: Option<i64>, limit: Option<i64>) -> (i64, i64) {
  let page = page.unwrap_or(1);
  let limit = limit.unwrap_or(10);
  let offset = limit * (page - 1);
  (limit, offset)
}

pub fn get_database_url_from_env() -> Result<String, VarError> {
  env::var("QUAD_DATABASE_URL")
}

pub fn run_migrations(conn: &mut SqliteConnection) -> Result<(), Error> {
  conn
    .run_pending_migrations(MIGRATIONS)
    .map_err(|e| Error::QueryBuilderError(format!("running migrations: {}", e).into()))?;
  Ok(())
}

/// Sqlite leaves foreign keys off unless asked.
fn enable_foreign_keys(conn: &mut SqliteConnection) -> Result<(), Error> {
  sql_query("PRAGMA foreign_keys = ON").execute(conn)?;
  Ok(())
}

pub fn build_db_pool(db_file: &str, pool_size: u32) -> Result<DbPool, diesel::r2d2::PoolError> {
  let manager = ConnectionManager::<SqliteConnection>::new(db_file);
  Pool::builder()
    .max_size(pool_size)
    .connection_customizer(Box::new(ForeignKeyCustomizer))
    .build(manager)
}

#[derive(Debug)]
struct ForeignKeyCustomizer;

impl diesel::r2d2::CustomizeConnection<SqliteConnection, diesel::r2d2::Error>
  for ForeignKeyCustomizer
{
  fn on_acquire(&self, conn: &mut SqliteConnection) -> Result<(), diesel::r2d2::Error> {
    enable_foreign_keys(conn).map_err(diesel::r2d2::Error::QueryError)
  }
}

/// Connects to `QUAD_DATABASE_URL`, or an in-memory database when unset, and
/// brings the schema up. Test bootstrap.
pub fn establish_unpooled_connection() -> SqliteConnection {
  let db_url = get_database_url_from_env().unwrap_or_else(|_| ":memory:".to_string());
  let mut conn = SqliteConnection::establish(&db_url)
    .unwrap_or_else(|_| panic!("Error connecting to {}", db_url));
  enable_foreign_keys(&mut conn).expect("enable foreign keys");
  conn
    .run_pending_migrations(MIGRATIONS)
    .expect("load migrations");
  conn
}

#[cfg(test)]
mod tests {
  use super::limit_and_offset;

  #[test]
  fn test_limit_and_offset() {
    assert_eq!(limit_and_offset(None, None), (10, 0));
    assert_eq!(limit_and_offset(Some(2), Some(20)), (20, 20));
    assert_eq!(limit_and_offset(Some(3), None), (10, 20));
  }
}
