use crate::Crud;
use diesel::{dsl::*, result::Error, *};
use quad_db_schema::{
  newtypes::UserId,
  source::user::{User, UserForm},
};

mod safe_type {
  use crate::ToSafe;
  use quad_db_schema::{schema::users::columns::*, source::user::User};

  type Columns = (id, username, degree, pfp_url, email);

  impl ToSafe for User {
    type SafeColumns = Columns;
    fn safe_columns_tuple() -> Self::SafeColumns {
      (id, username, degree, pfp_url, email)
    }
  }
}

impl Crud<UserForm, UserId> for User {
  fn read(conn: &mut SqliteConnection, for_user_id: UserId) -> Result<Self, Error> {
    use quad_db_schema::schema::users::dsl::*;
    users.find(for_user_id).first::<Self>(conn)
  }

  fn delete(conn: &mut SqliteConnection, for_user_id: UserId) -> Result<usize, Error> {
    use quad_db_schema::schema::users::dsl::*;
    diesel::delete(users.find(for_user_id)).execute(conn)
  }

  fn create(conn: &mut SqliteConnection, form: &UserForm) -> Result<Self, Error> {
    use quad_db_schema::schema::users::dsl::*;
    insert_into(users).values(form).get_result::<Self>(conn)
  }
}
