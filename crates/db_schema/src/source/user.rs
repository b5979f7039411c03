use crate::{naive_now, newtypes::UserId, schema::users};
use serde::{Deserialize, Serialize};

/// A profile row. Credentials and sessions live in the managed auth
/// service, not here.
#[derive(Clone, Queryable, Identifiable, PartialEq, Debug, Serialize)]
#[diesel(table_name = users)]
pub struct User {
  pub id: UserId,
  pub username: String,
  pub degree: Option<String>,
  pub pfp_url: Option<String>,
  pub email: Option<String>,
  pub bio: Option<String>,
  pub created_at: chrono::NaiveDateTime,
}

/// The author projection embedded in comment views.
#[derive(Clone, Queryable, PartialEq, Debug, Serialize, Deserialize)]
pub struct UserSafe {
  pub id: UserId,
  pub username: String,
  pub degree: Option<String>,
  pub pfp_url: Option<String>,
  pub email: Option<String>,
}

#[derive(Insertable, Clone, Default)]
#[diesel(table_name = users)]
pub struct UserForm {
  pub username: String,
  pub degree: Option<String>,
  pub pfp_url: Option<String>,
  pub email: Option<String>,
  pub bio: Option<String>,
  pub created_at: Option<chrono::NaiveDateTime>,
}

impl UserForm {
  pub fn new(username: String) -> Self {
    UserForm {
      username,
      created_at: Some(naive_now()),
      ..UserForm::default()
    }
  }
}
