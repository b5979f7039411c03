use crate::{
  naive_now,
  newtypes::{PostId, UserId},
  schema::post,
};
use serde::{Deserialize, Serialize};

/// The root a comment thread hangs off. Posts are owned by another part of
/// the app; only the columns comments need are modeled here.
#[derive(Clone, Queryable, Identifiable, PartialEq, Debug, Serialize, Deserialize)]
#[diesel(table_name = post)]
pub struct Post {
  pub id: PostId,
  pub name: String,
  pub user_id: UserId,
  pub created_at: chrono::NaiveDateTime,
}

#[derive(Insertable, Clone, Default)]
#[diesel(table_name = post)]
pub struct PostForm {
  pub name: String,
  pub user_id: UserId,
  pub created_at: Option<chrono::NaiveDateTime>,
}

impl PostForm {
  pub fn new(name: String, user_id: UserId) -> Self {
    PostForm {
      name,
      user_id,
      created_at: Some(naive_now()),
    }
  }
}
