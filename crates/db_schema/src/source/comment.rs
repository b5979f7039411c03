use crate::{
  naive_now,
  newtypes::{CommentId, PostId, UserId},
  schema::{comment, comment_like},
  source::post::Post,
};
use serde::{Deserialize, Serialize};

/// One node of a reply tree, as stored.
///
/// `parent_id` is the true tree edge. `layer_id` is the flattening key: every
/// comment in a thread shares the `layer_id` of the thread's top-level
/// ancestor, whose `layer_id` is its own id. A reply created before its
/// ancestry was resolved carries no `layer_id` until the backfill job fills
/// it in.
#[derive(Clone, Queryable, Identifiable, Associations, PartialEq, Debug, Serialize, Deserialize)]
#[diesel(table_name = comment, belongs_to(Post))]
pub struct Comment {
  pub id: CommentId,
  pub content: String,
  pub user_id: UserId,
  pub post_id: PostId,
  pub parent_id: Option<CommentId>,
  pub layer_id: Option<CommentId>,
  pub created_at: chrono::NaiveDateTime,
}

#[derive(Insertable, Clone, Default)]
#[diesel(table_name = comment)]
pub struct CommentForm {
  pub content: String,
  pub user_id: UserId,
  pub post_id: PostId,
  pub parent_id: Option<CommentId>,
  pub layer_id: Option<CommentId>,
  pub created_at: Option<chrono::NaiveDateTime>,
}

impl CommentForm {
  pub fn new(user_id: UserId, post_id: PostId, content: String) -> Self {
    CommentForm {
      content,
      user_id,
      post_id,
      parent_id: None,
      layer_id: None,
      created_at: Some(naive_now()),
    }
  }
}

#[derive(Clone, Queryable, Identifiable, Associations, PartialEq, Debug, Serialize)]
#[diesel(table_name = comment_like, belongs_to(Comment))]
pub struct CommentLike {
  pub id: i32,
  pub user_id: UserId,
  pub comment_id: CommentId,
  pub created_at: chrono::NaiveDateTime,
}

#[derive(Insertable, Clone)]
#[diesel(table_name = comment_like)]
pub struct CommentLikeForm {
  pub user_id: UserId,
  pub comment_id: CommentId,
}
