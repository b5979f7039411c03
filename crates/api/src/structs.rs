use quad_db_schema::newtypes::{CommentId, PostId, UserId};
use quad_db_views::comment_view::CommentView;
use serde::{Deserialize, Serialize};

#[derive(Deserialize)]
pub struct CreateComment {
  pub content: String,
  pub user_id: UserId,
  pub post_id: PostId,
  pub parent_id: Option<CommentId>,
  /// The layer of the thread being replied into, when the client knows it
  /// from the views it already holds. Left out, the reply stays unlayered
  /// until the backfill job places it.
  pub layer_id: Option<CommentId>,
}

#[derive(Serialize, Clone)]
pub struct CommentResponse {
  pub comment_view: CommentView,
}

#[derive(Deserialize)]
pub struct GetComments {
  pub post_id: PostId,
  pub my_user_id: Option<UserId>,
  pub page: Option<i64>,
  pub limit: Option<i64>,
}

#[derive(Serialize, Clone)]
pub struct GetCommentsResponse {
  /// None when the read failed; the UI renders that the same as no
  /// comments.
  pub comments: Option<Vec<CommentView>>,
}

#[derive(Deserialize)]
pub struct GetReplies {
  pub parent_id: CommentId,
  pub my_user_id: Option<UserId>,
}

#[derive(Serialize, Clone)]
pub struct GetRepliesResponse {
  pub replies: Option<Vec<CommentView>>,
}

#[derive(Deserialize)]
pub struct GetLayer {
  pub layer_id: CommentId,
  pub my_user_id: Option<UserId>,
}

#[derive(Serialize, Clone)]
pub struct GetLayerResponse {
  /// Empty, not None, when the read failed.
  pub comments: Vec<CommentView>,
}

#[derive(Deserialize)]
pub struct GetComment {
  pub comment_id: CommentId,
  pub my_user_id: Option<UserId>,
  /// When set and the comment is nested deeper than one level under that
  /// layer's root, the parent is fetched too, for "replying to" context.
  pub layer_id: Option<CommentId>,
}

#[derive(Serialize, Clone)]
pub struct GetCommentResponse {
  pub comment_view: Option<CommentView>,
}

#[derive(Deserialize)]
pub struct DeleteComment {
  pub comment_id: CommentId,
  pub user_id: UserId,
}

#[derive(Deserialize)]
pub struct CreateCommentLike {
  pub comment_id: CommentId,
  pub user_id: UserId,
}

#[derive(Deserialize)]
pub struct DeleteCommentLike {
  pub comment_id: CommentId,
  pub user_id: UserId,
}
