use crate::newtypes::CommentId;
use serde::{Deserialize, Serialize};

/// Aggregate data for a comment, computed by grouped count queries at read
/// time rather than kept on the row.
#[derive(PartialEq, Eq, Debug, Serialize, Deserialize, Clone, Default)]
pub struct CommentAggregates {
  pub comment_id: CommentId,
  /// Rows in `comment_like` for this comment.
  pub like_count: i64,
  /// Direct replies, one `parent_id` hop down.
  pub child_count: i64,
  /// Comments sharing this comment's id as their `layer_id`, excluding the
  /// comment itself. Non-zero only for top-level comments.
  pub thread_count: i64,
}
