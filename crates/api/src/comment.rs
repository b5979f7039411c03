use crate::{structs::*, Perform};
use diesel::{result::Error as DieselError, SqliteConnection};
use quad_db_queries::{
  source::comment::Comment_,
  Crud,
  Likeable,
};
use quad_db_schema::{
  newtypes::{CommentId, UserId},
  source::comment::{Comment, CommentForm, CommentLike, CommentLikeForm},
};
use quad_db_views::comment_view::{CommentQueryBuilder, CommentView};
use quad_utils::{utils::check_comment_content, ApiError, QuadError};
use tracing::warn;

impl Perform for CreateComment {
  type Response = CommentResponse;

  fn perform(&self, conn: &mut SqliteConnection) -> Result<CommentResponse, QuadError> {
    check_comment_content(&self.content)?;

    // A reply must land under a live parent on the same post
    if let Some(parent_id) = self.parent_id {
      let parent = Comment::read(conn, parent_id)
        .map_err(|_| ApiError::err("couldnt_create_comment"))?;
      if parent.post_id != self.post_id {
        return Err(ApiError::err("couldnt_create_comment").into());
      }
    }

    let comment_form = CommentForm {
      parent_id: self.parent_id,
      layer_id: self.layer_id,
      ..CommentForm::new(self.user_id, self.post_id, self.content.to_owned())
    };
    let inserted_comment = Comment::create(conn, &comment_form)
      .map_err(|_| ApiError::err("couldnt_create_comment"))?;

    let comment_view = CommentView::read(conn, inserted_comment.id, Some(self.user_id))
      .map_err(|_| ApiError::err("couldnt_find_comment"))?;

    Ok(CommentResponse { comment_view })
  }
}

impl Perform for GetComments {
  type Response = GetCommentsResponse;

  fn perform(&self, conn: &mut SqliteConnection) -> Result<GetCommentsResponse, QuadError> {
    let comments = CommentQueryBuilder::create(conn)
      .for_post_id(self.post_id)
      .top_level_only()
      .my_user_id(self.my_user_id)
      .page(self.page)
      .limit(self.limit)
      .list();

    // Reads are repeatable and low-stakes; a failure renders as "no
    // comments yet" rather than an error
    let comments = match comments {
      Ok(comments) => Some(comments),
      Err(e) => {
        warn!("Failed to fetch comments of post {}: {}", self.post_id, e);
        None
      }
    };

    Ok(GetCommentsResponse { comments })
  }
}

impl Perform for GetReplies {
  type Response = GetRepliesResponse;

  fn perform(&self, conn: &mut SqliteConnection) -> Result<GetRepliesResponse, QuadError> {
    let replies = CommentQueryBuilder::create(conn)
      .for_parent_id(self.parent_id)
      .my_user_id(self.my_user_id)
      .list();
    let replies = replies.and_then(|replies| CommentView::with_children(conn, self.my_user_id, replies));

    let replies = match replies {
      Ok(replies) => Some(replies),
      Err(e) => {
        warn!(
          "Failed to fetch replies of comment {}: {}",
          self.parent_id, e
        );
        None
      }
    };

    Ok(GetRepliesResponse { replies })
  }
}

impl Perform for GetLayer {
  type Response = GetLayerResponse;

  fn perform(&self, conn: &mut SqliteConnection) -> Result<GetLayerResponse, QuadError> {
    let comments = match CommentQueryBuilder::create(conn)
      .for_layer_id(self.layer_id)
      .my_user_id(self.my_user_id)
      .list()
    {
      Ok(comments) => CommentView::link_parents(comments),
      Err(e) => {
        warn!("Failed to fetch layer {}: {}", self.layer_id, e);
        Vec::new()
      }
    };

    Ok(GetLayerResponse { comments })
  }
}

impl Perform for GetComment {
  type Response = GetCommentResponse;

  fn perform(&self, conn: &mut SqliteConnection) -> Result<GetCommentResponse, QuadError> {
    let comment_view = match read_with_parent_context(conn, self) {
      Ok(comment_view) => Some(comment_view),
      Err(e) => {
        warn!("Failed to fetch comment {}: {}", self.comment_id, e);
        None
      }
    };

    Ok(GetCommentResponse { comment_view })
  }
}

fn read_with_parent_context(
  conn: &mut SqliteConnection,
  data: &GetComment,
) -> Result<CommentView, DieselError> {
  let mut comment_view = CommentView::read(conn, data.comment_id, data.my_user_id)?;

  // Deeper than one level under the layer root, the UI shows who is being
  // replied to; that parent takes one more fetch
  if let (Some(_), Some(parent_id)) = (data.layer_id, comment_view.comment.parent_id) {
    if data.layer_id != comment_view.comment.parent_id {
      let parent_view = CommentView::read(conn, parent_id, data.my_user_id)?;
      comment_view.parent = Some(Box::new(parent_view));
    }
  }

  Ok(comment_view)
}

/// Ownership check behind deletes. Missing rows and read failures both come
/// back as a plain `false`.
pub fn can_delete_comment(
  conn: &mut SqliteConnection,
  comment_id: CommentId,
  user_id: UserId,
) -> bool {
  Comment::is_creator(conn, comment_id, user_id).unwrap_or(false)
}

impl Perform for DeleteComment {
  type Response = bool;

  fn perform(&self, conn: &mut SqliteConnection) -> Result<bool, QuadError> {
    if !can_delete_comment(conn, self.comment_id, self.user_id) {
      return Ok(false);
    }
    Comment::delete(conn, self.comment_id)?;
    Ok(true)
  }
}

impl Perform for CreateCommentLike {
  type Response = bool;

  fn perform(&self, conn: &mut SqliteConnection) -> Result<bool, QuadError> {
    let like_form = CommentLikeForm {
      user_id: self.user_id,
      comment_id: self.comment_id,
    };
    match CommentLike::like(conn, &like_form) {
      Ok(inserted) => Ok(inserted > 0),
      Err(e) => {
        warn!("Failed to like comment {}: {}", self.comment_id, e);
        Ok(false)
      }
    }
  }
}

impl Perform for DeleteCommentLike {
  type Response = bool;

  fn perform(&self, conn: &mut SqliteConnection) -> Result<bool, QuadError> {
    match CommentLike::remove(conn, self.user_id, self.comment_id) {
      Ok(removed) => Ok(removed > 0),
      Err(e) => {
        warn!("Failed to unlike comment {}: {}", self.comment_id, e);
        Ok(false)
      }
    }
  }
}

#[cfg(test)]
mod tests {
  use crate::{comment::can_delete_comment, structs::*, Perform};
  use pretty_assertions::assert_eq;
  use quad_db_queries::{establish_unpooled_connection, Crud};
  use quad_db_schema::{
    newtypes::CommentId,
    source::{post::*, user::*},
  };
  use serial_test::serial;

  #[test]
  #[serial]
  fn test_create_and_fetch_flow() {
    let conn = &mut establish_unpooled_connection();

    let asha = User::create(conn, &UserForm::new("asha".into())).unwrap();
    let blake = User::create(conn, &UserForm::new("blake".into())).unwrap();
    let post = Post::create(conn, &PostForm::new("Dorm fair".into(), asha.id)).unwrap();

    // Empty drafts are refused before touching the store
    assert!(CreateComment {
      content: "  ".into(),
      user_id: asha.id,
      post_id: post.id,
      parent_id: None,
      layer_id: None,
    }
    .perform(conn)
    .is_err());

    let top = CreateComment {
      content: "Anyone going?".into(),
      user_id: asha.id,
      post_id: post.id,
      parent_id: None,
      layer_id: None,
    }
    .perform(conn)
    .unwrap()
    .comment_view;
    assert_eq!(Some(top.comment.id), top.comment.layer_id);

    // Replying to a missing parent is refused
    assert!(CreateComment {
      content: "into the void".into(),
      user_id: blake.id,
      post_id: post.id,
      parent_id: Some(CommentId(9999)),
      layer_id: None,
    }
    .perform(conn)
    .is_err());

    let reply = CreateComment {
      content: "I am!".into(),
      user_id: blake.id,
      post_id: post.id,
      parent_id: Some(top.comment.id),
      layer_id: top.comment.layer_id,
    }
    .perform(conn)
    .unwrap()
    .comment_view;
    assert_eq!(top.comment.layer_id, reply.comment.layer_id);

    let nested = CreateComment {
      content: "See you there".into(),
      user_id: asha.id,
      post_id: post.id,
      parent_id: Some(reply.comment.id),
      layer_id: reply.comment.layer_id,
    }
    .perform(conn)
    .unwrap()
    .comment_view;

    let top_level = GetComments {
      post_id: post.id,
      my_user_id: Some(blake.id),
      page: None,
      limit: None,
    }
    .perform(conn)
    .unwrap()
    .comments
    .unwrap();
    assert_eq!(1, top_level.len());
    assert_eq!(2, top_level[0].counts.thread_count);

    // Expanding one branch brings one extra level inline
    let replies = GetReplies {
      parent_id: top.comment.id,
      my_user_id: Some(blake.id),
    }
    .perform(conn)
    .unwrap()
    .replies
    .unwrap();
    assert_eq!(1, replies.len());
    assert_eq!(reply.comment.id, replies[0].comment.id);
    assert_eq!(
      vec![nested.comment.id],
      replies[0]
        .children
        .iter()
        .map(|v| v.comment.id)
        .collect::<Vec<_>>()
    );

    // The flattened layer re-links nested parents found in the batch
    let layer = GetLayer {
      layer_id: top.comment.id,
      my_user_id: None,
    }
    .perform(conn)
    .unwrap()
    .comments;
    assert_eq!(3, layer.len());
    let nested_view = layer
      .iter()
      .find(|v| v.comment.id == nested.comment.id)
      .unwrap();
    assert_eq!(
      Some(reply.comment.id),
      nested_view.parent.as_ref().map(|p| p.comment.id)
    );

    // A layer hint on a single fetch pulls in "replying to" context
    let with_context = GetComment {
      comment_id: nested.comment.id,
      my_user_id: None,
      layer_id: top.comment.layer_id,
    }
    .perform(conn)
    .unwrap()
    .comment_view
    .unwrap();
    assert_eq!(
      Some(reply.comment.id),
      with_context.parent.as_ref().map(|p| p.comment.id)
    );

    // No hint, no extra fetch
    let without_context = GetComment {
      comment_id: nested.comment.id,
      my_user_id: None,
      layer_id: None,
    }
    .perform(conn)
    .unwrap()
    .comment_view
    .unwrap();
    assert!(without_context.parent.is_none());

    // A missing comment reads as None, not an error
    let missing = GetComment {
      comment_id: CommentId(9999),
      my_user_id: None,
      layer_id: None,
    }
    .perform(conn)
    .unwrap()
    .comment_view;
    assert!(missing.is_none());
  }

  #[test]
  #[serial]
  fn test_likes_are_idempotent_booleans() {
    let conn = &mut establish_unpooled_connection();

    let user = User::create(conn, &UserForm::new("dev".into())).unwrap();
    let post = Post::create(conn, &PostForm::new("Lab partners".into(), user.id)).unwrap();
    let comment = CreateComment {
      content: "Looking for one".into(),
      user_id: user.id,
      post_id: post.id,
      parent_id: None,
      layer_id: None,
    }
    .perform(conn)
    .unwrap()
    .comment_view;

    let like = CreateCommentLike {
      comment_id: comment.comment.id,
      user_id: user.id,
    };
    assert!(like.perform(conn).unwrap());
    assert!(!like.perform(conn).unwrap());

    let unlike = DeleteCommentLike {
      comment_id: comment.comment.id,
      user_id: user.id,
    };
    assert!(unlike.perform(conn).unwrap());
    assert!(!unlike.perform(conn).unwrap());
  }

  #[test]
  #[serial]
  fn test_delete_is_ownership_gated() {
    let conn = &mut establish_unpooled_connection();

    let owner = User::create(conn, &UserForm::new("owner".into())).unwrap();
    let other = User::create(conn, &UserForm::new("other".into())).unwrap();
    let post = Post::create(conn, &PostForm::new("Sublet".into(), owner.id)).unwrap();
    let comment = CreateComment {
      content: "Taking offers".into(),
      user_id: owner.id,
      post_id: post.id,
      parent_id: None,
      layer_id: None,
    }
    .perform(conn)
    .unwrap()
    .comment_view;

    assert!(can_delete_comment(conn, comment.comment.id, owner.id));
    assert!(!can_delete_comment(conn, comment.comment.id, other.id));
    assert!(!can_delete_comment(conn, CommentId(9999), owner.id));

    // The wrong user deletes nothing
    assert!(!DeleteComment {
      comment_id: comment.comment.id,
      user_id: other.id,
    }
    .perform(conn)
    .unwrap());

    assert!(DeleteComment {
      comment_id: comment.comment.id,
      user_id: owner.id,
    }
    .perform(conn)
    .unwrap());

    // Already gone: false, not an error
    assert!(!DeleteComment {
      comment_id: comment.comment.id,
      user_id: owner.id,
    }
    .perform(conn)
    .unwrap());
  }
}
