use crate::{Crud, Likeable};
use diesel::{dsl::*, result::Error, *};
use quad_db_schema::{
  newtypes::{CommentId, PostId, UserId},
  source::comment::{Comment, CommentForm, CommentLike, CommentLikeForm},
};

pub trait Comment_ {
  /// Stamps a comment's layer. Used when a top-level comment anchors its own
  /// layer and when the backfill job repairs stragglers.
  fn update_layer(
    conn: &mut SqliteConnection,
    comment_id: CommentId,
    new_layer_id: CommentId,
  ) -> Result<Comment, Error>;
  /// Top-level comments of a post, oldest first.
  fn read_for_post(conn: &mut SqliteConnection, for_post_id: PostId)
    -> Result<Vec<Comment>, Error>;
  /// Direct replies of one comment, oldest first.
  fn read_for_parent(
    conn: &mut SqliteConnection,
    for_parent_id: CommentId,
  ) -> Result<Vec<Comment>, Error>;
  /// The whole backfilled thread under one top-level ancestor, at any depth.
  fn read_for_layer(
    conn: &mut SqliteConnection,
    for_layer_id: CommentId,
  ) -> Result<Vec<Comment>, Error>;
  fn is_creator(
    conn: &mut SqliteConnection,
    comment_id: CommentId,
    for_user_id: UserId,
  ) -> Result<bool, Error>;
}

impl Crud<CommentForm, CommentId> for Comment {
  fn read(conn: &mut SqliteConnection, comment_id: CommentId) -> Result<Self, Error> {
    use quad_db_schema::schema::comment::dsl::*;
    comment.find(comment_id).first::<Self>(conn)
  }

  fn delete(conn: &mut SqliteConnection, comment_id: CommentId) -> Result<usize, Error> {
    use quad_db_schema::schema::comment::dsl::*;
    diesel::delete(comment.find(comment_id)).execute(conn)
  }

  fn create(conn: &mut SqliteConnection, comment_form: &CommentForm) -> Result<Self, Error> {
    use quad_db_schema::schema::comment::dsl::*;
    let inserted = insert_into(comment)
      .values(comment_form)
      .get_result::<Self>(conn)?;

    // A top-level comment anchors its own layer, and the id it needs only
    // exists once the row does.
    if inserted.parent_id.is_none() && inserted.layer_id.is_none() {
      return Comment::update_layer(conn, inserted.id, inserted.id);
    }
    Ok(inserted)
  }
}

impl Comment_ for Comment {
  fn update_layer(
    conn: &mut SqliteConnection,
    comment_id: CommentId,
    new_layer_id: CommentId,
  ) -> Result<Comment, Error> {
    use quad_db_schema::schema::comment::dsl::*;
    diesel::update(comment.find(comment_id))
      .set(layer_id.eq(new_layer_id))
      .get_result::<Comment>(conn)
  }

  fn read_for_post(
    conn: &mut SqliteConnection,
    for_post_id: PostId,
  ) -> Result<Vec<Comment>, Error> {
    use quad_db_schema::schema::comment::dsl::*;
    comment
      .filter(post_id.eq(for_post_id))
      .filter(parent_id.is_null())
      .order_by(created_at.asc())
      .then_order_by(id.asc())
      .load::<Comment>(conn)
  }

  fn read_for_parent(
    conn: &mut SqliteConnection,
    for_parent_id: CommentId,
  ) -> Result<Vec<Comment>, Error> {
    use quad_db_schema::schema::comment::dsl::*;
    comment
      .filter(parent_id.eq(for_parent_id))
      .order_by(created_at.asc())
      .then_order_by(id.asc())
      .load::<Comment>(conn)
  }

  fn read_for_layer(
    conn: &mut SqliteConnection,
    for_layer_id: CommentId,
  ) -> Result<Vec<Comment>, Error> {
    use quad_db_schema::schema::comment::dsl::*;
    comment
      .filter(layer_id.eq(for_layer_id))
      .order_by(created_at.asc())
      .then_order_by(id.asc())
      .load::<Comment>(conn)
  }

  fn is_creator(
    conn: &mut SqliteConnection,
    comment_id: CommentId,
    for_user_id: UserId,
  ) -> Result<bool, Error> {
    use quad_db_schema::schema::comment::dsl::*;
    let owner = comment
      .find(comment_id)
      .select(user_id)
      .first::<UserId>(conn)?;
    Ok(owner == for_user_id)
  }
}

impl Likeable<CommentLikeForm, CommentId> for CommentLike {
  /// Idempotent: liking an already-liked comment is a no-op, reported by the
  /// returned row count.
  fn like(conn: &mut SqliteConnection, comment_like_form: &CommentLikeForm) -> Result<usize, Error> {
    use quad_db_schema::schema::comment_like::dsl::*;
    insert_or_ignore_into(comment_like)
      .values(comment_like_form)
      .execute(conn)
  }

  fn remove(
    conn: &mut SqliteConnection,
    for_user_id: UserId,
    for_comment_id: CommentId,
  ) -> Result<usize, Error> {
    use quad_db_schema::schema::comment_like::dsl::*;
    diesel::delete(
      comment_like
        .filter(comment_id.eq(for_comment_id))
        .filter(user_id.eq(for_user_id)),
    )
    .execute(conn)
  }
}
