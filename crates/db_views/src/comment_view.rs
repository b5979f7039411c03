use diesel::{dsl::*, result::Error, *};
use quad_db_queries::{limit_and_offset, MaybeOptional, ToSafe};
use quad_db_schema::{
  aggregates::comment_aggregates::CommentAggregates,
  newtypes::{CommentId, PostId, UserId},
  schema::{comment, comment_like, users},
  source::{
    comment::Comment,
    user::{User, UserSafe},
  },
};
use serde::Serialize;
use std::collections::{HashMap, HashSet};

#[derive(Debug, PartialEq, Serialize, Clone)]
pub struct CommentView {
  pub comment: Comment,
  pub creator: UserSafe,
  pub counts: CommentAggregates,
  /// Whether the requesting user has liked this comment.
  pub my_like: bool,
  /// The in-thread parent, re-linked client-side for replies nested deeper
  /// than one level under their layer's root. A parent outside the fetched
  /// batch stays unlinked; resolving it needs another fetch.
  pub parent: Option<Box<CommentView>>,
  /// In-memory only, filled by reply fetches and the tree merge engine.
  pub children: Vec<CommentView>,
}

type CommentUserTuple = (Comment, UserSafe);

/// Turns joined rows into views by batching up the aggregate lookups:
/// like counts, direct-reply counts and layer sizes come from three grouped
/// queries, the viewer's own likes from a fourth.
fn annotate(
  conn: &mut SqliteConnection,
  my_user_id: Option<UserId>,
  pairs: Vec<CommentUserTuple>,
) -> Result<Vec<CommentView>, Error> {
  if pairs.is_empty() {
    return Ok(Vec::new());
  }
  let ids: Vec<CommentId> = pairs.iter().map(|(c, _)| c.id).collect();

  let like_counts: HashMap<CommentId, i64> = comment_like::table
    .filter(comment_like::comment_id.eq_any(ids.clone()))
    .group_by(comment_like::comment_id)
    .select((comment_like::comment_id, count_star()))
    .load::<(CommentId, i64)>(conn)?
    .into_iter()
    .collect();

  let child_counts: HashMap<Option<CommentId>, i64> = comment::table
    .filter(comment::parent_id.eq_any(ids.clone()))
    .group_by(comment::parent_id)
    .select((comment::parent_id, count_star()))
    .load::<(Option<CommentId>, i64)>(conn)?
    .into_iter()
    .collect();

  let thread_counts: HashMap<Option<CommentId>, i64> = comment::table
    .filter(comment::layer_id.eq_any(ids.clone()))
    .group_by(comment::layer_id)
    .select((comment::layer_id, count_star()))
    .load::<(Option<CommentId>, i64)>(conn)?
    .into_iter()
    .collect();

  let my_likes: HashSet<CommentId> = match my_user_id {
    Some(for_user_id) => comment_like::table
      .filter(comment_like::user_id.eq(for_user_id))
      .filter(comment_like::comment_id.eq_any(ids))
      .select(comment_like::comment_id)
      .load::<CommentId>(conn)?
      .into_iter()
      .collect(),
    None => HashSet::new(),
  };

  Ok(
    pairs
      .into_iter()
      .map(|(comment, creator)| {
        // A top-level comment is a member of its own layer; its thread size
        // should not count itself.
        let own_layer_member = comment.layer_id == Some(comment.id);
        let thread_count = thread_counts.get(&Some(comment.id)).copied().unwrap_or(0)
          - i64::from(own_layer_member);
        CommentView {
          counts: CommentAggregates {
            comment_id: comment.id,
            like_count: like_counts.get(&comment.id).copied().unwrap_or(0),
            child_count: child_counts.get(&Some(comment.id)).copied().unwrap_or(0),
            thread_count,
          },
          my_like: my_likes.contains(&comment.id),
          parent: None,
          children: Vec::new(),
          creator,
          comment,
        }
      })
      .collect(),
  )
}

impl CommentView {
  pub fn read(
    conn: &mut SqliteConnection,
    comment_id: CommentId,
    my_user_id: Option<UserId>,
  ) -> Result<Self, Error> {
    let pair = comment::table
      .find(comment_id)
      .inner_join(users::table)
      .select((comment::all_columns, User::safe_columns_tuple()))
      .first::<CommentUserTuple>(conn)?;

    annotate(conn, my_user_id, vec![pair])?
      .pop()
      .ok_or(Error::NotFound)
  }

  /// Re-links each comment of one fetched layer to its in-batch parent.
  /// Comments sitting directly under the layer's root need no link; the rest
  /// get `parent` set when the parent is part of the batch, and stay
  /// unlinked when it is not.
  pub fn link_parents(comments: Vec<CommentView>) -> Vec<CommentView> {
    let by_id: HashMap<CommentId, CommentView> = comments
      .iter()
      .map(|view| (view.comment.id, view.clone()))
      .collect();

    comments
      .into_iter()
      .map(|mut view| {
        if let Some(parent_id) = view.comment.parent_id {
          if view.comment.layer_id != Some(parent_id) {
            view.parent = by_id.get(&parent_id).cloned().map(Box::new);
          }
        }
        view
      })
      .collect()
  }

  /// Attaches one level of annotated children to each of the given views,
  /// for the expand-one-level reply fetch.
  pub fn with_children(
    conn: &mut SqliteConnection,
    my_user_id: Option<UserId>,
    parents: Vec<CommentView>,
  ) -> Result<Vec<CommentView>, Error> {
    if parents.is_empty() {
      return Ok(parents);
    }
    let parent_ids: Vec<CommentId> = parents.iter().map(|view| view.comment.id).collect();

    let pairs = comment::table
      .inner_join(users::table)
      .filter(comment::parent_id.eq_any(parent_ids))
      .select((comment::all_columns, User::safe_columns_tuple()))
      .order_by(comment::created_at.asc())
      .then_order_by(comment::id.asc())
      .load::<CommentUserTuple>(conn)?;
    let children = annotate(conn, my_user_id, pairs)?;

    let mut by_parent: HashMap<CommentId, Vec<CommentView>> = HashMap::new();
    for child in children {
      if let Some(parent_id) = child.comment.parent_id {
        by_parent.entry(parent_id).or_default().push(child);
      }
    }

    Ok(
      parents
        .into_iter()
        .map(|mut parent| {
          parent.children = by_parent.remove(&parent.comment.id).unwrap_or_default();
          parent
        })
        .collect(),
    )
  }
}

pub struct CommentQueryBuilder<'a> {
  conn: &'a mut SqliteConnection,
  for_post_id: Option<PostId>,
  for_parent_id: Option<CommentId>,
  for_layer_id: Option<CommentId>,
  my_user_id: Option<UserId>,
  top_level_only: bool,
  page: Option<i64>,
  limit: Option<i64>,
}

impl<'a> CommentQueryBuilder<'a> {
  pub fn create(conn: &'a mut SqliteConnection) -> Self {
    CommentQueryBuilder {
      conn,
      for_post_id: None,
      for_parent_id: None,
      for_layer_id: None,
      my_user_id: None,
      top_level_only: false,
      page: None,
      limit: None,
    }
  }

  pub fn for_post_id<T: MaybeOptional<PostId>>(mut self, for_post_id: T) -> Self {
    self.for_post_id = for_post_id.get_optional();
    self
  }

  pub fn for_parent_id<T: MaybeOptional<CommentId>>(mut self, for_parent_id: T) -> Self {
    self.for_parent_id = for_parent_id.get_optional();
    self
  }

  pub fn for_layer_id<T: MaybeOptional<CommentId>>(mut self, for_layer_id: T) -> Self {
    self.for_layer_id = for_layer_id.get_optional();
    self
  }

  pub fn my_user_id<T: MaybeOptional<UserId>>(mut self, my_user_id: T) -> Self {
    self.my_user_id = my_user_id.get_optional();
    self
  }

  pub fn top_level_only(mut self) -> Self {
    self.top_level_only = true;
    self
  }

  pub fn page<T: MaybeOptional<i64>>(mut self, page: T) -> Self {
    self.page = page.get_optional();
    self
  }

  pub fn limit<T: MaybeOptional<i64>>(mut self, limit: T) -> Self {
    self.limit = limit.get_optional();
    self
  }

  pub fn list(self) -> Result<Vec<CommentView>, Error> {
    let CommentQueryBuilder {
      conn,
      for_post_id,
      for_parent_id,
      for_layer_id,
      my_user_id,
      top_level_only,
      page,
      limit,
    } = self;

    let mut query = comment::table
      .inner_join(users::table)
      .select((comment::all_columns, User::safe_columns_tuple()))
      .order_by(comment::created_at.asc())
      .then_order_by(comment::id.asc())
      .into_boxed();

    if let Some(for_post_id) = for_post_id {
      query = query.filter(comment::post_id.eq(for_post_id));
    }

    if top_level_only {
      query = query.filter(comment::parent_id.is_null());
    }

    if let Some(for_parent_id) = for_parent_id {
      query = query.filter(comment::parent_id.eq(for_parent_id));
    }

    if let Some(for_layer_id) = for_layer_id {
      query = query.filter(comment::layer_id.eq(for_layer_id));
    }

    // Only the top-level listing pages; parent and layer fetches return the
    // whole slice.
    if page.is_some() || limit.is_some() {
      let (limit, offset) = limit_and_offset(page, limit);
      query = query.limit(limit).offset(offset);
    }

    let res = query.load::<CommentUserTuple>(&mut *conn)?;
    annotate(conn, my_user_id, res)
  }
}
