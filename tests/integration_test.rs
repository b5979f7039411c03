//! End-to-end walk through the comment lifecycle: posting into a thread,
//! lazily expanding it, backfilling layers and deleting.

use pretty_assertions::assert_eq;
use quad_api::{reconcile_layers, structs::*, Perform};
use quad_db_queries::{establish_unpooled_connection, Crud};
use quad_db_schema::source::{post::*, user::*};
use quad_db_views::comment_tree::{append_reply, merge_children_at};
use serial_test::serial;

#[test]
#[serial]
fn test_comment_thread_lifecycle() {
  let conn = &mut establish_unpooled_connection();

  let rosa = User::create(conn, &UserForm::new("rosa".into())).unwrap();
  let theo = User::create(conn, &UserForm::new("theo".into())).unwrap();
  let post = Post::create(conn, &PostForm::new("Study group".into(), rosa.id)).unwrap();

  // Top-level comment a anchors its own layer
  let a = CreateComment {
    content: "Thursday work for everyone?".into(),
    user_id: rosa.id,
    post_id: post.id,
    parent_id: None,
    layer_id: None,
  }
  .perform(conn)
  .unwrap()
  .comment_view;
  assert_eq!(Some(a.comment.id), a.comment.layer_id);

  // b replies to a; the client knows a's layer from the view it holds, so
  // the reply carries it and is placed immediately
  let b = CreateComment {
    content: "Works for me".into(),
    user_id: theo.id,
    post_id: post.id,
    parent_id: Some(a.comment.id),
    layer_id: a.comment.layer_id,
  }
  .perform(conn)
  .unwrap()
  .comment_view;
  assert_eq!(a.comment.layer_id, b.comment.layer_id);

  // c replies to b without a layer hint and stays unlayered for now
  let c = CreateComment {
    content: "Same, library basement?".into(),
    user_id: rosa.id,
    post_id: post.id,
    parent_id: Some(b.comment.id),
    layer_id: None,
  }
  .perform(conn)
  .unwrap()
  .comment_view;
  assert_eq!(None, c.comment.layer_id);

  // Before any backfill, the flattened layer misses c
  let layer = GetLayer {
    layer_id: a.comment.id,
    my_user_id: None,
  }
  .perform(conn)
  .unwrap()
  .comments;
  assert_eq!(
    vec![a.comment.id, b.comment.id],
    layer.iter().map(|v| v.comment.id).collect::<Vec<_>>()
  );

  // One backfill run places c, and the re-fetched layer links its parent
  reconcile_layers(conn).unwrap();
  let layer = GetLayer {
    layer_id: a.comment.id,
    my_user_id: None,
  }
  .perform(conn)
  .unwrap()
  .comments;
  assert_eq!(
    vec![a.comment.id, b.comment.id, c.comment.id],
    layer.iter().map(|v| v.comment.id).collect::<Vec<_>>()
  );
  assert_eq!(
    Some(b.comment.id),
    layer[2].parent.as_ref().map(|p| p.comment.id)
  );

  // The UI builds its tree from the top-level page, then splices in the
  // branches the user expands
  let mut tree = GetComments {
    post_id: post.id,
    my_user_id: Some(theo.id),
    page: None,
    limit: None,
  }
  .perform(conn)
  .unwrap()
  .comments
  .unwrap();
  assert_eq!(1, tree.len());
  assert_eq!(2, tree[0].counts.thread_count);

  let replies = GetReplies {
    parent_id: a.comment.id,
    my_user_id: Some(theo.id),
  }
  .perform(conn)
  .unwrap()
  .replies
  .unwrap();
  tree = merge_children_at(tree, a.comment.id, replies);
  assert_eq!(b.comment.id, tree[0].children[0].comment.id);
  assert_eq!(c.comment.id, tree[0].children[0].children[0].comment.id);

  // A newly posted reply is appended locally at its parent
  let d = CreateComment {
    content: "Bring the notes".into(),
    user_id: theo.id,
    post_id: post.id,
    parent_id: Some(b.comment.id),
    layer_id: b.comment.layer_id,
  }
  .perform(conn)
  .unwrap()
  .comment_view;
  tree = append_reply(tree, b.comment.id, d.clone());
  assert_eq!(
    vec![c.comment.id, d.comment.id],
    tree[0].children[0]
      .children
      .iter()
      .map(|v| v.comment.id)
      .collect::<Vec<_>>()
  );

  // Only the author may delete, and likes go with the comment
  assert!(CreateCommentLike {
    comment_id: d.comment.id,
    user_id: rosa.id,
  }
  .perform(conn)
  .unwrap());
  assert!(!DeleteComment {
    comment_id: d.comment.id,
    user_id: rosa.id,
  }
  .perform(conn)
  .unwrap());
  assert!(DeleteComment {
    comment_id: d.comment.id,
    user_id: theo.id,
  }
  .perform(conn)
  .unwrap());

  let refreshed = GetReplies {
    parent_id: b.comment.id,
    my_user_id: None,
  }
  .perform(conn)
  .unwrap()
  .replies
  .unwrap();
  assert_eq!(
    vec![c.comment.id],
    refreshed.iter().map(|v| v.comment.id).collect::<Vec<_>>()
  );
}
