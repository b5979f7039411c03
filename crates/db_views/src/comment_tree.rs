//! Pure, snapshot-in / snapshot-out edits of the in-memory comment tree the
//! UI holds. The tree mirrors what the user has expanded; these functions
//! splice freshly fetched slices into it without touching anything else.
//!
//! Traversal is depth-first with an explicit work stack, so nesting depth is
//! bounded by memory rather than the call stack. Any render-depth cap is the
//! UI's business, not an assumption made here.

use crate::comment_view::CommentView;
use quad_db_schema::newtypes::CommentId;

/// Returns a tree in which the first node (in depth-first order) matching
/// `target_parent_id` has its children replaced by `new_children`. Replace
/// semantics: merging the same slice twice leaves the same tree as merging
/// it once. Everything else is carried over untouched; an absent target
/// leaves the tree as it was.
pub fn merge_children_at(
  mut tree: Vec<CommentView>,
  target_parent_id: CommentId,
  new_children: Vec<CommentView>,
) -> Vec<CommentView> {
  let mut new_children = Some(new_children);
  let mut stack: Vec<&mut CommentView> = tree.iter_mut().rev().collect();
  while let Some(node) = stack.pop() {
    if node.comment.id == target_parent_id {
      node.children = new_children.take().unwrap_or_default();
      break;
    }
    stack.extend(node.children.iter_mut().rev());
  }
  tree
}

/// Appends one freshly posted reply to the children of the first node (in
/// depth-first order) matching `parent_id`, keeping the siblings already
/// expanded there.
pub fn append_reply(
  mut tree: Vec<CommentView>,
  parent_id: CommentId,
  new_reply: CommentView,
) -> Vec<CommentView> {
  let mut new_reply = Some(new_reply);
  let mut stack: Vec<&mut CommentView> = tree.iter_mut().rev().collect();
  while let Some(node) = stack.pop() {
    if node.comment.id == parent_id {
      if let Some(reply) = new_reply.take() {
        node.children.push(reply);
      }
      break;
    }
    stack.extend(node.children.iter_mut().rev());
  }
  tree
}
