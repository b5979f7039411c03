use diesel_derive_newtype::DieselNewType;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(
  Debug,
  Copy,
  Clone,
  Hash,
  Eq,
  PartialEq,
  Ord,
  PartialOrd,
  Default,
  Serialize,
  Deserialize,
  DieselNewType,
)]
/// The comment id. A thread's layer is identified by the `CommentId` of its
/// top-level ancestor.
pub struct CommentId(pub i32);

impl fmt::Display for CommentId {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.0)
  }
}

#[derive(
  Debug,
  Copy,
  Clone,
  Hash,
  Eq,
  PartialEq,
  Ord,
  PartialOrd,
  Default,
  Serialize,
  Deserialize,
  DieselNewType,
)]
/// The post id.
pub struct PostId(pub i32);

impl fmt::Display for PostId {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.0)
  }
}

#[derive(
  Debug,
  Copy,
  Clone,
  Hash,
  Eq,
  PartialEq,
  Ord,
  PartialOrd,
  Default,
  Serialize,
  Deserialize,
  DieselNewType,
)]
/// The user id.
pub struct UserId(pub i32);

impl fmt::Display for UserId {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.0)
  }
}
