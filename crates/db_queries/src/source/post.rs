use crate::Crud;
use diesel::{dsl::*, result::Error, *};
use quad_db_schema::{
  newtypes::PostId,
  source::post::{Post, PostForm},
};

impl Crud<PostForm, PostId> for Post {
  fn read(conn: &mut SqliteConnection, post_id: PostId) -> Result<Self, Error> {
    use quad_db_schema::schema::post::dsl::*;
    post.find(post_id).first::<Self>(conn)
  }

  fn delete(conn: &mut SqliteConnection, post_id: PostId) -> Result<usize, Error> {
    use quad_db_schema::schema::post::dsl::*;
    diesel::delete(post.find(post_id)).execute(conn)
  }

  fn create(conn: &mut SqliteConnection, form: &PostForm) -> Result<Self, Error> {
    use quad_db_schema::schema::post::dsl::*;
    insert_into(post).values(form).get_result::<Self>(conn)
  }
}
