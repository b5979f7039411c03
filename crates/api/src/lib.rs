use diesel::SqliteConnection;
use quad_utils::QuadError;

mod comment;
pub mod structs;

pub use quad_db_queries::layer::reconcile_layers;

pub trait Perform {
  type Response: serde::ser::Serialize;

  fn perform(&self, conn: &mut SqliteConnection) -> Result<Self::Response, QuadError>;
}
