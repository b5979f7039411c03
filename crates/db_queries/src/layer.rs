use crate::source::comment::Comment_;
use diesel::{result::Error, *};
use quad_db_schema::{schema::comment, source::comment::Comment};
use tracing::{error, info};

/// Batch backfill of `layer_id`.
///
/// Replies can be created before their ancestry is resolved, so this job
/// walks every comment and pushes each one's layer down to its direct
/// children that have none yet. It only ever fills NULLs, which makes it
/// safe to re-run and safe to run while comments are being created. A chain
/// that gained several unlayered levels converges one hop per run, because
/// the candidate set is snapshotted up front.
///
/// A failed read aborts the job; a failed write for one batch of children is
/// logged and skipped, and the next run picks it up again.
pub fn reconcile_layers(conn: &mut SqliteConnection) -> Result<usize, Error> {
  let candidates = comment::table
    .order_by(comment::id.asc())
    .load::<Comment>(conn)?;

  let mut filled = 0;

  for candidate in &candidates {
    let effective_layer = if candidate.parent_id.is_some() {
      candidate.layer_id
    } else {
      Some(candidate.id)
    };

    // Top-level rows anchor their own layer at creation; repair any that
    // predate that.
    if candidate.parent_id.is_none() && candidate.layer_id.is_none() {
      match Comment::update_layer(conn, candidate.id, candidate.id) {
        Ok(_) => filled += 1,
        Err(e) => {
          error!("Failed to anchor layer of comment {}: {}", candidate.id, e);
        }
      }
    }

    let layer = match effective_layer {
      Some(layer) => layer,
      // This comment's own layer is still unknown, so its children cannot
      // be placed yet. A later run gets them.
      None => continue,
    };

    match diesel::update(
      comment::table
        .filter(comment::parent_id.eq(candidate.id))
        .filter(comment::layer_id.is_null()),
    )
    .set(comment::layer_id.eq(layer))
    .execute(conn)
    {
      Ok(n) => filled += n,
      Err(e) => {
        error!(
          "Failed to backfill children of comment {}: {}",
          candidate.id, e
        );
      }
    }
  }

  if filled > 0 {
    info!("Backfilled layer_id on {} comments", filled);
  }
  Ok(filled)
}
