use clokwerk::{Scheduler, TimeUnits};
use quad_db_queries::{layer::reconcile_layers, DbPool};
use std::{thread, time::Duration};
use tracing::{error, info};

/// Runs the comment layer backfill on a fixed interval, forever. The job
/// only fills missing `layer_id`s, so overlapping with live comment traffic
/// is fine.
pub fn setup(pool: DbPool, interval_secs: u32) -> ! {
  let mut scheduler = Scheduler::new();

  run_reconcile_layers(&pool);

  scheduler.every(interval_secs.seconds()).run(move || {
    run_reconcile_layers(&pool);
  });

  loop {
    scheduler.run_pending();
    thread::sleep(Duration::from_millis(1000));
  }
}

fn run_reconcile_layers(pool: &DbPool) {
  let mut conn = match pool.get() {
    Ok(conn) => conn,
    Err(e) => {
      error!("Failed to get connection for layer reconcile: {}", e);
      return;
    }
  };
  match reconcile_layers(&mut conn) {
    Ok(0) => {}
    Ok(filled) => info!("Layer reconcile placed {} comments", filled),
    Err(e) => error!("Layer reconcile failed: {}", e),
  }
}
