use clap::Parser;
use quad_db_queries::{build_db_pool, layer::reconcile_layers, run_migrations};
use quad_utils::{settings::Settings, QuadResult};
use tracing::{info, level_filters::LevelFilter};
use tracing_subscriber::EnvFilter;

mod scheduled_tasks;

#[derive(Parser, Debug)]
#[command(name = "quad_server", about = "Comment maintenance daemon for quad")]
struct CmdArgs {
  /// Run the comment layer backfill once and exit, instead of running it on
  /// a schedule.
  #[arg(long)]
  reconcile_layers: bool,
}

fn main() -> QuadResult<()> {
  let filter = EnvFilter::builder()
    .with_default_directive(LevelFilter::INFO.into())
    .from_env_lossy();
  tracing_subscriber::fmt().with_env_filter(filter).init();

  let args = CmdArgs::parse();
  let settings = Settings::get();

  let pool = build_db_pool(&settings.database.file, settings.database.pool_size)?;
  let mut conn = pool.get()?;
  run_migrations(&mut conn)?;

  if args.reconcile_layers {
    let filled = reconcile_layers(&mut conn)?;
    info!("Layer reconcile placed {} comments", filled);
    return Ok(());
  }
  drop(conn);

  scheduled_tasks::setup(
    pool,
    settings.scheduled_tasks.layer_reconcile_interval_secs,
  )
}
