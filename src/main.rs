// Workweek Scheduler
// Replays a gesture script against the persisted week store and prints the result

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use chrono::Local;
use serde::Serialize;

use workweek_scheduler::models::week::WeekArchive;
use workweek_scheduler::services::database::default_database_path;
use workweek_scheduler::services::notification::{Alert, AlertQueue};
use workweek_scheduler::services::replay::{run_script, Script, StepResult};
use workweek_scheduler::services::session::EditorSession;
use workweek_scheduler::services::settings::SettingsService;
use workweek_scheduler::services::week_store::SqliteWeekStore;

const USAGE: &str = "usage: workweek-scheduler <script.json> [database.db]";

#[derive(Serialize)]
struct Report {
    steps: Vec<StepResult>,
    alerts: Vec<Alert>,
    archive: WeekArchive,
}

fn main() -> ExitCode {
    env_logger::init();

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{:?}", e);
            eprintln!("error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<()> {
    let mut args = std::env::args().skip(1);
    let script_path = PathBuf::from(args.next().context(USAGE)?);
    let db_path = match args.next() {
        Some(path) => PathBuf::from(path),
        None => default_database_path()?,
    };

    log::info!("Starting workweek scheduler with store {}", db_path.display());

    let settings = SettingsService::load_default()?;
    let script = Script::load(&script_path)?;
    let store = SqliteWeekStore::open(&db_path.to_string_lossy())?;
    let alerts = AlertQueue::from_settings(&settings);

    let mut session = EditorSession::open(settings, store, alerts, script.start)?;
    let steps = run_script(&mut session, &script, Local::now().date_naive())?;

    let report = Report {
        steps,
        alerts: session.sink().alerts().to_vec(),
        archive: session.export()?,
    };
    println!("{}", serde_json::to_string_pretty(&report)?);

    let now = Local::now().naive_local();
    log::info!(
        "Replay finished: {} alerts still active",
        session.sink().active(now).count()
    );
    Ok(())
}
