mod shell;

use dayplanner::config::{PlannerConfig, SettingsStore};
use dayplanner::planner::Planner;
use dayplanner::storage::FsStore;

/// Journal logger that lets this crate through at info/debug and everything else at warn.
struct FilteredJournal {
    inner: systemd_journal_logger::JournalLog,
}

impl log::Log for FilteredJournal {
    fn enabled(&self, metadata: &log::Metadata) -> bool {
        if metadata.target().starts_with("dayplanner") {
            let max = if dayplanner::debug_logging() {
                log::LevelFilter::Debug
            } else {
                log::LevelFilter::Info
            };
            metadata.level() <= max
        } else {
            metadata.level() <= log::LevelFilter::Warn
        }
    }

    fn log(&self, record: &log::Record) {
        if self.enabled(record.metadata()) {
            self.inner.log(record);
        }
    }

    fn flush(&self) {
        self.inner.flush();
    }
}

/// Log to the systemd user journal (`journalctl --user -t dayplanner -f`).
fn init_logging(debug: bool) {
    dayplanner::set_debug_logging(debug);

    let journal = match systemd_journal_logger::JournalLog::new() {
        Ok(journal) => journal.with_syslog_identifier("dayplanner".to_string()),
        Err(e) => {
            eprintln!("Journal unavailable, logging disabled: {e}");
            return;
        }
    };

    if log::set_boxed_logger(Box::new(FilteredJournal { inner: journal })).is_ok() {
        // Global max must be Debug so debug logs can pass through when toggled
        log::set_max_level(log::LevelFilter::Debug);
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let settings = SettingsStore::default();
    let config = PlannerConfig::load(&settings).await;
    init_logging(config.debug_logging);

    let today = chrono::Local::now().date_naive();
    let planner = Planner::open(FsStore, settings, today).await;
    shell::run(planner).await?;

    Ok(())
}
