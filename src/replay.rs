use railsim::{
    load_event_log, load_history_page, load_snapshot_history, AppState, ApplicationCoordinator,
    DashboardEvent, DashboardSettings, SelectionScope, SettingsCoordinator, SnapshotWriter,
};
use anyhow::Result;
use log::info;
use std::env;
use std::path::{Path, PathBuf};

struct Config {
    history_file: Option<String>,
    page_files: Vec<String>,
    events_file: Option<String>,
    output_file: Option<String>,
    settings_file: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            history_file: None,
            page_files: Vec::new(),
            events_file: None,
            output_file: None,
            settings_file: None,
        }
    }
}

fn parse_args(args: &[String]) -> Result<Config> {
    let mut config = Config::default();

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "-history" => {
                i += 1;
                if i >= args.len() {
                    anyhow::bail!("-history requires a file path argument");
                }
                config.history_file = Some(args[i].clone());
            }
            "-page" => {
                i += 1;
                if i >= args.len() {
                    anyhow::bail!("-page requires a file path argument");
                }
                config.page_files.push(args[i].clone());
            }
            "-events" => {
                i += 1;
                if i >= args.len() {
                    anyhow::bail!("-events requires a file path argument");
                }
                config.events_file = Some(args[i].clone());
            }
            "-out" => {
                i += 1;
                if i >= args.len() {
                    anyhow::bail!("-out requires a file path argument");
                }
                config.output_file = Some(args[i].clone());
            }
            "-settings" => {
                i += 1;
                if i >= args.len() {
                    anyhow::bail!("-settings requires a file path argument");
                }
                config.settings_file = Some(args[i].clone());
            }
            "-h" | "-help" | "--help" => {
                print_help();
                std::process::exit(0);
            }
            other => {
                anyhow::bail!("Unknown argument: {}", other);
            }
        }
        i += 1;
    }

    Ok(config)
}

fn print_help() {
    println!("Dashboard State Replay");
    println!("Usage: railsim-replay [OPTIONS]");
    println!();
    println!("OPTIONS:");
    println!("  -history <FILE>        Initial full history load (JSON, .br for Brotli)");
    println!("  -page <FILE>           History page to merge, may be repeated");
    println!("  -events <FILE>         Event log, one JSON event per line");
    println!("  -out <FILE>            Write a state snapshot (JSON Lines, .br for Brotli);");
    println!("                         with restore_history_on_start set, its history is");
    println!("                         reloaded first when -history is not given");
    println!("  -settings <FILE>       Settings file (default: platform config dir)");
    println!("  -h, -help, --help      Show this help message");
}

fn snapshot_path(config: &Config, settings: &DashboardSettings) -> Option<PathBuf> {
    config.output_file.as_ref().map(|path| {
        if settings.snapshot_compression && !path.ends_with(".br") {
            PathBuf::from(format!("{}.br", path))
        } else {
            PathBuf::from(path)
        }
    })
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = parse_args(&env::args().collect::<Vec<_>>())?;
    let settings = SettingsCoordinator::load_dashboard_settings_from(
        config.settings_file.as_deref().map(Path::new),
    )?;
    let snapshot_path = snapshot_path(&config, &settings);
    let mut state = AppState::new();

    if let Some(path) = &config.history_file {
        let page = load_history_page(path)?;
        ApplicationCoordinator::handle_event(&mut state, DashboardEvent::HistoryLoaded { records: page.records });
    } else if let Some(path) = snapshot_path.as_ref().filter(|_| settings.restore_history_on_start) {
        if path.exists() {
            let records = load_snapshot_history(path)?;
            info!("Restoring {} history records from {}", records.len(), path.display());
            ApplicationCoordinator::handle_event(&mut state, DashboardEvent::HistoryLoaded { records });
        }
    }

    for path in &config.page_files {
        let page = load_history_page(path)?;
        ApplicationCoordinator::handle_event(&mut state, DashboardEvent::HistoryPageArrived { page });
    }

    if let Some(path) = &config.events_file {
        let events = load_event_log(path)?;
        info!("Replaying {} events", events.len());
        ApplicationCoordinator::replay(&mut state, events);
    }

    print_summary(&state);

    if let Some(path) = &snapshot_path {
        let mut writer = SnapshotWriter::new(path)?;
        writer.write_app_state(&state)?;
        writer.finish()?;
        println!("Snapshot written to: {}", path.display());
    }

    Ok(())
}

fn print_summary(state: &AppState) {
    let records = state.history.records();
    let cursor = state.history.cursor();

    println!("History: {} records (next page {}, more: {})", records.len(), cursor.next_page, cursor.has_more);
    for record in records {
        match record.id {
            Some(id) => println!("  #{}", id),
            None => println!("  (no id)"),
        }
    }

    for scope in [SelectionScope::Results, SelectionScope::Ui] {
        let selection = state.selection(scope).state();
        println!(
            "{:?} selection: station={:?} train={:?}",
            scope,
            selection.selected_station_id(),
            selection.selected_train_id()
        );
    }

    if let Some(message) = state.ui.error_message() {
        println!("Error: {}", message);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        std::iter::once("railsim-replay").chain(list.iter().copied()).map(String::from).collect()
    }

    #[test]
    fn test_unknown_flag_is_rejected() {
        assert!(parse_args(&args(&["-events", "log.jsonl", "-bogus"])).is_err());
    }

    #[test]
    fn test_snapshot_path_compression() -> Result<()> {
        let config = parse_args(&args(&["-out", "state.jsonl"]))?;
        let mut settings = DashboardSettings::default();
        assert_eq!(snapshot_path(&config, &settings), Some(PathBuf::from("state.jsonl")));

        settings.snapshot_compression = true;
        assert_eq!(snapshot_path(&config, &settings), Some(PathBuf::from("state.jsonl.br")));
        Ok(())
    }
}
