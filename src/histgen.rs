use railsim::{HistoryPage, HistorySummaryRecord, SettingsCoordinator, SimulationId};
use anyhow::{Context, Result};
use brotli::enc::BrotliEncoderParams;
use brotli::CompressorWriter;
use log::info;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde_json::{json, Map, Value};
use std::env;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

const LINES: &[&str] = &["Red", "Blue", "Green", "Orange", "Airport Express"];
const SCENARIOS: &[&str] = &["weekday peak", "weekend", "night service", "track works", "event day"];

struct Config {
    num_pages: usize,
    page_size: usize,
    overlap: usize,
    seed: u64,
    output_dir: PathBuf,
    use_brotli: bool,
}

/// Flags as given on the command line. The page size falls back to the
/// dashboard's configured `history_page_size`.
struct Args {
    num_pages: usize,
    page_size: Option<usize>,
    overlap: usize,
    seed: u64,
    output_dir: PathBuf,
    use_brotli: bool,
    settings_file: Option<PathBuf>,
}

impl Default for Args {
    fn default() -> Self {
        Args {
            num_pages: 3,
            page_size: None,
            overlap: 2,
            seed: 1,
            output_dir: PathBuf::from("history_pages"),
            use_brotli: false,
            settings_file: None,
        }
    }
}

fn parse_args(args: &[String]) -> Result<Args> {
    let mut config = Args::default();

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "-pages" => {
                i += 1;
                if i >= args.len() {
                    anyhow::bail!("-pages requires an argument");
                }
                config.num_pages = args[i].parse()?;
            }
            "-page_size" => {
                i += 1;
                if i >= args.len() {
                    anyhow::bail!("-page_size requires an argument");
                }
                config.page_size = Some(args[i].parse()?);
            }
            "-overlap" => {
                i += 1;
                if i >= args.len() {
                    anyhow::bail!("-overlap requires an argument");
                }
                config.overlap = args[i].parse()?;
            }
            "-seed" => {
                i += 1;
                if i >= args.len() {
                    anyhow::bail!("-seed requires an argument");
                }
                config.seed = args[i].parse()?;
            }
            "-out" => {
                i += 1;
                if i >= args.len() {
                    anyhow::bail!("-out requires a directory argument");
                }
                config.output_dir = PathBuf::from(&args[i]);
            }
            "-settings" => {
                i += 1;
                if i >= args.len() {
                    anyhow::bail!("-settings requires a file path argument");
                }
                config.settings_file = Some(PathBuf::from(&args[i]));
            }
            "-brotli" => {
                config.use_brotli = true;
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

fn resolve_config(args: Args) -> Result<Config> {
    let page_size = match args.page_size {
        Some(size) => size,
        None => SettingsCoordinator::load_dashboard_settings_from(args.settings_file.as_deref())?
            .history_page_size,
    };
    if page_size == 0 {
        anyhow::bail!("-page_size must be at least 1");
    }

    Ok(Config {
        num_pages: args.num_pages,
        page_size,
        overlap: args.overlap,
        seed: args.seed,
        output_dir: args.output_dir,
        use_brotli: args.use_brotli,
    })
}

fn print_help() {
    println!("Simulation History Page Generator");
    println!("Usage: railsim-histgen [OPTIONS]");
    println!();
    println!("OPTIONS:");
    println!("  -pages <N>             Number of pages (default: 3)");
    println!("  -page_size <N>         Records per page (default: history_page_size setting)");
    println!("  -overlap <N>           Records repeated from the previous page (default: 2)");
    println!("  -seed <N>              Random seed (default: 1)");
    println!("  -out <DIR>             Output directory (default: history_pages)");
    println!("  -settings <FILE>       Settings file (default: platform config dir)");
    println!("  -brotli                Write compressed pages (*.json.br)");
    println!("  -h, -help, --help      Show this help message");
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = resolve_config(parse_args(&env::args().collect::<Vec<_>>())?)?;
    fs::create_dir_all(&config.output_dir)
        .with_context(|| format!("Failed to create directory: {}", config.output_dir.display()))?;

    let pages = generate_pages(&config);
    for page in &pages {
        let ext = if config.use_brotli { "json.br" } else { "json" };
        let path = config.output_dir.join(format!("page_{:03}.{}", page.page, ext));
        write_page(&path, page, config.use_brotli)?;
        info!("Wrote page {} ({} records) to {}", page.page, page.records.len(), path.display());
    }

    println!("{} pages written to: {}", pages.len(), config.output_dir.display());
    Ok(())
}

/// Generates newest-first pages where each page repeats the last `overlap`
/// records of the previous one, as a backend does when new runs are inserted
/// between page requests.
fn generate_pages(config: &Config) -> Vec<HistoryPage> {
    let mut rng = StdRng::seed_from_u64(config.seed);
    let total = config.num_pages * config.page_size;
    let mut next_id = (2 * total + 1) as SimulationId;

    let mut pages = Vec::with_capacity(config.num_pages);
    let mut carried: Vec<HistorySummaryRecord> = Vec::new();

    for page_idx in 0..config.num_pages {
        let mut records = carried.clone();
        while records.len() < config.page_size {
            records.push(generate_record(&mut rng, next_id));
            next_id -= rng.gen_range(1..3);
        }

        let keep = config.overlap.min(config.page_size - 1);
        carried = records[records.len() - keep..].to_vec();

        pages.push(HistoryPage {
            page: page_idx as u32 + 1,
            has_more: page_idx + 1 < config.num_pages,
            records,
        });
    }

    pages
}

fn generate_record(rng: &mut StdRng, id: SimulationId) -> HistorySummaryRecord {
    let mut fields = Map::new();
    let line = LINES[rng.gen_range(0..LINES.len())];
    let scenario = SCENARIOS[rng.gen_range(0..SCENARIOS.len())];

    fields.insert("NAME".to_string(), Value::from(format!("{} line, {}", line, scenario)));
    fields.insert("CREATED_AT".to_string(), Value::from(1_700_000_000 + id * 3_600));
    fields.insert(
        "PARAMETERS".to_string(),
        json!({
            "trains": rng.gen_range(4..40),
            "headway_s": rng.gen_range(90..600),
            "dwell_s": rng.gen_range(20..60),
        }),
    );

    HistorySummaryRecord::with_fields(id, fields)
}

fn write_page(path: &Path, page: &HistoryPage, use_brotli: bool) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("Failed to create file: {}", path.display()))?;

    let mut writer: Box<dyn Write> = if use_brotli {
        let params = BrotliEncoderParams {
            quality: 6,
            lgwin: 22,
            ..Default::default()
        };
        Box::new(CompressorWriter::with_params(BufWriter::new(file), 4096, &params))
    } else {
        Box::new(BufWriter::new(file))
    };

    serde_json::to_writer_pretty(&mut writer, page)
        .with_context(|| format!("Failed to write page: {}", path.display()))?;
    writer.flush().context("Failed to flush writer")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use railsim::{DashboardSettings, FileStorage};

    fn args(list: &[&str]) -> Vec<String> {
        std::iter::once("railsim-histgen").chain(list.iter().copied()).map(String::from).collect()
    }

    #[test]
    fn test_unknown_flag_is_rejected() {
        assert!(parse_args(&args(&["-pages", "2", "-bogus"])).is_err());
    }

    #[test]
    fn test_page_size_defaults_to_setting() -> Result<()> {
        let path = env::temp_dir().join("railsim_histgen_settings_test.json");
        let mut storage = FileStorage::open(&path)?;
        let settings = DashboardSettings { history_page_size: 4, ..DashboardSettings::default() };
        SettingsCoordinator::save_dashboard_settings(&mut storage, &settings);

        let settings_arg = path.display().to_string();
        let config = resolve_config(parse_args(&args(&["-settings", &settings_arg]))?)?;
        assert_eq!(config.page_size, 4);

        let config = resolve_config(parse_args(&args(&["-settings", &settings_arg, "-page_size", "6"]))?)?;
        assert_eq!(config.page_size, 6);

        let _ = fs::remove_file(&path);
        Ok(())
    }

    #[test]
    fn test_pages_overlap_and_descend() -> Result<()> {
        let config = resolve_config(parse_args(&args(&["-pages", "3", "-page_size", "5", "-overlap", "2"]))?)?;
        let pages = generate_pages(&config);

        assert_eq!(pages.len(), 3);
        for pair in pages.windows(2) {
            assert_eq!(pair[0].records[3..], pair[1].records[..2]);
        }
        assert!(!pages[2].has_more);
        Ok(())
    }
}
