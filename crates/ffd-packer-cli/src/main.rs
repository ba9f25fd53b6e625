use std::fs;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use anyhow::Context;
use clap::{ArgAction, Parser, Subcommand};
use ffd_packer_core::config::ReportFormat;
use ffd_packer_core::{PackerConfig, Packing, pack_items, report};
use handlebars::Handlebars;
use rand::{Rng, SeedableRng, rngs::StdRng};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// Item list used when neither `--items` nor `--input` is given.
const DEFAULT_ITEMS: [u32; 17] = [9, 8, 2, 5, 8, 1, 3, 2, 1, 2, 10, 4, 3, 1, 5, 9, 4];

#[derive(Parser, Debug)]
#[command(
    name = "ffd-packer",
    about = "Pack item sizes into fixed-capacity bins (First-Fit-Decreasing)",
    version,
    author
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
    /// Increase verbosity (-v, -vv)
    #[arg(short, long, action=ArgAction::Count, global=true, help_heading = "Logging")]
    verbose: u8,
    /// Quiet mode (overrides verbose)
    #[arg(
        short,
        long,
        default_value_t = false,
        global = true,
        help_heading = "Logging"
    )]
    quiet: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Pack items into bins and print or export the assignment
    Pack(PackArgs),
    /// Simple timing bench on random items (packs once, prints time + occupancy)
    Bench(BenchArgs),
}

#[derive(Parser, Debug, Clone)]
struct PackArgs {
    // Input
    /// Comma separated item sizes, e.g. `--items 9,8,2,5`
    #[arg(long, value_delimiter = ',', conflicts_with = "input", help_heading = "Input")]
    items: Vec<u32>,
    /// File with item sizes: JSON array (`.json`) or comma/whitespace separated numbers
    #[arg(short, long, help_heading = "Input")]
    input: Option<PathBuf>,
    /// YAML config file path (overrides capacity/format/items)
    #[arg(long, help_heading = "Input")]
    config: Option<PathBuf>,

    // Packing
    /// Bin capacity
    #[arg(short, long, default_value_t = 20, help_heading = "Packing")]
    capacity: u32,
    /// Seed the volume lower bound of empty bins before placement
    #[arg(long, default_value_t = true, action = ArgAction::Set, help_heading = "Packing")]
    seed_lower_bound: bool,

    // Output
    /// Report format: text | json | template
    #[arg(short, long, default_value = "text", help_heading = "Output")]
    format: String,
    /// Handlebars template file, used when --format template
    #[arg(long, help_heading = "Output")]
    template: Option<PathBuf>,
    /// Write the report to this file instead of stdout
    #[arg(short, long, help_heading = "Output")]
    out: Option<PathBuf>,
    /// Export packing stats (JSON) to this file
    #[arg(long, help_heading = "Output")]
    export_stats: Option<PathBuf>,
    /// Print the merged configuration (after CLI/YAML) and exit
    #[arg(long, default_value_t = false, help_heading = "Output")]
    print_config: bool,
}

#[derive(Parser, Debug, Clone)]
struct BenchArgs {
    /// Number of random items
    #[arg(long, default_value_t = 10_000)]
    count: usize,
    /// Bin capacity
    #[arg(long, default_value_t = 1000)]
    capacity: u32,
    /// Largest item size (defaults to capacity)
    #[arg(long)]
    max_size: Option<u32>,
    /// RNG seed
    #[arg(long, default_value_t = 0)]
    seed: u64,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing_with_level(cli.quiet, cli.verbose);
    match &cli.command {
        Commands::Pack(args) => run_pack(args),
        Commands::Bench(b) => run_bench(b),
    }
}

/// Fully merged inputs for one `pack` run.
#[derive(Debug, Serialize)]
struct RunConfig {
    packer: PackerConfig,
    format: ReportFormat,
    template: Option<PathBuf>,
    items: Vec<u32>,
}

fn run_pack(cli: &PackArgs) -> anyhow::Result<()> {
    let run = resolve_config(cli)?;

    if cli.print_config {
        println!("{}", serde_json::to_string_pretty(&run)?);
        return Ok(());
    }

    let start = Instant::now();
    let packing = pack_items(&run.items, run.packer.clone())?;
    let elapsed = start.elapsed();
    info!(
        bins = packing.bin_count(),
        lower_bound = packing.lower_bound,
        time = %fmt_dur(elapsed),
        "packed"
    );

    let rendered = render_report(&packing, run.format, run.template.as_deref())?;
    match &cli.out {
        Some(path) => {
            fs::write(path, rendered).with_context(|| format!("write {}", path.display()))?;
            info!(?path, "report written");
        }
        None => print!("{rendered}"),
    }

    if let Some(stats_path) = &cli.export_stats {
        let stats = packing.stats();
        debug!(summary = %stats.summary(), "stats");
        fs::write(stats_path, serde_json::to_string_pretty(&stats)?)
            .with_context(|| format!("write {}", stats_path.display()))?;
        info!(?stats_path, "stats exported");
    }
    Ok(())
}

fn resolve_config(cli: &PackArgs) -> anyhow::Result<RunConfig> {
    let items = if let Some(path) = &cli.input {
        read_items(path)?
    } else if !cli.items.is_empty() {
        cli.items.clone()
    } else {
        DEFAULT_ITEMS.to_vec()
    };
    let mut run = RunConfig {
        packer: PackerConfig {
            capacity: cli.capacity,
            seed_lower_bound: cli.seed_lower_bound,
        },
        format: ReportFormat::default(),
        template: cli.template.clone(),
        items,
    };
    let mut format = cli.format.clone();

    // Config file sets options en bloc; format is parsed only after the overlay
    if let Some(path) = &cli.config {
        let file =
            fs::read_to_string(path).with_context(|| format!("read config {}", path.display()))?;
        let y: YamlConfig = serde_yaml::from_str(&file)
            .with_context(|| format!("parse config {}", path.display()))?;
        if let Some(v) = y.apply(&mut run) {
            format = v;
        }
    }
    run.format = parse_format(&format)?;
    Ok(run)
}

fn render_report(
    packing: &Packing,
    format: ReportFormat,
    template: Option<&Path>,
) -> anyhow::Result<String> {
    Ok(match format {
        ReportFormat::Text => report::to_text(packing),
        ReportFormat::Json => {
            let mut s = report::to_json_string(packing)?;
            s.push('\n');
            s
        }
        ReportFormat::Template => {
            let Some(path) = template else {
                anyhow::bail!("--format template requires --template <FILE>");
            };
            let src = fs::read_to_string(path)
                .with_context(|| format!("read template {}", path.display()))?;
            render_template(&src, packing)?
        }
    })
}

fn render_template(src: &str, packing: &Packing) -> anyhow::Result<String> {
    let mut hb = Handlebars::new();
    hb.set_strict_mode(true);
    hb.register_template_string("report", src)
        .context("compile template")?;
    let ctx = report::to_json(packing);
    Ok(hb.render("report", &ctx)?)
}

fn run_bench(b: &BenchArgs) -> anyhow::Result<()> {
    let max_size = b.max_size.unwrap_or(b.capacity).min(b.capacity).max(1);
    let mut rng = StdRng::seed_from_u64(b.seed);
    let items: Vec<u32> = (0..b.count).map(|_| rng.gen_range(1..=max_size)).collect();
    let cfg = PackerConfig {
        capacity: b.capacity,
        ..Default::default()
    };
    let start = Instant::now();
    let packing = pack_items(&items, cfg)?;
    let dur = start.elapsed();
    let stats = packing.stats();
    println!(
        "bins={} lower_bound={} occupancy={:.2}% time={}",
        stats.num_bins,
        stats.lower_bound,
        stats.occupancy * 100.0,
        fmt_dur(dur)
    );
    Ok(())
}

fn fmt_dur(d: Duration) -> String {
    let ms = d.as_secs_f64() * 1000.0;
    if ms >= 1.0 {
        format!("{:.1}ms", ms)
    } else {
        format!("{}us", d.as_micros())
    }
}

fn read_items(path: &Path) -> anyhow::Result<Vec<u32>> {
    let text =
        fs::read_to_string(path).with_context(|| format!("read items {}", path.display()))?;
    let is_json = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("json"));
    if is_json {
        serde_json::from_str(&text).with_context(|| format!("parse JSON items {}", path.display()))
    } else {
        parse_items(&text).with_context(|| format!("parse items {}", path.display()))
    }
}

/// Parses item sizes separated by commas and/or whitespace.
fn parse_items(text: &str) -> anyhow::Result<Vec<u32>> {
    text.split(|c: char| c == ',' || c.is_whitespace())
        .filter(|tok| !tok.is_empty())
        .map(|tok| {
            tok.parse::<u32>()
                .with_context(|| format!("invalid item size: {tok:?}"))
        })
        .collect()
}

fn parse_format(s: &str) -> anyhow::Result<ReportFormat> {
    s.parse()
        .map_err(|_| anyhow::anyhow!("unknown report format: {}", s))
}

fn init_tracing_with_level(quiet: bool, verbose: u8) {
    let level = if quiet {
        "error".to_string()
    } else {
        match verbose {
            0 => "info".into(),
            1 => "debug".into(),
            _ => "trace".into(),
        }
    };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}

#[derive(Debug, Deserialize, Default)]
#[serde(deny_unknown_fields)]
struct YamlConfig {
    capacity: Option<u32>,
    seed_lower_bound: Option<bool>,
    format: Option<String>,
    template: Option<PathBuf>,
    items: Option<Vec<u32>>,
}

impl YamlConfig {
    /// Applies every set field except `format`, which is returned unparsed.
    fn apply(self, run: &mut RunConfig) -> Option<String> {
        if let Some(v) = self.capacity {
            run.packer.capacity = v;
        }
        if let Some(v) = self.seed_lower_bound {
            run.packer.seed_lower_bound = v;
        }
        if let Some(v) = self.template {
            run.template = Some(v);
        }
        if let Some(v) = self.items {
            run.items = v;
        }
        self.format
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_items_accepts_mixed_separators() {
        let items = parse_items("9, 8,2\n5 8\t1\n").unwrap();
        assert_eq!(items, vec![9, 8, 2, 5, 8, 1]);
    }

    #[test]
    fn parse_items_rejects_garbage() {
        assert!(parse_items("1, two, 3").is_err());
        assert!(parse_items("-4").is_err());
    }

    #[test]
    fn parse_items_empty_text() {
        assert!(parse_items("  \n").unwrap().is_empty());
    }

    #[test]
    fn yaml_overrides_cli_values() {
        let mut run = RunConfig {
            packer: PackerConfig::default(),
            format: ReportFormat::Text,
            template: None,
            items: DEFAULT_ITEMS.to_vec(),
        };
        let y: YamlConfig =
            serde_yaml::from_str("capacity: 8\nformat: json\nitems: [4, 4, 4, 4]\n").unwrap();
        assert_eq!(y.apply(&mut run).as_deref(), Some("json"));
        assert_eq!(run.packer.capacity, 8);
        assert!(run.packer.seed_lower_bound);
        assert_eq!(run.items, vec![4, 4, 4, 4]);
    }

    fn pack_args(extra: &[&str]) -> PackArgs {
        let mut argv = vec!["pack"];
        argv.extend_from_slice(extra);
        PackArgs::try_parse_from(argv).unwrap()
    }

    #[test]
    fn yaml_format_overrides_unparsable_cli_format() {
        let path = std::env::temp_dir().join(format!("ffd-packer-{}.yaml", std::process::id()));
        fs::write(&path, "format: json\n").unwrap();
        let args = pack_args(&["--format", "bogus", "--config", path.to_str().unwrap()]);
        let run = resolve_config(&args);
        let _ = fs::remove_file(&path);
        assert_eq!(run.unwrap().format, ReportFormat::Json);
    }

    #[test]
    fn unknown_cli_format_without_config_fails() {
        let args = pack_args(&["--format", "bogus"]);
        assert!(resolve_config(&args).is_err());
    }

    #[test]
    fn template_renders_bins() {
        let packing = ffd_packer_core::pack(&[4, 4, 4, 4], 8).unwrap();
        let out = render_template(
            "{{binCount}}:{{#each bins}}[{{id}}={{#each items}}{{this}} {{/each}}]{{/each}}",
            &packing,
        )
        .unwrap();
        assert_eq!(out, "2:[0=4 4 ][1=4 4 ]");
    }

    #[test]
    fn template_format_requires_file() {
        let packing = ffd_packer_core::pack(&[1], 1).unwrap();
        assert!(render_report(&packing, ReportFormat::Template, None).is_err());
    }

    #[test]
    fn default_items_pack_into_four_bins() {
        let packing = ffd_packer_core::pack(&DEFAULT_ITEMS, 20).unwrap();
        assert_eq!(packing.bin_count(), 4);
    }
}
