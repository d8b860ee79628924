//! CLI command definitions, routing, and tracing setup.

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use color_eyre::eyre::{Result, eyre};
use kwgroup_core::input::load_keywords;
use kwgroup_core::report::{ReportConfig, build_report, write_report};
use kwgroup_shared::{
    AppConfig, GroupingOptions, KeywordGroup, OutputFormat, Theme, UrlOptions, init_config,
    load_config, load_config_from,
};
use tracing::info;

// ---------------------------------------------------------------------------
// CLI structure
// ---------------------------------------------------------------------------

/// kwgroup — group search keywords by topic.
#[derive(Parser)]
#[command(
    name = "kwgroup",
    version,
    about = "Group search keywords by topic and build per-group Ahrefs URLs.",
    long_about = None,
)]
pub(crate) struct Cli {
    /// Log format: text (default) or json.
    #[arg(long, default_value = "text", global = true)]
    pub log_format: LogFormat,

    /// Verbosity level (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Config file to use instead of ~/.kwgroup/kwgroup.toml.
    #[arg(long = "config", global = true, env = "KWGROUP_CONFIG")]
    pub config_file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

/// Log output format.
#[derive(Clone, Debug, clap::ValueEnum)]
pub(crate) enum LogFormat {
    Text,
    Json,
}

/// Output format for command results.
#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub(crate) enum Format {
    Text,
    Json,
}

impl From<OutputFormat> for Format {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Text => Self::Text,
            OutputFormat::Json => Self::Json,
        }
    }
}

/// Top-level CLI subcommands.
#[derive(Subcommand)]
pub(crate) enum Command {
    /// Group keywords by topic.
    Group {
        /// Keyword file, one per line (`-` for stdin).
        file: PathBuf,

        /// Output format (defaults to the configured format).
        #[arg(short, long)]
        format: Option<Format>,
    },

    /// List detected themes without grouping.
    Themes {
        /// Keyword file, one per line (`-` for stdin).
        file: PathBuf,

        /// Output format (defaults to the configured format).
        #[arg(short, long)]
        format: Option<Format>,
    },

    /// Print one Ahrefs URL per keyword group.
    Urls {
        /// Keyword file, one per line (`-` for stdin).
        file: PathBuf,

        /// Domain to check rankings for.
        #[arg(short, long)]
        domain: String,

        /// Position filter, e.g. 1-50. Empty disables it.
        #[arg(long)]
        positions: Option<String>,
    },

    /// Write a full JSON report (groups, URLs, summary).
    Report {
        /// Keyword file, one per line (`-` for stdin).
        file: PathBuf,

        /// Domain to check rankings for.
        #[arg(short, long)]
        domain: String,

        /// Output path (prints to stdout if omitted).
        #[arg(short, long)]
        out: Option<PathBuf>,

        /// Position filter, e.g. 1-50. Empty disables it.
        #[arg(long)]
        positions: Option<String>,
    },

    /// Configuration management.
    Config {
        /// Config subcommand.
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Config subcommands.
#[derive(Subcommand)]
pub(crate) enum ConfigAction {
    /// Initialize config file with defaults.
    Init,
    /// Show resolved configuration.
    Show,
}

// ---------------------------------------------------------------------------
// Tracing setup
// ---------------------------------------------------------------------------

/// Initialize tracing based on CLI flags. Logs go to stderr.
pub(crate) fn init_tracing(cli: &Cli) {
    use tracing_subscriber::{EnvFilter, fmt};

    let filter = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    match cli.log_format {
        LogFormat::Text => {
            fmt()
                .with_env_filter(env_filter)
                .with_writer(std::io::stderr)
                .with_target(false)
                .init();
        }
        LogFormat::Json => {
            fmt()
                .json()
                .with_env_filter(env_filter)
                .with_writer(std::io::stderr)
                .init();
        }
    }
}

// ---------------------------------------------------------------------------
// Command dispatch
// ---------------------------------------------------------------------------

/// Run the CLI command.
pub(crate) fn run(cli: Cli) -> Result<()> {
    let config_path = cli.config_file;
    match cli.command {
        Command::Group { file, format } => {
            cmd_group(&resolve_config(config_path.as_deref())?, &file, format)
        }
        Command::Themes { file, format } => {
            cmd_themes(&resolve_config(config_path.as_deref())?, &file, format)
        }
        Command::Urls {
            file,
            domain,
            positions,
        } => cmd_urls(
            &resolve_config(config_path.as_deref())?,
            &file,
            &domain,
            positions,
        ),
        Command::Report {
            file,
            domain,
            out,
            positions,
        } => cmd_report(
            &resolve_config(config_path.as_deref())?,
            &file,
            &domain,
            out.as_deref(),
            positions,
        ),
        Command::Config { action } => match action {
            ConfigAction::Init => cmd_config_init(),
            ConfigAction::Show => cmd_config_show(config_path.as_deref()),
        },
    }
}

fn resolve_config(path: Option<&Path>) -> Result<AppConfig> {
    let config = match path {
        Some(p) => load_config_from(p)?,
        None => load_config()?,
    };
    Ok(config)
}

fn grouping_options(config: &AppConfig) -> Result<GroupingOptions> {
    let opts = GroupingOptions::from(config);
    opts.validate()?;
    Ok(opts)
}

fn url_options(config: &AppConfig, positions: Option<String>) -> UrlOptions {
    let mut opts = UrlOptions::from(config);
    if let Some(range) = positions {
        opts.position_range = range;
    }
    opts
}

fn read_keywords(file: &Path) -> Result<Vec<String>> {
    let keywords = load_keywords(file)?;
    if keywords.is_empty() {
        return Err(eyre!("no keywords found in '{}'", file.display()));
    }
    Ok(keywords)
}

// ---------------------------------------------------------------------------
// Command handlers
// ---------------------------------------------------------------------------

fn cmd_group(config: &AppConfig, file: &Path, format: Option<Format>) -> Result<()> {
    let opts = grouping_options(config)?;
    let keywords = read_keywords(file)?;

    info!(file = %file.display(), keywords = keywords.len(), "grouping keywords");
    let groups = kwgroup_grouping::group_keywords_with(&keywords, &opts);

    match format.unwrap_or_else(|| config.defaults.output_format.into()) {
        Format::Json => println!("{}", serde_json::to_string_pretty(&groups)?),
        Format::Text => print!("{}", render_groups(&groups)),
    }
    Ok(())
}

fn cmd_themes(config: &AppConfig, file: &Path, format: Option<Format>) -> Result<()> {
    let opts = grouping_options(config)?;
    let keywords = read_keywords(file)?;
    let themes = kwgroup_grouping::detect_themes(&keywords, &opts);

    match format.unwrap_or_else(|| config.defaults.output_format.into()) {
        Format::Json => println!("{}", serde_json::to_string_pretty(&themes)?),
        Format::Text => print!("{}", render_themes(&themes)),
    }
    Ok(())
}

fn cmd_urls(
    config: &AppConfig,
    file: &Path,
    domain: &str,
    positions: Option<String>,
) -> Result<()> {
    if kwgroup_ahrefs::normalize_domain(domain).is_empty() {
        return Err(eyre!("invalid domain '{domain}'"));
    }
    let opts = grouping_options(config)?;
    let keywords = read_keywords(file)?;

    let groups = kwgroup_grouping::group_keywords_with(&keywords, &opts);
    let urls = kwgroup_ahrefs::generate_grouped_ahrefs_urls_with(
        domain,
        &groups,
        &url_options(config, positions),
    );

    for url in &urls {
        println!("# {} [{}]", url.name, url.relevance);
        println!("{}", url.url);
        println!();
    }
    Ok(())
}

fn cmd_report(
    config: &AppConfig,
    file: &Path,
    domain: &str,
    out: Option<&Path>,
    positions: Option<String>,
) -> Result<()> {
    let keywords = read_keywords(file)?;
    let report_config = ReportConfig {
        domain: domain.to_string(),
        grouping: grouping_options(config)?,
        urls: url_options(config, positions),
        tool_version: env!("CARGO_PKG_VERSION").to_string(),
    };

    let report = build_report(&report_config, &keywords)?;

    match out {
        Some(path) => {
            write_report(path, &report)?;
            println!();
            println!("  Report written!");
            println!("  ID:       {}", report.id);
            println!("  Keywords: {}", report.keyword_count);
            println!("  Groups:   {}", report.summary.group_count);
            println!("  Target:   {}", report.target_url);
            println!("  Path:     {}", path.display());
            println!();
        }
        None => println!("{}", serde_json::to_string_pretty(&report)?),
    }
    Ok(())
}

fn cmd_config_init() -> Result<()> {
    let path = init_config()?;
    println!("Config initialized at: {}", path.display());
    Ok(())
}

fn cmd_config_show(path: Option<&Path>) -> Result<()> {
    let config = resolve_config(path)?;
    let toml_str = toml::to_string_pretty(&config)?;
    println!("{toml_str}");
    Ok(())
}

// ---------------------------------------------------------------------------
// Text rendering
// ---------------------------------------------------------------------------

fn render_groups(groups: &[KeywordGroup]) -> String {
    let mut out = String::new();
    for group in groups {
        out.push_str(&format!(
            "{} [{}, {} keywords]\n",
            group.name,
            group.relevance,
            group.len()
        ));
        for keyword in &group.keywords {
            out.push_str(&format!("  - {keyword}\n"));
        }
        out.push('\n');
    }

    let summary = kwgroup_grouping::summarize(groups);
    out.push_str(&format!(
        "{} keywords in {} groups ({} core, {} related, {} wider)\n",
        summary.total_keywords,
        summary.group_count,
        summary.core_groups,
        summary.related_groups,
        summary.wider_groups
    ));
    out
}

fn render_themes(themes: &[Theme]) -> String {
    let width = themes.iter().map(|t| t.term.len()).max().unwrap_or(0);
    themes
        .iter()
        .map(|t| {
            let kind = match t.kind {
                kwgroup_shared::ThemeKind::Core => "core",
                kwgroup_shared::ThemeKind::Related => "related",
            };
            format!("{:<width$}  {:<7}  {}\n", t.term, kind, t.count)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use kwgroup_shared::{Relevance, ThemeKind};

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_urls_command() {
        let cli = Cli::try_parse_from([
            "kwgroup",
            "urls",
            "keywords.txt",
            "--domain",
            "example.com",
            "--positions",
            "1-10",
        ])
        .expect("parse");
        match cli.command {
            Command::Urls {
                domain, positions, ..
            } => {
                assert_eq!(domain, "example.com");
                assert_eq!(positions.as_deref(), Some("1-10"));
            }
            _ => panic!("expected urls command"),
        }
    }

    #[test]
    fn position_flag_overrides_config() {
        let config = AppConfig::default();
        assert_eq!(url_options(&config, None).position_range, "1-50");
        assert_eq!(
            url_options(&config, Some(String::new())).position_range,
            ""
        );
    }

    #[test]
    fn render_groups_lists_keywords_and_summary() {
        let groups = vec![KeywordGroup::new(
            "Loan Keywords",
            vec!["car loan".into(), "home loan".into()],
            Relevance::Core,
        )];
        let text = render_groups(&groups);
        assert!(text.starts_with("Loan Keywords [core, 2 keywords]\n"));
        assert!(text.contains("  - home loan\n"));
        assert!(text.ends_with("2 keywords in 1 groups (1 core, 0 related, 0 wider)\n"));
    }

    #[test]
    fn render_themes_aligns_columns() {
        let themes = vec![
            Theme {
                term: "credit card".into(),
                count: 18,
                kind: ThemeKind::Core,
                compound: true,
            },
            Theme {
                term: "loan".into(),
                count: 4,
                kind: ThemeKind::Related,
                compound: false,
            },
        ];
        let text = render_themes(&themes);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "credit card  core     18");
        assert_eq!(lines[1], "loan         related  4");
    }
}
