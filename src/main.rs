//! CLI entry point for `attachview`.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use clap::{CommandFactory, FromArgMatches, Parser, Subcommand};

use attachview::config::{self, Config};
use attachview::export::{self, DirectoryExporter};
use attachview::i18n;
use attachview::model::Attachment;
use attachview::store::{AttachmentStore, DirectoryStore};
use attachview::tui::app::split_record_dir;

#[derive(Parser)]
#[command(name = "attachview", version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Record directory to open
    #[arg(value_name = "DIR")]
    dir: Option<PathBuf>,

    /// Verbose logging (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Language (en, es). Defaults to system locale.
    #[arg(long, value_name = "LANG")]
    lang: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Open a record directory in the viewer
    Open { dir: PathBuf },
    /// List the attachments of a record
    List {
        dir: PathBuf,
        #[arg(long)]
        json: bool,
    },
    /// Export attachments of a record
    Export {
        dir: PathBuf,
        /// Attachment id (`<record>/<file>`) or file name; all when omitted
        #[arg(long)]
        id: Option<String>,
        #[arg(short, long)]
        output: PathBuf,
    },
    /// Write the default configuration file
    InitConfig,
    /// Generate shell completions
    Completions {
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
    /// Generate a man page
    Manpage,
}

/// Detect language early from --lang arg or system env, before clap processes --help.
fn detect_lang_early() -> i18n::Lang {
    let args: Vec<String> = std::env::args().collect();
    for (i, arg) in args.iter().enumerate() {
        let code = if arg == "--lang" {
            args.get(i + 1).map(String::as_str)
        } else {
            arg.strip_prefix("--lang=")
        };
        if let Some(lang) = code.and_then(i18n::Lang::from_code) {
            return lang;
        }
    }
    i18n::detect_system_lang()
}

/// Build a localized clap Command using i18n strings.
fn build_localized_command() -> clap::Command {
    let mut cmd = Cli::command()
        .about(i18n::app_about())
        .long_about(i18n::app_long_about())
        .after_help(i18n::app_after_help());

    let localized: [(&str, &str); 6] = [
        ("open", i18n::help_cmd_open()),
        ("list", i18n::help_cmd_list()),
        ("export", i18n::help_cmd_export()),
        ("init-config", i18n::help_cmd_init_config()),
        ("completions", i18n::help_cmd_completions()),
        ("manpage", i18n::help_cmd_manpage()),
    ];
    for (name, about) in localized {
        cmd = cmd.mut_subcommand(name, |s| s.about(about));
    }
    cmd
}

fn main() -> anyhow::Result<()> {
    // Detect language BEFORE clap parsing so --help is localized
    i18n::set_lang(detect_lang_early());

    let matches = build_localized_command().get_matches();
    let cli = Cli::from_arg_matches(&matches)?;

    let config = config::load_config();

    let log_level = match cli.verbose {
        0 => config.general.log_level.as_str(),
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    setup_logging(log_level, &config);

    match cli.command {
        Some(Commands::Open { dir }) => cmd_open(&dir, &config),
        None => match cli.dir {
            Some(dir) => cmd_open(&dir, &config),
            None => {
                eprintln!("{}", i18n::err_no_dir_given());
                Ok(())
            }
        },
        Some(Commands::List { dir, json }) => cmd_list(&dir, json),
        Some(Commands::Export { dir, id, output }) => {
            cmd_export(&dir, id.as_deref(), &output, &config)
        }
        Some(Commands::InitConfig) => cmd_init_config(&config),
        Some(Commands::Completions { shell }) => cmd_completions(shell),
        Some(Commands::Manpage) => cmd_manpage(),
    }
}

/// Set up tracing with stderr output and optional file logging.
fn setup_logging(level: &str, config: &Config) {
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::util::SubscriberInitExt;

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    let stderr_layer = tracing_subscriber::fmt::layer().with_writer(std::io::stderr);

    let log_path = config::log_file_path(config);
    let log_dir = config::cache_dir(config);
    if std::fs::create_dir_all(&log_dir).is_ok() {
        let file_name = log_path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_else(|| "attachview.log".into());
        let file_appender = tracing_appender::rolling::never(&log_dir, file_name);
        let file_layer = tracing_subscriber::fmt::layer()
            .with_ansi(false)
            .with_writer(file_appender);

        tracing_subscriber::registry()
            .with(env_filter)
            .with(stderr_layer)
            .with(file_layer)
            .init();
    } else {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(stderr_layer)
            .init();
    }
}

fn ensure_dir(dir: &Path) -> anyhow::Result<()> {
    if !dir.is_dir() {
        anyhow::bail!("{}: {}", i18n::err_dir_not_found(), dir.display());
    }
    Ok(())
}

fn cmd_open(dir: &Path, config: &Config) -> anyhow::Result<()> {
    ensure_dir(dir)?;
    attachview::tui::run_tui(dir, config)
}

/// Fetch a record's attachments through the directory store.
fn fetch_record(dir: &Path) -> anyhow::Result<Vec<Attachment>> {
    ensure_dir(dir)?;
    let (root, record) = split_record_dir(dir)?;
    let store: Arc<dyn AttachmentStore> = Arc::new(DirectoryStore::new(root));
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    Ok(runtime.block_on(store.fetch(&record))?)
}

/// Print the attachment table of a record.
fn cmd_list(dir: &Path, json: bool) -> anyhow::Result<()> {
    let attachments = fetch_record(dir)?;
    if json {
        print_list_json(&attachments)
    } else {
        print_list_table(&attachments);
        Ok(())
    }
}

fn print_list_table(attachments: &[Attachment]) {
    use humansize::{format_size, BINARY};

    println!();
    if attachments.is_empty() {
        println!("  {}", i18n::msg_no_attachments());
        println!();
        return;
    }
    println!("  {} {}", attachments.len(), i18n::msg_attachments());
    println!();
    println!(
        "  {:<4} {:<32} {:<18} {:>10}  {}",
        "#",
        i18n::cli_col_title(),
        i18n::tui_col_type(),
        i18n::tui_col_size(),
        i18n::cli_col_id()
    );
    println!("  {}", "-".repeat(90));

    for (i, att) in attachments.iter().enumerate() {
        let title: String = att.display_name().chars().take(31).collect();
        println!(
            "  {:<4} {:<32} {:<18} {:>10}  {}",
            i + 1,
            title,
            att.mime_type,
            format_size(att.estimated_size(), BINARY),
            att.id
        );
    }
    println!();
}

fn print_list_json(attachments: &[Attachment]) -> anyhow::Result<()> {
    let items: Vec<serde_json::Value> = attachments
        .iter()
        .map(|a| {
            serde_json::json!({
                "id": a.id,
                "mime_type": a.mime_type,
                "kind": a.kind().label(),
                "title": a.title,
                "note": a.note_text,
                "filename": a.suggested_filename(),
                "size": a.estimated_size(),
            })
        })
        .collect();
    println!("{}", serde_json::to_string_pretty(&items)?);
    Ok(())
}

/// Export one attachment (by id or file name) or all of them.
fn cmd_export(dir: &Path, id: Option<&str>, output: &Path, config: &Config) -> anyhow::Result<()> {
    let attachments = fetch_record(dir)?;
    let selected: Vec<&Attachment> = match id {
        Some(id) => {
            let found = attachments
                .iter()
                .find(|a| a.id == id || a.filename.as_deref() == Some(id))
                .ok_or_else(|| anyhow::anyhow!("{}: {id}", i18n::err_attachment_not_found()))?;
            vec![found]
        }
        None => attachments.iter().collect(),
    };

    if selected.is_empty() {
        println!("  {}", i18n::msg_no_attachments());
        return Ok(());
    }

    let exporter = DirectoryExporter::new(output);
    for att in &selected {
        export::export_attachment(att, &exporter, config.export.chunk_size)?;
    }

    println!(
        "  {} {} {} {}",
        i18n::msg_exported(),
        selected.len(),
        i18n::msg_attachments_to(),
        output.display()
    );
    Ok(())
}

/// Write the current (default-filled) configuration to the config path.
fn cmd_init_config(config: &Config) -> anyhow::Result<()> {
    config::save_config(config)?;
    if let Some(path) = config::config_file_path() {
        println!("  {} {}", i18n::msg_config_written(), path.display());
    }
    Ok(())
}

/// Generate shell completions and print to stdout.
fn cmd_completions(shell: clap_complete::Shell) -> anyhow::Result<()> {
    let mut cmd = Cli::command();
    clap_complete::generate(shell, &mut cmd, "attachview", &mut std::io::stdout());
    Ok(())
}

/// Generate a man page and print to stdout.
fn cmd_manpage() -> anyhow::Result<()> {
    let man = clap_mangen::Man::new(Cli::command());
    let mut buf = Vec::new();
    man.render(&mut buf)?;
    std::io::Write::write_all(&mut std::io::stdout(), &buf)?;
    Ok(())
}
