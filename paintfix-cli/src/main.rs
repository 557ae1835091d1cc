use anyhow::Context;
use camino::{Utf8Path, Utf8PathBuf};
use clap::{Parser, Subcommand};
use paintfix_cli::config::{self, ConfigMerger, RunFlags};
use paintfix_cli::explain;
use paintfix_core::adapters::{FsDocumentSource, FsWritePort, InMemoryDocument};
use paintfix_core::pipeline::{RunError, run_action, write_run_artifacts};
use paintfix_core::ports::{DocumentSource, WritePort};
use paintfix_domain::{suggest_actions, suggest_excluded_names, suggest_scopes};
use paintfix_types::report::ToolInfo;
use std::process::ExitCode;
use tracing::{debug, error, info};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(
    name = "paintfix",
    version,
    about = "Remove, detach or replace styles, color variables and colors in a design document."
)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Run one action over the document's selection (default: dry-run).
    Run(RunArgs),
    /// List all available actions.
    ListActions(ListActionsArgs),
    /// Explain what an action does to fills, strokes and effects.
    Explain(ExplainArgs),
    /// Suggest values for an action parameter.
    Suggest(SuggestArgs),
}

#[derive(Debug, Parser)]
struct RunArgs {
    /// Path to a `paintfix.document.v1` JSON document.
    #[arg(long)]
    document: Utf8PathBuf,

    /// Action identifier (see `paintfix list-actions`).
    #[arg(long)]
    action: String,

    /// `whole-subtree` or `nested-only` (default: whole-subtree).
    #[arg(long)]
    scope: Option<String>,

    /// Skip nodes whose name starts with this prefix.
    #[arg(long)]
    exclude: Option<String>,

    /// Skip the whole subtree under an excluded node instead of only the node.
    #[arg(long, default_value_t = false)]
    preserve_children: bool,

    /// Rewrite the document. If omitted, runs a dry-run and only emits artifacts.
    #[arg(long, default_value_t = false)]
    apply: bool,

    /// Output directory for run artifacts (default: <document dir>/artifacts/paintfix).
    #[arg(long)]
    out_dir: Option<Utf8PathBuf>,

    /// Config file (default: paintfix.toml next to the document).
    #[arg(long)]
    config: Option<Utf8PathBuf>,
}

#[derive(Debug, Parser)]
struct ListActionsArgs {
    /// Output format (text, json).
    #[arg(long, value_enum, default_value = "text")]
    format: OutputFormat,
}

#[derive(Debug, Parser)]
struct ExplainArgs {
    /// Action identifier to explain (e.g., "remove-style").
    action: String,
}

#[derive(Debug, Parser)]
struct SuggestArgs {
    /// Parameter to complete.
    #[arg(value_enum)]
    parameter: SuggestParameter,

    /// Text typed so far.
    #[arg(default_value = "")]
    query: String,

    /// Document whose node names are suggested (required for `name`).
    #[arg(long)]
    document: Option<Utf8PathBuf>,
}

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
enum SuggestParameter {
    Name,
    Scope,
    Action,
}

fn main() -> ExitCode {
    match real_main() {
        Ok(()) => ExitCode::from(0),
        Err(e) => {
            error!("{:?}", e);
            let code = e.downcast_ref::<RunError>().map_or(1, RunError::exit_code);
            ExitCode::from(code)
        }
    }
}

fn real_main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Run(args) => cmd_run(args),
        Command::ListActions(args) => cmd_list_actions(args),
        Command::Explain(args) => cmd_explain(args),
        Command::Suggest(args) => cmd_suggest(args),
    }
}

fn cmd_run(args: RunArgs) -> anyhow::Result<()> {
    let doc_dir = document_dir(&args.document);

    // Load config file and merge with CLI arguments
    let file_config = match &args.config {
        Some(path) => config::load_config(path)?,
        None => config::load_or_default(&doc_dir).context("load paintfix.toml config")?,
    };
    let merged = ConfigMerger::new(file_config).merge_run_args(&RunFlags {
        action: &args.action,
        scope: args.scope.as_deref(),
        exclude: args.exclude.as_deref(),
        preserve_children: args.preserve_children,
        apply: args.apply,
    });
    debug!(
        "merged config: scope={}, exclude={:?}, preserve_children={}",
        merged.settings.scope, merged.settings.excluded_prefix, merged.settings.preserve_children
    );

    let out_dir = args
        .out_dir
        .or_else(|| merged.out_dir.map(|dir| doc_dir.join(dir)))
        .unwrap_or_else(|| doc_dir.join("artifacts").join("paintfix"));

    let document = FsDocumentSource::new(args.document.clone()).load_document()?;
    let mut host = InMemoryDocument::from_document(document);

    let outcome = run_action(&merged.settings, &mut host, tool_info())?;
    write_run_artifacts(&outcome, &out_dir, &FsWritePort).context("write run artifacts")?;
    info!("wrote run artifacts to {}", out_dir);

    if args.apply && !outcome.patch.is_empty() {
        let mut json = host.to_json_pretty()?;
        json.push('\n');
        FsWritePort.write_file(&args.document, json.as_bytes())?;
        info!("rewrote {}", args.document);
    }

    println!("{}", outcome.message);
    Ok(())
}

fn document_dir(document: &Utf8Path) -> Utf8PathBuf {
    match document.parent() {
        Some(parent) if !parent.as_str().is_empty() => parent.to_path_buf(),
        _ => Utf8PathBuf::from("."),
    }
}

fn tool_info() -> ToolInfo {
    ToolInfo {
        name: "paintfix".to_string(),
        version: Some(env!("CARGO_PKG_VERSION").to_string()),
    }
}

fn cmd_explain(args: ExplainArgs) -> anyhow::Result<()> {
    use explain::{list_action_keys, lookup_action, rule_meaning};

    let Some(entry) = lookup_action(&args.action) else {
        let available = list_action_keys().join(", ");
        anyhow::bail!(
            "Unknown action: '{}'\n\nAvailable actions: {}",
            args.action,
            available
        );
    };

    println!("================================================================================");
    println!("ACTION: {}", entry.title);
    println!("================================================================================");
    println!();
    println!("Key:      {}", entry.key());
    println!("Message:  {}", entry.action.completion_message());
    println!();

    println!("DESCRIPTION");
    println!("--------------------------------------------------------------------------------");
    println!("{}", entry.description);
    println!();

    println!("PER ATTRIBUTE");
    println!("--------------------------------------------------------------------------------");
    for (attribute, rule) in entry.rules() {
        println!("  {:<8} {}", attribute.as_str(), rule_meaning(rule));
    }
    println!();

    println!("NOTES");
    println!("--------------------------------------------------------------------------------");
    println!("{}", entry.notes);
    println!();

    Ok(())
}

fn cmd_list_actions(args: ListActionsArgs) -> anyhow::Result<()> {
    use explain::ACTION_REGISTRY;

    match args.format {
        OutputFormat::Text => {
            println!("Available actions:\n");
            println!("  {:<22} SUMMARY", "KEY");
            println!("  {:<22} -------", "---");
            for entry in ACTION_REGISTRY {
                println!("  {:<22} {}", entry.key(), entry.action.summary());
            }
            println!();
            println!("Use 'paintfix explain <key>' for details.");
        }
        OutputFormat::Json => {
            let actions: Vec<_> = ACTION_REGISTRY
                .iter()
                .map(|e| {
                    serde_json::json!({
                        "key": e.key(),
                        "title": e.title,
                        "summary": e.action.summary(),
                        "message": e.action.completion_message(),
                    })
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&actions)?);
        }
    }
    Ok(())
}

fn cmd_suggest(args: SuggestArgs) -> anyhow::Result<()> {
    let suggestions: Vec<String> = match args.parameter {
        SuggestParameter::Scope => suggest_scopes(&args.query)
            .into_iter()
            .map(str::to_string)
            .collect(),
        SuggestParameter::Action => suggest_actions(&args.query)
            .into_iter()
            .map(str::to_string)
            .collect(),
        SuggestParameter::Name => {
            let Some(path) = args.document else {
                anyhow::bail!("suggesting names needs --document");
            };
            let document = FsDocumentSource::new(path).load_document()?;
            suggest_excluded_names(&document.selection, &args.query)
        }
    };

    for suggestion in suggestions {
        println!("{}", suggestion);
    }
    Ok(())
}
