//! Aurelia CLI - browse and exercise the progressive-unlock catalog.

use anyhow::{bail, Context, Result};
use aurelia_catalog::{load_document, seed, to_json, validate, Severity};
use aurelia_core::{Document, Element, ElementId, Hierarchy};
use aurelia_engine::{
    resolve, suggest_next_phase, DeselectPolicy, EngineConfig, Resolution, ScriptPreview, Session,
};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "aurelia")]
#[command(about = "Progressive-unlock catalog for wellness scripts", long_about = None)]
struct Cli {
    /// Catalog JSON file (defaults to the built-in catalog)
    #[arg(long, global = true)]
    catalog: Option<PathBuf>,

    /// Engine configuration JSON file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Deselect policy: preserve or cascade
    #[arg(long, global = true)]
    policy: Option<DeselectPolicy>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List elements with selection and lock state
    Elements {
        /// Select these elements first, in order
        #[arg(long = "select")]
        select: Vec<String>,
        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// List phases with lock state
    Phases {
        /// Select these elements first, in order
        #[arg(long = "select")]
        select: Vec<String>,
        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Toggle elements in order and show the result
    Toggle {
        /// Element ids
        #[arg(required = true)]
        ids: Vec<String>,
    },
    /// Suggest the phase to work on after the given one
    Suggest {
        /// Current phase name
        #[arg(long)]
        phase: String,
        /// Select these elements first, in order
        #[arg(long = "select")]
        select: Vec<String>,
    },
    /// Build a script preview from a selection
    Preview {
        /// Select these elements first, in order
        #[arg(long = "select")]
        select: Vec<String>,
        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Check the catalog for broken references and cycles
    Validate,
    /// Print the catalog as JSON
    Export,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_env("AURELIA_LOG").unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let document = match &cli.catalog {
        Some(path) => load_document(path)
            .await
            .with_context(|| format!("loading catalog {}", path.display()))?,
        None => seed::document(),
    };
    let config = build_config(cli.config.as_deref(), cli.policy).await?;
    info!("Deselect policy: {}", config.deselect_policy);

    let mut session = Session::new(document).with_config(config);

    match cli.command {
        Commands::Elements { select, json } => {
            apply_selection(&mut session, &select);
            if json {
                println!("{}", serde_json::to_string_pretty(&session.document().elements)?);
            } else {
                print_elements(session.document());
            }
        }
        Commands::Phases { select, json } => {
            apply_selection(&mut session, &select);
            if json {
                println!("{}", serde_json::to_string_pretty(&session.document().phases)?);
            } else {
                print_phases(session.document());
            }
        }
        Commands::Toggle { ids } => {
            for id in &ids {
                match session.toggle(&ElementId::from(id.as_str())) {
                    Ok(outcome) => {
                        println!("{}", outcome.event.message);
                        for cascaded in &outcome.cascaded {
                            println!("  {}", cascaded.message);
                        }
                    }
                    Err(err) => println!("! {} ({})", err.notice(), err.element_id()),
                }
            }
            println!();
            print_elements(session.document());
        }
        Commands::Suggest { phase, select } => {
            apply_selection(&mut session, &select);
            let Some(current) = session.document().phase(&phase) else {
                bail!("unknown phase: {}", phase);
            };
            match suggest_next_phase(session.document(), current) {
                Some(next) => println!("Next: {} - {}", next.name, next.description),
                None => println!("No phase to suggest yet; keep building {}", current.name),
            }
        }
        Commands::Preview { select, json } => {
            apply_selection(&mut session, &select);
            let preview = ScriptPreview::build(session.document())?;
            if json {
                println!("{}", serde_json::to_string_pretty(&preview)?);
            } else {
                print_preview(&preview);
            }
        }
        Commands::Validate => {
            let report = validate(session.document());
            println!(
                "Catalog: {} elements, {} phases, {} foundational",
                report.stats.elements, report.stats.phases, report.stats.roots
            );
            for issue in &report.issues {
                let tag = match issue.severity() {
                    Severity::Error => "ERROR",
                    Severity::Warning => "WARN ",
                };
                println!("  {} {}", tag, issue);
            }
            if !report.is_valid() {
                bail!("catalog has errors");
            }
            println!("OK");
        }
        Commands::Export => {
            println!("{}", to_json(session.document())?);
        }
    }

    Ok(())
}

/// Load the engine config file, if any, then apply command-line overrides.
async fn build_config(path: Option<&Path>, policy: Option<DeselectPolicy>) -> Result<EngineConfig> {
    let mut config = match path {
        Some(path) => {
            let json = tokio::fs::read_to_string(path)
                .await
                .with_context(|| format!("reading config {}", path.display()))?;
            serde_json::from_str(&json)
                .with_context(|| format!("parsing config {}", path.display()))?
        }
        None => EngineConfig::default(),
    };
    if let Some(policy) = policy {
        config.deselect_policy = policy;
    }
    Ok(config)
}

fn apply_selection(session: &mut Session, ids: &[String]) {
    for id in ids {
        match session.select(&ElementId::from(id.as_str())) {
            Ok(Some(outcome)) => debug!("{}", outcome.event.message),
            Ok(None) => {}
            Err(err) => eprintln!("warning: {} ({})", err.notice(), err.element_id()),
        }
    }
}

fn print_elements(document: &Document) {
    println!("Elements ({} selected / {})", document.selected_count(), document.elements.len());
    for hierarchy in Hierarchy::ALL {
        println!("  {}", hierarchy);
        for element in document.elements.iter().filter(|e| e.hierarchy == hierarchy) {
            println!("    {}", format_element(document, element));
        }
    }
}

fn format_element(document: &Document, element: &Element) -> String {
    let mark = if element.selected { "[x]" } else { "[ ]" };
    let lock = match resolve(document, element) {
        _ if element.unlocked => String::new(),
        Resolution::Blocked(missing) => {
            let ids: Vec<&str> = missing.iter().map(|id| id.as_str()).collect();
            format!("  LOCKED (needs {})", ids.join(", "))
        }
        Resolution::Ready => "  LOCKED".to_string(),
    };
    format!(
        "{} {:<4} {:<24} {:<15} L{}{}",
        mark,
        element.id,
        element.name,
        element.category,
        element.layer.number(),
        lock
    )
}

fn print_phases(document: &Document) {
    println!("Phases ({})", document.phases.len());
    for phase in &document.phases {
        let total = document.elements_in(&phase.name).count();
        let selected = document.elements_in(&phase.name).filter(|e| e.selected).count();
        println!(
            "  {:<8} {:<15} L{} {:<13} {:<12} {}/{} selected",
            if phase.unlocked { "open" } else { "LOCKED" },
            phase.name,
            phase.layer.number(),
            phase.hierarchy,
            phase.layer.label(),
            selected,
            total
        );
    }
}

fn print_preview(preview: &ScriptPreview) {
    println!("{} ({}, ~{} words)", preview.title, preview.duration, preview.word_count);
    println!("  Completion: {:.0}%", preview.completion_score);
    for hierarchy in Hierarchy::ALL {
        println!("  {:<13} {:>5.1}%", hierarchy, preview.hierarchy_balance.get(hierarchy));
    }
    for section in &preview.sections {
        println!();
        println!("  {} [{}]", section.name, section.duration);
        println!("    {}", section.content);
        if !section.elements.is_empty() {
            println!("    Elements: {}", section.elements.join(", "));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_build_config_policy_override() {
        let config = build_config(None, Some(DeselectPolicy::Cascade)).await.unwrap();
        assert_eq!(config.deselect_policy, DeselectPolicy::Cascade);
        assert!(config.record_rejections);
    }

    #[tokio::test]
    async fn test_build_config_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        tokio::fs::write(&path, r#"{"deselect_policy":"cascade","record_rejections":false}"#)
            .await
            .unwrap();

        let config = build_config(Some(&path), None).await.unwrap();
        assert_eq!(config.deselect_policy, DeselectPolicy::Cascade);
        assert!(!config.record_rejections);

        let overridden = build_config(Some(&path), Some(DeselectPolicy::Preserve)).await.unwrap();
        assert_eq!(overridden.deselect_policy, DeselectPolicy::Preserve);
    }

    #[test]
    fn test_format_element_shows_missing_prerequisites() {
        let session = Session::new(seed::document());
        let doc = session.document();
        let sk1 = doc.element(&ElementId::from("sk1")).unwrap();
        let line = format_element(doc, sk1);
        assert!(line.starts_with("[ ] sk1"));
        assert!(line.ends_with("LOCKED (needs h1, h2)"));

        let m1 = doc.element(&ElementId::from("m1")).unwrap();
        assert!(!format_element(doc, m1).contains("LOCKED"));
    }

    #[test]
    fn test_json_is_a_subcommand_flag() {
        let cli = Cli::try_parse_from(["aurelia", "phases", "--select", "m1", "--json"]).unwrap();
        match cli.command {
            Commands::Phases { select, json } => {
                assert_eq!(select, vec!["m1"]);
                assert!(json);
            }
            _ => panic!("expected phases"),
        }

        let cli = Cli::try_parse_from(["aurelia", "preview", "--json"]).unwrap();
        assert!(matches!(cli.command, Commands::Preview { json: true, .. }));

        assert!(Cli::try_parse_from(["aurelia", "validate", "--json"]).is_err());
    }

    #[test]
    fn test_cli_parses_global_policy() {
        let cli = Cli::try_parse_from(["aurelia", "toggle", "m1", "h1", "--policy", "cascade"]).unwrap();
        assert_eq!(cli.policy, Some(DeselectPolicy::Cascade));
        match cli.command {
            Commands::Toggle { ids } => assert_eq!(ids, vec!["m1", "h1"]),
            _ => panic!("expected toggle"),
        }
    }
}
