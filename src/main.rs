// Tue Jan 13 2026 - Alex

use anyhow::{anyhow, Context};
use clap::Parser;
use colored::Colorize;
use reflect_static_analyzer::{
    config::AnalyzerConfig,
    register_builtin_checks,
    subject::CheckOutcome,
    utils::{pluralize, ScopedTimer},
    Catalog, CheckRegistry, CheckScheduler, DiagnosticEmitter, SchedulerStats, Severity, SourceLocator,
    SubjectRegistry,
};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author = "Alex")]
#[command(version = "1.0.0")]
#[command(about = "Post-build analyzer for reflection-capable classes", long_about = None)]
struct Args {
    /// Regex selecting class manifests by path (repeatable).
    #[arg(short = 'r', long = "manifest-pattern")]
    manifest_patterns: Vec<String>,

    /// Only check classes matching one of these regexes (repeatable).
    #[arg(short = 'c', long = "class-pattern")]
    class_patterns: Vec<String>,

    /// Skip classes matching any of these regexes (repeatable).
    #[arg(short = 'C', long = "class-anti-pattern")]
    class_anti_patterns: Vec<String>,

    #[arg(long)]
    data_objects_only: bool,

    #[arg(short, long)]
    debug: bool,

    /// Extra directory searched for declaring headers (repeatable).
    #[arg(short = 'I', long = "include")]
    include: Vec<PathBuf>,

    /// JSON description of the classes known to the reflection service.
    #[arg(long)]
    catalog: Option<PathBuf>,

    #[arg(long)]
    config: Option<PathBuf>,

    #[arg(long)]
    no_color: bool,
}

fn build_config(args: &Args) -> anyhow::Result<AnalyzerConfig> {
    let mut config = match &args.config {
        Some(path) => AnalyzerConfig::from_file(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => AnalyzerConfig::default(),
    };

    for pattern in &args.manifest_patterns {
        config = config.with_manifest_pattern(pattern);
    }
    for pattern in &args.class_patterns {
        config = config.with_include_pattern(pattern);
    }
    for pattern in &args.class_anti_patterns {
        config = config.with_exclude_pattern(pattern);
    }
    for dir in &args.include {
        config = config.with_search_path(dir.clone());
    }
    if args.data_objects_only {
        config = config.with_data_objects_only(true);
    }
    if args.debug {
        config = config.with_debug(true);
    }
    if let Some(catalog) = &args.catalog {
        config = config.with_catalog(catalog.clone());
    }

    let config = config.with_env_include_path();
    config.validate()?;
    Ok(config)
}

fn run(args: &Args) -> anyhow::Result<()> {
    let config = build_config(args)?;
    reflect_static_analyzer::utils::init_logger(config.debug);
    let timer = ScopedTimer::new("analysis");

    let catalog_path = config
        .catalog
        .clone()
        .ok_or_else(|| anyhow!("No class catalog given, use --catalog or the config file"))?;
    let catalog = Catalog::from_file(&catalog_path)
        .with_context(|| format!("Failed to load catalog {}", catalog_path.display()))?;
    log::debug!("{} classes described by {}", catalog.len(), catalog_path.display());

    let mut subjects = SubjectRegistry::from_config(&config, &catalog)?;
    log::info!("{} to check", pluralize(subjects.len(), "class", "classes"));

    let mut registry = CheckRegistry::new();
    register_builtin_checks(&mut registry);

    let locator = SourceLocator::new(config.search_paths.clone(), config.stripped_search_paths.clone());
    let diagnostics = DiagnosticEmitter::stderr(locator, &config.suppression_marker);

    let stats = CheckScheduler::new(&registry, &diagnostics, config.stream_buffer_capacity)
        .with_debug(config.debug)
        .run_all(subjects.subjects_mut());
    diagnostics.flush();

    print_summary(&subjects, &registry, &stats, &diagnostics, &timer.elapsed_display());
    Ok(())
}

fn print_summary(
    subjects: &SubjectRegistry,
    registry: &CheckRegistry,
    stats: &SchedulerStats,
    diagnostics: &DiagnosticEmitter,
    elapsed: &str,
) {
    println!();
    println!("{}", "Analysis Summary".cyan().bold());
    println!("{}", "-".repeat(40).cyan());

    for name in registry.names() {
        let failed = subjects
            .subjects()
            .iter()
            .filter(|s| s.outcome(name) == CheckOutcome::Failed)
            .count();
        let succeeded = subjects
            .subjects()
            .iter()
            .filter(|s| s.outcome(name) == CheckOutcome::Succeeded)
            .count();
        let failed = if failed > 0 {
            failed.to_string().red()
        } else {
            failed.to_string().green()
        };
        println!("  {:<40} {} ok, {} failed", name, succeeded.to_string().green(), failed);
    }

    println!();
    println!(
        "{} {} in {} over {}",
        "[+]".green(),
        pluralize(stats.executions(), "check run", "check runs"),
        elapsed,
        pluralize(stats.passes(), "pass", "passes")
    );
    if stats.panicked > 0 {
        println!("{} {} aborted", "[!]".yellow(), pluralize(stats.panicked, "check", "checks"));
    }

    let errors = diagnostics.count(Severity::Error);
    let warnings = diagnostics.count(Severity::Warning);
    let label = if errors > 0 { "[!]".red() } else { "[+]".green() };
    println!(
        "{} {}, {}",
        label,
        pluralize(errors, "error", "errors"),
        pluralize(warnings, "warning", "warnings")
    );
}

fn main() {
    let args = Args::parse();
    if args.no_color {
        colored::control::set_override(false);
    }

    // Findings never change the exit status, only start-up failures do.
    if let Err(e) = run(&args) {
        eprintln!("{} {:#}", "[!]".red(), e);
        std::process::exit(1);
    }
}
