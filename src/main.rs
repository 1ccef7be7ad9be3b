use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;
use tracing_subscriber::EnvFilter;

use cachenuker::backend::{DryRunBackend, ProfileBackend, SIMULATED_LATENCY};
use cachenuker::categories::{self, CategoryId};
use cachenuker::cli::args::{Cli, Commands, ConfigAction, OutputFormat, ScopeArg, TargetArgs};
use cachenuker::cli::output::{self, RunReport};
use cachenuker::common::config::{Config, OutputFormat as ConfigFormat};
use cachenuker::common::format;
use cachenuker::dispatch::{ClearCapability, Dispatcher, Progress, ResultsSummary};
use cachenuker::origin::{OriginSource, StaticOrigin};
use cachenuker::session::{Scope, Session};

fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.no_color {
        colored::control::set_override(false);
    }

    let filter = if cli.verbose {
        EnvFilter::new("cachenuker=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::List { ref target } => cmd_list(&cli, target),

        Commands::Clear {
            ref target,
            ref toggle,
            select_all,
            ref profile_dir,
            dry_run,
            yes,
        } => cmd_clear(
            &cli,
            target,
            toggle,
            select_all,
            profile_dir.clone(),
            dry_run,
            yes,
        ),

        Commands::Config { action } => cmd_config(action),

        Commands::Completions { shell } => {
            use clap::CommandFactory;
            let mut cmd = Cli::command();
            let shell = match shell {
                cachenuker::cli::args::CompletionShell::Bash => clap_complete::Shell::Bash,
                cachenuker::cli::args::CompletionShell::Zsh => clap_complete::Shell::Zsh,
                cachenuker::cli::args::CompletionShell::Fish => clap_complete::Shell::Fish,
            };
            clap_complete::generate(shell, &mut cmd, "cachenuker", &mut std::io::stdout());
            Ok(())
        }
    }
}

fn runtime() -> Result<tokio::runtime::Runtime> {
    tokio::runtime::Builder::new_current_thread()
        .enable_time()
        .build()
        .context("Failed to start async runtime")
}

/// Detect the active site and open a session in the requested scope.
///
/// Returns the session and whether the requested scope was applied.
async fn open_session(target: &TargetArgs, config: &Config) -> (Session, bool) {
    let origin = StaticOrigin::new(target.site.clone()).active_origin().await;
    let mut session = Session::new(origin);

    let wanted = match target.scope {
        Some(ScopeArg::Global) => Scope::Global,
        Some(ScopeArg::Site) => Scope::Site,
        None => config.default_scope,
    };
    match session.switch_scope(wanted) {
        Ok(_) => (session, true),
        Err(e) => {
            output::print_notice(&e.to_string());
            (session, false)
        }
    }
}

/// Output format for this run: `--format`, else the configured default.
/// `--quiet` turns human output into the quiet form.
fn output_format(cli: &Cli, config: &Config) -> OutputFormat {
    let format = cli.format.clone().unwrap_or(match config.output_format {
        ConfigFormat::Human => OutputFormat::Human,
        ConfigFormat::Json => OutputFormat::Json,
        ConfigFormat::Quiet => OutputFormat::Quiet,
    });
    match format {
        OutputFormat::Human if cli.quiet => OutputFormat::Quiet,
        other => other,
    }
}

// ─── List ─────────────────────────────────────────────────────────────────────

fn cmd_list(cli: &Cli, target: &TargetArgs) -> Result<()> {
    let config = Config::load()?;
    let (session, _) = runtime()?.block_on(open_session(target, &config));

    match output_format(cli, &config) {
        OutputFormat::Human => output::print_categories(&session),
        OutputFormat::Json => output::print_categories_json(&session)?,
        OutputFormat::Quiet => output::print_categories_quiet(&session),
    }
    Ok(())
}

// ─── Clear ────────────────────────────────────────────────────────────────────

fn cmd_clear(
    cli: &Cli,
    target: &TargetArgs,
    toggle: &[String],
    select_all: bool,
    profile_dir: Option<std::path::PathBuf>,
    dry_run: bool,
    yes: bool,
) -> Result<()> {
    let config = Config::load()?;
    let out = output_format(cli, &config);
    let rt = runtime()?;
    let (mut session, scope_applied) = rt.block_on(open_session(target, &config));

    if !scope_applied {
        // Never fall back to clearing the whole profile when a single site was asked for
        anyhow::bail!("Refusing to clear: site scope needs an http(s) page, pass --site <URL>");
    }

    if select_all {
        session.select_all();
    }
    for raw in toggle {
        let id: CategoryId = raw.parse()?;
        if !session.toggle(id) {
            output::print_notice(&format!(
                "{} is not available for site-specific clearing",
                categories::find(id).name
            ));
        }
    }

    let runnable = session.runnable();
    if runnable.is_empty() {
        let line = format!("  {} Nothing selected. {}", "✨", session.stats().run_label());
        match out {
            OutputFormat::Human => println!("{}", line),
            OutputFormat::Json => eprintln!("{}", line),
            OutputFormat::Quiet => {}
        }
        return Ok(());
    }

    let show_progress = matches!(out, OutputFormat::Human);
    if show_progress {
        output::print_categories(&session);
    }

    let backend: Box<dyn ClearCapability> = if dry_run {
        let backend = if show_progress {
            DryRunBackend::with_latency(SIMULATED_LATENCY)
        } else {
            DryRunBackend::new()
        };
        Box::new(backend)
    } else {
        let dir = profile_dir
            .or_else(|| config.profile_dir.clone())
            .or_else(ProfileBackend::discover)
            .context("No browser profile found. Pass --profile-dir or run 'cachenuker config set profile_dir <DIR>'")?;
        let backend = ProfileBackend::open(dir)?;

        if !yes {
            eprint!(
                "  {} Nuke {} from {}? [y/N] ",
                "❓",
                format::format_categories(runnable.len()),
                backend.profile_dir().display()
            );
            use std::io::Write;
            std::io::stderr().flush()?;
            let mut input = String::new();
            std::io::stdin().read_line(&mut input)?;
            if !input.trim().eq_ignore_ascii_case("y") {
                eprintln!("  {} Cancelled", "✗".red());
                return Ok(());
            }
        }
        Box::new(backend)
    };

    let step_delay = if show_progress {
        config.step_delay()
    } else {
        Duration::ZERO
    };
    let pb = if show_progress {
        Some(output::run_progress_bar(runnable.len())?)
    } else {
        None
    };

    let started = Instant::now();
    let scope = session.scope();
    let outcomes = rt.block_on(async {
        let mut dispatcher = Dispatcher::new(backend.as_ref()).with_step_delay(step_delay);
        let sink = |p: &Progress| {
            if let Some(ref pb) = pb {
                pb.set_position(p.index as u64);
                pb.set_message(p.message());
            }
        };
        let outcomes = dispatcher
            .run(&runnable, scope, session.origin(), &sink)
            .await?;

        if let Some(ref pb) = pb {
            pb.set_position(runnable.len() as u64);
            pb.set_message("Mission Accomplished!");
            tokio::time::sleep(config.finish_delay()).await;
            pb.finish_and_clear();
        }
        anyhow::Ok(outcomes)
    })?;

    let summary = ResultsSummary::from_outcomes(&outcomes, scope);
    let report = RunReport {
        timestamp: chrono::Utc::now(),
        duration_secs: started.elapsed().as_secs_f64(),
        scope,
        origin: session.origin().cloned(),
        dry_run,
        outcomes,
        summary,
    };

    match out {
        OutputFormat::Human => output::print_results(&report),
        OutputFormat::Json => output::print_results_json(&report)?,
        OutputFormat::Quiet => output::print_results_quiet(&report),
    }

    Ok(())
}

// ─── Config ───────────────────────────────────────────────────────────────────

fn cmd_config(action: ConfigAction) -> Result<()> {
    match action {
        ConfigAction::Init => {
            Config::init_dirs()?;
            let config = Config::default();
            config.save()?;
            println!("  {} Cache Nuker initialized at ~/.cachenuker", "✓".green());
            println!("  Created: config.toml");
            Ok(())
        }
        ConfigAction::Show => {
            let config = Config::load()?;
            println!("{}", toml::to_string_pretty(&config)?);
            Ok(())
        }
        ConfigAction::Reset => {
            let config = Config::default();
            config.save()?;
            println!("  {} Configuration reset to defaults", "✓".green());
            Ok(())
        }
        ConfigAction::Set { key, value } => {
            let mut config = Config::load()?;
            config.set(&key, &value)?;
            config.save()?;
            println!("  {} Set {} = {}", "✓".green(), key, value);
            Ok(())
        }
    }
}
