use anyhow::Result;
use clap::Parser;
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use pydeps::cli::Args;
use pydeps::output::TableRenderer;
use pydeps::parsers::DependencyRecord;
use pydeps::pypi::PyPiClient;
use pydeps::reconciler::Reconciler;
use pydeps::refresh::{debounce_elapsed, RefreshQueue};
use pydeps::updater::{upgrade_commands, ManifestEditor};
use std::path::Path;
use std::time::{Duration, Instant};

/// Quiet period before a burst of refresh requests collapses into one pass.
const DEBOUNCE_QUIET: Duration = Duration::from_millis(500);

/// Delay before the re-scan that follows a manifest edit, so external
/// file watchers settle first.
const POST_EDIT_DELAY: Duration = Duration::from_millis(500);

#[tokio::main]
async fn main() -> Result<()> {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let project_path = args.project_path();

    if !project_path.exists() {
        anyhow::bail!("Project path does not exist: {project_path:?}");
    }
    if !project_path.is_dir() {
        anyhow::bail!("Project path is not a directory: {project_path:?}");
    }

    let mut client = PyPiClient::new();
    if let Some(url) = &args.index_url {
        client = client.with_base_url(url);
    }
    let reconciler = Reconciler::with_resolver(client);

    if args.watch {
        run_watch(&args, &reconciler, &project_path).await
    } else {
        let records = run_pass(&reconciler, &project_path).await?;
        handle_actions(&args, &records, &project_path);
        Ok(())
    }
}

/// One reconciliation pass: scan, resolve with a progress bar, render.
async fn run_pass(reconciler: &Reconciler, project_path: &Path) -> Result<Vec<DependencyRecord>> {
    let progress_bar = ProgressBar::new(0);
    progress_bar.set_style(
        ProgressStyle::default_bar()
            .template(
                "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta})",
            )?
            .progress_chars("#>-"),
    );

    let records = reconciler
        .run_with_progress(project_path, |done, total| {
            progress_bar.set_length(total as u64);
            progress_bar.set_position(done as u64);
        })
        .await;
    progress_bar.finish_and_clear();

    if records.is_empty() {
        println!("No dependencies found in {}", project_path.display());
        return Ok(records);
    }

    let renderer = TableRenderer::new(true);
    renderer.render(&records);

    let outdated = records.iter().filter(|r| r.is_outdated()).count();
    println!();
    if outdated == 0 {
        println!("All dependencies are up to date!");
    } else {
        println!("{} outdated package(s)", outdated.to_string().yellow());
    }

    Ok(records)
}

/// Apply `--bump` edits and print `--upgrade` commands. Returns how many
/// constraints were rewritten.
fn handle_actions(args: &Args, records: &[DependencyRecord], project_path: &Path) -> usize {
    let mut bumped = 0;

    if args.bump {
        let editor = ManifestEditor::new(project_path);
        for record in records.iter().filter(|r| r.needs_bump()) {
            match editor.bump_to_installed(record) {
                Ok(()) => bumped += 1,
                Err(err) => eprintln!("Skipped {}: {err}", record.name),
            }
        }
        if bumped > 0 {
            println!("Updated {bumped} constraint(s) to locked versions");
        }
    }

    if args.upgrade {
        let outdated: Vec<&DependencyRecord> =
            records.iter().filter(|r| r.needs_upgrade()).collect();
        if !outdated.is_empty() {
            println!();
            println!("To upgrade, run:\n");
            for command in upgrade_commands(&outdated) {
                println!("  $ {command}");
            }
        }
    }

    bumped
}

/// Watch mode: one loop consumes the refresh queue; an interval ticker and
/// post-edit triggers feed it, and bursts are debounced into single passes.
async fn run_watch(args: &Args, reconciler: &Reconciler, project_path: &Path) -> Result<()> {
    let mut queue = RefreshQueue::new();
    let handle = queue.handle();

    let ticker_handle = handle.clone();
    let period = Duration::from_secs(args.interval.max(1));
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(period);
        // interval fires immediately; the initial pass is requested below
        ticker.tick().await;
        loop {
            ticker.tick().await;
            ticker_handle.request();
        }
    });

    handle.request();

    while let Some(first) = queue.recv().await {
        let mut last = first.requested_at;
        loop {
            let now = Instant::now();
            if debounce_elapsed(last, now, DEBOUNCE_QUIET) {
                break;
            }
            tokio::time::sleep(DEBOUNCE_QUIET - now.duration_since(last)).await;
            while let Some(request) = queue.try_recv() {
                last = last.max(request.requested_at);
            }
        }

        let records = run_pass(reconciler, project_path).await?;
        let bumped = handle_actions(args, &records, project_path);
        if bumped > 0 {
            handle.request_after(POST_EDIT_DELAY);
        }
    }

    Ok(())
}
