// src/main.rs

mod cli;

use anyhow::{Context, Result};
use branchpoint::analyzer::{self, RepoHistory};
use branchpoint::config::{FileConfig, SearchConfig, CONFIG_FILE_NAME};
use branchpoint::{ancestry, report, scan, telemetry, validate};
use clap::Parser;
use cli::{Args, Command};
use git2::Repository;
use std::time::{Duration, Instant};

fn main() {
    let args = Args::parse();
    telemetry::init(args.verbose);

    if let Err(e) = run(&args) {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn search_config(args: &Args, repo: &Repository) -> Result<SearchConfig> {
    let path = match &args.config {
        Some(path) => path.clone(),
        None => repo
            .workdir()
            .unwrap_or_else(|| repo.path())
            .join(CONFIG_FILE_NAME),
    };
    let mut config = FileConfig::load(&path)?.search;

    if let Some(limit) = args.max_visits {
        config.max_visits = (limit > 0).then_some(limit);
    }
    if let Some(ms) = args.timeout_ms {
        config.timeout = Some(Duration::from_millis(ms));
    }
    if args.lenient_timestamps {
        config.strict_timestamps = false;
    }
    Ok(config)
}

fn load(repo: &Repository, revs: &[&str], args: &Args) -> Result<RepoHistory> {
    analyzer::load_history(repo, revs, !args.quiet)
        .with_context(|| format!("loading history from {}", revs.join(", ")))
}

fn run(args: &Args) -> Result<()> {
    let start_time = Instant::now();
    let repo = analyzer::open(&args.repo)
        .with_context(|| format!("opening repository at {}", args.repo.display()))?;
    let config = search_config(args, &repo)?;

    match &args.command {
        Command::Base { merge } => {
            let history = load(&repo, &[merge.as_str()], args)?;
            let graph = &history.graph;
            let merge = analyzer::resolve(&repo, merge)?;

            let fast = ancestry::find_common_parent_fast(graph, &merge, &config)?;
            println!("fast walk (first parents only): {}", report::ancestor_result(graph, &fast.value));
            print!("{}", report::diagnostics(&fast.diagnostics));

            let nearest = ancestry::find_nearest_common_parent(graph, &merge, &config)?;
            match &nearest.value {
                Some(id) => println!("nearest common ancestor: {}", report::describe(graph, id)),
                None => println!("nearest common ancestor: none"),
            }
            if let Some(parents) = history.graph.get(&merge).map(|n| n.parents.clone()) {
                if let [first, second] = parents.as_slice() {
                    let all = ancestry::find_all_common_ancestors(graph, first, second, &config)?;
                    println!("all candidates: {}", report::ancestor_result(graph, &all.value));
                    println!("visited {} commits", all.visited);
                }
            }
        }
        Command::Ancestors { first, second } => {
            let history = load(&repo, &[first.as_str(), second.as_str()], args)?;
            let (a, b) = (analyzer::resolve(&repo, first)?, analyzer::resolve(&repo, second)?);
            let all = ancestry::find_all_common_ancestors(&history.graph, &a, &b, &config)?;
            println!("{}", report::ancestor_result(&history.graph, &all.value));
            println!("visited {} commits", all.visited);
        }
        Command::Dominated { merge, branch_point } => {
            // the branch point need not be an ancestor of the merge
            let history = load(&repo, &[merge.as_str(), branch_point.as_str()], args)?;
            let merge = analyzer::resolve(&repo, merge)?;
            let branch_point = analyzer::resolve(&repo, branch_point)?;
            let dominated = ancestry::is_dominated(&history.graph, &merge, &branch_point, &config)?;
            let verdict = if dominated { "is" } else { "is not" };
            println!("{} {} dominated by {}", merge.short(), verdict, branch_point.short());
        }
        Command::Paths { from, to } => {
            let history = load(&repo, &[from.as_str(), to.as_str()], args)?;
            let (from, to) = (analyzer::resolve(&repo, from)?, analyzer::resolve(&repo, to)?);
            let paths = ancestry::find_paths_between(&history.graph, &from, &to, &config)?;
            print!("{}", report::paths(&paths));
        }
        Command::Contributors { from, to } => {
            let history = load(&repo, &[from.as_str(), to.as_str()], args)?;
            let (from, to) = (analyzer::resolve(&repo, from)?, analyzer::resolve(&repo, to)?);
            let contributors = analyzer::contributors_between(&history, &from, &to, &config)?;
            print!("{}", report::contributors(&contributors));
        }
        Command::Validate { rev } => {
            let history = load(&repo, &[rev.as_str()], args)?;
            let result = validate::validate_history(&history.graph);
            print!("{}", report::validation(&result));
            if !result.is_valid() {
                anyhow::bail!("history failed validation");
            }
        }
        Command::Scan { rev } => {
            let history = load(&repo, &[rev.as_str()], args)?;
            let reports = scan::scan_merges(&history.graph, &config, !args.quiet);
            print!("{}", report::merge_scan(&history.graph, &reports));
        }
        Command::Links { owner, name, rev } => {
            let history = load(&repo, &[rev.as_str()], args)?;
            for id in &history.order {
                println!("{}", report::commit_link(owner, name, id));
            }
        }
        Command::Diff { old, new } => {
            let (old, new) = (analyzer::resolve(&repo, old)?, analyzer::resolve(&repo, new)?);
            let summary = analyzer::summarize_diff(&repo, &old, &new)?;
            print!("{}", report::diff_summary(&summary));
        }
        Command::Ownership { rev } => {
            let history = load(&repo, &[rev.as_str()], args)?;
            let counts = analyzer::ownership(&repo, &history, !args.quiet)?;
            print!("{}", report::ownership(&counts));
        }
    }

    tracing::info!(elapsed = ?start_time.elapsed(), "done");
    Ok(())
}
