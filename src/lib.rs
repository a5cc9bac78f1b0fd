// src/lib.rs

pub mod cli;
pub mod config;
pub mod demo;
pub mod engine;
pub mod errors;
pub mod logging;
pub mod plan;
pub mod types;

use std::sync::Arc;

use anyhow::{Context, Result};
use chrono::{Local, NaiveDateTime};
use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::{debug, info};

use crate::cli::{CliArgs, OutputFormat};
use crate::config::loader::load_and_validate;
use crate::config::model::PlanFile;
use crate::engine::{PlanCache, Planner};
use crate::plan::difficulty::adapt_difficulty;
use crate::plan::graph::DependencyGraph;
use crate::plan::model::PlanResponse;
use crate::plan::priority::{order_topics, PriorityScorer};

/// High-level entry point used by `main.rs`.
///
/// This wires together:
/// - plan file loading (or demo topics)
/// - the planner and its cache
/// - the session-type random source (seeded with `--seed`)
/// - rendering to stdout
pub fn run(args: CliArgs) -> Result<()> {
    let plan_file = if args.demo.is_empty() {
        load_and_validate(&args.plan)
            .with_context(|| format!("loading plan file {:?}", args.plan))?
    } else {
        info!(subjects = ?args.demo, "using demo topics");
        demo::demo_plan_file(&args.demo)
    };

    if args.dry_run {
        print_dry_run(&plan_file);
        return Ok(());
    }

    let now = match args.today {
        Some(date) => date.and_time(Local::now().time()),
        None => Local::now().naive_local(),
    };

    let cache = Arc::new(PlanCache::new());
    let planner = Planner::from_plan_file(&plan_file, cache);

    let response = match args.seed {
        Some(seed) => {
            let mut rng = StdRng::seed_from_u64(seed);
            planner.plan(plan_file.request, now, &mut rng)?
        }
        None => planner.plan(plan_file.request, now, &mut rand::rng())?,
    };

    match args.format {
        OutputFormat::Text => print_plan(&response),
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&response).context("serializing plan")?;
            println!("{json}");
        }
    }

    Ok(())
}

/// Dry-run output: learner settings, adapted topics, graph and order.
fn print_dry_run(plan: &PlanFile) {
    let request = &plan.request;
    let prefs = &request.profile.preferences;

    println!("studyplan dry-run");
    println!("  learner = {:?}", request.profile.name);
    println!("  daily_study_hours = {}", prefs.daily_study_hours);
    println!("  preferred_time = {}", prefs.preferred_time);
    println!("  missed_streak = {}", request.profile.behavior.missed_streak);
    println!("  horizon_days = {}", plan.planner.horizon_days);
    println!();

    let mut topics = request.topics.clone();
    adapt_difficulty(&mut topics);
    let graph = DependencyGraph::build(&topics);
    let scorer = PriorityScorer::new(&graph);
    let scores = scorer.score_all(&topics);

    println!("topics ({}):", topics.len());
    for topic in &topics {
        println!("  - {} ({})", topic.id, topic.name);
        println!("      subject: {}", topic.subject_id);
        println!("      difficulty: {}", topic.difficulty);
        println!("      avg_quiz_score: {}", topic.avg_quiz_score);
        if topic.failure_count > 0 {
            println!("      failure_count: {}", topic.failure_count);
        }
        let deps = graph.dependencies_of(&topic.id);
        if !deps.is_empty() {
            println!("      after: {:?}", deps);
        }
        let dependents = graph.dependents_of(&topic.id);
        if !dependents.is_empty() {
            println!("      unlocks: {:?}", dependents);
        }
        println!("      priority: {:.2}", scores.get(&topic.id).copied().unwrap_or_default());
    }

    let order = order_topics(&graph, &scores);
    println!();
    if order.fell_back {
        println!("order (cycle detected; request order kept):");
    } else {
        println!("order:");
    }
    for (idx, id) in order.ids.iter().enumerate() {
        println!("  {:>2}. {id}", idx + 1);
    }

    debug!("dry-run complete (no planning)");
}

fn print_plan(response: &PlanResponse) {
    println!("study plan for {}", display_name(&response.student_name));
    println!("  generated_at = {}", format_time(&response.generated_at));
    println!();

    let mission = &response.daily_mission;
    println!("daily mission ({}): {}", mission.date, mission.focus_theme);
    if mission.sessions.is_empty() {
        println!("  (nothing scheduled)");
    }
    for s in &mission.sessions {
        println!(
            "  {}-{}  {} [{}]",
            s.start_time.format("%H:%M"),
            s.end_time.format("%H:%M"),
            s.topic_name,
            s.session_type
        );
    }
    println!("  tip: {}", mission.energy_tip);
    println!();

    println!("upcoming sessions ({}):", response.upcoming_schedule.len());
    for s in &response.upcoming_schedule {
        println!(
            "  {}  {:<28} {:>3}m  {:<18} p={:.2}  {}",
            format_time(&s.start_time),
            s.topic_name,
            s.duration_minutes,
            s.session_type.to_string(),
            s.priority_score,
            s.reason
        );
    }
    println!();

    let analytics = &response.analytics;
    println!("analytics:");
    println!("  consistency_score = {}", analytics.consistency_score);
    println!("  predicted_confidence = {:.2}", analytics.predicted_confidence);
    println!("  top_productive_hour = {}", analytics.top_productive_hour);
    if !analytics.risk_subjects.is_empty() {
        println!("  risk_subjects = {:?}", analytics.risk_subjects);
    }
    println!();

    println!("insights:");
    for line in &response.insights {
        println!("  - {line}");
    }
}

fn format_time(t: &NaiveDateTime) -> String {
    t.format("%Y-%m-%d %H:%M").to_string()
}

fn display_name(name: &str) -> &str {
    if name.trim().is_empty() { "learner" } else { name }
}
