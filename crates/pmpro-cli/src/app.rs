//! Command definitions and dispatch

use crate::backlog;
use crate::config::PmConfig;
use crate::render;
use anyhow::Context as _;
use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use pmpro_assist::{
    build_generator, AnalysisGenerator, AssistConfig, OllamaGenerator, Persona, PrdGenerator,
    ProductBrief, StoryBoard, StoryGenerator,
};
use pmpro_prefs::{FilePreferenceStore, ModelPreferences, ModelSelectionBus};
use pmpro_rice::{samples, views, FeatureRecord, FeatureStore};
use pmpro_roadmap::{
    sample_notifications, sample_roadmap, Milestone, Notification, NotificationId, RoadmapSummary,
};
use serde::Serialize;
use std::path::PathBuf;
use std::sync::Arc;

/// Build the command-line interface
#[must_use]
pub fn build_cli() -> Command {
    Command::new("pmpro")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Product management toolkit: RICE ranking, PRDs, user stories, roadmap")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("config")
                .long("config")
                .global(true)
                .value_parser(value_parser!(PathBuf))
                .help("Path to a TOML config file"),
        )
        .arg(
            Arg::new("log-json")
                .long("log-json")
                .global(true)
                .action(ArgAction::SetTrue)
                .help("Emit logs as JSON lines on stderr"),
        )
        .subcommand(
            Command::new("rank")
                .about("Score and rank a feature backlog by RICE")
                .arg(
                    Arg::new("file")
                        .long("file")
                        .value_parser(value_parser!(PathBuf))
                        .help("Backlog file (.json or .toml)"),
                )
                .arg(
                    Arg::new("sample")
                        .long("sample")
                        .action(ArgAction::SetTrue)
                        .help("Include the sample backlog (default when no file is given)"),
                )
                .arg(json_flag()),
        )
        .subcommand(
            Command::new("prd")
                .about("Generate a product requirements document")
                .arg(Arg::new("name").long("name").required(true).help("Product name"))
                .arg(text_arg("problem", "Problem statement"))
                .arg(text_arg("audience", "Target audience"))
                .arg(text_arg("features", "Key features"))
                .arg(text_arg("competitors", "Competitors"))
                .arg(text_arg("timeline", "Delivery timeline"))
                .arg(
                    Arg::new("out")
                        .long("out")
                        .value_parser(value_parser!(PathBuf))
                        .help("Write markdown to this file, or into this directory"),
                )
                .arg(json_flag()),
        )
        .subcommand(
            Command::new("stories")
                .about("Generate user stories for an epic")
                .arg(
                    Arg::new("epic")
                        .long("epic")
                        .required(true)
                        .help("Feature or epic description"),
                )
                .arg(
                    Arg::new("persona")
                        .long("persona")
                        .value_parser(Persona::ALL.map(|p| p.value()))
                        .default_value("end-user")
                        .help("Persona the stories are written for"),
                )
                .arg(json_flag()),
        )
        .subcommand(
            Command::new("compete")
                .about("Analyse competitors")
                .arg(
                    Arg::new("competitors")
                        .required(true)
                        .num_args(1..)
                        .help("Competitor names"),
                )
                .arg(
                    Arg::new("product")
                        .long("product")
                        .default_value("Your Product")
                        .help("Product being positioned"),
                )
                .arg(json_flag()),
        )
        .subcommand(
            Command::new("model")
                .about("Show or change the selected model")
                .subcommand_required(true)
                .subcommand(Command::new("get").about("Print the selected model"))
                .subcommand(
                    Command::new("set")
                        .about("Select a model")
                        .arg(Arg::new("id").required(true).help("Model identifier")),
                )
                .subcommand(
                    Command::new("status").about("Check the local inference server"),
                ),
        )
        .subcommand(
            Command::new("roadmap")
                .about("Show the product roadmap")
                .arg(json_flag()),
        )
        .subcommand(
            Command::new("notifications")
                .about("Show recent activity with the unread count")
                .arg(
                    Arg::new("read")
                        .long("read")
                        .value_parser(value_parser!(u64))
                        .action(ArgAction::Append)
                        .help("Mark the notification with this id as read"),
                )
                .arg(
                    Arg::new("read-all")
                        .long("read-all")
                        .action(ArgAction::SetTrue)
                        .help("Mark every notification as read"),
                )
                .arg(json_flag()),
        )
}

fn json_flag() -> Arg {
    Arg::new("json")
        .long("json")
        .action(ArgAction::SetTrue)
        .help("Output as JSON")
}

fn text_arg(name: &'static str, help: &'static str) -> Arg {
    Arg::new(name).long(name).default_value("").help(help)
}

fn string_arg(args: &ArgMatches, name: &str) -> String {
    args.get_one::<String>(name).cloned().unwrap_or_default()
}

/// Shared state for one invocation
#[derive(Debug)]
pub struct Context {
    config: PmConfig,
    prefs: ModelPreferences,
}

impl Context {
    /// Context with file-backed preferences
    #[must_use]
    pub fn new(config: PmConfig) -> Self {
        let store = FilePreferenceStore::new(config.preferences_path());
        let prefs = ModelPreferences::new(Arc::new(store), ModelSelectionBus::default());
        Self::with_preferences(config, prefs)
    }

    /// Context over existing preferences
    #[must_use]
    pub fn with_preferences(config: PmConfig, prefs: ModelPreferences) -> Self {
        Self { config, prefs }
    }

    /// Model preferences
    #[inline]
    #[must_use]
    pub fn preferences(&self) -> &ModelPreferences {
        &self.prefs
    }

    /// Generation settings with the stored model applied
    ///
    /// # Errors
    /// Preference read failures.
    pub fn assist_config(&self) -> anyhow::Result<AssistConfig> {
        let mut assist = self.config.assist.clone();
        if !self.config.model_pinned {
            if let Some(model) = self.prefs.stored()? {
                assist.model = model;
            }
        }
        Ok(assist)
    }
}

#[derive(Serialize)]
struct RankReport<'a> {
    ranked: &'a [FeatureRecord],
    bar: Vec<views::BarRow>,
    radar: Vec<views::RadarRow>,
}

#[derive(Serialize)]
struct RoadmapReport<'a> {
    summary: RoadmapSummary,
    milestones: &'a [Milestone],
}

#[derive(Serialize)]
struct NotificationReport<'a> {
    unread: usize,
    notifications: &'a [Notification],
}

/// Run the selected subcommand and return its stdout text
///
/// # Errors
/// Invalid input files, rejected features, generation or preference failures.
pub async fn execute(matches: &ArgMatches, ctx: &Context) -> anyhow::Result<String> {
    match matches.subcommand() {
        Some(("rank", args)) => rank(args),
        Some(("prd", args)) => prd(args, ctx).await,
        Some(("stories", args)) => stories(args, ctx).await,
        Some(("compete", args)) => compete(args, ctx).await,
        Some(("model", args)) => model(args, ctx).await,
        Some(("roadmap", args)) => roadmap(args),
        Some(("notifications", args)) => notifications(args),
        Some((other, _)) => anyhow::bail!("unknown command: {other}"),
        None => anyhow::bail!("no command given"),
    }
}

fn rank(args: &ArgMatches) -> anyhow::Result<String> {
    let file = args.get_one::<PathBuf>("file");
    let mut drafts = match file {
        Some(path) => backlog::load_drafts(path)?,
        None => Vec::new(),
    };
    if args.get_flag("sample") || file.is_none() {
        drafts.extend(samples::default_backlog());
    }

    let store = FeatureStore::from_drafts(drafts).context("backlog rejected")?;
    tracing::info!("Ranked {} features", store.len());

    if args.get_flag("json") {
        let ranked = store.list();
        let report = RankReport {
            ranked,
            bar: views::bar_rows(ranked),
            radar: views::radar_rows(ranked),
        };
        return Ok(serde_json::to_string_pretty(&report)?);
    }
    Ok(render::ranking_table(store.list()))
}

async fn prd(args: &ArgMatches, ctx: &Context) -> anyhow::Result<String> {
    let brief = ProductBrief {
        product_name: string_arg(args, "name"),
        problem_statement: string_arg(args, "problem"),
        target_audience: string_arg(args, "audience"),
        key_features: string_arg(args, "features"),
        competitors: string_arg(args, "competitors"),
        timeline: string_arg(args, "timeline"),
    };

    let generator = build_generator(&ctx.assist_config()?)?;
    let doc = PrdGenerator::new(generator).generate(&brief).await?;

    if let Some(out) = args.get_one::<PathBuf>("out") {
        let target = if out.is_dir() {
            out.join(doc.file_name())
        } else {
            out.clone()
        };
        std::fs::write(&target, doc.to_markdown())
            .with_context(|| format!("failed to write {}", target.display()))?;
        return Ok(format!("Saved PRD to {}", target.display()));
    }

    if args.get_flag("json") {
        return Ok(serde_json::to_string_pretty(&doc)?);
    }
    Ok(doc.to_markdown())
}

async fn stories(args: &ArgMatches, ctx: &Context) -> anyhow::Result<String> {
    let epic = string_arg(args, "epic");
    let persona: Persona = string_arg(args, "persona")
        .parse()
        .map_err(anyhow::Error::msg)?;

    let generator = build_generator(&ctx.assist_config()?)?;
    let stories = StoryGenerator::new(generator)
        .generate(&epic, persona)
        .await?;

    if args.get_flag("json") {
        return Ok(serde_json::to_string_pretty(&stories)?);
    }
    Ok(render::story_list(&StoryBoard::new(stories)))
}

async fn compete(args: &ArgMatches, ctx: &Context) -> anyhow::Result<String> {
    let names: Vec<String> = args
        .get_many::<String>("competitors")
        .map(|values| values.cloned().collect())
        .unwrap_or_default();
    let product = string_arg(args, "product");

    let generator = build_generator(&ctx.assist_config()?)?;
    let analysis = AnalysisGenerator::new(generator)
        .generate(&product, &names)
        .await?;

    if args.get_flag("json") {
        return Ok(serde_json::to_string_pretty(&analysis)?);
    }
    Ok(render::analysis_report(&analysis))
}

async fn model(args: &ArgMatches, ctx: &Context) -> anyhow::Result<String> {
    match args.subcommand() {
        Some(("get", _)) => Ok(ctx.assist_config()?.model),
        Some(("set", sub)) => {
            let id = string_arg(sub, "id");
            ctx.preferences().select(&id)?;
            if ctx.config.model_pinned {
                tracing::warn!(
                    "Saved {} but {} is set and takes precedence",
                    id.trim(),
                    crate::config::ENV_MODEL
                );
            }
            Ok(format!("Selected model {}", id.trim()))
        }
        Some(("status", _)) => {
            let assist = ctx.assist_config()?;
            let client = OllamaGenerator::new(&assist)?;
            let state = if client.check_status().await {
                "reachable"
            } else {
                "unreachable"
            };
            Ok(format!(
                "Local inference at {} is {} (model {}, {})",
                assist.base_url,
                state,
                client.model(),
                if assist.use_ollama { "enabled" } else { "disabled" }
            ))
        }
        Some((other, _)) => anyhow::bail!("unknown model command: {other}"),
        None => anyhow::bail!("no model command given"),
    }
}

fn roadmap(args: &ArgMatches) -> anyhow::Result<String> {
    let roadmap = sample_roadmap();
    if args.get_flag("json") {
        let report = RoadmapReport {
            summary: roadmap.summary(),
            milestones: roadmap.milestones(),
        };
        return Ok(serde_json::to_string_pretty(&report)?);
    }
    Ok(render::roadmap_timeline(&roadmap))
}

fn notifications(args: &ArgMatches) -> anyhow::Result<String> {
    let mut feed = sample_notifications();
    if let Some(ids) = args.get_many::<u64>("read") {
        for &id in ids {
            if !feed.mark_read(NotificationId::new(id)) {
                anyhow::bail!("no notification with id {id}");
            }
        }
    }
    if args.get_flag("read-all") {
        feed.mark_all_read();
    }

    if args.get_flag("json") {
        let report = NotificationReport {
            unread: feed.unread_count(),
            notifications: feed.entries(),
        };
        return Ok(serde_json::to_string_pretty(&report)?);
    }
    Ok(render::notification_list(&feed))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_definition_is_consistent() {
        build_cli().debug_assert();
    }

    #[test]
    fn persona_values_are_restricted() {
        let err = build_cli()
            .try_get_matches_from(["pmpro", "stories", "--epic", "x", "--persona", "ceo"])
            .unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::InvalidValue);
    }

    #[test]
    fn global_flags_after_subcommand() {
        let matches = build_cli()
            .try_get_matches_from(["pmpro", "roadmap", "--log-json", "--config", "a.toml"])
            .unwrap();
        assert!(matches.get_flag("log-json"));
        assert_eq!(
            matches.get_one::<PathBuf>("config"),
            Some(&PathBuf::from("a.toml"))
        );
    }
}
