//! `everloop`: walk through the story engine from the terminal.
//!
//! Every run builds a fresh in-memory world, seeds it with the founding canon
//! and the example writers, and then runs one command against it.
//!
//! # Usage
//!
//! ```
//! everloop                     # full demo
//! everloop canon --category magic_system
//! everloop world
//! everloop assist "Kira walked through the Fractured Realm" --context '{"theme":"exploration"}'
//! ```

use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use everloop_core::{
  assistant::ConsistencyReport,
  canon::CanonRule,
  seed,
  service::{CreateStory, StoryEngine},
  store::StoryQuery,
  writer::Writer,
};
use everloop_store_memory::MemoryStore;
use serde_json::{Map, Value};
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

const RULE: &str =
  "============================================================";

const DEMO_PROMPT: &str = "Kira walked through the Fractured Realm, where";

// ─── CLI args ─────────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(name = "everloop", about = "Everloop shared story engine")]
struct Args {
  #[command(subcommand)]
  command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
  /// Seed the world, write the first story and publish it.
  Demo,
  /// List the founding canon.
  Canon {
    /// Only rules in this category (e.g. `magic_system`).
    #[arg(long)]
    category: Option<String>,
  },
  /// Print the world snapshot as JSON.
  World,
  /// Ask the writing assistant for a continuation hint.
  Assist {
    /// The story so far.
    text:    String,
    /// Extra context as a JSON object.
    #[arg(long, value_name = "JSON")]
    context: Option<String>,
  },
}

type Engine = StoryEngine<MemoryStore>;

// ─── Entry point ──────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> Result<()> {
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::WARN.into())
        .from_env_lossy(),
    )
    .with_writer(std::io::stderr)
    .init();

  let args = Args::parse();

  let engine = StoryEngine::new(Arc::new(MemoryStore::new()));
  seed::initialize_world(&engine.canon)
    .await
    .context("seeding canon")?;
  let writers = seed::create_example_writers(&engine.writers)
    .await
    .context("registering example writers")?;

  match args.command.unwrap_or(Command::Demo) {
    Command::Demo => demo(&engine, &writers).await,
    Command::Canon { category } => canon(&engine, category.as_deref()).await,
    Command::World => world(&engine).await,
    Command::Assist { text, context } => assist(&engine, &text, context.as_deref()).await,
  }
}

// ─── Commands ─────────────────────────────────────────────────────────────────

async fn demo(engine: &Engine, writers: &[Writer]) -> Result<()> {
  let world = engine.world().await?;

  println!("{RULE}");
  println!("Everloop - Shared Story Engine");
  println!("{RULE}");
  println!();

  println!("World Lore:");
  println!("  Name: {}", world.settings.name);
  println!("  Description: {}", world.settings.description);
  println!("  Canon Rules: {}", world.canon_rules.len());
  println!();

  println!("Canon Rules:");
  print_rules(&world.canon_rules);
  println!();

  println!("Example Writers:");
  for writer in writers {
    println!("  - {} (ID: {})", writer.username, writer.id);
  }
  println!();

  let author = writers
    .first()
    .context("no example writers were registered")?;

  println!("Creating example story...");
  let draft = engine
    .stories
    .create_story(CreateStory {
      title:            seed::FIRST_AWAKENING_TITLE.to_owned(),
      writer_id:        author.id.clone(),
      content:          seed::FIRST_AWAKENING.to_owned(),
      tags:             Vec::new(),
      referenced_canon: Vec::new(),
    })
    .await?;
  println!("  Title: {}", draft.story.title);
  println!("  Summary: {}", draft.story.summary);
  println!("  Tags: {}", draft.story.tags.join(", "));
  println!("  Status: {}", draft.story.status);
  println!();

  println!("Canon Consistency Check:");
  print_consistency(&draft.consistency);
  println!();

  println!("Publishing...");
  let outcome = engine.stories.publish_story(&draft.story.id).await?;
  if outcome.published {
    let writer = engine.writers.get_writer(&author.id).await?;
    println!("  Published at canon level: {}", outcome.story.canon_level);
    println!("  {} reputation: {}", writer.username, writer.reputation);
  } else {
    println!("  Not published: {}", outcome.message.unwrap_or_default());
  }
  println!();

  println!("Testing AI Writing Assistance...");
  let mut context = Map::new();
  context.insert("theme".to_owned(), Value::from("exploration"));
  let help = engine
    .stories
    .get_writing_assistance(DEMO_PROMPT, &context)
    .await?;
  println!("  Suggestion: {}", help.suggestion);
  println!();

  let stories = engine.stories.list_stories(&StoryQuery::default()).await?;
  println!("{RULE}");
  println!("System Statistics:");
  println!("  Total Writers: {}", engine.writers.list_writers().await?.len());
  println!("  Total Stories: {}", stories.len());
  println!("  Total Canon Rules: {}", engine.canon.list_canon_rules(None).await?.len());
  println!("{RULE}");
  println!();
  println!("Everloop Story Engine is ready!");
  println!("Use the API (run the `server` binary) to interact with the system.");
  println!();

  Ok(())
}

async fn canon(engine: &Engine, category: Option<&str>) -> Result<()> {
  let rules = engine.canon.list_canon_rules(category).await?;
  if rules.is_empty() {
    println!("No canon rules.");
    return Ok(());
  }
  print_rules(&rules);
  Ok(())
}

async fn world(engine: &Engine) -> Result<()> {
  let world = engine.world().await?;
  let json = serde_json::to_string_pretty(&world).context("serialising world")?;
  println!("{json}");
  Ok(())
}

async fn assist(engine: &Engine, text: &str, context: Option<&str>) -> Result<()> {
  let context: Map<String, Value> = match context {
    Some(raw) => serde_json::from_str(raw).context("--context must be a JSON object")?,
    None => Map::new(),
  };
  let help = engine.stories.get_writing_assistance(text, &context).await?;
  println!("{}", help.suggestion);
  Ok(())
}

// ─── Output helpers ───────────────────────────────────────────────────────────

fn print_rules(rules: &[CanonRule]) {
  for (i, rule) in rules.iter().enumerate() {
    println!("  {}. {} ({})", i + 1, rule.title, rule.category);
  }
}

fn print_consistency(report: &ConsistencyReport) {
  println!("  Consistent: {}", report.consistent);
  if !report.issues.is_empty() {
    println!("  Issues:");
    for issue in &report.issues {
      println!("    - {issue}");
    }
  }
  if !report.suggestions.is_empty() {
    println!("  Suggestions:");
    for suggestion in &report.suggestions {
      println!("    - {suggestion}");
    }
  }
}
