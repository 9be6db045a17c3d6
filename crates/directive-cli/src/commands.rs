//! Command handlers for CLI subcommands.

use std::io::{self, BufRead, Write};
use std::path::Path;

use directive_engine::{
    activate, deactivate, ActivationOutcome, DirectiveEngine, EngineConfig, Resolution,
    ResolutionPrompt, TriggerDriver,
};
use directive_models::{Issue, PromptRef, Severity, TriggerAction, TriggerReport};
use directive_store::PromptStore;
use tracing::{info, warn};

use crate::cli::{Commands, OutputFormat};

/// Result type for command operations.
pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;

/// Execute a CLI command against the prompt set at `file`.
pub fn execute(command: Commands, file: &Path, api: Option<&str>) -> Result<()> {
    let mut store = PromptStore::open(file)?;
    let mut config = EngineConfig::new();
    if let Some(api) = api {
        config = config.with_active_api(api);
    }
    let engine = DirectiveEngine::new(config);

    match command {
        Commands::List { all, format } => cmd_list(&engine, &store, all, format),
        Commands::Show { prompt } => cmd_show(&engine, &store, &prompt),
        Commands::Validate { prompt, format } => cmd_validate(&engine, &store, &prompt, format),
        Commands::Enable { prompt, yes } => {
            let outcome = if yes {
                let mut proceed = |_: &PromptRef, _: &[Issue]| Resolution::Proceed;
                cmd_enable(&engine, &mut store, &prompt, &mut proceed)?
            } else {
                cmd_enable(&engine, &mut store, &prompt, &mut StdinPrompt)?
            };
            report_activation(&prompt, &outcome);
            Ok(())
        }
        Commands::Disable { prompt } => cmd_disable(&mut store, &prompt),
        Commands::Triggers { count, dry_run } => {
            let report = cmd_triggers(&engine, &mut store, count, dry_run)?;
            print_trigger_report(&report, dry_run);
            Ok(())
        }
        Commands::Advance { by } => {
            let report = cmd_advance(&engine, &mut store, by)?;
            println!("Message count: {}", store.message_count());
            match report {
                Some(report) => print_trigger_report(&report, false),
                None => println!("Message count unchanged; no triggers evaluated."),
            }
            Ok(())
        }
    }
}

fn cmd_list(
    engine: &DirectiveEngine,
    store: &PromptStore,
    all: bool,
    format: OutputFormat,
) -> Result<()> {
    let prompts = store.prompts();
    let shown: Vec<_> = prompts
        .iter()
        .filter(|p| all || engine.is_visible(&p.identifier, prompts))
        .collect();

    match format {
        OutputFormat::Table => {
            if shown.is_empty() {
                println!("No prompts found.");
                return Ok(());
            }

            println!("{:<24}  {:<24}  {:<8}  {:<8}  GROUP", "ID", "NAME", "ENABLED", "VISIBLE");
            println!("{}", "-".repeat(80));
            for prompt in &shown {
                let directives = engine.directives(&prompt.content);
                println!(
                    "{:<24}  {:<24}  {:<8}  {:<8}  {}",
                    truncate(&prompt.identifier, 24),
                    truncate(prompt.display_name(), 24),
                    if prompt.enabled { "yes" } else { "no" },
                    if engine.is_visible(&prompt.identifier, prompts) { "yes" } else { "no" },
                    directives.group.as_deref().unwrap_or("-"),
                );
            }
            println!("\n{} prompt(s), message count {}", shown.len(), store.message_count());
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&shown)?);
        }
    }

    Ok(())
}

fn cmd_show(engine: &DirectiveEngine, store: &PromptStore, prompt_id: &str) -> Result<()> {
    let prompt = store
        .get(prompt_id)
        .ok_or_else(|| format!("Prompt not found: {}", prompt_id))?;

    let outcome = engine.parse_with_diagnostics(&prompt.content);
    for line in &outcome.unknown {
        warn!(prompt_id = %prompt_id, line = %line, "Unrecognized directive");
    }

    println!("{}", serde_json::to_string_pretty(&outcome.directives)?);
    Ok(())
}

fn cmd_validate(
    engine: &DirectiveEngine,
    store: &PromptStore,
    prompt_id: &str,
    format: OutputFormat,
) -> Result<()> {
    if store.get(prompt_id).is_none() {
        return Err(format!("Prompt not found: {}", prompt_id).into());
    }

    let issues = engine.validate(prompt_id, store.prompts());
    match format {
        OutputFormat::Table => {
            if issues.is_empty() {
                println!("No issues.");
                return Ok(());
            }
            for issue in &issues {
                println!("{}", format_issue(issue));
            }
            if engine.can_auto_resolve(&issues, prompt_id, store.prompts()) {
                println!("\nErrors can be resolved automatically.");
            }
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&issues)?);
        }
    }

    Ok(())
}

/// Runs the enable flow, asking `ui` when issues remain.
pub fn cmd_enable<U>(
    engine: &DirectiveEngine,
    store: &mut PromptStore,
    prompt_id: &str,
    ui: &mut U,
) -> Result<ActivationOutcome>
where
    U: ResolutionPrompt + ?Sized,
{
    let outcome = activate(engine, store, ui, prompt_id)?;
    info!(prompt_id = %prompt_id, outcome = ?outcome, "Enable request finished");
    Ok(outcome)
}

fn cmd_disable(store: &mut PromptStore, prompt_id: &str) -> Result<()> {
    deactivate(store, prompt_id)?;
    println!("Disabled '{}'", prompt_id);
    Ok(())
}

/// Evaluates triggers at `count` (or the stored count) and applies them
/// unless `dry_run`.
pub fn cmd_triggers(
    engine: &DirectiveEngine,
    store: &mut PromptStore,
    count: Option<u32>,
    dry_run: bool,
) -> Result<TriggerReport> {
    let count = count.unwrap_or_else(|| store.message_count());
    let report = engine.evaluate_triggers(count, store.prompts());

    if !dry_run {
        for id in &report.to_enable {
            store.set_prompt_enabled(id, true)?;
        }
        for id in &report.to_disable {
            store.set_prompt_enabled(id, false)?;
        }
        info!(
            count,
            enabled = report.to_enable.len(),
            disabled = report.to_disable.len(),
            "Triggers applied"
        );
    }

    Ok(report)
}

/// Advances the message count by `by` and drives triggers for the new count.
///
/// Returns `None` when the count did not move.
pub fn cmd_advance(
    engine: &DirectiveEngine,
    store: &mut PromptStore,
    by: u32,
) -> Result<Option<TriggerReport>> {
    let mut driver = TriggerDriver::starting_at(store.message_count());
    let count = store.advance_messages(by)?;
    info!(count, by, "Message count advanced");
    Ok(driver.on_message(engine, store)?)
}

/// Asks on the terminal whether to enable despite issues.
struct StdinPrompt;

impl ResolutionPrompt for StdinPrompt {
    fn confirm(&mut self, prompt: &PromptRef, issues: &[Issue]) -> Resolution {
        println!("Enabling '{}' raises issues:", prompt.name);
        for issue in issues {
            println!("  {}", format_issue(issue));
        }
        print!("Enable anyway? [y/N] ");
        if io::stdout().flush().is_err() {
            return Resolution::Cancel;
        }

        let mut answer = String::new();
        match io::stdin().lock().read_line(&mut answer) {
            Ok(_) if matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes") => {
                Resolution::Proceed
            }
            _ => Resolution::Cancel,
        }
    }
}

fn report_activation(prompt_id: &str, outcome: &ActivationOutcome) {
    match outcome {
        ActivationOutcome::Enabled => println!("Enabled '{}'", prompt_id),
        ActivationOutcome::AlreadyEnabled => println!("'{}' is already enabled", prompt_id),
        ActivationOutcome::AutoResolved(plan) => {
            println!("Enabled '{}'", prompt_id);
            for id in &plan.to_disable {
                println!("  disabled {}", id);
            }
            for id in &plan.to_enable {
                println!("  enabled {}", id);
            }
        }
        ActivationOutcome::Confirmed => println!("Enabled '{}' despite issues", prompt_id),
        ActivationOutcome::Cancelled => println!("Cancelled; '{}' left disabled", prompt_id),
    }
}

fn print_trigger_report(report: &TriggerReport, dry_run: bool) {
    for line in trigger_report_lines(report, dry_run) {
        println!("{}", line);
    }
}

fn trigger_report_lines(report: &TriggerReport, dry_run: bool) -> Vec<String> {
    if report.is_empty() {
        return vec![format!("No triggers fired at message {}.", report.message_count)];
    }
    report
        .triggered
        .iter()
        .map(|entry| {
            let verb = match (dry_run, entry.action) {
                (true, TriggerAction::Enable) => "would enable",
                (true, TriggerAction::Disable) => "would disable",
                (false, TriggerAction::Enable) => "enabled",
                (false, TriggerAction::Disable) => "disabled",
            };
            format!("{} {} ({})", entry.id, verb, entry.reason)
        })
        .collect()
}

fn format_issue(issue: &Issue) -> String {
    let level = match issue.severity {
        Severity::Error => "error",
        Severity::Warning => "warning",
    };
    format!("[{}] {}: {}", level, issue.issue_type, issue.message)
}

/// Truncate a string to max length with ellipsis.
fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let head: String = s.chars().take(max.saturating_sub(3)).collect();
        format!("{}...", head)
    }
}
