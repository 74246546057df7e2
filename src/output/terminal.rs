// Colored terminal output for moderation results and model listings.
//
// main.rs delegates all human-readable printing here; `--json` output is
// produced directly with serde_json.

use colored::Colorize;

use crate::config::ProviderKind;
use crate::moderation::models::{MistralModerationModel, OpenAiModerationModel};
use crate::moderation::ModerationResult;

/// How many top-scoring categories to show per text.
const TOP_SCORES: usize = 3;

/// Display one verdict per input text, in input order.
pub fn display_results(provider: &str, model: &str, texts: &[String], results: &[ModerationResult]) {
    println!(
        "\n{}",
        format!("=== Moderation via {provider} ({model}) ===").bold()
    );
    println!();

    for (i, (text, result)) in texts.iter().zip(results).enumerate() {
        let verdict = if result.flagged {
            "FLAGGED".red().bold()
        } else {
            "clean".green()
        };
        println!(
            "  {:>3}. [{}] \"{}\"",
            i + 1,
            verdict,
            super::truncate_chars(text, 80).dimmed()
        );

        let hits = result.flagged_categories();
        if !hits.is_empty() {
            println!("       Categories: {}", hits.join(", ").red());
        }

        let mut scores: Vec<(&String, &f64)> = result.category_scores.iter().collect();
        scores.sort_by(|a, b| b.1.total_cmp(a.1));
        let top: Vec<String> = scores
            .into_iter()
            .take(TOP_SCORES)
            .map(|(name, score)| format!("{name} {}", colorize_score(*score)))
            .collect();
        if !top.is_empty() {
            println!("       Top scores: {}", top.join("  "));
        }
    }

    let flagged = results.iter().filter(|r| r.flagged).count();
    println!();
    println!("  Flagged: {flagged}/{}", results.len());
}

/// List every known model identifier per provider, marking the defaults.
pub fn display_models() {
    println!("\n{}", "=== Moderation models ===".bold());

    println!("\n  {}", ProviderKind::OpenAi.as_str().bold());
    for model in OpenAiModerationModel::ALL {
        print_model(model.as_str(), model == OpenAiModerationModel::default());
    }

    println!("\n  {}", ProviderKind::Mistral.as_str().bold());
    for model in MistralModerationModel::ALL {
        print_model(model.as_str(), model == MistralModerationModel::default());
    }
    println!();
}

fn print_model(id: &str, is_default: bool) {
    if is_default {
        println!("    {id} {}", "(default)".dimmed());
    } else {
        println!("    {id}");
    }
}

/// Colorize a category score.
fn colorize_score(score: f64) -> colored::ColoredString {
    let text = format!("{score:.2}");
    if score >= 0.8 {
        text.red().bold()
    } else if score >= 0.5 {
        text.yellow()
    } else {
        text.normal()
    }
}
