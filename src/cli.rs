//! Command definitions and output rendering for the `support-desk` binary.

use clap::{Args, Subcommand};
use serde::Serialize;

use crate::{
    base::types::Res,
    service::kb::QaPair,
    triage::{intake::SupportRequest, priority::matched_keyword},
};

/// Top-level commands.
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Classify a customer question as `high`, `medium`, or `low` priority.
    Classify(ClassifyArgs),
    /// Manage knowledge-base question/answer pairs (admin only).
    Kb(KbArgs),
}

#[derive(Args, Debug, Clone, PartialEq, Eq)]
pub struct ClassifyArgs {
    /// The question text; multiple words are joined with spaces.
    #[arg(required = true)]
    pub text: Vec<String>,
    /// Print the classified request as JSON.
    #[arg(long)]
    pub json: bool,
    /// Also report which keyword decided the priority.
    #[arg(long)]
    pub explain: bool,
}

#[derive(Args, Debug, Clone, PartialEq, Eq)]
pub struct KbArgs {
    /// Print results as JSON.
    #[arg(long)]
    pub json: bool,
    #[command(subcommand)]
    pub action: KbAction,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum KbAction {
    /// List every pair.
    List,
    /// Show a single pair.
    Get { id: i64 },
    /// Create a pair.
    Create {
        #[arg(short, long)]
        question: String,
        #[arg(short, long)]
        answer: String,
    },
    /// Replace the question and answer of a pair.
    Update {
        id: i64,
        #[arg(short, long)]
        question: String,
        #[arg(short, long)]
        answer: String,
    },
    /// Delete a pair.
    Delete { id: i64 },
    /// Find pairs whose question or answer contains the query.
    Search { query: String },
}

/// JSON shape of a classification.
#[derive(Debug, Serialize)]
struct ClassifyOutput<'a> {
    #[serde(flatten)]
    request: &'a SupportRequest,
    #[serde(skip_serializing_if = "Option::is_none")]
    matched_keyword: Option<&'static str>,
}

/// Classifies the given text and renders the result.
pub fn render_classification(args: &ClassifyArgs) -> Res<String> {
    let request = SupportRequest::new(args.text.join(" "));
    let keyword = if args.explain { matched_keyword(&request.question).map(|(_, k)| k) } else { None };

    if args.json {
        let output = ClassifyOutput {
            request: &request,
            matched_keyword: keyword,
        };

        return Ok(serde_json::to_string_pretty(&output)?);
    }

    Ok(match (args.explain, keyword) {
        (false, _) => request.priority.to_string(),
        (true, Some(keyword)) => format!("{} (matched `{}`)", request.priority, keyword),
        (true, None) => format!("{} (no keyword matched)", request.priority),
    })
}

/// Renders a list of pairs.
pub fn render_pairs(pairs: &[QaPair], json: bool) -> Res<String> {
    if json {
        return Ok(serde_json::to_string_pretty(pairs)?);
    }

    if pairs.is_empty() {
        return Ok("No Q&A pairs.".to_string());
    }

    Ok(pairs.iter().map(render_pair_text).collect::<Vec<_>>().join("\n\n"))
}

/// Renders a single pair.
pub fn render_pair(pair: &QaPair, json: bool) -> Res<String> {
    if json {
        return Ok(serde_json::to_string_pretty(pair)?);
    }

    Ok(render_pair_text(pair))
}

fn render_pair_text(pair: &QaPair) -> String {
    format!("#{} Q: {}\n   A: {}", pair.id, pair.question, pair.answer)
}

// Tests.

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;

    fn classify_args(text: &str, json: bool, explain: bool) -> ClassifyArgs {
        ClassifyArgs {
            text: text.split(' ').map(str::to_string).collect(),
            json,
            explain,
        }
    }

    #[test]
    fn test_render_classification_plain() {
        assert_eq!(render_classification(&classify_args("The app is broken", false, false)).unwrap(), "high");
        assert_eq!(render_classification(&classify_args("opening hours", false, true)).unwrap(), "low (no keyword matched)");
        assert_eq!(render_classification(&classify_args("need help", false, true)).unwrap(), "medium (matched `help`)");
    }

    #[test]
    fn test_render_classification_json() {
        let rendered = render_classification(&classify_args("CRITICAL: system down", true, true)).unwrap();
        let value: serde_json::Value = serde_json::from_str(&rendered).unwrap();

        assert_eq!(value["question"], "CRITICAL: system down");
        assert_eq!(value["priority"], "high");
        assert_eq!(value["matched_keyword"], "critical");
        assert!(value["received_at"].is_string());

        let rendered = render_classification(&classify_args("hello", true, false)).unwrap();
        let value: serde_json::Value = serde_json::from_str(&rendered).unwrap();
        assert!(value.get("matched_keyword").is_none());
    }

    #[test]
    fn test_render_pairs_text() {
        let now = Utc::now();
        let pair = QaPair {
            id: 3,
            question: "Do you ship abroad?".to_string(),
            answer: "Yes.".to_string(),
            created_at: now,
            updated_at: now,
        };

        assert_eq!(render_pairs(&[], false).unwrap(), "No Q&A pairs.");
        assert_eq!(render_pair(&pair, false).unwrap(), "#3 Q: Do you ship abroad?\n   A: Yes.");
    }
}
