//! Plain-text rendering of results, history and the quiz prompt.

use std::fmt::Write as _;
use std::io::IsTerminal;

use anyhow::Result;
use chrono::{DateTime, Utc};
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;

use begrepsbro::history::recency::time_ago;
use begrepsbro::{GenerationResult, HistoryEntry, QuizItem, QuizOutcome};

pub(crate) fn format_result(term: &str, language_label: &str, result: &GenerationResult) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Resultater for «{term}»");
    let _ = writeln!(out, "Oversatt til {language_label}");
    let _ = writeln!(out);
    let _ = writeln!(out, "── Enkel forklaring ──");
    let _ = writeln!(out, "{}", result.simple_explanation());
    let _ = writeln!(out);
    let _ = writeln!(out, "── {language_label} ──");
    let _ = writeln!(out, "{}", result.native_translation());
    let _ = writeln!(out);
    let _ = writeln!(out, "── Analogi ──");
    let _ = writeln!(out, "{}", result.analogy());
    let _ = writeln!(out);
    let _ = writeln!(out, "── Quiz ──");
    let _ = writeln!(out, "{}", result.quiz().question());
    for (i, option) in result.quiz().options().iter().enumerate() {
        let _ = writeln!(out, "  {}. {}", i + 1, option);
    }
    out
}

pub(crate) fn format_history(entries: &[HistoryEntry], now: DateTime<Utc>) -> String {
    if entries.is_empty() {
        return "Ingen nylige søk.\n".to_string();
    }
    let mut out = String::from("Nylige søk:\n");
    for entry in entries {
        let _ = writeln!(
            out,
            "- {} | {} | {} · {}",
            short_id(&entry.id),
            entry.term,
            entry.language_label,
            time_ago(entry.created_at, now)
        );
    }
    out
}

/// First 8 characters of an id; enough to address an entry by prefix.
pub(crate) fn short_id(id: &str) -> &str {
    id.get(..8).unwrap_or(id)
}

/// Interpret quiz input: an option number (1-3) or the option text.
pub(crate) fn parse_answer(quiz: &QuizItem, input: &str) -> Option<QuizOutcome> {
    let input = input.trim();
    if let Ok(choice) = input.parse::<usize>() {
        return quiz.grade_choice(choice);
    }
    quiz.options()
        .iter()
        .find(|o| o.to_lowercase() == input.to_lowercase())
        .map(|o| quiz.grade(o))
}

/// Ask the quiz question interactively. Skipped when stdin is not a terminal.
pub(crate) fn run_quiz(quiz: &QuizItem) -> Result<()> {
    if !std::io::stdin().is_terminal() {
        return Ok(());
    }
    let mut editor = DefaultEditor::new()?;
    loop {
        match editor.readline("Ditt svar (1-3): ") {
            Ok(line) => match parse_answer(quiz, &line) {
                Some(outcome) => {
                    println!("{}", outcome.feedback());
                    return Ok(());
                }
                None => println!("Skriv 1, 2 eller 3."),
            },
            Err(ReadlineError::Interrupted | ReadlineError::Eof) => return Ok(()),
            Err(e) => return Err(e.into()),
        }
    }
}
