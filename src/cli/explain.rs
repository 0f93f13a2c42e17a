//! `begrepsbro explain`: generate, show, remember, quiz.

use anyhow::{bail, Context, Result};

use begrepsbro::config::Config;
use begrepsbro::providers::build_provider;
use begrepsbro::{languages, Gateway, GenerationError, GenerationRequest};

use super::{open_history, render};

const INVALID_INPUT_MESSAGE: &str = "Skriv inn et begrep og velg et språk.";
const GENERATION_FAILED_MESSAGE: &str = "Noe gikk galt. Vennligst prøv igjen.";

pub(crate) async fn cmd_explain(
    config: &Config,
    term: &str,
    language: &str,
    no_quiz: bool,
    no_history: bool,
) -> Result<()> {
    let (language_code, language_label) = languages::resolve(language);

    // Reject blank input before touching provider credentials.
    if GenerationRequest::new(term, &language_label).is_err() {
        bail!(INVALID_INPUT_MESSAGE);
    }

    let provider =
        build_provider(&config.providers).with_context(|| "Failed to set up LLM provider")?;
    tracing::debug!(provider = provider.name(), model = provider.model(), "Provider ready");
    let gateway = Gateway::new(provider);

    let result = match gateway.generate(term, &language_label).await {
        Ok(result) => result,
        Err(GenerationError::InvalidRequest(_)) => bail!(INVALID_INPUT_MESSAGE),
        Err(_) => bail!(GENERATION_FAILED_MESSAGE),
    };

    let mut history = open_history(config, !no_history);
    let entry = history.add(term, &language_code, &language_label, result);

    print!(
        "{}",
        render::format_result(&entry.term, &entry.language_label, &entry.result)
    );
    if !no_quiz {
        render::run_quiz(entry.result.quiz())?;
    }
    Ok(())
}
