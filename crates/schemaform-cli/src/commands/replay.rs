use super::{catalog, print_json, render_errors, resolve};
use crate::FormArgs;
use anyhow::{Context, Result};
use colored::Colorize;
use schemaform::{Config, FormSession, ValidationMode, Value};
use serde::Deserialize;
use serde_json::json;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

/// One step of user interaction
#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Event {
    /// A field changed
    Change { field: String, value: Value },
    /// The form was submitted
    Submit,
    /// Schema parameters changed; the schema is re-derived
    Params { params: BTreeMap<String, String> },
}

pub fn parse_events(content: &str) -> Result<Vec<Event>> {
    serde_json::from_str(content).context("Events must be a JSON list of change, submit or params objects")
}

pub fn execute(
    config: &Config,
    args: &FormArgs,
    events: &Path,
    mode: Option<ValidationMode>,
    locale: Option<&str>,
) -> Result<()> {
    let resolved = resolve(args)?;
    let catalog = catalog(config, locale)?;
    let mode = mode.unwrap_or(config.validation.mode);

    let content = fs::read_to_string(events)
        .with_context(|| format!("Failed to read events: {:?}", events))?;
    let events = parse_events(&content)?;

    let mut params = resolved.params.clone();
    let mut session = FormSession::new(
        resolved.schema.clone(),
        resolved.showcase.defaults(),
        mode,
    );

    for (step, event) in events.into_iter().enumerate() {
        let label = match event {
            Event::Change { field, value } => {
                let label = format!("change {} = {}", field, value);
                session.set_value(&field, value);
                label
            }
            Event::Submit => {
                let result = session.submit();
                let outcome = if result.is_valid() { "valid" } else { "invalid" };
                format!("submit #{} ({})", session.submit_count(), outcome)
            }
            Event::Params { params: changed } => {
                for (name, value) in changed {
                    params.insert(name, value);
                }
                let schema = resolved
                    .registry
                    .schema(resolved.showcase, &params, resolved.flavor)
                    .with_context(|| format!("Step {}: failed to re-derive schema", step + 1))?;
                session.set_schema(schema);
                "params".to_string()
            }
        };

        tracing::info!(step = step + 1, event = %label, errors = session.errors().len(), "replayed event");
        println!("{} {}", format!("[{}]", step + 1).dimmed(), label.cyan());
        print_json(
            config,
            &json!({
                "submitted": session.is_submitted(),
                "errors": render_errors(session.errors(), &catalog),
            }),
        )?;
    }

    match session.last_submit() {
        Some(result) if result.is_valid() => println!("{}", "✓ Last submit was valid".green().bold()),
        Some(_) => println!("{}", "✗ Last submit was invalid".red().bold()),
        None => println!("{}", "No current submit".yellow()),
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_events() {
        let events = parse_events(
            r#"[
                {"type": "change", "field": "age", "value": "12"},
                {"type": "params", "params": {"numberOfPeople": "5"}},
                {"type": "submit"}
            ]"#,
        )
        .unwrap();

        assert_eq!(events.len(), 3);
        assert!(matches!(&events[0], Event::Change { field, .. } if field == "age"));
        assert!(matches!(events[2], Event::Submit));
        assert!(parse_events(r#"[{"type": "reset"}]"#).is_err());
    }
}
