pub mod list;
pub mod replay;
pub mod schema;
pub mod validate;

use crate::FormArgs;
use anyhow::{anyhow, Context, Result};
use schemaform::{
    Catalog, Config, Flavor, FieldErrors, FormRegistry, Params, Schema, Showcase, Translate,
    ValidationResult,
};
use serde_json::{json, Value as Json};
use std::sync::Arc;

/// Form, parsed parameters and the schema built from them
pub struct Resolved {
    pub showcase: Showcase,
    pub params: Params,
    pub flavor: Option<Flavor>,
    pub registry: FormRegistry,
    pub schema: Arc<Schema>,
}

pub fn resolve(args: &FormArgs) -> Result<Resolved> {
    let showcase: Showcase = args.form.parse().map_err(|e: String| anyhow!(e))?;
    let params = Params::parse_pairs(args.params.as_slice()).context("Invalid --param")?;
    let flavor = args
        .flavor
        .as_deref()
        .map(str::parse::<Flavor>)
        .transpose()
        .map_err(|e| anyhow!(e))?;

    let registry = FormRegistry::new().context("Failed to build showcase forms")?;
    let schema = registry
        .schema(showcase, &params, flavor)
        .with_context(|| format!("Failed to build schema for {}", showcase))?;

    Ok(Resolved {
        showcase,
        params,
        flavor,
        registry,
        schema,
    })
}

pub fn catalog(config: &Config, locale: Option<&str>) -> Result<Catalog> {
    let locale = locale.unwrap_or(&config.i18n.locale);
    config
        .i18n
        .catalog(locale)
        .with_context(|| format!("Failed to load messages for locale {:?}", locale))
}

/// Errors with their messages resolved for display
pub fn render_errors(errors: &FieldErrors, translator: &dyn Translate) -> Json {
    let fields: serde_json::Map<String, Json> = errors
        .iter()
        .map(|(field, error)| {
            (
                field.to_string(),
                json!({
                    "kind": error.kind,
                    "message": error.message.render(translator),
                }),
            )
        })
        .collect();
    Json::Object(fields)
}

pub fn render_result(result: &ValidationResult, translator: &dyn Translate) -> Json {
    match result {
        ValidationResult::Valid { record } => json!({ "status": "valid", "record": record }),
        ValidationResult::Invalid { errors } => json!({
            "status": "invalid",
            "errors": render_errors(errors, translator),
        }),
    }
}

pub fn print_json(config: &Config, value: &Json) -> Result<()> {
    let text = if config.output.pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    println!("{}", text);
    Ok(())
}
