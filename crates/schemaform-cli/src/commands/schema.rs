use super::resolve;
use crate::FormArgs;
use anyhow::Result;
use colored::Colorize;
use schemaform::FormSchema;

pub fn execute(args: &FormArgs) -> Result<()> {
    let resolved = resolve(args)?;
    let schema = &resolved.schema;

    println!("{} {}", "Form:".green().bold(), resolved.showcase.name().cyan());
    if let Some(flavor) = resolved.flavor {
        println!("Flavor: {:?}", flavor);
    }
    println!();

    for spec in schema.fields() {
        let required = match &spec.required {
            Some(message) => format!("required ({})", message),
            None => "optional".to_string(),
        };
        println!("  {} {:?}, {}", spec.name.cyan(), spec.kind, required.dimmed());

        for rule in &spec.rules {
            println!("    - {:?}: {}", rule.check, rule.message);
        }
        for condition in &spec.conditions {
            println!("    when {} = {}:", condition.field, condition.is);
            if let Some(message) = &condition.required {
                println!("      - required: {}", message);
            }
            for rule in &condition.rules {
                println!("      - {:?}: {}", rule.check, rule.message);
            }
        }
    }

    if !schema.refinements().is_empty() {
        println!();
        println!("{}", "Refinements:".green().bold());
        for refinement in schema.refinements() {
            println!(
                "  on {} reading [{}]: {}",
                refinement.path.cyan(),
                refinement.reads.join(", "),
                refinement.message
            );
        }
    }

    Ok(())
}
