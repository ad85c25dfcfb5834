use anyhow::Result;
use colored::Colorize;
use schemaform::Showcase;

pub fn execute() -> Result<()> {
    println!("{}", "Available forms:".green().bold());
    println!();

    for form in Showcase::ALL {
        let flavors = if form.has_flavors() {
            " [rules | refinements]".dimmed().to_string()
        } else {
            String::new()
        };
        println!("  {:<26} {}{}", form.name().cyan(), form.description(), flavors);
    }

    Ok(())
}
