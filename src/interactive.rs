use std::io::{self, Write};
use std::sync::LazyLock;
use regex::Regex;
use crate::config::{SavedConfig, save_config};

static CURRENCY_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Z]{3}$").expect("currency pattern is valid"));

/// Helper struct for managing user input operations
struct InputHandler;

impl InputHandler {
    /// Gets user input with automatic trimming
    fn get_input() -> Result<String, io::Error> {
        let mut input = String::new();
        io::stdin().read_line(&mut input)?;
        Ok(input.trim().to_string())
    }

    /// Prompts user with a question and handles yes/no responses
    fn confirm_prompt(message: &str, default_yes: bool) -> Result<bool, io::Error> {
        let default_text = if default_yes { "[Y/n]" } else { "[y/N]" };

        loop {
            print!("{} {}: ", message, default_text);
            io::stdout().flush()?;

            let input = Self::get_input()?.to_lowercase();

            match input.as_str() {
                "" => return Ok(default_yes),
                "y" | "yes" => return Ok(true),
                "n" | "no" => return Ok(false),
                _ => {
                    println!("❌ Please enter Y for yes or N for no.");
                    println!();
                }
            }
        }
    }

    /// Prompts for free text, keeping `current` when the answer is blank
    fn text_prompt(message: &str, current: &str) -> Result<String, io::Error> {
        print!("{} [{}]: ", message, current);
        io::stdout().flush()?;
        let input = Self::get_input()?;
        Ok(if input.is_empty() { current.to_string() } else { input })
    }
}

/// Normalise a currency answer to an upper-case three letter code.
/// Blank keeps `current`; anything else that is not a code is rejected.
pub fn normalize_currency(input: &str, current: &str) -> Option<String> {
    let input = input.trim();
    if input.is_empty() {
        return Some(current.to_string());
    }
    let code = input.to_uppercase();
    CURRENCY_RE.is_match(&code).then_some(code)
}

fn print_config_summary(config: &SavedConfig) {
    println!("📋 Preferences Summary:");
    println!("   💱 Currency: {}", config.currency);
    println!("   🏷️  Title: {}", config.project_title);
    println!();
}

/// Guided setup for display preferences. Returns the saved config, or None if cancelled.
pub fn run_setup_wizard(current: SavedConfig) -> Result<Option<SavedConfig>, io::Error> {
    println!("🚀 Cost Estimator - Preferences Setup");
    println!("{}", "=".repeat(40));
    println!();

    let currency = loop {
        let answer = InputHandler::text_prompt("💱 Currency code (e.g. INR, USD)", &current.currency)?;
        match normalize_currency(&answer, &current.currency) {
            Some(code) => break code,
            None => {
                println!("❌ Please enter a three letter currency code.");
                println!();
            }
        }
    };
    let project_title = InputHandler::text_prompt("🏷️  Project title", &current.project_title)?;

    let config = SavedConfig { currency, project_title };
    println!();
    print_config_summary(&config);

    if !InputHandler::confirm_prompt("💾 Save these preferences?", true)? {
        println!("❌ Setup cancelled.");
        return Ok(None);
    }

    match save_config(&config) {
        Ok(()) => println!("💾 Preferences saved."),
        Err(e) => {
            eprintln!("⚠️  Warning: Could not save preferences: {}", e);
            eprintln!("    (They will still be used for this session)");
        }
    }
    println!();
    Ok(Some(config))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_currency() {
        assert_eq!(normalize_currency("", "INR"), Some("INR".to_string()));
        assert_eq!(normalize_currency(" usd ", "INR"), Some("USD".to_string()));
        assert_eq!(normalize_currency("EUR", "INR"), Some("EUR".to_string()));
        assert_eq!(normalize_currency("dollars", "INR"), None);
        assert_eq!(normalize_currency("U5D", "INR"), None);
    }
}
