//! Interactive setup wizard.
//!
//! Collects the warehouse credentials, writes them to `.env` and creates the
//! `reports/` and `backups/` directories next to it.

use std::fs;
use std::path::Path;

use dialoguer::{theme::ColorfulTheme, Confirm, Input, Password};

use super::output;
use crate::domain::bot::parse_id_list;
use crate::domain::Roster;
use crate::error::{ConfigError, Result};
use crate::infrastructure::config::database::DEFAULT_PORT;

pub const ENV_FILE: &str = ".env";

/// Directories created alongside `.env`.
pub const WORK_DIRS: [&str; 2] = ["reports", "backups"];

/// Answers collected by the wizard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnvSettings {
    pub host: String,
    pub port: u16,
    pub user: String,
    pub password: String,
    pub name: String,
    pub bot_user_ids: String,
}

/// Double-quote values that dotenv would otherwise split or truncate.
fn env_value(value: &str) -> String {
    let plain = value
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_' | ',' | '/' | ':' | '@'));
    if plain && !value.is_empty() {
        return value.to_string();
    }
    let escaped = value
        .replace('\\', "\\\\")
        .replace('"', "\\\"")
        .replace('$', "\\$");
    format!("\"{escaped}\"")
}

/// The `.env` file content for a set of answers.
#[must_use]
pub fn render_env(settings: &EnvSettings) -> String {
    let port = settings.port.to_string();
    let mut out = String::from("# Warehouse connection for paddock\n");
    for (key, value) in [
        ("DB_HOST", settings.host.as_str()),
        ("DB_PORT", port.as_str()),
        ("DB_USER", settings.user.as_str()),
        ("DB_PASS", settings.password.as_str()),
        ("DB_NAME", settings.name.as_str()),
        ("BOT_USER_IDS", settings.bot_user_ids.as_str()),
    ] {
        out.push_str(key);
        out.push('=');
        out.push_str(&env_value(value));
        out.push('\n');
    }
    out
}

/// Write `.env` and create the working directories beside it.
pub fn write_env(path: &Path, settings: &EnvSettings) -> Result<()> {
    let dir = path.parent().filter(|p| !p.as_os_str().is_empty());
    if let Some(dir) = dir {
        fs::create_dir_all(dir)?;
    }
    fs::write(path, render_env(settings))?;
    for name in WORK_DIRS {
        let work_dir = dir.map_or_else(|| Path::new(name).to_path_buf(), |d| d.join(name));
        fs::create_dir_all(work_dir)?;
    }
    Ok(())
}

/// Run the interactive setup wizard.
pub fn execute(path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        return Err(ConfigError::InvalidValue {
            field: "env",
            reason: format!("{} already exists (use --force to overwrite)", path.display()),
        }
        .into());
    }
    if output::is_json() {
        return Err(ConfigError::InvalidValue {
            field: "json",
            reason: "`paddock init` is interactive; write .env by hand for scripted setup"
                .to_string(),
        }
        .into());
    }

    output::header(env!("CARGO_PKG_VERSION"));
    output::note("Let's connect paddock to the analytics warehouse.");

    let theme = ColorfulTheme::default();

    output::section("Warehouse");
    let host: String = Input::with_theme(&theme)
        .with_prompt("Database host")
        .interact_text()?;
    let port: u16 = Input::with_theme(&theme)
        .with_prompt("Database port")
        .default(DEFAULT_PORT)
        .interact_text()?;
    let user: String = Input::with_theme(&theme)
        .with_prompt("Database user")
        .interact_text()?;
    let password = Password::with_theme(&theme)
        .with_prompt("Database password")
        .allow_empty_password(true)
        .interact()?;
    let name: String = Input::with_theme(&theme)
        .with_prompt("Database name")
        .interact_text()?;

    output::section("Bots");
    let bot_user_ids: String = Input::with_theme(&theme)
        .with_prompt("Bot user ids (comma separated)")
        .default(Roster::house().sql_id_list())
        .validate_with(|input: &String| parse_id_list(input).map(|_| ()))
        .interact_text()?;

    let settings = EnvSettings {
        host,
        port,
        user,
        password,
        name,
        bot_user_ids,
    };

    let confirm = Confirm::with_theme(&theme)
        .with_prompt(format!("Write {}?", path.display()))
        .default(true)
        .interact()?;
    if !confirm {
        output::note("Setup aborted.");
        return Ok(());
    }

    let spinner = output::spinner("Writing environment...");
    write_env(path, &settings)?;
    output::spinner_success(&spinner, "Environment saved");

    output::section("Ready");
    output::success(&format!("Env       {}", path.display()));
    for dir in WORK_DIRS {
        output::success(&format!("Directory {dir}/"));
    }

    output::section("Next Steps");
    output::note(&format!(
        "1. Verify: {}",
        output::highlight("paddock check warehouse")
    ));
    output::note(&format!("2. Fetch:  {}", output::highlight("paddock update")));
    output::note(&format!("3. View:   {}", output::highlight("paddock dashboard")));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings() -> EnvSettings {
        EnvSettings {
            host: "db.internal".to_string(),
            port: 3307,
            user: "reports".to_string(),
            password: "p#ss w\"rd".to_string(),
            name: "analytics".to_string(),
            bot_user_ids: "10111491, 10211493".to_string(),
        }
    }

    #[test]
    fn env_file_lists_every_key() {
        let env = render_env(&settings());

        assert!(env.contains("DB_HOST=db.internal\n"));
        assert!(env.contains("DB_PORT=3307\n"));
        assert!(env.contains("DB_NAME=analytics\n"));
        assert!(env.contains("BOT_USER_IDS=\"10111491, 10211493\"\n"));
        assert!(env.contains("DB_PASS=\"p#ss w\\\"rd\"\n"));
    }

    #[test]
    fn quoted_values_read_back_through_dotenvy() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(".env");
        write_env(&path, &settings()).unwrap();

        let values: std::collections::HashMap<String, String> = dotenvy::from_path_iter(&path)
            .unwrap()
            .map(|item| item.unwrap())
            .collect();

        assert_eq!(values["DB_PASS"], "p#ss w\"rd");
        assert_eq!(values["BOT_USER_IDS"], "10111491, 10211493");
        assert!(dir.path().join("reports").is_dir());
        assert!(dir.path().join("backups").is_dir());
    }

    #[test]
    fn refuses_to_overwrite_without_force() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(".env");
        fs::write(&path, "DB_HOST=old\n").unwrap();

        let error = execute(&path, false).unwrap_err();

        assert!(error.to_string().contains("--force"));
        assert_eq!(fs::read_to_string(&path).unwrap(), "DB_HOST=old\n");
    }
}
