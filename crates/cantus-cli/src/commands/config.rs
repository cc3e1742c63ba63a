use anyhow::{Context, Result};
use cantus_enrich::{config, Config};
use toml_edit::{value, DocumentMut};

const NUMERIC_KEYS: [&str; 3] = ["top_n", "min_df", "max_features"];

/// Show the current effective configuration.
pub fn show_config() -> Result<()> {
    let config = Config::load()?;

    println!("Current Configuration");
    println!("=====================\n");

    println!("Config file: {}", config::config_file_path().display());

    let exists = config::config_file_path().exists();
    println!("File exists: {}\n", if exists { "yes" } else { "no (using defaults)" });

    println!("Settings:");
    for key in config::KEYS {
        println!("  {}: {}", key, display_value(&config, key).unwrap_or_default());
    }

    println!("\nPriority: CLI args > ENV vars (CANTUS_*) > Config file > Defaults");

    Ok(())
}

/// Get a specific config value, or print the config file.
pub fn get_config(key: Option<String>) -> Result<()> {
    if let Some(key) = key {
        let config = Config::load()?;
        match display_value(&config, &key) {
            Some(v) => println!("{}", v),
            None => anyhow::bail!(
                "Unknown config key: {}\n\nValid keys: {}",
                key,
                config::KEYS.join(", ")
            ),
        }
    } else {
        let config_path = config::config_file_path();

        if config_path.exists() {
            let contents =
                std::fs::read_to_string(&config_path).context("Failed to read config file")?;
            print!("{}", contents);
        } else {
            println!("Config file does not exist: {}", config_path.display());
            println!("\nRun 'cantus config init' to create it.");
        }
    }

    Ok(())
}

/// Set a config value, keeping the rest of the file (comments included).
pub fn set_config(key: &str, new_value: &str) -> Result<()> {
    let config_path = config::config_file_path();
    config::ensure_config_file()?;

    let contents = std::fs::read_to_string(&config_path).context("Failed to read config file")?;
    let updated = update_document(&contents, key, new_value)?;

    std::fs::write(&config_path, updated).context("Failed to write config file")?;

    println!("✓ Updated {} = {}", key, mask(key, new_value));
    println!("  in {}", config_path.display());

    Ok(())
}

/// Show the config file path.
pub fn show_path() -> Result<()> {
    println!("{}", config::config_file_path().display());
    Ok(())
}

/// Show example configuration.
pub fn show_example() -> Result<()> {
    print!("{}", config::example_config());
    Ok(())
}

/// Initialize config file with defaults.
pub fn init_config() -> Result<()> {
    let created = config::ensure_config_file()?;
    let config_path = config::config_file_path();

    if created {
        println!("✓ Created config file: {}", config_path.display());
        println!("\nEdit this file to configure cantus.");
    } else {
        println!("Config file already exists: {}", config_path.display());
    }

    Ok(())
}

fn update_document(contents: &str, key: &str, new_value: &str) -> Result<String> {
    if !config::KEYS.iter().any(|k| *k == key) {
        anyhow::bail!(
            "Unknown config key: {}\n\nValid keys: {}",
            key,
            config::KEYS.join(", ")
        );
    }

    let mut doc: DocumentMut = contents.parse().context("Config file is not valid TOML")?;

    if NUMERIC_KEYS.iter().any(|k| *k == key) {
        let number: i64 = new_value
            .parse()
            .with_context(|| format!("{} must be a whole number, got {:?}", key, new_value))?;
        if number < 1 {
            anyhow::bail!("{} must be at least 1", key);
        }
        doc[key] = value(number);
    } else {
        doc[key] = value(new_value);
    }

    Ok(doc.to_string())
}

fn display_value(config: &Config, key: &str) -> Option<String> {
    let shown = match key {
        "dataset_path" => config.dataset_path.display().to_string(),
        "top_n" => config.top_n.to_string(),
        "min_df" => config.min_df.to_string(),
        "max_features" => config.max_features.to_string(),
        "spotify_client_id" => config
            .spotify_client_id
            .clone()
            .unwrap_or_else(|| String::from("<not set>")),
        "spotify_client_secret" => config
            .spotify_client_secret
            .as_deref()
            .map_or_else(|| String::from("<not set>"), |s| mask(key, s)),
        "placeholder_cover_url" => config.placeholder_cover_url.clone(),
        _ => return None,
    };
    Some(shown)
}

fn mask(key: &str, value: &str) -> String {
    if key.ends_with("secret") {
        "*".repeat(value.len().min(8))
    } else {
        value.to_string()
    }
}
