use anyhow::{bail, Context};
use clap::{Parser, Subcommand, ValueEnum};
use settingsbox::{
    default_settings_path, init_logging, SettingValue, Settings, TextFormat, ValueKind, APP_NAME,
    BUILD_DATE, VERSION,
};
use std::path::PathBuf;

/// Inspect and edit a settingsbox settings file
#[derive(Debug, Parser)]
#[command(name = "settingsbox", version, about)]
struct Cli {
    /// Settings file; defaults to settings.bin in the user configuration directory
    #[arg(long, short, global = true)]
    file: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print every setting
    Show {
        #[arg(long, value_enum, default_value_t = ShowFormat::Text)]
        format: ShowFormat,
    },
    /// Print one setting; nested keys are dotted, e.g. `plot.color`
    Get { key: String },
    /// Set one setting and save
    Set {
        key: String,
        value: String,
        /// Value kind; defaults to the kind of the current value, or a guess
        #[arg(long)]
        kind: Option<ValueKind>,
    },
    /// Add `key=value` pairs that are not set yet and save
    Defaults {
        #[arg(required = true, value_parser = parse_pair)]
        pairs: Vec<(String, String)>,
    },
    /// Write the settings to a .json or .toml file
    Export { path: PathBuf },
    /// Merge settings from a .json or .toml file and save
    Import { path: PathBuf },
    /// Print version and build date
    Version,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum ShowFormat {
    Text,
    Json,
    Toml,
}

fn parse_pair(text: &str) -> Result<(String, String), String> {
    match text.split_once('=') {
        Some((key, value)) if !key.trim().is_empty() => {
            Ok((key.trim().to_string(), value.to_string()))
        }
        _ => Err(format!("expected key=value, got '{}'", text)),
    }
}

fn settings_file(cli: &Cli) -> anyhow::Result<PathBuf> {
    match &cli.file {
        Some(path) => Ok(path.clone()),
        None => default_settings_path(APP_NAME)
            .context("no settings file given and no config directory"),
    }
}

fn open_lenient(path: PathBuf) -> Settings {
    Settings::open_or_default(path, Vec::<(String, SettingValue)>::new())
}

fn open_strict(path: PathBuf) -> anyhow::Result<Settings> {
    let display = path.display().to_string();
    Settings::open(path, Vec::<(String, SettingValue)>::new())
        .with_context(|| format!("failed to open settings file {}", display))
}

fn show(settings: &Settings, format: ShowFormat) -> anyhow::Result<()> {
    match format {
        ShowFormat::Text => {
            let mut keys: Vec<&str> = settings.keys().collect();
            keys.sort_unstable();
            for key in keys {
                println!("{} = {}", key, settings.get(key)?);
            }
        }
        ShowFormat::Json => println!("{}", settings.render(TextFormat::Json)?),
        ShowFormat::Toml => print!("{}", settings.render(TextFormat::Toml)?),
    }
    Ok(())
}

fn set(
    settings: &mut Settings,
    key: &str,
    text: &str,
    kind: Option<ValueKind>,
) -> anyhow::Result<()> {
    let kind = kind.or_else(|| settings.get(key).ok().and_then(ValueKind::of));
    let value = match kind {
        Some(kind) => match kind.parse(text) {
            Some(value) => value,
            None => bail!("'{}' is not a valid {} value", text, kind),
        },
        None => SettingValue::infer(text),
    };
    tracing::info!(%key, %value, "setting value");
    settings.set(key, value);
    Ok(())
}

fn main() -> anyhow::Result<()> {
    // Initialize logging
    init_logging()?;

    let cli = Cli::parse();
    if matches!(cli.command, Command::Version) {
        println!("settingsbox {} (built {})", VERSION, BUILD_DATE);
        return Ok(());
    }
    let path = settings_file(&cli)?;

    match cli.command {
        Command::Show { format } => show(&open_lenient(path), format)?,
        Command::Get { key } => println!("{}", open_strict(path)?.lookup(&key)?),
        Command::Set { key, value, kind } => {
            let mut settings = open_lenient(path);
            set(&mut settings, &key, &value, kind)?;
            settings.save()?;
        }
        Command::Defaults { pairs } => {
            let mut settings = open_lenient(path);
            let before = settings.len();
            settings.establish_defaults(
                pairs
                    .into_iter()
                    .map(|(key, value)| (key, SettingValue::infer(&value))),
            );
            tracing::info!(added = settings.len() - before, "defaults established");
            settings.save()?;
        }
        Command::Export { path: target } => {
            open_strict(path)?.export(&target)?;
            tracing::info!(path = %target.display(), "settings exported");
        }
        Command::Import { path: source } => {
            let mut settings = open_lenient(path);
            settings.import(&source)?;
            settings.save()?;
            tracing::info!(path = %source.display(), "settings imported");
        }
        Command::Version => {}
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_pair() {
        assert_eq!(parse_pair("a=1").unwrap(), ("a".to_string(), "1".to_string()));
        assert_eq!(parse_pair("a=b=c").unwrap(), ("a".to_string(), "b=c".to_string()));
        assert!(parse_pair("novalue").is_err());
        assert!(parse_pair("=1").is_err());
    }

    #[test]
    fn test_set_keeps_existing_kind() {
        let mut settings = Settings::with_defaults([("gain", SettingValue::Float(1.0))]);
        set(&mut settings, "gain", "2", None).unwrap();
        assert_eq!(settings.get("gain").unwrap(), &SettingValue::Float(2.0));

        set(&mut settings, "name", "camera", None).unwrap();
        assert_eq!(settings.get_text("name").unwrap(), "camera");

        assert!(set(&mut settings, "gain", "loud", None).is_err());
        assert!(set(&mut settings, "count", "x", Some(ValueKind::Int)).is_err());
    }

    #[test]
    fn test_cli_parses() {
        let cli = Cli::try_parse_from([
            "settingsbox",
            "--file",
            "s.bin",
            "set",
            "gain",
            "3",
            "--kind",
            "float",
        ])
        .unwrap();
        assert_eq!(cli.file, Some(PathBuf::from("s.bin")));
        assert!(matches!(cli.command, Command::Set { kind: Some(ValueKind::Float), .. }));

        let cli = Cli::try_parse_from(["settingsbox", "defaults", "a=1", "b=two"]).unwrap();
        assert!(matches!(cli.command, Command::Defaults { ref pairs } if pairs.len() == 2));
    }
}
