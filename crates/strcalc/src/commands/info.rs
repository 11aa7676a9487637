//! `info`: version, effective settings and the summing rules in force.

use clap::Args;
use owo_colors::OwoColorize;
use serde::Serialize;
use strcalc_core::calculator::MAX_ADDEND;
use strcalc_core::config::{Config, ConfigSources};
use strcalc_core::delimiter::{DEFAULT_DELIMITERS, HEADER_MARKER};
use tracing::{debug, instrument};

/// Arguments for `info`; output format comes from the global `--json`.
#[derive(Args, Debug, Default)]
pub struct InfoArgs {}

#[derive(Serialize)]
struct Report {
    name: &'static str,
    version: &'static str,
    description: &'static str,
    license: &'static str,
    config: Settings,
    rules: Rules,
}

#[derive(Serialize)]
struct Settings {
    /// Every merged file, lowest precedence first.
    files: Vec<String>,
    /// The file with the final say, kept for scripts that want one path.
    #[serde(skip_serializing_if = "Option::is_none")]
    config_file: Option<String>,
    log_level: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    log_dir: Option<String>,
    /// `null` when the limit is disabled.
    max_input_bytes: Option<usize>,
    disable_input_limit: bool,
}

#[derive(Serialize)]
struct Rules {
    delimiters: [&'static str; 2],
    header_marker: &'static str,
    max_addend: i64,
}

impl Report {
    fn gather(config: &Config, sources: &ConfigSources) -> Self {
        Self {
            name: env!("CARGO_PKG_NAME"),
            version: env!("CARGO_PKG_VERSION"),
            description: env!("CARGO_PKG_DESCRIPTION"),
            license: env!("CARGO_PKG_LICENSE"),
            config: Settings {
                files: sources.files.iter().map(ToString::to_string).collect(),
                config_file: sources.primary_file().map(ToString::to_string),
                log_level: config.log_level.as_str(),
                log_dir: config.log_dir.as_ref().map(ToString::to_string),
                max_input_bytes: config.input_limit(),
                disable_input_limit: config.disable_input_limit,
            },
            rules: Rules {
                delimiters: DEFAULT_DELIMITERS,
                header_marker: HEADER_MARKER,
                max_addend: MAX_ADDEND,
            },
        }
    }

    fn print_text(&self) {
        println!("{} {}", self.name.bold(), self.version.green());
        println!("{}", self.description);
        println!("{}: {}", "License".dimmed(), self.license);

        let settings = &self.config;
        println!();
        println!("{}", "Configuration".bold().underline());
        if settings.files.is_empty() {
            println!("{}: {}", "Files".dimmed(), "none found".yellow());
        }
        for file in &settings.files {
            println!("{}: {}", "File".dimmed(), file.cyan());
        }
        println!("{}: {}", "Log level".dimmed(), settings.log_level);
        if let Some(ref dir) = settings.log_dir {
            println!("{}: {dir}", "Log directory".dimmed());
        }
        match settings.max_input_bytes {
            Some(max) => println!("{}: {max} bytes", "Input limit".dimmed()),
            None => println!("{}: {}", "Input limit".dimmed(), "off".yellow()),
        }

        println!();
        println!("{}", "Rules".bold().underline());
        let marker = self.rules.header_marker;
        println!(
            "{}: comma and newline; {marker}<d> or {marker}[<delim>] adds one",
            "Delimiters".dimmed()
        );
        println!("{}: {}", "Largest addend".dimmed(), self.rules.max_addend);
        println!("{}: rejected", "Negatives".dimmed());
    }
}

/// Print package, configuration and rule details.
#[instrument(name = "cmd_info", skip_all)]
pub fn cmd_info(
    _args: InfoArgs,
    global_json: bool,
    config: &Config,
    sources: &ConfigSources,
) -> anyhow::Result<()> {
    debug!(files = sources.files.len(), "executing info command");
    let report = Report::gather(config, sources);

    if global_json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        report.print_text();
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use camino::Utf8PathBuf;

    #[test]
    fn defaults_report_no_files_and_default_limit() {
        let report = Report::gather(&Config::default(), &ConfigSources::default());
        assert!(report.config.files.is_empty());
        assert!(report.config.config_file.is_none());
        assert_eq!(report.config.log_level, "info");
        assert_eq!(
            report.config.max_input_bytes,
            Some(strcalc_core::DEFAULT_MAX_INPUT_BYTES)
        );
    }

    #[test]
    fn disabled_limit_serializes_as_null() {
        let config = Config {
            disable_input_limit: true,
            ..Config::default()
        };
        let report = Report::gather(&config, &ConfigSources::default());
        let json = serde_json::to_value(&report).unwrap();
        assert!(json["config"]["max_input_bytes"].is_null());
        assert_eq!(json["config"]["disable_input_limit"], true);
    }

    #[test]
    fn last_merged_file_is_config_file() {
        let sources = ConfigSources {
            files: vec![Utf8PathBuf::from("a/.strcalc.toml"), Utf8PathBuf::from("ci.json")],
        };
        let report = Report::gather(&Config::default(), &sources);
        assert_eq!(report.config.files.len(), 2);
        assert_eq!(report.config.config_file.as_deref(), Some("ci.json"));
    }

    #[test]
    fn rules_report_threshold_and_defaults() {
        let report = Report::gather(&Config::default(), &ConfigSources::default());
        assert_eq!(report.rules.max_addend, 1000);
        assert_eq!(report.rules.delimiters, [",", "\n"]);
    }

    #[test]
    fn cmd_info_runs_in_both_formats() {
        let (config, sources) = (Config::default(), ConfigSources::default());
        assert!(cmd_info(InfoArgs::default(), false, &config, &sources).is_ok());
        assert!(cmd_info(InfoArgs::default(), true, &config, &sources).is_ok());
    }
}
