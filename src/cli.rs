use std::io::Read;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use chrono::NaiveDate;
use serde_json::Value;
use tracing::info;

use crate::config;
use crate::normalize::window::filter_by_changed_window;
use crate::normalize::Normalizer;

/// Parsed command line for `adonorm`.
#[derive(Debug, Default, PartialEq)]
pub struct CliArgs {
    pub input: PathBuf,
    pub output: Option<PathBuf>,
    pub since: Option<NaiveDate>,
    pub days: i64,
    pub config: Option<PathBuf>,
    pub pretty: bool,
}

/// Parse `adonorm` arguments.
///
/// Supported forms:
///   adonorm items.json
///   adonorm items.json -o normalized.json --pretty
///   adonorm items.json --since 2026-01-01 --days 14
///   adonorm - --config ./adonorm.toml      (read raw items from stdin)
pub fn parse_args(args: &[String]) -> Result<CliArgs> {
    if args.is_empty() {
        bail!(
            "Usage: adonorm <input.json> [-o <out.json>] [--since YYYY-MM-DD [--days N]] [--config <path>] [--pretty]\n\nUse '-' as the input to read from stdin."
        );
    }

    let mut input: Option<PathBuf> = None;
    let mut output: Option<PathBuf> = None;
    let mut since: Option<NaiveDate> = None;
    let mut days: Option<i64> = None;
    let mut config: Option<PathBuf> = None;
    let mut pretty = false;
    let mut i = 0;

    while i < args.len() {
        match args[i].as_str() {
            "-o" | "--out" | "--output" => {
                i += 1;
                match args.get(i) {
                    Some(value) => output = Some(PathBuf::from(value)),
                    None => bail!("Missing value for -o/--out flag"),
                }
            }
            "--since" => {
                i += 1;
                match args.get(i) {
                    Some(value) => {
                        since = Some(
                            NaiveDate::parse_from_str(value, "%Y-%m-%d")
                                .with_context(|| format!("Invalid --since date: {value}"))?,
                        );
                    }
                    None => bail!("Missing value for --since flag"),
                }
            }
            "--days" => {
                i += 1;
                match args.get(i) {
                    Some(value) => {
                        let parsed: i64 = value
                            .parse()
                            .with_context(|| format!("Invalid --days value: {value}"))?;
                        if parsed <= 0 {
                            bail!("--days must be positive");
                        }
                        days = Some(parsed);
                    }
                    None => bail!("Missing value for --days flag"),
                }
            }
            "--config" => {
                i += 1;
                match args.get(i) {
                    Some(value) => config = Some(PathBuf::from(value)),
                    None => bail!("Missing value for --config flag"),
                }
            }
            "--pretty" => pretty = true,
            other => {
                if input.is_some() {
                    bail!("Unexpected argument: {other}");
                }
                input = Some(PathBuf::from(other));
            }
        }
        i += 1;
    }

    if days.is_some() && since.is_none() {
        bail!("--days requires --since");
    }

    let Some(input) = input else {
        bail!("No input file given (use '-' for stdin)");
    };

    Ok(CliArgs {
        input,
        output,
        since,
        days: days.unwrap_or(30),
        config,
        pretty,
    })
}

/// Read raw items, normalize, optionally window-filter, write JSON out.
pub fn run(args: CliArgs) -> Result<()> {
    let config = match &args.config {
        Some(path) => config::load_config_from(path)?,
        None => config::load_config()?,
    };
    let normalizer = Normalizer::new(config.field_policy());

    let contents = if args.input.as_os_str() == "-" {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("Failed to read raw items from stdin")?;
        buf
    } else {
        std::fs::read_to_string(&args.input)
            .with_context(|| format!("Failed to read {}", args.input.display()))?
    };

    let raw: Value = serde_json::from_str(&contents).context("Input is not valid JSON")?;
    let raw_items = raw_item_batch(&raw)?;
    info!(count = raw_items.len(), "read raw work items");

    let mut records = normalizer.normalize(raw_items)?;

    if let Some(since) = args.since {
        let before = records.len();
        records = filter_by_changed_window(records, since, args.days);
        info!(
            kept = records.len(),
            dropped = before - records.len(),
            %since,
            days = args.days,
            "applied changed-date window"
        );
    }

    let rendered = if args.pretty {
        serde_json::to_string_pretty(&records)?
    } else {
        serde_json::to_string(&records)?
    };

    match &args.output {
        Some(path) => {
            std::fs::write(path, rendered)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            info!(count = records.len(), path = %path.display(), "wrote normalized records");
        }
        None => println!("{rendered}"),
    }

    Ok(())
}

/// Accept either a bare JSON array of raw items, or the batch-endpoint
/// envelope `{"count": N, "value": [...]}`.
fn raw_item_batch(raw: &Value) -> Result<&Vec<Value>> {
    if let Some(items) = raw.as_array() {
        return Ok(items);
    }
    if let Some(items) = raw.get("value").and_then(Value::as_array) {
        return Ok(items);
    }
    bail!("Input must be a JSON array of work items or an object with a 'value' array");
}

pub fn print_help() {
    println!("adonorm — normalize Azure DevOps work-item JSON\n");
    println!("USAGE:");
    println!("  adonorm <input.json>              Normalize a batch (use '-' for stdin)");
    println!("  adonorm --help                    Show this help\n");
    println!("OPTIONS:");
    println!("  -o, --out <file>    Write output to a file instead of stdout");
    println!("  --since <date>      Keep only items changed on/after this date (YYYY-MM-DD)");
    println!("  --days <n>          Window length in days for --since (default 30)");
    println!("  --config <path>     Config file (default ~/.adonorm/config.toml)");
    println!("  --pretty            Pretty-print the output JSON");
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(parts: &[&str]) -> Vec<String> {
        parts.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn parse_bare_input() {
        let parsed = parse_args(&args(&["items.json"])).unwrap();
        assert_eq!(parsed.input, PathBuf::from("items.json"));
        assert_eq!(parsed.output, None);
        assert_eq!(parsed.since, None);
        assert_eq!(parsed.days, 30);
        assert!(!parsed.pretty);
    }

    #[test]
    fn parse_full_flags() {
        let parsed = parse_args(&args(&[
            "items.json",
            "-o",
            "out.json",
            "--since",
            "2026-01-01",
            "--days",
            "14",
            "--pretty",
        ]))
        .unwrap();
        assert_eq!(parsed.output, Some(PathBuf::from("out.json")));
        assert_eq!(parsed.since, NaiveDate::from_ymd_opt(2026, 1, 1));
        assert_eq!(parsed.days, 14);
        assert!(parsed.pretty);
    }

    #[test]
    fn days_requires_since() {
        let result = parse_args(&args(&["items.json", "--days", "7"]));
        assert!(result.unwrap_err().to_string().contains("--since"));
    }

    #[test]
    fn rejects_bad_date() {
        let result = parse_args(&args(&["items.json", "--since", "January"]));
        assert!(result.is_err());
    }

    #[test]
    fn rejects_second_positional() {
        let result = parse_args(&args(&["a.json", "b.json"]));
        assert!(result.unwrap_err().to_string().contains("Unexpected"));
    }

    #[test]
    fn rejects_missing_flag_value() {
        let result = parse_args(&args(&["items.json", "-o"]));
        assert!(result.is_err());
    }

    #[test]
    fn batch_envelope_unwraps_value_array() {
        let raw = serde_json::json!({"count": 1, "value": [{"id": 1}]});
        assert_eq!(raw_item_batch(&raw).unwrap().len(), 1);

        let bare = serde_json::json!([{"id": 1}, {"id": 2}]);
        assert_eq!(raw_item_batch(&bare).unwrap().len(), 2);

        assert!(raw_item_batch(&serde_json::json!("nope")).is_err());
    }
}
