//! `add`: sum the numbers in a delimited string.

use anyhow::Context;
use camino::Utf8PathBuf;
use clap::Args;
use tracing::{debug, instrument};

use strcalc_core::calculator;

use super::{check_input_size, read_input_file, read_stdin};

/// Arguments for the `add` subcommand.
#[derive(Args, Debug)]
pub struct AddArgs {
    /// Numbers to add, e.g. "1,2" (reads stdin when omitted).
    pub input: Option<String>,

    /// Read the numbers from a file.
    #[arg(short, long, conflicts_with = "input")]
    pub file: Option<Utf8PathBuf>,

    /// Interpret `\n` and `\\` escapes in INPUT, e.g. '//;\n1;2'.
    #[arg(short, long)]
    pub escapes: bool,

    /// Print the JSON Schema of the `--json` report and exit.
    #[arg(long, conflicts_with_all = ["input", "file", "escapes"])]
    pub schema: bool,
}

/// Sum the numbers from the argument, a file, or stdin.
#[instrument(name = "cmd_add", skip_all, fields(file = ?args.file))]
pub fn cmd_add(
    args: AddArgs,
    global_json: bool,
    max_input_bytes: Option<usize>,
) -> anyhow::Result<()> {
    debug!(escapes = args.escapes, "executing add command");

    if args.schema {
        println!(
            "{}",
            serde_json::to_string_pretty(&calculator::report_schema())?
        );
        return Ok(());
    }

    let text = match (args.input, args.file) {
        (Some(input), _) => {
            check_input_size("input", input.len(), max_input_bytes)?;
            if args.escapes { unescape(&input) } else { input }
        }
        (None, Some(path)) => trim_line_ending(read_input_file(&path, max_input_bytes)?),
        (None, None) => trim_line_ending(read_stdin(max_input_bytes)?),
    };

    let calc = calculator::evaluate(&text).context("failed to add numbers")?;

    if global_json {
        println!("{}", serde_json::to_string_pretty(&calc)?);
    } else {
        println!("{}", calc.sum);
    }

    Ok(())
}

/// Expand `\n` to a newline and `\\` to a backslash; other escapes are kept.
fn unescape(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut chars = input.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('\\') => out.push('\\'),
            Some(other) => {
                out.push('\\');
                out.push(other);
            }
            None => out.push('\\'),
        }
    }
    out
}

/// Drop one trailing line ending added by editors and `echo`.
fn trim_line_ending(mut text: String) -> String {
    if text.ends_with('\n') {
        text.pop();
        if text.ends_with('\r') {
            text.pop();
        }
    }
    text
}
