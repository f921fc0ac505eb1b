// src/main.rs
//
// htmlindent: reformat an HTML file with consistent one-space indentation.
//
// CLI flags:
//   --document      : force whole-document parsing (html/head/body are supplied)
//   --fragment      : force fragment parsing (nodes are formatted as given)
// Default: document mode iff the input starts with `<!doctype` or `<html`
// (ASCII case-insensitive, after leading whitespace).
//
// Input "-" or no input reads stdin and writes stdout.

use anyhow::{Context, Result};
use clap::{ArgAction, Parser};
use std::fs;
use std::io::{self, Read, Write};
use std::path::PathBuf;

/// CLI flags
#[derive(Parser)]
#[command(author, version, about)]
struct Cli {
    /// Force-enable whole-document parsing
    #[arg(long, action = ArgAction::SetTrue)]
    document: bool,

    /// Force-enable fragment parsing
    #[arg(long, action = ArgAction::SetTrue)]
    fragment: bool,

    /// Input file (default: stdin)
    input: Option<PathBuf>,

    /// Output file (default: overwrite input, or stdout when reading stdin)
    output: Option<PathBuf>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let input = cli.input.as_ref().filter(|p| p.as_os_str() != "-");
    let src = match input {
        Some(path) => {
            fs::read(path).with_context(|| format!("failed to read {}", path.display()))?
        }
        None => {
            let mut buf = Vec::new();
            io::stdin()
                .read_to_end(&mut buf)
                .context("failed to read stdin")?;
            buf
        }
    };

    // Precedence: explicit flags override sniffing; --fragment wins if both are present.
    let use_document = if cli.fragment {
        false
    } else if cli.document {
        true
    } else {
        looks_like_document(&src)
    };

    let mut out = Vec::with_capacity(src.len() + src.len() / 4);
    if use_document {
        htmlindent::document(&mut out, &mut src.as_slice())?;
    } else {
        htmlindent::fragment(&mut out, &mut src.as_slice())?;
    }

    match cli.output.as_ref().or(input) {
        Some(out_path) => fs::write(out_path, out)
            .with_context(|| format!("failed to write {}", out_path.display()))?,
        None => {
            let mut stdout = io::stdout().lock();
            stdout.write_all(&out).context("failed to write stdout")?;
            stdout.flush().context("failed to write stdout")?;
        }
    }
    Ok(())
}

/// Input opens with a doctype or an `<html` start tag.
fn looks_like_document(src: &[u8]) -> bool {
    let start = src
        .iter()
        .position(|b| !b.is_ascii_whitespace())
        .unwrap_or(src.len());
    let head = &src[start..];
    [&b"<!doctype"[..], b"<html"]
        .iter()
        .any(|prefix| head.len() >= prefix.len() && head[..prefix.len()].eq_ignore_ascii_case(prefix))
}
