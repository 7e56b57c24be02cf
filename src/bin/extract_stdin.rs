//! Simple CLI that reads HTML from stdin and writes its text to stdout.
//!
//! Usage: `extract_stdin [--config <conf.json>] [--json]`
//!
//! The config file is a JSON object using the `textextractor.*` keys; other
//! keys are ignored. Set `RUST_LOG=debug` to see scoping decisions.

use rs_textextract::{extract_text_bytes, Options};
use serde::Serialize;
use std::env;
use std::fs;
use std::io::{self, Read};
use std::process;

#[derive(Serialize)]
struct Output {
    text: String,
    chars: usize,
}

struct Args {
    config: Option<String>,
    json: bool,
}

fn parse_args() -> Result<Args, String> {
    let mut args = Args {
        config: None,
        json: false,
    };
    let mut iter = env::args().skip(1);
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--json" => args.json = true,
            "--config" => {
                args.config = Some(iter.next().ok_or("--config needs a file path")?);
            }
            other => return Err(format!("unknown argument: {other}")),
        }
    }
    Ok(args)
}

fn load_options(path: Option<&str>) -> Result<Options, String> {
    let Some(path) = path else {
        return Ok(Options::default());
    };
    let conf = fs::read_to_string(path).map_err(|e| format!("cannot read {path}: {e}"))?;
    Options::from_json_str(&conf).map_err(|e| e.to_string())
}

fn run() -> Result<(), String> {
    let args = parse_args()?;
    let options = load_options(args.config.as_deref())?;

    let mut html = Vec::new();
    io::stdin()
        .read_to_end(&mut html)
        .map_err(|e| format!("failed to read from stdin: {e}"))?;

    let text = extract_text_bytes(&html, &options).map_err(|e| e.to_string())?;

    if args.json {
        let output = Output {
            chars: text.chars().count(),
            text,
        };
        println!("{}", serde_json::to_string(&output).unwrap_or_default());
    } else {
        println!("{text}");
    }
    Ok(())
}

fn main() {
    env_logger::init();

    if let Err(message) = run() {
        eprintln!("{message}");
        process::exit(1);
    }
}
