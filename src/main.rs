//! `mustache` — render a template against a JSON context, in the spirit of
//! the reference `mustach-tool.c` command-line driver.

use std::io::Read;
use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use dashmap::DashMap;

use mustache_core::providers::JsonProvider;
use mustache_core::{render_to_writer, Error, RenderOptions};

/// Render Mustache templates against a JSON context.
#[derive(Parser)]
#[command(name = "mustache", about = "Render Mustache templates against a JSON context")]
struct Cli {
    /// Path to the JSON context file ('-' reads from standard input)
    json_file: String,

    /// One or more template file paths, rendered in order to standard output
    #[arg(required = true)]
    templates: Vec<PathBuf>,

    /// Directory to resolve {{>partial}} references against
    #[arg(long)]
    partials_dir: Option<PathBuf>,

    /// Report an empty tag name ({{ }}) as an error instead of allowing it
    #[arg(long)]
    forbid_empty_tag: bool,

    /// Emit empty output for a missing name instead of failing the render
    #[arg(long)]
    lenient: bool,

    /// Print tag-dispatch diagnostics to standard error
    #[arg(long)]
    trace: bool,
}

fn read_json_source(path: &str) -> Result<String, Error> {
    if path == "-" {
        let mut buf = String::new();
        std::io::stdin().read_to_string(&mut buf)?;
        Ok(buf)
    } else {
        std::fs::read_to_string(path).map_err(Error::from)
    }
}

fn run(cli: &Cli) -> Result<(), Error> {
    let json_text = read_json_source(&cli.json_file)?;
    let root: serde_json::Value = serde_json::from_str(&json_text).map_err(|e| {
        Error::System(std::io::Error::new(std::io::ErrorKind::InvalidData, e))
    })?;

    let options = RenderOptions {
        allow_empty_tag: !cli.forbid_empty_tag,
        emit_errors_as_placeholders: cli.lenient,
        trace: cli.trace,
        ..RenderOptions::default()
    };

    let partial_cache = Arc::new(DashMap::new());
    let stdout = std::io::stdout();

    for template_path in &cli.templates {
        let template_text = std::fs::read_to_string(template_path)?;
        let mut provider = JsonProvider::new(root.clone()).with_shared_cache(partial_cache.clone());
        if let Some(dir) = &cli.partials_dir {
            provider = provider.with_partials_dir(dir.clone());
        }
        render_to_writer(&template_text, &mut provider, stdout.lock(), &options)?;
    }
    Ok(())
}

fn main() {
    let cli = Cli::parse();
    if let Err(e) = run(&cli) {
        eprintln!("mustache: {e}");
        std::process::exit(1);
    }
}
