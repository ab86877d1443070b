//! `content-edit`: apply path edits to a content document, or read one
//! value from it.
//!
//! Usage:
//!   content-edit '<edits-json>' [--strict] [--pretty]
//!   content-edit --pointer '/hero/title'
//!
//! The document is read from stdin.

use std::io::{self, Read, Write};
use std::process::ExitCode;

use clap::Parser;
use content_admin::cli::{apply_edits_json, init_tracing, lookup};
use content_admin::{AdminError, EditMode, SessionOptions};

#[derive(Debug, Parser)]
#[command(name = "content-edit", version, about = "Edit a JSON content document read from stdin")]
struct Args {
    /// One edit object or an array of edits, e.g.
    /// '[{"op":"set","path":["hero","title"],"value":"Hi"}]'
    #[arg(required_unless_present = "pointer", conflicts_with = "pointer")]
    edits: Option<String>,

    /// Print the value at this pointer instead of editing.
    #[arg(long)]
    pointer: Option<String>,

    /// Reject edits that would replace a value of the wrong container kind.
    #[arg(long)]
    strict: bool,

    /// Pretty-print the output.
    #[arg(long)]
    pretty: bool,

    /// Log filter directives; overrides RUST_LOG.
    #[arg(long, value_name = "FILTER")]
    log: Option<String>,
}

fn run(args: &Args) -> Result<String, AdminError> {
    let mut buf = String::new();
    io::stdin().read_to_string(&mut buf)?;

    match (&args.pointer, &args.edits) {
        (Some(pointer), _) => lookup(buf.trim(), pointer, args.pretty),
        (None, Some(edits)) => {
            let options = SessionOptions {
                mode: if args.strict { EditMode::Strict } else { EditMode::Lenient },
                pretty: args.pretty,
            };
            apply_edits_json(buf.trim(), edits, options)
        }
        (None, None) => Err(AdminError::Usage("either edits or --pointer is required")),
    }
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_tracing(args.log.as_deref());

    let result = run(&args).and_then(|out| {
        let mut stdout = io::stdout().lock();
        stdout.write_all(out.as_bytes())?;
        stdout.write_all(b"\n")?;
        Ok(())
    });
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{e}");
            ExitCode::FAILURE
        }
    }
}
