//! Decode an IPDR/XDR file and re-encode it for round-trip verification.
//!
//! Reads the whole input file, decodes it as a single document, validates
//! and re-encodes it, and writes the result to `<FILE>.xdr` next to the
//! input. For well-formed input with true declared counts, the output is
//! byte-identical to the input; a document declared with the unbounded
//! array sentinel re-encodes with explicit counts. On any error the tool
//! prints a diagnostic and exits non-zero without writing an output file.

use std::fs;
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;

#[derive(Parser)]
#[command(name = "ipdr2xdr", about = "Re-encode an IPDR/XDR document")]
struct Args {
    /// IPDR/XDR file to decode and re-encode.
    file: PathBuf,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();
    let args = Args::parse();

    let bytes = fs::read(&args.file)
        .with_context(|| format!("reading {}", args.file.display()))?;
    let document = ipdrx::decode_document(bytes.clone())
        .with_context(|| format!("decoding {}", args.file.display()))?;
    let reencoded = ipdrx::encode_document(&document)
        .with_context(|| format!("re-encoding {}", args.file.display()))?;

    let out_path = PathBuf::from(format!("{}.xdr", args.file.display()));
    fs::write(&out_path, &reencoded)
        .with_context(|| format!("writing {}", out_path.display()))?;

    if reencoded == bytes {
        println!(
            "Re-encoded \"{}\" to {} ({} bytes, byte-identical)",
            args.file.display(),
            out_path.display(),
            reencoded.len()
        );
    } else {
        println!(
            "Re-encoded \"{}\" to {} ({} bytes in, {} bytes out)",
            args.file.display(),
            out_path.display(),
            bytes.len(),
            reencoded.len()
        );
    }
    Ok(())
}
