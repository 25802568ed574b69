//! Decode an IPDR/XDR file and export its XML projection.
//!
//! Reads the whole input file, decodes it as a single document, renders
//! the one-way XML tree, and writes it to `<FILE>.xml` next to the input
//! (or to stdout with `--stdout`). On any decode error the tool prints a
//! diagnostic and exits non-zero without writing an output file.

use std::fs;
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use ipdrx::xml::ToXml;

#[derive(Parser)]
#[command(name = "ipdr2xml", about = "Export an IPDR/XDR document as XML")]
struct Args {
    /// IPDR/XDR file to decode.
    file: PathBuf,

    /// Write the projection to stdout instead of `<FILE>.xml`.
    #[arg(long)]
    stdout: bool,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();
    let args = Args::parse();

    let bytes = fs::read(&args.file)
        .with_context(|| format!("reading {}", args.file.display()))?;
    let document = ipdrx::decode_document(bytes)
        .with_context(|| format!("decoding {}", args.file.display()))?;
    let xml = document.to_xml();

    if args.stdout {
        println!("{xml}");
    } else {
        let out_path = PathBuf::from(format!("{}.xml", args.file.display()));
        fs::write(&out_path, xml)
            .with_context(|| format!("writing {}", out_path.display()))?;
        println!(
            "Decoded IPDR-XDR file \"{}\" to XML projection: {}",
            args.file.display(),
            out_path.display()
        );
    }
    Ok(())
}
