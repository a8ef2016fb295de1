use std::io::{Cursor, Read, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use zip::ZipArchive;

use crate::compare::normalize_xml;
use crate::decode::DecodeOptions;
use crate::encode::EncodeOptions;
use crate::openxml::NS_MAIN;
use crate::pivots::{PivotTableDefinition, DEFAULT_PIVOT_TABLE_PART};
use crate::sink::DecodeNotice;

#[derive(Parser)]
#[command(about = "Decode, validate and re-encode SpreadsheetML pivot table definitions.")]
pub struct Args {
    #[command(subcommand)]
    command: Command,

    /// Print decode notices (skipped and repeated elements) to stderr.
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Command {
    /// Decode and validate a pivot table definition.
    Check(InputArgs),
    /// Decode and re-encode a pivot table definition.
    Roundtrip(RoundtripArgs),
    /// Print the decoded element tree as JSON.
    Dump(InputArgs),
}

#[derive(clap::Args)]
struct InputArgs {
    /// A raw `pivotTable*.xml` part, or an `.xlsx`/`.xlsm` package.
    input: PathBuf,

    /// Part to read when the input is a package.
    #[arg(long, default_value = DEFAULT_PIVOT_TABLE_PART)]
    part: String,
}

#[derive(clap::Args)]
struct RoundtripArgs {
    #[command(flatten)]
    input: InputArgs,

    /// Write the encoded part here instead of stdout.
    #[arg(short, long, value_name = "PATH")]
    output: Option<PathBuf>,

    /// Namespace prefix for SpreadsheetML elements (e.g. `x`).
    #[arg(long)]
    prefix: Option<String>,

    /// Indent nested elements by this many spaces.
    #[arg(long)]
    indent: Option<usize>,

    /// Re-decode the output and report whether it matches the input.
    #[arg(long)]
    compare: bool,
}

pub fn run() -> Result<()> {
    let args = Args::parse();
    run_with_args(args)
}

pub fn run_with_args(args: Args) -> Result<()> {
    let stdout = std::io::stdout();
    let stderr = std::io::stderr();
    let ok = execute(&args, &mut stdout.lock(), &mut stderr.lock())?;
    if !ok {
        std::process::exit(1);
    }
    Ok(())
}

/// Run one command. Returns `false` when the command completed but the part failed the check.
fn execute(args: &Args, out: &mut dyn Write, diag: &mut dyn Write) -> Result<bool> {
    match &args.command {
        Command::Check(input) => {
            let (label, _, pivot) = load(input, args.verbose, diag)?;
            match pivot.validate() {
                Ok(()) => {
                    writeln!(out, "{label}: ok")?;
                    write_summary(out, &pivot)?;
                    Ok(true)
                }
                Err(err) => {
                    writeln!(out, "{label}: invalid: {err}")?;
                    Ok(false)
                }
            }
        }
        Command::Roundtrip(roundtrip) => {
            let (label, original, pivot) = load(&roundtrip.input, args.verbose, diag)?;
            let options = EncodeOptions {
                xml_declaration: true,
                indent: roundtrip.indent,
                prefix: roundtrip.prefix.clone(),
            };
            let encoded = pivot
                .to_xml(&options)
                .with_context(|| format!("encode {label}"))?;

            match &roundtrip.output {
                Some(path) => std::fs::write(path, &encoded)
                    .with_context(|| format!("write {}", path.display()))?,
                None => {
                    out.write_all(&encoded)?;
                    out.write_all(b"\n")?;
                }
            }

            if !roundtrip.compare {
                return Ok(true);
            }

            let reparsed = PivotTableDefinition::decode_with(
                &pivot.path,
                &encoded,
                &decode_options(),
                &mut Vec::<DecodeNotice>::new(),
            )
            .with_context(|| format!("re-decode encoded {label}"))?;
            let stable = reparsed == pivot;
            let identical_xml = normalize_xml(&original).ok() == normalize_xml(&encoded).ok();

            writeln!(diag, "{label}: decoded tree {}", if stable { "unchanged" } else { "CHANGED" })?;
            writeln!(
                diag,
                "{label}: xml {}",
                if identical_xml {
                    "semantically identical"
                } else {
                    "differs (canonical values, dropped unsupported elements)"
                }
            )?;
            Ok(stable)
        }
        Command::Dump(input) => {
            let (_, _, pivot) = load(input, args.verbose, diag)?;
            serde_json::to_writer_pretty(&mut *out, pivot.as_element())?;
            out.write_all(b"\n")?;
            Ok(true)
        }
    }
}

fn decode_options() -> DecodeOptions {
    DecodeOptions {
        default_namespace: Some(NS_MAIN),
    }
}

fn load(
    input: &InputArgs,
    verbose: bool,
    diag: &mut dyn Write,
) -> Result<(String, Vec<u8>, PivotTableDefinition)> {
    let (label, bytes) = read_input(&input.input, &input.part)?;
    let mut notices: Vec<DecodeNotice> = Vec::new();
    let pivot = PivotTableDefinition::decode_with(
        &normalize_part_name(&input.part),
        &bytes,
        &decode_options(),
        &mut notices,
    )
    .with_context(|| format!("decode {label}"))?;

    for notice in &notices {
        log::debug!("{label}: {notice}");
        if verbose {
            writeln!(diag, "{label}: {notice}")?;
        }
    }
    Ok((label, bytes, pivot))
}

fn write_summary(out: &mut dyn Write, pivot: &PivotTableDefinition) -> Result<()> {
    writeln!(out, "  name: {}", pivot.name().unwrap_or("(none)"))?;
    match pivot.cache_id() {
        Some(cache_id) => writeln!(out, "  cacheId: {cache_id}")?,
        None => writeln!(out, "  cacheId: (none)")?,
    }
    writeln!(out, "  location: {}", pivot.location_ref().unwrap_or("(none)"))?;
    writeln!(out, "  pivot fields: {}", pivot.field_names().len())?;
    writeln!(out, "  data fields: {}", pivot.data_field_count())?;
    Ok(())
}

/// Read `path` as a raw XML part, or extract `part` from it when it is a ZIP package.
///
/// Returns a display label along with the part bytes.
pub fn read_input(path: &Path, part: &str) -> Result<(String, Vec<u8>)> {
    let bytes = std::fs::read(path).with_context(|| format!("read {}", path.display()))?;
    if !bytes.starts_with(b"PK\x03\x04") {
        return Ok((path.display().to_string(), bytes));
    }

    let part = normalize_part_name(part);
    let mut zip = ZipArchive::new(Cursor::new(bytes)).context("parse zip archive")?;
    let mut file = zip
        .by_name(&part)
        .with_context(|| format!("{} has no part {part}", path.display()))?;
    let mut buf = Vec::new();
    file.read_to_end(&mut buf)
        .with_context(|| format!("read part {part}"))?;
    Ok((format!("{}!{part}", path.display()), buf))
}

fn normalize_part_name(part: &str) -> String {
    part.trim().replace('\\', "/").trim_start_matches('/').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;
    use zip::write::SimpleFileOptions;
    use zip::ZipWriter;

    const PART: &str = r#"<pivotTableDefinition xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main" name="P" cacheId="2" dataCaption="Values"><location ref="A3:B9" firstHeaderRow="1" firstDataRow="1" firstDataCol="1"/><mystery/></pivotTableDefinition>"#;

    fn args(argv: &[&str]) -> Args {
        Args::try_parse_from(std::iter::once("sml-codec").chain(argv.iter().copied())).unwrap()
    }

    fn run_capture(argv: &[&str]) -> (bool, String, String) {
        let mut out: Vec<u8> = Vec::new();
        let mut diag: Vec<u8> = Vec::new();
        let ok = execute(&args(argv), &mut out, &mut diag).unwrap();
        (
            ok,
            String::from_utf8(out).unwrap(),
            String::from_utf8(diag).unwrap(),
        )
    }

    #[test]
    fn reads_parts_from_raw_files_and_packages() {
        let dir = tempfile::tempdir().unwrap();

        let raw = dir.path().join("pivotTable1.xml");
        std::fs::write(&raw, PART).unwrap();
        let (label, bytes) = read_input(&raw, DEFAULT_PIVOT_TABLE_PART).unwrap();
        assert_eq!(label, raw.display().to_string());
        assert_eq!(bytes, PART.as_bytes());

        let package = dir.path().join("book.xlsx");
        let mut zip = ZipWriter::new(std::fs::File::create(&package).unwrap());
        zip.start_file("xl/pivotTables/pivotTable2.xml", SimpleFileOptions::default())
            .unwrap();
        zip.write_all(PART.as_bytes()).unwrap();
        zip.finish().unwrap();

        let (label, bytes) = read_input(&package, "/xl/pivotTables/pivotTable2.xml").unwrap();
        assert!(label.ends_with("!xl/pivotTables/pivotTable2.xml"), "{label}");
        assert_eq!(bytes, PART.as_bytes());

        assert!(read_input(&package, DEFAULT_PIVOT_TABLE_PART).is_err());
    }

    #[test]
    fn check_reports_summary_and_notices() {
        let dir = tempfile::tempdir().unwrap();
        let raw = dir.path().join("pivotTable1.xml");
        std::fs::write(&raw, PART).unwrap();
        let raw = raw.to_str().unwrap();

        let (ok, out, diag) = run_capture(&["check", raw, "-v"]);
        assert!(ok);
        assert!(out.contains(": ok\n"), "{out}");
        assert!(out.contains("  location: A3:B9\n"), "{out}");
        assert!(diag.contains("skipping unsupported element on CT_pivotTableDefinition"), "{diag}");

        let (_, _, diag) = run_capture(&["check", raw]);
        assert_eq!(diag, "");
    }

    #[test]
    fn check_fails_on_missing_required_fields() {
        let dir = tempfile::tempdir().unwrap();
        let raw = dir.path().join("pivotTable1.xml");
        std::fs::write(&raw, PART.replace(r#" cacheId="2""#, "")).unwrap();

        let (ok, out, _) = run_capture(&["check", raw.to_str().unwrap()]);
        assert!(!ok);
        assert!(
            out.contains("invalid: pivotTableDefinition/cacheId is a mandatory field"),
            "{out}"
        );
    }

    #[test]
    fn roundtrip_writes_output_and_compares() {
        let dir = tempfile::tempdir().unwrap();
        let raw = dir.path().join("pivotTable1.xml");
        std::fs::write(&raw, PART).unwrap();
        let output = dir.path().join("out.xml");

        let (ok, out, diag) = run_capture(&[
            "roundtrip",
            raw.to_str().unwrap(),
            "--output",
            output.to_str().unwrap(),
            "--prefix",
            "x",
            "--compare",
        ]);
        assert!(ok);
        assert_eq!(out, "");
        assert!(diag.contains("decoded tree unchanged"), "{diag}");
        // `<mystery/>` is dropped on decode.
        assert!(diag.contains("xml differs"), "{diag}");

        let written = std::fs::read_to_string(&output).unwrap();
        assert!(written.contains("<x:location "), "{written}");
    }

    #[test]
    fn dump_prints_json() {
        let dir = tempfile::tempdir().unwrap();
        let raw = dir.path().join("pivotTable1.xml");
        std::fs::write(&raw, PART).unwrap();

        let (ok, out, _) = run_capture(&["dump", raw.to_str().unwrap()]);
        assert!(ok);
        let json: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(json["element"], "pivotTableDefinition");
        assert_eq!(json["attributes"]["cacheId"], 2);
        assert_eq!(json["children"]["location"]["attributes"]["ref"], "A3:B9");
    }
}
