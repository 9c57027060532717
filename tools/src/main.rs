use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use glob::Pattern;
use tools::{
    decode_snapshot_json, encode_snapshot_json, format_decode_pretty, format_hash,
    inspect_snapshot, InspectReport, LayoutStatus,
};

#[derive(Parser)]
#[command(
    name = "arena-tools",
    version,
    about = "Arena snapshot inspection, decoding and encoding tools"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Inspect blob sizes against a schema.
    Inspect {
        /// Path to a blob file or a directory of blobs.
        blob_path: PathBuf,
        /// Optional schema JSON to compare against.
        #[arg(long)]
        schema: Option<PathBuf>,
        /// Optional glob filter when inspecting a directory.
        #[arg(long)]
        glob: Option<String>,
        /// Sort inspected blobs.
        #[arg(long, value_enum)]
        sort: Option<InspectSort>,
        /// Limit the number of inspected blobs (after sorting).
        #[arg(long)]
        limit: Option<usize>,
    },
    /// Decode a blob into per-field values.
    Decode {
        /// Path to the blob bytes.
        blob_file: PathBuf,
        /// Schema JSON describing the blob layout.
        #[arg(long)]
        schema: PathBuf,
        /// Output format.
        #[arg(long, value_enum, default_value_t = DecodeFormat::Json)]
        format: DecodeFormat,
    },
    /// Encode a blob from a JSON object of field values.
    Encode {
        /// JSON file mapping field names to values or arrays.
        values_file: PathBuf,
        /// Schema JSON describing the blob layout.
        #[arg(long)]
        schema: PathBuf,
        /// Where to write the blob.
        #[arg(long)]
        out: PathBuf,
    },
    /// Print a schema's hash and encoded size.
    Hash {
        /// Schema JSON.
        #[arg(long)]
        schema: PathBuf,
    },
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum InspectSort {
    Size,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum DecodeFormat {
    Json,
    Pretty,
}

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"));

    let json = matches!(std::env::var("LOG_FORMAT").as_deref(), Ok("json"));
    if json {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_target(false)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_target(false)
            .compact()
            .init();
    }
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();
    let limits = codec::CodecLimits::default();
    match cli.command {
        Command::Inspect {
            blob_path,
            schema,
            glob,
            sort,
            limit,
        } => {
            let schema = schema
                .as_deref()
                .map(load_schema)
                .transpose()
                .context("load schema")?;
            if blob_path.is_dir() {
                let entries = collect_blob_entries(&blob_path, glob.as_deref())?;
                let mut entries = maybe_sort_entries(entries, sort);
                let limit = limit.or(sort.map(|InspectSort::Size| 10));
                if let Some(limit) = limit {
                    entries.truncate(limit);
                }
                for entry in entries {
                    let bytes = fs::read(&entry.path)
                        .with_context(|| format!("read blob {}", entry.path.display()))?;
                    println!("== {} ({} bytes) ==", entry.path.display(), entry.size);
                    print_inspect_report(&inspect_snapshot(&bytes, schema.as_ref()));
                }
            } else {
                let bytes = fs::read(&blob_path)
                    .with_context(|| format!("read blob {}", blob_path.display()))?;
                print_inspect_report(&inspect_snapshot(&bytes, schema.as_ref()));
            }
        }
        Command::Decode {
            blob_file,
            schema,
            format,
        } => {
            let bytes = fs::read(&blob_file)
                .with_context(|| format!("read blob {}", blob_file.display()))?;
            let schema = load_schema(&schema).context("load schema")?;
            let output = decode_snapshot_json(&bytes, &schema, &limits)?;
            match format {
                DecodeFormat::Json => {
                    let json = serde_json::to_string_pretty(&output).context("serialize json")?;
                    println!("{json}");
                }
                DecodeFormat::Pretty => {
                    print!("{}", format_decode_pretty(&output));
                }
            }
        }
        Command::Encode {
            values_file,
            schema,
            out,
        } => {
            let schema = load_schema(&schema).context("load schema")?;
            let contents = fs::read_to_string(&values_file)
                .with_context(|| format!("read values {}", values_file.display()))?;
            let values: serde_json::Value =
                serde_json::from_str(&contents).context("parse values json")?;
            let bytes = encode_snapshot_json(&values, &schema, &limits)?;
            fs::write(&out, &bytes).with_context(|| format!("write {}", out.display()))?;
            println!("wrote {} bytes to {}", bytes.len(), out.display());
        }
        Command::Hash { schema } => {
            let schema = load_schema(&schema).context("load schema")?;
            println!("schema_hash: {}", format_hash(schema::schema_hash(&schema)));
            println!(
                "fields: {} values: {} encoded_size: {} bytes",
                schema.fields.len(),
                schema.value_count(),
                schema.encoded_size()
            );
        }
    }
    Ok(())
}

fn load_schema(path: &Path) -> Result<schema::Schema> {
    let contents =
        fs::read_to_string(path).with_context(|| format!("read schema {}", path.display()))?;
    let schema: schema::Schema = serde_json::from_str(&contents).context("parse schema json")?;
    schema
        .validate()
        .map_err(|err| anyhow::anyhow!("schema validation failed: {err}"))?;
    Ok(schema)
}

struct BlobEntry {
    path: PathBuf,
    size: u64,
}

fn collect_blob_entries(dir: &Path, glob: Option<&str>) -> Result<Vec<BlobEntry>> {
    let mut entries = Vec::new();
    let pattern = match glob {
        Some(value) => Some(Pattern::new(value).context("invalid glob pattern")?),
        None => None,
    };

    for entry in fs::read_dir(dir).with_context(|| format!("read dir {}", dir.display()))? {
        let entry = entry?;
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        if let Some(pattern) = &pattern {
            let matches_path = pattern.matches_path(&path);
            let matches_name = path
                .file_name()
                .and_then(|name| name.to_str())
                .is_some_and(|name| pattern.matches(name));
            if !matches_path && !matches_name {
                continue;
            }
        }
        let size = entry.metadata()?.len();
        entries.push(BlobEntry { path, size });
    }
    entries.sort_by(|a, b| a.path.cmp(&b.path));
    Ok(entries)
}

fn maybe_sort_entries(mut entries: Vec<BlobEntry>, sort: Option<InspectSort>) -> Vec<BlobEntry> {
    if let Some(InspectSort::Size) = sort {
        entries.sort_by(|a, b| b.size.cmp(&a.size).then_with(|| a.path.cmp(&b.path)));
    }
    entries
}

fn print_inspect_report(report: &InspectReport) {
    println!("bytes: {}", report.bytes);
    let Some(layout) = &report.layout else {
        println!("schema: none (pass --schema to check the layout)");
        return;
    };
    println!(
        "schema_hash: {} fields: {} values: {}",
        format_hash(layout.schema_hash),
        layout.fields,
        layout.values
    );
    println!("schema size: {} bytes", layout.expected_bytes);
    match layout.status {
        LayoutStatus::Exact => println!("layout: exact"),
        LayoutStatus::Trailing(extra) => println!("layout: {extra} trailing bytes"),
        LayoutStatus::Short(missing) => println!("layout: {missing} bytes short"),
    }
}
