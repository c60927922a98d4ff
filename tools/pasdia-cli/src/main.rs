use std::fs::File;
use std::io::{self, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::Parser;
use pasdia_cli::config::{
    Platform, RenderConfig, RowSource, DEFAULT_DEPTEXT_OPTION, DEFAULT_DEP_OPTION, DEFAULT_DOC_CLASS,
};
use pasdia_cli::render::LatexFormatter;
use pasdia_cli::{convert, write_pas_json};
use tracing::Level;

#[derive(Parser)]
#[command(
    author,
    version,
    about = "Draws CaboCha dependency trees with predicate-argument links as tikz-dependency LaTeX"
)]
struct Cli {
    /// [INPUT] OUTPUT. Input is read from stdin when omitted or `-`.
    #[arg(value_name = "PATHS", num_args = 1..=2, required = true)]
    paths: Vec<PathBuf>,

    /// The options of documentclass
    #[arg(long = "doc-option", value_name = "CLASS", default_value = DEFAULT_DOC_CLASS)]
    doc_option: String,

    /// Japanese font (defaults to a platform-specific font)
    #[arg(long, value_name = "NAME", env = "PASDIA_FONT")]
    font: Option<String>,

    /// The option of the dependency environment
    #[arg(long = "dep-option", value_name = "OPTS", default_value = DEFAULT_DEP_OPTION)]
    dep_option: String,

    /// The option of the deptext environment
    #[arg(long = "deptxt-option", value_name = "OPTS", default_value = DEFAULT_DEPTEXT_OPTION)]
    deptxt_option: String,

    /// Cells of the deptext row
    #[arg(long, value_enum, default_value_t = RowSource::Segments)]
    row: RowSource,

    /// Also dump PAS summaries and edges as JSON
    #[arg(long = "pas-json", value_name = "FILE")]
    pas_json: Option<PathBuf>,

    /// Debug logging
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    fn io_paths(&self) -> anyhow::Result<(Option<&Path>, &Path)> {
        let (output, rest) = self.paths.split_last().context("missing OUTPUT path")?;
        let input = rest.first().filter(|p| p.as_os_str() != "-");
        Ok((input.map(PathBuf::as_path), output.as_path()))
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_max_level(if cli.verbose { Level::DEBUG } else { Level::INFO })
        .init();

    let platform = Platform::current();
    let config = RenderConfig {
        doc_class: cli.doc_option.clone(),
        font: cli.font.clone().unwrap_or_else(|| platform.default_font().to_string()),
        dep_option: cli.dep_option.clone(),
        deptext_option: cli.deptxt_option.clone(),
        row: cli.row,
    };
    tracing::debug!(?platform, font = %config.font, "render config");
    let formatter = LatexFormatter::new(config);

    let (input, output) = cli.io_paths()?;

    // Parse everything before touching the output file
    let mut buffer = Vec::new();
    let rendered = match input {
        Some(path) => {
            tracing::info!(path = %path.display(), "reading");
            let file = File::open(path).with_context(|| format!("Failed to open {}", path.display()))?;
            convert(BufReader::new(file), &mut buffer, &formatter)?
        }
        None => {
            tracing::info!("reading stdin");
            convert(io::stdin().lock(), &mut buffer, &formatter)?
        }
    };

    let file = File::create(output).with_context(|| format!("Failed to create {}", output.display()))?;
    let mut writer = BufWriter::new(file);
    writer.write_all(&buffer)?;
    writer.flush()?;
    tracing::info!(path = %output.display(), sentences = rendered.len(), "wrote LaTeX");

    if let Some(path) = &cli.pas_json {
        let file = File::create(path).with_context(|| format!("Failed to create {}", path.display()))?;
        write_pas_json(BufWriter::new(file), &rendered)?;
        tracing::info!(path = %path.display(), "wrote PAS summary");
    }

    Ok(())
}
