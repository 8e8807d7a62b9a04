//! htmlshot CLI - render HTML to an image file
//!
//! Reads a document from a file or stdin, converts it through the native
//! backend, and writes the image bytes to a file or stdout.

use std::fs;
use std::io::{self, Read, Write};
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;

use htmlshot::RenderConfig;

/// Convert an HTML document, URL, or fragment to an image.
#[derive(Parser)]
#[command(name = "htmlshot", version, about)]
struct Cli {
    /// HTML file to convert, or `-` for stdin
    input: String,

    /// File the image is written to, or `-` for stdout
    #[arg(short, long, default_value = "-")]
    output: String,

    /// JSON file holding a full render configuration
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Treat the input as a fragment and wrap it into a document first
    #[arg(long)]
    fragment: bool,

    /// Output format such as `png` or `jpeg`
    #[arg(long)]
    format: Option<String>,

    /// Width of the virtual screen, in pixels
    #[arg(long)]
    screen_width: Option<u64>,

    /// Output compression quality, 0 to 100
    #[arg(long)]
    quality: Option<u64>,

    /// Use a transparent background
    #[arg(long)]
    transparent: bool,
}

fn main() {
    let cli = Cli::parse();
    if let Err(err) = run(cli) {
        eprintln!("htmlshot: {err:#}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let config = load_config(&cli)?;
    let input = read_input(&cli.input)?;
    let image = convert(config, &input, cli.fragment)?;
    write_output(&cli.output, &image)
}

/// Config file first, then flag overrides on top
fn load_config(cli: &Cli) -> anyhow::Result<RenderConfig> {
    let mut config = match &cli.config {
        Some(path) => {
            let text = fs::read_to_string(path)
                .with_context(|| format!("could not read config file {}", path.display()))?;
            serde_json::from_str(&text)
                .with_context(|| format!("could not parse config file {}", path.display()))?
        }
        None => RenderConfig::default(),
    };

    if let Some(format) = &cli.format {
        config.format = format.clone();
    }
    if let Some(width) = cli.screen_width {
        config.screen_width = width;
    }
    if let Some(quality) = cli.quality {
        config.quality = quality;
    }
    if cli.transparent {
        config.transparent = true;
    }

    Ok(config)
}

fn read_input(input: &str) -> anyhow::Result<String> {
    if input == "-" {
        let mut text = String::new();
        io::stdin()
            .read_to_string(&mut text)
            .context("could not read stdin")?;
        Ok(text)
    } else {
        fs::read_to_string(input).with_context(|| format!("could not read {input}"))
    }
}

fn write_output(output: &str, image: &[u8]) -> anyhow::Result<()> {
    if output == "-" {
        io::stdout()
            .write_all(image)
            .context("could not write stdout")
    } else {
        fs::write(output, image).with_context(|| format!("could not write {output}"))
    }
}

#[cfg(feature = "native")]
fn convert(config: RenderConfig, input: &str, fragment: bool) -> anyhow::Result<Vec<u8>> {
    let converter = htmlshot::new_converter(config)?;
    let mut image = Vec::new();
    if fragment {
        converter.run_on_fragment(input, &mut image)?;
    } else {
        converter.run(input, &mut image)?;
    }
    Ok(image)
}

#[cfg(not(feature = "native"))]
fn convert(_config: RenderConfig, _input: &str, _fragment: bool) -> anyhow::Result<Vec<u8>> {
    anyhow::bail!("this build has no rendering backend; rebuild with `--features native`")
}
