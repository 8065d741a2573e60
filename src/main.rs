//! pixtext CLI - Render images as colored text grids

use clap::{Parser, ValueEnum};
use pixtext::sample::load_image;
use pixtext::{CssMode, PixtextError, RenderConfig, Renderer, Rendering, TextStyle};
use rayon::prelude::*;
use std::collections::HashSet;
use std::path::{Path, PathBuf};

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Format {
    /// Standalone HTML page
    Html,
    /// Stylesheet only
    Css,
    /// Plain text grid
    Text,
    /// Cells with characters and colors
    Json,
}

impl Format {
    fn extension(self) -> &'static str {
        match self {
            Format::Html => "html",
            Format::Css => "css",
            Format::Text => "txt",
            Format::Json => "json",
        }
    }

    fn write(self, rendering: &Rendering) -> Result<String, PixtextError> {
        Ok(match self {
            Format::Html => rendering.document(),
            Format::Css => rendering.css(),
            Format::Text => rendering.plain_text() + "\n",
            Format::Json => rendering.to_json()?,
        })
    }
}

#[derive(Parser)]
#[command(name = "pixtext", about = "Render images as colored text grids")]
struct Args {
    /// Input image files
    #[arg(required = true)]
    inputs: Vec<PathBuf>,
    /// Text repeated across the grid
    #[arg(short, long, conflicts_with = "text_file")]
    text: Option<String>,
    /// Read the text from a file
    #[arg(long)]
    text_file: Option<PathBuf>,
    /// Grid width in characters
    #[arg(short, long)]
    width: Option<u32>,
    /// Supersampling factor applied before the final resize
    #[arg(short, long)]
    scale_factor: Option<f32>,
    /// Text color policy: transparent, inverted or veiled
    #[arg(long)]
    style: Option<TextStyle>,
    /// Stylesheet layout: per-cell or custom-properties
    #[arg(long)]
    css_mode: Option<CssMode>,
    /// Output format
    #[arg(short, long, value_enum, default_value = "html")]
    format: Format,
    /// Output file, or directory when rendering several inputs
    #[arg(short, long)]
    output: Option<PathBuf>,
    /// JSON config file; flags override its values
    #[arg(short, long)]
    config: Option<PathBuf>,
}

impl Args {
    fn render_config(&self) -> Result<RenderConfig, PixtextError> {
        let mut config = match &self.config {
            Some(path) => RenderConfig::load(path)?,
            None => RenderConfig::default(),
        };
        if let Some(text) = &self.text {
            config.text = text.clone();
        }
        if let Some(path) = &self.text_file {
            config.text = std::fs::read_to_string(path)?;
        }
        if let Some(width) = self.width {
            config.width = width;
        }
        if let Some(scale_factor) = self.scale_factor {
            config.scale_factor = scale_factor;
        }
        if let Some(style) = self.style {
            config.style = style;
        }
        if let Some(mode) = self.css_mode {
            config.css_mode = mode;
        }
        if config.text.trim().is_empty() {
            return Err(PixtextError::InvalidConfig(
                "no text given (use --text, --text-file or a config file)".into(),
            ));
        }
        Ok(config)
    }

    fn destination(&self, input: &Path) -> Option<PathBuf> {
        let output = self.output.as_ref()?;
        if self.inputs.len() == 1 && !output.is_dir() {
            return Some(output.clone());
        }
        let mut name = input.file_stem().unwrap_or(input.as_os_str()).to_os_string();
        name.push(".");
        name.push(self.format.extension());
        Some(output.join(name))
    }

    /// Output path per input, rejecting inputs that would overwrite each other.
    fn destinations(&self) -> Result<Vec<Option<PathBuf>>, PixtextError> {
        let mut seen = HashSet::new();
        self.inputs
            .iter()
            .map(|input| {
                let dest = self.destination(input);
                if let Some(path) = &dest {
                    if !seen.insert(path.clone()) {
                        return Err(PixtextError::InvalidConfig(format!(
                            "{} would overwrite {}, rename one of the inputs",
                            input.display(),
                            path.display()
                        )));
                    }
                }
                Ok(dest)
            })
            .collect()
    }
}

fn render_one(renderer: &Renderer, format: Format, input: &Path, dest: Option<&Path>) -> Result<(), PixtextError> {
    let config = renderer.config();
    let data = load_image(input, config.width, config.scale_factor)?;
    let rendering = renderer.render_pixels(data)?;
    let out = format.write(&rendering)?;

    match dest {
        Some(path) => {
            std::fs::write(path, out)?;
            log::info!("{} -> {}", input.display(), path.display());
        }
        None => print!("{out}"),
    }
    Ok(())
}

fn main() -> Result<(), PixtextError> {
    env_logger::init();
    let args = Args::parse();

    let config = args.render_config()?;
    let renderer = Renderer::new(config)?;

    if args.inputs.len() > 1 {
        match &args.output {
            Some(dir) => std::fs::create_dir_all(dir)?,
            None => {
                return Err(PixtextError::InvalidConfig(
                    "--output directory is required for several inputs".into(),
                ));
            }
        }
    }

    let destinations = args.destinations()?;

    let failures: Vec<_> = args
        .inputs
        .par_iter()
        .zip(&destinations)
        .filter_map(|(input, dest)| {
            render_one(&renderer, args.format, input, dest.as_deref())
                .inspect_err(|e| log::error!("failed to render {}: {e}", input.display()))
                .err()
        })
        .collect();

    if failures.len() > 1 {
        log::error!("{} of {} inputs failed", failures.len(), args.inputs.len());
    }
    match failures.into_iter().next() {
        Some(err) => Err(err),
        None => Ok(()),
    }
}
