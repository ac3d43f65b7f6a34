//! imgsketch — apply the core pixel transforms to image files.

mod config;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::{Args, Parser, Subcommand};
use imgsketch_core::buffer::{BYTE_RANGE_END, UNIT_RANGE_END};
use imgsketch_core::{
    PixelBuffer, color_dodge, invert, load_image, pencil_sketch, rgb_to_gray, save_image,
};
use tracing_subscriber::EnvFilter;

use crate::config::ParamOverrides;

#[derive(Parser, Debug)]
#[command(name = "imgsketch", version, about = "Pixel-level image transforms")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Turn a photograph into a pencil sketch.
    Sketch {
        input: PathBuf,
        #[command(flatten)]
        params: ParamArgs,
        /// Quarter turns applied to landscape input.
        #[arg(long, allow_hyphen_values = true)]
        rotate: Option<i32>,
        #[command(flatten)]
        output: OutputArgs,
    },
    /// Reduce to grayscale with BT.709 luma weights.
    ///
    /// 16-bit and float sources are rescaled to 0..255 by their maximum before saving.
    Gray {
        input: PathBuf,
        #[command(flatten)]
        output: OutputArgs,
    },
    /// Invert around the image's own maximum.
    ///
    /// 16-bit and float sources are rescaled to 0..255 by their maximum before saving.
    Invert {
        input: PathBuf,
        #[command(flatten)]
        output: OutputArgs,
    },
    /// Gaussian blur, rescaled to 0..255.
    Blur {
        input: PathBuf,
        #[command(flatten)]
        params: ParamArgs,
        #[command(flatten)]
        output: OutputArgs,
    },
    /// Color-dodge BACK under FRONT; both are rescaled to 0..1 first.
    Dodge {
        front: PathBuf,
        back: PathBuf,
        #[command(flatten)]
        output: OutputArgs,
    },
}

#[derive(Args, Debug)]
struct ParamArgs {
    /// JSON file with `kernel_size`, `sigma` and `rotate_turns`.
    #[arg(long)]
    params: Option<PathBuf>,
    /// Gaussian kernel side length.
    #[arg(long)]
    kernel_size: Option<usize>,
    /// Gaussian standard deviation.
    #[arg(long)]
    sigma: Option<f64>,
}

#[derive(Args, Debug)]
struct OutputArgs {
    /// Directory the result is written into.
    #[arg(long, short = 'o', default_value = ".")]
    output_dir: PathBuf,
    /// Output file name; the extension selects the format.
    #[arg(long, short = 'n')]
    name: String,
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();
    run(cli.command)
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env(config::LOG_ENV)
        .unwrap_or_else(|_| EnvFilter::new(config::DEFAULT_LOG_FILTER));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(command: Command) -> Result<()> {
    let (result, output) = match command {
        Command::Sketch {
            input,
            params,
            rotate,
            output,
        } => {
            let params = config::resolve_params(params.params.as_deref(), params.overrides(rotate))?;
            tracing::info!("sketching {} with {params:?}", input.display());
            (pencil_sketch(&load(&input)?, &params)?, output)
        }
        Command::Gray { input, output } => (rgb_to_gray(&load(&input)?)?, output),
        Command::Invert { input, output } => (invert(&load(&input)?), output),
        Command::Blur {
            input,
            params,
            output,
        } => {
            let params = config::resolve_params(params.params.as_deref(), params.overrides(None))?;
            (params.blur.apply(&load(&input)?)?, output)
        }
        Command::Dodge {
            front,
            back,
            output,
        } => {
            let front = load(&front)?.normalize(UNIT_RANGE_END)?;
            let back = load(&back)?.normalize(UNIT_RANGE_END)?;
            (color_dodge(&front, &back)?, output)
        }
    };

    let result = fit_byte_range(result)?;
    if !save_image(&result, &output.output_dir, &output.name) {
        bail!(
            "could not write {}",
            output.output_dir.join(&output.name).display()
        );
    }
    Ok(())
}

impl ParamArgs {
    fn overrides(&self, rotate_turns: Option<i32>) -> ParamOverrides {
        ParamOverrides {
            kernel_size: self.kernel_size,
            sigma: self.sigma,
            rotate_turns,
        }
    }
}

/// Rescale a buffer whose maximum exceeds 255 so the 8-bit encoder does not saturate it.
fn fit_byte_range(buffer: PixelBuffer) -> Result<PixelBuffer> {
    if buffer.max_value() > BYTE_RANGE_END {
        tracing::info!("rescaling {buffer} from max {} to {BYTE_RANGE_END}", buffer.max_value());
        return Ok(buffer.normalize(BYTE_RANGE_END)?);
    }
    Ok(buffer)
}

fn load(path: &Path) -> Result<PixelBuffer> {
    load_image(path).with_context(|| format!("could not load {}", path.display()))
}
