use anyhow::{Context, Result};
use app_icons::{
    distribute::{resize_and_distribute, DistributionPlan},
    gradient_icon::{generate_gradient_icons, parse_css_color, IconStyle, DEFAULT_OUTPUT_DIR},
};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[clap(
    name = "app-icons",
    about = "Generate and distribute the application icons used for packaging"
)]
struct Args {
    #[clap(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Draw the gradient "K" icon and write icon.png, 128x128@2x.png, 128x128.png and 32x32.png.
    Generate {
        /// Output directory. Must already exist.
        #[clap(short, long, value_name = "DIR", default_value = DEFAULT_OUTPUT_DIR)]
        output: PathBuf,

        /// Gradient color at the center (CSS color format)
        #[clap(long, value_name = "COLOR")]
        center_color: Option<String>,

        /// Gradient color at the edges (CSS color format)
        #[clap(long, value_name = "COLOR")]
        edge_color: Option<String>,
    },

    /// Resize a source image to the standard icon sizes and copy the results into place.
    Distribute {
        /// Path to the source image, relative to the working directory.
        /// Defaults to the plan's source, which is relative to --root.
        #[clap(value_name = "SOURCE")]
        source: Option<PathBuf>,

        /// Directory the plan's relative paths are resolved against.
        #[clap(short, long, value_name = "DIR", default_value = ".")]
        root: PathBuf,

        /// JSON file describing sizes and copy destinations.
        #[clap(long, value_name = "FILE")]
        plan: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args = Args::parse();
    log::debug!("{:?}", args);

    match args.command {
        Command::Generate {
            output,
            center_color,
            edge_color,
        } => {
            let mut style = IconStyle::default();
            if let Some(color) = center_color {
                style.center = parse_css_color(&color)?;
            }
            if let Some(color) = edge_color {
                style.edge = parse_css_color(&color)?;
            }
            generate_gradient_icons(&output, &style)?;
        }
        Command::Distribute { source, root, plan } => {
            let plan = match plan {
                Some(path) => DistributionPlan::from_file(&path)?,
                None => DistributionPlan::default(),
            };
            let source = match source {
                Some(path) => std::env::current_dir()
                    .context("Can't determine the working directory")?
                    .join(path),
                None => plan.source.clone(),
            };
            resize_and_distribute(&root, &source, &plan)?;
            println!("✓ Icon integrated successfully");
        }
    }

    Ok(())
}
