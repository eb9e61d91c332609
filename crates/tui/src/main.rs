mod config;
mod renderer;

use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use env_logger::Env;
use placeholdr_core::{Dimensions, Generator, export};
use placeholdr_protocol::RenderTheme;

use crate::config::{FileConfig, Overrides, Settings};

#[derive(Parser, Debug)]
#[command(name = "placeholdr", version, about = "Generate placeholder images")]
struct Cli {
    /// JSON config file (defaults to ./placeholdr.json when present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log at debug level
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render one image and write it as PNG
    Generate {
        /// Size as WIDTHxHEIGHT, e.g. 800x600
        size: Dimensions,

        #[command(flatten)]
        render: RenderArgs,

        /// Exact output path instead of <out-dir>/placeholder_WxH.png
        #[arg(short, long, conflicts_with = "out_dir")]
        output: Option<PathBuf>,
    },
    /// Interactive preview in the terminal
    Preview {
        /// Initial size as WIDTHxHEIGHT (default 400x300)
        size: Option<Dimensions>,

        #[command(flatten)]
        render: RenderArgs,
    },
}

#[derive(Args, Debug)]
struct RenderArgs {
    /// light or dark
    #[arg(long)]
    theme: Option<RenderTheme>,

    /// Directory that saved images go to
    #[arg(long)]
    out_dir: Option<PathBuf>,

    /// TrueType/OpenType font for the label
    #[arg(long)]
    font: Option<PathBuf>,
}

impl From<RenderArgs> for Overrides {
    fn from(args: RenderArgs) -> Self {
        Self {
            theme: args.theme,
            out_dir: args.out_dir,
            font: args.font,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Logging to stderr would tear through the alternate screen.
    let quiet = match cli.command {
        Command::Preview { .. } => "warn",
        Command::Generate { .. } => "info",
    };
    let level = if cli.verbose { "debug" } else { quiet };
    env_logger::Builder::from_env(Env::default().default_filter_or(level)).init();

    let file = FileConfig::load(cli.config.as_deref())?;

    match cli.command {
        Command::Generate {
            size,
            render,
            output,
        } => {
            let settings = Settings::resolve(file, render.into());
            let surface = settings.renderer()?.render(size, settings.theme)?;
            let path = match output {
                Some(path) => {
                    export::write_png_to(&surface, &path)?;
                    path
                }
                None => {
                    fs::create_dir_all(&settings.out_dir).with_context(|| {
                        format!("failed to create {}", settings.out_dir.display())
                    })?;
                    export::write_png(&surface, &settings.out_dir)?
                }
            };
            writeln!(io::stdout().lock(), "{}", path.display())?;
        }
        Command::Preview { size, render } => {
            let settings = Settings::resolve(file, render.into());
            let mut generator = Generator::new(settings.renderer()?, settings.theme);
            let size = size.unwrap_or_default();
            generator.set_width(i64::from(size.width()));
            generator.set_height(i64::from(size.height()));
            generator.submit()?;
            renderer::run_preview(&mut generator, &settings.out_dir)?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn generate_parses_size_and_flags() {
        let cli = Cli::try_parse_from([
            "placeholdr", "generate", "800x600", "--theme", "dark", "-v",
        ])
        .expect("parse");
        assert!(cli.verbose);
        let Command::Generate { size, render, .. } = cli.command else {
            panic!("expected generate");
        };
        assert_eq!(size.to_string(), "800x600");
        assert_eq!(render.theme, Some(RenderTheme::Dark));
    }

    #[test]
    fn out_of_range_size_is_rejected_by_parser() {
        assert!(Cli::try_parse_from(["placeholdr", "generate", "3001x10"]).is_err());
        assert!(Cli::try_parse_from(["placeholdr", "generate", "wide"]).is_err());
    }

    #[test]
    fn output_conflicts_with_out_dir() {
        let parsed = Cli::try_parse_from([
            "placeholdr", "generate", "10x10", "-o", "a.png", "--out-dir", "b",
        ]);
        assert!(parsed.is_err());
    }
}
