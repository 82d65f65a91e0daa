//! Dalton CLI: runs the correction engine over JSON documents.
//!
//! A document is a JSON array of styled elements:
//!
//! ```json
//! [{ "id": "title", "color": "#336699" }, { "id": "body", "color": "rgb(20, 20, 20)" }]
//! ```

mod document;

use std::path::{Path, PathBuf};

use anyhow::{Context, bail};
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use dalton_core::{
    ColorblindnessType, CorrectionConfig, CorrectionPipeline, CorrectionStrategy, Matrix,
    OutputFormat, ReadyEvent, parse_color,
};

/// Environment variable holding the default output format.
const OUTPUT_ENV: &str = "DALTON_OUTPUT";

#[derive(Parser)]
#[command(name = "dalton")]
#[command(about = "Recolor elements to compensate for, or simulate, color-vision deficiency")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Correct every element of a JSON document
    Correct {
        /// Input document (JSON array of elements)
        input: PathBuf,

        /// Write the corrected document here instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,

        #[command(flatten)]
        strategy: StrategyArgs,
    },
    /// Correct a single color and print the result
    Color {
        /// Color text, e.g. "#336699", "rgb(10,20,30)" or "tomato"
        value: String,

        #[command(flatten)]
        strategy: StrategyArgs,
    },
    /// Print the matrix of every colorblindness profile
    Profiles {
        /// Show simulation matrices instead of correction matrices
        #[arg(long)]
        simulation: bool,
    },
}

#[derive(Args)]
struct StrategyArgs {
    /// JSON config file with "strategy" and optional "output"
    #[arg(short, long, conflicts_with_all = ["brightness", "colorblind", "simulate"])]
    config: Option<PathBuf>,

    /// Brightness factor in [-1, 1]; negative darkens, positive lightens
    #[arg(long, allow_negative_numbers = true, conflicts_with_all = ["colorblind", "simulate"])]
    brightness: Option<f64>,

    /// Correct for a deficiency: deuteranopia, protanopia or tritanopia
    #[arg(long, conflicts_with = "simulate")]
    colorblind: Option<String>,

    /// Simulate a deficiency: deuteranopia, protanopia or tritanopia
    #[arg(long)]
    simulate: Option<String>,

    /// Output format: "hex" or "rgba" (default from DALTON_OUTPUT, else hex)
    #[arg(short, long)]
    format: Option<String>,
}

impl StrategyArgs {
    fn resolve(&self) -> anyhow::Result<CorrectionConfig> {
        let mut config = match &self.config {
            Some(path) => CorrectionConfig::load(path)
                .with_context(|| format!("loading config {}", path.display()))?,
            None => CorrectionConfig::new(self.strategy()?, default_output()?),
        };
        if let Some(format) = &self.format {
            config.output = format.parse()?;
        }
        Ok(config)
    }

    fn strategy(&self) -> anyhow::Result<CorrectionStrategy> {
        if let Some(factor) = self.brightness {
            return Ok(CorrectionStrategy::brightness(factor)?);
        }
        if let Some(name) = &self.colorblind {
            return Ok(CorrectionStrategy::colorblind(name.parse()?));
        }
        if let Some(name) = &self.simulate {
            return Ok(CorrectionStrategy::simulate(name.parse()?));
        }
        bail!("no correction selected: pass --config, --brightness, --colorblind or --simulate")
    }
}

fn default_output() -> anyhow::Result<OutputFormat> {
    match std::env::var(OUTPUT_ENV) {
        Ok(value) => value
            .parse::<OutputFormat>()
            .with_context(|| format!("reading {OUTPUT_ENV}")),
        Err(_) => Ok(OutputFormat::default()),
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "dalton=info".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .without_time()
                .with_writer(std::io::stderr),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Correct {
            input,
            output,
            strategy,
        } => run_correct_command(&input, output.as_deref(), &strategy),
        Commands::Color { value, strategy } => run_color_command(&value, &strategy),
        Commands::Profiles { simulation } => {
            run_profiles_command(simulation);
            Ok(())
        }
    }
}

/// Correct a whole document, triggering once per ready event like a page load.
fn run_correct_command(
    input: &Path,
    output: Option<&Path>,
    strategy: &StrategyArgs,
) -> anyhow::Result<()> {
    let config = strategy.resolve()?;
    let mut elements = document::load(input)?;
    let mut pipeline = CorrectionPipeline::from_config(&config)?;

    for event in [ReadyEvent::DomContentLoaded, ReadyEvent::Load] {
        let report = pipeline.on_ready(event, &mut elements)?;
        for failure in &report.failures {
            tracing::warn!(
                id = %failure.id,
                position = failure.position,
                "{}",
                failure.error
            );
        }
    }

    document::write(&elements, output)
}

fn run_color_command(value: &str, strategy: &StrategyArgs) -> anyhow::Result<()> {
    let config = strategy.resolve()?;
    let color = parse_color(value)?;
    let corrected = config.strategy.apply(color)?;
    println!("{}", config.output.render(&corrected));
    Ok(())
}

fn run_profiles_command(simulation: bool) {
    for kind in ColorblindnessType::all() {
        let matrix = if simulation {
            kind.simulation_matrix()
        } else {
            kind.correction_matrix()
        };
        println!("{}: {}", kind.name(), kind.label());
        print!("{}", format_matrix(matrix));
    }
}

fn format_matrix(matrix: &Matrix) -> String {
    let mut out = String::new();
    for row in matrix.as_slice().chunks(matrix.cols()) {
        let cells: Vec<String> = row.iter().map(|v| format!("{v:>10.6}")).collect();
        out.push_str(&format!("  [{} ]\n", cells.join(" ")));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(
        brightness: Option<f64>,
        colorblind: Option<&str>,
        format: Option<&str>,
    ) -> StrategyArgs {
        StrategyArgs {
            config: None,
            brightness,
            colorblind: colorblind.map(str::to_string),
            simulate: None,
            format: format.map(str::to_string),
        }
    }

    #[test]
    fn test_cli_definition_is_consistent() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn test_resolve_flags() {
        let config = args(None, Some("protanopia"), Some("rgba"))
            .resolve()
            .unwrap();
        assert_eq!(
            config.strategy,
            CorrectionStrategy::colorblind(ColorblindnessType::Protanopia)
        );
        assert_eq!(config.output, OutputFormat::Rgba);

        assert!(args(Some(2.0), None, Some("hex")).resolve().is_err());
        assert!(
            args(None, Some("monochromacy"), Some("hex"))
                .resolve()
                .is_err()
        );
        assert!(args(None, None, Some("hex")).resolve().is_err());
    }

    #[test]
    fn test_parse_negative_brightness() {
        let cli =
            Cli::try_parse_from(["dalton", "color", "#ff0000", "--brightness", "-1"]).unwrap();
        let Commands::Color { strategy, .. } = cli.command else {
            panic!("expected color subcommand");
        };
        assert_eq!(strategy.brightness, Some(-1.0));
    }

    #[test]
    fn test_conflicting_strategies_are_rejected() {
        let result = Cli::try_parse_from([
            "dalton",
            "color",
            "#ff0000",
            "--brightness",
            "0.5",
            "--colorblind",
            "tritanopia",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_format_matrix() {
        let text = format_matrix(&Matrix::from_rows([[1.0, 0.0], [0.5, -0.25]]));
        assert_eq!(
            text,
            "  [  1.000000   0.000000 ]\n  [  0.500000  -0.250000 ]\n"
        );
    }
}
