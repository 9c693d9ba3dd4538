use std::io;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use clap::{Args, Parser, Subcommand};
use sheet_lab::explain::{self, ExplanationRequest, ExplanationTask, RuleBasedExplainer};
use sheet_lab::format::format_times_ten;
use sheet_lab::init_config::LabFile;
use sheet_lab::parameters::{Field, ParameterSet};
use sheet_lab::plotting::analysis::Trend;
use sheet_lab::plotting::export::{self, ExportFormat};
use sheet_lab::plotting::{SweepSeries, SweepSpec};
use sheet_lab::projection::{hex, ForceKind, Scene};
use sheet_lab::readout::{ControlLabels, Readout};
use sheet_lab::{physics, LabError};

/// Charged ball on a string next to an infinite charged sheet
#[derive(Parser)]
#[command(name = "sheet_lab", version)]
struct Cli {
    /// Lab file to load (defaults to ./lab.toml when present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(flatten)]
    overrides: Overrides,

    #[command(subcommand)]
    command: Command,
}

/// Parameter overrides in SI units, applied on top of the lab file
#[derive(Args)]
struct Overrides {
    /// Surface charge density σ (C/m²)
    #[arg(long, global = true, allow_hyphen_values = true)]
    sigma: Option<f64>,
    /// Charge of the first ball (C)
    #[arg(long, global = true, allow_hyphen_values = true)]
    q1: Option<f64>,
    /// Mass of the ball (kg)
    #[arg(long, global = true, allow_hyphen_values = true)]
    mass: Option<f64>,
    /// String length (m)
    #[arg(long, global = true)]
    length: Option<f64>,
    /// Charge of the second ball (C)
    #[arg(long, global = true, allow_hyphen_values = true)]
    q2: Option<f64>,
    /// Model and draw the second ball (`--second-ball=false` turns it off)
    #[arg(
        long,
        global = true,
        num_args = 0..=1,
        require_equals = true,
        default_missing_value = "true"
    )]
    second_ball: Option<bool>,
}

impl Overrides {
    fn apply(&self, params: &ParameterSet) -> ParameterSet {
        let mut next = *params;
        for (field, value) in [
            (Field::SurfaceChargeDensity, self.sigma),
            (Field::PrimaryCharge, self.q1),
            (Field::Mass, self.mass),
            (Field::StringLength, self.length),
            (Field::SecondaryCharge, self.q2),
        ] {
            if let Some(value) = value {
                next = next.with_field(field, value);
            }
        }
        if let Some(enabled) = self.second_ball {
            next.second_ball_enabled = enabled;
        }
        next
    }
}

#[derive(Subcommand)]
enum Command {
    /// Solve the equilibrium and print the readout
    Solve {
        /// Print the result sets as JSON
        #[arg(long)]
        json: bool,
    },
    /// Sweep one parameter and print or save the trend
    Sweep {
        /// Field to vary (sigma, q1, mass, length, q2 or the full names)
        #[arg(long)]
        field: Option<Field>,
        #[arg(long, allow_hyphen_values = true)]
        start: Option<f64>,
        #[arg(long, allow_hyphen_values = true)]
        end: Option<f64>,
        #[arg(long, allow_hyphen_values = true)]
        step: Option<f64>,
        /// Multiplier from sample value to SI
        #[arg(long)]
        scale: Option<f64>,
        #[arg(long, value_enum, default_value = "csv")]
        format: ExportFormat,
        /// Write into this directory instead of stdout
        #[arg(long)]
        out_dir: Option<PathBuf>,
    },
    /// Print the geometry handed to the renderer
    Scene {
        #[arg(long)]
        json: bool,
    },
    /// Ask the explanation service what doubling σ would do
    Explain {
        /// Give up after this many milliseconds
        #[arg(long)]
        timeout_ms: Option<u64>,
    },
    /// Write a lab file with the current settings
    Init { path: PathBuf },
}

fn main() {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> sheet_lab::Result<()> {
    let mut lab = match &cli.config {
        Some(path) => LabFile::load_from_file(path)?,
        None => LabFile::load_default()?,
    };
    lab.parameters = cli.overrides.apply(&lab.parameters);
    lab.parameters.validate()?;

    match cli.command {
        Command::Solve { json } => solve(&lab, json),
        Command::Sweep { field, start, end, step, scale, format, out_dir } => {
            let mut spec = lab.sweep;
            if let Some(field) = field {
                // A different field starts from its own unit
                if field != spec.field {
                    spec = SweepSpec::new(field, spec.start, spec.end, spec.step);
                }
            }
            spec.start = start.unwrap_or(spec.start);
            spec.end = end.unwrap_or(spec.end);
            spec.step = step.unwrap_or(spec.step);
            spec.scale = scale.unwrap_or(spec.scale);
            sweep(&lab, spec, format, out_dir)
        }
        Command::Scene { json } => scene(&lab, json),
        Command::Explain { timeout_ms } => {
            let timeout = Duration::from_millis(timeout_ms.unwrap_or(lab.explain.timeout_ms));
            explain(&lab, timeout)
        }
        Command::Init { path } => {
            lab.save_to_file(&path)?;
            println!("Wrote {}", path.display());
            Ok(())
        }
    }
}

fn solve(lab: &LabFile, json: bool) -> sheet_lab::Result<()> {
    let params = &lab.parameters;
    if json {
        let results = params
            .balls()
            .map(|ball| physics::compute_ball(params, ball).map(|r| (ball.label(), r)))
            .collect::<sheet_lab::Result<Vec<_>>>()?;
        println!("{}", serde_json::to_string_pretty(&results)?);
        return Ok(());
    }

    println!("{}\n", ControlLabels::new(params));
    for ball in params.balls() {
        let results = physics::compute_ball(params, ball)?;
        println!("[{}]", ball.label());
        println!("{}\n", Readout::new(&results));
    }
    Ok(())
}

fn sweep(
    lab: &LabFile,
    spec: SweepSpec,
    format: ExportFormat,
    out_dir: Option<PathBuf>,
) -> sheet_lab::Result<()> {
    let title = format!("{} sweep", spec.field);
    let series = SweepSeries::generate(title, &lab.parameters, spec)?;

    match out_dir {
        Some(dir) => {
            let path = export::save_series(&series, format, &dir)?;
            println!("Saved {} points to {}", series.points.len(), path.display());
        }
        None => export::write_series(&series, format, &mut io::stdout().lock())?,
    }

    if let Some(fit) = series.fit() {
        let trend = match fit.trend() {
            Trend::Linear => "linear",
            Trend::NonLinear => "non-linear",
            Trend::Insufficient => "insufficient data",
        };
        eprintln!(
            "Trend: {} (slope {}, r² {:.6})",
            trend,
            format_times_ten(fit.slope, 3),
            fit.r_squared
        );
    }
    Ok(())
}

fn scene(lab: &LabFile, json: bool) -> sheet_lab::Result<()> {
    let scene = Scene::build(&lab.parameters, &lab.layout)?;
    if json {
        println!("{}", serde_json::to_string_pretty(&scene)?);
        return Ok(());
    }

    println!(
        "Sheet ({}) at x = {:.1} from y = {:.1} to {:.1}",
        hex(scene.sheet_color),
        scene.sheet_x,
        scene.sheet_top,
        scene.sheet_bottom
    );
    for fig in &scene.balls {
        println!(
            "{} ({:?}, {}): anchor ({:.1}, {:.1}) -> ball ({:.1}, {:.1}), angle {:.2}°",
            fig.ball.label(),
            fig.side,
            hex(fig.color),
            fig.anchor.x,
            fig.anchor.y,
            fig.center.x,
            fig.center.y,
            fig.signed_angle.to_degrees()
        );
        for kind in [ForceKind::Gravity, ForceKind::Electric, ForceKind::Tension] {
            let arrow = fig.arrow(kind);
            println!(
                "  {:<2} {} to ({:.1}, {:.1}), {:.1} px",
                kind.label(),
                hex(kind.color()),
                arrow.to.x,
                arrow.to.y,
                arrow.length()
            );
        }
    }
    Ok(())
}

fn explain(lab: &LabFile, timeout: Duration) -> sheet_lab::Result<()> {
    let request = ExplanationRequest::for_params(&lab.parameters, lab.explain.language.clone())?;
    let runtime = tokio::runtime::Runtime::new()?;

    let outcome = runtime.block_on(async {
        let task = ExplanationTask::spawn(Arc::new(RuleBasedExplainer), request);
        match tokio::time::timeout(timeout, task.wait()).await {
            Ok(outcome) => outcome,
            Err(_) => Err(LabError::ServiceUnavailable(format!("no answer within {:?}", timeout))),
        }
    });

    match outcome {
        Ok(text) => println!("{}", text),
        // The lab keeps working; only the commentary is missing
        Err(e) => {
            tracing::warn!(error = %e, "explanation unavailable");
            println!("{}", explain::FALLBACK_MESSAGE);
        }
    }
    Ok(())
}
