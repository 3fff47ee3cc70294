use clap::{Parser, Subcommand};
use rf_app::{
    AppResult, ExportRequest, evaluate_file, export_model, load_rom, render_evaluation, summarize,
    train_from_files, write_evaluation,
};
use rf_export::ExportFormat;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "rf-cli")]
#[command(about = "RomFlow CLI - DMDc reduced-order model tool", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a ROM definition and show the resolved variable roles
    Validate {
        /// Path to the ROM definition (YAML or JSON)
        rom_path: PathBuf,
    },
    /// Train the model and report per-sample ranks
    Train {
        /// Path to the ROM definition (YAML or JSON)
        rom_path: PathBuf,
        /// Training data JSON file
        data_path: PathBuf,
    },
    /// Train, then roll the model forward for each request
    Evaluate {
        /// Path to the ROM definition (YAML or JSON)
        rom_path: PathBuf,
        /// Training data JSON file
        data_path: PathBuf,
        /// Evaluation requests JSON file
        requests_path: PathBuf,
        /// Output JSON file path (optional, defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Train, then export the identified parameters
    Export {
        /// Path to the ROM definition (YAML or JSON)
        rom_path: PathBuf,
        /// Training data JSON file
        data_path: PathBuf,
        /// Blocks to export (default: all)
        #[arg(long, value_delimiter = ',', num_args = 1..)]
        what: Option<Vec<String>>,
        /// Blocks to leave out
        #[arg(long, value_delimiter = ',', num_args = 1..)]
        skip: Vec<String>,
        /// Output format: json or yaml
        #[arg(long, default_value = "json", value_parser = parse_format)]
        format: ExportFormat,
        /// Output file path (optional, defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn parse_format(s: &str) -> Result<ExportFormat, String> {
    s.parse::<ExportFormat>().map_err(|e| e.to_string())
}

fn main() -> AppResult<()> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Validate { rom_path } => cmd_validate(&rom_path),
        Commands::Train {
            rom_path,
            data_path,
        } => cmd_train(&rom_path, &data_path),
        Commands::Evaluate {
            rom_path,
            data_path,
            requests_path,
            output,
        } => cmd_evaluate(&rom_path, &data_path, &requests_path, output.as_deref()),
        Commands::Export {
            rom_path,
            data_path,
            what,
            skip,
            format,
            output,
        } => cmd_export(
            &rom_path,
            &data_path,
            ExportRequest {
                what,
                skip,
                format,
                output: output.as_deref(),
            },
        ),
    }
}

fn cmd_validate(rom_path: &Path) -> AppResult<()> {
    println!("Validating ROM definition: {}", rom_path.display());
    let rom = load_rom(rom_path)?;
    let summary = summarize(&rom)?;
    println!("✓ ROM '{}' is valid", summary.name);
    println!("  Actuators: {}", summary.actuators.join(", "));
    println!("  States: {}", summary.states.join(", "));
    println!("  Init states: {}", list_or_none(&summary.init_states));
    println!("  Outputs: {}", list_or_none(&summary.outputs));
    println!("  Parameters: {}", list_or_none(&summary.parameters));
    println!("  Pivot: {}", summary.pivot);
    println!(
        "  Centering: {}, rank: {:?}, decenter: {:?}",
        summary.center, summary.rank, summary.decenter
    );
    Ok(())
}

fn cmd_train(rom_path: &Path, data_path: &Path) -> AppResult<()> {
    println!("Training ROM: {}", rom_path.display());
    let trained = train_from_files(rom_path, data_path)?;
    let summary = &trained.summary;

    println!(
        "✓ Trained {} samples x {} timesteps in {:.3} s",
        summary.samples, summary.timesteps, summary.elapsed_s
    );
    println!("  dt = {:.6}", summary.dt);
    if !summary.uniform_time {
        println!("  (pivot spacing is not uniform; treated as uniform)");
    }
    println!(
        "  Parametric: {}",
        if summary.parametric { "yes" } else { "no" }
    );
    for (sample, rank) in summary.effective_ranks.iter().enumerate() {
        println!("  Sample {sample}: effective rank {rank}");
    }
    Ok(())
}

fn cmd_evaluate(
    rom_path: &Path,
    data_path: &Path,
    requests_path: &Path,
    output: Option<&Path>,
) -> AppResult<()> {
    let trained = train_from_files(rom_path, data_path)?;
    let evaluation = evaluate_file(&trained.model, requests_path)?;

    match output {
        Some(path) => {
            write_evaluation(path, &evaluation)?;
            println!(
                "✓ Wrote {} series to {}",
                evaluation.series.len(),
                path.display()
            );
        }
        None => {
            println!("{}", render_evaluation(&evaluation)?);
        }
    }
    Ok(())
}

fn cmd_export(rom_path: &Path, data_path: &Path, request: ExportRequest<'_>) -> AppResult<()> {
    let trained = train_from_files(rom_path, data_path)?;
    let (document, rendered) = export_model(&trained.model, &request)?;

    match request.output {
        Some(path) => println!(
            "✓ Exported {} blocks to {}",
            document.block_names().len(),
            path.display()
        ),
        None => println!("{rendered}"),
    }
    Ok(())
}

fn list_or_none(ids: &[String]) -> String {
    if ids.is_empty() {
        "(none)".to_string()
    } else {
        ids.join(", ")
    }
}
