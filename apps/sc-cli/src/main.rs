use clap::{Args, Parser, Subcommand};
use sc_app::{
    AppResult, Calculator, CalculatorConfig, DEFAULT_CONFIG_FILE, ExportFormat, load_model,
};
use sc_core::{CompositionSample, Element};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;

#[derive(Parser)]
#[command(name = "sc-cli")]
#[command(about = "SteelCalc CLI - Steel yield and tensile strength over temperature", long_about = None)]
struct Cli {
    /// Path to the YAML config file
    #[arg(long, global = true, default_value = DEFAULT_CONFIG_FILE)]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List composition fields with their legal ranges and defaults
    Fields,
    /// Load the prediction model and describe it
    InspectModel {
        /// Model file (overrides the config)
        #[arg(long)]
        model: Option<PathBuf>,
    },
    /// Predict strength from 20 to 660 °C for one composition
    Predict(PredictArgs),
}

#[derive(Args)]
struct PredictArgs {
    /// Model file (overrides the config)
    #[arg(long)]
    model: Option<PathBuf>,
    /// Output format: table, csv or json
    #[arg(short, long, default_value = "table")]
    format: ExportFormat,
    /// Output file (optional, defaults to stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,
    #[command(flatten)]
    composition: CompositionArgs,
}

/// Element contents in %. Unset fields keep their default.
#[derive(Args)]
struct CompositionArgs {
    #[arg(long)]
    carbon: Option<f64>,
    #[arg(long)]
    silicon: Option<f64>,
    #[arg(long)]
    manganese: Option<f64>,
    #[arg(long)]
    phosphorus: Option<f64>,
    #[arg(long)]
    sulphur: Option<f64>,
    #[arg(long)]
    nickel: Option<f64>,
    #[arg(long)]
    chromium: Option<f64>,
    #[arg(long)]
    molybdenum: Option<f64>,
    #[arg(long, alias = "cooper")]
    copper: Option<f64>,
    #[arg(long)]
    vanadium: Option<f64>,
    #[arg(long)]
    aluminum: Option<f64>,
    #[arg(long)]
    nitrogen: Option<f64>,
    #[arg(long)]
    niobium_tantalum: Option<f64>,
}

impl CompositionArgs {
    fn values(&self) -> [(Element, Option<f64>); 13] {
        [
            (Element::Carbon, self.carbon),
            (Element::Silicon, self.silicon),
            (Element::Manganese, self.manganese),
            (Element::Phosphorus, self.phosphorus),
            (Element::Sulphur, self.sulphur),
            (Element::Nickel, self.nickel),
            (Element::Chromium, self.chromium),
            (Element::Molybdenum, self.molybdenum),
            (Element::Copper, self.copper),
            (Element::Vanadium, self.vanadium),
            (Element::Aluminum, self.aluminum),
            (Element::Nitrogen, self.nitrogen),
            (Element::NiobiumTantalum, self.niobium_tantalum),
        ]
    }

    fn to_sample(&self) -> AppResult<CompositionSample> {
        let mut sample = CompositionSample::default();
        for (element, value) in self.values() {
            if let Some(v) = value {
                sample.set(element, v)?;
            }
        }
        Ok(sample)
    }
}

fn main() -> AppResult<()> {
    // Logs go to stderr; stdout carries the exported data
    tracing_subscriber::fmt().with_writer(io::stderr).init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Fields => cmd_fields(),
        Commands::InspectModel { model } => cmd_inspect_model(&cli.config, model),
        Commands::Predict(args) => cmd_predict(&cli.config, &args),
    }
}

fn load_config(path: &Path, model_override: Option<PathBuf>) -> AppResult<CalculatorConfig> {
    let mut config = CalculatorConfig::load_or_default(path)?;
    if let Some(model) = model_override {
        config.model_path = model;
    }
    tracing::info!(
        config = %path.display(),
        model = %config.model_path.display(),
        "configuration resolved"
    );
    Ok(config)
}

fn cmd_fields() -> AppResult<()> {
    println!(
        "{:<18} {:>8} {:>8} {:>8} {:>8} {:>6}",
        "field", "min", "max", "step", "default", "count"
    );
    for element in Element::ALL {
        let r = element.range();
        let d = r.decimals as usize;
        println!(
            "{:<18} {:>8.d$} {:>8.d$} {:>8.d$} {:>8.d$} {:>6}",
            element.column(),
            r.min,
            r.max(),
            r.step,
            r.default,
            r.count,
        );
    }
    Ok(())
}

fn cmd_inspect_model(config_path: &Path, model: Option<PathBuf>) -> AppResult<()> {
    let config = load_config(config_path, model)?;
    let model = load_model(&config.model_path)?;
    let summary = model.summary();

    println!("Model: {}", config.model_path.display());
    println!("  {}", summary);
    println!("  base score: {:?}", summary.base_score);
    println!("  features:");
    for (i, name) in summary.feature_names.iter().enumerate() {
        println!("    {:>2}. {}", i, name);
    }
    Ok(())
}

fn cmd_predict(config_path: &Path, args: &PredictArgs) -> AppResult<()> {
    let sample = args.composition.to_sample()?;
    let config = load_config(config_path, args.model.clone())?;
    let model = load_model(&config.model_path)?;
    let calculator = Calculator::new(Arc::new(model), &config);

    for (element, value) in sample.iter() {
        tracing::debug!(field = element.column(), value, "composition");
    }
    let data = calculator.evaluate(&sample)?;

    match &args.output {
        Some(path) => {
            let mut writer = BufWriter::new(File::create(path)?);
            args.format.write(&mut writer, &data)?;
            writer.flush()?;
            println!(
                "✓ Wrote {} predictions to {}",
                data.table.len(),
                path.display()
            );
        }
        None => {
            let stdout = io::stdout();
            let mut lock = stdout.lock();
            args.format.write(&mut lock, &data)?;
        }
    }
    Ok(())
}
