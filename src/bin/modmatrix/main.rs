//! modmatrix - terminal monitor for the modulation matrix
//!
//! Run with: cargo run -- --template "FILTER SWEEP"

mod app;
mod generator;
mod ui;

use std::{fs, path::PathBuf};

use clap::Parser;
use color_eyre::eyre::{Result as EyreResult, WrapErr};
use serde::Deserialize;

use app::ControlThread;
use modmatrix::{command_channel, EngineConfig, ModMatrix, Template};
use ui::UiApp;

#[derive(Debug, Parser)]
#[command(version, about = "Live view of a modulation matrix driven by demo signals")]
struct Args {
    /// TOML file with an [engine] table and [[templates]] entries
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Template to load at startup
    #[arg(short, long)]
    template: Option<String>,

    /// Control rate in Hz
    #[arg(short, long)]
    rate: Option<f64>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ConfigFile {
    engine: EngineConfig,
    templates: Vec<Template>,
}

fn load_config(args: &Args) -> EyreResult<ConfigFile> {
    let mut file: ConfigFile = match &args.config {
        Some(path) => {
            let text = fs::read_to_string(path).wrap_err_with(|| format!("failed to read {}", path.display()))?;
            toml::from_str(&text).wrap_err_with(|| format!("failed to parse {}", path.display()))?
        }
        None => ConfigFile::default(),
    };

    if let Some(template) = &args.template {
        file.engine.initial_template = Some(template.clone());
    }
    if let Some(rate) = args.rate {
        file.engine.control_rate_hz = rate;
    }
    file.engine
        .initial_template
        .get_or_insert_with(|| "FILTER SWEEP".to_string());
    Ok(file)
}

fn main() -> EyreResult<()> {
    color_eyre::install()?;
    env_logger::init();

    let args = Args::parse();
    let ConfigFile { engine, templates } = load_config(&args)?;
    engine.validate()?;

    // User templates must exist before the initial one is looked up
    let initial = engine.initial_template.clone();
    let mut matrix = ModMatrix::new(&EngineConfig {
        initial_template: None,
        ..engine.clone()
    })?;
    for template in templates {
        log::info!("registering template {:?}", template.name);
        matrix.templates_mut().register(template);
    }
    if let Some(name) = initial.as_deref() {
        matrix
            .load_template(name)
            .wrap_err_with(|| format!("cannot load template {name:?}"))?;
    }

    let (handle, queue) = command_channel(engine.command_capacity);
    let info = ui::StaticInfo::from_matrix(&matrix);
    let (control, snapshots) = ControlThread::spawn(matrix, queue, &engine);

    let mut terminal = ratatui::init();
    let res = UiApp::new(handle, snapshots, info).run(&mut terminal);
    ratatui::restore();

    control.stop();
    res
}
