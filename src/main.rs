use clap::Parser;
use env_logger::Env;
use gridfeat::config::FeatureConfig;
use gridfeat::features::{FeatureAdapter, FeatureForm, Kernel, KernelError};
use gridfeat::io::features::FeatureOutput;
use gridfeat::model::Crystal;
use gridfeat::physics::{divisions_for_spacing, uniform_grid};
use gridfeat::utils::report;
use gridfeat::{io, FeaturesError};
use log::{error, info};
use std::error::Error;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser, Debug)]
#[command(name = "gridfeat")]
#[command(about = "Bispectrum & powerspectrum features on real-space grid points")]
#[command(version)]
struct Cli {
    /// POSCAR/CONTCAR/*.vasp or (extended) *.xyz
    structure: PathBuf,

    /// Grid points, three cartesian coordinates per line
    #[arg(long, conflicts_with_all = ["grid", "spacing"])]
    points: Option<PathBuf>,

    /// Uniform grid over the cell, NX,NY,NZ
    #[arg(long, value_delimiter = ',', num_args = 3, conflicts_with = "spacing")]
    grid: Option<Vec<usize>>,

    /// Uniform grid with at most this spacing in Angstroms
    #[arg(long, default_value_t = 0.5)]
    spacing: f64,

    /// JSON settings (default: user config dir)
    #[arg(long)]
    config: Option<PathBuf>,

    /// powerspectrum | bispectrum
    #[arg(long)]
    form: Option<String>,

    #[arg(long)]
    nmax: Option<u32>,

    #[arg(long)]
    lmax: Option<u32>,

    #[arg(long)]
    rcut: Option<f64>,

    /// Ask the kernel not to parallelise
    #[arg(long)]
    serial: bool,

    /// Species to keep when the structure has several
    #[arg(long)]
    species: Option<String>,

    /// Write JSON here instead of stdout
    #[arg(short, long)]
    out: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

#[cfg(feature = "fortran")]
fn native_kernel() -> Result<Box<dyn Kernel>, KernelError> {
    Ok(Box::new(gridfeat::features::kernel::FortranKernel::new()))
}

#[cfg(not(feature = "fortran"))]
fn native_kernel() -> Result<Box<dyn Kernel>, KernelError> {
    Err(KernelError::Unavailable(
        "gridfeat was built without a numerical kernel; rebuild with --features fortran".to_string(),
    ))
}

fn grid_divisions(cli: &Cli, crystal: &Crystal) -> Result<[usize; 3], FeaturesError> {
    match cli.grid.as_deref() {
        Some(&[nx, ny, nz]) => Ok([nx, ny, nz]),
        Some(other) => Err(FeaturesError::InvalidConfiguration(format!(
            "grid needs three divisions, got {}",
            other.len()
        ))),
        None => divisions_for_spacing(crystal.cell, cli.spacing),
    }
}

fn load_config(cli: &Cli) -> Result<FeatureConfig, Box<dyn Error>> {
    let mut config = match &cli.config {
        Some(path) => {
            let cfg = FeatureConfig::from_path(path)?;
            info!("Config loaded from {}", path.display());
            cfg
        }
        None => {
            let (cfg, msg) = FeatureConfig::load();
            info!("{}", msg);
            cfg
        }
    };

    if let Some(form) = &cli.form {
        let form: FeatureForm = form.parse()?;
        config = config.with_form(form);
    }
    if let Some(nmax) = cli.nmax {
        config.nmax = nmax;
    }
    if let Some(lmax) = cli.lmax {
        config.lmax = lmax;
    }
    if let Some(rcut) = cli.rcut {
        config.rcut = rcut;
    }
    if cli.serial {
        config.parallel = false;
    }

    config.validate()?;
    Ok(config)
}

fn run(cli: &Cli) -> Result<(), Box<dyn Error>> {
    let config = load_config(cli)?;
    let kernel = native_kernel()?;

    let structure = io::load_structure(&cli.structure)?;
    let crystal = Crystal::from_structure(&structure, cli.species.as_deref())?;
    eprint!("{}", report::crystal_summary(&crystal, &cli.structure.display().to_string()));

    let points = match &cli.points {
        Some(path) => io::grid::parse(path)?,
        None => {
            let divisions = grid_divisions(cli, &crystal)?;
            info!("Uniform grid {}x{}x{}", divisions[0], divisions[1], divisions[2]);
            uniform_grid(crystal.cell, divisions)?
        }
    };
    info!("{} grid points, {} atoms of {}", points.len(), crystal.natoms(), crystal.species);

    let adapter = FeatureAdapter::new(kernel, config);
    let features = adapter.compute_crystal(&crystal, &points)?;
    eprint!("{}", report::feature_summary(&features, adapter.config()));

    let output = FeatureOutput::new(adapter.config(), Some(crystal.species.as_str()), &points, &features);
    match &cli.out {
        Some(path) => {
            output.save(path)?;
            info!("Features written to {}", path.display());
        }
        None => output.write_to(std::io::stdout().lock())?,
    }
    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(Env::default().default_filter_or(log_level)).init();

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}
