//! `mpeph` – geocentric ephemeris of a minor planet from the MPCORB catalog.
//!
//! ```text
//! mpeph 00001 2024-03-01T00:00:00Z 2024-03-31T00:00:00Z --step 5
//! mpeph --job ceres.json --csv > ceres.csv
//! RUST_LOG=debug mpeph K24A01X 2024-03-01T00:00:00Z --ephem horizon:earth.txt
//! ```
use std::io;
use std::process::ExitCode;

use camino::Utf8PathBuf;
use clap::Parser;
use log::{error, LevelFilter};

use mpeph::display::EphemerisTable;
use mpeph::ephemeris::Ephemeris;
use mpeph::job::JobConfig;
use mpeph::jpl_ephem::EarthEphemeris;
use mpeph::mpcorb::find_record;
use mpeph::reducer::AstrometricReducer;
use mpeph::MpephError;

#[derive(Parser)]
#[command(name = "mpeph")]
#[command(about = "Apparent place and visual magnitude of a minor planet")]
struct Args {
    /// Packed designation as it starts the MPCORB line (e.g. 00001, K24A01X)
    designation: Option<String>,

    /// First date, UTC (YYYY-MM-DDTHH:MM:SSZ)
    start: Option<String>,

    /// Last date, UTC
    end: Option<String>,

    /// Step between dates, in days (needs END)
    #[arg(short, long)]
    step: Option<f64>,

    /// MPCORB catalog file
    #[arg(short, long)]
    mpcorb: Option<String>,

    /// Earth ephemeris: mean (offline, ~20" error), horizon:<file> or horizon-api (DE441)
    #[arg(short, long)]
    ephem: Option<String>,

    /// Display threshold: magnitudes brighter (smaller) than this are left blank
    #[arg(long)]
    mag_limit: Option<f64>,

    /// JSON job file, overridden by the other arguments
    #[arg(short, long)]
    job: Option<Utf8PathBuf>,

    /// Write CSV instead of a text table
    #[arg(long)]
    csv: bool,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

impl Args {
    fn overrides(&self) -> JobConfig {
        JobConfig {
            designation: self.designation.clone(),
            start: self.start.clone(),
            end: self.end.clone(),
            step_days: self.step,
            mpcorb: self.mpcorb.clone(),
            ephemeris: self.ephem.clone(),
            magnitude_limit: self.mag_limit,
        }
    }
}

fn init_logger(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        _ => LevelFilter::Debug,
    };
    let _ = env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .try_init();
}

fn run(args: &Args) -> Result<(), MpephError> {
    let config = match &args.job {
        Some(path) => JobConfig::from_file(path)?,
        None => JobConfig::default(),
    };
    let job = config.merge(args.overrides()).resolve()?;

    let record = find_record(&job.mpcorb, &job.designation)?;
    let (first, last) = job.span();
    let earth = EarthEphemeris::load(&job.ephemeris, first, last)?;

    let ephemeris = Ephemeris::new(
        &record.keplerian_elements(),
        record.magnitude(),
        AstrometricReducer::new(earth),
    );
    let samples = ephemeris.samples(job.sample_dates()?)?;
    let table = EphemerisTable::new(&samples).with_magnitude_limit(job.magnitude_limit);

    if args.csv {
        table.write_csv(io::stdout().lock())?;
    } else {
        println!("{}", record.name());
        print!("{table}");
    }
    Ok(())
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_logger(args.verbose);

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{err}");
            eprintln!("mpeph: {err}");
            ExitCode::FAILURE
        }
    }
}
