//! typo-check CLI binary.
//!
//! Prints the acceptance set a preset checker computes for a typed password,
//! or whether a real password would be accepted for it.

use std::path::PathBuf;
use std::process;
use std::sync::Arc;

use clap::Parser;
use typo_checker::{BlackList, CheckerError, FrequencyModel, PasswordModel, presets};

/// Show which passwords a typed password may be accepted for
#[derive(Parser, Debug)]
#[command(name = "typo-check")]
#[command(version = env!("CARGO_PKG_VERSION"))]
struct Args {
    /// The typed password
    #[arg(required_unless_present = "list_presets")]
    typed: Option<String>,

    /// Real password to test against the acceptance set
    #[arg(short, long)]
    real: Option<String>,

    /// Named checker preset
    #[arg(short, long, default_value = presets::DEFAULT_PRESET)]
    preset: String,

    /// Blacklist file, one password per line
    #[arg(long, env = "TYPO_BLACKLIST_PATH")]
    blacklist: Option<PathBuf>,

    /// Frequency table, one `count password` entry per line
    #[arg(long, env = "TYPO_PWMODEL_PATH")]
    pwmodel: Option<PathBuf>,

    /// List the preset names and exit
    #[arg(long)]
    list_presets: bool,
}

fn run(args: Args) -> Result<(), CheckerError> {
    if args.list_presets {
        for name in presets::PRESET_NAMES {
            println!("{}", name);
        }
        return Ok(());
    }

    let blacklist = match &args.blacklist {
        Some(path) => BlackList::from_path(path)?,
        None => BlackList::default(),
    };
    // Without a frequency table every password gets the model floor.
    let model: Arc<dyn PasswordModel> = match &args.pwmodel {
        Some(path) => Arc::new(FrequencyModel::from_path(path)?),
        None => Arc::new(FrequencyModel::from_counts(Vec::<(String, u64)>::new())),
    };

    let mut checker = presets::build_preset(&args.preset, model, Arc::new(blacklist))?;
    let typed = args.typed.unwrap_or_default();

    match &args.real {
        Some(real) => {
            let accepted = checker.check(&typed, real)?;
            println!("{} -> {}: {}", typed, real, accepted);
        }
        None => {
            let candidates = checker.acceptance_set(&typed)?;
            let listed: Vec<&str> = candidates.iter().map(String::as_str).collect();
            println!("{} -> {{{}}}", typed, listed.join(", "));
        }
    }
    Ok(())
}

fn main() {
    let args = Args::parse();

    if let Err(e) = run(args) {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}
