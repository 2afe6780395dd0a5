use clap::Parser;

use log::{error, info};
use std::process::ExitCode;

use pcb_label_normalizer::{Args, LabelNormalizer, NormalizeError, NormalizerOptions, RuleTable};

fn main() -> ExitCode {
    // Initialize the logger
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let rules = match &args.rules {
        Some(path) => match RuleTable::from_json_file(path) {
            Ok(rules) => rules,
            Err(e) => {
                error!("{}", e);
                return ExitCode::FAILURE;
            }
        },
        None => RuleTable::default(),
    };

    info!("Normalizing labels under {}", args.xml_dir.display());
    if args.dry_run {
        info!("Dry run: no backups or rewrites will be written");
    }

    let normalizer = LabelNormalizer::new(&args.xml_dir, rules, NormalizerOptions::from(&args));
    match normalizer.run() {
        Ok(_) => ExitCode::SUCCESS,
        // Already reported by the driver
        Err(NormalizeError::NoAnnotationFiles { .. }) => ExitCode::FAILURE,
        Err(e) => {
            error!("Failed to normalize labels: {}", e);
            ExitCode::FAILURE
        }
    }
}
