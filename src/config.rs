use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Command-line arguments for normalizing PCB WACV 2019 annotation labels.
#[derive(Parser, Debug, Clone)]
#[command(version, long_about = None)]
pub struct Args {
    /// Root directory searched recursively for annotation files
    #[arg(short = 'd', long = "xml_dir", default_value = "data/pcb_wacv_2019-kwon")]
    pub xml_dir: PathBuf,

    /// File extension of annotation files, without the leading dot
    #[arg(long = "extension", default_value = "xml")]
    pub extension: String,

    /// Suffix appended to a file name to form its backup path
    #[arg(long = "backup_suffix", default_value = ".org")]
    pub backup_suffix: String,

    /// What to do when a backup from an earlier run already exists
    #[arg(long = "backup_policy", value_enum, default_value = "overwrite")]
    pub backup_policy: BackupPolicy,

    /// What to do with a file that is not well-formed XML
    #[arg(long = "on_parse_error", value_enum, default_value = "abort")]
    pub on_parse_error: ParseFailurePolicy,

    /// JSON rule table replacing the built-in PCB WACV 2019 vocabulary
    #[arg(long = "rules")]
    pub rules: Option<PathBuf>,

    /// Convert files in parallel
    #[arg(long = "parallel")]
    pub parallel: bool,

    /// Apply the rules and report counts without writing anything
    #[arg(long = "dry_run")]
    pub dry_run: bool,
}

// Behavior when `<file><suffix>` already exists
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, ValueEnum, Debug, Default)]
pub enum BackupPolicy {
    /// Replace the existing backup with the current file contents
    #[default]
    Overwrite,
    /// Keep the existing backup so the first original survives re-runs
    SkipIfExists,
}

// Behavior when an annotation file fails to parse
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, ValueEnum, Debug, Default)]
pub enum ParseFailurePolicy {
    /// Stop the batch at the failing file
    #[default]
    Abort,
    /// Log a warning, count the file as skipped and continue
    Skip,
}

/// Settings that drive a conversion run, independent of how they were parsed.
#[derive(Debug, Clone)]
pub struct NormalizerOptions {
    pub extension: String,
    pub backup_suffix: String,
    pub backup_policy: BackupPolicy,
    pub on_parse_error: ParseFailurePolicy,
    pub parallel: bool,
    pub dry_run: bool,
}

impl Default for NormalizerOptions {
    fn default() -> Self {
        Self {
            extension: "xml".to_string(),
            backup_suffix: ".org".to_string(),
            backup_policy: BackupPolicy::Overwrite,
            on_parse_error: ParseFailurePolicy::Abort,
            parallel: false,
            dry_run: false,
        }
    }
}

impl From<&Args> for NormalizerOptions {
    fn from(args: &Args) -> Self {
        Self {
            extension: args.extension.trim_start_matches('.').to_string(),
            backup_suffix: args.backup_suffix.clone(),
            backup_policy: args.backup_policy,
            on_parse_error: args.on_parse_error,
            parallel: args.parallel,
            dry_run: args.dry_run,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_original_script() {
        let args = Args::parse_from(["pcb-label-normalizer"]);
        assert_eq!(args.xml_dir, PathBuf::from("data/pcb_wacv_2019-kwon"));
        assert_eq!(args.backup_policy, BackupPolicy::Overwrite);
        assert_eq!(args.on_parse_error, ParseFailurePolicy::Abort);

        let options = NormalizerOptions::from(&args);
        assert_eq!(options.extension, "xml");
        assert_eq!(options.backup_suffix, ".org");
        assert!(!options.parallel);
        assert!(!options.dry_run);
    }

    #[test]
    fn test_policy_flags() {
        let args = Args::parse_from([
            "pcb-label-normalizer",
            "-d",
            "annotations",
            "--extension",
            ".XML",
            "--backup_policy",
            "skip-if-exists",
            "--on_parse_error",
            "skip",
            "--dry_run",
        ]);
        let options = NormalizerOptions::from(&args);
        assert_eq!(options.extension, "XML");
        assert_eq!(options.backup_policy, BackupPolicy::SkipIfExists);
        assert_eq!(options.on_parse_error, ParseFailurePolicy::Skip);
        assert!(options.dry_run);
    }
}
