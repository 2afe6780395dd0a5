use std::ops::AddAssign;
use std::path::PathBuf;

// Per-document label counters produced by a rule pass
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct DocumentReport {
    pub relabeled: usize,
    pub removed: usize,
    pub unchanged: usize,
    pub unlabeled: usize,
}

impl DocumentReport {
    /// Number of object records seen, including removed ones.
    pub fn objects_seen(&self) -> usize {
        self.relabeled + self.removed + self.unchanged + self.unlabeled
    }

    pub fn is_modified(&self) -> bool {
        self.relabeled > 0 || self.removed > 0
    }
}

impl AddAssign for DocumentReport {
    fn add_assign(&mut self, other: Self) {
        self.relabeled += other.relabeled;
        self.removed += other.removed;
        self.unchanged += other.unchanged;
        self.unlabeled += other.unlabeled;
    }
}

// What happened to the backup of a single file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackupOutcome {
    Written,
    KeptExisting,
    Skipped,
}

// Result of converting a single annotation file
#[derive(Debug, Clone)]
pub struct FileOutcome {
    pub path: PathBuf,
    pub backup: BackupOutcome,
    pub report: DocumentReport,
}

// Struct to hold batch statistics
#[derive(Debug, Default, Clone)]
pub struct ConversionStats {
    pub files_discovered: usize,
    pub files_converted: usize,
    pub files_skipped: usize,
    pub backups_written: usize,
    pub backups_kept: usize,
    pub labels: DocumentReport,
}

impl ConversionStats {
    pub fn new(files_discovered: usize) -> Self {
        Self {
            files_discovered,
            ..Self::default()
        }
    }

    pub fn record(&mut self, outcome: &FileOutcome) {
        self.files_converted += 1;
        match outcome.backup {
            BackupOutcome::Written => self.backups_written += 1,
            BackupOutcome::KeptExisting => self.backups_kept += 1,
            BackupOutcome::Skipped => {}
        }
        self.labels += outcome.report;
    }

    pub fn increment_skipped(&mut self) {
        self.files_skipped += 1;
    }

    pub fn print_summary(&self) {
        log::info!("=== Conversion Summary ===");
        log::info!("Files discovered: {}", self.files_discovered);
        log::info!("Files converted: {}", self.files_converted);
        log::info!(
            "Backups written: {} (existing kept: {})",
            self.backups_written,
            self.backups_kept
        );
        log::info!(
            "Objects: {} relabeled, {} removed, {} unchanged, {} unlabeled",
            self.labels.relabeled,
            self.labels.removed,
            self.labels.unchanged,
            self.labels.unlabeled
        );

        if self.files_skipped > 0 {
            log::warn!(
                "Skipped {} file(s) that could not be parsed",
                self.files_skipped
            );
        }
    }
}
