use log::{error, info, warn};
use rayon::prelude::*;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering::Relaxed};

use crate::backup::back_up;
use crate::config::{NormalizerOptions, ParseFailurePolicy};
use crate::discovery::find_annotation_files;
use crate::document::AnnotationDocument;
use crate::error::{NormalizeError, Result};
use crate::rules::RuleTable;
use crate::types::{BackupOutcome, ConversionStats, FileOutcome};
use crate::utils::create_progress_bar;

/// Rewrites the object labels of every annotation file under a root directory.
#[derive(Debug, Clone)]
pub struct LabelNormalizer {
    root: PathBuf,
    rules: RuleTable,
    options: NormalizerOptions,
}

enum FileResult {
    Converted(FileOutcome),
    Skipped,
}

impl LabelNormalizer {
    pub fn new(root: impl Into<PathBuf>, rules: RuleTable, options: NormalizerOptions) -> Self {
        Self {
            root: root.into(),
            rules,
            options,
        }
    }

    pub fn rules(&self) -> &RuleTable {
        &self.rules
    }

    pub fn find_xml_files(&self) -> Result<Vec<PathBuf>> {
        find_annotation_files(&self.root, &self.options.extension)
    }

    /// Back up, parse, relabel and rewrite a single file.
    ///
    /// In dry-run mode the file is parsed and relabeled in memory only.
    pub fn convert(&self, path: &Path) -> Result<FileOutcome> {
        let backup = if self.options.dry_run {
            BackupOutcome::Skipped
        } else {
            back_up(path, &self.options.backup_suffix, self.options.backup_policy)?
        };

        let mut document = AnnotationDocument::from_file(path)?;
        let report = document.apply_rules(&self.rules);

        if !self.options.dry_run {
            document.write_to(path)?;
        }

        Ok(FileOutcome {
            path: path.to_path_buf(),
            backup,
            report,
        })
    }

    /// Convert every file in `files`, logging `Converting <path>... [i/n]` for each.
    pub fn convert_all(&self, files: &[PathBuf]) -> Result<ConversionStats> {
        let total = files.len();
        if total == 0 {
            error!("No XML files found");
            return Err(NormalizeError::NoAnnotationFiles {
                root: self.root.clone(),
            });
        }

        let results = if self.options.parallel {
            self.convert_parallel(files)?
        } else {
            let mut results = Vec::with_capacity(total);
            for (i, file) in files.iter().enumerate() {
                info!("Converting {}... [{}/{}]", file.display(), i + 1, total);
                results.push(self.convert_or_skip(file)?);
            }
            results
        };

        let mut stats = ConversionStats::new(total);
        for result in &results {
            match result {
                FileResult::Converted(outcome) => stats.record(outcome),
                FileResult::Skipped => stats.increment_skipped(),
            }
        }
        Ok(stats)
    }

    /// Discover and convert, then log a summary.
    pub fn run(&self) -> Result<ConversionStats> {
        let files = self.find_xml_files()?;
        let stats = self.convert_all(&files)?;
        stats.print_summary();
        Ok(stats)
    }

    fn convert_parallel(&self, files: &[PathBuf]) -> Result<Vec<FileResult>> {
        let total = files.len();
        let counter = AtomicUsize::new(0);
        let pb = create_progress_bar(total as u64, "Convert");

        let results = files
            .par_iter()
            .map(|file| {
                let index = counter.fetch_add(1, Relaxed) + 1;
                info!("Converting {}... [{}/{}]", file.display(), index, total);
                let result = self.convert_or_skip(file);
                pb.inc(1);
                result
            })
            .collect::<Result<Vec<_>>>();

        pb.finish_with_message("Conversion complete");
        results
    }

    fn convert_or_skip(&self, path: &Path) -> Result<FileResult> {
        match self.convert(path) {
            Ok(outcome) => Ok(FileResult::Converted(outcome)),
            Err(NormalizeError::Parse { path, source })
                if self.options.on_parse_error == ParseFailurePolicy::Skip =>
            {
                warn!("Skipping {}: {}", path.display(), source);
                Ok(FileResult::Skipped)
            }
            Err(e) => Err(e),
        }
    }
}
