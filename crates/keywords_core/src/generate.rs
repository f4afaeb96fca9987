use anyhow::Result;
use log::{debug, info};
use std::path::{Path, PathBuf};

use crate::{
    aggregator::aggregate,
    collector::{CollectorConfig, collect_files},
    config::KeywordsConfig,
    constants::BATCH_SIZE,
    emitter::write_types,
    extractor::Extractor,
    keywords::{KeywordSet, ScanResult, TargetModules},
    logger::Logger,
};

/// Walks the project and aggregates every keyword it references.
pub fn scan_project(
    root: &Path,
    logger: &dyn Logger,
    ignored_dirs: &[PathBuf],
    config: &KeywordsConfig,
) -> Result<ScanResult> {
    let files = collect_files(&CollectorConfig {
        root: root.to_path_buf(),
        ignored_dirs: ignored_dirs.to_vec(),
    })?;
    info!("Found {} candidate files under {}", files.len(), root.display());

    let extractor = Extractor::new(TargetModules::from(config));
    debug!("Target modules: {:?}", extractor.targets().names());
    let result = aggregate(&files, logger, BATCH_SIZE, |path, text| Ok(extractor.extract(path, text)));
    debug!("Parsed {} of {} files", extractor.parse_count(), files.len());
    Ok(result)
}

/// Scans the project, writes `.keywords/index.d.ts` and returns the keywords.
///
/// Only a failure to write the declaration file is an error; unreadable or
/// unparsable files are skipped.
pub fn generate_types(
    root: &Path,
    logger: &dyn Logger,
    ignored_dirs: &[PathBuf],
    config: &KeywordsConfig,
) -> Result<KeywordSet> {
    let scan = scan_project(root, logger, ignored_dirs, config)?;
    let path = write_types(root, &scan.keywords)?;
    logger.info(&format!("Found {} keywords in {} files", scan.keywords.len(), scan.files_scanned));
    info!("Wrote {}", path.display());
    Ok(scan.keywords)
}
