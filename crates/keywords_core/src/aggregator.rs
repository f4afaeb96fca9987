use anyhow::{Context, Result};
use dashmap::DashSet;
use log::{debug, info, trace};
use rayon::prelude::*;
use std::{
    fs,
    path::{Path, PathBuf},
    sync::atomic::{AtomicUsize, Ordering},
};

use crate::{
    keywords::{KeywordSet, ScanResult},
    logger::Logger,
};

/// Runs `extract` over every file and unions the results.
///
/// Files are processed in batches of `batch_size`: each batch runs in
/// parallel and must settle before the next one starts. A file that cannot
/// be read, or whose extraction fails, is reported through `logger` and
/// contributes nothing.
pub fn aggregate<F>(
    files: &[PathBuf],
    logger: &dyn Logger,
    batch_size: usize,
    extract: F,
) -> ScanResult
where
    F: Fn(&Path, &str) -> Result<KeywordSet> + Sync,
{
    info!("Scanning {} files in batches of {}", files.len(), batch_size);
    let project: DashSet<String> = DashSet::new();
    let failed = AtomicUsize::new(0);

    for (index, batch) in files.chunks(batch_size.max(1)).enumerate() {
        debug!("Processing batch {} ({} files)", index + 1, batch.len());
        batch.par_iter().for_each(|file| match scan_file(file, &extract) {
            Ok(keywords) => {
                trace!("{} contributed {} keywords", file.display(), keywords.len());
                for keyword in keywords {
                    project.insert(keyword);
                }
            }
            Err(err) => {
                failed.fetch_add(1, Ordering::Relaxed);
                logger.warn(&format!("Failed to scan {}: {:#}", file.display(), err));
            }
        });
    }

    let keywords: KeywordSet = project.into_iter().collect();
    let files_failed = failed.into_inner();
    debug!("Aggregated {} keywords ({} files failed)", keywords.len(), files_failed);

    ScanResult { keywords, files_scanned: files.len(), files_failed }
}

fn scan_file<F>(file: &Path, extract: &F) -> Result<KeywordSet>
where
    F: Fn(&Path, &str) -> Result<KeywordSet>,
{
    let text =
        fs::read_to_string(file).with_context(|| format!("Failed to read {}", file.display()))?;
    extract(file, &text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        extractor::Extractor, keywords::TargetModules, logger::testing::RecordingLogger,
    };
    use anyhow::anyhow;
    use log::Level;
    use std::sync::Mutex;
    use tempfile::TempDir;

    fn create_test_file(dir: &Path, name: &str, content: &str) -> PathBuf {
        let file_path = dir.join(name);
        fs::write(&file_path, content).expect("Failed to write test file");
        file_path
    }

    fn keywords(items: &[&str]) -> KeywordSet {
        items.iter().map(|s| s.to_string()).collect()
    }

    fn extract_with(extractor: &Extractor) -> impl Fn(&Path, &str) -> Result<KeywordSet> + Sync + '_ {
        move |path, text| Ok(extractor.extract(path, text))
    }

    #[test]
    fn test_unions_files() {
        let temp_dir = TempDir::new().unwrap();
        let a = create_test_file(
            temp_dir.path(),
            "a.ts",
            "import * as K from 'virtual:keywords'; K.foo; K.bar;",
        );
        let b = create_test_file(temp_dir.path(), "b.ts", "import { bar, baz } from 'virtual:keywords';");
        let logger = RecordingLogger::default();
        let extractor = Extractor::new(TargetModules::default());

        let result = aggregate(&[a, b], &logger, 100, extract_with(&extractor));
        assert_eq!(result.keywords, keywords(&["bar", "baz", "foo"]));
        assert_eq!(result.files_scanned, 2);
        assert_eq!(result.files_failed, 0);
    }

    #[test]
    fn test_order_independent() {
        let temp_dir = TempDir::new().unwrap();
        let a = create_test_file(temp_dir.path(), "a.ts", "import { one } from 'virtual:keywords';");
        let b = create_test_file(temp_dir.path(), "b.ts", "import Def from 'virtual:keywords';");
        let logger = RecordingLogger::default();
        let extractor = Extractor::new(TargetModules::default());

        let forward = aggregate(&[a.clone(), b.clone()], &logger, 1, extract_with(&extractor));
        let backward = aggregate(&[b, a], &logger, 1, extract_with(&extractor));
        assert_eq!(forward.keywords, backward.keywords);
        assert_eq!(forward.keywords, keywords(&["default", "one"]));
    }

    #[test]
    fn test_batches_are_sequential() {
        let temp_dir = TempDir::new().unwrap();
        let files: Vec<PathBuf> = (0..7)
            .map(|i| create_test_file(temp_dir.path(), &format!("f{}.ts", i), &i.to_string()))
            .collect();
        let logger = RecordingLogger::default();
        let seen: Mutex<Vec<usize>> = Mutex::new(Vec::new());

        aggregate(&files, &logger, 3, |_, text| {
            seen.lock().unwrap().push(text.parse::<usize>().unwrap());
            Ok(KeywordSet::new())
        });

        // Every file of batch N is done before any file of batch N+1 starts
        let seen = seen.into_inner().unwrap();
        assert_eq!(seen.len(), 7);
        let batch_of: Vec<usize> = seen.iter().map(|i| i / 3).collect();
        assert!(batch_of.windows(2).all(|w| w[0] <= w[1]), "batches interleaved: {:?}", seen);
    }

    #[test]
    fn test_read_failure_is_warned_and_skipped() {
        let temp_dir = TempDir::new().unwrap();
        let good = create_test_file(temp_dir.path(), "good.ts", "import { ok } from 'virtual:keywords';");
        let missing = temp_dir.path().join("missing.ts");
        let logger = RecordingLogger::default();
        let extractor = Extractor::new(TargetModules::default());

        let result = aggregate(&[missing, good], &logger, 100, extract_with(&extractor));
        assert_eq!(result.keywords, keywords(&["ok"]));
        assert_eq!(result.files_failed, 1);

        let warnings = logger.messages(Level::Warn);
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].contains("missing.ts"));
    }

    #[test]
    fn test_extraction_failure_is_warned_and_skipped() {
        let temp_dir = TempDir::new().unwrap();
        let a = create_test_file(temp_dir.path(), "a.ts", "a");
        let b = create_test_file(temp_dir.path(), "b.ts", "b");
        let logger = RecordingLogger::default();

        let result = aggregate(&[a, b], &logger, 100, |path, text| {
            if text == "a" {
                return Err(anyhow!("extractor exploded on {}", path.display()));
            }
            Ok(keywords(&["fromB"]))
        });

        assert_eq!(result.keywords, keywords(&["fromB"]));
        assert_eq!(result.files_failed, 1);
        assert!(logger.messages(Level::Warn)[0].contains("extractor exploded"));
    }

    #[test]
    fn test_unparsable_file_does_not_block_others() {
        let temp_dir = TempDir::new().unwrap();
        let broken = create_test_file(
            temp_dir.path(),
            "broken.ts",
            "import * as K from 'virtual:keywords';\nK.lost;\nfunction (",
        );
        let fine = create_test_file(
            temp_dir.path(),
            "fine.ts",
            "import * as K from 'virtual:keywords';\nK.kept;",
        );
        let logger = RecordingLogger::default();
        let extractor = Extractor::new(TargetModules::default());

        let result = aggregate(&[broken, fine], &logger, 100, extract_with(&extractor));
        assert_eq!(result.keywords, keywords(&["kept"]));
        assert_eq!(result.files_failed, 0);
        assert!(logger.messages(Level::Warn).is_empty());
    }

    #[test]
    fn test_empty_file_list() {
        let logger = RecordingLogger::default();
        let result = aggregate(&[], &logger, 100, |_, _| Ok(KeywordSet::new()));
        assert!(result.keywords.is_empty());
        assert_eq!(result.files_scanned, 0);
    }
}
