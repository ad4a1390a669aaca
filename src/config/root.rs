//! Discovery of a project's configuration root.

use std::path::{Path, PathBuf};

use tracing::{debug, error, warn};
use walkdir::WalkDir;

use super::LanguageServerConfiguration;

/// Search depth below the starting directory.
const MAX_DEPTH: usize = 50;

const DESIGNER_SUFFIX: &str = "Configuration.xml";
const EDT_SUFFIX: &str = "Configuration.mdo";

/// Locate the configuration root for sources under `src_dir`.
///
/// The search starts at the configured root when one is set, otherwise at
/// `src_dir`. The first `…Configuration.xml` or `…Configuration.mdo` file
/// found (depth first, entries sorted by name) decides the result: one
/// directory above an `.xml` file, three above an `.mdo` file. Without a
/// match the starting directory itself is returned.
///
/// Returns `None` when a configured root lies outside `src_dir`, or when a
/// matched `.mdo` file has fewer than three ancestors.
pub fn configuration_root(config: &LanguageServerConfiguration, src_dir: &Path) -> Option<PathBuf> {
    let src_dir = absolute(src_dir)?;

    let search_root = match config.configuration_root() {
        None => src_dir,
        Some(configured) => {
            let configured = absolute(&configured)?;
            if !configured.starts_with(&src_dir) {
                warn!(
                    root = %configured.display(),
                    src_dir = %src_dir.display(),
                    "configured root is outside the source directory"
                );
                return None;
            }
            configured
        }
    };

    let Some(found) = find_configuration_file(&search_root) else {
        return Some(search_root);
    };
    debug!(file = %found.display(), "configuration file found");

    let levels = if has_suffix(&found, EDT_SUFFIX) { 3 } else { 1 };
    found.ancestors().nth(levels).map(Path::to_path_buf)
}

fn find_configuration_file(root: &Path) -> Option<PathBuf> {
    let walker = WalkDir::new(root).max_depth(MAX_DEPTH).sort_by_file_name();

    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) => {
                error!(root = %root.display(), error = %err, "error on read configuration file");
                return None;
            }
        };

        let path = entry.path();
        if entry.file_type().is_file()
            && (has_suffix(path, DESIGNER_SUFFIX) || has_suffix(path, EDT_SUFFIX))
        {
            return Some(path.to_path_buf());
        }
    }
    None
}

fn has_suffix(path: &Path, suffix: &str) -> bool {
    path.file_name()
        .and_then(|name| name.to_str())
        .is_some_and(|name| name.ends_with(suffix))
}

fn absolute(path: &Path) -> Option<PathBuf> {
    match std::path::absolute(path) {
        Ok(path) => Some(path),
        Err(err) => {
            warn!(path = %path.display(), error = %err, "can't make path absolute");
            None
        }
    }
}
