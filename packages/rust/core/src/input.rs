//! Keyword list input.
//!
//! Keyword files hold one keyword per line. Blank lines and `#` comments are
//! skipped; everything else is passed to the grouper verbatim.

use std::io::Read;
use std::path::Path;

use tracing::{debug, instrument};

use kwgroup_shared::{KwgroupError, Result};

/// Path value that means "read from stdin".
pub const STDIN_PATH: &str = "-";

/// Extract keywords from file content.
pub fn parse_keywords(content: &str) -> Vec<String> {
    content
        .trim_start_matches('\u{feff}')
        .lines()
        .filter(|line| {
            let trimmed = line.trim();
            !trimmed.is_empty() && !trimmed.starts_with('#')
        })
        .map(str::to_string)
        .collect()
}

/// Load keywords from a file, or from stdin when the path is `-`.
#[instrument(skip_all, fields(path = %path.display()))]
pub fn load_keywords(path: &Path) -> Result<Vec<String>> {
    let content = if path.as_os_str() == STDIN_PATH {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .map_err(|e| KwgroupError::input(format!("failed to read stdin: {e}")))?;
        buf
    } else {
        std::fs::read_to_string(path).map_err(|e| KwgroupError::io(path, e))?
    };

    let keywords = parse_keywords(&content);
    debug!(keywords = keywords.len(), "keywords loaded");
    Ok(keywords)
}
