use super::types::{DiffFile, Hunk};
use super::PrError;

/// Parse a unified diff string (GitHub's `application/vnd.github.diff`
/// output) into a vector of DiffFile structs.
///
/// Each file section starts with `diff --git a/{path} b/{path}`. New files
/// have `--- /dev/null`, deleted files `+++ /dev/null`. Hunks start with
/// `@@ -{old_start},{old_count} +{new_start},{new_count} @@` and their body is
/// read against those counts, so a removed line such as `--- x` inside a hunk
/// is a deletion rather than a file header.
///
/// Hunk lines keep their prefix: '+' for additions, '-' for deletions,
/// ' ' for context, '\' for "No newline at end of file". Every body line,
/// marker lines included, occupies one diff position.
pub fn parse_diff(raw_diff: &str) -> Result<Vec<DiffFile>, PrError> {
    let mut files: Vec<DiffFile> = Vec::new();
    let mut open: Option<OpenHunk> = None;

    for line in raw_diff.lines() {
        if let Some(current) = open.as_mut() {
            if let Some(kind) = current.classify(line) {
                if let Some(file) = files.last_mut() {
                    current.push(kind, line, file);
                }
                continue;
            }
        }
        close_hunk(&mut files, &mut open);

        if let Some(rest) = line.strip_prefix("diff --git ") {
            files.push(parse_file_header(rest)?);
        } else if line.starts_with("@@") {
            let (old_count, new_start, new_count) = parse_hunk_header(line)?;
            if let Some(file) = files.last() {
                let position = file
                    .hunks
                    .last()
                    .map_or(0, |prev| prev.position + prev.lines.len() + 1);
                open = Some(OpenHunk::new(Hunk {
                    position,
                    old_count,
                    new_start,
                    new_count,
                    lines: Vec::new(),
                }));
            }
        } else if let Some(file) = files.last_mut() {
            if line.strip_prefix("--- ").map(str::trim) == Some("/dev/null") {
                file.is_new = true;
            } else if line.strip_prefix("+++ ").map(str::trim) == Some("/dev/null") {
                file.is_deleted = true;
            }
        }
    }

    close_hunk(&mut files, &mut open);
    Ok(files)
}

enum BodyLine {
    Added,
    Removed,
    Context,
    NoNewlineMarker,
}

/// Hunk being filled, with the old/new line budget its header has left.
struct OpenHunk {
    hunk: Hunk,
    old_remaining: usize,
    new_remaining: usize,
}

impl OpenHunk {
    fn new(hunk: Hunk) -> Self {
        Self {
            old_remaining: hunk.old_count,
            new_remaining: hunk.new_count,
            hunk,
        }
    }

    /// `None` once the line can no longer belong to this hunk.
    fn classify(&self, line: &str) -> Option<BodyLine> {
        let has_old = self.old_remaining > 0;
        let has_new = self.new_remaining > 0;
        match line.as_bytes().first() {
            Some(b'\\') if !self.hunk.lines.is_empty() => Some(BodyLine::NoNewlineMarker),
            Some(b'+') if has_new => Some(BodyLine::Added),
            Some(b'-') if has_old => Some(BodyLine::Removed),
            // some tools strip the leading space from blank context lines
            Some(b' ') | None if has_old && has_new => Some(BodyLine::Context),
            _ => None,
        }
    }

    fn push(&mut self, kind: BodyLine, line: &str, file: &mut DiffFile) {
        match kind {
            BodyLine::Added => {
                self.new_remaining -= 1;
                file.additions += 1;
            }
            BodyLine::Removed => {
                self.old_remaining -= 1;
                file.deletions += 1;
            }
            BodyLine::Context => {
                self.old_remaining -= 1;
                self.new_remaining -= 1;
            }
            BodyLine::NoNewlineMarker => {}
        }
        let line = if line.is_empty() { " " } else { line };
        self.hunk.lines.push(line.to_string());
    }
}

fn close_hunk(files: &mut [DiffFile], open: &mut Option<OpenHunk>) {
    if let (Some(file), Some(open)) = (files.last_mut(), open.take()) {
        file.hunks.push(open.hunk);
    }
}

fn parse_file_header(rest: &str) -> Result<DiffFile, PrError> {
    let mut parts = rest.split_whitespace();
    let a_path = parts
        .next()
        .ok_or_else(|| PrError::DiffParse("Missing a/ path in diff header".to_string()))?;
    let b_path = parts
        .next()
        .ok_or_else(|| PrError::DiffParse("Missing b/ path in diff header".to_string()))?;
    let path = b_path
        .strip_prefix("b/")
        .or_else(|| a_path.strip_prefix("a/"))
        .unwrap_or(b_path)
        .to_string();
    Ok(DiffFile {
        path,
        is_new: false,
        is_deleted: false,
        additions: 0,
        deletions: 0,
        hunks: Vec::new(),
    })
}

/// Returns `(old_count, new_start, new_count)`; the old start is validated
/// but not kept.
fn parse_hunk_header(line: &str) -> Result<(usize, usize, usize), PrError> {
    let header = line
        .trim()
        .strip_prefix("@@")
        .ok_or_else(|| PrError::DiffParse("Invalid hunk header".to_string()))?;
    let (ranges, _section) = header.split_once("@@").unwrap_or((header, ""));
    let mut parts = ranges.split_whitespace();
    let old_part = parts
        .next()
        .ok_or_else(|| PrError::DiffParse("Missing old range".to_string()))?;
    let new_part = parts
        .next()
        .ok_or_else(|| PrError::DiffParse("Missing new range".to_string()))?;

    let (_, old_count) = parse_range(old_part, '-')?;
    let (new_start, new_count) = parse_range(new_part, '+')?;

    Ok((old_count, new_start, new_count))
}

fn parse_range(part: &str, prefix: char) -> Result<(usize, usize), PrError> {
    let range = part
        .strip_prefix(prefix)
        .ok_or_else(|| PrError::DiffParse("Invalid range prefix".to_string()))?;
    let (start_str, count_str) = match range.split_once(',') {
        Some((start, count)) => (start, count),
        None => (range, "1"),
    };
    let start = start_str.parse::<usize>().map_err(|_| {
        PrError::DiffParse(format!("Invalid range start in {}", part))
    })?;
    let count = count_str.parse::<usize>().map_err(|_| {
        PrError::DiffParse(format!("Invalid range count in {}", part))
    })?;
    Ok((start, count))
}
