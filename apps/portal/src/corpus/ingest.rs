//! Resume ingestion — walks a directory tree of category folders, extracts
//! text from `.txt`/`.pdf` files, and emits the two row-aligned CSV tables
//! consumed by training and serving.
//!
//! Per-file failures are logged and skipped; the batch always completes and
//! writes whatever it accumulated.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::{info, warn};
use walkdir::WalkDir;

use super::records::{LabelRecord, ResumeRecord};
use super::store;

/// Stored resume text is truncated to this many characters.
pub const MAX_RESUME_CHARS: usize = 5000;
/// Resumes shorter than this after trimming are discarded.
pub const MIN_RESUME_CHARS: usize = 50;

#[derive(Debug, Default)]
pub struct IngestReport {
    pub categories: usize,
    pub resumes: usize,
    pub skipped: usize,
}

/// Runs the full ingestion batch: `data_dir/<CATEGORY>/<file>.{txt,pdf}` in,
/// two CSV tables out. Never aborts on a per-file error.
pub fn run(data_dir: &Path, resumes_csv: &Path, labels_csv: &Path) -> Result<IngestReport> {
    let categories = list_category_dirs(data_dir)
        .with_context(|| format!("failed to read data directory {}", data_dir.display()))?;
    info!(count = categories.len(), "Found job categories");

    let mut resumes: Vec<ResumeRecord> = Vec::new();
    let mut labels: Vec<LabelRecord> = Vec::new();
    let mut skipped = 0usize;

    for category in &categories {
        let cat_path = data_dir.join(category);
        let files = list_resume_files(&cat_path);
        info!(category = %category, files = files.len(), "Processing category");

        // The id index is the file's position in the eligible listing, so a
        // skipped file leaves a hole in the id sequence.
        for (file_idx, file_path) in files.iter().enumerate() {
            let text = match extract_text(file_path) {
                Ok(text) => text,
                Err(e) => {
                    warn!(file = %file_path.display(), error = %e, "Failed to read resume, skipping");
                    skipped += 1;
                    continue;
                }
            };

            let trimmed = text.trim();
            let length = trimmed.chars().count();
            if length < MIN_RESUME_CHARS {
                warn!(file = %file_path.display(), chars = length, "Resume too short, skipping");
                skipped += 1;
                continue;
            }

            let resume_id = format!("{category}_{file_idx}");
            resumes.push(ResumeRecord {
                resume_id: resume_id.clone(),
                category: category.clone(),
                resume_text: truncate_chars(trimmed, MAX_RESUME_CHARS),
            });
            labels.push(LabelRecord {
                resume_id,
                category: category.clone(),
                score: heuristic_quality_score(length),
            });
        }
    }

    store::write_resumes(resumes_csv, &resumes)?;
    store::write_labels(labels_csv, &labels)?;

    let (min_score, max_score) = score_range(&labels);
    info!(
        categories = categories.len(),
        resumes = resumes.len(),
        skipped,
        score_min = min_score,
        score_max = max_score,
        "Ingestion complete"
    );

    Ok(IngestReport {
        categories: categories.len(),
        resumes: resumes.len(),
        skipped,
    })
}

/// Heuristic quality label derived from trimmed text length: base 50,
/// +15 over 500 chars, +15 over 1000, +10 over 2000, capped at 100.
pub fn heuristic_quality_score(length: usize) -> u32 {
    let mut score = 50;
    if length > 500 {
        score += 15;
    }
    if length > 1000 {
        score += 15;
    }
    if length > 2000 {
        score += 10;
    }
    score.min(100)
}

fn list_category_dirs(data_dir: &Path) -> Result<Vec<String>> {
    anyhow::ensure!(data_dir.is_dir(), "{} is not a directory", data_dir.display());
    let dirs: Vec<String> = WalkDir::new(data_dir)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_dir())
        .map(|entry| entry.file_name().to_string_lossy().into_owned())
        .collect();
    Ok(dirs)
}

fn list_resume_files(cat_path: &Path) -> Vec<PathBuf> {
    WalkDir::new(cat_path)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_file())
        .map(|entry| entry.into_path())
        .filter(|path| has_resume_extension(path))
        .collect()
}

fn has_resume_extension(path: &Path) -> bool {
    matches!(
        path.extension().and_then(|ext| ext.to_str()),
        Some("txt") | Some("pdf")
    )
}

fn extract_text(path: &Path) -> Result<String> {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some("txt") => {
            // Lossy read: malformed UTF-8 is replaced, never fatal.
            let bytes = std::fs::read(path)?;
            Ok(String::from_utf8_lossy(&bytes).into_owned())
        }
        Some("pdf") => extract_pdf_text(path),
        _ => anyhow::bail!("unsupported file type: {}", path.display()),
    }
}

#[cfg(feature = "pdf")]
fn extract_pdf_text(path: &Path) -> Result<String> {
    pdf_extract::extract_text(path)
        .map_err(|e| anyhow::anyhow!("PDF extraction failed: {e}"))
}

#[cfg(not(feature = "pdf"))]
fn extract_pdf_text(path: &Path) -> Result<String> {
    anyhow::bail!("built without PDF support: {}", path.display())
}

fn truncate_chars(text: &str, max_chars: usize) -> String {
    text.chars().take(max_chars).collect()
}

fn score_range(labels: &[LabelRecord]) -> (u32, u32) {
    let min = labels.iter().map(|l| l.score).min().unwrap_or(0);
    let max = labels.iter().map(|l| l.score).max().unwrap_or(0);
    (min, max)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn write_file(dir: &Path, name: &str, contents: &str) {
        fs::write(dir.join(name), contents).unwrap();
    }

    fn run_on(data_dir: &Path) -> (Vec<ResumeRecord>, Vec<LabelRecord>, IngestReport) {
        let out = tempfile::tempdir().unwrap();
        let resumes_csv = out.path().join("resumes_clean.csv");
        let labels_csv = out.path().join("labels_clean.csv");
        let report = run(data_dir, &resumes_csv, &labels_csv).unwrap();
        let resumes = store::read_resumes(&resumes_csv).unwrap();
        let labels = store::read_labels(&labels_csv).unwrap();
        (resumes, labels, report)
    }

    #[test]
    fn test_label_boundaries() {
        assert_eq!(heuristic_quality_score(49), 50);
        assert_eq!(heuristic_quality_score(500), 50);
        assert_eq!(heuristic_quality_score(501), 65);
        assert_eq!(heuristic_quality_score(1000), 65);
        assert_eq!(heuristic_quality_score(1001), 80);
        assert_eq!(heuristic_quality_score(2000), 80);
        assert_eq!(heuristic_quality_score(2001), 90);
        assert_eq!(heuristic_quality_score(100_000), 90);
    }

    #[test]
    fn test_length_49_excluded_50_included() {
        let data = tempfile::tempdir().unwrap();
        let cat = data.path().join("ACCOUNTANT");
        fs::create_dir(&cat).unwrap();
        write_file(&cat, "a.txt", &"x".repeat(49));
        write_file(&cat, "b.txt", &"y".repeat(50));

        let (resumes, labels, report) = run_on(data.path());
        assert_eq!(resumes.len(), 1);
        assert_eq!(report.skipped, 1);
        // b.txt is position 1 in the listing even though a.txt was skipped.
        assert_eq!(resumes[0].resume_id, "ACCOUNTANT_1");
        assert_eq!(labels[0].score, 50);
    }

    #[test]
    fn test_trimming_happens_before_length_check() {
        let data = tempfile::tempdir().unwrap();
        let cat = data.path().join("CHEF");
        fs::create_dir(&cat).unwrap();
        // 49 real chars padded by whitespace: still too short.
        write_file(&cat, "padded.txt", &format!("   {}   \n", "x".repeat(49)));

        let (resumes, _, report) = run_on(data.path());
        assert!(resumes.is_empty());
        assert_eq!(report.skipped, 1);
    }

    #[test]
    fn test_text_truncated_to_5000_chars() {
        let data = tempfile::tempdir().unwrap();
        let cat = data.path().join("BANKING");
        fs::create_dir(&cat).unwrap();
        write_file(&cat, "long.txt", &"z".repeat(6000));

        let (resumes, labels, _) = run_on(data.path());
        assert_eq!(resumes[0].resume_text.chars().count(), MAX_RESUME_CHARS);
        // The label sees the pre-truncation length (6000 > 2000).
        assert_eq!(labels[0].score, 90);
    }

    #[test]
    fn test_non_resume_files_ignored_without_consuming_indices() {
        let data = tempfile::tempdir().unwrap();
        let cat = data.path().join("ARTS");
        fs::create_dir(&cat).unwrap();
        write_file(&cat, "README.md", "not a resume");
        write_file(&cat, "a.txt", &"a".repeat(100));

        let (resumes, _, _) = run_on(data.path());
        assert_eq!(resumes.len(), 1);
        assert_eq!(resumes[0].resume_id, "ARTS_0");
    }

    #[test]
    fn test_categories_processed_in_sorted_order_with_aligned_tables() {
        let data = tempfile::tempdir().unwrap();
        for cat in ["SALES", "BANKING", "CHEF"] {
            let dir = data.path().join(cat);
            fs::create_dir(&dir).unwrap();
            write_file(&dir, "r.txt", &format!("{} resume {}", cat, "x".repeat(80)));
        }

        let (resumes, labels, report) = run_on(data.path());
        assert_eq!(report.categories, 3);
        let order: Vec<&str> = resumes.iter().map(|r| r.category.as_str()).collect();
        assert_eq!(order, vec!["BANKING", "CHEF", "SALES"]);
        for (r, l) in resumes.iter().zip(labels.iter()) {
            assert_eq!(r.resume_id, l.resume_id);
            assert_eq!(r.category, l.category);
        }
    }

    #[test]
    fn test_invalid_utf8_read_lossily() {
        let data = tempfile::tempdir().unwrap();
        let cat = data.path().join("LAW");
        fs::create_dir(&cat).unwrap();
        let mut bytes = b"legal counsel ".repeat(10);
        bytes.push(0xFF);
        bytes.extend_from_slice(b" appellate litigation");
        fs::write(cat.join("weird.txt"), bytes).unwrap();

        let (resumes, _, report) = run_on(data.path());
        assert_eq!(resumes.len(), 1);
        assert_eq!(report.skipped, 0);
        assert!(resumes[0].resume_text.contains("appellate"));
    }

    #[test]
    fn test_missing_data_dir_is_an_error() {
        let out = tempfile::tempdir().unwrap();
        let missing = out.path().join("no-such-dir");
        let result = run(
            &missing,
            &out.path().join("r.csv"),
            &out.path().join("l.csv"),
        );
        assert!(result.is_err());
    }
}
