//! CSV persistence for the two row-aligned tables produced by ingestion.

use std::fs;
use std::path::Path;

use anyhow::{ensure, Context, Result};

use super::records::{LabelRecord, ResumeRecord};

/// The resume and label tables, loaded once per process and read-only
/// thereafter.
#[derive(Debug)]
pub struct Corpus {
    pub resumes: Vec<ResumeRecord>,
    pub labels: Vec<LabelRecord>,
}

impl Corpus {
    /// Loads both tables. A missing or malformed file is an error; callers
    /// decide whether that is fatal (it is, for both training and serving).
    pub fn load(resumes_csv: &Path, labels_csv: &Path) -> Result<Self> {
        let resumes = read_resumes(resumes_csv)?;
        let labels = read_labels(labels_csv)?;
        ensure!(
            resumes.len() == labels.len(),
            "resume table ({} rows) and label table ({} rows) are not aligned",
            resumes.len(),
            labels.len()
        );
        Ok(Corpus { resumes, labels })
    }

    pub fn total(&self) -> usize {
        self.resumes.len()
    }

    pub fn category_count(&self, category: &str) -> usize {
        self.resumes
            .iter()
            .filter(|r| r.category == category)
            .count()
    }

    pub fn contains_resume(&self, resume_id: &str) -> bool {
        self.resumes.iter().any(|r| r.resume_id == resume_id)
    }
}

pub fn read_resumes(path: &Path) -> Result<Vec<ResumeRecord>> {
    let mut reader = csv::Reader::from_path(path)
        .with_context(|| format!("failed to open resume table {}", path.display()))?;
    let mut rows = Vec::new();
    for record in reader.deserialize() {
        let record: ResumeRecord =
            record.with_context(|| format!("malformed row in {}", path.display()))?;
        rows.push(record);
    }
    Ok(rows)
}

pub fn read_labels(path: &Path) -> Result<Vec<LabelRecord>> {
    let mut reader = csv::Reader::from_path(path)
        .with_context(|| format!("failed to open label table {}", path.display()))?;
    let mut rows = Vec::new();
    for record in reader.deserialize() {
        let record: LabelRecord =
            record.with_context(|| format!("malformed row in {}", path.display()))?;
        rows.push(record);
    }
    Ok(rows)
}

pub fn write_resumes(path: &Path, rows: &[ResumeRecord]) -> Result<()> {
    create_parent_dir(path)?;
    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("failed to create {}", path.display()))?;
    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;
    Ok(())
}

pub fn write_labels(path: &Path, rows: &[LabelRecord]) -> Result<()> {
    create_parent_dir(path)?;
    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("failed to create {}", path.display()))?;
    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;
    Ok(())
}

fn create_parent_dir(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .with_context(|| format!("failed to create directory {}", parent.display()))?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_rows() -> (Vec<ResumeRecord>, Vec<LabelRecord>) {
        let resumes = vec![
            ResumeRecord {
                resume_id: "ACCOUNTANT_0".to_string(),
                category: "ACCOUNTANT".to_string(),
                resume_text: "ledger reconciliation, month-end close".to_string(),
            },
            ResumeRecord {
                resume_id: "CHEF_0".to_string(),
                category: "CHEF".to_string(),
                resume_text: "line cook, menu development".to_string(),
            },
        ];
        let labels = vec![
            LabelRecord {
                resume_id: "ACCOUNTANT_0".to_string(),
                category: "ACCOUNTANT".to_string(),
                score: 50,
            },
            LabelRecord {
                resume_id: "CHEF_0".to_string(),
                category: "CHEF".to_string(),
                score: 65,
            },
        ];
        (resumes, labels)
    }

    #[test]
    fn test_round_trip_preserves_rows() {
        let dir = tempfile::tempdir().unwrap();
        let resumes_csv = dir.path().join("resumes_clean.csv");
        let labels_csv = dir.path().join("labels_clean.csv");
        let (resumes, labels) = sample_rows();

        write_resumes(&resumes_csv, &resumes).unwrap();
        write_labels(&labels_csv, &labels).unwrap();

        let corpus = Corpus::load(&resumes_csv, &labels_csv).unwrap();
        assert_eq!(corpus.total(), 2);
        assert_eq!(corpus.resumes[0].resume_id, "ACCOUNTANT_0");
        assert_eq!(corpus.resumes[0].resume_text, resumes[0].resume_text);
        assert_eq!(corpus.labels[1].score, 65);
    }

    #[test]
    fn test_text_with_commas_and_newlines_survives() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("resumes.csv");
        let rows = vec![ResumeRecord {
            resume_id: "LAW_3".to_string(),
            category: "LAW".to_string(),
            resume_text: "litigation, appeals\ncontract review, \"discovery\"".to_string(),
        }];

        write_resumes(&path, &rows).unwrap();
        let read_back = read_resumes(&path).unwrap();
        assert_eq!(read_back[0].resume_text, rows[0].resume_text);
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.csv");
        assert!(read_resumes(&missing).is_err());
    }

    #[test]
    fn test_misaligned_tables_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let resumes_csv = dir.path().join("resumes.csv");
        let labels_csv = dir.path().join("labels.csv");
        let (resumes, mut labels) = sample_rows();
        labels.pop();

        write_resumes(&resumes_csv, &resumes).unwrap();
        write_labels(&labels_csv, &labels).unwrap();
        assert!(Corpus::load(&resumes_csv, &labels_csv).is_err());
    }

    #[test]
    fn test_category_count_and_lookup() {
        let (resumes, labels) = sample_rows();
        let corpus = Corpus { resumes, labels };
        assert_eq!(corpus.category_count("ACCOUNTANT"), 1);
        assert_eq!(corpus.category_count("BANKING"), 0);
        assert!(corpus.contains_resume("CHEF_0"));
        assert!(!corpus.contains_resume("CHEF_1"));
    }
}
