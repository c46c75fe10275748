use serde::{Deserialize, Serialize};

/// The fixed set of job categories served by the dashboard. Category names
/// are taken verbatim from the directory names at ingestion time.
pub const JOB_CATEGORIES: [&str; 24] = [
    "ACCOUNTANT",
    "ADVOCATE",
    "AGRICULTURE-MANAGEMENT",
    "APPAREL",
    "ARTS",
    "AUTOMOBILE",
    "AVIATION",
    "BANKING",
    "BPO",
    "BUSINESS-DEVELOPMENT",
    "CHEF",
    "CONSTRUCTION",
    "CONSULTANT",
    "DESIGNER",
    "DIGITAL-MEDIA",
    "ENGINEERING",
    "FINANCE",
    "HEALTHCARE",
    "HR",
    "INFORMATION-TECHNOLOGY",
    "LAW",
    "MEDIA-ENTERTAINMENT",
    "SALES",
    "TEACHER",
];

/// One row of the resumes table. Immutable once written by ingestion.
///
/// `resume_id` is `"<CATEGORY>_<index>"` where the index is the file's
/// position in its category's eligible-file listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResumeRecord {
    pub resume_id: String,
    pub category: String,
    pub resume_text: String,
}

/// One row of the labels table, keyed 1:1 with a resume row. The score is
/// the length-derived heuristic training target, never consulted at serving
/// time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LabelRecord {
    pub resume_id: String,
    pub category: String,
    pub score: u32,
}
