use std::path::PathBuf;

use anyhow::{Context, Result};

/// Application configuration loaded from environment variables.
/// Every variable has a working default, so all three binaries run with no
/// environment at all; the paths mirror the conventional repo layout
/// (`data/` for tables, `models/` for artifacts).
#[derive(Debug, Clone)]
pub struct Config {
    /// Root of the resume tree: one subdirectory per job category.
    pub data_dir: PathBuf,
    pub resumes_csv: PathBuf,
    pub labels_csv: PathBuf,
    pub models_dir: PathBuf,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            data_dir: env_or("DATA_DIR", "data/data").into(),
            resumes_csv: env_or("RESUMES_CSV", "data/resumes_clean.csv").into(),
            labels_csv: env_or("LABELS_CSV", "data/labels_clean.csv").into(),
            models_dir: env_or("MODELS_DIR", "models").into(),
            port: env_or("PORT", "8080")
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: env_or("RUST_LOG", "info"),
        })
    }

    pub fn vectorizer_path(&self) -> PathBuf {
        self.models_dir.join("vectorizer.bin")
    }

    pub fn model_path(&self) -> PathBuf {
        self.models_dir.join("trained_model.bin")
    }

    pub fn training_report_path(&self) -> PathBuf {
        self.models_dir.join("training_report.json")
    }
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}
