//! Runs the stages of a sales-forge job in order.
//!
//! `generate`: build the raw dataset, clean it, export it.
//! `clean`: load a raw CSV, clean it, export it.

use std::path::{Path, PathBuf};
use std::time::Instant;

use thiserror::Error;
use tracing::info;

use super::config::{ConfigError, ForgeConfig};
use crate::dataset::{
    load_raw_file, AssembledDataset, CleanedSummary, Dataset, DatasetAssembler, RawSummary,
};
use crate::error::{DatasetError, ExportError, GeneratorError};
use crate::export::{
    write_cleaned_csv_file, write_parquet, write_raw_csv_file, write_summary_json, RunSummary,
};
use crate::generator::RecordGenerator;
use crate::records::{RawOrder, RAW_DECIMALS};

/// Errors that can stop a run before it produces a cleaned dataset.
#[derive(Debug, Error)]
pub enum RunError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Generation error: {0}")]
    Generator(#[from] GeneratorError),

    #[error("Dataset error: {0}")]
    Dataset(#[from] DatasetError),

    #[error("Export error: {0}")]
    Export(#[from] ExportError),
}

/// What a finished run produced.
#[derive(Debug, Clone)]
pub struct RunOutcome {
    pub summary: RunSummary,
    /// Files written, in the order they were written.
    pub files: Vec<PathBuf>,
}

/// Executes generate and clean runs under one configuration.
#[derive(Debug, Clone)]
pub struct ForgeRunner {
    config: ForgeConfig,
}

impl ForgeRunner {
    /// Validates `config` and builds a runner.
    pub fn new(config: ForgeConfig) -> Result<Self, RunError> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &ForgeConfig {
        &self.config
    }

    /// Generates the raw dataset and cleans it, without touching disk.
    pub fn build(&self) -> Result<(Dataset<RawOrder>, AssembledDataset), RunError> {
        let generator = RecordGenerator::new(self.config.generator.clone())?;
        let raw = generator.generate()?;
        RawSummary::from_dataset(&raw).log();

        let assembled = DatasetAssembler::new(self.config.cleaning.clone()).assemble(raw.clone());
        Ok((raw, assembled))
    }

    /// Generate, clean and export.
    pub fn run_generate(&self) -> Result<RunOutcome, RunError> {
        let started = Instant::now();
        info!(
            records = self.config.generator.record_count,
            start = %self.config.generator.start_date,
            end = %self.config.generator.end_date,
            seed = self.config.generator.seed,
            workers = self.config.generator.workers,
            "Starting generate run"
        );

        let (raw, assembled) = self.build()?;
        let outcome = self.export(&raw, assembled, true)?;

        info!(
            rows = outcome.summary.cleaned.rows,
            files = outcome.files.len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Generate run complete"
        );
        Ok(outcome)
    }

    /// Load a raw CSV, clean and export.
    pub fn run_clean(&self, input: &Path) -> Result<RunOutcome, RunError> {
        let started = Instant::now();
        info!(input = %input.display(), "Starting clean run");

        let raw = load_raw_file(input)?;
        RawSummary::from_dataset(&raw).log();
        let assembled = DatasetAssembler::new(self.config.cleaning.clone()).assemble(raw.clone());
        let outcome = self.export(&raw, assembled, false)?;

        info!(
            rows = outcome.summary.cleaned.rows,
            files = outcome.files.len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Clean run complete"
        );
        Ok(outcome)
    }

    fn export(
        &self,
        raw: &Dataset<RawOrder>,
        assembled: AssembledDataset,
        write_raw: bool,
    ) -> Result<RunOutcome, RunError> {
        let output = &self.config.output;
        let decimals = self.config.cleaning.decimals as usize;
        let mut files = Vec::new();

        if write_raw && output.raw_csv {
            let path = output.raw_csv_path();
            write_raw_csv_file(raw, &path, RAW_DECIMALS)?;
            files.push(path);
        }

        let path = output.cleaned_csv_path();
        write_cleaned_csv_file(&assembled.dataset, &path, decimals)?;
        files.push(path);

        if output.parquet {
            let path = output.parquet_path();
            write_parquet(&assembled.dataset, &path)?;
            files.push(path);
        }

        let summary = RunSummary {
            raw: RawSummary::from_dataset(raw),
            cleaned: CleanedSummary::from_dataset(&assembled.dataset),
            anomalies: assembled.report,
        };

        if output.summary {
            let path = output.summary_path();
            write_summary_json(&summary, &path)?;
            files.push(path);
        }

        Ok(RunOutcome { summary, files })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn small_config(dir: &Path) -> ForgeConfig {
        ForgeConfig::new()
            .with_record_count(200)
            .with_date_range(
                NaiveDate::from_ymd_opt(2024, 1, 1).expect("valid date"),
                NaiveDate::from_ymd_opt(2024, 12, 31).expect("valid date"),
            )
            .with_output_dir(dir)
    }

    #[test]
    fn test_invalid_config_rejected() {
        let err = ForgeRunner::new(ForgeConfig::new().with_workers(0)).expect_err("invalid");
        assert!(matches!(err, RunError::Config(_)));
    }

    #[test]
    fn test_build_keeps_every_generated_row() {
        let dir = tempfile::tempdir().expect("tempdir");
        let runner = ForgeRunner::new(small_config(dir.path())).expect("runner");
        let (raw, assembled) = runner.build().expect("build");
        assert_eq!(raw.len(), 200);
        assert_eq!(assembled.dataset.len(), 200);
        assert_eq!(assembled.report.excluded_rows, 0);
    }

    #[test]
    fn test_run_generate_writes_files() {
        let dir = tempfile::tempdir().expect("tempdir");
        let runner = ForgeRunner::new(small_config(dir.path()).with_parquet(true)).expect("runner");
        let outcome = runner.run_generate().expect("run");

        let names: Vec<String> = outcome
            .files
            .iter()
            .filter_map(|p| p.file_name().map(|n| n.to_string_lossy().into_owned()))
            .collect();
        assert_eq!(
            names,
            vec![
                "raw_sales.csv",
                "cleaned_sales.csv",
                "cleaned_sales.parquet",
                "summary.json"
            ]
        );
        for file in &outcome.files {
            assert!(file.exists(), "{} missing", file.display());
        }
        assert_eq!(outcome.summary.raw.rows, 200);
        assert_eq!(outcome.summary.cleaned.rows, 200);
    }

    #[test]
    fn test_run_clean_from_generated_csv() {
        let dir = tempfile::tempdir().expect("tempdir");
        let runner = ForgeRunner::new(small_config(dir.path())).expect("runner");
        let generated = runner.run_generate().expect("generate");

        let clean_dir = dir.path().join("recleaned");
        let runner = ForgeRunner::new(small_config(&clean_dir)).expect("runner");
        let outcome = runner
            .run_clean(&dir.path().join("raw_sales.csv"))
            .expect("clean");

        assert!(!clean_dir.join("raw_sales.csv").exists());
        assert_eq!(outcome.summary.cleaned, generated.summary.cleaned);
        let first = std::fs::read_to_string(dir.path().join("cleaned_sales.csv")).expect("read");
        let second = std::fs::read_to_string(clean_dir.join("cleaned_sales.csv")).expect("read");
        assert_eq!(first, second);
    }

    #[test]
    fn test_run_clean_all_rows_excluded_with_parquet() {
        let dir = tempfile::tempdir().expect("tempdir");
        let input = dir.path().join("raw.csv");
        std::fs::write(
            &input,
            "Order_ID,Order_Date,Ship_Date,Ship_Mode,Customer_Name,Segment,City,State,Region,Category,Sub_Category,Product_Name,Sales,Quantity,Discount,Profit\n\
             ORD-2024-00001,2024-03-15,2024-03-10,Standard Class,Mary Smith,Consumer,Chicago,Illinois,Central,Technology,Laptops,MacBook Air M3,1199.00,3,0.00,239.80\n",
        )
        .expect("write");

        let out = dir.path().join("out");
        let runner = ForgeRunner::new(small_config(&out).with_parquet(true)).expect("runner");
        let outcome = runner.run_clean(&input).expect("clean");

        assert_eq!(outcome.summary.raw.rows, 1);
        assert_eq!(outcome.summary.cleaned.rows, 0);
        assert_eq!(outcome.summary.anomalies.excluded_rows, 1);
        assert!(outcome.files.contains(&out.join("cleaned_sales.parquet")));
        assert!(outcome.files.contains(&out.join("summary.json")));
        for file in &outcome.files {
            assert!(file.exists(), "{} missing", file.display());
        }
    }

    #[test]
    fn test_run_clean_missing_input() {
        let dir = tempfile::tempdir().expect("tempdir");
        let runner = ForgeRunner::new(small_config(dir.path())).expect("runner");
        let err = runner
            .run_clean(&dir.path().join("absent.csv"))
            .expect_err("missing input");
        assert!(matches!(err, RunError::Dataset(DatasetError::Io(_))));
    }
}
