//! Shared test utilities and fixture generators

#![allow(dead_code)]

use polars::prelude::*;
use std::path::PathBuf;
use tempfile::TempDir;

/// Create a small insurance table with every column the pipeline reads
///
/// This DataFrame includes:
/// - one row per age group and BMI category, plus a row aged 17 (no group)
/// - two missing `alcohol_freq` values
/// - one missing `chronic_count`
/// - both smoker states, "Never" first
pub fn create_insurance_dataframe() -> DataFrame {
    df! {
        "person_id" => [1i64, 2, 3, 4, 5, 6],
        "age" => [25.0f64, 40.0, 50.0, 70.0, 17.0, 30.0],
        "income" => [30000.0f64, 55000.0, 72000.0, 41000.0, 12000.0, 95000.0],
        "bmi" => [17.0f64, 22.0, 27.5, 31.0, 18.5, 30.0],
        "systolic_bp" => [110.0f64, 120.0, 135.0, 150.0, 105.0, 125.0],
        "diastolic_bp" => [70.0f64, 80.0, 85.0, 95.0, 65.0, 82.0],
        "ldl" => [90.0f64, 110.0, 130.0, 160.0, 85.0, 120.0],
        "hba1c" => [5.1f64, 5.4, 5.9, 6.8, 5.0, 5.6],
        "deductible" => [500.0f64, 1000.0, 1000.0, 2000.0, 500.0, 1500.0],
        "copay" => [10.0f64, 20.0, 20.0, 40.0, 10.0, 30.0],
        "risk_score" => [0.1f64, 0.3, 0.5, 0.9, 0.05, 0.4],
        "annual_medical_cost" => [800.0f64, 1500.0, 3200.0, 9800.0, 400.0, 2100.0],
        "annual_premium" => [1200.0f64, 1800.0, 2400.0, 4800.0, 900.0, 2100.0],
        "monthly_premium" => [100.0f64, 150.0, 200.0, 400.0, 75.0, 175.0],
        "claims_count" => [0i64, 1, 2, 6, 0, 1],
        "avg_claim_amount" => [0.0f64, 900.0, 1100.0, 1400.0, 0.0, 1000.0],
        "total_claims_paid" => [0.0f64, 900.0, 2200.0, 8400.0, 0.0, 1000.0],
        "smoker" => ["Never", "Current", "Never", "Current", "Former", "Never"],
        "alcohol_freq" => [Some("Weekly"), None, Some("Daily"), None, Some("Occasional"), Some("Weekly")],
        "chronic_count" => [Some(0i64), Some(1), Some(0), Some(3), Some(0), None],
    }
    .unwrap()
}

/// Write `df` as CSV into a fresh temp directory
///
/// The directory guard must stay alive as long as the file is used.
pub fn write_csv(df: &mut DataFrame, file_name: &str) -> (TempDir, PathBuf) {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join(file_name);
    let mut file = std::fs::File::create(&path).unwrap();
    CsvWriter::new(&mut file).finish(df).unwrap();
    (dir, path)
}

/// Create a larger synthetic insurance table for stress tests
pub fn create_large_insurance_dataframe(rows: usize) -> DataFrame {
    use rand::Rng;
    let mut rng = rand::thread_rng();

    let base = create_insurance_dataframe();
    let mut columns: Vec<Column> = Vec::with_capacity(base.width());
    for col in base.get_columns() {
        let name = col.name().clone();
        let column = match col.dtype() {
            DataType::Float64 => {
                let values: Vec<f64> = (0..rows).map(|_| rng.gen_range(0.0..100.0)).collect();
                Column::new(name, values)
            }
            DataType::Int64 => {
                let values: Vec<i64> = (0..rows).map(|_| rng.gen_range(0..5)).collect();
                Column::new(name, values)
            }
            _ => {
                let choices = ["Never", "Current", "Former"];
                let values: Vec<&str> = (0..rows).map(|_| choices[rng.gen_range(0..3)]).collect();
                Column::new(name, values)
            }
        };
        columns.push(column);
    }
    DataFrame::new(columns).unwrap()
}
