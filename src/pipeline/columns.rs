//! Column vocabulary of the medical insurance dataset

pub const AGE: &str = "age";
pub const INCOME: &str = "income";
pub const BMI: &str = "bmi";
pub const SMOKER: &str = "smoker";
pub const ALCOHOL_FREQ: &str = "alcohol_freq";
pub const CHRONIC_COUNT: &str = "chronic_count";
pub const RISK_SCORE: &str = "risk_score";
pub const CLAIMS_COUNT: &str = "claims_count";
pub const ANNUAL_MEDICAL_COST: &str = "annual_medical_cost";

// Derived columns
pub const ANNUAL_MEDICAL_COST_LOG: &str = "annual_medical_cost_log";
pub const BMI_CATEGORY: &str = "bmi_category";
pub const AGE_GROUP: &str = "age_group";
pub const INCOME_K: &str = "income_k";

/// Label written over absent alcohol frequencies
pub const NO_ALCOHOL: &str = "No Alcohol";

/// Numeric columns covered by the summary statistics table, in display order
pub const SUMMARY_COLUMNS: [&str; 16] = [
    "age",
    "income",
    "bmi",
    "systolic_bp",
    "diastolic_bp",
    "ldl",
    "hba1c",
    "deductible",
    "copay",
    "risk_score",
    "annual_medical_cost",
    "annual_premium",
    "monthly_premium",
    "claims_count",
    "avg_claim_amount",
    "total_claims_paid",
];

/// Every raw column the pipeline reads, summary columns first
pub fn required_columns() -> Vec<&'static str> {
    let mut required: Vec<&'static str> = SUMMARY_COLUMNS.to_vec();
    for name in [AGE, INCOME, BMI, SMOKER, ALCOHOL_FREQ, CHRONIC_COUNT, RISK_SCORE, CLAIMS_COUNT] {
        if !required.contains(&name) {
            required.push(name);
        }
    }
    required
}
