//! The fixed catalogue of nine artifacts produced by a run

use anyhow::{Context, Result};
use polars::prelude::*;

use super::{
    render_boxplot, render_histogram, render_regression, render_scatter, render_table,
    Annotation, Artifact, ChartLabels, TableStyle, HISTOGRAM_BINS,
};
use crate::pipeline::columns::{
    AGE, ANNUAL_MEDICAL_COST, ANNUAL_MEDICAL_COST_LOG, CLAIMS_COUNT, INCOME_K, RISK_SCORE, SMOKER,
};
use crate::pipeline::stats::{column_values, median, present, quantile};
use crate::pipeline::Analysis;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArtifactKind {
    SummaryTable,
    CostBeforeTransformation,
    CostAfterTransformation,
    AgeGroupTable,
    BmiChronicTable,
    AgeCostTrend,
    SmokingCost,
    RiskClaims,
    IncomeCost,
}

impl ArtifactKind {
    /// Every artifact in production order
    pub const ALL: [ArtifactKind; 9] = [
        Self::SummaryTable,
        Self::CostBeforeTransformation,
        Self::CostAfterTransformation,
        Self::AgeGroupTable,
        Self::BmiChronicTable,
        Self::AgeCostTrend,
        Self::SmokingCost,
        Self::RiskClaims,
        Self::IncomeCost,
    ];

    pub fn file_name(self) -> &'static str {
        match self {
            Self::SummaryTable => "summary_statistics_medical_insurance.png",
            Self::CostBeforeTransformation => "before_transformation.png",
            Self::CostAfterTransformation => "after_transformation.png",
            Self::AgeGroupTable => "age_group_cost_table.png",
            Self::BmiChronicTable => "bmi_chronic_burden_table.png",
            Self::AgeCostTrend => "annual_medical_trend.png",
            Self::SmokingCost => "smoking_vs_medical_cost.png",
            Self::RiskClaims => "risk_scores_claim_counts.png",
            Self::IncomeCost => "income_medical_cost.png",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Self::SummaryTable => "Summary statistics table",
            Self::CostBeforeTransformation => "Cost histogram (raw)",
            Self::CostAfterTransformation => "Cost histogram (log)",
            Self::AgeGroupTable => "Cost by age group table",
            Self::BmiChronicTable => "Chronic burden by BMI table",
            Self::AgeCostTrend => "Cost vs age regression",
            Self::SmokingCost => "Cost by smoker box plot",
            Self::RiskClaims => "Risk vs claims scatter",
            Self::IncomeCost => "Cost vs income regression",
        }
    }
}

/// Render one artifact from the analysed frame.
///
/// `df` must already carry the derived columns.
pub fn render_artifact(
    kind: ArtifactKind,
    df: &DataFrame,
    analysis: &Analysis,
    dpi: u32,
) -> Result<Artifact> {
    let file_name = kind.file_name();

    let artifact = match kind {
        ArtifactKind::SummaryTable => {
            render_table(file_name, &analysis.summary, &TableStyle::SUMMARY, dpi)?
        }
        ArtifactKind::CostBeforeTransformation | ArtifactKind::CostAfterTransformation => {
            let (column, title) = if kind == ArtifactKind::CostBeforeTransformation {
                (
                    ANNUAL_MEDICAL_COST,
                    "Distribution of Annual Medical Cost (Before Transformation)",
                )
            } else {
                (
                    ANNUAL_MEDICAL_COST_LOG,
                    "Distribution of Annual Medical Cost (After Transformation)",
                )
            };
            let values = present(&column_values(df, column)?);
            let labels = ChartLabels {
                title,
                x_label: "Cost ($)",
                y_label: "Frequency",
            };
            render_histogram(file_name, labels, &values, HISTOGRAM_BINS, dpi)?
        }
        ArtifactKind::AgeGroupTable => render_table(
            file_name,
            &analysis.age_group_table(),
            &TableStyle::GROUPED,
            dpi,
        )?,
        ArtifactKind::BmiChronicTable => render_table(
            file_name,
            &analysis.bmi_chronic_table(),
            &TableStyle::GROUPED,
            dpi,
        )?,
        ArtifactKind::AgeCostTrend => {
            let points = paired_values(df, AGE, ANNUAL_MEDICAL_COST_LOG)?;
            let costs = present(&column_values(df, ANNUAL_MEDICAL_COST_LOG)?);
            let annotation = Annotation::new(
                &["Clear upward trend", "Higher costs at older ages"],
                (60.0, quantile(&costs, 0.75)),
                (30.0, quantile(&costs, 0.9)),
            );
            let labels = ChartLabels {
                title: "RegPlot: Plot of Annual Medical Cost with Age",
                x_label: "Age",
                y_label: "Annual Medical Cost ($)",
            };
            render_regression(file_name, labels, &points, &annotation, dpi)?
        }
        ArtifactKind::SmokingCost => {
            let groups = smoker_groups(df)?;
            let costs = present(&column_values(df, ANNUAL_MEDICAL_COST_LOG)?);
            let annotation = Annotation::new(
                &["Smokers show", "higher median & variability"],
                (1.0, median(&costs)),
                (0.5, quantile(&costs, 0.9)),
            );
            let labels = ChartLabels {
                title: "BoxPlot: Impact of Smoking on Medical Cost",
                x_label: "Smoker Status",
                y_label: "Annual Medical Cost ($)",
            };
            render_boxplot(file_name, labels, &groups, &annotation, dpi)?
        }
        ArtifactKind::RiskClaims => {
            let points = paired_values(df, RISK_SCORE, CLAIMS_COUNT)?;
            let annotation = Annotation::new(
                &["Positive relationship", "between risk & utilization"],
                (0.6, 4.0),
                (0.2, 8.0),
            );
            let labels = ChartLabels {
                title: "ScatterPlot: Risk Scores vs Claims Counts",
                x_label: "Risk Score",
                y_label: "Number of Claims",
            };
            render_scatter(file_name, labels, &points, 0.4, &annotation, dpi)?
        }
        ArtifactKind::IncomeCost => {
            let points = paired_values(df, INCOME_K, ANNUAL_MEDICAL_COST_LOG)?;
            let incomes = present(&column_values(df, INCOME_K)?);
            let costs = present(&column_values(df, ANNUAL_MEDICAL_COST_LOG)?);
            let annotation = Annotation::new(
                &[
                    "Weak but positive trend:",
                    "Higher income associated with",
                    "slightly higher utilization",
                ],
                (quantile(&incomes, 0.7), quantile(&costs, 0.6)),
                (quantile(&incomes, 0.3), quantile(&costs, 0.85)),
            );
            let labels = ChartLabels {
                title: "RegPlot: Relationship Between Income and Annual Medical Cost",
                x_label: "Annual Income ($ thousands)",
                y_label: "Annual Medical Cost($)",
            };
            render_regression(file_name, labels, &points, &annotation, dpi)?
        }
    };

    Ok(artifact)
}

/// Render the whole catalogue, stopping at the first failure
pub fn render_all(df: &DataFrame, analysis: &Analysis, dpi: u32) -> Result<Vec<Artifact>> {
    ArtifactKind::ALL
        .iter()
        .map(|&kind| {
            render_artifact(kind, df, analysis, dpi)
                .with_context(|| format!("Failed to render {}", kind.file_name()))
        })
        .collect()
}

/// Rows where both columns hold a value
pub fn paired_values(df: &DataFrame, x: &str, y: &str) -> Result<Vec<(f64, f64)>> {
    let xs = column_values(df, x)?;
    let ys = column_values(df, y)?;
    Ok(xs
        .into_iter()
        .zip(ys)
        .filter_map(|(x, y)| Some((x?, y?)))
        .collect())
}

/// Log-costs split by smoker status, groups in order of first appearance.
/// Rows without a smoker status are dropped.
pub fn smoker_groups(df: &DataFrame) -> Result<Vec<(String, Vec<f64>)>> {
    let status = df
        .column(SMOKER)
        .with_context(|| format!("Required column '{}' not found", SMOKER))?
        .cast(&DataType::String)?;
    let costs = column_values(df, ANNUAL_MEDICAL_COST_LOG)?;

    let mut groups: Vec<(String, Vec<f64>)> = Vec::new();
    for (label, cost) in status.str()?.into_iter().zip(costs) {
        let Some(label) = label else { continue };
        let index = match groups.iter().position(|(name, _)| name == label) {
            Some(i) => i,
            None => {
                groups.push((label.to_string(), Vec::new()));
                groups.len() - 1
            }
        };
        if let Some(cost) = cost {
            groups[index].1.push(cost);
        }
    }
    Ok(groups)
}
