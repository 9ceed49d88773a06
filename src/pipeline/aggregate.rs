//! Group-level statistics over the derived categories

use anyhow::Result;
use polars::prelude::*;

use super::columns::{ANNUAL_MEDICAL_COST_LOG, CHRONIC_COUNT};
use super::stats::{column_values, mean, median, round2, sample_std};
use super::transform::{category_values, AgeGroup, BmiCategory, OrderedCategory};
use crate::report::StatTable;

pub const AGE_GROUP_TITLE: &str = "Annual Medical Cost by Age Group";
pub const BMI_CHRONIC_TITLE: &str = "Chronic Disease Burden by BMI Category";

/// Log-cost statistics of one age group
#[derive(Debug, Clone, PartialEq)]
pub struct AgeGroupCost {
    pub group: AgeGroup,
    /// Rows with a present log-cost
    pub count: usize,
    pub mean_cost: f64,
    pub median_cost: f64,
    pub std_dev: f64,
}

/// Chronic-condition burden of one BMI category
#[derive(Debug, Clone, PartialEq)]
pub struct BmiChronicBurden {
    pub category: BmiCategory,
    pub avg_chronic: f64,
    /// Percentage of rows with at least one chronic condition
    pub chronic_rate: f64,
}

/// Partition `values` by category, keeping display order and dropping
/// categories no row belongs to. Rows without a category are skipped.
fn group_by_category<C, T>(categories: &[Option<C>], values: &[T]) -> Vec<(C, Vec<T>)>
where
    C: OrderedCategory + PartialEq,
    T: Copy,
{
    C::ALL
        .iter()
        .filter_map(|&category| {
            let members: Vec<T> = categories
                .iter()
                .zip(values)
                .filter(|(c, _)| **c == Some(category))
                .map(|(_, v)| *v)
                .collect();
            (!members.is_empty()).then_some((category, members))
        })
        .collect()
}

/// Count, mean, median and standard deviation of the log-cost per age group,
/// rounded to two decimals.
pub fn aggregate_cost_by_age_group(df: &DataFrame) -> Result<Vec<AgeGroupCost>> {
    let groups = category_values::<AgeGroup>(df)?;
    let costs = column_values(df, ANNUAL_MEDICAL_COST_LOG)?;

    Ok(group_by_category(&groups, &costs)
        .into_iter()
        .map(|(group, members)| {
            let present: Vec<f64> = members.into_iter().flatten().collect();
            AgeGroupCost {
                group,
                count: present.len(),
                mean_cost: round2(mean(&present)),
                median_cost: round2(median(&present)),
                std_dev: round2(sample_std(&present)),
            }
        })
        .collect())
}

/// Average chronic count and share of rows with any chronic condition per
/// BMI category, rounded to two decimals.
///
/// A missing chronic count is ignored by the average but counts as "no
/// chronic condition" in the rate.
pub fn aggregate_chronic_by_bmi(df: &DataFrame) -> Result<Vec<BmiChronicBurden>> {
    let categories = category_values::<BmiCategory>(df)?;
    let chronic = column_values(df, CHRONIC_COUNT)?;

    Ok(group_by_category(&categories, &chronic)
        .into_iter()
        .map(|(category, members)| {
            let total = members.len();
            let present: Vec<f64> = members.iter().flatten().copied().collect();
            let with_condition = present.iter().filter(|c| **c > 0.0).count();

            BmiChronicBurden {
                category,
                avg_chronic: round2(mean(&present)),
                chronic_rate: round2(with_condition as f64 / total as f64 * 100.0),
            }
        })
        .collect())
}

pub fn age_group_table(rows: &[AgeGroupCost]) -> StatTable {
    let mut table = StatTable::new(
        AGE_GROUP_TITLE,
        &["Count", "Mean_Cost", "Median_Cost", "Std_Dev"],
    );
    for row in rows {
        table.push_row(
            row.group.label(),
            vec![row.count as f64, row.mean_cost, row.median_cost, row.std_dev],
        );
    }
    table
}

pub fn bmi_chronic_table(rows: &[BmiChronicBurden]) -> StatTable {
    let mut table = StatTable::new(BMI_CHRONIC_TITLE, &["Avg_Chronic", "Chronic_Rate"]);
    for row in rows {
        table.push_row(row.category.label(), vec![row.avg_chronic, row.chronic_rate]);
    }
    table
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_group_by_category_keeps_order_and_skips_empty() {
        let categories = vec![
            Some(AgeGroup::Age60Plus),
            None,
            Some(AgeGroup::Age18To30),
            Some(AgeGroup::Age60Plus),
        ];
        let values = vec![1, 2, 3, 4];

        let grouped = group_by_category(&categories, &values);
        assert_eq!(
            grouped,
            vec![
                (AgeGroup::Age18To30, vec![3]),
                (AgeGroup::Age60Plus, vec![1, 4]),
            ]
        );
    }
}
