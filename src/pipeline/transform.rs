//! Derived columns: log-scaled cost, BMI category, age group and income in thousands

use std::fmt;

use anyhow::Result;
use polars::prelude::*;

use super::columns::{
    AGE, AGE_GROUP, ANNUAL_MEDICAL_COST, ANNUAL_MEDICAL_COST_LOG, BMI, BMI_CATEGORY, INCOME,
    INCOME_K,
};
use super::stats::column_values;

/// Which side of each bin interval is closed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Closed {
    /// `[lo, hi)`, with the last bin also closed on the right
    Left,
    /// `(lo, hi]`
    Right,
}

/// Fixed ascending bin edges with a closure rule
#[derive(Debug, Clone, Copy)]
pub struct BinEdges {
    pub edges: &'static [f64],
    pub closed: Closed,
}

impl BinEdges {
    pub const fn new(edges: &'static [f64], closed: Closed) -> Self {
        Self { edges, closed }
    }

    /// Index of the bin holding `value`, or `None` outside the outer edges
    pub fn locate(&self, value: f64) -> Option<usize> {
        if !value.is_finite() || self.edges.len() < 2 {
            return None;
        }
        let last = self.edges.len() - 2;

        self.edges.windows(2).enumerate().find_map(|(i, w)| {
            let (lo, hi) = (w[0], w[1]);
            let inside = match self.closed {
                Closed::Right => value > lo && value <= hi,
                Closed::Left => value >= lo && (value < hi || (i == last && value == hi)),
            };
            inside.then_some(i)
        })
    }
}

/// BMI edges: Underweight [0, 18.5), Normal [18.5, 25), Overweight [25, 30), Obese [30, 100]
pub const BMI_BINS: BinEdges = BinEdges::new(&[0.0, 18.5, 25.0, 30.0, 100.0], Closed::Left);

/// Age edges: (17, 30], (30, 45], (45, 60], (60, 100]
pub const AGE_BINS: BinEdges = BinEdges::new(&[17.0, 30.0, 45.0, 60.0, 100.0], Closed::Right);

/// A fixed, ordered set of labels stored as a text column
pub trait OrderedCategory: Copy + Sized + 'static {
    /// Every category in display order
    const ALL: &'static [Self];
    /// Name of the derived column holding the labels
    const COLUMN: &'static str;

    fn label(self) -> &'static str;

    fn from_label(label: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|c| c.label() == label)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum BmiCategory {
    Underweight,
    Normal,
    Overweight,
    Obese,
}

impl BmiCategory {
    pub fn from_bmi(bmi: f64) -> Option<Self> {
        BMI_BINS.locate(bmi).map(|i| Self::ALL[i])
    }
}

impl OrderedCategory for BmiCategory {
    const ALL: &'static [Self] = &[Self::Underweight, Self::Normal, Self::Overweight, Self::Obese];
    const COLUMN: &'static str = BMI_CATEGORY;

    fn label(self) -> &'static str {
        match self {
            Self::Underweight => "Underweight",
            Self::Normal => "Normal",
            Self::Overweight => "Overweight",
            Self::Obese => "Obese",
        }
    }
}

impl fmt::Display for BmiCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum AgeGroup {
    Age18To30,
    Age31To45,
    Age46To60,
    Age60Plus,
}

impl AgeGroup {
    pub fn from_age(age: f64) -> Option<Self> {
        AGE_BINS.locate(age).map(|i| Self::ALL[i])
    }
}

impl OrderedCategory for AgeGroup {
    const ALL: &'static [Self] = &[
        Self::Age18To30,
        Self::Age31To45,
        Self::Age46To60,
        Self::Age60Plus,
    ];
    const COLUMN: &'static str = AGE_GROUP;

    fn label(self) -> &'static str {
        match self {
            Self::Age18To30 => "18–30",
            Self::Age31To45 => "31–45",
            Self::Age46To60 => "46–60",
            Self::Age60Plus => "60+",
        }
    }
}

impl fmt::Display for AgeGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// `ln(1 + cost)`. Costs below -1 give NaN.
pub fn log_cost(cost: f64) -> f64 {
    cost.ln_1p()
}

/// Read a category column back into typed categories
pub fn category_values<C: OrderedCategory>(df: &DataFrame) -> Result<Vec<Option<C>>> {
    let column = df.column(C::COLUMN)?;
    let labels = column.cast(&DataType::String)?;
    Ok(labels
        .str()?
        .into_iter()
        .map(|v| v.and_then(C::from_label))
        .collect())
}

/// Append the derived columns. Existing derived columns are replaced, so the
/// operation can be repeated safely.
pub fn derive_columns(df: &mut DataFrame) -> Result<()> {
    let log_costs: Vec<Option<f64>> = column_values(df, ANNUAL_MEDICAL_COST)?
        .into_iter()
        .map(|v| v.map(log_cost))
        .collect();

    let bmi_categories: Vec<Option<&str>> = column_values(df, BMI)?
        .into_iter()
        .map(|v| v.and_then(BmiCategory::from_bmi).map(|c| c.label()))
        .collect();

    let age_groups: Vec<Option<&str>> = column_values(df, AGE)?
        .into_iter()
        .map(|v| v.and_then(AgeGroup::from_age).map(|g| g.label()))
        .collect();

    let income_k: Vec<Option<f64>> = column_values(df, INCOME)?
        .into_iter()
        .map(|v| v.map(|income| income / 1000.0))
        .collect();

    df.with_column(Column::new(ANNUAL_MEDICAL_COST_LOG.into(), log_costs))?;
    df.with_column(Column::new(BMI_CATEGORY.into(), bmi_categories))?;
    df.with_column(Column::new(AGE_GROUP.into(), age_groups))?;
    df.with_column(Column::new(INCOME_K.into(), income_k))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_right_closed_edges() {
        assert_eq!(AGE_BINS.locate(17.0), None);
        assert_eq!(AGE_BINS.locate(17.5), Some(0));
        assert_eq!(AGE_BINS.locate(45.0), Some(1));
        assert_eq!(AGE_BINS.locate(100.0), Some(3));
        assert_eq!(AGE_BINS.locate(100.5), None);
    }

    #[test]
    fn test_left_closed_edges_include_outer_bounds() {
        assert_eq!(BMI_BINS.locate(0.0), Some(0));
        assert_eq!(BMI_BINS.locate(25.0), Some(2));
        assert_eq!(BMI_BINS.locate(100.0), Some(3));
        assert_eq!(BMI_BINS.locate(-0.1), None);
        assert_eq!(BMI_BINS.locate(100.1), None);
        assert_eq!(BMI_BINS.locate(f64::NAN), None);
    }

    #[test]
    fn test_category_labels_round_trip() {
        for group in AgeGroup::ALL {
            assert_eq!(AgeGroup::from_label(group.label()), Some(*group));
        }
        assert_eq!(BmiCategory::from_label("Obese"), Some(BmiCategory::Obese));
        assert_eq!(BmiCategory::from_label("obese"), None);
    }
}
