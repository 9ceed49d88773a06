//! Descriptive statistics over plain value slices
//!
//! Every routine here works on the finite-or-NaN `f64` values that remain after
//! missing cells have been filtered out. Empty inputs never panic: they yield
//! NaN (or `None` for the structured results) so an all-missing column flows
//! through the summary tables instead of aborting the run.

use anyhow::{Context, Result};
use polars::prelude::*;

/// Two-sided 95% normal quantile used for regression confidence bands
const Z_95: f64 = 1.959_963_984_540_054;

/// Read a column as optional floats.
///
/// Text columns are cast leniently: cells that do not parse as numbers
/// become `None`, as do NaN cells.
pub fn column_values(df: &DataFrame, name: &str) -> Result<Vec<Option<f64>>> {
    let column = df
        .column(name)
        .with_context(|| format!("Required column '{}' not found", name))?;
    let floats = column
        .cast(&DataType::Float64)
        .with_context(|| format!("Column '{}' cannot be read as numbers", name))?;

    Ok(floats
        .f64()?
        .into_iter()
        .map(|v| v.filter(|x| !x.is_nan()))
        .collect())
}

/// Keep only the present values
pub fn present(values: &[Option<f64>]) -> Vec<f64> {
    values.iter().flatten().copied().collect()
}

pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return f64::NAN;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Sample standard deviation (n - 1 denominator)
pub fn sample_std(values: &[f64]) -> f64 {
    let n = values.len();
    if n < 2 {
        return f64::NAN;
    }
    let m = mean(values);
    let ss: f64 = values.iter().map(|v| (v - m).powi(2)).sum();
    (ss / (n - 1) as f64).sqrt()
}

/// Quantile with linear interpolation between closest ranks.
pub fn quantile(values: &[f64], q: f64) -> f64 {
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));
    quantile_sorted(&sorted, q)
}

/// Same as [`quantile`] for input already sorted ascending
pub fn quantile_sorted(sorted: &[f64], q: f64) -> f64 {
    if sorted.is_empty() {
        return f64::NAN;
    }
    let pos = q.clamp(0.0, 1.0) * (sorted.len() - 1) as f64;
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;
    sorted[lo] + (sorted[hi] - sorted[lo]) * (pos - lo as f64)
}

pub fn median(values: &[f64]) -> f64 {
    quantile(values, 0.5)
}

/// Round to two decimals, exact halves to the even digit. NaN stays NaN.
pub fn round2(value: f64) -> f64 {
    if !value.is_finite() {
        return value;
    }
    (value * 100.0).round_ties_even() / 100.0
}

/// Count, location, spread and range of one column
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Describe {
    pub count: usize,
    pub mean: f64,
    pub median: f64,
    pub std_dev: f64,
    pub min: f64,
    pub q25: f64,
    pub q75: f64,
    pub max: f64,
}

impl Describe {
    pub fn from_values(values: &[f64]) -> Self {
        let mut sorted = values.to_vec();
        sorted.sort_by(|a, b| a.total_cmp(b));

        Self {
            count: sorted.len(),
            mean: mean(&sorted),
            median: quantile_sorted(&sorted, 0.5),
            std_dev: sample_std(&sorted),
            min: sorted.first().copied().unwrap_or(f64::NAN),
            q25: quantile_sorted(&sorted, 0.25),
            q75: quantile_sorted(&sorted, 0.75),
            max: sorted.last().copied().unwrap_or(f64::NAN),
        }
    }

    pub fn rounded(self) -> Self {
        Self {
            count: self.count,
            mean: round2(self.mean),
            median: round2(self.median),
            std_dev: round2(self.std_dev),
            min: round2(self.min),
            q25: round2(self.q25),
            q75: round2(self.q75),
            max: round2(self.max),
        }
    }

    /// Values in summary-table column order
    pub fn to_row(&self) -> Vec<f64> {
        vec![
            self.count as f64,
            self.mean,
            self.median,
            self.std_dev,
            self.min,
            self.q25,
            self.q75,
            self.max,
        ]
    }
}

/// Ordinary least squares fit of `y = intercept + slope * x`
#[derive(Debug, Clone, Copy)]
pub struct LinearFit {
    pub slope: f64,
    pub intercept: f64,
    n: usize,
    x_mean: f64,
    sxx: f64,
    residual_se: f64,
}

impl LinearFit {
    /// Fit over paired observations. Needs at least two distinct x values.
    pub fn fit(points: &[(f64, f64)]) -> Option<Self> {
        let n = points.len();
        if n < 2 {
            return None;
        }
        let x_mean = points.iter().map(|p| p.0).sum::<f64>() / n as f64;
        let y_mean = points.iter().map(|p| p.1).sum::<f64>() / n as f64;

        let sxx: f64 = points.iter().map(|p| (p.0 - x_mean).powi(2)).sum();
        if sxx == 0.0 {
            return None;
        }
        let sxy: f64 = points
            .iter()
            .map(|p| (p.0 - x_mean) * (p.1 - y_mean))
            .sum();

        let slope = sxy / sxx;
        let intercept = y_mean - slope * x_mean;

        let sse: f64 = points
            .iter()
            .map(|p| (p.1 - (intercept + slope * p.0)).powi(2))
            .sum();
        let residual_se = if n > 2 {
            (sse / (n - 2) as f64).sqrt()
        } else {
            0.0
        };

        Some(Self {
            slope,
            intercept,
            n,
            x_mean,
            sxx,
            residual_se,
        })
    }

    pub fn predict(&self, x: f64) -> f64 {
        self.intercept + self.slope * x
    }

    /// Half width of the 95% confidence interval of the fitted mean at `x`
    pub fn confidence_half_width(&self, x: f64) -> f64 {
        let leverage = 1.0 / self.n as f64 + (x - self.x_mean).powi(2) / self.sxx;
        Z_95 * self.residual_se * leverage.sqrt()
    }
}

/// Equal-width histogram
#[derive(Debug, Clone, PartialEq)]
pub struct HistogramBins {
    /// `counts.len() + 1` ascending edges
    pub edges: Vec<f64>,
    pub counts: Vec<usize>,
}

impl HistogramBins {
    /// Bin finite values into `bins` equal-width buckets spanning [min, max].
    ///
    /// The maximum falls into the last bucket. A constant input is spread
    /// over a unit-wide range centred on the value.
    pub fn compute(values: &[f64], bins: usize) -> Option<Self> {
        let finite: Vec<f64> = values.iter().copied().filter(|v| v.is_finite()).collect();
        if finite.is_empty() || bins == 0 {
            return None;
        }

        let mut lo = finite.iter().copied().fold(f64::INFINITY, f64::min);
        let mut hi = finite.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        if lo == hi {
            lo -= 0.5;
            hi += 0.5;
        }

        let width = (hi - lo) / bins as f64;
        let edges: Vec<f64> = (0..=bins).map(|i| lo + width * i as f64).collect();
        let mut counts = vec![0usize; bins];
        for v in finite {
            let idx = (((v - lo) / width) as usize).min(bins - 1);
            counts[idx] += 1;
        }

        Some(Self { edges, counts })
    }

    pub fn max_count(&self) -> usize {
        self.counts.iter().copied().max().unwrap_or(0)
    }
}

/// Box-and-whisker summary using 1.5 x IQR whiskers
#[derive(Debug, Clone, PartialEq)]
pub struct BoxStats {
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    /// Smallest observation within `q1 - 1.5 * iqr`
    pub whisker_low: f64,
    /// Largest observation within `q3 + 1.5 * iqr`
    pub whisker_high: f64,
    pub outliers: Vec<f64>,
}

impl BoxStats {
    pub fn compute(values: &[f64]) -> Option<Self> {
        if values.is_empty() {
            return None;
        }
        let mut sorted = values.to_vec();
        sorted.sort_by(|a, b| a.total_cmp(b));

        let q1 = quantile_sorted(&sorted, 0.25);
        let median = quantile_sorted(&sorted, 0.5);
        let q3 = quantile_sorted(&sorted, 0.75);
        let iqr = q3 - q1;
        let low_fence = q1 - 1.5 * iqr;
        let high_fence = q3 + 1.5 * iqr;

        let (inside, outliers): (Vec<f64>, Vec<f64>) = sorted
            .iter()
            .copied()
            .partition(|v| *v >= low_fence && *v <= high_fence);
        let whisker_low = inside.first().copied().unwrap_or(q1);
        let whisker_high = inside.last().copied().unwrap_or(q3);

        Some(Self {
            q1,
            median,
            q3,
            whisker_low,
            whisker_high,
            outliers,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_describe_known_values() {
        let d = Describe::from_values(&[10.0, 20.0, 30.0, 40.0]);
        assert_eq!(d.count, 4);
        assert_eq!(d.mean, 25.0);
        assert_eq!(d.median, 25.0);
        assert_eq!(d.min, 10.0);
        assert_eq!(d.max, 40.0);
        assert!((d.q25 - 17.5).abs() < 1e-12);
        assert!((d.q75 - 32.5).abs() < 1e-12);
        assert!((d.std_dev - 12.909_944_487_358_056).abs() < 1e-9);
    }

    #[test]
    fn test_describe_empty_is_nan() {
        let d = Describe::from_values(&[]);
        assert_eq!(d.count, 0);
        assert!(d.mean.is_nan());
        assert!(d.median.is_nan());
        assert!(d.std_dev.is_nan());
        assert!(d.min.is_nan() && d.max.is_nan());
        assert!(d.q25.is_nan() && d.q75.is_nan());
    }

    #[test]
    fn test_single_value_std_is_nan() {
        let d = Describe::from_values(&[7.0]);
        assert_eq!(d.count, 1);
        assert_eq!(d.mean, 7.0);
        assert!(d.std_dev.is_nan());
    }

    #[test]
    fn test_quantile_interpolates_linearly() {
        let values = [1.0, 2.0, 3.0, 4.0, 5.0];
        assert_eq!(quantile(&values, 0.0), 1.0);
        assert_eq!(quantile(&values, 1.0), 5.0);
        assert!((quantile(&values, 0.9) - 4.6).abs() < 1e-12);
        // Unsorted input is handled
        assert_eq!(median(&[3.0, 1.0, 2.0]), 2.0);
    }

    #[test]
    fn test_round2() {
        assert_eq!(round2(1.234), 1.23);
        assert_eq!(round2(1.235_000_1), 1.24);
        assert_eq!(round2(-2.5), -2.5);
        assert!(round2(f64::NAN).is_nan());
    }

    #[test]
    fn test_round2_sends_exact_halves_to_even() {
        assert_eq!(round2(0.125), 0.12);
        assert_eq!(round2(0.375), 0.38);
        assert_eq!(round2(-0.125), -0.12);
        assert_eq!(round2(2.5), 2.5);
    }

    #[test]
    fn test_linear_fit_exact_line() {
        let points: Vec<(f64, f64)> = (0..10).map(|i| (i as f64, 3.0 + 2.0 * i as f64)).collect();
        let fit = LinearFit::fit(&points).unwrap();
        assert!((fit.slope - 2.0).abs() < 1e-12);
        assert!((fit.intercept - 3.0).abs() < 1e-12);
        assert!((fit.predict(20.0) - 43.0).abs() < 1e-9);
        assert!(fit.confidence_half_width(5.0).abs() < 1e-9, "perfect fit has no band");
    }

    #[test]
    fn test_linear_fit_degenerate() {
        assert!(LinearFit::fit(&[(1.0, 2.0)]).is_none());
        assert!(LinearFit::fit(&[(1.0, 2.0), (1.0, 3.0)]).is_none());
    }

    #[test]
    fn test_histogram_counts_every_value() {
        let values: Vec<f64> = (0..100).map(|i| i as f64).collect();
        let hist = HistogramBins::compute(&values, 50).unwrap();
        assert_eq!(hist.counts.len(), 50);
        assert_eq!(hist.edges.len(), 51);
        assert_eq!(hist.counts.iter().sum::<usize>(), 100);
        assert_eq!(hist.counts[49], 2, "maximum lands in the last bin");
    }

    #[test]
    fn test_histogram_constant_input() {
        let hist = HistogramBins::compute(&[5.0, 5.0, 5.0], 10).unwrap();
        assert_eq!(hist.counts.iter().sum::<usize>(), 3);
        assert_eq!(hist.edges[0], 4.5);
        assert_eq!(*hist.edges.last().unwrap(), 5.5);
    }

    #[test]
    fn test_histogram_empty() {
        assert!(HistogramBins::compute(&[], 50).is_none());
        assert!(HistogramBins::compute(&[f64::NAN], 50).is_none());
    }

    #[test]
    fn test_box_stats_with_outlier() {
        let values = [1.0, 2.0, 3.0, 4.0, 5.0, 100.0];
        let b = BoxStats::compute(&values).unwrap();
        assert_eq!(b.median, 3.5);
        assert_eq!(b.whisker_low, 1.0);
        assert_eq!(b.whisker_high, 5.0);
        assert_eq!(b.outliers, vec![100.0]);
    }
}
