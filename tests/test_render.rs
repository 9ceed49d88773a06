//! Tests for table and chart rendering
//!
//! Images are rendered at a low resolution to keep the tests fast; the
//! geometry scales linearly with DPI.

use std::io::Cursor;

use medical_eda::pipeline::{analyze, summarize_columns};
use medical_eda::render::{
    dots_per_meter, render_all, render_artifact, render_boxplot, render_histogram,
    render_regression, render_table, Annotation, ArtifactKind, ChartLabels, TableStyle,
    CHART_SIZE_IN,
};
use polars::prelude::*;

#[path = "common/mod.rs"]
mod common;

const TEST_DPI: u32 = 40;

fn labels() -> ChartLabels<'static> {
    ChartLabels {
        title: "Title",
        x_label: "X",
        y_label: "Y",
    }
}

/// Decode the PNG header: (width, height, pixels-per-meter)
fn png_info(bytes: &[u8]) -> (u32, u32, Option<u32>) {
    let decoder = png::Decoder::new(Cursor::new(bytes));
    let reader = decoder.read_info().unwrap();
    let info = reader.info();
    let ppm = info.pixel_dims.as_ref().map(|d| {
        assert_eq!(d.unit, png::Unit::Meter);
        assert_eq!(d.xppu, d.yppu);
        d.xppu
    });
    (info.width, info.height, ppm)
}

#[test]
fn test_table_image_size_and_dpi() {
    let df = df! { "x" => [10.0f64, 20.0, 30.0, 40.0] }.unwrap();
    let table = summarize_columns(&df, &["x"]).unwrap();

    let artifact = render_table("t.png", &table, &TableStyle::GROUPED, TEST_DPI).unwrap();

    assert_eq!((artifact.width, artifact.height), (320, 140));
    let (w, h, ppm) = png_info(&artifact.bytes);
    assert_eq!((w, h), (320, 140));
    assert_eq!(ppm, Some(dots_per_meter(TEST_DPI)));
}

#[test]
fn test_histogram_renders_with_empty_input() {
    let artifact = render_histogram("h.png", labels(), &[], 50, TEST_DPI).unwrap();
    assert_eq!((artifact.width, artifact.height), (320, 200));
}

#[test]
fn test_regression_tolerates_degenerate_data() {
    let annotation = Annotation::new(&["note"], (1.0, 1.0), (0.0, 0.0));
    let figure = (
        (CHART_SIZE_IN.0 * TEST_DPI as f64).round() as u32,
        (CHART_SIZE_IN.1 * TEST_DPI as f64).round() as u32,
    );

    for points in [vec![], vec![(1.0, 2.0)], vec![(1.0, 2.0), (1.0, 3.0)]] {
        let artifact =
            render_regression("r.png", labels(), &points, &annotation, TEST_DPI).unwrap();
        assert_eq!((artifact.width, artifact.height), figure);
    }
}

#[test]
fn test_boxplot_with_empty_group() {
    let groups = vec![
        ("yes".to_string(), vec![1.0, 2.0, 3.0, 50.0]),
        ("no".to_string(), vec![]),
    ];
    let annotation = Annotation::new(&["a", "b"], (f64::NAN, 0.0), (0.5, 1.0));

    let artifact = render_boxplot("b.png", labels(), &groups, &annotation, TEST_DPI).unwrap();
    assert!(!artifact.bytes.is_empty());
}

#[test]
fn test_every_artifact_renders_from_fixture() {
    let mut df = common::create_insurance_dataframe();
    let analysis = analyze(&mut df).unwrap();

    let artifacts = render_all(&df, &analysis, TEST_DPI).unwrap();

    let names: Vec<&str> = artifacts.iter().map(|a| a.file_name.as_str()).collect();
    let expected: Vec<&str> = ArtifactKind::ALL.iter().map(|k| k.file_name()).collect();
    assert_eq!(names, expected);

    for artifact in &artifacts {
        let (w, h, ppm) = png_info(&artifact.bytes);
        assert_eq!((w, h), (artifact.width, artifact.height));
        assert_eq!(ppm, Some(dots_per_meter(TEST_DPI)), "{}", artifact.file_name);
    }
}

#[test]
fn test_summary_table_uses_wide_figure() {
    let mut df = common::create_insurance_dataframe();
    let analysis = analyze(&mut df).unwrap();

    let artifact =
        render_artifact(ArtifactKind::SummaryTable, &df, &analysis, TEST_DPI).unwrap();

    assert_eq!((artifact.width, artifact.height), (640, 280));
}
