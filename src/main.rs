//! medical-eda: Medical Insurance EDA CLI Tool
//!
//! Runs the exploratory analysis end to end and writes the table and chart
//! images to the output directory.

use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use console::style;

use medical_eda::cli::Cli;
use medical_eda::pipeline::columns::required_columns;
use medical_eda::pipeline::{
    analyze, load_dataset_with_progress, missing_by_column, print_schema_overview,
    require_columns,
};
use medical_eda::render::{render_all, ArtifactKind};
use medical_eda::report::{export_analysis_report, package_artifacts, AnalysisReport, RunSummary};
use medical_eda::utils::{
    create_progress_bar, create_spinner, finish_with_success, print_banner, print_completion,
    print_config, print_info, print_step_header, print_step_time, print_success,
};

fn main() -> Result<()> {
    let cli = Cli::parse();

    print_banner(env!("CARGO_PKG_VERSION"));
    print_config(&cli.input, &cli.output_dir, cli.dpi, cli.report, cli.bundle);

    // Step 1: Load dataset
    print_step_header(1, "Load Dataset");
    let step_start = Instant::now();
    let (mut df, rows, cols, memory_mb) =
        load_dataset_with_progress(&cli.input, cli.infer_schema_length)?;

    println!(
        "\n    The number of rows and columns in the Medical Insurance dataset is {} and {} respectively",
        style(rows).yellow().bold(),
        style(cols).yellow().bold()
    );
    print_schema_overview(&df);
    println!("      memory usage: {:.2} MB", memory_mb);

    require_columns(&df, &required_columns())?;

    let mut summary = RunSummary::new(rows, cols);
    let load_elapsed = step_start.elapsed();
    summary.set_load_time(load_elapsed);
    print_step_time(load_elapsed);

    // Step 2: Clean, summarize, derive and aggregate
    print_step_header(2, "Analyze");
    let step_start = Instant::now();
    let spinner = create_spinner("Cleaning, summarizing and grouping...");
    let analysis = analyze(&mut df)?;
    finish_with_success(&spinner, "Analysis complete");

    print_success(&format!(
        "Filled {} missing alcohol frequency value(s) with \"No Alcohol\"",
        analysis.alcohol_rewritten
    ));
    println!(
        "    Missing values remaining after cleaning: {}",
        style(analysis.missing_after_cleaning).yellow().bold()
    );
    for (column, nulls) in missing_by_column(&df) {
        println!("      {} {}: {}", style("•").dim(), column, nulls);
    }
    summary.set_cleaning(analysis.alcohol_rewritten, analysis.missing_after_cleaning);
    summary.set_final_columns(df.width());
    print_success("Added annual_medical_cost_log, bmi_category, age_group and income_k");

    analysis.summary.display();
    analysis.age_group_table().display();
    analysis.bmi_chronic_table().display();

    let analysis_elapsed = step_start.elapsed();
    summary.set_analysis_time(analysis_elapsed);
    print_step_time(analysis_elapsed);

    // Step 3: Render artifacts
    print_step_header(3, "Render Artifacts");
    let step_start = Instant::now();
    std::fs::create_dir_all(&cli.output_dir).with_context(|| {
        format!(
            "Failed to create output directory: {}",
            cli.output_dir.display()
        )
    })?;

    let spinner = create_spinner("Rendering tables and charts...");
    let artifacts = render_all(&df, &analysis, cli.dpi)?;
    finish_with_success(&spinner, &format!("Rendered {} artifacts", artifacts.len()));

    let pb = create_progress_bar(artifacts.len() as u64, "Writing");
    for (kind, artifact) in ArtifactKind::ALL.iter().zip(&artifacts) {
        pb.set_message(kind.description());
        artifact.write_to(&cli.output_dir)?;
        summary.add_artifact(&artifact.file_name);
        pb.inc(1);
    }
    finish_with_success(
        &pb,
        &format!(
            "Wrote {} artifacts to {}",
            artifacts.len(),
            cli.output_dir.display()
        ),
    );
    let render_elapsed = step_start.elapsed();
    summary.set_render_time(render_elapsed);
    print_step_time(render_elapsed);

    // Step 4: Optional report and bundle
    if cli.report || cli.bundle {
        print_step_header(4, "Report");
        let step_start = Instant::now();

        let report_path = if cli.report {
            let path = cli.report_path();
            let spinner = create_spinner("Writing analysis report...");
            let report = AnalysisReport::new(&cli.input, cli.dpi, (rows, cols), &analysis, &artifacts);
            export_analysis_report(&report, &path)?;
            finish_with_success(&spinner, &format!("Saved {}", path.display()));
            Some(path)
        } else {
            None
        };

        if cli.bundle {
            let path = cli.bundle_path();
            let spinner = create_spinner("Packaging artifacts...");
            package_artifacts(&artifacts, report_path.as_deref(), &path)?;
            finish_with_success(&spinner, &format!("Saved {}", path.display()));
        }

        print_step_time(step_start.elapsed());
    } else {
        print_info("Use --report or --bundle to export the results");
    }

    summary.display();
    print_completion();

    Ok(())
}
