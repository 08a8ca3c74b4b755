//! Terminal rendering for forecast results and the species table.
//!
//! Renders into a `String` so the layout can be checked without capturing
//! stdout; `main` prints the result.

use std::fmt::Write;

use fingerlings_core::Species;
use fingerlings_forecast::{ForecastResult, PredictionPoint};

const LABEL_WIDTH: usize = 26;

/// Render a forecast as a filter card followed by a month-by-month table.
pub fn render_forecast(result: &ForecastResult) -> String {
    let meta = &result.metadata;
    let mut out = String::new();

    let _ = writeln!(out, "=== Harvest forecast: {} ===", meta.species_display_name);
    let _ = writeln!(out);
    line(&mut out, "Province", &meta.province);
    line(&mut out, "City", &meta.city);
    line(&mut out, "Barangay", &meta.barangay);
    line(&mut out, "Period", &format!("{} to {}", meta.date_from, meta.date_to));
    if let Some(first) = result.predictions.first() {
        let f = &first.input_features;
        line(
            &mut out,
            "Coefficients",
            &format!("survival {} x body weight {} kg", f.survival_rate, f.avg_body_weight),
        );
    }
    let _ = writeln!(out);

    if result.predictions.is_empty() {
        let _ = writeln!(out, "  (no months in range)");
        return out;
    }

    let _ = writeln!(
        out,
        "  {:<8} {:>12} {:>6} {:>14} {:>14} {:>14} {:>14}",
        "Month", "Fingerlings", "Dist.", "Predicted kg", "Lower kg", "Upper kg", "Actual kg"
    );
    for p in &result.predictions {
        row(&mut out, p);
    }
    let _ = writeln!(out);

    let totals = &result.totals;
    line(&mut out, "Total fingerlings", &totals.total_fingerlings.to_string());
    line(
        &mut out,
        "Total predicted (kg)",
        &format!("{:.1}", totals.total_predicted_harvest),
    );
    line(
        &mut out,
        "Total actual (kg)",
        &format!("{:.1}", totals.total_actual_harvest),
    );
    out
}

/// Render the supported species with their aliases and coefficients.
pub fn render_species() -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "  {:<20} {:>9} {:>14}  {}",
        "Species", "Survival", "Body wt (kg)", "Aliases"
    );
    for species in Species::ALL {
        let c = species.coefficients();
        let _ = writeln!(
            out,
            "  {:<20} {:>9} {:>14}  {}",
            species.display_name(),
            c.survival_rate,
            c.avg_body_weight_kg,
            species.aliases().join(", ")
        );
    }
    out
}

fn line(out: &mut String, label: &str, value: &str) {
    let _ = writeln!(out, "  {:<LABEL_WIDTH$} {}", label, value);
}

fn row(out: &mut String, p: &PredictionPoint) {
    let actual = if p.has_actual_data {
        format!("{:.1}", p.actual_harvest)
    } else {
        "-".to_string()
    };
    let _ = writeln!(
        out,
        "  {:<8} {:>12} {:>6} {:>14.1} {:>14.1} {:>14.1} {:>14}",
        p.date.format("%Y-%m"),
        p.input_features.total_fingerlings,
        p.input_features.distribution_count,
        p.predicted_harvest,
        p.confidence_lower,
        p.confidence_upper,
        actual
    );
}
