//! Prints an ASCII map of the AVO classes of a preset.
//!
//! Usage:
//! ```text
//! cargo run --example classify_grid                               # Alaska Big Ellipses
//! cargo run --example classify_grid -- "Positive Trend Ellipses"
//! ```
//!
//! Legend: `1`-`4` top classes, `a`-`d` base classes, `0` null wedges,
//! `.` background, blank where no wedge applies. The boundary rays are
//! listed below the map.

use abavo::model::{EllipseRegionsModel, Preset};
use abavo::operations::PointClassifier;
use abavo::regions::{AvoClass, RegionBoundary};
use abavo::AbavoError;

const COLUMNS: u32 = 61;
const ROWS: u32 = 25;

fn symbol(classifier: &PointClassifier, x: f64, y: f64) -> char {
    if classifier.shell_index(x, y) == 0 {
        return '.';
    }
    let Some(class) = classifier.region_at(x, y) else {
        return ' ';
    };
    match class {
        AvoClass::TopClass1 => '1',
        AvoClass::TopClass2 => '2',
        AvoClass::TopClass3 => '3',
        AvoClass::TopClass4 => '4',
        AvoClass::BaseClass1 => 'a',
        AvoClass::BaseClass2 => 'b',
        AvoClass::BaseClass3 => 'c',
        AvoClass::BaseClass4 => 'd',
        AvoClass::TopNull | AvoClass::BaseNull => '0',
    }
}

fn main() -> Result<(), AbavoError> {
    // Default: WARN for everything, DEBUG for abavo.
    // Override with RUST_LOG env var (e.g. RUST_LOG=abavo=trace).
    let env_filter = tracing_subscriber::EnvFilter::from_default_env()
        .add_directive(tracing_subscriber::filter::LevelFilter::WARN.into())
        .add_directive("abavo=debug".parse().unwrap_or_default());
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let name = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "Alaska Big Ellipses".to_owned());
    let preset = Preset::by_name(&name)?;

    let model = EllipseRegionsModel::default();
    model.apply_preset(&preset)?;
    // Solve the rays from scratch rather than trusting the stored ones.
    model.recompute_regions(preset.bounds)?;
    let Some(classifier) = model.classifier() else {
        return Ok(());
    };

    let b = preset.bounds;
    println!("{} (slope {})", preset.name, preset.background.slope);
    for row in 0..ROWS {
        let y = b.ymax() - (b.ymax() - b.ymin()) * f64::from(row) / f64::from(ROWS - 1);
        let line: String = (0..COLUMNS)
            .map(|col| {
                let x = b.xmin() + (b.xmax() - b.xmin()) * f64::from(col) / f64::from(COLUMNS - 1);
                symbol(&classifier, x, y)
            })
            .collect();
        println!("{line}");
    }
    for slot in RegionBoundary::ALL {
        let ray = model.boundary(slot);
        println!(
            "{:>8}  ({:+.3}, {:+.3}) -> ({:+.3}, {:+.3})  {}",
            slot.key(),
            ray.outer.x,
            ray.outer.y,
            ray.inner.x,
            ray.inner.y,
            slot.label()
        );
    }
    Ok(())
}
