//! Classification Tables Example
//!
//! Prints every threshold table and classifies a few readings, including
//! the boundary values.
//!
//! ## Running the Example
//!
//! ```bash
//! cargo run --example 02_classification_tables
//! ```

use skypanel_core::classify::{
    Bound, Classifier, DewPointClassifier, HumidityClassifier, ThresholdTable, UvClassifier,
    VisibilityClassifier, WindDirectionClassifier,
};
use skypanel_core::CompassPoint;

fn print_table(name: &str, table: &ThresholdTable) {
    println!("{}:", name);
    for band in table {
        let range = match band.bound {
            Bound::Below(hi) => format!("< {}", hi),
            Bound::Between(lo, hi) => format!("[{}, {})", lo, hi),
            Bound::AtLeast(lo) => format!(">= {}", lo),
        };
        println!("  {:<14} {:<22} {}", range, band.category.label, band.category.level.indicator());
    }
    println!();
}

fn main() {
    println!("SkyPanel Classification Tables");
    println!("==============================\n");

    for (name, table) in [
        ("Humidity (%)", HumidityClassifier.table()),
        ("Dew point (°C, tenths)", DewPointClassifier.table()),
        ("Visibility (km, tenths)", VisibilityClassifier.table()),
        ("UV index (rounded)", UvClassifier.table()),
    ] {
        if let Some(table) = table {
            print_table(name, table);
        }
    }

    println!("Boundaries:");
    for humidity in [70.0, 69.999, 25.0, 24.999] {
        if let Some(result) = HumidityClassifier.classify(humidity) {
            println!("  humidity {:>7} -> {}", humidity, result.category.label);
        }
    }
    for dew_point in [9.9, 10.0, 23.96, 24.0] {
        if let Some(result) = DewPointClassifier.classify(dew_point) {
            println!("  dew point {:>6} -> {} ({})", dew_point, result.category.label, result.value);
        }
    }
    for uvi in [0.0, 2.49, 10.6] {
        if let Some(reading) = UvClassifier.classify(uvi) {
            println!("  uvi {:>12} -> {} {} (icon {})", uvi, reading.rounded, reading.category.label, reading.icon_index);
        }
    }
    println!();

    println!("Compass sectors:");
    for point in CompassPoint::ALL {
        println!("  {:>3} centred on {:>6.2}°", point, point.center_degrees());
    }
    for degrees in [0.0, 11.25, 348.75, 360.0, -45.0] {
        if let Some(point) = WindDirectionClassifier.classify(degrees) {
            println!("  {:>7}° -> {}", degrees, point);
        }
    }
}
