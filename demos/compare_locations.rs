//! demos/compare_locations.rs
//!
//! Compares the daily temperatures of a few Dutch locations and narrows them down to the
//! days that stayed within a chosen range.
//!
//! To run this demo:
//! cargo run --example compare_locations

use std::env;
use std::error::Error;

use weerdash::{Dashboard, LocationView, WeatherCondition};

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    configure_polars_display();
    let dashboard = Dashboard::new().await?;

    // 1. Fetch the selection and find the range covering every reading
    let comparison = dashboard
        .compare()
        .locations(&["De Bilt", "Zandvoort", "Maastricht"])
        .call()
        .await?;
    println!("Full temperature range: {}", comparison.bounds());

    // 2. Pick a narrower range, the way a user drags the slider
    let selection = comparison.bounds().sub_range(0, 20)?;
    println!("Showing days within {}", selection);

    // 3. Filter every location by it
    for view in comparison.apply(&selection)? {
        match view {
            LocationView::Data { name, frame } => {
                let extremes = frame.temperature_extremes()?;
                println!(
                    "{}: {} days, lowest min {:?}, highest max {:?}",
                    name,
                    frame.height(),
                    extremes.lowest_min,
                    extremes.highest_max
                );
                let rain: f64 = frame.rain_points()?.iter().filter_map(|p| p.rain_sum).sum();
                let wet_days = frame
                    .weather_conditions()?
                    .iter()
                    .flatten()
                    .filter(|c| {
                        matches!(
                            c,
                            WeatherCondition::Rain
                                | WeatherCondition::HeavyRain
                                | WeatherCondition::FreezingRain
                                | WeatherCondition::RainShower
                        )
                    })
                    .count();
                println!("  {:.1} mm of rain, {} rainy days", rain, wet_days);
                println!("{}", frame.frame().head(Some(5)));
            }
            LocationView::NoDataInRange { name } => {
                println!("{}: no data in the selected range", name);
            }
        }
    }

    Ok(())
}

fn configure_polars_display() {
    // show every column
    env::set_var("POLARS_FMT_MAX_COLS", "-1");
    // show 10 rows
    env::set_var("POLARS_FMT_MAX_ROWS", "10");
}
