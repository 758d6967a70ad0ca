//! demos/plot_locations.rs
//!
//! Fetches daily data for De Bilt, keeps the days between -5 and 25 °C and plots the
//! maximum and minimum temperature as two lines, followed by the daily rainfall as bars.
//!
//! To run this demo:
//! cargo run --example plot_locations --features examples

use std::error::Error;

use plotlars::{BarPlot, Legend, Line, Plot, Rgb, Text, TimeSeriesPlot};
use polars::prelude::*;
use weerdash::{
    Dashboard, LocationFrame, SelectionRange, TemperatureFilterExt, DATE_COLUMN, RAIN_SUM,
    TEMPERATURE_MAX, TEMPERATURE_MIN,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    println!("Fetching weather data from Open-Meteo...");
    let dashboard = Dashboard::new().await?;

    let frame = dashboard
        .location_frame("De Bilt")
        .await?
        .filter_temperature(&SelectionRange::new(-5, 25)?)?;
    if frame.is_empty() {
        println!("No data in range.");
        return Ok(());
    }

    println!("Generating temperature and rainfall plots...");
    plot_temperature(frame.frame());
    plot_rain(&frame)?;
    println!("Plots shown in browser.");

    Ok(())
}

/// Dual-line chart of the daily maximum and minimum temperature.
fn plot_temperature(data: &DataFrame) {
    TimeSeriesPlot::builder()
        .data(data)
        .x(DATE_COLUMN)
        .y(TEMPERATURE_MAX)
        .additional_series(vec![TEMPERATURE_MIN])
        .colors(vec![Rgb(187, 70, 72), Rgb(122, 194, 236)])
        .lines(vec![Line::Solid, Line::Solid])
        .plot_title(Text::from("De Bilt").font("Arial").size(18))
        .legend(&Legend::new().x(0.05).y(0.9))
        .x_title("Date")
        .y_title("Temperature (°C)")
        .build()
        .plot();
}

/// Bar chart of the daily rainfall, one bar per day.
fn plot_rain(frame: &LocationFrame) -> Result<(), Box<dyn Error>> {
    let points = frame.rain_points()?;
    let days: Vec<String> = points
        .iter()
        .map(|p| p.date.format("%Y-%m-%d").to_string())
        .collect();
    let rain: Vec<Option<f64>> = points.iter().map(|p| p.rain_sum).collect();
    let data = df!(DATE_COLUMN => days, RAIN_SUM => rain)?;

    BarPlot::builder()
        .data(&data)
        .labels(DATE_COLUMN)
        .values(RAIN_SUM)
        .colors(vec![Rgb(122, 194, 236)])
        .plot_title(Text::from("De Bilt rainfall").font("Arial").size(18))
        .x_title("Date")
        .y_title("Rain (mm)")
        .build()
        .plot();
    Ok(())
}
