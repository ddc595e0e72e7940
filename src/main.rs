//! Aquacast - weather aggregates for irrigation scheduling
//!
//! Fetches hourly weather from Open-Meteo and prints the watering, forecast
//! and ETo summaries an irrigation scheduler consumes.

use clap::Parser;
use tracing_subscriber::EnvFilter;

use aquacast::cli::{Cli, Report, RequestConfig};
use aquacast::data::{EToInputs, WateringSummary, WeatherError, WeatherSummary};
use aquacast::provider::{OpenMeteoProvider, WeatherProvider};
use aquacast::solar::ClearSkyEstimator;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let config = match RequestConfig::from_cli(&cli) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(2);
        }
    };

    let provider = OpenMeteoProvider::new(Box::new(ClearSkyEstimator))
        .with_forecast_days(config.forecast_days);

    if let Err(err) = run(&provider, config).await {
        eprintln!("{err}");
        std::process::exit(1);
    }
}

async fn run(provider: &OpenMeteoProvider, config: RequestConfig) -> Result<(), WeatherError> {
    match config.report {
        Report::Watering => {
            print_watering(&provider.get_watering_data(config.coordinates).await?)
        }
        Report::Weather => print_weather(&provider.get_weather_data(config.coordinates).await?),
        Report::Eto => print_eto(&provider.get_eto_data(config.coordinates).await?),
        Report::All => {
            // Three independent requests; each one is still a single fetch
            // followed by synchronous aggregation.
            let (watering, weather, eto) = futures::future::join3(
                provider.get_watering_data(config.coordinates),
                provider.get_weather_data(config.coordinates),
                provider.get_eto_data(config.coordinates),
            )
            .await;

            print_watering(&watering?);
            print_weather(&weather?);
            print_eto(&eto?);
        }
    }

    Ok(())
}

fn print_watering(summary: &WateringSummary) {
    println!("Watering ({})", summary.origin);
    println!("  mean temperature: {:.1} °F", summary.temperature);
    match summary.humidity {
        Some(humidity) => println!("  mean humidity:    {:.0} %", humidity),
        None => println!("  mean humidity:    n/a"),
    }
    println!("  precipitation:    {:.3} in", summary.precipitation);
    println!("  raining now:      {}", if summary.raining { "yes" } else { "no" });
}

fn print_weather(summary: &WeatherSummary) {
    let current = &summary.current;
    println!("Weather ({})", summary.origin);
    println!(
        "  now: {} °F, {} mph wind, {}{}",
        current.temperature,
        current.wind,
        current.icon,
        match current.humidity {
            Some(humidity) => format!(", {} % humidity", humidity),
            None => String::new(),
        }
    );
    println!(
        "  today: {}-{} °F, {:.3} in precipitation",
        current.temp_min, current.temp_max, current.precipitation
    );

    for day in &summary.forecast {
        println!(
            "  {}: {}-{} °F, {:.3} in, {}",
            day.date.format("%Y-%m-%d"),
            day.temp_min,
            day.temp_max,
            day.precipitation,
            day.icon
        );
    }
}

fn print_eto(inputs: &EToInputs) {
    let range = |min: Option<f64>, max: Option<f64>| match (min, max) {
        (Some(min), Some(max)) => format!("{:.1}-{:.1}", min, max),
        _ => "n/a".to_string(),
    };

    println!("ETo inputs ({})", inputs.origin);
    println!("  period start:    {} (epoch s)", inputs.period_start);
    println!("  temperature:     {} °F", range(inputs.temp_min, inputs.temp_max));
    println!(
        "  humidity:        {} %",
        range(inputs.humidity_min, inputs.humidity_max)
    );
    println!("  mean wind:       {:.1} mph", inputs.wind);
    println!("  precipitation:   {:.3} in", inputs.precipitation);
    println!("  solar radiation: {:.2} MJ/m²", inputs.solar_radiation);
}
