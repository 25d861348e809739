use crate::cli::args::{Cli, Commands};
use crate::error::Result;
use crate::map::MapSession;
use crate::models::{Boundaries, Month};
use crate::processors::ClimateAggregator;
use crate::readers::{BoundaryReader, ClimateReader};
use crate::scale::{ColorScale, Legend, TemperatureRange};
use crate::sources::{JsonFileSource, SyntheticProfileSource, TemperatureSource};
use crate::utils::progress::ProgressReporter;
use crate::utils::settings::Settings;
use crate::writers::JsonWriter;
use serde_json::{json, Value};
use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;
use tracing::{info, warn, Level};

pub async fn run(cli: Cli) -> Result<()> {
    init_logging(cli.verbose, cli.log_file.as_deref())?;

    let settings = Settings::load(cli.config.as_deref())?;
    let quiet = cli.quiet;

    match cli.command {
        Commands::Aggregate {
            input,
            output,
            mmap,
            start_year,
            end_year,
            min_valid_months,
            validate_only,
        } => {
            let mut aggregation = settings.aggregation.clone();
            if let Some(year) = start_year {
                aggregation.start_year = year;
            }
            if let Some(year) = end_year {
                aggregation.end_year = year;
            }
            if let Some(months) = min_valid_months {
                aggregation.min_valid_months = months;
            }
            aggregation.check()?;

            println!("Processing temperature data...");
            println!("Input file: {}", input.display());
            println!(
                "Period: {}-{}, element {}",
                aggregation.start_year, aggregation.end_year, aggregation.element_code
            );

            let progress = ProgressReporter::new_spinner("Reading climate records...", quiet);
            let reader = ClimateReader::with_mmap(mmap);
            let mut aggregator = ClimateAggregator::new(aggregation);
            aggregator.aggregate_file(&input, &reader, Some(&progress))?;

            let (lookup, report) = aggregator.finish();
            progress.finish_with_message(&format!("Processed {} lines", report.lines_read));

            println!("\n{}", report.summary(lookup.records().next()));

            if validate_only {
                println!("Validation complete - no output file written");
                return Ok(());
            }

            if lookup.is_empty() {
                warn!("No county passed the valid-month threshold; writing an empty lookup");
            }

            let file_info = JsonWriter::new().write_lookup(&lookup, &output)?;
            println!("\n{}", file_info.summary());
            println!("Processing complete!");
        }

        Commands::Range {
            temperatures,
            month,
        } => {
            let source = JsonFileSource::new(&temperatures);
            info!("Loading {}", source.describe());
            let lookup = source.load()?;

            let months: Vec<Month> = match month {
                Some(month) => vec![month],
                None => Month::all().collect(),
            };

            println!("Temperature ranges across {} counties:", lookup.len());
            for month in months {
                match TemperatureRange::observed(&lookup, month) {
                    Some(range) => println!("  {:<10} {}", month.name(), range),
                    None => println!(
                        "  {:<10} No data (default domain {}-{})",
                        month.name(),
                        settings.scale.default_min,
                        settings.scale.default_max
                    ),
                }
            }
        }

        Commands::Legend {
            temperatures,
            month,
            steps,
            output,
        } => {
            let source = JsonFileSource::new(&temperatures);
            info!("Loading {}", source.describe());
            let lookup = source.load()?;

            let scale = ColorScale::for_month(&lookup, month, &settings.scale)?;
            let legend = Legend::build(&scale, steps.unwrap_or(settings.scale.legend_steps));
            let document = legend_document(&scale, &legend);

            match output {
                Some(path) => {
                    let file_info = JsonWriter::new().write_json(
                        &document,
                        &path,
                        legend.gradient_stops.len(),
                    )?;
                    println!("{}", file_info.summary());
                }
                None => println!("{}", JsonWriter::new().to_json(&document)?),
            }
        }

        Commands::Inspect {
            temperatures,
            boundaries,
            county,
            month,
        } => {
            let session = match boundaries {
                Some(boundaries) => {
                    MapSession::load(&boundaries, &temperatures, month, settings.scale).await?
                }
                None => {
                    let lookup = JsonFileSource::new(&temperatures).load()?;
                    MapSession::new(lookup, Boundaries::empty(), month, settings.scale)?
                }
            };

            println!("{}", session.hover(&county));
            println!("Color: {}", session.color_of_county(&county));

            match session.profile(&county) {
                Some(profile) => println!("\n{}", profile.describe(month)),
                None => println!("\nNo temperature record for county {}", county),
            }
        }

        Commands::Render {
            temperatures,
            boundaries,
            month,
            output,
            legend_output,
        } => {
            let progress = ProgressReporter::new_spinner("Loading map data...", quiet);
            let session =
                MapSession::load(&boundaries, &temperatures, month, settings.scale.clone())
                    .await?;
            progress.finish_with_message("Map data loaded");

            let range = session.get_range(month)?;
            let counties = &session.boundaries().counties;
            let colored = counties
                .iter()
                .filter(|shape| session.lookup().temperature(&shape.id, month).is_some())
                .count();

            println!("Month: {}", month.name());
            if session.scale().has_data() {
                println!("Range: {}", range);
            } else {
                println!("Range: no data, using default domain {}", range);
            }
            println!(
                "Counties: {} colored, {} without data",
                colored,
                counties.len() - colored
            );

            let writer = JsonWriter::new();
            let file_info = writer.write_feature_collection(session.styled_collection(), &output)?;
            println!("\n{}", file_info.summary());

            if let Some(path) = legend_output {
                let legend = session.build_legend(month)?;
                let document = legend_document(session.scale(), &legend);
                let file_info = writer.write_json(&document, &path, legend.gradient_stops.len())?;
                println!("\n{}", file_info.summary());
            }
        }

        Commands::Synthesize { boundaries, output } => {
            let boundaries = BoundaryReader::new()
                .read_boundaries_async(&boundaries)
                .await?;

            let source = SyntheticProfileSource::from_boundaries(&boundaries);
            info!("Generating {}", source.describe());
            let lookup = source.load()?;

            println!("Generated placeholder profiles for {} counties", lookup.len());
            let file_info = JsonWriter::new().write_lookup(&lookup, &output)?;
            println!("\n{}", file_info.summary());
        }
    }

    Ok(())
}

fn legend_document(scale: &ColorScale, legend: &Legend) -> Value {
    json!({
        "month": scale.month().name(),
        "range": scale.range(),
        "has_data": scale.has_data(),
        "gradient_stops": legend.gradient_stops,
        "labels": legend.labels,
        "css": legend.css_gradient(),
    })
}

/// Logs go to stderr, or to `log_file` without ANSI colors. Repeated calls
/// keep the first subscriber.
fn init_logging(verbose: bool, log_file: Option<&Path>) -> Result<()> {
    let level = if verbose { Level::DEBUG } else { Level::INFO };
    let builder = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false);

    let installed = match log_file {
        Some(path) => {
            let file = OpenOptions::new().create(true).append(true).open(path)?;
            builder
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .try_init()
        }
        None => builder.with_writer(std::io::stderr).try_init(),
    };

    if installed.is_err() {
        tracing::debug!("Logging already initialized");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CountyTemperatureLookup, CountyTemperatureRecord};

    #[test]
    fn test_legend_document_shape() {
        let mut temps = [None; 12];
        temps[6] = Some(58.9);
        let mut lookup = CountyTemperatureLookup::new();
        lookup.insert(CountyTemperatureRecord::new("02020".into(), temps));
        temps[6] = Some(81.5);
        lookup.insert(CountyTemperatureRecord::new("01001".into(), temps));

        let scale =
            ColorScale::for_month(&lookup, Month::new(6).unwrap(), &Default::default()).unwrap();
        let legend = Legend::build(&scale, 4);
        let document = legend_document(&scale, &legend);

        assert_eq!(document["month"], "July");
        assert_eq!(document["has_data"], true);
        assert_eq!(document["labels"][0], "58°F");
        assert_eq!(document["labels"][2], "82°F");
        assert_eq!(document["gradient_stops"].as_array().unwrap().len(), 5);
        assert_eq!(document["gradient_stops"][0], "#313695");
        assert!(document["css"].as_str().unwrap().starts_with("linear-gradient"));
    }
}
