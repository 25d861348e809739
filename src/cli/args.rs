use crate::models::Month;
use crate::utils::constants::{DEFAULT_MONTH, DEFAULT_OUTPUT_FILE};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "county-temp-map")]
#[command(about = "US county temperature normals and choropleth color scales")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(short, long, global = true, help = "Enable verbose logging")]
    pub verbose: bool,

    #[arg(short, long, global = true, help = "Hide progress spinners")]
    pub quiet: bool,

    #[arg(long, global = true, help = "Log file path")]
    pub log_file: Option<PathBuf>,

    #[arg(
        long,
        global = true,
        help = "Settings file [default: county-temp-map.toml if present]"
    )]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Aggregate raw fixed-width climate records into county monthly normals
    Aggregate {
        #[arg(short, long, help = "Raw climate-division file (e.g. climdiv-tmpccy)")]
        input: PathBuf,

        #[arg(short, long, default_value = DEFAULT_OUTPUT_FILE)]
        output: PathBuf,

        #[arg(long, help = "Memory-map the input instead of buffered reads")]
        mmap: bool,

        #[arg(long)]
        start_year: Option<i32>,

        #[arg(long)]
        end_year: Option<i32>,

        #[arg(long, help = "Minimum non-null months for a county to be kept")]
        min_valid_months: Option<usize>,

        #[arg(long, default_value = "false")]
        validate_only: bool,
    },

    /// Show the temperature range of one month, or of every month
    Range {
        #[arg(short, long, default_value = DEFAULT_OUTPUT_FILE)]
        temperatures: PathBuf,

        #[arg(short, long, value_parser = parse_month, help = "Month index (0-11) or name")]
        month: Option<Month>,
    },

    /// Build the legend gradient and labels for a month
    Legend {
        #[arg(short, long, default_value = DEFAULT_OUTPUT_FILE)]
        temperatures: PathBuf,

        #[arg(short, long, value_parser = parse_month, default_value = DEFAULT_MONTH)]
        month: Month,

        #[arg(short, long, help = "Number of gradient intervals")]
        steps: Option<usize>,

        #[arg(short, long, help = "Write the legend JSON here instead of stdout")]
        output: Option<PathBuf>,
    },

    /// Show hover and click details for one county
    Inspect {
        #[arg(short, long, default_value = DEFAULT_OUTPUT_FILE)]
        temperatures: PathBuf,

        #[arg(short, long, help = "County boundary GeoJSON for names and centroids")]
        boundaries: Option<PathBuf>,

        #[arg(short, long, help = "County FIPS code or GEO_ID")]
        county: String,

        #[arg(short, long, value_parser = parse_month, default_value = DEFAULT_MONTH)]
        month: Month,
    },

    /// Color county boundaries for a month and write styled GeoJSON
    Render {
        #[arg(short, long, default_value = DEFAULT_OUTPUT_FILE)]
        temperatures: PathBuf,

        #[arg(short, long)]
        boundaries: PathBuf,

        #[arg(short, long, value_parser = parse_month, default_value = DEFAULT_MONTH)]
        month: Month,

        #[arg(short, long)]
        output: PathBuf,

        #[arg(long)]
        legend_output: Option<PathBuf>,
    },

    /// Generate placeholder temperature profiles for every county boundary
    Synthesize {
        #[arg(short, long)]
        boundaries: PathBuf,

        #[arg(short, long, default_value = DEFAULT_OUTPUT_FILE)]
        output: PathBuf,
    },
}

fn parse_month(value: &str) -> Result<Month, String> {
    value.parse::<Month>().map_err(|e| e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_render() {
        let cli = Cli::try_parse_from([
            "county-temp-map",
            "render",
            "--boundaries",
            "counties.geojson",
            "--month",
            "jan",
            "--output",
            "out.geojson",
        ])
        .unwrap();

        match cli.command {
            Commands::Render { month, temperatures, .. } => {
                assert_eq!(month.index(), 0);
                assert_eq!(temperatures, PathBuf::from(DEFAULT_OUTPUT_FILE));
            }
            _ => panic!("expected render"),
        }
    }

    #[test]
    fn test_rejects_bad_month() {
        assert!(Cli::try_parse_from(["county-temp-map", "legend", "--month", "12"]).is_err());
    }
}
