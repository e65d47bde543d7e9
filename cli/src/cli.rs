use clap::{Args, Parser, Subcommand, ValueEnum, ValueHint};
use std::path::PathBuf;

/// Assign addresses' coordinates to regions, branches and technical zones
#[derive(Parser, Debug)]
#[command(name = "zonemap", version, about, propagate_version = true)]
pub struct Cli {
    /// Increase log verbosity (-v, -vv); RUST_LOG overrides
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Resolve one point, or every point in a file
    Resolve(ResolveArgs),

    /// Load and validate layer files without resolving anything
    Check(LayerArgs),
}

/// Layer files and build options shared by every command.
#[derive(Args, Debug, Clone)]
pub struct LayerArgs {
    /// Technical zone polygons (GeoJSON FeatureCollection)
    #[arg(long, value_hint = ValueHint::FilePath)]
    pub zones: PathBuf,

    /// Region polygons (GeoJSON FeatureCollection)
    #[arg(long, value_hint = ValueHint::FilePath)]
    pub regions: Option<PathBuf>,

    /// Branch polygons (GeoJSON FeatureCollection)
    #[arg(long, value_hint = ValueHint::FilePath)]
    pub branches: Option<PathBuf>,

    /// JSON resolver config; flags below override it
    #[arg(long, value_hint = ValueHint::FilePath)]
    pub config: Option<PathBuf>,

    /// Kilometres per degree for nearest-zone distances
    #[arg(long)]
    pub km_per_degree: Option<f64>,

    /// Drop invalid features with a warning instead of failing
    #[arg(long)]
    pub skip_invalid: bool,

    /// Index polygon bounding boxes to narrow containment scans
    #[arg(long)]
    pub prefilter: bool,
}

#[derive(Copy, Clone, Eq, PartialEq, Debug, ValueEnum)]
pub enum OutputFormat { Text, Json }

#[derive(Args, Debug)]
pub struct ResolveArgs {
    #[command(flatten)]
    pub layers: LayerArgs,

    /// Latitude in decimal degrees
    #[arg(allow_negative_numbers = true, requires = "lng", required_unless_present = "points")]
    pub lat: Option<f64>,

    /// Longitude in decimal degrees
    #[arg(allow_negative_numbers = true, requires = "lat")]
    pub lng: Option<f64>,

    /// File of `lat,lng` lines to resolve in order ('#' starts a comment)
    #[arg(long, value_hint = ValueHint::FilePath, conflicts_with_all = ["lat", "lng"])]
    pub points: Option<PathBuf>,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}
