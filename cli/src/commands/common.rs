use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use tracing::info;
use zonemap::io::geojson::read_records_from_slice;
use zonemap::{BuildPolicy, LayerSet, RawRecord, Resolver, ResolverConfig};

use crate::cli::LayerArgs;

/// Merge the optional config file with command-line overrides.
pub fn load_config(args: &LayerArgs) -> Result<ResolverConfig> {
    let mut config = match &args.config {
        Some(path) => {
            let text = fs::read_to_string(path)
                .with_context(|| format!("failed to read config {}", path.display()))?;
            ResolverConfig::from_json(&text)
                .with_context(|| format!("invalid config {}", path.display()))?
        }
        None => ResolverConfig::default(),
    };

    if let Some(km) = args.km_per_degree { config.km_per_degree = km }
    if args.skip_invalid { config.build_policy = BuildPolicy::SkipInvalid }
    if args.prefilter { config.prefilter = true }

    config.validate()?;
    Ok(config)
}

/// Read one GeoJSON layer file into raw records.
pub fn read_layer_file(path: &Path) -> Result<Vec<RawRecord>> {
    let bytes = fs::read(path).with_context(|| format!("failed to read {}", path.display()))?;
    let records = read_records_from_slice(&bytes)
        .with_context(|| format!("failed to parse {}", path.display()))?;
    info!(path = %path.display(), features = records.len(), "read layer file");
    Ok(records)
}

/// Load every layer named in `args` and build a resolver.
pub fn load_resolver(args: &LayerArgs) -> Result<Resolver> {
    let config = load_config(args)?;
    let regions = args.regions.as_deref().map(read_layer_file).transpose()?;
    let branches = args.branches.as_deref().map(read_layer_file).transpose()?;
    let zones = read_layer_file(&args.zones)?;

    let layers = LayerSet::build(regions, branches, zones, &config).context("failed to build layers")?;
    Ok(Resolver::new(layers, config))
}
