use std::fs;
use std::path::Path;

use anyhow::{anyhow, Context, Result};
use zonemap::{Detection, LatLng, RegionSource, ResolutionResult};

use crate::cli::{Cli, OutputFormat, ResolveArgs};
use super::common::load_resolver;

pub fn run(cli: &Cli, args: &ResolveArgs) -> Result<()> {
    let points = match (&args.points, args.lat, args.lng) {
        (Some(path), _, _) => read_points(path)?,
        (None, Some(lat), Some(lng)) => vec![LatLng::new(lat, lng)?],
        _ => return Err(anyhow!("either <LAT> <LNG> or --points is required")),
    };

    let resolver = load_resolver(&args.layers)?;

    if cli.verbose > 0 {
        eprintln!("[resolve] {} point(s) against {} zone(s)", points.len(), resolver.layers().zones.len());
    }

    let results = resolver.resolve_all(points).collect::<Result<Vec<_>, _>>()?;

    match args.format {
        OutputFormat::Json if args.points.is_some() => println!("{}", serde_json::to_string_pretty(&results)?),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&results[0])?),
        OutputFormat::Text => {
            let blocks = results.iter().map(format_text).collect::<Vec<_>>();
            print!("{}", blocks.join("\n"));
        }
    }
    Ok(())
}

/// Read `lat,lng` lines, skipping blanks and `#` comments.
pub fn read_points(path: &Path) -> Result<Vec<LatLng>> {
    let text = fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?;
    parse_points(&text).with_context(|| format!("invalid points file {}", path.display()))
}

fn parse_points(text: &str) -> Result<Vec<LatLng>> {
    text.lines().enumerate()
        .map(|(i, line)| (i + 1, line.split('#').next().unwrap_or("").trim()))
        .filter(|(_, line)| !line.is_empty())
        .map(|(lineno, line)| {
            let (lat, lng) = line.split_once(',')
                .ok_or_else(|| anyhow!("line {lineno}: expected `lat,lng`, got `{line}`"))?;
            let lat = lat.trim().parse::<f64>().with_context(|| format!("line {lineno}: bad latitude"))?;
            let lng = lng.trim().parse::<f64>().with_context(|| format!("line {lineno}: bad longitude"))?;
            LatLng::new(lat, lng).with_context(|| format!("line {lineno}"))
        })
        .collect()
}

/// Human-readable block for one result.
pub fn format_text(result: &ResolutionResult) -> String {
    let mut out = format!("point     {:.6}, {:.6}\n", result.point.lat, result.point.lng);

    out.push_str(&match &result.region {
        Detection::Detected(region) => match (region.source, &region.region_id) {
            (RegionSource::Containment, Some(id)) => format!("region    {} ({id})\n", region.region_name),
            _ => format!("region    {} (from zone record)\n", region.region_name),
        },
        Detection::NotDetected => "region    not detected\n".to_owned(),
    });

    out.push_str(&match &result.branch {
        Detection::Detected(branch) => format!("branch    {} ({})\n", branch.branch_name, branch.branch_id),
        Detection::NotDetected => "branch    not detected\n".to_owned(),
    });

    let zone = &result.zone;
    out.push_str(&format!(
        "zone      {} ({}) [{}, {} confidence]\n",
        zone.zone_name, zone.zone_id, zone.method, zone.confidence
    ));
    if let Some(basis) = &zone.basis_id {
        out.push_str(&format!("basis     {basis}\n"));
    }
    if let Some(km) = zone.distance_km {
        out.push_str(&format!("distance  {km:.2} km (approximate)\n"));
    }
    out
}

#[cfg(test)]
mod tests {
    use zonemap::{LayerSet, Resolver, ResolverConfig};

    use super::*;
    use crate::commands::common::tests::{write_temp, ZONES};
    use zonemap::io::geojson::read_records_from_slice;

    fn resolver() -> Resolver {
        let config = ResolverConfig::default();
        let zones = read_records_from_slice(ZONES.as_bytes()).unwrap();
        Resolver::new(LayerSet::build(None, None, zones, &config).unwrap(), config)
    }

    #[test]
    fn parses_points_with_comments_and_blanks() {
        let points = parse_points("# demo addresses\n47.5316, 21.6273\n\n47.591,17.123  # Beled\n").unwrap();
        assert_eq!(points, [LatLng { lat: 47.5316, lng: 21.6273 }, LatLng { lat: 47.591, lng: 17.123 }]);
    }

    #[test]
    fn bad_point_line_reports_line_number() {
        let err = parse_points("47.5,21.6\nnot a point\n").unwrap_err();
        assert!(format!("{err:#}").contains("line 2"));
        assert!(parse_points("95.0,21.6").is_err());
    }

    #[test]
    fn reads_points_file() {
        let file = write_temp("47.53,21.627\n47.53,21.80\n");
        assert_eq!(read_points(file.path()).unwrap().len(), 2);
    }

    #[test]
    fn text_for_inside_match() {
        let result = resolver().resolve(LatLng { lat: 47.53, lng: 21.627 }).unwrap();
        let text = format_text(&result);
        assert!(text.contains("zone      Zone A (A) [inside, high confidence]"));
        assert!(text.contains("region    Tiszántúl (from zone record)"));
        assert!(text.contains("branch    not detected"));
        assert!(!text.contains("distance"));
    }

    #[test]
    fn text_for_nearest_match_shows_rounded_distance() {
        let result = resolver().resolve(LatLng { lat: 47.53, lng: 21.80 }).unwrap();
        let text = format_text(&result);
        assert!(text.contains("[nearest, low confidence]"));
        let km = result.zone.distance_km.unwrap();
        assert!(text.contains(&format!("distance  {km:.2} km")));
    }

    #[test]
    fn text_block_has_one_line_per_field() {
        let result = resolver().resolve(LatLng { lat: 47.53, lng: 21.627 }).unwrap();
        let text = format_text(&result);
        let labels = text.lines().map(|l| l.split_whitespace().next().unwrap()).collect::<Vec<_>>();
        assert_eq!(labels, ["point", "region", "branch", "zone"]);
        assert!(text.starts_with("point     47.530000, 21.627000\n"));
        assert!(text.ends_with('\n'));
    }
}
