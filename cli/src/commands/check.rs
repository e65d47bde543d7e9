use anyhow::Result;

use crate::cli::{Cli, LayerArgs};
use super::common::load_resolver;

pub fn run(cli: &Cli, args: &LayerArgs) -> Result<()> {
    let resolver = load_resolver(args)?;
    let layers = resolver.layers();

    if cli.verbose > 0 {
        eprintln!("[check] config={:?}", resolver.config());
    }

    let summary = |name: &str, count: Option<(usize, usize)>| match count {
        Some((len, skipped)) => println!("{name:<8} {len} record(s), {skipped} skipped"),
        None => println!("{name:<8} not loaded"),
    };
    summary("regions", layers.regions.as_ref().map(|l| (l.len(), l.skipped())));
    summary("branches", layers.branches.as_ref().map(|l| (l.len(), l.skipped())));
    summary("zones", Some((layers.zones.len(), layers.zones.skipped())));

    anyhow::ensure!(!layers.zones.is_empty(), "zone layer is empty; no point could be assigned a zone");
    Ok(())
}
