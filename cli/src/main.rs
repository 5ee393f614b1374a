//! `fieldpath`: precompute and query all-pairs path caches for `.fld2` maps.

use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use fieldpath_cache::{BuildOptions, CacheBuilder, FindRequest, store};
use fieldpath_map::Grid;

#[derive(Parser, Debug)]
#[command(name = "fieldpath", version, about = "All-pairs path cache for tile maps")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Precompute every walkable pair of a map and save the cache as JSON.
    Build {
        /// Map file (.fld2)
        #[arg(long, value_name = "FILE")]
        map: PathBuf,

        /// Output cache file
        #[arg(long, value_name = "FILE")]
        out: PathBuf,

        /// Search pairs in different connected regions too
        #[arg(long)]
        keep_disconnected: bool,
    },
    /// Print the path between two tiles.
    #[command(allow_negative_numbers = true)]
    Find {
        /// Map file (.fld2), searched live when no cache is given
        #[arg(long, value_name = "FILE", required_unless_present = "cache")]
        map: Option<PathBuf>,

        /// Cache file written by `build`
        #[arg(long, value_name = "FILE")]
        cache: Option<PathBuf>,

        x1: i32,
        y1: i32,
        x2: i32,
        y2: i32,
    },
}

fn build(map: PathBuf, out: PathBuf, keep_disconnected: bool) -> Result<()> {
    let grid = Grid::open(&map).with_context(|| format!("loading map {}", map.display()))?;

    let started = Instant::now();
    let opts = BuildOptions::default().skip_disconnected(!keep_disconnected);
    let (cache, stats) = CacheBuilder::new(&grid).options(opts).build();
    log::info!("precomputed in {:.2?}: {stats}", started.elapsed());

    store::save(&cache, &out).with_context(|| format!("writing cache {}", out.display()))?;
    Ok(())
}

fn find(map: Option<PathBuf>, cache: Option<PathBuf>, req: FindRequest) -> Result<()> {
    let resp = match (cache, map) {
        (Some(cache), _) => {
            let cache = store::load(&cache)
                .with_context(|| format!("reading cache {}", cache.display()))?;
            req.answer(&cache)
        }
        (None, Some(map)) => {
            let grid =
                Grid::open(&map).with_context(|| format!("loading map {}", map.display()))?;
            let mut pr = grid.path_range();
            req.answer_live(&grid, &mut pr)
        }
        (None, None) => anyhow::bail!("either --map or --cache is required"),
    };
    println!("{resp}");
    Ok(())
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    match Cli::parse().command {
        Command::Build {
            map,
            out,
            keep_disconnected,
        } => build(map, out, keep_disconnected),
        Command::Find {
            map,
            cache,
            x1,
            y1,
            x2,
            y2,
        } => find(map, cache, FindRequest::new(x1, y1, x2, y2)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn find_accepts_negative_coordinates() {
        let cli = Cli::try_parse_from(["fieldpath", "find", "--cache", "c.json", "0", "-1", "2", "3"])
            .unwrap();
        match cli.command {
            Command::Find { cache, y1, .. } => {
                assert_eq!(cache, Some(PathBuf::from("c.json")));
                assert_eq!(y1, -1);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn find_needs_a_source() {
        assert!(Cli::try_parse_from(["fieldpath", "find", "0", "0", "1", "1"]).is_err());
    }

    #[test]
    fn build_flags() {
        let cli = Cli::try_parse_from([
            "fieldpath",
            "build",
            "--map",
            "m.fld2",
            "--out",
            "c.json",
            "--keep-disconnected",
        ])
        .unwrap();
        assert!(matches!(
            cli.command,
            Command::Build {
                keep_disconnected: true,
                ..
            }
        ));
    }
}
