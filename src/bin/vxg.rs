//! vxg: grid coordinate conversions from the command line
use clap::Parser;
use log::{debug, trace};
use std::io::{self, BufRead};
use vxgrid::prelude::*;

#[derive(Parser, Debug)]
#[command(name = "vxg")]
#[command(author, version, about = "vxgrid: lat/lon <-> grid pixel conversions", long_about = None)]
struct Cli {
    /// Registry name, or quoted grid specification, of the grid to use
    grid: String,

    /// Inverse operation: read "x y" pixel pairs, write "lat lon"
    #[clap(long = "inverse", short = 'I')]
    inverse: bool,

    /// Read "x y" cell indices, write "x y area_km2"
    #[clap(long = "area", short = 'a')]
    area: bool,

    /// Dump the grid parameters, then exit
    #[clap(long = "info", short = 'i')]
    info: bool,

    /// Number of decimals in output
    #[clap(long = "decimals", short = 'd')]
    decimals: Option<usize>,

    #[clap(flatten)]
    verbose: clap_verbosity_flag::Verbosity,
}

fn main() -> Result<(), anyhow::Error> {
    let options = Cli::parse();
    env_logger::Builder::new()
        .filter_level(options.verbose.log_level_filter())
        .init();
    trace!("This is vxg");
    debug!("{:#?}", options);

    let grid = parse_grid(&options.grid)?;
    grid.log_dump();

    if options.info {
        let mut text = String::new();
        grid.dump(&mut text, 0)?;
        print!("{text}");
        return Ok(());
    }

    let decimals = options.decimals.unwrap_or(6);
    for line in io::stdin().lock().lines() {
        let line = line?;
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let args: Vec<&str> = line.split_whitespace().collect();
        if args.len() < 2 {
            anyhow::bail!("expected two numbers, got '{line}'");
        }
        let a: f64 = args[0].parse()?;
        let b: f64 = args[1].parse()?;

        if options.area {
            let (x, y) = (a.round() as i64, b.round() as i64);
            let area = grid.calc_area(x, y)?;
            println!("{x} {y} {area:.decimals$}");
            continue;
        }

        let (c, d) = if options.inverse {
            grid.xy_to_latlon(a, b)
        } else {
            grid.latlon_to_xy(a, b)
        };
        println!("{c:.decimals$} {d:.decimals$}");
    }
    Ok(())
}
