#![deny(clippy::all)]
#![forbid(unsafe_code)]

use anyhow::Context;
use clap::{App, Arg, ArgMatches};
use life_grid::{LifeConfig, LifeWorld, Random};
use pixels_main_support::{animate, AnimationSettings};
use std::str::FromStr;
use std::time::Duration;

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let matches = app().get_matches();
    let (config, settings, seed) = options(&matches)?;

    let mut rand = seed.map_or_else(Random::new, Random::from_seed);
    let world = LifeWorld::new(config, &mut rand).context("could not build the world")?;
    log::info!(
        "{}x{} cells, {}px each, {:.0}% seeded alive",
        config.width,
        config.height,
        config.cell_pixel_size,
        config.live_probability * 100.0
    );
    animate(settings, world)?;
    Ok(())
}

fn app() -> App<'static, 'static> {
    App::new("conway-life-pixels")
        .about("Conway's Game of Life on a wrapping grid")
        .arg(
            Arg::with_name("width")
                .long("width")
                .takes_value(true)
                .default_value("100")
                .help("grid width in cells"),
        )
        .arg(
            Arg::with_name("height")
                .long("height")
                .takes_value(true)
                .default_value("100")
                .help("grid height in cells"),
        )
        .arg(
            Arg::with_name("scale")
                .long("scale")
                .takes_value(true)
                .default_value("2")
                .help("side of one cell in pixels"),
        )
        .arg(
            Arg::with_name("probability")
                .long("probability")
                .takes_value(true)
                .default_value("0.1")
                .help("chance that a cell starts alive"),
        )
        .arg(
            Arg::with_name("sleep")
                .long("sleep")
                .takes_value(true)
                .default_value("0")
                .help("milliseconds to wait between generations"),
        )
        .arg(
            Arg::with_name("max-generations")
                .long("max-generations")
                .takes_value(true)
                .default_value("20000")
                .help("stop stepping at this generation, 0 for never"),
        )
        .arg(
            Arg::with_name("seed")
                .long("seed")
                .takes_value(true)
                .help("seed for a reproducible start"),
        )
}

type Options = (LifeConfig, AnimationSettings, Option<u64>);

fn options(matches: &ArgMatches) -> anyhow::Result<Options> {
    let config = LifeConfig {
        width: value(matches, "width")?,
        height: value(matches, "height")?,
        cell_pixel_size: value(matches, "scale")?,
        live_probability: value(matches, "probability")?,
        ..LifeConfig::default()
    };
    config.validate()?;

    let max_generations: u64 = value(matches, "max-generations")?;
    let settings = AnimationSettings {
        time_step: Duration::from_millis(value(matches, "sleep")?),
        max_generations: (max_generations > 0).then_some(max_generations),
        ..AnimationSettings::default()
    };
    let seed = matches
        .value_of("seed")
        .map(|_| value(matches, "seed"))
        .transpose()?;
    Ok((config, settings, seed))
}

fn value<T>(matches: &ArgMatches, name: &str) -> anyhow::Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    let raw = matches
        .value_of(name)
        .with_context(|| format!("--{name} is missing"))?;
    raw.parse()
        .with_context(|| format!("--{name} {raw:?} is not valid"))
}
