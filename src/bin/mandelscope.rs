// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

#[macro_use]
extern crate log;

use clap::{App, Arg, ArgMatches};
use failure::{format_err, Error};
use num::Complex;
use std::path::Path;
use std::str::FromStr;

use mandelscope::{Dispatcher, DisplayPass, FractalParams, Pipeline, Viewport};

fn parse_pair<T>(s: &str, separator: char) -> Option<(T, T)>
where
    T: FromStr,
{
    match s.find(separator) {
        None => None,
        Some(index) => match (T::from_str(&s[..index]), T::from_str(&s[index + 1..])) {
            (Ok(l), Ok(r)) => Some((l, r)),
            _ => None,
        },
    }
}

fn parse_complex(s: &str) -> Option<Complex<f64>> {
    match parse_pair(s, ',') {
        Some((re, im)) => Some(Complex { re, im }),
        None => None,
    }
}

fn validate_pair<T: FromStr>(s: &str, separator: char, err: &str) -> Result<(), String> {
    match parse_pair::<T>(s, separator) {
        Some(_) => Ok(()),
        None => Err(err.to_string()),
    }
}

fn validate_range<T: FromStr + PartialOrd>(
    s: &str,
    low: T,
    high: T,
    isnotanumber_err: &str,
    isnotinrange_err: &str,
) -> Result<(), String> {
    match T::from_str(s) {
        Ok(i) => {
            if i >= low && i <= high {
                Ok(())
            } else {
                Err(isnotinrange_err.to_string())
            }
        }
        Err(_) => Err(isnotanumber_err.to_string()),
    }
}

const OUTPUT: &str = "output";
const SIZE: &str = "size";
const LEFTLOWER: &str = "leftlower";
const RIGHTUPPER: &str = "rightupper";
const CENTER: &str = "center";
const ZOOM: &str = "zoom";
const THREADS: &str = "threads";
const ITERATIONS: &str = "iterations";
const TILE: &str = "tile";
const DISPLAY: &str = "display";
const RAW: &str = "raw";

fn args<'a>() -> ArgMatches<'a> {
    let max_threads = num_cpus::get();

    App::new("mandelscope")
        .version("0.1.0")
        .author("Elf M. Sternberg <elf.sternberg@gmail.com>")
        .about("Parallel escape-time Mandelbrot renderer")
        .arg(
            Arg::with_name(OUTPUT)
                .required(true)
                .long(OUTPUT)
                .short("o")
                .takes_value(true)
                .help("Output PNG file"),
        )
        .arg(
            Arg::with_name(SIZE)
                .required(false)
                .long(SIZE)
                .short("s")
                .takes_value(true)
                .default_value("1024x1024")
                .validator(|s| validate_pair::<u16>(&s, 'x', "Could not parse output image size"))
                .help("Size of the generated image"),
        )
        .arg(
            Arg::with_name(LEFTLOWER)
                .required(false)
                .long(LEFTLOWER)
                .short("l")
                .takes_value(true)
                .allow_hyphen_values(true)
                .default_value("-2.0,-1.5")
                .validator(|s| validate_pair::<f64>(&s, ',', "Could not parse left lower corner"))
                .help("Left lower corner of the complex window"),
        )
        .arg(
            Arg::with_name(RIGHTUPPER)
                .required(false)
                .long(RIGHTUPPER)
                .short("r")
                .takes_value(true)
                .allow_hyphen_values(true)
                .default_value("1.0,1.5")
                .validator(|s| validate_pair::<f64>(&s, ',', "Could not parse right upper corner"))
                .help("Right upper corner of the complex window"),
        )
        .arg(
            Arg::with_name(CENTER)
                .required(false)
                .long(CENTER)
                .short("c")
                .takes_value(true)
                .allow_hyphen_values(true)
                .requires(ZOOM)
                .validator(|s| validate_pair::<f64>(&s, ',', "Could not parse center point"))
                .help("Center of a square window; overrides the corners"),
        )
        .arg(
            Arg::with_name(ZOOM)
                .required(false)
                .long(ZOOM)
                .short("z")
                .takes_value(true)
                .requires(CENTER)
                .validator(|s| match f64::from_str(&s) {
                    Ok(_) => Ok(()),
                    Err(_) => Err("Could not parse zoom".to_string()),
                })
                .help("Half the edge length of the square window"),
        )
        .arg(
            Arg::with_name(THREADS)
                .required(false)
                .long(THREADS)
                .short("t")
                .takes_value(true)
                .validator(move |s| {
                    validate_range(
                        &s,
                        1,
                        max_threads,
                        "Could not parse thread count",
                        &format!("Thread count must be between 1 and {}", max_threads),
                    )
                })
                .help("Number of threads to use in solver; defaults to all cores"),
        )
        .arg(
            Arg::with_name(ITERATIONS)
                .required(false)
                .long(ITERATIONS)
                .short("i")
                .takes_value(true)
                .default_value("180")
                .validator(move |s| {
                    validate_range(
                        &s,
                        1,
                        1_000_000,
                        "Could not parse iteration count",
                        "Iteration count must be between 1 and 1000000",
                    )
                })
                .help("Maximum number of iterations per point"),
        )
        .arg(
            Arg::with_name(TILE)
                .required(false)
                .long(TILE)
                .takes_value(true)
                .default_value("16")
                .validator(move |s| {
                    validate_range(
                        &s,
                        1,
                        1024,
                        "Could not parse tile size",
                        "Tile size must be between 1 and 1024",
                    )
                })
                .help("Edge of the square work tiles"),
        )
        .arg(
            Arg::with_name(DISPLAY)
                .required(false)
                .long(DISPLAY)
                .short("d")
                .takes_value(true)
                .validator(|s| validate_pair::<u16>(&s, 'x', "Could not parse display size"))
                .help("Size of the presented surface; defaults to the image size"),
        )
        .arg(
            Arg::with_name(RAW)
                .required(false)
                .long(RAW)
                .conflicts_with(DISPLAY)
                .help("Write the generated image without the display pass"),
        )
        .get_matches()
}

fn value<'a>(matches: &'a ArgMatches, name: &str) -> Result<&'a str, Error> {
    matches
        .value_of(name)
        .ok_or_else(|| format_err!("missing value for --{}", name))
}

fn pair(matches: &ArgMatches, name: &str) -> Result<(usize, usize), Error> {
    let (w, h) = parse_pair::<u16>(value(matches, name)?, 'x')
        .ok_or_else(|| format_err!("Error parsing {}", name))?;
    Ok((w as usize, h as usize))
}

fn complex(matches: &ArgMatches, name: &str) -> Result<Complex<f64>, Error> {
    parse_complex(value(matches, name)?).ok_or_else(|| format_err!("Error parsing {}", name))
}

fn params(matches: &ArgMatches) -> Result<FractalParams, Error> {
    let iterations = u32::from_str(value(matches, ITERATIONS)?)?;
    if matches.is_present(CENTER) {
        let zoom = f64::from_str(value(matches, ZOOM)?)?;
        Ok(Viewport::new(complex(matches, CENTER)?, zoom).to_params(iterations)?)
    } else {
        Ok(FractalParams::from_corners(
            complex(matches, LEFTLOWER)?,
            complex(matches, RIGHTUPPER)?,
            iterations,
        )?)
    }
}

fn run(matches: &ArgMatches) -> Result<(), Error> {
    let params = params(matches)?;
    let (width, height) = pair(matches, SIZE)?;
    let threads = match matches.value_of(THREADS) {
        Some(t) => usize::from_str(t)?,
        None => num_cpus::get(),
    };
    let tile = usize::from_str(value(matches, TILE)?)?;
    let dispatcher = Dispatcher::new(tile, tile, threads)?;
    debug!("{:?}, {:?}", params, dispatcher);

    let mut pipeline = Pipeline::new(dispatcher, DisplayPass::default());
    let image = if matches.is_present(RAW) {
        pipeline.generate(&params, width, height)?.to_rgba_image()
    } else {
        let (surface_width, surface_height) = if matches.is_present(DISPLAY) {
            pair(matches, DISPLAY)?
        } else {
            (width, height)
        };
        pipeline.generate(&params, width, height)?;
        pipeline
            .present(surface_width, surface_height)
            .ok_or_else(|| format_err!("no image to present"))??
            .to_rgba_image()
    };

    let outfile = value(matches, OUTPUT)?;
    image
        .ok_or_else(|| format_err!("image buffer does not match its dimensions"))?
        .save(Path::new(outfile))?;
    info!("wrote {}", outfile);
    Ok(())
}

fn main() {
    env_logger::init();
    let matches = args();
    if let Err(e) = run(&matches) {
        eprintln!("Render failure: {}", e);
        std::process::exit(1);
    }
}
