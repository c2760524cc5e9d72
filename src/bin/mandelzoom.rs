extern crate clap;
extern crate env_logger;
#[macro_use]
extern crate failure;
#[macro_use]
extern crate log;
extern crate mandelzoom;
extern crate num_cpus;

use clap::{App, Arg, ArgMatches};
use failure::Error;
use mandelzoom::output::write_frame;
use mandelzoom::overlay::draw_axes;
use mandelzoom::view::parse_interactions;
use mandelzoom::{FrameRenderer, Palette, RenderControl, ViewState};
use std::str::FromStr;
use std::time::Duration;

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

fn validate_parse<T: FromStr>(s: &str, err: &str) -> Result<(), String> {
    match T::from_str(s) {
        Ok(_) => Ok(()),
        Err(_) => Err(err.to_string()),
    }
}

const OUTPUT: &str = "output";
const SIZE: &str = "size";
const CENTER: &str = "center";
const ZOOM: &str = "zoom";
const ITERATIONS: &str = "iterations";
const PALETTE: &str = "palette";
const THREADS: &str = "threads";
const ACTIONS: &str = "actions";
const DEADLINE: &str = "deadline";
const AXES: &str = "axes";

fn args<'a>() -> ArgMatches<'a> {
    let max_threads = num_cpus::get();

    App::new("mandelzoom")
        .version("0.1.0")
        .author("Elf M. Sternberg <elf.sternberg@gmail.com>")
        .about("Pan-and-zoom Mandelbrot renderer")
        .arg(
            Arg::with_name(OUTPUT)
                .required(true)
                .long(OUTPUT)
                .short("o")
                .takes_value(true)
                .help("Output file (.png for PNG, anything else for PPM)"),
        )
        .arg(
            Arg::with_name(SIZE)
                .required(false)
                .long(SIZE)
                .short("s")
                .takes_value(true)
                .default_value("1000x1000")
                .validator(|s| validate_pair::<u16>(&s, 'x', "Could not parse output image size"))
                .help("Size of output image"),
        )
        .arg(
            Arg::with_name(CENTER)
                .required(false)
                .long(CENTER)
                .short("c")
                .takes_value(true)
                .allow_hyphen_values(true)
                .default_value("0,0")
                .validator(|s| validate_pair::<f64>(&s, ',', "Could not parse center point"))
                .help("Point on the complex plane at the center of the image"),
        )
        .arg(
            Arg::with_name(ZOOM)
                .required(false)
                .long(ZOOM)
                .short("z")
                .takes_value(true)
                .default_value("100")
                .validator(|s| {
                    validate_range(
                        &s,
                        ::std::f64::MIN_POSITIVE,
                        ::std::f64::MAX,
                        "Could not parse zoom",
                        "Zoom must be a positive percentage",
                    )
                })
                .help("Zoom in percent; 100 shows -2..2 on both axes"),
        )
        .arg(
            Arg::with_name(ITERATIONS)
                .required(false)
                .long(ITERATIONS)
                .short("i")
                .takes_value(true)
                .default_value("80")
                .validator(move |s| {
                    validate_range(
                        &s,
                        1,
                        1_000_000,
                        "Could not parse iteration count",
                        "Iteration count must be between 1 and 1000000",
                    )
                })
                .help("Maximum iterations per point"),
        )
        .arg(
            Arg::with_name(PALETTE)
                .required(false)
                .long(PALETTE)
                .short("p")
                .takes_value(true)
                .default_value("hue")
                .possible_values(&["hue", "hue-inverted", "grayscale"])
                .help("Coloring scheme"),
        )
        .arg(
            Arg::with_name(THREADS)
                .required(false)
                .long(THREADS)
                .short("t")
                .takes_value(true)
                .default_value("1")
                .validator(move |s| {
                    validate_range(
                        &s,
                        1,
                        max_threads,
                        "Could not parse thread count",
                        &format!("Thread count must be between 1 and {}", max_threads),
                    )
                })
                .help("Number of threads to use in renderer"),
        )
        .arg(
            Arg::with_name(ACTIONS)
                .required(false)
                .long(ACTIONS)
                .short("a")
                .takes_value(true)
                .allow_hyphen_values(true)
                .validator(|s| {
                    parse_interactions(&s)
                        .map(|_| ())
                        .map_err(|e| format!("Could not parse actions: {}", e))
                })
                .help("Comma-separated moves applied to the view: up,down,left,right,in,out,reset"),
        )
        .arg(
            Arg::with_name(DEADLINE)
                .required(false)
                .long(DEADLINE)
                .short("d")
                .takes_value(true)
                .validator(|s| validate_parse::<u64>(&s, "Could not parse deadline"))
                .help("Give up if the render takes longer than this many milliseconds"),
        )
        .arg(
            Arg::with_name(AXES)
                .long(AXES)
                .help("Draw the coordinate axes over the image"),
        )
        .get_matches()
}

fn value<'a>(matches: &'a ArgMatches, name: &str) -> Result<&'a str, Error> {
    matches
        .value_of(name)
        .ok_or_else(|| format_err!("Missing value for --{}", name))
}

fn parsed<T: FromStr>(matches: &ArgMatches, name: &str) -> Result<T, Error> {
    let raw = value(matches, name)?;
    T::from_str(raw).map_err(|_| format_err!("Could not parse --{} {:?}", name, raw))
}

fn run(matches: &ArgMatches) -> Result<(), Error> {
    let (width, height) = parse_pair::<u16>(value(matches, SIZE)?, 'x')
        .ok_or_else(|| format_err!("Error parsing image dimensions"))?;
    let (center_x, center_y) = parse_pair::<f64>(value(matches, CENTER)?, ',')
        .ok_or_else(|| format_err!("Error parsing center point"))?;
    let zoom: f64 = parsed(matches, ZOOM)?;
    let iterations: u32 = parsed(matches, ITERATIONS)?;
    let palette: Palette = parsed(matches, PALETTE)?;
    let threads: usize = parsed(matches, THREADS)?;

    let mut view = ViewState::new(center_x, center_y, zoom, iterations)?;
    if let Some(actions) = matches.value_of(ACTIONS) {
        for action in parse_interactions(actions)? {
            view = view.apply(action);
        }
    }
    info!(
        "view centered at ({}, {}), zoom {}%, {} iterations",
        view.center_x, view.center_y, view.zoom_percent, view.max_iterations
    );

    let budget = match matches.value_of(DEADLINE) {
        Some(ms) => Some(Duration::from_millis(u64::from_str(ms)?)),
        None => None,
    };

    let renderer = FrameRenderer::new(width as usize, height as usize, &view, palette)?;
    let ticket = RenderControl::new().begin(budget);
    let mut frame = renderer.render_with(threads, &ticket)?;
    if matches.is_present(AXES) {
        draw_axes(&mut frame, renderer.mapper());
    }
    write_frame(value(matches, OUTPUT)?, &frame)?;
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
