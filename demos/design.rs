//! Loads a saved pole/zero plot and prints its transfer function and a
//! coarse view of its frequency response.
#[macro_use]
extern crate log;
extern crate clap;
extern crate simple_logger;
extern crate zplane;

use clap::{App, Arg};
use std::f64::consts::PI;
use std::process::exit;
use zplane::config::EngineConfig;
use zplane::session::Session;

fn main() {
    simple_logger::init().unwrap();

    let matches = App::new("zplane design")
        .version("0.1")
        .about("Prints the coefficients and response of a saved pole/zero plot")
        .arg(
            Arg::with_name("filter")
                .short("f")
                .long("filter")
                .value_name("CSV")
                .help("Pole/zero file written by a previous session")
                .required(true)
                .takes_value(true),
        )
        .arg(
            Arg::with_name("config")
                .short("c")
                .long("config")
                .value_name("TOML")
                .help("Engine configuration")
                .takes_value(true),
        )
        .arg(
            Arg::with_name("rows")
                .short("r")
                .long("rows")
                .value_name("N")
                .help("Number of response rows to print")
                .takes_value(true),
        )
        .get_matches();

    let config = match matches.value_of("config") {
        Some(path) => match EngineConfig::load(path) {
            Ok(config) => config,
            Err(e) => {
                error!("{}", e);
                exit(1);
            }
        },
        None => EngineConfig::default(),
    };
    let rows: usize = match matches.value_of("rows").unwrap_or("10").parse() {
        Ok(rows) if rows > 0 => rows,
        _ => {
            error!("rows must be a positive integer");
            exit(1);
        }
    };

    let mut session = Session::new(config);
    if let Err(e) = session.load_file(matches.value_of("filter").unwrap()) {
        error!("{}", e);
        exit(1);
    }

    let coeffs = session.coefficients();
    println!("b = {:?}", coeffs.b);
    println!("a = {:?}", coeffs.a);

    let resp = session.frequency_response();
    if resp.is_empty() {
        println!("empty plane, no response");
        return;
    }
    let mag = resp.magnitude();
    let phase = resp.phase();
    let step = (resp.len() / rows).max(1);
    println!("{:>10} {:>12} {:>10}", "w/pi", "|H| (dB)", "phase");
    for k in (0..resp.len()).step_by(step) {
        println!(
            "{:>10.4} {:>12.3} {:>10.4}",
            resp.w[k] / PI,
            20.0 * mag[k].max(1e-12).log10(),
            phase[k]
        );
    }
}
