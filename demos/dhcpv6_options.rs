use std::env;
use std::fs;
use std::io::{self, Write};
use std::process;

use getopts::Options;
use log::{debug, error, LevelFilter};

use dhcpv6_options::wire::pretty_print::PrettyPrinter;
use dhcpv6_options::wire::{emit_options, parse_options, Dhcpv6RawOptions};

fn setup_logging(filter: LevelFilter) {
    env_logger::Builder::new()
        .format(|buf, record| {
            writeln!(
                buf,
                "\x1b[37m{:>5}\x1b[0m {}",
                record.level(),
                record.args()
            )
        })
        .filter(None, filter)
        .parse_filters(&env::var("RUST_LOG").unwrap_or_default())
        .init();
}

fn parse_hex(text: &str) -> Result<Vec<u8>, String> {
    let digits: Vec<u8> = text
        .bytes()
        .filter(|c| !c.is_ascii_whitespace() && *c != b':')
        .collect();
    if digits.len() % 2 != 0 {
        return Err(format!("odd number of hex digits ({})", digits.len()));
    }
    digits
        .chunks(2)
        .map(|pair| {
            let pair = std::str::from_utf8(pair).map_err(|err| err.to_string())?;
            u8::from_str_radix(pair, 16).map_err(|_| format!("invalid hex octet {pair:?}"))
        })
        .collect()
}

fn main() {
    let args: Vec<String> = env::args().collect();
    let program = &args[0];

    let mut opts = Options::new();
    opts.optopt("f", "file", "read the options section from FILE", "FILE");
    opts.optflag("r", "reemit", "emit the decoded options again and compare");
    opts.optflag(
        "v",
        "verbose",
        "log at trace level (each option is traced with the `verbose` feature)",
    );
    opts.optflag("h", "help", "print this help menu");

    let matches = match opts.parse(&args[1..]) {
        Ok(matches) => matches,
        Err(err) => {
            eprintln!("{err}");
            process::exit(1)
        }
    };
    if matches.opt_present("h") || (matches.free.is_empty() && !matches.opt_present("f")) {
        let brief = format!("Usage: {program} [options] [HEX]...");
        print!("{}", opts.usage(&brief));
        process::exit(if matches.opt_present("h") { 0 } else { 1 })
    }

    setup_logging(if matches.opt_present("v") {
        LevelFilter::Trace
    } else {
        LevelFilter::Info
    });

    let text = match matches.opt_str("f") {
        Some(path) => match fs::read_to_string(&path) {
            Ok(text) => text,
            Err(err) => {
                error!("cannot read {path}: {err}");
                process::exit(1)
            }
        },
        None => matches.free.join(""),
    };
    let buffer = match parse_hex(&text) {
        Ok(buffer) => buffer,
        Err(err) => {
            error!("{err}");
            process::exit(1)
        }
    };
    debug!("decoding {} octets", buffer.len());

    let stdout = io::stdout();
    let mut stdout = stdout.lock();
    let _ = write!(
        stdout,
        "{}",
        PrettyPrinter::<Dhcpv6RawOptions>::new("", &buffer)
    );

    let options = match parse_options(&buffer) {
        Ok(options) => options,
        Err(err) => {
            error!("{err}");
            process::exit(2)
        }
    };

    if matches.opt_present("r") {
        match emit_options(&options) {
            Ok(bytes) if bytes == buffer => debug!("re-emitted {} octets identically", bytes.len()),
            Ok(bytes) => {
                error!("re-emitted options differ: {bytes:02x?}");
                process::exit(3)
            }
            Err(err) => {
                error!("{err}");
                process::exit(3)
            }
        }
    }
}
