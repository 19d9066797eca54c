use std::io::Write;
use std::str::FromStr;

use clap::{App, Arg, ArgMatches};

// With default values on every option, clap's generated usage line lists
// them all as if they were required.
const USAGE: &str = "gen_gamma_lut [FLAGS] [OPTIONS]";

const USAGE_EXAMPLES: &str = "EXAMPLES:
    gen_gamma_lut
    gen_gamma_lut --gamma 2.8
    gen_gamma_lut --name gamma8 --progmem
    gen_gamma_lut --name led --progmem --helper
    gen_gamma_lut --format csv

Values are clamped to [0, 255]. The table maps input v (0..255) to
round(((v / 255)^gamma) * 255).";

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum OutputFormat {
    /// A C `uint8_t` array declaration.
    Array,

    /// One line of comma-separated values.
    Csv,
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            // "c" is what older invocations of the generator used.
            "array" | "c" => Ok(OutputFormat::Array),
            "csv" => Ok(OutputFormat::Csv),
            _ => Err(format!(
                "unknown output format '{}' (expected 'array' or 'csv')",
                s
            )),
        }
    }
}

/// Everything a single run needs, parsed and typed up front.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderConfig {
    pub gamma: f64,
    pub name: String,
    pub progmem: bool,
    pub helper: bool,
    pub format: OutputFormat,
}

impl Default for RenderConfig {
    fn default() -> Self {
        RenderConfig {
            gamma: 2.2,
            name: "gamma8".into(),
            progmem: false,
            helper: false,
            format: OutputFormat::Array,
        }
    }
}

impl RenderConfig {
    /// Every option in `app()` has a default and a validator, so the
    /// fallbacks and parse errors here only matter for matches that come
    /// from some other `App`.
    pub fn from_matches(matches: &ArgMatches) -> Result<Self, clap::Error> {
        let defaults = RenderConfig::default();

        let gamma = match matches.value_of("gamma") {
            Some(s) => s
                .parse::<f64>()
                .map_err(|_| clap::Error::value_validation_auto(format!("invalid gamma '{}'", s)))?,
            None => defaults.gamma,
        };
        let name = matches
            .value_of("name")
            .map(|s| s.to_string())
            .unwrap_or(defaults.name);
        let format = match matches.value_of("format") {
            Some(s) => s.parse::<OutputFormat>().map_err(clap::Error::value_validation_auto)?,
            None => defaults.format,
        };

        Ok(RenderConfig {
            gamma,
            name,
            progmem: matches.is_present("progmem"),
            helper: matches.is_present("helper"),
            format,
        })
    }
}

pub fn app() -> App<'static, 'static> {
    App::new("Gamma LUT Generator")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Generates a 256-entry gamma lookup table for 8-bit LED values")
        .usage(USAGE)
        .after_help(USAGE_EXAMPLES)
        .arg(
            Arg::with_name("gamma")
                .long("gamma")
                .value_name("GAMMA")
                .help("Gamma exponent of the curve")
                .takes_value(true)
                .allow_hyphen_values(true)
                .default_value("2.2")
                .validator(|s| {
                    s.parse::<f64>()
                        .map(|_| ())
                        .map_err(|_| format!("'{}' is not a number", s))
                }),
        )
        .arg(
            Arg::with_name("name")
                .long("name")
                .value_name("IDENT")
                .help("Array name; the accessor is named <IDENT>_read")
                .takes_value(true)
                .default_value("gamma8")
                .validator(|s| {
                    if is_identifier(&s) {
                        Ok(())
                    } else {
                        Err(format!("'{}' is not a valid C identifier", s))
                    }
                }),
        )
        .arg(
            Arg::with_name("progmem")
                .long("progmem")
                .help("Place the table in PROGMEM (Arduino/AVR flash)"),
        )
        .arg(
            Arg::with_name("helper")
                .long("helper")
                .help("Also emit a <IDENT>_read(v) accessor function"),
        )
        .arg(
            Arg::with_name("format")
                .long("format")
                .value_name("FORMAT")
                .help("Output format")
                .takes_value(true)
                .possible_values(&["array", "c", "csv"])
                .default_value("array"),
        )
}

/// Builds the table and renders it.  The returned text has no trailing
/// newline.
pub fn run(config: &RenderConfig) -> Result<String, lut::Error> {
    log::debug!("{:?}", config);

    let table = lut::build_gamma_table(config.gamma)?;

    match config.format {
        OutputFormat::Array => {
            log::debug!("Rendering array '{}'", config.name);
            lut::emit_c_array(&table, &config.name, config.progmem, config.helper)
        }
        OutputFormat::Csv => {
            log::debug!("Rendering CSV");
            lut::emit_csv(&table)
        }
    }
}

/// Runs the whole pipeline and writes the result to `out` followed by a
/// single newline, or a diagnostic to `err`.  Returns the process exit
/// code.  Nothing is written to `out` unless rendering succeeded.
pub fn run_to<W: Write, E: Write>(config: &RenderConfig, out: &mut W, err: &mut E) -> i32 {
    let text = match run(config) {
        Ok(text) => text,
        Err(e) => {
            let _ = writeln!(err, "error: {}", e);
            return 1;
        }
    };

    if let Err(e) = out
        .write_all(format!("{}\n", text).as_bytes())
        .and_then(|_| out.flush())
    {
        let _ = writeln!(err, "error: failed to write output: {}", e);
        return 1;
    }

    0
}

fn is_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}
