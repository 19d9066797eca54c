use lib::RenderConfig;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    // Malformed arguments never get past here: clap prints its own
    // diagnostic and exits non-zero.
    let matches = lib::app().get_matches();
    let config = match RenderConfig::from_matches(&matches) {
        Ok(config) => config,
        Err(e) => e.exit(),
    };

    let stdout = std::io::stdout();
    let stderr = std::io::stderr();
    let code = lib::run_to(&config, &mut stdout.lock(), &mut stderr.lock());
    std::process::exit(code);
}
