use teller::*;

/// An interactive console for deadlock avoidance
/// with the Banker's algorithm.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// JSON file holding the initial state (prompted for if absent)
    #[arg(short, long, value_parser = clap::value_parser!(PathBuf))]
    state:      Option<PathBuf>,

    /// Admission order of the safety check
    #[arg(long, value_enum, default_value_t = Scan::Sweep)]
    scan:       Scan,

    /// More log output (repeatable)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose:    u8,
}

fn main() -> Result<()> {
    let cli = Args::parse();
    init_logging(cli.verbose);
    let config = Config::new(cli.scan.into());

    let stdin = io::stdin();
    let mut console = Console::new(stdin.lock(), io::stdout());
    let mut engine = match cli.state {
        Some(path)  => { load_engine(&mut JsonSource::new(path), config)? },
        None        => { load_engine(&mut console, config)? }
    };

    menu::run(&mut engine, &mut console)
}
