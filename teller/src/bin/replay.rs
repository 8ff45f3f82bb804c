use teller::*;
use teller::display::{render_outcome, render_safety, render_state};

/// Replays a trace of resource requests and releases
/// against an initial state.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// JSON file holding the initial state
    #[arg(short, long, value_parser = clap::value_parser!(PathBuf))]
    state:      PathBuf,

    /// Trace file, one `[+|-]<process>: <units>...` entry per line
    #[arg(short, long, value_parser = clap::value_parser!(PathBuf))]
    trace:      PathBuf,

    /// Where to write the final state, as JSON
    #[arg(short, long, value_parser = clap::value_parser!(PathBuf))]
    output:     Option<PathBuf>,

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

    let mut engine = load_engine(&mut JsonSource::new(cli.state), Config::new(cli.scan.into()))?;
    let trace_fd = File::open(&cli.trace)
        .with_context(|| format!("Cannot open {}", cli.trace.display()))?;
    let trace = replay::read_trace(BufReader::new(trace_fd))?;

    let summary = replay::replay(&mut engine, &trace);
    for o in &summary.outcomes {
        println!("{}", render_outcome(o));
    }
    println!();
    for (kind, n) in &summary.tally {
        println!("{:<24}{}", kind, n);
    }

    let state = engine.state()
        .ok_or_else(|| anyhow!("Engine lost its state"))?;
    println!("\n{}\n{}", render_state(state), render_safety(&engine.is_safe()?));
    if let Some(out) = cli.output {
        StateFile::from(state).write_to(&out)?;
    }

    Ok(())
}
