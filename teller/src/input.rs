use crate::*;
use serde::{Deserialize, Serialize};

/// Parses whitespace separated integers. With `len` given, the count
/// must match exactly.
pub fn parse_vector(text: &str, len: Option<usize>) -> Result<Vector> {
    let res = text.split_whitespace()
        .map(|tok| {
            tok.parse::<Units>()
                .map_err(|_| anyhow!("Non-integer value: '{}'", tok))
        })
        .collect::<Result<Vector>>()?;
    if let Some(n) = len {
        if res.len() != n {
            bail!("Expected vector length {}, got {}", n, res.len());
        }
    }

    Ok(res)
}

/// Parses one matrix row per non-blank line.
pub fn parse_matrix(text: &str, rows: Option<usize>, cols: Option<usize>) -> Result<Matrix> {
    let res = text.lines()
        .filter(|l| !l.trim().is_empty())
        .map(|l| parse_vector(l, None))
        .collect::<Result<Matrix>>()?;
    if let Some(n) = rows {
        if res.len() != n {
            bail!("Expected {} rows, got {}", n, res.len());
        }
    }
    if let Some(n) = cols {
        if let Some((i, r)) = res.iter().find_position(|r| r.len() != n) {
            bail!("Row {} expected {} cols, got {}", i, n, r.len());
        }
    }

    Ok(res)
}

/// What a [`StateSource`] hands over: the engine's dimensions and the
/// state to load into it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Loaded {
    pub processes:  usize,
    pub resources:  usize,
    pub snapshot:   Snapshot,
}

/// Defines the interface for reading an initial state.
///
/// We ship one type reading JSON files and one prompting on a console.
/// Any other origin (a database, a network peer) only needs to
/// implement this trait.
pub trait StateSource {
    fn read_snapshot(&mut self) -> Result<Loaded>;
}

/// The on-disk form of a state.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateFile {
    pub allocation: Matrix,
    pub max:        Matrix,
    pub available:  Vector,
}

impl From<StateFile> for Snapshot {
    fn from(f: StateFile) -> Self {
        Snapshot { allocation: f.allocation, max: f.max, available: f.available }
    }
}

impl From<&State> for StateFile {
    fn from(s: &State) -> Self {
        Self {
            allocation: s.allocation().clone(),
            max:        s.max().clone(),
            available:  s.available().clone(),
        }
    }
}

impl StateFile {
    pub fn write_to(&self, path: &Path) -> Result<()> {
        let w = BufWriter::new(File::create(path)
            .with_context(|| format!("Cannot create {}", path.display()))?);
        serde_json::to_writer_pretty(w, self)?;

        Ok(())
    }
}

/// Reads a [`StateFile`]. The number of processes is the number of
/// allocation rows, the number of resource types the length of the
/// available vector; the engine checks that everything else agrees.
pub struct JsonSource {
    pub path: PathBuf,
}

impl JsonSource {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
        }
    }
}

impl StateSource for JsonSource {
    fn read_snapshot(&mut self) -> Result<Loaded> {
        let fd = File::open(&self.path)
            .with_context(|| format!("Cannot open {}", self.path.display()))?;
        let file: StateFile = serde_json::from_reader(BufReader::new(fd))
            .with_context(|| format!("Malformed state file {}", self.path.display()))?;

        Ok(Loaded {
            processes:  file.allocation.len(),
            resources:  file.available.len(),
            snapshot:   file.into(),
        })
    }
}

/// A line-oriented conversation: every question is written and flushed
/// to `output`, every answer is one non-blank line of `input`.
pub struct Console<R, W> {
    input:  R,
    output: W,
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    pub fn into_output(self) -> W {
        self.output
    }

    pub fn say(&mut self, msg: &str) -> Result<()> {
        writeln!(self.output, "{}", msg)?;
        Ok(())
    }

    /// Asks `question` and returns the next non-blank line, trimmed.
    /// `None` means the input is exhausted.
    pub fn ask(&mut self, question: &str) -> Result<Option<String>> {
        write!(self.output, "{}", question)?;
        self.output.flush()?;
        let mut line = String::new();
        loop {
            line.clear();
            if self.input.read_line(&mut line)? == 0 {
                return Ok(None);
            }
            if !line.trim().is_empty() {
                return Ok(Some(line.trim().to_string()));
            }
        }
    }

    fn expect(&mut self, question: &str) -> Result<String> {
        self.ask(question)?
            .ok_or_else(|| anyhow!("Unexpected end of input"))
    }

    fn ask_count(&mut self, question: &str) -> Result<usize> {
        let ans = self.expect(question)?;
        ans.parse()
            .with_context(|| format!("Not a count: '{}'", ans))
    }

    fn ask_matrix(&mut self, title: &str, rows: usize, cols: usize) -> Result<Matrix> {
        self.say(title)?;
        let text = (0..rows)
            .map(|_| self.expect(""))
            .collect::<Result<Vec<String>>>()?
            .join("\n");
        parse_matrix(&text, Some(rows), Some(cols))
    }
}

impl<R: BufRead, W: Write> StateSource for Console<R, W> {
    /// Asks for the process count, the resource count, then the
    /// allocation matrix, the max matrix and the available vector.
    fn read_snapshot(&mut self) -> Result<Loaded> {
        let processes = self.ask_count("Enter number of processes: ")?;
        let resources = self.ask_count("Enter number of resources: ")?;
        let allocation = self.ask_matrix("\nEnter Allocation Matrix:", processes, resources)?;
        let max = self.ask_matrix("\nEnter Max Matrix:", processes, resources)?;
        self.say("\nEnter Available Resources:")?;
        let line = self.expect("")?;
        let available = parse_vector(&line, Some(resources))?;

        Ok(Loaded {
            processes,
            resources,
            snapshot: Snapshot { allocation, max, available },
        })
    }
}
