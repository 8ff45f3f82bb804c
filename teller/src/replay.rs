use crate::*;
use indexmap::IndexMap;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Op {
    Request,
    Release,
}

/// One entry of a request trace.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TraceLine {
    /// 1-based line number in the trace file.
    pub line:       usize,
    pub op:         Op,
    pub process:    ProcessId,
    pub vector:     Vector,
}

/// Parses `[+|-][P]<process>: <units>...`. A leading `-` marks a
/// release, anything else a request. Blank lines and lines starting
/// with `#` carry nothing.
pub fn parse_trace_line(line: usize, text: &str) -> Result<Option<TraceLine>> {
    let text = text.trim();
    if text.is_empty() || text.starts_with('#') {
        return Ok(None);
    }
    let (head, tail) = text.split_once(':')
        .ok_or_else(|| anyhow!("Missing ':' after the process number"))?;
    let head = head.trim();
    let (op, head) = match head.strip_prefix('-') {
        Some(rest)  => { (Op::Release, rest) },
        None        => { (Op::Request, head.strip_prefix('+').unwrap_or(head)) },
    };
    let head = head.trim_start_matches(['P', 'p']);
    let process = head.parse::<ProcessId>()
        .with_context(|| format!("Bad process number '{}'", head))?;
    let vector = input::parse_vector(tail, None)?;

    Ok(Some(TraceLine { line, op, process, vector }))
}

pub fn read_trace<R: BufRead>(reader: R) -> Result<Vec<TraceLine>> {
    let mut res = vec![];
    for (idx, l) in reader.lines().enumerate() {
        let l = l?;
        if let Some(t) = parse_trace_line(idx + 1, &l)
            .with_context(|| format!("Trace line {}", idx + 1))? {
            res.push(t);
        }
    }

    Ok(res)
}

/// What happened to one trace entry. Granted requests carry their
/// [`Grant`], releases carry nothing.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Outcome {
    pub line:       usize,
    pub op:         Op,
    pub process:    ProcessId,
    pub vector:     Vector,
    pub result:     std::result::Result<Option<Grant>, Denial>,
}

impl Outcome {
    pub fn kind(&self) -> &'static str {
        match &self.result {
            Ok(Some(_)) => { "granted" },
            Ok(None)    => { "released" },
            Err(d)      => { d.kind() },
        }
    }
}

pub struct Summary {
    pub outcomes:   Vec<Outcome>,
    /// Outcome kinds, in order of first appearance.
    pub tally:      IndexMap<&'static str, usize>,
}

/// Feeds `trace` to `engine` one entry at a time. Denials do not stop
/// the replay; every entry gets an [`Outcome`].
pub fn replay(engine: &mut Engine, trace: &[TraceLine]) -> Summary {
    let mut outcomes = Vec::with_capacity(trace.len());
    let mut tally: IndexMap<&'static str, usize> = IndexMap::new();
    for t in trace {
        let result = match t.op {
            Op::Request => { engine.request_resources(t.process, &t.vector).map(Some) },
            Op::Release => { engine.release_resources(t.process, &t.vector).map(|_| None) },
        };
        let o = Outcome {
            line:       t.line,
            op:         t.op,
            process:    t.process,
            vector:     t.vector.clone(),
            result,
        };
        *tally.entry(o.kind()).or_insert(0) += 1;
        outcomes.push(o);
    }

    Summary { outcomes, tally }
}
