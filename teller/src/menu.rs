use crate::*;
use crate::display::*;
use crate::input::parse_vector;

const MENU: &str = "\nMenu:\n\
    1. Show State\n\
    2. Check Safety\n\
    3. Request Resources\n\
    4. Release Resources\n\
    5. Exit";

/// Drives `engine` from `console` until the user picks "Exit" or the
/// input runs dry. Bad input is reported and the menu shown again;
/// only I/O failures end the loop early.
pub fn run<R: BufRead, W: Write>(engine: &mut Engine, console: &mut Console<R, W>) -> Result<()> {
    loop {
        console.say(MENU)?;
        let Some(choice) = console.ask("Choice: ")? else { break };
        match choice.as_str() {
            "1" => {
                match engine.state() {
                    Some(s) => { console.say(&format!("\n{}", render_state(s)))?; },
                    None    => { console.say("No state loaded.")?; }
                }
            },
            "2" => {
                match engine.is_safe() {
                    Ok(v)   => { console.say(&format!("\n{}", render_safety(&v)))?; },
                    Err(e)  => { console.say(&format!("Error: {}", e))?; }
                }
            },
            "3" | "4" => {
                let Some((process, v)) = ask_vector(engine, console)? else { continue };
                let msg = if choice == "3" {
                    match engine.request_resources(process, &v) {
                        Ok(g)   => { render_grant(&g) },
                        Err(d)  => { render_denial(&d) },
                    }
                } else {
                    match engine.release_resources(process, &v) {
                        Ok(())  => { format!("P{} released [{}].", process, v.iter().join(" ")) },
                        Err(d)  => { render_denial(&d) },
                    }
                };
                console.say(&msg)?;
            },
            "5" => {
                console.say("Exiting...")?;
                return Ok(());
            },
            _   => { console.say("Invalid choice.")?; }
        }
    }

    Ok(())
}

// `None` if the answers could not be used (already reported) or the
// input ended.
fn ask_vector<R: BufRead, W: Write>(
    engine:     &Engine,
    console:    &mut Console<R, W>,
) -> Result<Option<(ProcessId, Vector)>> {
    let Some(p) = console.ask("Enter process number: ")? else { return Ok(None) };
    let Ok(process) = p.parse::<ProcessId>() else {
        console.say(&format!("Invalid process number '{}'.", p))?;
        return Ok(None);
    };
    let Some(line) = console.ask("Enter vector: ")? else { return Ok(None) };
    match parse_vector(&line, Some(engine.resources())) {
        Ok(v)   => { Ok(Some((process, v))) },
        Err(e)  => {
            console.say(&format!("Input error: {}", e))?;
            Ok(None)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session(script: &str) -> (Engine, String) {
        let mut engine = Engine::new(2, 1).unwrap();
        engine.load_state(Snapshot {
            allocation: vec![vec![1], vec![0]],
            max:        vec![vec![2], vec![2]],
            available:  vec![1],
        }).unwrap();
        let mut console = Console::new(script.as_bytes(), Vec::new());
        run(&mut engine, &mut console).unwrap();
        let out = String::from_utf8(console.into_output()).unwrap();
        (engine, out)
    }

    #[test]
    fn request_then_exit() {
        let (e, out) = session("3\n0\n1\n5\n3\n");
        assert!(out.contains("Request of P0 granted."));
        assert!(out.ends_with("Exiting...\n"));
        assert_eq!(e.state().unwrap().available(), &vec![0]);
    }

    #[test]
    fn unsafe_request_is_denied() {
        // Giving P1 the last unit leaves both processes one short.
        let (e, out) = session("3\n1\n1\n");
        assert!(out.contains("would leave the system unsafe"));
        assert_eq!(e.state().unwrap().available(), &vec![1]);
    }

    #[test]
    fn junk_is_survivable() {
        let (_, out) = session("9\n3\nx\n3\n0\n1 2\n4\n0\n1\n2\n");
        assert!(out.contains("Invalid choice."));
        assert!(out.contains("Invalid process number 'x'."));
        assert!(out.contains("Input error: Expected vector length 1, got 2"));
        assert!(out.contains("P0 released [1]."));
        assert!(out.contains("System is SAFE.\nSafe sequence: P0 -> P1"));
    }

    #[test]
    fn show_state_prints_tables() {
        let (_, out) = session("1\n");
        assert!(out.contains("Available: 1"));
        assert!(out.contains("Need:\n   R0\nP0  1\nP1  2\n"));
    }
}
