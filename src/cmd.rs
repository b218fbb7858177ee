//! Command line interface
//!
//! The binary reads editing commands from the standard input, one per line, and applies them to a
//! [`Session`]. Each line is parsed with clap, so `help` lists the available commands.

use clap::{Parser, Subcommand};

use crate::network::generators::TEMPLATES;
use crate::network::stats::stats;
use crate::session::Session;
use crate::{GateId, GateKind, WireId};

/// Command line arguments
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Do not print the truth table after each command
    #[arg(short, long)]
    pub quiet: bool,

    /// Start from a template circuit (half_adder, full_adder, xor_from_nand, sr_latch, adder4)
    #[arg(short, long)]
    pub template: Option<String>,
}

/// A single line of input
#[derive(Parser)]
#[command(no_binary_name = true, disable_version_flag = true)]
struct Line {
    #[command(subcommand)]
    command: Command,
}

/// Editing commands
#[derive(Subcommand, Debug, PartialEq)]
pub enum Command {
    /// Add a gate (IN, OUT, AND, OR, XOR, NOT, NAND, NOR, XNOR)
    #[clap(alias = "a")]
    Add {
        /// Kind of the gate
        kind: GateKind,
    },

    /// Connect the output of a gate to the first free input of another
    #[clap(alias = "c")]
    Connect {
        /// Gate driving the wire
        source: GateId,
        /// Gate receiving the value
        destination: GateId,
    },

    /// Start a wire from the output of a gate
    Wire {
        /// Gate driving the wire
        source: GateId,
    },

    /// Finish the wire started with `wire`
    To {
        /// Gate receiving the value
        destination: GateId,
    },

    /// Flip the value of an input
    #[clap(alias = "t")]
    Toggle {
        /// Input to toggle
        gate: GateId,
    },

    /// Delete a gate and its wires
    #[clap(alias = "rm")]
    Delete {
        /// Gate to delete
        gate: GateId,
    },

    /// Remove a single wire
    Disconnect {
        /// Wire to remove
        wire: WireId,
    },

    /// Remove the last wire, or the last gate if there is no wire
    #[clap(alias = "u")]
    Undo,

    /// Remove everything
    Clear,

    /// Show the gates and wires
    #[clap(alias = "ls")]
    Show,

    /// Show the truth table
    Table,

    /// Show statistics about the network
    Stats,

    /// Replace the network by a template circuit
    Template {
        /// Name of the template
        name: String,
    },

    /// Exit
    #[clap(alias = "exit")]
    Quit,
}

/// What to do after a line
#[derive(Debug, PartialEq, Eq)]
pub enum Flow {
    /// Print the text and read the next line
    Continue(String),
    /// Stop reading
    Quit,
}

/// Parse a line into a command; blank lines and comments give None
pub fn parse_line(line: &str) -> Result<Option<Command>, String> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(None);
    }
    Line::try_parse_from(line.split_whitespace())
        .map(|l| Some(l.command))
        .map_err(|e| e.to_string())
}

/// Interactive shell around a session
pub struct Shell {
    session: Session,
    quiet: bool,
}

impl Shell {
    /// Create a shell on an empty network
    pub fn new(quiet: bool) -> Shell {
        Shell {
            session: Session::new(),
            quiet,
        }
    }

    /// Create a shell from the command line arguments
    pub fn from_cli(cli: &Cli) -> Result<Shell, String> {
        let mut ret = Shell::new(cli.quiet);
        if let Some(name) = &cli.template {
            if !ret.session.load_template(name) {
                return Err(format!(
                    "Unknown template {name:?}, expected one of {}",
                    TEMPLATES.join(", ")
                ));
            }
        }
        Ok(ret)
    }

    /// The session being edited
    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Parse and run a line
    pub fn run_line(&mut self, line: &str) -> Result<Flow, String> {
        match parse_line(line)? {
            Some(cmd) => Ok(self.run(cmd)),
            None => Ok(Flow::Continue(String::new())),
        }
    }

    /// Run a command; return the text to show
    pub fn run(&mut self, cmd: Command) -> Flow {
        use Command::*;
        let s = &mut self.session;
        let mut out = match cmd {
            Add { kind } => {
                let id = s.add_gate(kind);
                let label = s.gate_state(id).map(|g| g.label).unwrap_or_default();
                format!("{id}: {label}\n")
            }
            Connect {
                source,
                destination,
            } => {
                s.connect(source, destination);
                String::new()
            }
            Wire { source } => {
                s.start_wire(source);
                String::new()
            }
            To { destination } => {
                s.finish_wire(destination);
                String::new()
            }
            Toggle { gate } => {
                s.toggle_input(gate);
                String::new()
            }
            Delete { gate } => {
                s.delete_gate(gate);
                String::new()
            }
            Disconnect { wire } => {
                s.disconnect(wire);
                String::new()
            }
            Undo => {
                s.undo();
                String::new()
            }
            Clear => {
                s.clear();
                String::new()
            }
            Template { name } => {
                if !s.load_template(&name) {
                    return Flow::Continue(format!(
                        "Unknown template {name:?}, expected one of {}\n",
                        TEMPLATES.join(", ")
                    ));
                }
                String::new()
            }
            Show => return Flow::Continue(s.network().to_string()),
            Table => return Flow::Continue(self.table()),
            Stats => return Flow::Continue(stats(s.network()).to_string()),
            Quit => return Flow::Quit,
        };
        out.push_str(&format!("{}\n", self.session.status()));
        if !self.quiet {
            out.push_str(&self.table());
        }
        Flow::Continue(out)
    }

    fn table(&self) -> String {
        match self.session.truth_table() {
            Some(t) => t.to_string(),
            None => "Truth table unavailable\n".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(shell: &mut Shell, line: &str) -> String {
        match shell.run_line(line) {
            Ok(Flow::Continue(s)) => s,
            other => panic!("Unexpected result {other:?} for {line:?}"),
        }
    }

    #[test]
    fn test_parse() {
        assert_eq!(parse_line(""), Ok(None));
        assert_eq!(parse_line("   # comment"), Ok(None));
        assert_eq!(
            parse_line("add nand"),
            Ok(Some(Command::Add {
                kind: GateKind::Nand
            }))
        );
        assert_eq!(
            parse_line("connect g0 3"),
            Ok(Some(Command::Connect {
                source: GateId::from_raw(0),
                destination: GateId::from_raw(3)
            }))
        );
        assert_eq!(
            parse_line("disconnect w2"),
            Ok(Some(Command::Disconnect {
                wire: WireId::from_raw(2)
            }))
        );
        assert_eq!(parse_line("u"), Ok(Some(Command::Undo)));
        assert_eq!(parse_line("exit"), Ok(Some(Command::Quit)));
        assert!(parse_line("add mux").is_err());
        assert!(parse_line("connect g0").is_err());
        assert!(parse_line("frobnicate").is_err());
    }

    #[test]
    fn test_session() {
        let mut shell = Shell::new(true);
        assert_eq!(run(&mut shell, "add in"), "g0: IN1\nAdded gate IN\n");
        assert_eq!(run(&mut shell, "add not"), "g1: NOT\nAdded gate NOT\n");
        assert_eq!(run(&mut shell, "add out"), "g2: OUT1\nAdded gate OUT\n");
        assert_eq!(run(&mut shell, "connect g0 g1"), "Wire created\n");
        assert_eq!(run(&mut shell, "wire g1"), "Select the destination of the wire\n");
        assert_eq!(run(&mut shell, "to g2"), "Wire created\n");
        assert_eq!(run(&mut shell, "connect g0 g2"), "No free input on the destination\n");
        assert_eq!(run(&mut shell, "toggle g1"), "Only inputs can be toggled\n");
        assert_eq!(
            run(&mut shell, "table"),
            "IN1 | OUT1\n----+-----\n 0  |  1  \n 1  |  0  \n"
        );
        assert!(run(&mut shell, "show").contains("g2: OUT1(g1) = 1"));
        assert!(run(&mut shell, "stats").contains("  Wires: 2\n"));
        assert_eq!(run(&mut shell, "undo"), "Last action undone\n");
        assert_eq!(
            run(&mut shell, "table"),
            "IN1 | OUT1\n----+-----\n 0  |  0  \n 1  |  0  \n"
        );
        run(&mut shell, "delete g2");
        assert_eq!(run(&mut shell, "table"), "Truth table unavailable\n");
        assert_eq!(shell.run_line("quit"), Ok(Flow::Quit));
    }

    #[test]
    fn test_table_after_command() {
        let mut shell = Shell::new(false);
        run(&mut shell, "template half_adder");
        let out = run(&mut shell, "toggle g0");
        assert!(out.starts_with("Input toggled\nIN1 | IN2 | OUT1 | OUT2\n"));
        assert_eq!(shell.session().network().value(GateId::from_raw(0)), Some(true));
        assert!(run(&mut shell, "template nope").starts_with("Unknown template"));
    }

    #[test]
    fn test_from_cli() {
        let cli = Cli::parse_from(["gatesim", "--quiet", "--template", "sr_latch"]);
        let shell = Shell::from_cli(&cli).unwrap();
        assert_eq!(shell.session().network().inputs().len(), 2);
        let cli = Cli::parse_from(["gatesim", "-t", "bogus"]);
        assert!(Shell::from_cli(&cli).is_err());
    }
}
