//! Interactive command shell
//!
//! Line-oriented surface over a [`Session`]: `axiom`, `theorem`,
//! `describe`, `show`, `verbose`, `help`, `exit`. Every command either
//! succeeds or prints an error and returns to the prompt; the process only
//! exits on `exit` or end of input.

use crate::saturation::ProverConfig;
use crate::session::{Entry, Kind, ProveOutcome, Session};
use anyhow::Result;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;

const PROMPT: &str = ">>> ";
const DESCRIPTION_PROMPT: &str = "Enter description (Optional): ";

pub struct Shell {
    session: Session,
    config: ProverConfig,
    verbose: bool,
    editor: DefaultEditor,
}

impl Shell {
    pub fn new() -> Result<Self> {
        Ok(Shell {
            session: Session::with_default_selector(),
            config: ProverConfig::default(),
            verbose: false,
            editor: DefaultEditor::new()?,
        })
    }

    /// Run the read-eval loop until `exit` or end of input.
    pub fn run(&mut self) -> Result<()> {
        loop {
            match self.editor.readline(PROMPT) {
                Ok(line) => {
                    let line = line.trim().to_string();
                    if line.is_empty() {
                        continue;
                    }
                    let _ = self.editor.add_history_entry(&line);
                    if !self.dispatch(&line) {
                        return Ok(());
                    }
                }
                Err(ReadlineError::Interrupted) => continue,
                Err(ReadlineError::Eof) => return Ok(()),
                Err(err) => return Err(err.into()),
            }
        }
    }

    /// Execute one command line. Returns false when the shell should exit.
    fn dispatch(&mut self, line: &str) -> bool {
        let (command, rest) = match line.split_once(char::is_whitespace) {
            Some((head, tail)) => (head, tail.trim()),
            None => (line, ""),
        };

        match command {
            "axiom" => self.cmd_axiom(rest),
            "theorem" => self.cmd_theorem(rest),
            "describe" => self.cmd_describe(rest),
            "show" => self.cmd_show(rest),
            "verbose" => {
                self.verbose = !self.verbose;
                println!(
                    "Premise-selection diagnostics {}",
                    if self.verbose { "on" } else { "off" }
                );
            }
            "help" => print_help(),
            "exit" => return false,
            other => {
                println!("Unknown command '{other}'. Type 'help' for the command list.");
            }
        }
        true
    }

    fn cmd_axiom(&mut self, formula: &str) {
        if formula.is_empty() {
            println!("Usage: axiom <formula>");
            return;
        }
        match self.session.add_axiom(formula, None) {
            Ok(index) => {
                if let Some(description) = self.prompt_description() {
                    // The axiom was just added, so the index is valid
                    let _ = self.session.describe(Kind::Axiom, index, description);
                }
                println!("Added axiom {index}");
            }
            Err(err) => println!("Error: {err}"),
        }
    }

    fn cmd_theorem(&mut self, formula: &str) {
        if formula.is_empty() {
            println!("Usage: theorem <formula>");
            return;
        }
        let description = self.prompt_description();
        match self.session.prove(formula, description, &self.config) {
            Ok(report) => {
                if self.verbose {
                    if report.selected_lemmas.is_empty() {
                        println!("No lemmas selected");
                    } else {
                        println!("Selected lemmas: {:?}", report.selected_lemmas);
                    }
                }
                match report.outcome {
                    ProveOutcome::Proved { index, proof } => {
                        println!("{proof}");
                        println!("Added theorem {index}");
                    }
                    ProveOutcome::Saturated => {
                        println!("Proof failed (the goal does not follow from the premises)");
                    }
                    ProveOutcome::BudgetExhausted(reason) => {
                        println!("Proof failed ({reason})");
                    }
                }
            }
            Err(err) => println!("Error: {err}"),
        }
    }

    fn cmd_describe(&mut self, rest: &str) {
        let mut parts = rest.splitn(3, char::is_whitespace);
        let (kind, index, description) = match (parts.next(), parts.next(), parts.next()) {
            (Some(kind), Some(index), Some(description)) if !description.trim().is_empty() => {
                (kind, index, description.trim().to_string())
            }
            _ => {
                println!("Usage: describe <axiom|theorem> <index> <description>");
                return;
            }
        };

        let kind = match kind.parse::<Kind>() {
            Ok(kind) => kind,
            Err(err) => {
                println!("Error: {err}");
                return;
            }
        };
        let Some(index) = parse_index(index) else {
            return;
        };
        match self.session.describe(kind, index, description) {
            Ok(()) => println!("Description updated"),
            Err(err) => println!("Error: {err}"),
        }
    }

    fn cmd_show(&mut self, rest: &str) {
        let mut parts = rest.split_whitespace();
        let Some(kind) = parts.next() else {
            println!("Usage: show <axiom|theorem> [index]");
            return;
        };

        let kind = match kind.parse::<Kind>() {
            Ok(kind) => kind,
            Err(err) => {
                println!("Error: {err}");
                return;
            }
        };

        match parts.next() {
            Some(index) => {
                let Some(index) = parse_index(index) else {
                    return;
                };
                match self.session.entry(kind, index) {
                    Ok(entry) => print_entry_detailed(kind, index, entry),
                    Err(err) => println!("Error: {err}"),
                }
            }
            None => {
                let entries = self.session.entries(kind);
                if entries.is_empty() {
                    println!("No {kind}s yet");
                }
                for (index, entry) in entries.iter().enumerate() {
                    print_entry_line(index, entry);
                }
            }
        }
    }

    /// Ask for an optional one-line description; empty input means none.
    fn prompt_description(&mut self) -> Option<String> {
        match self.editor.readline(DESCRIPTION_PROMPT) {
            Ok(line) => {
                let line = line.trim().to_string();
                (!line.is_empty()).then_some(line)
            }
            Err(_) => None,
        }
    }
}

fn parse_index(index: &str) -> Option<usize> {
    match index.parse::<usize>() {
        Ok(index) => Some(index),
        Err(_) => {
            println!("Error: index '{index}' is not a number");
            None
        }
    }
}

fn print_entry_line(index: usize, entry: &Entry) {
    match &entry.description {
        Some(description) => println!("{index}. {} -- {description}", entry.text),
        None => println!("{index}. {}", entry.text),
    }
}

fn print_entry_detailed(kind: Kind, index: usize, entry: &Entry) {
    println!("{kind} {index}: {}", entry.text);
    match &entry.description {
        Some(description) => println!("description: {description}"),
        None => println!("description: (none)"),
    }
    println!("clauses:");
    for clause in &entry.clauses {
        println!("  {clause}");
    }
}

fn print_help() {
    println!("Commands:");
    println!("  axiom <formula>                      add an axiom");
    println!("  theorem <formula>                    try to prove a theorem");
    println!("  describe <axiom|theorem> <i> <text>  attach a description");
    println!("  show <axiom|theorem> [i]             list entries or show one");
    println!("  verbose                              toggle premise-selection diagnostics");
    println!("  exit                                 quit");
}
