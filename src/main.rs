use std::io::{self, BufRead};

use clap::Parser;
use gatesim::cmd::{Cli, Flow, Shell};

fn main() {
    let _ = env_logger::builder().try_init();
    let cli = Cli::parse();
    let mut shell = match Shell::from_cli(&cli) {
        Ok(shell) => shell,
        Err(e) => {
            eprintln!("error: {e}");
            std::process::exit(1);
        }
    };
    for line in io::stdin().lock().lines() {
        let line = match line {
            Ok(line) => line,
            Err(e) => {
                eprintln!("error: {e}");
                std::process::exit(1);
            }
        };
        match shell.run_line(&line) {
            Ok(Flow::Continue(out)) => print!("{out}"),
            Ok(Flow::Quit) => break,
            Err(e) => eprintln!("{e}"),
        }
    }
}
