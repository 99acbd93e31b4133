// skink - A small Lisp interpreter written in Rust
// Copyright (c) 2025 Tom Waddington. MIT licensed.

use std::process;

use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;
use skink_core::{Env, eval_line, register_builtins};

fn main() {
    // Root environment with the arithmetic primitives; it is the only state
    // surviving across REPL steps
    let env = Env::new();
    register_builtins(&env);

    if let Err(e) = run_repl(&env) {
        eprintln!("{}", e);
        process::exit(1);
    }
}

/// Run the interactive REPL until end of input.
fn run_repl(env: &Env) -> rustyline::Result<()> {
    println!("Skink v0.1.0");

    let mut rl = DefaultEditor::new()?;

    loop {
        match rl.readline("user> ") {
            Ok(line) => {
                if line.trim().is_empty() {
                    continue;
                }
                let _ = rl.add_history_entry(line.as_str());

                match eval_line(&line, env) {
                    Ok(Some(output)) => println!("{}", output),
                    Ok(None) => {}
                    Err(e) => eprintln!("Error: {}", e),
                }
            }
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => {
                break;
            }
            Err(e) => return Err(e),
        }
    }

    Ok(())
}
