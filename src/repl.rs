use std::io::{self, Write};

use anyhow::Result;
use exprscope::Engine;

/// Reads expressions from stdin until end of input, printing each result.
pub fn start(mut engine: Box<dyn Engine>) -> Result<()> {
    let stdin = io::stdin();

    loop {
        print!(">> ");
        io::stdout().flush()?;

        let mut input = String::new();
        if stdin.read_line(&mut input)? == 0 {
            println!();
            return Ok(());
        }

        let input = input.trim();
        if input.is_empty() {
            continue;
        }

        match engine.run(input) {
            Ok(result) => println!("{}", result),
            Err(err) => println!("error: {}", err),
        }
    }
}
