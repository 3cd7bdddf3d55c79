mod repl;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use exprscope::{evaluate_str, new_engine, parse, scan, Builtins, Environment, Scope};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// define a variable, the value is read as an expression
    #[arg(long = "var", value_name = "NAME=VALUE", value_parser = parse_var, global = true)]
    vars: Vec<(String, String)>,

    /// leave max, min, abs, len, upper and lower undefined
    #[arg(long, global = true)]
    no_builtins: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// evaluate an expression and print the result
    Eval {
        #[arg(name = "EXPR")]
        expr: String,
    },
    /// print the canonical form of an expression
    Print {
        #[arg(name = "EXPR")]
        expr: String,
    },
    /// print the tokens of an expression, one per line
    Tokens {
        #[arg(name = "EXPR")]
        expr: String,
    },
}

fn parse_var(arg: &str) -> Result<(String, String), String> {
    match arg.split_once('=') {
        Some((name, value)) if !name.trim().is_empty() => {
            Ok((name.trim().to_string(), value.to_string()))
        }
        _ => Err(format!("expected NAME=VALUE, got `{arg}`")),
    }
}

/// Logs go to stderr, filtered by `RUST_LOG` (warn when unset).
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .compact()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .without_time()
        .init();
}

fn build_scope(vars: &[(String, String)], builtins: bool) -> Result<Scope> {
    let scope = Environment::new();
    if builtins {
        Builtins::register(&mut scope.borrow_mut())?;
    }
    for (name, source) in vars {
        let value = evaluate_str(source, &scope)
            .with_context(|| format!("invalid value for variable {name}"))?;
        scope.borrow_mut().define(name, value)?;
    }
    Ok(scope)
}

fn main() -> Result<()> {
    init_tracing();

    let cli = Cli::parse();
    match cli.command {
        Some(Commands::Eval { expr }) => {
            let scope = build_scope(&cli.vars, !cli.no_builtins)?;
            println!("{}", evaluate_str(&expr, &scope)?);
        }
        Some(Commands::Print { expr }) => {
            println!("{}", parse(&expr)?);
        }
        Some(Commands::Tokens { expr }) => {
            for token in scan(&expr)? {
                println!("{:>4}  {:<12} {}", token.position, token.kind.to_string(), token);
            }
        }
        None => {
            let scope = build_scope(&cli.vars, !cli.no_builtins)?;
            repl::start(new_engine(scope))?;
        }
    }
    Ok(())
}
