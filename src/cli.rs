use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand};
use serde_json::Value as JsonValue;

use crate::data::DataContext;
use crate::env::Env;
use crate::eval::{eval2, EvalInput};
use crate::parser::parse_expr;
use crate::value::Value;

#[derive(Parser)]
#[command(name = "quosure")]
#[command(about = "Evaluate quoted expressions against data contexts", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Parse and evaluate an expression
    Eval {
        /// Expression source, e.g. "mpg > 31"
        expr: String,

        /// Path to a JSON object file whose fields become the data context
        #[arg(short = 'd', long = "data")]
        data: Option<String>,

        /// Environment binding as name=JSON (repeatable)
        #[arg(short = 'e', long = "define")]
        define: Vec<String>,
    },

    /// Parse an expression and print its AST as JSON
    Parse {
        /// Expression source
        expr: String,
    },
}

/// Run the CLI by parsing process arguments
pub fn run_cli() -> Result<()> {
    let cli = Cli::parse();
    run_cli_with_args(cli)
}

fn run_cli_with_args(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Eval { expr, data, define } => {
            let parsed = parse_expr(&expr)?;

            let data = match data {
                Some(path) => {
                    let text = std::fs::read_to_string(&path)
                        .with_context(|| format!("failed to read data file {}", path))?;
                    let json: JsonValue = serde_json::from_str(&text)
                        .with_context(|| format!("data file {} is not valid JSON", path))?;
                    Some(DataContext::from_json(&json).map_err(|e| anyhow!(e))?)
                }
                None => None,
            };

            let env = Env::root();
            for binding in define {
                let (name, json_text) = binding
                    .split_once('=')
                    .ok_or_else(|| anyhow!("binding '{}' is not of the form name=JSON", binding))?;
                let json: JsonValue = serde_json::from_str(json_text)
                    .with_context(|| format!("binding '{}' has invalid JSON", name))?;
                env.bind(name, Value::from_json(&json).map_err(|e| anyhow!(e))?);
            }

            let result = eval2(EvalInput::Expression(parsed), data.as_ref(), Some(&env))?;
            println!("{}", result.to_json());
        }

        Commands::Parse { expr } => {
            let parsed = parse_expr(&expr)?;
            println!("{}", serde_json::to_string_pretty(&parsed)?);
        }
    }

    Ok(())
}
