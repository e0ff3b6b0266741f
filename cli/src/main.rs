use clap::Parser;
use exacta::{
    CachedEvaluator, Environment, ExactNumber, ExecutionOptions, HostValue, count_nodes,
    find_identifiers, parser, register_stdlib, render_error,
};
use miette::{Diagnostic, Result};
use std::io::BufRead;
use std::process::ExitCode;
use tracing::debug;

/// Exacta - exact-arithmetic expressions for host applications
#[derive(Parser, Debug)]
#[command(name = "exacta")]
#[command(about = "Evaluate exacta expressions", long_about = None)]
struct Args {
    /// Bind a variable, e.g. `--var price=19.99`. May be repeated.
    #[arg(long = "var", value_name = "NAME=VALUE", value_parser = parse_var)]
    vars: Vec<Binding>,

    /// Step budget for each evaluation
    #[arg(long, default_value_t = exacta::DEFAULT_STEPS)]
    steps: usize,

    /// Do not register the standard library functions
    #[arg(long)]
    no_stdlib: bool,

    /// Print the parsed AST (for debugging)
    #[arg(long)]
    debug_parse: bool,

    /// Expression to evaluate (if not provided, reads lines from stdin)
    expression: Option<String>,
}

/// A `--var` argument before it becomes a host value.
#[derive(Debug, Clone, PartialEq)]
struct Binding {
    name: String,
    value: String,
}

#[derive(Debug, thiserror::Error, Diagnostic)]
enum CliError {
    #[error("failed to read from stdin")]
    #[diagnostic(code(exacta::cli::stdin))]
    Stdin(#[source] std::io::Error),
}

fn parse_var(arg: &str) -> std::result::Result<Binding, String> {
    let (name, value) = arg
        .split_once('=')
        .ok_or_else(|| format!("expected NAME=VALUE, got `{arg}`"))?;
    let name = name.trim();
    let valid = name.chars().enumerate().all(|(i, c)| {
        c == '_' || c == '$' || c.is_ascii_alphabetic() || (i > 0 && c.is_ascii_digit())
    });
    if name.is_empty() || !valid {
        return Err(format!("`{name}` is not a valid identifier"));
    }
    Ok(Binding {
        name: name.to_string(),
        value: value.to_string(),
    })
}

/// `null`, `true` and `false` are literals, anything that reads as a number
/// is a number, everything else is a string.
fn host_value(text: &str) -> HostValue {
    match text {
        "null" => HostValue::Null,
        "true" => HostValue::Bool(true),
        "false" => HostValue::Bool(false),
        _ => match text.parse::<ExactNumber>() {
            Ok(number) => HostValue::Number(number),
            Err(_) => HostValue::from(text),
        },
    }
}

fn build_environment(args: &Args) -> Environment {
    let mut env = Environment::new();
    if !args.no_stdlib {
        register_stdlib(&mut env);
    }
    for binding in &args.vars {
        env.register(binding.name.as_str(), host_value(&binding.value));
    }
    env
}

/// Evaluate one input, printing the result or rendering the error.
/// Returns whether evaluation succeeded.
fn interpret_input(
    cached: &mut CachedEvaluator,
    env: &Environment,
    input: &str,
    debug_parse: bool,
) -> bool {
    if debug_parse {
        match parser::parse(input) {
            Ok(ast) => {
                println!("=== Parsed AST ===");
                println!("{ast:#?}");
                if let Some(expr) = &ast {
                    println!("nodes: {}", count_nodes(expr));
                }
                println!("identifiers: {:?}", find_identifiers(ast.as_ref()));
                println!();
            }
            Err(e) => debug!(error = %e, "Debug parse failed"),
        }
    }

    match cached.evaluate(input, env) {
        Ok(value) => {
            println!("{value}");
            true
        }
        Err(e) => {
            render_error(&e, input);
            false
        }
    }
}

fn main() -> Result<ExitCode> {
    let args = Args::parse();

    // Initialize logging subscriber
    use tracing_subscriber::{EnvFilter, fmt};

    // Use RUST_LOG environment variable to control log level
    // Default to WARN if not set
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let env = build_environment(&args);
    let mut cached = CachedEvaluator::with_options(ExecutionOptions {
        max_steps: args.steps,
    });

    // Check if we have a direct expression argument
    if let Some(expr) = &args.expression {
        let ok = interpret_input(&mut cached, &env, expr, args.debug_parse);
        return Ok(if ok { ExitCode::SUCCESS } else { ExitCode::FAILURE });
    }

    // Otherwise evaluate stdin line by line through the same cache
    let stdin = std::io::stdin();
    for line in stdin.lock().lines() {
        let line = line.map_err(CliError::Stdin)?;
        interpret_input(&mut cached, &env, &line, args.debug_parse);
    }

    let stats = cached.stats();
    debug!(
        parses = stats.parses,
        evaluations = stats.evaluations,
        hits = stats.hits,
        "Done"
    );
    Ok(ExitCode::SUCCESS)
}
