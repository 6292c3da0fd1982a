//! Command-line interface for formula-engine
//! This binary evaluates, validates and inspects formulas from the shell.
//!
//! Usage:
//!   formula eval `<formula>` [-v name=value]... [--defaults-to-zero] [--json]
//!   formula validate `<formula>` [--json]
//!   formula tokens `<formula>` [--json]
//!   formula rpn `<formula>`
//!   formula vars `<formula>`
//!
//! Global flags: --config `<path>` layers a TOML file over the built-in defaults,
//! --verbose turns on debug logging (RUST_LOG takes precedence when set).

use clap::{Arg, ArgAction, ArgMatches, Command};
use formula_engine::formula::config::{FormulaConfig, Loader};
use formula_engine::formula::formatting::{format_number_with, render_tokens};
use formula_engine::formula::session::Session;
use formula_engine::formula::validation::bindings::{
    parse_variable_value, validate_variable_name, validate_variables,
};
use formula_engine::formula::validation::{check_syntax, ValidationReport, Validator};
use formula_engine::{evaluate_formula, extract_variables, to_postfix, tokenize};
use std::collections::HashMap;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

fn formula_arg() -> Arg {
    Arg::new("formula")
        .help("The formula, e.g. '2*x + sqrt(y)'")
        .required(true)
        .index(1)
}

fn json_arg() -> Arg {
    Arg::new("json")
        .long("json")
        .help("Print machine-readable JSON")
        .action(ArgAction::SetTrue)
}

fn main() {
    let matches = Command::new("formula")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Evaluate and inspect scalar formulas")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("config")
                .long("config")
                .short('c')
                .help("TOML file layered over the built-in defaults")
                .global(true),
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .help("Log pipeline stages to stderr")
                .action(ArgAction::SetTrue)
                .global(true),
        )
        .subcommand(
            Command::new("eval")
                .about("Evaluate a formula")
                .arg(formula_arg())
                .arg(
                    Arg::new("var")
                        .long("var")
                        .short('v')
                        .help("Variable binding as name=value (repeatable)")
                        .action(ArgAction::Append),
                )
                .arg(
                    Arg::new("defaults-to-zero")
                        .long("defaults-to-zero")
                        .help("Bind every unset variable to 0 (validates the formula first)")
                        .action(ArgAction::SetTrue),
                )
                .arg(json_arg()),
        )
        .subcommand(
            Command::new("validate")
                .about("Run the structural and grammar validators")
                .arg(formula_arg())
                .arg(json_arg()),
        )
        .subcommand(
            Command::new("tokens")
                .about("Print the token sequence")
                .arg(formula_arg())
                .arg(json_arg()),
        )
        .subcommand(
            Command::new("rpn")
                .about("Print the postfix (RPN) form")
                .arg(formula_arg()),
        )
        .subcommand(
            Command::new("vars")
                .about("List the variables a formula references")
                .arg(formula_arg()),
        )
        .get_matches();

    let Some((name, sub_matches)) = matches.subcommand() else {
        unreachable!("subcommand_required is set")
    };

    init_tracing(sub_matches.get_flag("verbose"));
    let config = load_config(sub_matches.get_one::<String>("config"));
    let formula = sub_matches
        .get_one::<String>("formula")
        .map(String::as_str)
        .unwrap_or_default();

    match name {
        "eval" => handle_eval_command(formula, sub_matches, &config),
        "validate" => handle_validate_command(formula, sub_matches.get_flag("json"), &config),
        "tokens" => handle_tokens_command(formula, sub_matches.get_flag("json")),
        "rpn" => handle_rpn_command(formula),
        "vars" => handle_vars_command(formula),
        _ => unreachable!(),
    }
}

fn init_tracing(verbose: bool) {
    let default_directive = if verbose { "formula_engine=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
}

fn load_config(path: Option<&String>) -> FormulaConfig {
    let loader = match path {
        Some(path) => Loader::new().with_file(path),
        None => Loader::new(),
    };
    loader.build().unwrap_or_else(|e| fail(format!("Error loading config: {}", e)))
}

fn fail(message: impl std::fmt::Display) -> ! {
    eprintln!("{}", message);
    std::process::exit(1);
}

/// Handle the eval command
fn handle_eval_command(formula: &str, matches: &ArgMatches, config: &FormulaConfig) {
    let bindings = parse_bindings(matches, config);

    let value = if matches.get_flag("defaults-to-zero") {
        evaluate_in_session(formula, &bindings, config)
    } else {
        evaluate_formula(formula, &bindings).unwrap_or_else(|e| fail(e))
    };

    let display = format_number_with(value, &config.display);
    if matches.get_flag("json") {
        let output = serde_json::json!({
            "formula": formula,
            "result": value,
            "display": display,
        });
        println!("{}", output);
    } else {
        println!("{}", display);
    }
}

fn parse_bindings(matches: &ArgMatches, config: &FormulaConfig) -> HashMap<String, f64> {
    let mut bindings = HashMap::new();
    for raw in matches.get_many::<String>("var").into_iter().flatten() {
        let (name, value) = raw
            .split_once('=')
            .unwrap_or_else(|| fail(format!("Invalid binding '{}': expected name=value", raw)));
        let name = name.trim();
        validate_variable_name(name, &config.variables)
            .unwrap_or_else(|e| fail(format!("Invalid variable name \"{}\": {}", name, e)));
        let value = parse_variable_value(value, &config.variables)
            .unwrap_or_else(|e| fail(format!("Invalid value for variable \"{}\": {}", name, e)));
        bindings.insert(name.to_string(), value);
    }
    validate_variables(&bindings, &config.variables).unwrap_or_else(|e| fail(e));
    bindings
}

fn evaluate_in_session(
    formula: &str,
    bindings: &HashMap<String, f64>,
    config: &FormulaConfig,
) -> f64 {
    let mut session = Session::new(config.clone());
    session.update_formula(formula).unwrap_or_else(|e| fail(e));
    for (name, value) in bindings {
        session.set_variable(name, *value).unwrap_or_else(|e| fail(e));
    }
    match session.calculate() {
        Some(value) => value,
        None => fail(session.error().unwrap_or("Evaluation error")),
    }
}

/// Handle the validate command
fn handle_validate_command(formula: &str, json: bool, config: &FormulaConfig) {
    let report = ValidationReport::from(Validator::new(config.validation).validate(formula));
    let syntax = check_syntax(formula);

    if json {
        let output = serde_json::json!({
            "structural": report,
            "syntax": {
                "valid": syntax.is_ok(),
                "reason": syntax.as_ref().err().map(|e| e.reason()),
            },
        });
        println!("{}", output);
    } else {
        match &report.reason {
            None => println!("structure: ok"),
            Some(reason) => println!("structure: {}", reason),
        }
        match &syntax {
            Ok(()) => println!("syntax: ok"),
            Err(e) => println!("syntax: {}", e.reason()),
        }
    }

    if !report.valid || syntax.is_err() {
        std::process::exit(1);
    }
}

/// Handle the tokens command
fn handle_tokens_command(formula: &str, json: bool) {
    let tokens = tokenize(formula).unwrap_or_else(|e| fail(e));
    if json {
        let output = serde_json::to_string(&tokens).unwrap_or_else(|e| fail(e));
        println!("{}", output);
    } else {
        for token in &tokens {
            println!("{}", token);
        }
    }
}

/// Handle the rpn command
fn handle_rpn_command(formula: &str) {
    let tokens = tokenize(formula).unwrap_or_else(|e| fail(e));
    let rpn = to_postfix(&tokens).unwrap_or_else(|e| fail(e));
    println!("{}", render_tokens(&rpn));
}

/// Handle the vars command
fn handle_vars_command(formula: &str) {
    for name in extract_variables(formula) {
        println!("{}", name);
    }
}
