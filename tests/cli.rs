use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use std::path::PathBuf;

fn write_config(name: &str, contents: &str) -> PathBuf {
    let path = std::env::temp_dir().join(format!("formula-cli-{}-{}.toml", std::process::id(), name));
    std::fs::write(&path, contents).expect("write config fixture");
    path
}

#[test]
fn eval_prints_formatted_result() {
    let mut cmd = cargo_bin_cmd!("formula");
    cmd.arg("eval").arg("2+3*4");
    cmd.assert().success().stdout("14\n");
}

#[test]
fn eval_binds_variables() {
    let mut cmd = cargo_bin_cmd!("formula");
    cmd.args(["eval", "2*x + y", "-v", "x=3", "--var", "y=-1.5"]);
    cmd.assert().success().stdout("4.5\n");
}

#[test]
fn eval_leading_unary_minus() {
    let mut cmd = cargo_bin_cmd!("formula");
    cmd.args(["eval", "--", "-5+3"]);
    cmd.assert().success().stdout("-2\n");
}

#[test]
fn eval_large_values_use_exponent_notation() {
    let mut cmd = cargo_bin_cmd!("formula");
    cmd.args(["eval", "12345.678"]);
    cmd.assert().success().stdout("1.2346e+4\n");
}

#[test]
fn eval_reports_errors_on_stderr() {
    let mut cmd = cargo_bin_cmd!("formula");
    cmd.args(["eval", "1/0"]);
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Evaluation error: division by zero"));
}

#[test]
fn eval_unbound_variable_fails_without_defaults() {
    let mut cmd = cargo_bin_cmd!("formula");
    cmd.args(["eval", "x+1"]);
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("undefined variable: x"));
}

#[test]
fn eval_defaults_to_zero() {
    let mut cmd = cargo_bin_cmd!("formula");
    cmd.args(["eval", "x+1", "--defaults-to-zero"]);
    cmd.assert().success().stdout("1\n");
}

#[test]
fn eval_defaults_to_zero_validates_structure() {
    let mut cmd = cargo_bin_cmd!("formula");
    cmd.args(["eval", "x+", "--defaults-to-zero"]);
    cmd.assert().failure().stderr(predicate::str::contains(
        "Invalid formula format: Formula cannot end with an operator",
    ));
}

#[test]
fn eval_rejects_malformed_binding() {
    let mut cmd = cargo_bin_cmd!("formula");
    cmd.args(["eval", "x", "-v", "x"]);
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("expected name=value"));
}

#[test]
fn eval_rejects_reserved_variable_name() {
    let mut cmd = cargo_bin_cmd!("formula");
    cmd.args(["eval", "1", "-v", "sin=1"]);
    cmd.assert().failure().stderr(predicate::str::contains(
        "Variable name cannot be a reserved function name",
    ));
}

#[test]
fn eval_json_output() {
    let mut cmd = cargo_bin_cmd!("formula");
    cmd.args(["eval", "1/4", "--json"]);
    let output_pred = predicate::str::contains("\"result\":0.25")
        .and(predicate::str::contains("\"display\":\"0.25\""));
    cmd.assert().success().stdout(output_pred);
}

#[test]
fn validate_reports_both_passes() {
    let mut cmd = cargo_bin_cmd!("formula");
    cmd.args(["validate", "2**3"]);
    let output_pred = predicate::str::contains(
        "structure: Formula contains consecutive operators",
    )
    .and(predicate::str::contains("syntax: ok"));
    cmd.assert().code(1).stdout(output_pred);
}

#[test]
fn validate_accepts_good_formula() {
    let mut cmd = cargo_bin_cmd!("formula");
    cmd.args(["validate", "sqrt(x^2 + y^2)"]);
    cmd.assert()
        .success()
        .stdout("structure: ok\nsyntax: ok\n");
}

#[test]
fn validate_json_output() {
    let mut cmd = cargo_bin_cmd!("formula");
    cmd.args(["validate", "(1+2", "--json"]);
    let output_pred = predicate::str::contains("\"valid\":false")
        .and(predicate::str::contains("Unmatched opening parenthesis"))
        .and(predicate::str::contains("mismatched parentheses"));
    cmd.assert().code(1).stdout(output_pred);
}

#[test]
fn rpn_prints_postfix() {
    let mut cmd = cargo_bin_cmd!("formula");
    cmd.args(["rpn", "2^3^2"]);
    cmd.assert().success().stdout("2 3 2 ^ ^\n");
}

#[test]
fn tokens_prints_one_token_per_line() {
    let mut cmd = cargo_bin_cmd!("formula");
    cmd.args(["tokens", "sqrt(x)*2"]);
    cmd.assert().success().stdout("sqrt\n(\nx\n)\n*\n2\n");
}

#[test]
fn tokens_json_output() {
    let mut cmd = cargo_bin_cmd!("formula");
    cmd.args(["tokens", "sin(x)", "--json"]);
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("{\"kind\":\"Function\",\"value\":\"sin\"}"));
}

#[test]
fn tokens_reports_invalid_character() {
    let mut cmd = cargo_bin_cmd!("formula");
    cmd.args(["tokens", "2 $ 3"]);
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("invalid character '$' at position 2"));
}

#[test]
fn vars_lists_first_occurrence_order() {
    let mut cmd = cargo_bin_cmd!("formula");
    cmd.args(["vars", "b*a + b"]);
    cmd.assert().success().stdout("b\na\n");
}

#[test]
fn config_file_changes_display() {
    let path = write_config("display", "[display]\nfixed_digits = 2\n");
    let mut cmd = cargo_bin_cmd!("formula");
    cmd.args(["eval", "1/3", "--config"]).arg(&path);
    cmd.assert().success().stdout("0.33\n");
}

#[test]
fn config_file_changes_limits() {
    let path = write_config("limits", "[validation]\nmax_formula_length = 3\n");
    let mut cmd = cargo_bin_cmd!("formula");
    cmd.args(["validate", "1+2+3", "-c"]).arg(&path);
    cmd.assert().code(1).stdout(predicate::str::contains(
        "Formula exceeds maximum length of 3 characters",
    ));
}

#[test]
fn missing_config_file_fails() {
    let mut cmd = cargo_bin_cmd!("formula");
    cmd.args(["eval", "1", "--config", "/nonexistent/formula.toml"]);
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Error loading config"));
}
