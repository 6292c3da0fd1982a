//! Validation of caller-supplied variable bindings (names and values).

use crate::formula::config::VariableLimits;
use crate::formula::error::BindingError;
use crate::formula::token::Function;
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashMap;

static VARIABLE_NAME: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[a-zA-Z][a-zA-Z0-9_]*$").unwrap());

pub fn validate_variable_name(name: &str, limits: &VariableLimits) -> Result<(), BindingError> {
    if name.is_empty() {
        return Err(BindingError::EmptyName);
    }
    if name.chars().count() > limits.max_name_length {
        return Err(BindingError::NameTooLong {
            max: limits.max_name_length,
        });
    }
    if !VARIABLE_NAME.is_match(name) {
        return Err(BindingError::MalformedName);
    }
    if Function::is_function_name(name) {
        return Err(BindingError::ReservedName);
    }
    Ok(())
}

pub fn validate_variable_value(value: f64, limits: &VariableLimits) -> Result<(), BindingError> {
    if !value.is_finite() {
        return Err(BindingError::NotANumber);
    }
    if value < limits.min_value || value > limits.max_value {
        return Err(BindingError::OutOfRange {
            min: limits.min_value,
            max: limits.max_value,
        });
    }
    Ok(())
}

/// Parse a textual value the way a form field would be read, then range-check it.
pub fn parse_variable_value(raw: &str, limits: &VariableLimits) -> Result<f64, BindingError> {
    let value = raw
        .trim()
        .parse::<f64>()
        .map_err(|_| BindingError::NotANumber)?;
    validate_variable_value(value, limits)?;
    Ok(value)
}

/// Check the count, then every entry in sorted name order.
pub fn validate_variables(
    variables: &HashMap<String, f64>,
    limits: &VariableLimits,
) -> Result<(), BindingError> {
    if variables.len() > limits.max_count {
        return Err(BindingError::TooMany {
            max: limits.max_count,
        });
    }

    let mut names: Vec<&String> = variables.keys().collect();
    names.sort();

    for name in names {
        validate_variable_name(name, limits).map_err(|source| BindingError::InvalidName {
            name: name.clone(),
            source: Box::new(source),
        })?;
        validate_variable_value(variables[name], limits).map_err(|source| {
            BindingError::InvalidValue {
                name: name.clone(),
                source: Box::new(source),
            }
        })?;
    }
    Ok(())
}
