//! Interactive formula session
//!
//!     A session is what a calculator front end keeps between keystrokes: the current
//!     formula, a value for every variable it references, and the outcome of the last
//!     calculation. It layers one policy over the pure engine: variables default to zero
//!     when they first appear. The core [evaluate_formula] never does this; it reports
//!     unbound variables as errors.

use crate::formula::config::FormulaConfig;
use crate::formula::error::{BindingError, StructuralError};
use crate::formula::pipeline::evaluate_formula;
use crate::formula::validation::bindings::validate_variable_value;
use crate::formula::validation::Validator;
use crate::formula::variables::extract_variables;
use std::collections::HashMap;
use thiserror::Error;

/// Reasons a session update is refused.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SessionError {
    #[error("Invalid formula format: {0}")]
    InvalidFormula(#[from] StructuralError),

    #[error(transparent)]
    Binding(#[from] BindingError),
}

#[derive(Debug, Clone, Default)]
pub struct Session {
    config: FormulaConfig,
    formula: String,
    /// Variable names in first-occurrence order
    names: Vec<String>,
    values: HashMap<String, f64>,
    result: Option<f64>,
    error: Option<String>,
}

impl Session {
    pub fn new(config: FormulaConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    pub fn formula(&self) -> &str {
        &self.formula
    }

    pub fn result(&self) -> Option<f64> {
        self.result
    }

    /// Message from the last failed update or calculation
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Bindings in the order the variables first appear in the formula.
    pub fn variables(&self) -> Vec<(&str, f64)> {
        self.names
            .iter()
            .map(|name| (name.as_str(), self.values.get(name).copied().unwrap_or(0.0)))
            .collect()
    }

    /// Replace the formula if it passes structural validation.
    ///
    /// Variables still referenced keep their values, new ones start at zero and the rest
    /// are dropped. On failure the previous formula and bindings are kept and the message
    /// is recorded.
    pub fn update_formula(&mut self, formula: &str) -> Result<(), SessionError> {
        let outcome = self.try_update_formula(formula);
        self.record(&outcome);
        outcome
    }

    fn try_update_formula(&mut self, formula: &str) -> Result<(), SessionError> {
        Validator::new(self.config.validation).validate(formula)?;

        let names = extract_variables(formula);
        let max = self.config.variables.max_count;
        if names.len() > max {
            return Err(BindingError::TooMany { max }.into());
        }

        let values = names
            .iter()
            .map(|name| {
                let value = self.values.get(name).copied().unwrap_or(0.0);
                (name.clone(), value)
            })
            .collect();

        tracing::debug!(formula, variables = ?names, "session formula updated");
        self.formula = formula.to_string();
        self.names = names;
        self.values = values;
        Ok(())
    }

    /// Bind a value to a variable referenced by the current formula.
    pub fn set_variable(&mut self, name: &str, value: f64) -> Result<(), SessionError> {
        let outcome = self.try_set_variable(name, value);
        self.record(&outcome);
        outcome
    }

    fn try_set_variable(&mut self, name: &str, value: f64) -> Result<(), SessionError> {
        if !self.values.contains_key(name) {
            return Err(BindingError::UnknownVariable(name.to_string()).into());
        }
        validate_variable_value(value, &self.config.variables).map_err(|source| {
            BindingError::InvalidValue {
                name: name.to_string(),
                source: Box::new(source),
            }
        })?;
        self.values.insert(name.to_string(), value);
        Ok(())
    }

    /// Evaluate the current formula with the current bindings.
    ///
    /// An empty formula clears the result without reporting an error.
    pub fn calculate(&mut self) -> Option<f64> {
        if self.formula.is_empty() {
            self.result = None;
            return None;
        }

        match evaluate_formula(&self.formula, &self.values) {
            Ok(value) => {
                self.result = Some(value);
                self.error = None;
            }
            Err(err) => {
                self.result = None;
                self.error = Some(err.to_string());
            }
        }
        self.result
    }

    fn record(&mut self, outcome: &Result<(), SessionError>) {
        self.error = outcome.as_ref().err().map(ToString::to_string);
    }
}
