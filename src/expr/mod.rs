//! Expression solving over datasets and single-variable polynomials.
//!
//! `[n]` refers to entry `n` of the caller's [`DatasetRegistry`]. Numeric
//! solves combine scalars and signals elementwise; symbolic solves treat the
//! configured variable (default `s`) as a polynomial variable and return a
//! canonical polynomial string such as `s^2 + 2*s + 1`.
//!
//! Pipeline: classifier → shunting-yard parser → postfix queue → numeric or
//! symbolic evaluator (+ term simplifier).

mod classify;
mod error;
mod numeric;
mod operand;
mod parser;
mod symbolic;
mod token;

pub mod terms;

pub use numeric::Value;

use crate::config::{ConfigError, SolverConfig};
use crate::data::signal::{DatasetRegistry, Signal};

use error::ExprError;
use numeric::NumericContext;
use symbolic::SymbolicContext;

static EMPTY_REGISTRY: Vec<Signal> = Vec::new();

/// Solves user expressions against a read-only set of datasets.
///
/// Errors are reported as human-readable strings.
pub struct ExpressionTree<'a> {
    registry: &'a dyn DatasetRegistry,
    config: SolverConfig,
}

impl ExpressionTree<'static> {
    /// A solver without datasets, for symbolic or purely scalar expressions.
    pub fn symbolic() -> Self {
        Self::new(&EMPTY_REGISTRY)
    }
}

impl<'a> ExpressionTree<'a> {
    pub fn new(registry: &'a dyn DatasetRegistry) -> Self {
        Self {
            registry,
            config: SolverConfig::default(),
        }
    }

    /// Replace the default settings after validating them.
    pub fn with_config(mut self, config: SolverConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        self.config = config;
        Ok(self)
    }

    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    /// Solve a numeric expression using the configured x-axis factor.
    pub fn solve(&self, expression: &str) -> Result<Value, String> {
        self.solve_with_factor(expression, self.config.x_axis_factor)
    }

    /// Solve a numeric expression, scaling referenced x axes by `x_axis_factor`.
    pub fn solve_with_factor(&self, expression: &str, x_axis_factor: f64) -> Result<Value, String> {
        log::debug!("solving '{}' (x factor {})", expression, x_axis_factor);
        self.solve_numeric(expression, x_axis_factor).map_err(report)
    }

    /// Solve an expression that must produce a dataset.
    pub fn solve_signal(&self, expression: &str) -> Result<Signal, String> {
        log::debug!("solving '{}' for a dataset", expression);
        self.solve_numeric(expression, self.config.x_axis_factor)
            .and_then(|v| v.into_signal().ok_or(ExprError::NotASignal))
            .map_err(report)
    }

    /// Simplify a polynomial in the configured variable and combine like terms.
    pub fn solve_symbolic(&self, expression: &str) -> Result<String, String> {
        log::debug!("solving '{}' symbolically in '{}'", expression, self.config.variable);
        let variable = self.config.variable;
        let result = parser::to_postfix(expression, Some(variable)).and_then(|queue| {
            log::trace!("postfix: {}", token::queue_to_string(&queue));
            let raw = SymbolicContext { variable }.evaluate(queue)?;
            log::trace!("raw terms: {}", raw);
            terms::simplify(&raw, variable, self.config.precision)
        });
        if let Ok(polynomial) = &result {
            log::debug!("result: {}", polynomial);
        }
        result.map_err(report)
    }

    fn solve_numeric(&self, expression: &str, x_axis_factor: f64) -> Result<Value, ExprError> {
        let queue = parser::to_postfix(expression, None)?;
        log::trace!("postfix: {}", token::queue_to_string(&queue));
        let context = NumericContext {
            registry: self.registry,
            x_axis_factor,
            fft_window: self.config.fft_window,
        };
        context.evaluate(queue)
    }
}

fn report(e: ExprError) -> String {
    if e.is_syntax() {
        log::debug!("syntax error: {}", e);
    } else {
        log::debug!("evaluation error: {}", e);
    }
    e.to_string()
}
