//! liveplot-expr crate root: re-exports and module wiring.
//!
//! Solves user-typed math expressions over plotted datasets:
//! - `expr`: classifier, shunting-yard parser, numeric and symbolic evaluators
//! - `data`: the `Signal` type, the dataset registry trait and the whole-signal
//!   routines used by builtins (integral, derivative, RMS, FFT)
//! - `config`: solver settings and their JSON/YAML persistence
//!
//! ```
//! use liveplot_expr::{ExpressionTree, Signal};
//!
//! let datasets = vec![Signal::from_points(&[[0.0, 1.0], [1.0, 2.0], [2.0, 3.0]])];
//! let tree = ExpressionTree::new(&datasets);
//! let doubled = tree.solve_signal("[0]+[0]").unwrap();
//! assert_eq!(doubled.y(), &[2.0, 4.0, 6.0]);
//!
//! let poly = ExpressionTree::symbolic().solve_symbolic("s*s + 2*s").unwrap();
//! assert_eq!(poly, "s^2 + 2*s");
//! ```

pub mod config;
pub mod data;
pub mod expr;

// Public re-exports for a compact external API
pub use config::{ConfigError, SolverConfig};
pub use data::fft::FftWindow;
pub use data::signal::{DatasetRegistry, Signal};
pub use expr::{ExpressionTree, Value};
