//! `murmuration` provides a particle swarm minimizer for bounded, continuous search spaces,
//! together with a small trait-based interface for plugging in your own objective functions. The
//! user implements the [`Objective`](traits::Objective) trait on some struct which takes a vector
//! of parameters and returns a single-valued [`Result`] ($`f(\mathbb{R}^n) \to \mathbb{R}`$).
//! Objectives which can evaluate many positions at once may also override
//! [`Objective::evaluate_batch`](traits::Objective::evaluate_batch).
//!
//! # Table of Contents
//! - [Key Features](#key-features)
//! - [Quick Start](#quick-start)
//! - [Reproducibility](#reproducibility)
//! - [Constraints and Integer Variables](#constraints-and-integer-variables)
//!
//! # Key Features
//! * A synchronous (generational) particle swarm with static or linearly decaying inertia.
//! * Saturating boundary handling with configurable velocity correction.
//! * Stopping rules for tolerance, evaluation and iteration budgets, and stagnation, with optional
//!   restarts.
//! * Optional batched objective evaluation (and a [`rayon`](https://docs.rs/rayon)-backed
//!   parallel adapter behind the `rayon` feature) which never changes the numerical result.
//! * Pressing `Ctrl-C` during a run (with a [`CtrlCAbortSignal`](core::CtrlCAbortSignal)) still
//!   returns a [`SwarmSummary`](core::SwarmSummary), marked as aborted.
//!
//! # Quick Start
//!
//! ```rust
//! use std::convert::Infallible;
//! use murmuration::algorithms::particles::{PSOConfig, Swarm, PSO};
//! use murmuration::core::{Bounds, TerminationReason};
//! use murmuration::traits::Objective;
//! use murmuration::{DVector, Float};
//!
//! struct Parabola;
//! impl Objective for Parabola {
//!     fn evaluate(&self, x: &DVector<Float>) -> Result<Float, Infallible> {
//!         Ok((x[0] - 3.0).powi(2))
//!     }
//! }
//!
//! let bounds = Bounds::new(&[-10.0], &[10.0]).unwrap();
//! let config = PSOConfig::new(bounds)
//!     .with_swarm(Swarm::new(20))
//!     .with_max_iterations(200)
//!     .with_random_seed(42);
//! let summary = PSO::default().minimize(&Parabola, config).unwrap();
//! assert_eq!(summary.termination_reason, TerminationReason::MaxIterations);
//! assert!((summary.best_position[0] - 3.0).abs() < 1e-3);
//! ```
//!
//! # Reproducibility
//!
//! All randomness is drawn from a single [`fastrand::Rng`] owned by the optimizer. Setting
//! [`PSOConfig::with_random_seed`](algorithms::particles::PSOConfig::with_random_seed) makes a
//! run bit-for-bit repeatable, and the draws are consumed in the same order whether or not
//! batched evaluation is enabled.
//!
//! # Constraints and Integer Variables
//!
//! The optimizer itself only ever sees a box-bounded continuous space. Inequality constraints are
//! expressed by the objective (see [`objectives::Penalized`]) and integer-valued variables by
//! rounding inside the objective (see [`objectives::Rounded`]).
#![warn(
    clippy::nursery,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::doc_markdown,
    clippy::doc_link_with_quotes,
    clippy::missing_safety_doc,
    clippy::missing_panics_doc,
    clippy::missing_errors_doc,
    clippy::perf,
    clippy::style,
    missing_docs
)]

/// Module containing minimization algorithms
pub mod algorithms;
/// Module containing core types like [`Bounds`](core::Bounds), [`Point`](core::Point) and
/// [`SwarmSummary`](core::SwarmSummary)
pub mod core;
/// Module containing decorators which wrap an [`Objective`](traits::Objective)
pub mod objectives;
/// Module containing standard functions for testing algorithms
pub mod test_functions;
/// Module containing the traits used throughout the crate
pub mod traits;

pub use nalgebra::{DMatrix, DVector};

/// The floating-point type used throughout the crate (`f64` unless the `f32` feature is enabled).
#[cfg(not(feature = "f32"))]
pub type Float = f64;
/// The floating-point type used throughout the crate (`f64` unless the `f32` feature is enabled).
#[cfg(feature = "f32")]
pub type Float = f32;

#[cfg(not(feature = "f32"))]
pub use std::f64::consts::{LN_2, PI};
#[cfg(feature = "f32")]
pub use std::f32::consts::{LN_2, PI};
