use std::fmt::Display;

use serde::{Deserialize, Serialize};

use crate::Float;

use super::Bounds;

/// The reason a swarm minimization stopped.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum TerminationReason {
    /// The global best fitness reached the absolute tolerance.
    Converged,
    /// The evaluation budget was used up.
    MaxEvaluations,
    /// The iteration budget was used up.
    MaxIterations,
    /// The swarm stagnated again after every allowed restart had been used.
    MaxRestarts,
    /// The swarm stagnated and restarts were not enabled.
    Stagnated,
    /// An abort signal was raised between steps.
    Aborted,
}

impl TerminationReason {
    /// A stable numeric code for the reason (`0` for [`TerminationReason::Converged`] through
    /// `5` for [`TerminationReason::Aborted`]).
    pub const fn code(&self) -> u8 {
        match self {
            Self::Converged => 0,
            Self::MaxEvaluations => 1,
            Self::MaxIterations => 2,
            Self::MaxRestarts => 3,
            Self::Stagnated => 4,
            Self::Aborted => 5,
        }
    }
    /// Whether the run ended because the tolerance was reached.
    pub const fn is_converged(&self) -> bool {
        matches!(self, Self::Converged)
    }
}

impl Display for TerminationReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let text = match self {
            Self::Converged => "converged to the absolute tolerance",
            Self::MaxEvaluations => "maximum number of evaluations reached",
            Self::MaxIterations => "maximum number of iterations reached",
            Self::MaxRestarts => "stagnated after the maximum number of restarts",
            Self::Stagnated => "stagnated",
            Self::Aborted => "aborted",
        };
        f.write_str(text)
    }
}

/// A struct that holds the results of a swarm minimization run.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SwarmSummary {
    /// The bounds of the search space.
    pub bounds: Bounds,
    /// The names of the parameters. This is `None` if no names were set.
    pub parameter_names: Option<Vec<String>>,
    /// A message that describes how the run ended.
    pub message: String,
    /// The best position found.
    pub best_position: Vec<Float>,
    /// The value of the objective at [`SwarmSummary::best_position`].
    pub best_fitness: Float,
    /// The number of objective evaluations, including initialization and restarts.
    pub evaluation_count: usize,
    /// The number of completed iterations.
    pub iteration_count: usize,
    /// The number of restarts performed.
    pub restart_count: usize,
    /// Why the run stopped.
    pub termination_reason: TerminationReason,
}

impl SwarmSummary {
    /// Set the names associated with each parameter.
    pub fn with_parameter_names<I: IntoIterator<Item = S>, S: AsRef<str>>(
        mut self,
        names: I,
    ) -> Self {
        self.parameter_names = Some(
            names
                .into_iter()
                .map(|n| n.as_ref().to_string())
                .collect(),
        );
        self
    }
    /// Whether the run ended because the tolerance was reached.
    pub const fn converged(&self) -> bool {
        self.termination_reason.is_converged()
    }
}

impl Display for SwarmSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let title = format!(
            "╒══════════════════════════════════════════════════════════════════════════════════════════════╕
│{:^94}│",
            "SWARM RESULTS",
        );
        let status = format!(
            "╞═══════════════════════════════╤════════════════════════════════╤═════════════════════════════╡
│ Iterations: {:<17} │ Evaluations: {:<17} │ f(x): {:+14.6E}        │",
            self.iteration_count, self.evaluation_count, self.best_fitness,
        );
        let status_text = format!("{} ({})", self.message, self.termination_reason.code());
        let message = format!(
            "├───────────────────────────────┴────────────────────────────────┴─────────────────────────────┤
│ Status: {:<84} │
│ Restarts: {:<82} │",
            status_text, self.restart_count,
        );
        let header =
            "├───────╥────────────────────────────────────────────╥──────────────┬──────────────┬───────────┤
│ Par # ║ Value                                      ║       -Bound │       +Bound │ At Limit? │
├───────╫────────────────────────────────────────────╫──────────────┼──────────────┼───────────┤"
                .to_string();
        let names = self.parameter_names.clone().unwrap_or_else(|| {
            (0..self.best_position.len())
                .map(|i| format!("x_{}", i))
                .collect()
        });
        let rows = self
            .best_position
            .iter()
            .zip(self.bounds.iter())
            .zip(names)
            .map(|((xi, bound), name)| {
                format!(
                    "│ {:>5} ║ {:>+16.8E}                           ║ {:>+12.3E} │ {:>+12.3E} │ {:^9} │",
                    name,
                    xi,
                    bound.lower(),
                    bound.upper(),
                    if bound.at_bound(*xi) { "yes" } else { "" }
                )
            })
            .collect::<Vec<String>>();
        let bottom =
            "└───────╨────────────────────────────────────────────╨──────────────┴──────────────┴───────────┘"
                .to_string();
        let out = [title, status, message, header, rows.join("\n"), bottom].join("\n");
        write!(f, "{}", out)
    }
}
