use fastrand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::{
    algorithms::particles::{
        Swarm, SwarmBoundaryMethod, SwarmPositionInitializer, SwarmStatus,
        SwarmVelocityInitializer,
    },
    core::{Bounds, BoundsError, Callbacks, SwarmError, SwarmSummary, TerminationReason},
    traits::{Algorithm, Objective},
    Float, LN_2,
};

/// The inertia weight $`\omega`$ applied to a particle's previous velocity.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq)]
pub enum Inertia {
    /// A constant weight
    Static(Float),
    /// A weight which falls linearly from `start` to `end` over `max_iterations` iterations
    LinearDecay {
        /// The weight used for the first step
        start: Float,
        /// The weight reached after `max_iterations` iterations
        end: Float,
    },
}
impl Default for Inertia {
    fn default() -> Self {
        Self::Static(0.5 / LN_2)
    }
}
impl Inertia {
    /// The weight to use after `t` completed iterations.
    pub fn weight(&self, t: usize, max_iterations: usize) -> Float {
        match self {
            Self::Static(w) => *w,
            Self::LinearDecay { start, end } => {
                start - (start - end) * (t as Float / max_iterations as Float)
            }
        }
    }
}

/// The configuration struct for the [`PSO`] algorithm.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PSOConfig {
    bounds: Bounds,
    swarm: Swarm,
    seed_position: Option<Vec<Option<Float>>>,
    inertia: Inertia,
    c1: Float,
    c2: Float,
    max_iterations: usize,
    max_evaluations: Option<usize>,
    max_stagnation: Option<usize>,
    max_restarts: usize,
    abs_tolerance: Option<Float>,
    restart_tolerance: Option<Float>,
    random_seed: Option<u64>,
    report_interval: Option<usize>,
    parameter_names: Option<Vec<String>>,
}
impl Default for PSOConfig {
    fn default() -> Self {
        Self {
            bounds: Bounds::default(),
            swarm: Swarm::default(),
            seed_position: None,
            inertia: Inertia::default(),
            c1: 0.5 + LN_2,
            c2: 0.5 + LN_2,
            max_iterations: 1000,
            max_evaluations: None,
            max_stagnation: None,
            max_restarts: 0,
            abs_tolerance: None,
            restart_tolerance: None,
            random_seed: None,
            report_interval: None,
            parameter_names: None,
        }
    }
}
impl PSOConfig {
    /// Create a configuration for a search inside `bounds` with default settings.
    pub fn new(bounds: Bounds) -> Self {
        Self {
            bounds,
            ..Default::default()
        }
    }
    /// Replace the bounds of the search space.
    pub fn with_bounds(mut self, bounds: Bounds) -> Self {
        self.bounds = bounds;
        self
    }
    /// Sets the [`Swarm`] which describes the particles and how they move (default = a swarm of
    /// `40` particles).
    pub fn with_swarm(mut self, swarm: Swarm) -> Self {
        self.swarm = swarm;
        self
    }
    /// Sets the number of particles (shorthand for [`Swarm::with_n_particles`]).
    pub fn with_swarm_size(mut self, value: usize) -> Self {
        self.swarm.n_particles = value;
        self
    }
    /// Sets the boundary method (shorthand for [`Swarm::with_boundary_method`]).
    pub fn with_boundary_method(mut self, value: SwarmBoundaryMethod) -> Self {
        self.swarm.boundary_method = value;
        self
    }
    /// Sets the position initializer (shorthand for [`Swarm::with_position_initializer`]).
    pub fn with_position_initializer(mut self, value: SwarmPositionInitializer) -> Self {
        self.swarm.position_initializer = value;
        self
    }
    /// Sets the velocity initializer (shorthand for [`Swarm::with_velocity_initializer`]).
    pub fn with_velocity_initializer(mut self, value: SwarmVelocityInitializer) -> Self {
        self.swarm.velocity_initializer = value;
        self
    }
    /// Limits velocities (shorthand for [`Swarm::with_max_velocity`]).
    ///
    /// # Panics
    ///
    /// This method will panic if `fraction <= 0`.
    pub fn with_max_velocity(mut self, fraction: Float) -> Self {
        self.swarm = self.swarm.with_max_velocity(fraction);
        self
    }
    /// Sets batched evaluation (shorthand for [`Swarm::with_vectorized`]).
    pub fn with_vectorized(mut self, value: bool) -> Self {
        self.swarm.vectorized = value;
        self
    }
    /// Sets coordinates of the first particle. Coordinates given as `None` are drawn like every
    /// other particle.
    pub fn with_seed_position<I: IntoIterator<Item = Option<Float>>>(mut self, seed: I) -> Self {
        self.seed_position = Some(seed.into_iter().collect());
        self
    }
    /// Sets the inertia schedule (default = `Inertia::Static(1 / (2 ln 2))`).
    ///
    /// # Panics
    ///
    /// This method will panic if any weight is negative.
    pub fn with_inertia(mut self, value: Inertia) -> Self {
        match value {
            Inertia::Static(w) => assert!(w >= 0.0),
            Inertia::LinearDecay { start, end } => assert!(start >= 0.0 && end >= 0.0),
        }
        self.inertia = value;
        self
    }
    /// Sets a constant inertial weight $`\omega`$.
    ///
    /// # Panics
    ///
    /// This method will panic if $`\omega < 0`$.
    pub fn with_omega(self, value: Float) -> Self {
        self.with_inertia(Inertia::Static(value))
    }
    /// Sets the cognitive weight $`c_1`$ which controls the particle's tendency
    /// to move towards its personal best (default = `0.5 + ln 2`).
    ///
    /// # Panics
    ///
    /// This method will panic if $`c_1 < 0`$.
    pub fn with_c1(mut self, value: Float) -> Self {
        assert!(value >= 0.0);
        self.c1 = value;
        self
    }
    /// Sets the social weight $`c_2`$ which controls the particle's tendency
    /// to move towards the global best (default = `0.5 + ln 2`).
    ///
    /// # Panics
    ///
    /// This method will panic if $`c_2 < 0`$.
    pub fn with_c2(mut self, value: Float) -> Self {
        assert!(value >= 0.0);
        self.c2 = value;
        self
    }
    /// Sets the maximum number of iterations (default = `1000`).
    ///
    /// # Panics
    ///
    /// This method will panic if `value == 0`.
    pub fn with_max_iterations(mut self, value: usize) -> Self {
        assert!(value >= 1);
        self.max_iterations = value;
        self
    }
    /// Stop once this many objective evaluations have been used (default = unlimited).
    pub const fn with_max_evaluations(mut self, value: usize) -> Self {
        self.max_evaluations = Some(value);
        self
    }
    /// Restart (or stop) after this many consecutive iterations without improvement of the
    /// global best (default = never).
    pub const fn with_max_stagnation(mut self, value: usize) -> Self {
        self.max_stagnation = Some(value);
        self
    }
    /// Sets the number of restarts allowed before the run ends (default = `0`).
    pub const fn with_max_restarts(mut self, value: usize) -> Self {
        self.max_restarts = value;
        self
    }
    /// Stop as soon as the global best fitness is at or below `value` (default = disabled).
    pub const fn with_abs_tolerance(mut self, value: Float) -> Self {
        self.abs_tolerance = Some(value);
        self
    }
    /// Treat the swarm as collapsed (and restart it) when every particle lies within
    /// `value` times the diameter of the bounds from the global best (default = disabled).
    ///
    /// # Panics
    ///
    /// This method will panic if `value < 0`.
    pub fn with_restart_tolerance(mut self, value: Float) -> Self {
        assert!(value >= 0.0);
        self.restart_tolerance = Some(value);
        self
    }
    /// Seed the random number generator for a reproducible run (default = seeded from entropy).
    pub const fn with_random_seed(mut self, value: u64) -> Self {
        self.random_seed = Some(value);
        self
    }
    /// Log progress at `info` level every `value` iterations (default = never).
    pub const fn with_report_interval(mut self, value: usize) -> Self {
        self.report_interval = Some(value);
        self
    }
    /// Set the names associated with each parameter, used when displaying the summary.
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
    /// The bounds of the search space.
    pub const fn bounds(&self) -> &Bounds {
        &self.bounds
    }
    /// The maximum number of iterations.
    pub const fn max_iterations(&self) -> usize {
        self.max_iterations
    }
    /// Repeat the checks done by the `with_*` builders, for configurations which did not pass
    /// through them (deserialized or edited in place).
    ///
    /// # Errors
    ///
    /// Returns [`SwarmError::InvalidConfiguration`] naming the first value out of range.
    #[allow(clippy::neg_cmp_op_on_partial_ord)]
    pub fn validate<E>(&self) -> Result<(), SwarmError<E>> {
        if self.max_iterations == 0 {
            return Err(SwarmError::InvalidConfiguration(
                "max_iterations must be at least 1".to_string(),
            ));
        }
        let mut weights = vec![("c1", self.c1), ("c2", self.c2)];
        match self.inertia {
            Inertia::Static(w) => weights.push(("inertia", w)),
            Inertia::LinearDecay { start, end } => {
                weights.push(("inertia start", start));
                weights.push(("inertia end", end));
            }
        }
        // negated comparisons so that NaN is rejected as well
        for (name, value) in weights {
            if !(value >= 0.0) {
                return Err(SwarmError::InvalidConfiguration(format!(
                    "{name} must be non-negative (got {value})"
                )));
            }
        }
        if let Some(fraction) = self.swarm.max_velocity {
            if !(fraction > 0.0) {
                return Err(SwarmError::InvalidConfiguration(format!(
                    "max_velocity must be positive (got {fraction})"
                )));
            }
        }
        if let Some(tol) = self.restart_tolerance {
            if !(tol >= 0.0) {
                return Err(SwarmError::InvalidConfiguration(format!(
                    "restart_tolerance must be non-negative (got {tol})"
                )));
            }
        }
        Ok(())
    }
}

/// Particle Swarm Optimizer
///
/// The PSO algorithm involves an ensemble of particles which are all aware of the best position
/// found by the swarm so far. Each step, every particle's velocity is updated as follows:
///
/// ```math
/// v_i^{t+1} = \omega(t) v_i^t + c_1 r_{1,i}^{t+1}(p^t_i - x^t_i) + c_2 r_{2,i}^{t+1}(g^t - x^t_i)
/// ```
/// where $`r_1`$ and $`r_2`$ are uniformly distributed in $`[0,1)`$ (drawn afresh for every
/// particle and dimension), $`\omega`$ is the inertial weight, $`c_1`$ and $`c_2`$ are the
/// cognitive and social weights, $`p_i^t`$ is the particle's personal best position, and
/// $`g^t`$ is the swarm's best position at the start of the step. The particle then moves by
/// its velocity and is clamped into the bounds. The global best is only merged once every
/// particle has been evaluated, so the result does not depend on the order of evaluation. See [^1]
/// for more information.
///
/// After every step the following rules are checked in order: the absolute tolerance, the
/// evaluation budget, the iteration budget, and finally stagnation (or collapse) of the swarm,
/// which either triggers a restart or ends the run.
///
/// [^1]: [Houssein, E. H., Gad, A. G., Hussain, K., & Suganthan, P. N. (2021). Major Advances in Particle Swarm Optimization: Theory, Analysis, and Application. In Swarm and Evolutionary Computation (Vol. 63, p. 100868). Elsevier BV.](https://doi.org/10.1016/j.swevo.2021.100868)
#[derive(Clone, Debug)]
pub struct PSO {
    config: PSOConfig,
    rng: Rng,
}

impl Default for PSO {
    fn default() -> Self {
        Self {
            config: PSOConfig::default(),
            rng: Rng::new(),
        }
    }
}

impl PSO {
    /// Minimize `problem` with the given configuration and no observers.
    ///
    /// # Errors
    ///
    /// Returns a [`SwarmError`] if the configuration is invalid or the objective fails.
    pub fn minimize<P, E>(
        &mut self,
        problem: &P,
        config: PSOConfig,
    ) -> Result<SwarmSummary, SwarmError<E>>
    where
        P: Objective<E>,
    {
        self.minimize_with(problem, config, Callbacks::empty())
    }

    /// Minimize `problem` with the given configuration, showing every step to the observers in
    /// `callbacks` and stopping early if its abort signal is raised.
    ///
    /// # Errors
    ///
    /// Returns a [`SwarmError`] if the configuration is invalid or the objective fails.
    pub fn minimize_with<P, E>(
        &mut self,
        problem: &P,
        config: PSOConfig,
        callbacks: Callbacks<SwarmStatus>,
    ) -> Result<SwarmSummary, SwarmError<E>>
    where
        P: Objective<E>,
    {
        <Self as Algorithm<P, SwarmStatus, SwarmError<E>>>::process(
            self, problem, config, callbacks,
        )
    }

    fn restart_triggered(&self, status: &SwarmStatus) -> bool {
        let stagnated = self
            .config
            .max_stagnation
            .is_some_and(|max| status.stagnation_count >= max);
        let collapsed = self.config.restart_tolerance.is_some_and(|tol| {
            status.swarm.max_distance_to(&status.gbest.x) < tol * self.config.bounds.diameter()
        });
        stagnated || collapsed
    }
}

impl<P, E> Algorithm<P, SwarmStatus, SwarmError<E>> for PSO
where
    P: Objective<E>,
{
    type Summary = SwarmSummary;
    type Config = PSOConfig;

    fn initialize(
        &mut self,
        config: Self::Config,
        problem: &P,
        status: &mut SwarmStatus,
    ) -> Result<(), SwarmError<E>> {
        if config.bounds.dimension() == 0 {
            return Err(BoundsError::Empty.into());
        }
        config.validate()?;
        self.rng = config.random_seed.map_or_else(Rng::new, Rng::with_seed);
        status.initialize(
            config.swarm.clone(),
            &config.bounds,
            config.seed_position.as_deref(),
            problem,
            &mut self.rng,
        )?;
        debug!(
            dimension = config.bounds.dimension(),
            n_particles = status.swarm.n_particles,
            best_fitness = status.gbest.fx_or_inf(),
            "swarm initialized"
        );
        self.config = config;
        Ok(())
    }

    fn step(
        &mut self,
        _current_step: usize,
        problem: &P,
        status: &mut SwarmStatus,
    ) -> Result<(), SwarmError<E>> {
        let omega = self
            .config
            .inertia
            .weight(status.iteration_count, self.config.max_iterations);
        let report = status.step(
            problem,
            omega,
            self.config.c1,
            self.config.c2,
            &mut self.rng,
        )?;
        if let Some(interval) = self.config.report_interval {
            if interval > 0 && report.iteration_count % interval == 0 {
                info!(
                    iteration = report.iteration_count,
                    evaluations = report.evaluation_count,
                    best_fitness = status.gbest.fx_or_inf(),
                    "swarm progress"
                );
            }
        }
        Ok(())
    }

    fn check_for_termination(
        &mut self,
        _current_step: usize,
        problem: &P,
        status: &mut SwarmStatus,
    ) -> Result<bool, SwarmError<E>> {
        let mut reason = None;
        if self
            .config
            .abs_tolerance
            .is_some_and(|tol| status.gbest.fx_or_inf() <= tol)
        {
            reason = Some(TerminationReason::Converged);
        } else if self
            .config
            .max_evaluations
            .is_some_and(|max| status.evaluation_count >= max)
        {
            reason = Some(TerminationReason::MaxEvaluations);
        } else if status.iteration_count >= self.config.max_iterations {
            reason = Some(TerminationReason::MaxIterations);
        } else if self.restart_triggered(status) {
            if status.restart_count < self.config.max_restarts {
                status.restart(problem, &mut self.rng)?;
                debug!(
                    restart = status.restart_count,
                    iteration = status.iteration_count,
                    best_fitness = status.gbest.fx_or_inf(),
                    "swarm restarted"
                );
            } else if self.config.max_restarts > 0 {
                reason = Some(TerminationReason::MaxRestarts);
            } else {
                reason = Some(TerminationReason::Stagnated);
            }
        }
        match reason {
            Some(reason) => {
                status.terminate(reason);
                info!(
                    %reason,
                    iterations = status.iteration_count,
                    evaluations = status.evaluation_count,
                    best_fitness = status.gbest.fx_or_inf(),
                    "swarm terminated"
                );
                Ok(true)
            }
            None => Ok(false),
        }
    }

    fn abort(&mut self, status: &mut SwarmStatus) {
        status.terminate(TerminationReason::Aborted);
        info!(iterations = status.iteration_count, "swarm aborted");
    }

    fn summarize(
        &self,
        _current_step: usize,
        _problem: &P,
        status: &SwarmStatus,
    ) -> Result<Self::Summary, SwarmError<E>> {
        let termination_reason = status
            .state
            .termination_reason()
            .ok_or(SwarmError::NotTerminated)?;
        let (best_position, best_fitness) = status.get_best().destructure();
        Ok(SwarmSummary {
            bounds: self.config.bounds.clone(),
            parameter_names: self.config.parameter_names.clone(),
            message: status.message.clone(),
            best_position: best_position.iter().copied().collect(),
            best_fitness,
            evaluation_count: status.evaluation_count,
            iteration_count: status.iteration_count,
            restart_count: status.restart_count,
            termination_reason,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::{convert::Infallible, sync::Arc};

    use approx::assert_relative_eq;
    use parking_lot::RwLock;

    use super::*;
    use crate::{
        algorithms::particles::TrackingSwarmObserver,
        core::AtomicAbortSignal,
        objectives::{InequalityConstraints, Penalized},
        test_functions::{Rastrigin, SpringWeight, Sphere},
        traits::{AbortSignal, Observer},
        DMatrix, DVector,
    };

    struct Shifted;
    impl Objective for Shifted {
        fn evaluate(&self, x: &DVector<Float>) -> Result<Float, Infallible> {
            Ok((x[0] - 3.0).powi(2))
        }
    }

    struct Constant(Float);
    impl Objective for Constant {
        fn evaluate(&self, _x: &DVector<Float>) -> Result<Float, Infallible> {
            Ok(self.0)
        }
    }

    fn cube(n: usize, half_width: Float) -> Bounds {
        Bounds::new(&vec![-half_width; n], &vec![half_width; n]).unwrap()
    }

    #[test]
    fn test_one_dimensional_parabola() {
        let config = PSOConfig::new(cube(1, 10.0))
            .with_swarm_size(20)
            .with_max_iterations(200)
            .with_random_seed(42);
        let summary = PSO::default().minimize(&Shifted, config).unwrap();
        assert_eq!(summary.termination_reason, TerminationReason::MaxIterations);
        assert_eq!(summary.iteration_count, 200);
        assert_eq!(summary.evaluation_count, 20 * 201);
        assert_relative_eq!(summary.best_position[0], 3.0, epsilon = 1e-3);
        assert_relative_eq!(summary.best_fitness, 0.0, epsilon = 1e-6);
    }

    #[test]
    fn test_seeded_runs_are_reproducible() {
        let config = PSOConfig::new(cube(3, 5.12))
            .with_max_iterations(50)
            .with_random_seed(9);
        let a = PSO::default().minimize(&Rastrigin { n: 3 }, config.clone()).unwrap();
        let b = PSO::default().minimize(&Rastrigin { n: 3 }, config).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_vectorized_matches_scalar() {
        let config = PSOConfig::new(cube(4, 5.12))
            .with_swarm_size(15)
            .with_max_iterations(60)
            .with_velocity_initializer(SwarmVelocityInitializer::RandomFraction(0.2))
            .with_random_seed(1234);
        let scalar = PSO::default()
            .minimize(&Rastrigin { n: 4 }, config.clone())
            .unwrap();
        let vectorized = PSO::default()
            .minimize(&Rastrigin { n: 4 }, config.with_vectorized(true))
            .unwrap();
        assert_eq!(scalar.best_position, vectorized.best_position);
        assert_eq!(scalar.best_fitness, vectorized.best_fitness);
        assert_eq!(scalar.evaluation_count, vectorized.evaluation_count);
    }

    #[test]
    fn test_gbest_is_monotone() {
        let observer = TrackingSwarmObserver::build();
        let config = PSOConfig::new(cube(2, 5.12))
            .with_swarm_size(10)
            .with_max_iterations(40)
            .with_random_seed(3);
        let summary = PSO::default()
            .minimize_with(
                &Rastrigin { n: 2 },
                config,
                Callbacks::empty().with_observer(observer.clone()),
            )
            .unwrap();
        let observer = observer.read();
        assert_eq!(observer.best_history.len(), 40);
        assert_eq!(observer.history.len(), 40);
        for pair in observer.best_history.windows(2) {
            assert!(pair[1].fx_or_inf() <= pair[0].fx_or_inf());
        }
        assert_eq!(
            observer.best_history.last().map(|p| p.fx_or_inf()),
            Some(summary.best_fitness)
        );
    }

    #[test]
    fn test_stagnated_after_first_step() {
        let config = PSOConfig::new(cube(2, 1.0))
            .with_swarm_size(5)
            .with_max_stagnation(0)
            .with_random_seed(0);
        let summary = PSO::default().minimize(&Sphere { n: 2 }, config).unwrap();
        assert_eq!(summary.termination_reason, TerminationReason::Stagnated);
        assert_eq!(summary.termination_reason.code(), 4);
        assert_eq!(summary.iteration_count, 1);
        assert_eq!(summary.restart_count, 0);
    }

    #[test]
    fn test_max_restarts() {
        let config = PSOConfig::new(cube(2, 1.0))
            .with_swarm_size(10)
            .with_max_stagnation(2)
            .with_max_restarts(3)
            .with_random_seed(5);
        let summary = PSO::default().minimize(&Constant(5.0), config).unwrap();
        assert_eq!(summary.termination_reason, TerminationReason::MaxRestarts);
        assert_eq!(summary.restart_count, 3);
        assert_eq!(summary.iteration_count, 8);
        assert_eq!(summary.evaluation_count, 120);
        assert_eq!(summary.best_fitness, 5.0);
    }

    #[test]
    fn test_collapse_triggers_stagnation() {
        let config = PSOConfig::new(cube(2, 1.0))
            .with_swarm_size(4)
            .with_restart_tolerance(10.0)
            .with_random_seed(5);
        let summary = PSO::default().minimize(&Sphere { n: 2 }, config).unwrap();
        assert_eq!(summary.termination_reason, TerminationReason::Stagnated);
        assert_eq!(summary.iteration_count, 1);
    }

    #[test]
    fn test_max_evaluations() {
        let config = PSOConfig::new(cube(2, 1.0))
            .with_swarm_size(10)
            .with_max_evaluations(55)
            .with_random_seed(5);
        let summary = PSO::default().minimize(&Sphere { n: 2 }, config).unwrap();
        assert_eq!(summary.termination_reason, TerminationReason::MaxEvaluations);
        assert_eq!(summary.iteration_count, 5);
        assert_eq!(summary.evaluation_count, 60);
    }

    #[test]
    fn test_converged() {
        let config = PSOConfig::new(cube(3, 5.0))
            .with_abs_tolerance(1e-8)
            .with_max_iterations(10_000)
            .with_random_seed(77);
        let summary = PSO::default().minimize(&Sphere { n: 3 }, config).unwrap();
        assert_eq!(summary.termination_reason, TerminationReason::Converged);
        assert!(summary.converged());
        assert!(summary.best_fitness <= 1e-8);
        assert!(summary.iteration_count < 10_000);
    }

    struct AbortAt {
        step: usize,
        signal: Arc<AtomicAbortSignal>,
    }
    impl Observer<SwarmStatus> for AbortAt {
        fn observe(&mut self, current_step: usize, _status: &SwarmStatus) {
            if current_step == self.step {
                self.signal.abort();
            }
        }
    }

    #[test]
    fn test_abort_signal() {
        let signal = Arc::new(AtomicAbortSignal::new());
        let callbacks = Callbacks::empty()
            .with_observer(AbortAt {
                step: 2,
                signal: signal.clone(),
            })
            .with_abort_signal(signal);
        let config = PSOConfig::new(cube(2, 5.12)).with_random_seed(8);
        let summary = PSO::default()
            .minimize_with(&Rastrigin { n: 2 }, config, callbacks)
            .unwrap();
        assert_eq!(summary.termination_reason, TerminationReason::Aborted);
        assert_eq!(summary.termination_reason.code(), 5);
        assert_eq!(summary.iteration_count, 3);
        assert_eq!(summary.message, "aborted");
    }

    struct HoleyParabola;
    impl Objective for HoleyParabola {
        fn evaluate(&self, x: &DVector<Float>) -> Result<Float, Infallible> {
            let v = x[0];
            if v < -9.0 {
                Ok((v - v) / (v - v))
            } else {
                Ok((v - 3.0).powi(2))
            }
        }
    }

    #[test]
    fn test_nan_fitness_never_becomes_best() {
        let config = PSOConfig::new(cube(1, 10.0))
            .with_swarm_size(40)
            .with_max_iterations(50)
            .with_random_seed(42);
        let observer = TrackingSwarmObserver::build();
        let summary = PSO::default()
            .minimize_with(
                &HoleyParabola,
                config,
                Callbacks::empty().with_observer(observer.clone()),
            )
            .unwrap();
        assert!(summary.best_fitness.is_finite());
        assert!(summary.best_position[0] >= -9.0);
        for best in &observer.read().best_history {
            assert!(best.fx.is_some_and(|fx| !fx.is_nan()));
        }
    }

    struct Failing;
    impl Objective<String> for Failing {
        fn evaluate(&self, x: &DVector<Float>) -> Result<Float, String> {
            if x[0] > 0.0 {
                Err(format!("cannot evaluate at {}", x[0]))
            } else {
                Ok(x[0].powi(2))
            }
        }
    }

    #[test]
    fn test_objective_error_propagates() {
        let config = PSOConfig::new(Bounds::new(&[0.5], &[1.0]).unwrap()).with_random_seed(0);
        let res = PSO::default().minimize(&Failing, config);
        assert!(matches!(res, Err(SwarmError::ObjectiveEvaluation(_))));
    }

    struct ShortBatch;
    impl Objective for ShortBatch {
        fn evaluate(&self, x: &DVector<Float>) -> Result<Float, Infallible> {
            Ok(x.norm_squared())
        }
        fn evaluate_batch(&self, xs: &DMatrix<Float>) -> Result<Vec<Float>, Infallible> {
            Ok(vec![0.0; xs.nrows() - 1])
        }
    }

    #[test]
    fn test_configuration_errors() {
        let config = PSOConfig::new(cube(2, 1.0))
            .with_swarm_size(6)
            .with_vectorized(true);
        assert!(matches!(
            PSO::default().minimize(&ShortBatch, config),
            Err(SwarmError::DimensionMismatch {
                expected: 6,
                found: 5
            })
        ));
        let config = PSOConfig::new(cube(2, 1.0)).with_swarm_size(0);
        assert!(matches!(
            PSO::default().minimize(&Sphere { n: 2 }, config),
            Err(SwarmError::InvalidSwarmSize(0))
        ));
        let config = PSOConfig::new(cube(2, 1.0)).with_seed_position([Some(0.0)]);
        assert!(matches!(
            PSO::default().minimize(&Sphere { n: 2 }, config),
            Err(SwarmError::DimensionMismatch {
                expected: 2,
                found: 1
            })
        ));
        assert!(matches!(
            PSO::default().minimize(&Sphere { n: 2 }, PSOConfig::default()),
            Err(SwarmError::InvalidBounds(BoundsError::Empty))
        ));
    }

    #[test]
    fn test_config_is_validated_before_running() {
        let mut config = PSOConfig::new(cube(2, 1.0));
        config.max_iterations = 0;
        assert!(matches!(
            PSO::default().minimize(&Sphere { n: 2 }, config),
            Err(SwarmError::InvalidConfiguration(_))
        ));

        let mut config = PSOConfig::new(cube(2, 1.0));
        config.swarm.max_velocity = Some(-0.5);
        assert!(matches!(
            PSO::default().minimize(&Sphere { n: 2 }, config),
            Err(SwarmError::InvalidConfiguration(_))
        ));

        let mut config = PSOConfig::new(cube(2, 1.0));
        config.inertia = Inertia::LinearDecay {
            start: 0.9,
            end: Float::NAN,
        };
        assert!(matches!(
            PSO::default().minimize(&Sphere { n: 2 }, config),
            Err(SwarmError::InvalidConfiguration(_))
        ));

        let mut config = PSOConfig::new(cube(2, 1.0));
        config.c2 = -1.0;
        assert!(config.validate::<Infallible>().is_err());
        config.c2 = 1.0;
        assert!(config.validate::<Infallible>().is_ok());
    }

    #[test]
    fn test_summary_requires_termination() {
        let pso = PSO::default();
        let status = SwarmStatus::default();
        let res = <PSO as Algorithm<Sphere, SwarmStatus, SwarmError>>::summarize(
            &pso,
            0,
            &Sphere { n: 2 },
            &status,
        );
        assert!(matches!(res, Err(SwarmError::NotTerminated)));
    }

    #[test]
    #[should_panic]
    fn test_negative_weight_panics() {
        let _ = PSOConfig::new(cube(1, 1.0)).with_c1(-0.1);
    }

    #[test]
    #[should_panic]
    fn test_zero_iterations_panics() {
        let _ = PSOConfig::new(cube(1, 1.0)).with_max_iterations(0);
    }

    #[test]
    fn test_inertia_schedule() {
        assert_relative_eq!(Inertia::default().weight(10, 100), 0.5 / LN_2);
        let decay = Inertia::LinearDecay {
            start: 0.9,
            end: 0.4,
        };
        assert_relative_eq!(decay.weight(0, 100), 0.9);
        assert_relative_eq!(decay.weight(50, 100), 0.65);
        assert_relative_eq!(decay.weight(100, 100), 0.4);
    }

    #[test]
    fn test_seed_position_is_used() {
        let observer = Arc::new(RwLock::new(TrackingSwarmObserver::default()));
        let config = PSOConfig::new(cube(2, 5.0))
            .with_swarm_size(3)
            .with_max_iterations(1)
            .with_seed_position([Some(0.0), Some(0.0)])
            .with_random_seed(4);
        let summary = PSO::default()
            .minimize_with(
                &Sphere { n: 2 },
                config,
                Callbacks::empty().with_observer(observer),
            )
            .unwrap();
        assert_eq!(summary.best_fitness, 0.0);
        assert_eq!(summary.best_position, vec![0.0, 0.0]);
    }

    #[test]
    fn test_spring_weight() {
        let problem = Penalized::new(SpringWeight, 1e4);
        let bounds = Bounds::new(&[0.05, 0.25, 2.0], &[2.0, 1.3, 15.0]).unwrap();
        let config = PSOConfig::new(bounds)
            .with_swarm_size(40)
            .with_max_iterations(1000)
            .with_random_seed(2024);
        let summary = PSO::default().minimize(&problem, config).unwrap();
        assert!(summary.best_fitness < 1000.0);
        let x = DVector::from_vec(summary.best_position.clone());
        for g in SpringWeight.constraints(&x) {
            assert!(g <= 0.0);
        }
    }
}
