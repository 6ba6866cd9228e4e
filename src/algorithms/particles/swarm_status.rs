use crate::{
    algorithms::particles::Swarm,
    core::{Bounds, Point, SwarmError, TerminationReason},
    traits::{Objective, Status},
    Float,
};
use fastrand::Rng;
use serde::{Deserialize, Serialize};

/// The lifecycle of a swarm run.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub enum SwarmState {
    /// The swarm has not finished its first step yet
    #[default]
    Initializing,
    /// At least one step has been taken and no stopping rule has fired
    Running,
    /// The run is over
    Terminated(TerminationReason),
}

impl SwarmState {
    /// The reason the run ended, if it has.
    pub const fn termination_reason(&self) -> Option<TerminationReason> {
        match self {
            Self::Terminated(reason) => Some(*reason),
            _ => None,
        }
    }
    /// Whether the run has ended.
    pub const fn is_terminated(&self) -> bool {
        matches!(self, Self::Terminated(_))
    }
}

/// The counters after a single step of the swarm.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StepReport {
    /// The number of completed iterations
    pub iteration_count: usize,
    /// The number of objective evaluations so far
    pub evaluation_count: usize,
    /// The number of consecutive steps without a strict improvement of the global best
    pub stagnation_count: usize,
    /// Whether this step improved the global best
    pub improved: bool,
}

/// A status for particle swarm optimization.
#[derive(Clone, Debug, Serialize, Deserialize, Default)]
pub struct SwarmStatus {
    /// The global best position found by all particles
    pub gbest: Point,
    /// The swarm
    pub swarm: Swarm,
    /// Where the run is in its lifecycle
    pub state: SwarmState,
    /// A message containing information about the condition of the swarm or convergence
    pub message: String,
    /// The number of completed iterations
    pub iteration_count: usize,
    /// The number of objective evaluations, including initialization and restarts
    pub evaluation_count: usize,
    /// The number of consecutive iterations without a strict improvement of [`SwarmStatus::gbest`]
    pub stagnation_count: usize,
    /// The number of restarts performed so far
    pub restart_count: usize,
    /// An indicator of whether the swarm has converged
    pub converged: bool,
}

impl SwarmStatus {
    /// Scatter and evaluate `swarm` inside `bounds` and take the best particle as the global best.
    ///
    /// # Errors
    ///
    /// See [`Swarm::initialize`].
    pub fn initialize<E>(
        &mut self,
        mut swarm: Swarm,
        bounds: &Bounds,
        seed_position: Option<&[Option<Float>]>,
        func: &dyn Objective<E>,
        rng: &mut Rng,
    ) -> Result<(), SwarmError<E>> {
        self.reset();
        self.evaluation_count = swarm.initialize(rng, bounds, seed_position, func)?;
        self.swarm = swarm;
        if let Some(i) = self.swarm.best_index() {
            self.gbest = self.swarm.particles[i].best.clone();
        }
        Ok(())
    }

    /// Take one synchronous step: every particle moves using the global best from the start of
    /// the step, then all new positions are evaluated, personal bests are updated, and finally the
    /// global best is merged.
    ///
    /// # Errors
    ///
    /// See [`Swarm::evaluate`].
    pub fn step<E>(
        &mut self,
        func: &dyn Objective<E>,
        omega: Float,
        c1: Float,
        c2: Float,
        rng: &mut Rng,
    ) -> Result<StepReport, SwarmError<E>> {
        let gbest = self.gbest.x.clone();
        self.swarm.advance(&gbest, omega, c1, c2, rng);
        let evaluations = self.swarm.evaluate(func)?;
        for particle in &mut self.swarm.particles {
            particle.update_best();
        }
        let improved = self.update_global_best();
        if improved {
            self.stagnation_count = 0;
        } else {
            self.stagnation_count += 1;
        }
        self.evaluation_count += evaluations;
        self.iteration_count += 1;
        self.state = SwarmState::Running;
        Ok(StepReport {
            iteration_count: self.iteration_count,
            evaluation_count: self.evaluation_count,
            stagnation_count: self.stagnation_count,
            improved,
        })
    }

    /// Replace the global best with the best personal best if it is strictly better. Returns
    /// `true` if the global best changed.
    pub fn update_global_best(&mut self) -> bool {
        match self.swarm.best_index() {
            Some(i) if self.swarm.particles[i].best.is_better_than(&self.gbest) => {
                self.gbest = self.swarm.particles[i].best.clone();
                true
            }
            _ => false,
        }
    }

    /// Scatter the whole swarm again. The global best survives unless a new particle is strictly
    /// better.
    ///
    /// # Errors
    ///
    /// See [`Swarm::evaluate`].
    pub fn restart<E>(
        &mut self,
        func: &dyn Objective<E>,
        rng: &mut Rng,
    ) -> Result<(), SwarmError<E>> {
        self.evaluation_count += self.swarm.reinitialize(rng, func)?;
        self.update_global_best();
        self.stagnation_count = 0;
        self.restart_count += 1;
        Ok(())
    }

    /// End the run.
    pub fn terminate(&mut self, reason: TerminationReason) {
        self.state = SwarmState::Terminated(reason);
        self.converged = reason.is_converged();
        self.message = reason.to_string();
    }

    /// Get the global best position found by the swarm.
    pub fn get_best(&self) -> Point {
        self.gbest.clone()
    }
}

impl Status for SwarmStatus {
    fn reset(&mut self) {
        *self = Self::default();
    }
    fn converged(&self) -> bool {
        self.converged
    }
    fn message(&self) -> &str {
        &self.message
    }
    fn update_message(&mut self, message: &str) {
        self.message = message.to_string();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_functions::Sphere;
    use crate::DVector;
    use std::convert::Infallible;

    struct Constant(Float);
    impl Objective for Constant {
        fn evaluate(&self, _x: &DVector<Float>) -> Result<Float, Infallible> {
            Ok(self.0)
        }
    }

    fn bounds() -> Bounds {
        Bounds::new(&[-5.0, -5.0], &[5.0, 5.0]).unwrap()
    }

    #[test]
    fn test_initialize_sets_gbest_to_minimum() {
        let mut rng = Rng::with_seed(7);
        let mut status = SwarmStatus::default();
        status
            .initialize(Swarm::new(12), &bounds(), None, &Sphere { n: 2 }, &mut rng)
            .unwrap();
        let min = status
            .swarm
            .particles
            .iter()
            .map(|p| p.best.fx_or_inf())
            .fold(Float::INFINITY, Float::min);
        assert_eq!(status.gbest.fx, Some(min));
        assert_eq!(status.evaluation_count, 12);
        assert_eq!(status.iteration_count, 0);
        assert_eq!(status.state, SwarmState::Initializing);
    }

    #[test]
    fn test_constant_objective_stagnates() {
        let mut rng = Rng::with_seed(1);
        let mut status = SwarmStatus::default();
        let func = Constant(5.0);
        status
            .initialize(Swarm::new(6), &bounds(), None, &func, &mut rng)
            .unwrap();
        for k in 1..=4 {
            let report = status.step(&func, 0.7, 1.2, 1.2, &mut rng).unwrap();
            assert!(!report.improved);
            assert_eq!(report.stagnation_count, k);
            assert_eq!(report.iteration_count, k);
            assert_eq!(report.evaluation_count, 6 * (k + 1));
            assert_eq!(status.gbest.fx, Some(5.0));
        }
        assert_eq!(status.state, SwarmState::Running);
    }

    struct SignedZero;
    impl Objective for SignedZero {
        fn evaluate(&self, x: &DVector<Float>) -> Result<Float, Infallible> {
            Ok(if x[0] < 0.0 { -0.0 } else { 0.0 })
        }
    }

    #[test]
    fn test_signed_zero_is_not_an_improvement() {
        let mut rng = Rng::with_seed(0);
        let mut status = SwarmStatus::default();
        let bounds = Bounds::new(&[-1.0], &[1.0]).unwrap();
        status
            .initialize(
                Swarm::new(1),
                &bounds,
                Some(&[Some(0.5)]),
                &SignedZero,
                &mut rng,
            )
            .unwrap();
        status.swarm.particles[0].velocity = DVector::from_vec(vec![-1.0]);
        let report = status.step(&SignedZero, 1.0, 0.0, 0.0, &mut rng).unwrap();
        assert_eq!(status.swarm.particles[0].position.x[0], -0.5);
        assert!(!report.improved);
        assert_eq!(report.stagnation_count, 1);
        assert_eq!(status.gbest.x[0], 0.5);
        assert!(status.gbest.fx.is_some_and(|fx| fx.is_sign_positive()));
    }

    #[test]
    fn test_restart_keeps_gbest_and_counts() {
        let mut rng = Rng::with_seed(2);
        let mut status = SwarmStatus::default();
        let func = Constant(1.0);
        status
            .initialize(Swarm::new(5), &bounds(), None, &func, &mut rng)
            .unwrap();
        status.step(&func, 0.7, 1.2, 1.2, &mut rng).unwrap();
        let before = status.gbest.clone();
        status.restart(&func, &mut rng).unwrap();
        assert_eq!(status.gbest, before);
        assert_eq!(status.restart_count, 1);
        assert_eq!(status.stagnation_count, 0);
        assert_eq!(status.evaluation_count, 15);
        for particle in &status.swarm.particles {
            assert_eq!(particle.best, particle.position);
        }
    }

    #[test]
    fn test_terminate() {
        let mut status = SwarmStatus::default();
        status.terminate(TerminationReason::Converged);
        assert!(status.converged());
        assert_eq!(
            status.state.termination_reason(),
            Some(TerminationReason::Converged)
        );
        assert!(status.state.is_terminated());
        assert_eq!(status.message(), "converged to the absolute tolerance");
        status.reset();
        assert_eq!(status.state, SwarmState::Initializing);
        assert!(!status.converged());
    }
}
