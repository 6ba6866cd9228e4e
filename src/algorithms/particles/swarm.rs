use crate::{
    core::{utils::SampleFloat, Bounds, Point, SwarmError},
    traits::Objective,
    DMatrix, DVector, Float,
};
use fastrand::Rng;
use serde::{Deserialize, Serialize};
use tracing::warn;

/// A swarm of particles used in particle swarm optimization.
///
/// A [`Swarm`] doubles as the description of how particles are created and moved: the number of
/// particles, how their positions and velocities are initialized, how they are kept inside the
/// [`Bounds`], and whether the objective is evaluated one particle at a time or in one batch.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Swarm {
    /// The bounds of the search space
    pub bounds: Bounds,
    /// The number of particles
    pub n_particles: usize,
    /// A list of the particles in the swarm
    pub particles: Vec<SwarmParticle>,
    /// The boundary method used by the swarm
    pub boundary_method: SwarmBoundaryMethod,
    /// The position initializer used by the swarm
    pub position_initializer: SwarmPositionInitializer,
    /// The velocity initializer used by the swarm
    pub velocity_initializer: SwarmVelocityInitializer,
    /// The largest velocity component allowed in each dimension, as a fraction of the width of
    /// that dimension's bound (`None` for no limit)
    pub max_velocity: Option<Float>,
    /// Evaluate all particles with a single call to [`Objective::evaluate_batch`]
    pub vectorized: bool,
}

impl Default for Swarm {
    fn default() -> Self {
        Self::new(Self::DEFAULT_N_PARTICLES)
    }
}

impl Swarm {
    const DEFAULT_N_PARTICLES: usize = 40;

    /// Create a new (uninitialized) [`Swarm`] with `n_particles` particles.
    pub fn new(n_particles: usize) -> Self {
        Self {
            bounds: Bounds::default(),
            n_particles,
            particles: Vec::default(),
            boundary_method: SwarmBoundaryMethod::default(),
            position_initializer: SwarmPositionInitializer::default(),
            velocity_initializer: SwarmVelocityInitializer::default(),
            max_velocity: None,
            vectorized: false,
        }
    }
    /// Sets the number of particles in the swarm (default = `40`).
    pub const fn with_n_particles(mut self, value: usize) -> Self {
        self.n_particles = value;
        self
    }
    /// Sets the boundary method used by the swarm (default = [`SwarmBoundaryMethod::ClampAndZero`]).
    pub const fn with_boundary_method(mut self, value: SwarmBoundaryMethod) -> Self {
        self.boundary_method = value;
        self
    }
    /// Sets the [`SwarmPositionInitializer`] (default = [`SwarmPositionInitializer::Uniform`]).
    pub const fn with_position_initializer(mut self, value: SwarmPositionInitializer) -> Self {
        self.position_initializer = value;
        self
    }
    /// Sets the [`SwarmVelocityInitializer`] (default = [`SwarmVelocityInitializer::Zero`]).
    pub const fn with_velocity_initializer(mut self, value: SwarmVelocityInitializer) -> Self {
        self.velocity_initializer = value;
        self
    }
    /// Limits each velocity component to `fraction` times the width of its bound.
    ///
    /// # Panics
    ///
    /// This method will panic if `fraction <= 0`.
    pub fn with_max_velocity(mut self, fraction: Float) -> Self {
        assert!(fraction > 0.0);
        self.max_velocity = Some(fraction);
        self
    }
    /// Evaluate the whole swarm with one call to [`Objective::evaluate_batch`] (default = `false`).
    pub const fn with_vectorized(mut self, value: bool) -> Self {
        self.vectorized = value;
        self
    }

    /// Create the particles of the swarm inside `bounds` and evaluate them.
    ///
    /// Positions come from the [`SwarmPositionInitializer`] and velocities from the
    /// [`SwarmVelocityInitializer`]. If a `seed_position` is given, every coordinate which is not
    /// `None` replaces the corresponding coordinate of the first particle (clamped into the
    /// bounds). Returns the number of objective evaluations performed.
    ///
    /// # Errors
    ///
    /// Returns [`SwarmError::InvalidSwarmSize`] if the swarm has no particles,
    /// [`SwarmError::DimensionMismatch`] if the seed position does not match the bounds, and
    /// any error produced by the objective.
    pub fn initialize<E>(
        &mut self,
        rng: &mut Rng,
        bounds: &Bounds,
        seed_position: Option<&[Option<Float>]>,
        func: &dyn Objective<E>,
    ) -> Result<usize, SwarmError<E>> {
        if self.n_particles < 1 {
            return Err(SwarmError::InvalidSwarmSize(self.n_particles));
        }
        if let Some(seed) = seed_position {
            SwarmError::check_dimension(bounds.dimension(), seed.len())?;
        }
        self.bounds = bounds.clone();
        let mut positions = self
            .position_initializer
            .init_positions(rng, &self.bounds, self.n_particles);
        if let (Some(seed), Some(first)) = (seed_position, positions.first_mut()) {
            for (xi, si) in first.iter_mut().zip(seed) {
                if let Some(si) = si {
                    *xi = *si;
                }
            }
            let clamped = self.bounds.clamp(first);
            if clamped != *first {
                warn!("seed position lies outside the bounds and was clamped");
            }
            *first = clamped;
        }
        self.spawn(rng, positions, func)
    }

    /// Scatter every particle again with the configured initializers, forgetting all personal
    /// bests. Returns the number of objective evaluations performed.
    ///
    /// # Errors
    ///
    /// Returns any error produced by the objective.
    pub fn reinitialize<E>(
        &mut self,
        rng: &mut Rng,
        func: &dyn Objective<E>,
    ) -> Result<usize, SwarmError<E>> {
        let positions = self
            .position_initializer
            .init_positions(rng, &self.bounds, self.n_particles);
        self.spawn(rng, positions, func)
    }

    fn spawn<E>(
        &mut self,
        rng: &mut Rng,
        positions: Vec<DVector<Float>>,
        func: &dyn Objective<E>,
    ) -> Result<usize, SwarmError<E>> {
        let velocities = self
            .velocity_initializer
            .init_velocities(rng, &self.bounds, self.n_particles);
        self.particles = positions
            .into_iter()
            .zip(velocities)
            .map(|(position, velocity)| SwarmParticle::new(position, velocity))
            .collect();
        let evaluations = self.evaluate(func)?;
        for particle in &mut self.particles {
            particle.best = particle.position.clone();
        }
        Ok(evaluations)
    }

    /// Evaluate the objective at every particle's current position, either one particle at a
    /// time or with a single batch call. Returns the number of evaluations performed.
    ///
    /// # Errors
    ///
    /// Returns any error produced by the objective, or [`SwarmError::DimensionMismatch`] if a
    /// batch evaluation returns the wrong number of values.
    pub fn evaluate<E>(&mut self, func: &dyn Objective<E>) -> Result<usize, SwarmError<E>> {
        let n = self.particles.len();
        if self.vectorized {
            let dimension = self.bounds.dimension();
            let xs = DMatrix::from_fn(n, dimension, |i, j| self.particles[i].position.x[j]);
            let fxs = func
                .evaluate_batch(&xs)
                .map_err(SwarmError::ObjectiveEvaluation)?;
            SwarmError::check_dimension(n, fxs.len())?;
            for (particle, fx) in self.particles.iter_mut().zip(fxs) {
                particle.position.fx = Some(fx);
            }
        } else {
            for particle in &mut self.particles {
                particle
                    .position
                    .evaluate(func)
                    .map_err(SwarmError::ObjectiveEvaluation)?;
            }
        }
        Ok(n)
    }

    /// Move every particle one step, given the global best position and the update
    /// coefficients. Particles are visited in order and each draws its random numbers as
    /// `(dimension, r1 then r2)`. The new positions are left unevaluated.
    pub fn advance(
        &mut self,
        gbest: &DVector<Float>,
        omega: Float,
        c1: Float,
        c2: Float,
        rng: &mut Rng,
    ) {
        let velocity_limits: Option<Vec<Float>> = self
            .max_velocity
            .map(|fraction| self.bounds.iter().map(|b| fraction * b.width()).collect());
        for particle in &mut self.particles {
            particle.update_velocity(gbest, omega, c1, c2, velocity_limits.as_deref(), rng);
            particle.update_position(&self.bounds, self.boundary_method);
        }
    }

    /// The index of the particle with the lowest personal best (the first one on ties).
    pub fn best_index(&self) -> Option<usize> {
        let mut best: Option<usize> = None;
        for (i, particle) in self.particles.iter().enumerate() {
            match best {
                Some(b) if !particle.best.is_better_than(&self.particles[b].best) => {}
                _ => best = Some(i),
            }
        }
        best
    }

    /// The largest Euclidean distance from any particle's current position to `x`.
    pub fn max_distance_to(&self, x: &DVector<Float>) -> Float {
        self.particles
            .iter()
            .map(|p| (&p.position.x - x).norm())
            .fold(0.0, Float::max)
    }
}

/// Methods for handling particles which would leave the bounds.
///
/// Positions are always clamped onto the violated bound. The methods differ in what happens to
/// the velocity component along the clamped dimension.
#[derive(Clone, Copy, Default, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum SwarmBoundaryMethod {
    /// Clamp the position and keep the velocity
    Clamp,
    #[default]
    /// Clamp the position and set the velocity component to zero
    ClampAndZero,
    /// Clamp the position and negate the velocity component
    ClampAndReflect,
}

/// Methods to initialize the positions of particles in a swarm.
#[derive(Clone, Copy, Default, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum SwarmPositionInitializer {
    /// Uniform random distribution within the bounds
    #[default]
    Uniform,
    /// Latin Hypercube sampling within the bounds
    LatinHypercube,
}
impl SwarmPositionInitializer {
    /// Initialize the positions of `n_particles` particles inside `bounds`.
    pub fn init_positions(
        &self,
        rng: &mut Rng,
        bounds: &Bounds,
        n_particles: usize,
    ) -> Vec<DVector<Float>> {
        match self {
            Self::Uniform => (0..n_particles).map(|_| bounds.sample(rng)).collect(),
            Self::LatinHypercube => {
                let dimension = bounds.dimension();
                let mut lhs_matrix = vec![DVector::zeros(dimension); n_particles];
                for (d, bound) in bounds.iter().enumerate() {
                    let mut bins: Vec<usize> = (0..n_particles).collect();
                    rng.shuffle(&mut bins);
                    let bin_size = bound.width() / n_particles as Float;
                    for (i, &bin) in bins.iter().enumerate() {
                        let lower = bound.lower() + bin as Float * bin_size;
                        lhs_matrix[i][d] = bound.clamp(rng.range(lower, lower + bin_size));
                    }
                }
                lhs_matrix
            }
        }
    }
}

/// Methods for setting the initial velocity of particles in a swarm
#[derive(Clone, Copy, Default, Debug, Serialize, Deserialize, PartialEq)]
pub enum SwarmVelocityInitializer {
    /// Initialize all velocities to zero
    #[default]
    Zero,
    /// Initialize each velocity component uniformly in `±fraction` times the width of its bound
    RandomFraction(Float),
}
impl SwarmVelocityInitializer {
    /// Initialize the velocities of `n_particles` particles in the space described by `bounds`.
    pub fn init_velocities(
        &self,
        rng: &mut Rng,
        bounds: &Bounds,
        n_particles: usize,
    ) -> Vec<DVector<Float>> {
        match self {
            Self::Zero => (0..n_particles)
                .map(|_| DVector::zeros(bounds.dimension()))
                .collect(),
            Self::RandomFraction(fraction) => (0..n_particles)
                .map(|_| {
                    DVector::from_iterator(
                        bounds.dimension(),
                        bounds.iter().map(|b| {
                            let v = fraction * b.width();
                            rng.range(-v, v)
                        }),
                    )
                })
                .collect(),
        }
    }
}

/// A particle with a position, velocity, and best known position
#[derive(Clone, Debug, Serialize, Deserialize, Default, PartialEq)]
pub struct SwarmParticle {
    /// The current position of the particle
    pub position: Point,
    /// The velocity of the particle
    pub velocity: DVector<Float>,
    /// The best position of the particle (as measured by the minimum value of `fx`)
    pub best: Point,
}
impl SwarmParticle {
    /// Create a new, unevaluated particle.
    pub fn new(position: DVector<Float>, velocity: DVector<Float>) -> Self {
        let position = Point::from(position);
        Self {
            best: position.clone(),
            position,
            velocity,
        }
    }
    /// Apply the velocity update
    ///
    /// ```math
    /// v_i \leftarrow \omega v_i + c_1 r_1 (p_i - x_i) + c_2 r_2 (g_i - x_i)
    /// ```
    /// drawing a fresh `r1` and then `r2` for every dimension. If `velocity_limits` are given,
    /// each component is then clamped to `±limit`.
    pub fn update_velocity(
        &mut self,
        gbest: &DVector<Float>,
        omega: Float,
        c1: Float,
        c2: Float,
        velocity_limits: Option<&[Float]>,
        rng: &mut Rng,
    ) {
        for i in 0..self.velocity.len() {
            let r1 = rng.float();
            let r2 = rng.float();
            let x = self.position.x[i];
            let mut v = omega * self.velocity[i]
                + c1 * r1 * (self.best.x[i] - x)
                + c2 * r2 * (gbest[i] - x);
            if let Some(limits) = velocity_limits {
                v = v.clamp(-limits[i], limits[i]);
            }
            self.velocity[i] = v;
        }
    }
    /// Move the particle along its velocity and clamp it into `bounds`, correcting the
    /// velocity of clamped coordinates according to `boundary_method`. The new position is left
    /// unevaluated.
    pub fn update_position(&mut self, bounds: &Bounds, boundary_method: SwarmBoundaryMethod) {
        let mut new_position = &self.position.x + &self.velocity;
        for (i, bound) in bounds.iter().enumerate() {
            let clamped = bound.clamp(new_position[i]);
            if clamped != new_position[i] {
                match boundary_method {
                    SwarmBoundaryMethod::Clamp => {}
                    SwarmBoundaryMethod::ClampAndZero => self.velocity[i] = 0.0,
                    SwarmBoundaryMethod::ClampAndReflect => self.velocity[i] = -self.velocity[i],
                }
                new_position[i] = clamped;
            }
        }
        self.position.set_position(new_position);
    }
    /// Replace the personal best with the current position if it is strictly better. Returns
    /// `true` if the personal best changed.
    pub fn update_best(&mut self) -> bool {
        if self.position.is_better_than(&self.best) {
            self.best = self.position.clone();
            true
        } else {
            false
        }
    }
}
