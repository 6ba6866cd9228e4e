/// Implementation of Particle Swarm Optimization (PSO) algorithm
pub mod pso;
pub use pso::{Inertia, PSOConfig, PSO};

/// [`Swarm`] type for swarm-based optimizers.
pub mod swarm;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
pub use swarm::{
    Swarm, SwarmBoundaryMethod, SwarmParticle, SwarmPositionInitializer, SwarmVelocityInitializer,
};

/// [`SwarmStatus`] type for swarm-based optimizers.
pub mod swarm_status;
pub use swarm_status::{StepReport, SwarmState, SwarmStatus};

use crate::{core::Point, traits::Observer};
use std::sync::Arc;

/// An [`Observer`] which stores the swarm particles' history as well as the
/// history of global best positions.
#[derive(Serialize, Deserialize, Default, Clone)]
pub struct TrackingSwarmObserver {
    /// The history of the swarm particles
    pub history: Vec<Vec<SwarmParticle>>,
    /// The history of the best position in the swarm
    pub best_history: Vec<Point>,
}

impl TrackingSwarmObserver {
    /// Finalize the [`Observer`] by wrapping it in an [`Arc`] and [`RwLock`], so the history can
    /// be read after it has been handed to [`Callbacks`](crate::core::Callbacks).
    pub fn build() -> Arc<RwLock<Self>> {
        Arc::new(RwLock::new(Self::default()))
    }
}

impl Observer<SwarmStatus> for TrackingSwarmObserver {
    fn observe(&mut self, _current_step: usize, status: &SwarmStatus) {
        self.history.push(status.swarm.particles.clone());
        self.best_history.push(status.get_best());
    }
}
