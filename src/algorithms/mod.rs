/// Module containing particle swarm methods.
pub mod particles;
