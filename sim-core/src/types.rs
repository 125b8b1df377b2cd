/// Identifier for a particle in a [`crate::pool::ParticlePool`].
///
/// This is an index into `ParticlePool::particles`, and is only meaningful
/// until the pool is regenerated (every resize discards the old pool).
pub type ParticleId = usize;
