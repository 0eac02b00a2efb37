//! # Cellarium
//!
//! A tick-driven ecosystem of autonomous "cell" agents wandering a bounded
//! 3D volume. Each cell carries an immutable randomized trait set, plans its
//! own random-walk motion as eased transitions, probes its surroundings with
//! a fixed fan of rays against a spatial index, and reproduces when it
//! collides with a compatible partner.
//!
//! The simulation is deliberately simple mechanically:
//! - **Single-threaded, cooperative ticks**: the ecosystem updates every
//!   cell sequentially, once per tick.
//! - **Deterministic when seeded**: all randomness flows through one
//!   `ChaCha8Rng`, so a fixed seed reproduces a run exactly.
//! - **Detection never mutates**: the collision/sight pass runs over an
//!   immutable snapshot and emits commands that are applied afterwards.
//!
//! Rendering is out of scope; cells expose drawable state only (position,
//! a two-point path trail with a dirty flag, and a mutable display color).

pub mod model;

pub use glam::DVec3;
