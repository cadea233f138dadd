//! Renderer boundary
//!
//! A [`FrameSink`] receives the field once per frame after the step has
//! completed. It only gets a shared borrow, so it cannot observe a partially
//! advanced field or mutate particles. Sinks that keep data past the call
//! copy it into a [`FieldSnapshot`].

use crate::simulation::states::{FieldSnapshot, ParticleField, Particle, NVec3};

pub trait FrameSink {
    fn consume(&mut self, frame: u64, field: &ParticleField);
}

/// Summary of the disk's radial spread
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldStats {
    pub min_distance: f64,
    pub mean_distance: f64,
    pub max_distance: f64,
    pub mean_speed: f64,
}

impl FieldStats {
    /// `None` for an empty slice
    pub fn from_particles(center: &NVec3, particles: &[Particle]) -> Option<Self> {
        if particles.is_empty() {
            return None;
        }

        let mut min = f64::INFINITY;
        let mut max = 0.0f64;
        let mut sum_d = 0.0;
        let mut sum_v = 0.0;
        for p in particles {
            let d = (p.x - center).norm();
            min = min.min(d);
            max = max.max(d);
            sum_d += d;
            sum_v += p.v.norm();
        }
        let n = particles.len() as f64;

        Some(Self {
            min_distance: min,
            mean_distance: sum_d / n,
            max_distance: max,
            mean_speed: sum_v / n,
        })
    }

    pub fn of(field: &ParticleField) -> Self {
        // fields are never empty
        Self::from_particles(&field.center(), field.particles()).unwrap_or(Self {
            min_distance: 0.0,
            mean_distance: 0.0,
            max_distance: 0.0,
            mean_speed: 0.0,
        })
    }
}

/// Logs field statistics every `every` frames
pub struct StatsSink {
    every: u64,
    last: Option<FieldStats>,
}

impl StatsSink {
    pub fn new(every: u64) -> Self {
        Self { every: every.max(1), last: None }
    }

    pub fn last(&self) -> Option<FieldStats> {
        self.last
    }
}

impl FrameSink for StatsSink {
    fn consume(&mut self, frame: u64, field: &ParticleField) {
        if frame % self.every != 0 {
            return;
        }
        let stats = FieldStats::of(field);
        tracing::info!(
            frame,
            t = field.t(),
            min_r = stats.min_distance,
            mean_r = stats.mean_distance,
            max_r = stats.max_distance,
            mean_speed = stats.mean_speed,
            "disk"
        );
        self.last = Some(stats);
    }
}

/// Double-buffered snapshots: the front copy stays readable while the back
/// one is refreshed from the next frame
#[derive(Debug, Default)]
pub struct SnapshotSink {
    front: FieldSnapshot,
    back: FieldSnapshot,
    frames: u64,
}

impl SnapshotSink {
    pub fn front(&self) -> &FieldSnapshot {
        &self.front
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }
}

impl FrameSink for SnapshotSink {
    fn consume(&mut self, _frame: u64, field: &ParticleField) {
        self.back.refresh(field);
        std::mem::swap(&mut self.front, &mut self.back);
        self.frames += 1;
    }
}
