//! Structured events emitted while scoring. The scoring core never logs on
//! its own; callers that want diagnostics pass an observer.

use strum_macros::Display;
use tracing::{debug, info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "snake_case")]
pub enum Side {
    Reference,
    Student,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ScoreEvent {
    DelayApplied {
        side: Side,
        frames: usize,
        remaining: usize,
    },
    DelayIgnored {
        side: Side,
        frames: usize,
        available: usize,
    },
    ReferenceLooped {
        original: usize,
        repeats: usize,
        target: usize,
    },
    Aligned {
        reference: usize,
        student: usize,
        frames: usize,
    },
    SmallSample {
        frames: usize,
        threshold: usize,
    },
    JointSummary {
        joint: String,
        valid_frames: usize,
        aligned_frames: usize,
        avg_deviation: Option<f64>,
        score: f64,
    },
    ValidRatioCapped {
        ratio: f64,
        minimum: f64,
        uncapped: f64,
        cap: f64,
    },
    Completed {
        total_score: f64,
        valid_frames: usize,
        aligned_frames: usize,
    },
}

pub trait ScoreObserver: Sync {
    fn on_event(&self, event: &ScoreEvent);
}

/// Discards every event.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopObserver;

impl ScoreObserver for NoopObserver {
    #[inline(always)]
    fn on_event(&self, _event: &ScoreEvent) {}
}

/// Forwards events to `tracing`.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingObserver;

impl ScoreObserver for TracingObserver {
    fn on_event(&self, event: &ScoreEvent) {
        match event {
            ScoreEvent::DelayApplied {
                side,
                frames,
                remaining,
            } => info!(%side, frames, remaining, "dropped leading frames for start offset"),
            ScoreEvent::DelayIgnored {
                side,
                frames,
                available,
            } => warn!(
                %side,
                frames,
                available,
                "start offset exceeds sequence length, offset ignored"
            ),
            ScoreEvent::ReferenceLooped {
                original,
                repeats,
                target,
            } => info!(original, repeats, target, "looped reference sequence"),
            ScoreEvent::Aligned {
                reference,
                student,
                frames,
            } => info!(reference, student, frames, "sequences aligned"),
            ScoreEvent::SmallSample { frames, threshold } => {
                warn!(frames, threshold, "small sample, score may be unreliable")
            }
            ScoreEvent::JointSummary {
                joint,
                valid_frames,
                aligned_frames,
                avg_deviation,
                score,
            } => debug!(
                joint = joint.as_str(),
                valid_frames,
                aligned_frames,
                avg_deviation = avg_deviation.unwrap_or(f64::NAN),
                score,
                "joint scored"
            ),
            ScoreEvent::ValidRatioCapped {
                ratio,
                minimum,
                uncapped,
                cap,
            } => warn!(ratio, minimum, uncapped, cap, "total score capped"),
            ScoreEvent::Completed {
                total_score,
                valid_frames,
                aligned_frames,
            } => info!(total_score, valid_frames, aligned_frames, "scored"),
        }
    }
}
