pub mod align;
pub mod angles;
pub mod engine;
pub mod feedback;
pub mod observer;
pub mod types;
pub mod validator;

pub use self::align::AlignedPair;
pub use self::observer::{NoopObserver, ScoreEvent, ScoreObserver, TracingObserver};
pub use self::types::{AlignmentReport, DataQuality, FrameScore, JointStat, ScoreResult};

use self::engine::round_report;
use crate::config::ScoringParams;
use crate::error::KsResult;
use crate::joints::JointTable;
use crate::skeleton::Frame;
use std::collections::BTreeMap;
use typed_builder::TypedBuilder;

/// Compares a student performance against a reference performance.
///
/// Holds only immutable configuration, so one instance can score any number
/// of pairs, from any number of threads.
///
/// `Scorer::builder()` does not check the parameters. Call [`Scorer::validate`]
/// on a built scorer, or use [`Scorer::new`], which does.
#[derive(Debug, Clone, TypedBuilder)]
pub struct Scorer {
    #[builder(default)]
    pub params: ScoringParams,
    #[builder(default)]
    pub joints: JointTable,
}

impl Scorer {
    pub fn new(params: ScoringParams, joints: JointTable) -> KsResult<Self> {
        let scorer = Self::builder().params(params).joints(joints).build();
        scorer.validate()?;
        Ok(scorer)
    }

    pub fn validate(&self) -> KsResult<()> {
        self.params.validate()
    }

    pub fn score(&self, reference: &[Frame], student: &[Frame], delay_secs: f64) -> ScoreResult {
        self.score_observed(reference, student, delay_secs, &NoopObserver)
    }

    pub fn score_observed(
        &self,
        reference: &[Frame],
        student: &[Frame],
        delay_secs: f64,
        observer: &dyn ScoreObserver,
    ) -> ScoreResult {
        let pair = align::align(reference, student, delay_secs, &self.params, observer);
        self.score_aligned(&pair, observer)
    }

    /// Scores an already aligned pair.
    pub fn score_aligned(
        &self,
        pair: &AlignedPair<'_>,
        observer: &dyn ScoreObserver,
    ) -> ScoreResult {
        let params = &self.params;
        let table = &self.joints;
        let aligned_frames = pair.len();

        let evals = engine::evaluate_pair(pair, table, params.confidence_threshold);
        let valid_frames = evals.iter().filter(|e| e.any_valid()).count();

        let accums = engine::joints::accumulate(&evals, table.len());
        let stats = engine::joints::joint_stats(&accums, params);
        let uncapped = engine::joints::weighted_total(&stats, table);
        let gate =
            engine::joints::apply_valid_ratio_gate(uncapped, valid_frames, aligned_frames, params);

        if gate.capped && aligned_frames > 0 {
            observer.on_event(&ScoreEvent::ValidRatioCapped {
                ratio: gate.valid_ratio,
                minimum: params.min_valid_ratio,
                uncapped,
                cap: params.invalid_cap_score,
            });
        }

        let frame_scores = engine::frames::timeline(&evals, table, params);

        let quality = DataQuality {
            aligned_frames,
            valid_frames,
            valid_ratio: round_report(gate.valid_ratio),
            small_sample: aligned_frames < params.small_sample_frames,
            capped: gate.capped,
        };

        let feedback = feedback::generate(table, &stats, &quality, params);

        let mut joint_scores = BTreeMap::new();
        let mut joint_stats = BTreeMap::new();
        for (def, stat) in table.iter().zip(&stats) {
            observer.on_event(&ScoreEvent::JointSummary {
                joint: def.name.clone(),
                valid_frames: stat.valid_frames,
                aligned_frames,
                avg_deviation: stat.avg_deviation,
                score: stat.score,
            });
            joint_scores.insert(def.name.clone(), round_report(stat.score));
            joint_stats.insert(
                def.name.clone(),
                JointStat {
                    valid_frames: stat.valid_frames,
                    avg_deviation: stat.avg_deviation.map(round_report),
                    score: round_report(stat.score),
                },
            );
        }

        let total_score = round_report(gate.total);
        observer.on_event(&ScoreEvent::Completed {
            total_score,
            valid_frames,
            aligned_frames,
        });

        ScoreResult {
            total_score,
            joint_scores,
            frame_scores,
            feedback,
            quality,
            alignment: pair.report,
            joint_stats,
        }
    }
}

impl Default for Scorer {
    fn default() -> Self {
        Self::builder().build()
    }
}
