use crate::error::{KineScoreError, KsResult};
use clap::{parser::ValueSource, ArgAction, ArgMatches, Args};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Args, Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringParams {
    // === SAMPLING ===
    /// Frames per second both pose tracks were sampled at.
    #[arg(long, default_value_t = 6.0)]
    pub sample_rate: f64,

    // === FILTERING ===
    #[arg(long, default_value_t = 0.3)]
    pub confidence_threshold: f64,

    // === SCORING ===
    /// Points deducted per degree of average angular deviation.
    #[arg(long, default_value_t = 1.2)]
    pub angle_penalty: f64,
    #[arg(long, default_value_t = 30.0)]
    pub never_valid_score: f64,

    // === DATA QUALITY ===
    #[arg(long, default_value_t = 0.5)]
    pub min_valid_ratio: f64,
    #[arg(long, default_value_t = 50.0)]
    pub invalid_cap_score: f64,
    #[arg(long, default_value_t = 0.5)]
    pub low_data_ratio: f64,
    #[arg(long, default_value_t = 30)]
    pub small_sample_frames: usize,

    // === LOOPING ===
    #[arg(long, default_value_t = true, action = ArgAction::Set)]
    pub enable_sequence_loop: bool,
    #[arg(long, default_value_t = 1.5)]
    pub loop_threshold: f64,
}

impl Default for ScoringParams {
    fn default() -> Self {
        Self {
            sample_rate: 6.0,
            confidence_threshold: 0.3,
            angle_penalty: 1.2,
            never_valid_score: 30.0,
            min_valid_ratio: 0.5,
            invalid_cap_score: 50.0,
            low_data_ratio: 0.5,
            small_sample_frames: 30,
            enable_sequence_loop: true,
            loop_threshold: 1.5,
        }
    }
}

impl ScoringParams {
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> KsResult<Self> {
        let content = fs::read_to_string(path)?;
        let params: Self = serde_json::from_str(&content)?;
        params.validate()?;
        Ok(params)
    }

    pub fn validate(&self) -> KsResult<()> {
        if !(self.sample_rate.is_finite() && self.sample_rate > 0.0) {
            return Err(KineScoreError::Config(format!(
                "sample_rate must be positive, got {}",
                self.sample_rate
            )));
        }

        let ratios = [
            ("confidence_threshold", self.confidence_threshold),
            ("min_valid_ratio", self.min_valid_ratio),
            ("low_data_ratio", self.low_data_ratio),
        ];
        for (name, value) in ratios {
            if !(0.0..=1.0).contains(&value) {
                return Err(KineScoreError::Config(format!(
                    "{} must lie in [0, 1], got {}",
                    name, value
                )));
            }
        }

        if !(self.angle_penalty.is_finite() && self.angle_penalty >= 0.0) {
            return Err(KineScoreError::Config(format!(
                "angle_penalty must be non-negative, got {}",
                self.angle_penalty
            )));
        }

        if !(self.loop_threshold.is_finite() && self.loop_threshold >= 1.0) {
            return Err(KineScoreError::Config(format!(
                "loop_threshold must be at least 1.0, got {}",
                self.loop_threshold
            )));
        }

        for (name, value) in [
            ("never_valid_score", self.never_valid_score),
            ("invalid_cap_score", self.invalid_cap_score),
        ] {
            if !(0.0..=100.0).contains(&value) {
                return Err(KineScoreError::Config(format!(
                    "{} must lie in [0, 100], got {}",
                    name, value
                )));
            }
        }

        Ok(())
    }

    /// Number of leading frames covered by `seconds` at the configured rate.
    #[inline]
    pub fn frames_for(&self, seconds: f64) -> usize {
        (seconds.abs() * self.sample_rate).round() as usize
    }

    #[inline]
    pub fn timestamp_for(&self, frame_index: usize) -> f64 {
        frame_index as f64 / self.sample_rate
    }

    /// Overwrites fields with values the user typed on the command line,
    /// leaving file-loaded values in place for everything left at default.
    pub fn merge_from_cli(&mut self, cli_params: &ScoringParams, matches: &ArgMatches) {
        macro_rules! update_if_present {
            ($field:ident, $arg_name:expr) => {
                if matches.value_source($arg_name) == Some(ValueSource::CommandLine) {
                    self.$field = cli_params.$field.clone();
                }
            };
        }

        update_if_present!(sample_rate, "sample_rate");
        update_if_present!(confidence_threshold, "confidence_threshold");
        update_if_present!(angle_penalty, "angle_penalty");
        update_if_present!(never_valid_score, "never_valid_score");
        update_if_present!(min_valid_ratio, "min_valid_ratio");
        update_if_present!(invalid_cap_score, "invalid_cap_score");
        update_if_present!(low_data_ratio, "low_data_ratio");
        update_if_present!(small_sample_frames, "small_sample_frames");
        update_if_present!(enable_sequence_loop, "enable_sequence_loop");
        update_if_present!(loop_threshold, "loop_threshold");
    }
}
