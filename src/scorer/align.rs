use super::observer::{ScoreEvent, ScoreObserver, Side};
use super::types::AlignmentReport;
use crate::config::ScoringParams;
use crate::skeleton::Frame;

/// Two equal-length frame sequences ready for index-wise comparison.
/// Frames are borrowed from the inputs; looping repeats references.
#[derive(Debug, Clone)]
pub struct AlignedPair<'a> {
    pub reference: Vec<&'a Frame>,
    pub student: Vec<&'a Frame>,
    pub report: AlignmentReport,
}

impl AlignedPair<'_> {
    pub fn len(&self) -> usize {
        self.report.aligned_frames
    }

    pub fn is_empty(&self) -> bool {
        self.report.aligned_frames == 0
    }
}

/// Drops leading frames of whichever side started first.
///
/// A positive `delay_secs` means the student started later. The skip is
/// ignored when it is zero or would consume the whole sequence.
fn apply_delay<'a>(
    reference: &'a [Frame],
    student: &'a [Frame],
    delay_secs: f64,
    params: &ScoringParams,
    report: &mut AlignmentReport,
    observer: &dyn ScoreObserver,
) -> (&'a [Frame], &'a [Frame]) {
    if !delay_secs.is_finite() || delay_secs == 0.0 {
        return (reference, student);
    }

    let skip = params.frames_for(delay_secs);
    let (side, target) = if delay_secs > 0.0 {
        (Side::Student, student)
    } else {
        (Side::Reference, reference)
    };

    if skip == 0 {
        return (reference, student);
    }
    if skip >= target.len() {
        observer.on_event(&ScoreEvent::DelayIgnored {
            side,
            frames: skip,
            available: target.len(),
        });
        return (reference, student);
    }

    let trimmed = &target[skip..];
    observer.on_event(&ScoreEvent::DelayApplied {
        side,
        frames: skip,
        remaining: trimmed.len(),
    });

    match side {
        Side::Student => {
            report.student_dropped = skip;
            (reference, trimmed)
        }
        Side::Reference => {
            report.reference_dropped = skip;
            (trimmed, student)
        }
    }
}

pub fn align<'a>(
    reference: &'a [Frame],
    student: &'a [Frame],
    delay_secs: f64,
    params: &ScoringParams,
    observer: &dyn ScoreObserver,
) -> AlignedPair<'a> {
    let mut report = AlignmentReport::default();
    let (reference, student) = apply_delay(
        reference,
        student,
        delay_secs,
        params,
        &mut report,
        observer,
    );

    let ref_len = reference.len();
    let stu_len = student.len();

    let loop_reference = params.enable_sequence_loop
        && ref_len > 0
        && (stu_len as f64) > (ref_len as f64) * params.loop_threshold;

    let (reference, student): (Vec<&Frame>, Vec<&Frame>) = if loop_reference {
        let repeats = stu_len / ref_len + 1;
        report.loop_repeats = Some(repeats);
        observer.on_event(&ScoreEvent::ReferenceLooped {
            original: ref_len,
            repeats,
            target: stu_len,
        });
        (
            reference.iter().cycle().take(stu_len).collect(),
            student.iter().collect(),
        )
    } else {
        let common = ref_len.min(stu_len);
        (
            reference[..common].iter().collect(),
            student[..common].iter().collect(),
        )
    };

    let frames = reference.len().min(student.len());
    report.aligned_frames = frames;
    observer.on_event(&ScoreEvent::Aligned {
        reference: ref_len,
        student: stu_len,
        frames,
    });

    if frames < params.small_sample_frames {
        observer.on_event(&ScoreEvent::SmallSample {
            frames,
            threshold: params.small_sample_frames,
        });
    }

    AlignedPair {
        reference,
        student,
        report,
    }
}
