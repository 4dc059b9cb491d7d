use comfy_table::presets::ASCII_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use kinescore::config::ScoringParams;
use kinescore::consts::{BAND_EXCELLENT, BAND_FAIR, BAND_GOOD};
use kinescore::joints::JointTable;
use kinescore::scorer::ScoreResult;

fn score_color(score: f64) -> Color {
    if score >= BAND_EXCELLENT {
        Color::Green
    } else if score >= BAND_GOOD {
        Color::Cyan
    } else if score >= BAND_FAIR {
        Color::Yellow
    } else {
        Color::Red
    }
}

fn right_align(table: &mut Table, cols: std::ops::RangeInclusive<usize>) {
    for i in cols {
        if let Some(col) = table.column_mut(i) {
            col.set_cell_alignment(CellAlignment::Right);
        }
    }
}

pub fn print_joint_table(joints: &JointTable) {
    let mut table = Table::new();
    table
        .load_preset(ASCII_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);

    table.add_row(vec![
        Cell::new("Joint").add_attribute(Attribute::Bold),
        Cell::new("A"),
        Cell::new("Vertex"),
        Cell::new("C"),
        Cell::new("Weight"),
        Cell::new("Region"),
    ]);

    for def in joints {
        table.add_row(vec![
            Cell::new(def.display_name()).add_attribute(Attribute::Bold),
            Cell::new(def.points.0.to_string()),
            Cell::new(def.points.1.to_string()),
            Cell::new(def.points.2.to_string()),
            Cell::new(format!("{:.1}", def.weight)),
            Cell::new(def.region.label()),
        ]);
    }
    right_align(&mut table, 4..=4);
    println!("\n{}", table);
}

pub fn print_joint_report(joints: &JointTable, result: &ScoreResult) {
    let mut table = Table::new();
    table
        .load_preset(ASCII_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);

    table.add_row(vec![
        Cell::new("Joint").add_attribute(Attribute::Bold),
        Cell::new("Weight"),
        Cell::new("Valid"),
        Cell::new("Avg Dev"),
        Cell::new("Score").fg(Color::Cyan),
    ]);

    let aligned = result.quality.aligned_frames;
    for def in joints {
        let Some(stat) = result.joint_stats.get(&def.name) else {
            continue;
        };
        let dev = match stat.avg_deviation {
            Some(d) => format!("{:.1}°", d),
            None => "-".to_string(),
        };
        table.add_row(vec![
            Cell::new(def.display_name()).add_attribute(Attribute::Bold),
            Cell::new(format!("{:.1}", def.weight)),
            Cell::new(format!("{}/{}", stat.valid_frames, aligned)),
            Cell::new(dev),
            Cell::new(format!("{:.2}", stat.score)).fg(score_color(stat.score)),
        ]);
    }
    right_align(&mut table, 1..=4);
    println!("\n{}", table);
}

/// Condenses the frame timeline into one row per second of footage.
pub fn print_timeline(result: &ScoreResult, params: &ScoringParams) {
    if result.frame_scores.is_empty() {
        return;
    }

    let mut table = Table::new();
    table
        .load_preset(ASCII_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);

    table.add_row(vec![
        Cell::new("Time").add_attribute(Attribute::Bold),
        Cell::new("Frames"),
        Cell::new("Min"),
        Cell::new("Avg"),
        Cell::new("Max"),
    ]);

    let per_bucket = (params.sample_rate.round() as usize).max(1);
    for chunk in result.frame_scores.chunks(per_bucket) {
        let first = &chunk[0];
        let last = &chunk[chunk.len() - 1];
        let min = chunk.iter().map(|f| f.score).fold(f64::MAX, f64::min);
        let max = chunk.iter().map(|f| f.score).fold(f64::MIN, f64::max);
        let avg = chunk.iter().map(|f| f.score).sum::<f64>() / chunk.len() as f64;

        table.add_row(vec![
            Cell::new(format!("{:.2}s", first.timestamp)),
            Cell::new(format!("{}-{}", first.frame_index, last.frame_index)),
            Cell::new(format!("{:.1}", min)),
            Cell::new(format!("{:.1}", avg)).fg(score_color(avg)),
            Cell::new(format!("{:.1}", max)),
        ]);
    }
    right_align(&mut table, 2..=4);
    println!("\n{}", table);
}

pub fn print_summary(result: &ScoreResult) {
    let q = &result.quality;
    let a = &result.alignment;

    let mut table = Table::new();
    table
        .load_preset(ASCII_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);

    table.add_row(vec![
        Cell::new("TOTAL SCORE").add_attribute(Attribute::Bold),
        Cell::new(format!("{:.2}", result.total_score))
            .fg(score_color(result.total_score))
            .add_attribute(Attribute::Bold),
    ]);
    table.add_row(vec![
        Cell::new("Aligned frames"),
        Cell::new(q.aligned_frames.to_string()),
    ]);
    let valid = format!("{} ({:.0}%)", q.valid_frames, q.valid_ratio * 100.0);
    table.add_row(vec![Cell::new("Valid frames"), Cell::new(valid)]);
    table.add_row(vec![
        Cell::new("Dropped (ref / student)"),
        Cell::new(format!("{} / {}", a.reference_dropped, a.student_dropped)),
    ]);
    if let Some(repeats) = a.loop_repeats {
        table.add_row(vec![
            Cell::new("Reference looped"),
            Cell::new(format!("x{}", repeats)),
        ]);
    }
    if q.capped {
        table.add_row(vec![
            Cell::new("Valid-ratio cap").fg(Color::Red),
            Cell::new("applied").fg(Color::Red),
        ]);
    }
    if q.small_sample {
        table.add_row(vec![
            Cell::new("Small sample").fg(Color::Yellow),
            Cell::new("yes").fg(Color::Yellow),
        ]);
    }
    right_align(&mut table, 1..=1);
    println!("\n{}", table);
}

pub fn print_feedback(result: &ScoreResult) {
    println!();
    for line in &result.feedback {
        println!("{}", line);
    }
}
