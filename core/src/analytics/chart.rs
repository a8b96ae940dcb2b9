use serde::{Deserialize, Serialize};

use crate::analytics::frequency::RankedLabel;

/// Slice colours by rank; wraps around when there are more slices.
pub const PALETTE: [&str; 6] = [
    "#FF6384", "#36A2EB", "#FFCE56", "#4BC0C0", "#9966FF", "#FF9F40",
];

pub const GOT_COLOR: &str = "#4CAF50";
pub const RECEIVED_COLOR: &str = "#f44336";

pub const START_ANGLE: f64 = -90.0;

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct PieSlice {
    pub label: String,
    pub value: usize,
    pub color: &'static str,
}

/// Circle the arcs are placed on, in renderer units.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct ChartFrame {
    pub cx: f64,
    pub cy: f64,
    pub radius: f64,
}

impl ChartFrame {
    /// Ring of `size` x `size` with a stroke of `stroke_width` drawn inside it.
    pub fn ring(size: f64, stroke_width: f64) -> Self {
        Self {
            cx: size / 2.0,
            cy: size / 2.0,
            radius: (size - stroke_width) / 2.0,
        }
    }

    pub fn point_at(&self, degrees: f64) -> Point {
        let theta = degrees.to_radians();
        Point {
            x: self.cx + self.radius * theta.cos(),
            y: self.cy + self.radius * theta.sin(),
        }
    }
}

impl Default for ChartFrame {
    fn default() -> Self {
        Self::ring(120.0, 12.0)
    }
}

#[derive(Serialize, Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

/// One arc of a pie or ring chart. Angles are in degrees, clockwise in screen
/// coordinates (y grows downwards), starting at 12 o'clock.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct PieSegment {
    pub label: String,
    pub value: usize,
    pub color: &'static str,
    /// Fraction of the total in `0.0..=1.0`.
    pub share: f64,
    pub start_angle: f64,
    pub sweep_angle: f64,
    pub end_angle: f64,
    pub start: Point,
    pub end: Point,
    pub large_arc: bool,
}

impl PieSegment {
    pub fn percent(&self) -> f64 {
        self.share * 100.0
    }
}

/// Takes the first `limit` ranked labels and colours them by position.
pub fn pie_slices(ranked: &[RankedLabel], limit: usize) -> Vec<PieSlice> {
    ranked
        .iter()
        .take(limit)
        .enumerate()
        .map(|(i, r)| PieSlice {
            label: r.label.clone(),
            value: r.count,
            color: PALETTE[i % PALETTE.len()],
        })
        .collect()
}

pub fn pie_segments(slices: &[PieSlice], frame: ChartFrame) -> Vec<PieSegment> {
    let total: usize = slices.iter().map(|s| s.value).sum();
    let mut current = START_ANGLE;

    slices
        .iter()
        .map(|slice| {
            let share = if total == 0 {
                0.0
            } else {
                slice.value as f64 / total as f64
            };
            let sweep = share * 360.0;
            let start_angle = current;
            let end_angle = start_angle + sweep;
            current = end_angle;

            PieSegment {
                label: slice.label.clone(),
                value: slice.value,
                color: slice.color,
                share,
                start_angle,
                sweep_angle: sweep,
                end_angle,
                start: frame.point_at(start_angle),
                end: frame.point_at(end_angle),
                large_arc: sweep > 180.0,
            }
        })
        .collect()
}
