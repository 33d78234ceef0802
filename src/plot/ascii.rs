//! ASCII plotting for terminal output.
//!
//! A fixed-size character grid, optimized for:
//! - quick visual sanity checks in a terminal
//! - deterministic output (helpful for golden tests)
//!
//! Plot elements, one x position per merged category (ascending values):
//! - observed frequency: `o`
//! - expected frequency: `-` line

use crate::domain::{Category, FamilyFit};

/// Render observed vs expected frequencies for a fitted family.
pub fn render_fit_plot(fit: &FamilyFit, width: usize, height: usize) -> String {
    // Merged rows are stored highest-first; plot left to right.
    let categories: Vec<&Category> = fit.merged.iter().rev().collect();

    let top = categories
        .iter()
        .map(|c| c.row.expected.max(c.row.observed as f64))
        .fold(0.0_f64, f64::max);
    let frame = Frame::new(width, height, categories.len(), top);

    let mut grid = vec![vec![' '; frame.width]; frame.height];

    // Expected line first so observed points overlay it.
    let expected: Vec<(usize, f64)> = categories
        .iter()
        .enumerate()
        .map(|(i, c)| (frame.column(i), c.row.expected))
        .collect();
    if let [(x, v)] = expected.as_slice() {
        grid[frame.row(*v)][*x] = '-';
    }
    for pair in expected.windows(2) {
        let ((x0, v0), (x1, v1)) = (pair[0], pair[1]);
        for x in x0..=x1 {
            let t = if x1 > x0 { (x - x0) as f64 / (x1 - x0) as f64 } else { 0.0 };
            let cell = &mut grid[frame.row(v0 + t * (v1 - v0))][x];
            if *cell == ' ' {
                *cell = '-';
            }
        }
    }

    for (i, c) in categories.iter().enumerate() {
        grid[frame.row(c.row.observed as f64)][frame.column(i)] = 'o';
    }

    let mut out = String::new();
    out.push_str(&format!(
        "Plot: {} | frequency=[{:.2}, {:.2}] | o observed, - expected\n",
        fit.family.display_name(),
        frame.low,
        frame.high
    ));
    for row in grid {
        out.push_str(&row.into_iter().collect::<String>());
        out.push('\n');
    }

    let labels: Vec<String> = categories.iter().map(|c| c.key.to_string()).collect();
    out.push_str(&format!("x: {}\n", labels.join(" | ")));

    out
}

/// Grid geometry: one column per category, frequency axis padded by 5%.
struct Frame {
    width: usize,
    height: usize,
    categories: usize,
    low: f64,
    high: f64,
}

impl Frame {
    fn new(width: usize, height: usize, categories: usize, top: f64) -> Self {
        let top = if top > 0.0 { top } else { 1.0 };
        let pad = (top * 0.05).max(1e-12);
        Self {
            width: width.max(10),
            height: height.max(5),
            categories,
            low: -pad,
            high: top + pad,
        }
    }

    /// Column of the `i`-th category; a lone category sits in the middle.
    fn column(&self, i: usize) -> usize {
        let u = if self.categories > 1 {
            i as f64 / (self.categories - 1) as f64
        } else {
            0.5
        };
        (u.clamp(0.0, 1.0) * (self.width - 1) as f64).round() as usize
    }

    /// Row of a frequency; row 0 is the top of the frame.
    fn row(&self, value: f64) -> usize {
        let span = (self.height - 1) as f64;
        let u = ((value - self.low) / (self.high - self.low)).clamp(0.0, 1.0);
        (span - u * span).round() as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{CategoryKey, Family, FittedParameters, FrequencyRow, FrequencyTable, ObservedData};
    use crate::fit::selection::fit_family;

    #[test]
    fn plot_golden_snapshot_small() {
        let mut merged = FrequencyTable::new();
        merged.push(CategoryKey::single(1), FrequencyRow { expected: 10.0, observed: 20 });
        merged.push(CategoryKey::single(0), FrequencyRow { expected: 10.0, observed: 10 });
        let fit = FamilyFit {
            family: Family::Uniform,
            parameters: FittedParameters::Uniform {
                p: 0.5,
                support: vec![0, 1],
            },
            table: FrequencyTable::new(),
            merged,
            statistic: 5.0,
        };

        let txt = render_fit_plot(&fit, 10, 5);
        let expected = concat!(
            "Plot: Uniform Distribution | frequency=[-1.00, 21.00] | o observed, - expected\n",
            "         o\n",
            "          \n",
            "o---------\n",
            "          \n",
            "          \n",
            "x: 0 | 1\n",
        );
        assert_eq!(txt, expected);
    }

    #[test]
    fn single_category_is_centered() {
        let mut merged = FrequencyTable::new();
        merged.push(CategoryKey::single(0), FrequencyRow { expected: 12.0, observed: 12 });
        let fit = FamilyFit {
            family: Family::Poisson,
            parameters: FittedParameters::Poisson { lambda: 0.0 },
            table: FrequencyTable::new(),
            merged,
            statistic: 0.0,
        };

        let txt = render_fit_plot(&fit, 11, 5);
        let lines: Vec<&str> = txt.lines().collect();
        assert_eq!(lines[1], "     o     ");
        assert_eq!(lines[6], "x: 0");
    }

    #[test]
    fn one_marker_per_category() {
        let data: ObservedData = [(0, 10), (1, 20), (2, 15), (3, 5)].into_iter().collect();
        let fit = fit_family(&data, Family::Poisson).unwrap();
        let txt = render_fit_plot(&fit, 40, 12);

        let lines: Vec<&str> = txt.lines().collect();
        let grid = &lines[1..lines.len() - 1];
        assert_eq!(grid.len(), 12);
        let markers: usize = grid.iter().map(|l| l.matches('o').count()).sum();
        assert_eq!(markers, 3);
        assert!(txt.ends_with("x: 0 | 1 | 2-3\n"));
    }
}
