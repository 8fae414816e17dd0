//! ASCII plotting for terminal output.
//!
//! This is intentionally "dumb" (fixed-size grid), optimized for:
//! - quick visual sanity checks in a terminal
//! - deterministic output (helpful for golden tests)
//!
//! Plot elements:
//! - selected candidate curves: `-` polylines
//! - mapped test points: the digit of their selection position (`0`..`3`)
//! - unmapped test points: `x`

use crate::domain::{Mapping, RunGrid};

/// Render the selected candidates and test points for a completed run.
pub fn render_ascii_plot(mappings: &[Mapping], grid: &RunGrid, width: usize, height: usize) -> String {
    let width = width.max(10);
    let height = height.max(5);

    let (x_min, x_max) = x_range(mappings, grid).unwrap_or((0.0, 1.0));
    let (y_min, y_max) = y_range(mappings, grid).unwrap_or((0.0, 1.0));
    let (y_min, y_max) = pad_range(y_min, y_max, 0.05);

    let mut cells = vec![vec![' '; width]; height];

    // Curves first, so points can overlay.
    for curve in &grid.candidates {
        draw_curve(&mut cells, &grid.x, curve, x_min, x_max, y_min, y_max);
    }

    for m in mappings {
        let cx = map_x(m.x, x_min, x_max, width);
        let cy = map_y(m.y, y_min, y_max, height);

        let ch = match m.assigned {
            Some(a) => char::from_digit(a.position as u32, 10).unwrap_or('?'),
            None => 'x',
        };
        cells[cy][cx] = ch;
    }

    let mut out = String::new();
    out.push_str(&format!(
        "Plot: x=[{x_min:.3}, {x_max:.3}] | y=[{y_min:.2}, {y_max:.2}]\n"
    ));
    for row in cells {
        out.push_str(&row.into_iter().collect::<String>());
        out.push('\n');
    }

    out
}

fn x_range(mappings: &[Mapping], grid: &RunGrid) -> Option<(f64, f64)> {
    let mut min_x = f64::INFINITY;
    let mut max_x = f64::NEG_INFINITY;
    for &x in grid.x.iter().chain(mappings.iter().map(|m| &m.x)) {
        min_x = min_x.min(x);
        max_x = max_x.max(x);
    }
    range_if_valid(min_x, max_x)
}

fn y_range(mappings: &[Mapping], grid: &RunGrid) -> Option<(f64, f64)> {
    let mut min_y = f64::INFINITY;
    let mut max_y = f64::NEG_INFINITY;
    for y in grid
        .candidates
        .iter()
        .flatten()
        .chain(mappings.iter().map(|m| &m.y))
    {
        min_y = min_y.min(*y);
        max_y = max_y.max(*y);
    }
    range_if_valid(min_y, max_y)
}

fn range_if_valid(min: f64, max: f64) -> Option<(f64, f64)> {
    if min.is_finite() && max.is_finite() && max > min {
        Some((min, max))
    } else {
        None
    }
}

fn pad_range(min: f64, max: f64, frac: f64) -> (f64, f64) {
    let span = (max - min).abs();
    let pad = (span * frac).max(1e-12);
    (min - pad, max + pad)
}

fn map_x(x: f64, x_min: f64, x_max: f64, width: usize) -> usize {
    let width = width.max(2);
    let u = ((x - x_min) / (x_max - x_min)).clamp(0.0, 1.0);
    (u * (width as f64 - 1.0)).round() as usize
}

fn map_y(y: f64, y_min: f64, y_max: f64, height: usize) -> usize {
    let height = height.max(2);
    let u = ((y - y_min) / (y_max - y_min)).clamp(0.0, 1.0);
    // y=top is max -> row 0
    (height as f64 - 1.0 - (u * (height as f64 - 1.0))).round() as usize
}

fn draw_curve(
    cells: &mut [Vec<char>],
    xs: &[f64],
    ys: &[f64],
    x_min: f64,
    x_max: f64,
    y_min: f64,
    y_max: f64,
) {
    if xs.len() < 2 || xs.len() != ys.len() {
        return;
    }
    let height = cells.len();
    let width = cells[0].len();

    let mut prev = None;
    for (&x, &y) in xs.iter().zip(ys.iter()) {
        let cx = map_x(x, x_min, x_max, width);
        let cy = map_y(y, y_min, y_max, height);
        if let Some((x0, y0)) = prev {
            draw_line(cells, x0, y0, cx, cy, '-');
        } else {
            cells[cy][cx] = '-';
        }
        prev = Some((cx, cy));
    }
}

/// Integer line drawing (Bresenham-ish).
fn draw_line(cells: &mut [Vec<char>], x0: usize, y0: usize, x1: usize, y1: usize, ch: char) {
    let mut x0 = x0 as isize;
    let mut y0 = y0 as isize;
    let x1 = x1 as isize;
    let y1 = y1 as isize;

    let dx = (x1 - x0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let dy = -(y1 - y0).abs();
    let sy = if y0 < y1 { 1 } else { -1 };
    let mut err = dx + dy;

    loop {
        if y0 >= 0
            && (y0 as usize) < cells.len()
            && x0 >= 0
            && (x0 as usize) < cells[0].len()
            && cells[y0 as usize][x0 as usize] == ' '
        {
            cells[y0 as usize][x0 as usize] = ch;
        }

        if x0 == x1 && y0 == y1 {
            break;
        }
        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            x0 += sx;
        }
        if e2 <= dx {
            err += dx;
            y0 += sy;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Assigned;

    #[test]
    fn plot_golden_snapshot_small() {
        let grid = RunGrid {
            x: vec![0.0, 10.0],
            candidates: vec![vec![0.0, 0.0]],
        };
        let mappings = vec![
            Mapping {
                row: 0,
                x: 0.0,
                y: 10.0,
                assigned: Some(Assigned {
                    position: 2,
                    deviation: 1.0,
                }),
            },
            Mapping {
                row: 1,
                x: 10.0,
                y: 10.0,
                assigned: None,
            },
        ];

        let txt = render_ascii_plot(&mappings, &grid, 10, 5);
        let expected = concat!(
            "Plot: x=[0.000, 10.000] | y=[-0.50, 10.50]\n",
            "2        x\n",
            "          \n",
            "          \n",
            "          \n",
            "----------\n",
        );
        assert_eq!(txt, expected);
    }

    #[test]
    fn unmapped_points_render_as_x() {
        let grid = RunGrid {
            x: vec![0.0, 1.0],
            candidates: vec![vec![0.0, 1.0]],
        };
        let mappings = vec![Mapping {
            row: 0,
            x: 0.5,
            y: 0.5,
            assigned: None,
        }];

        let txt = render_ascii_plot(&mappings, &grid, 20, 10);
        assert!(txt.contains('x'));
    }
}
