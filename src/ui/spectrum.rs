//! Fake spectrum analyser: random bar targets, eased heights, ten render styles.

use rand::RngExt;
use ratatui::{buffer::Buffer, layout::Rect, style::Style, widgets::Widget};

/// Number of selectable render styles.
pub const MODE_COUNT: u8 = 10;

/// Fraction of the remaining distance a bar covers each tick.
const EASE: f32 = 0.2;

#[derive(Debug, Clone)]
pub struct Spectrum {
    heights: Vec<f32>,
    targets: Vec<f32>,
}

impl Spectrum {
    pub fn new(bars: usize) -> Self {
        Self {
            heights: vec![0.0; bars],
            targets: vec![0.0; bars],
        }
    }

    pub fn heights(&self) -> &[f32] {
        &self.heights
    }

    /// Advance one tick. While playing each bar picks a fresh random target in
    /// `0.1..=1.0`; otherwise all bars sink back towards zero.
    pub fn animate(&mut self, playing: bool) {
        let mut rng = rand::rng();
        for (h, t) in self.heights.iter_mut().zip(self.targets.iter_mut()) {
            *t = if playing {
                rng.random_range(0.1..=1.0)
            } else {
                0.0
            };
            *h += (*t - *h) * EASE;
        }
    }
}

/// Symbol for bar `bar` at row `row` (0 = bottom) of a `rows`-tall area, or
/// `None` for an empty cell.
pub fn symbol_at(mode: u8, heights: &[f32], bar: usize, row: u16, rows: u16) -> Option<&'static str> {
    let h = *heights.get(bar)?;
    if rows == 0 {
        return None;
    }
    let rows_f = f32::from(rows);
    let filled = (h.clamp(0.0, 1.0) * rows_f).round() as u16;
    let peak = filled.checked_sub(1);

    match mode % MODE_COUNT {
        // Classic bars from the bottom.
        0 => (row < filled).then_some("█"),
        // Mirrored around the middle.
        1 => {
            let mid = f32::from(rows - 1) / 2.0;
            let half = f32::from(filled) / 2.0;
            ((f32::from(row) - mid).abs() < half).then_some("█")
        }
        // Hanging from the top.
        2 => (row >= rows.saturating_sub(filled)).then_some("█"),
        // Thin lines.
        3 => (row < filled).then_some("│"),
        // Peak dots.
        4 => (Some(row) == peak).then_some("●"),
        // Peak caps with a faint reflection below.
        5 => {
            if Some(row) == peak {
                Some("▀")
            } else if filled > 0 && row == 0 {
                Some("▄")
            } else {
                None
            }
        }
        // Stepped blocks, three rows at a time.
        6 => (row < filled / 3 * 3).then_some("█"),
        // Lower-block bars.
        7 => (row < filled).then_some("▆"),
        // Outline: slope towards the next bar.
        8 => {
            if Some(row) != peak {
                return None;
            }
            let next = heights.get(bar + 1).copied().unwrap_or(h);
            Some(if next > h + 0.05 {
                "╱"
            } else if next < h - 0.05 {
                "╲"
            } else {
                "─"
            })
        }
        // Shaded fill with a solid peak.
        _ => {
            if Some(row) == peak {
                Some("▓")
            } else if row < filled {
                Some("░")
            } else {
                None
            }
        }
    }
}

/// Draws a `Spectrum` into a buffer, one column per bar with a gap between.
pub struct SpectrumView<'a> {
    pub heights: &'a [f32],
    pub mode: u8,
    pub style: Style,
}

impl Widget for SpectrumView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        for (bar, x) in (area.left()..area.right()).step_by(2).enumerate() {
            if bar >= self.heights.len() {
                break;
            }
            for row in 0..area.height {
                let y = area.bottom() - 1 - row;
                if let Some(sym) = symbol_at(self.mode, self.heights, bar, row, area.height) {
                    if let Some(cell) = buf.cell_mut((x, y)) {
                        cell.set_symbol(sym).set_style(self.style);
                    }
                }
            }
        }
    }
}
