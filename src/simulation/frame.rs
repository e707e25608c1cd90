//! Snapshot handed to a presenter once per tick

use super::audit::CollisionReport;
use super::layout::Viewport;
use super::types::{AgentId, Body, Vec2, CAR_COUNT};

/// Car colors as 0xRRGGBB: red, green, blue, magenta
pub const CAR_COLORS: [u32; CAR_COUNT] = [0xff0000, 0x00ff00, 0x4444ff, 0xff00ff];
pub const INTERSECTION_COLOR: u32 = 0xffff55;
pub const BACKGROUND_COLOR: u32 = 0x050505;
pub const HINT_COLOR: u32 = 0x00ff00;
pub const COUNTER_COLOR: u32 = 0xffff00;

/// Screen units per character in the ASCII map
const MAP_CELL: f64 = 10.0;

pub fn car_color(id: AgentId) -> u32 {
    CAR_COLORS[id.0 % CAR_COUNT]
}

/// One line of the status overlay
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusLine {
    pub text: String,
    pub color: u32,
}

/// Line from the top-right corner to a recorded collision point
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DiagnosticLine {
    pub from: Vec2,
    pub to: Vec2,
    pub color: u32,
}

/// Everything needed to draw one frame
#[derive(Debug, Clone)]
pub struct Frame {
    pub viewport: Viewport,
    pub intersection: Body,
    pub cars: Vec<Body>,
    pub report: CollisionReport,
    pub show_collisions: bool,
    pub slow_mode: bool,
}

impl Frame {
    pub fn status_lines(&self) -> Vec<StatusLine> {
        vec![
            StatusLine {
                text: "'C' = see collisions".to_string(),
                color: HINT_COLOR,
            },
            StatusLine {
                text: if self.slow_mode {
                    "'S' = slow mode (on)".to_string()
                } else {
                    "'S' = slow mode".to_string()
                },
                color: HINT_COLOR,
            },
            StatusLine {
                text: format!(" n collisions: {}", self.report.count),
                color: COUNTER_COLOR,
            },
        ]
    }

    /// Lines marking the latest collision, only while one is being shown
    pub fn collision_lines(&self) -> Option<[DiagnosticLine; 2]> {
        if !self.show_collisions || !self.report.flag {
            return None;
        }
        let (first, second) = self.report.last_pair?;
        let (first_pos, second_pos) = self.report.last_positions?;
        let corner = Vec2::new(self.viewport.width.saturating_sub(1) as f64, 0.0);
        Some([
            DiagnosticLine {
                from: corner,
                to: first_pos,
                color: car_color(first),
            },
            DiagnosticLine {
                from: corner,
                to: second_pos,
                color: car_color(second),
            },
        ])
    }

    /// Render the frame as text: `#` intersection outline, digits for cars,
    /// `X` where cars overlap.
    pub fn draw_map(&self) -> String {
        let cols = (self.viewport.width as f64 / MAP_CELL).ceil() as usize;
        let rows = (self.viewport.height as f64 / MAP_CELL).ceil() as usize;
        let mut grid = vec![vec!['.'; cols]; rows];

        let width = self.viewport.width as f64;
        let height = self.viewport.height as f64;
        let clamp = |v: f64, cells: usize| {
            (v / MAP_CELL).floor().clamp(0.0, cells as f64 - 1.0) as usize
        };
        // Inclusive cell range covered by a body, or None if it is off screen
        let cell_span = |body: &Body| {
            let (hw, hh) = body.half_extents();
            let (x0, x1) = (body.position.x - hw, body.position.x + hw);
            let (y0, y1) = (body.position.y - hh, body.position.y + hh);
            if x1 < 0.0 || y1 < 0.0 || x0 >= width || y0 >= height {
                return None;
            }
            Some((clamp(x0, cols), clamp(x1, cols), clamp(y0, rows), clamp(y1, rows)))
        };

        if let Some((c0, c1, r0, r1)) = cell_span(&self.intersection) {
            for (r, row) in grid.iter_mut().enumerate().take(r1 + 1).skip(r0) {
                for (c, cell) in row.iter_mut().enumerate().take(c1 + 1).skip(c0) {
                    if r == r0 || r == r1 || c == c0 || c == c1 {
                        *cell = '#';
                    }
                }
            }
        }

        for (i, car) in self.cars.iter().enumerate() {
            let Some((c0, c1, r0, r1)) = cell_span(car) else {
                continue;
            };
            let mark = char::from_digit((i % 10) as u32, 10).unwrap_or('?');
            for row in grid.iter_mut().take(r1 + 1).skip(r0) {
                for cell in row.iter_mut().take(c1 + 1).skip(c0) {
                    *cell = if *cell == 'X' || (cell.is_ascii_digit() && *cell != mark) {
                        'X'
                    } else {
                        mark
                    };
                }
            }
        }

        let mut map = String::with_capacity((cols + 1) * rows);
        for row in grid {
            map.extend(row);
            map.push('\n');
        }
        map
    }
}
