//! A [`Surface`] backed by a terminal cell grid.
//!
//! The engine works in pixels. The terminal surface maps every pixel
//! coordinate onto a character cell of [`CellSize`] pixels, keeps a cell
//! buffer for the frame being drawn, and writes only the cells that changed
//! since the last flush.
//!
//! Shadows and strokes have no terminal equivalent and are ignored; the fill
//! color is blended over the cell's background so fading particles darken
//! toward it.

use std::io::{self, Write};

use crossterm::{
    cursor::MoveTo,
    queue,
    style::{
        Attribute, Color, Print, ResetColor, SetAttribute, SetBackgroundColor, SetForegroundColor,
    },
};
use glyphburst::{InputKind, Point, Rect, Rgb, Size, Surface, TextStyle};
use serde::{Deserialize, Serialize};

/// Pixel size of one terminal cell.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CellSize {
    /// Cell width in pixels.
    pub width: f64,
    /// Cell height in pixels.
    pub height: f64,
}

impl Default for CellSize {
    fn default() -> Self {
        Self {
            width: 8.0,
            height: 16.0,
        }
    }
}

impl CellSize {
    /// Pixel coordinate of the center of cell `(column, row)`.
    pub fn center_of(self, column: u16, row: u16) -> Point {
        Point::new(
            (f64::from(column) + 0.5) * self.width,
            (f64::from(row) + 0.5) * self.height,
        )
    }
}

/// One character cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    /// Character shown.
    pub ch: char,
    /// Foreground color, `None` for the terminal default.
    pub fg: Option<Rgb>,
    /// Background color, `None` for the terminal default.
    pub bg: Option<Rgb>,
    /// Bold attribute.
    pub bold: bool,
}

impl Default for Cell {
    fn default() -> Self {
        Self {
            ch: ' ',
            fg: None,
            bg: None,
            bold: false,
        }
    }
}

/// A terminal-backed drawing surface.
#[derive(Debug, Clone)]
pub struct TerminalSurface {
    columns: u16,
    rows: u16,
    cell: CellSize,
    origin: Point,
    cells: Vec<Cell>,
    shown: Vec<Cell>,
    full_redraw: bool,
    listening: bool,
}

impl TerminalSurface {
    /// A surface of `columns × rows` cells.
    pub fn new(columns: u16, rows: u16, cell: CellSize) -> Self {
        let len = usize::from(columns) * usize::from(rows);
        Self {
            columns,
            rows,
            cell,
            origin: Point::origin(),
            cells: vec![Cell::default(); len],
            shown: vec![Cell::default(); len],
            full_redraw: true,
            listening: false,
        }
    }

    /// Resizes the grid. The next flush repaints every cell.
    pub fn resize(&mut self, columns: u16, rows: u16) {
        *self = Self {
            listening: self.listening,
            ..Self::new(columns, rows, self.cell)
        };
    }

    /// Grid size in cells.
    pub const fn grid(&self) -> (u16, u16) {
        (self.columns, self.rows)
    }

    /// Pixel size of one cell.
    pub const fn cell_size(&self) -> CellSize {
        self.cell
    }

    /// True once the engine asked for input.
    pub const fn is_listening(&self) -> bool {
        self.listening
    }

    /// The cell at `(column, row)`.
    pub fn cell(&self, column: u16, row: u16) -> Option<&Cell> {
        if column >= self.columns || row >= self.rows {
            return None;
        }
        self.cells
            .get(usize::from(row) * usize::from(self.columns) + usize::from(column))
    }

    /// Writes every cell that changed since the last flush.
    ///
    /// Returns the number of cells written.
    ///
    /// # Errors
    ///
    /// Returns any error from the underlying writer.
    pub fn flush<W: Write>(&mut self, writer: &mut W) -> io::Result<usize> {
        let mut written = 0;
        for row in 0..self.rows {
            for column in 0..self.columns {
                let i = usize::from(row) * usize::from(self.columns) + usize::from(column);
                let cell = self.cells[i];
                if !self.full_redraw && self.shown[i] == cell {
                    continue;
                }
                let weight = if cell.bold {
                    Attribute::Bold
                } else {
                    Attribute::NormalIntensity
                };
                queue!(
                    writer,
                    MoveTo(column, row),
                    SetAttribute(weight),
                    SetForegroundColor(to_color(cell.fg)),
                    SetBackgroundColor(to_color(cell.bg)),
                    Print(cell.ch)
                )?;
                written += 1;
            }
        }
        queue!(writer, SetAttribute(Attribute::Reset), ResetColor)?;
        writer.flush()?;

        self.shown.clone_from(&self.cells);
        self.full_redraw = false;
        Ok(written)
    }

    // Maps a pixel coordinate to a cell index, if it lies on the grid.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    fn index_at(&self, p: Point) -> Option<usize> {
        if !(p.x.is_finite() && p.y.is_finite()) || p.x < 0.0 || p.y < 0.0 {
            return None;
        }
        let column = (p.x / self.cell.width).floor() as usize;
        let row = (p.y / self.cell.height).floor() as usize;
        (column < usize::from(self.columns) && row < usize::from(self.rows))
            .then(|| row * usize::from(self.columns) + column)
    }

    // Cell ranges covered by a pixel rect, clipped to the grid.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    fn cells_in(&self, rect: Rect) -> impl Iterator<Item = usize> + use<> {
        let clip = |v: f64, cell: f64, max: u16| (v / cell).clamp(0.0, f64::from(max)) as usize;
        let columns = usize::from(self.columns);
        let c0 = clip(rect.x.floor(), self.cell.width, self.columns);
        let c1 = clip((rect.x + rect.width).ceil(), self.cell.width, self.columns);
        let r0 = clip(rect.y.floor(), self.cell.height, self.rows);
        let r1 = clip((rect.y + rect.height).ceil(), self.cell.height, self.rows);
        (r0..r1).flat_map(move |row| (c0..c1).map(move |column| row * columns + column))
    }
}

fn to_color(color: Option<Rgb>) -> Color {
    color.map_or(Color::Reset, |c| Color::Rgb {
        r: c.r,
        g: c.g,
        b: c.b,
    })
}

impl Surface for TerminalSurface {
    fn size(&self) -> Option<Size> {
        (self.columns > 0 && self.rows > 0).then(|| {
            Size::new(
                f64::from(self.columns) * self.cell.width,
                f64::from(self.rows) * self.cell.height,
            )
        })
    }

    fn bounding_rect(&self) -> Rect {
        Rect::from_size(self.size().unwrap_or_default())
    }

    fn fill_rect(&mut self, rect: Rect, color: Rgb) {
        for i in self.cells_in(rect) {
            self.cells[i] = Cell {
                bg: Some(color),
                ..Cell::default()
            };
        }
    }

    fn clear_rect(&mut self, rect: Rect) {
        for i in self.cells_in(rect) {
            self.cells[i] = Cell::default();
        }
    }

    fn translate(&mut self, x: f64, y: f64) {
        self.origin = self.origin.offset(x, y);
    }

    fn reset_transform(&mut self) {
        self.origin = Point::origin();
    }

    fn draw_text(&mut self, text: &str, style: &TextStyle) {
        let (Some(i), Some(ch)) = (self.index_at(self.origin), text.chars().next()) else {
            return;
        };
        let cell = &mut self.cells[i];
        let under = cell.bg.unwrap_or_default();
        cell.ch = ch;
        cell.fg = Some(style.fill.over(under));
        cell.bold = style.font.bold;
    }

    fn listen(&mut self, kinds: &[InputKind]) {
        self.listening |= !kinds.is_empty();
    }
}
