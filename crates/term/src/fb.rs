//! Character-cell framebuffer.
//!
//! Drawing operations clip against the buffer edges, so callers can paint
//! partially visible boards and panels without bounds checks of their own.

use std::ops::Range;

/// 24-bit RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

impl From<(u8, u8, u8)> for Rgb {
    fn from((r, g, b): (u8, u8, u8)) -> Self {
        Self::new(r, g, b)
    }
}

/// Colors plus the two attributes the view uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellStyle {
    pub fg: Rgb,
    pub bg: Rgb,
    pub bold: bool,
    pub dim: bool,
}

impl CellStyle {
    pub const fn new(fg: Rgb, bg: Rgb) -> Self {
        Self {
            fg,
            bg,
            bold: false,
            dim: false,
        }
    }

    pub const fn bold(self) -> Self {
        Self { bold: true, ..self }
    }

    pub const fn dim(self) -> Self {
        Self { dim: true, ..self }
    }

    pub const fn cell(self, ch: char) -> Cell {
        Cell { ch, style: self }
    }
}

impl Default for CellStyle {
    fn default() -> Self {
        Self::new(Rgb::new(220, 220, 220), Rgb::new(0, 0, 0))
    }
}

/// One terminal column of one row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    pub ch: char,
    pub style: CellStyle,
}

impl Default for Cell {
    fn default() -> Self {
        CellStyle::default().cell(' ')
    }
}

/// Row-major grid of styled cells.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameBuffer {
    width: u16,
    height: u16,
    cells: Vec<Cell>,
}

impl FrameBuffer {
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            width,
            height,
            cells: vec![Cell::default(); width as usize * height as usize],
        }
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    /// Change dimensions. Contents are unspecified until the next `clear`.
    pub fn resize(&mut self, width: u16, height: u16) {
        if (self.width, self.height) != (width, height) {
            self.width = width;
            self.height = height;
            self.cells
                .resize(width as usize * height as usize, Cell::default());
        }
    }

    /// Cells `x..x+len` of row `y`, clipped to the buffer. Empty if the row
    /// or the span is outside.
    fn span(&self, x: u16, y: u16, len: u16) -> Range<usize> {
        if y >= self.height || x >= self.width {
            return 0..0;
        }
        let start = y as usize * self.width as usize + x as usize;
        let len = len.min(self.width - x) as usize;
        start..start + len
    }

    /// One full row; empty if `y` is out of range.
    pub fn row(&self, y: u16) -> &[Cell] {
        &self.cells[self.span(0, y, self.width)]
    }

    pub fn get(&self, x: u16, y: u16) -> Option<Cell> {
        self.cells.get(self.span(x, y, 1)).and_then(|s| s.first().copied())
    }

    pub fn set(&mut self, x: u16, y: u16, cell: Cell) {
        let span = self.span(x, y, 1);
        self.cells[span].fill(cell);
    }

    pub fn clear(&mut self, cell: Cell) {
        self.cells.fill(cell);
    }

    pub fn put_char(&mut self, x: u16, y: u16, ch: char, style: CellStyle) {
        self.set(x, y, style.cell(ch));
    }

    /// Write a string left to right, clipped at the right edge.
    pub fn put_str(&mut self, x: u16, y: u16, s: &str, style: CellStyle) {
        let span = self.span(x, y, u16::MAX);
        for (slot, ch) in self.cells[span].iter_mut().zip(s.chars()) {
            *slot = style.cell(ch);
        }
    }

    /// Decimal number without allocating.
    pub fn put_u32(&mut self, x: u16, y: u16, value: u32, style: CellStyle) {
        let mut digits = [b'0'; 10];
        let mut start = digits.len();
        let mut n = value;
        loop {
            start -= 1;
            digits[start] += (n % 10) as u8;
            n /= 10;
            if n == 0 {
                break;
            }
        }
        // ASCII digits are always valid UTF-8.
        if let Ok(text) = std::str::from_utf8(&digits[start..]) {
            self.put_str(x, y, text, style);
        }
    }

    /// Fill a `w` x `h` block, clipped to the buffer.
    pub fn fill_rect(&mut self, x: u16, y: u16, w: u16, h: u16, ch: char, style: CellStyle) {
        let cell = style.cell(ch);
        let bottom = y.saturating_add(h).min(self.height);
        for row in y..bottom {
            let span = self.span(x, row, w);
            self.cells[span].fill(cell);
        }
    }
}
