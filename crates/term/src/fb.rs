//! Framebuffer and style types for terminal rendering.

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

/// Minimal per-cell styling.
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

    pub const fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    pub const fn dim(mut self) -> Self {
        self.dim = true;
        self
    }

    pub fn into_cell(self, ch: char) -> Cell {
        Cell { ch, style: self }
    }
}

impl Default for CellStyle {
    fn default() -> Self {
        Self::new(Rgb::new(220, 220, 220), Rgb::new(0, 0, 0))
    }
}

/// A single terminal cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    pub ch: char,
    pub style: CellStyle,
}

impl Default for Cell {
    fn default() -> Self {
        Self {
            ch: ' ',
            style: CellStyle::default(),
        }
    }
}

/// Axis-aligned rectangle in terminal cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rect {
    pub x: u16,
    pub y: u16,
    pub w: u16,
    pub h: u16,
}

impl Rect {
    pub const fn new(x: u16, y: u16, w: u16, h: u16) -> Self {
        Self { x, y, w, h }
    }

    pub fn contains(&self, x: u16, y: u16) -> bool {
        x >= self.x
            && y >= self.y
            && (x as u32) < self.x as u32 + self.w as u32
            && (y as u32) < self.y as u32 + self.h as u32
    }

    pub fn bottom(&self) -> u16 {
        self.y.saturating_add(self.h)
    }
}

/// Box-drawing character set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BorderKind {
    Light,
    Heavy,
    Double,
}

impl BorderKind {
    fn chars(self) -> [char; 6] {
        match self {
            BorderKind::Light => ['┌', '┐', '└', '┘', '─', '│'],
            BorderKind::Heavy => ['┏', '┓', '┗', '┛', '━', '┃'],
            BorderKind::Double => ['╔', '╗', '╚', '╝', '═', '║'],
        }
    }
}

/// 2D framebuffer of styled character cells.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameBuffer {
    width: u16,
    height: u16,
    cells: Vec<Cell>,
}

impl FrameBuffer {
    pub fn new(width: u16, height: u16) -> Self {
        let len = (width as usize) * (height as usize);
        Self {
            width,
            height,
            cells: vec![Cell::default(); len],
        }
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    /// Resize the framebuffer.
    ///
    /// This preserves the underlying allocation when possible.
    pub fn resize(&mut self, width: u16, height: u16) {
        if self.width == width && self.height == height {
            return;
        }
        self.width = width;
        self.height = height;
        let len = (width as usize) * (height as usize);
        self.cells.resize(len, Cell::default());
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    #[inline(always)]
    fn idx(&self, x: u16, y: u16) -> Option<usize> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some((y as usize) * (self.width as usize) + (x as usize))
    }

    pub fn get(&self, x: u16, y: u16) -> Option<Cell> {
        self.idx(x, y).map(|i| self.cells[i])
    }

    pub fn set(&mut self, x: u16, y: u16, cell: Cell) {
        if let Some(i) = self.idx(x, y) {
            self.cells[i] = cell;
        }
    }

    pub fn clear(&mut self, cell: Cell) {
        self.cells.fill(cell);
    }

    pub fn put_char(&mut self, x: u16, y: u16, ch: char, style: CellStyle) {
        self.set(x, y, Cell { ch, style });
    }

    /// Write `s` starting at `(x, y)`, clipped to the buffer width.
    /// Returns the column after the last written char.
    pub fn put_str(&mut self, x: u16, y: u16, s: &str, style: CellStyle) -> u16 {
        self.put_str_max(x, y, s, u16::MAX, style)
    }

    /// Like [`put_str`](Self::put_str) but writes at most `max_w` chars.
    pub fn put_str_max(&mut self, x: u16, y: u16, s: &str, max_w: u16, style: CellStyle) -> u16 {
        let mut cx = x;
        for ch in s.chars().take(max_w as usize) {
            if cx >= self.width {
                break;
            }
            self.put_char(cx, y, ch, style);
            cx += 1;
        }
        cx
    }

    /// Write `s` centered inside `[x, x + w)`.
    pub fn put_str_centered(&mut self, x: u16, y: u16, w: u16, s: &str, style: CellStyle) {
        let len = s.chars().count().min(w as usize) as u16;
        let start = x.saturating_add((w - len) / 2);
        self.put_str_max(start, y, s, w, style);
    }

    /// Write a signed integer without allocating.
    pub fn put_i32(&mut self, x: u16, y: u16, v: i32, style: CellStyle) -> u16 {
        let mut cx = x;
        if v < 0 {
            self.put_char(cx, y, '-', style);
            cx += 1;
        }
        self.put_u32(cx, y, v.unsigned_abs(), style)
    }

    /// Write an unsigned integer without allocating.
    pub fn put_u32(&mut self, x: u16, y: u16, v: u32, style: CellStyle) -> u16 {
        let mut digits = [0u8; 10];
        let mut n = v;
        let mut len = 0;
        loop {
            digits[len] = b'0' + (n % 10) as u8;
            len += 1;
            n /= 10;
            if n == 0 {
                break;
            }
        }
        let mut cx = x;
        for &d in digits[..len].iter().rev() {
            self.put_char(cx, y, d as char, style);
            cx += 1;
        }
        cx
    }

    pub fn fill_rect(&mut self, rect: Rect, ch: char, style: CellStyle) {
        for dy in 0..rect.h {
            for dx in 0..rect.w {
                self.put_char(
                    rect.x.saturating_add(dx),
                    rect.y.saturating_add(dy),
                    ch,
                    style,
                );
            }
        }
    }

    pub fn draw_box(&mut self, rect: Rect, kind: BorderKind, style: CellStyle) {
        if rect.w < 2 || rect.h < 2 {
            return;
        }
        let [tl, tr, bl, br, hz, vt] = kind.chars();
        let (x, y, w, h) = (rect.x, rect.y, rect.w, rect.h);

        self.put_char(x, y, tl, style);
        self.put_char(x + w - 1, y, tr, style);
        self.put_char(x, y + h - 1, bl, style);
        self.put_char(x + w - 1, y + h - 1, br, style);

        for dx in 1..w - 1 {
            self.put_char(x + dx, y, hz, style);
            self.put_char(x + dx, y + h - 1, hz, style);
        }
        for dy in 1..h - 1 {
            self.put_char(x, y + dy, vt, style);
            self.put_char(x + w - 1, y + dy, vt, style);
        }
    }

    /// Word-wrap `s` into at most `max_lines` rows of width `w`.
    /// Returns the number of rows written.
    pub fn put_wrapped(
        &mut self,
        x: u16,
        y: u16,
        w: u16,
        max_lines: u16,
        s: &str,
        style: CellStyle,
    ) -> u16 {
        if w == 0 || max_lines == 0 {
            return 0;
        }
        let mut line = 0u16;
        let mut col = 0u16;
        for word in s.split_whitespace() {
            let len = word.chars().count() as u16;
            if col > 0 && col + 1 + len > w {
                line += 1;
                col = 0;
            }
            if line >= max_lines {
                break;
            }
            if col > 0 {
                col += 1;
            }
            let written = self.put_str_max(x + col, y + line, word, w - col, style);
            col = written - x;
        }
        line + u16::from(col > 0)
    }

    /// Collect a row into a string (handy for assertions).
    pub fn row_text(&self, y: u16) -> String {
        (0..self.width)
            .map(|x| self.get(x, y).map(|c| c.ch).unwrap_or(' '))
            .collect()
    }

    /// Whole buffer as newline-separated rows.
    pub fn text(&self) -> String {
        let mut all = String::with_capacity((self.width as usize + 1) * self.height as usize);
        for y in 0..self.height {
            all.push_str(&self.row_text(y));
            all.push('\n');
        }
        all
    }
}
