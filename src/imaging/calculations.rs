//! Pure geometry for rendering and layout.
//!
//! All functions here are pure and testable without any I/O or bitmaps. The
//! renderer, post-processor and composers call into this module for every
//! number that ends up deciding where a pixel goes.

use super::params::{CanvasMode, RenderConfig};

/// One character's rectangle on the canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Point {
    /// Top-left corner in pixels.
    pub x: u32,
    pub y: u32,
    /// Whitespace is painted in the background color.
    pub blank: bool,
}

/// Whitespace that is painted in the background color.
///
/// `\r` only shows up as half of a `\r\n` line ending and is treated like the
/// newline it belongs to.
pub fn is_blank(ch: char) -> bool {
    matches!(ch, ' ' | '\t' | '\n' | '\r')
}

/// Horizontal advance of a single character in pixels.
///
/// A tab advances by `tab_width` points; every other character, including
/// space, newline and any non-ASCII scalar, advances by one point.
pub fn advance(ch: char, config: &RenderConfig) -> u32 {
    if ch == '\t' {
        config.tab_advance()
    } else {
        config.point_width
    }
}

/// Split content into lines, keeping each line's terminator.
///
/// `"a\n\nb"` yields `["a\n", "\n", "b"]`; empty content yields nothing.
pub fn lines(content: &str) -> impl Iterator<Item = &str> {
    content.split_inclusive('\n')
}

/// Sum of the advances of every character on the line, terminator included.
pub fn line_width(line: &str, config: &RenderConfig) -> u32 {
    line.chars()
        .fold(0u32, |acc, ch| acc.saturating_add(advance(ch, config)))
}

/// Plan every point the renderer will paint, in paint order.
///
/// Painting order matters: points are one pixel larger than their advance, so
/// each point overwrites the last column of its left neighbour and the last
/// row of the line above.
pub fn plan_points<'a>(
    content: &'a str,
    config: &'a RenderConfig,
) -> impl Iterator<Item = Point> + 'a {
    lines(content).enumerate().flat_map(move |(row, line)| {
        let y = (row as u32).saturating_mul(config.point_height);
        line.chars().scan(0u32, move |cursor, ch| {
            let point = Point {
                x: *cursor,
                y,
                blank: is_blank(ch),
            };
            *cursor = cursor.saturating_add(advance(ch, config));
            Some(point)
        })
    })
}

/// Canvas size for the given content.
///
/// Fixed canvases ignore the content. Dynamic canvases fit the widest line and
/// the line count, but never shrink below their minimum.
pub fn canvas_size(content: &str, config: &RenderConfig) -> (u32, u32) {
    match config.canvas {
        CanvasMode::Fixed { width, height } => (width, height),
        CanvasMode::Dynamic {
            min_width,
            min_height,
        } => {
            let (max_line_width, line_count) =
                lines(content).fold((0u32, 0u32), |(widest, count), line| {
                    (widest.max(line_width(line, config)), count.saturating_add(1))
                });
            let total_height = line_count.saturating_mul(config.point_height);
            (min_width.max(max_line_width), min_height.max(total_height))
        }
    }
}

/// Dimensions after fitting `source` inside `bound`, or `None` when it already fits.
///
/// Never upscales. The constraining dimension lands exactly on its bound; the
/// other one is rounded down or up, whichever keeps the aspect ratio closer,
/// and never drops below one pixel.
///
/// # Examples
/// ```
/// # use code_atlas::imaging::calculations::thumbnail_dimensions;
/// // 800x600 into 500x1000 → width-bound
/// assert_eq!(thumbnail_dimensions((800, 600), (500, 1000)), Some((500, 375)));
/// // already fits
/// assert_eq!(thumbnail_dimensions((200, 100), (500, 1000)), None);
/// ```
pub fn thumbnail_dimensions(source: (u32, u32), bound: (u32, u32)) -> Option<(u32, u32)> {
    let (src_w, src_h) = source;
    let (max_w, max_h) = bound;

    if max_w >= src_w && max_h >= src_h {
        return None;
    }

    let aspect = src_w as f64 / src_h as f64;
    let (bound_w, bound_h) = (max_w as f64, max_h as f64);

    let dims = if bound_w / bound_h >= aspect {
        // Height is the constraint
        let w = round_aspect(bound_h * aspect, |n| (aspect - n / bound_h).abs());
        (w, max_h)
    } else {
        // Width is the constraint
        let h = round_aspect(bound_w / aspect, |n| {
            if n == 0.0 {
                0.0
            } else {
                (aspect - bound_w / n).abs()
            }
        });
        (max_w, h)
    };

    (dims != source).then_some(dims)
}

/// Pick floor or ceil of `value`, whichever scores lower; floor wins ties.
fn round_aspect(value: f64, score: impl Fn(f64) -> f64) -> u32 {
    let floor = value.floor();
    let ceil = value.ceil();
    let picked = if score(ceil) < score(floor) { ceil } else { floor };
    (picked as u32).max(1)
}

/// Size of a tile once its border has been added.
///
/// The border is added once per axis: the tile is pasted at
/// `(border, border)`, so the border shows on the top and left edges only.
pub fn bordered_dimensions(size: (u32, u32), border: u32) -> (u32, u32) {
    (size.0.saturating_add(border), size.1.saturating_add(border))
}

/// Number of grid rows needed for `count` tiles.
pub fn grid_rows(count: usize, columns: u32) -> u32 {
    count.div_ceil(columns as usize) as u32
}

/// Composite canvas size for `count` tiles of `cell` size.
pub fn grid_dimensions(count: usize, columns: u32, cell: (u32, u32)) -> (u32, u32) {
    (
        columns.saturating_mul(cell.0),
        grid_rows(count, columns).saturating_mul(cell.1),
    )
}

/// Pixel offset of tile `index` in a row-major grid.
pub fn cell_origin(index: usize, columns: u32, cell: (u32, u32)) -> (u32, u32) {
    let columns = columns as usize;
    let col = (index % columns) as u32;
    let row = (index / columns) as u32;
    (col.saturating_mul(cell.0), row.saturating_mul(cell.1))
}
