//! Drawing primitives: rectangles, lines and circles made of characters.
//!
//! Corners are inclusive cells and may be given in any order. Everything is
//! drawn through [`Terminal::put`], so shapes partly outside the window are
//! clipped rather than wrapped.

use super::console::Console;
use super::geometry::Vector2;
use super::terminal::Terminal;

/// Reorder two corners into (top-left, bottom-right).
fn normalize(a: Vector2, b: Vector2) -> (Vector2, Vector2) {
    (
        Vector2::new(a.x.min(b.x), a.y.min(b.y)),
        Vector2::new(a.x.max(b.x), a.y.max(b.y)),
    )
}

fn lerp(from: i32, to: i32, t: f64) -> i32 {
    from + (t * f64::from(to - from)).round() as i32
}

/// Cells of the straight line from `from` to `to`, both ends included.
///
/// One cell per step along the major axis, the minor axis interpolated and
/// rounded half away from zero.
pub fn line_points(from: Vector2, to: Vector2) -> Vec<Vector2> {
    let steps = from.chebyshev(to);
    let mut points = Vec::with_capacity(steps as usize + 1);
    points.push(from);
    for i in 1..=steps {
        let t = f64::from(i) / f64::from(steps);
        points.push(Vector2::new(lerp(from.x, to.x, t), lerp(from.y, to.y, t)));
    }
    points
}

/// Cells of a midpoint circle, eight octants per step.
///
/// Cells on the axes and diagonals can appear more than once.
pub fn circle_points(center: Vector2, radius: u16) -> Vec<Vector2> {
    let mut points = Vec::new();
    let mut x = i32::from(radius);
    let mut y = 0;
    let mut err = 0;
    while x >= y {
        for (dx, dy) in [
            (x, y),
            (x, -y),
            (y, x),
            (y, -x),
            (-y, x),
            (-y, -x),
            (-x, y),
            (-x, -y),
        ] {
            points.push(center.offset(dx, dy));
        }
        if err <= 0 {
            y += 1;
            err += 2 * y + 1;
        }
        if err > 0 {
            x -= 1;
            err -= 2 * x + 1;
        }
    }
    points
}

fn repeat(ch: char, count: i32) -> String {
    std::iter::repeat(ch).take(count.max(0) as usize).collect()
}

/// Outline of a rectangle in `ch`.
pub fn draw_rectangle<C: Console>(term: &mut Terminal<C>, a: Vector2, b: Vector2, ch: char) {
    let (top_left, bottom_right) = normalize(a, b);
    let row = repeat(ch, bottom_right.x - top_left.x + 1);
    term.put(top_left, &row);
    for y in top_left.y + 1..bottom_right.y {
        term.put_char(Vector2::new(top_left.x, y), ch);
        term.put_char(Vector2::new(bottom_right.x, y), ch);
    }
    if bottom_right.y != top_left.y {
        term.put(Vector2::new(top_left.x, bottom_right.y), &row);
    }
}

/// Rectangle outline with `+` corners, `-` edges and `|` sides.
pub fn draw_table_rectangle<C: Console>(term: &mut Terminal<C>, a: Vector2, b: Vector2) {
    let (top_left, bottom_right) = normalize(a, b);
    let inner = bottom_right.x - top_left.x - 1;
    let row = if inner < 0 {
        "+".to_string()
    } else {
        format!("+{}+", repeat('-', inner))
    };
    term.put(top_left, &row);
    for y in top_left.y + 1..bottom_right.y {
        term.put_char(Vector2::new(top_left.x, y), '|');
        term.put_char(Vector2::new(bottom_right.x, y), '|');
    }
    if bottom_right.y != top_left.y {
        term.put(Vector2::new(top_left.x, bottom_right.y), &row);
    }
}

/// Filled rectangle.
pub fn draw_full_rectangle<C: Console>(term: &mut Terminal<C>, a: Vector2, b: Vector2, ch: char) {
    let (top_left, bottom_right) = normalize(a, b);
    let row = repeat(ch, bottom_right.x - top_left.x + 1);
    for y in top_left.y..=bottom_right.y {
        term.put(Vector2::new(top_left.x, y), &row);
    }
}

pub fn draw_line<C: Console>(term: &mut Terminal<C>, from: Vector2, to: Vector2, ch: char) {
    for point in line_points(from, to) {
        term.put_char(point, ch);
    }
}

/// Line cycling through the characters of `pattern`.
pub fn draw_pattern_line<C: Console>(term: &mut Terminal<C>, from: Vector2, to: Vector2, pattern: &str) {
    for (point, ch) in line_points(from, to).into_iter().zip(pattern.chars().cycle()) {
        term.put_char(point, ch);
    }
}

fn draw_table_line<C: Console>(term: &mut Terminal<C>, from: Vector2, to: Vector2, body: char) {
    let points = line_points(from, to);
    let last = points.len() - 1;
    for (i, point) in points.into_iter().enumerate() {
        let ch = if i == 0 || i == last { '+' } else { body };
        term.put_char(point, ch);
    }
}

/// Horizontal rule `+----+`.
pub fn draw_table_horizontal_line<C: Console>(term: &mut Terminal<C>, from: Vector2, to: Vector2) {
    draw_table_line(term, from, to, '-');
}

/// Vertical rule with `+` ends and `|` between.
pub fn draw_table_vertical_line<C: Console>(term: &mut Terminal<C>, from: Vector2, to: Vector2) {
    draw_table_line(term, from, to, '|');
}

pub fn draw_circle<C: Console>(term: &mut Terminal<C>, center: Vector2, radius: u16, ch: char) {
    for point in circle_points(center, radius) {
        term.put_char(point, ch);
    }
}
