/// A board cell, column then row. Origin is the top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Pos {
    pub x: i32,
    pub y: i32,
}

impl Pos {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// The neighbouring cell one step in `dir`. May lie outside the board.
    pub fn step(self, dir: Dir) -> Self {
        let (dx, dy) = dir.offset();
        Self::new(self.x + dx, self.y + dy)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dir {
    Up,
    Down,
    Left,
    Right,
}

impl Dir {
    pub fn opposite(self) -> Dir {
        match self {
            Dir::Up => Dir::Down,
            Dir::Down => Dir::Up,
            Dir::Left => Dir::Right,
            Dir::Right => Dir::Left,
        }
    }

    /// Unit vector in board coordinates (y grows downwards).
    pub fn offset(self) -> (i32, i32) {
        match self {
            Dir::Up => (0, -1),
            Dir::Down => (0, 1),
            Dir::Left => (-1, 0),
            Dir::Right => (1, 0),
        }
    }

    /// Screen-space heading in radians, measured from +x towards +y.
    pub fn angle(self) -> f32 {
        let (dx, dy) = self.offset();
        (dy as f32).atan2(dx as f32)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::{FRAC_PI_2, PI};

    #[test]
    fn opposite_is_an_involution() {
        for d in [Dir::Up, Dir::Down, Dir::Left, Dir::Right] {
            assert_ne!(d, d.opposite());
            assert_eq!(d, d.opposite().opposite());
        }
    }

    #[test]
    fn step_follows_offset() {
        let p = Pos::new(5, 5);
        assert_eq!(p.step(Dir::Up), Pos::new(5, 4));
        assert_eq!(p.step(Dir::Down), Pos::new(5, 6));
        assert_eq!(p.step(Dir::Left), Pos::new(4, 5));
        assert_eq!(p.step(Dir::Right), Pos::new(6, 5));
    }

    #[test]
    fn angles_point_along_screen_axes() {
        assert_eq!(Dir::Right.angle(), 0.0);
        assert!((Dir::Down.angle() - FRAC_PI_2).abs() < 1e-6);
        assert!((Dir::Up.angle() + FRAC_PI_2).abs() < 1e-6);
        assert!((Dir::Left.angle().abs() - PI).abs() < 1e-6);
    }
}
