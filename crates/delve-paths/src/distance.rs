use delve_core::Point;

/// Manhattan (L1) distance between two points.
#[inline]
pub fn manhattan(a: Point, b: Point) -> i32 {
    (a.x - b.x).abs() + (a.y - b.y).abs()
}

/// Squared Euclidean distance. Compare against `r * r` to avoid floats.
#[inline]
pub fn euclidean_sq(a: Point, b: Point) -> i64 {
    let dx = (a.x - b.x) as i64;
    let dy = (a.y - b.y) as i64;
    dx * dx + dy * dy
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn distances() {
        let a = Point::new(1, 1);
        let b = Point::new(4, 5);
        assert_eq!(manhattan(a, b), 7);
        assert_eq!(euclidean_sq(a, b), 25);
        assert_eq!(manhattan(b, a), manhattan(a, b));
    }
}
