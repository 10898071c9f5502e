use crate::pose::Point;
use std::collections::VecDeque;
use std::ops::Range;

/// Maximum number of endpoint samples kept for drawing
pub const TRAIL_CAPACITY: usize = 1000;

/// Number of oldest samples drawn in the leading colour
pub const HEAD_LENGTH: usize = 10;

/// Bounded FIFO of endpoint samples, oldest first
#[derive(Clone, Debug)]
pub struct Trail {
    points: VecDeque<Point>,
    capacity: usize,
}

impl Trail {
    pub fn new() -> Self {
        Self::with_capacity(TRAIL_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Trail {
            points: VecDeque::with_capacity(capacity + 1),
            capacity,
        }
    }

    /// Adds `point` as the newest sample, evicting the oldest one when full
    pub fn append(&mut self, point: Point) {
        self.points.push_back(point);
        if self.points.len() > self.capacity {
            self.points.pop_front();
        }
    }

    pub fn clear(&mut self) {
        self.points.clear();
    }

    /// Samples in chronological order
    pub fn snapshot(&self) -> &VecDeque<Point> {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Index ranges for the two-tone polyline: a short leading run of the
    /// oldest samples and the remainder, overlapping by one vertex.
    ///
    /// The leading range is empty until the trail holds more than
    /// `HEAD_LENGTH` samples. Both are empty for trails with fewer than two.
    pub fn two_tone(&self) -> (Range<usize>, Range<usize>) {
        let len = self.points.len();
        if len <= 1 {
            return (0..0, 0..0);
        }
        let head = if len > HEAD_LENGTH { 0..HEAD_LENGTH } else { 0..0 };
        let tail_start = (HEAD_LENGTH - 1).min(len - 1);
        (head, tail_start..len)
    }
}

impl Default for Trail {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(i: usize) -> Point {
        Point::new(i as f64, -(i as f64))
    }

    #[test]
    fn grows_until_capacity() {
        let mut trail = Trail::new();
        for i in 0..TRAIL_CAPACITY {
            trail.append(sample(i));
            assert_eq!(trail.len(), i + 1);
        }
        assert_eq!(trail.len(), TRAIL_CAPACITY);
    }

    #[test]
    fn evicts_oldest_first() {
        let mut trail = Trail::new();
        let n = 2537;
        for i in 0..n {
            trail.append(sample(i));
            assert!(trail.len() <= trail.capacity());
        }
        assert_eq!(trail.len(), TRAIL_CAPACITY);
        assert_eq!(trail.snapshot().front(), Some(&sample(n - TRAIL_CAPACITY)));
        assert_eq!(trail.snapshot().back(), Some(&sample(n - 1)));

        let kept: Vec<Point> = trail.snapshot().iter().copied().collect();
        let expected: Vec<Point> = (n - TRAIL_CAPACITY..n).map(sample).collect();
        assert_eq!(kept, expected);
    }

    #[test]
    fn clear_leaves_nothing_to_draw() {
        let mut trail = Trail::new();
        for i in 0..42 {
            trail.append(sample(i));
        }
        trail.clear();
        for _ in 0..3 {
            assert!(trail.snapshot().is_empty());
        }
        assert!(trail.is_empty());
    }

    #[test]
    fn clear_then_append_starts_fresh() {
        let mut trail = Trail::with_capacity(3);
        for i in 0..5 {
            trail.append(sample(i));
        }
        trail.clear();
        trail.append(sample(99));
        assert_eq!(trail.snapshot().iter().copied().collect::<Vec<_>>(), vec![sample(99)]);
    }

    #[test]
    fn two_tone_split() {
        let mut trail = Trail::new();
        assert_eq!(trail.two_tone(), (0..0, 0..0));

        trail.append(sample(0));
        assert_eq!(trail.two_tone(), (0..0, 0..0));

        trail.append(sample(1));
        assert_eq!(trail.two_tone(), (0..0, 1..2));

        for i in 2..10 {
            trail.append(sample(i));
        }
        assert_eq!(trail.two_tone(), (0..0, 9..10));

        trail.append(sample(10));
        assert_eq!(trail.two_tone(), (0..10, 9..11));

        for i in 11..1500 {
            trail.append(sample(i));
        }
        assert_eq!(trail.two_tone(), (0..10, 9..1000));
    }
}
