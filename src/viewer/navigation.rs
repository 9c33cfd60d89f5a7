//! Circular slide index over the attachment list.

use crate::error::{Result, ViewerError};

/// Position within a list of `len` slides.
///
/// Invariant: `index < len` whenever `len > 0`. With an empty list every
/// operation is a no-op and [`Navigator::current`] is `None`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Navigator {
    index: usize,
    len: usize,
}

impl Navigator {
    pub fn new(len: usize) -> Self {
        Self { index: 0, len }
    }

    /// Number of slides.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Current index, `None` for an empty list.
    pub fn current(&self) -> Option<usize> {
        (self.len > 0).then_some(self.index)
    }

    /// Move by `delta` slides, wrapping in both directions.
    ///
    /// Any delta works, including several laps around the list.
    pub fn move_by(&mut self, delta: isize) -> Option<usize> {
        if self.len == 0 {
            return None;
        }
        let shift = delta.rem_euclid(self.len as isize) as usize;
        self.index = (self.index + shift) % self.len;
        Some(self.index)
    }

    /// Jump straight to `index`.
    pub fn jump_to(&mut self, index: usize) -> Result<Option<usize>> {
        if self.len == 0 {
            return Ok(None);
        }
        if index >= self.len {
            return Err(ViewerError::NavigationOutOfRange {
                index,
                len: self.len,
            });
        }
        self.index = index;
        Ok(Some(index))
    }

    /// Replace the list length, keeping `preferred` when it is still valid
    /// and clamping to the last slide otherwise.
    pub fn reset(&mut self, len: usize, preferred: Option<usize>) {
        self.len = len;
        self.index = match (len, preferred) {
            (0, _) => 0,
            (_, Some(i)) => i.min(len - 1),
            (_, None) => 0,
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wraps_both_ways() {
        let mut nav = Navigator::new(4);
        assert_eq!(nav.move_by(-1), Some(3));
        assert_eq!(nav.move_by(1), Some(0));
        nav.jump_to(3).expect("in range");
        assert_eq!(nav.move_by(1), Some(0));
    }

    #[test]
    fn test_large_deltas_stay_in_range() {
        let mut nav = Navigator::new(3);
        assert_eq!(nav.move_by(7), Some(1));
        assert_eq!(nav.move_by(-8), Some(2));
        assert!(nav.move_by(isize::MIN).is_some_and(|i| i < 3));
        assert!(nav.move_by(isize::MAX).is_some_and(|i| i < 3));
    }

    #[test]
    fn test_every_sequence_stays_in_bounds() {
        for len in 1..=7usize {
            let mut nav = Navigator::new(len);
            for delta in [-9isize, -3, -1, 0, 1, 2, 5, 13, -100, 1000] {
                let idx = nav.move_by(delta).expect("non-empty");
                assert!(idx < len, "index {idx} out of range for len {len}");
            }
        }
    }

    #[test]
    fn test_empty_list_is_noop() {
        let mut nav = Navigator::new(0);
        assert_eq!(nav.move_by(1), None);
        assert_eq!(nav.move_by(-1), None);
        assert_eq!(nav.jump_to(0).expect("noop"), None);
        assert_eq!(nav.current(), None);
    }

    #[test]
    fn test_jump_validates_index() {
        let mut nav = Navigator::new(2);
        assert_eq!(nav.jump_to(1).expect("in range"), Some(1));
        let err = nav.jump_to(2).unwrap_err();
        assert!(matches!(
            err,
            ViewerError::NavigationOutOfRange { index: 2, len: 2 }
        ));
        assert_eq!(nav.current(), Some(1));
    }

    #[test]
    fn test_reset_clamps() {
        let mut nav = Navigator::new(5);
        nav.jump_to(4).expect("in range");
        nav.reset(3, nav.current());
        assert_eq!(nav.current(), Some(2));
        nav.reset(0, Some(2));
        assert_eq!(nav.current(), None);
        nav.reset(2, None);
        assert_eq!(nav.current(), Some(0));
    }
}
