//! Index movement for list prompts.

use crate::keys::Direction;

/// The highlighted row of a list with `item_count` rows.
///
/// `current` stays in `0..item_count`; with no items it is pinned at 0 and
/// every move is a no-op.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Navigator {
    item_count: usize,
    current: usize,
    cyclic: bool,
}

impl Navigator {
    /// Starts at row 0. `cyclic` makes Up on the first row wrap to the last
    /// and Down on the last wrap to the first.
    pub fn new(item_count: usize, cyclic: bool) -> Self {
        Navigator {
            item_count,
            current: 0,
            cyclic,
        }
    }

    /// Start at `index`, or at 0 if `index` is out of range.
    pub fn starting_at(mut self, index: usize) -> Self {
        self.current = self.validate_index(index);
        self
    }

    pub fn current(&self) -> usize {
        self.current
    }

    pub fn item_count(&self) -> usize {
        self.item_count
    }

    pub fn is_cyclic(&self) -> bool {
        self.cyclic
    }

    /// `index` if it names a row, 0 otherwise.
    pub fn validate_index(&self, index: usize) -> usize {
        if index < self.item_count {
            index
        } else {
            0
        }
    }

    /// Move one row. Returns the new index and whether anything changed, so
    /// callers can skip redraws at the ends of a non-cyclic list. Left and
    /// Right never move.
    pub fn process_arrow_key(&mut self, direction: Direction) -> (usize, bool) {
        if self.item_count == 0 {
            return (self.current, false);
        }
        let last = self.item_count - 1;
        let next = match direction {
            Direction::Up if self.current > 0 => self.current - 1,
            Direction::Up if self.cyclic => last,
            Direction::Down if self.current < last => self.current + 1,
            Direction::Down if self.cyclic => 0,
            _ => self.current,
        };
        let moved = next != self.current;
        self.current = next;
        (next, moved)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn up_at_top_is_a_no_op() {
        let mut nav = Navigator::new(3, false);
        assert_eq!(nav.process_arrow_key(Direction::Up), (0, false));
    }

    #[test]
    fn cyclic_wraps_both_ways() {
        let mut nav = Navigator::new(3, true);
        assert_eq!(nav.process_arrow_key(Direction::Up), (2, true));
        assert_eq!(nav.process_arrow_key(Direction::Down), (0, true));
    }

    #[test]
    fn single_item_cyclic_does_not_redraw() {
        let mut nav = Navigator::new(1, true);
        assert_eq!(nav.process_arrow_key(Direction::Down), (0, false));
    }

    #[test]
    fn empty_list_is_pinned() {
        let mut nav = Navigator::new(0, true).starting_at(4);
        assert_eq!(nav.current(), 0);
        assert_eq!(nav.process_arrow_key(Direction::Down), (0, false));
        assert_eq!(nav.process_arrow_key(Direction::Up), (0, false));
    }

    #[test]
    fn sideways_keys_do_nothing() {
        let mut nav = Navigator::new(3, true).starting_at(1);
        assert_eq!(nav.process_arrow_key(Direction::Left), (1, false));
        assert_eq!(nav.process_arrow_key(Direction::Right), (1, false));
    }

    proptest! {
        #[test]
        fn down_reaches_the_end_then_stops(count in 1usize..50, start in 0usize..50) {
            let mut nav = Navigator::new(count, false).starting_at(start);
            for _ in 0..count {
                nav.process_arrow_key(Direction::Down);
            }
            prop_assert_eq!(nav.current(), count - 1);
            prop_assert_eq!(nav.process_arrow_key(Direction::Down), (count - 1, false));
        }

        #[test]
        fn cyclic_down_from_the_end_returns_to_zero(count in 2usize..50) {
            let mut nav = Navigator::new(count, true).starting_at(count - 1);
            prop_assert_eq!(nav.process_arrow_key(Direction::Down), (0, true));
        }

        #[test]
        fn out_of_range_defaults_become_zero(count in 0usize..50, extra in 0usize..100) {
            let nav = Navigator::new(count, false);
            prop_assert_eq!(nav.validate_index(count + extra), 0);
        }

        #[test]
        fn index_stays_in_bounds(
            count in 1usize..20,
            cyclic in any::<bool>(),
            moves in proptest::collection::vec(any::<bool>(), 0..100),
        ) {
            let mut nav = Navigator::new(count, cyclic);
            for up in moves {
                let dir = if up { Direction::Up } else { Direction::Down };
                let (index, _) = nav.process_arrow_key(dir);
                prop_assert!(index < count);
            }
        }
    }
}
