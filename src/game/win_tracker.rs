use super::Player;

/// A line a player can complete to win: a row, a column, or one of the two
/// full-length diagonals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Line {
    Row(usize),
    Column(usize),
    /// Cells where `row == col`.
    MainDiagonal,
    /// Cells where `row == size - 1 - col`.
    AntiDiagonal,
}

impl Line {
    /// Numeric id on a board of `size`: rows `0..N`, columns `N..2N`, then the
    /// main and anti diagonals at `2N` and `2N + 1`.
    pub fn id(self, size: usize) -> usize {
        match self {
            Line::Row(r) => r,
            Line::Column(c) => size + c,
            Line::MainDiagonal => 2 * size,
            Line::AntiDiagonal => 2 * size + 1,
        }
    }

    /// Inverse of [`Line::id`].
    pub fn from_id(id: usize, size: usize) -> Option<Line> {
        match id {
            _ if id < size => Some(Line::Row(id)),
            _ if id < 2 * size => Some(Line::Column(id - size)),
            _ if id == 2 * size => Some(Line::MainDiagonal),
            _ if id == 2 * size + 1 => Some(Line::AntiDiagonal),
            _ => None,
        }
    }

    /// Whether `(row, col)` lies on this line.
    pub fn contains(self, row: usize, col: usize, size: usize) -> bool {
        match self {
            Line::Row(r) => r == row,
            Line::Column(c) => c == col,
            Line::MainDiagonal => row == col,
            Line::AntiDiagonal => row + col == size - 1,
        }
    }
}

/// Per-player occupancy counts for every line, so a win is detected in O(1)
/// from the cell just filled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WinTracker {
    size: usize,
    counts: [Vec<usize>; 2],
}

impl WinTracker {
    pub fn new(size: usize) -> Self {
        let lines = 2 * size + 2;
        WinTracker {
            size,
            counts: [vec![0; lines], vec![0; lines]],
        }
    }

    /// Number of lines tracked per player.
    pub fn line_count(&self) -> usize {
        2 * self.size + 2
    }

    /// Record a token for `player` at `(row, col)`. Returns true if any line
    /// through that cell now holds `size` of the player's tokens.
    pub fn record(&mut self, player: Player, row: usize, col: usize) -> bool {
        let size = self.size;
        let counts = &mut self.counts[player.index()];
        let mut won = false;

        let mut bump = |line: Line| {
            let count = &mut counts[line.id(size)];
            *count += 1;
            won |= *count == size;
        };

        bump(Line::Row(row));
        bump(Line::Column(col));
        if row == col {
            bump(Line::MainDiagonal);
        }
        if row + col == size - 1 {
            bump(Line::AntiDiagonal);
        }

        won
    }

    /// Tokens `player` holds on `line`.
    pub fn count(&self, player: Player, line: Line) -> usize {
        self.counts[player.index()][line.id(self.size)]
    }

    /// First line `player` has completed, if any.
    pub fn completed_line(&self, player: Player) -> Option<Line> {
        self.counts[player.index()]
            .iter()
            .position(|&count| count == self.size)
            .and_then(|id| Line::from_id(id, self.size))
    }

    pub fn reset(&mut self) {
        for counts in &mut self.counts {
            counts.iter_mut().for_each(|c| *c = 0);
        }
    }

    /// True when every count is zero.
    pub fn is_empty(&self) -> bool {
        self.counts.iter().flatten().all(|&c| c == 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_ids_roundtrip() {
        let size = 4;
        let lines = [
            Line::Row(0),
            Line::Row(3),
            Line::Column(0),
            Line::Column(3),
            Line::MainDiagonal,
            Line::AntiDiagonal,
        ];
        let ids: Vec<usize> = lines.iter().map(|l| l.id(size)).collect();
        assert_eq!(ids, vec![0, 3, 4, 7, 8, 9]);
        for line in lines {
            assert_eq!(Line::from_id(line.id(size), size), Some(line));
        }
        assert_eq!(Line::from_id(10, size), None);
    }

    #[test]
    fn test_record_counts_row_and_column() {
        let mut tracker = WinTracker::new(4);
        assert!(!tracker.record(Player::First, 0, 2));
        assert_eq!(tracker.count(Player::First, Line::Row(0)), 1);
        assert_eq!(tracker.count(Player::First, Line::Column(2)), 1);
        assert_eq!(tracker.count(Player::First, Line::MainDiagonal), 0);
        assert_eq!(tracker.count(Player::Second, Line::Row(0)), 0);
    }

    #[test]
    fn test_center_cells_hit_both_diagonals_on_odd_board() {
        let mut tracker = WinTracker::new(3);
        tracker.record(Player::Second, 1, 1);
        assert_eq!(tracker.count(Player::Second, Line::MainDiagonal), 1);
        assert_eq!(tracker.count(Player::Second, Line::AntiDiagonal), 1);
    }

    #[test]
    fn test_anti_diagonal_win() {
        let mut tracker = WinTracker::new(4);
        assert!(!tracker.record(Player::First, 0, 3));
        assert!(!tracker.record(Player::First, 1, 2));
        assert!(!tracker.record(Player::First, 2, 1));
        assert!(tracker.record(Player::First, 3, 0));
        assert_eq!(tracker.completed_line(Player::First), Some(Line::AntiDiagonal));
        assert_eq!(tracker.completed_line(Player::Second), None);
    }

    #[test]
    fn test_mixed_players_do_not_win() {
        let mut tracker = WinTracker::new(4);
        for col in 0..3 {
            assert!(!tracker.record(Player::First, 0, col));
        }
        assert!(!tracker.record(Player::Second, 0, 3));
        assert_eq!(tracker.completed_line(Player::First), None);
    }

    #[test]
    fn test_single_cell_board_wins_immediately() {
        let mut tracker = WinTracker::new(1);
        assert!(tracker.record(Player::First, 0, 0));
    }

    #[test]
    fn test_reset_clears_counts() {
        let mut tracker = WinTracker::new(4);
        tracker.record(Player::First, 0, 0);
        tracker.record(Player::Second, 1, 0);
        assert!(!tracker.is_empty());
        tracker.reset();
        assert!(tracker.is_empty());
        assert_eq!(tracker.line_count(), 10);
    }
}
