use serde::{Deserialize, Serialize};

/// One row of the popular-tickets board. Held in process memory only; the
/// traffic counter is a placeholder signal, not a persisted metric.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PopularEntry {
    pub id: i32,
    pub rank: u32,
    pub artist: String,
    pub date: String,
    pub venue: String,
    pub traffic: u64,
}

/// The board the server boots with.
pub fn default_board() -> Vec<PopularEntry> {
    vec![
        PopularEntry {
            id: 1,
            rank: 1,
            artist: "Seventeen".to_string(),
            date: "25.03.20 ~ 25.03.21".to_string(),
            venue: "Jamsil Olympic Stadium".to_string(),
            traffic: 1000,
        },
        PopularEntry {
            id: 2,
            rank: 2,
            artist: "DAY6".to_string(),
            date: "25.02.01 ~ 25.03.30".to_string(),
            venue: "Nationwide tour".to_string(),
            traffic: 800,
        },
        PopularEntry {
            id: 3,
            rank: 3,
            artist: "IVE".to_string(),
            date: "25.04.05 ~ 25.04.06".to_string(),
            venue: "KSPO Dome".to_string(),
            traffic: 750,
        },
        PopularEntry {
            id: 4,
            rank: 4,
            artist: "The Man Who Laughs".to_string(),
            date: "25.01.09 ~ 25.03.09".to_string(),
            venue: "Seoul Arts Center Opera House".to_string(),
            traffic: 500,
        },
    ]
}

/// Apply per-entry traffic bumps, then re-sort by traffic descending and
/// reassign ranks as a contiguous 1..N sequence.
pub fn bump_and_rank(entries: &mut [PopularEntry], bumps: &[u64]) {
    for (entry, bump) in entries.iter_mut().zip(bumps) {
        entry.traffic += bump;
    }

    entries.sort_by(|a, b| b.traffic.cmp(&a.traffic));

    for (index, entry) in entries.iter_mut().enumerate() {
        entry.rank = (index + 1) as u32;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_board_stays_sorted_with_contiguous_ranks() {
        let mut board = default_board();
        // Push the last entry far past the leaders.
        bump_and_rank(&mut board, &[0, 0, 0, 10_000]);

        let traffic: Vec<u64> = board.iter().map(|e| e.traffic).collect();
        let mut sorted = traffic.clone();
        sorted.sort_by(|a, b| b.cmp(a));
        assert_eq!(traffic, sorted);

        let ranks: Vec<u32> = board.iter().map(|e| e.rank).collect();
        assert_eq!(ranks, vec![1, 2, 3, 4]);
        assert_eq!(board[0].id, 4);
    }

    #[test]
    fn test_zero_bumps_keep_existing_order() {
        let mut board = default_board();
        bump_and_rank(&mut board, &[0, 0, 0, 0]);

        let ids: Vec<i32> = board.iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_fewer_bumps_than_entries_is_harmless() {
        let mut board = default_board();
        bump_and_rank(&mut board, &[50]);

        assert_eq!(board.len(), 4);
        let ranks: Vec<u32> = board.iter().map(|e| e.rank).collect();
        assert_eq!(ranks, vec![1, 2, 3, 4]);
    }
}
