use std::{
    fs::File,
    io::{self, Read, Write},
    path::{Path, PathBuf},
};

use log::{debug, info, warn};

use crate::error::LeaderboardError;

const RECORD_SIZE: usize = std::mem::size_of::<i32>();

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LeaderboardConfig {
    pub path: PathBuf,
    pub max_entries: usize,
}

/// Best scores first, always exactly `max_entries` long.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Leaderboard {
    scores: Vec<i32>,
}

impl Leaderboard {
    pub fn zeroed(entries: usize) -> Self {
        Leaderboard { scores: vec![0; entries] }
    }

    pub fn from_scores(scores: Vec<i32>) -> Self {
        Leaderboard { scores }
    }

    pub fn scores(&self) -> &[i32] {
        &self.scores
    }

    /// Inserts `score` at its rank, pushing the entries below it down one
    /// place; the last entry falls off. Returns whether anything changed.
    pub fn update(&mut self, score: i32) -> bool {
        let mut incoming = score;
        let mut changed = false;

        for entry in self.scores.iter_mut() {
            if incoming <= *entry {
                continue;
            }
            std::mem::swap(entry, &mut incoming);
            changed = true;
        }

        changed
    }
}

/// Flat file of native-endian i32 records, best first, no header.
pub struct LeaderboardStore {
    config: LeaderboardConfig,
}

impl LeaderboardStore {
    pub fn new(config: LeaderboardConfig) -> Self {
        LeaderboardStore { config }
    }

    pub fn path(&self) -> &Path {
        &self.config.path
    }

    /// Never fails: a missing or unreadable file is a first run.
    pub fn load(&self) -> Leaderboard {
        match self.try_load() {
            Ok(board) => {
                debug!("Loaded leaderboard {:?}: {:?}", self.config.path, board.scores());
                board
            }
            Err(LeaderboardError::Read { source, .. })
                if source.kind() == io::ErrorKind::NotFound =>
            {
                info!("No leaderboard at {:?}, starting fresh", self.config.path);
                Leaderboard::zeroed(self.config.max_entries)
            }
            Err(e) => {
                warn!("{}, starting fresh", e);
                Leaderboard::zeroed(self.config.max_entries)
            }
        }
    }

    pub fn try_load(&self) -> Result<Leaderboard, LeaderboardError> {
        let read_err = |source| LeaderboardError::Read { path: self.config.path.clone(), source };

        let file = File::open(&self.config.path).map_err(read_err)?;
        let mut bytes = Vec::with_capacity(self.config.max_entries * RECORD_SIZE);
        file.take((self.config.max_entries * RECORD_SIZE) as u64)
            .read_to_end(&mut bytes)
            .map_err(read_err)?;

        // A short file leaves the remaining ranks at zero; a torn record is dropped.
        let mut scores: Vec<i32> = bytes
            .chunks_exact(RECORD_SIZE)
            .map(|chunk| {
                let mut record = [0u8; RECORD_SIZE];
                record.copy_from_slice(chunk);
                i32::from_ne_bytes(record)
            })
            .collect();
        scores.resize(self.config.max_entries, 0);

        Ok(Leaderboard::from_scores(scores))
    }

    /// Truncates and rewrites the file with exactly `max_entries` records.
    pub fn save(&self, board: &Leaderboard) -> Result<(), LeaderboardError> {
        let write_err = |source| LeaderboardError::Write { path: self.config.path.clone(), source };

        let mut bytes = Vec::with_capacity(self.config.max_entries * RECORD_SIZE);
        for rank in 0..self.config.max_entries {
            let score = board.scores().get(rank).copied().unwrap_or(0);
            bytes.extend_from_slice(&score.to_ne_bytes());
        }

        let mut file = File::create(&self.config.path).map_err(write_err)?;
        file.write_all(&bytes).map_err(write_err)?;
        file.flush().map_err(write_err)?;

        debug!("Saved leaderboard {:?}: {:?}", self.config.path, board.scores());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::{env, fs};

    fn temp_path() -> PathBuf {
        let mut path = env::temp_dir();
        let random_number: u32 = rand::random();
        path.push(format!("temp_termsnake_record_{}.dat", random_number));
        path
    }

    fn store(path: &Path, entries: usize) -> LeaderboardStore {
        LeaderboardStore::new(LeaderboardConfig { path: path.to_path_buf(), max_entries: entries })
    }

    #[test]
    fn better_score_shifts_lower_ranks_down() {
        let mut board = Leaderboard::from_scores(vec![50, 30, 10]);
        assert!(board.update(40));
        assert_eq!(board.scores(), &[50, 40, 30]);
    }

    #[test]
    fn worse_score_changes_nothing() {
        let mut board = Leaderboard::from_scores(vec![50, 30, 10]);
        assert!(!board.update(5));
        assert_eq!(board.scores(), &[50, 30, 10]);
        assert!(!board.update(10));
        assert_eq!(board.scores(), &[50, 30, 10]);
    }

    #[test]
    fn stays_sorted_and_fixed_length() {
        let mut board = Leaderboard::zeroed(3);
        for score in [4, 9, 1, 9, 7, 12, 0, 3, 8] {
            board.update(score);
            assert_eq!(board.scores().len(), 3);
            assert!(board.scores().windows(2).all(|w| w[0] >= w[1]));
        }
        assert_eq!(board.scores(), &[12, 9, 9]);

        let before = board.clone();
        assert!(!board.update(2));
        assert!(!board.update(2));
        assert_eq!(board, before);
    }

    #[test]
    fn missing_file_loads_zeroes() {
        let path = temp_path();
        assert_eq!(store(&path, 3).load().scores(), &[0, 0, 0]);
    }

    #[test]
    fn save_then_load_round_trips() {
        let path = temp_path();
        let store = store(&path, 3);
        let board = Leaderboard::from_scores(vec![50, 40, 30]);

        store.save(&board).unwrap();
        assert_eq!(fs::metadata(&path).unwrap().len(), 12);
        assert_eq!(store.load(), board);

        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn short_file_fills_with_zeroes() {
        let path = temp_path();
        let mut bytes = 17i32.to_ne_bytes().to_vec();
        bytes.extend_from_slice(&[1, 2]);
        fs::write(&path, &bytes).unwrap();

        assert_eq!(store(&path, 3).load().scores(), &[17, 0, 0]);

        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn save_truncates_longer_files() {
        let path = temp_path();
        fs::write(&path, vec![0xffu8; 64]).unwrap();

        store(&path, 2).save(&Leaderboard::from_scores(vec![3, 1])).unwrap();

        let bytes = fs::read(&path).unwrap();
        let mut expected = 3i32.to_ne_bytes().to_vec();
        expected.extend_from_slice(&1i32.to_ne_bytes());
        assert_eq!(bytes, expected);

        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn unwritable_path_reports_error() {
        let mut path = temp_path();
        path.push("missing_dir");
        path.push("record.dat");
        let res = store(&path, 3).save(&Leaderboard::zeroed(3));
        let err = res.unwrap_err();
        match &err {
            LeaderboardError::Write { source, .. } => {
                assert!(err.to_string().ends_with(&format!(": {}", source)));
            }
            other => panic!("expected a write error, got {:?}", other),
        }
    }
}
