//! Score task - owns the high-score ranking.

use tracing::info;

use crate::core::HighScores;
use crate::shared::Shared;

#[derive(Debug, Clone, Default)]
pub struct ScoreTask {
    table: HighScores,
    last_rank: Option<usize>,
}

impl ScoreTask {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn step(&mut self, shared: &mut Shared) {
        let mut changed = false;

        if let Some(score) = shared.finished.take() {
            self.last_rank = self.table.insert(score);
            if let Some(rank) = self.last_rank {
                info!(rank, points = score.points, "new high score");
            }
            changed = true;
        }

        if let Some(name) = shared.rename.take() {
            if let Some(rank) = self.last_rank {
                changed |= self.table.rename(rank, name);
            }
        }

        if changed || shared.high_scores.is_empty() {
            shared.high_scores.publish(self.table.clone());
        }
    }

    pub fn table(&self) -> &HighScores {
        &self.table
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Score;

    #[test]
    fn rename_applies_to_the_latest_entry() {
        let mut task = ScoreTask::new();
        let mut shared = Shared::new();
        shared.finished.publish(Score {
            points: 400,
            player: Some("tetrisdominator420"),
            ..Score::default()
        });
        task.step(&mut shared);

        shared.rename.publish("fischlipp");
        task.step(&mut shared);

        let table = shared.high_scores.peek().cloned().unwrap_or_default();
        assert_eq!(table.entries()[0].player, Some("fischlipp"));
    }

    #[test]
    fn rename_without_placement_changes_nothing() {
        let mut task = ScoreTask::new();
        let mut shared = Shared::new();
        shared.finished.publish(Score::default());
        task.step(&mut shared);
        shared.rename.publish("fischlipp");
        task.step(&mut shared);
        assert!(task.table().entries().is_empty());
    }
}
