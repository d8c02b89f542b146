//! Turn order of a round table run.
//!
//! A run is a plain sequence of turns: every participant speaks once per
//! round, in configured order, and the chairman closes each round.

/// One scheduled call in a round table run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Turn {
    /// Participant at `index` (speaking order) speaks in `round` (1-based)
    Participant { round: u32, index: usize },
    /// Chairman summarizes `round`
    Chairman { round: u32 },
}

impl Turn {
    pub fn round(&self) -> u32 {
        match self {
            Turn::Participant { round, .. } | Turn::Chairman { round } => *round,
        }
    }
}

/// Iterator over the turns of a run with `participants` speakers and `rounds` rounds
#[derive(Debug, Clone)]
pub struct TurnPlan {
    participants: usize,
    rounds: u32,
    round: u32,
    /// Position within the current round; `participants` means chairman
    slot: usize,
}

impl TurnPlan {
    pub fn new(participants: usize, rounds: u32) -> Self {
        Self {
            participants,
            rounds,
            round: 1,
            slot: 0,
        }
    }

    /// Total number of turns in the plan
    pub fn total(&self) -> usize {
        if self.participants == 0 {
            0
        } else {
            (self.participants + 1) * self.rounds as usize
        }
    }

    fn remaining(&self) -> usize {
        if self.participants == 0 || self.round > self.rounds {
            return 0;
        }
        let per_round = self.participants + 1;
        let rounds_after = (self.rounds - self.round) as usize;
        rounds_after * per_round + (per_round - self.slot)
    }
}

impl Iterator for TurnPlan {
    type Item = Turn;

    fn next(&mut self) -> Option<Turn> {
        if self.participants == 0 || self.round > self.rounds {
            return None;
        }
        let turn = if self.slot < self.participants {
            Turn::Participant {
                round: self.round,
                index: self.slot,
            }
        } else {
            Turn::Chairman { round: self.round }
        };

        self.slot += 1;
        if self.slot > self.participants {
            self.slot = 0;
            self.round += 1;
        }
        Some(turn)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.remaining();
        (n, Some(n))
    }
}

impl ExactSizeIterator for TurnPlan {}
