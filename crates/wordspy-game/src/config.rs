//! Tunable rule parameters.

/// Rule parameters for a room.
///
/// Every room gets a copy at creation time, so rooms created under
/// different settings keep the rules they started with.
#[derive(Debug, Clone)]
pub struct GameConfig {
    /// Minimum non-disconnected players required to start a game.
    pub min_players: usize,
    /// Hard cap on rounds per game. Reaching it without a resolution
    /// means the imposter ran out the clock and wins.
    pub max_rounds: u32,
    /// Points the imposter earns for surviving an inconclusive round.
    pub imposter_round_points: u32,
    /// Points everyone else earns for an inconclusive round.
    pub civilian_round_points: u32,
    /// Bonus for each surviving civilian when the civilians win.
    pub civilian_win_bonus: u32,
    /// Bonus for the imposter when the imposter wins.
    pub imposter_win_bonus: u32,
    /// Display names are truncated to this many characters.
    pub max_name_len: usize,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            min_players: 3,
            max_rounds: 8,
            imposter_round_points: 15,
            civilian_round_points: 10,
            civilian_win_bonus: 50,
            imposter_win_bonus: 100,
            max_name_len: 24,
        }
    }
}
