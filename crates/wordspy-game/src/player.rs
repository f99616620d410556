//! The per-player roster entry.

use wordspy_protocol::{PlayerId, PlayerStatus, Role};

/// One seat on a room's roster.
///
/// Secret fields (`role`, `word`) never leave this crate unredacted:
/// snapshots expose them only to the owning player until the game ends.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    pub status: PlayerStatus,
    pub role: Role,
    /// The secret word, set at round 1 alongside the role.
    pub word: Option<String>,
    pub points: u32,
    pub has_described: bool,
    pub has_voted: bool,
    pub is_creator: bool,
}

impl Player {
    pub(crate) fn new(id: PlayerId, name: String, status: PlayerStatus, is_creator: bool) -> Self {
        Self {
            id,
            name,
            status,
            role: Role::Unassigned,
            word: None,
            points: 0,
            has_described: false,
            has_voted: false,
            is_creator,
        }
    }

    /// A player still holding a seat in the running game: connected, or
    /// disconnected but within the grace period. Present players keep
    /// their turn slot and count toward the vote denominator.
    pub fn is_present(&self) -> bool {
        matches!(
            self.status,
            PlayerStatus::Active | PlayerStatus::Disconnected
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_present_by_status() {
        let mut player = Player::new(PlayerId(1), "Alice".into(), PlayerStatus::Active, true);
        assert!(player.is_present());

        player.status = PlayerStatus::Disconnected;
        assert!(player.is_present());

        player.status = PlayerStatus::Waiting;
        assert!(!player.is_present());

        player.status = PlayerStatus::Eliminated;
        assert!(!player.is_present());
    }
}
