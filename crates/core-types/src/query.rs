use crate::enums::Role;
use crate::structs::{DeliveryRecord, PlayerId};

/// Read-only lookups over an immutable dataset.
///
/// Metric computation and comparison only ever see a dataset through this
/// trait, never through its storage.
pub trait DeliveryQuery {
    /// Deliveries where `striker == player`, in dataset order.
    fn deliveries_as_striker(&self, player: &PlayerId) -> Vec<&DeliveryRecord>;

    /// Deliveries where `bowler == player`, in dataset order.
    fn deliveries_as_bowler(&self, player: &PlayerId) -> Vec<&DeliveryRecord>;

    /// Number of player-of-the-match awards. Zero when the player has none.
    fn award_count(&self, player: &PlayerId) -> u32;

    /// Every identifier seen as striker or bowler, ascending.
    fn roster(&self) -> Vec<&PlayerId>;

    fn contains_player(&self, player: &PlayerId) -> bool;

    fn deliveries_as(&self, player: &PlayerId, role: Role) -> Vec<&DeliveryRecord> {
        match role {
            Role::Striker => self.deliveries_as_striker(player),
            Role::Bowler => self.deliveries_as_bowler(player),
        }
    }
}
