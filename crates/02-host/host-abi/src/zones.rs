//! Well-known live collection names exposed by host adapters.

/// The player's hand of cards.
pub const HAND: &str = "hand";
/// The joker row, the target of reordering and synergy optimization.
pub const JOKERS: &str = "jokers";
/// Held consumable cards.
pub const CONSUMABLES: &str = "consumables";
