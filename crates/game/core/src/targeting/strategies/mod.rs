//! Built-in targeting strategies.

mod closest;
mod lowest_health;
mod priority;
mod threat_based;

pub use closest::ClosestStrategy;
pub use lowest_health::LowestHealthStrategy;
pub use priority::PriorityStrategy;
pub use threat_based::ThreatBasedStrategy;
