pub mod session;

pub use session::{DiscoverySession, ExhaustionSummary, RefreshOutcome, SessionConfig};
