pub mod auth_state;
pub mod gesture;
pub mod ledger;
pub mod notices;
pub mod queue;

pub use auth_state::AuthState;
pub use gesture::{CardPose, GestureSettings, Point, ReleaseOutcome, SwipeDirection, SwipeEngine};
pub use ledger::{DecisionLedger, LedgerStats};
pub use notices::{Notice, NoticeBoard, NoticeLevel};
pub use queue::{QueueSlot, RecommendationQueue, RunTicket};
