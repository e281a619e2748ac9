//! Order status sequencing for placed orders.
//!
//! After checkout an order advances on a fixed schedule, with no backend
//! confirmation:
//! 1. Pending (at checkout)
//! 2. Confirmed
//! 3. Preparing
//! 4. Ready
//! 5. Delivered
//!
//! The [`OrderSession`] ties the cart store to the sequencer and is the only
//! surface handed to presentation code.

pub mod error;
pub mod schedule;
pub mod sequencer;
pub mod session;

pub use error::{CheckoutError, ScheduleError, SessionError};
pub use schedule::{ScheduledStatus, StatusSchedule};
pub use sequencer::{OrderProgress, StatusSequencer};
pub use session::OrderSession;
