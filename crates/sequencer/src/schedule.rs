//! When each status is reached, measured from checkout.

use std::time::Duration;

use domain::OrderStatus;
use serde::Serialize;

use crate::error::ScheduleError;

/// A status and the delay after checkout at which it is entered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ScheduledStatus {
    pub status: OrderStatus,
    pub after: Duration,
}

/// Offsets for every status after `Pending`, strictly increasing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusSchedule {
    steps: [ScheduledStatus; 4],
}

impl StatusSchedule {
    /// Builds a schedule from the four offsets.
    pub fn new(
        confirmed: Duration,
        preparing: Duration,
        ready: Duration,
        delivered: Duration,
    ) -> Result<Self, ScheduleError> {
        let steps = [
            ScheduledStatus {
                status: OrderStatus::Confirmed,
                after: confirmed,
            },
            ScheduledStatus {
                status: OrderStatus::Preparing,
                after: preparing,
            },
            ScheduledStatus {
                status: OrderStatus::Ready,
                after: ready,
            },
            ScheduledStatus {
                status: OrderStatus::Delivered,
                after: delivered,
            },
        ];

        for pair in steps.windows(2) {
            if let [previous, step] = pair
                && step.after <= previous.after
            {
                return Err(ScheduleError::OutOfOrder {
                    status: step.status,
                    after: step.after,
                    previous: previous.after,
                });
            }
        }

        Ok(Self { steps })
    }

    /// Returns the steps in the order they fire.
    pub fn steps(&self) -> &[ScheduledStatus] {
        &self.steps
    }

    /// Returns the offset at which `status` is entered. `Pending` is entered
    /// at checkout.
    pub fn offset_of(&self, status: OrderStatus) -> Duration {
        self.steps
            .iter()
            .find(|step| step.status == status)
            .map(|step| step.after)
            .unwrap_or(Duration::ZERO)
    }

    /// Returns the time from checkout to delivery.
    pub fn total(&self) -> Duration {
        self.offset_of(OrderStatus::Delivered)
    }
}

impl Default for StatusSchedule {
    fn default() -> Self {
        Self {
            steps: [
                ScheduledStatus {
                    status: OrderStatus::Confirmed,
                    after: Duration::from_secs(2),
                },
                ScheduledStatus {
                    status: OrderStatus::Preparing,
                    after: Duration::from_secs(5),
                },
                ScheduledStatus {
                    status: OrderStatus::Ready,
                    after: Duration::from_secs(8),
                },
                ScheduledStatus {
                    status: OrderStatus::Delivered,
                    after: Duration::from_secs(11),
                },
            ],
        }
    }
}
