use std::time::Duration;

use log::warn;

use crate::constants::*;
use crate::error::{Error, Result};

/// Rotation period and the offsets of each phase from the start of a cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timing {
    period: Duration,
    frame_yield: Duration,
    fly_out: Duration,
    total: Duration,
    restack: Duration,
}

impl Timing {
    pub fn new(period: Duration, frame_yield: Duration, fly_out: Duration, total: Duration) -> Result<Self> {
        if period.is_zero() {
            return Err(Error::ZeroPeriod);
        }
        if frame_yield >= fly_out {
            return Err(Error::FrameYield { frame_yield, fly_out });
        }
        if fly_out >= total {
            return Err(Error::PhaseOrder { fly_out, total });
        }
        if period < total {
            warn!(
                "rotation period {:?} is shorter than the {:?} transition, cycles will be cut short",
                period, total
            );
        }
        Ok(Self {
            period,
            frame_yield,
            fly_out,
            total,
            restack: Duration::from_millis(RESTACK_MS),
        })
    }

    pub fn from_millis(period: u64, frame_yield: u64, fly_out: u64, total: u64) -> Result<Self> {
        Self::new(
            Duration::from_millis(period),
            Duration::from_millis(frame_yield),
            Duration::from_millis(fly_out),
            Duration::from_millis(total),
        )
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    pub fn frame_yield(&self) -> Duration {
        self.frame_yield
    }

    pub fn fly_out(&self) -> Duration {
        self.fly_out
    }

    pub fn total(&self) -> Duration {
        self.total
    }

    pub fn slide_behind(&self) -> Duration {
        self.total - self.fly_out
    }

    pub fn restack(&self) -> Duration {
        self.restack
    }
}

impl Default for Timing {
    fn default() -> Self {
        Self {
            period: Duration::from_millis(ROTATION_PERIOD_MS),
            frame_yield: Duration::from_millis(FRAME_YIELD_MS),
            fly_out: Duration::from_millis(FLY_OUT_MS),
            total: Duration::from_millis(TRANSITION_MS),
            restack: Duration::from_millis(RESTACK_MS),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_rotation_constants() {
        let t = Timing::default();
        assert_eq!(Timing::from_millis(4500, 16, 520, 900).unwrap(), t);
        assert_eq!(t.slide_behind(), Duration::from_millis(380));
    }

    #[test]
    fn invalid_orderings_are_rejected() {
        assert!(matches!(Timing::from_millis(0, 16, 520, 900), Err(Error::ZeroPeriod)));
        assert!(matches!(Timing::from_millis(4500, 600, 520, 900), Err(Error::FrameYield { .. })));
        assert!(matches!(Timing::from_millis(4500, 16, 900, 900), Err(Error::PhaseOrder { .. })));
    }

    #[test]
    fn short_period_is_allowed() {
        assert!(Timing::from_millis(600, 16, 520, 900).is_ok());
    }
}
