//! Shared fixtures for board unit tests.

use crate::board::{
    adapters::memory::InMemoryBoardRepository,
    services::{AggregateCalculator, MoveCoordinator, OrderedCollectionService},
};
use chrono::{DateTime, Duration, Local, TimeZone, Utc};
use mockable::Clock;
use rstest::fixture;
use std::sync::{Arc, Mutex};

/// Clock that only moves when told to.
#[derive(Debug)]
pub struct ManualClock {
    now: Mutex<DateTime<Utc>>,
}

impl ManualClock {
    pub fn at(now: DateTime<Utc>) -> Self {
        Self {
            now: Mutex::new(now),
        }
    }

    pub fn advance(&self, by: Duration) {
        let mut now = self.now.lock().expect("clock lock should not be poisoned");
        *now += by;
    }
}

impl Clock for ManualClock {
    fn local(&self) -> DateTime<Local> {
        self.utc().with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        *self.now.lock().expect("clock lock should not be poisoned")
    }
}

pub fn epoch() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 1, 5, 9, 0, 0)
        .single()
        .expect("valid fixed timestamp")
}

pub struct Harness {
    pub repository: Arc<InMemoryBoardRepository>,
    pub clock: Arc<ManualClock>,
    pub collections: OrderedCollectionService<InMemoryBoardRepository, ManualClock>,
    pub mover: MoveCoordinator<InMemoryBoardRepository, ManualClock>,
    pub calculator: AggregateCalculator<InMemoryBoardRepository, ManualClock>,
}

impl Harness {
    /// Advances the clock by one second so consecutive creations get
    /// distinct timestamps.
    pub fn tick(&self) {
        self.clock.advance(Duration::seconds(1));
    }
}

#[fixture]
pub fn harness() -> Harness {
    let repository = Arc::new(InMemoryBoardRepository::new());
    let clock = Arc::new(ManualClock::at(epoch()));
    Harness {
        collections: OrderedCollectionService::new(Arc::clone(&repository), Arc::clone(&clock)),
        mover: MoveCoordinator::new(Arc::clone(&repository), Arc::clone(&clock)),
        calculator: AggregateCalculator::new(Arc::clone(&repository), Arc::clone(&clock)),
        repository,
        clock,
    }
}
