//! Declarative `{delay, action}` sequences driven by the frame clock.
//!
//! A [`Timeline`] is plain data; a [`TimelinePlayer`] walks it as time is
//! fed in and hands back the actions that became due. Steps always come
//! out in declaration order and a single `cancel` drops everything left.

use smallvec::SmallVec;
use std::time::Duration;

#[derive(Clone, Debug, PartialEq)]
pub struct TimelineStep<A> {
    pub at: Duration,
    pub action: A,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Timeline<A> {
    steps: Vec<TimelineStep<A>>,
}

impl<A> Default for Timeline<A> {
    fn default() -> Self {
        Self { steps: Vec::new() }
    }
}

impl<A> Timeline<A> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `action`, due `delay` after the previous step.
    pub fn then(mut self, delay: Duration, action: A) -> Self {
        let at = self.end() + delay;
        self.steps.push(TimelineStep { at, action });
        self
    }

    pub fn steps(&self) -> &[TimelineStep<A>] {
        &self.steps
    }

    /// Offset of the last step.
    pub fn end(&self) -> Duration {
        self.steps.last().map(|s| s.at).unwrap_or(Duration::ZERO)
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
}

pub type DueActions<A> = SmallVec<[A; 4]>;

#[derive(Clone, Debug)]
pub struct TimelinePlayer<A> {
    timeline: Timeline<A>,
    elapsed: Duration,
    next: usize,
    cancelled: bool,
}

impl<A: Clone> TimelinePlayer<A> {
    pub fn new(timeline: Timeline<A>) -> Self {
        Self {
            timeline,
            elapsed: Duration::ZERO,
            next: 0,
            cancelled: false,
        }
    }

    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    pub fn advance(&mut self, dt: Duration) -> DueActions<A> {
        let mut due = DueActions::new();
        if self.cancelled {
            return due;
        }
        self.elapsed += dt;
        while let Some(step) = self.timeline.steps.get(self.next) {
            if step.at > self.elapsed {
                break;
            }
            due.push(step.action.clone());
            self.next += 1;
        }
        due
    }

    pub fn cancel(&mut self) {
        if !self.cancelled && !self.is_finished() {
            log::debug!(
                "[timeline] cancelled with {} step(s) pending",
                self.timeline.len() - self.next
            );
        }
        self.cancelled = true;
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled
    }

    pub fn is_finished(&self) -> bool {
        self.next >= self.timeline.len()
    }

    pub fn pending(&self) -> usize {
        if self.cancelled {
            0
        } else {
            self.timeline.len() - self.next
        }
    }
}
