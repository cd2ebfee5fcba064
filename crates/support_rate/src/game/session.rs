//! Countdown, score and support-rate bookkeeping for one round.
use std::fmt;

use tracing::{debug, info};

use crate::error::{Error, Result};

/// Scoring and timing rules.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SessionConfig {
    /// Round length in seconds.
    pub duration_secs: f32,
    /// Items needed for the completion bonus.
    pub total_items: usize,
    /// Support rate before anything is collected, in percent.
    pub base_rate: f32,
    /// Support rate gained per collected item, in percent.
    pub rate_per_item: f32,
    /// Upper bound of the support rate, in percent.
    pub max_rate: f32,
    /// Points awarded once all items are collected.
    pub completion_bonus: u32,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            duration_secs: 60.0,
            total_items: 20,
            base_rate: 30.0,
            rate_per_item: 3.0,
            max_rate: 100.0,
            completion_bonus: 100,
        }
    }
}

impl SessionConfig {
    pub fn with_duration(mut self, duration_secs: f32) -> Self {
        self.duration_secs = duration_secs;
        self
    }

    pub fn with_total_items(mut self, total_items: usize) -> Self {
        self.total_items = total_items;
        self
    }

    pub fn with_rates(mut self, base_rate: f32, rate_per_item: f32, max_rate: f32) -> Self {
        self.base_rate = base_rate;
        self.rate_per_item = rate_per_item;
        self.max_rate = max_rate;
        self
    }

    pub fn with_completion_bonus(mut self, completion_bonus: u32) -> Self {
        self.completion_bonus = completion_bonus;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if !self.duration_secs.is_finite() || self.duration_secs <= 0.0 {
            return Err(Error::InvalidConfig("duration_secs must be > 0".into()));
        }
        if !(self.base_rate.is_finite()
            && self.rate_per_item.is_finite()
            && self.max_rate.is_finite())
        {
            return Err(Error::InvalidConfig("support rates must be finite".into()));
        }
        if self.max_rate < self.base_rate {
            return Err(Error::InvalidConfig(
                "max_rate must be >= base_rate".into(),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    Playing,
    GameOver,
}

/// Result bracket shown on the game-over screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ResultTier {
    TryAgain,
    Modest,
    Majority,
    Landslide,
}

impl ResultTier {
    /// Bracket for a support rate in percent.
    pub fn from_rate(rate: f32) -> Self {
        if rate >= 70.0 {
            ResultTier::Landslide
        } else if rate >= 50.0 {
            ResultTier::Majority
        } else if rate >= 40.0 {
            ResultTier::Modest
        } else {
            ResultTier::TryAgain
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            ResultTier::Landslide => "Outstanding! A landslide of support!\nThe future looks bright!",
            ResultTier::Majority => "Well done!\nYou won majority support!",
            ResultTier::Modest => "Not bad.\nA little more effort next time!",
            ResultTier::TryAgain => "Gather more support!\nTry again!",
        }
    }
}

impl fmt::Display for ResultTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

/// Numbers shown once the round is over.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FinalSummary {
    pub score: u32,
    pub collected: usize,
    pub total_items: usize,
    pub support_rate: f32,
    pub tier: ResultTier,
}

impl fmt::Display for FinalSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Final score: {}", self.score)?;
        writeln!(f, "Items collected: {}/{}", self.collected, self.total_items)?;
        write!(f, "Final support rate: {:.1}%", self.support_rate)
    }
}

/// Something that changed the round's state.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionEvent {
    /// An item was collected.
    ItemCollected { points: u32, score: u32 },
    /// The collected item completed the set; `bonus` was added on top of `points`.
    AllCollected { points: u32, bonus: u32, score: u32 },
    /// The countdown reached zero.
    TimeUp { summary: FinalSummary },
}

/// State of one round.
#[derive(Debug, Clone)]
pub struct GameSession {
    config: SessionConfig,
    score: u32,
    collected: usize,
    remaining_secs: f32,
    phase: SessionPhase,
    bonus_awarded: bool,
}

impl GameSession {
    pub fn try_new(config: SessionConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::new(config))
    }

    pub fn new(config: SessionConfig) -> Self {
        let remaining_secs = config.duration_secs;
        Self {
            config,
            score: 0,
            collected: 0,
            remaining_secs,
            phase: SessionPhase::Playing,
            bonus_awarded: false,
        }
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn collected(&self) -> usize {
        self.collected
    }

    pub fn remaining_secs(&self) -> f32 {
        self.remaining_secs
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn is_over(&self) -> bool {
        self.phase == SessionPhase::GameOver
    }

    /// Advances the countdown by `dt` seconds. Returns [`SessionEvent::TimeUp`] on the tick that
    /// ends the round.
    pub fn tick(&mut self, dt: f32) -> Option<SessionEvent> {
        if self.is_over() {
            return None;
        }
        let dt = if dt.is_finite() { dt.max(0.0) } else { 0.0 };

        self.remaining_secs -= dt;
        if self.remaining_secs <= 0.0 {
            self.remaining_secs = 0.0;
            self.phase = SessionPhase::GameOver;
            let summary = self.summary();
            info!(
                "Time up: score {}, {}/{} items, support {:.1}%.",
                summary.score, summary.collected, summary.total_items, summary.support_rate
            );
            return Some(SessionEvent::TimeUp { summary });
        }
        None
    }

    /// Credits one collected item worth `points`. Ignored once the round is over.
    pub fn add_score(&mut self, points: u32) -> Option<SessionEvent> {
        if self.is_over() {
            return None;
        }

        self.score = self.score.saturating_add(points);
        self.collected += 1;
        debug!(
            "Collected item {} (+{}), score {}.",
            self.collected, points, self.score
        );

        if !self.bonus_awarded && self.collected >= self.config.total_items {
            self.bonus_awarded = true;
            let bonus = self.config.completion_bonus;
            self.score = self.score.saturating_add(bonus);
            info!("All {} items collected; bonus +{}.", self.collected, bonus);
            return Some(SessionEvent::AllCollected {
                points,
                bonus,
                score: self.score,
            });
        }

        Some(SessionEvent::ItemCollected {
            points,
            score: self.score,
        })
    }

    /// Support rate in percent, capped at the configured maximum.
    pub fn support_rate(&self) -> f32 {
        let rate = self.config.base_rate + self.collected as f32 * self.config.rate_per_item;
        rate.min(self.config.max_rate)
    }

    pub fn result_tier(&self) -> ResultTier {
        ResultTier::from_rate(self.support_rate())
    }

    pub fn summary(&self) -> FinalSummary {
        FinalSummary {
            score: self.score,
            collected: self.collected,
            total_items: self.config.total_items,
            support_rate: self.support_rate(),
            tier: self.result_tier(),
        }
    }

    /// Remaining time as `MM:SS`.
    pub fn timer_display(&self) -> String {
        let remaining = self.remaining_secs.max(0.0);
        let minutes = (remaining / 60.0).floor() as u32;
        let seconds = (remaining % 60.0).floor() as u32;
        format!("{minutes:02}:{seconds:02}")
    }

    /// Support rate as a one-decimal percentage.
    pub fn support_rate_display(&self) -> String {
        format!("{:.1}%", self.support_rate())
    }

    /// Resets the round to its initial state.
    pub fn restart(&mut self) {
        *self = Self::new(self.config.clone());
    }
}
