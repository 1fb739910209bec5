//! Rewards ledger: point balance, claimable rewards and achievement progress.
//!
//! A ledger is loaded from and saved to a TOML catalog file.

use crate::error::{ApiError, ClaimError};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::info;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RewardCategory {
    Discount,
    Freebie,
    Cashback,
    Exclusive,
}

impl RewardCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            RewardCategory::Discount => "discount",
            RewardCategory::Freebie => "freebie",
            RewardCategory::Cashback => "cashback",
            RewardCategory::Exclusive => "exclusive",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reward {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub points_required: u32,
    pub category: RewardCategory,
    #[serde(default)]
    pub retailer: Option<String>,
    #[serde(default)]
    pub expiry_date: Option<NaiveDate>,
    #[serde(default)]
    pub claimed: bool,
}

impl Reward {
    pub fn is_expired(&self, today: NaiveDate) -> bool {
        self.expiry_date.map_or(false, |expiry| today > expiry)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Achievement {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub progress: u32,
    pub target: u32,
    /// What completing the achievement earns, e.g. "500 points"
    #[serde(default)]
    pub reward: String,
}

impl Achievement {
    pub fn is_completed(&self) -> bool {
        self.progress >= self.target
    }

    /// Completion percentage, capped at 100.
    pub fn progress_percent(&self) -> u8 {
        if self.target == 0 {
            return 100;
        }
        let percent = (u64::from(self.progress) * 100) / u64::from(self.target);
        percent.min(100) as u8
    }
}

/// Result of a successful claim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClaimReceipt {
    pub reward_id: String,
    pub title: String,
    pub points_spent: u32,
    pub points_remaining: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RewardsLedger {
    pub points: u32,
    #[serde(default)]
    pub rewards: Vec<Reward>,
    #[serde(default)]
    pub achievements: Vec<Achievement>,
}

impl RewardsLedger {
    pub fn load_from_file(path: &Path) -> Result<Self, ApiError> {
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| {
            ApiError::InvalidInput(format!(
                "Failed to parse rewards catalog {}: {}",
                path.display(),
                e
            ))
        })
    }

    pub fn save_to_file(&self, path: &Path) -> Result<(), ApiError> {
        let content = toml::to_string_pretty(self).map_err(|e| {
            ApiError::InvalidInput(format!("Failed to serialize rewards catalog: {}", e))
        })?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn reward(&self, reward_id: &str) -> Option<&Reward> {
        self.rewards.iter().find(|r| r.id == reward_id)
    }

    /// Whether a reward could be claimed right now.
    pub fn can_claim(&self, reward: &Reward, today: NaiveDate) -> bool {
        !reward.claimed && !reward.is_expired(today) && self.points >= reward.points_required
    }

    pub fn claimable_count(&self, today: NaiveDate) -> usize {
        self.rewards
            .iter()
            .filter(|r| self.can_claim(r, today))
            .count()
    }

    pub fn completed_achievements(&self) -> usize {
        self.achievements.iter().filter(|a| a.is_completed()).count()
    }

    /// Claim a reward: spends its points and marks it claimed. The ledger is
    /// unchanged when the claim is refused.
    pub fn claim(&mut self, reward_id: &str, today: NaiveDate) -> Result<ClaimReceipt, ClaimError> {
        let points = self.points;
        let reward = self
            .rewards
            .iter_mut()
            .find(|r| r.id == reward_id)
            .ok_or_else(|| ClaimError::UnknownReward(reward_id.to_string()))?;

        if reward.claimed {
            return Err(ClaimError::AlreadyClaimed(reward_id.to_string()));
        }
        if let Some(expired_on) = reward.expiry_date.filter(|expiry| today > *expiry) {
            return Err(ClaimError::Expired { expired_on });
        }
        if points < reward.points_required {
            return Err(ClaimError::InsufficientPoints {
                required: reward.points_required,
                available: points,
            });
        }

        reward.claimed = true;
        let spent = reward.points_required;
        let title = reward.title.clone();
        self.points = points - spent;
        info!(reward_id, points_spent = spent, points_remaining = self.points, "Reward claimed");

        Ok(ClaimReceipt {
            reward_id: reward_id.to_string(),
            title,
            points_spent: spent,
            points_remaining: self.points,
        })
    }
}
