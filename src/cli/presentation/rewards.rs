//! Rewards command presentation: balance, reward table, achievements, claim receipts.

use crate::cli::presentation::to_json;
use crate::error::ApiError;
use crate::rewards::{ClaimReceipt, Reward, RewardsLedger};
use chrono::NaiveDate;
use comfy_table::Table;
use serde_json::json;

fn reward_status(ledger: &RewardsLedger, reward: &Reward, today: NaiveDate) -> String {
    if reward.claimed {
        "claimed".to_string()
    } else if reward.is_expired(today) {
        "expired".to_string()
    } else if ledger.can_claim(reward, today) {
        "claimable".to_string()
    } else {
        format!("need {} more", reward.points_required - ledger.points)
    }
}

pub fn format_rewards_text(ledger: &RewardsLedger, today: NaiveDate) -> String {
    let mut output = format!(
        "Points: {}\nClaimable rewards: {}\nAchievements completed: {}/{}\n",
        ledger.points,
        ledger.claimable_count(today),
        ledger.completed_achievements(),
        ledger.achievements.len()
    );

    if ledger.rewards.is_empty() {
        output.push_str("\nNo rewards available.\n");
    } else {
        let mut table = Table::new();
        table.load_preset(comfy_table::presets::UTF8_FULL);
        table.set_header(vec!["ID", "Reward", "Points", "Category", "Expires", "Status"]);
        for reward in &ledger.rewards {
            let expires = reward
                .expiry_date
                .map(|d| d.format("%Y-%m-%d").to_string())
                .unwrap_or_else(|| "-".to_string());
            let title = match &reward.retailer {
                Some(retailer) => format!("{} ({})", reward.title, retailer),
                None => reward.title.clone(),
            };
            table.add_row(vec![
                reward.id.clone(),
                title,
                reward.points_required.to_string(),
                reward.category.as_str().to_string(),
                expires,
                reward_status(ledger, reward, today),
            ]);
        }
        output.push_str(&format!("\nRewards:\n{}\n", table));
    }

    if !ledger.achievements.is_empty() {
        let mut table = Table::new();
        table.load_preset(comfy_table::presets::UTF8_FULL);
        table.set_header(vec!["Achievement", "Progress", "Complete", "Reward"]);
        for achievement in &ledger.achievements {
            table.add_row(vec![
                achievement.title.clone(),
                format!("{}/{}", achievement.progress, achievement.target),
                format!("{}%", achievement.progress_percent()),
                achievement.reward.clone(),
            ]);
        }
        output.push_str(&format!("\nAchievements:\n{}\n", table));
    }

    output.trim_end().to_string()
}

pub fn format_rewards_json(ledger: &RewardsLedger, today: NaiveDate) -> Result<String, ApiError> {
    let rewards: Vec<_> = ledger
        .rewards
        .iter()
        .map(|reward| {
            json!({
                "id": reward.id,
                "title": reward.title,
                "points_required": reward.points_required,
                "category": reward.category,
                "retailer": reward.retailer,
                "expiry_date": reward.expiry_date,
                "claimed": reward.claimed,
                "status": reward_status(ledger, reward, today),
            })
        })
        .collect();
    let achievements: Vec<_> = ledger
        .achievements
        .iter()
        .map(|a| {
            json!({
                "id": a.id,
                "title": a.title,
                "progress": a.progress,
                "target": a.target,
                "percent": a.progress_percent(),
                "completed": a.is_completed(),
                "reward": a.reward,
            })
        })
        .collect();
    to_json(&json!({
        "points": ledger.points,
        "claimable": ledger.claimable_count(today),
        "achievements_completed": ledger.completed_achievements(),
        "rewards": rewards,
        "achievements": achievements,
    }))
}

pub fn format_claim_receipt(receipt: &ClaimReceipt) -> String {
    format!(
        "Claimed '{}' for {} points. Remaining balance: {}",
        receipt.title, receipt.points_spent, receipt.points_remaining
    )
}
