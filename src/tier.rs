//! Severity tiers derived from demon ratings.
//!
//! Tiers are display hints only. Both classifiers are total over their rating
//! domain and reject anything outside it instead of guessing a bucket.

use anyhow::{Result, bail};
use serde::Serialize;
use std::fmt;
use std::ops::RangeInclusive;

pub const POWER_DOMAIN: RangeInclusive<u8> = 1..=5;
pub const DANGER_DOMAIN: RangeInclusive<u8> = 1..=4;

#[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    Low,
    Medium,
    High,
}

impl Tier {
    pub fn as_str(self) -> &'static str {
        match self {
            Tier::Low => "low",
            Tier::Medium => "medium",
            Tier::High => "high",
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classify a power rating in `1..=5`.
pub fn power_tier(power: u8) -> Result<Tier> {
    check_domain("power", power, &POWER_DOMAIN)?;
    Ok(match power {
        0..=2 => Tier::Low,
        3..=4 => Tier::Medium,
        _ => Tier::High,
    })
}

/// Classify a danger rating in `1..=4`.
pub fn danger_tier(danger: u8) -> Result<Tier> {
    check_domain("danger", danger, &DANGER_DOMAIN)?;
    Ok(match danger {
        0..=2 => Tier::Low,
        3 => Tier::Medium,
        _ => Tier::High,
    })
}

fn check_domain(rating: &str, value: u8, domain: &RangeInclusive<u8>) -> Result<()> {
    if !domain.contains(&value) {
        bail!(
            "{rating} rating {value} outside {}..={}",
            domain.start(),
            domain.end()
        );
    }
    Ok(())
}

/// One row of a rating legend.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LegendEntry {
    pub label: &'static str,
    pub tier: Tier,
    pub meaning: &'static str,
}

/// Power bands as presented in the "about" section.
pub fn power_legend() -> Result<Vec<LegendEntry>> {
    let bands: [(&str, u8, &str); 3] = [
        ("1-2", 1, "Минимальная угроза - подходит новичкам"),
        ("3-4", 3, "Средняя угроза - требуется опыт"),
        ("5", 5, "Высокая угроза - только для профи"),
    ];
    bands
        .into_iter()
        .map(|(label, sample, meaning)| {
            Ok(LegendEntry {
                label,
                tier: power_tier(sample)?,
                meaning,
            })
        })
        .collect()
}

/// Danger levels as presented in the "about" section.
pub fn danger_legend() -> Result<Vec<LegendEntry>> {
    let levels: [(&str, u8, &str); 4] = [
        ("1", 1, "Безопасный - минимальный риск травм"),
        ("2", 2, "Осторожность - возможны лёгкие травмы"),
        ("3", 3, "Опасный - риск серьёзных травм"),
        ("4", 4, "Смертельный - высокий риск летального исхода"),
    ];
    levels
        .into_iter()
        .map(|(label, sample, meaning)| {
            Ok(LegendEntry {
                label,
                tier: danger_tier(sample)?,
                meaning,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn power_tiers_cover_domain() {
        let tiers: Vec<Tier> = POWER_DOMAIN.map(|p| power_tier(p).unwrap()).collect();
        assert_eq!(
            tiers,
            vec![Tier::Low, Tier::Low, Tier::Medium, Tier::Medium, Tier::High]
        );
    }

    #[test]
    fn danger_tiers_cover_domain() {
        let tiers: Vec<Tier> = DANGER_DOMAIN.map(|d| danger_tier(d).unwrap()).collect();
        assert_eq!(tiers, vec![Tier::Low, Tier::Low, Tier::Medium, Tier::High]);
    }

    #[test]
    fn out_of_domain_ratings_are_rejected() {
        for power in [0, 6, u8::MAX] {
            let err = power_tier(power).expect_err("power outside domain");
            assert!(err.to_string().contains("power rating"), "{err}");
        }
        for danger in [0, 5] {
            let err = danger_tier(danger).expect_err("danger outside domain");
            assert!(err.to_string().contains("1..=4"), "{err}");
        }
    }

    #[test]
    fn legends_use_classifier_tiers() {
        let power = power_legend().unwrap();
        assert_eq!(
            power.iter().map(|entry| entry.tier).collect::<Vec<_>>(),
            vec![Tier::Low, Tier::Medium, Tier::High]
        );
        let danger = danger_legend().unwrap();
        assert_eq!(danger.len(), 4);
        assert_eq!(danger[2].tier, Tier::Medium);
        assert_eq!(danger[3].tier, Tier::High);
    }

    #[test]
    fn tier_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Tier::Medium).unwrap(), "\"medium\"");
        assert_eq!(Tier::High.to_string(), "high");
    }
}
