// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
// ABOUTME: Argument parsing helpers for liftlog-cli
// ABOUTME: Turns GROUP=WEIGHT text into typed muscle group entries

use liftlog::models::MuscleGroup;

/// Parse a `GROUP=WEIGHT` muscle group entry such as `chest=1200`
pub fn parse_muscle_entry(raw: &str) -> Result<(MuscleGroup, f64), String> {
    let (group, weight) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected GROUP=WEIGHT, got '{raw}'"))?;
    let group = MuscleGroup::parse(group)
        .ok_or_else(|| format!("unknown muscle group '{}'", group.trim()))?;
    let weight: f64 = weight
        .trim()
        .parse()
        .map_err(|_| format!("invalid weight '{}'", weight.trim()))?;
    if !weight.is_finite() || weight < 0.0 {
        return Err(format!("weight must be a non-negative number, got {weight}"));
    }
    Ok((group, weight))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_group_and_weight() {
        assert_eq!(
            parse_muscle_entry("chest=1200"),
            Ok((MuscleGroup::Chest, 1200.0))
        );
        assert_eq!(
            parse_muscle_entry(" Legs = 80.5 "),
            Ok((MuscleGroup::Legs, 80.5))
        );
    }

    #[test]
    fn rejects_missing_separator() {
        let error = parse_muscle_entry("chest").err().unwrap_or_default();
        assert!(error.contains("expected GROUP=WEIGHT"), "{error}");
    }

    #[test]
    fn rejects_unknown_group() {
        let error = parse_muscle_entry("wings=10").err().unwrap_or_default();
        assert_eq!(error, "unknown muscle group 'wings'");
    }

    #[test]
    fn rejects_unusable_weights() {
        let rejection = |raw: &str| parse_muscle_entry(raw).err().unwrap_or_default();
        assert_eq!(rejection("back=heavy"), "invalid weight 'heavy'");
        assert!(rejection("back=NaN").starts_with("weight must be a non-negative number"));
        assert!(rejection("back=-5").starts_with("weight must be a non-negative number"));
    }
}
