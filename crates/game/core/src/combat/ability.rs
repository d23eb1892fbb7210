//! Special abilities and their selection rule.

use crate::catalog::SkillDefinition;

/// What an ability does when used.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "type", rename_all = "snake_case"))]
pub enum AbilityEffect {
    /// Damaging attack: `multiplier` scales attack, `armor_pierce` ignores a
    /// fraction of the target's defense.
    Strike { multiplier: f64, armor_pierce: f64 },
    /// Shield worth `hp_ratio` of max hp, expiring after `duration` of the
    /// owner's own actions.
    Shield { hp_ratio: f64, duration: u32 },
    /// Restores `hp_ratio` of max hp.
    Heal { hp_ratio: f64 },
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Ability {
    pub id: String,
    pub name: String,
    pub energy_cost: u32,
    pub effect: AbilityEffect,
}

impl From<&SkillDefinition> for Ability {
    fn from(skill: &SkillDefinition) -> Self {
        Self {
            id: skill.id.clone(),
            name: skill.name.clone(),
            energy_cost: skill.energy_cost,
            effect: skill.effect.clone(),
        }
    }
}

/// Picks the most expensive ability affordable with `energy`.
///
/// Ties keep the earliest declared ability. `None` means a basic attack.
pub fn select_ability(abilities: &[Ability], energy: u32) -> Option<&Ability> {
    abilities
        .iter()
        .filter(|ability| ability.energy_cost <= energy)
        .fold(None, |best: Option<&Ability>, candidate| match best {
            Some(current) if current.energy_cost >= candidate.energy_cost => Some(current),
            _ => Some(candidate),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strike(id: &str, cost: u32) -> Ability {
        Ability {
            id: id.into(),
            name: id.into(),
            energy_cost: cost,
            effect: AbilityEffect::Strike {
                multiplier: 1.5,
                armor_pierce: 0.0,
            },
        }
    }

    #[test]
    fn picks_highest_affordable_cost() {
        let abilities = [strike("small", 30), strike("big", 90), strike("mid", 60)];
        assert_eq!(select_ability(&abilities, 75).map(|a| a.id.as_str()), Some("mid"));
        assert_eq!(select_ability(&abilities, 100).map(|a| a.id.as_str()), Some("big"));
        assert!(select_ability(&abilities, 15).is_none());
    }

    #[test]
    fn ties_keep_declaration_order() {
        let abilities = [strike("first", 45), strike("second", 45)];
        assert_eq!(
            select_ability(&abilities, 45).map(|a| a.id.as_str()),
            Some("first")
        );
    }
}
