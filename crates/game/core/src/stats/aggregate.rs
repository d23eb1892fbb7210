//! Folding persisted character state into a [`CombatStats`] snapshot.

use crate::catalog::{BonusKind, GameData, StatBonus};

use super::bonus::{Bonus, BonusStack};
use super::combat::CombatStats;

/// Persisted attributes a character contributes on its own.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CharacterProfile {
    pub realm_index: usize,
    /// Body-tempering points; each adds hp, attack and defense to the realm base.
    pub body_strength: u32,
    pub spiritual_root: Option<String>,
}

impl CharacterProfile {
    pub const HP_PER_BODY: f64 = 10.0;
    pub const ATTACK_PER_BODY: f64 = 0.5;
    pub const DEFENSE_PER_BODY: f64 = 1.5;
}

/// Time-limited server-wide buff (seasonal event, weekend bonus).
///
/// Times are unix seconds; the caller decides which modifiers are active.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GlobalModifier {
    pub name: String,
    pub bonus: StatBonus,
    pub starts_at: i64,
    pub expires_at: i64,
}

impl GlobalModifier {
    pub fn is_active(&self, now: i64) -> bool {
        self.starts_at <= now && now <= self.expires_at
    }
}

/// Per-stat accumulation of every bonus source.
#[derive(Clone, Debug, Default)]
struct StatBonuses {
    hp: BonusStack,
    attack: BonusStack,
    defense: BonusStack,
    speed: f64,
    crit_rate: f64,
    crit_damage: f64,
    dodge_rate: f64,
    hit_rate: f64,
    lifesteal_rate: f64,
    counter_rate: f64,
    crit_resist: f64,
    lifesteal_resist: f64,
    counter_resist: f64,
}

impl StatBonuses {
    fn add(&mut self, bonus: &StatBonus) {
        // Non-finite values count as no contribution.
        if !bonus.value.is_finite() {
            return;
        }
        let value = bonus.value;
        match bonus.kind {
            BonusKind::HpAdd => self.hp.add(Bonus::Flat(value)),
            BonusKind::AtkAdd => self.attack.add(Bonus::Flat(value)),
            BonusKind::DefAdd => self.defense.add(Bonus::Flat(value)),
            BonusKind::HpMul => self.hp.add(Bonus::More(value)),
            BonusKind::AtkMul => self.attack.add(Bonus::More(value)),
            BonusKind::DefMul => self.defense.add(Bonus::More(value)),
            BonusKind::SpeedAdd => self.speed += value,
            BonusKind::CritRateAdd => self.crit_rate += value,
            BonusKind::CritDamageAdd => self.crit_damage += value,
            BonusKind::DodgeRateAdd => self.dodge_rate += value,
            BonusKind::HitRateAdd => self.hit_rate += value,
            BonusKind::LifestealRateAdd => self.lifesteal_rate += value,
            BonusKind::CounterRateAdd => self.counter_rate += value,
            BonusKind::CritResistAdd => self.crit_resist += value,
            BonusKind::LifestealResistAdd => self.lifesteal_resist += value,
            BonusKind::CounterResistAdd => self.counter_resist += value,
            BonusKind::Unrecognized => {}
        }
    }

    fn extend<'a>(&mut self, bonuses: impl IntoIterator<Item = &'a StatBonus>) {
        for bonus in bonuses {
            self.add(bonus);
        }
    }
}

fn whole(value: f64) -> u32 {
    if value.is_finite() && value > 0.0 {
        // `as` saturates at u32::MAX
        value.floor() as u32
    } else {
        0
    }
}

/// Folds a character's persisted state into one combat snapshot.
///
/// # Formula
///
/// ```text
/// hp/attack/defense = floor((realm base + body bonus + Σ flat) × Π multipliers)
/// speed             = floor(realm base + Σ flat)
/// rates             = realm base + Σ flat   (lifesteal/counter have no realm base)
/// ```
///
/// Every input that fails to resolve (unknown realm, item, passive or root id)
/// contributes nothing; the result is always a valid snapshot.
pub fn aggregate<'a>(
    data: &GameData,
    character: &CharacterProfile,
    equipped_items: impl IntoIterator<Item = &'a str>,
    unlocked_passives: impl IntoIterator<Item = &'a str>,
    guild_level: Option<u32>,
    active_modifiers: &[GlobalModifier],
) -> CombatStats {
    let realm = data.realm(character.realm_index).cloned().unwrap_or_default();
    let body = f64::from(character.body_strength);

    let mut bonuses = StatBonuses::default();

    if let Some(root) = character
        .spiritual_root
        .as_deref()
        .and_then(|id| data.spiritual_root(id))
    {
        bonuses.add(&root.bonus);
    }
    for item in equipped_items.into_iter().filter_map(|id| data.equipment(id)) {
        bonuses.extend(&item.bonuses);
    }
    for passive in unlocked_passives
        .into_iter()
        .filter_map(|id| data.passive(id))
    {
        bonuses.extend(&passive.bonuses);
    }
    if let Some(level) = guild_level {
        bonuses.extend(data.guild_bonuses(level));
    }
    bonuses.extend(active_modifiers.iter().map(|modifier| &modifier.bonus));

    let hp = bonuses
        .hp
        .apply(realm.base_hp + body * CharacterProfile::HP_PER_BODY);
    let attack = bonuses
        .attack
        .apply(realm.base_atk + body * CharacterProfile::ATTACK_PER_BODY);
    let defense = bonuses
        .defense
        .apply(realm.base_def + body * CharacterProfile::DEFENSE_PER_BODY);

    CombatStats {
        hp: whole(hp),
        attack: whole(attack),
        defense: whole(defense),
        speed: whole(realm.base_speed + bonuses.speed),
        crit_rate: realm.base_crit_rate + bonuses.crit_rate,
        crit_damage: realm.base_crit_damage + bonuses.crit_damage,
        dodge_rate: realm.base_dodge_rate + bonuses.dodge_rate,
        hit_rate: realm.base_hit_rate + bonuses.hit_rate,
        lifesteal_rate: bonuses.lifesteal_rate,
        counter_rate: bonuses.counter_rate,
        crit_resist: realm.base_crit_resist + bonuses.crit_resist,
        lifesteal_resist: realm.base_lifesteal_resist + bonuses.lifesteal_resist,
        counter_resist: realm.base_counter_resist + bonuses.counter_resist,
    }
    .sanitized()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{
        EquipmentDefinition, GuildLevelBonus, PassiveDefinition, RealmDefinition, SpiritualRoot,
    };

    fn data() -> GameData {
        GameData {
            realms: vec![RealmDefinition {
                name: "Qi Refining".into(),
                base_hp: 100.0,
                base_atk: 10.0,
                base_def: 5.0,
                base_speed: 10.0,
                base_crit_rate: 0.05,
                base_crit_damage: 1.5,
                base_dodge_rate: 0.05,
                base_hit_rate: 0.02,
                ..RealmDefinition::default()
            }],
            equipment: vec![
                EquipmentDefinition {
                    id: "sword".into(),
                    name: "Iron Sword".into(),
                    slot: "weapon".into(),
                    bonuses: vec![
                        StatBonus::new(BonusKind::AtkAdd, 20.0),
                        StatBonus::new(BonusKind::CritRateAdd, 0.1),
                    ],
                },
                EquipmentDefinition {
                    id: "robe".into(),
                    name: "Jade Robe".into(),
                    slot: "armor".into(),
                    bonuses: vec![
                        StatBonus::new(BonusKind::HpMul, 1.2),
                        StatBonus::new(BonusKind::Unrecognized, 99.0),
                    ],
                },
            ],
            passives: vec![PassiveDefinition {
                id: "iron-skin".into(),
                name: "Iron Skin".into(),
                bonuses: vec![StatBonus::new(BonusKind::HpMul, 1.5)],
            }],
            spiritual_roots: vec![SpiritualRoot {
                id: "metal".into(),
                name: "Metal Root".into(),
                bonus: StatBonus::new(BonusKind::AtkMul, 1.1),
            }],
            guild_levels: vec![GuildLevelBonus {
                level: 2,
                bonuses: vec![StatBonus::new(BonusKind::DefAdd, 5.0)],
            }],
            ..GameData::default()
        }
    }

    fn profile() -> CharacterProfile {
        CharacterProfile {
            realm_index: 0,
            body_strength: 10,
            spiritual_root: Some("metal".into()),
        }
    }

    #[test]
    fn flat_before_multipliers_and_multipliers_compound() {
        let stats = aggregate(
            &data(),
            &profile(),
            ["sword", "robe"],
            ["iron-skin"],
            Some(3),
            &[],
        );

        // hp: (100 + 10×10) × 1.2 × 1.5 = 360
        assert_eq!(stats.hp, 360);
        // attack: (10 + 10×0.5 + 20) × 1.1 = 38.5
        assert_eq!(stats.attack, 38);
        // defense: 5 + 10×1.5 + 5 (guild tier 2)
        assert_eq!(stats.defense, 25);
        assert!((stats.crit_rate - 0.15).abs() < 1e-9);
        assert_eq!(stats.lifesteal_rate, 0.0);
    }

    #[test]
    fn unknown_references_contribute_nothing() {
        let baseline = aggregate(&data(), &profile(), [], [], None, &[]);
        let with_missing = aggregate(
            &data(),
            &profile(),
            ["ghost-item"],
            ["ghost-passive"],
            None,
            &[],
        );
        assert_eq!(baseline, with_missing);
    }

    #[test]
    fn missing_realm_still_produces_valid_stats() {
        let character = CharacterProfile {
            realm_index: 42,
            ..CharacterProfile::default()
        };
        let stats = aggregate(&data(), &character, [], [], None, &[]);
        assert!(stats.validate().is_ok());
        assert_eq!(stats.hp, 1);
    }

    #[test]
    fn global_modifiers_fold_like_any_other_source() {
        let modifier = GlobalModifier {
            name: "Double Dragon Festival".into(),
            bonus: StatBonus::new(BonusKind::AtkMul, 2.0),
            starts_at: 0,
            expires_at: 100,
        };
        assert!(modifier.is_active(50));
        assert!(!modifier.is_active(101));

        let character = CharacterProfile::default();
        let stats = aggregate(&data(), &character, [], [], None, &[modifier]);
        assert_eq!(stats.attack, 20);
    }
}
