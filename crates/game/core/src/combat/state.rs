//! Ephemeral per-combatant state, alive for one resolution only.

use super::damage::apply_damage;
use super::log::CombatantSnapshot;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CombatantState {
    pub name: String,
    pub hp: u32,
    pub max_hp: u32,
    pub energy: u32,
    pub max_energy: u32,
    pub shield: u32,
    /// Own actions left before the shield expires.
    pub shield_turns: u32,
}

impl CombatantState {
    pub fn new(name: impl Into<String>, max_hp: u32, max_energy: u32) -> Self {
        Self {
            name: name.into(),
            hp: max_hp,
            max_hp,
            energy: 0,
            max_energy,
            shield: 0,
            shield_turns: 0,
        }
    }

    pub fn is_alive(&self) -> bool {
        self.hp > 0
    }

    /// Start-of-action upkeep: regenerate energy and tick the shield.
    ///
    /// Returns true if the shield expired during this upkeep.
    pub fn upkeep(&mut self, regen: u32) -> bool {
        self.energy = self.energy.saturating_add(regen).min(self.max_energy);
        if self.shield_turns > 0 {
            self.shield_turns -= 1;
            if self.shield_turns == 0 {
                let expired = self.shield > 0;
                self.shield = 0;
                return expired;
            }
        }
        false
    }

    pub fn spend(&mut self, energy: u32) {
        self.energy = self.energy.saturating_sub(energy);
    }

    /// Replaces any active shield.
    pub fn raise_shield(&mut self, amount: u32, duration: u32) {
        self.shield = amount;
        self.shield_turns = duration;
    }

    /// Consumes shield against incoming damage; returns the absorbed amount.
    pub fn absorb(&mut self, damage: u32) -> u32 {
        let absorbed = self.shield.min(damage);
        self.shield -= absorbed;
        absorbed
    }

    pub fn take(&mut self, damage: u32) {
        self.hp = apply_damage(self.hp, damage);
    }

    /// Heals up to max hp; returns the amount actually restored.
    pub fn heal(&mut self, amount: u32) -> u32 {
        let healed = amount.min(self.max_hp - self.hp);
        self.hp += healed;
        healed
    }

    pub fn snapshot(&self) -> CombatantSnapshot {
        CombatantSnapshot {
            name: self.name.clone(),
            hp: self.hp,
            max_hp: self.max_hp,
            energy: self.energy,
            max_energy: self.max_energy,
        }
    }
}
