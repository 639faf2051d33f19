//! Player-controlled ship state.

use std::time::Duration;

use star_siege_core::{EntityId, WeaponKind, GAUGE_MAX, HERO_MAX_LIFE};

/// Hero payload carried by the hero entity.
#[derive(Clone, Debug, PartialEq)]
pub struct Hero {
    life: u32,
    shield_count: u32,
    points: u32,
    cooldown: Duration,
    gauge: u32,
    weapon: WeaponKind,
    escorts: [EntityId; 2],
}

impl Hero {
    pub(crate) fn new(escorts: [EntityId; 2]) -> Self {
        Self {
            life: HERO_MAX_LIFE,
            shield_count: 0,
            points: 0,
            cooldown: Duration::ZERO,
            gauge: 0,
            weapon: WeaponKind::default(),
            escorts,
        }
    }

    /// Remaining lives.
    #[must_use]
    pub const fn life(&self) -> u32 {
        self.life
    }

    /// Shield charges that absorb hits before lives are lost.
    #[must_use]
    pub const fn shield_count(&self) -> u32 {
        self.shield_count
    }

    /// Score accumulated so far.
    #[must_use]
    pub const fn points(&self) -> u32 {
        self.points
    }

    /// Meteor gauge charge in `0..=GAUGE_MAX`.
    #[must_use]
    pub const fn gauge(&self) -> u32 {
        self.gauge
    }

    /// Weapon currently selected.
    #[must_use]
    pub const fn weapon(&self) -> WeaponKind {
        self.weapon
    }

    /// Time left before the next shot.
    #[must_use]
    pub const fn cooldown(&self) -> Duration {
        self.cooldown
    }

    /// Escort entities slaved to the hero.
    #[must_use]
    pub const fn escorts(&self) -> [EntityId; 2] {
        self.escorts
    }

    /// Reports whether the weapon cooldown elapsed.
    #[must_use]
    pub fn can_fire(&self) -> bool {
        self.cooldown.is_zero()
    }

    /// Reports whether the gauge is full enough for a meteor strike.
    #[must_use]
    pub const fn can_use_meteor(&self) -> bool {
        self.gauge >= GAUGE_MAX
    }

    /// Adds points to the score.
    pub fn add_points(&mut self, amount: u32) {
        self.points = self.points.saturating_add(amount);
    }

    /// Charges the gauge, saturating at `GAUGE_MAX`.
    pub fn add_gauge(&mut self, amount: u32) {
        self.gauge = self.gauge.saturating_add(amount).min(GAUGE_MAX);
    }

    /// Grants one shield charge.
    pub fn add_shield(&mut self) {
        self.shield_count = self.shield_count.saturating_add(1);
    }

    /// Spends a shield charge or a life; returns `true` once no life is left.
    pub(crate) fn absorb_hit(&mut self) -> bool {
        if self.shield_count > 0 {
            self.shield_count -= 1;
            return false;
        }

        self.life = self.life.saturating_sub(1);
        self.life == 0
    }

    pub(crate) fn cycle_weapon(&mut self) {
        self.weapon = self.weapon.next();
    }

    pub(crate) fn arm_cooldown(&mut self) {
        self.cooldown = self.weapon.cooldown();
    }

    pub(crate) fn decay_cooldown(&mut self, dt: Duration) {
        self.cooldown = self.cooldown.saturating_sub(dt);
    }

    pub(crate) fn drain_gauge(&mut self) {
        self.gauge = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hero() -> Hero {
        Hero::new([EntityId::new(1), EntityId::new(2)])
    }

    #[test]
    fn shield_absorbs_before_life() {
        let mut hero = hero();
        hero.add_shield();
        assert!(!hero.absorb_hit());
        assert_eq!(hero.shield_count(), 0);
        assert_eq!(hero.life(), HERO_MAX_LIFE);

        assert!(!hero.absorb_hit());
        assert_eq!(hero.life(), HERO_MAX_LIFE - 1);
    }

    #[test]
    fn life_never_drops_below_zero() {
        let mut hero = hero();
        assert!(!hero.absorb_hit());
        assert!(!hero.absorb_hit());
        assert!(hero.absorb_hit());
        assert!(hero.absorb_hit());
        assert_eq!(hero.life(), 0);
    }

    #[test]
    fn gauge_saturates_at_maximum() {
        let mut hero = hero();
        for _ in 0..6 {
            hero.add_gauge(200);
        }
        assert_eq!(hero.gauge(), GAUGE_MAX);
        assert!(hero.can_use_meteor());
        hero.drain_gauge();
        assert!(!hero.can_use_meteor());
    }

    #[test]
    fn cooldown_follows_selected_weapon() {
        let mut hero = hero();
        hero.cycle_weapon();
        hero.arm_cooldown();
        assert_eq!(hero.cooldown(), Duration::from_millis(300));
        assert!(!hero.can_fire());
        hero.decay_cooldown(Duration::from_millis(100));
        hero.decay_cooldown(Duration::from_millis(100));
        hero.decay_cooldown(Duration::from_millis(100));
        assert!(hero.can_fire());
    }
}
