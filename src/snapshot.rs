//! Frame-to-frame reconciliation by entity id.
//!
//! The renderer never keeps handles into the simulation; anything that
//! needs to react to entities appearing or vanishing compares two
//! consecutive snapshots here.

use std::collections::HashSet;

use crate::entities::{BulletOwner, Round};

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EntityDiff {
    pub destroyed_invaders: Vec<u32>,
    pub fired_by_player: Vec<u32>,
    pub fired_by_invaders: Vec<u32>,
    /// Bullets gone since the previous frame, by hit or by leaving the field.
    pub retired_bullets: Vec<u32>,
    pub lives_lost: u32,
    pub score_gained: u32,
}

impl EntityDiff {
    pub fn is_empty(&self) -> bool {
        *self == EntityDiff::default()
    }
}

pub fn diff(prev: &Round, next: &Round) -> EntityDiff {
    let live_invaders: HashSet<u32> = next.invaders.iter().map(|inv| inv.id).collect();
    let prev_bullets: HashSet<u32> = prev.bullets.iter().map(|b| b.id).collect();
    let next_bullets: HashSet<u32> = next.bullets.iter().map(|b| b.id).collect();

    let mut out = EntityDiff {
        destroyed_invaders: prev
            .invaders
            .iter()
            .map(|inv| inv.id)
            .filter(|id| !live_invaders.contains(id))
            .collect(),
        retired_bullets: prev
            .bullets
            .iter()
            .map(|b| b.id)
            .filter(|id| !next_bullets.contains(id))
            .collect(),
        lives_lost: prev.lives.saturating_sub(next.lives),
        score_gained: next.score.saturating_sub(prev.score),
        ..EntityDiff::default()
    };

    for b in next.bullets.iter().filter(|b| !prev_bullets.contains(&b.id)) {
        match b.owner {
            BulletOwner::Player => out.fired_by_player.push(b.id),
            BulletOwner::Invader => out.fired_by_invaders.push(b.id),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compute::init_state;
    use crate::config::GameConfig;
    use crate::entities::Bullet;

    #[test]
    fn identical_snapshots_have_empty_diff() {
        let s = init_state(GameConfig::default());
        assert!(diff(&s, &s).is_empty());
    }

    #[test]
    fn reports_removed_and_new_ids() {
        let prev = init_state(GameConfig::default());
        let mut next = prev.clone();
        next.invaders.retain(|inv| inv.id != 3 && inv.id != 40);
        next.bullets.push(Bullet { id: 0, x: 0.0, y: 0.0, owner: BulletOwner::Player });
        next.bullets.push(Bullet { id: 1, x: 0.0, y: 0.0, owner: BulletOwner::Invader });
        next.score = 40;
        next.lives = 2;

        let d = diff(&prev, &next);
        assert_eq!(d.destroyed_invaders, vec![3, 40]);
        assert_eq!(d.fired_by_player, vec![0]);
        assert_eq!(d.fired_by_invaders, vec![1]);
        assert!(d.retired_bullets.is_empty());
        assert_eq!(d.score_gained, 40);
        assert_eq!(d.lives_lost, 1);

        let d = diff(&next, &prev);
        assert_eq!(d.retired_bullets, vec![0, 1]);
    }
}
