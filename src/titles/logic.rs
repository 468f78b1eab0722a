use super::data::{TITLE_ADJECTIVES, TITLE_NOUNS};
use super::types::{GeneratedTitle, Title};
use crate::core::constants::{MAX_TITLE_REROLLS, TIER_COUNT};
use crate::dice::Dice;
use crate::monster::Monster;

/// Roll a title for a defeated monster. Star rating equals the monster's tier.
pub fn generate_title(monster: &Monster, dice: &mut impl Dice) -> GeneratedTitle {
    let adjective = TITLE_ADJECTIVES[dice.pick(TITLE_ADJECTIVES.len())];
    let noun = TITLE_NOUNS[dice.pick(TITLE_NOUNS.len())];
    GeneratedTitle {
        title: format!("{}{}{}", monster.name, adjective, noun),
        star: monster.tier,
    }
}

/// Rerolls left for the title unlocked by one battle report.
#[derive(Debug, Clone)]
pub struct RerollSession {
    monster: Monster,
    used: u32,
}

impl RerollSession {
    pub fn new(monster: Monster) -> Self {
        Self { monster, used: 0 }
    }

    pub fn remaining(&self) -> u32 {
        MAX_TITLE_REROLLS.saturating_sub(self.used)
    }

    pub fn monster(&self) -> &Monster {
        &self.monster
    }

    /// Replace the most recent title with a new roll.
    ///
    /// Returns `None` without touching `titles` once the rerolls are spent.
    /// With no unlocked titles the roll is still consumed but nothing is
    /// replaced.
    pub fn reroll(
        &mut self,
        titles: &mut [Title],
        now_ms: i64,
        dice: &mut impl Dice,
    ) -> Option<GeneratedTitle> {
        if self.remaining() == 0 {
            return None;
        }
        self.used += 1;
        let fresh = generate_title(&self.monster, dice);
        if let Some(last) = titles.last_mut() {
            *last = fresh.clone().unlock(now_ms);
        }
        Some(fresh)
    }
}

/// Number of titles per star rating, index 0 = one star.
pub fn count_by_star(titles: &[Title]) -> [usize; TIER_COUNT as usize] {
    let mut counts = [0; TIER_COUNT as usize];
    for title in titles {
        if (1..=TIER_COUNT).contains(&title.star) {
            counts[(title.star - 1) as usize] += 1;
        }
    }
    counts
}

/// Titles with the highest star first; equal stars keep unlock order.
pub fn sorted_by_star(titles: &[Title]) -> Vec<&Title> {
    let mut sorted: Vec<&Title> = titles.iter().collect();
    sorted.sort_by(|a, b| b.star.cmp(&a.star));
    sorted
}

/// Remove the title matching both text and unlock time.
pub fn remove_title(titles: &mut Vec<Title>, title: &str, unlocked_at: i64) -> bool {
    match titles
        .iter()
        .position(|t| t.title == title && t.unlocked_at == unlocked_at)
    {
        Some(index) => {
            titles.remove(index);
            true
        }
        None => false,
    }
}
