use alloc::vec::Vec;
use serde::Serialize;

/// Picks a random hidden, unflagged cell; reveals it, defusing it first if it
/// was a mine.
pub const ELIMINATE: &str = "eliminate";
/// Converts one fatal mine reveal into a safe reveal.
pub const REVIVE: &str = "revive";

/// Built-in ability roster: name, player-facing description, uses per match.
const ABILITY_TABLE: [(&str, &str, u8); 2] = [
    (ELIMINATE, "Remove a mine or reveal a safe spot", 3),
    (REVIVE, "Automatically revive once when hitting a mine", 1),
];

/// One named, finite-use player action.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Ability {
    pub name: &'static str,
    pub description: &'static str,
    pub remaining: u8,
}

/// Per-session ability registry. Uses only ever decrease, flooring at zero.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct AbilityBook {
    abilities: Vec<Ability>,
}

impl AbilityBook {
    pub fn remaining(&self, name: &str) -> Option<u8> {
        self.find(name).map(|ability| ability.remaining)
    }

    /// Spends one use of `name`. False, with no mutation, when the ability is
    /// unknown or depleted.
    pub fn try_consume(&mut self, name: &str) -> bool {
        match self.abilities.iter_mut().find(|ability| ability.name == name) {
            Some(ability) if ability.remaining > 0 => {
                ability.remaining -= 1;
                true
            }
            _ => false,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Ability> {
        self.abilities.iter()
    }

    fn find(&self, name: &str) -> Option<&Ability> {
        self.abilities.iter().find(|ability| ability.name == name)
    }
}

impl Default for AbilityBook {
    fn default() -> Self {
        Self {
            abilities: ABILITY_TABLE
                .iter()
                .map(|&(name, description, remaining)| Ability {
                    name,
                    description,
                    remaining,
                })
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn book_starts_from_roster() {
        let book = AbilityBook::default();
        assert_eq!(book.remaining(ELIMINATE), Some(3));
        assert_eq!(book.remaining(REVIVE), Some(1));
        assert_eq!(book.remaining("teleport"), None);
    }

    #[test]
    fn consume_counts_down_and_floors_at_zero() {
        let mut book = AbilityBook::default();
        assert!(book.try_consume(REVIVE));
        assert!(!book.try_consume(REVIVE));
        assert_eq!(book.remaining(REVIVE), Some(0));
    }

    #[test]
    fn unknown_ability_is_rejected_without_mutation() {
        let mut book = AbilityBook::default();
        assert!(!book.try_consume("teleport"));
        assert_eq!(book, AbilityBook::default());
    }
}
