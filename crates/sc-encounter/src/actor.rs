//! Encounter participants.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A body location that can carry an injury.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Injury {
    /// Head.
    Head,
    /// Left arm.
    LeftArm,
    /// Right arm.
    RightArm,
    /// Left leg.
    LeftLeg,
    /// Right leg.
    RightLeg,
    /// Torso.
    Torso,
}

impl Injury {
    /// All locations in display order.
    pub fn all() -> &'static [Self] {
        &[
            Self::Head,
            Self::LeftArm,
            Self::RightArm,
            Self::LeftLeg,
            Self::RightLeg,
            Self::Torso,
        ]
    }

    /// Parse a location, ignoring case, spaces and dashes.
    pub fn parse(s: &str) -> Option<Self> {
        let key: String = s
            .chars()
            .filter(|c| !c.is_whitespace() && *c != '-' && *c != '_')
            .flat_map(char::to_lowercase)
            .collect();
        match key.as_str() {
            "head" => Some(Self::Head),
            "leftarm" | "larm" => Some(Self::LeftArm),
            "rightarm" | "rarm" => Some(Self::RightArm),
            "leftleg" | "lleg" => Some(Self::LeftLeg),
            "rightleg" | "rleg" => Some(Self::RightLeg),
            "torso" => Some(Self::Torso),
            _ => None,
        }
    }

    /// Human-readable name.
    pub fn label(self) -> &'static str {
        match self {
            Self::Head => "Head",
            Self::LeftArm => "Left Arm",
            Self::RightArm => "Right Arm",
            Self::LeftLeg => "Left Leg",
            Self::RightLeg => "Right Leg",
            Self::Torso => "Torso",
        }
    }
}

impl std::fmt::Display for Injury {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Injury toggles for each body location.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Injuries {
    /// Head injured.
    pub head: bool,
    /// Left arm injured.
    pub left_arm: bool,
    /// Right arm injured.
    pub right_arm: bool,
    /// Left leg injured.
    pub left_leg: bool,
    /// Right leg injured.
    pub right_leg: bool,
    /// Torso injured.
    pub torso: bool,
}

impl Injuries {
    fn slot(&mut self, injury: Injury) -> &mut bool {
        match injury {
            Injury::Head => &mut self.head,
            Injury::LeftArm => &mut self.left_arm,
            Injury::RightArm => &mut self.right_arm,
            Injury::LeftLeg => &mut self.left_leg,
            Injury::RightLeg => &mut self.right_leg,
            Injury::Torso => &mut self.torso,
        }
    }

    /// Whether `injury` is marked.
    pub fn has(&self, injury: Injury) -> bool {
        match injury {
            Injury::Head => self.head,
            Injury::LeftArm => self.left_arm,
            Injury::RightArm => self.right_arm,
            Injury::LeftLeg => self.left_leg,
            Injury::RightLeg => self.right_leg,
            Injury::Torso => self.torso,
        }
    }

    /// Flip `injury` and return its new state.
    pub fn toggle(&mut self, injury: Injury) -> bool {
        let slot = self.slot(injury);
        *slot = !*slot;
        *slot
    }

    /// Marked locations in display order.
    pub fn marked(&self) -> Vec<Injury> {
        Injury::all()
            .iter()
            .copied()
            .filter(|&i| self.has(i))
            .collect()
    }
}

/// The S.P.E.C.I.A.L. attribute block of a creature or character.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Special {
    /// Strength.
    pub strength: u8,
    /// Perception.
    pub perception: u8,
    /// Endurance.
    pub endurance: u8,
    /// Charisma.
    pub charisma: u8,
    /// Intelligence.
    pub intelligence: u8,
    /// Agility.
    pub agility: u8,
    /// Luck.
    pub luck: u8,
}

impl Special {
    /// Build from the seven attributes in S.P.E.C.I.A.L. order.
    pub fn from_array(values: [u8; 7]) -> Self {
        let [strength, perception, endurance, charisma, intelligence, agility, luck] = values;
        Self {
            strength,
            perception,
            endurance,
            charisma,
            intelligence,
            agility,
            luck,
        }
    }

    /// The seven attributes in S.P.E.C.I.A.L. order.
    pub fn to_array(self) -> [u8; 7] {
        [
            self.strength,
            self.perception,
            self.endurance,
            self.charisma,
            self.intelligence,
            self.agility,
            self.luck,
        ]
    }
}

impl std::fmt::Display for Special {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let parts: Vec<String> = "SPECIAL"
            .chars()
            .zip(self.to_array())
            .map(|(letter, value)| format!("{letter} {value}"))
            .collect();
        write!(f, "{}", parts.join(" "))
    }
}

/// One participant in an encounter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Actor {
    /// Stable identity, independent of name.
    pub id: Uuid,
    /// Name as entered. Repeated names are told apart when listed.
    pub name: String,
    /// Initiative; higher acts first.
    pub initiative: i32,
    /// Free-form note.
    #[serde(default)]
    pub note: String,
    /// Current hit points, if tracked.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hp: Option<u32>,
    /// Maximum hit points, if tracked.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_hp: Option<u32>,
    /// Injury toggles, if tracked.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub injuries: Option<Injuries>,
    /// Attribute block, if known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub special: Option<Special>,
}

impl Actor {
    /// Create an actor with a fresh id and no optional tracking.
    pub fn new(name: impl Into<String>, initiative: i32) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            initiative,
            note: String::new(),
            hp: None,
            max_hp: None,
            injuries: None,
            special: None,
        }
    }

    /// Track hit points, starting at full health.
    pub fn with_hp(mut self, max_hp: u32) -> Self {
        self.hp = Some(max_hp);
        self.max_hp = Some(max_hp);
        self
    }

    /// Track injuries, starting uninjured.
    pub fn with_injuries(mut self) -> Self {
        self.injuries = Some(Injuries::default());
        self
    }

    /// Attach an attribute block.
    pub fn with_special(mut self, special: Special) -> Self {
        self.special = Some(special);
        self
    }

    /// Set current hit points, clamped to `0..=max_hp`.
    ///
    /// Returns the stored value, or `None` if hit points aren't tracked.
    pub fn set_hp(&mut self, hp: u32) -> Option<u32> {
        let clamped = hp.min(self.max_hp?);
        self.hp = Some(clamped);
        Some(clamped)
    }

    /// Change current hit points by `delta`, clamped to `0..=max_hp`.
    pub fn adjust_hp(&mut self, delta: i64) -> Option<u32> {
        let current = i64::from(self.hp?);
        let next = current.saturating_add(delta).max(0);
        self.set_hp(u32::try_from(next).unwrap_or(u32::MAX))
    }

    /// Bring `hp` back inside `0..=max_hp` after a direct edit.
    pub(crate) fn normalize(&mut self) {
        match (self.hp, self.max_hp) {
            (Some(hp), Some(max)) => self.hp = Some(hp.min(max)),
            (None, Some(max)) => self.hp = Some(max),
            (Some(_), None) => self.hp = None,
            (None, None) => {}
        }
    }
}
