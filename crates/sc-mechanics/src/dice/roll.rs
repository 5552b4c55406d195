//! Rolled dice.

use serde::{Deserialize, Serialize};

use super::Die;

/// One rolled die.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Roll {
    /// Which die.
    pub die: Die,
    /// The face that came up.
    pub value: u32,
}

/// Every die of a pool, in pool order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PoolRoll {
    /// The individual rolls.
    pub rolls: Vec<Roll>,
}

impl PoolRoll {
    /// Face values in pool order.
    pub fn values(&self) -> Vec<u32> {
        self.rolls.iter().map(|r| r.value).collect()
    }

    /// Sum of all faces.
    pub fn total(&self) -> u32 {
        self.rolls.iter().map(|r| r.value).sum()
    }
}

impl std::fmt::Display for PoolRoll {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let faces: Vec<String> = self.rolls.iter().map(|r| r.value.to_string()).collect();
        write!(f, "[{}] = {}", faces.join(", "), self.total())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d6s(values: &[u32]) -> PoolRoll {
        PoolRoll {
            rolls: values
                .iter()
                .map(|&value| Roll { die: Die::D6, value })
                .collect(),
        }
    }

    #[test]
    fn sums_faces() {
        let r = d6s(&[6, 1, 6]);
        assert_eq!(r.total(), 13);
        assert_eq!(r.values(), vec![6, 1, 6]);
    }

    #[test]
    fn shows_faces_and_total() {
        assert_eq!(d6s(&[3, 5]).to_string(), "[3, 5] = 8");
        assert_eq!(PoolRoll::default().to_string(), "[] = 0");
    }
}
