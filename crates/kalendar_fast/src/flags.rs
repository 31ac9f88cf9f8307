//! The three dietary flags attached to each calendar day.

/// One of the three independent dietary flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FastFlag {
    /// Fish allowed.
    Fish,
    /// Oil allowed.
    Oil,
    /// Strict fast: neither oil nor fish.
    StrictFast,
}

/// Dietary flags for a day. The booleans are independent, not exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct FastFlags {
    pub fish: bool,
    pub oil: bool,
    pub strict_fast: bool,
}

impl FastFlags {
    pub const NONE: Self = Self::new(false, false, false);

    pub const fn new(fish: bool, oil: bool, strict_fast: bool) -> Self {
        Self {
            fish,
            oil,
            strict_fast,
        }
    }

    pub fn set(&mut self, flag: FastFlag, value: bool) {
        match flag {
            FastFlag::Fish => self.fish = value,
            FastFlag::Oil => self.oil = value,
            FastFlag::StrictFast => self.strict_fast = value,
        }
    }

    /// Relax the fast by exactly one level: strict → oil, else oil → fish,
    /// else fish → none. No-op when nothing is set.
    pub fn downgrade(&mut self) {
        if self.strict_fast {
            self.strict_fast = false;
            self.oil = true;
        } else if self.oil {
            self.oil = false;
            self.fish = true;
        } else if self.fish {
            self.fish = false;
        }
    }

    /// `(show_fish, show_oil, show_strict_fast)`.
    pub const fn as_tuple(self) -> (bool, bool, bool) {
        (self.fish, self.oil, self.strict_fast)
    }
}
