//! Damage type bitmask.

bitflags::bitflags! {
    /// Damage types a skill can carry and an entity can be weak to or resist.
    ///
    /// A skill usually carries a single bit, but multi-bit skills are meaningful:
    /// weakness and resistance match when *any* bit overlaps. Only a skill whose
    /// type is exactly [`DamageType::PHYSICAL`] uses Strength/Defense; every other
    /// combination uses MagicAttack/MagicDefense.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    #[cfg_attr(feature = "serde", serde(transparent))]
    pub struct DamageType: u16 {
        const PHYSICAL  = 1 << 0;
        const FIRE      = 1 << 1;
        const COLD      = 1 << 2;
        const LIGHTNING = 1 << 3;
        const POISON    = 1 << 4;
        const ARCANE    = 1 << 5;
        const HOLY      = 1 << 6;
        const SHADOW    = 1 << 7;
        const NATURE    = 1 << 8;
    }
}

impl DamageType {
    /// Returns true if this is the physical (Strength-scaled) type and nothing else.
    #[inline]
    pub fn is_physical(self) -> bool {
        self == Self::PHYSICAL
    }

    /// Returns true if any bit of this type appears in `mask`.
    #[inline]
    pub fn matches(self, mask: DamageType) -> bool {
        self.intersects(mask)
    }
}
