use crate::features::discovery::LinkPatterns;
use crate::features::election::ElectionType;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElectionProfile {
    pub election_type: ElectionType,
    pub patterns: LinkPatterns,
    pub rows_carry_state: bool,
}

impl ElectionProfile {
    pub fn lok_sabha() -> Self {
        Self {
            election_type: ElectionType::LokSabha,
            patterns: LinkPatterns::for_election(ElectionType::LokSabha),
            rows_carry_state: false,
        }
    }

    pub fn vidhan_sabha() -> Self {
        Self {
            election_type: ElectionType::VidhanSabha,
            patterns: LinkPatterns::for_election(ElectionType::VidhanSabha),
            rows_carry_state: true,
        }
    }

    pub fn for_type(election_type: ElectionType) -> Self {
        match election_type {
            ElectionType::LokSabha => Self::lok_sabha(),
            ElectionType::VidhanSabha => Self::vidhan_sabha(),
        }
    }
}
