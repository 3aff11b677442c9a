use serde::{Deserialize, Serialize};
use std::fmt;

/// Graduation-requirement bucket a course is recorded under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Category {
    FaithWorldview,
    PersonalityLeadership,
    PracticalEnglish,
    GeneralEdu,
    Bsm,
    IctIntro,
    FreeElectiveBasic,
    FreeElectiveMjr,
    Major,
}

impl Category {
    pub const COUNT: usize = 9;

    /// Row order of the summary table.
    pub const fn ordered() -> [Self; Self::COUNT] {
        [
            Self::FaithWorldview,
            Self::PersonalityLeadership,
            Self::PracticalEnglish,
            Self::GeneralEdu,
            Self::Bsm,
            Self::IctIntro,
            Self::FreeElectiveBasic,
            Self::FreeElectiveMjr,
            Self::Major,
        ]
    }

    pub const fn key(self) -> &'static str {
        match self {
            Self::FaithWorldview => "FAITH_WORLDVIEW",
            Self::PersonalityLeadership => "PERSONALITY_LEADERSHIP",
            Self::PracticalEnglish => "PRACTICAL_ENGLISH",
            Self::GeneralEdu => "GENERAL_EDU",
            Self::Bsm => "BSM",
            Self::IctIntro => "ICT_INTRO",
            Self::FreeElectiveBasic => "FREE_ELECTIVE_BASIC",
            Self::FreeElectiveMjr => "FREE_ELECTIVE_MJR",
            Self::Major => "MAJOR",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::FaithWorldview => "신앙및세계관",
            Self::PersonalityLeadership => "인성및리더십",
            Self::PracticalEnglish => "실무영어",
            Self::GeneralEdu => "전문교양",
            Self::Bsm => "BSM",
            Self::IctIntro => "ICT융합기초",
            Self::FreeElectiveBasic => "자유선택(교양)",
            Self::FreeElectiveMjr => "자유선택(교양또는비교양)",
            Self::Major => "전공",
        }
    }

    /// Position in [`Category::ordered`], used to index fixed-size accumulators.
    pub const fn index(self) -> usize {
        match self {
            Self::FaithWorldview => 0,
            Self::PersonalityLeadership => 1,
            Self::PracticalEnglish => 2,
            Self::GeneralEdu => 3,
            Self::Bsm => 4,
            Self::IctIntro => 5,
            Self::FreeElectiveBasic => 6,
            Self::FreeElectiveMjr => 7,
            Self::Major => 8,
        }
    }

    pub fn from_key(raw: &str) -> Option<Self> {
        let wanted = raw.trim();
        Self::ordered()
            .into_iter()
            .find(|category| category.key().eq_ignore_ascii_case(wanted))
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}
