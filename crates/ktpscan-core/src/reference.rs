//! Closed reference sets printed on the card.
//!
//! Each set is a tagged enum. Text that does not match a member lands in an
//! explicit `Unrecognized` variant carrying the original text, so a typo can
//! never pass as a valid value.

use std::fmt;

use serde::{Deserialize, Serialize};

// ── Sex ──

/// `JENIS KELAMIN` field.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Sex {
    Male,
    Female,
    Unrecognized(String),
}

impl Sex {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Male => "LAKI-LAKI",
            Self::Female => "PEREMPUAN",
            Self::Unrecognized(raw) => raw,
        }
    }

    /// `None` for [`Sex::Unrecognized`].
    pub fn is_female(&self) -> Option<bool> {
        match self {
            Self::Male => Some(false),
            Self::Female => Some(true),
            Self::Unrecognized(_) => None,
        }
    }
}

impl From<&str> for Sex {
    fn from(s: &str) -> Self {
        match s.trim() {
            "LAKI-LAKI" => Self::Male,
            "PEREMPUAN" => Self::Female,
            _ => Self::Unrecognized(s.to_string()),
        }
    }
}

// ── Marital status ──

/// `STATUS PERKAWINAN` field.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum MaritalStatus {
    Single,
    Married,
    Divorced,
    Widowed,
    Unrecognized(String),
}

impl MaritalStatus {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Single => "BELUM KAWIN",
            Self::Married => "KAWIN",
            Self::Divorced => "CERAI HIDUP",
            Self::Widowed => "CERAI MATI",
            Self::Unrecognized(raw) => raw,
        }
    }
}

impl From<&str> for MaritalStatus {
    fn from(s: &str) -> Self {
        match s.trim() {
            "BELUM KAWIN" => Self::Single,
            "KAWIN" => Self::Married,
            "CERAI HIDUP" => Self::Divorced,
            "CERAI MATI" => Self::Widowed,
            _ => Self::Unrecognized(s.to_string()),
        }
    }
}

// ── Religion ──

/// `AGAMA` field. Matched case-insensitively.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Religion {
    Islam,
    Protestant,
    Catholic,
    Hindu,
    Buddhist,
    Confucian,
    Unrecognized(String),
}

impl Religion {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Islam => "ISLAM",
            Self::Protestant => "KRISTEN",
            Self::Catholic => "KATOLIK",
            Self::Hindu => "HINDU",
            Self::Buddhist => "BUDDHA",
            Self::Confucian => "KONGHUCU",
            Self::Unrecognized(raw) => raw,
        }
    }
}

impl From<&str> for Religion {
    fn from(s: &str) -> Self {
        match s.trim().to_uppercase().as_str() {
            "ISLAM" => Self::Islam,
            "KRISTEN" => Self::Protestant,
            "KATOLIK" => Self::Catholic,
            "HINDU" => Self::Hindu,
            "BUDDHA" => Self::Buddhist,
            "KONGHUCU" => Self::Confucian,
            _ => Self::Unrecognized(s.to_string()),
        }
    }
}

macro_rules! string_conversions {
    ($($ty:ty),*) => {$(
        impl From<String> for $ty {
            fn from(s: String) -> Self {
                Self::from(s.as_str())
            }
        }

        impl From<$ty> for String {
            fn from(v: $ty) -> Self {
                v.as_str().to_string()
            }
        }

        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }
    )*};
}

string_conversions!(Sex, MaritalStatus, Religion, Province);

// ── Province ──

/// `PROVINSI` field: one of the 38 provinces of Indonesia, in the order the
/// national registry lists them.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Province {
    Aceh,
    NorthSumatra,
    WestSumatra,
    Riau,
    Jambi,
    SouthSumatra,
    Bengkulu,
    Lampung,
    BangkaBelitung,
    RiauIslands,
    Jakarta,
    WestJava,
    CentralJava,
    Yogyakarta,
    EastJava,
    Banten,
    Bali,
    WestNusaTenggara,
    EastNusaTenggara,
    WestKalimantan,
    CentralKalimantan,
    SouthKalimantan,
    EastKalimantan,
    NorthKalimantan,
    NorthSulawesi,
    CentralSulawesi,
    SouthSulawesi,
    SoutheastSulawesi,
    Gorontalo,
    WestSulawesi,
    Maluku,
    NorthMaluku,
    Papua,
    WestPapua,
    SouthPapua,
    CentralPapua,
    HighlandPapua,
    SouthwestPapua,
    Unrecognized(String),
}

impl Province {
    pub const ALL: [Province; 38] = [
        Self::Aceh,
        Self::NorthSumatra,
        Self::WestSumatra,
        Self::Riau,
        Self::Jambi,
        Self::SouthSumatra,
        Self::Bengkulu,
        Self::Lampung,
        Self::BangkaBelitung,
        Self::RiauIslands,
        Self::Jakarta,
        Self::WestJava,
        Self::CentralJava,
        Self::Yogyakarta,
        Self::EastJava,
        Self::Banten,
        Self::Bali,
        Self::WestNusaTenggara,
        Self::EastNusaTenggara,
        Self::WestKalimantan,
        Self::CentralKalimantan,
        Self::SouthKalimantan,
        Self::EastKalimantan,
        Self::NorthKalimantan,
        Self::NorthSulawesi,
        Self::CentralSulawesi,
        Self::SouthSulawesi,
        Self::SoutheastSulawesi,
        Self::Gorontalo,
        Self::WestSulawesi,
        Self::Maluku,
        Self::NorthMaluku,
        Self::Papua,
        Self::WestPapua,
        Self::SouthPapua,
        Self::CentralPapua,
        Self::HighlandPapua,
        Self::SouthwestPapua,
    ];

    /// Name as printed on the card, or the original text when unrecognized.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Aceh => "ACEH",
            Self::NorthSumatra => "SUMATERA UTARA",
            Self::WestSumatra => "SUMATERA BARAT",
            Self::Riau => "RIAU",
            Self::Jambi => "JAMBI",
            Self::SouthSumatra => "SUMATERA SELATAN",
            Self::Bengkulu => "BENGKULU",
            Self::Lampung => "LAMPUNG",
            Self::BangkaBelitung => "KEPULAUAN BANGKA BELITUNG",
            Self::RiauIslands => "KEPULAUAN RIAU",
            Self::Jakarta => "DKI JAKARTA",
            Self::WestJava => "JAWA BARAT",
            Self::CentralJava => "JAWA TENGAH",
            Self::Yogyakarta => "DI YOGYAKARTA",
            Self::EastJava => "JAWA TIMUR",
            Self::Banten => "BANTEN",
            Self::Bali => "BALI",
            Self::WestNusaTenggara => "NUSA TENGGARA BARAT",
            Self::EastNusaTenggara => "NUSA TENGGARA TIMUR",
            Self::WestKalimantan => "KALIMANTAN BARAT",
            Self::CentralKalimantan => "KALIMANTAN TENGAH",
            Self::SouthKalimantan => "KALIMANTAN SELATAN",
            Self::EastKalimantan => "KALIMANTAN TIMUR",
            Self::NorthKalimantan => "KALIMANTAN UTARA",
            Self::NorthSulawesi => "SULAWESI UTARA",
            Self::CentralSulawesi => "SULAWESI TENGAH",
            Self::SouthSulawesi => "SULAWESI SELATAN",
            Self::SoutheastSulawesi => "SULAWESI TENGGARA",
            Self::Gorontalo => "GORONTALO",
            Self::WestSulawesi => "SULAWESI BARAT",
            Self::Maluku => "MALUKU",
            Self::NorthMaluku => "MALUKU UTARA",
            Self::Papua => "PAPUA",
            Self::WestPapua => "PAPUA BARAT",
            Self::SouthPapua => "PAPUA SELATAN",
            Self::CentralPapua => "PAPUA TENGAH",
            Self::HighlandPapua => "PAPUA PEGUNUNGAN",
            Self::SouthwestPapua => "PAPUA BARAT DAYA",
            Self::Unrecognized(raw) => raw,
        }
    }

    pub fn is_listed(&self) -> bool {
        !matches!(self, Self::Unrecognized(_))
    }
}

/// Trims and uppercases the text, then matches it exactly against the list.
/// Failing that, the first province whose name contains the text, or is
/// contained in it, is accepted ("JAWA" and "PROVINSI JAWA BARAT" both
/// resolve to [`Province::WestJava`]). Blank text is never matched.
impl From<&str> for Province {
    fn from(s: &str) -> Self {
        let wanted = s.trim().to_uppercase();
        if wanted.is_empty() {
            return Self::Unrecognized(s.to_string());
        }
        let listed = Self::ALL;
        listed
            .iter()
            .find(|p| p.as_str() == wanted)
            .or_else(|| {
                listed
                    .iter()
                    .find(|p| p.as_str().contains(&wanted) || wanted.contains(p.as_str()))
            })
            .cloned()
            .unwrap_or_else(|| Self::Unrecognized(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sex_parses_card_text() {
        assert_eq!(Sex::from("LAKI-LAKI"), Sex::Male);
        assert_eq!(Sex::from(" PEREMPUAN "), Sex::Female);
        assert_eq!(Sex::from("WANITA"), Sex::Unrecognized("WANITA".into()));
        assert_eq!(Sex::Female.is_female(), Some(true));
        assert_eq!(Sex::from("X").is_female(), None);
    }

    #[test]
    fn unrecognized_keeps_original_text() {
        let sex = Sex::from("laki laki");
        assert_eq!(sex.as_str(), "laki laki");
        assert_eq!(String::from(sex), "laki laki");
    }

    #[test]
    fn religion_is_case_insensitive() {
        assert_eq!(Religion::from("islam"), Religion::Islam);
        assert_eq!(Religion::from("Konghucu"), Religion::Confucian);
        assert!(matches!(Religion::from("JEDI"), Religion::Unrecognized(_)));
    }

    #[test]
    fn marital_status_is_exact() {
        assert_eq!(MaritalStatus::from("CERAI MATI"), MaritalStatus::Widowed);
        assert!(matches!(
            MaritalStatus::from("cerai mati"),
            MaritalStatus::Unrecognized(_)
        ));
    }

    #[test]
    fn province_list_is_complete_and_unique() {
        let listed = Province::ALL;
        let mut names: Vec<&str> = listed.iter().map(Province::as_str).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), 38);
    }

    #[test]
    fn province_exact_match_wins_over_fuzzy() {
        assert_eq!(Province::from("papua barat daya"), Province::SouthwestPapua);
        assert_eq!(Province::from("  DKI JAKARTA "), Province::Jakarta);
    }

    #[test]
    fn province_fuzzy_acceptance() {
        assert_eq!(Province::from("JAKARTA"), Province::Jakarta);
        assert_eq!(Province::from("PROVINSI JAWA BARAT"), Province::WestJava);
        assert_eq!(Province::from("ATLANTIS"), Province::Unrecognized("ATLANTIS".into()));
        assert_eq!(Province::from("   "), Province::Unrecognized("   ".into()));
        assert!(Province::ALL.iter().all(Province::is_listed));
    }

    #[test]
    fn province_serde_uses_card_text() {
        let listed: Province = serde_json::from_str("\"prov. jawa barat\"").unwrap();
        assert_eq!(listed, Province::WestJava);
        assert_eq!(serde_json::to_string(&listed).unwrap(), "\"JAWA BARAT\"");

        let unknown: Province = serde_json::from_str("\"Atlantis\"").unwrap();
        assert_eq!(unknown, Province::Unrecognized("Atlantis".into()));
        assert_eq!(serde_json::to_string(&unknown).unwrap(), "\"Atlantis\"");
    }

    #[test]
    fn enums_round_trip_through_serde() {
        let sex: Sex = serde_json::from_str("\"PEREMPUAN\"").unwrap();
        assert_eq!(sex, Sex::Female);
        assert_eq!(serde_json::to_string(&MaritalStatus::Single).unwrap(), "\"BELUM KAWIN\"");
    }
}
