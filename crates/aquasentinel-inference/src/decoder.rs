//! Health-risk mask decoding
//!
//! A classifier label is an 8-bit mask. Bit positions are read most
//! significant first: the leftmost character of the zero-padded binary
//! string is category A, the rightmost is category H. A classifier trained
//! with the opposite convention will mislabel every multi-risk class, so
//! substitute models must be checked against this ordering.

use aquasentinel_core::{Error, Result};

/// A named health-risk category
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RiskCategory {
    pub letter: char,
    pub description: &'static str,
}

impl RiskCategory {
    /// Label as reported in prediction results
    pub fn label(&self) -> String {
        format!("Class {}: {}", self.letter, self.description)
    }
}

/// Categories in bit-position order, most significant bit first
pub const RISK_CATEGORIES: [RiskCategory; 8] = [
    RiskCategory {
        letter: 'A',
        description: "Gastrointestinal diseases (e.g., cholera, diarrhea)",
    },
    RiskCategory {
        letter: 'B',
        description: "Kidney diseases",
    },
    RiskCategory {
        letter: 'C',
        description: "Dental problems (Fluorosis, corrosion)",
    },
    RiskCategory {
        letter: 'D',
        description: "Cardiovascular problems or Diabetes",
    },
    RiskCategory {
        letter: 'E',
        description: "Metabolic alkalosis",
    },
    RiskCategory {
        letter: 'F',
        description: "Convulsions (from Ammonia)",
    },
    RiskCategory {
        letter: 'G',
        description: "Bladder cancer (from Chlorides)",
    },
    RiskCategory {
        letter: 'H',
        description: "Blood disorders (Methemoglobinemia from Nitrates)",
    },
];

/// Decoded form of a health-risk mask
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedMask {
    pub binary_representation: String,
    pub health_risks: Vec<String>,
    pub is_safe: bool,
}

/// Decodes classifier labels into health-risk categories
#[derive(Debug, Clone, Copy, Default)]
pub struct HealthRiskDecoder;

impl HealthRiskDecoder {
    pub const MAX_CLASS: i64 = u8::MAX as i64;

    pub fn new() -> Self {
        Self
    }

    /// Decode a predicted class.
    ///
    /// Fails with [`Error::Range`] when the class does not fit in 8 bits;
    /// the value is never truncated.
    pub fn decode(&self, predicted_class: i64) -> Result<DecodedMask> {
        let mask = u8::try_from(predicted_class).map_err(|_| Error::Range {
            class: predicted_class,
        })?;

        let health_risks: Vec<String> = self
            .categories(mask)
            .map(|category| category.label())
            .collect();

        Ok(DecodedMask {
            binary_representation: format!("{:08b}", mask),
            is_safe: health_risks.is_empty(),
            health_risks,
        })
    }

    /// Categories set in a mask, in A to H order
    pub fn categories(&self, mask: u8) -> impl Iterator<Item = &'static RiskCategory> {
        RISK_CATEGORIES
            .iter()
            .enumerate()
            .filter(move |(position, _)| mask & (0x80 >> position) != 0)
            .map(|(_, category)| category)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_zero_is_safe() {
        let decoded = HealthRiskDecoder::new().decode(0).unwrap();
        assert_eq!(decoded.binary_representation, "00000000");
        assert!(decoded.health_risks.is_empty());
        assert!(decoded.is_safe);
    }

    #[test]
    fn test_decode_msb_first() {
        let decoded = HealthRiskDecoder::new().decode(160).unwrap();
        assert_eq!(decoded.binary_representation, "10100000");
        assert_eq!(
            decoded.health_risks,
            vec![
                "Class A: Gastrointestinal diseases (e.g., cholera, diarrhea)".to_string(),
                "Class C: Dental problems (Fluorosis, corrosion)".to_string(),
            ]
        );
        assert!(!decoded.is_safe);
    }

    #[test]
    fn test_decode_one_is_last_category() {
        let decoded = HealthRiskDecoder::new().decode(1).unwrap();
        assert_eq!(decoded.binary_representation, "00000001");
        assert_eq!(decoded.health_risks.len(), 1);
        assert!(decoded.health_risks[0].starts_with("Class H: Blood disorders"));
    }

    #[test]
    fn test_decode_all_bits() {
        let decoded = HealthRiskDecoder::new().decode(255).unwrap();
        assert_eq!(decoded.binary_representation, "11111111");
        let letters: Vec<char> = decoded
            .health_risks
            .iter()
            .map(|r| r.chars().nth(6).unwrap())
            .collect();
        assert_eq!(letters, vec!['A', 'B', 'C', 'D', 'E', 'F', 'G', 'H']);
    }

    #[test]
    fn test_decode_out_of_range() {
        let decoder = HealthRiskDecoder::new();
        assert!(matches!(decoder.decode(256), Err(Error::Range { class: 256 })));
        assert!(matches!(decoder.decode(-1), Err(Error::Range { class: -1 })));
    }

    #[test]
    fn test_decode_is_pure() {
        let decoder = HealthRiskDecoder::new();
        for class in [0, 7, 160, 255] {
            assert_eq!(decoder.decode(class).unwrap(), decoder.decode(class).unwrap());
        }
    }

    #[test]
    fn test_category_table_letters_follow_positions() {
        for (position, category) in RISK_CATEGORIES.iter().enumerate() {
            assert_eq!(category.letter, (b'A' + position as u8) as char);
        }
    }
}
