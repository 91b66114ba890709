//! Typed transaction records and the grouping dimensions derived from them.
//!
//! The raw CSV is stringly typed; everything past the loader works on
//! `Transaction` values that have already been validated field by field.

pub mod loader;

use chrono::NaiveDate;

/// Customer gender as recorded in the dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Gender {
    Male,
    Female,
}

impl Gender {
    pub fn parse(s: &str) -> Option<Gender> {
        match s.trim() {
            "Male" => Some(Gender::Male),
            "Female" => Some(Gender::Female),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Gender::Male => "Male",
            Gender::Female => "Female",
        }
    }
}

/// One of five fixed half-open age ranges used as a grouping dimension.
///
/// Cut points: [0,20), [20,30), [30,40), [40,50), [50,∞). Boundary ages
/// (20, 30, 40, 50) fall into the upper bracket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum AgeBracket {
    Under20,
    From20To29,
    From30To39,
    From40To49,
    Over50,
}

impl AgeBracket {
    pub const ALL: [AgeBracket; 5] = [
        AgeBracket::Under20,
        AgeBracket::From20To29,
        AgeBracket::From30To39,
        AgeBracket::From40To49,
        AgeBracket::Over50,
    ];

    /// Total over all non-negative ages: every age maps to exactly one bracket.
    pub fn of(age: u32) -> AgeBracket {
        match age {
            0..=19 => AgeBracket::Under20,
            20..=29 => AgeBracket::From20To29,
            30..=39 => AgeBracket::From30To39,
            40..=49 => AgeBracket::From40To49,
            _ => AgeBracket::Over50,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            AgeBracket::Under20 => "<20",
            AgeBracket::From20To29 => "20-29",
            AgeBracket::From30To39 => "30-39",
            AgeBracket::From40To49 => "40-49",
            AgeBracket::Over50 => "50+",
        }
    }
}

/// A single validated retail transaction.
#[derive(Debug, Clone, PartialEq)]
pub struct Transaction {
    pub gender: Gender,
    pub age: u32,
    pub category: String,
    pub quantity: u32,
    pub unit_price: f64,
    pub date: NaiveDate,
}

impl Transaction {
    /// Monetary value of the line: quantity × unit price.
    ///
    /// This is the one monetary convention used by every chart and statistic.
    pub fn line_value(&self) -> f64 {
        self.quantity as f64 * self.unit_price
    }

    pub fn bracket(&self) -> AgeBracket {
        AgeBracket::of(self.age)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bracket_boundaries_go_to_upper_bracket() {
        assert_eq!(AgeBracket::of(19), AgeBracket::Under20);
        assert_eq!(AgeBracket::of(20), AgeBracket::From20To29);
        assert_eq!(AgeBracket::of(29), AgeBracket::From20To29);
        assert_eq!(AgeBracket::of(30), AgeBracket::From30To39);
        assert_eq!(AgeBracket::of(40), AgeBracket::From40To49);
        assert_eq!(AgeBracket::of(50), AgeBracket::Over50);
    }

    #[test]
    fn bracketing_is_total() {
        for age in 0..=120 {
            let bracket = AgeBracket::of(age);
            assert!(AgeBracket::ALL.contains(&bracket));
        }
        assert_eq!(AgeBracket::of(u32::MAX), AgeBracket::Over50);
    }

    #[test]
    fn gender_parse_rejects_unknown() {
        assert_eq!(Gender::parse("Male"), Some(Gender::Male));
        assert_eq!(Gender::parse(" Female "), Some(Gender::Female));
        assert_eq!(Gender::parse("male"), None);
        assert_eq!(Gender::parse(""), None);
    }

    #[test]
    fn line_value_is_quantity_times_price() {
        let tx = Transaction {
            gender: Gender::Male,
            age: 25,
            category: "Shoes".into(),
            quantity: 2,
            unit_price: 50.0,
            date: NaiveDate::from_ymd_opt(2022, 8, 5).unwrap(),
        };
        assert_eq!(tx.line_value(), 100.0);
    }
}
