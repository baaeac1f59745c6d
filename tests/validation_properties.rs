use projectboard::{Validatable, ValidationRules, validate};
use proptest::prelude::*;

proptest! {
    #[test]
    fn empty_rules_accept_any_text(text in ".*") {
        prop_assert!(validate(&Validatable::Text(text), &ValidationRules::new()));
    }

    #[test]
    fn empty_rules_accept_any_number(number in any::<f64>()) {
        prop_assert!(validate(&Validatable::Number(number), &ValidationRules::new()));
    }

    #[test]
    fn required_means_non_blank(text in "\\PC{0,8}") {
        let expected = !text.trim().is_empty();
        prop_assert_eq!(
            validate(&Validatable::Text(text), &ValidationRules::new().required()),
            expected
        );
    }

    #[test]
    fn min_length_counts_characters(text in "\\PC{0,12}", min in 0usize..12) {
        let expected = text.chars().count() >= min;
        prop_assert_eq!(
            validate(&Validatable::Text(text), &ValidationRules::new().min_length(min)),
            expected
        );
    }

    #[test]
    fn max_length_counts_characters(text in "\\PC{0,12}", max in 0usize..12) {
        let expected = text.chars().count() <= max;
        prop_assert_eq!(
            validate(&Validatable::Text(text), &ValidationRules::new().max_length(max)),
            expected
        );
    }

    #[test]
    fn numeric_range_is_inclusive(value in -2000.0f64..2000.0, lo in -1000.0f64..1000.0, span in 0.0f64..1000.0) {
        let hi = lo + span;
        let rules = ValidationRules::new().min(lo).max(hi);
        prop_assert_eq!(
            validate(&Validatable::Number(value), &rules),
            lo <= value && value <= hi
        );
    }

    #[test]
    fn numeric_rules_never_reject_text(text in ".*", lo in any::<f64>()) {
        let rules = ValidationRules::new().min(lo).max(lo);
        prop_assert!(validate(&Validatable::Text(text), &rules));
    }
}
