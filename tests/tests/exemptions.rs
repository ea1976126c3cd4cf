//! Entities that skip uniqueness checking.

use varaxis_tests::prelude::*;

mod partial_axes {
    use super::*;

    pub fn scenario() -> Scenario {
        Scenario::new("partial_axes")
            .catalog("apparel/catalog.toml")
            .batch("apparel/batches/partial_axes.toml")
            .expect("jeans_blue_nosize", |a| a.exempt_on("size"))
            .expect("jeans_blue_nosize_2", |a| a.exempt_on("size"))
            // A size of the wrong shape is dropped at intake, leaving the axis empty
            .expect("jeans_blue_badsize", |a| a.exempt_on("size"))
            .claims(0)
    }

    #[test]
    fn test_empty_axis_values_are_exempt() {
        scenario().run().unwrap();
    }
}

mod outside_variation {
    use super::*;

    pub fn scenario() -> Scenario {
        Scenario::new("outside_variation")
            .catalog("apparel/catalog.toml")
            .batch("apparel/batches/not_variant.toml")
            .expect("gift_card", |a| a.exempt())
            .expect("tshirt", |a| a.exempt())
            .expect("tshirt_orphan_s", |a| a.exempt())
            .claims(0)
    }

    #[test]
    fn test_entities_without_parent_or_family_variant() {
        scenario().run().unwrap();
    }
}

mod misconfiguration {
    use super::*;

    #[test]
    fn test_unknown_family_variant_fails_the_batch() {
        Scenario::new("unknown_family_variant")
            .catalog("apparel/catalog.toml")
            .batch("apparel/batches/unknown_family_variant.toml")
            .error("unknown family variant 'scarves_by_pattern'")
            .run()
            .unwrap();
    }

    #[test]
    fn test_invalid_worker_count_fails_the_batch() {
        Scenario::new("zero_threads")
            .catalog("apparel/catalog.toml")
            .batch("apparel/batches/new_tshirt_colors.toml")
            .config(ValidatorConfig {
                threads: Some(0),
                ..ValidatorConfig::default()
            })
            .error("threads must be at least 1")
            .run()
            .unwrap();
    }

    #[test]
    fn test_missing_catalog() {
        let result = Scenario::new("no_catalog")
            .batch("apparel/batches/new_tshirt_colors.toml")
            .run();

        assert!(matches!(result, Err(HarnessError::MissingCatalog { .. })));
    }
}
