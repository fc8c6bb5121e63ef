//! The binary's statically registered units
//!
//! A small self-contained suite exercising the full lifecycle: a
//! fixture-backed unit with setup and teardown, and a plain unit
//! without one. Everything here is expected to pass.

use crucible_harness::{expect, expect_eq, Registry, TestUnit};

pub fn registry() -> Registry {
    Registry::new()
        .register(numbers_unit())
        .register(strings_unit())
}

/// Fixture-backed unit: every case gets its own freshly built list.
fn numbers_unit() -> TestUnit<Vec<i64>> {
    TestUnit::with_setup("numbers", || vec![1, 2, 3])
        .teardown(|fx| fx.clear())
        .case("test_sum", |fx| {
            expect_eq!(fx.iter().sum::<i64>(), 6);
        })
        .case("test_push_in_place", |fx| {
            fx.push(4);
            expect_eq!(fx.len(), 4);
        })
        .case("test_fixture_is_fresh", |fx| {
            // The push in the previous case must not be visible here.
            expect_eq!(fx.len(), 3);
        })
        .case("test_sorted", |fx| {
            expect!(fx.windows(2).all(|w| w[0] <= w[1]), "fixture not sorted");
        })
}

/// Unit without a fixture.
fn strings_unit() -> TestUnit<()> {
    TestUnit::new("strings")
        .case("test_concat", |_| {
            expect_eq!(format!("{}{}", "cru", "cible"), "crucible");
        })
        .case("test_contains", |_| {
            expect!("harness".contains("ness"));
        })
}
