//! Fixtures for catalog tests.
//!
//! [`TestDatabase`] (feature `postgres`, on by default) needs Docker. The
//! data builder and [`assertions`] are plain helpers usable anywhere.
//!
//! ```rust,no_run
//! use test_utils::{TestDataBuilder, TestDatabase};
//!
//! # async fn example() {
//! let db = TestDatabase::new().await;
//! let data = TestDataBuilder::from_test_name("lists_by_category");
//! for (category, name) in data.catalog(&["books"], 3) {
//!     // create products through the repository under test
//! }
//! # }
//! ```

#[cfg(feature = "postgres")]
mod postgres;

#[cfg(feature = "postgres")]
pub use postgres::TestDatabase;

use std::hash::{BuildHasher, BuildHasherDefault, DefaultHasher};

/// Seeded generator of category and product labels.
///
/// Labels from one seed never collide with labels from another, so tests
/// that share a database can still assert on exact category contents.
#[derive(Clone, Copy, Debug)]
pub struct TestDataBuilder {
    seed: u64,
}

impl TestDataBuilder {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }

    /// Seed from the test's name so labels are stable across runs.
    pub fn from_test_name(test_name: &str) -> Self {
        Self::new(BuildHasherDefault::<DefaultHasher>::default().hash_one(test_name))
    }

    /// ```
    /// use test_utils::TestDataBuilder;
    ///
    /// assert_eq!(TestDataBuilder::new(7).category("books"), "test-books-7");
    /// ```
    pub fn category(&self, base: &str) -> String {
        format!("test-{base}-{}", self.seed)
    }

    /// ```
    /// use test_utils::TestDataBuilder;
    ///
    /// assert_eq!(TestDataBuilder::new(7).name("phone", "main"), "test-phone-7-main");
    /// ```
    pub fn name(&self, base: &str, suffix: &str) -> String {
        format!("test-{base}-{}-{suffix}", self.seed)
    }

    /// `(category, name)` pairs: `per_category` products in each of `categories`,
    /// grouped by category in the order given.
    pub fn catalog(&self, categories: &[&str], per_category: usize) -> Vec<(String, String)> {
        categories
            .iter()
            .flat_map(|base| {
                let category = self.category(base);
                (0..per_category).map(move |i| (category.clone(), self.name(base, &i.to_string())))
            })
            .collect()
    }
}

pub mod assertions {
    use std::collections::HashSet;
    use std::fmt::Debug;
    use std::hash::Hash;

    /// Unwrap `value`, naming `context` in the panic message.
    pub fn assert_some<T>(value: Option<T>, context: &str) -> T {
        match value {
            Some(inner) => inner,
            None => panic!("{context}: expected a value"),
        }
    }

    pub fn assert_unique<T: Eq + Hash + Debug>(values: &[T], context: &str) {
        let mut seen = HashSet::with_capacity(values.len());
        for value in values {
            assert!(seen.insert(value), "{context}: duplicate value {value:?}");
        }
    }
}
