//! Shared test utilities for domain testing
//!
//! - `TestDatabase`: PostgreSQL container with the workspace migrations applied (feature: "postgres")
//! - `TestDataBuilder`: deterministic test data generation
//! - `assertions`: custom assertion helpers
//!
//! ```rust,no_run
//! use test_utils::{TestDatabase, TestDataBuilder};
//!
//! # async fn example() {
//! let db = TestDatabase::new().await;
//! let builder = TestDataBuilder::from_test_name("my_test");
//!
//! let person_id = db
//!     .create_test_person(builder.person_id(), &builder.name("person", "owner"))
//!     .await;
//! # }
//! ```

use uuid::Uuid;

#[cfg(feature = "postgres")]
mod postgres;

#[cfg(feature = "postgres")]
pub use postgres::TestDatabase;

/// Builder for test data with deterministic randomization
pub struct TestDataBuilder {
    seed: u64,
}

impl TestDataBuilder {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }

    /// Seed from the test name, so each test gets its own stable data.
    ///
    /// ```
    /// use test_utils::TestDataBuilder;
    ///
    /// let builder = TestDataBuilder::from_test_name("test_create_task");
    /// ```
    pub fn from_test_name(name: &str) -> Self {
        use std::collections::hash_map::DefaultHasher;
        use std::hash::{Hash, Hasher};

        let mut hasher = DefaultHasher::new();
        name.hash(&mut hasher);
        Self::new(hasher.finish())
    }

    /// A stable person id for this seed
    pub fn person_id(&self) -> Uuid {
        let bytes = self.seed.to_le_bytes();
        let mut uuid_bytes = [0u8; 16];
        uuid_bytes[..8].copy_from_slice(&bytes);
        uuid_bytes[8..16].copy_from_slice(&bytes);
        Uuid::from_bytes(uuid_bytes)
    }

    /// `test-<prefix>-<seed>-<suffix>`
    ///
    /// ```
    /// use test_utils::TestDataBuilder;
    ///
    /// let builder = TestDataBuilder::new(7);
    /// assert_eq!(builder.name("task", "main"), "test-task-7-main");
    /// ```
    pub fn name(&self, prefix: &str, suffix: &str) -> String {
        format!("test-{}-{}-{}", prefix, self.seed, suffix)
    }
}

/// Test assertion helpers
pub mod assertions {
    use uuid::Uuid;

    pub fn assert_uuid_eq(actual: Uuid, expected: Uuid, context: &str) {
        assert_eq!(
            actual, expected,
            "{}: expected UUID {}, got {}",
            context, expected, actual
        );
    }

    /// Unwrap `Some` or fail with `context`
    pub fn assert_some<T>(value: Option<T>, context: &str) -> T {
        value.unwrap_or_else(|| panic!("{}: expected Some, got None", context))
    }
}
