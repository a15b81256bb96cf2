//! Document store integration tests.
