//! Binds the journal feature files to the step registry.

use rstest_bdd_macros::scenarios;

scenarios!("tests/features/journal.feature");
scenarios!("tests/features/version.feature");
scenarios!("tests/features/messages.feature");
