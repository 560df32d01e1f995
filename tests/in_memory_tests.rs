//! Integration tests for InMemoryStore using the storage test harness.
//!
//! This file invokes `social_store_tests!` to validate that InMemoryStore
//! fully conforms to the SocialStore contract.

#[macro_use]
mod storage_harness;

use socialgraph::storage::InMemoryStore;
use storage_harness::*;

social_store_tests!(InMemoryStore::new());
