//! Tests for workflow entities
