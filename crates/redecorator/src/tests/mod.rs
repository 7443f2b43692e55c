//! Scenario tests spanning loading, assignment and material resolution
