// Property-based tests for the scheduling engine

mod disjointness;
