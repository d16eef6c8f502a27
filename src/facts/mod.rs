//! Fact extraction passes. Facts are computed once per module, published
//! immutable, and merged by union across a module's dependency closure.

mod deprecated;

pub use deprecated::{extract, DeprecationFact, FactSet, ModuleDeprecationFact};
