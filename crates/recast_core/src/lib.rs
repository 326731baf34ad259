//! Schema-directed mapping between loosely-typed data trees and typed records.

/// Record schemas, materialization, and flattening.
pub mod record;
