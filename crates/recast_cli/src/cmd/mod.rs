/// Materialize input data against a schema.
pub mod build;
/// Schema document validation command.
pub mod check;
/// Merged field listing command.
pub mod fields;

#[cfg(test)]
pub(crate) mod test_support;
mod util;
