pub mod compose;
pub mod detail;
pub mod store;
pub mod suggest;

#[cfg(test)]
pub(crate) mod test_support;
