pub mod classifier;
pub mod orchestrator;
pub mod pipeline;
pub mod retry;

#[cfg(test)]
pub(crate) mod testing;
