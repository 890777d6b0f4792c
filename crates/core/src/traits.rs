use async_trait::async_trait;

/// Read access to the OS process table, narrowed to the supervised bot.
///
/// Implementations never fail: an unavailable or timed-out lookup reports no
/// processes.
#[async_trait]
pub trait ProcessTable: Send + Sync {
    /// PIDs of processes whose command line matches the bot's launch signature.
    async fn locate(&self) -> Vec<u32>;
}
