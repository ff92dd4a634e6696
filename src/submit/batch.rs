//! Partitioning of validated URLs into notifier batches

/// Maximum number of URLs the notifier accepts in one request
pub const MAX_URLS_PER_BATCH: usize = 1000;

/// A contiguous slice of the validated URL list
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Batch<'a> {
    /// Zero-based position in submission order, used for error reporting
    pub index: usize,

    /// URLs in this batch, in their original order
    pub urls: &'a [String],
}

impl Batch<'_> {
    pub fn len(&self) -> usize {
        self.urls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.urls.is_empty()
    }
}

/// Splits `urls` into batches of at most `batch_size` entries
///
/// Concatenating the returned batches in order reproduces `urls` exactly.
/// A `batch_size` of zero is treated as one.
///
/// # Examples
///
/// ```
/// use sumi_notify::submit::partition_batches;
///
/// let urls: Vec<String> = (0..2500).map(|i| format!("https://example.com/{i}")).collect();
/// let batches = partition_batches(&urls, 1000);
/// assert_eq!(batches.len(), 3);
/// assert_eq!(batches[2].len(), 500);
/// ```
pub fn partition_batches(urls: &[String], batch_size: usize) -> Vec<Batch<'_>> {
    urls.chunks(batch_size.max(1))
        .enumerate()
        .map(|(index, urls)| Batch { index, urls })
        .collect()
}
