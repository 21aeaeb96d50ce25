/// A macro to simplify memoization through the in-process poster cache.
///
/// This macro checks if a value is present in the cache.
/// If found, it returns the cached value.
/// If not found, it awaits the provided future to compute the value,
/// stores it in the cache, and then returns the computed value.
///
/// # Arguments
/// * `$cache`: The cache instance to use. It must have async
///   `get_from_cache` and `set` methods.
/// * `$key`: The key to use for caching the value.
/// * `$block`: The future to await if the value is not found in cache.
///
/// # Example
/// ```rust,ignore
/// let poster = cached!(cache, movie_id, async move {
///     resolve_poster(movie_id).await
/// });
/// ```
#[macro_export]
macro_rules! cached {
    ($cache:expr, $key:expr, $block:expr) => {{
        if let Some(cached) = $cache.get_from_cache(&$key).await {
            cached
        } else {
            let value = $block.await;
            $cache.set(&$key, ::std::clone::Clone::clone(&value)).await;
            value
        }
    }};
}
