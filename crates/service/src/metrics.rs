use once_cell::sync::Lazy;
use prometheus::{register_int_counter, Encoder, IntCounter, TextEncoder};

// Prometheus metrics (default registry)
pub static POSTS_CREATED_TOTAL: Lazy<IntCounter> = Lazy::new(|| {
    register_int_counter!("blog_posts_created_total", "Total posts created")
        .expect("register posts_created_total")
});

pub static POSTS_UPDATED_TOTAL: Lazy<IntCounter> = Lazy::new(|| {
    register_int_counter!("blog_posts_updated_total", "Total posts updated")
        .expect("register posts_updated_total")
});

pub static POSTS_DELETED_TOTAL: Lazy<IntCounter> = Lazy::new(|| {
    register_int_counter!("blog_posts_deleted_total", "Total posts deleted")
        .expect("register posts_deleted_total")
});

pub static STORE_LOAD_FALLBACKS_TOTAL: Lazy<IntCounter> = Lazy::new(|| {
    register_int_counter!(
        "blog_store_load_fallbacks_total",
        "Loads that fell back to an empty store"
    )
    .expect("register store_load_fallbacks_total")
});

/// Render every registered metric in the Prometheus text format.
pub fn encode_metrics() -> prometheus::Result<String> {
    // Touch the counters so they show up before their first increment.
    Lazy::force(&POSTS_CREATED_TOTAL);
    Lazy::force(&POSTS_UPDATED_TOTAL);
    Lazy::force(&POSTS_DELETED_TOTAL);
    Lazy::force(&STORE_LOAD_FALLBACKS_TOTAL);

    let encoder = TextEncoder::new();
    let metric_families = prometheus::gather();
    let mut buffer = Vec::new();
    encoder.encode(&metric_families, &mut buffer)?;
    Ok(String::from_utf8_lossy(&buffer).into_owned())
}
