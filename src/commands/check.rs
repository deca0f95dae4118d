//! Validate content without serving it

use anyhow::Result;

use crate::config::SiteConfig;
use crate::Site;

/// Load every post and event, reporting the first problem found
pub fn run(config: SiteConfig) -> Result<Site> {
    let site = Site::build(config)?;

    println!(
        "OK: {} posts in {:?}, {} events in {:?}",
        site.posts.len(),
        site.config.posts_dir,
        site.events.len(),
        site.config.events_dir
    );

    let mut shadowed = duplicate_slugs(site.all_posts().iter().map(|p| p.slug.as_str()));
    shadowed.extend(duplicate_slugs(
        site.all_events().iter().map(|e| e.slug.as_str()),
    ));
    for slug in &shadowed {
        tracing::warn!(
            "Slug {:?} is shared; only the first record in listing order is reachable",
            slug
        );
    }

    Ok(site)
}

/// Slugs that appear more than once, in first-seen order
fn duplicate_slugs<'a>(slugs: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut seen = std::collections::HashSet::new();
    let mut duplicates = Vec::new();
    for slug in slugs {
        if !seen.insert(slug) && !duplicates.iter().any(|d| *d == slug) {
            duplicates.push(slug.to_string());
        }
    }
    duplicates
}
