use crate::models::{ExamCategory, TestSeries};

/// Fixed popularity ordering for category listings. Categories whose slug
/// appears here rank in this exact order ahead of everything else; unranked
/// categories follow alphabetically by display name.
pub const POPULARITY: &[&str] = &[
    "ssc",
    "upsc",
    "banking",
    "railways",
    "defence",
    "teaching",
    "state-psc",
];

/// Rank of a slug within the popularity list; unranked slugs sort last.
fn popularity_rank(slug: &str) -> usize {
    POPULARITY
        .iter()
        .position(|s| *s == slug)
        .unwrap_or(usize::MAX)
}

/// Stable-sort by (popularity rank, display name). Items already in rank
/// order keep their relative position on equal keys.
pub fn sort_by_popularity<T>(
    items: &mut [T],
    slug: impl Fn(&T) -> &str,
    name: impl Fn(&T) -> &str,
) {
    items.sort_by(|a, b| {
        popularity_rank(slug(a))
            .cmp(&popularity_rank(slug(b)))
            .then_with(|| name(a).cmp(name(b)))
    });
}

/// Apply the popularity ordering to a category listing.
pub fn sort_categories(categories: &mut [ExamCategory]) {
    sort_by_popularity(categories, |c| &c.slug, |c| &c.name);
}

/// Apply the popularity ordering to a test-series listing, keyed by the
/// owning category's slug.
pub fn sort_test_series(series: &mut [TestSeries]) {
    sort_by_popularity(series, |s| &s.category_slug, |s| &s.name);
}
