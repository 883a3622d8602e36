use crate::models::CatalogEntry;

/// Totals shown in the header and by `catalog-portal stats`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CatalogStats {
    pub projects: usize,
    pub models: u64,
    /// (category, count) in first-seen order
    pub by_category: Vec<(String, usize)>,
    pub recently_updated: usize,
}

pub fn summarize(entries: &[CatalogEntry]) -> CatalogStats {
    let mut stats = CatalogStats { projects: entries.len(), ..Default::default() };

    for entry in entries {
        stats.models += u64::from(entry.model_count);
        if entry.last_updated_hours <= crate::filters::category::RECENT_WINDOW_HOURS {
            stats.recently_updated += 1;
        }
        match stats.by_category.iter_mut().find(|(c, _)| *c == entry.category) {
            Some((_, count)) => *count += 1,
            None => stats.by_category.push((entry.category.clone(), 1)),
        }
    }

    stats
}
