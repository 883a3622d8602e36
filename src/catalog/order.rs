use crate::models::CatalogEntry;

/// Display order: `priority` ascending, then most recently updated first.
///
/// The sort is stable, so entries that tie on both keep their config-file order.
pub fn sort_entries(entries: &mut [CatalogEntry]) {
    entries.sort_by(|a, b| {
        a.priority.cmp(&b.priority).then(a.last_updated_hours.cmp(&b.last_updated_hours))
    });
}
