use crate::models::plant::{PlantCatalog, PlantVariant};

/// Category id selecting every category.
pub const ALL_CATEGORIES: &str = "all";

/// Variants of `category` (or all of them) whose name, id or tags contain
/// `query`, case-insensitively. Catalog order is preserved.
pub fn filter_variants<'a>(
    catalog: &'a PlantCatalog,
    category: Option<&str>,
    query: Option<&str>,
) -> Vec<&'a PlantVariant> {
    let source: Vec<&PlantVariant> = match category {
        None | Some(ALL_CATEGORIES) => catalog.variants().collect(),
        Some(id) => catalog
            .categories()
            .iter()
            .find(|c| c.id == id)
            .map(|c| c.variants.iter().collect())
            .unwrap_or_default(),
    };

    let query = query.map(|q| q.trim().to_lowercase()).unwrap_or_default();
    if query.is_empty() {
        return source;
    }

    source
        .into_iter()
        .filter(|v| {
            let in_name =
                v.name.to_lowercase().contains(&query) || v.id.to_lowercase().contains(&query);
            let in_tags = v.tags.iter().any(|t| t.to_lowercase().contains(&query));
            in_name || in_tags
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::catalog::builtin_catalog;

    fn ids(variants: &[&PlantVariant]) -> Vec<String> {
        variants.iter().map(|v| v.id.clone()).collect()
    }

    #[test]
    fn test_no_filter_returns_everything() {
        let catalog = builtin_catalog().unwrap();
        assert_eq!(filter_variants(&catalog, None, None).len(), catalog.len());
        assert_eq!(
            filter_variants(&catalog, Some(ALL_CATEGORIES), Some("   ")).len(),
            catalog.len()
        );
    }

    #[test]
    fn test_filter_by_category() {
        let catalog = builtin_catalog().unwrap();
        let result = filter_variants(&catalog, Some("roses"), None);
        assert_eq!(ids(&result), vec!["rose", "climbing-rose"]);
    }

    #[test]
    fn test_unknown_category_is_empty() {
        let catalog = builtin_catalog().unwrap();
        assert!(filter_variants(&catalog, Some("cacti"), None).is_empty());
    }

    #[test]
    fn test_query_matches_name_id_and_tags_case_insensitively() {
        let catalog = builtin_catalog().unwrap();
        let by_name = filter_variants(&catalog, None, Some("LAVEND"));
        assert_eq!(ids(&by_name), vec!["lavender"]);

        let by_tag = filter_variants(&catalog, None, Some("drought"));
        assert_eq!(ids(&by_tag), vec!["lavender", "fountain-grass"]);

        let by_id = filter_variants(&catalog, None, Some("japanese-"));
        assert_eq!(ids(&by_id), vec!["japanese-maple"]);
    }

    #[test]
    fn test_category_and_query_combine() {
        let catalog = builtin_catalog().unwrap();
        let result = filter_variants(&catalog, Some("perennials"), Some("shade"));
        assert_eq!(ids(&result), vec!["hosta", "hellebore"]);
    }
}
