use serde::{Deserialize, Serialize};

use crate::models::TestResult;

/// Test results grouped category → subcategory, both levels in
/// first-seen order. No sorting, no deduplication: the same test taken
/// on different dates stays as separate rows.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GroupedResults {
    pub categories: Vec<CategoryGroup>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryGroup {
    pub name: String,
    pub subcategories: Vec<SubcategoryGroup>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubcategoryGroup {
    pub name: String,
    pub results: Vec<TestResult>,
}

impl GroupedResults {
    /// Total number of results across all buckets.
    pub fn total_count(&self) -> usize {
        self.categories
            .iter()
            .flat_map(|c| &c.subcategories)
            .map(|s| s.results.len())
            .sum()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }
}

/// Partitions results into category/subcategory buckets in one
/// left-to-right pass. Buckets are created on first sight, so the
/// output never contains an empty category or subcategory.
pub fn group_results(results: Vec<TestResult>) -> GroupedResults {
    let mut grouped = GroupedResults::default();

    for result in results {
        let category = match grouped
            .categories
            .iter_mut()
            .find(|c| c.name == result.test_category)
        {
            Some(existing) => existing,
            None => {
                grouped.categories.push(CategoryGroup {
                    name: result.test_category.clone(),
                    subcategories: Vec::new(),
                });
                grouped.categories.last_mut().expect("just pushed")
            }
        };

        let subcategory = match category
            .subcategories
            .iter_mut()
            .find(|s| s.name == result.test_subcategory)
        {
            Some(existing) => existing,
            None => {
                category.subcategories.push(SubcategoryGroup {
                    name: result.test_subcategory.clone(),
                    results: Vec::new(),
                });
                category.subcategories.last_mut().expect("just pushed")
            }
        };

        subcategory.results.push(result);
    }

    grouped
}
