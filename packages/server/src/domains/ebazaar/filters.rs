//! E-bazaar list filters: title search, category and location.

use serde::Deserialize;

use crate::common::search::{contains_ignore_case, contains_pattern, normalize_keyword};
use crate::domains::ebazaar::models::EBazaar;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct EBazaarFilterQuery {
    pub search: Option<String>,
    pub category: Option<String>,
    pub location: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EBazaarFilter {
    pub search: Option<String>,
    pub category: Option<String>,
    pub location: Option<String>,
}

impl From<EBazaarFilterQuery> for EBazaarFilter {
    fn from(query: EBazaarFilterQuery) -> Self {
        EBazaarFilter {
            search: normalize_keyword(query.search.as_deref()),
            category: normalize_keyword(query.category.as_deref()),
            location: normalize_keyword(query.location.as_deref()),
        }
    }
}

impl EBazaarFilter {
    pub fn search_pattern(&self) -> Option<String> {
        self.search.as_deref().map(contains_pattern)
    }

    pub fn matches(&self, ebazaar: &EBazaar) -> bool {
        let search = self
            .search
            .as_deref()
            .map_or(true, |keyword| contains_ignore_case(&ebazaar.title, keyword));
        let category = self
            .category
            .as_deref()
            .map_or(true, |category| ebazaar.category == category);
        let location = self
            .location
            .as_deref()
            .map_or(true, |location| ebazaar.location == location);

        search && category && location
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::ebazaar::models::NewEBazaar;
    use chrono::{Duration, Utc};

    fn bazaar(title: &str, category: &str, location: &str) -> EBazaar {
        let start = Utc::now();
        NewEBazaar::builder()
            .title(title)
            .category(category)
            .location(location)
            .start_at(start)
            .end_at(start + Duration::hours(1))
            .build()
            .into_ebazaar(start)
    }

    #[test]
    fn filters_combine() {
        let rows = [
            bazaar("Summer Food Fair", "food", "online"),
            bazaar("Food Truck Rally", "food", "outdoor"),
            bazaar("Gadget Night", "electronics", "online"),
        ];

        let filter = EBazaarFilter::from(EBazaarFilterQuery {
            search: Some("food".to_string()),
            category: Some("food".to_string()),
            location: Some("online".to_string()),
        });
        let hits: Vec<_> = rows.iter().filter(|r| filter.matches(r)).collect();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].title, "Summer Food Fair");
    }

    #[test]
    fn blank_values_do_not_filter() {
        let filter = EBazaarFilter::from(EBazaarFilterQuery {
            search: Some(" ".to_string()),
            category: Some(String::new()),
            location: None,
        });
        assert_eq!(filter, EBazaarFilter::default());
        assert!(filter.matches(&bazaar("x", "food", "online")));
    }
}
