//! Expansion of investigation records into keyed query sets.

use crate::record::InvestigationRecord;
use serde::Serialize;
use serde_json::Value;
use sleuth_core::OrderedMap;
use tracing::debug;

/// Query descriptors keyed by their literal search string.
pub type QuerySet<D> = OrderedMap<String, D>;

/// A fully expanded query: company or product combined with one keyword.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IncidentQuery {
    /// Company the query was derived from
    pub company_name: String,
    /// Literal search string, also the key of this query
    pub search_string: String,
    /// Pass-through options of the source record
    pub search_options: Value,
}

/// A company or product name with its keywords left uncombined.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubjectQuery {
    /// Company the query was derived from
    pub company_name: String,
    /// Keywords still to be combined with `search_string`
    pub incident_keywords: Vec<String>,
    /// Company name or product name, also the key of this query
    pub search_string: String,
    /// Pass-through options of the source record
    pub search_options: Value,
}

impl SubjectQuery {
    /// Combine the deferred keywords into full query strings, in keyword order.
    #[must_use]
    pub fn expand(&self) -> Vec<String> {
        self.incident_keywords
            .iter()
            .map(|keyword| format!("{} {keyword}", self.search_string))
            .collect()
    }
}

/// Group queries by incident: one entry per (first-level word × keyword).
///
/// First-level words are `"<company> <product>"` for every product, or the
/// bare company name when the record lists no products.
#[must_use]
pub fn by_incident(records: &[InvestigationRecord]) -> QuerySet<IncidentQuery> {
    let mut queries = QuerySet::new();

    for record in records {
        let first_level: Vec<String> = if record.product_names.is_empty() {
            vec![record.company_name.clone()]
        } else {
            record
                .product_names
                .iter()
                .map(|product| format!("{} {product}", record.company_name))
                .collect()
        };

        for word in &first_level {
            for keyword in &record.incident_keywords {
                let search_string = format!("{word} {keyword}");
                queries.insert(
                    search_string.clone(),
                    IncidentQuery {
                        company_name: record.company_name.clone(),
                        search_string,
                        search_options: record.search_options.clone(),
                    },
                );
            }
        }
    }

    debug!(
        records = records.len(),
        queries = queries.len(),
        "generated queries by incident"
    );

    queries
}

/// Group queries by company or product: one entry per first-level word.
///
/// First-level words are the company name followed by every product name.
/// The company name is always included.
#[must_use]
pub fn by_subject(records: &[InvestigationRecord]) -> QuerySet<SubjectQuery> {
    let mut queries = QuerySet::new();

    for record in records {
        let first_level = std::iter::once(&record.company_name).chain(&record.product_names);

        for word in first_level {
            queries.insert(
                word.clone(),
                SubjectQuery {
                    company_name: record.company_name.clone(),
                    incident_keywords: record.incident_keywords.clone(),
                    search_string: word.clone(),
                    search_options: record.search_options.clone(),
                },
            );
        }
    }

    debug!(
        records = records.len(),
        queries = queries.len(),
        "generated queries by subject"
    );

    queries
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn no_products() -> Vec<&'static str> {
        Vec::new()
    }

    #[test]
    fn test_by_incident_company_only() {
        let records = vec![InvestigationRecord::new("Acme", no_products(), vec!["breach"])];
        let queries = by_incident(&records);

        assert_eq!(queries.keys(), ["Acme breach"]);
        let query = queries.get("Acme breach").expect("query present");
        assert_eq!(query.company_name, "Acme");
        assert_eq!(query.search_string, "Acme breach");
    }

    #[test]
    fn test_by_incident_empty_products_is_company_times_keywords() {
        let keywords = vec!["breach", "lawsuit", "outage"];
        let records = vec![InvestigationRecord::new("Initech", no_products(), keywords.clone())];
        let queries = by_incident(&records);

        let expected: Vec<String> = keywords.iter().map(|k| format!("Initech {k}")).collect();
        assert_eq!(queries.keys(), expected.as_slice());
    }

    #[test]
    fn test_by_incident_products_exclude_bare_company() {
        let records = vec![InvestigationRecord::new(
            "Acme",
            vec!["Widget"],
            vec!["leak", "hack"],
        )];
        let queries = by_incident(&records);

        assert_eq!(queries.len(), 2);
        assert_eq!(queries.keys(), ["Acme Widget leak", "Acme Widget hack"]);
        assert!(!queries.contains_key("Acme leak"));
        assert!(!queries.contains_key("Acme hack"));
    }

    #[test]
    fn test_by_incident_cross_product_order() {
        let records = vec![InvestigationRecord::new(
            "Globex",
            vec!["Phone", "Tablet"],
            vec!["recall", "fire"],
        )];
        let queries = by_incident(&records);

        assert_eq!(
            queries.keys(),
            [
                "Globex Phone recall",
                "Globex Phone fire",
                "Globex Tablet recall",
                "Globex Tablet fire",
            ]
        );
    }

    #[test]
    fn test_by_incident_collision_last_write_wins() {
        let records = vec![
            InvestigationRecord::new("Acme", no_products(), vec!["breach"])
                .with_search_options(json!({"source": "first"})),
            InvestigationRecord::new("Acme", no_products(), vec!["breach"])
                .with_search_options(json!({"source": "second"})),
        ];
        let queries = by_incident(&records);

        assert_eq!(queries.len(), 1);
        assert_eq!(
            queries.get("Acme breach").expect("query").search_options,
            json!({"source": "second"})
        );
    }

    #[test]
    fn test_by_incident_no_keywords() {
        let records = vec![InvestigationRecord::new("Acme", vec!["Widget"], no_products())];
        assert!(by_incident(&records).is_empty());
    }

    #[test]
    fn test_by_subject_always_includes_company() {
        let records = vec![
            InvestigationRecord::new("Acme", vec!["Widget", "Gadget"], vec!["leak"]),
            InvestigationRecord::new("Initech", no_products(), vec!["breach"]),
        ];
        let queries = by_subject(&records);

        assert_eq!(queries.keys(), ["Acme", "Widget", "Gadget", "Initech"]);

        let widget = queries.get("Widget").expect("widget query");
        assert_eq!(widget.company_name, "Acme");
        assert_eq!(widget.incident_keywords, vec!["leak"]);
        assert_eq!(widget.search_string, "Widget");
    }

    #[test]
    fn test_by_subject_collision_last_write_wins() {
        let records = vec![
            InvestigationRecord::new("Acme", vec!["Shared"], vec!["leak"]),
            InvestigationRecord::new("Globex", vec!["Shared"], vec!["recall"]),
        ];
        let queries = by_subject(&records);

        assert_eq!(queries.keys(), ["Acme", "Shared", "Globex"]);
        let shared = queries.get("Shared").expect("shared query");
        assert_eq!(shared.company_name, "Globex");
        assert_eq!(shared.incident_keywords, vec!["recall"]);
    }

    #[test]
    fn test_subject_query_expand() {
        let records = vec![InvestigationRecord::new("Acme", no_products(), vec!["leak", "hack"])];
        let queries = by_subject(&records);

        let acme = queries.get("Acme").expect("acme query");
        assert_eq!(acme.expand(), vec!["Acme leak", "Acme hack"]);
    }

    #[test]
    fn test_empty_records() {
        assert!(by_incident(&[]).is_empty());
        assert!(by_subject(&[]).is_empty());
    }
}
