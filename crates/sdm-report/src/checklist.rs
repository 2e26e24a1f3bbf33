//! Checklist scoring and cross-source aggregation.
//!
//! A field counts as present for a source when *any* of the source's
//! instances carries a non-empty value for it. Scoring never inspects
//! contracts; presence is all the dashboard needs.

use serde::Serialize;

use sdm_core::{InstanceHandle, PropertyName, Value};

use crate::grade::grade_index;

/// The fields an editorial checklist tracks and the grade scale it uses.
#[derive(Debug, Clone)]
pub struct SetupChecklist {
    fields: Vec<PropertyName>,
    grades: Vec<String>,
}

/// Presence of one checklist field for one source.
#[derive(Debug, Clone, Serialize)]
pub struct FieldPresence {
    /// The checklist field.
    pub field: PropertyName,
    /// Whether any of the source's instances carries a non-empty value.
    pub present: bool,
}

/// One source's completeness score.
#[derive(Debug, Clone, Serialize)]
pub struct SourceScore {
    /// The source's display handle.
    pub source: String,
    /// Index into the grade scale; `0` is best.
    pub grade_index: usize,
    /// The grade label at that index.
    pub grade: String,
    /// Per-field presence, in checklist order.
    pub fields: Vec<FieldPresence>,
}

/// Scores for a set of sources plus a cross-source per-field tally.
#[derive(Debug, Clone, Serialize)]
pub struct AggregateReport {
    /// One row per source, in input order.
    pub sources: Vec<SourceScore>,
    /// For each checklist field, how many sources have it present.
    pub field_tally: Vec<(PropertyName, usize)>,
}

impl Default for SetupChecklist {
    /// The stock setup checklist: five content fields graded A through D.
    fn default() -> Self {
        let fields = ["title", "description", "image", "robots", "sitemap"]
            .into_iter()
            .map(|f| PropertyName::new(f).expect("stock field names are non-empty"))
            .collect();
        let grades = ["A", "B", "C", "D"].map(String::from).to_vec();
        Self { fields, grades }
    }
}

impl SetupChecklist {
    /// A checklist with custom fields and grade labels.
    pub fn new(fields: Vec<PropertyName>, grades: Vec<String>) -> Self {
        Self { fields, grades }
    }

    /// The tracked fields, in checklist order.
    pub fn fields(&self) -> &[PropertyName] {
        &self.fields
    }

    /// The grade labels, best first.
    pub fn grades(&self) -> &[String] {
        &self.grades
    }

    /// Score one source from its rendered instances.
    pub fn score_source(&self, source: impl Into<String>, instances: &[InstanceHandle]) -> SourceScore {
        let fields: Vec<FieldPresence> = self
            .fields
            .iter()
            .map(|field| FieldPresence {
                field: field.clone(),
                present: instances.iter().any(|handle| {
                    handle
                        .borrow()
                        .get(field.as_str())
                        .is_some_and(|value| !Value::is_empty(value))
                }),
            })
            .collect();
        let present = fields.iter().filter(|f| f.present).count();
        let index = grade_index(present, self.fields.len(), self.grades.len());
        let grade = self
            .grades
            .get(index)
            .cloned()
            .unwrap_or_default();
        SourceScore {
            source: source.into(),
            grade_index: index,
            grade,
            fields,
        }
    }

    /// Score every source and tally field presence across them.
    pub fn aggregate(&self, sources: &[(String, Vec<InstanceHandle>)]) -> AggregateReport {
        let rows: Vec<SourceScore> = sources
            .iter()
            .map(|(name, instances)| self.score_source(name.clone(), instances))
            .collect();
        let field_tally = self
            .fields
            .iter()
            .enumerate()
            .map(|(i, field)| {
                let count = rows.iter().filter(|row| row.fields[i].present).count();
                (field.clone(), count)
            })
            .collect();
        tracing::debug!(sources = rows.len(), "aggregated checklist scores");
        AggregateReport {
            sources: rows,
            field_tally,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sdm_core::{EntityInstance, TypeName};

    fn prop(name: &str) -> PropertyName {
        PropertyName::new(name).unwrap()
    }

    fn page(values: &[(&str, &str)]) -> InstanceHandle {
        let mut instance = EntityInstance::new(TypeName::new("WebPage").unwrap());
        for (name, value) in values {
            instance.set(prop(name), Value::text(*value));
        }
        instance.into_handle()
    }

    #[test]
    fn test_presence_is_any_instance() {
        let checklist = SetupChecklist::default();
        let score = checklist.score_source(
            "blog",
            &[
                page(&[("title", "Post")]),
                page(&[("description", "About the post")]),
            ],
        );
        let presence: Vec<bool> = score.fields.iter().map(|f| f.present).collect();
        assert_eq!(presence, vec![true, true, false, false, false]);
    }

    #[test]
    fn test_blank_values_do_not_count() {
        let checklist = SetupChecklist::default();
        let score = checklist.score_source("blog", &[page(&[("title", "   ")])]);
        assert!(!score.fields[0].present);
    }

    #[test]
    fn test_grade_labels_track_the_curve() {
        let checklist = SetupChecklist::default();
        let all = checklist.score_source(
            "complete",
            &[page(&[
                ("title", "t"),
                ("description", "d"),
                ("image", "i"),
                ("robots", "r"),
                ("sitemap", "s"),
            ])],
        );
        assert_eq!(all.grade_index, 0);
        assert_eq!(all.grade, "A");

        let none = checklist.score_source("empty", &[]);
        assert_eq!(none.grade_index, 3);
        assert_eq!(none.grade, "D");
    }

    #[test]
    fn test_aggregate_tallies_per_field() {
        let checklist = SetupChecklist::default();
        let report = checklist.aggregate(&[
            ("blog".to_string(), vec![page(&[("title", "a")])]),
            ("news".to_string(), vec![page(&[("title", "b"), ("image", "u")])]),
            ("docs".to_string(), vec![]),
        ]);
        assert_eq!(report.sources.len(), 3);
        let tally: Vec<(&str, usize)> = report
            .field_tally
            .iter()
            .map(|(f, n)| (f.as_str(), *n))
            .collect();
        assert_eq!(
            tally,
            vec![
                ("title", 2),
                ("description", 0),
                ("image", 1),
                ("robots", 0),
                ("sitemap", 0),
            ]
        );
    }

    #[test]
    fn test_score_serializes_for_dashboards() {
        let checklist = SetupChecklist::default();
        let score = checklist.score_source("blog", &[page(&[("title", "t")])]);
        let json = serde_json::to_value(&score).unwrap();
        assert_eq!(json["source"], "blog");
        assert_eq!(json["fields"][0]["field"], "title");
        assert_eq!(json["fields"][0]["present"], true);
    }
}
