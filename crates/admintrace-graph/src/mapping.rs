//! Conversion from SPARQL result rows to response objects.

use admintrace_core::{
    CurrentUnit, DistrictChangeSummary, HistoryEntry, RawBinding, Replacement, TraceError, Unit,
    UnitRef,
};

fn required<'a>(binding: &'a RawBinding, var: &str) -> Result<&'a str, TraceError> {
    binding
        .get(var)
        .map(|term| term.value.as_str())
        .ok_or_else(|| TraceError::MalformedResult(format!("missing binding ?{var}")))
}

fn count(binding: &RawBinding, var: &str) -> Result<u64, TraceError> {
    let raw = required(binding, var)?;
    raw.trim().parse::<u64>().map_err(|_| {
        TraceError::MalformedResult(format!("?{var} is not a non-negative integer: {raw:?}"))
    })
}

/// Lowercased local class name of `type_uri`, without the namespace.
pub fn local_type_name(type_uri: &str, namespace: &str) -> String {
    let local = match type_uri.strip_prefix(namespace) {
        Some(rest) if !rest.is_empty() => rest,
        _ => type_uri
            .rsplit_once('#')
            .or_else(|| type_uri.rsplit_once('/'))
            .map_or(type_uri, |(_, tail)| tail),
    };
    local.to_lowercase()
}

/// Row with `?unit`, optional `?name` and `?type` to a [`Unit`].
pub fn to_unit(binding: &RawBinding, namespace: &str) -> Result<Unit, TraceError> {
    let id = required(binding, "unit")?;
    let name = binding
        .get("name")
        .map_or(id, |term| term.value.as_str());
    let unit_type = binding
        .get("type")
        .map(|term| local_type_name(&term.value, namespace))
        .unwrap_or_default();

    Ok(Unit {
        id: id.to_string(),
        name: name.to_string(),
        unit_type,
    })
}

/// Row with `?repl`; the type is the one the caller asked about.
pub fn to_replacement(binding: &RawBinding, unit_type: &str) -> Result<Replacement, TraceError> {
    Ok(Replacement {
        id: required(binding, "repl")?.to_string(),
        unit_type: unit_type.to_string(),
    })
}

pub fn to_unit_ref(binding: &RawBinding, var: &str) -> Result<UnitRef, TraceError> {
    Ok(UnitRef {
        id: required(binding, var)?.to_string(),
    })
}

/// Assemble a history chain. `current` comes from the request, not the store.
pub fn to_history_entry(
    predecessors: &[RawBinding],
    successors: &[RawBinding],
    unit_type: &str,
    unit_id: &str,
) -> Result<HistoryEntry, TraceError> {
    Ok(HistoryEntry {
        predecessors: predecessors
            .iter()
            .map(|row| to_unit_ref(row, "pred"))
            .collect::<Result<_, _>>()?,
        current: CurrentUnit {
            id: unit_id.to_string(),
            unit_type: unit_type.to_string(),
        },
        successors: successors
            .iter()
            .map(|row| to_unit_ref(row, "succ"))
            .collect::<Result<_, _>>()?,
    })
}

/// Aggregate row with `?numOld` / `?numNew`.
pub fn to_district_change_summary(
    binding: &RawBinding,
    district: &str,
) -> Result<DistrictChangeSummary, TraceError> {
    Ok(DistrictChangeSummary {
        district: district.to_string(),
        num_old_units: count(binding, "numOld")?,
        num_new_units: count(binding, "numNew")?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use admintrace_core::RdfTerm;

    const NS: &str = "http://nepal.admin.trace/ontology#";
    const XSD_INTEGER: &str = "http://www.w3.org/2001/XMLSchema#integer";

    fn row(pairs: &[(&str, RdfTerm)]) -> RawBinding {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    #[test]
    fn test_local_type_name() {
        assert_eq!(local_type_name(&format!("{NS}VDC"), NS), "vdc");
        assert_eq!(local_type_name(&format!("{NS}District"), NS), "district");
        assert_eq!(local_type_name("http://other.org/ont#Municipality", NS), "municipality");
        assert_eq!(local_type_name("http://other.org/ont/Ward", NS), "ward");
        assert_eq!(local_type_name("Zone", NS), "zone");
    }

    #[test]
    fn test_to_unit_defaults_name_to_id() {
        let id = format!("{NS}Bhimad");
        let binding = row(&[
            ("unit", RdfTerm::uri(&id)),
            ("type", RdfTerm::uri(format!("{NS}VDC"))),
        ]);
        let unit = to_unit(&binding, NS).unwrap();
        assert_eq!(unit.id, id);
        assert_eq!(unit.name, id);
        assert_eq!(unit.unit_type, "vdc");
    }

    #[test]
    fn test_to_unit_uses_label() {
        let binding = row(&[
            ("unit", RdfTerm::uri(format!("{NS}Kaski"))),
            ("name", RdfTerm::literal("Kaski District")),
            ("type", RdfTerm::uri(format!("{NS}District"))),
        ]);
        let unit = to_unit(&binding, NS).unwrap();
        assert_eq!(unit.name, "Kaski District");
        assert_eq!(unit.unit_type, "district");
    }

    #[test]
    fn test_to_unit_requires_id() {
        let binding = row(&[("name", RdfTerm::literal("orphan"))]);
        assert!(matches!(
            to_unit(&binding, NS),
            Err(TraceError::MalformedResult(_))
        ));
    }

    #[test]
    fn test_to_replacement() {
        let binding = row(&[
            ("unit", RdfTerm::uri(format!("{NS}Bhimad"))),
            ("repl", RdfTerm::uri(format!("{NS}Bhanu"))),
        ]);
        let repl = to_replacement(&binding, "vdc").unwrap();
        assert_eq!(repl.id, format!("{NS}Bhanu"));
        assert_eq!(repl.unit_type, "vdc");

        assert!(to_replacement(&RawBinding::new(), "vdc").is_err());
    }

    #[test]
    fn test_to_history_entry_keeps_order() {
        let preds = vec![
            row(&[("pred", RdfTerm::uri("urn:b"))]),
            row(&[("pred", RdfTerm::uri("urn:a"))]),
        ];
        let succs = vec![row(&[("succ", RdfTerm::uri("urn:z"))])];
        let entry = to_history_entry(&preds, &succs, "vdc", "X").unwrap();
        assert_eq!(
            entry.predecessors,
            vec![
                UnitRef { id: "urn:b".into() },
                UnitRef { id: "urn:a".into() }
            ]
        );
        assert_eq!(entry.current.id, "X");
        assert_eq!(entry.current.unit_type, "vdc");
        assert_eq!(entry.successors.len(), 1);
    }

    #[test]
    fn test_to_district_change_summary() {
        let binding = row(&[
            ("numOld", RdfTerm::typed_literal("3", XSD_INTEGER)),
            ("numNew", RdfTerm::typed_literal("2", XSD_INTEGER)),
        ]);
        let summary = to_district_change_summary(&binding, "D1").unwrap();
        assert_eq!(
            summary,
            DistrictChangeSummary {
                district: "D1".into(),
                num_old_units: 3,
                num_new_units: 2,
            }
        );
    }

    #[test]
    fn test_summary_rejects_non_numeric_counts() {
        for bad in ["three", "-1", "2.5", ""] {
            let binding = row(&[
                ("numOld", RdfTerm::literal(bad)),
                ("numNew", RdfTerm::literal("0")),
            ]);
            assert!(
                matches!(
                    to_district_change_summary(&binding, "D1"),
                    Err(TraceError::MalformedResult(_))
                ),
                "{bad:?} should be rejected"
            );
        }

        let missing = row(&[("numOld", RdfTerm::literal("1"))]);
        assert!(to_district_change_summary(&missing, "D1").is_err());
    }
}
