//! SPARQL query text for each read operation.
//!
//! Identifiers are matched by suffix (`STRENDS`) so callers can pass a bare
//! local name while the store holds full namespaced IRIs. Query bodies use
//! the empty prefix `:`; the endpoint client declares it.

use crate::params::{LocalName, SearchTerm, UnitType};

/// Maximum number of rows returned by a search.
pub const SEARCH_LIMIT: usize = 50;

const WAS_REPLACED_BY: &str = ":wasReplacedBy";
const BELONGS_TO: &str = ":belongsTo";
const VDC_CLASS: &str = ":VDC";
const RDFS_LABEL: &str = "<http://www.w3.org/2000/01/rdf-schema#label>";

/// Quote `value` as a SPARQL string literal.
pub fn string_literal(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('"');
    for c in value.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            _ => out.push(c),
        }
    }
    out.push('"');
    out
}

fn ends_with_filter(var: &str, name: &LocalName) -> String {
    format!("FILTER(STRENDS(STR(?{var}), {}))", string_literal(name.as_str()))
}

/// Units of the requested class whose IRI ends with `unit_id`, with their
/// `wasReplacedBy` targets.
pub fn replaced_by(unit_type: &UnitType, unit_id: &LocalName) -> String {
    format!(
        "SELECT ?unit ?repl WHERE {{ ?unit a :{class} ; {WAS_REPLACED_BY} ?repl . {filter} }}",
        class = unit_type.class_name(),
        filter = ends_with_filter("unit", unit_id),
    )
}

/// Nodes replaced by the unit whose IRI ends with `unit_id`.
pub fn predecessors(unit_id: &LocalName) -> String {
    format!(
        "SELECT ?pred WHERE {{ ?pred {WAS_REPLACED_BY} ?current . {filter} }}",
        filter = ends_with_filter("current", unit_id),
    )
}

/// Replacement targets of the node named exactly `:{unit_id}`.
pub fn successors(unit_id: &LocalName) -> String {
    format!(
        "SELECT ?succ WHERE {{ :{id} {WAS_REPLACED_BY} ?succ }}",
        id = unit_id.as_str(),
    )
}

/// Distinct replaced VDCs under a district, and distinct units replacing them.
pub fn district_changes(district_id: &LocalName) -> String {
    format!(
        "SELECT (COUNT(DISTINCT ?old) AS ?numOld) (COUNT(DISTINCT ?new) AS ?numNew) \
         WHERE {{ ?old a {VDC_CLASS} ; {BELONGS_TO} ?d ; {WAS_REPLACED_BY} ?new . {filter} }}",
        filter = ends_with_filter("d", district_id),
    )
}

/// Subjects whose IRI contains `term`, case-insensitively.
pub fn search(term: &SearchTerm) -> String {
    format!(
        "SELECT ?unit WHERE {{ ?unit ?p ?o . FILTER(REGEX(STR(?unit), {pattern}, \"i\")) }} \
         LIMIT {SEARCH_LIMIT}",
        pattern = string_literal(&term.regex_pattern()),
    )
}

/// One unit of the requested class, with its optional label and the
/// ontology class it is typed with.
pub fn unit(unit_type: &UnitType, unit_id: &LocalName) -> String {
    format!(
        "SELECT ?unit ?name ?type WHERE {{ ?unit a :{class} ; a ?type . \
         OPTIONAL {{ ?unit {RDFS_LABEL} ?name }} {filter} \
         FILTER(STRSTARTS(STR(?type), STR(:))) }} LIMIT 1",
        class = unit_type.class_name(),
        filter = ends_with_filter("unit", unit_id),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_type(s: &str) -> UnitType {
        UnitType::parse(s).unwrap()
    }

    fn name(s: &str) -> LocalName {
        LocalName::parse("unitId", s).unwrap()
    }

    #[test]
    fn test_string_literal_escapes() {
        assert_eq!(string_literal("plain"), "\"plain\"");
        assert_eq!(string_literal(r#"a"b"#), r#""a\"b""#);
        assert_eq!(string_literal(r"a\.b"), r#""a\\.b""#);
        assert_eq!(string_literal("a\nb"), "\"a\\nb\"");
    }

    #[test]
    fn test_replaced_by_query() {
        let q = replaced_by(&unit_type("vdc"), &name("Bhimad"));
        assert_eq!(
            q,
            "SELECT ?unit ?repl WHERE { ?unit a :Vdc ; :wasReplacedBy ?repl . \
             FILTER(STRENDS(STR(?unit), \"Bhimad\")) }"
        );
        assert_eq!(q.matches(":Vdc").count(), 1);
    }

    #[test]
    fn test_replaced_by_uses_suffix_match() {
        let q = replaced_by(&unit_type("district"), &name("Kaski"));
        assert!(q.contains("STRENDS(STR(?unit), \"Kaski\")"));
        assert!(!q.contains("CONTAINS"));
        assert!(!q.contains("STRSTARTS"));
    }

    #[test]
    fn test_history_queries() {
        let id = name("VDC_42");
        assert_eq!(
            predecessors(&id),
            "SELECT ?pred WHERE { ?pred :wasReplacedBy ?current . \
             FILTER(STRENDS(STR(?current), \"VDC_42\")) }"
        );
        assert_eq!(
            successors(&id),
            "SELECT ?succ WHERE { :VDC_42 :wasReplacedBy ?succ }"
        );
    }

    #[test]
    fn test_district_changes_query() {
        let q = district_changes(&LocalName::parse("districtId", "Kaski").unwrap());
        assert!(q.starts_with(
            "SELECT (COUNT(DISTINCT ?old) AS ?numOld) (COUNT(DISTINCT ?new) AS ?numNew)"
        ));
        assert!(q.contains("?old a :VDC ; :belongsTo ?d ; :wasReplacedBy ?new ."));
        assert!(q.contains("FILTER(STRENDS(STR(?d), \"Kaski\"))"));
    }

    #[test]
    fn test_search_query() {
        let q = search(&SearchTerm::parse(Some("pokhara")).unwrap());
        assert_eq!(
            q,
            "SELECT ?unit WHERE { ?unit ?p ?o . FILTER(REGEX(STR(?unit), \"pokhara\", \"i\")) } \
             LIMIT 50"
        );
    }

    #[test]
    fn test_search_query_neutralizes_quotes() {
        let q = search(&SearchTerm::parse(Some(r#"x", "i")) } DROP ALL #"#)).unwrap());
        // The term stays inside one string literal: the only unescaped quotes
        // are the literal delimiters and the "i" flag.
        let unescaped = q
            .char_indices()
            .filter(|&(i, c)| c == '"' && !q[..i].ends_with('\\'))
            .count();
        assert_eq!(unescaped, 4);
        assert!(q.ends_with("LIMIT 50"));
    }

    #[test]
    fn test_unit_query() {
        let q = unit(&unit_type("district"), &name("Kaski"));
        assert!(q.contains("?unit a :District ; a ?type ."));
        assert!(q.contains("OPTIONAL { ?unit <http://www.w3.org/2000/01/rdf-schema#label> ?name }"));
        assert!(q.contains("FILTER(STRENDS(STR(?unit), \"Kaski\"))"));
        assert!(q.ends_with("LIMIT 1"));
    }
}
