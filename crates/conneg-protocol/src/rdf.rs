//! A minimal RDF graph and its text serializations.
//!
//! Only what the alternates representation and simple resource descriptions
//! need: IRIs, blank nodes and literals, with writers for Turtle (also used
//! for N3), N-Triples, expanded JSON-LD and RDF/XML. Triples keep insertion
//! order so output is deterministic.

use std::fmt::Write as _;

use quick_xml::escape::escape;
use serde_json::{json, Map, Value};

use crate::errors::{NegotiationError, NegotiationResult};
use crate::vocab;

/// An RDF term.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Term {
    /// Absolute IRI.
    Iri(String),
    /// Blank node label, unique within one graph.
    Blank(String),
    /// Literal with an optional datatype IRI or language tag.
    Literal {
        value: String,
        datatype: Option<String>,
        language: Option<String>,
    },
}

impl Term {
    pub fn iri(iri: impl Into<String>) -> Self {
        Term::Iri(iri.into())
    }

    /// A plain `xsd:string` literal.
    pub fn string(value: impl Into<String>) -> Self {
        Term::Literal {
            value: value.into(),
            datatype: None,
            language: None,
        }
    }

    /// A literal with an explicit datatype.
    pub fn typed(value: impl Into<String>, datatype: impl Into<String>) -> Self {
        Term::Literal {
            value: value.into(),
            datatype: Some(datatype.into()),
            language: None,
        }
    }

    /// A language-tagged literal.
    pub fn lang_string(value: impl Into<String>, language: impl Into<String>) -> Self {
        Term::Literal {
            value: value.into(),
            datatype: None,
            language: Some(language.into()),
        }
    }
}

/// A subject-predicate-object statement.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Triple {
    pub subject: Term,
    pub predicate: String,
    pub object: Term,
}

/// An ordered collection of triples with prefix bindings.
#[derive(Debug, Clone, Default)]
pub struct Graph {
    triples: Vec<Triple>,
    prefixes: Vec<(String, String)>,
    next_blank: usize,
}

impl Graph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind a prefix used when writing Turtle and RDF/XML.
    pub fn bind(&mut self, prefix: impl Into<String>, namespace: impl Into<String>) {
        let prefix = prefix.into();
        let namespace = namespace.into();
        self.prefixes.retain(|(p, _)| *p != prefix);
        self.prefixes.push((prefix, namespace));
    }

    /// Allocate a fresh blank node.
    pub fn blank(&mut self) -> Term {
        let term = Term::Blank(format!("b{}", self.next_blank));
        self.next_blank += 1;
        term
    }

    pub fn add(&mut self, subject: Term, predicate: impl Into<String>, object: Term) {
        self.triples.push(Triple {
            subject,
            predicate: predicate.into(),
            object,
        });
    }

    pub fn triples(&self) -> &[Triple] {
        &self.triples
    }

    pub fn len(&self) -> usize {
        self.triples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.triples.is_empty()
    }

    /// Distinct subjects in order of first appearance.
    fn subjects(&self) -> Vec<&Term> {
        let mut subjects: Vec<&Term> = Vec::new();
        for triple in &self.triples {
            if !subjects.contains(&&triple.subject) {
                subjects.push(&triple.subject);
            }
        }
        subjects
    }

    fn triples_for<'a>(&'a self, subject: &'a Term) -> impl Iterator<Item = &'a Triple> {
        self.triples.iter().filter(move |t| t.subject == *subject)
    }

    /// Serialize in the given format.
    pub fn serialize(&self, format: RdfFormat) -> NegotiationResult<String> {
        match format {
            RdfFormat::Turtle | RdfFormat::N3 => Ok(self.to_turtle()),
            RdfFormat::NTriples => Ok(self.to_ntriples()),
            RdfFormat::JsonLd => self.to_json_ld(),
            RdfFormat::RdfXml => self.to_rdf_xml(),
        }
    }

    fn compact(&self, iri: &str) -> Option<String> {
        self.prefixes.iter().find_map(|(prefix, ns)| {
            let local = iri.strip_prefix(ns.as_str())?;
            let simple = local
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
                && local.chars().next().map_or(true, |c| c.is_ascii_alphabetic() || c == '_');
            simple.then(|| format!("{}:{}", prefix, local))
        })
    }

    fn turtle_iri(&self, iri: &str) -> String {
        self.compact(iri).unwrap_or_else(|| format!("<{}>", iri))
    }

    fn turtle_term(&self, term: &Term) -> String {
        match term {
            Term::Iri(iri) => self.turtle_iri(iri),
            Term::Blank(id) => format!("_:{}", id),
            Term::Literal {
                value,
                datatype,
                language,
            } => {
                let mut out = format!("\"{}\"", escape_literal(value));
                if let Some(lang) = language {
                    out.push('@');
                    out.push_str(lang);
                } else if let Some(dt) = datatype.as_deref().filter(|dt| *dt != vocab::XSD_STRING) {
                    out.push_str("^^");
                    out.push_str(&self.turtle_iri(dt));
                }
                out
            }
        }
    }

    /// Turtle, grouping statements by subject.
    pub fn to_turtle(&self) -> String {
        let mut out = String::new();
        for (prefix, ns) in &self.prefixes {
            let _ = writeln!(out, "@prefix {}: <{}> .", prefix, ns);
        }
        if !self.prefixes.is_empty() {
            out.push('\n');
        }

        for subject in self.subjects() {
            let statements: Vec<String> = self
                .triples_for(subject)
                .map(|t| {
                    let predicate = if t.predicate == vocab::RDF_TYPE {
                        "a".to_string()
                    } else {
                        self.turtle_iri(&t.predicate)
                    };
                    format!("{} {}", predicate, self.turtle_term(&t.object))
                })
                .collect();
            let _ = writeln!(
                out,
                "{}\n    {} .\n",
                self.turtle_term(subject),
                statements.join(" ;\n    ")
            );
        }
        out
    }

    /// N-Triples, one statement per line.
    pub fn to_ntriples(&self) -> String {
        let mut out = String::new();
        for t in &self.triples {
            let _ = writeln!(
                out,
                "{} <{}> {} .",
                ntriples_term(&t.subject),
                t.predicate,
                ntriples_term(&t.object)
            );
        }
        out
    }

    /// JSON-LD in expanded form.
    pub fn to_json_ld(&self) -> NegotiationResult<String> {
        let mut nodes = Vec::new();
        for subject in self.subjects() {
            let mut node = Map::new();
            node.insert("@id".to_string(), Value::String(node_id(subject)));
            for t in self.triples_for(subject) {
                if t.predicate == vocab::RDF_TYPE {
                    if let Term::Iri(class) = &t.object {
                        push_value(&mut node, "@type", Value::String(class.clone()));
                        continue;
                    }
                }
                push_value(&mut node, &t.predicate, json_ld_object(&t.object));
            }
            nodes.push(Value::Object(node));
        }
        Ok(serde_json::to_string_pretty(&Value::Array(nodes))?)
    }

    /// RDF/XML with one `rdf:Description` per subject.
    pub fn to_rdf_xml(&self) -> NegotiationResult<String> {
        // Namespaces for predicates: bound prefixes first, generated ones after.
        let mut namespaces: Vec<(String, String)> =
            vec![("rdf".to_string(), vocab::RDF_NS.to_string())];
        let mut qnames = Vec::with_capacity(self.triples.len());
        for t in &self.triples {
            let (ns, local) = split_iri(&t.predicate).ok_or_else(|| {
                NegotiationError::Serialization(format!(
                    "predicate {} cannot be written as an XML element name",
                    t.predicate
                ))
            })?;
            let prefix = match namespaces.iter().find(|(_, n)| n == ns) {
                Some((p, _)) => p.clone(),
                None => {
                    let p = self
                        .prefixes
                        .iter()
                        .find(|(p, n)| n == ns && !namespaces.iter().any(|(q, _)| q == p))
                        .map(|(p, _)| p.clone())
                        .unwrap_or_else(|| format!("ns{}", namespaces.len()));
                    namespaces.push((p.clone(), ns.to_string()));
                    p
                }
            };
            qnames.push(format!("{}:{}", prefix, local));
        }

        let mut xml = String::from("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<rdf:RDF");
        for (prefix, ns) in &namespaces {
            let _ = write!(xml, "\n    xmlns:{}=\"{}\"", prefix, escape(ns.as_str()));
        }
        xml.push_str(">\n");

        for subject in self.subjects() {
            match subject {
                Term::Blank(id) => {
                    let _ = writeln!(xml, "  <rdf:Description rdf:nodeID=\"{}\">", id);
                }
                Term::Iri(iri) => {
                    let _ = writeln!(
                        xml,
                        "  <rdf:Description rdf:about=\"{}\">",
                        escape(iri.as_str())
                    );
                }
                Term::Literal { .. } => {
                    return Err(NegotiationError::Serialization(
                        "a literal cannot be the subject of a statement".to_string(),
                    ))
                }
            }
            for (t, qname) in self.triples.iter().zip(&qnames) {
                if t.subject != *subject {
                    continue;
                }
                match &t.object {
                    Term::Iri(iri) => {
                        let _ = writeln!(
                            xml,
                            "    <{} rdf:resource=\"{}\"/>",
                            qname,
                            escape(iri.as_str())
                        );
                    }
                    Term::Blank(id) => {
                        let _ = writeln!(xml, "    <{} rdf:nodeID=\"{}\"/>", qname, id);
                    }
                    Term::Literal {
                        value,
                        datatype,
                        language,
                    } => {
                        let attr = match (language, datatype) {
                            (Some(lang), _) => format!(" xml:lang=\"{}\"", escape(lang.as_str())),
                            (None, Some(dt)) => {
                                format!(" rdf:datatype=\"{}\"", escape(dt.as_str()))
                            }
                            (None, None) => String::new(),
                        };
                        let _ = writeln!(
                            xml,
                            "    <{0}{1}>{2}</{0}>",
                            qname,
                            attr,
                            escape(value.as_str())
                        );
                    }
                }
            }
            xml.push_str("  </rdf:Description>\n");
        }
        xml.push_str("</rdf:RDF>\n");
        Ok(xml)
    }
}

/// RDF serialization formats, selected by media type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RdfFormat {
    Turtle,
    N3,
    NTriples,
    JsonLd,
    RdfXml,
}

impl RdfFormat {
    /// Map a media type, including common but incorrect aliases, to a writer.
    pub fn from_media_type(media_type: &str) -> Option<Self> {
        match media_type {
            "text/turtle" | "text/ttl" => Some(RdfFormat::Turtle),
            "text/n3" => Some(RdfFormat::N3),
            "application/n-triples" | "text/ntriples" | "text/n-triples" => {
                Some(RdfFormat::NTriples)
            }
            "application/ld+json" | "application/rdf+json" | "application/json"
            | "application/ld json" => Some(RdfFormat::JsonLd),
            "application/rdf+xml" | "application/rdf" | "application/rdf xml" => {
                Some(RdfFormat::RdfXml)
            }
            _ => None,
        }
    }

    /// Name of the serializer, as reported in logs.
    pub fn name(&self) -> &'static str {
        match self {
            RdfFormat::Turtle => "turtle",
            RdfFormat::N3 => "n3",
            RdfFormat::NTriples => "nt",
            RdfFormat::JsonLd => "json-ld",
            RdfFormat::RdfXml => "xml",
        }
    }
}

fn escape_literal(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c => out.push(c),
        }
    }
    out
}

fn ntriples_term(term: &Term) -> String {
    match term {
        Term::Iri(iri) => format!("<{}>", iri),
        Term::Blank(id) => format!("_:{}", id),
        Term::Literal {
            value,
            datatype,
            language,
        } => match (language, datatype) {
            (Some(lang), _) => format!("\"{}\"@{}", escape_literal(value), lang),
            (None, Some(dt)) => format!("\"{}\"^^<{}>", escape_literal(value), dt),
            (None, None) => format!("\"{}\"", escape_literal(value)),
        },
    }
}

fn node_id(term: &Term) -> String {
    match term {
        Term::Iri(iri) => iri.clone(),
        Term::Blank(id) => format!("_:{}", id),
        Term::Literal { value, .. } => value.clone(),
    }
}

fn json_ld_object(term: &Term) -> Value {
    match term {
        Term::Literal {
            value,
            datatype,
            language,
        } => match (language, datatype) {
            (Some(lang), _) => json!({ "@value": value, "@language": lang }),
            (None, Some(dt)) => json!({ "@value": value, "@type": dt }),
            (None, None) => json!({ "@value": value }),
        },
        other => json!({ "@id": node_id(other) }),
    }
}

fn push_value(node: &mut Map<String, Value>, key: &str, value: Value) {
    match node.get_mut(key) {
        Some(Value::Array(values)) => values.push(value),
        _ => {
            node.insert(key.to_string(), Value::Array(vec![value]));
        }
    }
}

/// Split an IRI into namespace and an XML-safe local name.
fn split_iri(iri: &str) -> Option<(&str, &str)> {
    let idx = iri.rfind(|c| c == '#' || c == '/')?;
    let (ns, local) = iri.split_at(idx + 1);
    let mut chars = local.chars();
    let first_ok = chars
        .next()
        .map_or(false, |c| c.is_ascii_alphabetic() || c == '_');
    let rest_ok = chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-' || c == '.');
    (first_ok && rest_ok).then_some((ns, local))
}
