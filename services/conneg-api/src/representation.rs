//! Bodies for the non-alternates profiles of resources and the register.
//!
//! Every body is built from the resolved media type: HTML, JSON, one of the
//! RDF serializations, or a plain XML document for anything else.

use conneg_protocol::{
    media_types, rdf::Graph, vocab, Negotiation, NegotiationResult, RdfFormat, Term,
};
use quick_xml::escape::escape;
use serde::Serialize;

use crate::config::ResourceConfig;
use crate::subjects::{Member, RegisterSubject};

#[derive(Serialize)]
struct ResourceJson<'a> {
    uri: &'a str,
    id: &'a str,
    label: &'a str,
    #[serde(skip_serializing_if = "str::is_empty")]
    comment: &'a str,
    profile: &'a str,
    properties: &'a std::collections::BTreeMap<String, String>,
}

#[derive(Serialize)]
struct MemberJson<'a> {
    uri: &'a str,
    label: &'a str,
}

#[derive(Serialize)]
struct RegisterJson<'a> {
    uri: &'a str,
    label: &'a str,
    members: Vec<MemberJson<'a>>,
}

/// Render a resource in its negotiated profile.
pub fn render_resource(
    resource: &ResourceConfig,
    uri: &str,
    negotiation: &Negotiation,
) -> NegotiationResult<String> {
    let media_type = negotiation.media_type();
    let profile = negotiation.profile();

    if media_type == media_types::HTML {
        return Ok(resource_html(resource, uri, negotiation));
    }
    if media_type == media_types::JSON {
        let body = ResourceJson {
            uri,
            id: &resource.id,
            label: &resource.label,
            comment: &resource.comment,
            profile: &profile.uri,
            properties: &resource.properties,
        };
        return Ok(serde_json::to_string_pretty(&body)?);
    }
    if let Some(format) = RdfFormat::from_media_type(media_type) {
        return resource_graph(resource, uri, &profile.uri, negotiation.language()).serialize(format);
    }
    Ok(resource_xml(resource, uri, &profile.uri))
}

fn resource_graph(resource: &ResourceConfig, uri: &str, profile_uri: &str, language: &str) -> Graph {
    let mut g = Graph::new();
    g.bind("rdfs", vocab::RDFS_NS);
    g.bind("dct", vocab::DCT_NS);

    let subject = Term::iri(uri);
    if !resource.label.is_empty() {
        g.add(
            subject.clone(),
            vocab::RDFS_LABEL,
            Term::lang_string(&resource.label, language),
        );
    }
    if !resource.comment.is_empty() {
        g.add(
            subject.clone(),
            vocab::RDFS_COMMENT,
            Term::lang_string(&resource.comment, language),
        );
    }
    g.add(subject.clone(), vocab::DCT_CONFORMS_TO, Term::iri(profile_uri));
    for (predicate, value) in &resource.properties {
        g.add(subject.clone(), predicate.as_str(), Term::string(value));
    }
    g
}

fn resource_html(resource: &ResourceConfig, uri: &str, negotiation: &Negotiation) -> String {
    let profile = negotiation.profile();
    let rows: String = resource
        .properties
        .iter()
        .map(|(k, v)| {
            format!(
                "            <tr><td><a href=\"{k}\">{k}</a></td><td>{v}</td></tr>\n",
                k = escape(k.as_str()),
                v = escape(v.as_str())
            )
        })
        .collect();

    format!(
        r#"<!DOCTYPE html>
<html lang="{lang}">
<head>
    <meta charset="UTF-8">
    <title>{label}</title>
</head>
<body>
    <h1>{label}</h1>
    <p>URI: <a href="{uri}">{uri}</a></p>
    <p>{comment}</p>
    <p>Profile: <a href="{puri}">{plabel}</a> (<a href="{uri}?_profile=alternates">other representations</a>)</p>
    <table>
        <tbody>
{rows}        </tbody>
    </table>
</body>
</html>
"#,
        lang = escape(negotiation.language()),
        label = escape(resource.label.as_str()),
        uri = escape(uri),
        comment = escape(resource.comment.as_str()),
        puri = escape(profile.uri.as_str()),
        plabel = escape(profile.label.as_str()),
        rows = rows,
    )
}

fn resource_xml(resource: &ResourceConfig, uri: &str, profile_uri: &str) -> String {
    let mut xml = format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<resource uri="{}" conformsTo="{}">
    <id>{}</id>
    <label>{}</label>
    <comment>{}</comment>
"#,
        escape(uri),
        escape(profile_uri),
        escape(resource.id.as_str()),
        escape(resource.label.as_str()),
        escape(resource.comment.as_str()),
    );
    for (predicate, value) in &resource.properties {
        xml.push_str(&format!(
            "    <property predicate=\"{}\">{}</property>\n",
            escape(predicate.as_str()),
            escape(value.as_str())
        ));
    }
    xml.push_str("</resource>\n");
    xml
}

/// Render the landing register in its negotiated profile.
pub fn render_register(
    register: &RegisterSubject,
    negotiation: &Negotiation,
) -> NegotiationResult<String> {
    let media_type = negotiation.media_type();

    if media_type == media_types::HTML {
        return Ok(register_html(register));
    }
    if let Some(format) = RdfFormat::from_media_type(media_type).filter(|_| media_type != media_types::JSON) {
        return register_graph(register).serialize(format);
    }
    let body = RegisterJson {
        uri: &register.uri,
        label: &register.label,
        members: register
            .members
            .iter()
            .map(|m| MemberJson {
                uri: &m.uri,
                label: &m.label,
            })
            .collect(),
    };
    Ok(serde_json::to_string_pretty(&body)?)
}

fn register_graph(register: &RegisterSubject) -> Graph {
    let mut g = Graph::new();
    g.bind("rdfs", vocab::RDFS_NS);

    let subject = Term::iri(&register.uri);
    g.add(subject.clone(), vocab::RDFS_LABEL, Term::string(&register.label));
    for Member { uri, label } in &register.members {
        g.add(subject.clone(), vocab::RDFS_MEMBER, Term::iri(uri));
        g.add(Term::iri(uri), vocab::RDFS_LABEL, Term::string(label));
    }
    g
}

fn register_html(register: &RegisterSubject) -> String {
    let items: String = register
        .members
        .iter()
        .map(|m| {
            format!(
                "        <li><a href=\"{}\">{}</a></li>\n",
                escape(m.uri.as_str()),
                escape(m.label.as_str())
            )
        })
        .collect();

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <title>{label}</title>
</head>
<body>
    <h1>{label}</h1>
    <p>{count} members. <a href="{uri}?_profile=alternates">Other representations</a></p>
    <ul>
{items}    </ul>
</body>
</html>
"#,
        label = escape(register.label.as_str()),
        count = register.members.len(),
        uri = escape(register.uri.as_str()),
        items = items,
    )
}
