//! The alternates representation: a listing of every profile, media type
//! and language a resource offers.

use quick_xml::escape::escape;
use serde::Serialize;

use crate::errors::NegotiationResult;
use crate::headers::representation_uri;
use crate::media_types;
use crate::profile::ProfileCatalog;
use crate::rdf::{Graph, RdfFormat, Term};
use crate::vocab;

/// JSON body of the alternates representation.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AlternatesJson {
    pub uri: String,
    pub profiles: Vec<String>,
    pub default_profile: String,
}

/// Renders a catalog, not the resource it describes.
#[derive(Debug, Clone, Copy)]
pub struct AlternatesRenderer<'a> {
    catalog: &'a ProfileCatalog,
    instance_uri: &'a str,
}

impl<'a> AlternatesRenderer<'a> {
    pub fn new(catalog: &'a ProfileCatalog, instance_uri: &'a str) -> Self {
        Self {
            catalog,
            instance_uri,
        }
    }

    /// Render for a resolved media type of the alternates profile.
    pub fn render(&self, media_type: &str) -> NegotiationResult<String> {
        if media_type == media_types::HTML {
            return Ok(self.to_html());
        }
        if media_type == media_types::JSON {
            return self.to_json();
        }
        match RdfFormat::from_media_type(media_type) {
            Some(format) => self.to_graph().serialize(format),
            None => self.to_json(),
        }
    }

    /// `{uri, profiles, defaultProfile}`.
    pub fn to_json(&self) -> NegotiationResult<String> {
        let body = AlternatesJson {
            uri: self.instance_uri.to_string(),
            profiles: self.catalog.tokens().map(str::to_string).collect(),
            default_profile: self.catalog.default_token().to_string(),
        };
        Ok(serde_json::to_string(&body)?)
    }

    /// One `alt:View` blank node per profile, one `dct:format` per media type.
    pub fn to_graph(&self) -> Graph {
        let mut g = Graph::new();
        g.bind("alt", vocab::ALT_NS);
        g.bind("prof", vocab::PROF_NS);
        g.bind("dct", vocab::DCT_NS);
        g.bind("rdfs", vocab::RDFS_NS);
        g.bind("xsd", vocab::XSD_NS);

        let instance = Term::iri(self.instance_uri);
        for profile in self.catalog.profiles() {
            let view = g.blank();
            g.add(instance.clone(), vocab::ALT_HAS_VIEW, view.clone());
            if profile.token == self.catalog.default_token() {
                g.add(instance.clone(), vocab::ALT_HAS_DEFAULT_VIEW, view.clone());
            }

            g.add(view.clone(), vocab::RDF_TYPE, Term::iri(vocab::ALT_VIEW));
            g.add(
                view.clone(),
                vocab::PROF_TOKEN,
                Term::typed(&profile.token, vocab::XSD_TOKEN),
            );
            g.add(view.clone(), vocab::RDFS_LABEL, Term::string(&profile.label));
            if !profile.comment.is_empty() {
                g.add(view.clone(), vocab::RDFS_COMMENT, Term::string(&profile.comment));
            }
            g.add(view.clone(), vocab::DCT_CONFORMS_TO, Term::iri(&profile.uri));
            for media_type in profile.public_media_types() {
                g.add(view.clone(), vocab::DCT_FORMAT, Term::string(media_type));
            }
            g.add(
                view,
                vocab::ALT_HAS_DEFAULT_FORMAT,
                Term::string(&profile.default_media_type),
            );
        }
        g
    }

    /// A structural HTML listing.
    pub fn to_html(&self) -> String {
        let uri = escape(self.instance_uri);
        let mut html = format!(
            r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <title>Alternate Representations of {uri}</title>
</head>
<body>
    <h1>Alternate Representations</h1>
    <p>Instance: <a href="{uri}">{uri}</a></p>
    <p>Default profile: <code>{default}</code></p>
    <table>
        <thead>
            <tr><th>Token</th><th>Profile</th><th>Media Types</th><th>Languages</th></tr>
        </thead>
        <tbody>
"#,
            uri = uri,
            default = escape(self.catalog.default_token()),
        );

        for profile in self.catalog.profiles() {
            let formats: Vec<String> = profile
                .public_media_types()
                .map(|m| {
                    let label = if m == profile.default_media_type {
                        format!("{} (default)", escape(m))
                    } else {
                        escape(m).into_owned()
                    };
                    format!(
                        r#"<a href="{}">{}</a>"#,
                        escape(representation_uri(self.instance_uri, &profile.token, m).as_str()),
                        label
                    )
                })
                .collect();
            let languages: Vec<String> = profile
                .languages
                .iter()
                .map(|l| {
                    if *l == profile.default_language {
                        format!("{} (default)", escape(l.as_str()))
                    } else {
                        escape(l.as_str()).into_owned()
                    }
                })
                .collect();

            html.push_str(&format!(
                r#"            <tr>
                <td><code>{token}</code></td>
                <td><a href="{puri}">{label}</a><br/>{comment}</td>
                <td>{formats}</td>
                <td>{languages}</td>
            </tr>
"#,
                token = escape(profile.token.as_str()),
                puri = escape(profile.uri.as_str()),
                label = escape(profile.label.as_str()),
                comment = escape(profile.comment.as_str()),
                formats = formats.join("<br/>"),
                languages = languages.join(", "),
            ));
        }

        html.push_str(
            r#"        </tbody>
    </table>
</body>
</html>
"#,
        );
        html
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::Profile;

    fn catalog() -> ProfileCatalog {
        ProfileCatalog::new(
            vec![
                Profile::new(
                    "dct",
                    "http://purl.org/dc/terms/",
                    "Dublin Core",
                    "Dublin Core <terms>",
                    ["text/html", "text/turtle"],
                    "text/turtle",
                ),
                Profile::new("fake", "http://fake.com", "Fake", "", ["text/xml"], "text/xml"),
            ],
            "dct",
        )
        .unwrap()
    }

    #[test]
    fn test_json_body() {
        let catalog = catalog();
        let json = AlternatesRenderer::new(&catalog, "http://x.com/a")
            .render("application/json")
            .unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["uri"], "http://x.com/a");
        assert_eq!(
            value["profiles"],
            serde_json::json!(["dct", "fake", "alternates"])
        );
        assert_eq!(value["defaultProfile"], "dct");
    }

    #[test]
    fn test_html_lists_every_token() {
        let catalog = catalog();
        let html = AlternatesRenderer::new(&catalog, "http://x.com/a").render("text/html").unwrap();
        for token in catalog.tokens() {
            assert!(html.contains(&format!("<code>{}</code>", token)));
        }
        assert!(html.contains("Dublin Core &lt;terms&gt;"));
        assert!(html.contains("text/turtle (default)"));
        assert!(html.contains("http://x.com/a?_profile=fake&amp;_mediatype=text/xml"));
    }

    #[test]
    fn test_graph_shape() {
        let catalog = catalog();
        let g = AlternatesRenderer::new(&catalog, "http://x.com/a").to_graph();
        let views = g
            .triples()
            .iter()
            .filter(|t| t.predicate == vocab::RDF_TYPE && t.object == Term::iri(vocab::ALT_VIEW))
            .count();
        assert_eq!(views, catalog.len());

        let formats = g
            .triples()
            .iter()
            .filter(|t| t.predicate == vocab::DCT_FORMAT)
            .count();
        let expected: usize = catalog
            .profiles()
            .iter()
            .map(|p| p.public_media_types().count())
            .sum();
        assert_eq!(formats, expected);

        let default_views = g
            .triples()
            .iter()
            .filter(|t| t.predicate == vocab::ALT_HAS_DEFAULT_VIEW)
            .count();
        assert_eq!(default_views, 1);
    }

    #[test]
    fn test_turtle_rendering() {
        let catalog = catalog();
        let ttl = AlternatesRenderer::new(&catalog, "http://x.com/a")
            .render("text/turtle")
            .unwrap();
        assert!(ttl.contains("@prefix alt: <http://promsns.org/def/alt#> ."));
        assert!(ttl.contains("a alt:View"));
        assert!(ttl.contains("prof:token \"dct\"^^xsd:token"));
        assert!(ttl.contains("alt:hasDefaultFormat \"text/turtle\""));
        assert!(ttl.contains("dct:conformsTo <http://fake.com>"));
    }

    #[test]
    fn test_rdf_xml_rendering() {
        let catalog = catalog();
        let xml = AlternatesRenderer::new(&catalog, "http://x.com/a")
            .render("application/rdf+xml")
            .unwrap();
        assert!(xml.contains("<rdf:type rdf:resource=\"http://promsns.org/def/alt#View\"/>"));
        assert!(xml.contains("<alt:hasView rdf:nodeID=\"b0\"/>"));
    }
}
