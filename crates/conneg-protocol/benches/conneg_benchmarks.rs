//! Benchmarks for the conneg-protocol crate.
//!
//! Run with: cargo bench --package conneg-protocol
//! Or: cargo bench --package conneg-protocol --bench conneg_benchmarks

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};

use conneg_protocol::{
    preferences::{parse_accept, parse_accept_profile},
    AlternatesRenderer, Negotiation, NegotiationRequest, Profile, ProfileCatalog,
};

fn catalog() -> ProfileCatalog {
    let mut profiles = Vec::new();
    for i in 0..8 {
        profiles.push(Profile::new(
            format!("p{}", i),
            format!("http://example.com/def/profile/{}", i),
            format!("Profile {}", i),
            "",
            ["text/html", "text/turtle", "application/ld+json"],
            "text/html",
        ));
    }
    ProfileCatalog::new(profiles, "p0").unwrap()
}

// =============================================================================
// HEADER PARSING BENCHMARKS
// =============================================================================

fn bench_header_parsing(c: &mut Criterion) {
    let mut group = c.benchmark_group("header_parsing");

    let browser = "text/html,application/xhtml+xml,application/xml;q=0.9,image/webp,*/*;q=0.8";
    group.bench_function("parse_accept_browser", |b| {
        b.iter(|| parse_accept(black_box(Some(browser))))
    });

    let profiles = "<http://example.com/def/profile/3>;q=0.9, <http://example.com/def/profile/5>, <http://other.org/x>;q=0.2";
    group.bench_function("parse_accept_profile_3", |b| {
        b.iter(|| parse_accept_profile(black_box(Some(profiles))))
    });

    group.finish();
}

// =============================================================================
// NEGOTIATION BENCHMARKS
// =============================================================================

fn bench_negotiation(c: &mut Criterion) {
    let mut group = c.benchmark_group("negotiation");
    let catalog = catalog();

    let requests = [
        NegotiationRequest::new(),
        NegotiationRequest::new().with_profile("p4"),
        NegotiationRequest::new()
            .with_accept_profile("<http://example.com/def/profile/7>")
            .with_accept("text/turtle"),
        NegotiationRequest::new().with_profile("alternates"),
    ];
    group.throughput(Throughput::Elements(requests.len() as u64));
    group.bench_function("negotiate_batch_4", |b| {
        b.iter(|| {
            for request in &requests {
                let _ = Negotiation::new(catalog.clone(), "http://example.com/thing/1", black_box(request));
            }
        })
    });

    group.finish();
}

// =============================================================================
// ALTERNATES RENDERING BENCHMARKS
// =============================================================================

fn bench_alternates(c: &mut Criterion) {
    let mut group = c.benchmark_group("alternates");
    let catalog = catalog();
    let renderer = AlternatesRenderer::new(&catalog, "http://example.com/thing/1");

    for media_type in ["text/html", "application/json", "text/turtle", "application/rdf+xml"] {
        group.bench_function(media_type, |b| b.iter(|| renderer.render(black_box(media_type))));
    }

    group.finish();
}

criterion_group!(benches, bench_header_parsing, bench_negotiation, bench_alternates);
criterion_main!(benches);
