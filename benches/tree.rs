use std::collections::HashMap;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, SamplingMode, Throughput};
use rand::{rngs::StdRng, Rng, SeedableRng};

use acl_inspector::memory::{Fixture, FixtureNode, Permission, StaticPrivilege, StaticRole};
use acl_inspector::tree::count_records;
use acl_inspector::{AclCheckerService, InspectorConfig, PrivilegeKind};

const PAGE: &str = "Bench:Page";
const TEXT: &str = "Bench:Text";
const COLLECTION: &str = "Neos.Neos:ContentCollection";

// Random page tree: every page gets a main collection with a few text nodes.
fn gen_pages(rng: &mut StdRng, depth: u32, fanout: usize, prefix: &str) -> Vec<FixtureNode> {
    if depth == 0 {
        return Vec::new();
    }
    let n = rng.gen_range(1..=fanout);
    (0..n)
        .map(|i| {
            let name = format!("{}{}", prefix, i);
            let texts = (0..rng.gen_range(0..4)).map(|t| FixtureNode::new(&format!("text{}", t), TEXT)).collect();
            let mut children = vec![FixtureNode::new("main", COLLECTION).with_children(texts)];
            children.extend(gen_pages(rng, depth - 1, fanout, "p"));
            FixtureNode::new(&name, PAGE).with_children(children)
        })
        .collect()
}

fn gen_fixture(depth: u32, fanout: usize, seed: u64) -> Fixture {
    let mut rng = StdRng::seed_from_u64(seed);
    let site = FixtureNode::new("bench", PAGE).with_children(gen_pages(&mut rng, depth, fanout, "page"));
    let mut node_types = HashMap::new();
    node_types.insert(PAGE.to_string(), vec!["Neos.Neos:Document".to_string()]);
    let roles = vec![
        StaticRole::new(
            "Bench:Editor",
            vec![
                StaticPrivilege::new("Bench:Edit", PrivilegeKind::EditNode, Permission::Grant).on_paths("/sites/bench**"),
                StaticPrivilege::new("Bench:Show", PrivilegeKind::NodeTree, Permission::Grant),
                StaticPrivilege::new("Bench:NoRemove", PrivilegeKind::RemoveNode, Permission::Deny).on_paths("/sites/bench/page0/**"),
            ],
        ),
        StaticRole::new(
            "Bench:Viewer",
            vec![StaticPrivilege::new("Bench:Show", PrivilegeKind::NodeTree, Permission::Grant)],
        ),
    ];
    Fixture {
        entry: Some("/sites/bench".to_string()),
        node_types,
        nodes: vec![FixtureNode::new("sites", "unstructured").with_children(vec![site])],
        roles,
    }
}

fn bench_tree(c: &mut Criterion) {
    let mut group = c.benchmark_group("acl_tree");
    group.sampling_mode(SamplingMode::Flat);
    group.sample_size(20);

    for &(depth, fanout) in &[(3u32, 6usize), (4, 8)] {
        let (nodes, policies) = match gen_fixture(depth, fanout, 0xAC1_7EE5).into_stores() {
            Ok(s) => s,
            Err(e) => panic!("bench fixture: {}", e),
        };
        let svc = AclCheckerService::new(nodes, policies, InspectorConfig::default());
        let roles = ["Bench:Editor", "Bench:Viewer"];
        let records = svc.build_acl_tree(&roles, 0).map(|f| count_records(&f)).unwrap_or(0);
        group.throughput(Throughput::Elements(records as u64));

        group.bench_with_input(BenchmarkId::new("document_tree", format!("d{}_f{}", depth, fanout)), &roles, |b, roles| {
            b.iter(|| svc.build_acl_tree(roles, 0).map(|f| f.len()).unwrap_or(0));
        });

        if let Ok(home) = svc.nodes().node("/sites/bench") {
            let resolved = svc.resolve_roles(&roles).unwrap_or_default();
            group.bench_with_input(BenchmarkId::new("content_area", format!("d{}_f{}", depth, fanout)), &resolved, |b, roles| {
                b.iter(|| svc.build_default_content_tree(&home, roles).map(|f| f.len()).unwrap_or(0));
            });
        }
    }
    group.finish();
}

criterion_group!(benches, bench_tree);
criterion_main!(benches);
