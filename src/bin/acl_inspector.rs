//!
//! acl-inspector CLI
//! -----------------
//! Loads a JSON site fixture (content tree + roles) and prints permission-annotated
//! views of it as JSON: the document tree, a content area, a single-node summary or
//! the privilege targets matching a node.

use std::env;
use std::path::PathBuf;

use anyhow::{anyhow, Context, Result};
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

use acl_inspector::memory::Fixture;
use acl_inspector::{AclCheckerService, InspectorConfig};

fn print_usage(program: &str) {
    eprintln!(
        "Usage:\n  {program} --fixture <file.json> [--config <file.json>] [--role <id>]... [--depth <n>]\n  {program} --fixture <file.json> --content <node-path> [--role <id>]... [--depth <n>]\n  {program} --fixture <file.json> --summary <node-path> [--role <id>]...\n  {program} --fixture <file.json> --check <node-path> [--role <id>]...\n\nFlags:\n  --fixture <path>         JSON fixture with nodes, node types and roles (required)\n  --config <path>          JSON inspector config; ACL_INSPECTOR_* env vars override it\n  --role <id>              Role identifier; repeatable, unknown roles are ignored\n  --roles <a,b,...>        Comma separated role identifiers\n  --depth <n>              Tree depth; 0 expands everything (default from config)\n  --content <node-path>    Content area below a node instead of the document tree\n  --summary <node-path>    Per-role permission summary for one node\n  --check <node-path>      Privilege targets matching one node, by outcome\n  -h, --help               Show this help\n\nLogging goes to stderr and follows RUST_LOG (default: info)."
    );
}

#[derive(Debug, Clone, PartialEq)]
enum Mode {
    Tree,
    Content(String),
    Summary(String),
    Check(String),
}

#[derive(Debug)]
struct Args {
    fixture: PathBuf,
    config: Option<PathBuf>,
    roles: Vec<String>,
    depth: Option<u32>,
    mode: Mode,
}

fn next_value(it: &mut impl Iterator<Item = String>, flag: &str) -> Result<String> {
    it.next().ok_or_else(|| anyhow!("{} requires a value", flag))
}

fn parse_args(raw: Vec<String>) -> Result<Option<Args>> {
    let mut fixture: Option<PathBuf> = None;
    let mut config: Option<PathBuf> = None;
    let mut roles: Vec<String> = Vec::new();
    let mut depth: Option<u32> = None;
    let mut mode = Mode::Tree;

    let mut it = raw.into_iter();
    while let Some(arg) = it.next() {
        match arg.as_str() {
            "-h" | "--help" => return Ok(None),
            "--fixture" => fixture = Some(PathBuf::from(next_value(&mut it, "--fixture")?)),
            "--config" => config = Some(PathBuf::from(next_value(&mut it, "--config")?)),
            "--role" => roles.push(next_value(&mut it, "--role")?),
            "--roles" => roles.extend(
                next_value(&mut it, "--roles")?
                    .split(',')
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
                    .map(str::to_string),
            ),
            "--depth" => {
                let v = next_value(&mut it, "--depth")?;
                depth = Some(v.parse::<u32>().with_context(|| format!("invalid --depth '{}'", v))?);
            }
            "--content" => mode = Mode::Content(next_value(&mut it, "--content")?),
            "--summary" => mode = Mode::Summary(next_value(&mut it, "--summary")?),
            "--check" => mode = Mode::Check(next_value(&mut it, "--check")?),
            other => return Err(anyhow!("unknown argument '{}'", other)),
        }
    }
    let fixture = fixture.ok_or_else(|| anyhow!("--fixture is required"))?;
    Ok(Some(Args { fixture, config, roles, depth, mode }))
}

fn run(args: Args) -> Result<String> {
    let config = InspectorConfig::load(args.config.as_deref())?;
    let (nodes, policies) = Fixture::load(&args.fixture)?.into_stores()?;
    let svc = AclCheckerService::new(nodes, policies, config);

    let out = match &args.mode {
        Mode::Tree => {
            let depth = args.depth.unwrap_or(svc.config().node_tree_loading_depth);
            serde_json::to_string_pretty(&svc.build_acl_tree(args.roles.as_slice(), depth)?)?
        }
        Mode::Content(path) => {
            let node = svc.nodes().node(path)?;
            let roles = svc.resolve_roles(args.roles.as_slice())?;
            let depth = args.depth.unwrap_or(svc.config().content_tree_loading_depth);
            serde_json::to_string_pretty(&svc.build_acl_tree_for_content_area(&node, &roles, depth)?)?
        }
        Mode::Summary(path) => {
            let node = svc.nodes().node(path)?;
            let roles = svc.resolve_roles(args.roles.as_slice())?;
            serde_json::to_string_pretty(&svc.summarize(&node, &roles))?
        }
        Mode::Check(path) => {
            let node = svc.nodes().node(path)?;
            let roles = svc.resolve_roles(args.roles.as_slice())?;
            serde_json::to_string_pretty(&svc.check_privilege_targets(&node, &roles))?
        }
    };
    Ok(out)
}

fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new("info"))?;
    fmt().with_env_filter(filter).with_writer(std::io::stderr).init();

    let mut raw = env::args();
    let program = raw.next().unwrap_or_else(|| "acl-inspector".to_string());
    let args = match parse_args(raw.collect()) {
        Ok(Some(a)) => a,
        Ok(None) => {
            print_usage(&program);
            return Ok(());
        }
        Err(e) => {
            print_usage(&program);
            return Err(e);
        }
    };
    info!(target: "acl_inspector", "fixture='{}' roles={:?} mode={:?}", args.fixture.display(), args.roles, args.mode);
    println!("{}", run(args)?);
    Ok(())
}
