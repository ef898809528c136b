use std::path::PathBuf;

use anyhow::Context;
use lamassu_core::logging::{init_logging, LoggingConfig};
use lamassu_ui::prelude::*;

const DEMO: &str = include_str!("../ui/main.lml");

fn main() -> anyhow::Result<()> {
    init_logging(LoggingConfig::default());

    let types = TypeRegistry::standard();
    let graph = match std::env::args().nth(1) {
        Some(path) => {
            let path = PathBuf::from(path);
            log::info!("loading {}", path.display());
            load_file(&path, &types).with_context(|| format!("loading {}", path.display()))?
        }
        None => {
            log::info!("loading the bundled demo document");
            load_str(DEMO, &types).context("loading the bundled demo document")?
        }
    };

    println!("{} objects, {} top-level", graph.len(), graph.roots().len());
    println!();
    for &root in graph.roots() {
        print_tree(&graph, root, 0);
    }

    let mut names: Vec<(&str, ObjectId)> = graph.names().collect();
    names.sort_by(|a, b| a.0.cmp(b.0));
    if !names.is_empty() {
        println!();
        println!("named objects:");
        for (name, id) in names {
            println!("  {:<12} {}", name, graph.object(id).type_name());
        }
    }

    Ok(())
}

fn print_tree(graph: &UiGraph, id: ObjectId, depth: usize) {
    let obj = graph.object(id);
    let name = obj.name().map(|n| format!(" \"{n}\"")).unwrap_or_default();
    println!("{}{}{}", "  ".repeat(depth), obj.type_name(), name);
    for &child in graph.children(id) {
        print_tree(graph, child, depth + 1);
    }
}
