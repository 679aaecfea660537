//! `sasdl kinds` – catalog kinds and supported releases.

use sasdl_core::catalog::{self, CatalogKind};

pub fn run_kinds() {
    println!("{:<10}  {:<8}  DESCRIPTION", "KIND", "RELEASES");
    for kind in CatalogKind::ALL {
        println!(
            "{:<10}  {:<8}  {}",
            kind.name(),
            releases(kind),
            kind.description()
        );
    }
}

fn releases(kind: CatalogKind) -> String {
    catalog::supported_releases(kind)
        .iter()
        .map(|r| format!("DR{}", r))
        .collect::<Vec<_>>()
        .join(",")
}
