use std::env;
use std::fs;
use std::path::Path;
use walkdir::WalkDir;

fn main() {
    let out_dir = env::var("OUT_DIR").unwrap();
    let manifest_dir = env::var("CARGO_MANIFEST_DIR").unwrap();
    let dest_path = Path::new(&out_dir).join("catalogs.rs");

    let mut code = String::new();
    code.push_str("/// Embedded voicing catalogs as (name, yaml)\n");
    code.push_str("pub static CATALOGS: &[(&str, &str)] = &[\n");

    let catalog_dir = Path::new(&manifest_dir).join("catalog");

    if catalog_dir.exists() {
        let mut entries: Vec<_> = WalkDir::new(&catalog_dir)
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|e| {
                e.path()
                    .extension()
                    .map_or(false, |ext| ext == "yaml" || ext == "yml")
            })
            .collect();
        entries.sort_by(|a, b| a.path().cmp(b.path()));

        for entry in entries {
            let path = entry.path();
            let relative_path = path.strip_prefix(&catalog_dir).unwrap();
            let name = relative_path.with_extension("").to_string_lossy().replace('\\', "/");
            code.push_str(&format!(
                "    ({:?}, include_str!({:?})),\n",
                name,
                path.to_string_lossy()
            ));
        }
    }

    code.push_str("];\n");

    fs::write(&dest_path, code).unwrap();

    println!("cargo:rerun-if-changed=catalog");
}
