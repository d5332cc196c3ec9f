// README-to-rustdoc step shared by every crate's build.rs:
//   include!("../build_common.rs");
// The including file imports `std::env`, `std::fs` and `std::path::Path`.

/// Write `README.md` to `$OUT_DIR/README_GENERATED.md` with source links
/// turned into module links (`src/domain/mod.rs` becomes `domain`).
fn process_readme_for_rustdoc(crate_dir: &str) {
    println!("cargo:rerun-if-changed=README.md");

    // No README still yields a file, so `include_str!` resolves.
    let content = fs::read_to_string(Path::new(crate_dir).join("README.md")).unwrap_or_default();

    let out_dir = env::var("OUT_DIR").unwrap();
    fs::write(
        Path::new(&out_dir).join("README_GENERATED.md"),
        rewrite_source_links(&content),
    )
    .unwrap();
}

fn rewrite_source_links(markdown: &str) -> String {
    const MARKER: &str = "](src/";

    let mut out = String::with_capacity(markdown.len());
    let mut rest = markdown;
    while let Some(start) = rest.find(MARKER) {
        out.push_str(&rest[..start + 2]);
        rest = &rest[start + MARKER.len()..];
        let end = rest.find(')').unwrap_or(rest.len());
        let module = rest[..end]
            .trim_end_matches(".rs")
            .trim_end_matches("/mod")
            .replace('/', "::");
        out.push_str(&module);
        rest = &rest[end..];
    }
    out.push_str(rest);
    out
}
