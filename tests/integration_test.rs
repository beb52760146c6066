//! Integration tests for codechunk.

#![allow(clippy::expect_used, clippy::unwrap_used)]

use codechunk::chunking::{TREE_HEADER, aggregate, slices};
use codechunk::core::{Fragment, Group};
use codechunk::io::MemorySink;
use codechunk::{ChunkerConfig, chunk_codebase, run, run_with_sink};
use std::num::NonZeroUsize;
use std::path::Path;
use tempfile::TempDir;

fn budget(n: usize) -> NonZeroUsize {
    NonZeroUsize::new(n).expect("non-zero budget")
}

/// `a.txt` = "hello", `b.png`, and `node_modules/c.js`.
fn create_sample_project() -> TempDir {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let root = temp_dir.path();
    std::fs::write(root.join("a.txt"), "hello").expect("write a.txt");
    std::fs::write(root.join("b.png"), b"\x89PNG\r\n").expect("write b.png");
    std::fs::create_dir_all(root.join("node_modules")).expect("mkdir node_modules");
    std::fs::write(root.join("node_modules/c.js"), "console.log(1)").expect("write c.js");
    temp_dir
}

fn read_chunks(out_dir: &Path) -> Vec<(String, String)> {
    let mut entries: Vec<(String, String)> = std::fs::read_dir(out_dir)
        .expect("read out dir")
        .map(|e| {
            let path = e.expect("dir entry").path();
            let name = path.file_name().unwrap().to_string_lossy().to_string();
            (name, std::fs::read_to_string(&path).expect("read chunk"))
        })
        .collect();
    entries.sort();
    entries
}

#[test]
fn test_end_to_end_separate_sections() {
    let project = create_sample_project();
    let out = TempDir::new().expect("out dir");

    let summary = run(project.path(), out.path(), &ChunkerConfig::default()).expect("run");
    assert_eq!(summary.chunk_count, 2);

    let chunks = read_chunks(out.path());
    let names: Vec<&str> = chunks.iter().map(|(n, _)| n.as_str()).collect();
    assert_eq!(names, vec!["chunk_1_of_2.txt", "chunk_2_of_2.txt"]);

    let tree = &chunks[0].1;
    assert!(tree.starts_with(TREE_HEADER));
    assert!(tree.contains("└── a.txt"));

    let expected = format!(
        "# here is {}\n\nhello",
        project.path().join("a.txt").display()
    );
    assert_eq!(chunks[1].1, expected);

    for (_, content) in &chunks {
        assert!(!content.contains("b.png"));
        assert!(!content.contains("c.js"));
        assert!(!content.contains("node_modules"));
    }
}

#[test]
fn test_end_to_end_pooled() {
    let project = create_sample_project();
    let out = TempDir::new().expect("out dir");
    let config = ChunkerConfig {
        separate_sections: false,
        ..ChunkerConfig::default()
    };

    run(project.path(), out.path(), &config).expect("run");

    let chunks = read_chunks(out.path());
    assert_eq!(chunks.len(), 1);
    assert_eq!(chunks[0].0, "chunk_1_of_1.txt");

    let content = &chunks[0].1;
    let tree_end = content.find("\n\n# here is").expect("file fragment");
    assert!(content[..tree_end].contains("a.txt"));
    assert!(content.ends_with(&format!(
        "# here is {}\n\nhello",
        project.path().join("a.txt").display()
    )));
    assert!(!content.contains("b.png"));
    assert!(!content.contains("c.js"));
}

#[test]
fn test_rerun_overwrites_existing_chunks() {
    let project = create_sample_project();
    let out = TempDir::new().expect("out dir");
    std::fs::write(out.path().join("chunk_1_of_2.txt"), "stale").expect("stale");

    run(project.path(), out.path(), &ChunkerConfig::default()).expect("run");

    let first = std::fs::read_to_string(out.path().join("chunk_1_of_2.txt")).expect("read");
    assert!(first.starts_with(TREE_HEADER));
}

#[test]
fn test_oversized_file_scenario() {
    let project = TempDir::new().expect("project");
    let b = 100;
    let content = "y".repeat(3 * b);
    std::fs::write(project.path().join("big.txt"), &content).expect("write");

    assert_eq!(slices(&content, budget(b)).count(), 3);
    assert!(slices(&content, budget(b)).all(|s| s.len() == b));

    let config = ChunkerConfig {
        budget: b,
        ..ChunkerConfig::default()
    };
    let chunked = chunk_codebase(project.path(), &config).expect("chunk");
    let file_groups: Vec<&Group> = chunked
        .groups
        .iter()
        .filter(|g| g.labels().any(|l| l.ends_with("big.txt")))
        .collect();

    assert_eq!(file_groups.len(), 3);
    for group in file_groups {
        assert_eq!(group.len(), 1);
        assert!(group.size() > b);
    }
}

#[test]
fn test_boundary_fill_scenario() {
    // 3 + 2 + 5 == 10
    let exact = aggregate(
        vec![Fragment::new("abc"), Fragment::new("defgh")],
        budget(10),
        "\n\n",
    );
    assert_eq!(exact.len(), 1);

    // 3 + 2 + 6 == 11
    let over = aggregate(
        vec![Fragment::new("abc"), Fragment::new("defghi")],
        budget(10),
        "\n\n",
    );
    assert_eq!(over.len(), 2);
}

#[test]
fn test_exclusion_scenarios() {
    let project = TempDir::new().expect("project");
    let root = project.path();
    std::fs::create_dir_all(root.join("pkg/node_modules/dep")).expect("mkdir");
    std::fs::write(root.join(".DS_Store"), "finder junk").expect("write");
    std::fs::write(root.join("icon.png"), "binary").expect("write");
    std::fs::write(root.join("pkg/node_modules/dep/index.js"), "dep").expect("write");
    std::fs::write(root.join("mynode_modules.txt"), "kept").expect("write");

    let chunked = chunk_codebase(root, &ChunkerConfig::default()).expect("chunk");
    let labels: Vec<&str> = chunked.groups.iter().flat_map(Group::labels).collect();

    assert!(labels.iter().all(|l| !l.ends_with(".DS_Store")));
    assert!(labels.iter().all(|l| !l.ends_with(".png")));
    assert!(labels.iter().all(|l| !l.contains("node_modules/")));
    assert!(labels.iter().any(|l| l.ends_with("mynode_modules.txt")));

    let tree = chunked.groups[0].render("\n\n");
    assert!(tree.starts_with(TREE_HEADER));
    assert!(tree.contains("mynode_modules.txt"));
    assert!(tree.contains("pkg"));
    for group in &chunked.groups {
        let text = group.render("\n\n");
        assert!(!text.contains(".DS_Store"));
        assert!(!text.contains("icon.png"));
        assert!(!text.contains("index.js"));
        assert!(!text.contains("└── node_modules"));
    }
}

#[cfg(unix)]
#[test]
fn test_dangling_symlink_aborts_run() {
    let project = TempDir::new().expect("project");
    std::fs::write(project.path().join("a.txt"), "hello").expect("write");
    std::os::unix::fs::symlink(
        project.path().join("gone.txt"),
        project.path().join("link.txt"),
    )
    .expect("symlink");

    let err = chunk_codebase(project.path(), &ChunkerConfig::default()).unwrap_err();
    assert!(err.to_string().contains("link.txt"));
}

#[test]
fn test_memory_sink_matches_directory_output() {
    let project = create_sample_project();
    let out = TempDir::new().expect("out dir");
    let config = ChunkerConfig::default();

    let mut sink = MemorySink::new();
    run_with_sink(project.path(), out.path(), &config, &mut sink).expect("memory run");
    run(project.path(), out.path(), &config).expect("dir run");

    let on_disk: Vec<String> = read_chunks(out.path()).into_iter().map(|(_, c)| c).collect();
    let in_memory: Vec<String> = sink.chunks().iter().map(|(_, c)| c.clone()).collect();
    assert_eq!(on_disk, in_memory);
}

#[test]
fn test_lossy_decoding_does_not_abort() {
    let project = TempDir::new().expect("project");
    std::fs::write(project.path().join("weird.txt"), b"abc\xffdef").expect("write");

    let chunked = chunk_codebase(project.path(), &ChunkerConfig::default()).expect("chunk");
    let text = chunked.groups.last().expect("group").render("\n\n");
    assert!(text.contains("abc"));
    assert!(text.contains("def"));
}

#[test]
fn test_strict_decoding_aborts() {
    let project = TempDir::new().expect("project");
    std::fs::write(project.path().join("weird.txt"), b"abc\xffdef").expect("write");

    let config = ChunkerConfig::from_toml_str("decode_mode = \"strict\"").expect("config");
    assert!(chunk_codebase(project.path(), &config).is_err());
}

mod property_tests {
    use super::*;
    use codechunk::AggregateExt;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn sliced_file_fragments_keep_content(content in "[a-z\\n世]{0,500}", b in 1usize..80) {
            let frags = codechunk::walk::file_fragments("f.txt", &content, budget(b));
            let header = "# here is f.txt\n\n";
            let rebuilt: String = frags
                .iter()
                .map(|f| f.text().strip_prefix(header).unwrap_or_default())
                .collect();
            prop_assert_eq!(rebuilt, content);
        }

        #[test]
        fn pipeline_groups_stay_in_budget(
            sizes in prop::collection::vec(1usize..60, 0..30),
            b in 10usize..100,
        ) {
            let fragments: Vec<Fragment> =
                sizes.iter().map(|n| Fragment::new("z".repeat(*n))).collect();
            let total: usize = fragments.iter().map(Fragment::size).sum();

            let groups: Vec<Group> =
                fragments.into_iter().aggregate(budget(b), "\n\n").collect();
            let packed: usize = groups
                .iter()
                .flat_map(Group::fragments)
                .map(Fragment::size)
                .sum();

            prop_assert_eq!(packed, total);
            for group in &groups {
                prop_assert!(group.size() <= b || group.len() == 1);
            }
        }
    }
}
