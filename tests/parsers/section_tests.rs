//! Section splitter tests over generated logs

use crate::common::synthetic::{delimiter, join_sections, Run};
use benchlog::parsers::section::{count_sections, split_sections, DELIMITER_LEN};

// ============================================
// Delimiter Tests
// ============================================

#[test]
fn test_delimiter_length() {
    assert_eq!(DELIMITER_LEN, 48);
    assert_eq!(delimiter().len(), 48);
}

#[test]
fn test_47_dashes_do_not_split() {
    let short = "-".repeat(47);
    let log = format!("one\n{}\ntwo\n", short);
    assert_eq!(count_sections(&log), 1);
}

#[test]
fn test_harness_banners_do_not_split() {
    let run = Run::default().render();
    let log = format!(
        "--------------------Test Begin---------------------\n{}---------------------Test End----------------------\n",
        run
    );
    assert_eq!(count_sections(&log), 1);
}

// ============================================
// Empty Section Tests
// ============================================

#[test]
fn test_leading_and_trailing_delimiters() {
    let d = delimiter();
    let log = format!("{d}\n{}{d}\n", Run::default().render());
    assert_eq!(count_sections(&log), 1);
}

#[test]
fn test_consecutive_delimiters() {
    let d = delimiter();
    let run = Run::default().render();
    let log = format!("{run}{d}\n{d}\n{d}\n{run}");
    let sections: Vec<_> = split_sections(&log).collect();

    assert_eq!(sections.len(), 2);
    assert_eq!(sections[0].index, 0);
    assert_eq!(sections[1].index, 1);
}

// ============================================
// Ordering Tests
// ============================================

#[test]
fn test_sections_keep_source_order() {
    let workloads = ["a", "b", "c", "d", "e"];
    let sections: Vec<String> = workloads
        .iter()
        .map(|&w| {
            Run {
                workload: w,
                ..Run::default()
            }
            .render()
        })
        .collect();
    let log = join_sections(&sections);

    for (section, workload) in split_sections(&log).zip(workloads) {
        assert!(section
            .text
            .contains(&format!("workload: {},", workload)));
    }
    assert_eq!(count_sections(&log), workloads.len());
}
