//! Placement resolver tests

mod common;

use common::surface;
use glance::model::{DiffEditor, DiffProcessorId, DiffViewId, DiffViewer, FileEditor};
use glance::panel::{PlaceIndex, Side};
use glance::placement::{resolve, DiffConfig, PlacementConfig};

fn config(align_right: bool, two_side: bool, three_side: bool, middle: bool) -> PlacementConfig {
    PlacementConfig {
        align_right,
        diff: DiffConfig {
            two_side,
            three_side,
            three_side_middle: middle,
        },
    }
}

fn diff(processor: u64, viewer: DiffViewer) -> FileEditor {
    FileEditor::Diff(DiffEditor {
        processor: DiffProcessorId(processor),
        file: "a.rs".into(),
        active_viewer: viewer,
    })
}

fn two_side(first: u64) -> FileEditor {
    diff(
        first,
        DiffViewer::TwoSide {
            id: DiffViewId(first),
            surfaces: vec![Some(surface(first, "a.rs")), Some(surface(first + 1, "a.rs"))],
        },
    )
}

fn three_side(first: u64) -> FileEditor {
    diff(
        first,
        DiffViewer::ThreeSide {
            id: DiffViewId(first),
            surfaces: (first..first + 3)
                .map(|id| Some(surface(id, "a.rs")))
                .collect(),
        },
    )
}

// ============================================================================
// Plain and single-surface viewers
// ============================================================================

#[test]
fn test_text_editor_right_aligned() {
    let editors = vec![FileEditor::text(surface(1, "foo.txt"))];
    let infos: Vec<_> = resolve(&editors, config(true, true, true, false)).collect();

    assert_eq!(infos.len(), 1);
    assert_eq!(infos[0].side, Side::End);
    assert_eq!(infos[0].place_index(), PlaceIndex::Right);
    assert_eq!(infos[0].diff_view, None);
}

#[test]
fn test_text_editor_left_aligned() {
    let editors = vec![FileEditor::text(surface(1, "foo.txt"))];
    let infos: Vec<_> = resolve(&editors, config(false, true, true, false)).collect();
    assert_eq!(infos[0].side, Side::Start);
    assert_eq!(infos[0].place_index(), PlaceIndex::Left);
}

#[test]
fn test_unified_and_one_side_follow_alignment_and_carry_view() {
    let editors = vec![
        diff(
            1,
            DiffViewer::Unified {
                id: DiffViewId(10),
                surface: Some(surface(1, "a.rs")),
            },
        ),
        diff(
            2,
            DiffViewer::OneSide {
                id: DiffViewId(20),
                surface: Some(surface(2, "a.rs")),
            },
        ),
    ];

    for align_right in [false, true] {
        let infos: Vec<_> = resolve(&editors, config(align_right, false, false, false)).collect();
        assert_eq!(infos.len(), 2);
        for info in &infos {
            assert_eq!(info.side, Side::aligned(align_right));
        }
        assert_eq!(infos[0].diff_view, Some(DiffViewId(10)));
        assert_eq!(infos[1].diff_view, Some(DiffViewId(20)));
    }
}

// ============================================================================
// Multi-surface diff viewers
// ============================================================================

#[test]
fn test_two_side_ignores_alignment() {
    let editors = vec![two_side(1)];
    for align_right in [false, true] {
        let sides: Vec<_> = resolve(&editors, config(align_right, true, true, false))
            .map(|info| info.side)
            .collect();
        assert_eq!(sides, vec![Side::Start, Side::End]);
    }
}

#[test]
fn test_three_side_without_middle_yields_outer_surfaces() {
    let editors = vec![three_side(1)];
    let infos: Vec<_> = resolve(&editors, config(true, true, true, false)).collect();

    assert_eq!(infos.len(), 2);
    assert_eq!(infos[0].surface.id.0, 1);
    assert_eq!(infos[0].side, Side::Start);
    assert_eq!(infos[1].surface.id.0, 3);
    assert_eq!(infos[1].side, Side::End);
}

#[test]
fn test_three_side_with_middle_yields_all_surfaces() {
    let editors = vec![three_side(1)];
    let sides: Vec<_> = resolve(&editors, config(false, true, true, true))
        .map(|info| (info.surface.id.0, info.side))
        .collect();
    assert_eq!(sides, vec![(1, Side::Start), (2, Side::End), (3, Side::End)]);
}

#[test]
fn test_disabled_diff_kinds_yield_nothing_repeatably() {
    let editors = vec![two_side(1), three_side(10)];
    let cfg = config(true, false, false, true);

    let first: Vec<_> = resolve(&editors, cfg).collect();
    let second: Vec<_> = resolve(&editors, cfg).collect();
    assert!(first.is_empty());
    assert_eq!(first, second);
}

#[test]
fn test_counts_over_mixed_editor_set() {
    let editors = vec![
        FileEditor::text(surface(100, "a.txt")),
        FileEditor::Other,
        two_side(1),
        three_side(10),
        diff(
            20,
            DiffViewer::Unified {
                id: DiffViewId(20),
                surface: Some(surface(20, "a.rs")),
            },
        ),
        diff(30, DiffViewer::Other),
    ];

    assert_eq!(resolve(&editors, config(true, true, true, false)).count(), 1 + 2 + 2 + 1);
    assert_eq!(resolve(&editors, config(true, true, true, true)).count(), 1 + 2 + 3 + 1);
    assert_eq!(resolve(&editors, config(true, false, true, true)).count(), 1 + 3 + 1);
    assert_eq!(resolve(&editors, config(true, true, false, true)).count(), 1 + 2 + 1);
}

#[test]
fn test_resolution_is_lazy_and_ordered() {
    let editors = vec![
        FileEditor::text(surface(1, "a.txt")),
        FileEditor::text(surface(2, "b.txt")),
    ];
    let mut infos = resolve(&editors, PlacementConfig::default());
    assert_eq!(infos.next().map(|i| i.surface.id.0), Some(1));
    assert_eq!(infos.next().map(|i| i.surface.id.0), Some(2));
    assert!(infos.next().is_none());
}
