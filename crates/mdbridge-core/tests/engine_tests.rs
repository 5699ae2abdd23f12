//! End-to-end behaviour of full sync passes over real trees

use std::cell::Cell;
use std::fs;

use mdbridge_core::{
    Conflict, MarkupTransform, Outcome, Resolution, Side, SkipReason, SyncAction, SyncDirection,
    SyncOptions, SyncReport, SyncSession, SyncState,
};
use mdbridge_test_utils::SyncFixture;
use pretty_assertions::assert_eq;

fn session(fixture: &SyncFixture, options: SyncOptions) -> SyncSession<'static> {
    SyncSession::new(
        fixture.hugo_root(),
        fixture.obsidian_root(),
        fixture.state_path(),
        options,
        &MarkupTransform,
    )
    .unwrap()
}

/// Run a pass whose conflicts must never reach a resolver.
fn sync_with(fixture: &SyncFixture, options: SyncOptions) -> SyncReport {
    let mut never_ask = |conflict: &Conflict| -> mdbridge_core::Result<Resolution> {
        panic!("resolver called for {}", conflict.id)
    };
    session(fixture, options).execute(&mut never_ask).unwrap()
}

fn sync(fixture: &SyncFixture) -> SyncReport {
    sync_with(fixture, SyncOptions::default())
}

fn actions(report: &SyncReport) -> Vec<(String, SyncAction)> {
    report
        .entries
        .iter()
        .map(|entry| (entry.id.to_string(), entry.action))
        .collect()
}

fn state(fixture: &SyncFixture) -> SyncState {
    SyncState::load(&fixture.state_path()).unwrap()
}

#[test]
fn test_new_single_file_syncs_once_as_single_file() {
    let fixture = SyncFixture::new();
    fixture.write_hugo("my-post.md", "{{< alert >}}\nHello\n{{< /alert >}}\n");

    let report = sync(&fixture);
    assert_eq!(actions(&report), vec![("my-post".into(), SyncAction::NewInHugo)]);
    assert_eq!(report.synced, 1);

    assert_eq!(fixture.read_obsidian("my-post.md"), "> [!info]\n> Hello\n");
    fixture.assert_obsidian_missing("my-post");
    assert_eq!(
        state(&fixture).shape_hint(&"my-post".into()),
        Some(mdbridge_core::Layout::Single)
    );

    let second = sync(&fixture);
    assert!(second.is_empty(), "second pass should be quiet: {:?}", second);
}

#[test]
fn test_idempotent_after_bidirectional_edits() {
    let fixture = SyncFixture::new();
    fixture.write_hugo("a.md", "from hugo\n");
    fixture.write_obsidian("notes/b.md", "link to [[a]]\n");

    let first = sync(&fixture);
    assert_eq!(
        actions(&first),
        vec![
            ("a".into(), SyncAction::NewInHugo),
            ("notes/b".into(), SyncAction::NewInObsidian),
        ]
    );
    assert_eq!(
        fixture.read_hugo("notes/b.md"),
        "link to [a]({{< ref \"a.md\" >}})\n"
    );

    assert!(sync(&fixture).is_empty());
    assert!(sync(&fixture).is_empty());
}

#[test]
fn test_modification_flows_to_other_side() {
    let fixture = SyncFixture::new();
    fixture.write_hugo("post.md", "v1\n");
    sync(&fixture);

    fixture.write_obsidian("post.md", "v2 with ![[shot.png]]\n");
    let report = sync(&fixture);

    assert_eq!(actions(&report), vec![("post".into(), SyncAction::ModifiedInObsidian)]);
    assert_eq!(fixture.read_hugo("post.md"), "v2 with ![](shot.png)\n");
    assert!(sync(&fixture).is_empty());
}

#[test]
fn test_directory_form_round_trip_has_no_nested_directory() {
    let fixture = SyncFixture::new();
    fixture.write_hugo("my-gallery/index.md", "gallery v1\n");
    fixture.write_hugo("my-gallery/photo.png", "png bytes");

    sync(&fixture);
    fixture.assert_obsidian_exists("my-gallery/my-gallery.md");
    fixture.assert_obsidian_exists("my-gallery/photo.png");

    fixture.write_obsidian("my-gallery/my-gallery.md", "gallery v2\n");
    let report = sync(&fixture);
    assert_eq!(
        actions(&report),
        vec![("my-gallery".into(), SyncAction::ModifiedInObsidian)]
    );

    assert_eq!(fixture.read_hugo("my-gallery/index.md"), "gallery v2\n");
    fixture.assert_hugo_exists("my-gallery/photo.png");
    fixture.assert_hugo_missing("my-gallery/my-gallery");
    fixture.assert_hugo_missing("my-gallery/my-gallery.md");
    fixture.assert_hugo_missing("my-gallery.md");

    let mut entries: Vec<String> = fs::read_dir(fixture.hugo_path("my-gallery"))
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    entries.sort();
    assert_eq!(entries, vec!["index.md", "photo.png"]);

    assert!(sync(&fixture).is_empty());
}

#[test]
fn test_single_file_with_images_becomes_bundle_and_returns_unchanged() {
    let fixture = SyncFixture::new();
    fixture.write_obsidian("trip.md", "see ![[map.png]]\n");
    fixture.write_obsidian("map.png", "png bytes");

    sync(&fixture);
    assert_eq!(fixture.read_hugo("trip/index.md"), "see ![](map.png)\n");
    fixture.assert_hugo_exists("trip/map.png");

    fixture.write_hugo("trip/index.md", "updated ![](map.png)\n");
    sync(&fixture);

    // The vault keeps its single file rather than growing a folder note
    assert_eq!(fixture.read_obsidian("trip.md"), "updated ![[map.png]]\n");
    fixture.assert_obsidian_missing("trip/trip.md");
    assert!(sync(&fixture).is_empty());
}

#[test]
fn test_conflict_wins_over_modified() {
    let fixture = SyncFixture::new();
    fixture.write_hugo("post.md", "base\n");
    sync(&fixture);

    fixture.write_hugo("post.md", "hugo edit\n");
    fixture.write_obsidian("post.md", "obsidian edit\n");

    let asked = Cell::new(0);
    let mut keep_obsidian = |conflict: &Conflict| -> mdbridge_core::Result<Resolution> {
        asked.set(asked.get() + 1);
        assert_eq!(conflict.hugo_content, "hugo edit\n");
        assert_eq!(conflict.obsidian_content, "obsidian edit\n");
        Ok(Resolution::KeepObsidian)
    };
    let report = session(&fixture, SyncOptions::default())
        .execute(&mut keep_obsidian)
        .unwrap();

    assert_eq!(asked.get(), 1);
    assert_eq!(actions(&report), vec![("post".into(), SyncAction::Conflict)]);
    assert_eq!(report.entries[0].detail, Some("Both sides modified"));
    assert_eq!((report.synced, report.conflicts), (1, 1));
    assert_eq!(fixture.read_hugo("post.md"), "obsidian edit\n");
    assert!(sync(&fixture).is_empty());
}

#[test]
fn test_forced_resolution_never_prompts_and_adopts_hugo() {
    let fixture = SyncFixture::new();
    fixture.write_hugo("post.md", "base\n");
    sync(&fixture);

    fixture.write_hugo("post.md", "[x]({{< ref \"posts/x.md\" >}})\n");
    fixture.write_obsidian("post.md", "obsidian edit\n");

    let options = SyncOptions {
        force: Some(Side::Hugo),
        ..SyncOptions::default()
    };
    let report = sync_with(&fixture, options);

    assert_eq!(report.conflicts, 1);
    assert_eq!(fixture.read_obsidian("post.md"), "[[x]]\n");
    assert_eq!(
        state(&fixture).obsidian.get("post").map(String::as_str),
        Some(mdbridge_fs::compute_content_checksum("[[x]]\n").as_str())
    );
}

#[test]
fn test_unrecorded_document_on_both_sides_is_a_conflict() {
    let fixture = SyncFixture::new();
    fixture.write_hugo("post.md", "hugo\n");
    fixture.write_obsidian("post.md", "obsidian\n");

    let options = SyncOptions {
        force: Some(Side::Obsidian),
        ..SyncOptions::default()
    };
    let report = sync_with(&fixture, options);

    assert_eq!(actions(&report), vec![("post".into(), SyncAction::Conflict)]);
    assert_eq!(fixture.read_hugo("post.md"), "obsidian\n");
}

#[test]
fn test_skipped_conflict_is_detected_again() {
    let fixture = SyncFixture::new();
    fixture.write_hugo("post.md", "base\n");
    sync(&fixture);
    let recorded = state(&fixture);

    fixture.write_hugo("post.md", "hugo edit\n");
    fixture.write_obsidian("post.md", "obsidian edit\n");

    let mut skip = |_: &Conflict| -> mdbridge_core::Result<Resolution> { Ok(Resolution::Skip) };
    let report = session(&fixture, SyncOptions::default())
        .execute(&mut skip)
        .unwrap();

    assert_eq!(report.skipped, 1);
    assert_eq!(
        report.entries[0].outcome,
        Outcome::Skipped {
            reason: SkipReason::ConflictSkipped
        }
    );
    assert_eq!(state(&fixture).hugo, recorded.hugo);
    assert_eq!(state(&fixture).obsidian, recorded.obsidian);

    let replan = session(&fixture, SyncOptions::default()).plan();
    assert_eq!(replan[0].action, SyncAction::Conflict);
}

#[test]
fn test_deletion_is_reported_not_applied() {
    let fixture = SyncFixture::new();
    fixture.write_hugo("post.md", "body\n");
    sync(&fixture);

    fs::remove_file(fixture.hugo_path("post.md")).unwrap();
    for _ in 0..2 {
        let report = sync(&fixture);
        assert_eq!(actions(&report), vec![("post".into(), SyncAction::DeletedInHugo)]);
        assert_eq!(report.skipped, 1);
        fixture.assert_obsidian_exists("post.md");
    }
}

#[test]
fn test_direction_policy_defers_new_documents() {
    let fixture = SyncFixture::new();
    fixture.write_hugo("from-hugo.md", "h\n");
    fixture.write_obsidian("from-obsidian.md", "o\n");

    let push = SyncOptions {
        direction: SyncDirection::Push,
        ..SyncOptions::default()
    };
    let report = sync_with(&fixture, push);

    assert_eq!((report.synced, report.skipped), (1, 1));
    fixture.assert_hugo_exists("from-obsidian.md");
    fixture.assert_obsidian_missing("from-hugo.md");

    let report = sync(&fixture);
    assert_eq!(actions(&report), vec![("from-hugo".into(), SyncAction::NewInHugo)]);
    fixture.assert_obsidian_exists("from-hugo.md");
}

#[test]
fn test_dry_run_touches_nothing() {
    let fixture = SyncFixture::new();
    fixture.write_hugo("post.md", "body\n");
    fixture.write_hugo("both.md", "h\n");
    fixture.write_obsidian("both.md", "o\n");

    let options = SyncOptions {
        dry_run: true,
        ..SyncOptions::default()
    };
    let report = sync_with(&fixture, options);

    assert_eq!(report.conflicts, 1);
    assert_eq!(report.entries[0].outcome, Outcome::Unresolved);
    assert!(matches!(report.entries[1].outcome, Outcome::WouldSync { .. }));
    fixture.assert_obsidian_missing("post.md");
    assert!(!fixture.state_path().exists());
}

#[test]
fn test_hidden_and_reserved_files_are_ignored() {
    let fixture = SyncFixture::new();
    fixture.write_hugo("_index.md", "section\n");
    fixture.write_obsidian(".obsidian/workspace.md", "internal\n");
    fixture.write_obsidian("_draft.md", "draft\n");

    assert!(sync(&fixture).is_empty());
    fixture.assert_obsidian_missing("_index.md");
    fixture.assert_hugo_missing("_draft.md");
}

#[test]
fn test_edit_returns_to_vault_index_file_in_place() {
    let fixture = SyncFixture::new();
    fixture.write_obsidian("gallery/index.md", "v1\n");
    fixture.write_obsidian("gallery/photo.png", "png bytes");

    sync(&fixture);
    assert_eq!(fixture.read_hugo("gallery/index.md"), "v1\n");

    fixture.write_hugo("gallery/index.md", "v2\n");
    let report = sync(&fixture);
    assert_eq!(actions(&report), vec![("gallery".into(), SyncAction::ModifiedInHugo)]);
    assert_eq!(report.synced, 1);

    assert_eq!(fixture.read_obsidian("gallery/index.md"), "v2\n");
    fixture.assert_obsidian_missing("gallery/gallery.md");
    assert!(sync(&fixture).is_empty());
}

#[test]
fn test_edit_returns_to_hugo_folder_note_in_place() {
    let fixture = SyncFixture::new();
    fixture.write_hugo("notes/notes.md", "v1\n");

    sync(&fixture);
    assert_eq!(fixture.read_obsidian("notes/notes.md"), "v1\n");

    fixture.write_obsidian("notes/notes.md", "v2\n");
    let report = sync(&fixture);
    assert_eq!(actions(&report), vec![("notes".into(), SyncAction::ModifiedInObsidian)]);

    assert_eq!(fixture.read_hugo("notes/notes.md"), "v2\n");
    fixture.assert_hugo_missing("notes/index.md");
    assert!(sync(&fixture).is_empty());
}

#[test]
fn test_push_defers_hugo_edit_until_allowed() {
    let fixture = SyncFixture::new();
    fixture.write_hugo("post.md", "v1\n");
    sync(&fixture);
    let recorded = state(&fixture);

    fixture.write_hugo("post.md", "v2\n");
    let push = SyncOptions {
        direction: SyncDirection::Push,
        ..SyncOptions::default()
    };
    let report = sync_with(&fixture, push);

    assert_eq!(actions(&report), vec![("post".into(), SyncAction::ModifiedInHugo)]);
    assert_eq!(
        report.entries[0].outcome,
        Outcome::Skipped {
            reason: SkipReason::DirectionPolicy
        }
    );
    assert_eq!(fixture.read_obsidian("post.md"), "v1\n");
    assert_eq!(state(&fixture).hugo, recorded.hugo);
    assert_eq!(state(&fixture).obsidian, recorded.obsidian);

    let report = sync(&fixture);
    assert_eq!(actions(&report), vec![("post".into(), SyncAction::ModifiedInHugo)]);
    assert_eq!(fixture.read_obsidian("post.md"), "v2\n");
}

#[test]
fn test_pull_defers_obsidian_edit_until_allowed() {
    let fixture = SyncFixture::new();
    fixture.write_obsidian("post.md", "v1\n");
    sync(&fixture);
    let recorded = state(&fixture);

    fixture.write_obsidian("post.md", "v2\n");
    let pull = SyncOptions {
        direction: SyncDirection::Pull,
        ..SyncOptions::default()
    };
    let report = sync_with(&fixture, pull);

    assert_eq!(actions(&report), vec![("post".into(), SyncAction::ModifiedInObsidian)]);
    assert_eq!(
        report.entries[0].outcome,
        Outcome::Skipped {
            reason: SkipReason::DirectionPolicy
        }
    );
    assert_eq!(fixture.read_hugo("post.md"), "v1\n");
    assert_eq!(state(&fixture).hugo, recorded.hugo);
    assert_eq!(state(&fixture).obsidian, recorded.obsidian);

    let report = sync(&fixture);
    assert_eq!(actions(&report), vec![("post".into(), SyncAction::ModifiedInObsidian)]);
    assert_eq!(fixture.read_hugo("post.md"), "v2\n");
}

#[test]
fn test_forced_winner_against_direction_leaves_conflict_pending() {
    let fixture = SyncFixture::new();
    fixture.write_hugo("post.md", "base\n");
    sync(&fixture);
    let recorded = state(&fixture);

    fixture.write_hugo("post.md", "hugo edit\n");
    fixture.write_obsidian("post.md", "obsidian edit\n");

    let options = SyncOptions {
        direction: SyncDirection::Push,
        force: Some(Side::Hugo),
        ..SyncOptions::default()
    };
    let report = sync_with(&fixture, options);

    assert_eq!(actions(&report), vec![("post".into(), SyncAction::Conflict)]);
    assert_eq!(
        report.entries[0].outcome,
        Outcome::Skipped {
            reason: SkipReason::DirectionPolicy
        }
    );
    assert_eq!((report.synced, report.conflicts), (0, 1));
    assert_eq!(fixture.read_obsidian("post.md"), "obsidian edit\n");
    assert_eq!(state(&fixture).hugo, recorded.hugo);
    assert_eq!(state(&fixture).obsidian, recorded.obsidian);

    let replan = session(&fixture, SyncOptions::default()).plan();
    assert_eq!(replan[0].action, SyncAction::Conflict);
}
