//! End-to-end sorting through the document write contract.

use smallvec::SmallVec;
use strmanip_core::LineEnding;
use strmanip_lib::{
  command::{
    CommandOutcome,
    SortCommand,
    TransformCommand,
    execute_sort,
    plan_sort,
  },
  config::SettingsStore,
  document::Document,
  selection::{
    Range,
    Selection,
  },
  sort::{
    EditInstruction,
    SortBy,
    SortSettings,
  },
  transform::StringTransform,
};

/// Builds a document from `words` joined by spaces, each word selected.
fn selected_words(words: &[&str]) -> Document {
  let mut text = String::new();
  let mut ranges: SmallVec<[Range; 1]> = SmallVec::new();
  for word in words {
    if !text.is_empty() {
      text.push(' ');
    }
    let from = text.chars().count();
    text.push_str(word);
    ranges.push(Range::new(from, text.chars().count()));
  }
  Document::new(&text)
    .with_selection(Selection::new(ranges).unwrap())
    .unwrap()
}

fn selections(f: impl FnOnce(&mut SortSettings)) -> SortSettings {
  let mut settings = SortSettings {
    sort_by: SortBy::Selections,
    ..SortSettings::default()
  };
  f(&mut settings);
  settings
}

#[test]
fn lines_mode_sorts_single_region() {
  let mut doc = Document::new("banana\napple\ncherry");
  doc
    .set_selection(Selection::single(0, doc.text().len_chars()))
    .unwrap();

  let outcome = execute_sort(&mut doc, &SortSettings::default()).unwrap();

  assert_eq!(outcome, CommandOutcome::Applied {
    replaced: 1,
    deleted:  0,
  });
  assert_eq!(doc.text().to_string(), "apple\nbanana\ncherry");
  assert_eq!(doc.selection().ranges(), &[Range::new(0, 19)]);
}

#[test]
fn lines_mode_uses_document_line_ending() {
  let mut doc = Document::new("b\r\nc\r\na");
  doc
    .set_selection(Selection::single(0, doc.text().len_chars()))
    .unwrap();
  execute_sort(&mut doc, &SortSettings::default()).unwrap();
  assert_eq!(doc.text().to_string(), "a\r\nb\r\nc");
}

#[test]
fn selections_case_insensitive_reverse() {
  let doc = selected_words(&["Banana", "apple", "Cherry"]);
  let ids = doc.selection().cursor_ids().to_vec();
  let settings = selections(|s| {
    s.case_insensitive = true;
    s.reverse = true;
  });

  let reconciliation = plan_sort(doc.extract_regions(), &settings, LineEnding::LF).unwrap();
  assert_eq!(reconciliation.instructions(), &[
    EditInstruction::Replace(ids[0], "Cherry".into()),
    EditInstruction::Replace(ids[1], "Banana".into()),
    EditInstruction::Replace(ids[2], "apple".into()),
  ]);

  let mut doc = doc;
  execute_sort(&mut doc, &settings).unwrap();
  assert_eq!(doc.text().to_string(), "Cherry Banana apple");
  assert_eq!(doc.selection().cursor_ids(), ids.as_slice());
}

#[test]
fn selections_dedup_deletes_bottom_regions() {
  let doc = selected_words(&["foo", "FOO", "bar", "foo"]);
  let ids = doc.selection().cursor_ids().to_vec();
  let settings = selections(|s| {
    s.case_insensitive = true;
    s.remove_duplicates = true;
  });

  let reconciliation = plan_sort(doc.extract_regions(), &settings, LineEnding::LF).unwrap();
  assert_eq!(reconciliation.instructions(), &[
    EditInstruction::Replace(ids[0], "bar".into()),
    EditInstruction::Replace(ids[1], "foo".into()),
    EditInstruction::Delete(ids[2]),
    EditInstruction::Delete(ids[3]),
  ]);

  let applied: Vec<_> = reconciliation
    .into_application_order(|id| doc.region_order(*id))
    .iter()
    .map(|instruction| *instruction.region())
    .collect();
  assert_eq!(applied, vec![ids[3], ids[2], ids[1], ids[0]]);

  let mut doc = doc;
  execute_sort(&mut doc, &settings).unwrap();
  assert_eq!(doc.text().to_string(), "bar foo  ");
  assert_eq!(doc.selection().cursor_ids(), &ids[..2]);
  assert_eq!(doc.selection().ranges(), &[
    Range::new(0, 3),
    Range::new(4, 7)
  ]);
}

#[test]
fn selections_natural_order() {
  let mut natural = selected_words(&["item10", "item2", "item1"]);
  execute_sort(&mut natural, &selections(|s| s.natural_order = true)).unwrap();
  assert_eq!(natural.text().to_string(), "item1 item2 item10");

  let mut plain = selected_words(&["item10", "item2", "item1"]);
  execute_sort(&mut plain, &selections(|_| {})).unwrap();
  assert_eq!(plain.text().to_string(), "item1 item10 item2");
}

#[test]
fn one_region_sorts_its_lines_in_selections_mode() {
  let mut doc = Document::new("pear\nfig\napple\nfig");
  doc
    .set_selection(Selection::single(0, doc.text().len_chars()))
    .unwrap();
  let outcome = execute_sort(&mut doc, &selections(|s| s.remove_duplicates = true)).unwrap();
  assert_eq!(outcome, CommandOutcome::Applied {
    replaced: 1,
    deleted:  0,
  });
  assert_eq!(doc.text().to_string(), "apple\nfig\npear");
}

#[test]
fn many_regions_reorder_in_lines_mode() {
  let mut doc = selected_words(&["pear", "fig", "apple"]);
  let ids = doc.selection().cursor_ids().to_vec();
  execute_sort(&mut doc, &SortSettings::default()).unwrap();
  assert_eq!(doc.text().to_string(), "apple fig pear");
  assert_eq!(doc.selection().cursor_ids(), ids.as_slice());
}

#[test]
fn caret_only_document_sorts_its_empty_region() {
  let mut doc = Document::new("");
  let outcome = execute_sort(&mut doc, &SortSettings::default()).unwrap();
  assert_eq!(outcome, CommandOutcome::Applied {
    replaced: 1,
    deleted:  0,
  });
  assert_eq!(doc.text().to_string(), "");
}

#[test]
fn sort_command_remembers_settings_between_runs() {
  let mut store = SettingsStore::default();
  let command = SortCommand::default();

  let mut doc = selected_words(&["b", "a", "c"]);
  let mut accept_selections =
    |initial: &SortSettings| Some(SortSettings {
      sort_by: SortBy::Selections,
      ..*initial
    });
  command
    .run(&mut doc, &mut store, &mut accept_selections)
    .unwrap();
  assert_eq!(doc.text().to_string(), "a b c");

  // Second run: accept whatever the store pre-filled.
  let mut doc = selected_words(&["z", "y"]);
  let mut accept = |initial: &SortSettings| Some(*initial);
  command.run(&mut doc, &mut store, &mut accept).unwrap();
  assert_eq!(doc.text().to_string(), "y z");

  let stored = SettingsStore::from_toml_str(&store.to_toml_string().unwrap()).unwrap();
  assert_eq!(stored.read(SortCommand::STORE_KEY).sort_by, SortBy::Selections);
}

#[test]
fn transform_then_sort() {
  let mut doc = selected_words(&["Zeta_Value", "alpha-value"]);
  TransformCommand::new(StringTransform::SnakeCase)
    .execute(&mut doc)
    .unwrap();
  assert_eq!(doc.text().to_string(), "zeta_value alpha_value");

  execute_sort(&mut doc, &selections(|_| {})).unwrap();
  assert_eq!(doc.text().to_string(), "alpha_value zeta_value");
}
