//! Filter and selection state over the file catalog.

use super::model::FileRecord;
use serde::Serialize;
use std::collections::BTreeSet;

/// Records, active search query and selection, without any I/O.
///
/// Selection is defined over the whole registry: a selected name that a
/// later search filters out stays selected until explicitly cleared.
/// `select_all()` is derived on every read, so it always equals
/// "selection == names in the filtered view".
#[derive(Debug, Clone, Default, Serialize)]
pub struct FileCatalogView {
    records: Vec<FileRecord>,
    query: String,
    selection: BTreeSet<String>,
}

impl FileCatalogView {
    pub fn new(records: Vec<FileRecord>) -> Self {
        Self {
            records,
            ..Self::default()
        }
    }

    pub fn records(&self) -> &[FileRecord] {
        &self.records
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn selection(&self) -> &BTreeSet<String> {
        &self.selection
    }

    /// Records whose name contains the query, case-insensitively.
    pub fn filtered(&self) -> impl Iterator<Item = &FileRecord> {
        let needle = self.query.to_lowercase();
        self.records
            .iter()
            .filter(move |r| needle.is_empty() || r.name.to_lowercase().contains(&needle))
    }

    pub fn filtered_names(&self) -> BTreeSet<String> {
        self.filtered().map(|r| r.name.clone()).collect()
    }

    pub fn select_all(&self) -> bool {
        self.selection == self.filtered_names()
    }

    pub fn set_search(&mut self, query: &str) {
        self.query = query.to_string();
    }

    /// Flips `name` in the selection. No-op unless `name` is in the
    /// filtered view; returns whether anything changed.
    pub fn toggle(&mut self, name: &str) -> bool {
        if !self.filtered().any(|r| r.name == name) {
            return false;
        }
        if !self.selection.remove(name) {
            self.selection.insert(name.to_string());
        }
        true
    }

    pub fn set_select_all(&mut self, flag: bool) {
        self.selection = if flag {
            self.filtered_names()
        } else {
            BTreeSet::new()
        };
    }

    pub fn clear_selection(&mut self) {
        self.selection.clear();
    }

    /// Replaces every record wholesale and clears the selection.
    pub fn replace(&mut self, records: Vec<FileRecord>) {
        self.records = records;
        self.selection.clear();
    }

    /// Drops `names` from both the records and the selection.
    pub fn remove(&mut self, names: &[String]) {
        self.records.retain(|r| !names.contains(&r.name));
        for name in names {
            self.selection.remove(name);
        }
    }

    /// Sets `indexed` on every record named in `names`; returns the names
    /// that matched a record.
    pub fn set_indexed(&mut self, names: &[String], indexed: bool) -> Vec<String> {
        let mut touched = Vec::new();
        for record in self.records.iter_mut().filter(|r| names.contains(&r.name)) {
            record.indexed = indexed;
            touched.push(record.name.clone());
        }
        touched
    }

    /// Members of `names` whose record is currently indexed.
    pub fn indexed_subset(&self, names: &[String]) -> Vec<String> {
        self.records
            .iter()
            .filter(|r| r.indexed && names.contains(&r.name))
            .map(|r| r.name.clone())
            .collect()
    }

    pub fn get(&self, name: &str) -> Option<&FileRecord> {
        self.records.iter().find(|r| r.name == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(name: &str, indexed: bool) -> FileRecord {
        FileRecord {
            name: name.to_string(),
            size: 100,
            extension: String::new(),
            indexed,
        }
    }

    fn sample() -> FileCatalogView {
        FileCatalogView::new(vec![
            record("Alpha.txt", false),
            record("beta.pdf", true),
            record("alphabet.docx", false),
        ])
    }

    fn names(view: &FileCatalogView) -> Vec<String> {
        view.selection().iter().cloned().collect()
    }

    #[test]
    fn test_search_is_case_insensitive_substring() {
        let mut view = sample();
        view.set_search("ALPHA");
        let filtered: Vec<&str> = view.filtered().map(|r| r.name.as_str()).collect();
        assert_eq!(filtered, vec!["Alpha.txt", "alphabet.docx"]);
    }

    #[test]
    fn test_toggle_outside_filter_is_noop() {
        let mut view = sample();
        view.set_search("alpha");
        assert!(!view.toggle("beta.pdf"));
        assert!(view.selection().is_empty());
        assert!(view.toggle("Alpha.txt"));
        assert_eq!(names(&view), vec!["Alpha.txt"]);
        assert!(view.toggle("Alpha.txt"));
        assert!(view.selection().is_empty());
    }

    #[test]
    fn test_select_all_tracks_filter_and_selection() {
        let mut view = sample();
        view.set_select_all(true);
        assert!(view.select_all());

        // Narrowing the search keeps hidden names selected, so the
        // selection no longer equals the filtered view.
        view.set_search("beta");
        assert!(!view.select_all());
        assert_eq!(view.selection().len(), 3);

        view.set_select_all(true);
        assert!(view.select_all());
        assert_eq!(names(&view), vec!["beta.pdf"]);

        view.set_select_all(false);
        assert!(view.selection().is_empty());
        assert!(!view.select_all());
    }

    #[test]
    fn test_select_all_holds_over_many_queries() {
        let queries = ["", "a", "ALP", "pdf", "zzz", ".docx"];
        let mut view = sample();
        for query in queries {
            view.set_search(query);
            for flag in [true, false] {
                view.set_select_all(flag);
                assert_eq!(view.select_all(), *view.selection() == view.filtered_names());
            }
            view.toggle("Alpha.txt");
            assert_eq!(view.select_all(), *view.selection() == view.filtered_names());
        }
    }

    #[test]
    fn test_replace_clears_selection() {
        let mut view = sample();
        view.set_select_all(true);
        view.replace(vec![record("new.md", false)]);
        assert!(view.selection().is_empty());
        assert_eq!(view.records().len(), 1);
    }

    #[test]
    fn test_remove_drops_records_and_selection() {
        let mut view = sample();
        view.set_select_all(true);
        view.remove(&["beta.pdf".to_string(), "Alpha.txt".to_string()]);
        assert_eq!(view.records().len(), 1);
        assert_eq!(names(&view), vec!["alphabet.docx"]);
    }

    #[test]
    fn test_indexed_subset_and_set_indexed() {
        let mut view = sample();
        let all: Vec<String> = view.records().iter().map(|r| r.name.clone()).collect();
        assert_eq!(view.indexed_subset(&all), vec!["beta.pdf".to_string()]);

        let touched = view.set_indexed(&["Alpha.txt".to_string(), "ghost.txt".to_string()], true);
        assert_eq!(touched, vec!["Alpha.txt".to_string()]);
        assert!(view.get("Alpha.txt").unwrap().indexed);
    }
}
