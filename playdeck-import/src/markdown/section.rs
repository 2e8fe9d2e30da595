//! Tokenizer/sectionizer: raw text into ordered (section label, records) groups
//!
//! The format is forgiving by design: lines that match no pattern are
//! silently skipped and never abort the scan.

use super::record::{is_indented, parse_key_value, RawRecord};

/// The four record sections the loaders understand
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Users,
    Tracks,
    Podcasts,
    Playlists,
}

impl Section {
    /// Match a section label case-insensitively by substring against the
    /// localized synonyms for each section.
    pub fn match_label(label: &str) -> Option<Section> {
        const USERS: &[&str] = &["usuário", "usuarios", "usuários"];
        const TRACKS: &[&str] = &["música", "musicas", "músicas"];

        let label = label.to_lowercase();
        let contains_any = |synonyms: &[&str]| synonyms.iter().any(|s| label.contains(s));

        if contains_any(USERS) {
            Some(Section::Users)
        } else if contains_any(TRACKS) {
            Some(Section::Tracks)
        } else if label.contains("podcast") {
            Some(Section::Podcasts)
        } else if label.contains("playlist") {
            Some(Section::Playlists)
        } else {
            None
        }
    }
}

/// Scan the document into ordered (section label, record list) pairs.
///
/// Labels come back trimmed and lowercased, unrecognized ones included so the
/// caller can warn about them. Groups with no records are dropped, and records
/// appearing before any section header are discarded.
///
/// Line handling, in priority order:
/// - blank lines are ignored
/// - `# label` flushes the open record and the current section, then starts a
///   new section
/// - `---` (with anything trailing) flushes and closes the current section
/// - `- key: value` starts a new record, flushing any open one
/// - indented (four spaces or tab) `key: value` lines continue the open
///   record; interior blank lines do not end the continuation run
/// - anything else is skipped
///
/// End of input flushes the open record and section exactly like `---`.
pub fn sectionize(text: &str) -> Vec<(String, Vec<RawRecord>)> {
    let mut groups: Vec<(String, Vec<RawRecord>)> = Vec::new();
    let mut section: Option<String> = None;
    let mut records: Vec<RawRecord> = Vec::new();
    let mut current: Option<RawRecord> = None;

    let lines: Vec<&str> = text.lines().collect();
    let mut i = 0;

    let flush_record = |records: &mut Vec<RawRecord>, current: &mut Option<RawRecord>| {
        if let Some(record) = current.take() {
            records.push(record);
        }
    };
    let flush_section = |groups: &mut Vec<(String, Vec<RawRecord>)>,
                         section: &Option<String>,
                         records: &mut Vec<RawRecord>| {
        if let Some(label) = section {
            if !records.is_empty() {
                groups.push((label.clone(), std::mem::take(records)));
            }
        }
        records.clear();
    };

    while i < lines.len() {
        let line = lines[i];
        let trimmed = line.trim();

        if trimmed.is_empty() {
            i += 1;
            continue;
        }

        if let Some(label) = trimmed.strip_prefix("# ") {
            flush_record(&mut records, &mut current);
            flush_section(&mut groups, &section, &mut records);
            section = Some(label.trim().to_lowercase());
            i += 1;
            continue;
        }

        if trimmed.starts_with("---") {
            flush_record(&mut records, &mut current);
            flush_section(&mut groups, &section, &mut records);
            section = None;
            i += 1;
            continue;
        }

        if let Some(rest) = trimmed.strip_prefix("- ") {
            flush_record(&mut records, &mut current);
            let mut record = RawRecord::new();
            if let Some((key, value)) = parse_key_value(rest) {
                record.insert(key, value);
            }
            i += 1;
            // consume the continuation run; blank lines inside it are skipped
            while i < lines.len() {
                let next = lines[i];
                if next.trim().is_empty() {
                    i += 1;
                    continue;
                }
                if !is_indented(next) {
                    break;
                }
                if let Some((key, value)) = parse_key_value(next.trim()) {
                    record.insert(key, value);
                }
                i += 1;
            }
            current = Some(record);
            continue;
        }

        // no recognized pattern: structural skip
        i += 1;
    }

    flush_record(&mut records, &mut current);
    flush_section(&mut groups, &section, &mut records);
    groups
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_match_label_synonyms() {
        assert_eq!(Section::match_label("Usuários"), Some(Section::Users));
        assert_eq!(Section::match_label("lista de usuarios"), Some(Section::Users));
        assert_eq!(Section::match_label("MÚSICAS"), Some(Section::Tracks));
        assert_eq!(Section::match_label("musicas favoritas"), Some(Section::Tracks));
        assert_eq!(Section::match_label("Podcasts"), Some(Section::Podcasts));
        assert_eq!(Section::match_label("playlists do sistema"), Some(Section::Playlists));
        assert_eq!(Section::match_label("configuracao"), None);
    }

    #[test]
    fn test_sectionize_basic_groups() {
        let text = "\
# Usuarios
- nome: Ana
- nome: Bruno

# Musicas
- titulo: Song A
    duracao: 120
";
        let groups = sectionize(text);
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].0, "usuarios");
        assert_eq!(groups[0].1.len(), 2);
        assert_eq!(groups[1].0, "musicas");
        assert_eq!(groups[1].1[0].scalar("duracao"), "120");
    }

    #[test]
    fn test_sectionize_eof_flushes_open_record() {
        let text = "# Usuarios\n- nome: Ana";
        let groups = sectionize(text);
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].1[0].scalar("nome"), "Ana");
    }

    #[test]
    fn test_sectionize_separator_closes_section() {
        let text = "\
# Usuarios
- nome: Ana
---
- nome: Bruno
";
        let groups = sectionize(text);
        // the record after --- belongs to no section and is discarded
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].1.len(), 1);
    }

    #[test]
    fn test_sectionize_records_before_any_header_are_discarded() {
        let text = "- nome: Ana\n# Usuarios\n- nome: Bruno\n";
        let groups = sectionize(text);
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].1.len(), 1);
        assert_eq!(groups[0].1[0].scalar("nome"), "Bruno");
    }

    #[test]
    fn test_sectionize_junk_lines_are_skipped() {
        let text = "\
# Usuarios
random prose between records
- nome: Ana
not: a: record
";
        let groups = sectionize(text);
        assert_eq!(groups[0].1.len(), 1);
    }

    #[test]
    fn test_sectionize_blank_line_inside_continuation_run() {
        let text = "\
# Musicas
- titulo: Song A

    duracao: 120
";
        let groups = sectionize(text);
        assert_eq!(groups[0].1[0].scalar("duracao"), "120");
    }

    #[test]
    fn test_sectionize_empty_section_emits_no_group() {
        let text = "# Usuarios\n\n# Musicas\n- titulo: A\n    duracao: 5\n";
        let groups = sectionize(text);
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].0, "musicas");
    }

    #[test]
    fn test_sectionize_header_flushes_open_record_to_previous_section() {
        let text = "# Usuarios\n- nome: Ana\n# Musicas\n- titulo: A\n    duracao: 5\n";
        let groups = sectionize(text);
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].1.len(), 1);
    }
}
