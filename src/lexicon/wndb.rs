//! Parser for the standard WNdb database files.
//!
//! Each part of speech contributes three files: `data.<pos>` (synset
//! records with pointers), `index.<pos>` (lemma to offset lists) and
//! `<pos>.exc` (morphology exceptions). License header lines start with
//! whitespace and are skipped.

use super::{Lexicon, PartOfSpeech, Synset, SynsetId};
use crate::error::LexiconError;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

pub(super) fn load_dir(dir: &Path) -> Result<Lexicon, LexiconError> {
    let mut lexicon = Lexicon::empty();

    // Data files first: index entries resolve against loaded synsets.
    for (_, suffix) in PartOfSpeech::FILE_POSES {
        let path = dir.join(format!("data.{suffix}"));
        parse_data(open(&path)?, &path, &mut lexicon)?;
    }
    for (pos, suffix) in PartOfSpeech::FILE_POSES {
        let path = dir.join(format!("index.{suffix}"));
        parse_index(open(&path)?, &path, pos, &mut lexicon)?;
    }
    for (pos, suffix) in PartOfSpeech::FILE_POSES {
        let path = dir.join(format!("{suffix}.exc"));
        if path.exists() {
            parse_exceptions(open(&path)?, &path, pos, &mut lexicon)?;
        } else {
            log::debug!("no exception list at {}", path.display());
        }
    }

    lexicon.compute_max_depths();
    Ok(lexicon)
}

fn open(path: &Path) -> Result<BufReader<File>, LexiconError> {
    File::open(path)
        .map(BufReader::new)
        .map_err(|source| LexiconError::Io {
            path: path.to_path_buf(),
            source,
        })
}

fn parse_data(reader: impl BufRead, path: &Path, lexicon: &mut Lexicon) -> Result<(), LexiconError> {
    for (number, line) in reader.lines().enumerate() {
        let number = number + 1;
        let line = read_line(line, path)?;
        if line.is_empty() || line.starts_with(' ') {
            continue;
        }
        let synset = parse_data_line(&line, path, number)?;
        lexicon.insert_synset(synset);
    }
    Ok(())
}

/// One synset record:
/// `offset lex_filenum ss_type w_cnt word lex_id ... p_cnt ptr... | gloss`
/// with `w_cnt` in hex and pointers as 4-field groups.
fn parse_data_line(line: &str, path: &Path, number: usize) -> Result<Synset, LexiconError> {
    let fields: Vec<&str> = line.split_whitespace().collect();
    let field = |index: usize| {
        fields
            .get(index)
            .copied()
            .ok_or_else(|| parse_error(path, number, "truncated synset record"))
    };

    let offset: u32 = field(0)?
        .parse()
        .map_err(|_| parse_error(path, number, "bad synset offset"))?;
    let type_tag = field(2)?;
    let pos = type_tag
        .chars()
        .next()
        .and_then(PartOfSpeech::from_tag)
        .ok_or_else(|| parse_error(path, number, format!("unknown synset type `{type_tag}`")))?;

    let word_count = usize::from_str_radix(field(3)?, 16)
        .map_err(|_| parse_error(path, number, "bad word count"))?;
    let mut lemmas = Vec::with_capacity(word_count);
    for word in 0..word_count {
        lemmas.push(strip_marker(field(4 + 2 * word)?).to_string());
    }

    let pointer_base = 4 + 2 * word_count;
    let pointer_count: usize = field(pointer_base)?
        .parse()
        .map_err(|_| parse_error(path, number, "bad pointer count"))?;
    let mut hypernyms = Vec::new();
    for pointer in 0..pointer_count {
        let base = pointer_base + 1 + 4 * pointer;
        let symbol = field(base)?;
        let target_offset: u32 = field(base + 1)?
            .parse()
            .map_err(|_| parse_error(path, number, "bad pointer offset"))?;
        let target_tag = field(base + 2)?;
        field(base + 3)?;
        if symbol == "@" || symbol == "@i" {
            let target_pos = target_tag
                .chars()
                .next()
                .and_then(PartOfSpeech::from_tag)
                .ok_or_else(|| {
                    parse_error(path, number, format!("unknown pointer pos `{target_tag}`"))
                })?;
            hypernyms.push(SynsetId {
                pos: target_pos,
                offset: target_offset,
            });
        }
    }

    let gloss = line
        .split_once('|')
        .map(|(_, gloss)| gloss.trim().to_string())
        .unwrap_or_default();

    Ok(Synset::new(SynsetId { pos, offset }, lemmas, hypernyms, gloss))
}

fn parse_index(
    reader: impl BufRead,
    path: &Path,
    file_pos: PartOfSpeech,
    lexicon: &mut Lexicon,
) -> Result<(), LexiconError> {
    for (number, line) in reader.lines().enumerate() {
        let number = number + 1;
        let line = read_line(line, path)?;
        if line.is_empty() || line.starts_with(' ') {
            continue;
        }

        let fields: Vec<&str> = line.split_whitespace().collect();
        let field = |index: usize| {
            fields
                .get(index)
                .copied()
                .ok_or_else(|| parse_error(path, number, "truncated index record"))
        };

        let lemma = field(0)?;
        let synset_count: usize = field(2)?
            .parse()
            .map_err(|_| parse_error(path, number, "bad synset count"))?;
        let pointer_count: usize = field(3)?
            .parse()
            .map_err(|_| parse_error(path, number, "bad pointer count"))?;

        // Pointer symbols, then sense_cnt and tagsense_cnt, precede offsets.
        let offsets_base = 4 + pointer_count + 2;
        let mut ids = Vec::with_capacity(synset_count);
        for entry in 0..synset_count {
            let offset: u32 = field(offsets_base + entry)?
                .parse()
                .map_err(|_| parse_error(path, number, "bad synset offset"))?;
            match resolve_id(lexicon, file_pos, offset) {
                Some(id) => ids.push(id),
                None => log::warn!(
                    "{}: `{lemma}` references synset {offset} missing from the data file",
                    path.display()
                ),
            }
        }
        lexicon.insert_index_entry(file_pos, lemma.to_string(), ids);
    }
    Ok(())
}

/// The adjective index covers both head and satellite synsets; the data
/// file decides which one an offset is.
fn resolve_id(lexicon: &Lexicon, file_pos: PartOfSpeech, offset: u32) -> Option<SynsetId> {
    let direct = SynsetId {
        pos: file_pos,
        offset,
    };
    if lexicon.contains_id(direct) {
        return Some(direct);
    }
    if file_pos == PartOfSpeech::Adjective {
        let satellite = SynsetId {
            pos: PartOfSpeech::AdjectiveSatellite,
            offset,
        };
        if lexicon.contains_id(satellite) {
            return Some(satellite);
        }
    }
    None
}

fn parse_exceptions(
    reader: impl BufRead,
    path: &Path,
    pos: PartOfSpeech,
    lexicon: &mut Lexicon,
) -> Result<(), LexiconError> {
    for line in reader.lines() {
        let line = read_line(line, path)?;
        let mut parts = line.split_whitespace();
        let Some(form) = parts.next() else { continue };
        let bases: Vec<String> = parts.map(str::to_string).collect();
        if bases.is_empty() {
            log::warn!("{}: exception `{form}` lists no base forms", path.display());
            continue;
        }
        lexicon.insert_exception(pos, form.to_string(), bases);
    }
    Ok(())
}

fn read_line(line: std::io::Result<String>, path: &Path) -> Result<String, LexiconError> {
    line.map_err(|source| LexiconError::Io {
        path: path.to_path_buf(),
        source,
    })
}

fn parse_error(path: &Path, line: usize, reason: impl Into<String>) -> LexiconError {
    LexiconError::Parse {
        path: path.to_path_buf(),
        line,
        reason: reason.into(),
    }
}

fn strip_marker(word: &str) -> &str {
    // Adjective lemmas may carry a syntactic marker, e.g. "galore(ip)".
    word.split_once('(').map_or(word, |(lemma, _)| lemma)
}

#[cfg(test)]
mod test {
    use super::*;
    use std::io::Cursor;

    const DATA_NOUN: &str = "  1 This software and database is being provided to you, the LICENSEE.
00000001 03 n 01 entity 0 000 | that which exists
00000002 03 n 02 animal 0 beast 0 001 @ 00000001 n 0000 | a living organism
";

    const INDEX_NOUN: &str = "  1 This software and database is being provided to you, the LICENSEE.
entity n 1 0 1 0 00000001
animal n 1 1 @ 1 0 00000002
";

    fn load_fixture() -> Lexicon {
        let mut lexicon = Lexicon::empty();
        let path = Path::new("data.noun");
        parse_data(Cursor::new(DATA_NOUN), path, &mut lexicon).unwrap();
        let path = Path::new("index.noun");
        parse_index(Cursor::new(INDEX_NOUN), path, PartOfSpeech::Noun, &mut lexicon).unwrap();
        lexicon.compute_max_depths();
        lexicon
    }

    #[test]
    fn data_records_become_synsets() {
        let lexicon = load_fixture();
        let animal = lexicon.synsets("animal");
        assert_eq!(animal.len(), 1);
        let synset = lexicon.synset(animal[0]).unwrap();
        assert_eq!(synset.lemmas(), ["animal", "beast"]);
        assert_eq!(synset.gloss(), "a living organism");
        assert_eq!(
            lexicon.shortest_path_distance(animal[0], lexicon.synsets("entity")[0]),
            Some(1)
        );
    }

    #[test]
    fn header_lines_are_skipped() {
        let lexicon = load_fixture();
        assert!(lexicon.synsets("this").is_empty());
    }

    #[test]
    fn satellite_offsets_resolve_through_the_adjective_index() {
        let mut lexicon = Lexicon::empty();
        let data = "00000005 00 s 01 quick 0 000 | done with speed\n";
        parse_data(Cursor::new(data), Path::new("data.adj"), &mut lexicon).unwrap();
        let index = "quick a 1 0 1 0 00000005\n";
        parse_index(
            Cursor::new(index),
            Path::new("index.adj"),
            PartOfSpeech::Adjective,
            &mut lexicon,
        )
        .unwrap();
        let ids = lexicon.synsets("quick");
        assert_eq!(ids.len(), 1);
        assert_eq!(ids[0].pos, PartOfSpeech::AdjectiveSatellite);
    }

    #[test]
    fn truncated_records_are_parse_errors() {
        let mut lexicon = Lexicon::empty();
        let err = parse_data(
            Cursor::new("00000001 03 n 02 entity 0 000 | half a record\n"),
            Path::new("data.noun"),
            &mut lexicon,
        )
        .unwrap_err();
        assert!(matches!(err, LexiconError::Parse { line: 1, .. }));
    }

    #[test]
    fn exception_lists_feed_the_lookup() {
        let mut lexicon = load_fixture();
        parse_exceptions(
            Cursor::new("beasts_of_burden beast\n"),
            Path::new("noun.exc"),
            PartOfSpeech::Noun,
            &mut lexicon,
        )
        .unwrap();
        assert!(lexicon.exception_bases(PartOfSpeech::Noun, "beasts_of_burden").is_some());
    }
}
