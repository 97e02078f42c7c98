use std::io::{Cursor, Write};

use apple_dict_reader::{AppleDictError, AppleDictReader, ContainerLayout, DictionaryDefinition};
use byteorder::{LittleEndian, WriteBytesExt};
use flate2::write::ZlibEncoder;
use flate2::Compression;

const SUB_HEADER: [u8; 8] = [0xde, 0xad, 0xbe, 0xef, 0, 0, 0, 0];

fn entry_fragment(title: &str, word: &str, definition: &str) -> String {
    format!(
        concat!(
            r#"<d:entry id="e_{w}" d:title="{t}"><span class="hg"><span class="hw">{w}</span></span>"#,
            r#"<span class="sg"><span class="se1"><span class="tg_pos">noun</span>"#,
            r#"<span class="msDict"><span class="df">{d}</span></span></span></span></d:entry>"#,
        ),
        t = title,
        w = word,
        d = definition
    )
}

/// `[i32 size][sub-header][zlib payload]`
fn chunk(text: &str) -> Vec<u8> {
    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(text.as_bytes()).expect("compress chunk");
    let payload = encoder.finish().expect("finish chunk");

    let mut out = Vec::new();
    out.write_i32::<LittleEndian>((payload.len() + SUB_HEADER.len()) as i32)
        .expect("write size");
    out.extend_from_slice(&SUB_HEADER);
    out.extend_from_slice(&payload);
    out
}

/// Lays chunks out after the standard header; the table limit ends right after the last chunk.
fn container_from_chunks(chunks: &[Vec<u8>]) -> Vec<u8> {
    let layout = ContainerLayout::APPLE;
    let body: Vec<u8> = chunks.concat();

    let mut file = vec![0u8; layout.first_chunk_offset as usize];
    let table_length = layout.first_chunk_offset + body.len() as u64 - layout.table_length_offset - 4;
    file[0x40..0x44].copy_from_slice(&(table_length as i32).to_le_bytes());
    file.extend_from_slice(&body);
    file
}

fn container(chunk_texts: &[&str]) -> Vec<u8> {
    let chunks: Vec<Vec<u8>> = chunk_texts.iter().map(|text| chunk(text)).collect();
    container_from_chunks(&chunks)
}

fn open(bytes: Vec<u8>) -> AppleDictReader<Cursor<Vec<u8>>> {
    AppleDictReader::new(Cursor::new(bytes), ContainerLayout::default(), None).expect("open container")
}

fn read_all(bytes: Vec<u8>) -> Vec<DictionaryDefinition> {
    open(bytes)
        .definitions()
        .map(|r| r.expect("definition ok"))
        .collect()
}

#[test]
fn two_chunks_yield_definitions_in_chunk_order() {
    let first = format!("{}\n", entry_fragment("alpha", "alpha", "the first letter"));
    let second = format!("{}\n", entry_fragment("beta", "beta", "the second letter"));
    let definitions = read_all(container(&[&first, &second]));

    assert_eq!(definitions.len(), 2);
    assert_eq!(definitions[0].title, "alpha");
    assert_eq!(definitions[0].entry_text, "alphanounthe first letter");
    assert_eq!(definitions[1].title, "beta");
    assert!(definitions.iter().all(|d| d.parsed_markup.is_some()));
}

#[test]
fn fragments_within_a_chunk_keep_their_order() {
    let first = format!(
        "{}\n{}\n",
        entry_fragment("one", "one", "1"),
        entry_fragment("two", "two", "2")
    );
    let second = format!("{}\n", entry_fragment("three", "three", "3"));
    let titles: Vec<String> = read_all(container(&[&first, &second]))
        .into_iter()
        .map(|d| d.title)
        .collect();
    assert_eq!(titles, vec!["one", "two", "three"]);
}

#[test]
fn title_entities_are_resolved() {
    let text = entry_fragment("caf&#233; &amp; bar", "café", "a place");
    let definitions = read_all(container(&[&text]));
    assert_eq!(definitions[0].title, "café & bar");
}

#[test]
fn empty_title_is_skipped() {
    let text = format!(
        "{}\n{}\n",
        entry_fragment("", "ghost", "nothing"),
        entry_fragment("real", "real", "something")
    );
    let definitions = read_all(container(&[&text]));
    assert_eq!(definitions.len(), 1);
    assert_eq!(definitions[0].title, "real");
}

#[test]
fn empty_body_is_skipped() {
    let text = "<d:entry d:title=\"hollow\"></d:entry>\n";
    let definitions = read_all(container(&[text]));
    assert!(definitions.is_empty());
}

#[test]
fn missing_title_fails_without_ending_the_scan() {
    let text = format!(
        "<d:entry id=\"x\"><span>untitled</span></d:entry>\n{}\n",
        entry_fragment("after", "after", "still read")
    );
    let results: Vec<_> = open(container(&[&text])).definitions().collect();

    assert_eq!(results.len(), 2);
    assert!(matches!(results[0], Err(AppleDictError::ParseAssumption(_))));
    assert_eq!(results[1].as_ref().expect("second fragment").title, "after");
}

#[test]
fn entries_run_the_grammar() {
    let text = format!("{}\n", entry_fragment("bass", "bass", "a fish"));
    let entries: Vec<_> = open(container(&[&text]))
        .entries()
        .map(|r| r.expect("entry ok"))
        .collect();

    assert_eq!(entries.len(), 1);
    let (definition, entry) = &entries[0];
    assert_eq!(definition.title, "bass");
    assert_eq!(entry.word, "bass");
    assert_eq!(entry.senses[0].pos.as_deref(), Some("noun"));
}

#[test]
fn grammar_failures_do_not_end_the_scan() {
    let broken = r#"<d:entry d:title="broken"><span class="hg"><span class="hw">broken</span></span></d:entry>"#;
    let text = format!("{}\n{}\n", broken, entry_fragment("fine", "fine", "ok"));
    let results: Vec<_> = open(container(&[&text])).entries().collect();

    assert_eq!(results.len(), 2);
    assert!(matches!(results[0], Err(AppleDictError::ParseAssumption(_))));
    assert_eq!(results[1].as_ref().expect("second entry").1.word, "fine");
}

#[test]
fn chunk_limit_follows_the_table_length() {
    let text = format!("{}\n", entry_fragment("a", "a", "b"));
    let bytes = container(&[&text]);
    let total = bytes.len() as u64;
    let reader = open(bytes);
    assert_eq!(reader.chunk_limit(), total);
}

#[test]
fn empty_chunk_table_yields_nothing() {
    let definitions = read_all(container(&[]));
    assert!(definitions.is_empty());
}

#[test]
fn truncated_chunk_is_an_io_error_and_ends_the_scan() {
    let text = format!("{}\n", entry_fragment("a", "a", "b"));
    let mut bytes = container(&[&text]);
    bytes.truncate(bytes.len() - 5);

    let mut definitions = open(bytes).definitions();
    assert!(matches!(definitions.next(), Some(Err(AppleDictError::Io(_)))));
    assert!(definitions.next().is_none());
}

#[test]
fn corrupt_payload_is_a_decompression_error() {
    let mut raw = Vec::new();
    raw.write_i32::<LittleEndian>(16).expect("write size");
    raw.extend_from_slice(&SUB_HEADER);
    raw.extend_from_slice(b"notzlib!");

    let mut definitions = open(container_from_chunks(&[raw])).definitions();
    assert!(matches!(definitions.next(), Some(Err(AppleDictError::DecompressionError(_)))));
    assert!(definitions.next().is_none());
}

#[test]
fn chunk_shorter_than_sub_header_is_invalid() {
    let mut raw = Vec::new();
    raw.write_i32::<LittleEndian>(4).expect("write size");
    raw.extend_from_slice(&[0u8; 4]);

    let mut definitions = open(container_from_chunks(&[raw])).definitions();
    assert!(matches!(definitions.next(), Some(Err(AppleDictError::InvalidFormat(_)))));
}

#[test]
fn negative_table_length_is_rejected() {
    let mut bytes = container(&[]);
    bytes[0x40..0x44].copy_from_slice(&(-1i32).to_le_bytes());
    let result = AppleDictReader::new(Cursor::new(bytes), ContainerLayout::default(), None);
    assert!(matches!(result, Err(AppleDictError::InvalidFormat(_))));
}

#[test]
fn custom_layout_is_honoured() {
    let layout = ContainerLayout {
        table_length_offset: 0,
        first_chunk_offset: 4,
        chunk_header_len: 8,
    };
    let body = chunk(&format!("{}\n", entry_fragment("tiny", "tiny", "small")));
    let mut bytes = Vec::new();
    bytes.write_i32::<LittleEndian>(body.len() as i32).expect("write table length");
    bytes.extend_from_slice(&body);

    let reader = AppleDictReader::new(Cursor::new(bytes), layout, None).expect("open container");
    let definitions: Vec<_> = reader.definitions().map(|r| r.expect("definition ok")).collect();
    assert_eq!(definitions.len(), 1);
    assert_eq!(definitions[0].title, "tiny");
}

#[test]
fn invalid_utf8_fragment_is_an_encoding_error() {
    let mut text = b"<d:entry d:title=\"bad\">\xff\xfe</d:entry>\n".to_vec();
    text.extend_from_slice(format!("{}\n", entry_fragment("good", "good", "fine")).as_bytes());

    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(&text).expect("compress chunk");
    let payload = encoder.finish().expect("finish chunk");
    let mut raw = Vec::new();
    raw.write_i32::<LittleEndian>((payload.len() + 8) as i32).expect("write size");
    raw.extend_from_slice(&SUB_HEADER);
    raw.extend_from_slice(&payload);

    let results: Vec<_> = open(container_from_chunks(&[raw])).definitions().collect();
    assert_eq!(results.len(), 2);
    assert!(matches!(results[0], Err(AppleDictError::InvalidEncoding(_))));
    assert_eq!(results[1].as_ref().expect("second fragment").title, "good");
}

#[test]
fn latin1_encoding_override_decodes_fragments() {
    let mut text = b"<d:entry d:title=\"caf\xe9\"><span>caf\xe9</span></d:entry>\n".to_vec();
    text.push(b'\n');

    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(&text).expect("compress chunk");
    let payload = encoder.finish().expect("finish chunk");
    let mut raw = Vec::new();
    raw.write_i32::<LittleEndian>((payload.len() + 8) as i32).expect("write size");
    raw.extend_from_slice(&SUB_HEADER);
    raw.extend_from_slice(&payload);

    let reader = AppleDictReader::new(
        Cursor::new(container_from_chunks(&[raw])),
        ContainerLayout::default(),
        Some("latin1"),
    )
    .expect("open container");
    let definitions: Vec<_> = reader.definitions().map(|r| r.expect("definition ok")).collect();
    assert_eq!(definitions.len(), 1);
    assert_eq!(definitions[0].title, "café");
}

#[test]
fn named_entities_in_titles_are_resolved() {
    let text = format!("{}\n", entry_fragment("caf&eacute; &amp; &aacute;cido", "caf&eacute;", "a place"));
    let entries: Vec<_> = open(container(&[&text]))
        .entries()
        .map(|r| r.expect("entry ok"))
        .collect();

    let (definition, entry) = &entries[0];
    assert_eq!(definition.title, "café & ácido");
    assert_eq!(entry.word, "café");
    assert!(definition.entry_text.starts_with("café"));
}

#[test]
fn chunks_are_counted_as_they_are_loaded() {
    let first = format!("{}\n", entry_fragment("one", "one", "1"));
    let second = format!("{}\n", entry_fragment("two", "two", "2"));
    let bytes = container(&[&first, &second]);

    let mut definitions = open(bytes.clone()).definitions();
    assert_eq!(definitions.chunks_read(), 0);
    assert_eq!(definitions.next().expect("first").expect("definition ok").title, "one");
    assert_eq!(definitions.chunks_read(), 1);
    assert_eq!(definitions.by_ref().count(), 1);
    assert_eq!(definitions.chunks_read(), 2);

    let mut entries = open(bytes).entries();
    assert_eq!(entries.by_ref().count(), 2);
    assert_eq!(entries.chunks_read(), 2);
}
