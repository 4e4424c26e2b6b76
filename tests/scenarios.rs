use freq_huffman::{report, text, Error, FrequencyTable, HuffmanTree};

const LETTERS: &str = "\
A - 19
B - 16
C - 17
D - 11
E - 42
F - 12
G - 14
H - 17
I - 16
J - 5
K - 10
L - 20
M - 19
N - 24
O - 18
P - 13
Q - 1
R - 25
S - 35
T - 25
U - 15
V - 5
W - 21
X - 2
Y - 8
Z - 3
";

fn letters() -> (FrequencyTable, HuffmanTree) {
    let table: FrequencyTable = LETTERS.parse().unwrap();
    let tree = HuffmanTree::new(&table).unwrap();
    (table, tree)
}

#[test]
fn tied_pair_merges_first() {
    let table: FrequencyTable = "A: 2\nB: 2\nC: 5".parse().unwrap();
    let tree = HuffmanTree::new(&table).unwrap();

    let pair = tree.root().left().unwrap();
    assert_eq!(pair.label(), "AB");
    assert_eq!(pair.frequency(), 4);
    assert_eq!(tree.code('A'), Some("00"));
    assert_eq!(tree.code('B'), Some("01"));
    assert_eq!(tree.code('C'), Some("1"));
}

#[test]
fn single_symbol_table() {
    let table: FrequencyTable = "A 10".parse().unwrap();
    let tree = HuffmanTree::new(&table).unwrap();
    assert!(tree.is_degenerate());
    assert_eq!(tree.code('A'), Some(""));
    assert_eq!(tree.decode("000").unwrap(), "AAA");
}

#[test]
fn unfinished_code_is_reported() {
    let table: FrequencyTable = "A 1\nB 1\nC 1\nD 1\nE 10".parse().unwrap();
    let tree = HuffmanTree::new(&table).unwrap();
    match tree.decode("01") {
        Err(Error::MalformedCode {
            position,
            remaining,
        }) => {
            assert_eq!(position, 0);
            assert_eq!(remaining, 2);
        }
        other => panic!("expected a malformed code, got {:?}", other),
    }
}

#[test]
fn unknown_symbol_is_reported() {
    let (_, tree) = letters();
    assert!(matches!(
        tree.encode("HELLO1"),
        Err(Error::InvalidAlphabet {
            symbol: '1',
            position: 5
        })
    ));
}

#[test]
fn full_alphabet_roundtrip() {
    let (table, tree) = letters();
    assert_eq!(tree.root().frequency(), 413);
    assert_eq!(tree.codes().len(), table.len());

    let clear: Vec<String> =
        text::clear_messages("The quick brown fox\njumps over the lazy dog.\n").collect();
    assert_eq!(clear, vec!["THEQUICKBROWNFOX", "JUMPSOVERTHELAZYDOG"]);
    for message in &clear {
        let encoded = tree.encode(message).unwrap();
        assert_eq!(&tree.decode(&encoded).unwrap(), message);
    }

    // E is the most frequent letter, Q the least
    let shortest = tree.codes().values().map(String::len).min().unwrap();
    let longest = tree.codes().values().map(String::len).max().unwrap();
    assert_eq!(tree.code('E').map(str::len), Some(shortest));
    assert_eq!(tree.code('Q').map(str::len), Some(longest));
}

#[test]
fn report_covers_both_directions() {
    let (table, tree) = letters();
    let encoded_hello = tree.encode("HELLO").unwrap();

    let mut out = Vec::new();
    report::write_report(&mut out, &table, &tree, &["HELLO"], &[encoded_hello.as_str()]).unwrap();
    let report = String::from_utf8(out).unwrap();

    assert!(report.contains(&format!("\nInput: HELLO\nOutput: {}\n", encoded_hello)));
    assert!(report.contains(&format!("\nInput: {}\nOutput: HELLO\n", encoded_hello)));
    assert!(report.contains(&format!("E : 42 : {}\n", tree.code('E').unwrap())));
    assert_eq!(report.matches(" : ").count(), 2 + 2 * 26);
}
