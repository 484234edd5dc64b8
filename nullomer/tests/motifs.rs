extern crate nullomer;

use std::str::FromStr;

use nullomer::abc::Alphabet;
use nullomer::abc::Protein;
use nullomer::codon::CodonLookup;
use nullomer::count::PeptideCounter;
use nullomer::count::REPORT_HEADER;
use nullomer::err::ConfigError;
use nullomer::matcher::MotifMatcher;
use nullomer::matcher::MotifRow;
use nullomer::matcher::RowOutcome;
use nullomer::motif::Motif;
use nullomer::motif::Motifs;
use nullomer::table::CountTable;

const HEADER: &str = REPORT_HEADER;

fn report_lines(sequence: &str, k: usize) -> Vec<String> {
    let mut counter = PeptideCounter::<Protein>::new(k).unwrap();
    counter.count_sequence(sequence);
    let codons = CodonLookup::standard();
    let mut lines = vec![HEADER.to_string()];
    lines.extend(
        counter
            .report(0, &codons)
            .map(|row| format!("{},{},{}", row.peptide(), row.rate(), row.count())),
    );
    lines
}

fn rank(lines: &[String], m: usize) -> Vec<MotifRow<Protein>> {
    let mut matcher = MotifMatcher::<Protein>::new(m).unwrap();
    matcher.scan_rows(lines);
    matcher.finish(&CodonLookup::standard()).unwrap().collect()
}

#[test]
fn concrete_scenario() {
    let lines = report_lines("AARRNN", 2);
    let mut matcher = MotifMatcher::<Protein>::new(2).unwrap();
    let outcomes = lines
        .iter()
        .map(|line| matcher.scan_row(line))
        .collect::<Vec<_>>();
    assert_eq!(outcomes[0], RowOutcome::Header);
    assert_eq!(
        outcomes.iter().filter(|&&o| o == RowOutcome::Observed).count(),
        5
    );
    assert_eq!(matcher.nullomers(), 395);

    // every nullomer is a dipeptide, so `..` occurs once in each of them
    let rows = matcher
        .finish(&CodonLookup::standard())
        .unwrap()
        .collect::<Vec<_>>();
    assert_eq!(rows.len(), 441);
    assert_eq!(rows[0].motif.to_string(), "..");
    assert_eq!(rows[0].count, 395);
    assert_eq!(rows[0].percent, 100.0);
    assert_eq!(rows[0].codons, vec![61, 61]);
    assert_eq!(rows[0].codon_sum, 122);
    assert_eq!(rows[0].chance, 1.0);

    let find = |s: &str| rows.iter().find(|r| r.motif.to_string() == s).unwrap();
    // A. is missing AA and AR
    assert_eq!(find("A.").count, 18);
    // .N is missing RN and NN
    assert_eq!(find(".N").count, 18);
    assert_eq!(find("W.").count, 20);
    assert_eq!(find("AA").count, 0);
    assert_eq!(find("AC").count, 1);
}

#[test]
fn zero_tallies_rank_last() {
    let lines = report_lines("AARRNN", 2);
    let rows = rank(&lines, 2);
    assert_eq!(rows.len(), Motifs::<Protein>::enumerate(2).unwrap().len());
    let first_zero = rows.iter().position(|r| r.count == 0).unwrap();
    assert!(rows[first_zero..].iter().all(|r| r.count == 0));
    assert!(rows[..first_zero].iter().all(|r| r.count > 0));
    assert_eq!(rows.len() - first_zero, 5);
}

#[test]
fn tallies_agree_with_substring_search() {
    let lines = vec![
        HEADER.to_string(),
        "WWWW,-1.0,0".to_string(),
        "CWCW,-1.0,0".to_string(),
        "WCCM,-1.0,0".to_string(),
        "KKKK,0.5,2".to_string(),
    ];
    let peptides = ["WWWW", "CWCW", "WCCM"];
    for row in rank(&lines, 2) {
        let expected: usize = peptides.iter().map(|p| row.motif.count_in(p)).sum();
        assert_eq!(row.count, expected as u64, "motif {}", row.motif);
    }
}

#[test]
fn determinism() {
    let lines = report_lines("MKWVTFISLLLLFSSAYSRGVFRRDTHKSEIAH", 2);
    let first = rank(&lines, 2);
    let second = rank(&lines, 2);
    assert_eq!(first, second);
    for pair in first.windows(2) {
        assert!(pair[0].count >= pair[1].count);
        if pair[0].count == pair[1].count {
            assert!(pair[0].motif.index() < pair[1].motif.index());
        }
    }
}

#[test]
fn codon_annotations() {
    let lines = vec!["WMC,-1.0,0".to_string()];
    let rows = rank(&lines, 3);
    let wmc = rows
        .iter()
        .find(|r| r.motif == Motif::from_str("W.C").unwrap())
        .unwrap();
    assert_eq!(wmc.count, 1);
    assert_eq!(wmc.codons, vec![1, 61, 2]);
    assert_eq!(wmc.codon_sum, 64);
    assert!((wmc.chance - 2.0 / (61.0 * 61.0)).abs() < 1e-12);
}

#[test]
fn no_nullomers() {
    let lines = vec![HEADER.to_string(), "AA,0.1,4".to_string()];
    let mut matcher = MotifMatcher::<Protein>::new(2).unwrap();
    matcher.scan_rows(&lines);
    assert_eq!(
        matcher.finish(&CodonLookup::standard()).unwrap_err(),
        ConfigError::NoNullomers
    );
    assert_eq!(
        MotifMatcher::<Protein>::new(0).unwrap_err(),
        ConfigError::InvalidLength(0)
    );
}

#[test]
fn invalid_configuration() {
    match MotifMatcher::<Protein>::with_limit(5, 1 << 20) {
        Err(ConfigError::MemoryLimit {
            length: 5,
            required: Some(_),
            limit,
        }) => assert_eq!(limit, 1 << 20),
        other => panic!("unexpected result: {:?}", other.map(|_| ())),
    }
    match MotifMatcher::<Protein>::new(32) {
        Err(ConfigError::MemoryLimit { required: None, .. }) => (),
        other => panic!("unexpected result: {:?}", other.map(|_| ())),
    }
}

#[test]
fn limit_covers_ranking() {
    type Tallies = CountTable<<Protein as Alphabet>::K>;
    let table = Tallies::table_bytes(3).unwrap();
    let required = Tallies::required_bytes(3).unwrap();
    assert!(table < required);
    match MotifMatcher::<Protein>::with_limit(3, table) {
        Err(ConfigError::MemoryLimit { length: 3, .. }) => (),
        other => panic!("unexpected result: {:?}", other.map(|_| ())),
    }
    let mut matcher = MotifMatcher::<Protein>::with_limit(3, required).unwrap();
    matcher.scan_row("WMC,-1.0,0");
    let report = matcher.finish(&CodonLookup::standard()).unwrap();
    assert_eq!(report.len(), 21 * 21 * 21);
}
