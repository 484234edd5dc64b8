extern crate nullomer;

use nullomer::abc::Alphabet;
use nullomer::abc::AminoAcid::*;
use nullomer::abc::Background;
use nullomer::abc::Protein;
use nullomer::codon::CodonLookup;
use nullomer::count::PeptideCounter;
use nullomer::count::SequenceOutcome;
use nullomer::count::NULLOMER_RATE;
use nullomer::err::ConfigError;
use nullomer::err::InvalidSymbol;
use nullomer::seq::EncodedSequence;
use nullomer::table::CountTable;

const SEQUENCES: &[&str] = &[
    "MKWVTFISLLLLFSSAYSRGVFRRDTHKSEIAHRFKDLGEEHFKGLVLIAFSQYLQQCPFDEHVKLVNELTEFAKTCVADESHAGCEKSLHTLFGDELCKVASLRETYGDMADCCEKQEPERNECFLSHKDDSPDLPKLKPDPNTLCDEFKADEKKFWGKYLYEIARRHPYFYAPELLYYANKYNGVFQECCQAEDKGACLLPKIETMREKVLASSARQRLRCASIQKFGERALKAWSVARLSQKFPKAEFVEVTKLVTDLTKVHKECCHGDLLECADDRADLAKYICDNQDTISSKLKECCDKPLLEKSHCIAEVEKDAIPENLPPLTADFAEDKDVCKNYQEAKDAFLGSFLYEYSRRHPEYAVSVLLRLAKEYEATLEECCAKDDPHACYSTVFDKLKHLVDEPQNLIKQNCDQFEKLGEYGFQNALIVRYTRKVPQVSTPTLVEVSRSLGKVGTRCCTKPESERMPCTEDYLSLILNRLCVLHEKTPVSEKVTKCCTESLVNRRPCFSALTPDETYVPKAFDEKLFTFHADICTLPDTEKQIKKQTALVELLKHKPKATEEQLKTVMENFVAFVDKCCAADDKEACFAVEGPKLVVSTQTALA",
    "MADQLTEEQIAEFKEAFSLFDKDGDGTITTKELGTVMRSLGQNPTEAELQDMINEVDADGNGTIDFPEFLTMMARKMKDTDSEEEIREAFRVFDKDGNGYISAAELRHVMTNLGEKLTDEEVDEMIREADIDGDGQVNYEEFVQMMTAK",
    "GAVLIPFMWSTCYNQDEKRH",
];

#[test]
fn kmer_events() {
    for k in 1..=3 {
        let mut counter = PeptideCounter::<Protein>::new(k).unwrap();
        let mut expected = 0;
        for seq in SEQUENCES {
            let outcome = counter.count_sequence(seq);
            assert_eq!(outcome, SequenceOutcome::Counted(seq.len() - k + 1));
            expected += (seq.len() - k + 1) as u64;
        }
        assert_eq!(counter.total(), expected);
        assert_eq!(counter.stats().peptides, expected);
        for seq in SEQUENCES {
            let encoded = EncodedSequence::<Protein>::encode(seq).unwrap();
            for kmer in encoded.as_ref().windows(k) {
                assert!(counter.count_of(kmer).unwrap() >= 1);
            }
        }
    }
}

#[test]
fn rejection() {
    let mut counter = PeptideCounter::<Protein>::new(2).unwrap();
    counter.count_sequence("MKWV");
    let before = counter.total();
    for seq in ["MKBWV", "MKXWV", "mkwv", "MKW*"] {
        match counter.count_sequence(seq) {
            SequenceOutcome::Rejected(InvalidSymbol(_)) => (),
            other => panic!("unexpected outcome for {:?}: {:?}", seq, other),
        }
    }
    assert_eq!(counter.total(), before);
    assert_eq!(counter.stats().rejected, 4);
}

#[test]
fn conservation() {
    let mut counter = PeptideCounter::<Protein>::new(2).unwrap();
    counter.count_sequences(SEQUENCES);
    let total = counter.total();
    let codons = CodonLookup::standard();
    for cutoff in [0, 1, 2, 3, 5, 1000] {
        let reported: u64 = counter.report(cutoff, &codons).map(|r| r.count()).sum();
        let excluded: u64 = counter.table().iter().filter(|&c| c < cutoff).sum();
        assert_eq!(reported + excluded, total, "cutoff = {}", cutoff);
    }
}

#[test]
fn grouped_by_descending_count() {
    let mut counter = PeptideCounter::<Protein>::new(2).unwrap();
    counter.count_sequences(SEQUENCES);
    let codons = CodonLookup::standard();
    let rows = counter.report(0, &codons).collect::<Vec<_>>();
    assert_eq!(rows.len(), 400);
    for pair in rows.windows(2) {
        assert!(pair[0].count() >= pair[1].count());
        if pair[0].count() == pair[1].count() {
            assert!(pair[0].peptide().to_string() < pair[1].peptide().to_string());
        }
    }
    let rows = counter.report(2, &codons).collect::<Vec<_>>();
    assert!(rows.iter().all(|r| r.count() >= 2));
}

#[test]
fn nullomer_sentinel() {
    let mut counter = PeptideCounter::<Protein>::new(2).unwrap();
    counter.count_sequences(SEQUENCES);
    let codons = CodonLookup::standard();
    let background = Background::<Protein>::swissprot();
    for row in counter.report(0, &codons).chain(counter.report(0, &background)) {
        if row.count() == 0 {
            assert_eq!(row.rate(), NULLOMER_RATE);
        } else {
            assert!(row.rate() > 0.0);
        }
    }
}

#[test]
fn occurrence_rate() {
    let mut counter = PeptideCounter::<Protein>::new(1).unwrap();
    counter.count_sequence("WWWWAAAAAAAAAAAAAAAA");
    let codons = CodonLookup::standard();
    let rows = counter.report(1, &codons).collect::<Vec<_>>();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].peptide()[0], A);
    assert!((rows[0].rate() - (4.0 / 61.0) * 20.0 / 16.0).abs() < 1e-12);
    assert_eq!(rows[1].peptide()[0], W);
    assert!((rows[1].rate() - (1.0 / 61.0) * 20.0 / 4.0).abs() < 1e-12);
}

#[test]
fn concrete_scenario() {
    let mut counter = PeptideCounter::<Protein>::new(2).unwrap();
    assert_eq!(counter.count_sequence("AARRNN"), SequenceOutcome::Counted(5));
    for peptide in [[A, A], [A, R], [R, R], [R, N], [N, N]] {
        assert_eq!(counter.count_of(&peptide), Some(1));
    }
    let codons = CodonLookup::standard();
    let rows = counter.report(0, &codons).collect::<Vec<_>>();
    assert_eq!(rows.iter().filter(|r| r.is_nullomer()).count(), 395);
    let observed = rows[..5]
        .iter()
        .map(|r| r.peptide().to_string())
        .collect::<Vec<_>>();
    assert_eq!(observed, ["AA", "AR", "NN", "RN", "RR"]);
}

#[test]
fn invalid_configuration() {
    assert_eq!(
        PeptideCounter::<Protein>::new(0).unwrap_err(),
        ConfigError::InvalidLength(0)
    );
    match PeptideCounter::<Protein>::with_limit(6, 1 << 20) {
        Err(ConfigError::MemoryLimit { length: 6, .. }) => (),
        other => panic!("unexpected result: {:?}", other.map(|_| ())),
    }
    match PeptideCounter::<Protein>::new(32) {
        Err(ConfigError::MemoryLimit { required: None, .. }) => (),
        other => panic!("unexpected result: {:?}", other.map(|_| ())),
    }
}

#[test]
fn limit_covers_report() {
    type Table = CountTable<<Protein as Alphabet>::R>;
    let table = Table::table_bytes(3).unwrap();
    let required = Table::required_bytes(3).unwrap();
    match PeptideCounter::<Protein>::with_limit(3, (table + required) / 2) {
        Err(ConfigError::MemoryLimit {
            length: 3,
            required: Some(r),
            ..
        }) => assert_eq!(r, required),
        other => panic!("unexpected result: {:?}", other.map(|_| ())),
    }
    let mut counter = PeptideCounter::<Protein>::with_limit(3, required).unwrap();
    counter.count_sequence("MKWVTF");
    let codons = CodonLookup::standard();
    assert_eq!(counter.report(0, &codons).len(), 8000);
}
