use pike_regex::Regex;
use regex as rust_regex;

/// Compare our engine against the `regex` crate on a pattern that means the
/// same thing in both syntaxes.
///
/// Our matching is anchored at the start of the subject and `.` matches any
/// byte, so the oracle pattern is wrapped as `^(?s:...)`. Both engines use
/// leftmost-first semantics, so match lengths and participating capture
/// groups must agree. Groups the oracle reports as unmatched are skipped:
/// our capture vectors are zero-filled, so an untouched group reads as the
/// empty span at 0 rather than "no group".
pub fn check_against_oracle(pattern: &str, input: &str) {
    let ours = Regex::new(pattern)
        .unwrap_or_else(|e| panic!("our engine rejected {:?}: {}", pattern, e));
    let oracle = rust_regex::Regex::new(&format!("^(?s:{pattern})"))
        .unwrap_or_else(|e| panic!("oracle rejected {:?}: {}", pattern, e));

    let our_match = ours.execute(input);
    let oracle_caps = oracle.captures(input);

    match (&our_match, &oracle_caps) {
        (Some(m), Some(caps)) => {
            let whole = caps.get(0).unwrap();
            assert_eq!(
                m.len(),
                whole.end(),
                "match length mismatch for {:?} on {:?}",
                pattern,
                input
            );
            for k in 0..ours.num_captures() {
                if let Some(group) = caps.get(k + 1) {
                    assert_eq!(
                        m.captures().get(k),
                        Some(group.as_str()),
                        "group {} mismatch for {:?} on {:?}",
                        k,
                        pattern,
                        input
                    );
                }
            }
        }
        (None, None) => (),
        (ours, oracle) => panic!(
            "disagreement for {:?} on {:?}: ours={:?} oracle={:?}",
            pattern, input, ours, oracle
        ),
    }
}
