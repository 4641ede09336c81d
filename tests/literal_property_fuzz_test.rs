use fluent_regex::PatternBuilder;
use proptest::prelude::*;
use proptest::test_runner::TestCaseResult;

fn text_strategy() -> BoxedStrategy<String> {
    prop_oneof![
        "[ -~]{0,24}",
        "\\PC{0,12}",
        proptest::collection::vec(
            prop_oneof![
                Just("$"),
                Just("."),
                Just("("),
                Just(")"),
                Just("[]"),
                Just("{2}"),
                Just("\\"),
                Just("|"),
                Just("#"),
                Just("a-z"),
                Just("^"),
                Just("?*+"),
                Just("&&"),
                Just("~"),
                Just(" "),
                Just("\t"),
                Just("\n"),
            ],
            0..=8,
        )
        .prop_map(|parts| parts.concat()),
    ]
    .boxed()
}

fn assert_literal_matches_only_itself(
    text: &str,
    altered: &str,
    ignore_whitespace: bool,
) -> TestCaseResult {
    let mut builder = PatternBuilder::new();
    builder.start_of_string().literal(text).end_of_string();
    if ignore_whitespace {
        builder.ignore_pattern_whitespace();
    }
    let regex = builder.build();
    prop_assert!(regex.is_ok(), "literal {text:?} failed to compile: {regex:?}");
    let regex = regex.unwrap();

    prop_assert_eq!(regex.is_match(text).ok(), Some(true), "{:?}", regex.as_str());
    if altered != text {
        prop_assert_eq!(
            regex.is_match(altered).ok(),
            Some(false),
            "{:?} matched {:?}",
            regex.as_str(),
            altered
        );
    }
    Ok(())
}

fn alter_one_char(text: &str, index: usize, replacement: char) -> String {
    if text.is_empty() {
        return replacement.to_string();
    }
    let index = index % text.chars().count();
    text.chars()
        .enumerate()
        .map(|(idx, ch)| if idx == index { replacement } else { ch })
        .collect()
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 256,
        failure_persistence: None,
        .. ProptestConfig::default()
    })]

    #[test]
    fn anchored_literal_matches_exactly_its_text(
        text in text_strategy(),
        index in any::<usize>(),
        replacement in prop_oneof![Just('x'), Just('.'), Just('\\'), Just('Z'), Just('-'), Just(' ')],
        ignore_whitespace in any::<bool>(),
    ) {
        let altered = alter_one_char(&text, index, replacement);
        assert_literal_matches_only_itself(&text, &altered, ignore_whitespace)?;
    }

    #[test]
    fn pattern_and_options_are_stable_between_reads(text in text_strategy()) {
        let mut builder = PatternBuilder::new();
        builder.literal(&text).ignore_case();
        let first = builder.pattern().to_string();
        let options = builder.options();
        prop_assert_eq!(builder.pattern(), first.as_str());
        prop_assert_eq!(builder.options(), options);
        prop_assert_eq!(builder.to_string(), format!("/{first}/IgnoreCase"));
    }
}
