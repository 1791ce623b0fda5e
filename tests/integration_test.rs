use txtlint::filter::{DisableNextLine, DisableNextLineOptions};
use txtlint::parser::ast::NodeType;
use txtlint::rules::ReportNodeTypes;
use txtlint::{DocumentKind, LintConfig, LintError, Linter, lint_source, parse_markdown};

const REPORTED_NODE_TYPES: &[NodeType] = &[
    NodeType::BlockQuote,
    NodeType::ListItem,
    NodeType::List,
    NodeType::Header,
    NodeType::CodeBlock,
    NodeType::HorizontalRule,
    NodeType::Comment,
    NodeType::Str,
    NodeType::Break,
    NodeType::Emphasis,
    NodeType::Strong,
    NodeType::Link,
    NodeType::LinkReference,
    NodeType::Image,
    NodeType::ImageReference,
    NodeType::Definition,
    NodeType::Code,
    NodeType::Delete,
    NodeType::Table,
    NodeType::TableRow,
    NodeType::TableCell,
];

fn linter_with(rules: &[(&str, &[NodeType])]) -> Linter {
    let mut linter = Linter::new();
    for (id, node_types) in rules {
        linter.add_rule(Box::new(ReportNodeTypes::new(*id, node_types.to_vec())));
    }
    linter.add_filter(Box::new(DisableNextLine::new(
        DisableNextLineOptions::default(),
    )));
    linter
}

fn lint_markdown(linter: &Linter, source: &str) -> (Vec<LintError>, usize) {
    let document = parse_markdown(source).expect("markdown should parse");
    linter.lint_with_filters(&document, source)
}

fn lines_of(errors: &[LintError]) -> Vec<usize> {
    errors.iter().filter_map(|e| e.line).collect()
}

#[test]
fn test_ignores_only_the_next_node_for_every_node_kind() {
    let cases = [
        "This is Error.",
        "This is Error. This is also Error.",
        "This is ignored *emphasis*.",
        "This is ignored `code`.",
        "This is ignored [link](https://example.com).",
        "# This is ignored header.",
        "> This is ignored blockquote.",
        "- This is ignored list.",
        "| This is ignored | table |.",
        "- This is ignored list item.",
        "---",
        "<div>This is ignored html block.</div>",
        "~~This is ignored delete.~~",
    ];
    let linter = linter_with(&[("report", REPORTED_NODE_TYPES)]);

    for text in cases {
        let source = format!(
            "\nThis is Error.\n\n<!-- textlint-disable-next-line -->\n{}\n\nThis is also Error.\n",
            text
        );
        let (errors, _) = lint_markdown(&linter, &source);
        let lines = lines_of(&errors);

        assert_eq!(errors.len(), 2, "case {:?}: {:?}", text, errors);
        assert!(lines.contains(&2), "case {:?}", text);
        assert!(!lines.contains(&5), "case {:?}", text);
        assert!(lines.contains(&7), "case {:?}", text);
    }
}

#[test]
fn test_ignores_gfm_table() {
    let linter = linter_with(&[("report", REPORTED_NODE_TYPES)]);
    let source = "Error.\n\n<!-- disable-next-line -->\n| a | b |\n| - | - |\n| c | d |\n\nError.\n";
    let (errors, ignored) = lint_markdown(&linter, source);

    assert_eq!(lines_of(&errors), vec![1, 8]);
    assert!(ignored > 0);
}

#[test]
fn test_ignores_fenced_code_block() {
    let linter = linter_with(&[("report", REPORTED_NODE_TYPES)]);
    let source = "\nThis is Error.\n<!-- textlint-disable-next-line -->\n```\nThis is ignored code block.\n```\nThis is also Error.\n";
    let (errors, ignored) = lint_markdown(&linter, source);
    let lines = lines_of(&errors);

    assert_eq!(errors.len(), 2, "{:?}", errors);
    assert!(lines.contains(&2));
    assert!(!lines.contains(&4));
    assert!(!lines.contains(&5));
    assert!(lines.contains(&7));
    assert_eq!(ignored, 1);
}

#[test]
fn test_blank_line_after_directive() {
    let linter = linter_with(&[("report", REPORTED_NODE_TYPES)]);
    let source = "\nThis is Error.\n\n<!-- textlint-disable-next-line -->\n\nThis is ignored.\n\nThis is also Error.\n";
    let (errors, _) = lint_markdown(&linter, source);
    let lines = lines_of(&errors);

    assert_eq!(errors.len(), 2);
    assert!(lines.contains(&2));
    assert!(!lines.contains(&6));
    assert!(lines.contains(&8));
}

#[test]
fn test_directive_at_end_of_document() {
    let linter = linter_with(&[("report", &[NodeType::Str])]);
    let source = "\nThis is Error.\n\n<!-- textlint-disable-next-line -->\n";
    let (errors, ignored) = lint_markdown(&linter, source);

    assert_eq!(lines_of(&errors), vec![2]);
    assert_eq!(ignored, 0);
}

#[test]
fn test_rule_scoped_directive() {
    let linter = linter_with(&[("ruleA", &[NodeType::Str]), ("ruleB", &[NodeType::Str])]);
    let source = "\n<!-- textlint-disable-next-line ruleA -->\nThis is ignored for ruleA but not for ruleB.\n\nThis is Error for both ruleA and ruleB.\n";
    let (errors, ignored) = lint_markdown(&linter, source);

    let on_line = |line: usize| -> Vec<&str> {
        let mut rules: Vec<&str> = errors
            .iter()
            .filter(|e| e.line == Some(line))
            .map(|e| e.rule.as_str())
            .collect();
        rules.sort();
        rules
    };
    assert_eq!(on_line(3), vec!["ruleB"]);
    assert_eq!(on_line(5), vec!["ruleA", "ruleB"]);
    assert_eq!(ignored, 1);
}

#[test]
fn test_multiple_rule_ids() {
    let linter = linter_with(&[
        ("ruleA", &[NodeType::Str]),
        ("ruleB", &[NodeType::Emphasis]),
    ]);
    let source = "\n<!-- textlint-disable-next-line ruleA,ruleB -->\nThis is ignored for ruleA and ruleB.\n\n**This is Error for rule B rules.**\n";
    let (errors, _) = lint_markdown(&linter, source);

    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].rule, "ruleA");
    assert_eq!(errors[0].line, Some(5));
}

#[test]
fn test_default_linter_suppresses_todo() {
    let source = "# Notes\n\n<!-- disable-next-line no-todo -->\nTODO: tracked elsewhere\n\nTODO: fix this\n";
    let result = lint_source(&Linter::with_default_rules(), source, DocumentKind::Markdown)
        .expect("markdown should parse");

    assert_eq!(result.errors.len(), 1);
    assert_eq!(result.errors[0].rule, "no-todo");
    assert_eq!(result.errors[0].line, Some(6));
    assert_eq!(result.ignored_count, 1);
}

#[test]
fn test_configured_keyword() {
    let mut config = LintConfig::default();
    config.set_disabling_next_line_comment("lint-skip");
    let linter = Linter::with_config(Some(&config));

    let source = "<!-- lint-skip -->\nTODO: a\n\n<!-- disable-next-line -->\nTODO: b\n";
    let result = lint_source(&linter, source, DocumentKind::Markdown).unwrap();

    assert_eq!(lines_of(&result.errors), vec![5]);
    assert_eq!(result.ignored_count, 1);
}

#[test]
fn test_plain_text_has_no_directives() {
    let source = "<!-- disable-next-line -->\nTODO: still reported\n";
    let result = lint_source(&Linter::with_default_rules(), source, DocumentKind::Text).unwrap();

    assert_eq!(lines_of(&result.errors), vec![2]);
    assert_eq!(result.ignored_count, 0);
}

#[test]
fn test_documents_do_not_share_state() {
    let linter = linter_with(&[("report", &[NodeType::Str])]);
    let first = "Error.\n\n<!-- disable-next-line -->\n";
    let second = "Not ignored.\n";

    let (errors, _) = lint_markdown(&linter, first);
    assert_eq!(errors.len(), 1);
    let (errors, ignored) = lint_markdown(&linter, second);
    assert_eq!(lines_of(&errors), vec![1]);
    assert_eq!(ignored, 0);
}
