// Integration tests running the check runner over SLang sources
use slang_checks::{
    AnalysisMetrics, ChecksConfig, CheckError, CheckRunner, FileReport, InitContext, Issue,
    SlangCheck,
};
use slang_parser::SlangConverter;
use std::io::Write;
use tempfile::NamedTempFile;

const ORDERS: &str = r#"
// Order processing
class Orders {
    private fun total(order) {
        var sum = 0;
        for (var item = order.items) {
            if (item.count > 0 && item.price > 0 || item.free) {
                sum += item.count * item.price;
            };
        };
        return sum;
    }

    private fun discount(order) {
        match (order.kind) {
            "retail" -> {
                log("retail");
                return 5;
            };
            "wholesale" -> 10;
            "partner" -> {
                log("retail");
                return 5;
            };
            else -> 0;
        };
    }
}
"#;

const HELPERS: &str = r#"
fun first(list) {
    check(list);
    return list.head;
}

fun second(list) {
    check(list);
    return list.head;
}

fun same(a) {
    return a - a;
}
"#;

fn sources() -> Vec<(String, String)> {
    vec![
        ("orders.slang".to_string(), ORDERS.to_string()),
        ("helpers.slang".to_string(), HELPERS.to_string()),
        ("broken.slang".to_string(), "fun broken( {".to_string()),
    ]
}

fn report<'r>(reports: &'r [FileReport], file_name: &str) -> &'r FileReport {
    reports
        .iter()
        .find(|report| report.file_name == file_name)
        .unwrap()
}

#[test]
fn test_analyze_project() {
    let runner = CheckRunner::new();
    let result = runner
        .analyze_all(&SlangConverter::new(), &sources())
        .unwrap();

    assert_eq!(result.reports.len(), 2);
    assert_eq!(result.failed_files.len(), 1);
    assert_eq!(result.failed_files[0].0, "broken.slang");

    let orders = report(&result.reports, "orders.slang");
    let keys: Vec<&str> = orders.issues.iter().map(|i| i.rule_key.as_str()).collect();
    assert_eq!(keys, vec!["S1871"]);
    assert_eq!(orders.issues[0].line(), Some(21));
    assert_eq!(
        orders.issues[0].message,
        "This branch's code block is the same as the block for the branch on line 16."
    );

    let helpers = report(&result.reports, "helpers.slang");
    let issues: Vec<(&str, Option<usize>)> = helpers
        .issues
        .iter()
        .map(|i| (i.rule_key.as_str(), i.line()))
        .collect();
    // S4144 fires on the top-level node, before any nested node is visited
    assert_eq!(issues, vec![("S4144", Some(7)), ("S1764", Some(13))]);

    let metrics = runner.metrics();
    assert_eq!(metrics.files_analyzed, 2);
    assert_eq!(metrics.files_failed, 1);
    assert_eq!(metrics.total_issues, 3);
    assert!((metrics.success_rate() - 2.0 / 3.0).abs() < f64::EPSILON);
}

#[test]
fn test_complexity_with_configured_threshold() {
    let runner = CheckRunner::with_config(ChecksConfig::default().with_complexity_threshold(2));
    let report = runner
        .analyze_source(&SlangConverter::new(), "orders.slang", ORDERS)
        .unwrap();
    let complexity: Vec<&Issue> = report.issues_for("S3776").collect();
    assert_eq!(complexity.len(), 1);
    assert_eq!(
        complexity[0].message,
        "Refactor this method to reduce its Cognitive Complexity from 5 to the 2 allowed."
    );
    let secondaries: Vec<&str> = complexity[0]
        .secondaries
        .iter()
        .filter_map(|s| s.message.as_deref())
        .collect();
    assert_eq!(secondaries, vec!["+1", "+2 (incl 1 for nesting)", "+1", "+1"]);
}

#[test]
fn test_config_loaded_from_file() {
    let mut file = NamedTempFile::new().unwrap();
    write!(
        file,
        r#"{{ "disabled_rules": ["S4144", "S1871"], "parallel": false }}"#
    )
    .unwrap();
    file.flush().unwrap();

    let config = ChecksConfig::load(file.path()).unwrap();
    let runner = CheckRunner::with_config(config);
    let result = runner
        .analyze_all(&SlangConverter::new(), &sources())
        .unwrap();
    assert_eq!(result.total_issues(), 1);
    assert_eq!(result.reports[1].issues[0].rule_key, "S1764");
}

struct TodoCheck;

impl SlangCheck for TodoCheck {
    fn key(&self) -> &'static str {
        "TODO"
    }

    fn initialize<'a>(&self, init: &mut InitContext<'a>) {
        init.register::<slang_api::IdentifierTree, _>(|ctx, identifier| {
            use slang_api::CheckContext;
            if identifier.name() == "todo" {
                let file = ctx.filename().unwrap_or_default().to_string();
                ctx.report_simple(identifier.text_range().into(), format!("todo in {file}"));
            }
        });
    }
}

#[test]
fn test_custom_check() {
    let checks: Vec<Box<dyn SlangCheck>> = vec![Box::new(TodoCheck)];
    let runner = CheckRunner::with_checks(ChecksConfig::default(), checks);
    let report = runner
        .analyze_source(&SlangConverter::new(), "notes.slang", "todo;\ndone;\ntodo();")
        .unwrap();
    let lines: Vec<Option<usize>> = report.issues.iter().map(Issue::line).collect();
    assert_eq!(lines, vec![Some(1), Some(3)]);
    assert_eq!(report.issues[0].message, "todo in notes.slang");
}

#[test]
fn test_parse_failure_surfaces_as_error() {
    let runner = CheckRunner::new();
    let error = runner
        .analyze_source(&SlangConverter::new(), "broken.slang", "x = ;")
        .unwrap_err();
    assert!(matches!(error, CheckError::Tree(_)));
    assert_eq!(
        runner.metrics(),
        AnalysisMetrics {
            files_failed: 1,
            total_duration: runner.metrics().total_duration,
            ..Default::default()
        }
    );
}
