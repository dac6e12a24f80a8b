//! Structural checks and the list of all of them.

mod all_branches_identical;
mod cognitive_complexity;
mod conditional;
mod duplicate_branch;
mod duplicated_function;
mod identical_binary_operand;
mod identical_conditions;
mod octal_values;

pub use all_branches_identical::AllBranchesIdenticalCheck;
pub use cognitive_complexity::FunctionCognitiveComplexityCheck;
pub use duplicate_branch::DuplicateBranchCheck;
pub use duplicated_function::DuplicatedFunctionImplementationCheck;
pub use identical_binary_operand::IdenticalBinaryOperandCheck;
pub use identical_conditions::IdenticalConditionsCheck;
pub use octal_values::OctalValuesCheck;

use crate::check::SlangCheck;
use crate::config::ChecksConfig;

/// Every available check, configured from `config`, enabled or not
pub fn all_checks(config: &ChecksConfig) -> Vec<Box<dyn SlangCheck>> {
    let checks: Vec<Box<dyn SlangCheck>> = vec![
        Box::new(FunctionCognitiveComplexityCheck::new(
            config.complexity_threshold,
        )),
        Box::new(DuplicateBranchCheck),
        Box::new(AllBranchesIdenticalCheck),
        Box::new(IdenticalConditionsCheck),
        Box::new(IdenticalBinaryOperandCheck),
        Box::new(DuplicatedFunctionImplementationCheck),
        Box::new(OctalValuesCheck),
    ];
    checks
}

#[cfg(test)]
pub(crate) mod test_support {
    use crate::check::{InitContext, SlangCheck};
    use crate::context::CheckScanContext;
    use crate::issue::Issue;
    use slang_api::AstConverter;
    use slang_parser::SlangConverter;

    /// Issues raised by `check` on `source`
    pub(crate) fn issues_of(check: &dyn SlangCheck, source: &str) -> Vec<Issue> {
        let tree = SlangConverter::new().parse(source).unwrap();
        let mut init = InitContext::new();
        init.add_check(check);
        let visitor = init.into_visitor();
        let mut ctx = CheckScanContext::new(Some("test.slang"));
        visitor.scan(&mut ctx, &tree);
        ctx.into_issues()
    }

    /// Start line and message of each issue
    pub(crate) fn lines_and_messages(issues: &[Issue]) -> Vec<(usize, String)> {
        issues
            .iter()
            .map(|issue| (issue.line().unwrap_or(0), issue.message.clone()))
            .collect()
    }
}
