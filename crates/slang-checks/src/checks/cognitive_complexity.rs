use crate::check::{InitContext, SlangCheck};
use crate::config::DEFAULT_COMPLEXITY_THRESHOLD;
use log::debug;
use slang_api::{CheckContext, CognitiveComplexity, Increment, SecondaryLocation, Tree};

/// Flags named functions whose cognitive complexity exceeds a threshold
#[derive(Debug, Clone)]
pub struct FunctionCognitiveComplexityCheck {
    threshold: u32,
}

impl FunctionCognitiveComplexityCheck {
    pub fn new(threshold: u32) -> Self {
        Self { threshold }
    }

    pub fn threshold(&self) -> u32 {
        self.threshold
    }
}

impl Default for FunctionCognitiveComplexityCheck {
    fn default() -> Self {
        Self::new(DEFAULT_COMPLEXITY_THRESHOLD)
    }
}

impl SlangCheck for FunctionCognitiveComplexityCheck {
    fn key(&self) -> &'static str {
        "S3776"
    }

    fn initialize<'a>(&self, init: &mut InitContext<'a>) {
        let threshold = self.threshold;
        init.register::<Tree, _>(move |ctx, tree| {
            let Tree::FunctionDeclaration(function) = tree else {
                return;
            };
            if function.name().is_none() {
                return;
            }
            let complexity = CognitiveComplexity::new(tree);
            let value = complexity.value();
            if value <= threshold {
                return;
            }
            debug!("function complexity {} above {}", value, threshold);
            let message = format!(
                "Refactor this method to reduce its Cognitive Complexity from {} to the {} allowed.",
                value, threshold
            );
            let secondaries = complexity
                .increments()
                .iter()
                .map(secondary_location)
                .collect();
            let gap = f64::from(value - threshold);
            ctx.report_issue(
                function.range_to_highlight().into(),
                message,
                secondaries,
                Some(gap),
            );
        });
    }
}

fn secondary_location(increment: &Increment) -> SecondaryLocation {
    let nesting = increment.nesting_level();
    let mut message = format!("+{}", increment.weight());
    if nesting > 0 {
        message.push_str(&format!(" (incl {} for nesting)", nesting));
    }
    SecondaryLocation::with_message(increment.token().range, message)
}
